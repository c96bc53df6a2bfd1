//! Email lookup behind the multiselect contact field.
//!
//! Searching also covers the contact's dynamic links, so typing the name of
//! a supplier returns the emails of every contact linked to that supplier.

use crate::error::Result;
use crate::query::{
    parse_filters, FieldPath, FilterClause, ListQuery, Operator, Record, RecordQuery,
};
use shared_types::SearchOption;
use tracing::{debug, warn};

const NAME_FIELDS: [&str; 4] = ["first_name", "middle_name", "last_name", "company_name"];

pub async fn get_contact_list<Q: RecordQuery + ?Sized>(
    engine: &Q,
    txt: &str,
    page_length: i64,
    extra_filters: Option<&str>,
) -> Result<Vec<SearchOption>> {
    let mut filters = vec![FilterClause::on("Contact Email", "email_id", Operator::Is, "set")];

    if let Some(raw) = extra_filters {
        let extra = parse_filters(raw).map_err(|e| {
            warn!("Rejected extra_filters {:?}: {}", raw, e);
            e
        })?;
        filters.extend(extra);
    }

    let pattern = format!("%{}%", txt);
    let mut or_filters: Vec<FilterClause> = NAME_FIELDS
        .iter()
        .map(|field| FilterClause::field(field, Operator::Like, pattern.as_str()))
        .collect();
    or_filters.push(FilterClause::on("Contact Email", "email_id", Operator::Like, pattern.as_str()));
    or_filters.push(FilterClause::on("Dynamic Link", "link_name", Operator::Like, pattern.as_str()));

    let query = ListQuery {
        doctype: "Contact".to_string(),
        fields: vec![
            FieldPath::new(None, "full_name"),
            FieldPath::new(Some("Contact Email"), "email_id"),
            FieldPath::new(Some("Dynamic Link"), "link_name"),
        ],
        filters,
        or_filters,
        page_length,
    };

    let rows = engine.get_list(query).await?;
    debug!(
        "get_contact_list txt={:?} page_length={} returned {} rows",
        txt,
        page_length,
        rows.len()
    );

    Ok(rows.iter().map(to_search_option).collect())
}

/// `value` and `label` both carry the email; the description is the full
/// name followed by the linked record in parentheses, when there is one.
pub fn to_search_option(row: &Record) -> SearchOption {
    let email = row.get_str("email_id").unwrap_or_default().to_string();
    let full_name = row.get_str("full_name").unwrap_or_default();

    let description = match row.get_str("link_name").filter(|l| !l.is_empty()) {
        Some(link_name) => format!("{} ({})", full_name, link_name),
        None => full_name.to_string(),
    };

    SearchOption {
        value: email.clone(),
        label: email,
        description,
    }
}
