use crate::error::{LookupError, Result};
use regex::Regex;
use std::sync::OnceLock;

/// A named record type backed by one table.
///
/// Child doctypes hang off a parent through `parent_key` and are only
/// reachable from queries on that parent.
#[derive(Debug, PartialEq, Eq)]
pub struct DocType {
    pub name: &'static str,
    pub table: &'static str,
    pub parent: Option<(&'static str, &'static str)>,
    pub columns: &'static [&'static str],
}

pub const CONTACT: DocType = DocType {
    name: "Contact",
    table: "contacts",
    parent: None,
    columns: &[
        "id",
        "first_name",
        "middle_name",
        "last_name",
        "company_name",
        "full_name",
        "created_at",
        "updated_at",
    ],
};

pub const CONTACT_EMAIL: DocType = DocType {
    name: "Contact Email",
    table: "contact_emails",
    parent: Some(("Contact", "contact_id")),
    columns: &["id", "contact_id", "email_id", "is_primary", "idx"],
};

pub const DYNAMIC_LINK: DocType = DocType {
    name: "Dynamic Link",
    table: "dynamic_links",
    parent: Some(("Contact", "contact_id")),
    columns: &["id", "contact_id", "link_doctype", "link_name", "idx"],
};

const DOCTYPES: &[&DocType] = &[&CONTACT, &CONTACT_EMAIL, &DYNAMIC_LINK];

pub fn doctype(name: &str) -> Result<&'static DocType> {
    DOCTYPES
        .iter()
        .copied()
        .find(|d| d.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| LookupError::UnknownDoctype(name.to_string()))
}

impl DocType {
    pub fn column(&self, field: &str) -> Result<&'static str> {
        self.columns
            .iter()
            .copied()
            .find(|c| *c == field)
            .ok_or_else(|| LookupError::UnknownField {
                doctype: self.name.to_string(),
                field: field.to_string(),
            })
    }

    pub fn is_child_of(&self, parent: &DocType) -> bool {
        matches!(self.parent, Some((name, _)) if name == parent.name)
    }
}

/// A field reference, optionally qualified with the doctype that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    pub doctype: Option<String>,
    pub field: String,
}

fn qualified_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:`tab([^`]+)`|([A-Za-z][A-Za-z0-9 _]*))\.`?([A-Za-z_][A-Za-z0-9_]*)`?$")
            .expect("field path pattern is valid")
    })
}

fn bare_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^`?([A-Za-z_][A-Za-z0-9_]*)`?$").expect("field name pattern is valid")
    })
}

impl FieldPath {
    pub fn new(doctype: Option<&str>, field: &str) -> Self {
        Self {
            doctype: doctype.map(str::to_string),
            field: field.to_string(),
        }
    }

    /// Accepts `field`, `` `tabDoc Type`.field `` and `Doc Type.field`.
    pub fn parse(path: &str) -> Result<Self> {
        let path = path.trim();

        if let Some(caps) = bare_pattern().captures(path) {
            return Ok(Self::new(None, &caps[1]));
        }

        if let Some(caps) = qualified_pattern().captures(path) {
            let doctype = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str().trim());
            return Ok(Self::new(doctype, &caps[3]));
        }

        Err(LookupError::InvalidFilter(format!(
            "Invalid field path: {}",
            path
        )))
    }

    /// Output name of the field in a result record.
    pub fn output_name(&self) -> &str {
        &self.field
    }
}

/// A field path resolved against the schema of the queried doctype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedField {
    pub doctype: &'static DocType,
    pub column: &'static str,
}

impl ResolvedField {
    pub fn sql(&self) -> String {
        format!("{}.{}", self.doctype.table, self.column)
    }
}

pub fn resolve(main: &'static DocType, path: &FieldPath) -> Result<ResolvedField> {
    let owner = match path.doctype.as_deref() {
        None => main,
        Some(name) => {
            let owner = doctype(name)?;
            if owner != main && !owner.is_child_of(main) {
                return Err(LookupError::InvalidFilter(format!(
                    "{} is not linked to {}",
                    owner.name, main.name
                )));
            }
            owner
        }
    };

    Ok(ResolvedField {
        doctype: owner,
        column: owner.column(&path.field)?,
    })
}
