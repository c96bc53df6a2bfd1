use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const DEFAULT_PAGE_LENGTH: i64 = 20;

fn default_page_length() -> i64 {
    DEFAULT_PAGE_LENGTH
}

/// One entry of a multiselect/autocomplete dropdown.
///
/// The widget stores `label` as the selected value and uses `value` only as
/// a unique key, so both carry the email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SearchOption {
    pub value: String,
    pub label: String,
    pub description: String,
}

/// Parameters of the `get_contact_list` remote method.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ContactListRequest {
    pub txt: String,
    #[serde(default = "default_page_length")]
    pub page_length: i64,
    /// JSON-encoded list of filter clauses, decoded server side.
    pub extra_filters: Option<String>,
}

/// Remote methods wrap their return value in a `message` envelope.
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ContactListResponse {
    pub message: Vec<SearchOption>,
}
