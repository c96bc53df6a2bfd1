use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Attaches a contact to some other named record, e.g. a Supplier.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DynamicLink {
    pub id: i64,
    pub contact_id: i64,
    pub link_doctype: String,
    pub link_name: String,
    pub idx: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateDynamicLinkRequest {
    pub link_doctype: String,
    pub link_name: String,
}
