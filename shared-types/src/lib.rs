use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub mod contact;
pub mod dynamic_link;
pub mod search_option;

pub use contact::{
    Contact, ContactEmail, CreateContactEmailRequest, CreateContactRequest, CreateContactResponse,
};
pub use dynamic_link::{CreateDynamicLinkRequest, DynamicLink};
pub use search_option::{
    ContactListRequest, ContactListResponse, SearchOption, DEFAULT_PAGE_LENGTH,
};

/// Error response for API endpoints
#[derive(Debug, Serialize, Deserialize, TS)]
pub struct ErrorResponse {
    pub error: String,
}
