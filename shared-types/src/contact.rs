use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::dynamic_link::{CreateDynamicLinkRequest, DynamicLink};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Contact {
    pub id: i64,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
    pub full_name: String,
    pub emails: Vec<ContactEmail>,
    pub links: Vec<DynamicLink>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// One email address row owned by a contact.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ContactEmail {
    pub id: i64,
    pub contact_id: i64,
    pub email_id: String,
    pub is_primary: bool,
    pub idx: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateContactRequest {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
    #[serde(default)]
    pub emails: Vec<CreateContactEmailRequest>,
    #[serde(default)]
    pub links: Vec<CreateDynamicLinkRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateContactEmailRequest {
    pub email_id: String,
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateContactResponse {
    pub id: i64,
    pub full_name: String,
}
