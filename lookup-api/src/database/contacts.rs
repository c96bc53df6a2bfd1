use crate::database::AsyncDbConnection;
use crate::error::{LookupError, Result};
use shared_types::{Contact, ContactEmail, CreateContactRequest, DynamicLink};

/// Join the non-empty name parts with single spaces, falling back to the
/// company name when the contact has no personal name at all.
pub fn build_full_name(request: &CreateContactRequest) -> String {
    let parts: Vec<&str> = [
        request.first_name.as_deref(),
        request.middle_name.as_deref(),
        request.last_name.as_deref(),
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .filter(|part| !part.is_empty())
    .collect();

    if parts.is_empty() {
        request
            .company_name
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string()
    } else {
        parts.join(" ")
    }
}

pub async fn insert_contact(conn: AsyncDbConnection, request: CreateContactRequest) -> Result<i64> {
    let mut conn = conn.lock().await?;
    let now = chrono::Utc::now().timestamp();
    let full_name = build_full_name(&request);

    let tx = conn.transaction()?;

    let id: i64 = tx.query_row(
        "INSERT INTO contacts
         (first_name, middle_name, last_name, company_name, full_name, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)
         RETURNING id",
        rusqlite::params![
            request.first_name.as_ref(),
            request.middle_name.as_ref(),
            request.last_name.as_ref(),
            request.company_name.as_ref(),
            &full_name,
            now,
            now
        ],
        |row| row.get(0),
    )?;

    for (idx, email) in request.emails.iter().enumerate() {
        tx.execute(
            "INSERT INTO contact_emails (contact_id, email_id, is_primary, idx)
             VALUES (?, ?, ?, ?)",
            rusqlite::params![id, email.email_id.trim(), email.is_primary, idx as i64],
        )?;
    }

    for (idx, link) in request.links.iter().enumerate() {
        tx.execute(
            "INSERT INTO dynamic_links (contact_id, link_doctype, link_name, idx)
             VALUES (?, ?, ?, ?)",
            rusqlite::params![id, &link.link_doctype, &link.link_name, idx as i64],
        )?;
    }

    tx.commit()?;

    tracing::debug!(
        "Inserted contact {} ({}) with {} emails and {} links",
        id,
        full_name,
        request.emails.len(),
        request.links.len()
    );

    Ok(id)
}

pub async fn get_contact(conn: AsyncDbConnection, id: i64) -> Result<Contact> {
    let conn = conn.lock().await?;

    let contact = conn.query_row(
        "SELECT id, first_name, middle_name, last_name, company_name, full_name,
                created_at, updated_at
         FROM contacts
         WHERE id = ?",
        [id],
        |row| {
            Ok(Contact {
                id: row.get(0)?,
                first_name: row.get(1)?,
                middle_name: row.get(2)?,
                last_name: row.get(3)?,
                company_name: row.get(4)?,
                full_name: row.get(5)?,
                emails: Vec::new(),
                links: Vec::new(),
                created_at: row.get(6)?,
                updated_at: row.get(7)?,
            })
        },
    );

    let mut contact = match contact {
        Ok(c) => c,
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            return Err(LookupError::NotFound(format!("Contact {}", id)))
        }
        Err(e) => return Err(e.into()),
    };

    let mut stmt = conn.prepare(
        "SELECT id, contact_id, email_id, is_primary, idx
         FROM contact_emails
         WHERE contact_id = ?
         ORDER BY idx",
    )?;
    contact.emails = stmt
        .query_map([id], |row| {
            Ok(ContactEmail {
                id: row.get(0)?,
                contact_id: row.get(1)?,
                email_id: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                is_primary: row.get(3)?,
                idx: row.get(4)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut stmt = conn.prepare(
        "SELECT id, contact_id, link_doctype, link_name, idx
         FROM dynamic_links
         WHERE contact_id = ?
         ORDER BY idx",
    )?;
    contact.links = stmt
        .query_map([id], |row| {
            Ok(DynamicLink {
                id: row.get(0)?,
                contact_id: row.get(1)?,
                link_doctype: row.get(2)?,
                link_name: row.get(3)?,
                idx: row.get(4)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(contact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::test_database;
    use shared_types::{CreateContactEmailRequest, CreateDynamicLinkRequest};

    fn request(first: Option<&str>, last: Option<&str>, company: Option<&str>) -> CreateContactRequest {
        CreateContactRequest {
            first_name: first.map(str::to_string),
            last_name: last.map(str::to_string),
            company_name: company.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_full_name() {
        assert_eq!(build_full_name(&request(Some("Jane"), Some("Doe"), None)), "Jane Doe");
        assert_eq!(build_full_name(&request(Some("Jane"), Some(" "), None)), "Jane");
        assert_eq!(build_full_name(&request(None, None, Some("Acme Corp"))), "Acme Corp");
        assert_eq!(build_full_name(&request(None, None, None)), "");

        let with_middle = CreateContactRequest {
            middle_name: Some("Q".to_string()),
            ..request(Some("Jane"), Some("Doe"), Some("Acme Corp"))
        };
        assert_eq!(build_full_name(&with_middle), "Jane Q Doe");
    }

    #[tokio::test]
    async fn test_insert_and_get_contact() {
        let (_dir, db) = test_database();

        let id = insert_contact(
            db.async_connection.clone(),
            CreateContactRequest {
                emails: vec![
                    CreateContactEmailRequest {
                        email_id: "jane@x.com".to_string(),
                        is_primary: true,
                    },
                    CreateContactEmailRequest {
                        email_id: "jane.doe@acme.com".to_string(),
                        is_primary: false,
                    },
                ],
                links: vec![CreateDynamicLinkRequest {
                    link_doctype: "Supplier".to_string(),
                    link_name: "Acme Corp".to_string(),
                }],
                ..request(Some("Jane"), Some("Doe"), None)
            },
        )
        .await
        .unwrap();

        let contact = get_contact(db.async_connection.clone(), id).await.unwrap();
        assert_eq!(contact.full_name, "Jane Doe");
        assert_eq!(contact.emails.len(), 2);
        assert_eq!(contact.emails[0].email_id, "jane@x.com");
        assert!(contact.emails[0].is_primary);
        assert_eq!(contact.emails[1].idx, 1);
        assert_eq!(contact.links.len(), 1);
        assert_eq!(contact.links[0].link_name, "Acme Corp");
    }

    #[tokio::test]
    async fn test_get_missing_contact() {
        let (_dir, db) = test_database();

        let err = get_contact(db.async_connection.clone(), 42).await.unwrap_err();
        assert!(matches!(err, LookupError::NotFound(_)));
    }
}
