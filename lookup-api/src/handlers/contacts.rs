use actix_web::{web, HttpResponse};
use shared_types::{CreateContactRequest, CreateContactResponse};
use std::sync::Arc;
use tracing::info;

use crate::database::contacts as contacts_db;
use crate::database::Database;
use crate::error::LookupError;

pub async fn create_contact(
    db: web::Data<Arc<Database>>,
    request: web::Json<CreateContactRequest>,
) -> Result<HttpResponse, LookupError> {
    let request = request.into_inner();
    let full_name = contacts_db::build_full_name(&request);

    let id = contacts_db::insert_contact(db.async_connection.clone(), request).await?;
    info!("Created contact {} ({})", id, full_name);

    Ok(HttpResponse::Created().json(CreateContactResponse { id, full_name }))
}

pub async fn get_contact(
    db: web::Data<Arc<Database>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, LookupError> {
    let contact_id = path.into_inner();

    let contact = contacts_db::get_contact(db.async_connection.clone(), contact_id).await?;

    Ok(HttpResponse::Ok().json(contact))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::test_database;
    use crate::handlers::configure;
    use actix_web::{http::StatusCode, test, App};
    use shared_types::{Contact, CreateContactEmailRequest};

    #[actix_web::test]
    async fn test_create_then_fetch_contact() {
        let (_dir, db) = test_database();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Arc::new(db)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/contacts")
            .set_json(CreateContactRequest {
                company_name: Some("Acme Corp".to_string()),
                emails: vec![CreateContactEmailRequest {
                    email_id: "sales@acme.com".to_string(),
                    is_primary: true,
                }],
                ..Default::default()
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: CreateContactResponse = test::read_body_json(resp).await;
        assert_eq!(created.full_name, "Acme Corp");

        let req = test::TestRequest::get()
            .uri(&format!("/api/contacts/{}", created.id))
            .to_request();
        let contact: Contact = test::call_and_read_body_json(&app, req).await;
        assert_eq!(contact.emails[0].email_id, "sales@acme.com");

        let req = test::TestRequest::get().uri("/api/contacts/999").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
