use actix_web::{web, HttpResponse};
use shared_types::{ContactListRequest, ContactListResponse};
use std::sync::Arc;
use tracing::info;

use crate::database::Database;
use crate::error::LookupError;
use crate::lookup;
use crate::query::SqliteRecordQuery;

async fn respond(db: &Database, request: ContactListRequest) -> Result<HttpResponse, LookupError> {
    let ContactListRequest {
        txt,
        page_length,
        extra_filters,
    } = request;

    let engine = SqliteRecordQuery::new(db.async_connection.clone());
    let options = lookup::get_contact_list(
        &engine,
        &txt,
        page_length,
        extra_filters.as_deref().filter(|f| !f.is_empty()),
    )
    .await?;

    info!("get_contact_list: {} options for {:?}", options.len(), txt);

    Ok(HttpResponse::Ok().json(ContactListResponse { message: options }))
}

pub async fn get_contact_list(
    db: web::Data<Arc<Database>>,
    query: web::Query<ContactListRequest>,
) -> Result<HttpResponse, LookupError> {
    respond(&db, query.into_inner()).await
}

pub async fn post_contact_list(
    db: web::Data<Arc<Database>>,
    request: web::Json<ContactListRequest>,
) -> Result<HttpResponse, LookupError> {
    respond(&db, request.into_inner()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::contacts::insert_contact;
    use crate::database::test_support::test_database;
    use crate::handlers::configure;
    use actix_web::{test, App};
    use shared_types::{CreateContactEmailRequest, CreateContactRequest, CreateDynamicLinkRequest, SearchOption};

    async fn seeded() -> (tempfile::TempDir, Arc<Database>) {
        let (dir, db) = test_database();
        insert_contact(
            db.async_connection.clone(),
            CreateContactRequest {
                first_name: Some("Jane".to_string()),
                last_name: Some("Doe".to_string()),
                emails: vec![CreateContactEmailRequest {
                    email_id: "jane@x.com".to_string(),
                    is_primary: true,
                }],
                links: vec![CreateDynamicLinkRequest {
                    link_doctype: "Supplier".to_string(),
                    link_name: "Acme Corp".to_string(),
                }],
                ..Default::default()
            },
        )
        .await
        .unwrap();
        (dir, Arc::new(db))
    }

    fn expected() -> Vec<SearchOption> {
        vec![SearchOption {
            value: "jane@x.com".to_string(),
            label: "jane@x.com".to_string(),
            description: "Jane Doe (Acme Corp)".to_string(),
        }]
    }

    #[actix_web::test]
    async fn test_get_and_post_return_the_same_payload() {
        let (_dir, db) = seeded().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db.clone()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/method/get_contact_list?txt=acme")
            .to_request();
        let from_get: ContactListResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(from_get.message, expected());

        let req = test::TestRequest::post()
            .uri("/api/method/get_contact_list")
            .set_json(serde_json::json!({ "txt": "acme", "page_length": 5 }))
            .to_request();
        let from_post: ContactListResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(from_post.message, expected());
    }

    #[actix_web::test]
    async fn test_malformed_extra_filters_is_bad_request() {
        let (_dir, db) = seeded().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db.clone()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/method/get_contact_list")
            .set_json(serde_json::json!({ "txt": "acme", "extra_filters": "not json" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

        let body: shared_types::ErrorResponse = test::read_body_json(resp).await;
        assert!(body.error.starts_with("Malformed input"));
    }

    #[actix_web::test]
    async fn test_rejected_parameters_use_json_errors() {
        let (_dir, db) = seeded().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db.clone()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/method/get_contact_list?page_length=5")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let body: shared_types::ErrorResponse = test::read_body_json(resp).await;
        assert!(body.error.contains("txt"));

        let req = test::TestRequest::get()
            .uri("/api/method/get_contact_list?txt=acme&page_length=many")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let body: shared_types::ErrorResponse = test::read_body_json(resp).await;
        assert!(body.error.starts_with("Malformed input"));

        let req = test::TestRequest::post()
            .uri("/api/method/get_contact_list")
            .set_json(serde_json::json!({ "page_length": 5 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let body: shared_types::ErrorResponse = test::read_body_json(resp).await;
        assert!(body.error.contains("txt"));
    }
}
