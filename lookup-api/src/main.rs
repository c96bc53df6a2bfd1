use actix_cors::Cors;
use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use lookup_api::{config, handlers, helpers, Database};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::prelude::*;

#[get("/health")]
async fn health(db: web::Data<Arc<Database>>) -> impl Responder {
    if db.is_healthy().await {
        HttpResponse::Ok().json(serde_json::json!({
            "status": "healthy",
            "database": "connected"
        }))
    } else {
        HttpResponse::InternalServerError().json(serde_json::json!({
            "status": "unhealthy",
            "database": "disconnected"
        }))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long)]
    log_file_path: Option<String>,

    /// Overrides `[database] path` from the config file
    #[arg(long)]
    db_path: Option<PathBuf>,
}

fn init_tracing(log_file_path: Option<String>) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(log_path) = log_file_path {
        let log_path = std::path::Path::new(&log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("lookup-api.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        std::mem::forget(guard);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stdout),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file_path);

    let (config, config_path) = config::ApiConfig::load()?;
    tracing::info!("Loaded config from {:?}", config_path);

    let db_path = match args.db_path.or_else(|| config.database.clone().map(|d| d.path)) {
        Some(path) => path,
        None => helpers::database::get_db_path()?,
    };
    let db = helpers::database::initialize_database(&db_path)?;
    tracing::info!("Database initialized at: {:?}", db_path);

    let server_config = config.server();
    let (host, port) = (server_config.host, server_config.port);
    tracing::info!("Server will listen on {}:{}", host, port);

    let cors_config = config.cors.clone();
    HttpServer::new(move || {
        let cors = if let Some(cors_config) = &cors_config {
            let mut cors_builder = Cors::default();
            for origin in &cors_config.allowed_origins {
                cors_builder = cors_builder.allowed_origin(origin);
            }
            cors_builder
                .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                .allowed_headers(vec!["Authorization", "Accept", "Content-Type"])
                .max_age(3600)
        } else {
            Cors::default()
                .allow_any_origin()
                .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                .allowed_headers(vec!["Authorization", "Accept", "Content-Type"])
                .max_age(3600)
        };

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(db.clone()))
            .service(health)
            .configure(handlers::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await?;

    Ok(())
}
