use actix_files::Files;
use actix_web::web::{self, Data, FormConfig, PathConfig, ServiceConfig};
use actix_web::{App, HttpResponse, HttpServer, ResponseError};
use mongodb::Client;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub mod campaign;
pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod pages;
pub mod typedid;

pub use config::Config;
pub use error::Error;

use crate::database::{Database, MongoDatabase};

/// Registers the extractor error handlers and every campaign endpoint.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.app_data(PathConfig::default().error_handler(|err, _req| {
        // format path errors with custom format
        Error::InvalidPath(err).into()
    }))
    .app_data(FormConfig::default().error_handler(|err, _req| {
        // format form errors with custom format
        Error::InvalidForm(err).into()
    }))
    .service(campaign::endpoints::home)
    .service(campaign::endpoints::campaign_form)
    .service(campaign::endpoints::create_campaign)
    .service(campaign::endpoints::get_campaigns)
    .service(campaign::endpoints::export_campaign)
    .service(campaign::endpoints::delete_campaign);
}

pub async fn not_found() -> HttpResponse {
    Error::PathNotFound.error_response()
}

pub async fn run(config: Config) -> Result<(), Error> {
    info!("connecting to db: {}", config.mongodb_uri);
    let db = Client::with_uri_str(&config.mongodb_uri)
        .await?
        .database(&config.database_name);
    let db = MongoDatabase::initialize(db).await?;
    let db = Data::new(Box::new(db) as Box<dyn Database>);

    std::fs::create_dir_all(&config.export_dir)?;

    let listen_addr = config.listen_addr;
    let config = Data::new(config);

    info!("listening on {}", listen_addr);
    HttpServer::new(move || {
        App::new()
            .app_data(db.clone())
            .app_data(config.clone())
            .wrap(TracingLogger::default())
            .configure(configure)
            .service(Files::new(&config.static_url, &config.export_dir))
            .default_service(web::to(not_found))
    })
    .bind(listen_addr)?
    .run()
    .await?;

    Ok(())
}
