use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};
use jobsetup::config::resolve_api_key;
use jobsetup::{
    AppConfig, AppState, Database, FileBlobStore, ResendNotifier, SqliteRecordStore,
    SubmissionPipeline,
};
use log::info;

/// Opens the stores and wires the submission pipeline.
pub fn bootstrap(config: &AppConfig) -> jobsetup::Result<web::Data<AppState>> {
    let db = Database::open(&config.database.path)?;
    info!("Database ready at {}", config.database.path.display());

    let blobs = FileBlobStore::new(&config.storage.root, &config.storage.bucket);
    info!(
        "Attachments stored under {}",
        blobs.bucket_directory().display()
    );

    let from = config.email.from.clone().unwrap_or_default();
    let notifier = ResendNotifier::new(
        config.email.api_base.clone(),
        resolve_api_key(config)?,
        from,
        config.email.to.clone(),
    )?;
    info!(
        "Notifications go to {} recipient(s)",
        notifier.recipients().len()
    );

    let pipeline = SubmissionPipeline::new(
        Arc::new(SqliteRecordStore::new(db)),
        Arc::new(blobs),
        Arc::new(notifier),
    );

    let state = AppState::new(Arc::new(pipeline))
        .with_max_upload_bytes(config.server.max_upload_bytes);
    Ok(web::Data::new(state))
}

/// Serves HTTP until shutdown.
pub async fn run(config: &AppConfig, state: web::Data<AppState>) -> anyhow::Result<()> {
    let bind_addr = (config.server.host.clone(), config.server.port);
    info!("Listening on {}:{}", bind_addr.0, bind_addr.1);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(jobsetup::configure)
    })
    .bind(bind_addr)?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}
