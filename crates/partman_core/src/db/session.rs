//! Session bootstrap for the hosted document store.
//!
//! # Responsibility
//! - Build the connection target from credentials and config.
//! - Establish a client and verify reachability with a ping.
//! - Hand back an owned `Session` bound to the parts collection.
//!
//! # Invariants
//! - Rendered URIs and passwords are never logged.
//! - Each stage is attempted exactly once; nothing is retried.

use super::{ConnectionError, ConnectorConfig, DbResult, StoreError};
use crate::auth::credentials::Credentials;
use crate::model::part::Part;
use crate::repo::mongo_repo::MongoPartRepository;
use log::{error, info};
use mongodb::bson::doc;
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use mongodb::Client;
use std::sync::Arc;
use std::time::Instant;

/// Live connection to the store, bound to one database/collection pair.
///
/// Owned by the caller; dropping it releases the client pool.
pub struct Session {
    client: Client,
    parts: Arc<MongoPartRepository>,
}

impl Session {
    /// Repository over the bound collection, shareable across tasks.
    pub fn parts(&self) -> Arc<MongoPartRepository> {
        Arc::clone(&self.parts)
    }

    /// Closes pooled connections and ends server sessions.
    pub async fn shutdown(self) {
        info!("event=db_shutdown module=db status=start");
        self.client.shutdown().await;
        info!("event=db_shutdown module=db status=ok");
    }
}

/// Validates credentials, connects, pings and binds the parts collection.
///
/// # Errors
/// - `Validation` before any network activity.
/// - `InvalidTarget` when the rendered URI cannot be parsed or resolved.
/// - `Session` when the client cannot be constructed.
/// - `Ping` when the store does not answer.
///
/// # Side effects
/// - Emits `db_connect` logging events with duration and status.
pub async fn connect(credentials: &Credentials, config: &ConnectorConfig) -> DbResult<Session> {
    let started_at = Instant::now();
    info!(
        "event=db_connect module=db status=start database={} collection={}",
        config.database, config.collection
    );

    match establish(credentials, config).await {
        Ok(session) => {
            info!(
                "event=db_connect module=db status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(session)
        }
        Err(err) => {
            error!(
                "event=db_connect module=db status=error duration_ms={} error_code={} error={}",
                started_at.elapsed().as_millis(),
                err.code(),
                err
            );
            Err(err)
        }
    }
}

async fn establish(credentials: &Credentials, config: &ConnectorConfig) -> DbResult<Session> {
    credentials.validate()?;

    let uri = credentials.render_uri(&config.uri_template);
    let mut options = ClientOptions::parse(uri)
        .await
        .map_err(|err| ConnectionError::InvalidTarget(StoreError::from(err)))?;
    options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
    options.app_name = config.app_name.clone();

    let client = Client::with_options(options)
        .map_err(|err| ConnectionError::Session(StoreError::from(err)))?;

    let database = client.database(&config.database);
    database
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|err| ConnectionError::Ping(StoreError::from(err)))?;

    let collection = database.collection::<Part>(&config.collection);
    Ok(Session {
        parts: Arc::new(MongoPartRepository::new(collection)),
        client,
    })
}
