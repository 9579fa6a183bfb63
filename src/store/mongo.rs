use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{Document, doc, oid::ObjectId};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::event::EventHandler;
use mongodb::event::command::CommandEvent;
use mongodb::event::sdam::SdamEvent;
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use tracing::{debug, error, info, warn};

use super::{Result, Store, StoreError};
use crate::config::DatabaseConfig;

const DUPLICATE_KEY: i32 = 11000;

/// [`Store`] backed by a MongoDB database.
///
/// The client pools its own connections, so one instance is shared by every
/// worker for the lifetime of the process.
#[derive(Clone, Debug)]
pub struct MongoStore {
    client: Client,
    database: Database,
}

impl MongoStore {
    /// Build the client and check that the server answers.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let mut options = ClientOptions::parse(config.uri.as_str()).await?;
        options.server_selection_timeout = Some(config.server_selection_timeout);
        options.connect_timeout = Some(config.connect_timeout);
        options.max_idle_time = Some(config.max_idle_time);
        options.sdam_event_handler = Some(EventHandler::callback(log_topology_event));
        options.command_event_handler = Some(EventHandler::callback(log_command_event));

        let name = config.database_name(options.default_database.as_deref());
        let client = Client::with_options(options)?;
        let database = client.database(&name);

        database.run_command(doc! { "ping": 1 }).await?;
        info!(database = %name, "connected to MongoDB");

        Ok(Self { client, database })
    }

    /// Close pooled connections and wait for in-flight operations.
    pub async fn shutdown(&self) {
        self.client.clone().shutdown().await;
        info!("MongoDB connection closed");
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.database.collection(name)
    }
}

#[async_trait]
impl Store for MongoStore {
    async fn ensure_unique(&self, collection: &str, field: &str) -> Result<()> {
        let mut keys = Document::new();
        keys.insert(field, 1);
        let model = IndexModel::builder()
            .keys(keys)
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection(collection).create_index(model).await?;
        Ok(())
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<()> {
        self.collection(collection)
            .insert_one(document)
            .await
            .map_err(classify)?;
        Ok(())
    }

    async fn find(&self, collection: &str, skip: u64, limit: u64) -> Result<Vec<Document>> {
        let cursor = self
            .collection(collection)
            .find(doc! {})
            .skip(skip)
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(&self, collection: &str, id: ObjectId) -> Result<Option<Document>> {
        Ok(self.collection(collection).find_one(doc! { "_id": id }).await?)
    }

    async fn replace(&self, collection: &str, id: ObjectId, document: Document) -> Result<()> {
        self.collection(collection)
            .replace_one(doc! { "_id": id }, document)
            .await
            .map_err(classify)?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: ObjectId) -> Result<u64> {
        let result = self
            .collection(collection)
            .delete_one(doc! { "_id": id })
            .await?;
        Ok(result.deleted_count)
    }
}

/// Separate unique-index violations from other driver failures.
fn classify(err: mongodb::error::Error) -> StoreError {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write)) if write.code == DUPLICATE_KEY => {
            StoreError::Duplicate
        }
        _ => StoreError::Driver(err),
    }
}

fn log_topology_event(event: SdamEvent) {
    match event {
        SdamEvent::ServerHeartbeatFailed(event) => {
            error!(server = %event.server_address, error = %event.failure, "MongoDB error");
        }
        SdamEvent::ServerClosed(event) => {
            warn!(server = %event.address, "MongoDB connection closed");
        }
        SdamEvent::TopologyClosed(_) => warn!("MongoDB connection disconnected"),
        _ => {}
    }
}

fn log_command_event(event: CommandEvent) {
    if let CommandEvent::Started(event) = event {
        debug!(
            database = %event.db,
            command = %event.command_name,
            body = %event.command,
            "MongoDB command"
        );
    }
}
