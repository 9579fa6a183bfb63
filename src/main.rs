mod config;
mod crud;
mod doc;
mod error;
mod model;
mod resolve;
mod response;
mod routes;
mod store;
mod validation;

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::{HttpServer, web};
use async_trait::async_trait;
use config::DatabaseConfig;
use shuttle_runtime::{CustomError, SecretStore};
use store::{MongoStore, Store};
use tracing::info;

/// HTTP server owning the database handle for its whole lifetime.
struct DirectoryService {
    store: Arc<MongoStore>,
}

#[async_trait]
impl shuttle_runtime::Service for DirectoryService {
    async fn bind(self, addr: SocketAddr) -> Result<(), shuttle_runtime::Error> {
        let shared: Arc<dyn Store> = self.store.clone();
        let store = web::Data::from(shared);

        let server = HttpServer::new(move || routes::app(store.clone()))
            .bind(addr)
            .map_err(CustomError::new)?
            .run();
        info!(%addr, "listening");

        let served = server.await;
        self.store.shutdown().await;
        served.map_err(CustomError::new)?;
        Ok(())
    }
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_runtime::Secrets] secrets: SecretStore,
) -> Result<DirectoryService, shuttle_runtime::Error> {
    let config = DatabaseConfig::from_secrets(&secrets);
    let store = MongoStore::connect(&config)
        .await
        .map_err(CustomError::new)?;
    routes::prepare(&store).await.map_err(CustomError::new)?;

    Ok(DirectoryService {
        store: Arc::new(store),
    })
}
