pub mod departments;
mod handlers;
pub mod users;


use std::time::Instant;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::{Next, NormalizePath, TrailingSlash, from_fn};
use actix_web::{App, Error, get, web};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::crud;
use crate::doc::ApiDoc;
use crate::error::ApiError;
use crate::model::{Department, User};
use crate::store::{Store, StoreError};

/// Build the application around an injected store.
pub fn app(
    store: web::Data<dyn Store>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(store)
        .wrap(from_fn(trace_request))
        .wrap(NormalizePath::new(TrailingSlash::MergeOnly))
        .configure(configure)
        .service(
            SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-doc/openapi.json", ApiDoc::openapi()),
        )
}

fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(index)
        .service(
            web::scope("/api")
                .service(departments::scope())
                .service(users::scope()),
        );
}

/// Create the indexes every resource relies on.
pub async fn prepare(store: &dyn Store) -> Result<(), StoreError> {
    crud::prepare::<Department>(store).await?;
    crud::prepare::<User>(store).await
}

#[get("/")]
async fn index() -> &'static str {
    "Realogy Test Project"
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _| ApiError::Validation(err.to_string()).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _| ApiError::Validation(err.to_string()).into())
}

async fn trace_request(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let method = req.method().clone();
    let path = req.path().to_owned();
    let started = Instant::now();

    let res = next.call(req).await?;
    info!(
        %method,
        %path,
        status = res.status().as_u16(),
        elapsed = ?started.elapsed(),
        "request served"
    );
    Ok(res)
}
