//! Id resolution for `/{id}` routes.
//!
//! [`Resolved`] is an extractor: it loads the entity named by the path once
//! and hands it to the handler as an argument. A missing entity answers 404
//! before the handler runs; a malformed id or a store failure goes through
//! the regular [`ApiError`] response.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::LocalBoxFuture;
use mongodb::bson::oid::ObjectId;
use tracing::debug;

use crate::crud;
use crate::error::ApiError;
use crate::model::Resource;
use crate::store::Store;

/// An entity loaded from the `{id}` path segment.
#[derive(Debug)]
pub struct Resolved<R>(pub R);

impl<R> Resolved<R> {
    pub fn into_inner(self) -> R {
        self.0
    }
}

fn path_id(req: &HttpRequest) -> Result<ObjectId, ApiError> {
    let raw = req.match_info().get("id").unwrap_or_default();
    ObjectId::parse_str(raw).map_err(|_| ApiError::InvalidId(raw.to_owned()))
}

impl<R: Resource> FromRequest for Resolved<R> {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let store = req.app_data::<web::Data<dyn Store>>().cloned();
        let id = path_id(req);

        Box::pin(async move {
            let store = store.ok_or(ApiError::MissingState)?;
            let id = id?;
            match crud::find::<R>(store.get_ref(), id).await? {
                Some(entity) => Ok(Self(entity)),
                None => {
                    debug!(collection = R::COLLECTION, %id, "no entity for id");
                    Err(ApiError::NotFound)
                }
            }
        })
    }
}
