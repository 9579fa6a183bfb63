use actix_web::{HttpResponse, Scope, web};

use super::handlers;
use crate::crud::PageQuery;
use crate::error::Result;
use crate::model::{User, UserDetail, UserInput, UserPatch, UserView};
use crate::resolve::Resolved;
use crate::response::{Data, Deleted, Failure, Listing};
use crate::store::Store;

pub fn scope() -> Scope {
    web::scope("/users")
        .service(
            web::resource(["", "/"])
                .route(web::post().to(create_user))
                .route(web::get().to(list_users)),
        )
        .service(
            web::resource(["/{id}", "/{id}/"])
                .route(web::get().to(read_user))
                .route(web::put().to(update_user))
                .route(web::delete().to(delete_user)),
        )
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = UserInput,
    responses(
        (status = 201, description = "User created", body = Data<UserView>),
        (status = 422, description = "Invalid user or email already in use", body = Failure)
    )
)]
pub async fn create_user(
    store: web::Data<dyn Store>,
    body: web::Json<UserInput>,
) -> Result<HttpResponse> {
    handlers::create::<User>(store, body).await
}

/// Departments stay as ids in listings.
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    params(
        ("skip" = Option<u64>, Query, description = "Number of users to skip, 0 by default"),
        ("limit" = Option<u64>, Query, description = "Page size, 10 by default")
    ),
    responses(
        (status = 200, description = "One page of users", body = Listing<UserView>),
        (status = 422, description = "Database failure", body = Failure)
    )
)]
pub async fn list_users(
    store: web::Data<dyn Store>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    handlers::list::<User>(store, query).await
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User found, with its department embedded", body = Data<UserDetail>),
        (status = 404, description = "No user with this id", body = Failure),
        (status = 422, description = "Malformed id or database failure", body = Failure)
    )
)]
pub async fn read_user(
    store: web::Data<dyn Store>,
    user: Resolved<User>,
) -> Result<HttpResponse> {
    handlers::read::<User>(store, user).await
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    request_body = UserPatch,
    responses(
        (status = 200, description = "User updated", body = Data<UserView>),
        (status = 404, description = "No user with this id", body = Failure),
        (status = 422, description = "Invalid user or email already in use", body = Failure)
    )
)]
pub async fn update_user(
    store: web::Data<dyn Store>,
    user: Resolved<User>,
    body: web::Json<UserPatch>,
) -> Result<HttpResponse> {
    handlers::update::<User>(store, user, body).await
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = Deleted),
        (status = 404, description = "No user with this id", body = Failure),
        (status = 422, description = "Malformed id or database failure", body = Failure)
    )
)]
pub async fn delete_user(
    store: web::Data<dyn Store>,
    user: Resolved<User>,
) -> Result<HttpResponse> {
    handlers::delete::<User>(store, user).await
}
