use actix_web::{HttpResponse, Scope, web};

use super::handlers;
use crate::crud::PageQuery;
use crate::error::Result;
use crate::model::{Department, DepartmentInput, DepartmentPatch, DepartmentView};
use crate::resolve::Resolved;
use crate::response::{Data, Deleted, Failure, Listing};
use crate::store::Store;

pub fn scope() -> Scope {
    web::scope("/departments")
        .service(
            web::resource(["", "/"])
                .route(web::post().to(create_department))
                .route(web::get().to(list_departments)),
        )
        .service(
            web::resource(["/{id}", "/{id}/"])
                .route(web::get().to(read_department))
                .route(web::put().to(update_department))
                .route(web::delete().to(delete_department)),
        )
}

#[utoipa::path(
    post,
    path = "/api/departments",
    tag = "departments",
    request_body = DepartmentInput,
    responses(
        (status = 201, description = "Department created", body = Data<DepartmentView>),
        (status = 422, description = "Invalid department", body = Failure)
    )
)]
pub async fn create_department(
    store: web::Data<dyn Store>,
    body: web::Json<DepartmentInput>,
) -> Result<HttpResponse> {
    handlers::create::<Department>(store, body).await
}

#[utoipa::path(
    get,
    path = "/api/departments",
    tag = "departments",
    params(
        ("skip" = Option<u64>, Query, description = "Number of departments to skip, 0 by default"),
        ("limit" = Option<u64>, Query, description = "Page size, 10 by default")
    ),
    responses(
        (status = 200, description = "One page of departments", body = Listing<DepartmentView>),
        (status = 422, description = "Database failure", body = Failure)
    )
)]
pub async fn list_departments(
    store: web::Data<dyn Store>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    handlers::list::<Department>(store, query).await
}

#[utoipa::path(
    get,
    path = "/api/departments/{id}",
    tag = "departments",
    params(("id" = String, Path, description = "Department id")),
    responses(
        (status = 200, description = "Department found", body = Data<DepartmentView>),
        (status = 404, description = "No department with this id", body = Failure),
        (status = 422, description = "Malformed id or database failure", body = Failure)
    )
)]
pub async fn read_department(
    store: web::Data<dyn Store>,
    department: Resolved<Department>,
) -> Result<HttpResponse> {
    handlers::read::<Department>(store, department).await
}

#[utoipa::path(
    put,
    path = "/api/departments/{id}",
    tag = "departments",
    params(("id" = String, Path, description = "Department id")),
    request_body = DepartmentPatch,
    responses(
        (status = 200, description = "Department updated", body = Data<DepartmentView>),
        (status = 404, description = "No department with this id", body = Failure),
        (status = 422, description = "Invalid department", body = Failure)
    )
)]
pub async fn update_department(
    store: web::Data<dyn Store>,
    department: Resolved<Department>,
    body: web::Json<DepartmentPatch>,
) -> Result<HttpResponse> {
    handlers::update::<Department>(store, department, body).await
}

#[utoipa::path(
    delete,
    path = "/api/departments/{id}",
    tag = "departments",
    params(("id" = String, Path, description = "Department id")),
    responses(
        (status = 200, description = "Department deleted", body = Deleted),
        (status = 404, description = "No department with this id", body = Failure),
        (status = 422, description = "Malformed id or database failure", body = Failure)
    )
)]
pub async fn delete_department(
    store: web::Data<dyn Store>,
    department: Resolved<Department>,
) -> Result<HttpResponse> {
    handlers::delete::<Department>(store, department).await
}
