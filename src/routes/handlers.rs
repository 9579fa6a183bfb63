//! Request handling shared by every resource. The per-resource modules
//! only add routing and OpenAPI metadata on top.

use actix_web::{HttpResponse, web};

use crate::crud::{self, Page, PageQuery};
use crate::error::Result;
use crate::model::Resource;
use crate::resolve::Resolved;
use crate::response::{Data, Deleted, Listing};
use crate::store::Store;

pub async fn create<R: Resource>(
    store: web::Data<dyn Store>,
    body: web::Json<R::Input>,
) -> Result<HttpResponse> {
    let entity = crud::create::<R>(store.get_ref(), body.into_inner()).await?;
    let view: R::View = entity.into();
    Ok(HttpResponse::Created().json(Data::new(view)))
}

pub async fn list<R: Resource>(
    store: web::Data<dyn Store>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let page = Page::from(query.into_inner());
    let entities = crud::list::<R>(store.get_ref(), page).await?;
    let views: Vec<R::View> = entities.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(Listing::new(page.skip, page.limit, views)))
}

pub async fn read<R: Resource>(
    store: web::Data<dyn Store>,
    entity: Resolved<R>,
) -> Result<HttpResponse> {
    let detail = entity.into_inner().detail(store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(Data::new(detail)))
}

pub async fn update<R: Resource>(
    store: web::Data<dyn Store>,
    entity: Resolved<R>,
    body: web::Json<R::Patch>,
) -> Result<HttpResponse> {
    let entity = crud::update(store.get_ref(), entity.into_inner(), body.into_inner()).await?;
    let view: R::View = entity.into();
    Ok(HttpResponse::Ok().json(Data::new(view)))
}

pub async fn delete<R: Resource>(
    store: web::Data<dyn Store>,
    entity: Resolved<R>,
) -> Result<HttpResponse> {
    crud::delete::<R>(store.get_ref(), entity.into_inner().id()).await?;
    Ok(HttpResponse::Ok().json(Deleted::default()))
}
