//! Create, list, read, update and delete for any [`Resource`].

use mongodb::bson::{self, oid::ObjectId};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{ApiError, Result};
use crate::model::Resource;
use crate::store::{Store, StoreError};

const DEFAULT_SKIP: u64 = 0;
const DEFAULT_LIMIT: u64 = 10;

/// Raw `?skip=&limit=` query. Values are kept as text: leading digits are
/// read (`3abc` is 3) and anything without them falls back to the default.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    skip: Option<String>,
    limit: Option<String>,
}

/// Pagination applied to a list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u64,
    pub limit: u64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: DEFAULT_SKIP,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl From<PageQuery> for Page {
    fn from(query: PageQuery) -> Self {
        fn parse(raw: Option<&str>, default: u64) -> u64 {
            let Some(value) = raw.map(str::trim_start) else {
                return default;
            };
            let digits = value
                .find(|c: char| !c.is_ascii_digit())
                .map_or(value, |end| &value[..end]);
            digits.parse().unwrap_or(default)
        }
        Self {
            skip: parse(query.skip.as_deref(), DEFAULT_SKIP),
            limit: parse(query.limit.as_deref(), DEFAULT_LIMIT),
        }
    }
}

/// Create the unique indexes declared by `R`.
pub async fn prepare<R: Resource>(store: &dyn Store) -> std::result::Result<(), StoreError> {
    for field in R::UNIQUE_FIELDS {
        store.ensure_unique(R::COLLECTION, field).await?;
    }
    Ok(())
}

pub async fn create<R: Resource>(store: &dyn Store, input: R::Input) -> Result<R> {
    let entity = R::create(ObjectId::new(), input)?;
    store
        .insert(R::COLLECTION, bson::to_document(&entity).map_err(StoreError::from)?)
        .await
        .map_err(write_error::<R>)?;
    info!(collection = R::COLLECTION, id = %entity.id(), "created");
    Ok(entity)
}

pub async fn list<R: Resource>(store: &dyn Store, page: Page) -> Result<Vec<R>> {
    let documents = store.find(R::COLLECTION, page.skip, page.limit).await?;
    debug!(
        collection = R::COLLECTION,
        skip = page.skip,
        limit = page.limit,
        count = documents.len(),
        "listed"
    );
    documents
        .into_iter()
        .map(|document| {
            bson::from_document(document).map_err(|err| ApiError::from(StoreError::from(err)))
        })
        .collect()
}

pub async fn find<R: Resource>(store: &dyn Store, id: ObjectId) -> Result<Option<R>> {
    let Some(document) = store.find_by_id(R::COLLECTION, id).await? else {
        return Ok(None);
    };
    Ok(Some(bson::from_document(document).map_err(StoreError::from)?))
}

/// Merge `patch` over an entity that was already loaded, then store it.
pub async fn update<R: Resource>(store: &dyn Store, mut entity: R, patch: R::Patch) -> Result<R> {
    entity.apply(patch)?;
    entity.validate()?;
    store
        .replace(
            R::COLLECTION,
            entity.id(),
            bson::to_document(&entity).map_err(StoreError::from)?,
        )
        .await
        .map_err(write_error::<R>)?;
    info!(collection = R::COLLECTION, id = %entity.id(), "updated");
    Ok(entity)
}

pub async fn delete<R: Resource>(store: &dyn Store, id: ObjectId) -> Result<()> {
    let deleted = store.delete(R::COLLECTION, id).await?;
    info!(collection = R::COLLECTION, %id, deleted, "deleted");
    Ok(())
}

/// Unique-index collisions are the caller's fault, everything else is not.
fn write_error<R: Resource>(err: StoreError) -> ApiError {
    match err {
        StoreError::Duplicate => ApiError::Validation(format!(
            "{} already in use",
            R::UNIQUE_FIELDS.join(", ")
        )),
        other => ApiError::Persistence(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Department, DepartmentInput, DepartmentPatch, User, UserInput};
    use crate::store::MemoryStore;
    use rstest::rstest;

    fn query(skip: Option<&str>, limit: Option<&str>) -> PageQuery {
        PageQuery {
            skip: skip.map(str::to_owned),
            limit: limit.map(str::to_owned),
        }
    }

    #[rstest]
    #[case(None, None, 0, 10)]
    #[case(Some("5"), Some("20"), 5, 20)]
    #[case(Some("abc"), Some("xyz"), 0, 10)]
    #[case(Some("-3"), Some("-1"), 0, 10)]
    #[case(Some(""), Some("0"), 0, 0)]
    #[case(None, Some("100000"), 0, 100_000)]
    #[case(Some("2px"), Some("3abc"), 2, 3)]
    #[case(Some(" 4"), Some("7.5"), 4, 7)]
    #[case(None, Some("99999999999999999999"), 0, 10)]
    fn page_falls_back_to_defaults(
        #[case] skip: Option<&str>,
        #[case] limit: Option<&str>,
        #[case] expected_skip: u64,
        #[case] expected_limit: u64,
    ) {
        let page = Page::from(query(skip, limit));
        assert_eq!(
            page,
            Page {
                skip: expected_skip,
                limit: expected_limit
            }
        );
    }

    async fn department(store: &dyn Store, name: &str) -> Department {
        create::<Department>(store, DepartmentInput { name: name.into() })
            .await
            .unwrap()
    }

    #[actix_web::test]
    async fn create_then_find_round_trips() {
        let store = MemoryStore::default();
        let created = department(&store, "Engineering").await;

        let found = find::<Department>(&store, created.id).await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[actix_web::test]
    async fn invalid_entities_are_not_stored() {
        let store = MemoryStore::default();
        let err = create::<Department>(&store, DepartmentInput { name: String::new() })
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
        assert!(list::<Department>(&store, Page::default()).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn duplicate_unique_field_is_a_validation_error() {
        let store = MemoryStore::default();
        prepare::<User>(&store).await.unwrap();
        let engineering = department(&store, "Engineering").await;
        let input = || UserInput {
            name: "Ann".into(),
            email: "ann@x.com".into(),
            department_id: engineering.id.to_hex(),
        };

        create::<User>(&store, input()).await.unwrap();
        let err = create::<User>(&store, input()).await.unwrap_err();
        assert_eq!(err.to_string(), "email already in use");
    }

    #[actix_web::test]
    async fn update_rewrites_stored_document() {
        let store = MemoryStore::default();
        let created = department(&store, "Engineering").await;

        update::<Department>(
            &store,
            created.clone(),
            DepartmentPatch {
                name: Some("Platform".into()),
            },
        )
        .await
        .unwrap();

        let stored = find::<Department>(&store, created.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Platform");
    }

    #[actix_web::test]
    async fn list_honours_skip_and_limit() {
        let store = MemoryStore::default();
        for n in 0..15 {
            department(&store, &format!("team-{n}")).await;
        }

        let first = list::<Department>(&store, Page::default()).await.unwrap();
        assert_eq!(first.len(), 10);
        assert_eq!(first[0].name, "team-0");

        let rest = list::<Department>(&store, Page { skip: 10, limit: 10 })
            .await
            .unwrap();
        let names: Vec<_> = rest.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["team-10", "team-11", "team-12", "team-13", "team-14"]);
    }
}
