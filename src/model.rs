mod department;
mod user;

pub use department::{Department, DepartmentInput, DepartmentPatch, DepartmentView};
pub use user::{User, UserDetail, UserInput, UserPatch, UserView};

use mongodb::bson::oid::ObjectId;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::store::Store;

/// Schema of a stored resource, as consumed by [`crate::crud`] and the
/// shared handlers in `routes::handlers`.
pub trait Resource: Serialize + DeserializeOwned + Sized + 'static {
    /// MongoDB collection holding the documents.
    const COLLECTION: &'static str;
    /// Fields backed by a unique index.
    const UNIQUE_FIELDS: &'static [&'static str] = &[];

    /// Body accepted on create.
    type Input: DeserializeOwned;
    /// Body accepted on update; absent fields keep their stored value.
    type Patch: DeserializeOwned;
    /// Representation returned by create, list and update.
    type View: Serialize + From<Self>;
    /// Representation returned by read-by-id, with references expanded.
    type Detail: Serialize;

    fn id(&self) -> ObjectId;

    /// Build a new entity, checking fields in declaration order.
    fn create(id: ObjectId, input: Self::Input) -> Result<Self>;

    fn apply(&mut self, patch: Self::Patch) -> Result<()>;

    /// Field rules re-checked after an update.
    fn validate(&self) -> Result<()>;

    async fn detail(self, store: &dyn Store) -> Result<Self::Detail>;
}
