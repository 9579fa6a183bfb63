use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Department, DepartmentView, Resource};
use crate::crud;
use crate::error::Result;
use crate::store::Store;
use crate::validation;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    /// Not checked against the departments collection.
    #[serde(rename = "departmentId")]
    pub department_id: ObjectId,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    #[serde(default)]
    #[schema(example = "Ann")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "ann@x.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "665f1c2ab3e4d5f6a7b8c9d0")]
    pub department_id: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub department_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub department_id: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_hex(),
            name: user.name,
            email: user.email,
            department_id: user.department_id.to_hex(),
        }
    }
}

/// A user with its department embedded in place of the reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    pub id: String,
    pub name: String,
    pub email: String,
    /// `null` when the referenced department no longer exists.
    pub department_id: Option<DepartmentView>,
}

impl Resource for User {
    const COLLECTION: &'static str = "users";
    const UNIQUE_FIELDS: &'static [&'static str] = &["email"];

    type Input = UserInput;
    type Patch = UserPatch;
    type View = UserView;
    type Detail = UserDetail;

    fn id(&self) -> ObjectId {
        self.id
    }

    fn create(id: ObjectId, input: UserInput) -> Result<Self> {
        validation::required("name", &input.name)?;
        validation::email("email", &input.email)?;
        let department_id = validation::object_id("departmentId", &input.department_id)?;
        Ok(Self {
            id,
            name: input.name,
            email: input.email,
            department_id,
        })
    }

    fn apply(&mut self, patch: UserPatch) -> Result<()> {
        if let Some(department_id) = patch.department_id {
            self.department_id = validation::object_id("departmentId", &department_id)?;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        validation::required("name", &self.name)?;
        validation::email("email", &self.email)
    }

    async fn detail(self, store: &dyn Store) -> Result<UserDetail> {
        let department = crud::find::<Department>(store, self.department_id).await?;
        Ok(UserDetail {
            id: self.id.to_hex(),
            name: self.name,
            email: self.email,
            department_id: department.map(DepartmentView::from),
        })
    }
}
