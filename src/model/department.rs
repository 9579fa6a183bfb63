use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Resource;
use crate::error::Result;
use crate::store::Store;
use crate::validation;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Department {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DepartmentInput {
    #[serde(default)]
    #[schema(example = "Engineering")]
    pub name: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DepartmentPatch {
    pub name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct DepartmentView {
    #[schema(example = "665f1c2ab3e4d5f6a7b8c9d0")]
    pub id: String,
    #[schema(example = "Engineering")]
    pub name: String,
}

impl From<Department> for DepartmentView {
    fn from(department: Department) -> Self {
        Self {
            id: department.id.to_hex(),
            name: department.name,
        }
    }
}

impl Resource for Department {
    const COLLECTION: &'static str = "departments";

    type Input = DepartmentInput;
    type Patch = DepartmentPatch;
    type View = DepartmentView;
    type Detail = DepartmentView;

    fn id(&self) -> ObjectId {
        self.id
    }

    fn create(id: ObjectId, input: DepartmentInput) -> Result<Self> {
        validation::required("name", &input.name)?;
        Ok(Self {
            id,
            name: input.name,
        })
    }

    fn apply(&mut self, patch: DepartmentPatch) -> Result<()> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        validation::required("name", &self.name)
    }

    async fn detail(self, _store: &dyn Store) -> Result<DepartmentView> {
        Ok(self.into())
    }
}
