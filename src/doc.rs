use utoipa::OpenApi;

use crate::model::{
    DepartmentInput, DepartmentPatch, DepartmentView, UserDetail, UserInput, UserPatch, UserView,
};
use crate::response::{Deleted, Failure};
use crate::routes::{departments, users};

#[derive(OpenApi)]
#[openapi(
    paths(
        departments::create_department,
        departments::list_departments,
        departments::read_department,
        departments::update_department,
        departments::delete_department,
        users::create_user,
        users::list_users,
        users::read_user,
        users::update_user,
        users::delete_user,
    ),
    components(schemas(
        DepartmentInput,
        DepartmentPatch,
        DepartmentView,
        UserInput,
        UserPatch,
        UserView,
        UserDetail,
        Deleted,
        Failure,
    )),
    tags(
        (name = "departments", description = "Department API"),
        (name = "users", description = "User API")
    )
)]
pub struct ApiDoc;
