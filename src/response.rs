//! JSON envelopes wrapped around every response body.

use serde::Serialize;
use utoipa::ToSchema;

/// `{"success": true, "data": ...}`
#[derive(Debug, Serialize, ToSchema)]
pub struct Data<T> {
    pub success: bool,
    pub data: T,
}

impl<T> Data<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// One page of a collection, echoing the pagination actually applied.
#[derive(Debug, Serialize, ToSchema)]
pub struct Listing<T> {
    pub success: bool,
    pub skip: u64,
    pub limit: u64,
    pub data: Vec<T>,
}

impl<T> Listing<T> {
    pub fn new(skip: u64, limit: u64, data: Vec<T>) -> Self {
        Self {
            success: true,
            skip,
            limit,
            data,
        }
    }
}

/// Body of a successful delete.
#[derive(Debug, Serialize, ToSchema)]
pub struct Deleted {
    pub success: bool,
}

impl Default for Deleted {
    fn default() -> Self {
        Self { success: true }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Failure {
    #[schema(example = false)]
    pub success: bool,
    #[schema(example = "Data not found")]
    pub message: String,
}

impl Failure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
