//! Data Transfer Objects for REST request/response serialization.

pub mod enrollment_dto;

pub use enrollment_dto::*;
