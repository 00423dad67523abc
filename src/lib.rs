//! # enrollment-gateway
//!
//! REST gateway for registering course enrollments.
//!
//! A client posts a name, email and course; the gateway stores the record
//! in a relational store and answers with the stored record, including the
//! identifier the store assigned to it.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── EnrollmentService (service/)
//!     │
//!     ├── EnrollmentRepository (persistence/)
//!     │
//!     └── PostgreSQL | SQLite | in-memory
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod server;
pub mod service;
