//! # Storage
//!
//! Backend abstractions the domain services run against. The browser build
//! implements them over the hosted REST endpoints; tests use the in-memory
//! versions.

pub mod traits;

#[cfg(test)]
pub mod memory;

pub use traits::{AuthGateway, TenantStore};
