//! Domain layer - Pure business abstractions
//!
//! Trait definitions for data access and the domain error type.
//! No Axum here; SeaORM only appears through the `DbErr` conversion.

pub mod errors;
pub mod repositories;

pub use errors::DomainError;
pub use repositories::*;
