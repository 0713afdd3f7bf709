//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.
//! The API layer maps each kind to exactly one HTTP status.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Missing or malformed input
    Validation(String),
    /// Lookup by id returned no row
    NotFound,
    /// A sale asked for more units than the product holds
    InsufficientStock {
        produit: String,
        disponible: i32,
        demande: i32,
    },
    /// Missing or invalid session
    Unauthorized(String),
    /// Row Store failure, message passed through
    Database(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::Validation(msg) => write!(f, "{}", msg),
            DomainError::NotFound => write!(f, "Ressource introuvable"),
            DomainError::InsufficientStock {
                produit,
                disponible,
                demande,
            } if *disponible <= 0 => write!(
                f,
                "Produit en rupture de stock : {} (demandé : {})",
                produit, demande
            ),
            DomainError::InsufficientStock {
                produit,
                disponible,
                demande,
            } => write!(
                f,
                "Stock insuffisant pour {} : disponible {}, demandé {}",
                produit, disponible, demande
            ),
            DomainError::Unauthorized(msg) => write!(f, "{}", msg),
            DomainError::Database(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Database(e.to_string())
    }
}
