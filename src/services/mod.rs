//! Services Layer
//!
//! Business logic shared by the HTTP handlers. The `reporting` and
//! `transaction_grouping` modules are pure; the `*_service` modules read and
//! write through the repositories held by `AppState`.

pub mod inventory_service;
pub mod reporting;
pub mod reporting_service;
pub mod sale_service;
pub mod transaction_grouping;

pub use inventory_service::Cart;
pub use reporting::Periode;
pub use transaction_grouping::{SaleTransaction, group_transactions};
