use chrono::NaiveDate;
use serde::Serialize;

/// Monthly figures derived from prestations and ventes. Read-only, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RapportMensuel {
    /// First day of the month
    pub month: NaiveDate,
    pub ca_services: f64,
    pub ca_produits: f64,
    pub ca_total: f64,
    pub nombre_prestations: usize,
    pub nombre_ventes: usize,
}
