use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One electricity invoice as served by `GET /invoices`.
///
/// Only `client_number`, `month`, `year` and the three `*_r` amounts take part in
/// filtering and sorting. Everything else is carried through untouched.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    pub id: String,
    pub client_number: String,
    #[serde(default)]
    pub reference_month: String,
    #[serde(default)]
    pub month: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub electric_energy_kwh: f64,
    #[serde(default)]
    pub electric_energy_r: f64,
    #[serde(default, rename = "energySCEEKwh")]
    pub energy_scee_kwh: f64,
    #[serde(default, rename = "energySCEER")]
    pub energy_scee_r: f64,
    #[serde(default)]
    pub energy_compensation_kwh: f64,
    #[serde(default)]
    pub energy_compensation_r: f64,
    #[serde(default)]
    pub public_lighting_r: f64,
    #[serde(default)]
    pub total_r: f64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
