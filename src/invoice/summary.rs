use serde::{Deserialize, Serialize};

/// A named value in one of the dashboard comparison series.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SummaryItem {
    pub name: String,
    #[serde(default)]
    pub value: f64,
}

/// Aggregate figures served by `GET /invoices/aggregate`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardSummary {
    pub energy_consumption: f64,
    pub compensated_energy: f64,
    #[serde(rename = "totalWithoutGD")]
    pub total_without_gd: f64,
    pub gd_economy: f64,
    pub total_value: f64,
    pub financial_results: Vec<SummaryItem>,
    pub energy_results: Vec<SummaryItem>,
}
