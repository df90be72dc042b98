mod record;
mod summary;

pub use record::InvoiceRecord;
pub use summary::{DashboardSummary, SummaryItem};
