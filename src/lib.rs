pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod invoice;
pub mod table;
pub mod upload;

pub use api::ApiClient;
pub use config::{Config, State};
pub use error::{FaturasError, Result};
pub use invoice::{DashboardSummary, InvoiceRecord, SummaryItem};
pub use table::{compute_visible, distinct_years, page_window, PageLabel, ViewParams};
pub use upload::{PendingFile, PendingUpload};
