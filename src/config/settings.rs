use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub api: ApiSettings,
    #[serde(default)]
    pub table: TableSettings,
    pub download: DownloadSettings,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ApiSettings {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TableSettings {
    /// Rows per page for a fresh view (5, 10, 20 or 50)
    pub per_page: u32,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self { per_page: 10 }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DownloadSettings {
    pub output_dir: String,
}
