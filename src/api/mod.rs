//! Blocking client for the invoice REST backend.

use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use ureq::Agent;

use crate::error::{FaturasError, Result};
use crate::invoice::{DashboardSummary, InvoiceRecord};
use crate::upload::{PendingFile, PDF_MIME};

pub struct ApiClient {
    agent: Agent,
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `path` and decode the JSON body. A `null` or empty body decodes as `None`.
    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let url = self.url(path);
        debug!(%url, "fetching");

        let body = self
            .agent
            .get(&url)
            .call()
            .and_then(|mut response| response.body_mut().read_to_string())
            .map_err(|source| FaturasError::Http {
                url: url.clone(),
                source,
            })?;

        if body.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&body).map_err(|source| FaturasError::Decode { url, source })
    }

    /// All invoices the backend knows about.
    pub fn fetch_invoices(&self) -> Result<Vec<InvoiceRecord>> {
        let records: Vec<InvoiceRecord> = self.get_json("/invoices")?.unwrap_or_default();
        debug!(count = records.len(), "fetched invoices");
        Ok(records)
    }

    /// Aggregate figures for the dashboard cards and charts.
    pub fn fetch_aggregate(&self) -> Result<DashboardSummary> {
        Ok(self.get_json("/invoices/aggregate")?.unwrap_or_default())
    }

    /// POST the files as `multipart/form-data`, one `file` part each.
    ///
    /// A successful upload makes previously fetched invoices and aggregates stale.
    pub fn upload_invoice_files(&self, files: &[PendingFile]) -> Result<()> {
        let url = self.url("/invoices");
        let upload_err = |source| FaturasError::Upload {
            url: url.clone(),
            source,
        };

        let mut form = Form::new();
        for file in files {
            let part = Part::file(&file.path)?
                .file_name(file.name.clone())
                .mime_str(PDF_MIME)
                .map_err(upload_err)?;
            form = form.part("file", part);
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(upload_err)?;

        let reply = client
            .post(&url)
            .multipart(form)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(upload_err)?;

        info!(files = files.len(), "uploaded invoices");
        debug!(%reply, "upload response");
        Ok(())
    }
}
