// src/core/net.rs
// Blocking HTTP GET for dossier pages.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::consts::USER_AGENT;
use crate::config::options::ScrapeOptions;
use crate::error::ExtractError;

/// Where dossier pages come from. The batch only needs "give me the HTML for
/// this id"; tests plug in canned pages.
pub trait PageSource {
    fn dossier_page(&self, dossier_id: &str) -> Result<String, ExtractError>;
}

/// Live site over HTTPS, one request per call, bounded by a timeout.
pub struct HttpSource {
    client: Client,
    opts: ScrapeOptions,
}

impl HttpSource {
    pub fn new(opts: &ScrapeOptions) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(opts.timeout)
            .connect_timeout(opts.timeout.min(Duration::from_secs(10)))
            .build()?;
        Ok(Self { client, opts: opts.clone() })
    }
}

impl PageSource for HttpSource {
    fn dossier_page(&self, dossier_id: &str) -> Result<String, ExtractError> {
        let url = self.opts.dossier_url(dossier_id);
        let transport = |source| ExtractError::Transport { dossier_id: s!(dossier_id), source };

        let resp = self.client.get(&url).send().map_err(transport)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ExtractError::Retrieval {
                dossier_id: s!(dossier_id),
                status: status.as_u16(),
            });
        }
        tracing::debug!(%url, %status, "fetched dossier page");
        resp.text().map_err(transport)
    }
}
