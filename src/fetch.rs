use std::time::Duration;

use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use tracing::debug;

use crate::error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://plancke.io";
const REQUEST_TIMEOUT_SECS: u64 = 10;

// plancke blocks the default reqwest user-agent.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0";

static CLIENT: OnceCell<Client> = OnceCell::new();

fn base_url() -> String {
    std::env::var("PIXEL_SCOUT_BASE_URL")
        .map(|v| v.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

pub fn player_url(player: &str) -> String {
    format!("{}/hypixel/player/stats/{player}", base_url())
}

/// Guild lookup is keyed by a member's identifier, not a guild name.
pub fn guild_url(player: &str) -> String {
    format!("{}/hypixel/guild/player/{player}", base_url())
}

/// Seam between the pipeline and the network. The comparator and the CLI
/// take any implementation; tests swap in a fixture-backed one.
pub trait PageFetcher {
    fn fetch_html(&self, url: &str) -> Result<String>;
}

/// Production fetcher: one lazily built blocking client, shared per process.
pub struct HttpFetcher;

impl PageFetcher for HttpFetcher {
    fn fetch_html(&self, url: &str) -> Result<String> {
        let client = http_client()?;
        debug!(url, "fetching page");
        let resp = client
            .get(url)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .map_err(|e| Error::Fetch {
                url: url.to_string(),
                detail: e.to_string(),
            })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Fetch {
                url: url.to_string(),
                detail: format!("http {status}"),
            });
        }
        resp.text().map_err(|e| Error::Fetch {
            url: url.to_string(),
            detail: format!("failed reading body: {e}"),
        })
    }
}

fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Fetch {
                url: base_url(),
                detail: format!("failed to build http client: {e}"),
            })
    })
}
