use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;

use crate::config::Config;
use crate::error::ScrapeError;
use crate::model::RaceId;

const RESULTS_URL: &str = "https://www.wtrl.racing/api/wtrlruby/";
const EVENT_PAGE_URL: &str = "https://www.wtrl.racing/ttt-results/";
const REFERER: &str = "https://www.wtrl.racing/ttt-results/";
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// The two remote endpoints the resolver needs. Implemented over HTTP by
/// [`WtrlClient`]; tests substitute call-counting stubs.
#[async_trait]
pub trait RaceApi: Send + Sync {
    /// Raw JSON body of the results endpoint for one race.
    async fn result_payload(&self, race: RaceId) -> Result<Value, ScrapeError>;

    /// Raw HTML of the race page, fetched with the session cookies attached.
    async fn event_page(&self, race: RaceId) -> Result<String, ScrapeError>;
}

pub struct WtrlClient {
    client: reqwest::Client,
    headers: HeaderMap,
}

impl WtrlClient {
    /// # Errors
    ///
    /// Will return `Err` if the session tokens cannot be encoded as header
    /// values.
    pub fn new(config: &Config) -> Result<Self, ScrapeError> {
        Ok(Self {
            client: reqwest::Client::new(),
            headers: build_headers(config)?,
        })
    }
}

// Header set captured from the site's own results page requests. The service
// rejects calls without the integrity token and api-version headers.
fn build_headers(config: &Config) -> Result<HeaderMap, ScrapeError> {
    let mut headers = HeaderMap::new();
    let header = |v: &str| {
        HeaderValue::from_str(v).map_err(|e| ScrapeError::Other(format!("bad header value: {e}")))
    };

    headers.insert("accept", header("application/json, text/javascript, */*; q=0.01")?);
    headers.insert("authorization", header("Bearer undefined")?);
    headers.insert("cache-control", header("no-cache")?);
    headers.insert(
        "cookie",
        header(&format!(
            "wtrl_sid={}; wtrl_ouid={}",
            config.wtrl_sid, config.wtrl_ouid
        ))?,
    );
    headers.insert("pragma", header("no-cache")?);
    headers.insert("referer", header(REFERER)?);
    headers.insert("user-agent", header(USER_AGENT)?);
    headers.insert("wtrl-api-version", header("2.7")?);
    headers.insert("wtrl-integrity", header(&config.ctoken)?);
    headers.insert("x-requested-with", header("XMLHttpRequest")?);
    Ok(headers)
}

#[async_trait]
impl RaceApi for WtrlClient {
    async fn result_payload(&self, race: RaceId) -> Result<Value, ScrapeError> {
        let season = race.to_string();
        let resp = self
            .client
            .get(RESULTS_URL)
            .query(&[
                ("wtrlid", "ttt"),
                ("season", season.as_str()),
                ("action", "results"),
            ])
            .headers(self.headers.clone())
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ScrapeError::Transport(format!(
                "results endpoint returned HTTP {} for race {race}",
                resp.status()
            )));
        }
        Ok(resp.json().await?)
    }

    async fn event_page(&self, race: RaceId) -> Result<String, ScrapeError> {
        let resp = self
            .client
            .post(EVENT_PAGE_URL)
            .form(&[("season", race.to_string())])
            .headers(self.headers.clone())
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ScrapeError::Transport(format!(
                "race page returned HTTP {} for race {race}",
                resp.status()
            )));
        }
        Ok(resp.text().await?)
    }
}
