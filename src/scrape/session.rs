use serde_json::Value;

use super::client::RaceApi;
use crate::model::RaceId;

// Any race works as a probe; the original scraper uses the first.
const PROBE_RACE: RaceId = RaceId(1);

/// Verifies that the held session tokens are still valid before a fetch is
/// attempted. The check itself never fails a caller: transport and parse
/// problems all report an invalid session, and only the fetch resolver
/// escalates that into a typed error.
pub struct SessionGate<'a> {
    api: &'a dyn RaceApi,
}

impl<'a> SessionGate<'a> {
    #[must_use]
    pub fn new(api: &'a dyn RaceApi) -> Self {
        Self { api }
    }

    /// One lightweight authenticated probe. True iff the request succeeded
    /// and the service reported both `loggedin` and `success`.
    pub async fn check(&self) -> bool {
        match self.api.result_payload(PROBE_RACE).await {
            Ok(payload) => flag(&payload, "loggedin") && flag(&payload, "success"),
            Err(_) => false,
        }
    }
}

fn flag(payload: &Value, key: &str) -> bool {
    payload.get(key).and_then(Value::as_bool).unwrap_or(false)
}
