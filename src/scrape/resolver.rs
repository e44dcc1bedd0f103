use chrono::NaiveDate;

use super::client::RaceApi;
use super::session::SessionGate;
use crate::error::ScrapeError;
use crate::model::{Event, RaceId, RaceResult, SnapshotKind};
use crate::parse::{event::parse_event, result::parse_result};
use crate::storage::SnapshotStore;

/// Cache-or-fetch resolution for one race at a time. Snapshot reads and the
/// read-decide-write sequence are not atomic, so concurrent callers must not
/// share a `(kind, race)` slot.
pub struct FetchResolver<'a> {
    api: &'a dyn RaceApi,
    store: &'a dyn SnapshotStore,
}

impl<'a> FetchResolver<'a> {
    #[must_use]
    pub fn new(api: &'a dyn RaceApi, store: &'a dyn SnapshotStore) -> Self {
        Self { api, store }
    }

    /// Returns the event record and whether it was served from cache. The
    /// race page needs no session probe; it is fetched as a plain document
    /// carrying the session cookies.
    ///
    /// # Errors
    ///
    /// Will return `Err` on transport failure, an unparsable page, or a
    /// storage fault.
    pub async fn resolve_event(
        &self,
        race: RaceId,
        force_refresh: bool,
    ) -> Result<(Event, bool), ScrapeError> {
        if !force_refresh && self.store.exists(SnapshotKind::Event, race).await? {
            return Ok((self.store.load_event(race).await?, true));
        }

        let html = self.api.event_page(race).await?;
        let event = parse_event(&html)?;
        self.store.store_event(race, &event).await?;
        Ok((event, false))
    }

    /// Returns the result record (`None` when the service has no team data
    /// for the race) and whether it was served from cache. A network fetch is
    /// gated on the session check; a rejected session is terminal for this
    /// call and writes nothing.
    ///
    /// # Errors
    ///
    /// Will return `Err` on an invalid session, transport failure, an
    /// unparsable payload, or a storage fault.
    pub async fn resolve_result(
        &self,
        race: RaceId,
        force_refresh: bool,
    ) -> Result<(Option<RaceResult>, bool), ScrapeError> {
        if !force_refresh && self.store.exists(SnapshotKind::Result, race).await? {
            return Ok((self.store.load_result(race).await?, true));
        }

        if !SessionGate::new(self.api).check().await {
            return Err(ScrapeError::Authentication(format!(
                "session rejected while fetching results for race {race}"
            )));
        }

        let payload = self.api.result_payload(race).await?;
        let result = parse_result(&payload)?;
        self.store.store_result(race, result.as_ref()).await?;
        Ok((result, false))
    }
}

/// Refresh policy: a cached event is stale only while it is both not yet
/// finalised and still recent. Finalised or old races are trusted
/// indefinitely unless the caller forces a refresh.
#[must_use]
pub fn should_refresh(event: &Event, today: NaiveDate, window_days: i64) -> bool {
    !event.is_finalised(today) && event.is_recent(today, window_days)
}
