// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! PostgREST event store.
//!
//! Talks to the `events` table of a hosted PostgREST endpoint (the REST layer
//! used by Supabase). The API key is sent both as `apikey` and as a bearer
//! token, which is what Supabase expects for anonymous access.
//!
//! PostgREST offers no push channel over plain HTTP, so change notifications
//! are produced by polling a fingerprint of the whole table. The first
//! fingerprint is taken on the watcher thread, so subscribing never waits for
//! (or fails on) the network.

use std::{
    hash::{DefaultHasher, Hash, Hasher},
    time::Duration,
};

use ureq::{Agent, AgentBuilder, Request};
use url::Url;

use crate::{
    model::{CalendarEvent, EventId, NewEvent},
    store::{EventStore, Listener, Result, StoreError, Subscription, watch::spawn_watcher},
};

const TABLE: &str = "events";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub(crate) struct PostgrestStore {
    agent: Agent,
    table_url: Url,
    api_key: String,
    poll_interval: Duration,
}

impl PostgrestStore {
    /// Creates a store for the REST endpoint at `base_url`, for example
    /// `https://project.supabase.co/rest/v1`.
    ///
    /// # Errors
    ///
    /// Returns an error if the table URL cannot be derived from `base_url`.
    pub(crate) fn new(base_url: &Url, api_key: &str, poll_interval: Duration) -> Result<Self> {
        let mut base = base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            agent: AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
            table_url: base.join(TABLE)?,
            api_key: api_key.to_string(),
            poll_interval,
        })
    }

    fn request(&self, method: &str) -> Request {
        self.agent
            .request_url(method, &self.table_url)
            .set("apikey", &self.api_key)
            .set("Authorization", &format!("Bearer {}", self.api_key))
    }

    fn fingerprint(&mut self) -> Result<u64> {
        let mut hasher = DefaultHasher::new();
        self.fetch_all()?.hash(&mut hasher);
        Ok(hasher.finish())
    }
}

impl EventStore for PostgrestStore {
    fn fetch_all(&mut self) -> Result<Vec<CalendarEvent>> {
        self.request("GET")
            .query("select", "*")
            .query("order", "created_at.asc")
            .call()?
            .into_json::<Vec<CalendarEvent>>()
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    fn insert(&mut self, event: &NewEvent) -> Result<CalendarEvent> {
        let mut rows = self
            .request("POST")
            .set("Prefer", "return=representation")
            .send_json([event])?
            .into_json::<Vec<CalendarEvent>>()
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        if rows.is_empty() {
            return Err(StoreError::Decode("insert returned no rows".to_string()));
        }

        Ok(rows.swap_remove(0))
    }

    fn delete(&mut self, id: &EventId) -> Result<()> {
        self.request("DELETE")
            .query("id", &format!("eq.{id}"))
            .call()?;

        Ok(())
    }

    fn subscribe(&self, listener: Listener) -> Result<Subscription> {
        let mut probe = self.clone();
        spawn_watcher(
            "postgrest",
            self.poll_interval,
            None,
            move || probe.fingerprint(),
            listener,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::Region, store::StoreChange};

    fn store(base: &str) -> PostgrestStore {
        PostgrestStore::new(&Url::parse(base).unwrap(), "anon", Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn table_url_is_appended_to_base_path() {
        assert_eq!(
            store("https://demo.supabase.co/rest/v1").table_url.as_str(),
            "https://demo.supabase.co/rest/v1/events"
        );
        assert_eq!(
            store("https://demo.supabase.co/rest/v1/").table_url.as_str(),
            "https://demo.supabase.co/rest/v1/events"
        );
    }

    #[test]
    fn rows_decode_from_rest_representation() {
        let body = r#"[
            {"id": 12, "month_index": 2, "day": 15, "event_text": "Feira",
             "event_link": null, "region": "SC", "created_at": "2026-01-05T10:00:00.123456+00:00"},
            {"id": "a1b2", "month_index": 0, "day": 3, "event_text": "Congresso",
             "event_link": "https://example.com", "region": "PR", "created_at": "2026-01-06T10:00:00Z"}
        ]"#;

        let rows: Vec<CalendarEvent> = serde_json::from_str(body).unwrap();
        assert_eq!(rows[0].id, EventId::from("12"));
        assert_eq!(rows[0].link, None);
        assert_eq!(rows[1].region, Region::PR);
        assert_eq!(rows[1].link.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn new_event_encodes_column_names() {
        let event = NewEvent::new(2, 15, "Feira", "", Region::RS).unwrap();
        let json = serde_json::to_value([&event]).unwrap();

        assert_eq!(
            json,
            serde_json::json!([{
                "month_index": 2,
                "day": 15,
                "event_text": "Feira",
                "event_link": null,
                "region": "RS"
            }])
        );
    }

    #[test]
    fn subscribing_succeeds_while_the_endpoint_is_down() {
        let store = store("http://127.0.0.1:9/rest/v1");

        let subscription = store.subscribe(Box::new(|_: StoreChange| {}));
        assert!(subscription.is_ok());
    }

    #[test]
    fn unreachable_endpoint_is_an_http_error() {
        let mut store = store("http://127.0.0.1:9/rest/v1");
        assert!(matches!(store.fetch_all(), Err(StoreError::Http(_))));
    }
}
