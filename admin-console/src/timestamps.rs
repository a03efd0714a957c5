//! Client-side creation times for comments.
//!
//! The backend has no timestamp field, so the first time this client sees a
//! comment id it records "now" and reuses that value from then on.

use crate::error::Result;
use crate::storage::KeyValueStore;
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;

pub const COMMENT_TIMESTAMPS_KEY: &str = "commentTimestamps";

#[derive(Clone)]
pub struct CommentTimestamps {
    store: Arc<dyn KeyValueStore>,
}

impl CommentTimestamps {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn load(&self) -> BTreeMap<i64, DateTime<Utc>> {
        let Some(raw) = self.store.get(COMMENT_TIMESTAMPS_KEY) else {
            return BTreeMap::new();
        };
        let parsed: BTreeMap<String, String> = match serde_json::from_str(&raw) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!("Discarding unreadable comment timestamps: {}", e);
                return BTreeMap::new();
            }
        };
        parsed
            .into_iter()
            .filter_map(|(id, ts)| {
                let id = id.parse::<i64>().ok()?;
                let ts = DateTime::parse_from_rfc3339(&ts).ok()?.with_timezone(&Utc);
                Some((id, ts))
            })
            .collect()
    }

    fn save(&self, map: &BTreeMap<i64, DateTime<Utc>>) -> Result<()> {
        let raw: BTreeMap<String, String> = map
            .iter()
            .map(|(id, ts)| (id.to_string(), ts.to_rfc3339_opts(SecondsFormat::Millis, true)))
            .collect();
        self.store
            .set(COMMENT_TIMESTAMPS_KEY, &serde_json::to_string(&raw)?)
    }

    pub fn get(&self, id: i64) -> Option<DateTime<Utc>> {
        self.load().get(&id).copied()
    }

    /// Returns the stored time for each id, stamping unseen ids with `now`.
    /// One read and at most one write per call.
    pub fn stamp_all(&self, ids: &[i64], now: DateTime<Utc>) -> Result<Vec<DateTime<Utc>>> {
        let mut map = self.load();
        let mut changed = false;
        let stamps = ids
            .iter()
            .map(|id| {
                *map.entry(*id).or_insert_with(|| {
                    changed = true;
                    now
                })
            })
            .collect();
        if changed {
            self.save(&map)?;
        }
        Ok(stamps)
    }

    pub fn record(&self, id: i64, at: DateTime<Utc>) -> Result<()> {
        let mut map = self.load();
        map.insert(id, at);
        self.save(&map)
    }

    pub fn forget(&self, id: i64) -> Result<()> {
        let mut map = self.load();
        if map.remove(&id).is_some() {
            self.save(&map)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::Duration;

    fn timestamps() -> CommentTimestamps {
        CommentTimestamps::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn first_sighting_is_stable() {
        let ts = timestamps();
        let t0 = Utc::now();
        let first = ts.stamp_all(&[1, 2], t0).unwrap();
        let later = ts.stamp_all(&[1, 2, 3], t0 + Duration::hours(1)).unwrap();

        assert_eq!(first[0], later[0]);
        assert_eq!(first[1], later[1]);
        assert_eq!(later[2], t0 + Duration::hours(1));
    }

    #[test]
    fn forget_removes_entry() {
        let ts = timestamps();
        let t0 = Utc::now();
        ts.record(9, t0).unwrap();
        assert!(ts.get(9).is_some());
        ts.forget(9).unwrap();
        assert!(ts.get(9).is_none());
    }

    #[test]
    fn stored_as_iso_strings_keyed_by_id() {
        let store = Arc::new(MemoryStore::new());
        let ts = CommentTimestamps::new(store.clone());
        let at = DateTime::parse_from_rfc3339("2024-03-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        ts.record(42, at).unwrap();

        let raw = store.get(COMMENT_TIMESTAMPS_KEY).unwrap();
        let map: BTreeMap<String, String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(map["42"], "2024-03-01T10:00:00.000Z");
    }
}
