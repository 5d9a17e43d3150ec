//! Batch genre enrichment.
//!
//! One upstream lookup per distinct artist id across the whole batch,
//! spaced by a fixed inter-request delay. The throttle is a sequential
//! pacing rule to stay under the upstream rate ceiling, not a
//! concurrency primitive.

use std::collections::{BTreeSet, HashMap};
use std::time::Duration;

use async_trait::async_trait;
use pulse_core::record::RawTrackRecord;
use pulse_spotify::{SpotifyClient, SpotifyError};

/// Default pause between consecutive artist lookups.
pub const DEFAULT_LOOKUP_DELAY: Duration = Duration::from_millis(100);

/// Anything that can resolve an artist id to its genre tags.
///
/// The production implementation is [`SpotifyClient`]; tests substitute
/// an in-memory fake.
#[async_trait]
pub trait GenreSource {
    async fn genres_for_artist(&self, artist_id: &str) -> Result<Vec<String>, SpotifyError>;
}

#[async_trait]
impl GenreSource for SpotifyClient {
    async fn genres_for_artist(&self, artist_id: &str) -> Result<Vec<String>, SpotifyError> {
        self.artist_genres(artist_id).await
    }
}

#[async_trait]
impl<T: GenreSource + Sync> GenreSource for &T {
    async fn genres_for_artist(&self, artist_id: &str) -> Result<Vec<String>, SpotifyError> {
        (**self).genres_for_artist(artist_id).await
    }
}

/// Resolves genres for every distinct artist in a batch.
pub struct GenreEnricher<S> {
    source: S,
    delay: Duration,
}

impl<S: GenreSource> GenreEnricher<S> {
    /// Create an enricher with the default inter-request delay.
    pub fn new(source: S) -> Self {
        Self::with_delay(source, DEFAULT_LOOKUP_DELAY)
    }

    /// Create an enricher with an explicit inter-request delay.
    pub fn with_delay(source: S, delay: Duration) -> Self {
        Self { source, delay }
    }

    /// Look up genres for every distinct artist id across the records.
    ///
    /// Exactly one upstream request per distinct id; a failed lookup
    /// contributes an empty set and is logged, never aborting the batch.
    /// Empty-string ids (alignment placeholders from normalization) are
    /// not looked up.
    pub async fn genre_map(
        &self,
        records: &[RawTrackRecord],
    ) -> HashMap<String, BTreeSet<String>> {
        let distinct: BTreeSet<&str> = records
            .iter()
            .flat_map(|r| r.artist_ids.iter().map(String::as_str))
            .filter(|id| !id.is_empty())
            .collect();

        let mut map = HashMap::with_capacity(distinct.len());
        let mut first = true;
        for artist_id in distinct {
            if !first {
                tokio::time::sleep(self.delay).await;
            }
            first = false;

            let genres = match self.source.genres_for_artist(artist_id).await {
                Ok(genres) => genres.into_iter().collect(),
                Err(e) => {
                    tracing::warn!(artist_id, error = %e, "Genre lookup failed, continuing with empty set");
                    BTreeSet::new()
                }
            };
            map.insert(artist_id.to_string(), genres);
        }
        map
    }

    /// Enrich records in place: each track's genres become the
    /// deduplicated union over its contributing artists, stored sorted.
    pub async fn enrich(&self, records: &mut [RawTrackRecord]) {
        let map = self.genre_map(records).await;
        for record in records.iter_mut() {
            record.track_genres = merge_genres(&record.artist_ids, &map);
        }
    }
}

/// Union of genre sets across the given artist ids, sorted and
/// deduplicated. Unknown ids contribute nothing.
pub fn merge_genres(
    artist_ids: &[String],
    map: &HashMap<String, BTreeSet<String>>,
) -> Vec<String> {
    let mut union = BTreeSet::new();
    for id in artist_ids {
        if let Some(genres) = map.get(id) {
            union.extend(genres.iter().cloned());
        }
    }
    union.into_iter().collect()
}
