//! Wire types for the Spotify Web API responses we consume.
//!
//! Every descriptive field is optional: upstream payloads are
//! inconsistently shaped (removed tracks, local files, albums without
//! labels), and the normalization contract maps any missing path to a
//! null rather than a parse failure.

use serde::Deserialize;

/// One page of a paginated collection response.
///
/// `next` is the opaque continuation URL; its absence signals the final
/// page.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default)]
    pub items: Vec<T>,
    pub next: Option<String>,
}

/// A single entry in a playlist's track listing.
///
/// `track` is null for removed or unavailable tracks; the normalizer
/// skips such entries.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<TrackObject>,
}

/// The track sub-object of a playlist entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackObject {
    pub id: Option<String>,
    pub name: Option<String>,
    pub duration_ms: Option<i64>,
    pub popularity: Option<i32>,
    pub album: Option<AlbumObject>,
    #[serde(default)]
    pub artists: Vec<ArtistObject>,
}

/// The album sub-object of a track.
#[derive(Debug, Clone, Deserialize)]
pub struct AlbumObject {
    pub id: Option<String>,
    pub name: Option<String>,
    pub release_date: Option<String>,
    pub label: Option<String>,
}

/// An artist reference inside a track, or a full artist entity from the
/// single-artist endpoint (which adds `genres`).
#[derive(Debug, Clone, Deserialize)]
pub struct ArtistObject {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// Playlist metadata from `GET /v1/playlists/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistObject {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub owner: Option<PlaylistOwner>,
    #[serde(default)]
    pub images: Vec<PlaylistImage>,
}

/// Owner sub-object of a playlist.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistOwner {
    pub display_name: Option<String>,
}

/// Cover image reference; Spotify orders these widest-first.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistImage {
    pub url: String,
}

/// Response from the accounts-service token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_track_payload_deserializes() {
        let json = r#"{
            "track": {
                "id": "track123",
                "name": "Test Song",
                "duration_ms": 200000,
                "popularity": 80,
                "album": {
                    "id": "album123",
                    "name": "Test Album",
                    "release_date": "2023-01-15",
                    "label": "Test Records"
                },
                "artists": [
                    {"id": "artist1", "name": "Test Artist"}
                ]
            }
        }"#;
        let item: PlaylistItem = serde_json::from_str(json).unwrap();
        let track = item.track.unwrap();
        assert_eq!(track.id.as_deref(), Some("track123"));
        assert_eq!(track.duration_ms, Some(200_000));
        assert_eq!(track.artists.len(), 1);
        assert!(track.artists[0].genres.is_empty());
    }

    #[test]
    fn removed_track_deserializes_to_none() {
        let item: PlaylistItem = serde_json::from_str(r#"{"track": null}"#).unwrap();
        assert!(item.track.is_none());
    }

    #[test]
    fn sparse_track_fields_default_to_none() {
        // Local files come through with most fields missing entirely.
        let item: PlaylistItem =
            serde_json::from_str(r#"{"track": {"id": null, "name": "Local File"}}"#).unwrap();
        let track = item.track.unwrap();
        assert!(track.id.is_none());
        assert!(track.album.is_none());
        assert!(track.artists.is_empty());
        assert!(track.popularity.is_none());
    }

    #[test]
    fn page_without_next_is_final() {
        let json = r#"{"items": [{"track": null}], "next": null}"#;
        let page: Page<PlaylistItem> = serde_json::from_str(json).unwrap();
        assert_eq!(page.items.len(), 1);
        assert!(page.next.is_none());
    }

    #[test]
    fn artist_entity_carries_genres() {
        let json = r#"{"id": "artist1", "name": "Test Artist", "genres": ["pop", "rock"]}"#;
        let artist: ArtistObject = serde_json::from_str(json).unwrap();
        assert_eq!(artist.genres, vec!["pop", "rock"]);
    }

    #[test]
    fn playlist_metadata_deserializes() {
        let json = r#"{
            "id": "pl1",
            "name": "Road Trip",
            "description": "",
            "owner": {"display_name": "someone"},
            "images": [{"url": "https://i.scdn.co/image/abc"}]
        }"#;
        let playlist: PlaylistObject = serde_json::from_str(json).unwrap();
        assert_eq!(playlist.name.as_deref(), Some("Road Trip"));
        assert_eq!(playlist.images[0].url, "https://i.scdn.co/image/abc");
    }
}
