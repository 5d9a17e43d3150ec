//! Record normalizer: one raw playlist entry to one flat record.
//!
//! Pure functions, no I/O. Missing nested paths become nulls, an absent
//! track sub-object skips the entry entirely, and the artist arrays
//! stay index-aligned.

use pulse_core::record::{PlaylistMeta, RawTrackRecord};
use pulse_spotify::model::{PlaylistItem, PlaylistObject};

/// Normalize a single playlist entry.
///
/// Returns `None` when the entry's track sub-object is absent (the
/// upstream placeholder for a removed or unavailable track) -- a skip,
/// not an error.
pub fn normalize_item(playlist_id: &str, item: &PlaylistItem) -> Option<RawTrackRecord> {
    let track = item.track.as_ref()?;

    let mut artist_ids = Vec::with_capacity(track.artists.len());
    let mut artist_names = Vec::with_capacity(track.artists.len());
    for artist in &track.artists {
        // Keep the two arrays index-aligned: an artist missing one of
        // id/name contributes an empty string in that slot; an artist
        // missing both carries no information and is skipped.
        if artist.id.is_none() && artist.name.is_none() {
            continue;
        }
        artist_ids.push(artist.id.clone().unwrap_or_default());
        artist_names.push(artist.name.clone().unwrap_or_default());
    }

    let album = track.album.as_ref();

    Some(RawTrackRecord {
        playlist_id: playlist_id.to_string(),
        track_id: track.id.clone(),
        track_name: track.name.clone(),
        track_duration_ms: track.duration_ms,
        track_popularity: track.popularity,
        album_id: album.and_then(|a| a.id.clone()),
        album_name: album.and_then(|a| a.name.clone()),
        album_release_date: album.and_then(|a| a.release_date.clone()),
        album_label: album.and_then(|a| a.label.clone()),
        artist_ids,
        artist_names,
        track_genres: Vec::new(),
    })
}

/// Normalize a full track listing, dropping skipped entries.
pub fn normalize_items(playlist_id: &str, items: &[PlaylistItem]) -> Vec<RawTrackRecord> {
    items
        .iter()
        .filter_map(|item| normalize_item(playlist_id, item))
        .collect()
}

/// Flatten playlist metadata into the stored shape.
///
/// Spotify orders cover images widest-first; the first is kept.
pub fn normalize_playlist(playlist: &PlaylistObject) -> PlaylistMeta {
    PlaylistMeta {
        playlist_id: playlist.id.clone(),
        name: playlist.name.clone(),
        owner: playlist
            .owner
            .as_ref()
            .and_then(|o| o.display_name.clone()),
        description: playlist
            .description
            .clone()
            .filter(|d| !d.is_empty()),
        image_url: playlist.images.first().map(|i| i.url.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_spotify::model::{AlbumObject, ArtistObject, TrackObject};

    fn artist(id: Option<&str>, name: Option<&str>) -> ArtistObject {
        ArtistObject {
            id: id.map(String::from),
            name: name.map(String::from),
            genres: Vec::new(),
        }
    }

    fn full_item() -> PlaylistItem {
        PlaylistItem {
            track: Some(TrackObject {
                id: Some("t1".to_string()),
                name: Some("Song".to_string()),
                duration_ms: Some(200_000),
                popularity: Some(80),
                album: Some(AlbumObject {
                    id: Some("a1".to_string()),
                    name: Some("Album".to_string()),
                    release_date: Some("2023-01-15".to_string()),
                    label: Some("Label".to_string()),
                }),
                artists: vec![
                    artist(Some("ar1"), Some("Artist 1")),
                    artist(Some("ar2"), Some("Artist 2")),
                    artist(Some("ar3"), Some("Artist 3")),
                ],
            }),
        }
    }

    #[test]
    fn full_record_flattens_every_field() {
        let record = normalize_item("p1", &full_item()).unwrap();
        assert_eq!(record.playlist_id, "p1");
        assert_eq!(record.track_id.as_deref(), Some("t1"));
        assert_eq!(record.album_name.as_deref(), Some("Album"));
        assert_eq!(record.album_release_date.as_deref(), Some("2023-01-15"));
        assert!(record.track_genres.is_empty());
    }

    #[test]
    fn absent_track_object_skips_the_entry() {
        assert!(normalize_item("p1", &PlaylistItem { track: None }).is_none());
    }

    #[test]
    fn missing_album_yields_null_album_fields() {
        let mut item = full_item();
        item.track.as_mut().unwrap().album = None;

        let record = normalize_item("p1", &item).unwrap();
        assert_eq!(record.album_id, None);
        assert_eq!(record.album_name, None);
        assert_eq!(record.album_release_date, None);
        assert_eq!(record.album_label, None);
    }

    #[test]
    fn artist_arrays_stay_index_aligned() {
        let record = normalize_item("p1", &full_item()).unwrap();
        assert_eq!(record.artist_ids.len(), 3);
        assert_eq!(record.artist_names.len(), 3);
        assert_eq!(record.artist_ids[1], "ar2");
        assert_eq!(record.artist_names[1], "Artist 2");
    }

    #[test]
    fn zero_artists_yield_empty_arrays_not_a_failure() {
        let mut item = full_item();
        item.track.as_mut().unwrap().artists = Vec::new();

        let record = normalize_item("p1", &item).unwrap();
        assert!(record.artist_ids.is_empty());
        assert!(record.artist_names.is_empty());
    }

    #[test]
    fn half_known_artist_keeps_alignment_with_empty_slot() {
        let mut item = full_item();
        item.track.as_mut().unwrap().artists = vec![
            artist(None, Some("Nameless Id")),
            artist(Some("ar2"), Some("Artist 2")),
            artist(None, None),
        ];

        let record = normalize_item("p1", &item).unwrap();
        assert_eq!(record.artist_ids, vec!["", "ar2"]);
        assert_eq!(record.artist_names, vec!["Nameless Id", "Artist 2"]);
    }

    #[test]
    fn listing_normalization_drops_skipped_entries() {
        let items = vec![full_item(), PlaylistItem { track: None }, full_item()];
        assert_eq!(normalize_items("p1", &items).len(), 2);
    }

    #[test]
    fn playlist_meta_takes_first_image_and_drops_empty_description() {
        use pulse_spotify::model::{PlaylistImage, PlaylistOwner};

        let playlist = PlaylistObject {
            id: "p1".to_string(),
            name: Some("Road Trip".to_string()),
            description: Some(String::new()),
            owner: Some(PlaylistOwner {
                display_name: Some("someone".to_string()),
            }),
            images: vec![
                PlaylistImage { url: "wide.jpg".to_string() },
                PlaylistImage { url: "small.jpg".to_string() },
            ],
        };

        let meta = normalize_playlist(&playlist);
        assert_eq!(meta.image_url.as_deref(), Some("wide.jpg"));
        assert_eq!(meta.description, None);
        assert_eq!(meta.owner.as_deref(), Some("someone"));
    }
}
