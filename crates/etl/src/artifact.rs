//! Stage artifacts: the raw and cleaned tables on disk.
//!
//! Each CLI stage is idempotent with respect to its own artifact --
//! writing always replaces the whole file, never appends. Artifacts are
//! pretty-printed JSON so a failed run can be inspected by hand.

use std::fs;
use std::path::{Path, PathBuf};

use pulse_core::record::{PlaylistTrackRow, RawTrackRecord};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::EtlError;

/// Path of the raw (extracted, uncoerced) artifact for a playlist.
pub fn raw_path(data_dir: &Path, playlist_id: &str) -> PathBuf {
    data_dir.join(format!("raw_{playlist_id}.json"))
}

/// Path of the cleaned (transformed, load-ready) artifact for a playlist.
pub fn cleaned_path(data_dir: &Path, playlist_id: &str) -> PathBuf {
    data_dir.join(format!("cleaned_{playlist_id}.json"))
}

/// Overwrite the raw artifact for a playlist.
pub fn write_raw(
    data_dir: &Path,
    playlist_id: &str,
    records: &[RawTrackRecord],
) -> Result<PathBuf, EtlError> {
    write_json(raw_path(data_dir, playlist_id), records)
}

/// Read back the raw artifact for a playlist.
pub fn read_raw(data_dir: &Path, playlist_id: &str) -> Result<Vec<RawTrackRecord>, EtlError> {
    read_json(raw_path(data_dir, playlist_id))
}

/// Overwrite the cleaned artifact for a playlist.
pub fn write_cleaned(
    data_dir: &Path,
    playlist_id: &str,
    rows: &[PlaylistTrackRow],
) -> Result<PathBuf, EtlError> {
    write_json(cleaned_path(data_dir, playlist_id), rows)
}

/// Read back the cleaned artifact for a playlist.
pub fn read_cleaned(data_dir: &Path, playlist_id: &str) -> Result<Vec<PlaylistTrackRow>, EtlError> {
    read_json(cleaned_path(data_dir, playlist_id))
}

fn write_json<T: Serialize + ?Sized>(path: PathBuf, value: &T) -> Result<PathBuf, EtlError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| EtlError::ArtifactIo {
            path: path.clone(),
            source,
        })?;
    }
    let json = serde_json::to_string_pretty(value).map_err(|source| EtlError::ArtifactDecode {
        path: path.clone(),
        source,
    })?;
    fs::write(&path, json).map_err(|source| EtlError::ArtifactIo {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

fn read_json<T: DeserializeOwned>(path: PathBuf) -> Result<T, EtlError> {
    let contents = fs::read_to_string(&path).map_err(|source| EtlError::ArtifactIo {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| EtlError::ArtifactDecode { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(track_id: &str) -> RawTrackRecord {
        RawTrackRecord {
            playlist_id: "p1".to_string(),
            track_id: Some(track_id.to_string()),
            track_name: Some("Song".to_string()),
            track_duration_ms: Some(1000),
            track_popularity: None,
            album_id: None,
            album_name: None,
            album_release_date: None,
            album_label: None,
            artist_ids: Vec::new(),
            artist_names: Vec::new(),
            track_genres: Vec::new(),
        }
    }

    #[test]
    fn raw_artifact_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![record("t1"), record("t2")];

        write_raw(dir.path(), "p1", &records).unwrap();
        let back = read_raw(dir.path(), "p1").unwrap();
        assert_eq!(records, back);
    }

    #[test]
    fn rewriting_overwrites_instead_of_appending() {
        let dir = tempfile::tempdir().unwrap();

        write_raw(dir.path(), "p1", &[record("t1"), record("t2")]).unwrap();
        write_raw(dir.path(), "p1", &[record("t3")]).unwrap();

        let back = read_raw(dir.path(), "p1").unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].track_id.as_deref(), Some("t3"));
    }

    #[test]
    fn missing_artifact_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_raw(dir.path(), "absent").unwrap_err();
        assert_matches::assert_matches!(err, EtlError::ArtifactIo { .. });
    }

    #[test]
    fn artifacts_for_different_playlists_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        write_raw(dir.path(), "p1", &[record("t1")]).unwrap();
        write_raw(dir.path(), "p2", &[record("t2")]).unwrap();

        assert_eq!(read_raw(dir.path(), "p1").unwrap()[0].track_id.as_deref(), Some("t1"));
        assert_eq!(read_raw(dir.path(), "p2").unwrap()[0].track_id.as_deref(), Some("t2"));
    }
}
