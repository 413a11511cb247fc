//! Gallery of saved drawings
//!
//! Each saved drawing is a PNG file in the gallery directory. An index file
//! (`gallery.json`) keeps ids and timestamps, newest first. Saved images are
//! never modified, only added or deleted.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::export::write_atomic;

const INDEX_FILE: &str = "gallery.json";

/// Index record for one saved drawing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryEntry {
    pub id: String,
    /// Creation time in milliseconds since the Unix epoch
    pub timestamp_ms: i64,
    /// File name inside the gallery directory
    pub file: String,
}

impl GalleryEntry {
    /// Creation time formatted in local time
    pub fn display_time(&self) -> String {
        chrono::DateTime::from_timestamp_millis(self.timestamp_ms)
            .map(|t| {
                t.with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            })
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// A saved drawing with its pixel data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedImage {
    pub id: String,
    /// PNG-encoded raster snapshot
    pub pixel_data: Vec<u8>,
    pub timestamp_ms: i64,
}

pub struct Gallery {
    dir: PathBuf,
    entries: Vec<GalleryEntry>,
}

impl Gallery {
    /// Open (or create) a gallery directory
    pub fn open(dir: &Path) -> anyhow::Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create gallery directory: {}", dir.display()))?;

        let index = dir.join(INDEX_FILE);
        let entries = if index.exists() {
            match read_index(&index) {
                Ok(entries) => entries,
                Err(err) => {
                    log::warn!("Gallery index unreadable, rebuilding: {:?}", err);
                    scan_dir(dir)?
                }
            }
        } else {
            scan_dir(dir)?
        };

        log::debug!("Opened gallery {} ({} images)", dir.display(), entries.len());
        Ok(Self {
            dir: dir.to_path_buf(),
            entries,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Entries, newest first
    pub fn list(&self) -> &[GalleryEntry] {
        &self.entries
    }

    /// Save a PNG snapshot stamped with the current time
    pub fn save(&mut self, png: &[u8]) -> anyhow::Result<GalleryEntry> {
        self.save_at(png, chrono::Utc::now().timestamp_millis())
    }

    /// Save a PNG snapshot with an explicit timestamp
    pub fn save_at(&mut self, png: &[u8], timestamp_ms: i64) -> anyhow::Result<GalleryEntry> {
        let id = self.unique_id(timestamp_ms);
        let entry = GalleryEntry {
            file: format!("{id}.png"),
            id,
            timestamp_ms,
        };
        write_atomic(&self.dir.join(&entry.file), png)?;

        // Newest first; equal timestamps keep save order
        let pos = self
            .entries
            .iter()
            .position(|e| e.timestamp_ms < timestamp_ms)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry.clone());
        self.write_index()?;

        log::info!("Saved image {} to gallery", entry.id);
        Ok(entry)
    }

    /// Load a saved drawing
    pub fn get(&self, id: &str) -> anyhow::Result<SavedImage> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.id == id)
            .with_context(|| format!("No image with id {id} in gallery"))?;
        let path = self.dir.join(&entry.file);
        let pixel_data =
            std::fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(SavedImage {
            id: entry.id.clone(),
            pixel_data,
            timestamp_ms: entry.timestamp_ms,
        })
    }

    /// Delete a saved drawing; returns false if the id was unknown
    pub fn delete(&mut self, id: &str) -> anyhow::Result<bool> {
        let Some(pos) = self.entries.iter().position(|e| e.id == id) else {
            return Ok(false);
        };
        let path = self.dir.join(&self.entries[pos].file);
        match std::fs::remove_file(&path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("Image file {} already gone", path.display());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to delete {}", path.display()));
            }
        }
        // Only forget the entry once its file is gone
        self.entries.remove(pos);
        self.write_index()?;
        log::info!("Deleted image {} from gallery", id);
        Ok(true)
    }

    fn unique_id(&self, timestamp_ms: i64) -> String {
        let base = timestamp_ms.to_string();
        let taken = |id: &str| self.entries.iter().any(|e| e.id == id);
        if !taken(&base) {
            return base;
        }
        (1..)
            .map(|n| format!("{base}-{n}"))
            .find(|id| !taken(id))
            .unwrap_or(base)
    }

    fn write_index(&self) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(&self.entries)?;
        write_atomic(&self.dir.join(INDEX_FILE), &json)
    }
}

fn read_index(path: &Path) -> anyhow::Result<Vec<GalleryEntry>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read gallery index: {}", path.display()))?;
    Ok(serde_json::from_str(&json)?)
}

/// Recover entries from the PNG files on disk
fn scan_dir(dir: &Path) -> anyhow::Result<Vec<GalleryEntry>> {
    let mut entries = Vec::new();
    for item in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to list gallery directory: {}", dir.display()))?
    {
        let path = item?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("png") {
            continue;
        }
        let (Some(id), Some(file)) = (
            path.file_stem().and_then(|s| s.to_str()),
            path.file_name().and_then(|s| s.to_str()),
        ) else {
            continue;
        };
        let timestamp_ms = id
            .split('-')
            .next()
            .and_then(|t| t.parse().ok())
            .unwrap_or(0);
        entries.push(GalleryEntry {
            id: id.to_string(),
            timestamp_ms,
            file: file.to_string(),
        });
    }
    entries.sort_by(|a, b| b.timestamp_ms.cmp(&a.timestamp_ms).then(a.id.cmp(&b.id)));
    Ok(entries)
}
