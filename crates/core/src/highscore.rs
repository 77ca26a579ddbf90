//! Highscore store - ranked, bounded, persisted list of finished runs
//!
//! Entries are kept sorted by score (descending), ties broken by the shorter
//! run, and truncated to a fixed capacity. The list is persisted as a JSON
//! document written to a sibling temp file and renamed over the target, so
//! a failed save never leaves a half-written file behind.
//!
//! Persistence never fails loudly: a missing or unreadable file loads as an
//! empty list and a failed write is logged and otherwise ignored. Files in
//! the older `score|name|date|speed|length` line format are still accepted
//! on load.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::HighscoreError;
use crate::types::{Difficulty, GameMode, DEFAULT_HIGHSCORE_CAPACITY, DEFAULT_PLAYER_NAME};

const FILE_VERSION: u32 = 1;
const LEGACY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub player_name: String,
    pub score: u32,
    pub difficulty: Difficulty,
    pub game_mode: GameMode,
    pub date: DateTime<Utc>,
    pub duration_ms: u64,
    pub snake_length: usize,
    /// Tick interval at the end of the run
    pub speed_ms: u32,
}

impl HighScoreEntry {
    /// Normalize a player name: trimmed, blank becomes the default name
    pub fn normalize_name(name: &str) -> String {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            DEFAULT_PLAYER_NAME.to_string()
        } else {
            trimmed.to_string()
        }
    }

    /// Parse one record of the legacy `score|name|date|speed|length` format
    fn from_legacy_line(line: &str) -> Option<Self> {
        let parts: Vec<&str> = line.split('|').map(str::trim).collect();
        if parts.len() < 5 {
            return None;
        }
        let score = parts[0].parse().ok()?;
        let date = NaiveDateTime::parse_from_str(parts[2], LEGACY_DATE_FORMAT)
            .ok()?
            .and_utc();
        let speed_ms = parts[3].trim_end_matches("ms").parse().ok()?;
        let snake_length = parts[4].parse().ok()?;
        Some(Self {
            player_name: Self::normalize_name(parts[1]),
            score,
            difficulty: Difficulty::default(),
            game_mode: GameMode::default(),
            date,
            duration_ms: 0,
            snake_length,
            speed_ms,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct HighscoreFile {
    version: u32,
    entries: Vec<HighScoreEntry>,
}

#[derive(Debug, Clone)]
pub struct HighscoreStore {
    entries: Vec<HighScoreEntry>,
    capacity: usize,
    path: Option<PathBuf>,
}

impl HighscoreStore {
    /// An in-memory store; `save` is a no-op
    pub fn in_memory(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
            path: None,
        }
    }

    /// A store backed by `path`, loaded immediately
    pub fn open(path: impl Into<PathBuf>, capacity: usize) -> Self {
        let mut store = Self {
            path: Some(path.into()),
            ..Self::in_memory(capacity)
        };
        store.load();
        store
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First `n` entries of the ranking
    pub fn top(&self, n: usize) -> &[HighScoreEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn best_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Whether `score` would be retained if added now
    pub fn is_qualifying(&self, score: u32) -> bool {
        if self.entries.len() < self.capacity {
            return true;
        }
        self.entries.last().map_or(true, |lowest| score > lowest.score)
    }

    /// Insert, re-rank and truncate. Returns the 1-based rank of the new
    /// entry, or `None` if it did not survive truncation. Does not persist.
    pub fn add_score(&mut self, entry: HighScoreEntry) -> Option<usize> {
        // Stable sort keeps earlier entries ahead on full ties, so the new
        // entry goes in last and its index is found by position after sorting.
        self.entries.push(entry);
        let new_idx = self.entries.len() - 1;
        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        order.sort_by(|&a, &b| {
            let (ea, eb) = (&self.entries[a], &self.entries[b]);
            eb.score
                .cmp(&ea.score)
                .then(ea.duration_ms.cmp(&eb.duration_ms))
        });
        let rank = order.iter().position(|&i| i == new_idx);

        let mut slots: Vec<Option<HighScoreEntry>> =
            std::mem::take(&mut self.entries).into_iter().map(Some).collect();
        self.entries = order
            .iter()
            .take(self.capacity)
            .filter_map(|&i| slots[i].take())
            .collect();

        rank.filter(|&r| r < self.capacity).map(|r| r + 1)
    }

    /// Add and persist in one step
    pub fn record(&mut self, entry: HighScoreEntry) -> Option<usize> {
        let rank = self.add_score(entry);
        if rank.is_some() {
            self.save();
        }
        rank
    }

    /// Remove every entry and persist the empty list
    pub fn clear(&mut self) {
        self.entries.clear();
        self.save();
    }

    /// Replace the in-memory list with the file contents.
    ///
    /// Missing or unreadable files yield an empty list.
    pub fn load(&mut self) {
        let Some(path) = self.path.clone() else {
            return;
        };
        if !path.exists() {
            self.entries.clear();
            return;
        }
        match read_entries(&path) {
            Ok(mut entries) => {
                entries.sort_by(|a, b| {
                    b.score
                        .cmp(&a.score)
                        .then(a.duration_ms.cmp(&b.duration_ms))
                });
                entries.truncate(self.capacity);
                self.entries = entries;
            }
            Err(e) => {
                log::warn!("discarding highscores: {}", e);
                self.entries.clear();
            }
        }
    }

    /// Write the whole list. Returns false on failure (already logged).
    pub fn save(&self) -> bool {
        let Some(path) = self.path.as_deref() else {
            return true;
        };
        match write_entries(path, &self.entries) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("could not save highscores: {}", e);
                false
            }
        }
    }
}

impl Default for HighscoreStore {
    fn default() -> Self {
        Self::in_memory(DEFAULT_HIGHSCORE_CAPACITY)
    }
}

fn read_entries(path: &Path) -> Result<Vec<HighScoreEntry>, HighscoreError> {
    let text = fs::read_to_string(path).map_err(|source| HighscoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_str::<HighscoreFile>(&text) {
        Ok(file) => Ok(file.entries),
        Err(json_err) => {
            let legacy: Vec<HighScoreEntry> = text
                .lines()
                .filter(|l| !l.trim().is_empty())
                .filter_map(HighScoreEntry::from_legacy_line)
                .collect();
            if legacy.is_empty() {
                Err(HighscoreError::Json(json_err))
            } else {
                log::info!("imported {} legacy highscore records", legacy.len());
                Ok(legacy)
            }
        }
    }
}

fn write_entries(path: &Path, entries: &[HighScoreEntry]) -> Result<(), HighscoreError> {
    let io_err = |source| HighscoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    let doc = HighscoreFile {
        version: FILE_VERSION,
        entries: entries.to_vec(),
    };
    let data = serde_json::to_vec_pretty(&doc)?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(io_err)?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, data).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)?;
    Ok(())
}
