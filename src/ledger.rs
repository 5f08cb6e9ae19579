#![cfg(feature = "std")]

//! High-score ledger: the fastest winning times, persisted as a JSON array.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::config::{MAX_SCORES, SCORES_FILE};
use crate::game::ScoreRecorder;

/// Winning times in seconds, best (lowest) first.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Scores(Vec<u64>);

impl Scores {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    pub fn best(&self) -> Option<u64> {
        self.0.first().copied()
    }

    fn insert(&mut self, score: u64, cap: usize) {
        self.0.push(score);
        self.normalize(cap);
    }

    fn normalize(&mut self, cap: usize) {
        self.0.sort_unstable();
        self.0.truncate(cap);
    }
}

impl From<Scores> for Vec<u64> {
    fn from(scores: Scores) -> Self {
        scores.0
    }
}

impl fmt::Display for Scores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "No high scores yet. Be the first!");
        }
        write!(f, "Top Scores:")?;
        for (i, s) in self.0.iter().enumerate() {
            write!(f, "\n{}. {} seconds", i + 1, s)?;
        }
        Ok(())
    }
}

/// File-backed ranking of the best `cap` winning times.
///
/// Every call reads the file afresh; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct ScoreLedger {
    path: PathBuf,
    cap: usize,
}

impl ScoreLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cap: MAX_SCORES,
        }
    }

    /// Keep `cap` scores instead of the default five.
    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = cap;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Load the persisted scores. A missing or unreadable file is an empty ledger.
    pub fn load_scores(&self) -> Scores {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("no score file at {}", self.path.display());
                return Scores::default();
            }
            Err(e) => {
                warn!("could not read {}: {}", self.path.display(), e);
                return Scores::default();
            }
        };
        match serde_json::from_str::<Scores>(&json) {
            Ok(mut scores) => {
                scores.normalize(self.cap);
                scores
            }
            Err(e) => {
                warn!("ignoring corrupt score file {}: {}", self.path.display(), e);
                Scores::default()
            }
        }
    }

    /// Add a winning time and rewrite the file with the best `cap` scores.
    pub fn record_score(&self, elapsed_secs: u64) -> io::Result<Scores> {
        let mut scores = self.load_scores();
        scores.insert(elapsed_secs, self.cap);
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string(&scores)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, json)?;
        debug!("recorded score {}s, ledger now {:?}", elapsed_secs, scores);
        Ok(scores)
    }
}

impl Default for ScoreLedger {
    fn default() -> Self {
        Self::new(SCORES_FILE)
    }
}

impl ScoreRecorder for ScoreLedger {
    fn record(&mut self, elapsed_secs: u64) {
        if let Err(e) = self.record_score(elapsed_secs) {
            warn!(
                "could not save score to {}: {}",
                self.path.display(),
                e
            );
        }
    }
}
