//! Player progress snapshot.
//!
//! Progress lives outside the content core: grading returns verdicts by
//! value, and only the CLI decides to record them here. The snapshot is one
//! JSON file that is read whole and rewritten whole.
use crate::case::{Case, RewardGrant};
use crate::puzzle::{TopicKey, Vocabulary};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

pub const PROGRESS_SCHEMA_VERSION: u32 = 1;

/// Practice statistics for one topic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicStats {
    pub attempts: u32,
    pub correct: u32,
    /// Consecutive correct attempts; any miss resets it.
    pub streak: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen_epoch_ms: Option<u128>,
}

/// Everything collected from closed cases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub xp: u64,
    #[serde(default)]
    pub stickers: BTreeSet<String>,
    #[serde(default)]
    pub badges: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub schema_version: u32,
    #[serde(default)]
    pub solved_by_case: BTreeMap<String, BTreeSet<String>>,
    #[serde(default)]
    pub completed_cases: BTreeSet<String>,
    #[serde(default)]
    pub rewards: Collection,
    #[serde(default)]
    pub topic_stats: BTreeMap<String, TopicStats>,
}

impl Default for ProgressSnapshot {
    fn default() -> Self {
        ProgressSnapshot {
            schema_version: PROGRESS_SCHEMA_VERSION,
            solved_by_case: BTreeMap::new(),
            completed_cases: BTreeSet::new(),
            rewards: Collection::default(),
            topic_stats: BTreeMap::new(),
        }
    }
}

/// Current epoch time in milliseconds for `last_seen_epoch_ms`.
pub fn now_epoch_ms() -> Result<u128> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock before unix epoch")?
        .as_millis())
}

impl ProgressSnapshot {
    /// Load the snapshot at `path`; a missing file is an empty snapshot.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no progress file; starting fresh");
            return Ok(Self::default());
        }
        let bytes = fs::read(path).with_context(|| format!("read progress {}", path.display()))?;
        let snapshot: ProgressSnapshot =
            serde_json::from_slice(&bytes).context("parse progress JSON")?;
        if snapshot.schema_version != PROGRESS_SCHEMA_VERSION {
            return Err(anyhow!(
                "unsupported progress schema_version {} in {}",
                snapshot.schema_version,
                path.display()
            ));
        }
        Ok(snapshot)
    }

    /// Persist the snapshot in a stable JSON format.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("create progress dir {}", parent.display()))?;
        }
        let text = serde_json::to_string_pretty(self).context("serialize progress")?;
        fs::write(path, text.as_bytes()).with_context(|| format!("write {}", path.display()))?;
        tracing::debug!(path = %path.display(), "progress saved");
        Ok(())
    }

    /// Record one graded attempt for `topic`.
    pub fn mark_puzzle_attempt(&mut self, topic: TopicKey, correct: bool, now_epoch_ms: u128) {
        let stats = self.topic_stats.entry(topic.as_str().to_string()).or_default();
        stats.attempts = stats.attempts.saturating_add(1);
        if correct {
            stats.correct = stats.correct.saturating_add(1);
            stats.streak = stats.streak.saturating_add(1);
        } else {
            stats.streak = 0;
        }
        stats.last_seen_epoch_ms = Some(now_epoch_ms);
    }

    /// Mark a puzzle solved; returns whether it was newly solved.
    pub fn mark_puzzle_solved(&mut self, case_id: &str, puzzle_id: &str) -> bool {
        self.solved_by_case
            .entry(case_id.to_string())
            .or_default()
            .insert(puzzle_id.to_string())
    }

    pub fn is_puzzle_solved(&self, case_id: &str, puzzle_id: &str) -> bool {
        self.solved_by_case
            .get(case_id)
            .is_some_and(|solved| solved.contains(puzzle_id))
    }

    /// Puzzles of `case` that are solved, in case order.
    pub fn solved_puzzles<'a>(&self, case: &'a Case) -> Vec<&'a str> {
        case.puzzles
            .iter()
            .map(|puzzle| puzzle.id.as_str())
            .filter(|id| self.is_puzzle_solved(&case.case_id, id))
            .collect()
    }

    /// Puzzles of `case` still to be solved, in case order.
    pub fn open_puzzles<'a>(&self, case: &'a Case) -> Vec<&'a str> {
        case.puzzles
            .iter()
            .map(|puzzle| puzzle.id.as_str())
            .filter(|id| !self.is_puzzle_solved(&case.case_id, id))
            .collect()
    }

    pub fn is_case_completed(&self, case_id: &str) -> bool {
        self.completed_cases.contains(case_id)
    }

    /// Close a case and add its rewards. Rewards are granted only the first
    /// time; the return value says whether this call completed the case.
    pub fn mark_case_completed(&mut self, case_id: &str, grant: &RewardGrant) -> bool {
        if !self.completed_cases.insert(case_id.to_string()) {
            return false;
        }
        self.rewards.xp = self.rewards.xp.saturating_add(u64::from(grant.xp));
        self.rewards.stickers.extend(grant.stickers.iter().cloned());
        self.rewards.badges.extend(grant.badges.iter().cloned());
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
