//! Case library loading.
//!
//! A content directory holds one JSON case document per file. Loading never
//! stops at the first bad file: valid cases are kept, and every file that
//! failed is recorded with its error so `casefile check` can report them all.
use crate::case::Case;
use crate::schema::{parse_case, ContentInvalid};
use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

/// A case file that could not be loaded.
#[derive(Debug)]
pub struct Rejected {
    pub path: PathBuf,
    pub error: anyhow::Error,
}

impl Rejected {
    /// Schema violations behind the rejection, when that was the cause.
    pub fn violations(&self) -> Option<&ContentInvalid> {
        self.error.downcast_ref::<ContentInvalid>()
    }
}

/// Validated cases ordered by `orderIndex`, plus the files that were refused.
#[derive(Debug, Default)]
pub struct CaseLibrary {
    cases: Vec<Case>,
    rejected: Vec<Rejected>,
}

/// Read and validate a single case document.
pub fn load_case_file(path: &Path) -> Result<Case> {
    let bytes = fs::read(path).with_context(|| format!("read case {}", path.display()))?;
    let document: Value = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse case JSON {}", path.display()))?;
    let case = parse_case(&document)
        .map_err(anyhow::Error::new)
        .with_context(|| format!("validate case {}", path.display()))?;
    Ok(case)
}

fn json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).with_context(|| format!("read cases dir {}", dir.display()))?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("list {}", dir.display()))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

impl CaseLibrary {
    /// Load every `*.json` file in `dir`, in file-name order.
    ///
    /// Only an unreadable directory is an error. A file whose `caseId` was
    /// already loaded from an earlier file is rejected.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut cases = Vec::new();
        let mut rejected = Vec::new();
        let mut sources: BTreeMap<String, PathBuf> = BTreeMap::new();

        for path in json_files(dir)? {
            match load_case_file(&path) {
                Ok(case) => {
                    if let Some(first) = sources.get(&case.case_id) {
                        let error = anyhow!(
                            "duplicate caseId {:?} (already loaded from {})",
                            case.case_id,
                            first.display()
                        );
                        tracing::warn!(path = %path.display(), "{error}");
                        rejected.push(Rejected { path, error });
                        continue;
                    }
                    tracing::debug!(case_id = %case.case_id, path = %path.display(), "loaded case");
                    sources.insert(case.case_id.clone(), path);
                    cases.push(case);
                }
                Err(error) => {
                    tracing::warn!(path = %path.display(), "rejected case file: {error:#}");
                    rejected.push(Rejected { path, error });
                }
            }
        }

        let library = Self::from_cases(cases).with_rejected(rejected);
        tracing::info!(
            loaded = library.cases.len(),
            rejected = library.rejected.len(),
            dir = %dir.display(),
            "case library loaded"
        );
        Ok(library)
    }

    /// Build a library from already-validated cases.
    pub fn from_cases(mut cases: Vec<Case>) -> Self {
        cases.sort_by(|a, b| {
            a.order_index
                .cmp(&b.order_index)
                .then_with(|| a.case_id.cmp(&b.case_id))
        });
        let library = CaseLibrary {
            cases,
            rejected: Vec::new(),
        };
        for (from, unknown) in library.dangling_unlocks() {
            tracing::warn!(
                case_id = %from,
                unlocks = %unknown,
                "unlockNextCaseIds names an unknown case"
            );
        }
        library
    }

    fn with_rejected(mut self, rejected: Vec<Rejected>) -> Self {
        self.rejected = rejected;
        self
    }

    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    pub fn rejected(&self) -> &[Rejected] {
        &self.rejected
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn get(&self, case_id: &str) -> Option<&Case> {
        self.cases.iter().find(|case| case.case_id == case_id)
    }

    /// `get`, but an unknown id is an error naming the known ones.
    pub fn require(&self, case_id: &str) -> Result<&Case> {
        self.get(case_id).ok_or_else(|| {
            let known: Vec<&str> = self.cases.iter().map(|c| c.case_id.as_str()).collect();
            anyhow!("unknown case {case_id:?} (known: {})", known.join(", "))
        })
    }

    /// The case whose completion unlocks `case_id`. When several cases list
    /// it, the one latest in play order wins.
    pub fn prerequisite_of(&self, case_id: &str) -> Option<&Case> {
        self.cases
            .iter()
            .rev()
            .find(|case| case.unlock_next_case_ids.iter().any(|next| next == case_id))
    }

    /// A case is playable when it has no prerequisite or its prerequisite is
    /// in `completed`.
    pub fn is_unlocked(&self, case_id: &str, completed: &BTreeSet<String>) -> bool {
        match self.prerequisite_of(case_id) {
            Some(prerequisite) => completed.contains(&prerequisite.case_id),
            None => true,
        }
    }

    /// First case in play order that is unlocked.
    pub fn first_unlocked(&self, completed: &BTreeSet<String>) -> Option<&Case> {
        self.cases
            .iter()
            .find(|case| self.is_unlocked(&case.case_id, completed))
    }

    /// `(case id, unlock target)` pairs naming cases that are not loaded.
    pub fn dangling_unlocks(&self) -> Vec<(&str, &str)> {
        let known: BTreeSet<&str> = self.cases.iter().map(|c| c.case_id.as_str()).collect();
        self.cases
            .iter()
            .flat_map(|case| {
                case.unlock_next_case_ids
                    .iter()
                    .filter(|next| !known.contains(next.as_str()))
                    .map(move |next| (case.case_id.as_str(), next.as_str()))
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "content_tests.rs"]
mod tests;
