//! Typed case documents.
//!
//! Values of these types only come out of `schema::parse_case`, so every
//! structural and cross-reference invariant already holds for them.
use crate::puzzle::{vocabulary, Puzzle};
use serde::Serialize;

/// Supported `version` of the case document format.
pub const CASE_FORMAT_VERSION: i64 = 1;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub version: u32,
    pub case_id: String,
    pub order_index: u32,
    pub title: String,
    pub summary: String,
    pub difficulty_band: u8,
    pub estimated_minutes: u32,
    pub intro_letter: Letter,
    pub suspects: Vec<Suspect>,
    pub locations: Vec<Location>,
    pub evidence: Vec<Evidence>,
    pub puzzles: Vec<Puzzle>,
    pub final_question: FinalQuestion,
    pub reveal: Reveal,
    pub rewards: Rewards,
    pub unlock_next_case_ids: Vec<String>,
}

impl Case {
    pub fn puzzle(&self, puzzle_id: &str) -> Option<&Puzzle> {
        self.puzzles.iter().find(|puzzle| puzzle.id == puzzle_id)
    }

    pub fn suspect(&self, suspect_id: &str) -> Option<&Suspect> {
        self.suspects.iter().find(|suspect| suspect.id == suspect_id)
    }

    pub fn evidence_item(&self, evidence_id: &str) -> Option<&Evidence> {
        self.evidence.iter().find(|item| item.id == evidence_id)
    }

    /// Evidence revealed by solving the given puzzles.
    pub fn unlocked_evidence<'a>(&'a self, solved_puzzle_ids: &[&str]) -> Vec<&'a Evidence> {
        self.puzzles
            .iter()
            .filter(|puzzle| solved_puzzle_ids.contains(&puzzle.id.as_str()))
            .filter_map(|puzzle| self.evidence_item(&puzzle.unlocks_evidence_id))
            .collect()
    }

    /// Reward payload handed to the progress store when the case is closed.
    pub fn reward_grant(&self) -> RewardGrant {
        RewardGrant {
            xp: self.rewards.xp,
            stickers: self.rewards.stickers.iter().map(|s| s.id.clone()).collect(),
            badges: self.rewards.badges.iter().map(|b| b.id.clone()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Postmark {
    pub city: String,
    #[serde(rename = "dateISO")]
    pub date_iso: String,
    pub stamp_slogan: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Letter {
    pub from_name: String,
    pub to_name: String,
    pub subject_line: String,
    pub body_paragraphs: Vec<String>,
    pub signature: String,
    pub postmark: Postmark,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alibi {
    pub claim: String,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suspect {
    pub id: String,
    pub name: String,
    pub role_tagline: String,
    pub portrait_key: String,
    pub alibi: Alibi,
    pub quips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub name: String,
    pub background_key: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    pub id: String,
    pub label: String,
    pub description: String,
    pub sprite_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WrongRationale {
    pub suspect_id: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_suspect_id: String,
    pub correct_rationale: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub wrong_rationales: Vec<WrongRationale>,
}

impl FinalQuestion {
    /// Explanation lines for a wrong accusation, when the author wrote any.
    pub fn wrong_rationale(&self, suspect_id: &str) -> Option<&[String]> {
        self.wrong_rationales
            .iter()
            .find(|entry| entry.suspect_id == suspect_id)
            .map(|entry| entry.lines.as_slice())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealCorrect {
    pub headline: String,
    pub body_paragraphs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cutscene_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sfx_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealIncorrect {
    pub headline: String,
    pub body_paragraphs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reveal {
    pub correct: RevealCorrect,
    pub incorrect: RevealIncorrect,
}

vocabulary! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Rarity {
        Common => "common",
        Rare => "rare",
        Legendary => "legendary",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardSticker {
    pub id: String,
    pub name: String,
    pub sprite_key: String,
    pub rarity: Rarity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardBadge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rewards {
    pub xp: u32,
    pub stickers: Vec<RewardSticker>,
    pub badges: Vec<RewardBadge>,
}

/// Identifiers and xp awarded for closing a case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RewardGrant {
    pub xp: u32,
    pub stickers: Vec<String>,
    pub badges: Vec<String>,
}
