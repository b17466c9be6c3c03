//! Answer grading.
//!
//! `grade` is a pure function of a validated puzzle and an answer of any
//! shape. Malformed answers never fail: they come back as a not-correct
//! `Verdict` with a message telling the player what to fix.
use crate::puzzle::{Puzzle, PuzzleKind, PuzzleParams, Vocabulary};
use crate::schema::{parse_puzzle, ContentInvalid};
use serde::Serialize;
use serde_json::{Map, Value};

mod accuse;
mod answer;
mod geometry;
mod rounds;
mod sums;
mod trio;

pub use accuse::accuse;

/// Message for puzzle documents whose kind this engine does not know.
pub const UNKNOWN_KIND_MESSAGE: &str = "Puzzle type not implemented yet.";

/// Outcome of grading one answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub correct: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
}

impl Verdict {
    pub fn pass(message: impl Into<String>) -> Self {
        Verdict {
            correct: true,
            message: message.into(),
            meta: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Verdict {
            correct: false,
            message: message.into(),
            meta: None,
        }
    }

    /// Attach one `meta` entry.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.meta
            .get_or_insert_with(Map::new)
            .insert(key.to_string(), value.into());
        self
    }

    pub fn meta_value(&self, key: &str) -> Option<&Value> {
        self.meta.as_ref()?.get(key)
    }
}

/// JSON number for a computed value, integral when it has no fraction.
pub(crate) fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        Value::from(n as i64)
    } else {
        Value::from(n)
    }
}

/// Render a computed value the way the player typed it: no trailing `.0`.
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

pub(crate) fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Grade `answer` against `puzzle`.
pub fn grade(puzzle: &Puzzle, answer: &Value) -> Verdict {
    match &puzzle.params {
        PuzzleParams::StampSum(p) => sums::stamp_sum(p, answer),
        PuzzleParams::MailbagBalance(p) => sums::mailbag_balance(p, answer),
        PuzzleParams::BubblePopDifference(p) => sums::bubble_pop(p, answer),
        PuzzleParams::EvidenceTapePath(p) => sums::evidence_tape_path(p, answer),
        PuzzleParams::NumberInputQuiz(p) => rounds::number_input_quiz(p, answer),
        PuzzleParams::CoinSum(p) => sums::coin_sum(p, answer),
        PuzzleParams::ClockRead(p) => rounds::clock_read(p, answer),
        PuzzleParams::PerimeterWalk(p) => geometry::perimeter_walk(p, answer),
        PuzzleParams::AreaRectBuilder(p) => geometry::area_rect_builder(p, answer),
        PuzzleParams::AngleClassify(p) => rounds::angle_classify(p, answer),
        PuzzleParams::SymmetryPick(p) => rounds::symmetry_pick(p, answer),
        PuzzleParams::FractionPieSum(p) => sums::fraction_pie_sum(p, answer),
        PuzzleParams::DecimalNumberLine(p) => rounds::decimal_number_line(p, answer),
        PuzzleParams::PercentSprinkle(p) => sums::percent_sprinkle(p, answer),
        PuzzleParams::FdpTrioMatch(p) => trio::fdp_trio_match(p, answer),
    }
}

/// Parse a raw puzzle document. `Ok(None)` means its `kind` is not a known
/// puzzle kind; any other schema problem is an error.
pub fn known_puzzle(document: &Value) -> Result<Option<Puzzle>, ContentInvalid> {
    let known_kind = document
        .get("kind")
        .and_then(Value::as_str)
        .and_then(PuzzleKind::from_name);
    if known_kind.is_none() {
        return Ok(None);
    }
    parse_puzzle(document).map(Some)
}

/// Grade against a raw puzzle document.
///
/// A document whose `kind` is not a known puzzle kind grades as not correct
/// with [`UNKNOWN_KIND_MESSAGE`]; any other schema problem is an error.
pub fn grade_document(puzzle: &Value, answer: &Value) -> Result<Verdict, ContentInvalid> {
    Ok(match known_puzzle(puzzle)? {
        Some(puzzle) => grade(&puzzle, answer),
        None => Verdict::fail(UNKNOWN_KIND_MESSAGE),
    })
}

#[cfg(test)]
#[path = "grade_tests.rs"]
mod tests;
