//! Multi-round puzzles: every round is judged, and the verdict counts the
//! rounds that were missing, mistyped or wrong.
use super::answer::round_answers;
use super::{plural, Verdict};
use crate::puzzle::*;
use serde_json::Value;

/// Count rounds whose submitted value fails `matches` (absent counts as wrong).
fn count_wrong<'a, R: 'a>(
    answer: &Value,
    rounds: impl IntoIterator<Item = &'a R>,
    round_id: impl Fn(&R) -> &str,
    matches: impl Fn(&R, &Value) -> bool,
) -> usize {
    let submitted = round_answers(answer);
    rounds
        .into_iter()
        .filter(|&round| {
            let got = submitted.and_then(|answers| answers.get(round_id(round)));
            !got.is_some_and(|value| matches(round, value))
        })
        .count()
}

fn tally(wrong: usize, miss: impl FnOnce(usize) -> String, success: &str) -> Verdict {
    let verdict = if wrong > 0 {
        Verdict::fail(miss(wrong))
    } else {
        Verdict::pass(success)
    };
    verdict.with("wrong", wrong)
}

fn same_text(expected: &str, got: &Value) -> bool {
    got.as_str() == Some(expected)
}

pub(crate) fn number_input_quiz(p: &NumberInputQuizParams, answer: &Value) -> Verdict {
    let wrong = count_wrong(
        answer,
        &p.rounds,
        |r| r.id.as_str(),
        |r, got| got.as_f64() == Some(r.answer as f64),
    );
    tally(
        wrong,
        |n| format!("Not quite. {n} round{} off.", plural(n)),
        "Math combo complete!",
    )
}

pub(crate) fn clock_read(p: &ClockReadParams, answer: &Value) -> Verdict {
    let wrong = count_wrong(
        answer,
        &p.rounds,
        |r| r.id.as_str(),
        |r, got| same_text(&r.correct_option, got),
    );
    tally(
        wrong,
        |n| format!("Time’s tricky. {n} clock{} off.", plural(n)),
        "Clock cracked!",
    )
}

pub(crate) fn angle_classify(p: &AngleClassifyParams, answer: &Value) -> Verdict {
    let wrong = count_wrong(
        answer,
        &p.rounds,
        |r| r.id.as_str(),
        |r, got| same_text(r.correct_option.as_str(), got),
    );
    tally(
        wrong,
        |n| format!("Angle alert! {n} choice{} off.", plural(n)),
        "Angles identified!",
    )
}

pub(crate) fn symmetry_pick(p: &SymmetryPickParams, answer: &Value) -> Verdict {
    let wrong = count_wrong(
        answer,
        &p.rounds,
        |r| r.id.as_str(),
        |r, got| same_text(r.correct_option.as_str(), got),
    );
    tally(
        wrong,
        |n| format!("Mirror, mirror… {n} doodle{} still lopsided.", plural(n)),
        "Symmetry secured!",
    )
}

pub(crate) fn decimal_number_line(p: &DecimalNumberLineParams, answer: &Value) -> Verdict {
    let tolerance = p.tolerance;
    let wrong = count_wrong(
        answer,
        &p.rounds,
        |r| r.id.as_str(),
        |r, got| match got.as_f64() {
            Some(mark) if tolerance == 0.0 => mark == r.target,
            Some(mark) => (mark - r.target).abs() <= tolerance,
            None => false,
        },
    );
    tally(
        wrong,
        |n| format!("Almost. {n} mark{} off on the number line.", plural(n)),
        "Decimal detective work complete!",
    )
}
