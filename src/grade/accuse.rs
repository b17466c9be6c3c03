//! The final question of a case.
use super::Verdict;
use crate::case::Case;
use serde_json::json;

/// Check an accusation against the case's final question.
///
/// The message is the reveal headline for the outcome. `meta.rationale`
/// carries the explanation lines when the case has them, and a correct
/// accusation also carries `meta.reward`.
pub fn accuse(case: &Case, suspect_id: &str) -> Verdict {
    let question = &case.final_question;
    if !question.options.iter().any(|option| option == suspect_id) {
        return Verdict::fail("Pick one of the suspects.");
    }

    if suspect_id == question.correct_suspect_id {
        let grant = case.reward_grant();
        return Verdict::pass(case.reveal.correct.headline.as_str())
            .with("suspectId", suspect_id)
            .with("rationale", question.correct_rationale.clone())
            .with(
                "reward",
                json!({ "xp": grant.xp, "stickers": grant.stickers, "badges": grant.badges }),
            );
    }

    let verdict =
        Verdict::fail(case.reveal.incorrect.headline.as_str()).with("suspectId", suspect_id);
    match question.wrong_rationale(suspect_id) {
        Some(lines) => verdict.with("rationale", lines.to_vec()),
        None => verdict,
    }
}
