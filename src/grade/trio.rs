//! Fraction / decimal / percent trio matching.
use super::answer::text_at;
use super::{plural, Verdict};
use crate::puzzle::FdpTrioMatchParams;
use serde_json::Value;
use std::collections::BTreeSet;

pub(crate) fn fdp_trio_match(p: &FdpTrioMatchParams, answer: &Value) -> Verdict {
    let matches: &[Value] = answer
        .get("matches")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let needed = p.trios.len();
    if matches.len() != needed {
        return Verdict::fail(format!(
            "Finish all matches. {}/{needed} complete.",
            matches.len()
        ))
        .with("done", matches.len());
    }

    let mut fractions = BTreeSet::new();
    let mut decimals = BTreeSet::new();
    let mut percents = BTreeSet::new();
    let mut wrong = 0usize;
    for entry in matches {
        let fraction_id = text_at(entry, "fractionId");
        let decimal_id = text_at(entry, "decimalId");
        let percent_id = text_at(entry, "percentId");
        fractions.insert(fraction_id);
        decimals.insert(decimal_id);
        percents.insert(percent_id);

        let paired = p.trios.iter().find(|trio| trio.fraction.id == fraction_id);
        if !paired
            .is_some_and(|trio| trio.decimal.id == decimal_id && trio.percent.id == percent_id)
        {
            wrong += 1;
        }
    }

    if fractions.len() != needed || decimals.len() != needed || percents.len() != needed {
        return Verdict::fail("Each card can only be used once. No double-dipping!")
            .with("wrong", wrong);
    }
    if wrong > 0 {
        return Verdict::fail(format!("So close—{wrong} trio{} mismatched.", plural(wrong)))
            .with("wrong", wrong);
    }
    Verdict::pass("Triple match complete!").with("wrong", wrong)
}
