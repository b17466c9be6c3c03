//! Token sums, the balance scale, bubble expressions, signed paths and
//! percent painting.
use super::answer::{id_list, id_list_at, selection_key};
use super::Verdict;
use crate::puzzle::*;
use serde_json::Value;
use std::collections::BTreeSet;

/// Which token tray a sum puzzle uses; only the wording differs.
#[derive(Debug, Clone, Copy)]
enum Purse {
    Stamps,
    Coins,
    Slices { denominator: i64 },
}

impl Purse {
    fn empty_message(self) -> &'static str {
        match self {
            Purse::Stamps => "Add some stamps to the envelope.",
            Purse::Coins => "Add some coins.",
            Purse::Slices { .. } => "Add some slices to the plate.",
        }
    }

    fn too_many_message(self, max: u32) -> String {
        match self {
            Purse::Stamps => format!("Too many stamps! Max is {max}."),
            Purse::Coins => format!("Too many coins! Max is {max}."),
            Purse::Slices { .. } => format!("Too many slices! Max is {max}."),
        }
    }

    fn short_message(self, deficit: i64) -> String {
        match self {
            Purse::Stamps => format!("You need {deficit}¢ more."),
            Purse::Coins => format!("Need {deficit}¢ more."),
            Purse::Slices { denominator } => format!("You need {deficit}/{denominator} more."),
        }
    }

    fn over_message(self, excess: i64) -> String {
        match self {
            Purse::Stamps => format!("You have {excess}¢ too much."),
            Purse::Coins => format!("Too much by {excess}¢."),
            Purse::Slices { denominator } => format!("Too much by {excess}/{denominator}."),
        }
    }

    fn success_message(self, bonus: bool) -> &'static str {
        match (self, bonus) {
            (Purse::Stamps, true) => "Perfect—and super efficient!",
            (Purse::Stamps, false) => "Perfect postage!",
            (Purse::Coins, true) => "Exact change AND speedy!",
            (Purse::Coins, false) => "Exact change!",
            (Purse::Slices { .. }, true) => "Perfect slice math—and super efficient!",
            (Purse::Slices { .. }, false) => "Perfect fraction!",
        }
    }

    fn total_key(self) -> &'static str {
        match self {
            Purse::Slices { .. } => "totalNum",
            Purse::Stamps | Purse::Coins => "total",
        }
    }

    /// Reject an empty tray or one holding more than `max` tokens.
    fn check_count(self, count: usize, max: u32) -> Option<Verdict> {
        if count == 0 {
            return Some(Verdict::fail(self.empty_message()));
        }
        if count > max as usize {
            return Some(Verdict::fail(self.too_many_message(max)));
        }
        None
    }

    fn settle(self, total: i64, target: i64, count: usize, bonus_fewest: Option<u32>) -> Verdict {
        let key = self.total_key();
        if total != target {
            let diff = target.saturating_sub(total);
            let hint = if diff > 0 {
                self.short_message(diff)
            } else {
                self.over_message(diff.saturating_abs())
            };
            return Verdict::fail(hint).with(key, total);
        }
        let bonus = bonus_fewest.is_some_and(|fewest| count <= fewest as usize);
        Verdict::pass(self.success_message(bonus))
            .with(key, total)
            .with("bonus", bonus)
    }
}

fn sum_of<'a, T>(
    selected: &[&str],
    tokens: &'a [T],
    id: impl Fn(&'a T) -> &'a str,
    value: impl Fn(&'a T) -> i64,
) -> i64 {
    selected
        .iter()
        .filter_map(|wanted| tokens.iter().find(|&token| id(token) == *wanted))
        .map(value)
        .fold(0i64, i64::saturating_add)
}

pub(crate) fn stamp_sum(p: &StampSumParams, answer: &Value) -> Verdict {
    let purse = Purse::Stamps;
    let selected = id_list(answer);
    if let Some(verdict) = purse.check_count(selected.len(), p.constraints.max_stamps) {
        return verdict;
    }
    let total = sum_of(&selected, &p.stamps, |s| s.id.as_str(), |s| s.value_cents);

    let by_id = |id: &str| p.stamps.iter().find(|stamp| stamp.id == id);
    for stamp in selected.iter().filter_map(|id| by_id(*id)) {
        let Some(companion) = stamp.requires_stamp_id.as_deref() else {
            continue;
        };
        if !selected.contains(&companion) {
            let companion_label = by_id(companion).map_or(companion, |c| c.label.as_str());
            return Verdict::fail(format!("{} demands its friend: {companion_label}.", stamp.label));
        }
    }

    purse.settle(
        total,
        p.target_cents,
        selected.len(),
        p.constraints.bonus_fewest_stamps,
    )
}

pub(crate) fn coin_sum(p: &CoinSumParams, answer: &Value) -> Verdict {
    let purse = Purse::Coins;
    let selected = id_list(answer);
    if let Some(verdict) = purse.check_count(selected.len(), p.constraints.max_coins) {
        return verdict;
    }
    let total = sum_of(&selected, &p.coins, |c| c.id.as_str(), |c| c.value_cents);
    purse.settle(
        total,
        p.target_cents,
        selected.len(),
        p.constraints.bonus_fewest_coins,
    )
}

pub(crate) fn fraction_pie_sum(p: &FractionPieSumParams, answer: &Value) -> Verdict {
    let purse = Purse::Slices {
        denominator: p.denominator,
    };
    let selected = id_list(answer);
    if let Some(verdict) = purse.check_count(selected.len(), p.constraints.max_slices) {
        return verdict;
    }
    let total = sum_of(&selected, &p.slices, |s| s.id.as_str(), |s| s.numerator);
    purse.settle(
        total,
        p.target_numerator,
        selected.len(),
        p.constraints.bonus_fewest_slices,
    )
}

pub(crate) fn mailbag_balance(p: &MailbagBalanceParams, answer: &Value) -> Verdict {
    let parcels: Vec<&Parcel> = p.parcels().collect();
    let weigh = |ids: Vec<&str>| -> i64 {
        ids.iter()
            .filter_map(|id| parcels.iter().find(|parcel| parcel.id == *id))
            .map(|parcel| parcel.value)
            .fold(0i64, i64::saturating_add)
    };
    let left_total = weigh(id_list_at(answer, "leftIds"));
    let right_total = weigh(id_list_at(answer, "rightIds"));
    let target = p.target_weight;

    let verdict = if left_total == target && right_total == target {
        Verdict::pass("Balanced to perfection!")
    } else {
        Verdict::fail(format!(
            "Not yet. Left is {left_total}, right is {right_total}. Both must be {target}."
        ))
    };
    verdict
        .with("leftTotal", left_total)
        .with("rightTotal", right_total)
}

pub(crate) fn bubble_pop(p: &BubblePopParams, answer: &Value) -> Verdict {
    let chosen = answer.as_str().unwrap_or("");
    let Some(bubble) = p.bubbles.iter().find(|bubble| bubble.id == chosen) else {
        return Verdict::fail("Pick a bubble to pop.");
    };
    let expression = bubble.expression;
    let value = expression.evaluate();

    if p.required.op.is_some_and(|op| op != expression.op) {
        return Verdict::fail("Right number maybe… wrong operation!").with("value", value);
    }
    if let Some(must_use) = p.required.must_use_numbers.as_ref().filter(|n| !n.is_empty()) {
        if !(must_use.contains(&expression.a) && must_use.contains(&expression.b)) {
            return Verdict::fail("That bubble isn’t using the right numbers.").with("value", value);
        }
    }
    if value != p.goal_value {
        return Verdict::fail(format!("That pops to {value}, not {}.", p.goal_value))
            .with("value", value);
    }
    Verdict::pass("POP! That was the lie.").with("value", value)
}

pub(crate) fn evidence_tape_path(p: &EvidenceTapePathParams, answer: &Value) -> Verdict {
    let selected = id_list(answer);
    let used = selected.len();
    let pick_count = p.pick_count as usize;
    if p.must_use_exactly_pick_count && used != pick_count {
        return Verdict::fail(format!("Use exactly {pick_count} cards. You used {used}."));
    }
    if !p.must_use_exactly_pick_count && used > pick_count {
        return Verdict::fail(format!("You can use up to {pick_count} cards."));
    }

    let value = selected
        .iter()
        .filter_map(|id| p.move_cards.iter().find(|card| card.id == *id))
        .fold(p.start, |position, card| position.saturating_add(card.delta));
    if value != p.target {
        return Verdict::fail(format!("You landed on {value}. Target is {}.", p.target))
            .with("value", value);
    }
    Verdict::pass("Route verified!").with("value", value)
}

pub(crate) fn percent_sprinkle(p: &PercentSprinkleParams, answer: &Value) -> Verdict {
    let unique_count = match answer {
        Value::Array(items) => items.iter().map(selection_key).collect::<BTreeSet<_>>().len(),
        _ => 0,
    };
    if unique_count == 0 {
        return Verdict::fail("Pick some items to paint.");
    }
    let need = p.required_count;
    let painted = unique_count as i64;
    if painted != need {
        let diff = need.saturating_sub(painted);
        let hint = if diff > 0 {
            format!("Paint {diff} more.")
        } else {
            format!("Unpaint {}.", diff.unsigned_abs())
        };
        return Verdict::fail(format!("{hint} Target is {need} ({}%).", p.target_percent))
            .with("uniqueCount", painted);
    }
    Verdict::pass("Percent perfectly painted!").with("uniqueCount", painted)
}

#[cfg(test)]
#[path = "sums_tests.rs"]
mod tests;
