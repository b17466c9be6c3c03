//! Named cross-field rules for puzzle parameter payloads.
//!
//! Each rule is a `name` plus a pure check returning one message per problem.
//! Rules only run on payloads that parsed cleanly, so they can rely on field
//! bounds having been enforced already.
use crate::puzzle::*;
use std::collections::BTreeSet;

/// A single named invariant over `T`.
pub struct Rule<T: 'static> {
    pub name: &'static str,
    pub check: fn(&T) -> Vec<String>,
}

/// Types that carry named invariants.
pub trait RuleSet: Sized + 'static {
    const RULES: &'static [Rule<Self>];

    /// Run every rule, returning `(rule name, message)` per failure.
    fn broken_rules(&self) -> Vec<(&'static str, String)> {
        Self::RULES
            .iter()
            .flat_map(|rule| (rule.check)(self).into_iter().map(move |msg| (rule.name, msg)))
            .collect()
    }
}

pub(crate) fn duplicate_ids<'a>(what: &str, ids: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut reported = BTreeSet::new();
    let mut messages = Vec::new();
    for id in ids {
        if !seen.insert(id) && reported.insert(id) {
            messages.push(format!("duplicate {what} id \"{id}\""));
        }
    }
    messages
}

fn round_options_listed<'a, T: PartialEq + 'a>(
    rounds: impl IntoIterator<Item = (&'a str, &'a [T], &'a T)>,
) -> Vec<String> {
    rounds
        .into_iter()
        .filter(|(_, options, correct)| !options.contains(correct))
        .map(|(id, _, _)| format!("round {id}: correctOption must be in options"))
        .collect()
}

impl RuleSet for StampSumParams {
    const RULES: &'static [Rule<Self>] = &[
        Rule {
            name: "unique_stamp_ids",
            check: |p| duplicate_ids("stamp", p.stamps.iter().map(|s| s.id.as_str())),
        },
        Rule {
            name: "stamp_companion_exists",
            check: |p| {
                p.stamps
                    .iter()
                    .filter_map(|stamp| {
                        let companion = stamp.requires_stamp_id.as_deref()?;
                        if companion == stamp.id {
                            return Some(format!("stamp {} cannot require itself", stamp.id));
                        }
                        if p.stamps.iter().any(|other| other.id == companion) {
                            return None;
                        }
                        Some(format!(
                            "stamp {} requires unknown stamp \"{companion}\"",
                            stamp.id
                        ))
                    })
                    .collect()
            },
        },
    ];
}

impl RuleSet for MailbagBalanceParams {
    const RULES: &'static [Rule<Self>] = &[Rule {
        name: "unique_parcel_ids",
        check: |p| duplicate_ids("parcel", p.parcels().map(|parcel| parcel.id.as_str())),
    }];
}

impl RuleSet for BubblePopParams {
    const RULES: &'static [Rule<Self>] = &[Rule {
        name: "unique_bubble_ids",
        check: |p| duplicate_ids("bubble", p.bubbles.iter().map(|b| b.id.as_str())),
    }];
}

impl RuleSet for EvidenceTapePathParams {
    const RULES: &'static [Rule<Self>] = &[Rule {
        name: "unique_card_ids",
        check: |p| duplicate_ids("card", p.move_cards.iter().map(|c| c.id.as_str())),
    }];
}

impl RuleSet for NumberInputQuizParams {
    const RULES: &'static [Rule<Self>] = &[Rule {
        name: "unique_round_ids",
        check: |p| duplicate_ids("round", p.rounds.iter().map(|r| r.id.as_str())),
    }];
}

impl RuleSet for CoinSumParams {
    const RULES: &'static [Rule<Self>] = &[Rule {
        name: "unique_coin_ids",
        check: |p| duplicate_ids("coin", p.coins.iter().map(|c| c.id.as_str())),
    }];
}

impl RuleSet for ClockReadParams {
    const RULES: &'static [Rule<Self>] = &[
        Rule {
            name: "unique_round_ids",
            check: |p| duplicate_ids("round", p.rounds.iter().map(|r| r.id.as_str())),
        },
        Rule {
            name: "correct_option_listed",
            check: |p| {
                round_options_listed(
                    p.rounds
                        .iter()
                        .map(|r| (r.id.as_str(), r.options.as_slice(), &r.correct_option)),
                )
            },
        },
    ];
}

impl RuleSet for PerimeterWalkParams {
    const RULES: &'static [Rule<Self>] = &[Rule {
        name: "perimeter_matches_segments",
        check: |p| {
            let sum = p
                .segments
                .iter()
                .try_fold(0i64, |total, s| total.checked_add(s.length));
            match sum {
                None => vec!["segment lengths overflow.".to_string()],
                Some(sum) if sum == p.correct_perimeter => Vec::new(),
                Some(sum) => {
                    vec![format!("correctPerimeter should equal sum(segments) = {sum}.")]
                }
            }
        },
    }];
}

/// `2 * (rows + cols)`, or `None` when it does not fit in an `i64`.
fn rectangle_perimeter(rows: i64, cols: i64) -> Option<i64> {
    rows.checked_add(cols).and_then(|sum| sum.checked_mul(2))
}

impl AreaRectBuilderParams {
    /// Every `(rows, cols)` inside the ranges that meets the area and the
    /// optional perimeter requirement. Row counts above `targetArea` can
    /// never fit since `cols >= 1`.
    pub fn solutions(&self) -> Vec<(i64, i64)> {
        let mut found = Vec::new();
        for rows in self.rows_min.max(1)..=self.rows_max.min(self.target_area) {
            if self.target_area % rows != 0 {
                continue;
            }
            let cols = self.target_area / rows;
            if cols < self.cols_min || cols > self.cols_max {
                continue;
            }
            if self
                .required_perimeter
                .is_some_and(|perimeter| rectangle_perimeter(rows, cols) != Some(perimeter))
            {
                continue;
            }
            found.push((rows, cols));
        }
        found
    }
}

impl RuleSet for AreaRectBuilderParams {
    const RULES: &'static [Rule<Self>] = &[
        Rule {
            name: "ranges_ordered",
            check: |p| {
                let mut messages = Vec::new();
                if p.rows_max < p.rows_min {
                    messages.push("rowsMax must be >= rowsMin".to_string());
                }
                if p.cols_max < p.cols_min {
                    messages.push("colsMax must be >= colsMin".to_string());
                }
                messages
            },
        },
        Rule {
            name: "rectangle_feasible",
            check: |p| {
                if p.solutions().is_empty() {
                    vec![
                        "No rectangle in the given ranges satisfies targetArea (and requiredPerimeter if provided)."
                            .to_string(),
                    ]
                } else {
                    Vec::new()
                }
            },
        },
    ];
}

impl RuleSet for AngleClassifyParams {
    const RULES: &'static [Rule<Self>] = &[
        Rule {
            name: "unique_round_ids",
            check: |p| duplicate_ids("round", p.rounds.iter().map(|r| r.id.as_str())),
        },
        Rule {
            name: "correct_option_listed",
            check: |p| {
                round_options_listed(
                    p.rounds
                        .iter()
                        .map(|r| (r.id.as_str(), r.options.as_slice(), &r.correct_option)),
                )
            },
        },
    ];
}

impl RuleSet for SymmetryPickParams {
    const RULES: &'static [Rule<Self>] = &[
        Rule {
            name: "unique_round_ids",
            check: |p| duplicate_ids("round", p.rounds.iter().map(|r| r.id.as_str())),
        },
        Rule {
            name: "correct_option_listed",
            check: |p| {
                round_options_listed(
                    p.rounds
                        .iter()
                        .map(|r| (r.id.as_str(), r.options.as_slice(), &r.correct_option)),
                )
            },
        },
    ];
}

impl RuleSet for FractionPieSumParams {
    const RULES: &'static [Rule<Self>] = &[
        Rule {
            name: "target_below_denominator",
            check: |p| {
                if p.target_numerator >= p.denominator {
                    vec!["targetNumerator must be < denominator".to_string()]
                } else {
                    Vec::new()
                }
            },
        },
        Rule {
            name: "slices_below_denominator",
            check: |p| {
                p.slices
                    .iter()
                    .filter(|s| s.numerator >= p.denominator)
                    .map(|s| format!("slice {} numerator must be < denominator", s.id))
                    .collect()
            },
        },
        Rule {
            name: "unique_slice_ids",
            check: |p| duplicate_ids("slice", p.slices.iter().map(|s| s.id.as_str())),
        },
    ];
}

impl RuleSet for DecimalNumberLineParams {
    const RULES: &'static [Rule<Self>] = &[
        Rule {
            name: "range_ordered",
            check: |p| {
                p.rounds
                    .iter()
                    .filter(|r| r.max <= r.min)
                    .map(|r| format!("round {}: max must be > min", r.id))
                    .collect()
            },
        },
        Rule {
            name: "target_in_range",
            check: |p| {
                p.rounds
                    .iter()
                    .filter(|r| r.target < r.min || r.target > r.max)
                    .map(|r| format!("round {}: target must be within [min,max]", r.id))
                    .collect()
            },
        },
        Rule {
            name: "unique_round_ids",
            check: |p| duplicate_ids("round", p.rounds.iter().map(|r| r.id.as_str())),
        },
    ];
}

impl RuleSet for PercentSprinkleParams {
    const RULES: &'static [Rule<Self>] = &[
        Rule {
            name: "whole_required_count",
            check: |p| {
                if (p.total_items * p.target_percent) % 100 != 0 {
                    vec![
                        "totalItems * targetPercent must be divisible by 100 (so the answer is a whole number)."
                            .to_string(),
                    ]
                } else {
                    Vec::new()
                }
            },
        },
        Rule {
            name: "required_count_matches",
            check: |p| {
                let product = p.total_items * p.target_percent;
                if product % 100 != 0 || p.required_count == product / 100 {
                    return Vec::new();
                }
                vec![format!(
                    "requiredCount should be {} for totalItems={} and targetPercent={}.",
                    product / 100,
                    p.total_items,
                    p.target_percent
                )]
            },
        },
    ];
}

impl RuleSet for FdpTrioMatchParams {
    const RULES: &'static [Rule<Self>] = &[
        Rule {
            name: "fraction_below_denominator",
            check: |p| {
                p.trios
                    .iter()
                    .filter(|t| t.fraction.numerator >= t.fraction.denominator)
                    .map(|t| {
                        format!(
                            "fraction {}: numerator must be < denominator",
                            t.fraction.id
                        )
                    })
                    .collect()
            },
        },
        Rule {
            name: "unique_card_ids",
            check: |p| {
                let mut messages = duplicate_ids("trio", p.trios.iter().map(|t| t.id.as_str()));
                messages.extend(duplicate_ids(
                    "fraction",
                    p.trios.iter().map(|t| t.fraction.id.as_str()),
                ));
                messages.extend(duplicate_ids(
                    "decimal",
                    p.trios.iter().map(|t| t.decimal.id.as_str()),
                ));
                messages.extend(duplicate_ids(
                    "percent",
                    p.trios.iter().map(|t| t.percent.id.as_str()),
                ));
                messages
            },
        },
    ];
}

impl PuzzleParams {
    /// Dispatch to the payload's rule set.
    pub fn broken_rules(&self) -> Vec<(&'static str, String)> {
        match self {
            PuzzleParams::StampSum(p) => p.broken_rules(),
            PuzzleParams::MailbagBalance(p) => p.broken_rules(),
            PuzzleParams::BubblePopDifference(p) => p.broken_rules(),
            PuzzleParams::EvidenceTapePath(p) => p.broken_rules(),
            PuzzleParams::NumberInputQuiz(p) => p.broken_rules(),
            PuzzleParams::CoinSum(p) => p.broken_rules(),
            PuzzleParams::ClockRead(p) => p.broken_rules(),
            PuzzleParams::PerimeterWalk(p) => p.broken_rules(),
            PuzzleParams::AreaRectBuilder(p) => p.broken_rules(),
            PuzzleParams::AngleClassify(p) => p.broken_rules(),
            PuzzleParams::SymmetryPick(p) => p.broken_rules(),
            PuzzleParams::FractionPieSum(p) => p.broken_rules(),
            PuzzleParams::DecimalNumberLine(p) => p.broken_rules(),
            PuzzleParams::PercentSprinkle(p) => p.broken_rules(),
            PuzzleParams::FdpTrioMatch(p) => p.broken_rules(),
        }
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
