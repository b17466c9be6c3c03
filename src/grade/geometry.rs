//! Perimeter and rectangle-area puzzles.
use super::answer::{number_at, typed_number};
use super::{format_number, number_value, Verdict};
use crate::puzzle::{AreaRectBuilderParams, PerimeterWalkParams};
use serde_json::Value;

pub(crate) fn perimeter_walk(p: &PerimeterWalkParams, answer: &Value) -> Verdict {
    let Some(got) = typed_number(answer) else {
        return Verdict::fail("Type a number for the perimeter.");
    };
    let expected = p.correct_perimeter;
    let diff = expected as f64 - got;
    if diff != 0.0 {
        let hint = if diff > 0.0 {
            format!("You are {} too low.", format_number(diff))
        } else {
            format!("You are {} too high.", format_number(diff.abs()))
        };
        return Verdict::fail(format!("Not quite. {hint}")).with("expected", expected);
    }
    Verdict::pass("Perimeter captured!").with("expected", expected)
}

pub(crate) fn area_rect_builder(p: &AreaRectBuilderParams, answer: &Value) -> Verdict {
    let (Some(rows), Some(cols)) = (number_at(answer, "rows"), number_at(answer, "cols")) else {
        return Verdict::fail("Pick rows and columns for your rectangle.");
    };
    let area = rows * cols;
    if area != p.target_area as f64 {
        return Verdict::fail(format!(
            "Area is {}, but target is {}.",
            format_number(area),
            p.target_area
        ))
        .with("area", number_value(area));
    }
    if let Some(required) = p.required_perimeter {
        let perimeter = 2.0 * (rows + cols);
        if perimeter != required as f64 {
            return Verdict::fail(format!(
                "Area matches, but perimeter is {}. Need {required}.",
                format_number(perimeter)
            ))
            .with("per", number_value(perimeter));
        }
    }
    Verdict::pass("Blueprint approved!").with("area", number_value(area))
}
