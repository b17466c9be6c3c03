use super::*;

fn segment(id: &str, length: i64) -> PerimeterSegment {
    PerimeterSegment {
        id: id.to_string(),
        label: id.to_string(),
        length,
        sprite_key: None,
    }
}

fn rect(
    target_area: i64,
    rows: (i64, i64),
    cols: (i64, i64),
    perimeter: Option<i64>,
) -> AreaRectBuilderParams {
    AreaRectBuilderParams {
        target_area,
        rows_min: rows.0,
        rows_max: rows.1,
        cols_min: cols.0,
        cols_max: cols.1,
        required_perimeter: perimeter,
        unit_label: "square units".to_string(),
    }
}

fn names(broken: Vec<(&'static str, String)>) -> Vec<&'static str> {
    broken.into_iter().map(|(name, _)| name).collect()
}

#[test]
fn duplicate_ids_reports_each_repeat_once() {
    let messages = duplicate_ids("stamp", ["a", "b", "a", "a", "b"]);
    assert_eq!(
        messages,
        vec![
            "duplicate stamp id \"a\"".to_string(),
            "duplicate stamp id \"b\"".to_string()
        ]
    );
}

#[test]
fn perimeter_rule_names_the_segment_sum() {
    let params = PerimeterWalkParams {
        segments: vec![segment("s1", 5), segment("s2", 3), segment("s3", 5), segment("s4", 3)],
        correct_perimeter: 15,
        unit_label: "units".to_string(),
    };
    let broken = params.broken_rules();
    assert_eq!(broken.len(), 1);
    assert_eq!(broken[0].0, "perimeter_matches_segments");
    assert_eq!(broken[0].1, "correctPerimeter should equal sum(segments) = 16.");

    let fixed = PerimeterWalkParams {
        correct_perimeter: 16,
        ..params
    };
    assert!(fixed.broken_rules().is_empty());
}

#[test]
fn rectangle_feasibility_respects_ranges_and_perimeter() {
    assert_eq!(rect(24, (2, 8), (2, 8), None).solutions(), vec![(3, 8), (4, 6), (6, 4), (8, 3)]);
    assert_eq!(rect(24, (2, 8), (2, 8), Some(20)).solutions(), vec![(4, 6), (6, 4)]);
    assert!(rect(24, (2, 8), (2, 8), None).broken_rules().is_empty());

    let impossible = rect(24, (5, 5), (2, 8), None);
    assert_eq!(names(impossible.broken_rules()), vec!["rectangle_feasible"]);
}

#[test]
fn huge_segment_lengths_report_overflow() {
    let params = PerimeterWalkParams {
        segments: (1..=4).map(|i| segment(&format!("s{i}"), i64::MAX)).collect(),
        correct_perimeter: 4,
        unit_label: "units".to_string(),
    };
    let broken = params.broken_rules();
    assert_eq!(names(broken.clone()), vec!["perimeter_matches_segments"]);
    assert_eq!(broken[0].1, "segment lengths overflow.");
}

#[test]
fn rectangle_perimeter_overflow_never_matches() {
    assert_eq!(rectangle_perimeter(4, 6), Some(20));
    assert_eq!(rectangle_perimeter(i64::MAX, 1), None);
    assert_eq!(rectangle_perimeter(i64::MAX / 2 + 1, 0), None);

    let params = rect(i64::MAX, (i64::MAX, i64::MAX), (1, 1), Some(4));
    assert!(params.solutions().is_empty());
    assert_eq!(names(params.broken_rules()), vec!["rectangle_feasible"]);
}

#[test]
fn rows_beyond_the_target_area_are_never_scanned() {
    let params = rect(7, (1, 4_000_000_000), (1, 7), None);
    assert_eq!(params.solutions(), vec![(1, 7), (7, 1)]);

    let params = rect(7, (1, i64::MAX), (1, 7), Some(16));
    assert_eq!(params.solutions(), vec![(1, 7), (7, 1)]);
}

#[test]
fn unordered_ranges_break_both_rules() {
    let params = rect(12, (4, 3), (1, 6), None);
    assert_eq!(names(params.broken_rules()), vec!["ranges_ordered", "rectangle_feasible"]);
}

#[test]
fn percent_rules_require_whole_matching_count() {
    let mut params = PercentSprinkleParams {
        total_items: 20,
        target_percent: 25,
        required_count: 5,
        item_sprite_key: "sprinkle".to_string(),
        item_label_singular: "cupcake".to_string(),
        item_label_plural: "cupcakes".to_string(),
        grid_cols: 5,
    };
    assert!(params.broken_rules().is_empty());

    params.required_count = 4;
    let broken = params.broken_rules();
    assert_eq!(names(broken.clone()), vec!["required_count_matches"]);
    assert_eq!(
        broken[0].1,
        "requiredCount should be 5 for totalItems=20 and targetPercent=25."
    );

    params.total_items = 9;
    assert_eq!(names(params.broken_rules()), vec!["whole_required_count"]);
}

#[test]
fn stamp_companion_must_exist_and_not_be_self() {
    let stamp = |id: &str, requires: Option<&str>| Stamp {
        id: id.to_string(),
        label: id.to_string(),
        value_cents: 5,
        sprite_key: "stamp".to_string(),
        requires_stamp_id: requires.map(str::to_string),
    };
    let params = StampSumParams {
        target_cents: 20,
        stamps: vec![
            stamp("st_a", Some("st_b")),
            stamp("st_b", None),
            stamp("st_c", Some("st_missing")),
            stamp("st_d", Some("st_d")),
        ],
        constraints: StampConstraints {
            max_stamps: 4,
            bonus_fewest_stamps: None,
        },
    };
    let broken = params.broken_rules();
    assert_eq!(names(broken.clone()), vec!["stamp_companion_exists", "stamp_companion_exists"]);
    assert!(broken[0].1.contains("st_missing"));
    assert!(broken[1].1.contains("cannot require itself"));
}

#[test]
fn fraction_rules_compare_against_denominator() {
    let slice = |id: &str, numerator: i64| FractionSlice {
        id: id.to_string(),
        label: format!("{numerator}/8"),
        numerator,
        sprite_key: "slice".to_string(),
    };
    let params = FractionPieSumParams {
        denominator: 8,
        target_numerator: 8,
        slices: vec![slice("sl_1", 1), slice("sl_2", 2), slice("sl_9", 9), slice("sl_1", 1)],
        constraints: SliceConstraints {
            max_slices: 4,
            bonus_fewest_slices: None,
        },
    };
    assert_eq!(
        names(params.broken_rules()),
        vec!["target_below_denominator", "slices_below_denominator", "unique_slice_ids"]
    );
}

#[test]
fn round_rules_flag_missing_correct_option() {
    let round = |id: &str, correct: SymmetryAxis| SymmetryRound {
        id: id.to_string(),
        doodle_key: "doodle".to_string(),
        prompt: "Where is the mirror line?".to_string(),
        options: vec![SymmetryAxis::Vertical, SymmetryAxis::Horizontal],
        correct_option: correct,
    };
    let params = SymmetryPickParams {
        rounds: vec![
            round("r1", SymmetryAxis::Vertical),
            round("r2", SymmetryAxis::None),
            round("r3", SymmetryAxis::Horizontal),
        ],
    };
    let broken = params.broken_rules();
    assert_eq!(broken.len(), 1);
    assert_eq!(
        broken[0],
        ("correct_option_listed", "round r2: correctOption must be in options".to_string())
    );
}

#[test]
fn decimal_rounds_check_range_and_target() {
    let round = |id: &str, min: f64, max: f64, target: f64| DecimalLineRound {
        id: id.to_string(),
        min,
        max,
        step: 0.1,
        target,
        prompt: "Mark it".to_string(),
        show_labels: true,
    };
    let params = DecimalNumberLineParams {
        rounds: vec![
            round("r1", 0.0, 1.0, 0.4),
            round("r2", 1.0, 1.0, 1.0),
            round("r3", 0.0, 1.0, 1.5),
        ],
        tolerance: 0.0,
    };
    assert_eq!(names(params.broken_rules()), vec!["range_ordered", "target_in_range"]);
}
