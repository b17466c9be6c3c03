use super::*;
use crate::case::Case;
use crate::schema::parse_case;
use serde_json::json;

const FERRET: &str = include_str!("../../content/cases/case_001_ferret_mustache.json");
const BANANA: &str = include_str!("../../content/cases/case_002_banana_in_the_mailbox.json");
const PIE_CHART: &str = include_str!("../../content/cases/case_003_the_missing_pie_chart.json");

fn load(text: &str) -> Case {
    let document: Value = serde_json::from_str(text).expect("fixture is JSON");
    parse_case(&document).expect("fixture is a valid case")
}

fn grade_in(case: &Case, puzzle_id: &str, answer: Value) -> Verdict {
    let puzzle = case.puzzle(puzzle_id).expect("puzzle exists");
    grade(puzzle, &answer)
}

#[test]
fn ferret_case_puzzles_accept_their_solutions() {
    let case = load(FERRET);

    let stamps = grade_in(&case, "p1_stamp_sum", json!(["st_twenty", "st_ten", "st_five", "st_two"]));
    assert!(stamps.correct, "{}", stamps.message);
    assert_eq!(stamps.message, "Perfect—and super efficient!");
    assert_eq!(stamps.meta_value("total"), Some(&json!(37)));
    assert_eq!(stamps.meta_value("bonus"), Some(&json!(true)));

    let balance = grade_in(
        &case,
        "p2_mailbag_balance",
        json!({
            "leftIds": ["pa_sealed_16", "pa_movable_9"],
            "rightIds": ["pb_sealed_12", "pb_movable_8", "pa_movable_5"]
        }),
    );
    assert!(balance.correct, "{}", balance.message);

    let bubble = grade_in(&case, "p3_bubble_pop_difference", json!("bb_pigeons_43_19"));
    assert_eq!(bubble.message, "POP! That was the lie.");
    assert_eq!(bubble.meta_value("value"), Some(&json!(24)));

    let tape = grade_in(&case, "p4_evidence_tape_path", json!(["mc_plus10", "mc_plus5", "mc_minus2"]));
    assert_eq!(tape.message, "Route verified!");
}

#[test]
fn ferret_case_near_misses() {
    let case = load(FERRET);

    let companion = grade_in(
        &case,
        "p1_stamp_sum",
        json!(["st_twenty", "st_ten", "st_glitter_plus3", "st_two", "st_two"]),
    );
    assert_eq!(companion.message, "Glitter +3 demands its friend: Worm Coupon.");

    let with_coupon = grade_in(
        &case,
        "p1_stamp_sum",
        json!(["st_twenty", "st_ten", "st_glitter_plus3", "st_coupon_worm_minus1", "st_five"]),
    );
    assert!(with_coupon.correct, "{}", with_coupon.message);
    assert_eq!(with_coupon.message, "Perfect postage!");
    assert_eq!(with_coupon.meta_value("bonus"), Some(&json!(false)));

    let socks = grade_in(&case, "p3_bubble_pop_difference", json!("bb_socks_30_6"));
    assert_eq!(socks.message, "That bubble isn’t using the right numbers.");

    let bread = grade_in(&case, "p3_bubble_pop_difference", json!("bb_bread_18_6"));
    assert_eq!(bread.message, "Right number maybe… wrong operation!");

    let short = grade_in(&case, "p4_evidence_tape_path", json!(["mc_plus10", "mc_plus5"]));
    assert_eq!(short.message, "Use exactly 3 cards. You used 2.");

    let unbalanced = grade_in(
        &case,
        "p2_mailbag_balance",
        json!({ "leftIds": ["pa_sealed_16"], "rightIds": ["pb_sealed_12"] }),
    );
    assert_eq!(
        unbalanced.message,
        "Not yet. Left is 16, right is 12. Both must be 25."
    );
    assert_eq!(unbalanced.meta_value("leftTotal"), Some(&json!(16)));
}

#[test]
fn banana_case_puzzles_accept_their_solutions() {
    let case = load(BANANA);

    let quiz = grade_in(&case, "p1_mul_quiz", json!({ "answers": { "r1": 12, "r2": 30, "r3": 14 } }));
    assert_eq!(quiz.message, "Math combo complete!");

    let fence = grade_in(&case, "p2_perimeter_walk", json!("16"));
    assert_eq!(fence.message, "Perimeter captured!");

    let coins = grade_in(&case, "p3_coin_sum", json!(["c25", "c25", "c10", "c5"]));
    assert_eq!(coins.message, "Exact change AND speedy!");
    assert_eq!(coins.meta_value("total"), Some(&json!(65)));

    let clocks = grade_in(
        &case,
        "p4_clock_read",
        json!({ "answers": { "t1": "3:15", "t2": "6:30", "t3": "9:05" } }),
    );
    assert_eq!(clocks.message, "Clock cracked!");

    let plot = grade_in(&case, "p5_area_rect", json!({ "rows": 4, "cols": 6 }));
    assert_eq!(plot.message, "Blueprint approved!");
    let narrow = grade_in(&case, "p5_area_rect", json!({ "rows": 3, "cols": 8 }));
    assert_eq!(narrow.message, "Area matches, but perimeter is 22. Need 20.");
}

#[test]
fn pie_chart_case_puzzles_accept_their_solutions() {
    let case = load(PIE_CHART);

    let pie = grade_in(&case, "p1_fraction_pie", json!(["sl_2", "sl_4"]));
    assert_eq!(pie.message, "Perfect slice math—and super efficient!");
    assert_eq!(pie.meta_value("totalNum"), Some(&json!(6)));

    let line = grade_in(
        &case,
        "p2_decimal_line",
        json!({ "answers": { "d1": 0.31, "d2": 0.5, "d3": 1.72 } }),
    );
    assert_eq!(line.message, "Decimal detective work complete!");

    let sprinkles = grade_in(&case, "p3_percent_sprinkle", json!([0, 3, 7, 11, 19, 3]));
    assert_eq!(sprinkles.message, "Percent perfectly painted!");
    assert_eq!(sprinkles.meta_value("uniqueCount"), Some(&json!(5)));

    let trio = |name: &str| json!({ "fractionId": format!("f_{name}"), "decimalId": format!("d_{name}"), "percentId": format!("p_{name}") });
    let tags = grade_in(
        &case,
        "p4_trio_match",
        json!({ "matches": [trio("half"), trio("quarter"), trio("three_quarters"), trio("tenth")] }),
    );
    assert_eq!(tags.message, "Triple match complete!");

    let corners = grade_in(
        &case,
        "p5_angle_classify",
        json!({ "answers": { "a1": "acute", "a2": "right", "a3": "obtuse" } }),
    );
    assert_eq!(corners.message, "Angles identified!");

    let doodles = grade_in(
        &case,
        "p6_symmetry_pick",
        json!({ "answers": { "s1": "vertical", "s2": "horizontal", "s3": "none" } }),
    );
    assert_eq!(doodles.message, "Symmetry secured!");
}

#[test]
fn malformed_answers_never_panic() {
    let shapes = [
        json!(null),
        json!(42),
        json!("x"),
        json!([]),
        json!({}),
        json!([{ "nested": true }]),
    ];
    for text in [FERRET, BANANA, PIE_CHART] {
        let case = load(text);
        for puzzle in &case.puzzles {
            for answer in &shapes {
                let verdict = grade(puzzle, answer);
                assert!(!verdict.correct, "{} accepted {answer}", puzzle.id);
                assert!(!verdict.message.is_empty());
            }
        }
    }
}

#[test]
fn grade_document_reports_unknown_kinds_as_not_correct() {
    let document = json!({ "id": "p_new", "kind": "JIGSAW", "params": {} });
    let verdict = grade_document(&document, &json!([])).expect("unknown kind grades");
    assert!(!verdict.correct);
    assert_eq!(verdict.message, UNKNOWN_KIND_MESSAGE);
    assert_eq!(verdict.meta, None);
}

#[test]
fn grade_document_rejects_invalid_known_kinds() {
    let mut document: Value = serde_json::from_str::<Value>(BANANA).expect("fixture is JSON")["puzzles"][1].clone();
    document["params"]["correctPerimeter"] = json!(17);
    let err = grade_document(&document, &json!(16)).unwrap_err();
    assert!(err.has_rule("perimeter_matches_segments"));

    let valid: Value = serde_json::from_str::<Value>(BANANA).expect("fixture is JSON")["puzzles"][1].clone();
    let verdict = grade_document(&valid, &json!(12)).expect("valid puzzle");
    assert_eq!(verdict.message, "Not quite. You are 4 too low.");
    assert_eq!(verdict.meta_value("expected"), Some(&json!(16)));
}

#[test]
fn accusing_the_culprit_grants_rewards() {
    let case = load(FERRET);
    let verdict = accuse(&case, "sus_ferret");
    assert!(verdict.correct);
    assert_eq!(verdict.message, "Fenwick Ferret, unmasked!");
    assert_eq!(
        verdict.meta_value("reward"),
        Some(&json!({ "xp": 50, "stickers": ["stk_fake_mustache", "stk_postage"], "badges": ["bdg_first_case"] }))
    );
    assert_eq!(
        verdict.meta_value("rationale").and_then(Value::as_array).map(Vec::len),
        Some(2)
    );
}

#[test]
fn accusing_someone_else_explains_why() {
    let case = load(BANANA);

    let tortoise = accuse(&case, "sus_tortoise");
    assert!(!tortoise.correct);
    assert_eq!(tortoise.message, "That alibi holds up.");
    assert_eq!(
        tortoise.meta_value("rationale"),
        Some(&json!(["Tilda was winding the clock at 3:15, as the log shows."]))
    );
    assert_eq!(tortoise.meta_value("reward"), None);

    let goat = accuse(&case, "sus_goat");
    assert!(!goat.correct);
    assert_eq!(goat.meta_value("rationale"), None);

    let stranger = accuse(&case, "sus_nobody");
    assert_eq!(stranger.message, "Pick one of the suspects.");
    assert_eq!(stranger.meta, None);
}

#[test]
fn verdict_serializes_without_empty_meta() {
    let bare = serde_json::to_value(Verdict::fail("nope")).expect("serializes");
    assert_eq!(bare, json!({ "correct": false, "message": "nope" }));

    let rich = serde_json::to_value(Verdict::pass("yes").with("wrong", 0)).expect("serializes");
    assert_eq!(rich, json!({ "correct": true, "message": "yes", "meta": { "wrong": 0 } }));
}

#[test]
fn number_helpers_drop_trailing_zero() {
    assert_eq!(format_number(4.0), "4");
    assert_eq!(format_number(1.5), "1.5");
    assert_eq!(number_value(22.0), json!(22));
    assert_eq!(number_value(0.25), json!(0.25));
}

#[test]
fn known_puzzle_separates_unknown_kinds_from_invalid_ones() {
    let unknown = json!({ "id": "p_new", "kind": "JIGSAW" });
    assert_eq!(known_puzzle(&unknown).expect("unknown kind is not an error"), None);

    let document: Value = serde_json::from_str(FERRET).expect("fixture is JSON");
    let stamps = document["puzzles"][0].clone();
    let puzzle = known_puzzle(&stamps).expect("valid puzzle").expect("known kind");
    assert_eq!(puzzle.kind(), PuzzleKind::StampSum);

    let mut broken = stamps;
    broken["params"]["targetCents"] = json!("lots");
    assert!(known_puzzle(&broken).is_err());
}
