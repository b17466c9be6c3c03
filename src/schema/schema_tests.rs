use super::*;
use crate::puzzle::{PuzzleKind, PuzzleParams, TopicKey};
use serde_json::json;

fn ui() -> Value {
    json!({ "successQuips": ["Nice!"], "failQuips": ["Try again."] })
}

fn perimeter_puzzle(id: &str, evidence_id: &str, total: i64) -> Value {
    json!({
        "id": id,
        "kind": "PERIMETER_WALK",
        "title": "Fence walk",
        "prompt": "Walk the fence.",
        "topicKey": "geometry",
        "difficulty": 2,
        "seed": 7,
        "unlocksEvidenceId": evidence_id,
        "ui": ui(),
        "params": {
            "segments": [
                { "id": "s1", "label": "north", "length": 5 },
                { "id": "s2", "label": "east", "length": 3 },
                { "id": "s3", "label": "south", "length": 5 },
                { "id": "s4", "label": "west", "length": 3 }
            ],
            "correctPerimeter": total
        }
    })
}

fn rect_puzzle(id: &str, evidence_id: &str) -> Value {
    json!({
        "id": id,
        "kind": "AREA_RECT_BUILDER",
        "title": "Blueprint",
        "prompt": "Build 24 square units.",
        "topicKey": "geometry",
        "difficulty": 3,
        "seed": 11,
        "points": 15,
        "unlocksEvidenceId": evidence_id,
        "ui": ui(),
        "params": {
            "targetArea": 24,
            "rowsMin": 2, "rowsMax": 8,
            "colsMin": 2, "colsMax": 8
        }
    })
}

fn suspect(id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Suspect {id}"),
        "roleTagline": "Town regular",
        "portraitKey": format!("portrait_{id}"),
        "alibi": { "claim": "I was home.", "note": "Nobody checked." },
        "quips": ["Who, me?"]
    })
}

fn case_doc() -> Value {
    json!({
        "version": 1,
        "caseId": "case_test",
        "orderIndex": 1,
        "title": "The Test Case",
        "summary": "Something is amiss.",
        "difficultyBand": 2,
        "estimatedMinutes": 10,
        "introLetter": {
            "fromName": "Mayor",
            "toName": "Detective",
            "subjectLine": "Help!",
            "bodyParagraphs": ["Please come quickly."],
            "signature": "The Mayor",
            "postmark": { "city": "Maple Falls", "dateISO": "2024-05-01", "stampSlogan": "Count on us" }
        },
        "suspects": [suspect("sus_ferret"), suspect("sus_goose")],
        "locations": [
            { "id": "loc_post", "name": "Post office", "backgroundKey": "bg_post", "description": "Dusty." }
        ],
        "evidence": [
            { "id": "ev_fence", "label": "Fence note", "description": "A note.", "spriteKey": "ev_note" },
            { "id": "ev_plan", "label": "Blueprint", "description": "A plan.", "spriteKey": "ev_plan" }
        ],
        "puzzles": [perimeter_puzzle("p1_fence", "ev_fence", 16), rect_puzzle("p2_rect", "ev_plan")],
        "finalQuestion": {
            "question": "Who did it?",
            "options": ["sus_ferret", "sus_goose"],
            "correctSuspectId": "sus_ferret",
            "correctRationale": ["The fence gave it away."]
        },
        "reveal": {
            "correct": { "headline": "Case closed!", "bodyParagraphs": ["The ferret confessed."] },
            "incorrect": { "headline": "Not quite.", "bodyParagraphs": ["The goose was napping."] }
        },
        "rewards": { "xp": 50, "stickers": [{ "id": "stk_fence", "name": "Fence", "spriteKey": "stk_fence" }] }
    })
}

fn rejected(doc: &Value) -> ContentInvalid {
    parse_case(doc).expect_err("document should be rejected")
}

fn rules_at<'a>(err: &'a ContentInvalid, path: &'a str) -> Vec<&'static str> {
    err.violations
        .iter()
        .filter(|v| v.path == path)
        .map(|v| v.rule)
        .collect()
}

#[test]
fn valid_case_parses_with_defaults() {
    let case = parse_case(&case_doc()).expect("valid case");
    assert_eq!(case.case_id, "case_test");
    assert_eq!(case.puzzles.len(), 2);
    assert_eq!(case.puzzles[0].points, 10);
    assert_eq!(case.puzzles[1].points, 15);
    assert_eq!(case.puzzles[0].topic_key, TopicKey::Geometry);
    assert!(case.unlock_next_case_ids.is_empty());
    assert_eq!(case.rewards.stickers[0].rarity, crate::case::Rarity::Common);
    assert!(case.rewards.badges.is_empty());
    match &case.puzzles[0].params {
        PuzzleParams::PerimeterWalk(params) => assert_eq!(params.unit_label, "units"),
        other => panic!("unexpected params {other:?}"),
    }
    match &case.puzzles[1].params {
        PuzzleParams::AreaRectBuilder(params) => {
            assert_eq!(params.unit_label, "square units");
            assert_eq!(params.required_perimeter, None);
        }
        other => panic!("unexpected params {other:?}"),
    }
}

#[test]
fn unknown_fields_are_rejected_at_every_level() {
    let mut doc = case_doc();
    doc["mood"] = json!("spooky");
    doc["puzzles"][1]["params"]["depth"] = json!(3);
    doc["introLetter"]["postmark"]["zip"] = json!("12345");
    let err = rejected(&doc);
    assert_eq!(rules_at(&err, "mood"), vec!["unknown_field"]);
    assert_eq!(rules_at(&err, "puzzles[1].params.depth"), vec!["unknown_field"]);
    assert_eq!(rules_at(&err, "introLetter.postmark.zip"), vec!["unknown_field"]);
}

#[test]
fn unknown_kind_is_a_hard_failure_that_does_not_hide_other_errors() {
    let mut doc = case_doc();
    doc["puzzles"][0]["kind"] = json!("JUGGLE");
    doc["puzzles"][1]["unlocksEvidenceId"] = json!("ev_missing");
    let err = rejected(&doc);
    assert_eq!(rules_at(&err, "puzzles[0].kind"), vec!["unknown_kind"]);
    assert_eq!(
        rules_at(&err, "puzzles[1].unlocksEvidenceId"),
        vec!["evidence_exists"]
    );
}

#[test]
fn named_rule_violation_carries_rule_name_and_path() {
    let mut doc = case_doc();
    doc["puzzles"][0] = perimeter_puzzle("p1_fence", "ev_fence", 15);
    let err = rejected(&doc);
    assert_eq!(err.violations.len(), 1);
    let violation = &err.violations[0];
    assert_eq!(violation.path, "puzzles[0].params");
    assert_eq!(violation.rule, "perimeter_matches_segments");
    assert_eq!(
        violation.message,
        "correctPerimeter should equal sum(segments) = 16."
    );
}

#[test]
fn named_rules_wait_for_a_clean_payload() {
    let mut doc = case_doc();
    doc["puzzles"][0]["params"]["segments"][0]["length"] = json!(0);
    doc["puzzles"][0]["params"]["correctPerimeter"] = json!(99);
    let err = rejected(&doc);
    assert_eq!(
        rules_at(&err, "puzzles[0].params.segments[0].length"),
        vec!["range"]
    );
    assert!(!err.has_rule("perimeter_matches_segments"));
}

#[test]
fn out_of_range_and_fractional_numbers_are_rejected() {
    let mut doc = case_doc();
    doc["puzzles"][0]["difficulty"] = json!(6);
    doc["puzzles"][1]["seed"] = json!(1.5);
    doc["estimatedMinutes"] = json!(61);
    doc["difficultyBand"] = json!(1);
    let err = rejected(&doc);
    assert_eq!(rules_at(&err, "puzzles[0].difficulty"), vec!["range"]);
    assert_eq!(rules_at(&err, "puzzles[1].seed"), vec!["integer"]);
    assert_eq!(rules_at(&err, "estimatedMinutes"), vec!["range"]);
    assert_eq!(rules_at(&err, "difficultyBand"), vec!["range"]);
}

#[test]
fn case_level_references_are_checked() {
    let mut doc = case_doc();
    doc["suspects"][1]["id"] = json!("sus_ferret");
    doc["finalQuestion"]["options"] = json!(["sus_ferret", "sus_heron"]);
    doc["finalQuestion"]["correctSuspectId"] = json!("sus_goose");
    let err = rejected(&doc);
    assert_eq!(rules_at(&err, "suspects"), vec!["unique_ids"]);
    assert_eq!(
        rules_at(&err, "finalQuestion.options[1]"),
        vec!["suspect_exists"]
    );
    assert_eq!(
        rules_at(&err, "finalQuestion.correctSuspectId"),
        vec!["suspect_exists", "correct_suspect_listed"]
    );
}

#[test]
fn duplicate_puzzle_ids_are_rejected() {
    let mut doc = case_doc();
    doc["puzzles"][1]["id"] = json!("p1_fence");
    let err = rejected(&doc);
    assert_eq!(rules_at(&err, "puzzles"), vec!["unique_ids"]);
}

#[test]
fn wrong_rationales_must_name_listed_suspects() {
    let mut doc = case_doc();
    doc["finalQuestion"]["wrongRationales"] = json!([
        { "suspectId": "sus_goose", "lines": ["The goose was asleep."] },
        { "suspectId": "sus_heron", "lines": ["No heron here."] }
    ]);
    let err = rejected(&doc);
    assert_eq!(
        rules_at(&err, "finalQuestion.wrongRationales[1].suspectId"),
        vec!["rationale_suspect_listed"]
    );
}

#[test]
fn missing_fields_and_bad_ids_are_all_reported() {
    let mut doc = case_doc();
    let object = doc.as_object_mut().expect("case object");
    object.remove("summary");
    object.remove("reveal");
    doc["caseId"] = json!("Case-Test");
    doc["introLetter"]["postmark"]["dateISO"] = json!("May 1st");
    let err = rejected(&doc);
    assert_eq!(rules_at(&err, "summary"), vec!["required"]);
    assert_eq!(rules_at(&err, "reveal"), vec!["required"]);
    assert_eq!(rules_at(&err, "caseId"), vec!["id_pattern"]);
    assert_eq!(
        rules_at(&err, "introLetter.postmark.dateISO"),
        vec!["date_pattern"]
    );
}

#[test]
fn unsupported_version_is_rejected() {
    let mut doc = case_doc();
    doc["version"] = json!(2);
    let err = rejected(&doc);
    assert_eq!(rules_at(&err, "version"), vec!["version"]);
}

#[test]
fn non_object_document_reports_root() {
    let err = rejected(&json!(["not", "a", "case"]));
    assert_eq!(err.violations.len(), 1);
    assert_eq!(err.violations[0].rule, "type");
    assert!(err.violations[0].to_string().starts_with("(root): expected object"));
}

#[test]
fn standalone_puzzle_skips_evidence_resolution() {
    let puzzle = parse_puzzle(&perimeter_puzzle("p9_fence", "ev_anything", 16)).expect("valid puzzle");
    assert_eq!(puzzle.kind(), PuzzleKind::PerimeterWalk);
    assert_eq!(puzzle.unlocks_evidence_id, "ev_anything");

    let err = parse_puzzle(&json!({ "id": "p1", "kind": "STAMP_SUM" })).expect_err("incomplete puzzle");
    assert!(err.has_rule("required"));
    assert!(err.at("params").count() == 1);
}

#[test]
fn extreme_numbers_are_violations_not_panics() {
    let mut fence = perimeter_puzzle("p1_fence", "ev_fence", 16);
    for segment in 0..4 {
        fence["params"]["segments"][segment]["length"] = json!(i64::MAX);
    }
    let err = parse_puzzle(&fence).expect_err("overflowing fence");
    assert!(err.has_rule("perimeter_matches_segments"));

    let mut plot = rect_puzzle("p2_plot", "ev_plot");
    plot["params"] = json!({
        "targetArea": i64::MAX,
        "rowsMin": i64::MAX, "rowsMax": i64::MAX,
        "colsMin": 1, "colsMax": 1,
        "requiredPerimeter": 4
    });
    let err = parse_puzzle(&plot).expect_err("overflowing perimeter");
    assert!(err.has_rule("rectangle_feasible"));

    let mut wide = rect_puzzle("p3_plot", "ev_plot");
    wide["params"] = json!({
        "targetArea": 7,
        "rowsMin": 1, "rowsMax": i64::MAX,
        "colsMin": 1, "colsMax": 7
    });
    assert!(parse_puzzle(&wide).is_ok());
}

#[test]
fn display_lists_each_violation() {
    let mut doc = case_doc();
    doc["mood"] = json!("spooky");
    let err = rejected(&doc);
    let text = err.to_string();
    assert!(text.starts_with("content invalid: 1 violation"));
    assert!(text.contains("mood: unrecognized field [unknown_field]"));
}
