//! Case document reader and case-level cross references.
use super::puzzle::read_puzzle;
use super::reader::{Bounds, Count, Node, Violations};
use super::rules::duplicate_ids;
use crate::case::*;
use crate::puzzle::Puzzle;
use std::collections::BTreeSet;

fn postmark(out: &mut Violations, node: &Node<'_>) -> Option<Postmark> {
    let mut f = node.fields(out)?;
    let city = f.text(out, "city");
    let date_iso = f.require(out, "dateISO").and_then(|n| n.iso_date(out));
    let stamp_slogan = f.text(out, "stampSlogan");
    f.finish(out);
    Some(Postmark {
        city: city?,
        date_iso: date_iso?,
        stamp_slogan: stamp_slogan?,
    })
}

fn letter(out: &mut Violations, node: &Node<'_>) -> Option<Letter> {
    let mut f = node.fields(out)?;
    let from_name = f.text(out, "fromName");
    let to_name = f.text(out, "toName");
    let subject_line = f.text(out, "subjectLine");
    let body_paragraphs = f.texts(out, "bodyParagraphs", Count::at_least(1));
    let signature = f.text(out, "signature");
    let postmark = f.require(out, "postmark").and_then(|n| postmark(out, &n));
    f.finish(out);
    Some(Letter {
        from_name: from_name?,
        to_name: to_name?,
        subject_line: subject_line?,
        body_paragraphs: body_paragraphs?,
        signature: signature?,
        postmark: postmark?,
    })
}

fn alibi(out: &mut Violations, node: &Node<'_>) -> Option<Alibi> {
    let mut f = node.fields(out)?;
    let claim = f.text(out, "claim");
    let note = f.text(out, "note");
    f.finish(out);
    Some(Alibi {
        claim: claim?,
        note: note?,
    })
}

fn suspect(out: &mut Violations, node: &Node<'_>) -> Option<Suspect> {
    let mut f = node.fields(out)?;
    let id = f.id(out, "id");
    let name = f.text(out, "name");
    let role_tagline = f.text(out, "roleTagline");
    let portrait_key = f.text(out, "portraitKey");
    let alibi = f.require(out, "alibi").and_then(|n| alibi(out, &n));
    let quips = f.texts(out, "quips", Count::at_least(1));
    f.finish(out);
    Some(Suspect {
        id: id?,
        name: name?,
        role_tagline: role_tagline?,
        portrait_key: portrait_key?,
        alibi: alibi?,
        quips: quips?,
    })
}

fn location(out: &mut Violations, node: &Node<'_>) -> Option<Location> {
    let mut f = node.fields(out)?;
    let id = f.id(out, "id");
    let name = f.text(out, "name");
    let background_key = f.text(out, "backgroundKey");
    let description = f.text(out, "description");
    f.finish(out);
    Some(Location {
        id: id?,
        name: name?,
        background_key: background_key?,
        description: description?,
    })
}

fn evidence(out: &mut Violations, node: &Node<'_>) -> Option<Evidence> {
    let mut f = node.fields(out)?;
    let id = f.id(out, "id");
    let label = f.text(out, "label");
    let description = f.text(out, "description");
    let sprite_key = f.text(out, "spriteKey");
    f.finish(out);
    Some(Evidence {
        id: id?,
        label: label?,
        description: description?,
        sprite_key: sprite_key?,
    })
}

fn wrong_rationale(out: &mut Violations, node: &Node<'_>) -> Option<WrongRationale> {
    let mut f = node.fields(out)?;
    let suspect_id = f.id(out, "suspectId");
    let lines = f.texts(out, "lines", Count::at_least(1));
    f.finish(out);
    Some(WrongRationale {
        suspect_id: suspect_id?,
        lines: lines?,
    })
}

fn final_question(out: &mut Violations, node: &Node<'_>) -> Option<FinalQuestion> {
    let mut f = node.fields(out)?;
    let question = f.text(out, "question");
    let options = f.list(out, "options", Count::at_least(2), |out, n| n.id(out));
    let correct_suspect_id = f.id(out, "correctSuspectId");
    let correct_rationale = f.texts(out, "correctRationale", Count::at_least(1));
    let wrong_rationales = f.list_or_empty(out, "wrongRationales", Count::ANY, wrong_rationale);
    f.finish(out);
    Some(FinalQuestion {
        question: question?,
        options: options?,
        correct_suspect_id: correct_suspect_id?,
        correct_rationale: correct_rationale?,
        wrong_rationales,
    })
}

fn reveal_correct(out: &mut Violations, node: &Node<'_>) -> Option<RevealCorrect> {
    let mut f = node.fields(out)?;
    let headline = f.text(out, "headline");
    let body_paragraphs = f.texts(out, "bodyParagraphs", Count::at_least(1));
    let cutscene_key = f.opt_text(out, "cutsceneKey");
    let sfx_key = f.opt_text(out, "sfxKey");
    f.finish(out);
    Some(RevealCorrect {
        headline: headline?,
        body_paragraphs: body_paragraphs?,
        cutscene_key,
        sfx_key,
    })
}

fn reveal_incorrect(out: &mut Violations, node: &Node<'_>) -> Option<RevealIncorrect> {
    let mut f = node.fields(out)?;
    let headline = f.text(out, "headline");
    let body_paragraphs = f.texts(out, "bodyParagraphs", Count::at_least(1));
    f.finish(out);
    Some(RevealIncorrect {
        headline: headline?,
        body_paragraphs: body_paragraphs?,
    })
}

fn reveal(out: &mut Violations, node: &Node<'_>) -> Option<Reveal> {
    let mut f = node.fields(out)?;
    let correct = f.require(out, "correct").and_then(|n| reveal_correct(out, &n));
    let incorrect = f
        .require(out, "incorrect")
        .and_then(|n| reveal_incorrect(out, &n));
    f.finish(out);
    Some(Reveal {
        correct: correct?,
        incorrect: incorrect?,
    })
}

fn sticker(out: &mut Violations, node: &Node<'_>) -> Option<RewardSticker> {
    let mut f = node.fields(out)?;
    let id = f.id(out, "id");
    let name = f.text(out, "name");
    let sprite_key = f.text(out, "spriteKey");
    let rarity = f.choice_or(out, "rarity", Rarity::Common);
    f.finish(out);
    Some(RewardSticker {
        id: id?,
        name: name?,
        sprite_key: sprite_key?,
        rarity,
    })
}

fn badge(out: &mut Violations, node: &Node<'_>) -> Option<RewardBadge> {
    let mut f = node.fields(out)?;
    let id = f.id(out, "id");
    let name = f.text(out, "name");
    let description = f.text(out, "description");
    let icon_key = f.text(out, "iconKey");
    f.finish(out);
    Some(RewardBadge {
        id: id?,
        name: name?,
        description: description?,
        icon_key: icon_key?,
    })
}

fn rewards(out: &mut Violations, node: &Node<'_>) -> Option<Rewards> {
    let mut f = node.fields(out)?;
    let xp = f.int_or(out, "xp", 0, Bounds::between(0, u32::MAX as i64));
    let stickers = f.list_or_empty(out, "stickers", Count::ANY, sticker);
    let badges = f.list_or_empty(out, "badges", Count::ANY, badge);
    f.finish(out);
    Some(Rewards {
        xp: u32::try_from(xp).ok()?,
        stickers,
        badges,
    })
}

/// A list read item by item, remembering whether every item survived.
struct Parsed<'a, T> {
    items: Vec<(Node<'a>, T)>,
    complete: bool,
}

impl<'a, T> Parsed<'a, T> {
    fn read(
        out: &mut Violations,
        node: Option<Node<'a>>,
        count: Count,
        read: impl Fn(&mut Violations, &Node<'a>) -> Option<T>,
    ) -> Self {
        let Some(nodes) = node.and_then(|n| n.items(out, count)) else {
            return Parsed {
                items: Vec::new(),
                complete: false,
            };
        };
        let total = nodes.len();
        let items: Vec<_> = nodes
            .into_iter()
            .filter_map(|n| read(out, &n).map(|item| (n, item)))
            .collect();
        let complete = items.len() == total;
        Parsed { items, complete }
    }

    fn values(&self) -> impl Iterator<Item = &T> {
        self.items.iter().map(|(_, item)| item)
    }

    fn into_values(self) -> Vec<T> {
        self.items.into_iter().map(|(_, item)| item).collect()
    }
}

fn check_unique<'a>(
    out: &mut Violations,
    path: &str,
    what: &str,
    ids: impl IntoIterator<Item = &'a str>,
) {
    for message in duplicate_ids(what, ids) {
        out.push(path, "unique_ids", message);
    }
}

fn check_evidence_refs(
    out: &mut Violations,
    puzzles: &Parsed<'_, Puzzle>,
    evidence: &Parsed<'_, Evidence>,
) {
    if !evidence.complete {
        return;
    }
    let known: BTreeSet<&str> = evidence.values().map(|e| e.id.as_str()).collect();
    for (node, puzzle) in &puzzles.items {
        if !known.contains(puzzle.unlocks_evidence_id.as_str()) {
            out.push(
                &format!("{}.unlocksEvidenceId", node.path),
                "evidence_exists",
                format!(
                    "Puzzle {} unlocksEvidenceId \"{}\" does not exist in evidence[].",
                    puzzle.id, puzzle.unlocks_evidence_id
                ),
            );
        }
    }
}

fn check_final_question(
    out: &mut Violations,
    question: &FinalQuestion,
    suspects: &Parsed<'_, Suspect>,
) {
    if suspects.complete {
        let known: BTreeSet<&str> = suspects.values().map(|s| s.id.as_str()).collect();
        for (index, option) in question.options.iter().enumerate() {
            if !known.contains(option.as_str()) {
                out.push(
                    &format!("finalQuestion.options[{index}]"),
                    "suspect_exists",
                    format!("finalQuestion.options contains unknown suspectId \"{option}\"."),
                );
            }
        }
        if !known.contains(question.correct_suspect_id.as_str()) {
            out.push(
                "finalQuestion.correctSuspectId",
                "suspect_exists",
                format!(
                    "finalQuestion.correctSuspectId \"{}\" not found in suspects[].",
                    question.correct_suspect_id
                ),
            );
        }
    }
    if !question.options.contains(&question.correct_suspect_id) {
        out.push(
            "finalQuestion.correctSuspectId",
            "correct_suspect_listed",
            "finalQuestion.correctSuspectId must be included in finalQuestion.options.",
        );
    }
    for (index, entry) in question.wrong_rationales.iter().enumerate() {
        if !question.options.contains(&entry.suspect_id) {
            out.push(
                &format!("finalQuestion.wrongRationales[{index}].suspectId"),
                "rationale_suspect_listed",
                format!("\"{}\" is not one of finalQuestion.options.", entry.suspect_id),
            );
        }
    }
}

/// Read a whole case document, then check references between its parts.
pub(crate) fn read_case(out: &mut Violations, node: &Node<'_>) -> Option<Case> {
    let mut f = node.fields(out)?;

    let version = f.int(out, "version", Bounds::ANY);
    if let Some(found) = version.filter(|v| *v != CASE_FORMAT_VERSION) {
        out.push(
            &f.path_of("version"),
            "version",
            format!("unsupported case version {found}, expected {CASE_FORMAT_VERSION}"),
        );
    }
    let case_id = f.id(out, "caseId");
    let order_index = f.int(out, "orderIndex", Bounds::between(1, u32::MAX as i64));
    let title = f.text(out, "title");
    let summary = f.text(out, "summary");
    let difficulty_band = f.int(out, "difficultyBand", Bounds::between(2, 5));
    let estimated_minutes = f.int(out, "estimatedMinutes", Bounds::between(1, 60));
    let intro_letter = f.require(out, "introLetter").and_then(|n| letter(out, &n));

    let suspects_node = f.require(out, "suspects");
    let suspects = Parsed::read(out, suspects_node, Count::at_least(2), suspect);
    let locations = f.list(out, "locations", Count::at_least(1), location);
    let evidence_node = f.require(out, "evidence");
    let evidence = Parsed::read(out, evidence_node, Count::at_least(1), evidence);
    let puzzles_node = f.require(out, "puzzles");
    let puzzles = Parsed::read(out, puzzles_node, Count::at_least(1), read_puzzle);

    let final_question = f
        .require(out, "finalQuestion")
        .and_then(|n| final_question(out, &n));
    let reveal = f.require(out, "reveal").and_then(|n| reveal(out, &n));
    let rewards = f.require(out, "rewards").and_then(|n| rewards(out, &n));
    let unlock_next_case_ids =
        f.list_or_empty(out, "unlockNextCaseIds", Count::ANY, |out, n| n.id(out));
    f.finish(out);

    check_unique(out, "suspects", "suspect", suspects.values().map(|s| s.id.as_str()));
    check_unique(out, "evidence", "evidence", evidence.values().map(|e| e.id.as_str()));
    check_unique(out, "puzzles", "puzzle", puzzles.values().map(|p| p.id.as_str()));
    check_evidence_refs(out, &puzzles, &evidence);
    if let Some(question) = &final_question {
        check_final_question(out, question, &suspects);
    }

    let version = version.filter(|v| *v == CASE_FORMAT_VERSION)?;
    if !(suspects.complete && evidence.complete && puzzles.complete) {
        return None;
    }
    Some(Case {
        version: u32::try_from(version).ok()?,
        case_id: case_id?,
        order_index: u32::try_from(order_index?).ok()?,
        title: title?,
        summary: summary?,
        difficulty_band: u8::try_from(difficulty_band?).ok()?,
        estimated_minutes: u32::try_from(estimated_minutes?).ok()?,
        intro_letter: intro_letter?,
        suspects: suspects.into_values(),
        locations: locations?,
        evidence: evidence.into_values(),
        puzzles: puzzles.into_values(),
        final_question: final_question?,
        reveal: reveal?,
        rewards: rewards?,
        unlock_next_case_ids,
    })
}
