//! Puzzle base fields and kind dispatch.
use super::params::read_params;
use super::reader::{Bounds, Count, Node, Violations};
use crate::puzzle::{Puzzle, PuzzleKind, PuzzleParams, PuzzleUi, Vocabulary};

const U32_RANGE: Bounds = Bounds::between(0, u32::MAX as i64);

fn puzzle_ui(out: &mut Violations, node: &Node<'_>) -> Option<PuzzleUi> {
    let mut f = node.fields(out)?;
    let intro_line = f.opt_text(out, "introLine");
    let success_quips = f.texts(out, "successQuips", Count::at_least(1));
    let fail_quips = f.texts(out, "failQuips", Count::at_least(1));
    f.finish(out);
    Some(PuzzleUi {
        intro_line,
        success_quips: success_quips?,
        fail_quips: fail_quips?,
    })
}

fn puzzle_kind(out: &mut Violations, node: &Node<'_>) -> Option<PuzzleKind> {
    let name = node.text(out)?;
    let kind = PuzzleKind::from_name(&name);
    if kind.is_none() {
        out.push(
            &node.path,
            "unknown_kind",
            format!("{name:?} is not a puzzle kind (expected one of {})", PuzzleKind::expected()),
        );
    }
    kind
}

/// Read the kind-specific payload and, when it parsed without any violation,
/// run its named rules.
fn puzzle_params(
    out: &mut Violations,
    kind: Option<PuzzleKind>,
    node: Option<Node<'_>>,
) -> Option<PuzzleParams> {
    let (kind, node) = (kind?, node?);
    let before = out.len();
    let params = read_params(out, kind, &node)?;
    if out.len() == before {
        for (rule, message) in params.broken_rules() {
            out.push(&node.path, rule, message);
        }
    }
    Some(params)
}

/// Read one puzzle document. Evidence references are the caller's concern.
pub(crate) fn read_puzzle(out: &mut Violations, node: &Node<'_>) -> Option<Puzzle> {
    let mut f = node.fields(out)?;
    let id = f.id(out, "id");
    let kind = f.require(out, "kind").and_then(|n| puzzle_kind(out, &n));
    let title = f.text(out, "title");
    let prompt = f.text(out, "prompt");
    let topic_key = f.choice(out, "topicKey");
    let difficulty = f.int(out, "difficulty", Bounds::between(1, 5));
    let seed = f.int(out, "seed", Bounds::at_least(0));
    let points = f.int_or(out, "points", 10, U32_RANGE);
    let time_limit_sec = f.opt_int(out, "timeLimitSec", U32_RANGE);
    let unlocks_evidence_id = f.id(out, "unlocksEvidenceId");
    let ui = f.require(out, "ui").and_then(|n| puzzle_ui(out, &n));
    let hints = f.opt_list(out, "hints", Count::at_most(5), |out, n| n.text(out));
    let params_node = f.require(out, "params");
    let params = puzzle_params(out, kind, params_node);
    f.finish(out);
    Some(Puzzle {
        id: id?,
        title: title?,
        prompt: prompt?,
        topic_key: topic_key?,
        difficulty: u8::try_from(difficulty?).ok()?,
        seed: u64::try_from(seed?).ok()?,
        points: u32::try_from(points).ok()?,
        time_limit_sec: match time_limit_sec {
            Some(n) => Some(u32::try_from(n).ok()?),
            None => None,
        },
        unlocks_evidence_id: unlocks_evidence_id?,
        ui: ui?,
        hints: hints.unwrap_or_default(),
        params: params?,
    })
}
