//! Command implementations behind the CLI.
use crate::case::Case;
use crate::cli::{AccuseArgs, CheckArgs, GradeArgs, ListArgs, ProgressArgs, ShowArgs};
use crate::config::{self, ContentConfig};
use crate::content::CaseLibrary;
use crate::grade::{self, Verdict};
use crate::progress::{now_epoch_ms, ProgressSnapshot};
use crate::puzzle::{Puzzle, PuzzleParams};
use crate::quip::{pick_quip, trio_decks};
use crate::schema::Violation;
use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// A content root with its config and loaded case library.
struct ContentContext {
    root: PathBuf,
    config: ContentConfig,
    library: CaseLibrary,
}

impl ContentContext {
    fn load(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(anyhow!("content root {} is not a directory", root.display()));
        }
        let config = config::load_config(root)?;
        let library = CaseLibrary::load_dir(&config.cases_dir(root))?;
        Ok(ContentContext {
            root: root.to_path_buf(),
            config,
            library,
        })
    }

    fn progress_path(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        self.config.progress_path(&self.root, explicit)
    }

    fn case(&self, case_id: &str) -> Result<&Case> {
        self.library.require(case_id)
    }

    /// Refuse to record play on a case whose prerequisite is still open.
    fn require_unlocked(&self, case: &Case, progress: &ProgressSnapshot) -> Result<()> {
        if self.library.is_unlocked(&case.case_id, &progress.completed_cases) {
            return Ok(());
        }
        let prerequisite = self
            .library
            .prerequisite_of(&case.case_id)
            .map(|c| c.case_id.as_str())
            .unwrap_or("its prerequisite");
        Err(anyhow!("case {} is locked; close {prerequisite} first", case.case_id))
    }
}

fn find_puzzle<'a>(case: &'a Case, puzzle_id: &str) -> Result<&'a Puzzle> {
    case.puzzle(puzzle_id).ok_or_else(|| {
        let known: Vec<&str> = case.puzzles.iter().map(|p| p.id.as_str()).collect();
        anyhow!(
            "case {} has no puzzle {puzzle_id:?} (known: {})",
            case.case_id,
            known.join(", ")
        )
    })
}

fn error_chain_message(err: &anyhow::Error) -> String {
    err.chain()
        .map(|cause| cause.to_string())
        .collect::<Vec<_>>()
        .join(": ")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{text}");
    Ok(())
}

#[derive(Debug, Serialize)]
struct RejectedReport {
    path: String,
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    violations: Vec<Violation>,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    ok: bool,
    cases: Vec<String>,
    rejected: Vec<RejectedReport>,
}

pub fn run_check(args: CheckArgs) -> Result<()> {
    let ctx = ContentContext::load(&args.content.content)?;
    let report = CheckReport {
        ok: ctx.library.rejected().is_empty() && !ctx.library.is_empty(),
        cases: ctx
            .library
            .cases()
            .iter()
            .map(|case| case.case_id.clone())
            .collect(),
        rejected: ctx
            .library
            .rejected()
            .iter()
            .map(|rejected| RejectedReport {
                path: rejected.path.display().to_string(),
                error: error_chain_message(&rejected.error),
                violations: rejected
                    .violations()
                    .map(|invalid| invalid.violations.clone())
                    .unwrap_or_default(),
            })
            .collect(),
    };

    if args.json {
        print_json(&report)?;
    } else {
        for case in ctx.library.cases() {
            println!("ok       {} ({} puzzles)", case.case_id, case.puzzles.len());
        }
        for rejected in &report.rejected {
            println!("rejected {}: {}", rejected.path, rejected.error);
        }
        for (from, unknown) in ctx.library.dangling_unlocks() {
            println!("warning  {from} unlocks unknown case {unknown}");
        }
    }

    if !report.rejected.is_empty() {
        return Err(anyhow!("{} case file(s) rejected", report.rejected.len()));
    }
    if ctx.library.is_empty() {
        return Err(anyhow!(
            "no case documents found in {}",
            ctx.config.cases_dir(&ctx.root).display()
        ));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum CaseState {
    Locked,
    Open,
    Completed,
}

#[derive(Debug, Serialize)]
struct CaseListing {
    case_id: String,
    order_index: u32,
    title: String,
    state: CaseState,
    solved: usize,
    puzzles: usize,
}

pub fn run_list(args: ListArgs) -> Result<()> {
    let ctx = ContentContext::load(&args.content.content)?;
    let progress = ProgressSnapshot::load(&ctx.progress_path(args.progress.path.as_deref())?)?;
    let listings: Vec<CaseListing> = ctx
        .library
        .cases()
        .iter()
        .map(|case| {
            let state = if progress.is_case_completed(&case.case_id) {
                CaseState::Completed
            } else if ctx.library.is_unlocked(&case.case_id, &progress.completed_cases) {
                CaseState::Open
            } else {
                CaseState::Locked
            };
            CaseListing {
                case_id: case.case_id.clone(),
                order_index: case.order_index,
                title: case.title.clone(),
                state,
                solved: progress.solved_puzzles(case).len(),
                puzzles: case.puzzles.len(),
            }
        })
        .collect();

    if args.json {
        return print_json(&listings);
    }
    if listings.is_empty() {
        println!("The mailbox is empty.");
        return Ok(());
    }
    for listing in &listings {
        let state = match listing.state {
            CaseState::Locked => "locked",
            CaseState::Open => "open",
            CaseState::Completed => "closed",
        };
        println!(
            "{:>3}. {:<8} {:<32} {}/{} clues  {}",
            listing.order_index,
            state,
            listing.case_id,
            listing.solved,
            listing.puzzles,
            listing.title
        );
    }
    Ok(())
}

pub fn run_show(args: ShowArgs) -> Result<()> {
    let ctx = ContentContext::load(&args.content.content)?;
    let case = ctx.case(&args.case_id)?;
    let Some(puzzle_id) = args.puzzle_id.as_deref() else {
        return print_json(case);
    };
    let puzzle = find_puzzle(case, puzzle_id)?;
    match &puzzle.params {
        PuzzleParams::FdpTrioMatch(params) => print_json(&json!({
            "puzzle": puzzle,
            "decks": trio_decks(params, puzzle.seed),
        })),
        _ => print_json(puzzle),
    }
}

fn parse_answer(raw: &str) -> Result<Value> {
    serde_json::from_str(raw).with_context(|| format!("parse --answer as JSON: {raw:?}"))
}

fn quip_for<'a>(puzzle: &'a Puzzle, verdict: &Verdict, attempt: i64) -> &'a str {
    let quips = if verdict.correct {
        &puzzle.ui.success_quips
    } else {
        &puzzle.ui.fail_quips
    };
    let seed = i64::try_from(puzzle.seed).unwrap_or(i64::MAX);
    pick_quip(quips, seed.wrapping_add(attempt))
}

fn print_verdict(verdict: &Verdict, quip: Option<&str>, json_output: bool) -> Result<()> {
    if json_output {
        return print_json(&json!({ "verdict": verdict, "quip": quip }));
    }
    let status = if verdict.correct { "correct" } else { "not yet" };
    println!("{status}: {}", verdict.message);
    if let Some(quip) = quip.filter(|q| !q.is_empty()) {
        println!("  \"{quip}\"");
    }
    Ok(())
}

pub fn run_grade(args: GradeArgs) -> Result<()> {
    let answer = parse_answer(&args.answer)?;

    if let Some(path) = args.puzzle_file.as_deref() {
        let bytes = fs::read(path).with_context(|| format!("read puzzle {}", path.display()))?;
        let document: Value = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse puzzle JSON {}", path.display()))?;
        let puzzle = grade::known_puzzle(&document)
            .map_err(anyhow::Error::new)
            .with_context(|| format!("validate puzzle {}", path.display()))?;
        let Some(puzzle) = puzzle else {
            return print_verdict(&Verdict::fail(grade::UNKNOWN_KIND_MESSAGE), None, args.json);
        };
        let verdict = grade::grade(&puzzle, &answer);
        let quip = quip_for(&puzzle, &verdict, args.attempt);
        return print_verdict(&verdict, Some(quip), args.json);
    }

    let (Some(root), Some(case_id), Some(puzzle_id)) = (
        args.content.as_deref(),
        args.case_id.as_deref(),
        args.puzzle_id.as_deref(),
    ) else {
        return Err(anyhow!("grade needs --puzzle-file or --content, --case and --puzzle"));
    };
    let ctx = ContentContext::load(root)?;
    let case = ctx.case(case_id)?;
    let puzzle = find_puzzle(case, puzzle_id)?;
    let verdict = grade::grade(puzzle, &answer);
    tracing::debug!(case_id, puzzle_id, correct = verdict.correct, "graded answer");

    if args.record {
        let path = ctx.progress_path(args.progress.path.as_deref())?;
        let mut progress = ProgressSnapshot::load(&path)?;
        ctx.require_unlocked(case, &progress)?;
        progress.mark_puzzle_attempt(puzzle.topic_key, verdict.correct, now_epoch_ms()?);
        let newly_solved = verdict.correct && progress.mark_puzzle_solved(case_id, puzzle_id);
        progress.save(&path)?;
        if newly_solved && !args.json {
            if let Some(evidence) = case.evidence_item(&puzzle.unlocks_evidence_id) {
                println!("clue unlocked: {}", evidence.label);
            }
        }
    }

    print_verdict(&verdict, Some(quip_for(puzzle, &verdict, args.attempt)), args.json)
}

pub fn run_accuse(args: AccuseArgs) -> Result<()> {
    let ctx = ContentContext::load(&args.content.content)?;
    let case = ctx.case(&args.case_id)?;
    let verdict = grade::accuse(case, &args.suspect_id);
    if !args.record {
        return print_accusation(&verdict, None, args.json);
    }

    let path = ctx.progress_path(args.progress.path.as_deref())?;
    let mut progress = ProgressSnapshot::load(&path)?;
    ctx.require_unlocked(case, &progress)?;
    let open = progress.open_puzzles(case);
    if !open.is_empty() {
        return Err(anyhow!(
            "solve every clue before accusing; still open: {}",
            open.join(", ")
        ));
    }
    if !verdict.correct {
        return print_accusation(&verdict, None, args.json);
    }
    let newly_closed = progress.mark_case_completed(&case.case_id, &case.reward_grant());
    progress.save(&path)?;
    tracing::info!(case_id = %case.case_id, newly_closed, "case closed");
    print_accusation(&verdict, Some(newly_closed), args.json)
}

fn print_accusation(
    verdict: &Verdict,
    newly_closed: Option<bool>,
    json_output: bool,
) -> Result<()> {
    if json_output {
        return print_json(&json!({ "verdict": verdict, "newlyClosed": newly_closed }));
    }
    let status = if verdict.correct { "solved" } else { "wrong suspect" };
    println!("{status}: {}", verdict.message);
    if let Some(lines) = verdict.meta_value("rationale").and_then(Value::as_array) {
        for line in lines.iter().filter_map(Value::as_str) {
            println!("  - {line}");
        }
    }
    match newly_closed {
        Some(true) => println!("case closed; rewards collected"),
        Some(false) => println!("case was already closed; no new rewards"),
        None => {}
    }
    Ok(())
}

pub fn run_progress(args: ProgressArgs) -> Result<()> {
    let explicit = args.progress.path.as_deref();
    let path = match args.content.as_deref() {
        Some(root) => config::load_config(root)?.progress_path(root, explicit)?,
        None => match explicit {
            Some(path) => path.to_path_buf(),
            None => config::default_progress_path()?,
        },
    };

    let mut progress = ProgressSnapshot::load(&path)?;
    if args.reset {
        progress.reset();
        progress.save(&path)?;
        if !args.json {
            println!("progress reset at {}", path.display());
            return Ok(());
        }
    }

    if args.json {
        return print_json(&progress);
    }
    println!("progress file: {}", path.display());
    println!("xp: {}", progress.rewards.xp);
    println!(
        "stickers: {}  badges: {}",
        progress.rewards.stickers.len(),
        progress.rewards.badges.len()
    );
    println!("closed cases: {}", progress.completed_cases.len());
    for case_id in &progress.completed_cases {
        println!("  {case_id}");
    }
    for (topic, stats) in &progress.topic_stats {
        println!(
            "{topic}: {}/{} correct, streak {}",
            stats.correct, stats.attempts, stats.streak
        );
    }
    Ok(())
}
