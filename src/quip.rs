//! Deterministic flavor text and seeded card shuffles.
//!
//! Nothing here reads ambient randomness: the same seed always yields the
//! same quip and the same deck order, so a session can be replayed.
use crate::puzzle::FdpTrioMatchParams;
use serde::Serialize;

/// Pick a quip by salt. `index = |salt| mod len`; an empty list yields `""`.
pub fn pick_quip(quips: &[String], salt: i64) -> &str {
    if quips.is_empty() {
        return "";
    }
    let len = quips.len() as u64;
    let index = (salt.unsigned_abs() % len) as usize;
    quips[index].as_str()
}

/// Mulberry32: a 32-bit, integer-seeded generator producing floats in `[0, 1)`.
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Only the low 32 bits of `seed` matter.
    pub fn new(seed: u64) -> Self {
        Mulberry32 {
            state: (seed & u64::from(u32::MAX)) as u32,
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let a = self.state;
        let mut t = (a ^ (a >> 15)).wrapping_mul(1 | a);
        t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(61 | t)) ^ t;
        t ^ (t >> 14)
    }

    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }
}

/// Fisher-Yates shuffle driven by `Mulberry32::new(seed)`.
pub fn shuffle<T: Clone>(items: &[T], seed: u64) -> Vec<T> {
    let mut rng = Mulberry32::new(seed);
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = (rng.next_f64() * (i + 1) as f64).floor() as usize;
        shuffled.swap(i, j.min(i));
    }
    shuffled
}

/// Offsets added to the deck seed for the decimal and percent columns.
pub const DECIMAL_DECK_SALT: u64 = 11;
pub const PERCENT_DECK_SALT: u64 = 29;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckCard {
    pub id: String,
    pub label: String,
    pub trio_id: String,
}

/// The three card columns shown for a trio-matching puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrioDecks {
    pub fractions: Vec<DeckCard>,
    pub decimals: Vec<DeckCard>,
    pub percents: Vec<DeckCard>,
}

/// Deal the decks: fractions in declared order, decimals and percents
/// shuffled from `shuffleSeed` (or the puzzle seed) plus a per-column salt.
pub fn trio_decks(params: &FdpTrioMatchParams, puzzle_seed: u64) -> TrioDecks {
    let seed = params.shuffle_seed.unwrap_or(puzzle_seed);
    let fractions: Vec<DeckCard> = params
        .trios
        .iter()
        .map(|trio| DeckCard {
            id: trio.fraction.id.clone(),
            label: trio.fraction.label.clone(),
            trio_id: trio.id.clone(),
        })
        .collect();
    let decimals: Vec<DeckCard> = params
        .trios
        .iter()
        .map(|trio| DeckCard {
            id: trio.decimal.id.clone(),
            label: trio.decimal.label.clone(),
            trio_id: trio.id.clone(),
        })
        .collect();
    let percents: Vec<DeckCard> = params
        .trios
        .iter()
        .map(|trio| DeckCard {
            id: trio.percent.id.clone(),
            label: trio.percent.label.clone(),
            trio_id: trio.id.clone(),
        })
        .collect();
    TrioDecks {
        fractions,
        decimals: shuffle(&decimals, seed.wrapping_add(DECIMAL_DECK_SALT)),
        percents: shuffle(&percents, seed.wrapping_add(PERCENT_DECK_SALT)),
    }
}
