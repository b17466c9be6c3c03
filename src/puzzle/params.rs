//! Typed parameter payloads, one per puzzle kind.
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stamp {
    pub id: String,
    pub label: String,
    pub value_cents: i64,
    pub sprite_key: String,
    /// Another stamp that must be on the envelope whenever this one is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_stamp_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StampConstraints {
    pub max_stamps: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonus_fewest_stamps: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StampSumParams {
    pub target_cents: i64,
    pub stamps: Vec<Stamp>,
    pub constraints: StampConstraints,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parcel {
    pub id: String,
    pub label: String,
    pub value: i64,
    pub sprite_key: String,
    pub movable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MailbagBalanceParams {
    pub target_weight: i64,
    pub left_bag: Vec<Parcel>,
    pub right_bag: Vec<Parcel>,
    pub show_target_on_bags: bool,
}

impl MailbagBalanceParams {
    /// Parcels from both bags; answers may move a parcel to either side.
    pub fn parcels(&self) -> impl Iterator<Item = &Parcel> {
        self.left_bag.iter().chain(self.right_bag.iter())
    }
}

vocabulary! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Op {
        Add => "add",
        Sub => "sub",
    }
}

vocabulary! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum BubbleTag {
        Silly => "silly",
        Serious => "serious",
        Dramatic => "dramatic",
        Suspicious => "suspicious",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BubbleExpression {
    pub a: i64,
    pub b: i64,
    pub op: Op,
}

impl BubbleExpression {
    pub fn evaluate(&self) -> i64 {
        match self.op {
            Op::Add => self.a.saturating_add(self.b),
            Op::Sub => self.a.saturating_sub(self.b),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bubble {
    pub id: String,
    pub statement: String,
    pub expression: BubbleExpression,
    pub sprite_key: String,
    pub tag: BubbleTag,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BubbleRequirement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub op: Option<Op>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub must_use_numbers: Option<Vec<i64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BubblePopParams {
    pub goal_value: i64,
    pub required: BubbleRequirement,
    pub bubbles: Vec<Bubble>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCard {
    pub id: String,
    pub label: String,
    pub delta: i64,
    pub sprite_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceTapePathParams {
    pub start: i64,
    pub target: i64,
    pub pick_count: u32,
    pub move_cards: Vec<MoveCard>,
    /// When false, `pick_count` is an upper bound instead of an exact count.
    pub must_use_exactly_pick_count: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberInputRound {
    pub id: String,
    pub question: String,
    pub answer: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprite_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solved_quip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberInputQuizParams {
    pub rounds: Vec<NumberInputRound>,
    pub max_mistakes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coin {
    pub id: String,
    pub label: String,
    pub value_cents: i64,
    pub sprite_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinConstraints {
    pub max_coins: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonus_fewest_coins: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinSumParams {
    pub target_cents: i64,
    pub coins: Vec<Coin>,
    pub constraints: CoinConstraints,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockRound {
    pub id: String,
    pub hour: u8,
    pub minute: u8,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_option: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClockReadParams {
    pub rounds: Vec<ClockRound>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerimeterSegment {
    pub id: String,
    pub label: String,
    pub length: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprite_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerimeterWalkParams {
    pub segments: Vec<PerimeterSegment>,
    pub correct_perimeter: i64,
    pub unit_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaRectBuilderParams {
    pub target_area: i64,
    pub rows_min: i64,
    pub rows_max: i64,
    pub cols_min: i64,
    pub cols_max: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_perimeter: Option<i64>,
    pub unit_label: String,
}

vocabulary! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum AngleLabel {
        Acute => "acute",
        Right => "right",
        Obtuse => "obtuse",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AngleRound {
    pub id: String,
    pub degrees: u16,
    pub prompt: String,
    pub options: Vec<AngleLabel>,
    pub correct_option: AngleLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AngleClassifyParams {
    pub rounds: Vec<AngleRound>,
    pub show_degrees: bool,
}

vocabulary! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum SymmetryAxis {
        Vertical => "vertical",
        Horizontal => "horizontal",
        DiagonalLeft => "diagonal_left",
        DiagonalRight => "diagonal_right",
        None => "none",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymmetryRound {
    pub id: String,
    pub doodle_key: String,
    pub prompt: String,
    pub options: Vec<SymmetryAxis>,
    pub correct_option: SymmetryAxis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymmetryPickParams {
    pub rounds: Vec<SymmetryRound>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FractionSlice {
    pub id: String,
    pub label: String,
    pub numerator: i64,
    pub sprite_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SliceConstraints {
    pub max_slices: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonus_fewest_slices: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FractionPieSumParams {
    pub denominator: i64,
    pub target_numerator: i64,
    pub slices: Vec<FractionSlice>,
    pub constraints: SliceConstraints,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecimalLineRound {
    pub id: String,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub target: f64,
    pub prompt: String,
    pub show_labels: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecimalNumberLineParams {
    pub rounds: Vec<DecimalLineRound>,
    pub tolerance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PercentSprinkleParams {
    pub total_items: i64,
    pub target_percent: i64,
    pub required_count: i64,
    pub item_sprite_key: String,
    pub item_label_singular: String,
    pub item_label_plural: String,
    pub grid_cols: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FdpFraction {
    pub id: String,
    pub label: String,
    pub numerator: i64,
    pub denominator: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FdpValueCard {
    pub id: String,
    pub label: String,
    pub value: f64,
}

/// One fraction with its equivalent decimal and percent cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FdpTrio {
    pub id: String,
    pub fraction: FdpFraction,
    pub decimal: FdpValueCard,
    pub percent: FdpValueCard,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FdpTrioMatchParams {
    pub trios: Vec<FdpTrio>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shuffle_seed: Option<u64>,
}
