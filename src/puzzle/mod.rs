//! Puzzle variant registry.
//!
//! The fifteen puzzle kinds form a closed set. `PuzzleKind` names them,
//! `PuzzleParams` carries one typed payload per kind, and every dispatch over
//! either enum is an exhaustive `match`, so a kind cannot be added to the
//! schema without also being graded (and the reverse).
use serde::Serialize;

/// Declare a closed vocabulary enum from one `Variant => "wire"` list.
///
/// `ALL`, `as_str`, `Display` and `Serialize` are all generated from the
/// list, so a new variant is listed everywhere at once.
macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$variant_meta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        pub enum $name {
            $($(#[$variant_meta])* $variant),+
        }

        impl $crate::puzzle::Vocabulary for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::puzzle::Vocabulary::as_str(self))
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str($crate::puzzle::Vocabulary::as_str(self))
            }
        }
    };
}

pub(crate) use vocabulary;

mod params;

pub use params::*;

/// Closed vocabularies that appear in content documents as plain strings.
pub trait Vocabulary: Copy + Sized + 'static {
    /// Every member, in declaration order.
    const ALL: &'static [Self];

    /// Return the stable string used in content JSON.
    fn as_str(&self) -> &'static str;

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|item| item.as_str() == name)
    }

    /// Comma-separated list of accepted names, for violation messages.
    fn expected() -> String {
        Self::ALL
            .iter()
            .map(|item| format!("{:?}", item.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

vocabulary! {
    /// Puzzle discriminant as it appears in the `kind` field.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub enum PuzzleKind {
        StampSum => "STAMP_SUM",
        MailbagBalance => "MAILBAG_BALANCE",
        BubblePopDifference => "BUBBLE_POP_DIFFERENCE",
        EvidenceTapePath => "EVIDENCE_TAPE_PATH",
        NumberInputQuiz => "NUMBER_INPUT_QUIZ",
        CoinSum => "COIN_SUM",
        ClockRead => "CLOCK_READ",
        PerimeterWalk => "PERIMETER_WALK",
        AreaRectBuilder => "AREA_RECT_BUILDER",
        AngleClassify => "ANGLE_CLASSIFY",
        SymmetryPick => "SYMMETRY_PICK",
        FractionPieSum => "FRACTION_PIE_SUM",
        DecimalNumberLine => "DECIMAL_NUMBER_LINE",
        PercentSprinkle => "PERCENT_SPRINKLE",
        FdpTrioMatch => "FDP_TRIO_MATCH",
    }
}

vocabulary! {
    /// Curriculum topic a puzzle practices; progress statistics are keyed by it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub enum TopicKey {
        AddSub => "add_sub",
        MulDiv => "mul_div",
        Money => "money",
        Time => "time",
        Geometry => "geometry",
        Fractions => "fractions",
        Decimals => "decimals",
        Percent => "percent",
        Mixed => "mixed",
    }
}

/// Flavor text shown around a puzzle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleUi {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intro_line: Option<String>,
    pub success_quips: Vec<String>,
    pub fail_quips: Vec<String>,
}

/// A validated puzzle: shared base fields plus the kind-specific payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Puzzle {
    pub id: String,
    pub title: String,
    pub prompt: String,
    pub topic_key: TopicKey,
    pub difficulty: u8,
    pub seed: u64,
    pub points: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit_sec: Option<u32>,
    pub unlocks_evidence_id: String,
    pub ui: PuzzleUi,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<String>,
    #[serde(flatten)]
    pub params: PuzzleParams,
}

impl Puzzle {
    pub fn kind(&self) -> PuzzleKind {
        self.params.kind()
    }
}

/// Kind-specific payload; the variant is the puzzle's kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "params", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PuzzleParams {
    StampSum(StampSumParams),
    MailbagBalance(MailbagBalanceParams),
    BubblePopDifference(BubblePopParams),
    EvidenceTapePath(EvidenceTapePathParams),
    NumberInputQuiz(NumberInputQuizParams),
    CoinSum(CoinSumParams),
    ClockRead(ClockReadParams),
    PerimeterWalk(PerimeterWalkParams),
    AreaRectBuilder(AreaRectBuilderParams),
    AngleClassify(AngleClassifyParams),
    SymmetryPick(SymmetryPickParams),
    FractionPieSum(FractionPieSumParams),
    DecimalNumberLine(DecimalNumberLineParams),
    PercentSprinkle(PercentSprinkleParams),
    FdpTrioMatch(FdpTrioMatchParams),
}

impl PuzzleParams {
    pub fn kind(&self) -> PuzzleKind {
        match self {
            PuzzleParams::StampSum(_) => PuzzleKind::StampSum,
            PuzzleParams::MailbagBalance(_) => PuzzleKind::MailbagBalance,
            PuzzleParams::BubblePopDifference(_) => PuzzleKind::BubblePopDifference,
            PuzzleParams::EvidenceTapePath(_) => PuzzleKind::EvidenceTapePath,
            PuzzleParams::NumberInputQuiz(_) => PuzzleKind::NumberInputQuiz,
            PuzzleParams::CoinSum(_) => PuzzleKind::CoinSum,
            PuzzleParams::ClockRead(_) => PuzzleKind::ClockRead,
            PuzzleParams::PerimeterWalk(_) => PuzzleKind::PerimeterWalk,
            PuzzleParams::AreaRectBuilder(_) => PuzzleKind::AreaRectBuilder,
            PuzzleParams::AngleClassify(_) => PuzzleKind::AngleClassify,
            PuzzleParams::SymmetryPick(_) => PuzzleKind::SymmetryPick,
            PuzzleParams::FractionPieSum(_) => PuzzleKind::FractionPieSum,
            PuzzleParams::DecimalNumberLine(_) => PuzzleKind::DecimalNumberLine,
            PuzzleParams::PercentSprinkle(_) => PuzzleKind::PercentSprinkle,
            PuzzleParams::FdpTrioMatch(_) => PuzzleKind::FdpTrioMatch,
        }
    }
}
