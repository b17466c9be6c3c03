//! Readers for the kind-specific `params` payloads.
use super::reader::{Bounds, Count, Node, Violations};
use crate::puzzle::*;

fn to_u32(n: Option<i64>) -> Option<u32> {
    n.and_then(|n| u32::try_from(n).ok())
}

fn non_zero(out: &mut Violations, node: &Node<'_>, n: Option<i64>) -> Option<i64> {
    match n {
        Some(0) => {
            out.push(&node.path, "non_zero", "valueCents cannot be 0");
            None
        }
        other => other,
    }
}

fn positive(out: &mut Violations, path: &str, n: Option<f64>) -> Option<f64> {
    match n {
        Some(n) if n <= 0.0 => {
            out.push(path, "range", format!("must be > 0 (got {n})"));
            None
        }
        other => other,
    }
}

/// Read the payload for `kind`; `None` when anything in it failed.
pub(crate) fn read_params(
    out: &mut Violations,
    kind: PuzzleKind,
    node: &Node<'_>,
) -> Option<PuzzleParams> {
    match kind {
        PuzzleKind::StampSum => stamp_sum(out, node).map(PuzzleParams::StampSum),
        PuzzleKind::MailbagBalance => mailbag_balance(out, node).map(PuzzleParams::MailbagBalance),
        PuzzleKind::BubblePopDifference => {
            bubble_pop(out, node).map(PuzzleParams::BubblePopDifference)
        }
        PuzzleKind::EvidenceTapePath => {
            evidence_tape_path(out, node).map(PuzzleParams::EvidenceTapePath)
        }
        PuzzleKind::NumberInputQuiz => {
            number_input_quiz(out, node).map(PuzzleParams::NumberInputQuiz)
        }
        PuzzleKind::CoinSum => coin_sum(out, node).map(PuzzleParams::CoinSum),
        PuzzleKind::ClockRead => clock_read(out, node).map(PuzzleParams::ClockRead),
        PuzzleKind::PerimeterWalk => perimeter_walk(out, node).map(PuzzleParams::PerimeterWalk),
        PuzzleKind::AreaRectBuilder => {
            area_rect_builder(out, node).map(PuzzleParams::AreaRectBuilder)
        }
        PuzzleKind::AngleClassify => angle_classify(out, node).map(PuzzleParams::AngleClassify),
        PuzzleKind::SymmetryPick => symmetry_pick(out, node).map(PuzzleParams::SymmetryPick),
        PuzzleKind::FractionPieSum => fraction_pie_sum(out, node).map(PuzzleParams::FractionPieSum),
        PuzzleKind::DecimalNumberLine => {
            decimal_number_line(out, node).map(PuzzleParams::DecimalNumberLine)
        }
        PuzzleKind::PercentSprinkle => {
            percent_sprinkle(out, node).map(PuzzleParams::PercentSprinkle)
        }
        PuzzleKind::FdpTrioMatch => fdp_trio_match(out, node).map(PuzzleParams::FdpTrioMatch),
    }
}

// STAMP_SUM

fn stamp(out: &mut Violations, node: &Node<'_>) -> Option<Stamp> {
    let mut f = node.fields(out)?;
    let id = f.id(out, "id");
    let label = f.text(out, "label");
    let value_node = f.require(out, "valueCents");
    let value_cents = value_node.as_ref().and_then(|n| {
        let raw = n.int(out, Bounds::ANY);
        non_zero(out, n, raw)
    });
    let sprite_key = f.text(out, "spriteKey");
    let requires_stamp_id = f.opt_id(out, "requiresStampId");
    f.finish(out);
    Some(Stamp {
        id: id?,
        label: label?,
        value_cents: value_cents?,
        sprite_key: sprite_key?,
        requires_stamp_id,
    })
}

fn stamp_constraints(out: &mut Violations, node: &Node<'_>) -> Option<StampConstraints> {
    let mut f = node.fields(out)?;
    let max_stamps = to_u32(f.int(out, "maxStamps", Bounds::between(1, 12)));
    let bonus = to_u32(f.opt_int(out, "bonusFewestStamps", Bounds::between(1, 12)));
    f.finish(out);
    Some(StampConstraints {
        max_stamps: max_stamps?,
        bonus_fewest_stamps: bonus,
    })
}

fn stamp_sum(out: &mut Violations, node: &Node<'_>) -> Option<StampSumParams> {
    let mut f = node.fields(out)?;
    let target_cents = f.int(out, "targetCents", Bounds::ANY);
    let stamps = f.list(out, "stamps", Count::at_least(4), stamp);
    let constraints = f
        .require(out, "constraints")
        .and_then(|n| stamp_constraints(out, &n));
    f.finish(out);
    Some(StampSumParams {
        target_cents: target_cents?,
        stamps: stamps?,
        constraints: constraints?,
    })
}

// MAILBAG_BALANCE

fn parcel(out: &mut Violations, node: &Node<'_>) -> Option<Parcel> {
    let mut f = node.fields(out)?;
    let id = f.id(out, "id");
    let label = f.text(out, "label");
    let value = f.int(out, "value", Bounds::ANY);
    let sprite_key = f.text(out, "spriteKey");
    let movable = f.flag_or(out, "movable", true);
    f.finish(out);
    Some(Parcel {
        id: id?,
        label: label?,
        value: value?,
        sprite_key: sprite_key?,
        movable,
    })
}

fn mailbag_balance(out: &mut Violations, node: &Node<'_>) -> Option<MailbagBalanceParams> {
    let mut f = node.fields(out)?;
    let target_weight = f.int(out, "targetWeight", Bounds::ANY);
    let left_bag = f.list(out, "leftBag", Count::at_least(1), parcel);
    let right_bag = f.list(out, "rightBag", Count::at_least(1), parcel);
    let show_target_on_bags = f.flag_or(out, "showTargetOnBags", true);
    f.finish(out);
    Some(MailbagBalanceParams {
        target_weight: target_weight?,
        left_bag: left_bag?,
        right_bag: right_bag?,
        show_target_on_bags,
    })
}

// BUBBLE_POP_DIFFERENCE

fn bubble_expression(out: &mut Violations, node: &Node<'_>) -> Option<BubbleExpression> {
    let mut f = node.fields(out)?;
    let a = f.int(out, "a", Bounds::ANY);
    let b = f.int(out, "b", Bounds::ANY);
    let op = f.choice(out, "op");
    f.finish(out);
    Some(BubbleExpression { a: a?, b: b?, op: op? })
}

fn bubble(out: &mut Violations, node: &Node<'_>) -> Option<Bubble> {
    let mut f = node.fields(out)?;
    let id = f.id(out, "id");
    let statement = f.text(out, "statement");
    let expression = f
        .require(out, "expression")
        .and_then(|n| bubble_expression(out, &n));
    let sprite_key = f.text(out, "spriteKey");
    let tag = f.choice_or(out, "tag", BubbleTag::Silly);
    f.finish(out);
    Some(Bubble {
        id: id?,
        statement: statement?,
        expression: expression?,
        sprite_key: sprite_key?,
        tag,
    })
}

fn bubble_requirement(out: &mut Violations, node: &Node<'_>) -> Option<BubbleRequirement> {
    let mut f = node.fields(out)?;
    let op = f.opt_choice(out, "op");
    let must_use_numbers = f.opt_list(out, "mustUseNumbers", Count::at_least(1), |out, n| {
        n.int(out, Bounds::ANY)
    });
    f.finish(out);
    Some(BubbleRequirement { op, must_use_numbers })
}

fn bubble_pop(out: &mut Violations, node: &Node<'_>) -> Option<BubblePopParams> {
    let mut f = node.fields(out)?;
    let goal_value = f.int(out, "goalValue", Bounds::ANY);
    let required = match f.take("required") {
        Some(n) => bubble_requirement(out, &n),
        None => Some(BubbleRequirement::default()),
    };
    let bubbles = f.list(out, "bubbles", Count::at_least(4), bubble);
    f.finish(out);
    Some(BubblePopParams {
        goal_value: goal_value?,
        required: required?,
        bubbles: bubbles?,
    })
}

// EVIDENCE_TAPE_PATH

fn move_card(out: &mut Violations, node: &Node<'_>) -> Option<MoveCard> {
    let mut f = node.fields(out)?;
    let id = f.id(out, "id");
    let label = f.text(out, "label");
    let delta = f.int(out, "delta", Bounds::ANY);
    let sprite_key = f.text(out, "spriteKey");
    f.finish(out);
    Some(MoveCard {
        id: id?,
        label: label?,
        delta: delta?,
        sprite_key: sprite_key?,
    })
}

fn evidence_tape_path(out: &mut Violations, node: &Node<'_>) -> Option<EvidenceTapePathParams> {
    let mut f = node.fields(out)?;
    let start = f.int(out, "start", Bounds::ANY);
    let target = f.int(out, "target", Bounds::ANY);
    let pick_count = to_u32(f.int(out, "pickCount", Bounds::between(1, 6)));
    let move_cards = f.list(out, "moveCards", Count::at_least(4), move_card);
    let exact = f.flag_or(out, "mustUseExactlyPickCount", true);
    f.finish(out);
    Some(EvidenceTapePathParams {
        start: start?,
        target: target?,
        pick_count: pick_count?,
        move_cards: move_cards?,
        must_use_exactly_pick_count: exact,
    })
}

// NUMBER_INPUT_QUIZ

fn number_round(out: &mut Violations, node: &Node<'_>) -> Option<NumberInputRound> {
    let mut f = node.fields(out)?;
    let id = f.id(out, "id");
    let question = f.text(out, "question");
    let answer = f.int(out, "answer", Bounds::ANY);
    let sprite_key = f.opt_text(out, "spriteKey");
    let solved_quip = f.opt_text(out, "solvedQuip");
    f.finish(out);
    Some(NumberInputRound {
        id: id?,
        question: question?,
        answer: answer?,
        sprite_key,
        solved_quip,
    })
}

fn number_input_quiz(out: &mut Violations, node: &Node<'_>) -> Option<NumberInputQuizParams> {
    let mut f = node.fields(out)?;
    let rounds = f.list(out, "rounds", Count::at_least(3), number_round);
    let max_mistakes = f.int_or(out, "maxMistakes", 2, Bounds::between(0, 10));
    f.finish(out);
    Some(NumberInputQuizParams {
        rounds: rounds?,
        max_mistakes: to_u32(Some(max_mistakes))?,
    })
}

// COIN_SUM

fn coin(out: &mut Violations, node: &Node<'_>) -> Option<Coin> {
    let mut f = node.fields(out)?;
    let id = f.id(out, "id");
    let label = f.text(out, "label");
    let value_node = f.require(out, "valueCents");
    let value_cents = value_node.as_ref().and_then(|n| {
        let raw = n.int(out, Bounds::ANY);
        non_zero(out, n, raw)
    });
    let sprite_key = f.text(out, "spriteKey");
    f.finish(out);
    Some(Coin {
        id: id?,
        label: label?,
        value_cents: value_cents?,
        sprite_key: sprite_key?,
    })
}

fn coin_constraints(out: &mut Violations, node: &Node<'_>) -> Option<CoinConstraints> {
    let mut f = node.fields(out)?;
    let max_coins = to_u32(f.int(out, "maxCoins", Bounds::between(1, 20)));
    let bonus = to_u32(f.opt_int(out, "bonusFewestCoins", Bounds::between(1, 20)));
    f.finish(out);
    Some(CoinConstraints {
        max_coins: max_coins?,
        bonus_fewest_coins: bonus,
    })
}

fn coin_sum(out: &mut Violations, node: &Node<'_>) -> Option<CoinSumParams> {
    let mut f = node.fields(out)?;
    let target_cents = f.int(out, "targetCents", Bounds::at_least(0));
    let coins = f.list(out, "coins", Count::at_least(4), coin);
    let constraints = f
        .require(out, "constraints")
        .and_then(|n| coin_constraints(out, &n));
    f.finish(out);
    Some(CoinSumParams {
        target_cents: target_cents?,
        coins: coins?,
        constraints: constraints?,
    })
}

// CLOCK_READ

fn clock_round(out: &mut Violations, node: &Node<'_>) -> Option<ClockRound> {
    let mut f = node.fields(out)?;
    let id = f.id(out, "id");
    let hour = f.int(out, "hour", Bounds::between(1, 12));
    let minute = f.int(out, "minute", Bounds::between(0, 59));
    let prompt = f.text(out, "prompt");
    let options = f.texts(out, "options", Count::between(2, 6));
    let correct_option = f.text(out, "correctOption");
    f.finish(out);
    Some(ClockRound {
        id: id?,
        hour: u8::try_from(hour?).ok()?,
        minute: u8::try_from(minute?).ok()?,
        prompt: prompt?,
        options: options?,
        correct_option: correct_option?,
    })
}

fn clock_read(out: &mut Violations, node: &Node<'_>) -> Option<ClockReadParams> {
    let mut f = node.fields(out)?;
    let rounds = f.list(out, "rounds", Count::at_least(3), clock_round);
    f.finish(out);
    Some(ClockReadParams { rounds: rounds? })
}

// PERIMETER_WALK

fn perimeter_segment(out: &mut Violations, node: &Node<'_>) -> Option<PerimeterSegment> {
    let mut f = node.fields(out)?;
    let id = f.id(out, "id");
    let label = f.text(out, "label");
    let length = f.int(out, "length", Bounds::at_least(1));
    let sprite_key = f.opt_text(out, "spriteKey");
    f.finish(out);
    Some(PerimeterSegment {
        id: id?,
        label: label?,
        length: length?,
        sprite_key,
    })
}

fn perimeter_walk(out: &mut Violations, node: &Node<'_>) -> Option<PerimeterWalkParams> {
    let mut f = node.fields(out)?;
    let segments = f.list(out, "segments", Count::between(4, 12), perimeter_segment);
    let correct_perimeter = f.int(out, "correctPerimeter", Bounds::at_least(1));
    let unit_label = f.text_or(out, "unitLabel", "units");
    f.finish(out);
    Some(PerimeterWalkParams {
        segments: segments?,
        correct_perimeter: correct_perimeter?,
        unit_label,
    })
}

// AREA_RECT_BUILDER

fn area_rect_builder(out: &mut Violations, node: &Node<'_>) -> Option<AreaRectBuilderParams> {
    let mut f = node.fields(out)?;
    let target_area = f.int(out, "targetArea", Bounds::at_least(1));
    let rows_min = f.int(out, "rowsMin", Bounds::at_least(1));
    let rows_max = f.int(out, "rowsMax", Bounds::at_least(1));
    let cols_min = f.int(out, "colsMin", Bounds::at_least(1));
    let cols_max = f.int(out, "colsMax", Bounds::at_least(1));
    let required_perimeter = f.opt_int(out, "requiredPerimeter", Bounds::at_least(1));
    let unit_label = f.text_or(out, "unitLabel", "square units");
    f.finish(out);
    Some(AreaRectBuilderParams {
        target_area: target_area?,
        rows_min: rows_min?,
        rows_max: rows_max?,
        cols_min: cols_min?,
        cols_max: cols_max?,
        required_perimeter,
        unit_label,
    })
}

// ANGLE_CLASSIFY

fn angle_round(out: &mut Violations, node: &Node<'_>) -> Option<AngleRound> {
    let mut f = node.fields(out)?;
    let id = f.id(out, "id");
    let degrees = f.int(out, "degrees", Bounds::between(10, 170));
    let prompt = f.text(out, "prompt");
    let options = f.list(out, "options", Count::between(2, 3), |out, n| n.choice(out));
    let correct_option = f.choice(out, "correctOption");
    f.finish(out);
    Some(AngleRound {
        id: id?,
        degrees: u16::try_from(degrees?).ok()?,
        prompt: prompt?,
        options: options?,
        correct_option: correct_option?,
    })
}

fn angle_classify(out: &mut Violations, node: &Node<'_>) -> Option<AngleClassifyParams> {
    let mut f = node.fields(out)?;
    let rounds = f.list(out, "rounds", Count::between(3, 6), angle_round);
    let show_degrees = f.flag_or(out, "showDegrees", false);
    f.finish(out);
    Some(AngleClassifyParams {
        rounds: rounds?,
        show_degrees,
    })
}

// SYMMETRY_PICK

fn symmetry_round(out: &mut Violations, node: &Node<'_>) -> Option<SymmetryRound> {
    let mut f = node.fields(out)?;
    let id = f.id(out, "id");
    let doodle_key = f.text(out, "doodleKey");
    let prompt = f.text(out, "prompt");
    let options = f.list(out, "options", Count::between(2, 5), |out, n| n.choice(out));
    let correct_option = f.choice(out, "correctOption");
    f.finish(out);
    Some(SymmetryRound {
        id: id?,
        doodle_key: doodle_key?,
        prompt: prompt?,
        options: options?,
        correct_option: correct_option?,
    })
}

fn symmetry_pick(out: &mut Violations, node: &Node<'_>) -> Option<SymmetryPickParams> {
    let mut f = node.fields(out)?;
    let rounds = f.list(out, "rounds", Count::between(3, 6), symmetry_round);
    f.finish(out);
    Some(SymmetryPickParams { rounds: rounds? })
}

// FRACTION_PIE_SUM

fn fraction_slice(out: &mut Violations, node: &Node<'_>) -> Option<FractionSlice> {
    let mut f = node.fields(out)?;
    let id = f.id(out, "id");
    let label = f.text(out, "label");
    let numerator = f.int(out, "numerator", Bounds::at_least(1));
    let sprite_key = f.text(out, "spriteKey");
    f.finish(out);
    Some(FractionSlice {
        id: id?,
        label: label?,
        numerator: numerator?,
        sprite_key: sprite_key?,
    })
}

fn slice_constraints(out: &mut Violations, node: &Node<'_>) -> Option<SliceConstraints> {
    let mut f = node.fields(out)?;
    let max_slices = to_u32(f.int(out, "maxSlices", Bounds::between(1, 12)));
    let bonus = to_u32(f.opt_int(out, "bonusFewestSlices", Bounds::between(1, 12)));
    f.finish(out);
    Some(SliceConstraints {
        max_slices: max_slices?,
        bonus_fewest_slices: bonus,
    })
}

fn fraction_pie_sum(out: &mut Violations, node: &Node<'_>) -> Option<FractionPieSumParams> {
    let mut f = node.fields(out)?;
    let denominator = f.int(out, "denominator", Bounds::between(2, 24));
    let target_numerator = f.int(out, "targetNumerator", Bounds::at_least(1));
    let slices = f.list(out, "slices", Count::at_least(4), fraction_slice);
    let constraints = f
        .require(out, "constraints")
        .and_then(|n| slice_constraints(out, &n));
    f.finish(out);
    Some(FractionPieSumParams {
        denominator: denominator?,
        target_numerator: target_numerator?,
        slices: slices?,
        constraints: constraints?,
    })
}

// DECIMAL_NUMBER_LINE

fn decimal_round(out: &mut Violations, node: &Node<'_>) -> Option<DecimalLineRound> {
    let mut f = node.fields(out)?;
    let id = f.id(out, "id");
    let min = f.number(out, "min");
    let max = f.number(out, "max");
    let step_path = f.path_of("step");
    let step = f.number(out, "step");
    let step = positive(out, &step_path, step);
    let target = f.number(out, "target");
    let prompt = f.text(out, "prompt");
    let show_labels = f.flag_or(out, "showLabels", true);
    f.finish(out);
    Some(DecimalLineRound {
        id: id?,
        min: min?,
        max: max?,
        step: step?,
        target: target?,
        prompt: prompt?,
        show_labels,
    })
}

fn decimal_number_line(out: &mut Violations, node: &Node<'_>) -> Option<DecimalNumberLineParams> {
    let mut f = node.fields(out)?;
    let rounds = f.list(out, "rounds", Count::between(3, 6), decimal_round);
    let tolerance = f.number_or(out, "tolerance", 0.0);
    if tolerance < 0.0 {
        out.push(
            &f.path_of("tolerance"),
            "range",
            format!("must be >= 0 (got {tolerance})"),
        );
    }
    f.finish(out);
    Some(DecimalNumberLineParams {
        rounds: rounds?,
        tolerance,
    })
}

// PERCENT_SPRINKLE

fn percent_sprinkle(out: &mut Violations, node: &Node<'_>) -> Option<PercentSprinkleParams> {
    let mut f = node.fields(out)?;
    let total_items = f.int(out, "totalItems", Bounds::between(8, 60));
    let target_percent = f.int(out, "targetPercent", Bounds::between(5, 95));
    let required_count = f.int(out, "requiredCount", Bounds::at_least(0));
    let item_sprite_key = f.text(out, "itemSpriteKey");
    let item_label_singular = f.text(out, "itemLabelSingular");
    let item_label_plural = f.text(out, "itemLabelPlural");
    let grid_cols = f.int_or(out, "gridCols", 6, Bounds::between(4, 10));
    f.finish(out);
    Some(PercentSprinkleParams {
        total_items: total_items?,
        target_percent: target_percent?,
        required_count: required_count?,
        item_sprite_key: item_sprite_key?,
        item_label_singular: item_label_singular?,
        item_label_plural: item_label_plural?,
        grid_cols: to_u32(Some(grid_cols))?,
    })
}

// FDP_TRIO_MATCH

fn fdp_fraction(out: &mut Violations, node: &Node<'_>) -> Option<FdpFraction> {
    let mut f = node.fields(out)?;
    let id = f.id(out, "id");
    let label = f.text(out, "label");
    let numerator = f.int(out, "numerator", Bounds::at_least(1));
    let denominator = f.int(out, "denominator", Bounds::at_least(2));
    f.finish(out);
    Some(FdpFraction {
        id: id?,
        label: label?,
        numerator: numerator?,
        denominator: denominator?,
    })
}

fn fdp_value_card(out: &mut Violations, node: &Node<'_>) -> Option<FdpValueCard> {
    let mut f = node.fields(out)?;
    let id = f.id(out, "id");
    let label = f.text(out, "label");
    let value = f.number(out, "value");
    f.finish(out);
    Some(FdpValueCard {
        id: id?,
        label: label?,
        value: value?,
    })
}

fn fdp_trio(out: &mut Violations, node: &Node<'_>) -> Option<FdpTrio> {
    let mut f = node.fields(out)?;
    let id = f.id(out, "id");
    let fraction = f.require(out, "fraction").and_then(|n| fdp_fraction(out, &n));
    let decimal = f.require(out, "decimal").and_then(|n| fdp_value_card(out, &n));
    let percent = f.require(out, "percent").and_then(|n| fdp_value_card(out, &n));
    f.finish(out);
    Some(FdpTrio {
        id: id?,
        fraction: fraction?,
        decimal: decimal?,
        percent: percent?,
    })
}

fn fdp_trio_match(out: &mut Violations, node: &Node<'_>) -> Option<FdpTrioMatchParams> {
    let mut f = node.fields(out)?;
    let trios = f.list(out, "trios", Count::between(3, 6), fdp_trio);
    let shuffle_seed = f
        .opt_int(out, "shuffleSeed", Bounds::at_least(0))
        .and_then(|n| u64::try_from(n).ok());
    f.finish(out);
    Some(FdpTrioMatchParams {
        trios: trios?,
        shuffle_seed,
    })
}
