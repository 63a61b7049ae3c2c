use js_sys::Function;
use serde::{de::DeserializeOwned, Serialize};
use wasm_bindgen::prelude::*;

pub mod card;
pub mod chips;
pub mod config;
pub mod counter;
pub mod drill;
pub mod error;
pub mod hand;
pub mod logging;
pub mod payout;
pub mod round;
pub mod shoe;
pub mod strategy;

pub use card::{Card, Rank, Suit};
pub use config::{PracticeMode, TableRules, TrainerSettings};
pub use error::{BetError, ChipError, ConfigError, Error};
pub use hand::{evaluate, HandValue};
pub use payout::{settle, Outcome, PayoutRule, Settlement};
pub use round::{HandState, Round, RoundPhase, SeatConfig, TableView};

fn init() {
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
}

fn from_js<T: DeserializeOwned>(value: &JsValue, what: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value.clone())
        .map_err(|err| JsValue::from_str(&format!("Invalid {what}: {err}")))
}

fn from_js_or_default<T: DeserializeOwned + Default>(
    value: &JsValue,
    what: &str,
) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    from_js(value, what)
}

fn from_str_tag<T: DeserializeOwned>(tag: &str, what: &str) -> Result<T, JsValue> {
    serde_json::from_value(serde_json::Value::String(tag.to_string()))
        .map_err(|_| JsValue::from_str(&format!("Invalid {what}: {tag}")))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|err| JsValue::from_str(&format!("Serialization failed: {err}")))
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub fn evaluate_hand(cards: &JsValue, include_face_down: bool) -> Result<JsValue, JsValue> {
    init();
    let cards: Vec<Card> = from_js(cards, "hand")?;
    to_js(&hand::evaluate(&cards, include_face_down))
}

#[wasm_bindgen]
pub fn settle_hand(
    outcome: &str,
    bet: f64,
    payout_rule: &str,
    bust_caused: bool,
) -> Result<JsValue, JsValue> {
    init();
    let outcome: Outcome = from_str_tag(outcome, "outcome")?;
    let rule: PayoutRule = from_str_tag(payout_rule, "payout rule")?;
    if !bet.is_finite() || bet < 0.0 {
        return Err(JsValue::from_str(&format!("Invalid bet: {bet}")));
    }
    to_js(&payout::settle(outcome, bet, rule, bust_caused))
}

#[wasm_bindgen]
pub fn chip_breakdown(bet: f64) -> Result<Vec<u32>, JsValue> {
    init();
    chips::chips_for_bet(bet).map_err(js_error)
}

#[wasm_bindgen]
pub fn recommend_action(
    cards: &JsValue,
    dealer_up: &JsValue,
    tables: &JsValue,
    true_count: i32,
) -> Result<JsValue, JsValue> {
    init();
    let cards: Vec<Card> = from_js(cards, "hand")?;
    let dealer_up: Card = from_js(dealer_up, "dealer card")?;
    let advisor = if tables.is_undefined() || tables.is_null() {
        strategy::Strategy::basic()
    } else {
        let input: strategy::StrategyInput = from_js(tables, "strategy")?;
        strategy::Strategy::from_input(input).map_err(js_error)?
    };
    let can_double = cards.len() == 2;
    let action = advisor.recommend(&cards, &dealer_up, can_double, true, true_count);
    to_js(&action)
}

#[wasm_bindgen]
pub fn hit_stand_drill(seed: u32) -> Result<JsValue, JsValue> {
    init();
    to_js(&drill::hit_stand_scenario(seed as u64))
}

#[wasm_bindgen]
pub fn grade_hit_stand(scenario: &JsValue, action: &str) -> Result<JsValue, JsValue> {
    init();
    let scenario: drill::HitStandScenario = from_js(scenario, "scenario")?;
    let action: strategy::Action = from_str_tag(action, "action")?;
    to_js(&drill::grade_hit_stand(&scenario, action))
}

#[wasm_bindgen]
pub fn chip_payout_drill(seed: u32) -> Result<JsValue, JsValue> {
    init();
    to_js(&drill::payout_scenario(seed as u64))
}

#[wasm_bindgen]
pub fn grade_chip_payout(scenario: &JsValue, answer: f64) -> Result<JsValue, JsValue> {
    init();
    let scenario: drill::PayoutScenario = from_js(scenario, "scenario")?;
    to_js(&drill::grade_payout(&scenario, answer))
}

#[wasm_bindgen]
pub fn counting_drill(seed: u32, length: usize, system: &JsValue) -> Result<JsValue, JsValue> {
    init();
    let system: counter::CountingSystem = from_js_or_default(system, "counting system")?;
    to_js(&drill::counting_scenario(seed as u64, length, system))
}

#[wasm_bindgen]
pub fn grade_count(scenario: &JsValue, answer: i32) -> Result<JsValue, JsValue> {
    init();
    let scenario: drill::CountingScenario = from_js(scenario, "scenario")?;
    to_js(&drill::grade_count(&scenario, answer))
}

#[wasm_bindgen]
pub fn should_show_tutorial(settings: &JsValue) -> Result<bool, JsValue> {
    init();
    let settings: TrainerSettings = from_js_or_default(settings, "settings")?;
    Ok(settings.should_show_tutorial())
}

#[wasm_bindgen]
pub fn mark_tutorial_seen(settings: &JsValue) -> Result<JsValue, JsValue> {
    init();
    let settings: TrainerSettings = from_js_or_default(settings, "settings")?;
    to_js(&settings.mark_tutorial_seen())
}

#[wasm_bindgen]
pub fn select_practice_mode(settings: &JsValue, mode: &str) -> Result<JsValue, JsValue> {
    init();
    let settings: TrainerSettings = from_js_or_default(settings, "settings")?;
    let mode: PracticeMode = from_str_tag(mode, "practice mode")?;
    to_js(&settings.with_mode(mode))
}

/// A dealing table driven by the host's UI events. Every action returns the
/// new table snapshot.
#[wasm_bindgen]
pub struct Table {
    round: Round,
    on_settled: Option<Function>,
}

#[wasm_bindgen]
impl Table {
    #[wasm_bindgen(constructor)]
    pub fn new(rules: &JsValue, seats: &JsValue, seed: u32) -> Result<Table, JsValue> {
        init();
        let rules: TableRules = from_js_or_default(rules, "rules")?;
        let seats: Vec<SeatConfig> = from_js(seats, "seats")?;
        let round = Round::new(rules, seats, seed as u64).map_err(js_error)?;
        Ok(Table {
            round,
            on_settled: None,
        })
    }

    /// Called with the settled snapshot whenever a round finishes.
    pub fn set_on_settled(&mut self, callback: Function) {
        self.on_settled = Some(callback);
    }

    pub fn place_bet(&mut self, seat_id: u32, input: &str) -> Result<JsValue, JsValue> {
        self.step(|round| round.place_bet(seat_id, input).map(|_| ()))
    }

    pub fn deal(&mut self) -> Result<JsValue, JsValue> {
        self.step(Round::deal)
    }

    pub fn accept_insurance(&mut self, seat_id: u32) -> Result<JsValue, JsValue> {
        self.step(|round| round.accept_insurance(seat_id))
    }

    pub fn decline_insurance(&mut self, seat_id: u32) -> Result<JsValue, JsValue> {
        self.step(|round| round.decline_insurance(seat_id))
    }

    pub fn hit(&mut self, seat_id: u32) -> Result<JsValue, JsValue> {
        self.step(|round| round.hit(seat_id))
    }

    pub fn stand(&mut self, seat_id: u32) -> Result<JsValue, JsValue> {
        self.step(|round| round.stand(seat_id))
    }

    pub fn double_down(&mut self, seat_id: u32) -> Result<JsValue, JsValue> {
        self.step(|round| round.double_down(seat_id))
    }

    pub fn split(&mut self, seat_id: u32) -> Result<JsValue, JsValue> {
        self.step(|round| round.split(seat_id))
    }

    pub fn surrender(&mut self, seat_id: u32) -> Result<JsValue, JsValue> {
        self.step(|round| round.surrender(seat_id))
    }

    pub fn next_round(&mut self) -> Result<JsValue, JsValue> {
        self.step(Round::next_round)
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        to_js(&self.round.snapshot())
    }

    pub fn running_count(&self) -> i32 {
        self.round.running_count()
    }

    pub fn true_count(&self) -> f64 {
        self.round.true_count()
    }
}

impl Table {
    fn step<F>(&mut self, action: F) -> Result<JsValue, JsValue>
    where
        F: FnOnce(&mut Round) -> error::Result<()>,
    {
        init();
        let was_settled = self.round.phase() == RoundPhase::Settled;
        action(&mut self.round).map_err(js_error)?;
        let view = to_js(&self.round.snapshot())?;
        if !was_settled && self.round.phase() == RoundPhase::Settled {
            if let Some(callback) = &self.on_settled {
                let _ = callback.call1(&JsValue::NULL, &view);
            }
        }
        Ok(view)
    }
}
