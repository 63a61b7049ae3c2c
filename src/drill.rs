//! Practice drills for the trainer's side modes: hit/stand decisions, chip
//! payouts and running counts. Each drill hands the host a scenario and
//! grades the trainee's answer against the same logic the table uses.

use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{
    card::Card,
    chips,
    counter::{self, CountingSystem},
    hand::{self, HandValue},
    payout::{self, Outcome, PayoutRule, Settlement},
    shoe::Shoe,
    strategy::{Action, Strategy},
};

const PAYOUT_BET_STEP: u32 = 5;
const PAYOUT_MAX_STEPS: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HitStandScenario {
    pub player: Vec<Card>,
    pub dealer_up: Card,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HitStandGrade {
    pub correct: bool,
    pub expected: Action,
    pub hand_value: HandValue,
}

pub fn hit_stand_scenario(seed: u64) -> HitStandScenario {
    let mut shoe = Shoe::new(1, 100, seed);
    let mut player = vec![shoe.deal(), shoe.deal()];
    // naturals leave nothing to decide
    while hand::is_blackjack(&player) {
        player = vec![shoe.deal(), shoe.deal()];
    }
    HitStandScenario {
        player,
        dealer_up: shoe.deal(),
    }
}

/// Grades a hit or stand call. Doubling and splitting are not options in
/// this drill, so the expected play is the basic-strategy hit/stand fallback.
pub fn grade_hit_stand(scenario: &HitStandScenario, answer: Action) -> HitStandGrade {
    let expected =
        Strategy::basic().recommend(&scenario.player, &scenario.dealer_up, false, false, 0);
    HitStandGrade {
        correct: answer == expected,
        expected,
        hand_value: hand::evaluate(&scenario.player, true),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutScenario {
    pub bet: f64,
    pub outcome: Outcome,
    pub payout_rule: PayoutRule,
    pub chips: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutGrade {
    pub correct: bool,
    pub expected: Settlement,
}

pub fn payout_scenario(seed: u64) -> PayoutScenario {
    let mut rng = SmallRng::seed_from_u64(seed);
    let bet = rng.gen_range(1..=PAYOUT_MAX_STEPS) * PAYOUT_BET_STEP;
    let outcome = match rng.gen_range(0..3) {
        0 => Outcome::Win,
        1 => Outcome::Blackjack,
        _ => Outcome::Surrender,
    };
    let payout_rule = if rng.gen_bool(0.5) {
        PayoutRule::ThreeToTwo
    } else {
        PayoutRule::SixToFive
    };
    PayoutScenario {
        bet: bet as f64,
        outcome,
        payout_rule,
        chips: chips::breakdown(bet, &chips::DEFAULT_DENOMINATIONS).unwrap_or_default(),
    }
}

/// `answer` is the amount the dealer pays or takes, unsigned.
pub fn grade_payout(scenario: &PayoutScenario, answer: f64) -> PayoutGrade {
    let expected = payout::settle(scenario.outcome, scenario.bet, scenario.payout_rule, false);
    PayoutGrade {
        correct: (answer.abs() - expected.amount.abs()).abs() < 0.005,
        expected,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountingScenario {
    pub cards: Vec<Card>,
    #[serde(default)]
    pub system: CountingSystem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountGrade {
    pub correct: bool,
    pub expected: i32,
}

pub fn counting_scenario(seed: u64, length: usize, system: CountingSystem) -> CountingScenario {
    let mut shoe = Shoe::new(1, 100, seed);
    CountingScenario {
        cards: (0..length).map(|_| shoe.deal()).collect(),
        system,
    }
}

pub fn grade_count(scenario: &CountingScenario, answer: i32) -> CountGrade {
    let expected = counter::running_count_of(&scenario.cards, &scenario.system);
    CountGrade {
        correct: answer == expected,
        expected,
    }
}
