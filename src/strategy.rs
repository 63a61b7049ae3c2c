use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{card::Card, error::ConfigError, hand};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyInput {
    #[serde(default)]
    pub count_based: Option<bool>,
    pub hard: serde_json::Value,
    pub soft: serde_json::Value,
    pub pairs: serde_json::Value,
    #[serde(default)]
    pub hard_by_count: serde_json::Value,
    #[serde(default)]
    pub soft_by_count: serde_json::Value,
    #[serde(default)]
    pub pairs_by_count: serde_json::Value,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Hit,
    Stand,
    Double,
    Split,
}

/// Resolves a table code. `D` falls back to a hit and `Ds` to a stand when
/// doubling is not allowed.
fn resolve_code(code: &str, can_double: bool) -> Action {
    match code {
        "S" => Action::Stand,
        "P" => Action::Split,
        "D" if can_double => Action::Double,
        "Ds" if can_double => Action::Double,
        "Ds" => Action::Stand,
        _ => Action::Hit,
    }
}

type StrategyTable = HashMap<String, HashMap<String, String>>;
type StrategyCountTable = HashMap<String, StrategyTable>;

const DEALER_COLUMNS: [&str; 10] = ["2", "3", "4", "5", "6", "7", "8", "9", "10", "A"];

// Multi-deck, dealer stands on soft 17, double after split allowed.
const BASIC_HARD: &[(&str, &str)] = &[
    ("5", "H H H H H H H H H H"),
    ("6", "H H H H H H H H H H"),
    ("7", "H H H H H H H H H H"),
    ("8", "H H H H H H H H H H"),
    ("9", "H D D D D H H H H H"),
    ("10", "D D D D D D D D H H"),
    ("11", "D D D D D D D D D H"),
    ("12", "H H S S S H H H H H"),
    ("13", "S S S S S H H H H H"),
    ("14", "S S S S S H H H H H"),
    ("15", "S S S S S H H H H H"),
    ("16", "S S S S S H H H H H"),
    ("17", "S S S S S S S S S S"),
    ("18", "S S S S S S S S S S"),
    ("19", "S S S S S S S S S S"),
    ("20", "S S S S S S S S S S"),
    ("21", "S S S S S S S S S S"),
];

const BASIC_SOFT: &[(&str, &str)] = &[
    ("12", "H H H H H H H H H H"),
    ("13", "H H H D D H H H H H"),
    ("14", "H H H D D H H H H H"),
    ("15", "H H D D D H H H H H"),
    ("16", "H H D D D H H H H H"),
    ("17", "H D D D D H H H H H"),
    ("18", "S Ds Ds Ds Ds S S H H H"),
    ("19", "S S S S S S S S S S"),
    ("20", "S S S S S S S S S S"),
    ("21", "S S S S S S S S S S"),
];

// Keyed by the point value of one card of the pair.
const BASIC_PAIRS: &[(&str, &str)] = &[
    ("2", "P P P P P P H H H H"),
    ("3", "P P P P P P H H H H"),
    ("4", "H H H P P H H H H H"),
    ("5", "D D D D D D D D H H"),
    ("6", "P P P P P H H H H H"),
    ("7", "P P P P P P H H H H"),
    ("8", "P P P P P P P P P P"),
    ("9", "P P P P P S P P S S"),
    ("10", "S S S S S S S S S S"),
    ("11", "P P P P P P P P P P"),
];

pub struct Strategy {
    count_based: bool,
    hard: StrategyTable,
    soft: StrategyTable,
    pairs: StrategyTable,
    hard_by_count: StrategyCountTable,
    soft_by_count: StrategyCountTable,
    pairs_by_count: StrategyCountTable,
}

impl Strategy {
    pub fn basic() -> Self {
        Strategy {
            count_based: false,
            hard: rows_to_table(BASIC_HARD),
            soft: rows_to_table(BASIC_SOFT),
            pairs: rows_to_table(BASIC_PAIRS),
            hard_by_count: HashMap::new(),
            soft_by_count: HashMap::new(),
            pairs_by_count: HashMap::new(),
        }
    }

    pub fn from_input(input: StrategyInput) -> Result<Self, ConfigError> {
        Ok(Strategy {
            count_based: input.count_based.unwrap_or(false),
            hard: value_to_table(input.hard)?,
            soft: value_to_table(input.soft)?,
            pairs: value_to_table(input.pairs)?,
            hard_by_count: value_to_count_table(input.hard_by_count)?,
            soft_by_count: value_to_count_table(input.soft_by_count)?,
            pairs_by_count: value_to_count_table(input.pairs_by_count)?,
        })
    }

    /// Recommended play for a player hand against the dealer's upcard.
    pub fn recommend(
        &self,
        cards: &[Card],
        dealer_up: &Card,
        can_double: bool,
        can_split: bool,
        count: i32,
    ) -> Action {
        let label = player_label(cards, can_split);
        self.decide_action(&label, dealer_label(dealer_up), can_double, can_split, count)
    }

    pub fn decide_action(
        &self,
        player_label: &str,
        dealer: &str,
        can_double: bool,
        can_split: bool,
        count: i32,
    ) -> Action {
        let pair_key = if can_split {
            pair_key_from_label(player_label)
        } else {
            None
        };
        if self.count_based && count != 0 {
            let count_key = count.to_string();
            if let Some(action) = self.lookup_count_action(
                &count_key,
                player_label,
                pair_key.as_deref(),
                dealer,
                can_double,
            ) {
                return action;
            }
        }

        if let Some(key) = pair_key.as_deref() {
            if let Some(action) = lookup_action_map(&self.pairs, key, dealer, can_double) {
                return action;
            }
        }

        // a pair we may not split is played on its total
        let total_label = if pair_key.is_none() && player_label.contains(',') {
            pair_label_total(player_label)
        } else {
            None
        };
        let label = total_label.as_deref().unwrap_or(player_label);

        self.lookup_soft_or_hard(label, dealer, can_double)
            .unwrap_or_else(|| default_action(label))
    }

    fn lookup_count_action(
        &self,
        count_key: &str,
        player_label: &str,
        pair_key: Option<&str>,
        dealer: &str,
        can_double: bool,
    ) -> Option<Action> {
        if let Some(key) = pair_key {
            if let Some(action) =
                lookup_action(&self.pairs_by_count, count_key, key, dealer, can_double)
            {
                return Some(action);
            }
        }

        let soft = player_label
            .strip_prefix('S')
            .and_then(|key| lookup_action(&self.soft_by_count, count_key, key, dealer, can_double));
        soft.or_else(|| {
            lookup_action(&self.hard_by_count, count_key, player_label, dealer, can_double)
        })
    }

    fn lookup_soft_or_hard(
        &self,
        player_label: &str,
        dealer: &str,
        can_double: bool,
    ) -> Option<Action> {
        if let Some(key) = player_label.strip_prefix('S') {
            let soft_result = lookup_action_map(&self.soft, key, dealer, can_double);
            if soft_result.is_some() {
                return soft_result;
            }
            return lookup_action_map(&self.hard, key, dealer, can_double);
        }
        lookup_action_map(&self.hard, player_label, dealer, can_double)
    }
}

/// Table row label: `"8,8"` for a splittable pair, `"S18"` for soft totals,
/// plain totals otherwise.
pub fn player_label(cards: &[Card], splittable: bool) -> String {
    if splittable && hand::is_pair(cards) {
        let symbol = cards[0].value().to_string();
        return format!("{symbol},{symbol}");
    }
    let value = hand::evaluate(cards, true);
    if value.is_soft {
        format!("S{}", value.total)
    } else {
        value.total.to_string()
    }
}

pub fn dealer_label(card: &Card) -> &'static str {
    match card.value() {
        11 => "A",
        2 => "2",
        3 => "3",
        4 => "4",
        5 => "5",
        6 => "6",
        7 => "7",
        8 => "8",
        9 => "9",
        _ => "10",
    }
}

fn lookup_action_map(
    table: &StrategyTable,
    key: &str,
    dealer: &str,
    can_double: bool,
) -> Option<Action> {
    let code = table.get(key)?.get(dealer)?;
    Some(resolve_code(code, can_double))
}

fn lookup_action(
    count_table: &StrategyCountTable,
    count_key: &str,
    label: &str,
    dealer: &str,
    can_double: bool,
) -> Option<Action> {
    count_table
        .get(count_key)
        .and_then(|table| lookup_action_map(table, label, dealer, can_double))
}

fn card_value_from_rank(rank: &str) -> Option<u8> {
    match rank {
        "A" => Some(11),
        "K" | "Q" | "J" | "10" => Some(10),
        _ => rank.parse::<u8>().ok(),
    }
}

fn pair_key_from_label(label: &str) -> Option<String> {
    let (first, second) = label.split_once(',')?;
    let first = first.trim();
    if first != second.trim() {
        return None;
    }
    card_value_from_rank(first).map(|value| value.to_string())
}

fn pair_label_total(label: &str) -> Option<String> {
    let value = card_value_from_rank(label.split_once(',')?.0.trim())?;
    Some(if value == 11 {
        "S12".to_string()
    } else {
        (value * 2).to_string()
    })
}

fn rows_to_table(rows: &[(&str, &str)]) -> StrategyTable {
    rows.iter()
        .map(|(total, codes)| {
            let row = DEALER_COLUMNS
                .iter()
                .zip(codes.split_whitespace())
                .map(|(dealer, code)| (dealer.to_string(), code.to_string()))
                .collect();
            (total.to_string(), row)
        })
        .collect()
}

fn value_to_table(value: serde_json::Value) -> Result<StrategyTable, ConfigError> {
    let mut table = HashMap::new();
    let obj = value
        .as_object()
        .ok_or_else(|| ConfigError::Strategy("strategy table must be an object".to_string()))?;
    for (key, row_value) in obj {
        let row_obj = row_value
            .as_object()
            .ok_or_else(|| ConfigError::Strategy(format!("strategy row {key} must be an object")))?;
        let mut row = HashMap::new();
        for (dealer, action) in row_obj {
            if let Some(action_str) = action.as_str() {
                row.insert(dealer.clone(), action_str.to_string());
            }
        }
        table.insert(key.clone(), row);
    }
    Ok(table)
}

fn value_to_count_table(value: serde_json::Value) -> Result<StrategyCountTable, ConfigError> {
    if value.is_null() {
        return Ok(HashMap::new());
    }
    let mut table = HashMap::new();
    let obj = value
        .as_object()
        .ok_or_else(|| ConfigError::Strategy("count table must be an object".to_string()))?;
    for (count, inner) in obj {
        table.insert(count.clone(), value_to_table(inner.clone())?);
    }
    Ok(table)
}

fn default_action(player_label: &str) -> Action {
    if player_label.starts_with('S') {
        return Action::Stand;
    }
    match player_label.parse::<i32>() {
        Ok(total) if total < 17 => Action::Hit,
        Ok(_) => Action::Stand,
        Err(_) => Action::Hit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};

    fn c(rank: Rank) -> Card {
        Card::new(rank, Suit::Diamonds)
    }

    fn basic(player: &[Rank], dealer: Rank) -> Action {
        let cards: Vec<Card> = player.iter().map(|&r| c(r)).collect();
        Strategy::basic().recommend(&cards, &c(dealer), cards.len() == 2, true, 0)
    }

    #[test]
    fn test_hard_totals() {
        assert_eq!(basic(&[Rank::Ten, Rank::Six], Rank::Ten), Action::Hit);
        assert_eq!(basic(&[Rank::Ten, Rank::Six], Rank::Six), Action::Stand);
        assert_eq!(basic(&[Rank::Ten, Rank::Two], Rank::Two), Action::Hit);
        assert_eq!(basic(&[Rank::Six, Rank::Five], Rank::Ten), Action::Double);
        assert_eq!(basic(&[Rank::Ten, Rank::Seven], Rank::Ace), Action::Stand);
    }

    #[test]
    fn test_double_falls_back_to_hit_after_three_cards() {
        assert_eq!(basic(&[Rank::Two, Rank::Four, Rank::Five], Rank::Six), Action::Hit);
    }

    #[test]
    fn test_soft_totals() {
        assert_eq!(basic(&[Rank::Ace, Rank::Seven], Rank::Two), Action::Stand);
        assert_eq!(basic(&[Rank::Ace, Rank::Seven], Rank::Five), Action::Double);
        assert_eq!(basic(&[Rank::Ace, Rank::Seven], Rank::Nine), Action::Hit);
        // soft 18 that cannot double stands
        assert_eq!(basic(&[Rank::Ace, Rank::Two, Rank::Five], Rank::Five), Action::Stand);
    }

    #[test]
    fn test_pairs() {
        assert_eq!(basic(&[Rank::Eight, Rank::Eight], Rank::Ten), Action::Split);
        assert_eq!(basic(&[Rank::Ace, Rank::Ace], Rank::Six), Action::Split);
        assert_eq!(basic(&[Rank::King, Rank::Queen], Rank::Six), Action::Stand);
        assert_eq!(basic(&[Rank::Nine, Rank::Nine], Rank::Seven), Action::Stand);
    }

    #[test]
    fn test_unsplittable_pair_plays_total() {
        let cards = vec![c(Rank::Eight), c(Rank::Eight)];
        let action = Strategy::basic().recommend(&cards, &c(Rank::Ten), true, false, 0);
        assert_eq!(action, Action::Hit);
        let aces = vec![c(Rank::Ace), c(Rank::Ace)];
        let action = Strategy::basic().recommend(&aces, &c(Rank::Six), false, false, 0);
        assert_eq!(action, Action::Hit);
    }

    #[test]
    fn test_labels() {
        assert_eq!(player_label(&[c(Rank::Ace), c(Rank::Six)], false), "S17");
        assert_eq!(player_label(&[c(Rank::Jack), c(Rank::King)], true), "10,10");
        assert_eq!(player_label(&[c(Rank::Jack), c(Rank::King)], false), "20");
        assert_eq!(dealer_label(&c(Rank::Queen)), "10");
        assert_eq!(dealer_label(&c(Rank::Ace)), "A");
    }

    #[test]
    fn test_count_table_overrides() {
        let input: StrategyInput = serde_json::from_value(serde_json::json!({
            "count_based": true,
            "hard": { "16": { "10": "H" } },
            "soft": {},
            "pairs": {},
            "hard_by_count": { "1": { "16": { "10": "S" } } }
        }))
        .unwrap();
        let strategy = Strategy::from_input(input).unwrap();
        assert_eq!(strategy.decide_action("16", "10", false, false, 0), Action::Hit);
        assert_eq!(strategy.decide_action("16", "10", false, false, 1), Action::Stand);
    }

    #[test]
    fn test_bad_table_rejected() {
        let input: StrategyInput = serde_json::from_value(serde_json::json!({
            "hard": [], "soft": {}, "pairs": {}
        }))
        .unwrap();
        assert!(Strategy::from_input(input).is_err());
    }
}
