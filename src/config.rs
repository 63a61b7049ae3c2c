use serde::{Deserialize, Serialize};

use crate::{counter::CountingSystem, error::ConfigError, payout::PayoutRule};

fn default_decks() -> u8 {
    6
}

fn default_penetration() -> u8 {
    75
}

fn default_true() -> bool {
    true
}

fn default_max_splits() -> u8 {
    3
}

fn default_min_bet() -> f64 {
    5.0
}

fn default_max_bet() -> f64 {
    1000.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRules {
    #[serde(default)]
    pub payout_rule: PayoutRule,
    #[serde(default = "default_decks")]
    pub decks: u8,
    /// Percentage of the shoe dealt before it is reshuffled.
    #[serde(default = "default_penetration")]
    pub penetration: u8,
    #[serde(default)]
    pub dealer_hits_soft_17: bool,
    #[serde(default = "default_true")]
    pub dealer_peeks: bool,
    #[serde(default = "default_true")]
    pub double_after_split: bool,
    #[serde(default = "default_true")]
    pub allow_surrender: bool,
    /// Insurance (even money on a natural) when the dealer shows an Ace.
    #[serde(default = "default_true")]
    pub offer_insurance: bool,
    #[serde(default = "default_max_splits")]
    pub max_splits: u8,
    #[serde(default = "default_min_bet")]
    pub min_bet: f64,
    #[serde(default = "default_max_bet")]
    pub max_bet: f64,
    #[serde(default)]
    pub counting_system: CountingSystem,
}

impl Default for TableRules {
    fn default() -> Self {
        TableRules {
            payout_rule: PayoutRule::ThreeToTwo,
            decks: default_decks(),
            penetration: default_penetration(),
            dealer_hits_soft_17: false,
            dealer_peeks: true,
            double_after_split: true,
            allow_surrender: true,
            offer_insurance: true,
            max_splits: default_max_splits(),
            min_bet: default_min_bet(),
            max_bet: default_max_bet(),
            counting_system: CountingSystem::HiLo,
        }
    }
}

impl TableRules {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.decks == 0 {
            return Err(ConfigError::NoDecks);
        }
        if self.penetration == 0 || self.penetration > 100 {
            return Err(ConfigError::Penetration(self.penetration));
        }
        let limits_ok = self.min_bet.is_finite()
            && self.max_bet.is_finite()
            && self.min_bet > 0.0
            && self.min_bet <= self.max_bet;
        if !limits_ok {
            return Err(ConfigError::BetLimits {
                min: self.min_bet,
                max: self.max_bet,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PracticeMode {
    #[default]
    Audition,
    CardCounting,
    ChipPayout,
    PitProRite,
    HitStand,
    DealerTalk,
    VirginiaRules,
}

/// Trainer state owned by the host page. The host persists it (e.g. in
/// `localStorage`) and hands it back in; nothing here is global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerSettings {
    #[serde(default)]
    pub has_seen_tutorial: bool,
    #[serde(default)]
    pub active_mode: PracticeMode,
}

impl TrainerSettings {
    pub fn should_show_tutorial(&self) -> bool {
        !self.has_seen_tutorial
    }

    pub fn mark_tutorial_seen(self) -> Self {
        TrainerSettings {
            has_seen_tutorial: true,
            ..self
        }
    }

    pub fn with_mode(self, mode: PracticeMode) -> Self {
        TrainerSettings {
            active_mode: mode,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let rules: TableRules = serde_json::from_str("{}").unwrap();
        assert_eq!(rules, TableRules::default());
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_partial_rules() {
        let json = r#"{"payoutRule":"6:5","decks":2,"dealerHitsSoft17":true}"#;
        let rules: TableRules = serde_json::from_str(json).unwrap();
        assert_eq!(rules.payout_rule, PayoutRule::SixToFive);
        assert_eq!(rules.decks, 2);
        assert!(rules.dealer_hits_soft_17);
        assert_eq!(rules.min_bet, 5.0);
    }

    #[test]
    fn test_validate_rejects_bad_rules() {
        let no_decks = TableRules { decks: 0, ..TableRules::default() };
        assert_eq!(no_decks.validate(), Err(ConfigError::NoDecks));

        let penetration = TableRules { penetration: 120, ..TableRules::default() };
        assert_eq!(penetration.validate(), Err(ConfigError::Penetration(120)));

        let limits = TableRules { min_bet: 50.0, max_bet: 10.0, ..TableRules::default() };
        assert!(matches!(limits.validate(), Err(ConfigError::BetLimits { .. })));
    }

    #[test]
    fn test_tutorial_flag_is_injected() {
        let fresh = TrainerSettings::default();
        assert!(fresh.should_show_tutorial());
        let seen = fresh.mark_tutorial_seen();
        assert!(!seen.should_show_tutorial());
        assert_eq!(seen.active_mode, PracticeMode::Audition);
    }

    #[test]
    fn test_switching_mode_keeps_tutorial_flag() {
        let seen = TrainerSettings::default().mark_tutorial_seen();
        let counting = seen.with_mode(PracticeMode::CardCounting);
        assert_eq!(counting.active_mode, PracticeMode::CardCounting);
        assert!(!counting.should_show_tutorial());
    }

    #[test]
    fn test_practice_mode_names() {
        let settings: TrainerSettings =
            serde_json::from_str(r#"{"hasSeenTutorial":true,"activeMode":"hitStand"}"#).unwrap();
        assert_eq!(settings.active_mode, PracticeMode::HitStand);
        assert_eq!(
            serde_json::to_string(&PracticeMode::PitProRite).unwrap(),
            r#""pitProRite""#
        );
    }
}
