use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PayoutRule {
    #[default]
    #[serde(rename = "3:2")]
    ThreeToTwo,
    #[serde(rename = "6:5")]
    SixToFive,
}

impl PayoutRule {
    pub fn multiplier(&self) -> f64 {
        match self {
            PayoutRule::ThreeToTwo => 1.5,
            PayoutRule::SixToFive => 1.2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PayoutRule::ThreeToTwo => "3:2",
            PayoutRule::SixToFive => "6:5",
        }
    }
}

impl fmt::Display for PayoutRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
    Push,
    Blackjack,
    Surrender,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Loss => "loss",
            Outcome::Push => "push",
            Outcome::Blackjack => "blackjack",
            Outcome::Surrender => "surrender",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub amount: f64,
    /// Primary display text: the signed amount, or `PUSH`.
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    pub detail: String,
}

/// Settles one finished hand. `bust_caused` only matters for a loss, where
/// it decides whether the hand is labelled `BUST`.
pub fn settle(outcome: Outcome, bet: f64, rule: PayoutRule, bust_caused: bool) -> Settlement {
    let shown_bet = format_bet(bet);
    let (amount, secondary, detail) = match outcome {
        Outcome::Win => (bet, None, format!("1:1 Payout on ${shown_bet}")),
        Outcome::Blackjack => {
            let multiplier = rule.multiplier();
            let amount = bet * multiplier;
            (
                amount,
                Some("BLACKJACK!"),
                format!("${shown_bet} × {multiplier} ({rule}) = ${amount:.2}"),
            )
        }
        Outcome::Loss => (
            -bet,
            bust_caused.then_some("BUST"),
            format!("Lost ${shown_bet} bet"),
        ),
        Outcome::Push => (0.0, None, "Bet returned".to_string()),
        Outcome::Surrender => (
            -bet / 2.0,
            Some("SURRENDER"),
            format!("Lost half of ${shown_bet} bet"),
        ),
    };

    let label = match outcome {
        Outcome::Push => "PUSH".to_string(),
        _ => format_amount(amount),
    };

    Settlement {
        amount,
        label,
        secondary: secondary.map(str::to_string),
        detail,
    }
}

/// Settles an insurance side bet of `stake`, which pays 2:1 only against a
/// dealer natural.
pub fn settle_insurance(stake: f64, dealer_blackjack: bool) -> Settlement {
    let shown_stake = format_bet(stake);
    let (amount, detail) = if dealer_blackjack {
        (stake * 2.0, format!("Insurance pays 2:1 on ${shown_stake}"))
    } else {
        (-stake, format!("Lost ${shown_stake} insurance"))
    };
    Settlement {
        amount,
        label: format_amount(amount),
        secondary: Some("INSURANCE".to_string()),
        detail,
    }
}

/// Signed currency text: `+$X.XX`, `-$X.XX`, or `$0.00` for zero.
pub fn format_amount(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    if amount > 0.0 {
        format!("+${formatted}")
    } else if amount < 0.0 {
        format!("-${formatted}")
    } else {
        "$0.00".to_string()
    }
}

// Whole bets print without decimals, as the host's number formatting does.
fn format_bet(bet: f64) -> String {
    if bet.fract() == 0.0 && bet.abs() < 1e15 {
        format!("{}", bet as i64)
    } else {
        format!("{bet}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_pays_even_money() {
        let s = settle(Outcome::Win, 50.0, PayoutRule::ThreeToTwo, false);
        assert_eq!(s.amount, 50.0);
        assert_eq!(s.label, "+$50.00");
        assert_eq!(s.secondary, None);
        assert_eq!(s.detail, "1:1 Payout on $50");
    }

    #[test]
    fn test_blackjack_three_to_two() {
        let s = settle(Outcome::Blackjack, 50.0, PayoutRule::ThreeToTwo, false);
        assert_eq!(s.amount, 75.0);
        assert_eq!(s.label, "+$75.00");
        assert_eq!(s.secondary.as_deref(), Some("BLACKJACK!"));
        assert_eq!(s.detail, "$50 × 1.5 (3:2) = $75.00");
    }

    #[test]
    fn test_blackjack_six_to_five() {
        let s = settle(Outcome::Blackjack, 50.0, PayoutRule::SixToFive, false);
        assert!((s.amount - 60.0).abs() < 1e-9);
        assert_eq!(s.label, "+$60.00");
        assert_eq!(s.detail, "$50 × 1.2 (6:5) = $60.00");
    }

    #[test]
    fn test_surrender_loses_half() {
        let s = settle(Outcome::Surrender, 50.0, PayoutRule::SixToFive, false);
        assert_eq!(s.amount, -25.0);
        assert_eq!(s.label, "-$25.00");
        assert_eq!(s.secondary.as_deref(), Some("SURRENDER"));
        assert_eq!(s.detail, "Lost half of $50 bet");
    }

    #[test]
    fn test_push_shows_literal_label() {
        let s = settle(Outcome::Push, 50.0, PayoutRule::ThreeToTwo, false);
        assert_eq!(s.amount, 0.0);
        assert_eq!(s.label, "PUSH");
        assert_eq!(s.detail, "Bet returned");
    }

    #[test]
    fn test_loss_marks_bust_only_when_caused_by_bust() {
        let busted = settle(Outcome::Loss, 20.0, PayoutRule::ThreeToTwo, true);
        assert_eq!(busted.amount, -20.0);
        assert_eq!(busted.label, "-$20.00");
        assert_eq!(busted.secondary.as_deref(), Some("BUST"));

        let outdrawn = settle(Outcome::Loss, 20.0, PayoutRule::ThreeToTwo, false);
        assert_eq!(outdrawn.secondary, None);
        assert_eq!(outdrawn.detail, "Lost $20 bet");
    }

    #[test]
    fn test_bust_flag_ignored_for_other_outcomes() {
        let s = settle(Outcome::Win, 10.0, PayoutRule::ThreeToTwo, true);
        assert_eq!(s.secondary, None);
    }

    #[test]
    fn test_insurance_pays_two_to_one_on_dealer_natural() {
        let won = settle_insurance(5.0, true);
        assert_eq!(won.amount, 10.0);
        assert_eq!(won.label, "+$10.00");
        assert_eq!(won.secondary.as_deref(), Some("INSURANCE"));
        assert_eq!(won.detail, "Insurance pays 2:1 on $5");

        let lost = settle_insurance(12.5, false);
        assert_eq!(lost.amount, -12.5);
        assert_eq!(lost.label, "-$12.50");
        assert_eq!(lost.detail, "Lost $12.5 insurance");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(12.5), "+$12.50");
        assert_eq!(format_amount(-7.0), "-$7.00");
        assert_eq!(format_amount(0.0), "$0.00");
        assert_eq!(format_amount(-0.0), "$0.00");
    }

    #[test]
    fn test_fractional_bet_detail() {
        let s = settle(Outcome::Surrender, 12.5, PayoutRule::ThreeToTwo, false);
        assert_eq!(s.label, "-$6.25");
        assert_eq!(s.detail, "Lost half of $12.5 bet");
    }

    #[test]
    fn test_serialized_names() {
        assert_eq!(serde_json::to_string(&PayoutRule::SixToFive).unwrap(), r#""6:5""#);
        let outcome: Outcome = serde_json::from_str(r#""surrender""#).unwrap();
        assert_eq!(outcome, Outcome::Surrender);
    }
}
