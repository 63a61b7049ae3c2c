use crate::error::ChipError;

pub const DEFAULT_DENOMINATIONS: [u32; 5] = [100, 25, 10, 5, 1];

/// Splits `amount` into chips, largest denomination first.
pub fn breakdown(amount: u32, denominations: &[u32]) -> Result<Vec<u32>, ChipError> {
    if denominations.contains(&0) {
        return Err(ChipError::ZeroDenomination);
    }
    let mut denoms = denominations.to_vec();
    denoms.sort_unstable_by(|a, b| b.cmp(a));
    denoms.dedup();

    let mut chips = Vec::new();
    let mut remaining = amount;
    for denom in denoms {
        while remaining >= denom {
            chips.push(denom);
            remaining -= denom;
        }
    }

    if remaining > 0 {
        return Err(ChipError::Unrepresentable { remainder: remaining });
    }
    Ok(chips)
}

/// Breakdown of a currency amount with the table's standard chips. Only whole
/// units are stacked; cents are dropped.
pub fn chips_for_bet(bet: f64) -> Result<Vec<u32>, ChipError> {
    if !bet.is_finite() || bet < 0.0 || bet > u32::MAX as f64 {
        return Err(ChipError::InvalidAmount);
    }
    breakdown(bet.floor() as u32, &DEFAULT_DENOMINATIONS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greedy_breakdown() {
        assert_eq!(breakdown(37, &[25, 10, 5, 1]).unwrap(), vec![25, 10, 1, 1]);
    }

    #[test]
    fn test_default_set() {
        assert_eq!(chips_for_bet(230.0).unwrap(), vec![100, 100, 25, 5]);
        assert_eq!(chips_for_bet(0.0).unwrap(), Vec::<u32>::new());
    }

    #[test]
    fn test_unordered_denominations_are_sorted() {
        assert_eq!(breakdown(16, &[1, 5, 10, 5]).unwrap(), vec![10, 5, 1]);
    }

    #[test]
    fn test_cents_dropped() {
        assert_eq!(chips_for_bet(12.75).unwrap(), vec![10, 1, 1]);
    }

    #[test]
    fn test_unrepresentable_remainder() {
        assert_eq!(
            breakdown(37, &[25, 10, 5]),
            Err(ChipError::Unrepresentable { remainder: 2 })
        );
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(breakdown(5, &[5, 0]), Err(ChipError::ZeroDenomination));
        assert_eq!(chips_for_bet(-1.0), Err(ChipError::InvalidAmount));
        assert_eq!(chips_for_bet(f64::NAN), Err(ChipError::InvalidAmount));
    }
}
