use serde::Serialize;

use crate::card::Card;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandValue {
    pub total: u16,
    pub is_soft: bool,
}

/// Best total of the hand: the highest value <= 21 reachable by counting
/// each Ace as 1 or 11, otherwise the smallest bust value. Face-down cards
/// are skipped unless `include_face_down` is set.
pub fn evaluate(hand: &[Card], include_face_down: bool) -> HandValue {
    let mut total: u16 = 0;
    let mut aces = 0;

    for card in hand {
        if card.is_face_down && !include_face_down {
            continue;
        }
        total = total.saturating_add(u16::from(card.value()));
        if card.rank.is_ace() {
            aces += 1;
        }
    }

    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    HandValue {
        total,
        is_soft: aces > 0,
    }
}

pub fn hand_total(hand: &[Card], include_face_down: bool) -> u16 {
    evaluate(hand, include_face_down).total
}

pub fn is_bust(hand: &[Card]) -> bool {
    hand_total(hand, true) > 21
}

pub fn is_blackjack(hand: &[Card]) -> bool {
    hand.len() == 2 && hand_total(hand, true) == 21
}

/// Two cards of the same point value; ten-valued cards pair with each other.
pub fn is_pair(hand: &[Card]) -> bool {
    hand.len() == 2 && hand[0].value() == hand[1].value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};
    use proptest::prelude::*;

    fn cards(ranks: &[Rank]) -> Vec<Card> {
        ranks.iter().map(|&r| Card::new(r, Suit::Spades)).collect()
    }

    #[test]
    fn test_empty_hand() {
        assert_eq!(evaluate(&[], false), HandValue { total: 0, is_soft: false });
    }

    #[test]
    fn test_two_aces_and_nine_is_soft_21() {
        let hand = cards(&[Rank::Ace, Rank::Ace, Rank::Nine]);
        assert_eq!(evaluate(&hand, false), HandValue { total: 21, is_soft: true });
    }

    #[test]
    fn test_ten_king_is_hard_20() {
        let hand = cards(&[Rank::Ten, Rank::King]);
        assert_eq!(evaluate(&hand, false), HandValue { total: 20, is_soft: false });
    }

    #[test]
    fn test_ace_king_is_blackjack() {
        let hand = cards(&[Rank::Ace, Rank::King]);
        assert_eq!(hand_total(&hand, false), 21);
        assert!(is_blackjack(&hand));
    }

    #[test]
    fn test_two_aces_and_ten_demotes_both() {
        let hand = cards(&[Rank::Ace, Rank::Ace, Rank::Ten]);
        assert_eq!(evaluate(&hand, false), HandValue { total: 12, is_soft: false });
    }

    #[test]
    fn test_three_card_21_is_not_blackjack() {
        let hand = cards(&[Rank::Seven, Rank::Seven, Rank::Seven]);
        assert_eq!(hand_total(&hand, false), 21);
        assert!(!is_blackjack(&hand));
    }

    #[test]
    fn test_bust_reports_minimal_total() {
        let hand = cards(&[Rank::King, Rank::Queen, Rank::Ace, Rank::Five]);
        assert_eq!(evaluate(&hand, false), HandValue { total: 26, is_soft: false });
        assert!(is_bust(&hand));
    }

    #[test]
    fn test_face_down_card_skipped_unless_requested() {
        let hand = vec![
            Card::new(Rank::Nine, Suit::Hearts).face_down(),
            Card::new(Rank::Ace, Suit::Clubs),
        ];
        assert_eq!(evaluate(&hand, false), HandValue { total: 11, is_soft: true });
        assert_eq!(evaluate(&hand, true), HandValue { total: 20, is_soft: true });
    }

    #[test]
    fn test_blackjack_counts_hole_card() {
        let hand = vec![
            Card::new(Rank::Ace, Suit::Hearts),
            Card::new(Rank::Jack, Suit::Clubs).face_down(),
        ];
        assert!(is_blackjack(&hand));
    }

    #[test]
    fn test_pairs_by_value() {
        assert!(is_pair(&cards(&[Rank::Eight, Rank::Eight])));
        assert!(is_pair(&cards(&[Rank::King, Rank::Ten])));
        assert!(!is_pair(&cards(&[Rank::Eight, Rank::Nine])));
        assert!(!is_pair(&cards(&[Rank::Eight, Rank::Eight, Rank::Two])));
    }

    #[test]
    fn test_long_hand_does_not_overflow() {
        let hand = cards(&[Rank::King; 26]);
        assert_eq!(evaluate(&hand, false), HandValue { total: 260, is_soft: false });

        let aces = cards(&[Rank::Ace; 30]);
        assert_eq!(evaluate(&aces, true), HandValue { total: 30, is_soft: false });
    }

    fn rank_strategy() -> impl Strategy<Value = Rank> {
        (0usize..13).prop_map(|i| Rank::ALL[i])
    }

    proptest! {
        #[test]
        fn prop_total_is_best_ace_assignment(
            ranks in prop::collection::vec(rank_strategy(), 0..40)
        ) {
            let hand = cards(&ranks);
            let hard: u32 = ranks
                .iter()
                .map(|r| if r.is_ace() { 1 } else { r.value() as u32 })
                .sum();
            let aces = ranks.iter().filter(|r| r.is_ace()).count() as u32;
            let candidates: Vec<u32> = (0..=aces).map(|high| hard + 10 * high).collect();
            let expected = candidates
                .iter()
                .copied()
                .filter(|&t| t <= 21)
                .max()
                .unwrap_or_else(|| candidates.iter().copied().min().unwrap_or(0));

            let value = evaluate(&hand, false);
            prop_assert_eq!(value.total as u32, expected);
            // soft iff some Ace is still counted high
            prop_assert_eq!(value.is_soft, value.total as u32 > hard);
            prop_assert_eq!(evaluate(&hand, false), value);
        }
    }
}
