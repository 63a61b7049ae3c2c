use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::card::{Card, Rank};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CountingSystem {
    #[default]
    #[serde(rename = "Hi-Lo")]
    HiLo,
    #[serde(rename = "Hi-Opt I")]
    HiOptI,
    #[serde(rename = "Hi-Opt II")]
    HiOptII,
    #[serde(rename = "Omega II")]
    OmegaII,
    #[serde(rename = "KO (Knockout)")]
    Knockout,
    #[serde(rename = "Ace-Five")]
    AceFive,
    /// Tag per rank label (`"A"`, `"2"` .. `"K"`); missing ranks count 0.
    Custom(HashMap<String, i32>),
}

impl CountingSystem {
    pub fn tag(&self, rank: Rank) -> i32 {
        use Rank::*;
        match self {
            CountingSystem::HiLo => match rank {
                Two | Three | Four | Five | Six => 1,
                Seven | Eight | Nine => 0,
                _ => -1,
            },
            CountingSystem::HiOptI => match rank {
                Three | Four | Five | Six => 1,
                Ten | Jack | Queen | King => -1,
                _ => 0,
            },
            CountingSystem::HiOptII => match rank {
                Two | Three | Six | Seven => 1,
                Four | Five => 2,
                Ten | Jack | Queen | King => -2,
                _ => 0,
            },
            CountingSystem::OmegaII => match rank {
                Two | Three | Seven => 1,
                Four | Five | Six => 2,
                Nine => -1,
                Ten | Jack | Queen | King => -2,
                _ => 0,
            },
            CountingSystem::Knockout => match rank {
                Two | Three | Four | Five | Six | Seven => 1,
                Eight | Nine => 0,
                _ => -1,
            },
            CountingSystem::AceFive => match rank {
                Five => 1,
                Ace => -1,
                _ => 0,
            },
            CountingSystem::Custom(values) => values.get(rank.label()).copied().unwrap_or(0),
        }
    }
}

pub struct CardCounter {
    system: CountingSystem,
    running_count: i32,
}

impl CardCounter {
    pub fn new(system: CountingSystem) -> Self {
        CardCounter {
            system,
            running_count: 0,
        }
    }

    /// Face-down cards are not visible to the counter and are skipped.
    pub fn update(&mut self, card: &Card) {
        if card.is_face_down {
            return;
        }
        self.running_count += self.system.tag(card.rank);
    }

    pub fn reset(&mut self) {
        self.running_count = 0;
    }

    pub fn running_count(&self) -> i32 {
        self.running_count
    }

    pub fn true_count(&self, remaining_cards: usize, num_decks: u8) -> f64 {
        let remaining_decks = remaining_cards as f64 / 52.0;
        let decks = remaining_decks.max(0.5).min((num_decks as f64).max(0.5));
        self.running_count as f64 / decks
    }

    pub fn count_range(&self, remaining_cards: usize, num_decks: u8) -> i32 {
        self.true_count(remaining_cards, num_decks).round() as i32
    }
}

/// Running count of a sequence of visible cards under `system`.
pub fn running_count_of(cards: &[Card], system: &CountingSystem) -> i32 {
    let mut counter = CardCounter::new(system.clone());
    for card in cards {
        counter.update(card);
    }
    counter.running_count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;

    fn card(rank: Rank) -> Card {
        Card::new(rank, Suit::Hearts)
    }

    #[test]
    fn test_hi_lo_tags() {
        let cards = [
            card(Rank::Two),
            card(Rank::Six),
            card(Rank::Eight),
            card(Rank::King),
            card(Rank::Ace),
        ];
        assert_eq!(running_count_of(&cards, &CountingSystem::HiLo), 0);
        assert_eq!(running_count_of(&cards[..2], &CountingSystem::HiLo), 2);
    }

    #[test]
    fn test_hi_lo_full_deck_is_balanced() {
        let deck: Vec<Card> = Rank::ALL.iter().map(|&r| card(r)).collect();
        assert_eq!(running_count_of(&deck, &CountingSystem::HiLo), 0);
        assert_eq!(running_count_of(&deck, &CountingSystem::OmegaII), 0);
        // KO is unbalanced: +1 per suit
        assert_eq!(running_count_of(&deck, &CountingSystem::Knockout), 1);
    }

    #[test]
    fn test_face_down_cards_not_counted() {
        let mut counter = CardCounter::new(CountingSystem::HiLo);
        counter.update(&card(Rank::Five).face_down());
        assert_eq!(counter.running_count(), 0);
        counter.update(&card(Rank::Five));
        assert_eq!(counter.running_count(), 1);
    }

    #[test]
    fn test_true_count_divides_by_remaining_decks() {
        let mut counter = CardCounter::new(CountingSystem::HiLo);
        for _ in 0..6 {
            counter.update(&card(Rank::Four));
        }
        assert_eq!(counter.true_count(156, 6), 2.0);
        assert_eq!(counter.count_range(156, 6), 2);
        // remaining decks never drop below half a deck
        assert_eq!(counter.true_count(10, 6), 12.0);
    }

    #[test]
    fn test_custom_values() {
        let mut values = HashMap::new();
        values.insert("5".to_string(), 3);
        let system = CountingSystem::Custom(values);
        assert_eq!(system.tag(Rank::Five), 3);
        assert_eq!(system.tag(Rank::King), 0);
    }

    #[test]
    fn test_reset() {
        let mut counter = CardCounter::new(CountingSystem::HiLo);
        counter.update(&card(Rank::Three));
        counter.reset();
        assert_eq!(counter.running_count(), 0);
    }
}
