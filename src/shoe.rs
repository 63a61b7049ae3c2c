use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};

use crate::card::{Card, Rank, Suit};

pub struct Shoe {
    pub num_decks: u8,
    cards: Vec<Card>,
    dealt: usize,
    penetration_threshold: u8,
    shuffles: u32,
    rng: SmallRng,
}

impl Shoe {
    pub fn new(num_decks: u8, penetration_threshold: u8, seed: u64) -> Self {
        let mut shoe = Shoe {
            num_decks: num_decks.max(1),
            cards: Vec::new(),
            dealt: 0,
            penetration_threshold,
            shuffles: 0,
            rng: SmallRng::seed_from_u64(seed),
        };
        shoe.shuffle();
        shoe
    }

    /// A shoe that deals `cards` in order before falling back to freshly
    /// shuffled decks.
    pub fn stacked(cards: Vec<Card>, num_decks: u8, seed: u64) -> Self {
        let mut shoe = Shoe::new(num_decks, 100, seed);
        shoe.cards = cards.into_iter().rev().collect();
        shoe
    }

    pub fn shuffle(&mut self) {
        self.cards.clear();
        for _ in 0..self.num_decks {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    self.cards.push(Card::new(rank, suit));
                }
            }
        }
        self.cards.shuffle(&mut self.rng);
        self.dealt = 0;
        self.shuffles = self.shuffles.wrapping_add(1);
        log::debug!("shuffled {} deck shoe", self.num_decks);
    }

    pub fn deal(&mut self) -> Card {
        if self.cards.is_empty() {
            self.shuffle();
        }
        let card = self.cards.pop().expect("shoe should not be empty");
        self.dealt += 1;
        card
    }

    /// Bumped on every shuffle, including the one `deal` does when the shoe
    /// runs dry.
    pub fn shuffles(&self) -> u32 {
        self.shuffles
    }

    pub fn remaining_cards(&self) -> usize {
        self.cards.len()
    }

    pub fn penetration(&self) -> f64 {
        let total = self.total_cards();
        if total == 0 {
            return 100.0;
        }
        (self.dealt as f64 / total as f64) * 100.0
    }

    pub fn needs_reshuffle(&self) -> bool {
        self.cards.is_empty() || self.penetration() >= self.penetration_threshold as f64
    }

    fn total_cards(&self) -> usize {
        (self.num_decks as usize) * 52
    }
}
