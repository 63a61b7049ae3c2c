use serde::{Deserialize, Serialize};

use crate::{
    card::Card,
    config::TableRules,
    counter::CardCounter,
    error::{BetError, ConfigError, Error, Result},
    hand::{self, HandValue},
    payout::{self, Outcome, PayoutRule, Settlement},
    shoe::Shoe,
    strategy::{Action, Strategy},
};

pub const MAX_SEATS: usize = 7;

fn default_bankroll() -> f64 {
    1000.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoundPhase {
    Betting,
    Insurance,
    PlayerTurn,
    DealerTurn,
    Settled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum HandState {
    Betting,
    Active,
    Doubled,
    SplitPending,
    Busted,
    Stood,
    Surrendered,
    Settled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionFlags {
    pub can_hit: bool,
    pub can_stand: bool,
    pub can_double_down: bool,
    pub can_split: bool,
    pub can_surrender: bool,
}

#[derive(Debug, Clone)]
pub struct PlayerHand {
    pub cards: Vec<Card>,
    pub bet: f64,
    pub state: HandState,
    pub from_split: bool,
    pub doubled: bool,
    pub busted: bool,
    pub natural: bool,
    pub outcome: Option<Outcome>,
    pub settlement: Option<Settlement>,
}

impl PlayerHand {
    fn new(bet: f64) -> Self {
        PlayerHand {
            cards: Vec::new(),
            bet,
            state: HandState::Betting,
            from_split: false,
            doubled: false,
            busted: false,
            natural: false,
            outcome: None,
            settlement: None,
        }
    }

    pub fn value(&self) -> HandValue {
        hand::evaluate(&self.cards, true)
    }

    pub fn is_finished(&self) -> bool {
        self.state == HandState::Settled
    }

    fn awaiting_play(&self) -> bool {
        matches!(self.state, HandState::Active | HandState::SplitPending)
    }

    /// Hit, double and split all end here: bust, auto-stand on 21, or stay active.
    fn after_card(&mut self) {
        let total = self.value().total;
        if total > 21 {
            self.busted = true;
            self.state = HandState::Busted;
        } else if total == 21 || self.state == HandState::Doubled {
            self.state = HandState::Stood;
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatConfig {
    pub id: u32,
    #[serde(default)]
    pub payout_rule: Option<PayoutRule>,
    #[serde(default = "default_bankroll")]
    pub bankroll: f64,
    #[serde(default)]
    pub is_auto: bool,
}

#[derive(Debug, Clone)]
pub struct Seat {
    pub id: u32,
    pub payout_rule: PayoutRule,
    pub bankroll: f64,
    pub is_auto: bool,
    pub bet: f64,
    pub bet_error: Option<String>,
    pub hands: Vec<PlayerHand>,
    /// Insurance stake, half the original bet, when taken.
    pub insurance: Option<f64>,
    pub insurance_settlement: Option<Settlement>,
    active_hand: usize,
}

impl Seat {
    fn new(config: SeatConfig, rules: &TableRules) -> Self {
        Seat {
            id: config.id,
            payout_rule: config.payout_rule.unwrap_or(rules.payout_rule),
            bankroll: config.bankroll,
            is_auto: config.is_auto,
            bet: 0.0,
            bet_error: None,
            hands: Vec::new(),
            insurance: None,
            insurance_settlement: None,
            active_hand: 0,
        }
    }

    pub fn active_hand(&self) -> usize {
        self.active_hand
    }

    fn committed(&self) -> f64 {
        let bets = if self.hands.is_empty() {
            self.bet
        } else {
            self.hands.iter().map(|h| h.bet).sum()
        };
        bets + self.insurance.unwrap_or(0.0)
    }

    /// Bankroll not yet committed to a hand in play.
    pub fn available(&self) -> f64 {
        self.bankroll - self.committed()
    }

    pub fn flags(&self, hand_index: usize, rules: &TableRules) -> ActionFlags {
        let Some(hand) = self.hands.get(hand_index) else {
            return ActionFlags::default();
        };
        if hand.state != HandState::Active {
            return ActionFlags::default();
        }
        let two_cards = hand.cards.len() == 2;
        let covers_bet = self.available() >= hand.bet;
        ActionFlags {
            can_hit: hand.value().total < 21,
            can_stand: true,
            can_double_down: two_cards
                && covers_bet
                && (!hand.from_split || rules.double_after_split),
            can_split: hand::is_pair(&hand.cards)
                && covers_bet
                && self.hands.len() <= rules.max_splits as usize,
            can_surrender: rules.allow_surrender
                && two_cards
                && !hand.from_split
                && self.hands.len() == 1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub id: u32,
    pub hand_index: usize,
    pub hand: Vec<Card>,
    pub bet: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bet_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    pub is_busted: bool,
    pub has_blackjack: bool,
    pub can_hit: bool,
    pub can_stand: bool,
    pub can_double_down: bool,
    pub can_split: bool,
    pub can_surrender: bool,
    pub is_finished: bool,
    pub has_doubled_down: bool,
    pub has_split: bool,
    pub has_insurance: bool,
    pub payout_rule: PayoutRule,
    pub is_auto: bool,
    pub is_current: bool,
    pub state: HandState,
    pub hand_value: HandValue,
    pub bankroll: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement: Option<Settlement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance_settlement: Option<Settlement>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerView {
    pub hand: Vec<Card>,
    /// Face-up cards only.
    pub hand_value: HandValue,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub phase: RoundPhase,
    pub is_insurance_offered: bool,
    pub dealer: DealerView,
    pub players: Vec<PlayerView>,
    pub running_count: i32,
    pub true_count: f64,
    pub cards_remaining: usize,
}

pub struct Round {
    rules: TableRules,
    shoe: Shoe,
    counter: CardCounter,
    strategy: Strategy,
    seats: Vec<Seat>,
    dealer: Vec<Card>,
    phase: RoundPhase,
    current: usize,
}

impl Round {
    pub fn new(rules: TableRules, seats: Vec<SeatConfig>, seed: u64) -> Result<Self> {
        let shoe = Shoe::new(rules.decks, rules.penetration, seed);
        Self::with_shoe(rules, seats, shoe)
    }

    pub fn with_shoe(rules: TableRules, seats: Vec<SeatConfig>, shoe: Shoe) -> Result<Self> {
        rules.validate()?;
        if seats.is_empty() || seats.len() > MAX_SEATS {
            return Err(ConfigError::SeatCount {
                got: seats.len(),
                max: MAX_SEATS,
            }
            .into());
        }
        for (i, seat) in seats.iter().enumerate() {
            if seats[..i].iter().any(|other| other.id == seat.id) {
                return Err(ConfigError::DuplicateSeat(seat.id).into());
            }
        }

        let seats = seats.into_iter().map(|config| Seat::new(config, &rules)).collect();
        Ok(Round {
            counter: CardCounter::new(rules.counting_system.clone()),
            strategy: Strategy::basic(),
            rules,
            shoe,
            seats,
            dealer: Vec::new(),
            phase: RoundPhase::Betting,
            current: 0,
        })
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn rules(&self) -> &TableRules {
        &self.rules
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn dealer(&self) -> &[Card] {
        &self.dealer
    }

    /// Id of the seat whose decision is awaited.
    pub fn current_seat(&self) -> Option<u32> {
        if !matches!(self.phase, RoundPhase::Insurance | RoundPhase::PlayerTurn) {
            return None;
        }
        self.seats.get(self.current).map(|seat| seat.id)
    }

    pub fn running_count(&self) -> i32 {
        self.counter.running_count()
    }

    pub fn true_count(&self) -> f64 {
        self.counter
            .true_count(self.shoe.remaining_cards(), self.shoe.num_decks)
    }

    pub fn place_bet(&mut self, seat_id: u32, input: &str) -> Result<f64> {
        self.expect_phase(RoundPhase::Betting)?;
        let seat_index = self.seat_index(seat_id)?;
        let (min, max) = (self.rules.min_bet, self.rules.max_bet);
        let seat = &mut self.seats[seat_index];

        match validate_bet(input, min, max, seat.bankroll) {
            Ok(amount) => {
                seat.bet = amount;
                seat.bet_error = None;
                log::debug!("seat {seat_id} bets {amount}");
                Ok(amount)
            }
            Err(err) => {
                seat.bet = 0.0;
                seat.bet_error = Some(err.to_string());
                log::warn!("seat {seat_id} bet rejected: {err}");
                Err(err.into())
            }
        }
    }

    pub fn deal(&mut self) -> Result<()> {
        self.expect_phase(RoundPhase::Betting)?;
        if let Some(seat) = self.seats.iter().find(|s| s.bet <= 0.0 || s.bet_error.is_some()) {
            return Err(Error::MissingBet(seat.id));
        }
        if self.shoe.needs_reshuffle() {
            self.shoe.shuffle();
            self.counter.reset();
        }

        for seat in &mut self.seats {
            seat.hands = vec![PlayerHand::new(seat.bet)];
            seat.insurance = None;
            seat.insurance_settlement = None;
            seat.active_hand = 0;
        }
        for pass in 0..2 {
            for i in 0..self.seats.len() {
                let card = self.draw();
                self.seats[i].hands[0].cards.push(card);
            }
            let dealer_card = if pass == 0 {
                self.draw()
            } else {
                self.draw_uncounted().face_down()
            };
            self.dealer.push(dealer_card);
        }

        for seat in &mut self.seats {
            let hand = &mut seat.hands[0];
            hand.state = HandState::Active;
            if hand::is_blackjack(&hand.cards) {
                hand.natural = true;
                hand.state = HandState::Stood;
            }
        }
        self.current = 0;
        log::debug!("dealt round, dealer shows {}", self.dealer[0].to_display());

        if self.rules.offer_insurance && self.dealer[0].rank.is_ace() {
            self.phase = RoundPhase::Insurance;
            self.advance_insurance();
        } else {
            self.peek_or_play();
        }
        Ok(())
    }

    /// Takes insurance for half the seat's bet. On a natural this is the
    /// even-money offer.
    pub fn accept_insurance(&mut self, seat_id: u32) -> Result<()> {
        self.expect_phase(RoundPhase::Insurance)?;
        let seat_index = self.turn_seat(seat_id)?;
        let seat = &mut self.seats[seat_index];
        let stake = seat.hands[0].bet / 2.0;
        if seat.available() < stake {
            log::warn!("seat {seat_id} cannot cover insurance of {stake}");
            return Err(Error::IllegalAction {
                action: "take insurance",
                reason: "needs bankroll to cover half the bet",
            });
        }
        seat.insurance = Some(stake);
        log::debug!("seat {seat_id} takes insurance for {stake}");
        self.current += 1;
        self.advance_insurance();
        Ok(())
    }

    pub fn decline_insurance(&mut self, seat_id: u32) -> Result<()> {
        self.expect_phase(RoundPhase::Insurance)?;
        self.turn_seat(seat_id)?;
        log::debug!("seat {seat_id} declines insurance");
        self.current += 1;
        self.advance_insurance();
        Ok(())
    }

    pub fn hit(&mut self, seat_id: u32) -> Result<()> {
        self.act(seat_id, Action::Hit)
    }

    pub fn stand(&mut self, seat_id: u32) -> Result<()> {
        self.act(seat_id, Action::Stand)
    }

    pub fn double_down(&mut self, seat_id: u32) -> Result<()> {
        self.act(seat_id, Action::Double)
    }

    pub fn split(&mut self, seat_id: u32) -> Result<()> {
        self.act(seat_id, Action::Split)
    }

    pub fn surrender(&mut self, seat_id: u32) -> Result<()> {
        self.expect_phase(RoundPhase::PlayerTurn)?;
        let seat_index = self.turn_seat(seat_id)?;
        let hand_index = self.seats[seat_index].active_hand;
        if !self.seats[seat_index].flags(hand_index, &self.rules).can_surrender {
            log::warn!("seat {seat_id} tried an illegal surrender");
            return Err(Error::IllegalAction {
                action: "surrender",
                reason: "only allowed as the first decision on the original two cards",
            });
        }
        self.seats[seat_index].hands[hand_index].state = HandState::Surrendered;
        log::debug!("seat {seat_id} surrenders");
        self.advance();
        Ok(())
    }

    pub fn next_round(&mut self) -> Result<()> {
        self.expect_phase(RoundPhase::Settled)?;
        for seat in &mut self.seats {
            seat.hands.clear();
            seat.bet = 0.0;
            seat.bet_error = None;
            seat.insurance = None;
            seat.insurance_settlement = None;
            seat.active_hand = 0;
        }
        self.dealer.clear();
        self.current = 0;
        self.phase = RoundPhase::Betting;
        if self.shoe.needs_reshuffle() {
            self.shoe.shuffle();
            self.counter.reset();
        }
        Ok(())
    }

    pub fn snapshot(&self) -> TableView {
        let mut players = Vec::new();
        for (seat_index, seat) in self.seats.iter().enumerate() {
            if seat.hands.is_empty() {
                players.push(PlayerView {
                    id: seat.id,
                    hand_index: 0,
                    hand: Vec::new(),
                    bet: seat.bet,
                    bet_error: seat.bet_error.clone(),
                    outcome: None,
                    is_busted: false,
                    has_blackjack: false,
                    can_hit: false,
                    can_stand: false,
                    can_double_down: false,
                    can_split: false,
                    can_surrender: false,
                    is_finished: false,
                    has_doubled_down: false,
                    has_split: false,
                    has_insurance: false,
                    payout_rule: seat.payout_rule,
                    is_auto: seat.is_auto,
                    is_current: false,
                    state: HandState::Betting,
                    hand_value: hand::evaluate(&[], false),
                    bankroll: seat.bankroll,
                    settlement: None,
                    insurance_settlement: None,
                });
                continue;
            }
            for (hand_index, hand) in seat.hands.iter().enumerate() {
                let is_current = seat_index == self.current
                    && match self.phase {
                        RoundPhase::Insurance => hand_index == 0,
                        RoundPhase::PlayerTurn => hand_index == seat.active_hand,
                        _ => false,
                    };
                let flags = if is_current && self.phase == RoundPhase::PlayerTurn {
                    seat.flags(hand_index, &self.rules)
                } else {
                    ActionFlags::default()
                };
                players.push(PlayerView {
                    id: seat.id,
                    hand_index,
                    hand: hand.cards.clone(),
                    bet: hand.bet,
                    bet_error: None,
                    outcome: hand.outcome,
                    is_busted: hand.busted,
                    has_blackjack: hand.natural,
                    can_hit: flags.can_hit,
                    can_stand: flags.can_stand,
                    can_double_down: flags.can_double_down,
                    can_split: flags.can_split,
                    can_surrender: flags.can_surrender,
                    is_finished: hand.is_finished(),
                    has_doubled_down: hand.doubled,
                    has_split: seat.hands.len() > 1,
                    has_insurance: seat.insurance.is_some(),
                    payout_rule: seat.payout_rule,
                    is_auto: seat.is_auto,
                    is_current,
                    state: hand.state,
                    hand_value: hand.value(),
                    bankroll: seat.bankroll,
                    settlement: hand.settlement.clone(),
                    insurance_settlement: if hand_index == 0 {
                        seat.insurance_settlement.clone()
                    } else {
                        None
                    },
                });
            }
        }

        TableView {
            phase: self.phase,
            is_insurance_offered: self.phase == RoundPhase::Insurance,
            dealer: DealerView {
                hand: self.dealer.clone(),
                hand_value: hand::evaluate(&self.dealer, false),
            },
            players,
            running_count: self.running_count(),
            true_count: self.true_count(),
            cards_remaining: self.shoe.remaining_cards(),
        }
    }

    fn act(&mut self, seat_id: u32, action: Action) -> Result<()> {
        self.expect_phase(RoundPhase::PlayerTurn)?;
        let seat_index = self.turn_seat(seat_id)?;
        let hand_index = self.seats[seat_index].active_hand;
        let flags = self.seats[seat_index].flags(hand_index, &self.rules);
        let illegal = match action {
            Action::Hit if !flags.can_hit => Some(("hit", "hand is finished or already at 21")),
            Action::Stand if !flags.can_stand => Some(("stand", "hand is not active")),
            Action::Double if !flags.can_double_down => Some((
                "double down",
                "needs an untouched two-card hand and bankroll to match the bet",
            )),
            Action::Split if !flags.can_split => {
                Some(("split", "needs two cards of equal value and bankroll to match the bet"))
            }
            _ => None,
        };
        if let Some((action, reason)) = illegal {
            log::warn!("seat {seat_id} tried to {action}: {reason}");
            return Err(Error::IllegalAction { action, reason });
        }

        self.apply(seat_index, hand_index, action);
        self.advance();
        Ok(())
    }

    fn apply(&mut self, seat_index: usize, hand_index: usize, action: Action) {
        let seat_id = self.seats[seat_index].id;
        log::debug!("seat {seat_id} hand {hand_index}: {:?}", action);
        match action {
            Action::Hit => {
                let card = self.draw();
                let hand = &mut self.seats[seat_index].hands[hand_index];
                hand.cards.push(card);
                hand.after_card();
            }
            Action::Stand => {
                self.seats[seat_index].hands[hand_index].state = HandState::Stood;
            }
            Action::Double => {
                {
                    let hand = &mut self.seats[seat_index].hands[hand_index];
                    hand.state = HandState::Doubled;
                    hand.doubled = true;
                    hand.bet *= 2.0;
                }
                let card = self.draw();
                let hand = &mut self.seats[seat_index].hands[hand_index];
                hand.cards.push(card);
                hand.after_card();
            }
            Action::Split => {
                let seat = &mut self.seats[seat_index];
                let hand = &mut seat.hands[hand_index];
                hand.state = HandState::SplitPending;
                hand.from_split = true;
                let Some(moved) = hand.cards.pop() else {
                    return;
                };
                let mut second = PlayerHand::new(hand.bet);
                second.cards.push(moved);
                second.state = HandState::SplitPending;
                second.from_split = true;
                seat.hands.insert(hand_index + 1, second);
            }
        }
    }

    /// Walks the insurance offer seat by seat. Auto seats always decline.
    /// Play starts once every seat has answered.
    fn advance_insurance(&mut self) {
        while let Some(seat) = self.seats.get(self.current) {
            if !seat.is_auto {
                return;
            }
            log::debug!("auto seat {} declines insurance", seat.id);
            self.current += 1;
        }
        self.peek_or_play();
    }

    fn peek_or_play(&mut self) {
        let upcard_value = self.dealer[0].value();
        if self.rules.dealer_peeks && upcard_value >= 10 && hand::is_blackjack(&self.dealer) {
            log::info!("dealer peeked blackjack");
            self.finish_round();
            return;
        }
        self.phase = RoundPhase::PlayerTurn;
        self.current = 0;
        self.advance();
    }

    /// Moves play to the next hand awaiting a decision, dealing the second
    /// card to split hands and playing auto seats. Runs the dealer once no
    /// hand is left.
    fn advance(&mut self) {
        while self.current < self.seats.len() {
            let seat_index = self.current;
            let next = self.seats[seat_index]
                .hands
                .iter()
                .position(PlayerHand::awaiting_play);
            let hand_index = match next {
                Some(index) => index,
                None => {
                    self.current += 1;
                    continue;
                }
            };
            self.seats[seat_index].active_hand = hand_index;

            if self.seats[seat_index].hands[hand_index].state == HandState::SplitPending {
                let card = self.draw();
                let hand = &mut self.seats[seat_index].hands[hand_index];
                hand.cards.push(card);
                hand.state = HandState::Active;
                hand.after_card();
                continue;
            }

            if self.seats[seat_index].is_auto {
                let action = self.auto_action(seat_index, hand_index);
                self.apply(seat_index, hand_index, action);
                continue;
            }
            return;
        }
        self.finish_round();
    }

    fn auto_action(&self, seat_index: usize, hand_index: usize) -> Action {
        let seat = &self.seats[seat_index];
        let flags = seat.flags(hand_index, &self.rules);
        let count = self
            .counter
            .count_range(self.shoe.remaining_cards(), self.shoe.num_decks);
        let action = self.strategy.recommend(
            &seat.hands[hand_index].cards,
            &self.dealer[0],
            flags.can_double_down,
            flags.can_split,
            count,
        );
        match action {
            Action::Hit if !flags.can_hit => Action::Stand,
            other => other,
        }
    }

    fn finish_round(&mut self) {
        self.phase = RoundPhase::DealerTurn;
        for i in 0..self.dealer.len() {
            if self.dealer[i].is_face_down {
                self.dealer[i] = self.dealer[i].face_up();
                self.counter.update(&self.dealer[i]);
            }
        }

        let dealer_must_play = self
            .seats
            .iter()
            .flat_map(|seat| seat.hands.iter())
            .any(|h| !(h.busted || h.natural || h.state == HandState::Surrendered));
        if dealer_must_play {
            self.play_dealer();
        }
        self.settle_all();
    }

    fn play_dealer(&mut self) {
        loop {
            let value = hand::evaluate(&self.dealer, true);
            if value.total > 21 {
                break;
            }
            let soft_17_hit = self.rules.dealer_hits_soft_17 && value.is_soft && value.total == 17;
            if value.total >= 17 && !soft_17_hit {
                break;
            }
            let card = self.draw();
            self.dealer.push(card);
        }
        log::debug!("dealer finishes on {}", hand::hand_total(&self.dealer, true));
    }

    fn settle_all(&mut self) {
        let dealer_total = hand::hand_total(&self.dealer, true);
        let dealer_blackjack = hand::is_blackjack(&self.dealer);

        for seat in &mut self.seats {
            let rule = seat.payout_rule;
            let mut net = 0.0;
            for hand in &mut seat.hands {
                let outcome = classify(hand, dealer_total, dealer_blackjack);
                let settlement = payout::settle(outcome, hand.bet, rule, hand.busted);
                net += settlement.amount;
                log::info!(
                    "seat {} {}: {} ({})",
                    seat.id,
                    outcome.as_str(),
                    settlement.label,
                    settlement.detail
                );
                hand.outcome = Some(outcome);
                hand.settlement = Some(settlement);
                hand.state = HandState::Settled;
            }
            if let Some(stake) = seat.insurance {
                let settlement = payout::settle_insurance(stake, dealer_blackjack);
                net += settlement.amount;
                log::info!("seat {} insurance: {}", seat.id, settlement.label);
                seat.insurance_settlement = Some(settlement);
            }
            seat.bankroll += net;
        }
        self.phase = RoundPhase::Settled;
    }

    fn draw(&mut self) -> Card {
        let card = self.draw_uncounted();
        self.counter.update(&card);
        card
    }

    /// Deals without counting the card. A reshuffle forced by an empty shoe
    /// starts the count over.
    fn draw_uncounted(&mut self) -> Card {
        let shuffles = self.shoe.shuffles();
        let card = self.shoe.deal();
        if self.shoe.shuffles() != shuffles {
            log::debug!("shoe ran dry mid-round, count reset");
            self.counter.reset();
        }
        card
    }

    fn expect_phase(&self, expected: RoundPhase) -> Result<()> {
        if self.phase != expected {
            return Err(Error::WrongPhase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    fn seat_index(&self, seat_id: u32) -> Result<usize> {
        self.seats
            .iter()
            .position(|seat| seat.id == seat_id)
            .ok_or(Error::UnknownSeat(seat_id))
    }

    fn turn_seat(&self, seat_id: u32) -> Result<usize> {
        let seat_index = self.seat_index(seat_id)?;
        if seat_index != self.current {
            return Err(Error::NotYourTurn(seat_id));
        }
        Ok(seat_index)
    }
}

fn classify(hand: &PlayerHand, dealer_total: u16, dealer_blackjack: bool) -> Outcome {
    if hand.state == HandState::Surrendered {
        return Outcome::Surrender;
    }
    if hand.busted {
        return Outcome::Loss;
    }
    if hand.natural {
        return if dealer_blackjack {
            Outcome::Push
        } else {
            Outcome::Blackjack
        };
    }
    if dealer_blackjack {
        return Outcome::Loss;
    }
    let total = hand.value().total;
    if dealer_total > 21 || total > dealer_total {
        Outcome::Win
    } else if total < dealer_total {
        Outcome::Loss
    } else {
        Outcome::Push
    }
}

/// Parses and checks a bet typed into the betting box.
pub fn validate_bet(
    input: &str,
    min: f64,
    max: f64,
    bankroll: f64,
) -> std::result::Result<f64, BetError> {
    let amount: f64 = input.trim().parse().map_err(|_| BetError::NotANumber)?;
    if !amount.is_finite() {
        return Err(BetError::NotANumber);
    }
    if amount <= 0.0 {
        return Err(BetError::NotPositive);
    }
    if amount < min {
        return Err(BetError::BelowMinimum(min));
    }
    if amount > max {
        return Err(BetError::AboveMaximum(max));
    }
    if amount > bankroll {
        return Err(BetError::ExceedsBankroll(bankroll));
    }
    Ok(amount)
}
