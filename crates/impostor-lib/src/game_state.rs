use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    catalog::Catalog,
    error::{Constraint, GameResult, Precondition},
    event::GameEvent,
    player::{CardView, Player},
    round::{self, RandomSource, Round, RoundData},
    settings::{GameSettings, RosterLimits, RoundLength},
    timer::{Countdown, Tick},
};

#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Phase {
    #[default]
    Setup,
    CardPass,
    Timer,
    Reveal,
}

/// Progress of the current player's card during [`Phase::CardPass`].
#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CardState {
    #[default]
    Closed,
    Open,
    /// The player has seen their card and closed it again.
    Finished,
}

/// The whole game: roster, settings, the current round and where the table is within it.
///
/// Every operation checks its own preconditions and either applies completely or returns an error
/// without touching any state. Successful operations queue [`GameEvent`]s which are collected
/// with [`GameState::take_events`].
pub struct GameState {
    catalog: Arc<Catalog>,
    rng: Box<dyn RandomSource + Send>,
    limits: RosterLimits,
    settings: GameSettings,
    roster: Vec<String>,
    phase: Phase,
    round: Option<Round>,
    current: usize,
    card: CardState,
    countdown: Option<Countdown>,
    events: Vec<GameEvent>,
}

impl std::fmt::Debug for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameState")
            .field("phase", &self.phase)
            .field("players", &self.roster.len())
            .field("current", &self.current)
            .field("card", &self.card)
            .finish_non_exhaustive()
    }
}

impl GameState {
    pub fn new(catalog: Arc<Catalog>, rng: impl RandomSource + Send + 'static) -> Self {
        let settings = GameSettings::new(&catalog);
        Self {
            catalog,
            rng: Box::new(rng),
            limits: RosterLimits::default(),
            settings,
            roster: Vec::new(),
            phase: Phase::Setup,
            round: None,
            current: 0,
            card: CardState::Closed,
            countdown: None,
            events: Vec::new(),
        }
    }

    /// Replace the default roster bounds.
    ///
    /// # Errors
    ///
    /// [`Constraint::InvalidLimits`] unless `1 <= min <= max`.
    pub fn with_limits(mut self, limits: RosterLimits) -> GameResult<Self> {
        limits.validate()?;
        self.limits = limits;
        Ok(self)
    }

    /// Drain the events produced since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

// ----------------------------------------------------------------------------
// Setup
// ----------------------------------------------------------------------------
impl GameState {
    /// Append a player to the roster. Surrounding whitespace is ignored.
    #[instrument(skip(self))]
    pub fn add_player(&mut self, name: &str) -> GameResult<()> {
        self.expect_phase("add_player", Phase::Setup)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(Constraint::BlankName.into());
        }
        if self.roster.iter().any(|n| n == name) {
            return Err(Constraint::DuplicateName(name.to_owned()).into());
        }
        if self.roster.len() >= self.limits.max {
            return Err(Constraint::RosterFull {
                max: self.limits.max,
            }
            .into());
        }

        self.roster.push(name.to_owned());
        tracing::info!("Player joined");
        self.roster_changed();
        Ok(())
    }

    /// Remove the player called `name`. Returns whether anyone was removed.
    #[instrument(skip(self))]
    pub fn remove_player(&mut self, name: &str) -> GameResult<bool> {
        self.expect_phase("remove_player", Phase::Setup)?;
        let Some(pos) = self.roster.iter().position(|n| n == name) else {
            tracing::warn!("Attempted to remove player who isn't in the roster");
            return Ok(false);
        };

        self.roster.remove(pos);
        tracing::info!("Player left");
        self.roster_changed();
        Ok(true)
    }

    /// Flip whether a category is used for new rounds. Returns whether it is now enabled.
    #[instrument(skip(self))]
    pub fn toggle_category(&mut self, id: &str) -> GameResult<bool> {
        self.expect_phase("toggle_category", Phase::Setup)?;
        let enabled = self.settings.toggle_category(&self.catalog, id)?;
        tracing::info!(enabled, "Toggled category");
        self.events.push(GameEvent::CategoryToggled {
            id: id.to_owned(),
            enabled,
        });
        Ok(enabled)
    }

    #[instrument(skip(self))]
    pub fn set_length(&mut self, length: RoundLength) -> GameResult<()> {
        self.expect_phase("set_length", Phase::Setup)?;
        self.settings.length = length;
        tracing::info!("Round length set to {} minutes", length.minutes());
        self.events.push(GameEvent::LengthChanged(length));
        Ok(())
    }

    /// Like [`GameState::set_length`], for one of the minute values of [`RoundLength`].
    #[instrument(skip(self))]
    pub fn set_duration_minutes(&mut self, minutes: u32) -> GameResult<()> {
        self.expect_phase("set_length", Phase::Setup)?;
        self.set_length(RoundLength::from_minutes(minutes)?)
    }

    fn roster_changed(&mut self) {
        self.events.push(GameEvent::RosterChanged {
            players: self.roster.clone(),
        });
    }
}

// ----------------------------------------------------------------------------
// Transitions
// ----------------------------------------------------------------------------
impl GameState {
    /// Deal a new round to the roster and hand the device to the first player.
    #[instrument(skip(self))]
    pub fn start_game(&mut self) -> GameResult<()> {
        self.expect_phase("start_game", Phase::Setup)?;
        self.begin_round()
    }

    /// Deal a fresh round to the same roster. Roles and word are drawn again.
    #[instrument(skip(self))]
    pub fn play_again(&mut self) -> GameResult<()> {
        self.expect_phase("play_again", Phase::Reveal)?;
        self.begin_round()
    }

    #[instrument(skip(self))]
    pub fn open_card(&mut self) -> GameResult<()> {
        self.expect_card("open_card", CardState::Closed)?;
        self.set_card(CardState::Open);
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn close_card(&mut self) -> GameResult<()> {
        self.expect_card("close_card", CardState::Open)?;
        self.set_card(CardState::Finished);
        Ok(())
    }

    /// Move on from a player who has seen their card. After the last player the discussion timer
    /// starts.
    #[instrument(skip(self))]
    pub fn advance_player(&mut self) -> GameResult<()> {
        self.expect_card("advance_player", CardState::Finished)?;

        if !self.is_last_player() {
            self.current += 1;
            self.set_card(CardState::Closed);
            self.announce_turn();
            return Ok(());
        }

        let seconds = self.settings.length.seconds();
        self.countdown = Some(Countdown::new(seconds));
        tracing::info!("All cards seen, starting {seconds}s timer");
        self.set_phase(Phase::Timer);
        Ok(())
    }

    /// Deliver one elapsed second to the discussion timer.
    pub fn tick(&mut self) -> GameResult<()> {
        self.expect_phase("tick", Phase::Timer)?;
        match self.countdown.as_mut().and_then(Countdown::tick) {
            Some(Tick::Running { remaining, warning }) => {
                self.events.push(GameEvent::TimerTick { remaining, warning });
            }
            Some(Tick::Expired) => {
                tracing::info!("Timer expired");
                self.events.push(GameEvent::TimerExpired);
                self.set_phase(Phase::Reveal);
            }
            None => {}
        }
        Ok(())
    }

    /// End the discussion before the timer runs out.
    #[instrument(skip(self))]
    pub fn force_reveal(&mut self) -> GameResult<()> {
        self.expect_phase("force_reveal", Phase::Timer)?;
        tracing::info!(
            remaining = ?self.seconds_remaining(),
            "Discussion ended early"
        );
        self.events.push(GameEvent::RevealForced);
        self.set_phase(Phase::Reveal);
        Ok(())
    }

    /// Return to setup with an empty roster. Valid in every phase. Settings are kept.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.round = None;
        self.countdown = None;
        self.current = 0;
        self.card = CardState::Closed;
        if !self.roster.is_empty() {
            self.roster.clear();
            self.roster_changed();
        }
        self.set_phase(Phase::Setup);
        tracing::info!("Reset game");
    }

    fn begin_round(&mut self) -> GameResult<()> {
        let round = round::generate(
            &self.roster,
            self.settings.enabled_categories(),
            &self.catalog,
            self.limits,
            &mut self.rng,
        )?;

        tracing::info!(players = round.players.len(), "Dealt new round");
        self.round = Some(round);
        self.countdown = None;
        self.current = 0;
        self.card = CardState::Closed;
        self.set_phase(Phase::CardPass);
        self.announce_turn();
        Ok(())
    }

    fn set_phase(&mut self, to: Phase) {
        let from = std::mem::replace(&mut self.phase, to);
        if from != to {
            self.events.push(GameEvent::PhaseChanged { from, to });
        }
    }

    fn set_card(&mut self, card: CardState) {
        self.card = card;
        self.events.push(GameEvent::CardChanged(card));
    }

    fn announce_turn(&mut self) {
        if let Some(player) = self.current_player() {
            let event = GameEvent::PlayerTurn {
                index: self.current,
                name: player.name.clone(),
            };
            self.events.push(event);
        }
    }

    fn expect_phase(&self, action: &'static str, expected: Phase) -> GameResult<()> {
        if self.phase != expected {
            return Err(Precondition::Phase {
                action,
                expected,
                found: self.phase,
            }
            .into());
        }
        Ok(())
    }

    fn expect_card(&self, action: &'static str, expected: CardState) -> GameResult<()> {
        self.expect_phase(action, Phase::CardPass)?;
        if self.card != expected {
            return Err(Precondition::Card {
                action,
                expected,
                found: self.card,
            }
            .into());
        }
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Queries
// ----------------------------------------------------------------------------
impl GameState {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn card_state(&self) -> CardState {
        self.card
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn limits(&self) -> RosterLimits {
        self.limits
    }

    /// Names entered during setup, in join order.
    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    pub fn can_start(&self) -> bool {
        self.phase == Phase::Setup && self.limits.check(self.roster.len()).is_ok()
    }

    /// Players of the current round, including who the impostor is.
    pub fn players(&self) -> &[Player] {
        self.round.as_ref().map_or(&[], |r| &r.players)
    }

    pub fn round_data(&self) -> Option<&RoundData> {
        self.round.as_ref().map(|r| &r.data)
    }

    /// Round data once it may be shown to everyone.
    pub fn revealed(&self) -> Option<&RoundData> {
        if self.phase != Phase::Reveal {
            return None;
        }
        self.round_data()
    }

    /// The player currently holding the device, during [`Phase::CardPass`].
    pub fn current_player(&self) -> Option<&Player> {
        if self.phase != Phase::CardPass {
            return None;
        }
        self.players().get(self.current)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_last_player(&self) -> bool {
        self.current + 1 >= self.players().len()
    }

    /// Players done with their card, out of the total.
    pub fn progress(&self) -> (usize, usize) {
        (self.current, self.players().len())
    }

    /// What the player at `index` sees on their card.
    pub fn card_for(&self, index: usize) -> Option<CardView> {
        let round = self.round.as_ref()?;
        round.players.get(index).map(|p| round.data.card_for(p))
    }

    /// The current player's card, only while it is turned over.
    pub fn current_card(&self) -> Option<CardView> {
        if self.phase != Phase::CardPass || self.card != CardState::Open {
            return None;
        }
        self.card_for(self.current)
    }

    /// Seconds left on the discussion timer, if it has been started this round.
    pub fn seconds_remaining(&self) -> Option<u32> {
        self.countdown.as_ref().map(Countdown::remaining)
    }

    pub fn is_urgent(&self) -> bool {
        self.phase == Phase::Timer && self.countdown.as_ref().is_some_and(Countdown::is_urgent)
    }

    /// Everything a shared screen may display right now. Secrets only appear in the open card and
    /// in [`Phase::Reveal`].
    pub fn snapshot(&self) -> GameSnapshot {
        let category = match self.phase {
            Phase::Setup => None,
            _ => self.round_data().map(|r| r.category.clone()),
        };
        GameSnapshot {
            phase: self.phase,
            card: self.card,
            roster: self.roster.clone(),
            settings: self.settings.clone(),
            can_start: self.can_start(),
            limits: self.limits(),
            current_player: self
                .current_player()
                .map(|p| (self.current, p.name.clone())),
            player_count: self.players().len(),
            is_last_player: self.phase == Phase::CardPass && self.is_last_player(),
            open_card: self.current_card(),
            seconds_remaining: self.seconds_remaining(),
            urgent: self.is_urgent(),
            category,
            revealed: self.revealed().cloned(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub card: CardState,
    pub roster: Vec<String>,
    pub settings: GameSettings,
    pub can_start: bool,
    pub limits: RosterLimits,
    pub current_player: Option<(usize, String)>,
    pub player_count: usize,
    pub is_last_player: bool,
    pub open_card: Option<CardView>,
    pub seconds_remaining: Option<u32>,
    pub urgent: bool,
    pub category: Option<String>,
    pub revealed: Option<RoundData>,
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{CardState, GameState, Phase};
    use crate::{
        catalog::Catalog,
        error::{Constraint, GameError, Precondition},
        event::GameEvent,
        player::CardView,
        round::tests::Scripted,
        settings::{RosterLimits, RoundLength},
    };

    fn setup() -> GameState {
        GameState::new(Arc::new(Catalog::builtin()), Scripted::default())
    }

    fn with_players(names: &[&str]) -> GameState {
        let mut game = setup();
        for name in names {
            game.add_player(name).unwrap();
        }
        game.take_events();
        game
    }

    fn pass_all_cards(game: &mut GameState) {
        for _ in 0..game.players().len() {
            game.open_card().unwrap();
            game.close_card().unwrap();
            game.advance_player().unwrap();
        }
    }

    #[test]
    fn add_player() {
        let mut game = setup();
        game.add_player("Ana").unwrap();
        assert_eq!(
            game.add_player("Ana"),
            Err(Constraint::DuplicateName("Ana".to_owned()).into())
        );
        assert_eq!(game.roster(), ["Ana"]);

        // Whitespace is trimmed before comparing
        assert!(game.add_player("  Ana ").is_err());
        assert_eq!(game.add_player("   "), Err(Constraint::BlankName.into()));
        game.add_player(" Bruno ").unwrap();
        assert_eq!(game.roster(), ["Ana", "Bruno"]);

        assert_eq!(
            game.take_events(),
            [
                GameEvent::RosterChanged {
                    players: vec!["Ana".to_owned()]
                },
                GameEvent::RosterChanged {
                    players: vec!["Ana".to_owned(), "Bruno".to_owned()]
                },
            ]
        );
    }

    #[test]
    fn roster_full() {
        let mut game = setup();
        for i in 0..crate::MAX_PLAYERS {
            game.add_player(&format!("P{i}")).unwrap();
        }
        assert_eq!(
            game.add_player("One too many"),
            Err(Constraint::RosterFull { max: 14 }.into())
        );
        assert_eq!(game.roster().len(), 14);
    }

    #[test]
    fn remove_player() {
        let mut game = with_players(&["Ana", "Bruno", "Carla"]);
        assert_eq!(game.remove_player("Bruno"), Ok(true));
        assert_eq!(game.remove_player("Bruno"), Ok(false));
        assert_eq!(game.remove_player("ana"), Ok(false));
        assert_eq!(game.roster(), ["Ana", "Carla"]);
        assert_eq!(game.take_events().len(), 1);
    }

    #[test]
    fn toggle_last_category() {
        let mut game = setup();
        let ids: Vec<String> = game.catalog().ids().map(str::to_owned).collect();
        for id in &ids[1..] {
            assert_eq!(game.toggle_category(id), Ok(false));
        }
        assert_eq!(
            game.toggle_category(&ids[0]),
            Err(Constraint::LastCategory.into())
        );
        assert_eq!(game.settings().enabled_categories().len(), 1);
    }

    #[test]
    fn set_length() {
        let mut game = setup();
        game.set_length(RoundLength::Long).unwrap();
        assert_eq!(game.settings().length, RoundLength::Long);
        game.set_duration_minutes(3).unwrap();
        assert_eq!(game.settings().length, RoundLength::Short);
        assert_eq!(
            game.set_duration_minutes(7),
            Err(Constraint::InvalidDuration(7).into())
        );
        assert_eq!(game.settings().length, RoundLength::Short);
    }

    #[test]
    fn start_needs_enough_players() {
        let mut game = with_players(&["Ana", "Bruno"]);
        assert!(!game.can_start());
        assert_eq!(
            game.start_game(),
            Err(Constraint::NotEnoughPlayers { count: 2, min: 3 }.into())
        );
        assert_eq!(game.phase(), Phase::Setup);
        assert!(game.take_events().is_empty());

        game.add_player("Carla").unwrap();
        assert!(game.can_start());
        game.start_game().unwrap();
        assert_eq!(game.phase(), Phase::CardPass);
        assert_eq!(game.card_state(), CardState::Closed);
        assert_eq!(game.current_index(), 0);
    }

    #[test]
    fn custom_limits() {
        let mut game = setup()
            .with_limits(RosterLimits { min: 2, max: 2 })
            .unwrap();
        game.add_player("Ana").unwrap();
        game.add_player("Bruno").unwrap();
        assert!(game.add_player("Carla").is_err());
        assert_eq!(game.snapshot().limits, RosterLimits { min: 2, max: 2 });
        game.start_game().unwrap();
    }

    #[test]
    fn invalid_limits_are_refused() {
        assert_eq!(
            setup()
                .with_limits(RosterLimits { min: 0, max: 14 })
                .unwrap_err(),
            Constraint::InvalidLimits { min: 0, max: 14 }.into()
        );
        assert_eq!(
            setup()
                .with_limits(RosterLimits { min: 5, max: 4 })
                .unwrap_err(),
            Constraint::InvalidLimits { min: 5, max: 4 }.into()
        );

        // An empty roster can't start even when the bounds are bypassed
        let mut game = setup();
        game.limits = RosterLimits { min: 0, max: 14 };
        assert_eq!(
            game.start_game(),
            Err(Constraint::InvalidLimits { min: 0, max: 14 }.into())
        );
        assert_eq!(game.phase(), Phase::Setup);
        assert!(!game.can_start());
    }

    #[test]
    fn full_cycle() {
        let mut game = with_players(&["Ana", "Bruno", "Carla"]);
        game.set_length(RoundLength::Short).unwrap();
        game.start_game().unwrap();

        pass_all_cards(&mut game);
        assert_eq!(game.phase(), Phase::Timer);
        assert_eq!(game.seconds_remaining(), Some(3 * 60));
        game.take_events();

        let mut expired = 0;
        let mut ticks = 0;
        while game.phase() == Phase::Timer {
            game.tick().unwrap();
            for event in game.take_events() {
                match event {
                    GameEvent::TimerExpired => expired += 1,
                    GameEvent::TimerTick { .. } => ticks += 1,
                    _ => {}
                }
            }
        }

        assert_eq!(game.phase(), Phase::Reveal);
        assert_eq!(expired, 1);
        assert_eq!(ticks, 3 * 60 - 1);
        assert_eq!(game.seconds_remaining(), Some(0));

        // The timer is gone once we've left the phase
        assert!(game.tick().unwrap_err().is_precondition());
        assert!(game.take_events().is_empty());
    }

    #[test]
    fn card_pass_events() {
        let mut game = with_players(&["Ana", "Bruno", "Carla"]);
        game.start_game().unwrap();
        assert_eq!(
            game.take_events(),
            [
                GameEvent::PhaseChanged {
                    from: Phase::Setup,
                    to: Phase::CardPass
                },
                GameEvent::PlayerTurn {
                    index: 0,
                    name: "Ana".to_owned()
                },
            ]
        );

        game.open_card().unwrap();
        game.close_card().unwrap();
        game.advance_player().unwrap();
        assert_eq!(
            game.take_events(),
            [
                GameEvent::CardChanged(CardState::Open),
                GameEvent::CardChanged(CardState::Finished),
                GameEvent::CardChanged(CardState::Closed),
                GameEvent::PlayerTurn {
                    index: 1,
                    name: "Bruno".to_owned()
                },
            ]
        );
        assert_eq!(game.progress(), (1, 3));
    }

    #[test]
    fn card_guards() {
        let mut game = with_players(&["Ana", "Bruno", "Carla"]);

        // Nothing works outside the card pass
        assert_eq!(
            game.open_card(),
            Err(GameError::InvalidPrecondition(Precondition::Phase {
                action: "open_card",
                expected: Phase::CardPass,
                found: Phase::Setup,
            }))
        );

        game.start_game().unwrap();
        assert_eq!(
            game.advance_player(),
            Err(GameError::InvalidPrecondition(Precondition::Card {
                action: "advance_player",
                expected: CardState::Finished,
                found: CardState::Closed,
            }))
        );
        assert!(game.close_card().unwrap_err().is_precondition());

        game.open_card().unwrap();
        assert!(game.open_card().unwrap_err().is_precondition());
        assert!(game.advance_player().unwrap_err().is_precondition());

        game.close_card().unwrap();
        assert!(game.open_card().unwrap_err().is_precondition());
        assert!(game.close_card().unwrap_err().is_precondition());
        assert_eq!(game.card_state(), CardState::Finished);
        assert_eq!(game.current_index(), 0);
    }

    #[test]
    fn phase_guards() {
        let mut game = with_players(&["Ana", "Bruno", "Carla"]);
        assert!(game.force_reveal().unwrap_err().is_precondition());
        assert!(game.play_again().unwrap_err().is_precondition());
        assert!(game.tick().unwrap_err().is_precondition());

        game.start_game().unwrap();
        assert!(game.start_game().unwrap_err().is_precondition());
        assert!(game.add_player("Dani").unwrap_err().is_precondition());
        assert!(game.remove_player("Ana").unwrap_err().is_precondition());
        assert!(game.toggle_category("food").unwrap_err().is_precondition());
        assert!(game.set_length(RoundLength::Long).is_err());
        // Ending the discussion early is only possible once it has started
        assert!(game.force_reveal().unwrap_err().is_precondition());
        assert_eq!(game.phase(), Phase::CardPass);
    }

    #[test]
    fn force_reveal() {
        let mut game = with_players(&["Ana", "Bruno", "Carla"]);
        game.start_game().unwrap();
        pass_all_cards(&mut game);

        while game.seconds_remaining() != Some(45) {
            game.tick().unwrap();
        }
        game.take_events();

        game.force_reveal().unwrap();
        assert_eq!(game.phase(), Phase::Reveal);
        assert_eq!(
            game.take_events(),
            [
                GameEvent::RevealForced,
                GameEvent::PhaseChanged {
                    from: Phase::Timer,
                    to: Phase::Reveal
                },
            ]
        );

        assert!(game.tick().is_err());
        assert!(game.take_events().is_empty());
        assert_eq!(game.seconds_remaining(), Some(45));
    }

    #[test]
    fn card_views() {
        // Bruno is the impostor, the word is "Pizza"
        let mut game = GameState::new(Arc::new(Catalog::builtin()), Scripted::new([1, 0, 0]));
        for name in ["Ana", "Bruno", "Carla"] {
            game.add_player(name).unwrap();
        }
        game.start_game().unwrap();

        // The card is only exposed while it is turned over
        assert_eq!(game.current_card(), None);
        game.open_card().unwrap();
        assert_eq!(
            game.current_card(),
            Some(CardView::Crew {
                category: "Food".to_owned(),
                word: "Pizza".to_owned()
            })
        );
        game.close_card().unwrap();
        assert_eq!(game.current_card(), None);
        game.advance_player().unwrap();

        game.open_card().unwrap();
        assert_eq!(
            game.current_card(),
            Some(CardView::Impostor {
                category: "Food".to_owned(),
                hint: "Dough with toppings".to_owned()
            })
        );
        assert!(game.card_for(1).unwrap().is_impostor());
        assert!(!game.card_for(2).unwrap().is_impostor());
        assert_eq!(game.card_for(3), None);
    }

    #[test]
    fn snapshot_hides_secrets() {
        let mut game = with_players(&["Ana", "Bruno", "Carla"]);
        game.start_game().unwrap();

        let snapshot = game.snapshot();
        assert_eq!(snapshot.current_player, Some((0, "Ana".to_owned())));
        assert_eq!(snapshot.open_card, None);
        assert_eq!(snapshot.revealed, None);
        assert!(!snapshot.is_last_player);

        pass_all_cards(&mut game);
        let snapshot = game.snapshot();
        assert_eq!(snapshot.phase, Phase::Timer);
        assert_eq!(snapshot.current_player, None);
        assert_eq!(snapshot.revealed, None);
        assert_eq!(snapshot.category.as_deref(), Some("Food"));
        assert_eq!(snapshot.seconds_remaining, Some(300));
        assert!(!snapshot.urgent);

        game.force_reveal().unwrap();
        let snapshot = game.snapshot();
        let revealed = snapshot.revealed.unwrap();
        assert_eq!(revealed.impostor_name, "Ana");
        assert_eq!(revealed.word, "Pizza");
    }

    #[test]
    fn play_again_keeps_roster() {
        let mut game = GameState::new(
            Arc::new(Catalog::builtin()),
            Scripted::new([0, 0, 0, 2, 0, 1]),
        );
        for name in ["Ana", "Bruno", "Carla"] {
            game.add_player(name).unwrap();
        }
        game.start_game().unwrap();
        assert_eq!(game.round_data().unwrap().impostor_name, "Ana");
        pass_all_cards(&mut game);
        game.force_reveal().unwrap();

        game.play_again().unwrap();
        assert_eq!(game.phase(), Phase::CardPass);
        assert_eq!(game.card_state(), CardState::Closed);
        assert_eq!(game.current_index(), 0);
        assert_eq!(game.seconds_remaining(), None);
        assert_eq!(game.roster(), ["Ana", "Bruno", "Carla"]);

        let round = game.round_data().unwrap();
        assert_eq!(round.impostor_name, "Carla");
        assert_eq!(round.word, "Sushi");
        assert_eq!(game.players().iter().filter(|p| p.is_impostor).count(), 1);
        assert!(game.players()[2].is_impostor);
    }

    #[test]
    fn reset() {
        let mut game = with_players(&["Ana", "Bruno", "Carla"]);
        game.set_length(RoundLength::Long).unwrap();
        game.start_game().unwrap();
        pass_all_cards(&mut game);
        game.force_reveal().unwrap();
        game.take_events();

        game.reset();
        assert_eq!(game.phase(), Phase::Setup);
        assert!(game.roster().is_empty());
        assert!(game.players().is_empty());
        assert_eq!(game.round_data(), None);
        assert_eq!(game.seconds_remaining(), None);
        assert_eq!(game.settings().length, RoundLength::Long);
        assert_eq!(
            game.take_events(),
            [
                GameEvent::RosterChanged { players: vec![] },
                GameEvent::PhaseChanged {
                    from: Phase::Reveal,
                    to: Phase::Setup
                },
            ]
        );

        assert!(game.start_game().unwrap_err().is_constraint());
        game.add_player("Ana").unwrap();
        game.add_player("Bruno").unwrap();
        assert!(game.start_game().is_err());
        game.add_player("Carla").unwrap();
        assert!(game.start_game().is_ok());
    }

    #[test]
    fn reset_from_any_phase() {
        let mut game = with_players(&["Ana", "Bruno", "Carla"]);
        game.start_game().unwrap();
        game.open_card().unwrap();
        game.reset();
        assert_eq!(game.phase(), Phase::Setup);
        assert_eq!(game.card_state(), CardState::Closed);

        // Resetting an empty setup is harmless and quiet
        game.take_events();
        game.reset();
        assert!(game.take_events().is_empty());
    }
}
