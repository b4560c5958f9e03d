use impostor_lib::error::GameResult;
use impostor_lib::event::GameEvent;
use impostor_lib::game_state::{GameSnapshot, GameState, Phase};
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::instrument;

use crate::ticker::{Ticker, TICK_PERIOD};

use super::SessionResult;

pub struct SessionActor {
    receiver: mpsc::Receiver<SessionAction>,
    /// Handed to the ticker so that it can feed ticks back into our own queue.
    own_sender: mpsc::WeakSender<SessionAction>,
    game: GameState,
    sender: broadcast::Sender<GameEvent>,
    ticker: Option<Ticker>,
    next_generation: u64,
}

#[derive(Debug)]
pub enum SessionAction {
    AddPlayer {
        respond_to: oneshot::Sender<SessionResult<()>>,
        name: String,
    },
    RemovePlayer {
        respond_to: oneshot::Sender<SessionResult<bool>>,
        name: String,
    },
    ToggleCategory {
        respond_to: oneshot::Sender<SessionResult<bool>>,
        id: String,
    },
    SetDuration {
        respond_to: oneshot::Sender<SessionResult<()>>,
        minutes: u32,
    },
    StartGame {
        respond_to: oneshot::Sender<SessionResult<()>>,
    },
    OpenCard {
        respond_to: oneshot::Sender<SessionResult<()>>,
    },
    CloseCard {
        respond_to: oneshot::Sender<SessionResult<()>>,
    },
    AdvancePlayer {
        respond_to: oneshot::Sender<SessionResult<()>>,
    },
    ForceReveal {
        respond_to: oneshot::Sender<SessionResult<()>>,
    },
    PlayAgain {
        respond_to: oneshot::Sender<SessionResult<()>>,
    },
    Reset {
        respond_to: oneshot::Sender<SessionResult<()>>,
    },
    Snapshot {
        respond_to: oneshot::Sender<GameSnapshot>,
    },
    Subscribe {
        respond_to: oneshot::Sender<broadcast::Receiver<GameEvent>>,
    },
    Tick {
        generation: u64,
    },
}

impl SessionActor {
    pub fn new(
        receiver: mpsc::Receiver<SessionAction>,
        own_sender: mpsc::WeakSender<SessionAction>,
        game: GameState,
    ) -> Self {
        let (sender, _) = broadcast::channel(100);

        Self {
            receiver,
            own_sender,
            game,
            sender,
            ticker: None,
            next_generation: 0,
        }
    }

    #[instrument(skip_all)]
    pub async fn run(mut self) {
        tracing::info!("Session opened");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                SessionAction::AddPlayer { respond_to, name } => {
                    let _ = respond_to.send(self.apply(|g| g.add_player(&name)));
                }
                SessionAction::RemovePlayer { respond_to, name } => {
                    let _ = respond_to.send(self.apply(|g| g.remove_player(&name)));
                }
                SessionAction::ToggleCategory { respond_to, id } => {
                    let _ = respond_to.send(self.apply(|g| g.toggle_category(&id)));
                }
                SessionAction::SetDuration {
                    respond_to,
                    minutes,
                } => {
                    let _ = respond_to.send(self.apply(|g| g.set_duration_minutes(minutes)));
                }
                SessionAction::StartGame { respond_to } => {
                    let _ = respond_to.send(self.apply(GameState::start_game));
                }
                SessionAction::OpenCard { respond_to } => {
                    let _ = respond_to.send(self.apply(GameState::open_card));
                }
                SessionAction::CloseCard { respond_to } => {
                    let _ = respond_to.send(self.apply(GameState::close_card));
                }
                SessionAction::AdvancePlayer { respond_to } => {
                    let _ = respond_to.send(self.apply(GameState::advance_player));
                }
                SessionAction::ForceReveal { respond_to } => {
                    let _ = respond_to.send(self.apply(GameState::force_reveal));
                }
                SessionAction::PlayAgain { respond_to } => {
                    let _ = respond_to.send(self.apply(GameState::play_again));
                }
                SessionAction::Reset { respond_to } => {
                    let _ = respond_to.send(self.apply(|g| {
                        g.reset();
                        Ok(())
                    }));
                }
                SessionAction::Snapshot { respond_to } => {
                    let _ = respond_to.send(self.game.snapshot());
                }
                SessionAction::Subscribe { respond_to } => {
                    let _ = respond_to.send(self.sender.subscribe());
                }
                SessionAction::Tick { generation } => self.tick(generation),
            }
        }

        // Dropping the ticker with us stops it, but be explicit about it
        self.ticker = None;
        tracing::info!("Closing session");
    }
}

// ----------------------------------------------------------------------------
// Message Handlers
// ----------------------------------------------------------------------------
impl SessionActor {
    /// Run an operation against the game, then publish whatever it changed.
    fn apply<T>(&mut self, op: impl FnOnce(&mut GameState) -> GameResult<T>) -> SessionResult<T> {
        let result = op(&mut self.game);
        if let Err(e) = &result {
            tracing::warn!("Rejected: {e}");
        }
        self.publish();
        Ok(result?)
    }

    #[instrument(skip(self))]
    fn tick(&mut self, generation: u64) {
        match &self.ticker {
            Some(ticker) if ticker.generation() == generation => {}
            _ => {
                tracing::debug!("Dropping tick from a stopped timer");
                return;
            }
        }
        let _ = self.apply(GameState::tick);
    }

    /// Broadcast pending events and make sure a ticker runs exactly while the timer phase does.
    fn publish(&mut self) {
        for event in self.game.take_events() {
            // No subscribers is fine, the game goes on without anyone watching
            let _ = self.sender.send(event);
        }

        let timing = self.game.phase() == Phase::Timer;
        if timing && self.ticker.is_none() {
            let generation = self.next_generation;
            self.next_generation += 1;
            self.ticker = Some(Ticker::start(
                generation,
                TICK_PERIOD,
                self.own_sender.clone(),
                |generation| SessionAction::Tick { generation },
            ));
            tracing::info!(generation, "Started ticker");
        } else if !timing && self.ticker.take().is_some() {
            tracing::info!("Stopped ticker");
        }
    }
}
