use impostor_lib::{error::GameError, game_state::GameState};
use thiserror::Error;
use tokio::sync::mpsc;

use self::{session_actor::SessionActor, session_handle::SessionHandle};

mod session_actor;
pub mod session_handle;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("The Session Handle is no longer connected to a game.")]
    HandleInvalid,
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Spawn an actor that owns `game` for the rest of its life and return a handle to drive it.
///
/// The actor stops once every [`SessionHandle`] has been dropped.
pub fn start_session(game: GameState) -> SessionHandle {
    let (sender, receiver) = mpsc::channel(64);
    let actor = SessionActor::new(receiver, sender.downgrade(), game);
    tokio::spawn(actor.run());

    SessionHandle { sender }
}
