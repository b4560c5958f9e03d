use impostor_lib::{event::GameEvent, game_state::GameSnapshot};
use tokio::sync::{broadcast, mpsc, oneshot};

use super::session_actor::SessionAction;
use super::{SessionError, SessionResult};

/// Cloneable handle for driving a running game session.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    pub(super) sender: mpsc::Sender<SessionAction>,
}

impl SessionHandle {
    async fn execute<T>(
        &self,
        msg: SessionAction,
        rx: oneshot::Receiver<SessionResult<T>>,
    ) -> SessionResult<T> {
        // Ignore first error, if there is an error, rx.await will fail as well since it's sender
        // will have been dropped
        let _ = self.sender.send(msg).await;
        rx.await.unwrap_or(Err(SessionError::HandleInvalid))
    }

    async fn query<T>(&self, msg: SessionAction, rx: oneshot::Receiver<T>) -> SessionResult<T> {
        let _ = self.sender.send(msg).await;
        rx.await.map_err(|_| SessionError::HandleInvalid)
    }

    pub async fn add_player(&self, name: impl Into<String>) -> SessionResult<()> {
        let (tx, rx) = oneshot::channel();
        let msg = SessionAction::AddPlayer {
            respond_to: tx,
            name: name.into(),
        };
        self.execute(msg, rx).await
    }

    /// Returns whether a player by that name was in the roster.
    pub async fn remove_player(&self, name: impl Into<String>) -> SessionResult<bool> {
        let (tx, rx) = oneshot::channel();
        let msg = SessionAction::RemovePlayer {
            respond_to: tx,
            name: name.into(),
        };
        self.execute(msg, rx).await
    }

    /// Returns whether the category is now enabled.
    pub async fn toggle_category(&self, id: impl Into<String>) -> SessionResult<bool> {
        let (tx, rx) = oneshot::channel();
        let msg = SessionAction::ToggleCategory {
            respond_to: tx,
            id: id.into(),
        };
        self.execute(msg, rx).await
    }

    /// Set the round length to one of the available minute values.
    pub async fn set_duration_minutes(&self, minutes: u32) -> SessionResult<()> {
        let (tx, rx) = oneshot::channel();
        let msg = SessionAction::SetDuration {
            respond_to: tx,
            minutes,
        };
        self.execute(msg, rx).await
    }

    pub async fn start_game(&self) -> SessionResult<()> {
        let (tx, rx) = oneshot::channel();
        self.execute(SessionAction::StartGame { respond_to: tx }, rx)
            .await
    }

    pub async fn open_card(&self) -> SessionResult<()> {
        let (tx, rx) = oneshot::channel();
        self.execute(SessionAction::OpenCard { respond_to: tx }, rx)
            .await
    }

    pub async fn close_card(&self) -> SessionResult<()> {
        let (tx, rx) = oneshot::channel();
        self.execute(SessionAction::CloseCard { respond_to: tx }, rx)
            .await
    }

    pub async fn advance_player(&self) -> SessionResult<()> {
        let (tx, rx) = oneshot::channel();
        self.execute(SessionAction::AdvancePlayer { respond_to: tx }, rx)
            .await
    }

    pub async fn force_reveal(&self) -> SessionResult<()> {
        let (tx, rx) = oneshot::channel();
        self.execute(SessionAction::ForceReveal { respond_to: tx }, rx)
            .await
    }

    pub async fn play_again(&self) -> SessionResult<()> {
        let (tx, rx) = oneshot::channel();
        self.execute(SessionAction::PlayAgain { respond_to: tx }, rx)
            .await
    }

    pub async fn reset(&self) -> SessionResult<()> {
        let (tx, rx) = oneshot::channel();
        self.execute(SessionAction::Reset { respond_to: tx }, rx).await
    }

    pub async fn snapshot(&self) -> SessionResult<GameSnapshot> {
        let (tx, rx) = oneshot::channel();
        self.query(SessionAction::Snapshot { respond_to: tx }, rx)
            .await
    }

    /// Receive every event that happens to the game from now on.
    pub async fn subscribe(&self) -> SessionResult<broadcast::Receiver<GameEvent>> {
        let (tx, rx) = oneshot::channel();
        self.query(SessionAction::Subscribe { respond_to: tx }, rx)
            .await
    }
}
