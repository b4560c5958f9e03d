use serde::{Deserialize, Serialize};

use crate::game_state::{CardState, Phase};
use crate::settings::RoundLength;

/// Something that happened to the game that a presentation layer may want to react to.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub enum GameEvent {
    PhaseChanged { from: Phase, to: Phase },
    /// The device should now be handed to the player at `index`.
    PlayerTurn { index: usize, name: String },
    CardChanged(CardState),
    RosterChanged { players: Vec<String> },
    CategoryToggled { id: String, enabled: bool },
    LengthChanged(RoundLength),
    TimerTick { remaining: u32, warning: bool },
    TimerExpired,
    /// The discussion was ended early, before the timer ran out.
    RevealForced,
}

/// Audio an external sound player can attach to an event. The game only names the cue.
#[derive(Debug, Copy, Clone, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Click,
    Flip,
    Start,
    Tick,
    Alarm,
    Win,
}

impl GameEvent {
    pub fn cue(&self) -> Option<SoundCue> {
        match self {
            GameEvent::PhaseChanged { to: Phase::CardPass, .. }
            | GameEvent::PhaseChanged { to: Phase::Timer, .. } => Some(SoundCue::Start),
            GameEvent::PhaseChanged { to: Phase::Setup, .. } => Some(SoundCue::Click),
            GameEvent::PhaseChanged { .. } => None,
            GameEvent::PlayerTurn { index: 0, .. } => None,
            GameEvent::PlayerTurn { .. } => Some(SoundCue::Click),
            GameEvent::CardChanged(CardState::Closed) => None,
            GameEvent::CardChanged(_) => Some(SoundCue::Flip),
            GameEvent::RosterChanged { .. }
            | GameEvent::CategoryToggled { .. }
            | GameEvent::LengthChanged(_) => Some(SoundCue::Click),
            GameEvent::TimerTick { warning: true, .. } => Some(SoundCue::Tick),
            GameEvent::TimerTick { .. } => None,
            GameEvent::TimerExpired => Some(SoundCue::Alarm),
            GameEvent::RevealForced => Some(SoundCue::Win),
        }
    }
}
