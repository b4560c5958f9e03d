//! A line based terminal front end.
//!
//! Typed commands are mapped onto [`SessionHandle`] calls, and the game's events drive what is
//! printed. Secrets only reach the screen while a card is open, and the screen is cleared again
//! as soon as it's closed.

use std::sync::Arc;

use impostor_lib::{
    catalog::Catalog,
    event::{GameEvent, SoundCue},
    game_state::{CardState, GameSnapshot, Phase},
    player::CardView,
    timer::format_clock,
};
use itertools::Itertools;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::select;
use tokio::sync::broadcast::error::RecvError;

use crate::session::{session_handle::SessionHandle, SessionError, SessionResult};

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";
const BELL: &str = "\x07";

const HELP: &str = "\
Setup:      add <name> | remove <name> | toggle <category> | length <3|5|8> | categories | start
Card pass:  open | close | next
Discussion: reveal
Game over:  again | reset
Any time:   status | mute | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Remove(String),
    Toggle(String),
    Length(u32),
    Categories,
    Start,
    Open,
    Close,
    Next,
    Reveal,
    Again,
    Reset,
    Status,
    /// Toggle the terminal bell. Handled by the console itself.
    Mute,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}', try 'help'")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("'{0}' is not a number of minutes")]
    BadMinutes(String),
}

/// Parse one line of input. Blank lines parse to `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let argument = |name: &'static str| {
        if rest.is_empty() {
            Err(CommandError::MissingArgument(name))
        } else {
            Ok(rest.to_owned())
        }
    };

    let command = match word.to_lowercase().as_str() {
        "add" => Command::Add(argument("add")?),
        "remove" | "rm" => Command::Remove(argument("remove")?),
        "toggle" => Command::Toggle(argument("toggle")?),
        "length" => {
            let minutes = argument("length")?;
            Command::Length(
                minutes
                    .parse()
                    .map_err(|_| CommandError::BadMinutes(minutes))?,
            )
        }
        "categories" => Command::Categories,
        "start" => Command::Start,
        "open" => Command::Open,
        "close" => Command::Close,
        "next" => Command::Next,
        "reveal" => Command::Reveal,
        "again" => Command::Again,
        "reset" => Command::Reset,
        "status" => Command::Status,
        "mute" => Command::Mute,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_owned())),
    };
    Ok(Some(command))
}

/// Run a command against the session, returning anything the command itself wants printed.
async fn execute(
    handle: &SessionHandle,
    catalog: &Catalog,
    command: Command,
) -> SessionResult<Option<String>> {
    match command {
        Command::Add(name) => handle.add_player(name).await?,
        Command::Remove(name) => {
            if !handle.remove_player(name.as_str()).await? {
                return Ok(Some(format!("Nobody called '{name}' has joined")));
            }
        }
        Command::Toggle(id) => {
            handle.toggle_category(id).await?;
        }
        Command::Length(minutes) => handle.set_duration_minutes(minutes).await?,
        Command::Categories => {
            let snapshot = handle.snapshot().await?;
            return Ok(Some(render_categories(&snapshot, catalog)));
        }
        Command::Start => handle.start_game().await?,
        Command::Open => {
            handle.open_card().await?;
            let snapshot = handle.snapshot().await?;
            return Ok(snapshot.open_card.as_ref().map(render_card));
        }
        Command::Close => handle.close_card().await?,
        Command::Next => handle.advance_player().await?,
        Command::Reveal => handle.force_reveal().await?,
        Command::Again => handle.play_again().await?,
        Command::Reset => handle.reset().await?,
        Command::Status => {
            let snapshot = handle.snapshot().await?;
            return Ok(Some(render_status(&snapshot, catalog)));
        }
        Command::Help => return Ok(Some(HELP.to_owned())),
        Command::Mute | Command::Quit => {}
    }
    Ok(None)
}

pub fn render_card(card: &CardView) -> String {
    match card {
        CardView::Crew { category, word } => {
            format!("You are CREW\n  Category: {category}\n  Word:     {word}\n\nType 'close' when done.")
        }
        CardView::Impostor { category, hint } => format!(
            "You are the IMPOSTOR\n  Category: {category}\n  Hint:     {hint}\n\nBlend in. Type 'close' when done."
        ),
    }
}

pub fn render_categories(snapshot: &GameSnapshot, catalog: &Catalog) -> String {
    catalog
        .list_categories()
        .iter()
        .map(|c| {
            let mark = if snapshot.settings.is_enabled(&c.id) {
                'x'
            } else {
                ' '
            };
            format!("[{mark}] {:<14} {}", c.id, c.label)
        })
        .join("\n")
}

/// Describe where the game is and what to do next.
pub fn render_status(snapshot: &GameSnapshot, catalog: &Catalog) -> String {
    let mut lines = Vec::new();
    match snapshot.phase {
        Phase::Setup => {
            let players = if snapshot.roster.is_empty() {
                "none yet".to_owned()
            } else {
                snapshot.roster.iter().join(", ")
            };
            let categories = catalog
                .list_categories()
                .iter()
                .filter(|c| snapshot.settings.is_enabled(&c.id))
                .map(|c| c.label.as_str())
                .join(", ");
            lines.push(format!("Players: {players}"));
            lines.push(format!(
                "Round length: {} min",
                snapshot.settings.length.minutes()
            ));
            lines.push(format!("Categories: {categories}"));
            lines.push(if snapshot.can_start {
                "Type 'start' when everyone has joined.".to_owned()
            } else {
                format!("Add at least {} players to start.", snapshot.limits.min)
            });
        }
        Phase::CardPass => {
            let Some((index, name)) = &snapshot.current_player else {
                return String::new();
            };
            lines.push(format!(
                "Player {} of {}",
                index + 1,
                snapshot.player_count
            ));
            lines.push(match snapshot.card {
                CardState::Closed => {
                    format!("Hand the device to {name}. {name}, type 'open' to see your card.")
                }
                CardState::Open => format!("{name} is looking at their card."),
                CardState::Finished if snapshot.is_last_player => {
                    "Everyone has seen their card. Type 'next' to start the timer.".to_owned()
                }
                CardState::Finished => "Card closed. Pass the device on and type 'next'.".to_owned(),
            });
        }
        Phase::Timer => {
            let remaining = snapshot.seconds_remaining.unwrap_or_default();
            lines.push("Discussion! Ask questions, find the impostor.".to_owned());
            if let Some(category) = &snapshot.category {
                lines.push(format!("Category: {category}"));
            }
            let hurry = if snapshot.urgent { " Hurry!" } else { "" };
            lines.push(format!(
                "{} left.{hurry} Type 'reveal' to end the vote early.",
                format_clock(remaining)
            ));
        }
        Phase::Reveal => {
            if let Some(round) = &snapshot.revealed {
                lines.push(format!("The impostor was {}!", round.impostor_name));
                lines.push(format!("  Word:     {}", round.word));
                lines.push(format!("  Category: {}", round.category));
            }
            lines.push("Type 'again' for a new round or 'reset' for a new game.".to_owned());
        }
    }
    lines.join("\n")
}

/// Text for events that are worth a line of their own. Everything else only refreshes the status.
///
/// Audible cues ring the terminal bell unless `muted`.
pub fn render_event(event: &GameEvent, muted: bool) -> Option<String> {
    let bell = match event.cue() {
        Some(SoundCue::Tick | SoundCue::Alarm | SoundCue::Win) if !muted => BELL,
        _ => "",
    };
    let text = match event {
        GameEvent::TimerTick { remaining, warning } if *warning || remaining % 60 == 0 => {
            format!("{} left", format_clock(*remaining))
        }
        GameEvent::TimerExpired => "Time's up!".to_owned(),
        GameEvent::RevealForced => "Voting closed.".to_owned(),
        _ => return None,
    };
    Some(format!("{bell}{text}"))
}

/// Whether an event changes what [`render_status`] would print.
fn refreshes_status(event: &GameEvent) -> bool {
    !matches!(event, GameEvent::TimerTick { .. })
}

pub async fn run(handle: SessionHandle, catalog: Arc<Catalog>) -> anyhow::Result<()> {
    let mut events = handle.subscribe().await?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    let snapshot = handle.snapshot().await?;
    let intro = format!(
        "IMPOSTOR - a social deduction word game\n{HELP}\n\n{}\n",
        render_status(&snapshot, &catalog)
    );
    stdout.write_all(intro.as_bytes()).await?;

    let mut muted = false;
    loop {
        let mut out = String::new();
        select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match parse_command(&line) {
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(Command::Mute)) => {
                        muted = !muted;
                        tracing::debug!(muted, "Toggled sound");
                        out = if muted { "Sound off" } else { "Sound on" }.to_owned();
                    }
                    Ok(Some(command)) => match execute(&handle, &catalog, command).await {
                        Ok(Some(text)) => out = text,
                        Ok(None) => {}
                        Err(SessionError::Game(e)) => out = e.to_string(),
                        Err(e) => return Err(e.into()),
                    },
                    Ok(None) => {}
                    Err(e) => out = e.to_string(),
                }
            }
            event = events.recv() => {
                let first = match event {
                    Ok(event) => event,
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Console fell behind on game events");
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                };

                // Render a burst of events from one action as a single update
                let mut refresh = false;
                let mut pending = Some(first);
                while let Some(event) = pending.take().or_else(|| events.try_recv().ok()) {
                    if event == GameEvent::CardChanged(CardState::Finished) {
                        out.push_str(CLEAR_SCREEN);
                    }
                    if let Some(text) = render_event(&event, muted) {
                        out.push_str(&text);
                        out.push('\n');
                    }
                    refresh |= refreshes_status(&event);
                }
                if refresh {
                    out.push_str(&render_status(&handle.snapshot().await?, &catalog));
                }
            }
        }

        if !out.is_empty() {
            if !out.ends_with('\n') {
                out.push('\n');
            }
            stdout.write_all(out.as_bytes()).await?;
            stdout.flush().await?;
        }
    }

    tracing::info!("Console closed");
    Ok(())
}
