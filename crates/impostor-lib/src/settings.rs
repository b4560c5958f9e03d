use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{
    catalog::Catalog,
    error::{Constraint, GameResult},
    MAX_PLAYERS, MIN_PLAYERS,
};

/// How long the discussion timer runs once every player has seen their card.
#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RoundLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl RoundLength {
    pub const ALL: [RoundLength; 3] = [Self::Short, Self::Medium, Self::Long];

    pub fn minutes(self) -> u32 {
        match self {
            Self::Short => 3,
            Self::Medium => 5,
            Self::Long => 8,
        }
    }

    pub fn seconds(self) -> u32 {
        self.minutes() * 60
    }

    pub fn from_minutes(minutes: u32) -> GameResult<Self> {
        Self::ALL
            .into_iter()
            .find(|l| l.minutes() == minutes)
            .ok_or_else(|| Constraint::InvalidDuration(minutes).into())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct GameSettings {
    pub length: RoundLength,
    /// Never empty, [`GameSettings::toggle_category`] refuses to remove the last entry.
    enabled_categories: BTreeSet<String>,
}

impl GameSettings {
    /// Settings with every category of `catalog` enabled.
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            length: RoundLength::default(),
            enabled_categories: catalog.ids().map(str::to_owned).collect(),
        }
    }

    pub fn enabled_categories(&self) -> &BTreeSet<String> {
        &self.enabled_categories
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.enabled_categories.contains(id)
    }

    /// Flip whether a category is used for new rounds. Returns whether it is now enabled.
    ///
    /// # Errors
    ///
    /// [`Constraint::UnknownCategory`] if `catalog` doesn't know `id` and
    /// [`Constraint::LastCategory`] if `id` is the only enabled category.
    pub fn toggle_category(&mut self, catalog: &Catalog, id: &str) -> GameResult<bool> {
        if !catalog.contains(id) {
            return Err(Constraint::UnknownCategory(id.to_owned()).into());
        }
        if self.enabled_categories.contains(id) {
            if self.enabled_categories.len() == 1 {
                return Err(Constraint::LastCategory.into());
            }
            self.enabled_categories.remove(id);
            Ok(false)
        } else {
            self.enabled_categories.insert(id.to_owned());
            Ok(true)
        }
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::new(&Catalog::builtin())
    }
}

/// Bounds on how many players a round may be generated for.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterLimits {
    pub min: usize,
    pub max: usize,
}

impl RosterLimits {
    /// Limits allowing between `min` and `max` players.
    ///
    /// # Errors
    ///
    /// [`Constraint::InvalidLimits`] unless `1 <= min <= max`.
    pub fn new(min: usize, max: usize) -> GameResult<Self> {
        let limits = Self { min, max };
        limits.validate()?;
        Ok(limits)
    }

    /// Every round needs at least one player, and the bounds must not cross.
    pub fn validate(&self) -> GameResult<()> {
        if self.min == 0 || self.min > self.max {
            return Err(Constraint::InvalidLimits {
                min: self.min,
                max: self.max,
            }
            .into());
        }
        Ok(())
    }

    pub fn check(&self, count: usize) -> GameResult<()> {
        self.validate()?;
        if count < self.min {
            return Err(Constraint::NotEnoughPlayers {
                count,
                min: self.min,
            }
            .into());
        }
        if count > self.max {
            return Err(Constraint::TooManyPlayers {
                count,
                max: self.max,
            }
            .into());
        }
        Ok(())
    }
}

impl Default for RosterLimits {
    fn default() -> Self {
        Self {
            min: MIN_PLAYERS,
            max: MAX_PLAYERS,
        }
    }
}
