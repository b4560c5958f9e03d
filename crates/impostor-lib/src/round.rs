use std::collections::{BTreeSet, HashSet};

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{
    catalog::{Catalog, Category},
    error::{Constraint, GameResult},
    player::{CardView, Player},
    settings::RosterLimits,
};

/// Source of the uniform choices made when generating a round.
pub trait RandomSource {
    /// A uniformly distributed integer in `[0, n)`. `n` is never zero.
    fn uniform_int(&mut self, n: usize) -> usize;
}

/// [`RandomSource`] backed by any [`rand`] generator.
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn uniform_int(&mut self, n: usize) -> usize {
        self.0.gen_range(0..n)
    }
}

impl RngSource<StdRng> {
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl<T: RandomSource + ?Sized> RandomSource for Box<T> {
    fn uniform_int(&mut self, n: usize) -> usize {
        (**self).uniform_int(n)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct RoundData {
    /// Label of the chosen category.
    pub category: String,
    pub word: String,
    pub hint: String,
    pub impostor_name: String,
}

impl RoundData {
    pub fn card_for(&self, player: &Player) -> CardView {
        let category = self.category.clone();
        if player.is_impostor {
            CardView::Impostor {
                category,
                hint: self.hint.clone(),
            }
        } else {
            CardView::Crew {
                category,
                word: self.word.clone(),
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub data: RoundData,
    pub players: Vec<Player>,
    pub impostor_index: usize,
}

/// Build a new round for `names`, drawing the category from `enabled`.
///
/// The impostor, the category and the item within the category are three independent uniform
/// draws from `rng`. Categories are drawn in catalog order, ignoring enabled ids the catalog
/// doesn't contain.
///
/// # Errors
///
/// A [`Constraint`] violation if `limits` are invalid, the roster size is outside of them, names
/// repeat, or none of the enabled categories are in `catalog`.
pub fn generate(
    names: &[String],
    enabled: &BTreeSet<String>,
    catalog: &Catalog,
    limits: RosterLimits,
    rng: &mut impl RandomSource,
) -> GameResult<Round> {
    limits.check(names.len())?;
    let mut seen = HashSet::with_capacity(names.len());
    if let Some(dup) = names.iter().find(|n| !seen.insert(n.as_str())) {
        return Err(Constraint::DuplicateName(dup.clone()).into());
    }

    let candidates: Vec<&Category> = catalog
        .list_categories()
        .iter()
        .filter(|c| enabled.contains(&c.id))
        .collect();
    if candidates.is_empty() {
        return Err(Constraint::NoEnabledCategories.into());
    }

    let impostor_index = rng.uniform_int(names.len());
    let category = candidates[rng.uniform_int(candidates.len())];
    let item = &category.items[rng.uniform_int(category.items.len())];

    let players: Vec<Player> = names
        .iter()
        .enumerate()
        .map(|(i, name)| Player::new(i, name.clone(), i == impostor_index))
        .collect();

    tracing::debug!(
        category = %category.id,
        players = players.len(),
        "Generated new round"
    );
    Ok(Round {
        data: RoundData {
            category: category.label.clone(),
            word: item.word.clone(),
            hint: item.hint.clone(),
            impostor_name: names[impostor_index].clone(),
        },
        players,
        impostor_index,
    })
}
