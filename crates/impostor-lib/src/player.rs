use serde::{Deserialize, Serialize};

use crate::PlayerId;

/// A roster member for a single round. Players are rebuilt by every call to the round generator,
/// so the impostor flag never carries over between rounds.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub is_impostor: bool,
}

impl Player {
    pub fn new(index: usize, name: impl Into<String>, is_impostor: bool) -> Self {
        Self {
            // Rosters are capped well below u32::MAX
            id: PlayerId(index as u32),
            name: name.into(),
            is_impostor,
        }
    }
}

/// What a single player gets to see when their card is turned over.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub enum CardView {
    Crew { category: String, word: String },
    Impostor { category: String, hint: String },
}

impl CardView {
    pub fn category(&self) -> &str {
        match self {
            CardView::Crew { category, .. } | CardView::Impostor { category, .. } => category,
        }
    }

    pub fn is_impostor(&self) -> bool {
        matches!(self, CardView::Impostor { .. })
    }
}
