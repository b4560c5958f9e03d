//! The static word content the game draws rounds from.
//!
//! A [`Catalog`] is built once at startup, either from the [built-in](Catalog::builtin) content
//! or from caller supplied categories, and is read-only afterwards.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Item {
    /// What the crew is told.
    pub word: String,
    /// The vague clue the impostor gets instead.
    pub hint: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub label: String,
    pub items: Vec<Item>,
}

#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("A catalog needs at least one category")]
    Empty,
    #[error("Category at position {0} has no items")]
    EmptyCategory(usize),
    #[error("Category at position {0} reuses an id")]
    DuplicateId(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    pub fn new(categories: Vec<Category>) -> Result<Self, CatalogError> {
        if categories.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut ids = HashSet::new();
        for (i, category) in categories.iter().enumerate() {
            if category.items.is_empty() {
                return Err(CatalogError::EmptyCategory(i));
            }
            if !ids.insert(category.id.as_str()) {
                return Err(CatalogError::DuplicateId(i));
            }
        }
        Ok(Self { categories })
    }

    /// The content shipped with the game.
    pub fn builtin() -> Self {
        let categories = BUILTIN
            .iter()
            .map(|(id, label, items)| Category {
                id: (*id).to_owned(),
                label: (*label).to_owned(),
                items: items
                    .iter()
                    .map(|(word, hint)| Item {
                        word: (*word).to_owned(),
                        hint: (*hint).to_owned(),
                    })
                    .collect(),
            })
            .collect();
        Self { categories }
    }

    pub fn list_categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn get(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.id.as_str())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

type RawCategory = (&'static str, &'static str, &'static [(&'static str, &'static str)]);

const BUILTIN: &[RawCategory] = &[
    (
        "food",
        "Food",
        &[
            ("Pizza", "Dough with toppings"),
            ("Sushi", "Raw fish"),
            ("Hamburger", "Fast food"),
            ("Chocolate", "Made from cocoa"),
            ("Barbecue", "Meat over coals"),
            ("Spaghetti", "Italian noodles"),
            ("Ice cream", "Frozen dessert"),
            ("Popcorn", "Popped kernels"),
            ("Cake", "Party dessert"),
        ],
    ),
    (
        "objects",
        "Objects",
        &[
            ("Chair", "Something to sit on"),
            ("Phone", "Talk on the go"),
            ("Watch", "Keeps time"),
            ("Bottle", "Holds liquid"),
            ("Key", "Opens doors"),
            ("Book", "For reading"),
            ("Glasses", "Helps you see"),
            ("Backpack", "Carries things"),
        ],
    ),
    (
        "animals",
        "Animals",
        &[
            ("Dog", "Loyal companion"),
            ("Cat", "House feline"),
            ("Lion", "King of the jungle"),
            ("Elephant", "Big with a trunk"),
            ("Penguin", "Bird that can't fly"),
            ("Shark", "Ocean predator"),
            ("Giraffe", "Very long neck"),
            ("Owl", "Awake at night"),
            ("Kangaroo", "Carries a pouch"),
        ],
    ),
    (
        "movies",
        "Movies",
        &[
            ("Titanic", "Ship disaster"),
            ("Jaws", "Something in the water"),
            ("Star Wars", "A galaxy far away"),
            ("The Lion King", "Animated royalty"),
            ("Jurassic Park", "Extinct creatures return"),
            ("Avatar", "Blue aliens"),
            ("Frozen", "Winter sisters"),
            ("The Matrix", "Simulated reality"),
            ("Toy Story", "Living playthings"),
        ],
    ),
    (
        "countries",
        "Countries",
        &[
            ("Brazil", "South American giant"),
            ("Japan", "Island nation"),
            ("Egypt", "Ancient monuments"),
            ("Canada", "Maple leaf"),
            ("Italy", "Shaped like a boot"),
            ("Australia", "A whole continent"),
            ("Mexico", "North American neighbour"),
            ("India", "Over a billion people"),
        ],
    ),
    (
        "cities",
        "Cities",
        &[
            ("Paris", "City of lights"),
            ("New York", "Never sleeps"),
            ("Tokyo", "Huge metropolis"),
            ("London", "Big clock tower"),
            ("Rome", "Ancient empire"),
            ("Rio de Janeiro", "Famous carnival"),
            ("Dubai", "Desert skyscrapers"),
            ("Venice", "Streets of water"),
        ],
    ),
    (
        "sports",
        "Sports",
        &[
            ("Football", "Kick the ball"),
            ("Basketball", "Hoop and ball"),
            ("Tennis", "Racket and net"),
            ("Swimming", "In the pool"),
            ("Boxing", "Gloves and a ring"),
            ("Volleyball", "Hit it over the net"),
            ("Surfing", "Riding waves"),
            ("Golf", "Small hole, long distance"),
        ],
    ),
    (
        "jobs",
        "Jobs",
        &[
            ("Doctor", "Heals people"),
            ("Teacher", "Works in a classroom"),
            ("Firefighter", "Answers emergencies"),
            ("Chef", "Works in a kitchen"),
            ("Pilot", "Works up high"),
            ("Lawyer", "Works with the law"),
            ("Astronaut", "Leaves the planet"),
            ("Farmer", "Works the land"),
            ("Dentist", "Looks in your mouth"),
        ],
    ),
    (
        "series",
        "TV Series",
        &[
            ("Friends", "Sitcom about a group"),
            ("Breaking Bad", "A chemistry teacher"),
            ("Game of Thrones", "Fight for a throne"),
            ("The Simpsons", "Yellow family"),
            ("Stranger Things", "Eighties mysteries"),
            ("The Office", "Workplace comedy"),
            ("Squid Game", "Deadly contest"),
            ("Sherlock", "Famous detective"),
        ],
    ),
    (
        "characters",
        "Characters",
        &[
            ("Batman", "Hero of the night"),
            ("Mickey Mouse", "Famous cartoon"),
            ("Harry Potter", "Young wizard"),
            ("Superman", "Flies and is strong"),
            ("Mario", "Jumps on things"),
            ("Shrek", "Green and lives in a swamp"),
            ("Spider-Man", "Climbs walls"),
            ("Pikachu", "Electric creature"),
        ],
    ),
    (
        "games",
        "Games",
        &[
            ("Chess", "Board strategy"),
            ("Minecraft", "Blocks everywhere"),
            ("Monopoly", "Buy properties"),
            ("Tetris", "Falling pieces"),
            ("Poker", "Bluffing with cards"),
            ("Hide and seek", "Someone counts"),
            ("Fortnite", "Last one standing"),
            ("Dominoes", "Matching tiles"),
        ],
    ),
    (
        "brands",
        "Brands",
        &[
            ("Apple", "Tech company"),
            ("Coca-Cola", "Fizzy drink"),
            ("Nike", "Sportswear"),
            ("McDonald's", "Fast food chain"),
            ("Lego", "Plastic bricks"),
            ("Netflix", "Streaming"),
            ("Google", "Search engine"),
            ("Ferrari", "Fast and red"),
        ],
    ),
    (
        "instruments",
        "Instruments",
        &[
            ("Guitar", "Strings"),
            ("Piano", "Black and white keys"),
            ("Drums", "Percussion"),
            ("Violin", "Played with a bow"),
            ("Flute", "Wind instrument"),
            ("Trumpet", "Brass"),
            ("Harp", "Angelic strings"),
            ("Saxophone", "Heard in jazz"),
        ],
    ),
    (
        "places",
        "Places",
        &[
            ("Beach", "Sand and sun"),
            ("Hospital", "Where the sick go"),
            ("School", "Where you learn"),
            ("Airport", "Departures and arrivals"),
            ("Library", "Very quiet"),
            ("Cinema", "Big screen"),
            ("Supermarket", "Aisles of products"),
            ("Museum", "Old exhibits"),
            ("Zoo", "Animals on display"),
        ],
    ),
];
