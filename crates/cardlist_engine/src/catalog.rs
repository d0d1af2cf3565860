//! Reading the generated card list back as typed records.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Cards listed in the table that never appear in a kingdom supply.
pub const NON_SUPPLY_CARDS: &[&str] = &[
    "Copper", "Silver", "Gold", "Platinum", "Estate", "Duchy", "Province", "Colony", "Curse",
    "Spoils", "Potion", "Ruins", "Horse", "Plunder", "Loot",
];

/// Types that mark landscape and similar non-deck cards.
pub const NON_SUPPLY_CATEGORIES: &[&str] = &[
    "Event", "Landmark", "Project", "Way", "Boon", "Hex", "State", "Ally", "Trait", "Prophecy",
];

/// Types whose cards share one pile; each collapses to a single placeholder.
pub const MULTI_STACK_TYPES: &[&str] = &["Augur", "Fort", "Wizard", "Clash", "Knight", "Castle"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Card {
    pub name: String,
    pub set: String,
    pub types: String,
    pub cost: String,
    pub text: String,
    pub actions: String,
    pub cards: String,
    pub buys: String,
    pub coins: String,
    pub trash: String,
    pub exile: String,
    pub junk: String,
    pub gain: String,
    pub victory: String,
}

impl Card {
    pub fn has_type(&self, kind: &str) -> bool {
        self.types.contains(kind)
    }

    pub fn is_supply(&self) -> bool {
        !NON_SUPPLY_CARDS.contains(&self.name.as_str())
            && !NON_SUPPLY_CATEGORIES.iter().any(|c| self.has_type(c))
            && !MULTI_STACK_TYPES.iter().any(|t| self.has_type(t))
    }

    fn placeholder(kind: &str, example: &Card) -> Self {
        Self {
            name: kind.to_string(),
            set: example.set.clone(),
            types: example.types.clone(),
            cost: "0".to_string(),
            text: format!("This is a placeholder for the {kind} multi-stack pile."),
            ..Self::default()
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to open card list: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse card list: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSummary {
    pub total: usize,
    pub supply: usize,
    pub sets: usize,
}

pub fn load_cards(path: &Path) -> Result<Vec<Card>, CatalogError> {
    read_cards(File::open(path)?)
}

/// Parse card records; the first `+` in `Actions` is dropped (`+2` becomes `2`).
pub fn read_cards<R: Read>(reader: R) -> Result<Vec<Card>, CatalogError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    reader
        .deserialize::<Card>()
        .map(|record| -> Result<Card, CatalogError> {
            let mut card = record?;
            card.actions = card.actions.replacen('+', "", 1);
            Ok(card)
        })
        .collect()
}

/// Kingdom candidates plus one placeholder per multi-stack pile found.
pub fn supply_cards(cards: &[Card]) -> Vec<Card> {
    let mut supply: Vec<Card> = cards.iter().filter(|c| c.is_supply()).cloned().collect();
    for kind in MULTI_STACK_TYPES {
        if let Some(example) = cards.iter().find(|c| c.has_type(kind)) {
            supply.push(Card::placeholder(kind, example));
        }
    }
    supply
}

pub fn summarize(cards: &[Card]) -> CatalogSummary {
    let sets: BTreeSet<&str> = cards.iter().map(|c| c.set.as_str()).collect();
    CatalogSummary {
        total: cards.len(),
        supply: supply_cards(cards).len(),
        sets: sets.len(),
    }
}
