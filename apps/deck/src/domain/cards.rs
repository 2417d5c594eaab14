use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// Card identity: the card's unique name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CardId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Two colors defining the card's gradient, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPair(pub String, pub String);

/// Immutable card record. Identity is `id`; content carries no behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub tags: Vec<String>,
    pub description: String,
    pub color_pair: ColorPair,
}

impl Card {
    pub fn new(
        id: impl Into<String>,
        tags: &[&str],
        description: impl Into<String>,
        colors: (&str, &str),
    ) -> Self {
        Self {
            id: CardId::new(id),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            description: description.into(),
            color_pair: ColorPair(colors.0.to_string(), colors.1.to_string()),
        }
    }
}
