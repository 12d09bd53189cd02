use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Card identity is (kind, name). Hands are built from reshuffled copies of
/// the catalog and crimes arrive deserialized from the network, so equality
/// must ignore display metadata such as the role color.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct RoleCard {
    pub name: String,
    pub color: String,
}

impl PartialEq for RoleCard {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Hash for RoleCard {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToolCard {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaceCard {
    pub name: String,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
pub enum CardKind {
    Role,
    Tool,
    Place,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Card {
    Role(RoleCard),
    Tool(ToolCard),
    Place(PlaceCard),
}

impl Card {
    pub fn kind(&self) -> CardKind {
        match self {
            Card::Role(_) => CardKind::Role,
            Card::Tool(_) => CardKind::Tool,
            Card::Place(_) => CardKind::Place,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Card::Role(c) => &c.name,
            Card::Tool(c) => &c.name,
            Card::Place(c) => &c.name,
        }
    }
}

/// One role, one tool, one place. The shape of both the hidden solution and
/// any suggestion or accusation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crime {
    pub role: RoleCard,
    pub tool: ToolCard,
    pub place: PlaceCard,
}

impl Crime {
    pub fn contains(&self, card: &Card) -> bool {
        match card {
            Card::Role(c) => *c == self.role,
            Card::Tool(c) => *c == self.tool,
            Card::Place(c) => *c == self.place,
        }
    }

    pub fn cards(&self) -> [Card; 3] {
        [
            Card::Role(self.role.clone()),
            Card::Tool(self.tool.clone()),
            Card::Place(self.place.clone()),
        ]
    }
}
