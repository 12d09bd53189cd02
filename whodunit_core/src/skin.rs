use serde::{Deserialize, Serialize};

use crate::card::{Card, Crime, PlaceCard, RoleCard, ToolCard};

/// A themed catalog of cards. Immutable once a game instance exists; role
/// names are unique within a skin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skin {
    pub skin_name: String,
    /// What the UI should call the tool column, e.g. "Weapon" or "Cookie".
    pub tool_descriptor: String,
    pub roles: Vec<RoleCard>,
    pub tools: Vec<ToolCard>,
    pub places: Vec<PlaceCard>,
}

impl Skin {
    pub fn has_card(&self, card: &Card) -> bool {
        match card {
            Card::Role(c) => self.roles.contains(c),
            Card::Tool(c) => self.tools.contains(c),
            Card::Place(c) => self.places.contains(c),
        }
    }

    pub fn has_crime(&self, crime: &Crime) -> bool {
        self.roles.contains(&crime.role)
            && self.tools.contains(&crime.tool)
            && self.places.contains(&crime.place)
    }

    pub fn full_catalog(&self) -> Vec<Card> {
        self.roles
            .iter()
            .cloned()
            .map(Card::Role)
            .chain(self.tools.iter().cloned().map(Card::Tool))
            .chain(self.places.iter().cloned().map(Card::Place))
            .collect()
    }
}

/// The set of skins a room offers. Skins are configuration handed to the
/// session at construction, not process-wide state. Non-empty by
/// construction; the first entry is the skin new games start with.
#[derive(Debug, Clone)]
pub struct SkinBook {
    skins: Vec<Skin>,
}

impl SkinBook {
    pub fn new(default: Skin, others: Vec<Skin>) -> Self {
        let mut skins = vec![default];
        skins.extend(others);
        SkinBook { skins }
    }

    pub fn builtin() -> Self {
        SkinBook::new(classic(), vec![family_cookies()])
    }

    pub fn get(&self, name: &str) -> Option<&Skin> {
        self.skins.iter().find(|s| s.skin_name == name)
    }

    pub fn default_skin(&self) -> &Skin {
        &self.skins[0]
    }
}

fn role(name: &str, color: &str) -> RoleCard {
    RoleCard {
        name: name.to_string(),
        color: color.to_string(),
    }
}

fn tool(name: &str) -> ToolCard {
    ToolCard {
        name: name.to_string(),
    }
}

fn place(name: &str) -> PlaceCard {
    PlaceCard {
        name: name.to_string(),
    }
}

pub fn classic() -> Skin {
    Skin {
        skin_name: "classic".to_string(),
        tool_descriptor: "Weapon".to_string(),
        roles: vec![
            role("Mlle. Crimson", "#a20101"),
            role("Lady Tangerine", "#fe8e16"),
            role("Gen. Dijon", "#ffc20a"),
            role("Sr. Tomatillo", "#a7c035"),
            role("Mrs. Juniper", "#7277ac"),
            role("Dr. Grape", "#8c38a8"),
            role("Ms. Fuschia", "#cc0088"),
            role("Chef Taupe", "#b19b81"),
        ],
        tools: vec![
            tool("Pistol"),
            tool("Knife"),
            tool("Bat"),
            tool("Wire"),
            tool("Hydroflask"),
            tool("Hammer"),
            tool("Pen"),
            tool("Vase"),
            tool("Spoon"),
            tool("Poison"),
        ],
        places: vec![
            place("Nook"),
            place("Closet"),
            place("Office"),
            place("Bedroom"),
            place("Den"),
            place("Entryway"),
            place("Master Bath"),
            place("Pantry"),
            place("Kitchen"),
            place("Library"),
        ],
    }
}

pub fn family_cookies() -> Skin {
    Skin {
        skin_name: "familyCookies".to_string(),
        tool_descriptor: "Cookie".to_string(),
        roles: vec![
            role("Doug", ""),
            role("Harl", ""),
            role("Steve", ""),
            role("Katharine", ""),
            role("Lucy", ""),
            role("Les", ""),
            role("Kim", ""),
        ],
        tools: vec![
            tool("Lebkuchen"),
            tool("Hazelnut Stick"),
            tool("Gingerbread"),
            tool("Spice Bar"),
            tool("Pecan Puff"),
            tool("Chocolate Walnut"),
            tool("Sand Stars"),
            tool("Almond Thumbprints"),
        ],
        places: vec![
            place("Pond Street"),
            place("Pittsfield"),
            place("Daytona Beach"),
            place("Buckingham Drive"),
            place("Aurielle Drive"),
            place("Nottingham Court"),
            place("Redwood City"),
            place("Shelburne Bay"),
        ],
    }
}
