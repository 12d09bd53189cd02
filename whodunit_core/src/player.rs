use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::{
    card::{Card, RoleCard},
    skin::Skin,
};

/// Stable per-game identity of a participant: an index into the seat arena
/// fixed at deal time. Distinct from the network connection currently
/// occupying the seat.
pub type SeatId = usize;

/// Public per-seat state, visible to every connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub role: RoleCard,
    pub name: String,
    pub is_connected: bool,
    pub is_ded: bool,
    pub hand_size: usize,
}

/// A participant still picking a role/name during setup, keyed by connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtoPlayer {
    pub role: RoleCard,
    pub name: String,
    pub is_ready: bool,
}

/// A glyph a player can put in their notes grid. Opaque to the engine; the
/// server only stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, Serialize, Deserialize)]
pub enum Mark {
    #[serde(rename = "?")]
    #[strum(serialize = "?")]
    Question,
    #[serde(rename = "•")]
    #[strum(serialize = "•")]
    Dot,
    #[serde(rename = "✕")]
    #[strum(serialize = "✕")]
    Cross,
    #[serde(rename = "!")]
    #[strum(serialize = "!")]
    Bang,
    #[serde(rename = "◦")]
    #[strum(serialize = "◦")]
    Circle,
    #[serde(rename = "1")]
    #[strum(serialize = "1")]
    One,
    #[serde(rename = "2")]
    #[strum(serialize = "2")]
    Two,
    #[serde(rename = "3")]
    #[strum(serialize = "3")]
    Three,
    #[serde(rename = "4")]
    #[strum(serialize = "4")]
    Four,
    #[serde(rename = "5")]
    #[strum(serialize = "5")]
    Five,
    #[serde(rename = "6")]
    #[strum(serialize = "6")]
    Six,
    #[serde(rename = "7")]
    #[strum(serialize = "7")]
    Seven,
}

/// Cross-reference notes: subject seat name -> card name -> marks.
pub type Notes = BTreeMap<String, BTreeMap<String, Vec<Mark>>>;

/// Private per-seat state. Only ever attached to the owning seat's view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSecrets {
    pub index: SeatId,
    pub hand: Vec<Card>,
    pub notes: Notes,
}

/// Prefills a fresh notes grid: the owner's own column is marked for every
/// catalog card (held or not), and every other column rules out the cards the
/// owner holds.
pub fn init_notes(skin: &Skin, players: &[Player], seat: SeatId, hand: &[Card]) -> Notes {
    let mut notes = Notes::new();
    for (subject, player) in players.iter().enumerate() {
        let mut column = BTreeMap::new();
        for card in skin.full_catalog() {
            let in_hand = hand.contains(&card);
            if subject == seat {
                let mark = if in_hand { Mark::Dot } else { Mark::Cross };
                column.insert(card.name().to_string(), vec![mark]);
            } else if in_hand {
                column.insert(card.name().to_string(), vec![Mark::Cross]);
            }
        }
        notes.insert(player.role.name.clone(), column);
    }
    notes
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::skin;

    fn players(skin: &Skin, n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| Player {
                role: skin.roles[i].clone(),
                name: format!("p{i}"),
                is_connected: true,
                is_ded: false,
                hand_size: 0,
            })
            .collect()
    }

    #[test]
    fn init_notes_should_fill_own_column_for_every_catalog_card() {
        let skin = skin::classic();
        let players = players(&skin, 3);
        let hand = vec![Card::Tool(skin.tools[0].clone())];

        let notes = init_notes(&skin, &players, 0, &hand);

        let own = &notes[&players[0].role.name];
        assert_eq!(own.len(), skin.full_catalog().len());
        assert_eq!(own[&skin.tools[0].name], vec![Mark::Dot]);
        assert_eq!(own[&skin.tools[1].name], vec![Mark::Cross]);
    }

    #[test]
    fn init_notes_should_rule_out_held_cards_in_other_columns() {
        let skin = skin::classic();
        let players = players(&skin, 3);
        let hand = vec![Card::Place(skin.places[2].clone())];

        let notes = init_notes(&skin, &players, 1, &hand);

        let other = &notes[&players[2].role.name];
        assert_eq!(other.len(), 1);
        assert_eq!(other[&skin.places[2].name], vec![Mark::Cross]);
    }

    #[test]
    fn marks_should_round_trip_through_their_glyphs() {
        for mark in Mark::iter() {
            let json = serde_json::to_string(&mark).unwrap();
            assert_eq!(json, format!("\"{mark}\""));
            let back: Mark = serde_json::from_str(&json).unwrap();
            assert_eq!(back, mark);
        }
    }
}
