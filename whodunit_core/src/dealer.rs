use itertools::Itertools;
use rand::Rng;

use crate::{
    card::{Card, Crime},
    error::GameError,
    skin::Skin,
    utils::{pick_many, pick_one},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Deal {
    pub solution: Crime,
    pub hands: Vec<Vec<Card>>,
}

/// Splits a skin's catalog into a secret solution and one hand per seat. One
/// random card of each kind forms the solution; the rest are dealt out with
/// the first `deck mod num_seats` seats receiving one extra card. Hands come
/// back sorted kind-then-name.
pub fn deal(skin: &Skin, num_seats: usize, rng: &mut impl Rng) -> Result<Deal, GameError> {
    if num_seats < 2 {
        return Err(GameError::InvalidPlayerCount(num_seats));
    }

    let mut roles = skin.roles.clone();
    let mut tools = skin.tools.clone();
    let mut places = skin.places.clone();

    let solution = Crime {
        role: pick_one(rng, &mut roles).ok_or(GameError::EmptySkin)?,
        tool: pick_one(rng, &mut tools).ok_or(GameError::EmptySkin)?,
        place: pick_one(rng, &mut places).ok_or(GameError::EmptySkin)?,
    };

    let mut deck: Vec<Card> = roles
        .into_iter()
        .map(Card::Role)
        .chain(tools.into_iter().map(Card::Tool))
        .chain(places.into_iter().map(Card::Place))
        .collect();

    let per_hand = deck.len() / num_seats;
    let gets_extra = deck.len() % num_seats;

    let hands = (0..num_seats)
        .map(|seat| {
            let count = if seat < gets_extra {
                per_hand + 1
            } else {
                per_hand
            };
            pick_many(rng, &mut deck, count)
                .into_iter()
                .sorted_by(|a, b| {
                    a.kind()
                        .cmp(&b.kind())
                        .then_with(|| a.name().cmp(b.name()))
                })
                .collect()
        })
        .collect();

    Ok(Deal { solution, hands })
}
