use std::collections::BTreeMap;
use std::mem;

use crate::{
    card::{Card, Crime},
    error::GameError,
    events::PlayerEvent,
    player::{Player, PlayerSecrets, SeatId},
    skin::Skin,
    snapshot::TurnSnapshot,
};

/// Per-seat tables borrowed from the session for exactly one event; events
/// run to completion, so no other synchronization exists.
pub struct TurnCtx<'a> {
    pub players: &'a mut [Player],
    pub secrets: &'a [PlayerSecrets],
    pub skin: &'a Skin,
    pub solution: &'a Crime,
}

impl TurnCtx<'_> {
    fn living(&self) -> Vec<SeatId> {
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_ded)
            .map(|(i, _)| i)
            .collect()
    }
}

/// What handling one event did to the round.
#[derive(Debug)]
pub enum TurnOutcome {
    Stay,
    Advance(Turn),
    GameOver(Vec<SeatId>),
}

/// One seat's guess as it moves through disclosure and recording.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub seat: SeatId,
    pub crime: Crime,
    /// First seat clockwise of the suggester whose hand matches the triple.
    /// None when nobody can disclose.
    pub discloser: Option<SeatId>,
    pub shared: Option<Card>,
}

/// The round state machine. Events a state does not accept are logged
/// no-ops, so clients acting on stale state can never wedge a session.
#[derive(Debug)]
pub enum Turn {
    Suggest(TurnSuggest),
    Share(TurnShare),
    Record(TurnRecord),
    Accused(TurnAccused),
}

impl Turn {
    pub fn first(players: &[Player]) -> Turn {
        Turn::Suggest(TurnSuggest::new(players))
    }

    fn name(&self) -> &'static str {
        match self {
            Turn::Suggest(_) => "Suggest",
            Turn::Share(_) => "Share",
            Turn::Record(_) => "Record",
            Turn::Accused(_) => "Accused",
        }
    }

    pub fn handle(
        &mut self,
        seat: SeatId,
        event: &PlayerEvent,
        ctx: &mut TurnCtx,
    ) -> Result<TurnOutcome, GameError> {
        match (&mut *self, event) {
            (Turn::Suggest(state), PlayerEvent::Suggest { suggestion }) => {
                state.suggest(seat, suggestion, ctx)
            }
            (
                Turn::Share(state),
                PlayerEvent::ShareCard {
                    share_with,
                    share_card,
                },
            ) => state.share_card(seat, *share_with, share_card, ctx),
            (Turn::Record(state), PlayerEvent::SetReady { data }) => {
                Ok(state.set_ready(seat, *data, ctx))
            }
            (Turn::Record(state), PlayerEvent::Accuse { data }) => state.accuse(seat, data, ctx),
            (Turn::Accused(state), PlayerEvent::SetReady { data }) => {
                Ok(state.set_ready(seat, *data, ctx))
            }
            (state, event) => {
                log::debug!("seat {seat}: ignoring {event:?} in {} state", state.name());
                Ok(TurnOutcome::Stay)
            }
        }
    }

    pub fn snapshot_for(&self, viewer: Option<SeatId>, players: &[Player]) -> TurnSnapshot {
        match self {
            Turn::Suggest(state) => state.snapshot_for(viewer, players),
            Turn::Share(state) => state.snapshot_for(viewer, players),
            Turn::Record(state) => state.snapshot_for(viewer, players),
            Turn::Accused(state) => state.snapshot_for(viewer, players),
        }
    }
}

fn role_name(players: &[Player], seat: SeatId) -> String {
    players[seat].role.name.clone()
}

/// First seat walking clockwise from the suggester, wrapping and skipping
/// nobody (eliminated seats still hold cards), whose hand intersects the
/// guessed triple by name.
fn find_discloser(suggester: SeatId, crime: &Crime, secrets: &[PlayerSecrets]) -> Option<SeatId> {
    let n = secrets.len();
    (1..n)
        .map(|step| (suggester + step) % n)
        .find(|&seat| secrets[seat].hand.iter().any(|card| crime.contains(card)))
}

fn share_or_record(pending: Vec<Suggestion>, players: &[Player]) -> Turn {
    let outstanding = pending
        .iter()
        .any(|s| s.discloser.is_some() && s.shared.is_none());
    if outstanding {
        Turn::Share(TurnShare { pending })
    } else {
        Turn::Record(TurnRecord::new(pending, players))
    }
}

#[derive(Debug)]
pub struct TurnSuggest {
    suggestions: Vec<Option<Crime>>,
}

impl TurnSuggest {
    pub fn new(players: &[Player]) -> Self {
        TurnSuggest {
            suggestions: vec![None; players.len()],
        }
    }

    fn suggest(
        &mut self,
        seat: SeatId,
        crime: &Crime,
        ctx: &mut TurnCtx,
    ) -> Result<TurnOutcome, GameError> {
        if seat >= ctx.players.len() || ctx.players[seat].is_ded {
            log::debug!("seat {seat}: suggestion from eliminated or unknown seat ignored");
            return Ok(TurnOutcome::Stay);
        }
        if !ctx.skin.has_crime(crime) {
            return Err(GameError::InvalidCrime);
        }

        self.suggestions[seat] = Some(crime.clone());

        let all_in = ctx
            .living()
            .into_iter()
            .all(|s| self.suggestions[s].is_some());
        if !all_in {
            return Ok(TurnOutcome::Stay);
        }

        let pending = self
            .suggestions
            .iter()
            .enumerate()
            .filter_map(|(s, crime)| {
                crime.clone().map(|crime| Suggestion {
                    seat: s,
                    discloser: find_discloser(s, &crime, ctx.secrets),
                    crime,
                    shared: None,
                })
            })
            .collect();
        Ok(TurnOutcome::Advance(share_or_record(pending, ctx.players)))
    }

    fn snapshot_for(&self, viewer: Option<SeatId>, players: &[Player]) -> TurnSnapshot {
        TurnSnapshot::Suggest {
            suggestion: viewer.and_then(|s| self.suggestions.get(s).cloned().flatten()),
            player_is_ready: players
                .iter()
                .enumerate()
                .filter(|(_, p)| !p.is_ded)
                .map(|(i, p)| (p.role.name.clone(), self.suggestions[i].is_some()))
                .collect(),
        }
    }
}

#[derive(Debug)]
pub struct TurnShare {
    pending: Vec<Suggestion>,
}

impl TurnShare {
    fn share_card(
        &mut self,
        seat: SeatId,
        share_with: SeatId,
        card: &Card,
        ctx: &mut TurnCtx,
    ) -> Result<TurnOutcome, GameError> {
        let Some(entry) = self.pending.iter_mut().find(|s| s.seat == share_with) else {
            log::debug!("seat {seat}: disclosure for unknown suggester {share_with} ignored");
            return Ok(TurnOutcome::Stay);
        };
        if entry.discloser != Some(seat) {
            log::debug!("seat {seat}: not the discloser for suggester {share_with}, ignored");
            return Ok(TurnOutcome::Stay);
        }
        if !ctx.secrets[seat].hand.contains(card) || !entry.crime.contains(card) {
            return Err(GameError::InvalidShare);
        }

        entry.shared = Some(card.clone());

        let outstanding = self
            .pending
            .iter()
            .any(|s| s.discloser.is_some() && s.shared.is_none());
        if outstanding {
            Ok(TurnOutcome::Stay)
        } else {
            Ok(TurnOutcome::Advance(Turn::Record(TurnRecord::new(
                mem::take(&mut self.pending),
                ctx.players,
            ))))
        }
    }

    fn snapshot_for(&self, viewer: Option<SeatId>, players: &[Player]) -> TurnSnapshot {
        let shared_cards = self
            .pending
            .iter()
            .filter(|s| viewer.is_some() && s.discloser == viewer)
            .map(|s| (role_name(players, s.seat), s.shared.clone()))
            .collect();
        // A seat is ready once it has answered every disclosure it owes.
        let player_is_ready = players
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let done = self
                    .pending
                    .iter()
                    .filter(|s| s.discloser == Some(i))
                    .all(|s| s.shared.is_some());
                (p.role.name.clone(), done)
            })
            .collect();
        TurnSnapshot::Share {
            suggestions: self.suggestion_map(players),
            share_seats: self.share_seat_map(players),
            shared_cards,
            player_is_ready,
        }
    }

    fn suggestion_map(&self, players: &[Player]) -> BTreeMap<String, Crime> {
        suggestion_map(&self.pending, players)
    }

    fn share_seat_map(&self, players: &[Player]) -> BTreeMap<String, Option<SeatId>> {
        share_seat_map(&self.pending, players)
    }
}

fn suggestion_map(pending: &[Suggestion], players: &[Player]) -> BTreeMap<String, Crime> {
    pending
        .iter()
        .map(|s| (role_name(players, s.seat), s.crime.clone()))
        .collect()
}

fn share_seat_map(pending: &[Suggestion], players: &[Player]) -> BTreeMap<String, Option<SeatId>> {
    pending
        .iter()
        .map(|s| (role_name(players, s.seat), s.discloser))
        .collect()
}

/// Resolved guesses on display; accusations are lodged here.
#[derive(Debug)]
pub struct TurnRecord {
    resolved: Vec<Suggestion>,
    failed: Vec<(SeatId, Crime)>,
    ready: Vec<bool>,
}

impl TurnRecord {
    fn new(resolved: Vec<Suggestion>, players: &[Player]) -> Self {
        TurnRecord {
            resolved,
            failed: vec![],
            ready: vec![false; players.len()],
        }
    }

    fn set_ready(&mut self, seat: SeatId, value: bool, ctx: &mut TurnCtx) -> TurnOutcome {
        if seat >= ctx.players.len() || ctx.players[seat].is_ded {
            log::debug!("seat {seat}: ready flag from eliminated or unknown seat ignored");
            return TurnOutcome::Stay;
        }
        self.ready[seat] = value;
        if value {
            self.check_gate(ctx)
        } else {
            TurnOutcome::Stay
        }
    }

    fn accuse(
        &mut self,
        seat: SeatId,
        crime: &Crime,
        ctx: &mut TurnCtx,
    ) -> Result<TurnOutcome, GameError> {
        if seat >= ctx.players.len() || ctx.players[seat].is_ded {
            log::debug!("seat {seat}: accusation from eliminated or unknown seat ignored");
            return Ok(TurnOutcome::Stay);
        }
        if !ctx.skin.has_crime(crime) {
            return Err(GameError::InvalidCrime);
        }
        if crime == ctx.solution {
            return Ok(TurnOutcome::GameOver(vec![seat]));
        }

        ctx.players[seat].is_ded = true;
        self.failed.push((seat, crime.clone()));
        Ok(self.check_gate(ctx))
    }

    fn check_gate(&mut self, ctx: &mut TurnCtx) -> TurnOutcome {
        let living = ctx.living();
        if living.len() <= 1 {
            return TurnOutcome::GameOver(living);
        }
        if !living.iter().all(|&s| self.ready[s]) {
            return TurnOutcome::Stay;
        }
        if self.failed.is_empty() {
            TurnOutcome::Advance(Turn::Suggest(TurnSuggest::new(ctx.players)))
        } else {
            TurnOutcome::Advance(Turn::Accused(TurnAccused::new(
                mem::take(&mut self.failed),
                ctx.players,
            )))
        }
    }

    fn snapshot_for(&self, viewer: Option<SeatId>, players: &[Player]) -> TurnSnapshot {
        let shared_cards = self
            .resolved
            .iter()
            .map(|s| {
                let entitled =
                    viewer == Some(s.seat) || (s.discloser.is_some() && viewer == s.discloser);
                let card = if entitled { s.shared.clone() } else { None };
                (role_name(players, s.seat), card)
            })
            .collect();
        TurnSnapshot::Record {
            suggestions: suggestion_map(&self.resolved, players),
            share_seats: share_seat_map(&self.resolved, players),
            shared_cards,
            accusation: viewer.and_then(|v| {
                self.failed
                    .iter()
                    .find(|(s, _)| *s == v)
                    .map(|(_, c)| c.clone())
            }),
            player_is_ready: ready_map(&self.ready, players),
        }
    }
}

fn ready_map(ready: &[bool], players: &[Player]) -> BTreeMap<String, bool> {
    players
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.is_ded)
        .map(|(i, p)| (p.role.name.clone(), ready[i]))
        .collect()
}

/// Interlude after failed accusations.
#[derive(Debug)]
pub struct TurnAccused {
    failed: Vec<(SeatId, Crime)>,
    ready: Vec<bool>,
}

impl TurnAccused {
    fn new(failed: Vec<(SeatId, Crime)>, players: &[Player]) -> Self {
        TurnAccused {
            failed,
            ready: vec![false; players.len()],
        }
    }

    fn set_ready(&mut self, seat: SeatId, value: bool, ctx: &mut TurnCtx) -> TurnOutcome {
        if seat >= ctx.players.len() || ctx.players[seat].is_ded {
            log::debug!("seat {seat}: ready flag from eliminated or unknown seat ignored");
            return TurnOutcome::Stay;
        }
        self.ready[seat] = value;

        let living = ctx.living();
        if value && living.iter().all(|&s| self.ready[s]) {
            TurnOutcome::Advance(Turn::Suggest(TurnSuggest::new(ctx.players)))
        } else {
            TurnOutcome::Stay
        }
    }

    fn snapshot_for(&self, _viewer: Option<SeatId>, players: &[Player]) -> TurnSnapshot {
        TurnSnapshot::Accused {
            failed_accusations: self
                .failed
                .iter()
                .map(|(s, c)| (role_name(players, *s), c.clone()))
                .collect(),
            player_is_ready: ready_map(&self.ready, players),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{PlaceCard, RoleCard, ToolCard};

    fn test_skin() -> Skin {
        Skin {
            skin_name: "test".to_string(),
            tool_descriptor: "Tool".to_string(),
            roles: ["A", "B", "C"]
                .map(|n| RoleCard {
                    name: n.to_string(),
                    color: String::new(),
                })
                .to_vec(),
            tools: ["T1", "T2"]
                .map(|n| ToolCard {
                    name: n.to_string(),
                })
                .to_vec(),
            places: ["P1", "P2"]
                .map(|n| PlaceCard {
                    name: n.to_string(),
                })
                .to_vec(),
        }
    }

    struct Fixture {
        skin: Skin,
        players: Vec<Player>,
        secrets: Vec<PlayerSecrets>,
        solution: Crime,
    }

    impl Fixture {
        /// Three seats A, B, C. Solution is (A, T1, P1); the remaining deck
        /// {B, C, T2, P2} is dealt as A: [B, T2], B: [C], C: [P2].
        fn new() -> Self {
            let skin = test_skin();
            let solution = Crime {
                role: skin.roles[0].clone(),
                tool: skin.tools[0].clone(),
                place: skin.places[0].clone(),
            };
            let hands = vec![
                vec![
                    Card::Role(skin.roles[1].clone()),
                    Card::Tool(skin.tools[1].clone()),
                ],
                vec![Card::Role(skin.roles[2].clone())],
                vec![Card::Place(skin.places[1].clone())],
            ];
            let players = skin.roles[..3]
                .iter()
                .enumerate()
                .map(|(i, role)| Player {
                    role: role.clone(),
                    name: format!("player {i}"),
                    is_connected: true,
                    is_ded: false,
                    hand_size: hands[i].len(),
                })
                .collect();
            let secrets = hands
                .into_iter()
                .enumerate()
                .map(|(i, hand)| PlayerSecrets {
                    index: i,
                    hand,
                    notes: Default::default(),
                })
                .collect();
            Fixture {
                skin,
                players,
                secrets,
                solution,
            }
        }

        fn ctx(&mut self) -> TurnCtx {
            TurnCtx {
                players: &mut self.players,
                secrets: &self.secrets,
                skin: &self.skin,
                solution: &self.solution,
            }
        }

        fn crime(&self, role: usize, tool: usize, place: usize) -> Crime {
            Crime {
                role: self.skin.roles[role].clone(),
                tool: self.skin.tools[tool].clone(),
                place: self.skin.places[place].clone(),
            }
        }
    }

    fn suggest(turn: &mut Turn, fix: &mut Fixture, seat: SeatId, crime: Crime) -> TurnOutcome {
        turn.handle(seat, &PlayerEvent::Suggest { suggestion: crime }, &mut fix.ctx())
            .unwrap()
    }

    fn advance(outcome: TurnOutcome) -> Turn {
        match outcome {
            TurnOutcome::Advance(turn) => turn,
            other => panic!("expected an advance, got {other:?}"),
        }
    }

    /// Drives a fresh Suggest round where everyone guesses the solution
    /// (which nobody holds) so it lands in Record without disclosures.
    fn to_record(fix: &mut Fixture) -> Turn {
        let mut turn = Turn::first(&fix.players);
        let mut last = TurnOutcome::Stay;
        for seat in 0..3 {
            if fix.players[seat].is_ded {
                continue;
            }
            let crime = fix.solution.clone();
            last = suggest(&mut turn, fix, seat, crime);
        }
        advance(last)
    }

    #[test]
    fn round_should_wait_for_every_living_seat_to_suggest() {
        let mut fix = Fixture::new();
        let mut turn = Turn::first(&fix.players);

        let crime = fix.crime(0, 0, 0);
        assert!(matches!(
            suggest(&mut turn, &mut fix, 0, crime),
            TurnOutcome::Stay
        ));

        match turn.snapshot_for(Some(0), &fix.players) {
            TurnSnapshot::Suggest {
                suggestion,
                player_is_ready,
            } => {
                assert!(suggestion.is_some());
                assert_eq!(player_is_ready["A"], true);
                assert_eq!(player_is_ready["B"], false);
            }
            other => panic!("unexpected snapshot {other:?}"),
        }
    }

    #[test]
    fn unheld_suggestions_should_skip_share_and_record_no_card() {
        let mut fix = Fixture::new();
        let turn = to_record(&mut fix);

        match turn.snapshot_for(Some(0), &fix.players) {
            TurnSnapshot::Record {
                share_seats,
                shared_cards,
                ..
            } => {
                assert_eq!(share_seats["A"], None);
                assert_eq!(shared_cards["A"], None);
            }
            other => panic!("expected Record, got {other:?}"),
        }
    }

    #[test]
    fn held_suggestion_should_name_first_clockwise_discloser() {
        let mut fix = Fixture::new();
        let mut turn = Turn::first(&fix.players);

        // Seat 0 guesses (C, T1, P1): role C sits in seat 1's hand.
        let probing = fix.crime(2, 0, 0);
        let solution = fix.solution.clone();
        suggest(&mut turn, &mut fix, 0, probing);
        suggest(&mut turn, &mut fix, 1, solution.clone());
        let turn = advance(suggest(&mut turn, &mut fix, 2, solution));

        match turn.snapshot_for(None, &fix.players) {
            TurnSnapshot::Share { share_seats, .. } => {
                assert_eq!(share_seats["A"], Some(1));
                assert_eq!(share_seats["B"], None);
                assert_eq!(share_seats["C"], None);
            }
            other => panic!("expected Share, got {other:?}"),
        }
    }

    #[test]
    fn share_card_should_reject_cards_outside_hand_or_triple() {
        let mut fix = Fixture::new();
        let mut turn = Turn::first(&fix.players);

        // Seat 2 guesses (B, T1, P1); seat 0 holds role B and must disclose.
        let probing = fix.crime(1, 0, 0);
        let solution = fix.solution.clone();
        suggest(&mut turn, &mut fix, 0, solution.clone());
        suggest(&mut turn, &mut fix, 1, solution);
        let mut turn = advance(suggest(&mut turn, &mut fix, 2, probing));

        // In the triple but not in seat 0's hand.
        let not_held = PlayerEvent::ShareCard {
            share_with: 2,
            share_card: Card::Tool(fix.skin.tools[0].clone()),
        };
        assert_eq!(
            turn.handle(0, &not_held, &mut fix.ctx()).unwrap_err(),
            GameError::InvalidShare
        );

        // In seat 0's hand but not in the triple.
        let not_in_triple = PlayerEvent::ShareCard {
            share_with: 2,
            share_card: Card::Tool(fix.skin.tools[1].clone()),
        };
        assert_eq!(
            turn.handle(0, &not_in_triple, &mut fix.ctx()).unwrap_err(),
            GameError::InvalidShare
        );

        // The matching card from the wrong seat is a stale no-op.
        let valid = PlayerEvent::ShareCard {
            share_with: 2,
            share_card: Card::Role(fix.skin.roles[1].clone()),
        };
        assert!(matches!(
            turn.handle(1, &valid, &mut fix.ctx()).unwrap(),
            TurnOutcome::Stay
        ));

        // From the named discloser it completes the disclosures.
        let outcome = turn.handle(0, &valid, &mut fix.ctx()).unwrap();
        assert!(matches!(advance(outcome), Turn::Record(_)));
    }

    #[test]
    fn record_should_show_shared_card_only_to_suggester_and_discloser() {
        let mut fix = Fixture::new();
        let mut turn = Turn::first(&fix.players);

        let probing = fix.crime(2, 0, 0);
        let solution = fix.solution.clone();
        suggest(&mut turn, &mut fix, 0, probing);
        suggest(&mut turn, &mut fix, 1, solution.clone());
        let mut turn = advance(suggest(&mut turn, &mut fix, 2, solution));

        let share = PlayerEvent::ShareCard {
            share_with: 0,
            share_card: Card::Role(fix.skin.roles[2].clone()),
        };
        let turn = advance(turn.handle(1, &share, &mut fix.ctx()).unwrap());

        let shared_for = |viewer: Option<SeatId>| match turn.snapshot_for(viewer, &fix.players) {
            TurnSnapshot::Record { shared_cards, .. } => shared_cards["A"].clone(),
            other => panic!("expected Record, got {other:?}"),
        };

        let revealed = Card::Role(fix.skin.roles[2].clone());
        assert_eq!(shared_for(Some(0)), Some(revealed.clone())); // suggester
        assert_eq!(shared_for(Some(1)), Some(revealed)); // discloser
        assert_eq!(shared_for(Some(2)), None); // third seat
        assert_eq!(shared_for(None), None); // spectator
    }

    #[test]
    fn correct_accusation_should_win_immediately() {
        let mut fix = Fixture::new();
        let mut turn = to_record(&mut fix);

        let accuse = PlayerEvent::Accuse {
            data: fix.solution.clone(),
        };
        match turn.handle(1, &accuse, &mut fix.ctx()).unwrap() {
            TurnOutcome::GameOver(winners) => assert_eq!(winners, vec![1]),
            other => panic!("expected game over, got {other:?}"),
        }
        assert!(!fix.players[1].is_ded);
    }

    #[test]
    fn accusation_outside_skin_should_fail_without_state_change() {
        let mut fix = Fixture::new();
        let mut turn = to_record(&mut fix);

        let foreign = Crime {
            role: RoleCard {
                name: "Imposter".to_string(),
                color: String::new(),
            },
            tool: fix.skin.tools[0].clone(),
            place: fix.skin.places[0].clone(),
        };
        let accuse = PlayerEvent::Accuse { data: foreign };
        assert_eq!(
            turn.handle(0, &accuse, &mut fix.ctx()).unwrap_err(),
            GameError::InvalidCrime
        );
        assert!(!fix.players[0].is_ded);
    }

    #[test]
    fn wrong_accusation_should_eliminate_and_route_through_accused() {
        let mut fix = Fixture::new();
        let mut turn = to_record(&mut fix);

        let wrong = fix.crime(1, 1, 1);
        let accuse = PlayerEvent::Accuse { data: wrong };
        assert!(matches!(
            turn.handle(2, &accuse, &mut fix.ctx()).unwrap(),
            TurnOutcome::Stay
        ));
        assert!(fix.players[2].is_ded);

        // The two survivors flag ready; the round detours through Accused.
        let ready = PlayerEvent::SetReady { data: true };
        assert!(matches!(
            turn.handle(0, &ready, &mut fix.ctx()).unwrap(),
            TurnOutcome::Stay
        ));
        let mut turn = advance(turn.handle(1, &ready, &mut fix.ctx()).unwrap());

        match turn.snapshot_for(None, &fix.players) {
            TurnSnapshot::Accused {
                failed_accusations,
                player_is_ready,
            } => {
                assert!(failed_accusations.contains_key("C"));
                assert!(!player_is_ready.contains_key("C"));
            }
            other => panic!("expected Accused, got {other:?}"),
        }

        // All living ready again: back to Suggest.
        assert!(matches!(
            turn.handle(0, &ready, &mut fix.ctx()).unwrap(),
            TurnOutcome::Stay
        ));
        let turn = advance(turn.handle(1, &ready, &mut fix.ctx()).unwrap());
        assert!(matches!(turn, Turn::Suggest(_)));
    }

    #[test]
    fn last_living_seat_should_win_without_further_ready_signals() {
        let mut fix = Fixture::new();
        fix.players[0].is_ded = true;
        let mut turn = to_record(&mut fix);

        let wrong = fix.crime(1, 1, 1);
        let accuse = PlayerEvent::Accuse { data: wrong };
        match turn.handle(1, &accuse, &mut fix.ctx()).unwrap() {
            TurnOutcome::GameOver(winners) => assert_eq!(winners, vec![2]),
            other => panic!("expected game over, got {other:?}"),
        }
    }

    #[test]
    fn stale_events_should_be_silent_noops() {
        let mut fix = Fixture::new();
        let mut turn = Turn::first(&fix.players);

        let ready = PlayerEvent::SetReady { data: true };
        assert!(matches!(
            turn.handle(0, &ready, &mut fix.ctx()).unwrap(),
            TurnOutcome::Stay
        ));

        let accuse = PlayerEvent::Accuse {
            data: fix.solution.clone(),
        };
        assert!(matches!(
            turn.handle(0, &accuse, &mut fix.ctx()).unwrap(),
            TurnOutcome::Stay
        ));
    }

    #[test]
    fn eliminated_seats_should_not_block_the_suggest_round() {
        let mut fix = Fixture::new();
        fix.players[2].is_ded = true;
        let mut turn = Turn::first(&fix.players);

        // The dead seat's suggestion is ignored outright.
        let solution = fix.solution.clone();
        assert!(matches!(
            suggest(&mut turn, &mut fix, 2, solution.clone()),
            TurnOutcome::Stay
        ));

        suggest(&mut turn, &mut fix, 0, solution.clone());
        let outcome = suggest(&mut turn, &mut fix, 1, solution);
        assert!(matches!(advance(outcome), Turn::Record(_)));
    }

    #[test]
    fn dead_seats_hands_should_still_be_probed_for_disclosure() {
        let mut fix = Fixture::new();
        fix.players[1].is_ded = true;
        let mut turn = Turn::first(&fix.players);

        // Seat 2 guesses role C, held by the eliminated seat 1.
        let probing = fix.crime(2, 0, 0);
        let solution = fix.solution.clone();
        suggest(&mut turn, &mut fix, 0, solution);
        let outcome = suggest(&mut turn, &mut fix, 2, probing);
        let turn = advance(outcome);

        match turn.snapshot_for(None, &fix.players) {
            TurnSnapshot::Share { share_seats, .. } => assert_eq!(share_seats["C"], Some(1)),
            other => panic!("expected Share, got {other:?}"),
        }
    }
}
