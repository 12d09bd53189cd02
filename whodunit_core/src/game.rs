use std::collections::HashMap;

use rand::seq::SliceRandom;

use crate::{
    card::{Card, Crime, RoleCard},
    dealer,
    error::GameError,
    events::PlayerEvent,
    player::{init_notes, Mark, Player, PlayerSecrets, ProtoPlayer, SeatId},
    skin::{Skin, SkinBook},
    snapshot::GameSnapshot,
    turn::{Turn, TurnCtx, TurnOutcome},
};

/// Identity of a network connection, assigned by the transport. A connection
/// is not a seat: seats survive disconnects and can be re-occupied.
pub type ConnectionId = u64;

pub enum Game {
    Setup(GameSetup),
    Play(GamePlay),
}

impl Game {
    pub fn new(skins: SkinBook) -> Self {
        Game::Setup(GameSetup::new(skins))
    }

    /// Applies one inbound event. `Ok(true)` means every connection's view
    /// may have changed; `Ok(false)` means only the acting connection's did.
    pub fn process_event(
        &mut self,
        conn: ConnectionId,
        event: &PlayerEvent,
    ) -> Result<bool, GameError> {
        match self {
            Game::Setup(setup) => {
                let started = setup.process_event(conn, event)?;
                if let Some(play) = started {
                    *self = Game::Play(play);
                }
                Ok(true)
            }
            Game::Play(play) => play.process_event(conn, event),
        }
    }

    pub fn remove_connection(&mut self, conn: ConnectionId) {
        match self {
            Game::Setup(setup) => {
                setup.players_by_connection.remove(&conn);
            }
            Game::Play(play) => play.remove_connection(conn),
        }
    }

    pub fn state_for_connection(&self, conn: ConnectionId) -> GameSnapshot {
        match self {
            Game::Setup(setup) => setup.snapshot(conn),
            Game::Play(play) => play.snapshot(conn),
        }
    }
}

/// Pre-deal lobby. Seats do not exist yet; everything is keyed by connection.
pub struct GameSetup {
    skins: SkinBook,
    skin: Skin,
    players_by_connection: HashMap<ConnectionId, ProtoPlayer>,
}

impl GameSetup {
    pub fn new(skins: SkinBook) -> Self {
        let skin = skins.default_skin().clone();
        GameSetup {
            skins,
            skin,
            players_by_connection: HashMap::new(),
        }
    }

    fn process_event(
        &mut self,
        conn: ConnectionId,
        event: &PlayerEvent,
    ) -> Result<Option<GamePlay>, GameError> {
        match event {
            PlayerEvent::SetRole { data } => self.set_role(conn, data),
            PlayerEvent::SetName { data } => {
                if let Some(proto) = self.players_by_connection.get_mut(&conn) {
                    proto.name = data.clone();
                }
            }
            PlayerEvent::SetReady { data } => {
                if let Some(proto) = self.players_by_connection.get_mut(&conn) {
                    proto.is_ready = *data;
                }
            }
            PlayerEvent::SetSkin { data } => self.set_skin(data),
            PlayerEvent::Start => return Ok(self.start()),
            other => {
                log::debug!("connection {conn}: ignoring {other:?} during setup");
            }
        }
        Ok(None)
    }

    fn set_role(&mut self, conn: ConnectionId, role: &RoleCard) {
        if !self.skin.roles.contains(role) {
            log::warn!(
                "connection {conn}: role {} is not in skin {}",
                role.name,
                self.skin.skin_name
            );
            return;
        }
        let taken = self
            .players_by_connection
            .iter()
            .any(|(&c, p)| c != conn && p.role == *role);
        if taken {
            log::debug!("connection {conn}: role {} already taken", role.name);
            return;
        }
        match self.players_by_connection.get_mut(&conn) {
            Some(proto) => proto.role = role.clone(),
            None => {
                self.players_by_connection.insert(
                    conn,
                    ProtoPlayer {
                        role: role.clone(),
                        name: String::new(),
                        is_ready: false,
                    },
                );
            }
        }
    }

    fn set_skin(&mut self, name: &str) {
        let Some(skin) = self.skins.get(name) else {
            log::warn!("unknown skin {name}");
            return;
        };
        if skin.skin_name == self.skin.skin_name {
            log::debug!("skin {name} already active");
            return;
        }
        // Seats are named after the skin's role cards, so switching skins
        // invalidates every assignment.
        self.skin = skin.clone();
        self.players_by_connection.clear();
    }

    fn start(&mut self) -> Option<GamePlay> {
        let protos = &self.players_by_connection;
        if protos.len() < 2 || !protos.values().all(|p| p.is_ready) {
            log::debug!("start refused: need at least 2 seats, all ready");
            return None;
        }

        let mut rng = rand::thread_rng();
        let deal = match dealer::deal(&self.skin, protos.len(), &mut rng) {
            Ok(deal) => deal,
            Err(err) => {
                log::warn!("deal failed: {err}");
                return None;
            }
        };

        let mut entries: Vec<(ConnectionId, ProtoPlayer)> =
            self.players_by_connection.drain().collect();
        entries.shuffle(&mut rng);

        let seat_by_conn = entries
            .iter()
            .enumerate()
            .map(|(seat, (conn, _))| (*conn, seat))
            .collect();
        let players = entries
            .into_iter()
            .map(|(_, proto)| Player {
                role: proto.role,
                name: proto.name,
                is_connected: true,
                is_ded: false,
                hand_size: 0,
            })
            .collect();

        Some(GamePlay::new(
            self.skin.clone(),
            seat_by_conn,
            players,
            deal.hands,
            deal.solution,
        ))
    }

    fn snapshot(&self, conn: ConnectionId) -> GameSnapshot {
        GameSnapshot::Setup {
            skin: self.skin.clone(),
            players_by_connection: self
                .players_by_connection
                .iter()
                .map(|(c, p)| (*c, p.clone()))
                .collect(),
            connection_id: conn,
        }
    }
}

/// A dealt game. Seats and secrets are created here exactly once and never
/// recreated; `winners` flips the projection to the game-over plateau.
pub struct GamePlay {
    skin: Skin,
    solution: Crime,
    players: Vec<Player>,
    secrets: Vec<PlayerSecrets>,
    seat_by_conn: HashMap<ConnectionId, SeatId>,
    /// Secondary index; seats themselves are addressed by `SeatId`.
    seat_by_role: HashMap<String, SeatId>,
    turn: Turn,
    winners: Option<Vec<SeatId>>,
}

impl GamePlay {
    /// `players` and `hands` are parallel, in seat order.
    pub fn new(
        skin: Skin,
        seat_by_conn: HashMap<ConnectionId, SeatId>,
        mut players: Vec<Player>,
        hands: Vec<Vec<Card>>,
        solution: Crime,
    ) -> Self {
        for (seat, hand) in hands.iter().enumerate() {
            players[seat].hand_size = hand.len();
        }
        let secrets = hands
            .into_iter()
            .enumerate()
            .map(|(seat, hand)| PlayerSecrets {
                index: seat,
                notes: init_notes(&skin, &players, seat, &hand),
                hand,
            })
            .collect();
        let seat_by_role = players
            .iter()
            .enumerate()
            .map(|(seat, p)| (p.role.name.clone(), seat))
            .collect();
        let turn = Turn::first(&players);
        GamePlay {
            skin,
            solution,
            players,
            secrets,
            seat_by_conn,
            seat_by_role,
            turn,
            winners: None,
        }
    }

    fn process_event(
        &mut self,
        conn: ConnectionId,
        event: &PlayerEvent,
    ) -> Result<bool, GameError> {
        match event {
            PlayerEvent::SetRole { data } => {
                self.reclaim_seat(conn, data);
                Ok(true)
            }
            PlayerEvent::SetNote {
                subject_seat,
                card,
                marks,
            } => {
                if let Some(&seat) = self.seat_by_conn.get(&conn) {
                    self.set_note(seat, subject_seat, card, marks);
                } else {
                    log::debug!("connection {conn}: note from seatless connection ignored");
                }
                // Notes are private; nobody else's view changes.
                Ok(false)
            }
            _ => {
                let Some(&seat) = self.seat_by_conn.get(&conn) else {
                    log::debug!("connection {conn}: {event:?} from seatless connection ignored");
                    return Ok(true);
                };
                if self.winners.is_some() {
                    log::debug!("seat {seat}: game is over, {event:?} ignored");
                    return Ok(true);
                }
                let mut ctx = TurnCtx {
                    players: &mut self.players,
                    secrets: &self.secrets,
                    skin: &self.skin,
                    solution: &self.solution,
                };
                match self.turn.handle(seat, event, &mut ctx)? {
                    TurnOutcome::Stay => {}
                    TurnOutcome::Advance(next) => self.turn = next,
                    TurnOutcome::GameOver(winners) => self.winners = Some(winners),
                }
                Ok(true)
            }
        }
    }

    /// Mid-game `SetRole`: transfers occupancy of a vacated seat to a
    /// seatless connection. Never creates seats or touches secrets.
    fn reclaim_seat(&mut self, conn: ConnectionId, role: &RoleCard) {
        if self.seat_by_conn.contains_key(&conn) {
            log::debug!("connection {conn}: already seated, cannot switch roles mid-game");
            return;
        }
        let Some(&seat) = self.seat_by_role.get(&role.name) else {
            log::warn!("connection {conn}: no seat named {}", role.name);
            return;
        };
        if self.players[seat].is_connected {
            log::debug!("connection {conn}: seat {} is occupied", role.name);
            return;
        }
        self.players[seat].is_connected = true;
        self.seat_by_conn.insert(conn, seat);
    }

    fn set_note(&mut self, seat: SeatId, subject: &str, card: &Card, marks: &[Mark]) {
        if !self.seat_by_role.contains_key(subject) {
            log::debug!("seat {seat}: note for unknown seat {subject} ignored");
            return;
        }
        self.secrets[seat]
            .notes
            .entry(subject.to_string())
            .or_default()
            .insert(card.name().to_string(), marks.to_vec());
    }

    pub fn remove_connection(&mut self, conn: ConnectionId) {
        if let Some(seat) = self.seat_by_conn.remove(&conn) {
            self.players[seat].is_connected = false;
        }
    }

    fn snapshot(&self, conn: ConnectionId) -> GameSnapshot {
        let seat = self.seat_by_conn.get(&conn).copied();
        let player_secrets = seat.map(|s| self.secrets[s].clone());
        match &self.winners {
            Some(winners) => GameSnapshot::GameOver {
                skin: self.skin.clone(),
                players: self.players.clone(),
                player_secrets,
                winners: winners.clone(),
                solution: self.solution.clone(),
            },
            None => GameSnapshot::InProgress {
                skin: self.skin.clone(),
                players: self.players.clone(),
                player_secrets,
                turn_state: self.turn.snapshot_for(seat, &self.players),
            },
        }
    }
}
