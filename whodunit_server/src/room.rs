use whodunit_core::{events::RoomEvent, snapshot::RoomState, ConnectionId, Game, SkinBook};

/// One table of players: the connection registry plus the single live game.
/// Rooms are fully independent of each other; each processes one event at a
/// time to completion.
pub struct Room {
    connections: Vec<ConnectionId>,
    skins: SkinBook,
    game: Game,
}

impl Room {
    pub fn new(skins: SkinBook) -> Self {
        let game = Game::new(skins.clone());
        Room {
            connections: vec![],
            skins,
            game,
        }
    }

    pub fn add_connection(&mut self, conn: ConnectionId) {
        self.connections.push(conn);
    }

    pub fn remove_connection(&mut self, conn: ConnectionId) {
        self.connections.retain(|&c| c != conn);
        self.game.remove_connection(conn);
    }

    pub fn connections(&self) -> &[ConnectionId] {
        &self.connections
    }

    /// Applies one inbound event and returns the connections whose views
    /// need refreshing: everyone for state-changing events, just the sender
    /// for private ones and for rejected input.
    pub fn process_event(&mut self, conn: ConnectionId, event: &RoomEvent) -> Vec<ConnectionId> {
        let broadcast = match event {
            RoomEvent::Restart => {
                self.game = Game::new(self.skins.clone());
                true
            }
            RoomEvent::GameEvent { event } => match self.game.process_event(conn, event) {
                Ok(broadcast) => broadcast,
                Err(err) => {
                    log::warn!("connection {conn}: event rejected: {err}");
                    false
                }
            },
        };
        if broadcast {
            self.connections.clone()
        } else {
            vec![conn]
        }
    }

    pub fn state_for(&self, conn: ConnectionId) -> RoomState {
        RoomState {
            num_connections: self.connections.len(),
            game: self.game.state_for_connection(conn),
        }
    }
}
