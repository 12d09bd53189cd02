mod room;

use std::{
    collections::HashMap,
    net::{SocketAddr, UdpSocket},
    time::{Duration, Instant, SystemTime},
};

use renet::{
    transport::{NetcodeServerTransport, ServerAuthentication, ServerConfig},
    ClientId, ConnectionConfig, DefaultChannel, RenetServer, ServerEvent,
};
use tokio::time;
use whodunit_core::{events::RoomEvent, ConnectionId, SkinBook};

use crate::room::Room;

fn send_state(server: &mut RenetServer, client: ClientId, room: &Room, conn: ConnectionId) {
    match serde_json::to_string(&room.state_for(conn)) {
        Ok(text) => server.send_message(client, DefaultChannel::ReliableOrdered, text),
        Err(err) => log::error!("failed to serialize state for connection {conn}: {err}"),
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();
    println!("Usage: [SERVER_PORT]");
    let args: Vec<String> = std::env::args().collect();
    let public_addr: SocketAddr = format!("0.0.0.0:{}", args[1]).parse().unwrap();

    let connection_config = ConnectionConfig::default();
    let mut server: RenetServer = RenetServer::new(connection_config);

    let current_time = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap();
    let server_config = ServerConfig {
        current_time,
        max_clients: 64,
        protocol_id: 0,
        public_addresses: vec![public_addr],
        authentication: ServerAuthentication::Unsecure,
    };
    let socket: UdpSocket = UdpSocket::bind(public_addr).unwrap();
    let mut transport = NetcodeServerTransport::new(server_config, socket).unwrap();

    let mut room = Room::new(SkinBook::builtin());
    // Transport client ids never leak into the core; connections get small
    // sequential ids like any other transport would assign.
    let mut conns_by_client: HashMap<ClientId, ConnectionId> = HashMap::new();
    let mut clients_by_conn: HashMap<ConnectionId, ClientId> = HashMap::new();
    let mut next_conn: ConnectionId = 1;

    let mut interval = time::interval(Duration::from_millis(50));
    let mut last_updated = Instant::now();

    loop {
        interval.tick().await;
        let now = Instant::now();
        let duration = now - last_updated;
        last_updated = now;

        server.update(duration);
        transport.update(duration, &mut server).unwrap();

        while let Some(event) = server.get_event() {
            match event {
                ServerEvent::ClientConnected { client_id } => {
                    let conn = next_conn;
                    next_conn += 1;
                    log::info!("client {client_id} joined as connection {conn}");
                    conns_by_client.insert(client_id, conn);
                    clients_by_conn.insert(conn, client_id);
                    room.add_connection(conn);
                    send_state(&mut server, client_id, &room, conn);
                }
                ServerEvent::ClientDisconnected { client_id, reason } => {
                    log::info!("client {client_id} disconnected: {reason}");
                    if let Some(conn) = conns_by_client.remove(&client_id) {
                        clients_by_conn.remove(&conn);
                        room.remove_connection(conn);
                        for &other in room.connections() {
                            if let Some(&client) = clients_by_conn.get(&other) {
                                send_state(&mut server, client, &room, other);
                            }
                        }
                    }
                }
            }
        }

        for client_id in server.clients_id() {
            while let Some(message) =
                server.receive_message(client_id, DefaultChannel::ReliableOrdered)
            {
                let Some(&conn) = conns_by_client.get(&client_id) else {
                    continue;
                };
                let text = match String::from_utf8(message.into()) {
                    Ok(text) => text,
                    Err(err) => {
                        log::warn!("connection {conn}: non-utf8 message dropped: {err}");
                        continue;
                    }
                };
                match serde_json::from_str::<RoomEvent>(&text) {
                    Ok(event) => {
                        // One event runs to completion before the next is
                        // read; per-seat mutations need no further locking.
                        for refresh in room.process_event(conn, &event) {
                            if let Some(&client) = clients_by_conn.get(&refresh) {
                                send_state(&mut server, client, &room, refresh);
                            }
                        }
                    }
                    Err(err) => {
                        log::warn!("connection {conn}: undecodable event dropped: {err}");
                    }
                }
            }
        }

        transport.send_packets(&mut server);
    }
}
