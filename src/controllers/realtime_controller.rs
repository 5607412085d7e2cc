use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Extension, State,
    },
    http::StatusCode,
    response::IntoResponse,
};
use tokio::time::{interval, Duration};

use crate::{
    events::{OrderEvent, SubscriberRole},
    models::CurrentUser,
    AppState,
};

// GET /ws/orders
//
// The client must open this subscription *before* fetching its snapshot,
// otherwise a status update can land in the gap and be missed. Delivery is
// best-effort: a client that drops recovers by refetching on reconnect.
pub async fn ws_orders(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
) -> impl IntoResponse {
    let Some(Extension(u)) = user else {
        return StatusCode::UNAUTHORIZED.into_response();
    };

    let role = if u.is_admin {
        SubscriberRole::Operator
    } else {
        SubscriberRole::Customer(u.id)
    };

    ws.on_upgrade(move |socket| handle_orders_socket(socket, state, role))
}

async fn handle_orders_socket(mut socket: WebSocket, state: AppState, role: SubscriberRole) {
    let (conn, mut rx) = state.events.subscribe(role);

    tracing::info!("WS order subscriber connected: {:?}", role);

    // Ping browser to keep alive
    let mut ping = interval(Duration::from_secs(25));

    loop {
        tokio::select! {
            _ = ping.tick() => {
                if socket.send(Message::Ping(b"ping".to_vec())).await.is_err() {
                    break;
                }
            }

            evt = rx.recv() => {
                let Some(evt) = evt else { break };
                if send_event(&mut socket, &evt).await.is_err() {
                    break;
                }
            }

            client_msg = socket.recv() => {
                match client_msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(_)) => break,
                }
            }
        }
    }

    state.events.unsubscribe(conn);
    tracing::info!("WS order subscriber disconnected: {:?}", role);

    let _ = socket.close().await;
}

async fn send_event(socket: &mut WebSocket, evt: &OrderEvent) -> Result<(), axum::Error> {
    match serde_json::to_string(evt) {
        Ok(txt) => socket.send(Message::Text(txt)).await,
        Err(e) => {
            // a record that cannot serialize is dropped, not fatal
            tracing::error!("failed to serialize {} event: {e}", evt.name());
            Ok(())
        }
    }
}
