use crate::core::error::DashboardError;
use crate::core::state::AppState;
use crate::models::course::Course;
use crate::models::user::User;
use crate::stores::repository::Entity;
use crate::table::live::{LiveTable, TableCommand};
use crate::table::query::{run_query, TableState};
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, warn};

/// Tables that can be followed over a websocket
#[derive(Clone, Copy, Debug)]
enum LiveSource {
    Courses,
    Users,
}

impl LiveSource {
    fn entity(self) -> Entity {
        match self {
            LiveSource::Courses => Entity::Courses,
            LiveSource::Users => Entity::Users,
        }
    }

    /// Current page as a JSON text frame
    async fn render(self, state: &AppState, table: &TableState) -> Result<String, DashboardError> {
        let json = match self {
            LiveSource::Courses => {
                let courses = state.repo.courses().await?;
                serde_json::to_string(&run_query(
                    courses.as_slice(),
                    table,
                    None::<fn(&Course, &Course) -> Ordering>,
                    state.paging(),
                ))?
            }
            LiveSource::Users => {
                let users = state.repo.users().await?;
                serde_json::to_string(&run_query(
                    users.as_slice(),
                    table,
                    None::<fn(&User, &User) -> Ordering>,
                    state.paging(),
                ))?
            }
        };

        Ok(json)
    }
}

/// Courses table that follows debounced search input and catalog changes
///
/// GET /courses/live (websocket)
pub async fn live_courses_handler(
    State(state): State<Arc<AppState>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| live_table(socket, state, LiveSource::Courses))
}

/// GET /users/live (websocket)
pub async fn live_users_handler(
    State(state): State<Arc<AppState>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| live_table(socket, state, LiveSource::Users))
}

async fn live_table(mut socket: WebSocket, state: Arc<AppState>, source: LiveSource) {
    let mut table = LiveTable::new(&state.config.table, state.repo.subscribe(source.entity()));
    debug!(table = ?source, "Live table opened");

    let mut refresh = true;
    loop {
        if refresh {
            let frame = match source.render(&state, table.state()).await {
                Ok(json) => json,
                Err(e) => {
                    warn!(table = ?source, error = %e, "Live table query failed");
                    error_frame(&e)
                }
            };
            if socket.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }

        refresh = tokio::select! {
            msg = socket.recv() => match msg {
                Some(Ok(Message::Text(text))) => {
                    match serde_json::from_str::<TableCommand>(text.as_str()) {
                        Ok(command) => table.apply(command),
                        Err(e) => {
                            let frame = error_frame(&DashboardError::BadRequest(e.to_string()));
                            if socket.send(Message::Text(frame.into())).await.is_err() {
                                break;
                            }
                            false
                        }
                    }
                }
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => false,
            },
            change = table.changed() => match change {
                Some(_) => true,
                None => break,
            },
        };
    }

    debug!(table = ?source, "Live table closed");
}

fn error_frame(error: &DashboardError) -> String {
    let (_, body) = error.to_body();
    serde_json::to_string(&body).unwrap_or_else(|_| r#"{"success":false}"#.to_string())
}
