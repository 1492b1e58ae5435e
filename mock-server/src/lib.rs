use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

pub type Db = Arc<RwLock<HashMap<String, User>>>;

/// Envelope reply: `{"data": ..}` on success, `{"error": ..}` otherwise.
type Reply = (StatusCode, Json<Value>);

fn data(user: &User) -> Reply {
    (StatusCode::OK, Json(json!({ "data": user })))
}

fn error(status: StatusCode, message: &str) -> Reply {
    (
        status,
        Json(json!({ "error": { "code": status.as_u16(), "message": message } })),
    )
}

pub fn app() -> Router {
    app_with(Db::default())
}

/// Router over a caller-provided table, so tests can pre-populate users.
pub fn app_with(db: Db) -> Router {
    Router::new()
        .route("/user/{user_id}", get(get_user).put(update_user))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock server listening");
    }
    axum::serve(listener, app()).await
}

async fn get_user(State(db): State<Db>, Path(user_id): Path<String>) -> Reply {
    debug!(%user_id, "get user");
    match db.read().await.get(&user_id) {
        Some(user) => data(user),
        None => error(StatusCode::NOT_FOUND, "User not found."),
    }
}

async fn update_user(
    State(db): State<Db>,
    Path(user_id): Path<String>,
    Json(input): Json<User>,
) -> Reply {
    debug!(%user_id, "update user");
    if input.user_id != user_id {
        return error(StatusCode::BAD_REQUEST, "userId does not match the request path.");
    }
    db.write().await.insert(user_id, input.clone());
    data(&input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_serializes_with_wire_names() {
        let user = User {
            user_id: "plokmijn".to_string(),
            name: "shane wu".to_string(),
            email: "shane.wu@gmail.com".to_string(),
            description: None,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["userId"], "plokmijn");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn user_rejects_missing_email() {
        let result: Result<User, _> = serde_json::from_str(r#"{"userId":"a","name":"b"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn error_envelope_carries_status_code() {
        let (status, Json(body)) = error(StatusCode::NOT_FOUND, "User not found.");
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": {"code": 404, "message": "User not found."}}));
    }
}
