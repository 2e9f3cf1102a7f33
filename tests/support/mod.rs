//! In-process fake of the users REST backend.
//!
//! Serves `GET/POST /users` and `PUT/DELETE /users/:id` from memory on an
//! ephemeral port, records every request it sees, and can be told to fail the
//! list call or to stall it past the client timeout.

#![allow(dead_code, clippy::unwrap_used)]

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::{net::TcpListener, task::JoinHandle};

#[derive(Default)]
pub struct Db {
    pub users: Vec<Value>,
    pub next_id: u64,
    pub requests: Vec<String>,
    pub bodies: Vec<Value>,
    pub content_types: Vec<String>,
    pub fail_list: bool,
    pub list_delay: Option<Duration>,
}

type SharedDb = Arc<Mutex<Db>>;

pub struct FakeBackend {
    addr: SocketAddr,
    db: SharedDb,
    server: JoinHandle<()>,
}

impl FakeBackend {
    pub async fn start(users: Vec<Value>) -> Result<Self> {
        let next_id = users.len() as u64 + 1;
        let db = Arc::new(Mutex::new(Db {
            users,
            next_id,
            ..Db::default()
        }));

        let app = Router::new()
            .route("/users", get(list_users).post(create_user))
            .route("/users/:id", axum::routing::put(update_user).delete(delete_user))
            .route("/text", get(|| async { "definitely not json" }))
            .with_state(db.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("failed to bind fake backend")?;
        let addr = listener.local_addr()?;
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self { addr, db, server })
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn users_url(&self) -> String {
        self.url("/users")
    }

    pub fn requests(&self) -> Vec<String> {
        self.db.lock().unwrap().requests.clone()
    }

    pub fn bodies(&self) -> Vec<Value> {
        self.db.lock().unwrap().bodies.clone()
    }

    pub fn content_types(&self) -> Vec<String> {
        self.db.lock().unwrap().content_types.clone()
    }

    pub fn set_fail_list(&self, fail: bool) {
        self.db.lock().unwrap().fail_list = fail;
    }

    pub fn set_list_delay(&self, delay: Duration) {
        self.db.lock().unwrap().list_delay = Some(delay);
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// Returns an address nothing is listening on.
pub async fn closed_address() -> Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(addr)
}

async fn list_users(State(db): State<SharedDb>) -> Response {
    let (fail, delay, users) = {
        let mut db = db.lock().unwrap();
        db.requests.push("GET /users".to_string());
        (db.fail_list, db.list_delay, db.users.clone())
    };

    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    if fail {
        return (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response();
    }

    Json(Value::Array(users)).into_response()
}

async fn create_user(
    State(db): State<SharedDb>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut db = db.lock().unwrap();
    db.requests.push("POST /users".to_string());
    record_body(&mut db, &headers, &body);

    let id = db.next_id;
    db.next_id += 1;
    let record = json!({
        "id": id,
        "name": body["name"],
        "email": body["email"],
        "password": body["password"],
    });
    db.users.push(record.clone());

    (StatusCode::CREATED, Json(record)).into_response()
}

async fn update_user(
    State(db): State<SharedDb>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut db = db.lock().unwrap();
    db.requests.push(format!("PUT /users/{id}"));
    record_body(&mut db, &headers, &body);

    let Some(record) = db.users.iter_mut().find(|user| id_matches(user, &id)) else {
        return (StatusCode::NOT_FOUND, "no such user").into_response();
    };
    for field in ["name", "email", "password"] {
        record[field] = body[field].clone();
    }

    (StatusCode::OK, Json(record.clone())).into_response()
}

async fn delete_user(State(db): State<SharedDb>, Path(id): Path<String>) -> Response {
    let mut db = db.lock().unwrap();
    db.requests.push(format!("DELETE /users/{id}"));

    let before = db.users.len();
    db.users.retain(|user| !id_matches(user, &id));
    if db.users.len() == before {
        return StatusCode::NOT_FOUND.into_response();
    }

    StatusCode::NO_CONTENT.into_response()
}

fn record_body(db: &mut Db, headers: &HeaderMap, body: &Value) {
    db.bodies.push(body.clone());
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    db.content_types.push(content_type);
}

fn id_matches(user: &Value, id: &str) -> bool {
    match &user["id"] {
        Value::Number(number) => number.to_string() == id,
        Value::String(text) => text == id,
        _ => false,
    }
}
