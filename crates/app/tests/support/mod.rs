//! In-process mock of the signup/login backend.

#![allow(dead_code, clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// How the mock backend behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Follows the real validation rules.
    Healthy,
    /// Serves the signup page but answers every API call with HTML.
    Malformed,
    /// Fails the liveness page with 503.
    Down,
}

#[derive(Clone)]
struct StoredUser {
    full_name: String,
    email: String,
    password: Option<String>,
}

#[derive(Clone)]
struct Backend {
    mode: Mode,
    users: Arc<Mutex<HashMap<String, StoredUser>>>,
    tokens: Arc<Mutex<HashMap<String, String>>>,
    api_calls: Arc<AtomicUsize>,
}

/// A running mock backend; aborted on drop.
pub struct MockServer {
    /// Root URL, e.g. `http://127.0.0.1:41234`.
    pub base_url: String,
    api_calls: Arc<AtomicUsize>,
    users: Arc<Mutex<HashMap<String, StoredUser>>>,
    handle: JoinHandle<()>,
}

impl MockServer {
    /// Binds to an ephemeral port and starts serving.
    pub async fn spawn(mode: Mode) -> Self {
        let backend = Backend {
            mode,
            users: Arc::default(),
            tokens: Arc::default(),
            api_calls: Arc::default(),
        };
        let api_calls = Arc::clone(&backend.api_calls);
        let users = Arc::clone(&backend.users);

        let app = Router::new()
            .route("/signup.html", get(signup_page))
            .route("/api/signup", post(signup))
            .route("/api/login", post(login))
            .route("/api/auto-register", post(auto_register))
            .route("/api/me", get(me))
            .with_state(backend);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{addr}"),
            api_calls,
            users,
            handle,
        }
    }

    /// Number of `/api/*` requests served.
    pub fn api_calls(&self) -> usize {
        self.api_calls.load(Ordering::SeqCst)
    }

    /// Registered emails.
    pub fn emails(&self) -> Vec<String> {
        self.users.lock().unwrap().keys().cloned().collect()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A base URL nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

fn reply(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn reject(status: StatusCode, message: &str) -> Response {
    reply(status, json!({"success": false, "message": message}))
}

fn malformed() -> Response {
    Html("<html><body>maintenance</body></html>").into_response()
}

fn text(body: &Value, key: &str) -> String {
    body.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string()
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .split_once('.')
        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

impl Backend {
    fn issue_token(&self, email: &str) -> String {
        let mut tokens = self.tokens.lock().unwrap();
        let token = format!("token-{}", tokens.len() + 1);
        tokens.insert(token.clone(), email.to_string());
        token
    }

    fn user_json(user: &StoredUser, token: Option<&str>) -> Value {
        let mut value = json!({
            "fullName": user.full_name,
            "email": user.email,
            "phone": "+8801700000000",
            "country": "Bangladesh",
            "authType": if user.password.is_some() { "email" } else { "auto" },
        });
        if let Some(token) = token {
            value["token"] = json!(token);
        }
        value
    }
}

async fn signup_page(State(backend): State<Backend>) -> Response {
    if backend.mode == Mode::Down {
        return (StatusCode::SERVICE_UNAVAILABLE, "down").into_response();
    }
    Html("<html><body>Sign up</body></html>").into_response()
}

async fn signup(State(backend): State<Backend>, Json(body): Json<Value>) -> Response {
    backend.api_calls.fetch_add(1, Ordering::SeqCst);
    if backend.mode == Mode::Malformed {
        return malformed();
    }

    let full_name = text(&body, "fullName");
    let email = text(&body, "email").to_lowercase();
    let password = text(&body, "password");
    if full_name.is_empty() || email.is_empty() || password.is_empty() {
        return reject(StatusCode::BAD_REQUEST, "All fields are required");
    }
    if password.len() < 6 {
        return reject(StatusCode::BAD_REQUEST, "Password must be at least 6 characters");
    }
    if !is_valid_email(&email) {
        return reject(StatusCode::BAD_REQUEST, "Invalid email format");
    }

    let user = {
        let mut users = backend.users.lock().unwrap();
        if users.contains_key(&email) {
            return reject(StatusCode::CONFLICT, "Email already registered");
        }
        let user = StoredUser {
            full_name,
            email: email.clone(),
            password: Some(password),
        };
        users.insert(email.clone(), user.clone());
        user
    };

    let token = backend.issue_token(&email);
    reply(
        StatusCode::OK,
        json!({
            "success": true,
            "message": "Account created successfully",
            "user": Backend::user_json(&user, Some(&token)),
        }),
    )
}

async fn login(State(backend): State<Backend>, Json(body): Json<Value>) -> Response {
    backend.api_calls.fetch_add(1, Ordering::SeqCst);
    if backend.mode == Mode::Malformed {
        return malformed();
    }

    let email = text(&body, "email").to_lowercase();
    let password = text(&body, "password");
    if email.is_empty() || password.is_empty() {
        return reject(StatusCode::BAD_REQUEST, "Email and password are required");
    }

    let user = backend.users.lock().unwrap().get(&email).cloned();
    let Some(user) = user else {
        return reject(StatusCode::NOT_FOUND, "No account found with this email");
    };
    if user.password.as_deref() != Some(password.as_str()) {
        return reject(StatusCode::UNAUTHORIZED, "Incorrect password");
    }

    let token = backend.issue_token(&email);
    reply(
        StatusCode::OK,
        json!({"success": true, "user": Backend::user_json(&user, Some(&token))}),
    )
}

async fn auto_register(State(backend): State<Backend>, Json(body): Json<Value>) -> Response {
    backend.api_calls.fetch_add(1, Ordering::SeqCst);
    if backend.mode == Mode::Malformed {
        return malformed();
    }

    let full_name = text(&body, "fullName");
    let email = text(&body, "email").to_lowercase();
    if full_name.is_empty() || email.is_empty() {
        return reject(StatusCode::BAD_REQUEST, "Name and email are required");
    }

    let (user, is_new) = {
        let mut users = backend.users.lock().unwrap();
        match users.get(&email) {
            Some(existing) => (existing.clone(), false),
            None => {
                let user = StoredUser {
                    full_name,
                    email: email.clone(),
                    password: None,
                };
                users.insert(email.clone(), user.clone());
                (user, true)
            }
        }
    };

    let token = backend.issue_token(&email);
    reply(
        StatusCode::OK,
        json!({
            "success": true,
            "isNew": is_new,
            "user": Backend::user_json(&user, Some(&token)),
        }),
    )
}

async fn me(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    backend.api_calls.fetch_add(1, Ordering::SeqCst);
    if backend.mode == Mode::Malformed {
        return malformed();
    }

    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string);
    let Some(token) = token else {
        return reject(StatusCode::UNAUTHORIZED, "No token provided");
    };

    let email = backend.tokens.lock().unwrap().get(&token).cloned();
    let user = email.and_then(|email| backend.users.lock().unwrap().get(&email).cloned());
    match user {
        Some(user) => reply(
            StatusCode::OK,
            json!({"success": true, "user": Backend::user_json(&user, None)}),
        ),
        None => reject(StatusCode::UNAUTHORIZED, "Invalid token"),
    }
}
