use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use std::process::Command;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};

/// In-process stand-in for the trading-insights backend.
pub struct MockBackend {
    pub base_url: String,
    state: Shared,
    shutdown: Option<tokio::sync::oneshot::Sender<()>>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

#[allow(dead_code)]
impl MockBackend {
    /// Every request seen so far, as `"METHOD /path bearer=<token or ->"`.
    pub fn requests(&self) -> Vec<String> {
        lock(&self.state).requests.clone()
    }

    pub fn requests_to(&self, prefix: &str) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|r| r.split(' ').nth(1).is_some_and(|p| p.starts_with(prefix)))
            .collect()
    }

    /// Invalidate every issued token, as if they had all expired.
    pub fn expire_tokens(&self) {
        lock(&self.state).tokens.clear();
    }

    /// Store an arbitrary `user_type` string, bypassing plan validation.
    pub fn set_user_type(&self, email: &str, user_type: &str) {
        if let Some(user) = lock(&self.state).users.get_mut(email) {
            user.user_type = user_type.to_string();
        }
    }

    pub fn user_id(&self, email: &str) -> Option<String> {
        lock(&self.state).users.get(email).map(|u| u.id.clone())
    }
}

#[derive(Clone)]
struct MockUser {
    id: String,
    email: String,
    password: String,
    full_name: String,
    user_type: String,
    is_active: bool,
}

impl MockUser {
    fn public(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "email": self.email,
            "full_name": self.full_name,
            "user_type": self.user_type,
            "is_active": self.is_active,
            "created_at": "2024-05-01T12:00:00",
        })
    }
}

struct BackendState {
    users: BTreeMap<String, MockUser>,
    tokens: HashMap<String, String>,
    next_token: u64,
    settings: serde_json::Value,
    requests: Vec<String>,
}

type Shared = Arc<Mutex<BackendState>>;

fn lock(state: &Shared) -> MutexGuard<'_, BackendState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

impl BackendState {
    fn seeded() -> Self {
        let mut users = BTreeMap::new();
        for (email, password, name, tier, active) in [
            ("admin@mk7.com", "admin123", "Admin User", "admin", true),
            ("premium@mk7.com", "premium123", "Premium User", "premium", true),
            ("basic@mk7.com", "basic123", "Basic User", "basic", true),
            ("disabled@mk7.com", "disabled123", "Disabled User", "basic", false),
        ] {
            users.insert(
                email.to_string(),
                MockUser {
                    id: format!("user-{}", local_part(email)),
                    email: email.to_string(),
                    password: password.to_string(),
                    full_name: name.to_string(),
                    user_type: tier.to_string(),
                    is_active: active,
                },
            );
        }
        Self {
            users,
            tokens: HashMap::new(),
            next_token: 1,
            settings: serde_json::json!({
                "type": "general",
                "basic_plan_price": 29.99,
                "premium_plan_price": 99.99,
                "trading_api_keys": {},
                "payment_api_keys": {},
            }),
            requests: Vec::new(),
        }
    }

    fn issue_token(&mut self, user_id: &str) -> String {
        let token = format!("tok-{}", self.next_token);
        self.next_token += 1;
        self.tokens.insert(token.clone(), user_id.to_string());
        token
    }

    fn subject(&self, headers: &HeaderMap) -> Result<MockUser, Response> {
        let Some(token) = bearer(headers) else {
            return Err(detail(StatusCode::FORBIDDEN, "Not authenticated"));
        };
        self.tokens
            .get(&token)
            .and_then(|uid| self.users.values().find(|u| &u.id == uid))
            .cloned()
            .ok_or_else(|| detail(StatusCode::UNAUTHORIZED, "Could not validate credentials"))
    }

    fn admin(&self, headers: &HeaderMap) -> Result<MockUser, Response> {
        let user = self.subject(headers)?;
        if user.user_type != "admin" {
            return Err(detail(StatusCode::FORBIDDEN, "Admin access required"));
        }
        Ok(user)
    }

    fn record(&mut self, method: &str, path: &str, headers: &HeaderMap) {
        let who = bearer(headers).unwrap_or_else(|| "-".to_string());
        self.requests
            .push(format!("{} {} bearer={}", method, path, who));
    }
}

fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

fn detail(status: StatusCode, msg: &str) -> Response {
    (status, Json(serde_json::json!({ "detail": msg }))).into_response()
}

fn token_response(user: &MockUser, token: String) -> Response {
    Json(serde_json::json!({
        "access_token": token,
        "token_type": "bearer",
        "user": {
            "id": user.id,
            "email": user.email,
            "full_name": user.full_name,
            "user_type": user.user_type,
        }
    }))
    .into_response()
}

async fn health(State(state): State<Shared>, headers: HeaderMap) -> Response {
    lock(&state).record("GET", "/api/health", &headers);
    Json(serde_json::json!({"status": "healthy", "service": "MK7 Trading Bot API"})).into_response()
}

async fn login(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let mut st = lock(&state);
    st.record("POST", "/api/auth/login", &headers);
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    let Some(user) = st.users.get(email).cloned() else {
        return detail(StatusCode::BAD_REQUEST, "Invalid email or password");
    };
    if user.password != password {
        return detail(StatusCode::BAD_REQUEST, "Invalid email or password");
    }
    if !user.is_active {
        return detail(StatusCode::BAD_REQUEST, "Account is disabled");
    }
    let token = st.issue_token(&user.id);
    token_response(&user, token)
}

async fn register(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let mut st = lock(&state);
    st.record("POST", "/api/auth/register", &headers);
    let (Some(email), Some(password), Some(full_name)) = (
        body["email"].as_str(),
        body["password"].as_str(),
        body["full_name"].as_str(),
    ) else {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({"detail": [{"msg": "field required"}]})),
        )
            .into_response();
    };
    if st.users.contains_key(email) {
        return detail(StatusCode::BAD_REQUEST, "Email already registered");
    }
    let user = MockUser {
        id: format!("user-{}", st.users.len() + 1),
        email: email.to_string(),
        password: password.to_string(),
        full_name: full_name.to_string(),
        user_type: "basic".to_string(),
        is_active: true,
    };
    st.users.insert(email.to_string(), user.clone());
    let token = st.issue_token(&user.id);
    token_response(&user, token)
}

async fn me(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut st = lock(&state);
    st.record("GET", "/api/auth/me", &headers);
    match st.subject(&headers) {
        Ok(user) => {
            let mut v = user.public();
            if let Some(obj) = v.as_object_mut() {
                obj.remove("created_at");
            }
            Json(v).into_response()
        }
        Err(resp) => resp,
    }
}

async fn crypto_prices(State(state): State<Shared>, headers: HeaderMap) -> Response {
    lock(&state).record("GET", "/api/market/crypto-prices", &headers);
    Json(serde_json::json!({
        "bitcoin": {"usd": 67012.5, "usd_24h_change": 1.25, "usd_market_cap": 1.3e12},
        "ethereum": {"usd": 3120.0, "usd_24h_change": -0.5},
        "solana": {"usd": 145.2},
    }))
    .into_response()
}

async fn analysis(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let mut st = lock(&state);
    st.record("POST", "/api/analysis/gemini", &headers);
    if let Err(resp) = st.subject(&headers) {
        return resp;
    }
    Json(serde_json::json!({
        "symbol": body["symbol"],
        "timeframe": body["timeframe"],
        "analysis": format!(
            "{} outlook for {}",
            body["analysis_type"].as_str().unwrap_or("?"),
            body["symbol"].as_str().unwrap_or("?")
        ),
        "generated_at": "2024-05-01T12:00:00",
        "analyst": "Gemini AI",
    }))
    .into_response()
}

async fn list_users(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut st = lock(&state);
    st.record("GET", "/api/admin/users", &headers);
    if let Err(resp) = st.admin(&headers) {
        return resp;
    }
    let users = st.users.values().map(MockUser::public).collect::<Vec<_>>();
    Json(users).into_response()
}

async fn upgrade_user(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    let mut st = lock(&state);
    st.record("PUT", &format!("/api/admin/users/{}/upgrade", user_id), &headers);
    if let Err(resp) = st.admin(&headers) {
        return resp;
    }
    let plan = q.get("new_plan").cloned().unwrap_or_default();
    if !["basic", "premium", "admin"].contains(&plan.as_str()) {
        return detail(StatusCode::BAD_REQUEST, "Invalid plan type");
    }
    let Some(user) = st.users.values_mut().find(|u| u.id == user_id) else {
        return detail(StatusCode::NOT_FOUND, "User not found");
    };
    user.user_type = plan.clone();
    Json(serde_json::json!({"message": format!("User plan updated to {}", plan)})).into_response()
}

async fn get_settings(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut st = lock(&state);
    st.record("GET", "/api/admin/settings", &headers);
    if let Err(resp) = st.admin(&headers) {
        return resp;
    }
    Json(st.settings.clone()).into_response()
}

async fn put_settings(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let mut st = lock(&state);
    st.record("PUT", "/api/admin/settings", &headers);
    if let Err(resp) = st.admin(&headers) {
        return resp;
    }
    if let (Some(settings), Some(update)) = (st.settings.as_object_mut(), body.as_object()) {
        for (k, v) in update {
            settings.insert(k.clone(), v.clone());
        }
    }
    Json(serde_json::json!({"message": "Settings updated successfully"})).into_response()
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/me", get(me))
        .route("/api/market/crypto-prices", get(crypto_prices))
        .route("/api/analysis/gemini", post(analysis))
        .route("/api/admin/users", get(list_users))
        .route("/api/admin/users/:user_id/upgrade", put(upgrade_user))
        .route("/api/admin/settings", get(get_settings).put(put_settings))
        .with_state(state)
}

pub fn spawn_backend() -> Result<MockBackend> {
    let state: Shared = Arc::new(Mutex::new(BackendState::seeded()));
    let (addr_tx, addr_rx) = std::sync::mpsc::channel::<SocketAddr>();
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    let app = router(state.clone());
    let thread = thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("build tokio runtime");
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind mock backend");
            let addr = listener.local_addr().expect("mock backend addr");
            let _ = addr_tx.send(addr);
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .expect("serve mock backend");
        });
    });

    let addr = addr_rx
        .recv_timeout(Duration::from_secs(5))
        .context("mock backend did not start")?;

    Ok(MockBackend {
        base_url: format!("http://{}", addr),
        state,
        shutdown: Some(shutdown_tx),
        thread: Some(thread),
    })
}

/// Base URL of a port nothing is listening on.
#[allow(dead_code)]
pub fn dead_url() -> Result<String> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").context("bind probe port")?;
    let addr = listener.local_addr().context("probe addr")?;
    drop(listener);
    Ok(format!("http://{}", addr))
}

#[allow(dead_code)]
pub struct CliRun {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

#[allow(dead_code)]
pub fn run_mk7(state_dir: &std::path::Path, api_url: &str, args: &[&str]) -> Result<CliRun> {
    let out = Command::new(env!("CARGO_BIN_EXE_mk7"))
        .arg("--state-dir")
        .arg(state_dir)
        .args(["--api-url", api_url])
        .args(args)
        .env_remove("MK7_BACKEND_URL")
        .env_remove("MK7_HOME")
        .output()
        .with_context(|| format!("run mk7 {:?}", args))?;
    Ok(CliRun {
        success: out.status.success(),
        stdout: String::from_utf8_lossy(&out.stdout).to_string(),
        stderr: String::from_utf8_lossy(&out.stderr).to_string(),
    })
}
