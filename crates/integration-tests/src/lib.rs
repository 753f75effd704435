//! Integration tests for the storefront client.
//!
//! The real [`ApiClient`] talks to a `wiremock` server and sessions live in a
//! [`FileStorage`] inside a temporary directory, so every test runs the same
//! code a front end would, minus the network.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p storefront-integration-tests
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use serde_json::{Value, json};
use storefront_client::{
    ApiClient, AppState, DurableStorage, FileStorage, GuestCart, LoginFlow, Navigator, Notifier,
    Route, SessionStore,
};
use tempfile::TempDir;
use url::Url;
use wiremock::MockServer;

/// A notification the flow emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Note {
    Success(String),
    Error(String),
}

/// Records notifications and navigation.
#[derive(Debug, Default)]
pub struct Recorder {
    notes: Mutex<Vec<Note>>,
    routes: Mutex<Vec<Route>>,
}

impl Recorder {
    pub fn notes(&self) -> Vec<Note> {
        self.notes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for Recorder {
    fn success(&self, message: &str) {
        self.notes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Note::Success(message.to_owned()));
    }

    fn error(&self, message: &str) {
        self.notes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Note::Error(message.to_owned()));
    }
}

impl Navigator for Recorder {
    fn go_to(&self, route: Route) {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route);
    }
}

/// A mock API plus a client wired to it.
pub struct TestContext {
    pub server: MockServer,
    pub dir: TempDir,
    pub api: ApiClient,
    pub sessions: SessionStore,
    pub guest_cart: GuestCart,
    pub recorder: Arc<Recorder>,
    pub flow: LoginFlow,
}

impl TestContext {
    /// Start a mock server and open storage in a fresh temporary directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory or storage cannot be created.
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let dir = TempDir::new().expect("Failed to create temp dir");

        let base = Url::parse(&format!("{}/api", server.uri())).expect("Mock server URI");
        let api = ApiClient::new(base).expect("Failed to create API client");

        let storage = open_storage(&dir);
        let sessions = SessionStore::new(AppState::new(), Arc::clone(&storage));
        let guest_cart = GuestCart::new(storage);
        let recorder = Arc::new(Recorder::default());

        let flow = LoginFlow::new(
            Arc::new(api.clone()),
            Arc::new(api.clone()),
            sessions.clone(),
            guest_cart.clone(),
            recorder.clone(),
            recorder.clone(),
        );

        Self {
            server,
            dir,
            api,
            sessions,
            guest_cart,
            recorder,
            flow,
        }
    }

    /// A session store over the same directory with empty state, as after
    /// a restart.
    ///
    /// # Panics
    ///
    /// Panics if the storage file cannot be opened.
    pub fn reopen(&self) -> SessionStore {
        SessionStore::new(AppState::new(), open_storage(&self.dir))
    }
}

fn open_storage(dir: &TempDir) -> Arc<dyn DurableStorage> {
    Arc::new(FileStorage::open(dir.path()).expect("Failed to open file storage"))
}

/// Body of a successful `POST /auth/login`.
pub fn login_body(user_id: &str, first_name: &str, role: &str, token: &str) -> Value {
    json!({
        "user": {
            "_id": user_id,
            "firstName": first_name,
            "lastName": "Tester",
            "email": format!("{}@shop.example", first_name.to_lowercase()),
            "role": role,
        },
        "token": token,
    })
}
