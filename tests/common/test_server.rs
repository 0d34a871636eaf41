use std::sync::Arc;

use permd::perms::{ensure_server_admins, seed_admins};
use permd::server::{AppState, create_router};
use permd::store::{MemoryStore, SqliteStore, Store};
use permd::types::Principal;
use tempfile::TempDir;
use tokio::task::JoinHandle;

pub const NAMESPACE: &str = "alpha";
pub const ADMIN: &str = "1";

pub enum Backend {
    Sqlite,
    Memory,
}

pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    _temp_dir: TempDir,
    server_task: JoinHandle<()>,
}

impl TestServer {
    /// Starts the router on an ephemeral port with `server_admins` bootstrapped
    /// in `NAMESPACE` and `ADMIN` seeded into it.
    pub async fn start(backend: Backend) -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");

        let store: Arc<dyn Store> = match backend {
            Backend::Sqlite => {
                let store =
                    SqliteStore::new(temp_dir.path().join("permd.db")).expect("open database");
                store.initialize().expect("initialize database");
                Arc::new(store)
            }
            Backend::Memory => Arc::new(MemoryStore::new()),
        };

        let admin = Principal::parse(ADMIN).expect("admin principal");
        seed_admins(store.as_ref(), NAMESPACE, &[admin]).expect("seed admins");
        ensure_server_admins(store.as_ref(), NAMESPACE).expect("bootstrap");

        let app = create_router(Arc::new(AppState::new(store)));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let port = listener.local_addr().expect("local addr").port();

        let server_task = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            client: reqwest::Client::new(),
            _temp_dir: temp_dir,
            server_task,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/api/v1/namespaces/{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.server_task.abort();
    }
}
