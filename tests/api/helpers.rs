use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::OnceLock,
};

use anyhow::Result;
use reqwest::{Response, StatusCode};
use serde_json::{json, Value};
use subscribers::{
    init_dbg_tracing, model::MemorySubscriberStore, model::Subscriber,
    templ_manager::TemplateManager, App, AppState,
};
use tokio::net::TcpListener;
use tracing::info;

/// Trying to bind port 0 will trigger an OS scan for an available port
/// which will then be bound to the application.
const TEST_SOCK_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 0);

/// Set `TEST_LOG` to see the server logs while testing.
fn init_test_subscriber() {
    static SUBSCRIBER: OnceLock<()> = OnceLock::new();
    SUBSCRIBER.get_or_init(|| {
        if std::env::var("TEST_LOG").is_ok() {
            init_dbg_tracing();
        }
    });
}

pub struct TestApp {
    pub addr: SocketAddr,
    pub http_client: reqwest::Client,
}

impl TestApp {
    /// Spawns the app backed by an empty in-memory store.
    pub async fn spawn() -> Result<Self> {
        init_test_subscriber();

        let app_state = AppState::new(
            Box::new(MemorySubscriberStore::new()),
            TemplateManager::init()?,
        );
        let listener = TcpListener::bind(TEST_SOCK_ADDR).await?;
        let addr = listener.local_addr()?;
        info!("Listening on {addr}");

        tokio::spawn(subscribers::serve(App::new(app_state, listener)));

        Ok(TestApp {
            addr,
            http_client: reqwest::Client::new(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.http_client.get(self.url(path)).send().await?)
    }

    pub async fn delete(&self, path: &str) -> Result<Response> {
        Ok(self.http_client.delete(self.url(path)).send().await?)
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> Result<Response> {
        Ok(self
            .http_client
            .post(self.url(path))
            .json(body)
            .send()
            .await?)
    }

    /// Creates a subscriber through the API and hands back the stored record.
    pub async fn create_subscriber(&self, name: &str, channel: &str) -> Result<Subscriber> {
        let res = self
            .post_json(
                "/subscribers",
                &json!({ "name": name, "subscribedChannel": channel }),
            )
            .await?;
        assert_eq!(res.status(), StatusCode::CREATED);

        Ok(res.json().await?)
    }

    pub async fn list_subscribers(&self) -> Result<Vec<Subscriber>> {
        let res = self.get("/subscribers").await?;
        assert_eq!(res.status(), StatusCode::OK);

        Ok(res.json().await?)
    }
}

/// Asserts the status and the `message` of a JSON error body.
pub async fn assert_error_message(res: Response, status: StatusCode, message: &str) -> Result<()> {
    assert_eq!(res.status(), status, "Wrong response StatusCode");
    let body: Value = res.json().await?;
    assert_eq!(body, json!({ "message": message }));

    Ok(())
}
