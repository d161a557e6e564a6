#![allow(dead_code)]

use secrecy::ExposeSecret;
use std::{
    net::TcpListener,
    sync::{Arc, Mutex},
    time::Duration,
};
use tracks::{
    api::ApiClient,
    config::AppConfig,
    navigation::{Navigator, Route},
    store::{CredentialStore, MemoryStore, StoreKey},
};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener as TokioListener,
};
use wiremock::MockServer;

pub fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

/// Remembers every navigation reset.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    resets: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn resets(&self) -> Vec<Route> {
        self.resets
            .lock()
            .map(|resets| resets.clone())
            .unwrap_or_default()
    }
}

impl Navigator for RecordingNavigator {
    fn reset_to(&self, route: Route) {
        if let Ok(mut resets) = self.resets.lock() {
            resets.push(route);
        }
    }
}

pub struct Harness {
    pub api: ApiClient,
    pub store: Arc<MemoryStore>,
    pub navigator: Arc<RecordingNavigator>,
}

impl Harness {
    pub fn new(server: &MockServer, values: Vec<(StoreKey, &str)>) -> anyhow::Result<Self> {
        Self::with_base_url(&server.uri(), values)
    }

    pub fn with_base_url(base_url: &str, values: Vec<(StoreKey, &str)>) -> anyhow::Result<Self> {
        let store = Arc::new(MemoryStore::with_values(values));
        let navigator = Arc::new(RecordingNavigator::default());
        let config = AppConfig::new(
            base_url,
            Duration::from_secs(5),
            "unused-credentials.json",
        )?;
        let api = ApiClient::new(
            config,
            store.clone() as Arc<dyn CredentialStore>,
            navigator.clone() as Arc<dyn Navigator>,
        )?;

        Ok(Self {
            api,
            store,
            navigator,
        })
    }

    pub async fn stored(&self, key: StoreKey) -> Option<String> {
        self.store
            .get(key)
            .await
            .ok()
            .flatten()
            .map(|value| value.expose_secret().to_string())
    }
}

/// Serves one raw reply per accepted connection, in order. `None` closes the
/// connection without answering. Returns the base URL.
pub async fn spawn_raw_server(replies: Vec<Option<&'static str>>) -> anyhow::Result<String> {
    let listener = TokioListener::bind("127.0.0.1:0").await?;
    let base_url = format!("http://{}", listener.local_addr()?);

    tokio::spawn(async move {
        for reply in replies {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let mut request = Vec::new();
            let mut chunk = [0_u8; 1024];
            while !request.windows(4).any(|window| window == b"\r\n\r\n") {
                match socket.read(&mut chunk).await {
                    Ok(0) | Err(_) => break,
                    Ok(read) => request.extend_from_slice(&chunk[..read]),
                }
            }
            if let Some(reply) = reply {
                let _ = socket.write_all(reply.as_bytes()).await;
                let _ = socket.flush().await;
            }
        }
    });

    Ok(base_url)
}

/// A base URL nothing listens on.
pub fn unused_base_url() -> anyhow::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}"))
}
