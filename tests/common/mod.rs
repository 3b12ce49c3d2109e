use async_trait::async_trait;
use cle_tech_scraper::app::ports::{HttpClientPort, HttpGetResult};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory website: serves canned bodies and remembers every URL asked for.
/// Unknown URLs fail like a refused connection.
#[derive(Default)]
pub struct StubSite {
    pages: HashMap<String, (u16, String)>,
    requested: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl StubSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), (200, body.to_string()));
        self
    }

    pub fn status(mut self, url: &str, status: u16, body: &str) -> Self {
        self.pages.insert(url.to_string(), (status, body.to_string()));
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClientPort for StubSite {
    async fn get(&self, url: &str) -> Result<HttpGetResult, String> {
        self.requested.lock().unwrap().push(url.to_string());
        match self.pages.get(url) {
            Some((status, body)) => Ok(HttpGetResult {
                status: *status,
                bytes: body.as_bytes().to_vec(),
                content_type: "text/html; charset=utf-8".to_string(),
            }),
            None => Err(format!("error sending request for url ({})", url)),
        }
    }
}
