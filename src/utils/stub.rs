use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};

use crate::utils::request::{HttpClient, HttpResponse, TransportError};

#[derive(Debug, Clone)]
pub(crate) struct Recorded {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

#[derive(Default)]
struct Inner {
    replies: Mutex<VecDeque<(u16, String)>>,
    recorded: Mutex<Vec<Recorded>>,
}

/// Canned replies in FIFO order. Runs dry with a transport error.
#[derive(Clone, Default)]
pub(crate) struct StubHttpClient {
    inner: Arc<Inner>,
}

impl StubHttpClient {
    pub fn reply(self, status: u16, body: &str) -> Self {
        self.inner.replies.lock().unwrap().push_back((status, body.to_string()));
        self
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.inner.recorded.lock().unwrap().clone()
    }
}

impl HttpClient for StubHttpClient {
    fn request(
        &self,
        method: Method,
        url: String,
        headers: HeaderMap,
        body: Option<String>,
    ) -> Result<HttpResponse, TransportError> {
        self.inner.recorded.lock().unwrap().push(Recorded {
            method,
            url: url.clone(),
            headers,
            body,
        });
        let (status, body) = self
            .inner
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| TransportError::Custom("connection refused".into()))?;
        Ok(HttpResponse {
            status: StatusCode::from_u16(status).unwrap(),
            headers: HeaderMap::new(),
            url,
            body,
        })
    }
}
