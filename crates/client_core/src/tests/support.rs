//! In-process stand-in for the recommendation service.

use std::{collections::HashMap, sync::Arc};

use axum::{
    body::Bytes,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::Value;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone)]
struct MockState {
    routes: Arc<Mutex<HashMap<String, Vec<(StatusCode, Value)>>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct MockService {
    pub url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockService {
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .await
            .into_iter()
            .filter(|req| req.path == path)
            .collect()
    }
}

/// Routes are keyed as `"<METHOD> <path>"`; anything else answers 404 `{msg}`.
/// A key listed more than once answers in order, repeating its last response.
/// A `Value::Null` body answers with the bare status and no body.
pub async fn spawn_service(routes: Vec<(&str, StatusCode, Value)>) -> MockService {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let requests = Arc::new(Mutex::new(Vec::new()));
    let mut table: HashMap<String, Vec<(StatusCode, Value)>> = HashMap::new();
    for (key, status, body) in routes {
        table.entry(key.to_string()).or_default().push((status, body));
    }
    let state = MockState {
        routes: Arc::new(Mutex::new(table)),
        requests: requests.clone(),
    };
    let app = Router::new().fallback(record).with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    MockService {
        url: format!("http://{addr}"),
        requests,
    }
}

/// A base URL nothing listens on.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}")
}

async fn record(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let query = uri
        .query()
        .map(|raw| {
            url::form_urlencoded::parse(raw.as_bytes())
                .into_owned()
                .collect()
        })
        .unwrap_or_default();
    let recorded = RecordedRequest {
        method: method.clone(),
        path: uri.path().to_string(),
        query,
        authorization: headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).ok(),
    };
    state.requests.lock().await.push(recorded);

    let key = format!("{method} {}", uri.path());
    let mut routes = state.routes.lock().await;
    let next = routes.get_mut(&key).and_then(|queue| {
        if queue.len() > 1 {
            Some(queue.remove(0))
        } else {
            queue.first().cloned()
        }
    });
    match next {
        Some((status, Value::Null)) => status.into_response(),
        Some((status, body)) => (status, Json(body)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "msg": "no such route" })),
        )
            .into_response(),
    }
}
