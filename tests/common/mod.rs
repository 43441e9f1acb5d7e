use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Form, Router,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{mpsc, Arc, Mutex};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// One login request as the mock service saw it.
#[derive(Debug, Clone)]
pub struct Received {
    pub content_type: Option<String>,
    pub origin: Option<String>,
    pub referer: Option<String>,
    pub form: HashMap<String, String>,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: &'static str,
    received: Arc<Mutex<Vec<Received>>>,
}

pub struct MockService {
    pub addr: SocketAddr,
    received: Arc<Mutex<Vec<Received>>>,
}

impl MockService {
    /// Base URL without a trailing slash.
    pub fn base(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn received(&self) -> Vec<Received> {
        self.received.lock().expect("received lock").clone()
    }
}

/// Serves `POST /api/user/login` on an ephemeral port, answering every request
/// with `status` and `body`. The server runs on its own thread so the blocking
/// client under test never shares a runtime with it.
pub fn spawn(status: StatusCode, body: &'static str) -> MockService {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mock_service=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();

    let received = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        status,
        body,
        received: received.clone(),
    };

    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("mock runtime");
        rt.block_on(async move {
            let app = Router::new()
                .route("/api/user/login", post(login))
                .with_state(state);

            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind mock service");
            let addr = listener.local_addr().expect("mock address");
            tracing::debug!(target: "mock_service", "listening on {}", addr);
            tx.send(addr).expect("send mock address");

            axum::serve(listener, app).await.expect("mock service");
        });
    });

    let addr = rx.recv().expect("mock service never started");
    MockService { addr, received }
}

async fn login(
    State(state): State<MockState>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> (StatusCode, &'static str) {
    let value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let seen = Received {
        content_type: value(header::CONTENT_TYPE),
        origin: value(header::ORIGIN),
        referer: value(header::REFERER),
        form,
    };
    tracing::debug!(target: "mock_service", "login request: {:?}", seen);
    state.received.lock().expect("received lock").push(seen);

    (state.status, state.body)
}

/// An address nothing is listening on.
pub fn closed_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe port");
    let addr = listener.local_addr().expect("probe port address");
    drop(listener);
    addr
}
