//! Mock API Server

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use colornav_core::{Error, Result};
use http::header::{CONTENT_TYPE, HeaderValue};
use http_body_util::{BodyExt, Full};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use crate::handlers::{self, Incoming, Reply};
use crate::routes::ApiRouter;
use crate::state::{MockState, SharedState};

/// A bound, not yet serving, mock server
pub struct MockServer {
    listener: TcpListener,
    state: SharedState,
}

impl MockServer {
    /// Bind the listener; port 0 picks a free port
    pub async fn bind(addr: SocketAddr, state: MockState) -> Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Server(format!("Failed to bind mock API on {}: {}", addr, e)))?;
        Ok(Self {
            listener,
            state: state.shared(),
        })
    }

    /// Address actually bound
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Handle to the state the server mutates
    pub fn state(&self) -> SharedState {
        self.state.clone()
    }

    /// Serve until the task is dropped
    pub async fn run(self) -> Result<()> {
        let addr = self.local_addr()?;
        tracing::info!("🔧 Mock ColorNavigator API listening on http://{}", addr);

        let router = Arc::new(ApiRouter::new());
        loop {
            let (stream, peer) = match self.listener.accept().await {
                Ok(s) => s,
                Err(e) => {
                    tracing::warn!("Mock accept error: {}", e);
                    continue;
                }
            };

            let io = TokioIo::new(stream);
            let state = self.state.clone();
            let router = router.clone();

            tokio::task::spawn(async move {
                let service = service_fn(move |req| handle_request(req, router.clone(), state.clone()));
                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    tracing::error!("Error serving connection from {}: {:?}", peer, err);
                }
            });
        }
    }
}

/// Bind and serve the mock API
pub async fn run_mock_server(addr: SocketAddr, state: MockState) -> Result<()> {
    MockServer::bind(addr, state).await?.run().await
}

async fn handle_request(
    req: Request<hyper::body::Incoming>,
    router: Arc<ApiRouter>,
    state: SharedState,
) -> std::result::Result<Response<Full<Bytes>>, Infallible> {
    let (parts, body) = req.into_parts();
    let path = parts.uri.path().to_string();
    let query = parts.uri.query().map(str::to_string);

    let body = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            return Ok(response(Reply::error(
                StatusCode::BAD_REQUEST,
                format!("Failed to read request body: {}", e),
            )));
        }
    };

    let reply = match router.resolve(&path) {
        Some(matched) => {
            let incoming = Incoming {
                method: &parts.method,
                query: query.as_deref(),
                body: &body,
            };
            let mut state = state.write();
            handlers::dispatch(&mut state, &matched, &incoming)
        }
        None => Reply::error(StatusCode::NOT_FOUND, "Not Found"),
    };

    tracing::info!("{} {} -> {}", parts.method, parts.uri, reply.status);
    Ok(response(reply))
}

fn response(reply: Reply) -> Response<Full<Bytes>> {
    let body = reply
        .body
        .map(|value| Bytes::from(value.to_string()))
        .unwrap_or_default();
    let mut response = Response::new(Full::new(body));
    *response.status_mut() = reply.status;
    if reply.status != StatusCode::NO_CONTENT {
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }
    response
}
