use hyper::{
    body,
    service::{make_service_fn, service_fn},
    Body, Request, Response, Server,
};
use std::{
    collections::HashMap,
    convert::Infallible,
    net::SocketAddr,
    sync::{Arc, Mutex},
};
use tokio::sync::oneshot;
use tracing::error;

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub uri: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

/// A local HTTP server that records every request it receives and answers
/// each one with the same JSON body.
pub struct CaptureServer {
    address: SocketAddr,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl CaptureServer {
    pub fn start<S: Into<String>>(response_body: S) -> Result<Self, hyper::Error> {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let response_body = Arc::new(response_body.into());

        let captured = requests.clone();
        let make_service = make_service_fn(move |_| {
            let captured = captured.clone();
            let response_body = response_body.clone();
            async move {
                Ok::<_, Infallible>(service_fn(move |request| {
                    handle_request(request, captured.clone(), response_body.clone())
                }))
            }
        });

        let server = Server::try_bind(&SocketAddr::from(([127, 0, 0, 1], 0)))?.serve(make_service);
        let address = server.local_addr();
        let (shutdown, shutdown_signal) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let server = server.with_graceful_shutdown(async {
                let _ = shutdown_signal.await;
            });
            if let Err(e) = server.await {
                error!("Capture server error: {}", e);
            }
        });

        Ok(Self {
            address,
            requests,
            shutdown: Some(shutdown),
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.address)
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl Drop for CaptureServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

async fn handle_request(
    request: Request<Body>,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
    response_body: Arc<String>,
) -> Result<Response<Body>, Infallible> {
    let method = request.method().to_string();
    let uri = request.uri().to_string();
    let headers = request
        .headers()
        .iter()
        .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
        .collect::<HashMap<_, _>>();

    let body = match body::to_bytes(request.into_body()).await {
        Ok(body) => String::from_utf8_lossy(&body).into_owned(),
        Err(e) => {
            error!("Couldn't read request body: {}", e);
            String::new()
        }
    };

    if let Ok(mut requests) = captured.lock() {
        requests.push(CapturedRequest {
            method,
            uri,
            headers,
            body,
        });
    }

    let mut response = Response::new(Body::from(response_body.as_str().to_owned()));
    response.headers_mut().insert(
        hyper::header::CONTENT_TYPE,
        hyper::header::HeaderValue::from_static("application/json"),
    );
    Ok(response)
}
