use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::routes::Router;
use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
use hyper_util::server::graceful::GracefulShutdown;
use paramgate::errors::GateError;
use paramgate::gate::Handler;
use paramgate::request::{HttpMethod, HttpRequest};
use paramgate::response::{json_response, serialize_response_body, HttpResponse};
use serde_json::json;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::net::TcpListener;

const FALLBACK: &[u8] = b"{\"detail\":\"Internal Server Error\"}";

/// Accepts connections until ctrl-c, then drains in-flight connections.
pub async fn serve(config: &ServerConfig, router: Arc<Router>) -> Result<(), ServerError> {
    let listener = TcpListener::bind(config.addr).await?;
    log::info!("Listening on {}", config.addr);

    let mut builder = Builder::new(TokioExecutor::new());
    if config.keep_alive {
        builder.http1().keep_alive(true);
    }
    let graceful = GracefulShutdown::new();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                log::info!("Shutdown requested");
                break;
            }
            accept = listener.accept() => {
                let (stream, peer) = match accept {
                    Ok(s) => s,
                    Err(e) => {
                        log::error!("accept error: {e}");
                        continue;
                    }
                };
                let router = router.clone();
                let service = service_fn(move |req| handle_request(req, router.clone()));
                let connection = builder.serve_connection(TokioIo::new(stream), service).into_owned();
                let watcher = graceful.watcher();
                tokio::spawn(async move {
                    if let Err(err) = watcher.watch(connection).await {
                        log::error!("connection error from {peer}: {err}");
                    }
                });
            }
        }
    }

    drop(listener);
    graceful.shutdown().await;
    Ok(())
}

async fn handle_request(
    req: Request<Incoming>,
    router: Arc<Router>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let response = match to_core_request(&req) {
        Ok(request) => router.handle(&request),
        Err(err) => {
            log::debug!("{err}");
            json_response(405, json!({ "detail": "method not allowed" }))
        }
    };
    Ok(to_hyper_response(response))
}

/// Converts the hyper request head into the framework-neutral request.
pub fn to_core_request<B>(req: &Request<B>) -> Result<HttpRequest, GateError> {
    let method: HttpMethod = req.method().as_str().parse()?;
    let target = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    let mut request = HttpRequest::new(method, target);
    for (name, value) in req.headers() {
        if let Ok(value) = value.to_str() {
            request = request.with_header(name.as_str(), value);
        }
    }
    Ok(request)
}

pub fn to_hyper_response(response: HttpResponse) -> Response<Full<Bytes>> {
    let encoded = serialize_response_body(&response.body);
    let mut builder = Response::builder().status(response.status_code);
    for (name, value) in &response.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder.body(Full::from(encoded)).unwrap_or_else(|e| {
        log::error!("Failed to build response: {e}");
        let mut fallback = Response::new(Full::from(FALLBACK.to_vec()));
        *fallback.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
        fallback
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        fallback
    })
}
