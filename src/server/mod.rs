// src/server/mod.rs
// Prometheus text endpoint, running beside the probe loop.
use crate::metrics::MetricsRegistry;
use anyhow::Result;
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Request, Response, Server, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

/// Bind `addr` and serve `registry` under `path` on a background task.
/// Returns the bound address (useful when `addr` asks for port 0).
pub fn start_metrics_server(
    addr: SocketAddr,
    registry: Arc<MetricsRegistry>,
    path: &str,
) -> Result<SocketAddr> {
    let service_path: Arc<str> = Arc::from(path);

    let make_service = make_service_fn(move |_| {
        let registry = registry.clone();
        let path = service_path.clone();

        async move {
            Ok::<_, Infallible>(service_fn(move |req: Request<Body>| {
                let registry = registry.clone();
                let path = path.clone();

                async move { render(&req, &registry, &path) }
            }))
        }
    });

    let server = Server::try_bind(&addr)?.serve(make_service);
    let bound = server.local_addr();

    info!("Metrics server listening on http://{}{}", bound, path);

    tokio::spawn(async move {
        if let Err(e) = server.await {
            error!("Metrics server error: {}", e);
        }
    });

    Ok(bound)
}

fn render(
    req: &Request<Body>,
    registry: &MetricsRegistry,
    path: &str,
) -> Result<Response<Body>, hyper::http::Error> {
    if req.uri().path() != path {
        return Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Body::from("Not Found"));
    }

    match registry.gather() {
        Ok(metrics) => Response::builder()
            .status(StatusCode::OK)
            .header("Content-Type", "text/plain; version=0.0.4")
            .body(Body::from(metrics)),
        Err(e) => {
            error!("Encoding metrics failed: {}", e);
            Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .body(Body::from("metrics unavailable"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_metrics_on_configured_path() {
        let registry = Arc::new(MetricsRegistry::new().unwrap());
        registry.collector().record_sink_failure();

        let addr = start_metrics_server(([127, 0, 0, 1], 0).into(), registry, "/metrics").unwrap();

        let body = reqwest::get(format!("http://{addr}/metrics"))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(body.contains("checker_sink_failures_total 1"));

        let status = reqwest::get(format!("http://{addr}/other"))
            .await
            .unwrap()
            .status();
        assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
    }
}
