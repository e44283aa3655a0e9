//! Lightweight admin HTTP listener
//!
//! Exposes `/healthz` and `/metrics` on a separate address, with metrics
//! provided by the caller.

use axum::http::StatusCode;
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Renders metrics as `(http status, body)`.
pub type MetricsFn = fn() -> (u16, String);

async fn healthz() -> &'static str { "OK" }

fn metrics_response(f: MetricsFn) -> (StatusCode, String) {
    let (status, body) = f();
    (StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR), body)
}

pub fn admin_router(metrics_fn: MetricsFn) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/metrics", get(move || async move { metrics_response(metrics_fn) }))
}

/// Bind `addr` and serve the admin router on the current runtime.
pub async fn spawn_admin_server(addr: &str, metrics_fn: MetricsFn) -> anyhow::Result<JoinHandle<()>> {
    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    info!(addr = %local, "admin server listening");
    Ok(tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, admin_router(metrics_fn)).await {
            error!(error = %e, "admin server stopped");
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn fake_metrics() -> (u16, String) {
        (200, "quiz_store_loads_total 1\n".into())
    }

    fn broken_metrics() -> (u16, String) {
        (500, "encode error".into())
    }

    #[tokio::test]
    async fn healthz_is_ok() {
        let res = admin_router(fake_metrics)
            .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn metrics_status_is_forwarded() {
        let ok = admin_router(fake_metrics)
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);

        let failed = admin_router(broken_metrics)
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(failed.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
