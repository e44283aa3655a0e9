use axum::{
    extract::Request,
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod questions;

/// Build the application router: the two question endpoints, with the
/// editor's static assets served for every other path.
pub fn build_router(state: AppState, cors: CorsLayer, static_dir: &str) -> Router {
    let api = Router::new()
        .route("/api/questions/load", get(questions::load_questions))
        .route("/api/questions/save", post(questions::save_questions));

    let assets = ServiceBuilder::new()
        .layer(middleware::from_fn(hide_dotfiles))
        .service(ServeDir::new(static_dir));

    api.fallback_service(assets)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

/// Dotfiles (`.env`, `.git/...`) under the asset directory are never served.
async fn hide_dotfiles(req: Request, next: Next) -> Response {
    if is_hidden_path(req.uri().path()) {
        return StatusCode::NOT_FOUND.into_response();
    }
    next.run(req).await
}

fn is_hidden_path(path: &str) -> bool {
    path.split('/').any(|segment| {
        segment.starts_with('.') || segment.get(..3).is_some_and(|p| p.eq_ignore_ascii_case("%2e"))
    })
}

#[cfg(test)]
mod tests {
    use super::is_hidden_path;

    #[test]
    fn hidden_segments_are_detected() {
        assert!(is_hidden_path("/.env"));
        assert!(is_hidden_path("/.git/config"));
        assert!(is_hidden_path("/assets/.secret"));
        assert!(is_hidden_path("/%2Eenv"));
        assert!(!is_hidden_path("/index.html"));
        assert!(!is_hidden_path("/js/app.min.js"));
        assert!(!is_hidden_path("/"));
    }
}
