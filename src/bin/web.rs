//! Kampus HTTP 接口
//!
//! 启动: cargo run --bin kampus-web --features web
//! - POST /ask          `{"message": "..."}` → `{"reply": "..."}`
//! - GET  /stats/today  `{"date": "YYYY-MM-DD", "count": n}`

#![cfg(feature = "web")]

use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use kampus::config::load_config_or_default;
use kampus::stats::today;
use kampus::{observability, AskReply, PipelineBuilder, ResolutionPipeline};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
struct AskRequest {
    /// 缺省视为空串
    #[serde(default)]
    message: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct TodayStats {
    date: String,
    count: u64,
}

async fn ask(
    State(pipeline): State<Arc<ResolutionPipeline>>,
    Json(req): Json<AskRequest>,
) -> Json<AskReply> {
    Json(pipeline.ask(&req.message).await)
}

async fn stats_today(State(pipeline): State<Arc<ResolutionPipeline>>) -> Json<TodayStats> {
    Json(TodayStats {
        date: today().format("%Y-%m-%d").to_string(),
        count: pipeline.today_count().await,
    })
}

fn create_router(pipeline: Arc<ResolutionPipeline>) -> Router {
    Router::new()
        .route("/ask", post(ask))
        .route("/stats/today", get(stats_today))
        .with_state(pipeline)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    observability::init();

    let cfg = load_config_or_default(None);
    let port = std::env::var("KAMPUS_WEB_PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(cfg.web.port);

    let pipeline = PipelineBuilder::new(cfg)
        .build()
        .context("Failed to build pipeline")?;
    let app = create_router(Arc::new(pipeline));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Kampus Web: http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use kampus::directory::{StaffDirectory, StaffRecord};
    use kampus::llm::MockLlmClient;
    use kampus::matcher::FuzzyMatcher;
    use kampus::reply::{RemoteFallback, ResponseTemplater};
    use kampus::stats::SqliteQueryCounter;
    use tower::ServiceExt;

    fn app() -> Router {
        let pipeline = ResolutionPipeline::new(
            Arc::new(StaffDirectory::from_records(vec![StaffRecord::new(
                "Budi Santoso",
                "198001012005011001",
            )])),
            FuzzyMatcher::default(),
            ResponseTemplater::new(),
            RemoteFallback::new(Arc::new(MockLlmClient::replying("dari model"))),
            Arc::new(SqliteQueryCounter::open_in_memory().unwrap()),
        );
        create_router(Arc::new(pipeline))
    }

    async fn body_json<T: serde::de::DeserializeOwned>(resp: axum::response::Response) -> T {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_ask_route() {
        let resp = app()
            .oneshot(
                Request::post("/ask")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"message": "jadwal ujian semester depan"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let reply: AskReply = body_json(resp).await;
        assert_eq!(reply.reply, "dari model");
    }

    #[tokio::test]
    async fn test_stats_counts_asks() {
        let app = app();
        for _ in 0..2 {
            app.clone()
                .oneshot(
                    Request::post("/ask")
                        .header("content-type", "application/json")
                        .body(Body::from("{}"))
                        .unwrap(),
                )
                .await
                .unwrap();
        }
        let resp = app
            .oneshot(Request::get("/stats/today").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let stats: TodayStats = body_json(resp).await;
        assert_eq!(stats.count, 2);
    }
}
