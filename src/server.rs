use crate::config::ServerConfig;
use crate::domain::{ScheduleResponse, SchedulingInput};
use crate::solve;
use axum::{routing::get, routing::post, Json, Router};
use log::info;
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    service: &'static str,
    status: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        service: "course_scheduler",
        status: "ok",
    })
}

async fn solve_handler(Json(input): Json<SchedulingInput>) -> Json<ScheduleResponse> {
    Json(solve::solve(&input))
}

pub async fn run_server() {
    let config = ServerConfig::from_env();

    let app = Router::new()
        .route("/", get(health_handler))
        .route("/solve", post(solve_handler));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .unwrap();

    info!("Server running at http://{}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
