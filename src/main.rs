//! # Parafia 웹 서버 진입점
//!
//! 본당 관리 백엔드입니다. 신자 명부, 단체, 공지, 소식, 미사 지향 주간표,
//! 증명서 발급, 통계를 JSON API로 제공합니다.
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 연결 풀 생성과 마이그레이션
//! 4. 업로드 디렉토리 생성
//! 5. API 라우터 설정
//! 6. HTTP 서버 시작

mod config;
mod db;
mod error;
mod models;
mod routes;
mod services;

use std::path::Path;

use anyhow::Result;
use axum::{
    routing::{delete, get, post},
    Router,
};
use config::Config;
use routes::*;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅 초기화 ──
    // RUST_LOG가 없으면 parafia, tower_http, axum 모듈을 debug 레벨로 설정
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parafia=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    let config = Config::from_env()?;
    tracing::info!("Starting Parafia server on {}:{}", config.host, config.port);

    // ── 4단계: 연결 풀 + 마이그레이션 ──
    let pool = db::connect(&config.database_url).await?;

    // ── 5단계: 업로드 디렉토리 생성 ──
    let uploads_path = Path::new(&config.uploads_path);
    if !uploads_path.exists() {
        tokio::fs::create_dir_all(uploads_path).await?;
        tracing::info!("Created uploads directory: {}", config.uploads_path);
    }

    let state = AppState {
        pool,
        uploads_path: config.uploads_path.clone(),
        certificate_font: config.certificate_font.clone(),
    };

    // ── 6단계: API 라우터 설정 ──
    // 고정 경로(week-template, week-check)는 `{id}`보다 우선 매칭됩니다.
    let api_routes = Router::new()
        // 미사 지향
        .route("/intentions", get(list_intentions).post(create_intention))
        .route("/intentions/week-template", get(week_template))
        .route("/intentions/week-check", get(week_check))
        .route(
            "/intentions/{id}",
            get(get_intention).put(update_intention).delete(delete_intention),
        )
        // 신자와 성사 이력
        .route("/parishioners", get(list_parishioners).post(create_parishioner))
        .route(
            "/parishioners/{id}",
            get(get_parishioner).put(update_parishioner).delete(delete_parishioner),
        )
        .route(
            "/parishioners/{id}/sacraments",
            get(list_sacraments).post(create_sacrament),
        )
        .route("/sacraments/{id}", delete(delete_sacrament))
        // 단체
        .route("/groups", get(list_groups).post(create_group))
        .route(
            "/groups/{id}",
            get(get_group).put(update_group).delete(delete_group),
        )
        .route("/groups/{id}/members", post(add_group_member))
        .route(
            "/groups/{id}/members/{parishioner_id}",
            delete(remove_group_member),
        )
        // 공지
        .route("/announcements", get(list_announcements).post(create_announcement))
        .route(
            "/announcements/{id}",
            get(get_announcement).put(update_announcement).delete(delete_announcement),
        )
        // 소식
        .route("/news", get(list_news).post(create_news))
        .route("/news/{id}", get(get_news).put(update_news).delete(delete_news))
        // 업로드, 증명서, 통계
        .route("/uploads", post(upload_image))
        .route("/certificates", post(generate_certificate))
        .route("/statistics", get(get_statistics))
        .route("/health", get(health_check))
        .with_state(state);

    // 개발 환경에서는 모든 출처를 허용합니다.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 업로드된 이미지는 `/uploads/<파일명>`으로 공개됩니다.
    let router = Router::new()
        .nest("/api", api_routes)
        .nest_service(
            services::uploads::UPLOADS_URL_PREFIX,
            ServeDir::new(&config.uploads_path),
        );

    // ── 7단계: 프론트엔드 정적 파일 서빙 ──
    // SPA이므로 찾을 수 없는 경로는 index.html로 돌려보냅니다.
    let frontend_dist = Path::new(&config.frontend_dist);
    let app = if frontend_dist.exists() {
        tracing::info!("Serving frontend static files from {}", config.frontend_dist);

        let serve_dir = ServeDir::new(frontend_dist)
            .not_found_service(ServeFile::new(frontend_dist.join("index.html")));

        router
            .fallback_service(serve_dir)
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    } else {
        tracing::warn!("Frontend dist directory not found, serving API only");

        router.layer(cors).layer(TraceLayer::new_for_http())
    };

    // ── 8단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
