//! # 소식(News) 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET    /api/news`       → 소식 목록 (날짜 내림차순)
//! - `POST   /api/news`       → 소식 작성
//! - `GET    /api/news/{id}`  → 단일 소식
//! - `PUT    /api/news/{id}`  → 소식 수정
//! - `DELETE /api/news/{id}`  → 소식 삭제
//!
//! 이미지는 먼저 `POST /api/uploads`로 올린 뒤 받은 URL을 `imageUrl`에 넣습니다.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{json, Value};

use super::{extract::Json, today, AppState};
use crate::{db, error::AppError, models::*};

pub async fn list_news(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let news = db::list_news(&state.pool).await?;
    Ok(Json(json!({ "news": news })))
}

pub async fn get_news(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<News>, AppError> {
    let news = db::get_news(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(news))
}

pub async fn create_news(
    State(state): State<AppState>,
    Json(req): Json<CreateNewsRequest>,
) -> Result<(StatusCode, Json<News>), AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }

    let date = req.date.unwrap_or_else(today);
    let news = db::create_news(&state.pool, &req, date).await?;
    tracing::info!(news_id = %news.id, "Published news");
    Ok((StatusCode::CREATED, Json(news)))
}

pub async fn update_news(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateNewsRequest>,
) -> Result<Json<News>, AppError> {
    let news = db::update_news(&state.pool, &id, &req)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(news))
}

pub async fn delete_news(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !db::delete_news(&state.pool, &id).await? {
        return Err(AppError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}
