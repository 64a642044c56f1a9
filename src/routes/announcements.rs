//! # 공지(Announcement) 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET    /api/announcements`       → 공지 목록 (날짜 내림차순, 항목 순서 유지)
//! - `POST   /api/announcements`       → 공지 생성
//! - `GET    /api/announcements/{id}`  → 단일 공지
//! - `PUT    /api/announcements/{id}`  → 공지 수정 (`items`가 있으면 항목 교체)
//! - `DELETE /api/announcements/{id}`  → 공지 삭제

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{json, Value};

use super::{extract::Json, today, AppState};
use crate::{db, error::AppError, models::*};

pub async fn list_announcements(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let announcements = db::list_announcements(&state.pool).await?;
    Ok(Json(json!({ "announcements": announcements })))
}

pub async fn get_announcement(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AnnouncementWithItems>, AppError> {
    let announcement = db::get_announcement(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(announcement))
}

/// 제목은 필수, 날짜가 없으면 오늘입니다. 빈 항목은 저장되지 않습니다.
pub async fn create_announcement(
    State(state): State<AppState>,
    Json(req): Json<CreateAnnouncementRequest>,
) -> Result<(StatusCode, Json<AnnouncementWithItems>), AppError> {
    let title = req.title.trim();
    if title.is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }

    let date = req.date.unwrap_or_else(today);
    let created = db::create_announcement(&state.pool, title, date, &req.items).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_announcement(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateAnnouncementRequest>,
) -> Result<Json<AnnouncementWithItems>, AppError> {
    let updated = db::update_announcement(&state.pool, &id, &req)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(updated))
}

pub async fn delete_announcement(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !db::delete_announcement(&state.pool, &id).await? {
        return Err(AppError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_state;

    #[tokio::test]
    async fn create_defaults_date_and_requires_title() {
        let state = test_state().await;

        let blank = CreateAnnouncementRequest {
            title: " ".into(),
            date: None,
            items: vec![],
        };
        let err = create_announcement(State(state.clone()), Json(blank))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let req = CreateAnnouncementRequest {
            title: "Ogłoszenia duszpasterskie".into(),
            date: None,
            items: vec!["Msza o 18:00".into(), "".into()],
        };
        let (status, Json(created)) = create_announcement(State(state.clone()), Json(req))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.announcement.date, today());
        assert_eq!(created.items.len(), 1);

        let Json(listed) = list_announcements(State(state)).await.unwrap();
        assert_eq!(listed["announcements"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_announcement_is_not_found() {
        let state = test_state().await;
        let err = update_announcement(
            State(state.clone()),
            Path("missing".into()),
            Json(UpdateAnnouncementRequest::default()),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound));

        let err = delete_announcement(State(state), Path("missing".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }
}
