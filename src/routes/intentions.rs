//! # 미사 지향(Intention) 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET    /api/intentions`                → 지향 목록 (날짜 내림차순, flat 미사 목록)
//! - `POST   /api/intentions`                → 새 지향 생성 (multipart 폼)
//! - `GET    /api/intentions/week-template`  → 빈 7일 주간표
//! - `GET    /api/intentions/week-check`     → 주간 범위 검증
//! - `GET    /api/intentions/{id}`           → 단일 지향 (주간표 형태)
//! - `PUT    /api/intentions/{id}`           → 지향 수정 (주간표 또는 flat 미사 목록)
//! - `DELETE /api/intentions/{id}`           → 지향 삭제
//!
//! ## 읽기/쓰기 형태
//! 저장은 flat 미사 목록(`masses`)으로 하고, 단건 조회와 수정 응답은
//! `weekStart`/`weekEnd`/`days`가 붙은 주간표 형태로 돌려줍니다.
//! 변환 규칙은 `services::schedule`에 있습니다.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use serde_json::{json, Value};

use super::{
    extract::{Json, Query},
    today, AppState,
};
use crate::{
    db,
    error::AppError,
    models::*,
    services::{self, schedule},
};

/// `GET /intentions` — 전체 지향 목록
///
/// # 반환값
/// `{ "intentions": [...] }`. 각 항목에는 저장된 그대로의 `masses`가 붙습니다.
pub async fn list_intentions(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let intentions = db::list_intentions(&state.pool).await?;
    Ok(Json(json!({ "intentions": intentions })))
}

/// `GET /intentions/{id}` — 주간표 형태로 조회합니다.
pub async fn get_intention(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<WeeklyIntention>, AppError> {
    let weekly = services::intentions::get_weekly(&state.pool, &id).await?;
    Ok(Json(weekly))
}

/// multipart 폼에서 읽어 둔 값들
#[derive(Default)]
struct IntentionForm {
    title: Option<String>,
    date: Option<String>,
    masses: Option<String>,
    image: Option<(String, Vec<u8>)>,
}

impl IntentionForm {
    async fn read(multipart: &mut Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            // field.text()/bytes()가 field를 소비하므로 이름을 먼저 복사합니다.
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "title" => form.title = Some(field.text().await?),
                "date" => form.date = Some(field.text().await?),
                "masses" => form.masses = Some(field.text().await?),
                "image" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let bytes = field.bytes().await?;
                    // 파일을 고르지 않은 폼은 빈 파일 파트를 보냅니다.
                    if !bytes.is_empty() {
                        form.image = Some((file_name, bytes.to_vec()));
                    }
                }
                other => tracing::debug!("Ignoring unknown form field: {}", other),
            }
        }

        Ok(form)
    }
}

/// `POST /intentions` — 새 지향을 생성합니다.
///
/// # 폼 필드
/// - `title`: 필수 (비어 있으면 400)
/// - `date`: 선택, 없으면 오늘. 형식이 잘못되면 400
/// - `masses`: `[{time, intention}]` JSON 문자열. 파싱 실패는 500
/// - `image`: 선택, 업로드 디렉토리에 저장되고 `imageUrl`이 채워집니다
pub async fn create_intention(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<IntentionWithMasses>), AppError> {
    let form = IntentionForm::read(&mut multipart).await?;

    let title = form.title.unwrap_or_default();
    if title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }

    let date = match form.date.as_deref().map(str::trim) {
        None | Some("") => today(),
        Some(text) => schedule::parse_date(text)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid date: {text}")))?,
    };

    let masses: Vec<MassInput> = match form.masses.as_deref().map(str::trim) {
        None | Some("") => Vec::new(),
        Some(json) => serde_json::from_str(json)?,
    };

    let image_url = match form.image {
        Some((file_name, bytes)) => Some(
            services::uploads::store_image(&state.uploads_path, &file_name, &bytes).await?,
        ),
        None => None,
    };

    let new = NewIntention {
        title,
        date,
        image_url,
        masses,
    };
    let created = services::intentions::create(&state.pool, new).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /intentions/{id}` — 지향을 수정합니다.
///
/// 본문은 `days`(주간표) 또는 `masses`(flat)를 담을 수 있고, 둘 다 있으면 `days`가 우선합니다.
/// 기존 미사는 모두 지워지고 요청 내용으로 다시 만들어집니다.
pub async fn update_intention(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateIntentionRequest>,
) -> Result<Json<WeeklyIntention>, AppError> {
    let weekly = services::intentions::update(&state.pool, &id, req).await?;
    Ok(Json(weekly))
}

/// `DELETE /intentions/{id}` — 지향과 그 미사들을 삭제합니다.
pub async fn delete_intention(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    services::intentions::delete(&state.pool, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /intentions/week-template?weekStart=2025-06-02` — 빈 주간표
///
/// 월요일 여부는 확인하지 않습니다.
pub async fn week_template(Query(query): Query<WeekTemplateQuery>) -> Json<WeekTemplate> {
    Json(schedule::seed_week(query.week_start))
}

/// `GET /intentions/week-check?weekStart=...&weekEnd=...` — 주간 범위 검증
///
/// 유효하면 `{ "valid": true }`, 아니면 400과 사유 메시지를 돌려줍니다.
pub async fn week_check(Query(query): Query<WeekRangeQuery>) -> Result<Json<Value>, AppError> {
    schedule::validate_week_range(query.week_start, query.week_end)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    Ok(Json(json!({ "valid": true })))
}
