//! # 미사 지향 서비스
//!
//! 라우트 핸들러와 DB 계층 사이에서 `schedule`의 변환 규칙을 적용합니다.
//! 조회(GET)와 수정(PUT)은 같은 주간표 형태를 돌려줍니다.

use sqlx::SqlitePool;

use crate::{db, error::AppError, models::*};

use super::schedule;

/// 단건 조회: 저장된 지향을 주간표 형태로 변환합니다.
pub async fn get_weekly(pool: &SqlitePool, id: &str) -> Result<WeeklyIntention, AppError> {
    let (intention, masses) = db::get_intention_with_masses(pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(schedule::to_weekly(intention, masses))
}

/// 생성: 제목은 필수이며 미사는 입력 그대로 저장됩니다.
pub async fn create(pool: &SqlitePool, new: NewIntention) -> Result<IntentionWithMasses, AppError> {
    if new.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }

    let created = db::create_intention(pool, &new).await?;
    tracing::info!(
        intention_id = %created.intention.id,
        date = %created.intention.date,
        masses = created.masses.len(),
        "Created intention"
    );
    Ok(created)
}

/// 수정: 스칼라 필드를 정리하고 미사 목록을 통째로 교체합니다.
///
/// - 날짜: `days[0].date`가 있으면 그 값, 없으면 기존 값
/// - 제목: 비어 있지 않은 새 값, 없으면 기존 값
/// - 이미지: 새 값이 있으면 그 값, 없으면 기존 값
pub async fn update(
    pool: &SqlitePool,
    id: &str,
    req: UpdateIntentionRequest,
) -> Result<WeeklyIntention, AppError> {
    let existing = db::get_intention(pool, id)
        .await?
        .ok_or(AppError::NotFound)?;

    let (patch, mass_schedule) = req.split();

    let date = mass_schedule.anchor_date().unwrap_or(existing.date);
    let title = patch
        .title
        .filter(|title| !title.is_empty())
        .unwrap_or(existing.title);
    let image_url = patch.image_url.or(existing.image_url);
    let masses = schedule::masses_to_store(&mass_schedule);

    let updated = db::replace_intention(pool, id, &title, date, image_url.as_deref(), &masses)
        .await
        .inspect_err(|e| tracing::error!(intention_id = %id, "Failed to update intention: {}", e))?;
    if !updated {
        // 트랜잭션 도중 다른 요청이 지운 경우
        return Err(AppError::NotFound);
    }

    tracing::info!(intention_id = %id, %date, masses = masses.len(), "Updated intention");
    get_weekly(pool, id).await
}

pub async fn delete(pool: &SqlitePool, id: &str) -> Result<(), AppError> {
    if !db::delete_intention(pool, id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(intention_id = %id, "Deleted intention");
    Ok(())
}
