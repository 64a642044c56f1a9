//! # 미사 지향 데이터베이스 쿼리 모듈
//!
//! ## 테이블 구조
//! - `intentions`: 지향 (기준 날짜 하나)
//! - `masses`: 지향에 속한 미사. `ON DELETE CASCADE`로 지향과 함께 삭제됩니다.
//!
//! 수정은 부분 갱신이 아니라 "스칼라 갱신 → 미사 전부 삭제 → 다시 생성"이며,
//! 이 세 단계는 하나의 트랜잭션으로 묶입니다.

use std::collections::HashMap;

use chrono::NaiveDate;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::error::AppError;
use crate::models::*;

/// 모든 지향을 날짜 내림차순으로, 각자의 미사 목록과 함께 조회합니다.
///
/// 미사는 한 번의 쿼리로 가져와 지향 ID별로 묶습니다.
pub async fn list_intentions(pool: &SqlitePool) -> Result<Vec<IntentionWithMasses>, AppError> {
    let intentions = sqlx::query_as::<_, Intention>(
        r#"
        SELECT id, title, date, image_url, created_at, updated_at
        FROM intentions
        ORDER BY date DESC, created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    let masses = sqlx::query_as::<_, Mass>(
        "SELECT id, intention_id, position, time, intention FROM masses ORDER BY position",
    )
    .fetch_all(pool)
    .await?;

    let mut by_intention: HashMap<String, Vec<Mass>> = HashMap::new();
    for mass in masses {
        by_intention
            .entry(mass.intention_id.clone())
            .or_default()
            .push(mass);
    }

    Ok(intentions
        .into_iter()
        .map(|intention| {
            let masses = by_intention.remove(&intention.id).unwrap_or_default();
            IntentionWithMasses { intention, masses }
        })
        .collect())
}

pub async fn get_intention(pool: &SqlitePool, id: &str) -> Result<Option<Intention>, AppError> {
    let intention = sqlx::query_as::<_, Intention>(
        r#"
        SELECT id, title, date, image_url, created_at, updated_at
        FROM intentions
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(intention)
}

/// 지향 하나의 미사를 입력 순서대로 조회합니다.
pub async fn list_masses(pool: &SqlitePool, intention_id: &str) -> Result<Vec<Mass>, AppError> {
    let masses = sqlx::query_as::<_, Mass>(
        r#"
        SELECT id, intention_id, position, time, intention
        FROM masses
        WHERE intention_id = ?
        ORDER BY position
        "#,
    )
    .bind(intention_id)
    .fetch_all(pool)
    .await?;

    Ok(masses)
}

/// 지향과 미사를 함께 조회합니다. 지향이 없으면 None.
pub async fn get_intention_with_masses(
    pool: &SqlitePool,
    id: &str,
) -> Result<Option<(Intention, Vec<Mass>)>, AppError> {
    let Some(intention) = get_intention(pool, id).await? else {
        return Ok(None);
    };
    let masses = list_masses(pool, id).await?;
    Ok(Some((intention, masses)))
}

/// 미사 행들을 순서대로 삽입합니다. 트랜잭션 안에서만 호출됩니다.
async fn insert_masses(
    tx: &mut Transaction<'_, Sqlite>,
    intention_id: &str,
    masses: &[MassInput],
) -> Result<(), AppError> {
    for (position, mass) in masses.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO masses (id, intention_id, position, time, intention)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(uuid::Uuid::now_v7().to_string())
        .bind(intention_id)
        .bind(position as i64)
        .bind(&mass.time)
        .bind(&mass.intention)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

/// 지향과 미사를 생성합니다. 미사는 입력 그대로 저장됩니다.
pub async fn create_intention(
    pool: &SqlitePool,
    new: &NewIntention,
) -> Result<IntentionWithMasses, AppError> {
    let id = uuid::Uuid::now_v7().to_string();

    let mut tx = pool.begin().await?;

    sqlx::query("INSERT INTO intentions (id, title, date, image_url) VALUES (?, ?, ?, ?)")
        .bind(&id)
        .bind(&new.title)
        .bind(new.date)
        .bind(&new.image_url)
        .execute(&mut *tx)
        .await?;

    insert_masses(&mut tx, &id, &new.masses).await?;

    tx.commit().await?;

    let (intention, masses) = get_intention_with_masses(pool, &id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created intention".to_string()))?;
    Ok(IntentionWithMasses { intention, masses })
}

/// 지향의 스칼라 필드를 갱신하고 미사 목록을 통째로 교체합니다.
///
/// 중간에 실패하면 트랜잭션이 drop되면서 롤백됩니다.
///
/// ## 반환값
/// - `Ok(true)`: 갱신됨
/// - `Ok(false)`: 해당 ID의 지향이 없음
pub async fn replace_intention(
    pool: &SqlitePool,
    id: &str,
    title: &str,
    date: NaiveDate,
    image_url: Option<&str>,
    masses: &[MassInput],
) -> Result<bool, AppError> {
    // pool.begin(): 트랜잭션 시작. commit() 전에 `?`로 빠져나가면
    // tx가 drop되면서 자동으로 롤백됩니다.
    let mut tx = pool.begin().await?;

    // 1단계: 스칼라 필드 갱신. `&mut *tx`는 트랜잭션 안의 연결을 빌려줍니다.
    let updated = sqlx::query(
        r#"
        UPDATE intentions
        SET title = ?, date = ?, image_url = ?,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(title)
    .bind(date)
    .bind(image_url)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    // 바뀐 행이 없으면 그 사이에 지향이 삭제된 것입니다 (tx는 롤백).
    if updated.rows_affected() == 0 {
        return Ok(false);
    }

    // 2단계: 기존 미사를 전부 지우고
    sqlx::query("DELETE FROM masses WHERE intention_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    // 3단계: 요청 순서대로 다시 삽입 (position = 배열 인덱스)
    insert_masses(&mut tx, id, masses).await?;

    tx.commit().await?;
    Ok(true)
}

/// 지향을 삭제합니다. 미사는 CASCADE로 함께 삭제됩니다.
pub async fn delete_intention(pool: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM intentions WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
