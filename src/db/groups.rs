//! # 단체 데이터베이스 쿼리 모듈
//!
//! ## 테이블 구조
//! - `groups`: 단체 (대표 `leader_id`는 신자를 참조)
//! - `group_members`: 단체와 신자의 다대다(N:M) 관계 테이블
//!
//! ```text
//! parishioners ←── group_members ──→ groups
//!      (1)             (N:M)           (1)
//! ```

use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::*;

/// 모든 단체를 이름순으로, 회원 수와 함께 조회합니다.
pub async fn list_groups(pool: &SqlitePool) -> Result<Vec<GroupListItem>, AppError> {
    let groups = sqlx::query_as::<_, GroupListItem>(
        r#"
        SELECT g.id, g.name, g.description, g.leader_id, g.created_at, g.updated_at,
               (SELECT COUNT(*) FROM group_members gm WHERE gm.group_id = g.id) AS member_count
        FROM groups g
        ORDER BY g.name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(groups)
}

pub async fn get_group(pool: &SqlitePool, id: &str) -> Result<Option<Group>, AppError> {
    let group = sqlx::query_as::<_, Group>(
        "SELECT id, name, description, leader_id, created_at, updated_at FROM groups WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(group)
}

pub async fn get_parishioner_summary(
    pool: &SqlitePool,
    id: &str,
) -> Result<Option<ParishionerSummary>, AppError> {
    let summary = sqlx::query_as::<_, ParishionerSummary>(
        "SELECT id, first_name, last_name FROM parishioners WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(summary)
}

/// 단체 회원 명단 (성/이름순)
pub async fn list_group_members(
    pool: &SqlitePool,
    group_id: &str,
) -> Result<Vec<ParishionerSummary>, AppError> {
    let members = sqlx::query_as::<_, ParishionerSummary>(
        r#"
        SELECT p.id, p.first_name, p.last_name
        FROM parishioners p
        JOIN group_members gm ON gm.parishioner_id = p.id
        WHERE gm.group_id = ?
        ORDER BY p.last_name, p.first_name
        "#,
    )
    .bind(group_id)
    .fetch_all(pool)
    .await?;

    Ok(members)
}

pub async fn create_group(pool: &SqlitePool, req: &CreateGroupRequest) -> Result<Group, AppError> {
    let id = uuid::Uuid::now_v7().to_string();

    sqlx::query("INSERT INTO groups (id, name, description, leader_id) VALUES (?, ?, ?, ?)")
        .bind(&id)
        .bind(req.name.trim())
        .bind(&req.description)
        .bind(&req.leader_id)
        .execute(pool)
        .await?;

    get_group(pool, &id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created group".to_string()))
}

/// 부분 업데이트. 반환값이 None이면 해당 단체가 없습니다.
pub async fn update_group(
    pool: &SqlitePool,
    id: &str,
    req: &UpdateGroupRequest,
) -> Result<Option<Group>, AppError> {
    let Some(current) = get_group(pool, id).await? else {
        return Ok(None);
    };

    let leader_id = match &req.leader_id {
        Some(leader_id) => leader_id.as_deref(),
        None => current.leader_id.as_deref(),
    };

    sqlx::query(
        r#"
        UPDATE groups
        SET name = ?, description = ?, leader_id = ?,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(req.name.as_deref().map(str::trim).unwrap_or(&current.name))
    .bind(req.description.as_ref().or(current.description.as_ref()))
    .bind(leader_id)
    .bind(id)
    .execute(pool)
    .await?;

    get_group(pool, id).await
}

/// 단체를 삭제합니다. 회원 관계는 CASCADE로 함께 삭제됩니다.
pub async fn delete_group(pool: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM groups WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// 회원을 추가합니다. 이미 회원이면 무시합니다 (`INSERT OR IGNORE`).
pub async fn add_group_member(
    pool: &SqlitePool,
    group_id: &str,
    parishioner_id: &str,
) -> Result<(), AppError> {
    sqlx::query("INSERT OR IGNORE INTO group_members (group_id, parishioner_id) VALUES (?, ?)")
        .bind(group_id)
        .bind(parishioner_id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn remove_group_member(
    pool: &SqlitePool,
    group_id: &str,
    parishioner_id: &str,
) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM group_members WHERE group_id = ? AND parishioner_id = ?")
        .bind(group_id)
        .bind(parishioner_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
