//! # 신자 데이터베이스 쿼리 모듈
//!
//! ## 테이블 구조
//! - `parishioners`: 신자 기본 정보, 주소, 사망/장례 정보
//! - `sacraments`: 성사 이력 (신자 삭제 시 CASCADE)
//!
//! 단체 대표로 지정된 신자는 삭제할 수 없습니다 (`leader_group_count` 참고).

use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::*;

const PARISHIONER_COLUMNS: &str = r#"
    id, first_name, last_name, birth_date, phone, email,
    street, house_number, postal_code, city,
    is_deceased, death_date, funeral_date, burial_place, notes,
    created_at, updated_at
"#;

/// 성/이름순 목록. `search`가 있으면 이름에 포함된 신자만 돌려줍니다.
pub async fn list_parishioners(
    pool: &SqlitePool,
    search: Option<&str>,
) -> Result<Vec<Parishioner>, AppError> {
    let parishioners = match search.map(str::trim).filter(|s| !s.is_empty()) {
        Some(term) => {
            let pattern = format!("%{term}%");
            sqlx::query_as::<_, Parishioner>(&format!(
                "SELECT {PARISHIONER_COLUMNS} FROM parishioners
                 WHERE first_name LIKE ? OR last_name LIKE ?
                 ORDER BY last_name, first_name"
            ))
            .bind(&pattern)
            .bind(&pattern)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Parishioner>(&format!(
                "SELECT {PARISHIONER_COLUMNS} FROM parishioners ORDER BY last_name, first_name"
            ))
            .fetch_all(pool)
            .await?
        }
    };

    Ok(parishioners)
}

pub async fn get_parishioner(pool: &SqlitePool, id: &str) -> Result<Option<Parishioner>, AppError> {
    let parishioner = sqlx::query_as::<_, Parishioner>(&format!(
        "SELECT {PARISHIONER_COLUMNS} FROM parishioners WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(parishioner)
}

pub async fn create_parishioner(
    pool: &SqlitePool,
    req: &CreateParishionerRequest,
) -> Result<Parishioner, AppError> {
    let id = uuid::Uuid::now_v7().to_string();

    sqlx::query(
        r#"
        INSERT INTO parishioners (
            id, first_name, last_name, birth_date, phone, email,
            street, house_number, postal_code, city,
            is_deceased, death_date, funeral_date, burial_place, notes
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(req.first_name.trim())
    .bind(req.last_name.trim())
    .bind(req.birth_date)
    .bind(&req.phone)
    .bind(&req.email)
    .bind(&req.address.street)
    .bind(&req.address.house_number)
    .bind(&req.address.postal_code)
    .bind(&req.address.city)
    .bind(req.is_deceased)
    .bind(req.death_date)
    .bind(req.funeral_date)
    .bind(&req.burial_place)
    .bind(&req.notes)
    .execute(pool)
    .await?;

    get_parishioner(pool, &id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created parishioner".to_string()))
}

/// 부분 업데이트. 요청에 있는 필드만 바꿉니다.
///
/// 기존 값을 읽어 병합한 뒤 한 번의 UPDATE로 씁니다.
pub async fn update_parishioner(
    pool: &SqlitePool,
    id: &str,
    req: &UpdateParishionerRequest,
) -> Result<Option<Parishioner>, AppError> {
    let Some(current) = get_parishioner(pool, id).await? else {
        return Ok(None);
    };

    let address = req.address.clone().unwrap_or(current.address);

    sqlx::query(
        r#"
        UPDATE parishioners
        SET first_name = ?, last_name = ?, birth_date = ?, phone = ?, email = ?,
            street = ?, house_number = ?, postal_code = ?, city = ?,
            is_deceased = ?, death_date = ?, funeral_date = ?, burial_place = ?, notes = ?,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(req.first_name.as_deref().map(str::trim).unwrap_or(&current.first_name))
    .bind(req.last_name.as_deref().map(str::trim).unwrap_or(&current.last_name))
    .bind(req.birth_date.or(current.birth_date))
    .bind(req.phone.as_ref().or(current.phone.as_ref()))
    .bind(req.email.as_ref().or(current.email.as_ref()))
    .bind(&address.street)
    .bind(&address.house_number)
    .bind(&address.postal_code)
    .bind(&address.city)
    .bind(req.is_deceased.unwrap_or(current.is_deceased))
    .bind(req.death_date.or(current.death_date))
    .bind(req.funeral_date.or(current.funeral_date))
    .bind(req.burial_place.as_ref().or(current.burial_place.as_ref()))
    .bind(req.notes.as_ref().or(current.notes.as_ref()))
    .bind(id)
    .execute(pool)
    .await?;

    get_parishioner(pool, id).await
}

/// 신자가 대표를 맡고 있는 단체 수
pub async fn leader_group_count(pool: &SqlitePool, parishioner_id: &str) -> Result<i64, AppError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM groups WHERE leader_id = ?")
        .bind(parishioner_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// 신자를 삭제합니다. 성사 이력과 단체 회원 정보는 CASCADE로 함께 삭제됩니다.
pub async fn delete_parishioner(pool: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM parishioners WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

// ── 성사(Sacrament) ──

pub async fn list_sacraments(
    pool: &SqlitePool,
    parishioner_id: &str,
) -> Result<Vec<Sacrament>, AppError> {
    let sacraments = sqlx::query_as::<_, Sacrament>(
        r#"
        SELECT id, parishioner_id, kind, date, place, notes, created_at
        FROM sacraments
        WHERE parishioner_id = ?
        ORDER BY date IS NULL, date, created_at
        "#,
    )
    .bind(parishioner_id)
    .fetch_all(pool)
    .await?;

    Ok(sacraments)
}

/// 특정 종류의 가장 최근 성사 기록 (증명서 발급용)
pub async fn latest_sacrament(
    pool: &SqlitePool,
    parishioner_id: &str,
    kind: SacramentKind,
) -> Result<Option<Sacrament>, AppError> {
    let sacrament = sqlx::query_as::<_, Sacrament>(
        r#"
        SELECT id, parishioner_id, kind, date, place, notes, created_at
        FROM sacraments
        WHERE parishioner_id = ? AND kind = ?
        ORDER BY date DESC, created_at DESC
        LIMIT 1
        "#,
    )
    .bind(parishioner_id)
    .bind(kind)
    .fetch_optional(pool)
    .await?;

    Ok(sacrament)
}

pub async fn create_sacrament(
    pool: &SqlitePool,
    parishioner_id: &str,
    req: &CreateSacramentRequest,
) -> Result<Sacrament, AppError> {
    let id = uuid::Uuid::now_v7().to_string();

    sqlx::query(
        r#"
        INSERT INTO sacraments (id, parishioner_id, kind, date, place, notes)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(parishioner_id)
    .bind(req.kind)
    .bind(req.date)
    .bind(&req.place)
    .bind(&req.notes)
    .execute(pool)
    .await?;

    let sacrament = sqlx::query_as::<_, Sacrament>(
        "SELECT id, parishioner_id, kind, date, place, notes, created_at FROM sacraments WHERE id = ?",
    )
    .bind(&id)
    .fetch_optional(pool)
    .await?;

    sacrament.ok_or(AppError::Internal("Failed to retrieve created sacrament".to_string()))
}

pub async fn delete_sacrament(pool: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM sacraments WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// 신자가 속한 단체 목록. 대표인 단체도 포함합니다.
pub async fn list_memberships(
    pool: &SqlitePool,
    parishioner_id: &str,
) -> Result<Vec<Membership>, AppError> {
    let memberships = sqlx::query_as::<_, Membership>(
        r#"
        SELECT g.id AS group_id, g.name AS group_name,
               (g.leader_id IS NOT NULL AND g.leader_id = ?1) AS is_leader
        FROM groups g
        WHERE g.leader_id = ?1
           OR EXISTS (
               SELECT 1 FROM group_members gm
               WHERE gm.group_id = g.id AND gm.parishioner_id = ?1
           )
        ORDER BY g.name
        "#,
    )
    .bind(parishioner_id)
    .fetch_all(pool)
    .await?;

    Ok(memberships)
}
