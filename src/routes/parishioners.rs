//! # 신자(Parishioner) 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET    /api/parishioners?q=`               → 신자 목록 (성/이름순, 이름 부분 검색)
//! - `POST   /api/parishioners`                  → 신자 등록
//! - `GET    /api/parishioners/{id}`             → 신자 상세 (성사 이력, 소속 단체 포함)
//! - `PUT    /api/parishioners/{id}`             → 부분 수정
//! - `DELETE /api/parishioners/{id}`             → 삭제 (단체 대표이면 409)
//! - `GET    /api/parishioners/{id}/sacraments`  → 성사 이력
//! - `POST   /api/parishioners/{id}/sacraments`  → 성사 기록 추가
//! - `DELETE /api/sacraments/{id}`               → 성사 기록 삭제

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{json, Value};

use super::{
    extract::{Json, Query},
    AppState,
};
use crate::{db, error::AppError, models::*};

fn require_name(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{field} is required")));
    }
    Ok(())
}

/// `GET /parishioners` — `{ "parishioners": [...] }`
pub async fn list_parishioners(
    State(state): State<AppState>,
    Query(query): Query<ParishionerQuery>,
) -> Result<Json<Value>, AppError> {
    let parishioners = db::list_parishioners(&state.pool, query.q.as_deref()).await?;
    Ok(Json(json!({ "parishioners": parishioners })))
}

pub async fn get_parishioner(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ParishionerDetail>, AppError> {
    let parishioner = db::get_parishioner(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    let sacraments = db::list_sacraments(&state.pool, &id).await?;
    let groups = db::list_memberships(&state.pool, &id).await?;

    Ok(Json(ParishionerDetail {
        parishioner,
        sacraments,
        groups,
    }))
}

/// `POST /parishioners` — 이름과 성은 필수입니다.
pub async fn create_parishioner(
    State(state): State<AppState>,
    Json(req): Json<CreateParishionerRequest>,
) -> Result<(StatusCode, Json<Parishioner>), AppError> {
    require_name(&req.first_name, "First name")?;
    require_name(&req.last_name, "Last name")?;

    let parishioner = db::create_parishioner(&state.pool, &req).await?;
    tracing::info!(parishioner_id = %parishioner.id, "Created parishioner");
    Ok((StatusCode::CREATED, Json(parishioner)))
}

/// `PUT /parishioners/{id}` — 보낸 필드만 바꿉니다. 이름을 빈 값으로 바꿀 수는 없습니다.
pub async fn update_parishioner(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateParishionerRequest>,
) -> Result<Json<Parishioner>, AppError> {
    if let Some(first_name) = &req.first_name {
        require_name(first_name, "First name")?;
    }
    if let Some(last_name) = &req.last_name {
        require_name(last_name, "Last name")?;
    }

    let parishioner = db::update_parishioner(&state.pool, &id, &req)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(parishioner))
}

/// `DELETE /parishioners/{id}`
///
/// 단체 대표를 맡고 있으면 409를 돌려줍니다. 먼저 단체의 대표를 바꿔야 합니다.
pub async fn delete_parishioner(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let led = db::leader_group_count(&state.pool, &id).await?;
    if led > 0 {
        return Err(AppError::Conflict(format!(
            "Parishioner leads {led} group(s); assign another leader first"
        )));
    }

    if !db::delete_parishioner(&state.pool, &id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(parishioner_id = %id, "Deleted parishioner");
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /parishioners/{id}/sacraments` — `{ "sacraments": [...] }`
pub async fn list_sacraments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    db::get_parishioner(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    let sacraments = db::list_sacraments(&state.pool, &id).await?;
    Ok(Json(json!({ "sacraments": sacraments })))
}

pub async fn create_sacrament(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<CreateSacramentRequest>,
) -> Result<(StatusCode, Json<Sacrament>), AppError> {
    db::get_parishioner(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    let sacrament = db::create_sacrament(&state.pool, &id, &req).await?;
    Ok((StatusCode::CREATED, Json(sacrament)))
}

pub async fn delete_sacrament(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !db::delete_sacrament(&state.pool, &id).await? {
        return Err(AppError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_state;

    fn request(first: &str, last: &str) -> CreateParishionerRequest {
        CreateParishionerRequest {
            first_name: first.into(),
            last_name: last.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_requires_both_names() {
        let state = test_state().await;
        let err = create_parishioner(State(state.clone()), Json(request("Jan", " ")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref msg) if msg.starts_with("Last name")));

        let (status, _) = create_parishioner(State(state), Json(request("Jan", "Kowalski")))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn detail_includes_sacraments_and_groups() {
        let state = test_state().await;
        let (_, Json(jan)) = create_parishioner(State(state.clone()), Json(request("Jan", "Kowalski")))
            .await
            .unwrap();

        let sacrament = CreateSacramentRequest {
            kind: SacramentKind::Baptism,
            date: chrono::NaiveDate::from_ymd_opt(1990, 4, 22),
            place: None,
            notes: None,
        };
        create_sacrament(State(state.clone()), Path(jan.id.clone()), Json(sacrament))
            .await
            .unwrap();

        let group = CreateGroupRequest {
            name: "Chór".into(),
            description: None,
            leader_id: None,
        };
        let choir = db::create_group(&state.pool, &group).await.unwrap();
        db::add_group_member(&state.pool, &choir.id, &jan.id).await.unwrap();

        let Json(detail) = get_parishioner(State(state), Path(jan.id)).await.unwrap();
        assert_eq!(detail.sacraments.len(), 1);
        assert_eq!(detail.groups[0].group_name, "Chór");
    }

    #[tokio::test]
    async fn leader_cannot_be_deleted() {
        let state = test_state().await;
        let (_, Json(anna)) = create_parishioner(State(state.clone()), Json(request("Anna", "Nowak")))
            .await
            .unwrap();
        let group = CreateGroupRequest {
            name: "Róża Różańcowa".into(),
            description: None,
            leader_id: Some(anna.id.clone()),
        };
        db::create_group(&state.pool, &group).await.unwrap();

        let err = delete_parishioner(State(state.clone()), Path(anna.id.clone()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let err = delete_parishioner(State(state), Path("missing".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn sacraments_of_unknown_parishioner_are_not_found() {
        let state = test_state().await;
        let err = list_sacraments(State(state), Path("missing".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }
}
