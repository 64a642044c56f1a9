//! # 단체(Group) 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET    /api/groups`                                → 단체 목록 (회원 수 포함)
//! - `POST   /api/groups`                                → 단체 생성
//! - `GET    /api/groups/{id}`                           → 단체 상세 (대표, 회원 명단)
//! - `PUT    /api/groups/{id}`                           → 단체 수정 (`leaderId: null`이면 대표 해제)
//! - `DELETE /api/groups/{id}`                           → 단체 삭제
//! - `POST   /api/groups/{id}/members`                   → 회원 추가
//! - `DELETE /api/groups/{id}/members/{parishioner_id}`  → 회원 제외

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;

use super::{extract::Json, AppState};
use crate::{db, error::AppError, models::*};

/// 대표로 지정하려는 신자가 실제로 있는지 확인합니다 (없으면 400).
async fn ensure_leader_exists(pool: &SqlitePool, leader_id: &str) -> Result<(), AppError> {
    db::get_parishioner_summary(pool, leader_id)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("Unknown leader: {leader_id}")))?;
    Ok(())
}

async fn load_detail(pool: &SqlitePool, id: &str) -> Result<GroupDetail, AppError> {
    let group = db::get_group(pool, id).await?.ok_or(AppError::NotFound)?;
    let leader = match group.leader_id.as_deref() {
        Some(leader_id) => db::get_parishioner_summary(pool, leader_id).await?,
        None => None,
    };
    let members = db::list_group_members(pool, id).await?;

    Ok(GroupDetail {
        group,
        leader,
        members,
    })
}

/// `GET /groups` — `{ "groups": [...] }`
pub async fn list_groups(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let groups = db::list_groups(&state.pool).await?;
    Ok(Json(json!({ "groups": groups })))
}

pub async fn get_group(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GroupDetail>, AppError> {
    Ok(Json(load_detail(&state.pool, &id).await?))
}

pub async fn create_group(
    State(state): State<AppState>,
    Json(req): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<Group>), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    if let Some(leader_id) = &req.leader_id {
        ensure_leader_exists(&state.pool, leader_id).await?;
    }

    let group = db::create_group(&state.pool, &req).await?;
    tracing::info!(group_id = %group.id, "Created group");
    Ok((StatusCode::CREATED, Json(group)))
}

pub async fn update_group(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateGroupRequest>,
) -> Result<Json<Group>, AppError> {
    if let Some(Some(leader_id)) = &req.leader_id {
        ensure_leader_exists(&state.pool, leader_id).await?;
    }

    let group = db::update_group(&state.pool, &id, &req)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(group))
}

pub async fn delete_group(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !db::delete_group(&state.pool, &id).await? {
        return Err(AppError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /groups/{id}/members` — 갱신된 단체 상세를 돌려줍니다.
pub async fn add_group_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<AddMemberRequest>,
) -> Result<Json<GroupDetail>, AppError> {
    db::get_group(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    db::get_parishioner_summary(&state.pool, &req.parishioner_id)
        .await?
        .ok_or(AppError::NotFound)?;

    db::add_group_member(&state.pool, &id, &req.parishioner_id).await?;
    Ok(Json(load_detail(&state.pool, &id).await?))
}

pub async fn remove_group_member(
    State(state): State<AppState>,
    Path((id, parishioner_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    if !db::remove_group_member(&state.pool, &id, &parishioner_id).await? {
        return Err(AppError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_state;

    async fn parishioner(pool: &SqlitePool, first: &str, last: &str) -> String {
        let req = CreateParishionerRequest {
            first_name: first.into(),
            last_name: last.into(),
            ..Default::default()
        };
        db::create_parishioner(pool, &req).await.unwrap().id
    }

    fn request(name: &str, leader_id: Option<String>) -> CreateGroupRequest {
        CreateGroupRequest {
            name: name.into(),
            description: None,
            leader_id,
        }
    }

    #[tokio::test]
    async fn unknown_leader_is_rejected() {
        let state = test_state().await;
        let err = create_group(State(state.clone()), Json(request("Chór", Some("ghost".into()))))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let (_, Json(group)) = create_group(State(state.clone()), Json(request("Chór", None)))
            .await
            .unwrap();
        let update = UpdateGroupRequest {
            leader_id: Some(Some("ghost".into())),
            ..Default::default()
        };
        let err = update_group(State(state), Path(group.id), Json(update))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn roster_management() {
        let state = test_state().await;
        let anna = parishioner(&state.pool, "Anna", "Nowak").await;
        let jan = parishioner(&state.pool, "Jan", "Kowalski").await;

        let (_, Json(group)) =
            create_group(State(state.clone()), Json(request("Lektorzy", Some(anna.clone()))))
                .await
                .unwrap();

        let Json(detail) = add_group_member(
            State(state.clone()),
            Path(group.id.clone()),
            Json(AddMemberRequest {
                parishioner_id: jan.clone(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(detail.leader.unwrap().id, anna);
        assert_eq!(detail.members.len(), 1);

        let err = add_group_member(
            State(state.clone()),
            Path(group.id.clone()),
            Json(AddMemberRequest {
                parishioner_id: "ghost".into(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound));

        let status = remove_group_member(State(state.clone()), Path((group.id.clone(), jan)))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        let status = delete_group(State(state.clone()), Path(group.id.clone()))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
        let err = get_group(State(state), Path(group.id)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }
}
