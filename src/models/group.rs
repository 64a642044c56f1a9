//! # 단체(Group) 모델
//!
//! 본당 단체(성가대, 전례부 등)와 그 명단입니다.
//! 단체에는 대표(leader) 한 명과 여러 회원이 있습니다.

use serde::{Deserialize, Serialize};

use super::ParishionerSummary;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub leader_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// 목록 조회용. 회원 수를 함께 돌려줍니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GroupListItem {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub group: Group,
    pub member_count: i64,
}

/// 단건 조회 응답: 대표와 회원 명단 포함
#[derive(Debug, Clone, Serialize)]
pub struct GroupDetail {
    #[serde(flatten)]
    pub group: Group,
    pub leader: Option<ParishionerSummary>,
    pub members: Vec<ParishionerSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    pub name: String,
    pub description: Option<String>,
    pub leader_id: Option<String>,
}

/// 부분 업데이트
///
/// `leader_id`: None = 변경 안 함, Some(None) = 대표 해제, Some(Some(id)) = 대표 지정
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroupRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub leader_id: Option<Option<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberRequest {
    pub parishioner_id: String,
}
