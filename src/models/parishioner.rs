//! # 신자(Parishioner) 모델
//!
//! 신자 명부 한 명의 기록과 성사(sacrament) 이력을 표현합니다.
//!
//! - `Parishioner`: `parishioners` 테이블 한 행. 주소는 `address` 객체로 묶어 응답합니다.
//! - `Sacrament`: 세례, 견진, 혼인 등 성사 기록 (`sacraments` 테이블)
//! - `ParishionerDetail`: 단건 조회 응답 (성사 이력, 소속 단체 포함)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 주소. DB에서는 `parishioners` 테이블의 컬럼들이고, JSON에서는 중첩 객체입니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Parishioner {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[sqlx(flatten)]
    pub address: Address,
    pub is_deceased: bool,
    pub death_date: Option<NaiveDate>,
    pub funeral_date: Option<NaiveDate>,
    pub burial_place: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Parishioner {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// 단체 대표/명단 표시에 쓰는 요약 정보
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ParishionerSummary {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

/// 성사 종류. DB에는 snake_case 문자열로 저장됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum SacramentKind {
    Baptism,
    FirstCommunion,
    Confirmation,
    Marriage,
    Anointing,
    HolyOrders,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Sacrament {
    pub id: String,
    pub parishioner_id: String,
    pub kind: SacramentKind,
    pub date: Option<NaiveDate>,
    pub place: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
}

/// 신자가 속한 단체 (단건 조회 응답용)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub group_id: String,
    pub group_name: String,
    pub is_leader: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParishionerDetail {
    #[serde(flatten)]
    pub parishioner: Parishioner,
    pub sacraments: Vec<Sacrament>,
    pub groups: Vec<Membership>,
}

// ── 요청 본문 ──

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateParishionerRequest {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub is_deceased: bool,
    pub death_date: Option<NaiveDate>,
    pub funeral_date: Option<NaiveDate>,
    pub burial_place: Option<String>,
    pub notes: Option<String>,
}

/// 부분 업데이트. None인 필드는 변경하지 않습니다.
///
/// 주소는 객체 단위로 교체됩니다.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParishionerRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<Address>,
    pub is_deceased: Option<bool>,
    pub death_date: Option<NaiveDate>,
    pub funeral_date: Option<NaiveDate>,
    pub burial_place: Option<String>,
    pub notes: Option<String>,
}

/// `GET /api/parishioners?q=...`
#[derive(Debug, Default, Deserialize)]
pub struct ParishionerQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSacramentRequest {
    pub kind: SacramentKind,
    pub date: Option<NaiveDate>,
    pub place: Option<String>,
    pub notes: Option<String>,
}
