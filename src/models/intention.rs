//! # 미사 지향(Intention) 모델
//!
//! 저장 형태와 화면 형태가 서로 다릅니다.
//!
//! ## 저장 형태 (flat)
//! - `Intention`: 기준 날짜(`date`) 하나에 묶인 지향 레코드
//! - `Mass`: 지향에 속한 미사. 시간(`time`)과 지향 문자열(`intention`) 하나
//!
//! ## 화면 형태 (weekly)
//! - `WeeklyIntention`: `weekStart`/`weekEnd`와 `days` 배열
//! - `Day` → `DayMass` → `IntentionText` 순으로 중첩
//!
//! 두 형태 간 변환 규칙은 `services::schedule`에 있습니다.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::services::schedule;

/// 지향 엔티티 — `intentions` 테이블 한 행
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Intention {
    pub id: String,
    /// 주간 라벨. 예전 데이터는 "<이름> - <요일>" 형식일 수 있음
    pub title: String,
    /// 기준 날짜. 주간 범위는 여기서 매번 다시 계산됩니다
    pub date: NaiveDate,
    pub image_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// 미사 엔티티 — `masses` 테이블 한 행
///
/// 지향이 여러 개여도 `intention` 컬럼 하나에 `"; "`로 이어 저장합니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Mass {
    pub id: String,
    pub intention_id: String,
    pub position: i64,
    pub time: String,
    pub intention: String,
}

/// 목록 조회용 flat 형태
#[derive(Debug, Clone, Serialize)]
pub struct IntentionWithMasses {
    #[serde(flatten)]
    pub intention: Intention,
    pub masses: Vec<Mass>,
}

/// 미사 한 건의 입력 (예전 flat 형태)
///
/// 생성(POST)의 `masses` 필드와 수정(PUT)의 legacy `masses` 필드에서 사용됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MassInput {
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub intention: String,
}

/// 개별 지향 문구
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentionText {
    #[serde(default)]
    pub intention: String,
}

/// 화면 형태의 미사 (응답용)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayMass {
    pub time: String,
    pub intentions: Vec<IntentionText>,
}

/// 화면 형태의 하루 (응답용)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Day {
    pub date: NaiveDate,
    pub masses: Vec<DayMass>,
}

/// 월요일~일요일 범위. 저장하지 않고 항상 `Intention.date`에서 계산합니다.
///
/// `week_start`는 00:00:00, `week_end`는 23:59:59를 의미하는 날짜입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekWindow {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
}

/// 단건 조회/수정 응답
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyIntention {
    #[serde(flatten)]
    pub intention: Intention,
    #[serde(flatten)]
    pub window: WeekWindow,
    pub days: Vec<Day>,
}

/// 빈 7일 주간표 (프론트엔드 입력 폼 초기값)
#[derive(Debug, Clone, Serialize)]
pub struct WeekTemplate {
    #[serde(flatten)]
    pub window: WeekWindow,
    pub days: Vec<Day>,
}

// ── 요청 본문 ──

/// 지향 생성 입력. multipart 폼에서 조립됩니다.
#[derive(Debug, Clone)]
pub struct NewIntention {
    pub title: String,
    pub date: NaiveDate,
    pub image_url: Option<String>,
    pub masses: Vec<MassInput>,
}

/// 화면 형태의 하루 (요청용)
#[derive(Debug, Clone, Deserialize)]
pub struct DayInput {
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub masses: Vec<DayMassInput>,
}

/// 화면 형태의 미사 (요청용)
///
/// `intentions` 배열이 기본이고, 예전 클라이언트는 `intention` 문자열 하나를 보냅니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DayMassInput {
    #[serde(default)]
    pub time: String,
    pub intentions: Option<Vec<IntentionText>>,
    pub intention: Option<String>,
}

/// `PUT /api/intentions/{id}` 요청 본문
///
/// `days`와 `masses`는 `split()`에서 `MassSchedule` 하나로 정리됩니다.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIntentionRequest {
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub days: Option<Vec<DayInput>>,
    pub masses: Option<Vec<MassInput>>,
}

/// 수정 요청의 스칼라 필드
#[derive(Debug, Default)]
pub struct IntentionPatch {
    pub title: Option<String>,
    pub image_url: Option<String>,
}

/// 수정 요청에 담긴 미사 목록의 형태
#[derive(Debug, Clone)]
pub enum MassSchedule {
    /// 주간표 형태 (`days`)
    Weekly(Vec<DayInput>),
    /// 예전 flat 형태 (`masses`), 비어 있지 않음
    Legacy(Vec<MassInput>),
    /// 둘 다 없음 — 기존 미사는 지워지고 새로 만들어지지 않습니다
    Empty,
}

impl MassSchedule {
    /// 주간표 첫째 날의 날짜. 있으면 지향의 기준 날짜를 대체합니다.
    pub fn anchor_date(&self) -> Option<NaiveDate> {
        match self {
            MassSchedule::Weekly(days) => days.first().and_then(|day| day.date),
            MassSchedule::Legacy(_) | MassSchedule::Empty => None,
        }
    }
}

impl UpdateIntentionRequest {
    pub fn split(self) -> (IntentionPatch, MassSchedule) {
        let patch = IntentionPatch {
            title: self.title,
            image_url: self.image_url,
        };

        let schedule = match (self.days, self.masses) {
            (Some(days), _) => MassSchedule::Weekly(days),
            (None, Some(masses)) if !masses.is_empty() => MassSchedule::Legacy(masses),
            _ => MassSchedule::Empty,
        };

        (patch, schedule)
    }
}

/// 주간표 조회 쿼리 (`?weekStart=2025-06-02`)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekTemplateQuery {
    #[serde(deserialize_with = "required_date")]
    pub week_start: NaiveDate,
}

/// 주간 범위 검증 쿼리. 둘 다 선택값이며 누락은 검증 에러로 보고됩니다.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekRangeQuery {
    #[serde(default, deserialize_with = "lenient_date")]
    pub week_start: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub week_end: Option<NaiveDate>,
}

/// 빈 문자열은 None, 그 외에는 `YYYY-MM-DD` 또는 ISO 날짜-시간을 받습니다.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => schedule::parse_date(text)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {text}"))),
    }
}

fn required_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_date(deserializer)?.ok_or_else(|| serde::de::Error::custom("date is required"))
}
