//! # 통계 모델
//!
//! `GET /api/statistics` 응답 구조체입니다. 모두 집계 쿼리 결과이며 저장되지 않습니다.

use serde::Serialize;

use super::SacramentKind;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub parishioners: i64,
    pub living: i64,
    pub deceased: i64,
    pub groups: i64,
    pub intentions: i64,
    pub news: i64,
}

/// 연도별, 성사 종류별 건수
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SacramentYearCount {
    pub year: String,
    pub kind: SacramentKind,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct YearCount {
    pub year: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub totals: Totals,
    pub sacraments_by_year: Vec<SacramentYearCount>,
    pub deaths_by_year: Vec<YearCount>,
}
