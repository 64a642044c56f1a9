//! # 통계 핸들러
//!
//! - `GET /api/statistics` → 전체 집계, 연도별 성사 수, 연도별 사망자 수

use axum::{extract::State, Json};

use super::AppState;
use crate::{db, error::AppError, models::Statistics};

pub async fn get_statistics(State(state): State<AppState>) -> Result<Json<Statistics>, AppError> {
    let statistics = db::get_statistics(&state.pool).await?;
    Ok(Json(statistics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_state;

    #[tokio::test]
    async fn serializes_in_camel_case() {
        let state = test_state().await;
        let Json(statistics) = get_statistics(State(state)).await.unwrap();
        let body = serde_json::to_value(&statistics).unwrap();
        assert_eq!(body["totals"]["parishioners"], 0);
        assert!(body["sacramentsByYear"].as_array().unwrap().is_empty());
        assert!(body["deathsByYear"].is_array());
    }
}
