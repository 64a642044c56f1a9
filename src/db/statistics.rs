//! # 통계 집계 쿼리
//!
//! 날짜 컬럼은 'YYYY-MM-DD' 텍스트이므로 연도는 `substr(date, 1, 4)`로 뽑습니다.
//! 날짜가 비어 있는 기록은 연도별 집계에서 빠집니다.

use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::*;

async fn count(pool: &SqlitePool, sql: &str) -> Result<i64, AppError> {
    let (n,): (i64,) = sqlx::query_as(sql).fetch_one(pool).await?;
    Ok(n)
}

pub async fn totals(pool: &SqlitePool) -> Result<Totals, AppError> {
    let parishioners = count(pool, "SELECT COUNT(*) FROM parishioners").await?;
    let deceased = count(pool, "SELECT COUNT(*) FROM parishioners WHERE is_deceased = 1").await?;

    Ok(Totals {
        parishioners,
        living: parishioners - deceased,
        deceased,
        groups: count(pool, "SELECT COUNT(*) FROM groups").await?,
        intentions: count(pool, "SELECT COUNT(*) FROM intentions").await?,
        news: count(pool, "SELECT COUNT(*) FROM news").await?,
    })
}

pub async fn sacraments_by_year(pool: &SqlitePool) -> Result<Vec<SacramentYearCount>, AppError> {
    let rows = sqlx::query_as::<_, SacramentYearCount>(
        r#"
        SELECT substr(date, 1, 4) AS year, kind, COUNT(*) AS count
        FROM sacraments
        WHERE date IS NOT NULL
        GROUP BY year, kind
        ORDER BY year, kind
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn deaths_by_year(pool: &SqlitePool) -> Result<Vec<YearCount>, AppError> {
    let rows = sqlx::query_as::<_, YearCount>(
        r#"
        SELECT substr(death_date, 1, 4) AS year, COUNT(*) AS count
        FROM parishioners
        WHERE is_deceased = 1 AND death_date IS NOT NULL
        GROUP BY year
        ORDER BY year
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_statistics(pool: &SqlitePool) -> Result<Statistics, AppError> {
    Ok(Statistics {
        totals: totals(pool).await?,
        sacraments_by_year: sacraments_by_year(pool).await?,
        deaths_by_year: deaths_by_year(pool).await?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_parishioner, create_sacrament, test_pool};
    use chrono::NaiveDate;

    #[tokio::test]
    async fn empty_database_has_zero_totals() {
        let pool = test_pool().await;
        let stats = get_statistics(&pool).await.unwrap();
        assert_eq!(stats.totals.parishioners, 0);
        assert!(stats.sacraments_by_year.is_empty());
        assert!(stats.deaths_by_year.is_empty());
    }

    #[tokio::test]
    async fn counts_group_by_year() {
        let pool = test_pool().await;
        let alive = CreateParishionerRequest {
            first_name: "Jan".into(),
            last_name: "Kowalski".into(),
            ..Default::default()
        };
        let dead = CreateParishionerRequest {
            first_name: "Józef".into(),
            last_name: "Nowak".into(),
            is_deceased: true,
            death_date: NaiveDate::from_ymd_opt(2024, 11, 2),
            ..Default::default()
        };
        let jan = create_parishioner(&pool, &alive).await.unwrap();
        create_parishioner(&pool, &dead).await.unwrap();

        for (kind, date) in [
            (SacramentKind::Baptism, NaiveDate::from_ymd_opt(2024, 1, 7)),
            (SacramentKind::Baptism, NaiveDate::from_ymd_opt(2024, 5, 12)),
            (SacramentKind::Marriage, NaiveDate::from_ymd_opt(2025, 6, 14)),
            (SacramentKind::Confirmation, None),
        ] {
            let req = CreateSacramentRequest {
                kind,
                date,
                place: None,
                notes: None,
            };
            create_sacrament(&pool, &jan.id, &req).await.unwrap();
        }

        let stats = get_statistics(&pool).await.unwrap();
        assert_eq!(stats.totals.parishioners, 2);
        assert_eq!(stats.totals.living, 1);
        assert_eq!(stats.totals.deceased, 1);

        assert_eq!(stats.sacraments_by_year.len(), 2);
        assert_eq!(stats.sacraments_by_year[0].year, "2024");
        assert_eq!(stats.sacraments_by_year[0].kind, SacramentKind::Baptism);
        assert_eq!(stats.sacraments_by_year[0].count, 2);

        assert_eq!(stats.deaths_by_year.len(), 1);
        assert_eq!(stats.deaths_by_year[0].year, "2024");
    }
}
