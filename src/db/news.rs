//! # 소식 데이터베이스 쿼리 모듈

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::*;

const NEWS_COLUMNS: &str =
    "id, title, subtitle, content, image_url, date, created_at, updated_at";

/// 최신 소식부터 (날짜 내림차순)
pub async fn list_news(pool: &SqlitePool) -> Result<Vec<News>, AppError> {
    let news = sqlx::query_as::<_, News>(&format!(
        "SELECT {NEWS_COLUMNS} FROM news ORDER BY date DESC, created_at DESC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(news)
}

pub async fn get_news(pool: &SqlitePool, id: &str) -> Result<Option<News>, AppError> {
    let news = sqlx::query_as::<_, News>(&format!("SELECT {NEWS_COLUMNS} FROM news WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(news)
}

/// `date`는 호출하는 쪽에서 기본값(오늘)을 채워 넘깁니다.
pub async fn create_news(
    pool: &SqlitePool,
    req: &CreateNewsRequest,
    date: NaiveDate,
) -> Result<News, AppError> {
    let id = uuid::Uuid::now_v7().to_string();

    sqlx::query(
        r#"
        INSERT INTO news (id, title, subtitle, content, image_url, date)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(req.title.trim())
    .bind(&req.subtitle)
    .bind(&req.content)
    .bind(&req.image_url)
    .bind(date)
    .execute(pool)
    .await?;

    get_news(pool, &id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created news".to_string()))
}

pub async fn update_news(
    pool: &SqlitePool,
    id: &str,
    req: &UpdateNewsRequest,
) -> Result<Option<News>, AppError> {
    let Some(current) = get_news(pool, id).await? else {
        return Ok(None);
    };

    let title = req
        .title
        .as_deref()
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .unwrap_or(&current.title);

    sqlx::query(
        r#"
        UPDATE news
        SET title = ?, subtitle = ?, content = ?, image_url = ?, date = ?,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(title)
    .bind(req.subtitle.as_ref().or(current.subtitle.as_ref()))
    .bind(req.content.as_ref().unwrap_or(&current.content))
    .bind(req.image_url.as_ref().or(current.image_url.as_ref()))
    .bind(req.date.unwrap_or(current.date))
    .bind(id)
    .execute(pool)
    .await?;

    get_news(pool, id).await
}

pub async fn delete_news(pool: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM news WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
