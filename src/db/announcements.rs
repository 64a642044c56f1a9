//! # 공지 데이터베이스 쿼리 모듈
//!
//! 공지(`announcements`)와 순서가 있는 항목(`announcement_items`)을 다룹니다.
//! 항목 목록을 바꿀 때는 미사 지향과 마찬가지로 "전부 삭제 → 다시 생성"을
//! 하나의 트랜잭션으로 처리합니다.

use std::collections::HashMap;

use chrono::NaiveDate;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::error::AppError;
use crate::models::*;

pub async fn list_announcements(
    pool: &SqlitePool,
) -> Result<Vec<AnnouncementWithItems>, AppError> {
    let announcements = sqlx::query_as::<_, Announcement>(
        r#"
        SELECT id, title, date, created_at, updated_at
        FROM announcements
        ORDER BY date DESC, created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    let items = sqlx::query_as::<_, AnnouncementItem>(
        "SELECT id, announcement_id, position, content FROM announcement_items ORDER BY position",
    )
    .fetch_all(pool)
    .await?;

    let mut by_announcement: HashMap<String, Vec<AnnouncementItem>> = HashMap::new();
    for item in items {
        by_announcement
            .entry(item.announcement_id.clone())
            .or_default()
            .push(item);
    }

    Ok(announcements
        .into_iter()
        .map(|announcement| {
            let items = by_announcement.remove(&announcement.id).unwrap_or_default();
            AnnouncementWithItems { announcement, items }
        })
        .collect())
}

pub async fn get_announcement(
    pool: &SqlitePool,
    id: &str,
) -> Result<Option<AnnouncementWithItems>, AppError> {
    let announcement = sqlx::query_as::<_, Announcement>(
        "SELECT id, title, date, created_at, updated_at FROM announcements WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(announcement) = announcement else {
        return Ok(None);
    };

    let items = sqlx::query_as::<_, AnnouncementItem>(
        r#"
        SELECT id, announcement_id, position, content
        FROM announcement_items
        WHERE announcement_id = ?
        ORDER BY position
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(Some(AnnouncementWithItems { announcement, items }))
}

/// 빈 항목은 저장하지 않습니다.
async fn insert_items(
    tx: &mut Transaction<'_, Sqlite>,
    announcement_id: &str,
    items: &[String],
) -> Result<(), AppError> {
    let contents = items.iter().map(|item| item.trim()).filter(|item| !item.is_empty());
    for (position, content) in contents.enumerate() {
        sqlx::query(
            "INSERT INTO announcement_items (id, announcement_id, position, content) VALUES (?, ?, ?, ?)",
        )
        .bind(uuid::Uuid::now_v7().to_string())
        .bind(announcement_id)
        .bind(position as i64)
        .bind(content)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

pub async fn create_announcement(
    pool: &SqlitePool,
    title: &str,
    date: NaiveDate,
    items: &[String],
) -> Result<AnnouncementWithItems, AppError> {
    let id = uuid::Uuid::now_v7().to_string();

    let mut tx = pool.begin().await?;
    sqlx::query("INSERT INTO announcements (id, title, date) VALUES (?, ?, ?)")
        .bind(&id)
        .bind(title)
        .bind(date)
        .execute(&mut *tx)
        .await?;
    insert_items(&mut tx, &id, items).await?;
    tx.commit().await?;

    get_announcement(pool, &id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created announcement".to_string()))
}

/// 제목/날짜를 갱신하고, `items`가 있으면 항목 목록을 교체합니다.
pub async fn update_announcement(
    pool: &SqlitePool,
    id: &str,
    req: &UpdateAnnouncementRequest,
) -> Result<Option<AnnouncementWithItems>, AppError> {
    let Some(current) = get_announcement(pool, id).await? else {
        return Ok(None);
    };

    let title = req
        .title
        .as_deref()
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .unwrap_or(&current.announcement.title);

    let mut tx = pool.begin().await?;
    sqlx::query(
        r#"
        UPDATE announcements
        SET title = ?, date = ?, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(title)
    .bind(req.date.unwrap_or(current.announcement.date))
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if let Some(items) = &req.items {
        sqlx::query("DELETE FROM announcement_items WHERE announcement_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        insert_items(&mut tx, id, items).await?;
    }
    tx.commit().await?;

    get_announcement(pool, id).await
}

pub async fn delete_announcement(pool: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM announcements WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn items(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[tokio::test]
    async fn items_keep_order_and_skip_blanks() {
        let pool = test_pool().await;
        let created = create_announcement(
            &pool,
            "XIV Niedziela Zwykła",
            date(2025, 7, 6),
            &items(&["Kolekta na misje", "  ", "Spotkanie Caritas"]),
        )
        .await
        .unwrap();

        let contents: Vec<_> = created.items.iter().map(|i| i.content.as_str()).collect();
        assert_eq!(contents, vec!["Kolekta na misje", "Spotkanie Caritas"]);
        assert_eq!(created.items[1].position, 1);
    }

    #[tokio::test]
    async fn feed_is_newest_first() {
        let pool = test_pool().await;
        create_announcement(&pool, "starsze", date(2025, 6, 1), &[]).await.unwrap();
        create_announcement(&pool, "nowsze", date(2025, 6, 8), &items(&["a"]))
            .await
            .unwrap();

        let feed = list_announcements(&pool).await.unwrap();
        assert_eq!(feed[0].announcement.title, "nowsze");
        assert_eq!(feed[0].items.len(), 1);
        assert!(feed[1].items.is_empty());
    }

    #[tokio::test]
    async fn update_replaces_items_only_when_given() {
        let pool = test_pool().await;
        let created = create_announcement(&pool, "T", date(2025, 6, 8), &items(&["a", "b"]))
            .await
            .unwrap();
        let id = created.announcement.id;

        let renamed = UpdateAnnouncementRequest {
            title: Some("Nowy".into()),
            ..Default::default()
        };
        let updated = update_announcement(&pool, &id, &renamed).await.unwrap().unwrap();
        assert_eq!(updated.announcement.title, "Nowy");
        assert_eq!(updated.items.len(), 2);

        let replaced = UpdateAnnouncementRequest {
            items: Some(items(&["c"])),
            ..Default::default()
        };
        let updated = update_announcement(&pool, &id, &replaced).await.unwrap().unwrap();
        assert_eq!(updated.items.len(), 1);
        assert_eq!(updated.items[0].content, "c");

        assert!(delete_announcement(&pool, &id).await.unwrap());
        assert!(get_announcement(&pool, &id).await.unwrap().is_none());
    }
}
