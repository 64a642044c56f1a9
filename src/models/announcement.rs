//! # 공지(Announcement) 모델
//!
//! 주일 공지 한 건은 날짜와 순서가 있는 항목(item) 목록으로 구성됩니다.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementItem {
    pub id: String,
    pub announcement_id: String,
    pub position: i64,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnnouncementWithItems {
    #[serde(flatten)]
    pub announcement: Announcement,
    pub items: Vec<AnnouncementItem>,
}

#[derive(Debug, Deserialize)]
pub struct CreateAnnouncementRequest {
    pub title: String,
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub items: Vec<String>,
}

/// `items`가 있으면 항목 목록 전체를 교체합니다.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAnnouncementRequest {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub items: Option<Vec<String>>,
}
