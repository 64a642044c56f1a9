//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 모든 함수는 `&SqlitePool`을 받습니다. 풀은 `main`에서 `connect()`로 한 번 만들고
//! `AppState`를 통해 핸들러에 주입됩니다. 전역 상태는 없습니다.
//!
//! 각 하위 모듈:
//! - `announcements`: 공지와 공지 항목
//! - `groups`: 단체와 회원 명단
//! - `intentions`: 미사 지향과 미사
//! - `news`: 소식
//! - `parishioners`: 신자와 성사 이력
//! - `statistics`: 집계 쿼리

pub mod announcements;
pub mod groups;
pub mod intentions;
pub mod news;
pub mod parishioners;
pub mod statistics;

pub use announcements::*;
pub use groups::*;
pub use intentions::*;
pub use news::*;
pub use parishioners::*;
pub use statistics::*;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// 연결 풀을 만들고 아직 적용되지 않은 마이그레이션을 실행합니다.
///
/// SQLite 외래키 제약(`ON DELETE CASCADE`)은 sqlx가 연결마다 켜 줍니다.
pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// 테스트용 인메모리 DB
///
/// `sqlite::memory:`는 연결마다 별도 DB이므로 연결을 하나로 고정합니다.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create memory pool");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}
