//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//! 모든 핸들러는 `/api` 아래에 마운트됩니다 (`main.rs` 참고).
//!
//! 각 하위 모듈:
//! - `announcements`: 본당 공지
//! - `certificates`: 성사 증명서 발급
//! - `extract`: 거부 시 `{ "error" }`로 응답하는 `Json`/`Query` 추출기
//! - `groups`: 단체와 회원 명단
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `intentions`: 미사 지향 주간표
//! - `news`: 소식
//! - `parishioners`: 신자 명부와 성사 이력
//! - `statistics`: 통계
//! - `uploads`: 이미지 업로드

pub mod announcements;
pub mod certificates;
pub mod extract;
pub mod groups;
pub mod health;
pub mod intentions;
pub mod news;
pub mod parishioners;
pub mod statistics;
pub mod uploads;

// main.rs에서 `routes::list_groups`처럼 바로 접근할 수 있게 재공개합니다.
pub use announcements::*;
pub use certificates::*;
pub use groups::*;
pub use health::*;
pub use intentions::*;
pub use news::*;
pub use parishioners::*;
pub use statistics::*;
pub use uploads::*;

use chrono::NaiveDate;
use sqlx::SqlitePool;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// `SqlitePool`은 내부적으로 Arc이므로 clone해도 풀이 복제되지 않습니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀
    pub pool: SqlitePool,
    /// 업로드 이미지 저장 디렉토리 경로
    pub uploads_path: String,
    /// 증명서 PDF용 TTF 글꼴 경로
    pub certificate_font: Option<String>,
}

/// 날짜가 생략된 요청의 기본값 (서버 로컬 시간 기준 오늘)
pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
pub(crate) async fn test_state() -> AppState {
    AppState {
        pool: crate::db::test_pool().await,
        uploads_path: std::env::temp_dir()
            .join(format!("parafia-test-{}", uuid::Uuid::now_v7()))
            .to_string_lossy()
            .into_owned(),
        certificate_font: None,
    }
}
