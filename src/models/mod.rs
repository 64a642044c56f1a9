//! # 데이터 모델 모듈
//!
//! 각 하위 모듈은 특정 도메인의 데이터 타입을 담당합니다:
//! - `announcement`: 공지와 공지 항목
//! - `certificate`: 증명서 발급 요청
//! - `group`: 본당 단체와 회원
//! - `intention`: 미사 지향 (저장 형태와 주간표 형태)
//! - `news`: 소식
//! - `parishioner`: 신자, 주소, 성사 이력
//! - `statistics`: 통계 응답

pub mod announcement;
pub mod certificate;
pub mod group;
pub mod intention;
pub mod news;
pub mod parishioner;
pub mod statistics;

pub use announcement::*;
pub use certificate::*;
pub use group::*;
pub use intention::*;
pub use news::*;
pub use parishioner::*;
pub use statistics::*;

use serde::{Deserialize, Deserializer};

/// 필드 누락(None)과 명시적 null(Some(None))을 구분합니다.
/// `#[serde(default, deserialize_with = "...")]`와 함께 사용합니다.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn double_option_distinguishes_missing_and_null() {
        let missing: UpdateGroupRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(missing.leader_id, None);

        let cleared: UpdateGroupRequest =
            serde_json::from_value(json!({ "leaderId": null })).unwrap();
        assert_eq!(cleared.leader_id, Some(None));

        let set: UpdateGroupRequest =
            serde_json::from_value(json!({ "leaderId": "p1" })).unwrap();
        assert_eq!(set.leader_id, Some(Some("p1".to_string())));
    }
}
