//! # 서비스 모듈
//!
//! SQL 밖의 로직을 모아둔 곳입니다.
//! - `certificate`: 증명서 텍스트 생성과 줄바꿈
//! - `intentions`: 미사 지향 조회/생성/수정/삭제 흐름
//! - `schedule`: 주간표 변환 규칙 (순수 함수)
//! - `uploads`: 이미지 파일 저장

pub mod certificate;
pub mod intentions;
pub mod schedule;
pub mod uploads;
