//! # 에러 처리 모듈
//!
//! 애플리케이션의 모든 에러를 `AppError` 하나로 모으고,
//! `IntoResponse` 구현으로 HTTP 응답으로 변환합니다.
//!
//! 응답 본문은 항상 `{ "error": "<메시지>" }` 형태입니다.
//! 관리자 화면은 이 문자열을 그대로 경고창에 띄웁니다.

use axum::{
    extract::{
        multipart::MultipartError,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// - `BadRequest`: 필수 입력 누락 등 검증 실패 (400)
/// - `NotFound`: ID에 해당하는 레코드 없음 (404)
/// - 나머지 내부 에러는 로그에만 상세 내용을 남기고 클라이언트에는 일반 메시지를 돌려줍니다 (500)
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청한 리소스를 찾을 수 없음 (HTTP 404)
    #[error("Resource not found")]
    NotFound,

    /// 잘못된 요청 (HTTP 400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 참조 무결성 위반 (HTTP 409)
    /// 예: 단체 대표로 지정된 신자를 삭제하려는 경우
    #[error("Conflict: {0}")]
    Conflict(String),

    /// multipart 본문을 읽을 수 없음 (HTTP 400)
    #[error("Invalid form data: {0}")]
    Multipart(#[from] MultipartError),

    /// JSON 본문을 읽거나 요청 구조체로 바꿀 수 없음 (HTTP 400)
    /// 예: `days[0].date`가 날짜 형식이 아님
    #[error("Invalid JSON body: {0}")]
    JsonBody(#[from] JsonRejection),

    /// 쿼리 문자열 파싱 실패 (HTTP 400)
    #[error("Invalid query string: {0}")]
    Query(#[from] QueryRejection),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500)
    /// 트랜잭션 중 실패하면 트랜잭션은 롤백되고 이 에러가 전파됩니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 파일 입출력 오류 (HTTP 500)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 폼 필드에 담긴 JSON 파싱 실패 (HTTP 500)
    /// 예: 지향 생성 시 `masses` 필드
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Conflict(ref msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Multipart(ref e) => {
                tracing::warn!("Rejected multipart body: {}", e);
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::JsonBody(ref e) => {
                tracing::warn!("Rejected JSON body: {}", e.body_text());
                (StatusCode::BAD_REQUEST, e.body_text())
            }
            AppError::Query(ref e) => {
                tracing::warn!("Rejected query string: {}", e.body_text());
                (StatusCode::BAD_REQUEST, e.body_text())
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            AppError::Io(ref e) => {
                tracing::error!("IO error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An IO error occurred".to_string(),
                )
            }
            AppError::Json(ref e) => {
                tracing::error!("JSON parse error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to parse submitted data".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
