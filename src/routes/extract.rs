//! # 요청 추출기
//!
//! axum 기본 `Json`/`Query`는 거부(rejection) 시 평문 본문을 돌려줍니다.
//! 여기의 래퍼는 거부를 `AppError`로 바꿔 다른 에러와 같은
//! `{ "error": "<메시지>" }` 형태로 응답합니다.
//!
//! 응답 쪽 `Json`은 axum 것과 똑같이 동작합니다.

use axum::{
    extract::{FromRequest, FromRequestParts},
    response::{IntoResponse, Response},
};

use crate::error::AppError;

/// JSON 본문 추출기 (실패 시 400 + `{ "error" }`)
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

impl<T> IntoResponse for Json<T>
where
    axum::Json<T>: IntoResponse,
{
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// 쿼리 문자열 추출기 (실패 시 400 + `{ "error" }`)
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct Query<T>(pub T);
