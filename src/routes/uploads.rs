//! # 이미지 업로드 핸들러
//!
//! ## 엔드포인트
//! - `POST /api/uploads` (multipart, 필드 이름 `file`) → `{ "url": "/uploads/<파일명>" }`

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use super::AppState;
use crate::{error::AppError, services};

pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;

        let url = services::uploads::store_image(&state.uploads_path, &file_name, &bytes).await?;
        return Ok((StatusCode::CREATED, Json(json!({ "url": url }))));
    }

    Err(AppError::BadRequest("Missing file field".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_state;
    use axum::{
        body::Body,
        extract::{FromRequest, Request},
        http::header::CONTENT_TYPE,
    };

    const BOUNDARY: &str = "upload-boundary";

    async fn multipart(field: &str, file_name: &str, content: &str) -> Multipart {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n\
             {content}\r\n\
             --{BOUNDARY}--\r\n"
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/uploads")
            .header(CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
            .body(Body::from(body))
            .unwrap();
        Multipart::from_request(request, &()).await.unwrap()
    }

    #[tokio::test]
    async fn stores_file_and_returns_public_url() {
        let state = test_state().await;
        let form = multipart("file", "Kosciol Noca.PNG", "not-really-a-png").await;

        let (status, Json(body)) = upload_image(State(state.clone()), form).await.unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let url = body["url"].as_str().unwrap();
        assert!(url.starts_with("/uploads/"), "{url}");
        assert!(url.ends_with("-kosciol-noca.png"), "{url}");

        let file_name = url.trim_start_matches("/uploads/");
        let stored = std::path::Path::new(&state.uploads_path).join(file_name);
        assert_eq!(std::fs::read_to_string(stored).unwrap(), "not-really-a-png");
        std::fs::remove_dir_all(&state.uploads_path).ok();
    }

    #[tokio::test]
    async fn rejects_missing_field_and_non_images() {
        let state = test_state().await;

        let form = multipart("other", "a.png", "x").await;
        let err = upload_image(State(state.clone()), form).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let form = multipart("file", "skrypt.sh", "echo").await;
        let err = upload_image(State(state), form).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
