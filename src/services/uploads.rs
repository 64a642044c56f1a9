//! # 업로드 이미지 저장 서비스
//!
//! 지향/소식에 붙는 이미지를 `UPLOADS_PATH` 아래에 저장하고
//! 공개 URL(`/uploads/<파일명>`)을 돌려줍니다.
//! 저장된 파일은 `main.rs`의 `ServeDir`이 그대로 서빙합니다.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::AppError;

/// 공개 URL 접두사. `main.rs`의 정적 파일 경로와 같아야 합니다.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

const ALLOWED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// 원본 파일 이름으로 저장용 파일 이름을 만듭니다.
///
/// `<uuidv7>-<slug>.<확장자>` 형식이라 같은 이름의 파일이 여러 번 올라와도 겹치지 않습니다.
/// 확장자가 없거나 이미지가 아니면 에러를 돌려줍니다.
///
/// # 예시
/// ```text
/// stored_file_name("Pierwsza Komunia.JPG") → "0190…-pierwsza-komunia.jpg"
/// ```
pub fn stored_file_name(original: &str) -> Result<String, AppError> {
    let path = Path::new(original);
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .filter(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
        .ok_or_else(|| AppError::BadRequest(format!("Unsupported image file: {original}")))?;

    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(slug::slugify)
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "image".to_string());

    Ok(format!("{}-{}.{}", uuid::Uuid::now_v7(), stem, extension))
}

/// 이미지를 디스크에 저장하고 공개 URL을 반환합니다.
pub async fn store_image(
    uploads_path: &str,
    original_name: &str,
    bytes: &[u8],
) -> Result<String, AppError> {
    if bytes.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
    }

    let file_name = stored_file_name(original_name)?;
    let full_path = PathBuf::from(uploads_path).join(&file_name);

    if let Some(parent) = full_path.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(&full_path, bytes).await?;

    tracing::info!(file = %file_name, size = bytes.len(), "Stored uploaded image");
    Ok(format!("{UPLOADS_URL_PREFIX}/{file_name}"))
}
