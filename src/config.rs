//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수(`.env` 포함)에서 서버 설정값을 읽어옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (필수)
//! - `UPLOADS_PATH`: 업로드 이미지 저장 디렉토리
//! - `FRONTEND_DIST`: 빌드된 관리자/공개 페이지 디렉토리
//! - `CERTIFICATE_FONT`: 증명서 PDF용 TTF 글꼴 경로 (선택)
//! - `HOST`: 서버 바인딩 주소
//! - `PORT`: 서버 포트 번호

use std::env;

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 한 번 읽어온 후 변경되지 않습니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 URL (예: "sqlite:data/parafia.db?mode=rwc")
    pub database_url: String,
    /// 업로드 이미지가 저장되는 디렉토리 경로
    pub uploads_path: String,
    /// 프론트엔드 빌드 결과물 경로 (없으면 API만 서빙)
    pub frontend_dist: String,
    /// 증명서 PDF용 TTF 글꼴 (없으면 내장 Courier, 폴란드어 문자는 ASCII로)
    pub certificate_font: Option<String>,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 3000)
    pub port: u16,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `DATABASE_URL`이 없으면 에러가 발생합니다.
    /// 나머지 설정은 기본값이 있습니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            uploads_path: env::var("UPLOADS_PATH")
                .unwrap_or_else(|_| "data/uploads".to_string()),
            frontend_dist: env::var("FRONTEND_DIST")
                .unwrap_or_else(|_| "../frontend/dist".to_string()),
            certificate_font: env::var("CERTIFICATE_FONT")
                .ok()
                .filter(|path| !path.trim().is_empty()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            // 파싱 실패 시 기본값 3000
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
        })
    }
}
