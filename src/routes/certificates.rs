//! # 증명서(Certificate) 핸들러
//!
//! ## 엔드포인트
//! - `POST /api/certificates` → `application/pdf` 증명서 문서
//!
//! 신자 기록과 해당 종류의 가장 최근 성사 기록을 찾아 `services::certificate`로 렌더링합니다.
//! 성사 기록이 없어도 발급되며, 빈 칸은 손으로 채울 수 있게 점선으로 남습니다.
//! `CERTIFICATE_FONT`가 있으면 요청마다 그 글꼴 파일을 읽어 씁니다.

use axum::{extract::State, http::header, response::IntoResponse};

use super::{extract::Json, today, AppState};
use crate::{db, error::AppError, models::*, services::certificate};

pub async fn generate_certificate(
    State(state): State<AppState>,
    Json(req): Json<CertificateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let parishioner = db::get_parishioner(&state.pool, &req.parishioner_id)
        .await?
        .ok_or(AppError::NotFound)?;
    let sacrament =
        db::latest_sacrament(&state.pool, &parishioner.id, req.kind.sacrament()).await?;

    let text = certificate::render(
        req.kind,
        &parishioner,
        sacrament.as_ref(),
        &req.fields,
        today(),
    );

    let font = match &state.certificate_font {
        Some(path) => Some(tokio::fs::read(path).await?),
        None => None,
    };
    let pdf = certificate::render_pdf(certificate::heading(req.kind), &text, font.as_deref())?;

    tracing::info!(
        parishioner_id = %parishioner.id,
        kind = ?req.kind,
        bytes = pdf.len(),
        "Generated certificate"
    );
    Ok(([(header::CONTENT_TYPE, "application/pdf")], pdf))
}
