//! # 증명서(Certificate) 모델
//!
//! 세례/견진/혼인 증명서 발급 요청입니다.
//! 신자 기록과 자유 입력 항목(`fields`)을 합쳐 문서를 만듭니다.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::SacramentKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateKind {
    Baptism,
    Confirmation,
    Marriage,
}

impl CertificateKind {
    /// 증명서가 근거로 삼는 성사 종류
    pub fn sacrament(self) -> SacramentKind {
        match self {
            CertificateKind::Baptism => SacramentKind::Baptism,
            CertificateKind::Confirmation => SacramentKind::Confirmation,
            CertificateKind::Marriage => SacramentKind::Marriage,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRequest {
    pub kind: CertificateKind,
    pub parishioner_id: String,
    /// 자유 입력 항목. 예: parents, godparents, spouse, priest, parish, witnesses
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}
