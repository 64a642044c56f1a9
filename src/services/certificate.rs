//! # 증명서 문서 생성
//!
//! 신자 기록, 성사 기록, 자유 입력 항목으로 세례/견진/혼인 증명서 본문을 만듭니다.
//!
//! 1. `render`: 고정폭 텍스트. 문단은 `LINE_WIDTH` 열에서 단어 단위로 줄바꿈됩니다.
//! 2. `render_pdf`: 그 텍스트를 A4 PDF에 한 줄씩 옮깁니다 (고정폭 글꼴, 넘치면 다음 페이지).
//!
//! 내장 Courier 글꼴은 폴란드어 문자를 그리지 못하므로 ASCII로 바꿔 씁니다.
//! `CERTIFICATE_FONT`로 TTF 글꼴을 지정하면 원문 그대로 들어갑니다.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};

use crate::{
    error::AppError,
    models::{CertificateKind, Parishioner, Sacrament},
};

pub const LINE_WIDTH: usize = 72;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const FONT_SIZE_PT: f32 = 11.0;
const LINE_HEIGHT_MM: f32 = 5.0;
/// (297 - 2 * 20) / 5
pub const LINES_PER_PAGE: usize = 51;

const MISSING: &str = "..........";

/// 단어 단위 줄바꿈. `width`보다 긴 단어는 그 줄에 혼자 둡니다.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d.%m.%Y").to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

fn field<'a>(fields: &'a BTreeMap<String, String>, key: &str) -> &'a str {
    fields
        .get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .unwrap_or(MISSING)
}

/// 증명서 제목 (본문 첫 줄, PDF 문서 정보)
pub fn heading(kind: CertificateKind) -> &'static str {
    match kind {
        CertificateKind::Baptism => "ŚWIADECTWO CHRZTU",
        CertificateKind::Confirmation => "ŚWIADECTWO BIERZMOWANIA",
        CertificateKind::Marriage => "ŚWIADECTWO ŚLUBU",
    }
}

/// 증명서 본문 문단들을 만듭니다 (줄바꿈 전).
fn paragraphs(
    kind: CertificateKind,
    person: &Parishioner,
    sacrament: Option<&Sacrament>,
    fields: &BTreeMap<String, String>,
) -> Vec<String> {
    let parish = field(fields, "parish");
    let date = format_date(sacrament.and_then(|s| s.date));
    let place = sacrament
        .and_then(|s| s.place.as_deref())
        .unwrap_or(parish);

    let mut result = vec![format!(
        "Niniejszym zaświadcza się, że {} urodzony(a) dnia {} w parafii {}",
        person.full_name(),
        format_date(person.birth_date),
        parish,
    )];

    match kind {
        CertificateKind::Baptism => {
            result.push(format!(
                "przyjął(ęła) sakrament chrztu świętego dnia {date} w {place}. \
                 Rodzice: {}. Rodzice chrzestni: {}.",
                field(fields, "parents"),
                field(fields, "godparents"),
            ));
        }
        CertificateKind::Confirmation => {
            result.push(format!(
                "przyjął(ęła) sakrament bierzmowania dnia {date} w {place}, \
                 otrzymując imię {}. Świadek bierzmowania: {}.",
                field(fields, "confirmationName"),
                field(fields, "sponsor"),
            ));
        }
        CertificateKind::Marriage => {
            result.push(format!(
                "zawarł(a) sakramentalny związek małżeński z {} dnia {date} w {place}. \
                 Świadkowie: {}.",
                field(fields, "spouse"),
                field(fields, "witnesses"),
            ));
        }
    }

    if let Some(notes) = sacrament.and_then(|s| s.notes.as_deref()) {
        result.push(format!("Uwagi: {notes}"));
    }
    result.push(format!("Sakramentu udzielił: {}.", field(fields, "priest")));
    result
}

/// 증명서 전체 텍스트를 만듭니다.
///
/// `issued_on`은 발급일(보통 오늘)이며, 마지막 서명란 위에 표시됩니다.
pub fn render(
    kind: CertificateKind,
    person: &Parishioner,
    sacrament: Option<&Sacrament>,
    fields: &BTreeMap<String, String>,
    issued_on: NaiveDate,
) -> String {
    let title = heading(kind);
    let pad = LINE_WIDTH.saturating_sub(title.chars().count()) / 2;

    let mut lines = vec![format!("{}{}", " ".repeat(pad), title), String::new()];
    for paragraph in paragraphs(kind, person, sacrament, fields) {
        lines.extend(wrap_text(&paragraph, LINE_WIDTH));
        lines.push(String::new());
    }

    lines.push(format!(
        "{}, dnia {}",
        field(fields, "city"),
        issued_on.format("%d.%m.%Y")
    ));
    lines.push(String::new());
    lines.push(format!("{:>width$}", "........................", width = LINE_WIDTH));
    lines.push(format!("{:>width$}", "podpis duszpasterza", width = LINE_WIDTH));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// 폴란드어 발음 구별 부호를 떼어 냅니다 (내장 글꼴용).
pub fn fold_polish(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'ą' => 'a',
            'ć' => 'c',
            'ę' => 'e',
            'ł' => 'l',
            'ń' => 'n',
            'ó' => 'o',
            'ś' => 's',
            'ź' | 'ż' => 'z',
            'Ą' => 'A',
            'Ć' => 'C',
            'Ę' => 'E',
            'Ł' => 'L',
            'Ń' => 'N',
            'Ó' => 'O',
            'Ś' => 'S',
            'Ź' | 'Ż' => 'Z',
            c if c.is_ascii() => c,
            _ => '?',
        })
        .collect()
}

fn pdf_error(e: printpdf::Error) -> AppError {
    AppError::Internal(format!("PDF rendering failed: {e:?}"))
}

fn load_font(doc: &PdfDocumentReference, font: Option<&[u8]>) -> Result<IndirectFontRef, AppError> {
    match font {
        Some(bytes) => doc.add_external_font(bytes).map_err(pdf_error),
        None => doc.add_builtin_font(BuiltinFont::Courier).map_err(pdf_error),
    }
}

/// `render` 결과 텍스트를 A4 PDF 바이트로 만듭니다.
///
/// `font`는 TTF 글꼴 파일 내용입니다. `None`이면 내장 Courier와 ASCII 변환을 씁니다.
pub fn render_pdf(title: &str, text: &str, font: Option<&[u8]>) -> Result<Vec<u8>, AppError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        title,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let pdf_font = load_font(&doc, font)?;

    let lines: Vec<String> = text
        .lines()
        .map(|line| match font {
            Some(_) => line.to_string(),
            None => fold_polish(line),
        })
        .collect();

    // 빈 텍스트도 빈 페이지 한 장은 만듭니다.
    let mut pages = lines.chunks(LINES_PER_PAGE);
    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut chunk = pages.next().unwrap_or(&[]);

    loop {
        let top = PAGE_HEIGHT_MM - MARGIN_MM;
        for (row, line) in chunk.iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let y = top - LINE_HEIGHT_MM * row as f32;
            layer.use_text(line.as_str(), FONT_SIZE_PT, Mm(MARGIN_MM), Mm(y), &pdf_font);
        }

        match pages.next() {
            Some(next) => {
                let (page, page_layer) =
                    doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
                layer = doc.get_page(page).get_layer(page_layer);
                chunk = next;
            }
            None => break,
        }
    }

    doc.save_to_bytes().map_err(pdf_error)
}
