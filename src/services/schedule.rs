//! # 미사 지향 주간표 규칙
//!
//! 저장 형태(기준 날짜 하나 + 미사 목록)와 화면 형태(7일 주간표)를
//! 양방향으로 변환하는 순수 함수 모음입니다. DB에 접근하지 않습니다.
//!
//! - `week_window()`: 기준 날짜 → 월요일~일요일 범위
//! - `display_title()`: "<이름> - <요일>" 형식의 예전 제목 정리
//! - `to_weekly()`: 조회 변환 (미사 목록 → 하루짜리 `days`)
//! - `flatten_days()`: 수정 변환 (`days` → 저장할 미사 목록)
//! - `seed_week()`, `is_monday()`, `is_sunday()`, `validate_week_range()`: 입력 폼 보조
//!
//! 주간 범위는 캐시하지 않고 호출할 때마다 계산합니다.

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, Weekday};
use thiserror::Error;

use crate::models::{
    Day, DayMass, DayMassInput, DayInput, Intention, IntentionText, Mass, MassInput,
    MassSchedule, WeekTemplate, WeekWindow, WeeklyIntention,
};

/// 여러 지향을 하나의 `intention` 컬럼으로 합칠 때 쓰는 구분자
pub const INTENTION_SEPARATOR: &str = "; ";

/// 예전 제목에 붙어 있던 요일 이름. 대소문자를 구분하므로 두 표기를 모두 둡니다.
const WEEKDAY_NAMES: [&str; 14] = [
    "poniedziałek",
    "wtorek",
    "środa",
    "czwartek",
    "piątek",
    "sobota",
    "niedziela",
    "Poniedziałek",
    "Wtorek",
    "Środa",
    "Czwartek",
    "Piątek",
    "Sobota",
    "Niedziela",
];

/// 기준 날짜가 속한 주(월요일 시작)를 계산합니다.
///
/// 일요일은 앞선 월요일로부터 6일 뒤이므로 6일을 뺍니다.
pub fn week_window(date: NaiveDate) -> WeekWindow {
    let offset = u64::from(date.weekday().num_days_from_monday());
    let week_start = date - Days::new(offset);
    WeekWindow {
        week_start,
        week_end: week_start + Days::new(6),
    }
}

/// 표시용 제목을 돌려줍니다.
///
/// 하이픈과 요일 이름이 모두 있으면 첫 하이픈 앞부분만 남깁니다.
pub fn display_title(title: &str) -> String {
    let has_weekday = WEEKDAY_NAMES.iter().any(|day| title.contains(day));
    match title.split_once('-') {
        Some((head, _)) if has_weekday => head.trim().to_string(),
        _ => title.to_string(),
    }
}

/// 조회 변환: 저장된 지향과 미사 목록을 주간표 형태로 바꿉니다.
///
/// 결과 `days`에는 항상 하루(`intention.date`)만 들어갑니다.
/// 저장된 지향 문자열은 `"; "`로 다시 나누지 않습니다.
pub fn to_weekly(mut intention: Intention, masses: Vec<Mass>) -> WeeklyIntention {
    // 주간 범위는 저장하지 않으므로 기준 날짜에서 매번 계산합니다.
    let window = week_window(intention.date);
    // "<이름> - <요일>" 형식의 예전 제목은 이름 부분만 보여줍니다.
    intention.title = display_title(&intention.title);

    // 미사마다 날짜가 없으므로 모두 기준 날짜 하루에 넣습니다.
    // 저장된 "A; B"는 나누지 않고 지향 하나로 돌려줍니다.
    let day = Day {
        date: intention.date,
        masses: masses
            .into_iter()
            .map(|mass| DayMass {
                time: mass.time,
                intentions: vec![IntentionText {
                    intention: mass.intention,
                }],
            })
            .collect(),
    };

    WeeklyIntention {
        intention,
        window,
        days: vec![day],
    }
}

/// 화면 형태의 미사 하나에서 저장할 지향 문자열을 결정합니다.
///
/// 1. `intentions`의 공백 아닌 항목을 trim 후 `"; "`로 연결
/// 2. 결과가 비면 예전 `intention` 필드를 그대로 사용
/// 3. 둘 다 없으면 None (행을 만들지 않음)
pub fn resolve_intention_text(mass: &DayMassInput) -> Option<String> {
    let joined = mass
        .intentions
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|text| text.intention.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(INTENTION_SEPARATOR);

    if !joined.is_empty() {
        return Some(joined);
    }
    // 배열이 비었을 때만 예전 필드를 봅니다. 빈 문자열이면 행을 만들지 않습니다.
    mass.intention.clone().filter(|text| !text.trim().is_empty())
}

/// 수정 변환: 주간표의 모든 날, 모든 미사를 저장할 flat 목록으로 펼칩니다.
///
/// 시간이 빈 미사는 지향과 관계없이 버립니다.
pub fn flatten_days(days: &[DayInput]) -> Vec<MassInput> {
    days.iter()
        // 1. 날짜 구분 없이 모든 날의 미사를 입력 순서대로 이어 붙입니다.
        //    저장 형태에는 미사별 날짜가 없으므로 `day.date`는 여기서 버려집니다.
        .flat_map(|day| day.masses.iter())
        // 2. 시간이 비었거나 공백뿐인 미사는 지향이 있어도 버립니다.
        .filter(|mass| !mass.time.trim().is_empty())
        // 3. 지향 문자열이 정해지지 않으면(None) 행을 만들지 않습니다.
        .filter_map(|mass| {
            resolve_intention_text(mass).map(|intention| MassInput {
                time: mass.time.clone(),
                intention,
            })
        })
        .collect()
}

/// 수정 요청의 미사 목록을 저장할 행으로 바꿉니다.
///
/// legacy 형태는 거르지 않고 그대로 저장합니다.
pub fn masses_to_store(schedule: &MassSchedule) -> Vec<MassInput> {
    match schedule {
        MassSchedule::Weekly(days) => flatten_days(days),
        MassSchedule::Legacy(masses) => masses.clone(),
        MassSchedule::Empty => Vec::new(),
    }
}

/// 입력 폼 초기값: `week_start`부터 7일짜리 빈 주간표
///
/// `week_start`가 월요일인지는 확인하지 않습니다.
pub fn seed_week(week_start: NaiveDate) -> WeekTemplate {
    let days = (0..7)
        .map(|offset| Day {
            date: week_start + Days::new(offset),
            masses: Vec::new(),
        })
        .collect();

    WeekTemplate {
        window: WeekWindow {
            week_start,
            week_end: week_start + Days::new(6),
        },
        days,
    }
}

pub fn is_monday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Mon
}

pub fn is_sunday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Sun
}

/// 주간 범위 검증 실패 사유
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeekRangeError {
    #[error("Both week start and week end dates are required")]
    MissingDate,
    #[error("Week must start on a Monday ({0} is a {1})")]
    StartNotMonday(NaiveDate, Weekday),
    #[error("Week must end on a Sunday ({0} is a {1})")]
    EndNotSunday(NaiveDate, Weekday),
    #[error("Week must span exactly 6 days, got {0}")]
    WrongSpan(i64),
}

/// 월요일 시작, 일요일 종료, 6일 간격인지 확인합니다.
///
/// 생성/수정 처리에서는 호출하지 않습니다. 클라이언트가 선택적으로 사용합니다.
pub fn validate_week_range(
    week_start: Option<NaiveDate>,
    week_end: Option<NaiveDate>,
) -> Result<(), WeekRangeError> {
    let (Some(start), Some(end)) = (week_start, week_end) else {
        return Err(WeekRangeError::MissingDate);
    };

    if !is_monday(start) {
        return Err(WeekRangeError::StartNotMonday(start, start.weekday()));
    }
    if !is_sunday(end) {
        return Err(WeekRangeError::EndNotSunday(end, end.weekday()));
    }

    let span = (end - start).num_days();
    if span != 6 {
        return Err(WeekRangeError::WrongSpan(span));
    }
    Ok(())
}

/// `YYYY-MM-DD` 또는 그 형식으로 시작하는 ISO 날짜-시간을 날짜로 읽습니다.
///
/// 시간대가 붙은 값(`...Z`, `...+02:00`)은 서버 로컬 시간으로 바꾼 뒤 날짜를 취합니다.
/// 브라우저는 로컬 자정을 UTC로 보내므로(`2025-06-01T22:00:00.000Z`),
/// 앞 10자를 그대로 쓰면 월요일이 일요일로 밀려 주간 범위가 한 주 앞당겨집니다.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(moment) = DateTime::parse_from_rfc3339(text) {
        return Some(moment.with_timezone(&Local).date_naive());
    }
    // 시간대 없는 "2025-06-02T00:00:00" 같은 값은 앞 10자만 사용
    text.get(..10)
        .filter(|_| text.as_bytes().get(10) == Some(&b'T'))
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn intention(title: &str, on: NaiveDate) -> Intention {
        Intention {
            id: "id-1".into(),
            title: title.into(),
            date: on,
            image_url: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn mass(time: &str, text: &str) -> Mass {
        Mass {
            id: format!("m-{time}"),
            intention_id: "id-1".into(),
            position: 0,
            time: time.into(),
            intention: text.into(),
        }
    }

    fn day_mass(time: &str, texts: &[&str]) -> DayMassInput {
        DayMassInput {
            time: time.into(),
            intentions: Some(
                texts
                    .iter()
                    .map(|t| IntentionText {
                        intention: t.to_string(),
                    })
                    .collect(),
            ),
            intention: None,
        }
    }

    #[test]
    fn week_window_starts_on_monday_for_every_weekday() {
        let monday = date(2025, 6, 2);
        for offset in 0..7 {
            let anchor = monday + Days::new(offset);
            let window = week_window(anchor);
            assert_eq!(window.week_start, monday, "anchor {anchor}");
            assert_eq!(window.week_end, date(2025, 6, 8), "anchor {anchor}");
            assert_eq!((window.week_end - window.week_start).num_days(), 6);
        }
    }

    #[test]
    fn week_window_crosses_month_and_year() {
        // 2025-01-01은 수요일
        let window = week_window(date(2025, 1, 1));
        assert_eq!(window.week_start, date(2024, 12, 30));
        assert_eq!(window.week_end, date(2025, 1, 5));
    }

    #[test]
    fn display_title_strips_weekday_suffix() {
        assert_eq!(display_title("Tydzień - poniedziałek"), "Tydzień");
        assert_eq!(display_title("Intencje - niedziela - wieczór"), "Intencje");
        assert_eq!(display_title("Zwykła intencja"), "Zwykła intencja");
    }

    #[test]
    fn display_title_needs_both_hyphen_and_weekday() {
        assert_eq!(display_title("Tydzień - Poniedziałek"), "Tydzień");
        assert_eq!(display_title("Tydzień - NIEDZIELA"), "Tydzień - NIEDZIELA");
        assert_eq!(display_title("Msza - wieczorna"), "Msza - wieczorna");
        assert_eq!(display_title("Niedziela wielkanocna"), "Niedziela wielkanocna");
    }

    #[test]
    fn to_weekly_wraps_masses_into_single_day() {
        let anchor = date(2025, 6, 4);
        let weekly = to_weekly(
            intention("Tydzień - środa", anchor),
            vec![mass("7:00", "A; B"), mass("18:00", "C")],
        );

        assert_eq!(weekly.intention.title, "Tydzień");
        assert_eq!(weekly.window.week_start, date(2025, 6, 2));
        assert_eq!(weekly.days.len(), 1);
        assert_eq!(weekly.days[0].date, anchor);
        assert_eq!(
            weekly.days[0].masses[0].intentions,
            vec![IntentionText {
                intention: "A; B".into()
            }]
        );
        assert_eq!(weekly.days[0].masses[1].time, "18:00");
    }

    #[test]
    fn to_weekly_without_masses_has_one_empty_day() {
        let weekly = to_weekly(intention("T", date(2025, 6, 2)), vec![]);
        assert_eq!(weekly.days.len(), 1);
        assert!(weekly.days[0].masses.is_empty());
    }

    #[test]
    fn flatten_joins_trimmed_intentions() {
        let days = vec![DayInput {
            date: Some(date(2025, 6, 2)),
            masses: vec![day_mass("7:00", &[" X ", "", "Y"])],
        }];
        assert_eq!(
            flatten_days(&days),
            vec![MassInput {
                time: "7:00".into(),
                intention: "X; Y".into()
            }]
        );
    }

    #[test]
    fn flatten_skips_blank_masses_and_blank_times() {
        let days = vec![
            DayInput {
                date: None,
                masses: vec![day_mass("7:00", &["  ", ""]), day_mass("", &["Z"])],
            },
            DayInput {
                date: None,
                masses: vec![day_mass("8:30", &["W"])],
            },
        ];
        let rows = flatten_days(&days);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].time, "8:30");

        let whitespace_time = vec![DayInput {
            date: None,
            masses: vec![day_mass("   ", &["X"])],
        }];
        assert!(flatten_days(&whitespace_time).is_empty());
        assert_eq!(rows[0].intention, "W");
    }

    #[test]
    fn flatten_falls_back_to_legacy_intention() {
        let mut legacy = day_mass("9:00", &[" "]);
        legacy.intention = Some("  za parafian ".into());
        let no_array = DayMassInput {
            time: "10:00".into(),
            intentions: None,
            intention: Some("O zdrowie".into()),
        };

        let rows = flatten_days(&[DayInput {
            date: None,
            masses: vec![legacy, no_array],
        }]);
        assert_eq!(rows[0].intention, "  za parafian ");
        assert_eq!(rows[1].intention, "O zdrowie");

        let mut empty_legacy = day_mass("7:00", &["  "]);
        empty_legacy.intention = Some(String::new());
        assert_eq!(resolve_intention_text(&empty_legacy), None);
        let mut spaces_legacy = day_mass("8:00", &[]);
        spaces_legacy.intention = Some("   ".into());
        assert_eq!(resolve_intention_text(&spaces_legacy), None);
        assert!(flatten_days(&[DayInput {
            date: None,
            masses: vec![empty_legacy],
        }])
        .is_empty());
    }

    #[test]
    fn legacy_schedule_is_stored_verbatim() {
        let masses = vec![
            MassInput {
                time: "".into(),
                intention: "".into(),
            },
            MassInput {
                time: "7:00".into(),
                intention: " A ".into(),
            },
        ];
        assert_eq!(masses_to_store(&MassSchedule::Legacy(masses.clone())), masses);
        assert!(masses_to_store(&MassSchedule::Empty).is_empty());
    }

    #[test]
    fn seed_week_has_seven_consecutive_empty_days() {
        let template = seed_week(date(2025, 6, 2));
        assert_eq!(template.days.len(), 7);
        assert_eq!(template.window.week_end, date(2025, 6, 8));
        for (i, day) in template.days.iter().enumerate() {
            assert_eq!(day.date, date(2025, 6, 2 + i as u32));
            assert!(day.masses.is_empty());
        }
    }

    #[test]
    fn seed_week_does_not_require_monday() {
        let template = seed_week(date(2025, 6, 4));
        assert_eq!(template.days[0].date, date(2025, 6, 4));
        assert_eq!(template.window.week_end, date(2025, 6, 10));
    }

    #[test]
    fn validate_week_range_reports_each_failure() {
        let monday = date(2025, 6, 2);
        let sunday = date(2025, 6, 8);

        assert_eq!(validate_week_range(Some(monday), Some(sunday)), Ok(()));
        assert_eq!(
            validate_week_range(None, Some(sunday)),
            Err(WeekRangeError::MissingDate)
        );
        assert!(matches!(
            validate_week_range(Some(date(2025, 6, 3)), Some(sunday)),
            Err(WeekRangeError::StartNotMonday(_, Weekday::Tue))
        ));
        assert!(matches!(
            validate_week_range(Some(monday), Some(date(2025, 6, 7))),
            Err(WeekRangeError::EndNotSunday(_, Weekday::Sat))
        ));
        assert_eq!(
            validate_week_range(Some(monday), Some(date(2025, 6, 15))),
            Err(WeekRangeError::WrongSpan(13))
        );
    }

    #[test]
    fn weekday_predicates() {
        assert!(is_monday(date(2025, 6, 2)));
        assert!(!is_monday(date(2025, 6, 8)));
        assert!(is_sunday(date(2025, 6, 8)));
    }

    #[test]
    fn parse_date_accepts_plain_and_iso_datetime() {
        assert_eq!(parse_date("2025-06-02"), Some(date(2025, 6, 2)));
        assert_eq!(parse_date("2025-06-02T22:00:00"), Some(date(2025, 6, 2)));
        assert_eq!(parse_date("02.06.2025"), None);
        assert_eq!(parse_date("2025-06-02junk"), None);
    }

    #[test]
    fn parse_date_converts_zoned_datetime_to_local_date() {
        let text = "2025-06-01T22:00:00.000Z";
        let expected = DateTime::parse_from_rfc3339(text)
            .unwrap()
            .with_timezone(&Local)
            .date_naive();
        assert_eq!(parse_date(text), Some(expected));

        // 같은 순간을 +02:00으로 보내도 결과가 같아야 합니다.
        assert_eq!(parse_date("2025-06-02T00:00:00+02:00"), Some(expected));
    }
}
