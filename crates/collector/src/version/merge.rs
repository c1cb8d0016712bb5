//! 시리즈 병합 -- 연속된 부분 버전 레코드의 결합
//!
//! 레지스트리 레코드는 이미 수정된 `major.minor` 시리즈를 맨 마커로
//! 나열한 직후에 *다음* 시리즈의 구체적 패치 버전을 나열하는 경우가
//! 있습니다. 병합 없이는 데이터베이스에 겹치거나 끊긴 범위가 생기므로,
//! 이 패스가 하나의 연속된 영향 구간과 단일 수정 경계로 이어 붙입니다.
//!
//! # 알고리즘
//!
//! 1. `introduced` 기준 숫자 점 비교로 오름차순 정렬
//!    (파싱 불가 문자열은 뒤로, 안정 정렬 -- [`compare_dotted`] 참고)
//! 2. 두 커서(`open_series`, `close_point`)를 유지하며 스캔:
//!    - 열린 시리즈가 없고 현재 항목이 시리즈 마커면 시리즈를 연다
//!    - 열린 시리즈가 있고 구체 버전이 나오면 시리즈를 닫는다:
//!      `{series}.0 ..= 현재 introduced` 범위를 합성하고 현재 항목을 그대로 방출
//!    - 그 외에는 항목을 그대로 방출
//! 3. 스캔 후에도 시리즈가 열려 있으면 (아직 영향받는 마지막 라인)
//!    관측된 최고 버전에 ".0"을 붙이고 마이너를 하나 올려 수정 경계를 합성

use crate::types::VersionSpan;
use crate::version::{compare_dotted, is_series_marker};

/// 병합 패스 -- 시리즈 마커 플래그가 설정된 경우에만 호출됩니다.
///
/// 정렬이 선행 조건입니다: 스캔은 시리즈 마커 바로 뒤에 그 시리즈를
/// 종결하는 구체 버전이 온다는 가정 위에서만 올바릅니다.
pub fn merge_series(mut spans: Vec<VersionSpan>) -> Vec<VersionSpan> {
    spans.sort_by(|a, b| compare_dotted(&a.introduced, &b.introduced));

    let mut merged = Vec::with_capacity(spans.len() + 1);
    let mut open_series: Option<String> = None;
    let mut close_point: Option<String> = None;

    for span in &spans {
        let dots = span.introduced.matches('.').count();

        match (&open_series, &close_point) {
            // 시리즈 마커가 새 시리즈를 연다
            (None, _) if dots == 1 => {
                open_series = Some(span.introduced.clone());
            }
            // 구체 버전이 열린 시리즈를 닫는다
            (Some(start), None) if dots > 1 => {
                merged.push(VersionSpan {
                    introduced: format!("{start}.0"),
                    fixed: None,
                    last_affected: Some(span.introduced.clone()),
                });
                merged.push(span.clone());
                close_point = Some(span.introduced.clone());
                open_series = None;
            }
            // 닫힌 직후이거나 열린 시리즈가 없으면 그대로 방출
            _ if close_point.is_some() || open_series.is_none() => {
                merged.push(span.clone());
                close_point = None;
            }
            // 시리즈가 열려 있는 동안의 추가 시리즈 마커는 버려진다
            _ => {}
        }
    }

    // 종결 항목이 없는 열린 시리즈: 아직 영향받는 마지막 라인
    if close_point.is_none()
        && let Some(start) = &open_series
        && is_series_marker(start)
        && let Some(last) = spans.last()
        && let Ok(highest) = semver::Version::parse(&format!("{}.0", last.introduced))
    {
        merged.push(VersionSpan {
            introduced: format!("{start}.0"),
            fixed: Some(format!(
                "{}.{}.{}",
                highest.major,
                highest.minor + 1,
                highest.patch,
            )),
            last_affected: None,
        });
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(introduced: &str) -> VersionSpan {
        VersionSpan {
            introduced: introduced.to_owned(),
            fixed: None,
            last_affected: None,
        }
    }

    #[test]
    fn series_marker_fused_with_next_concrete_record() {
        let input = vec![
            span("1.26"),
            VersionSpan {
                introduced: "1.27.3".to_owned(),
                fixed: Some("1.27.5".to_owned()),
                last_affected: Some("1.27.3".to_owned()),
            },
        ];
        let merged = merge_series(input);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].introduced, "1.26.0");
        assert_eq!(merged[0].last_affected.as_deref(), Some("1.27.3"));
        assert_eq!(merged[0].fixed, None);
        // the concrete record is re-emitted unchanged
        assert_eq!(merged[1].introduced, "1.27.3");
        assert_eq!(merged[1].fixed.as_deref(), Some("1.27.5"));
        assert_eq!(merged[1].last_affected.as_deref(), Some("1.27.3"));
    }

    #[test]
    fn trailing_open_series_synthesizes_fixed_boundary() {
        let merged = merge_series(vec![span("1.24")]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].introduced, "1.24.0");
        assert_eq!(merged[0].fixed.as_deref(), Some("1.25.0"));
        assert_eq!(merged[0].last_affected, None);
    }

    #[test]
    fn sort_precedes_scan() {
        // encounter order has the concrete record first; sort must fix that
        let input = vec![span("1.27.3"), span("1.26")];
        let merged = merge_series(input);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].introduced, "1.26.0");
        assert_eq!(merged[0].last_affected.as_deref(), Some("1.27.3"));
        assert_eq!(merged[1].introduced, "1.27.3");
    }

    #[test]
    fn entries_outside_a_series_pass_through() {
        let input = vec![span("1.25.1"), span("1.25.2")];
        let merged = merge_series(input);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].introduced, "1.25.1");
        assert_eq!(merged[1].introduced, "1.25.2");
    }

    #[test]
    fn consecutive_series_markers_collapse_into_one_range() {
        // a second marker while a series is open is dropped; the trailing
        // synthesis then spans from the first marker to past the highest
        let merged = merge_series(vec![span("1.26"), span("1.27")]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].introduced, "1.26.0");
        assert_eq!(merged[0].fixed.as_deref(), Some("1.28.0"));
    }

    #[test]
    fn series_after_closed_series_still_merges() {
        let input = vec![
            span("1.24"),
            span("1.24.5"),
            span("1.25.1"),
        ];
        let merged = merge_series(input);

        // "1.24" closed by "1.24.5"; "1.25.1" passes through
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].introduced, "1.24.0");
        assert_eq!(merged[0].last_affected.as_deref(), Some("1.24.5"));
        assert_eq!(merged[1].introduced, "1.24.5");
        assert_eq!(merged[2].introduced, "1.25.1");
    }

    #[test]
    fn unparseable_introduced_never_promoted() {
        let input = vec![span("1.26"), span("not-a-version")];
        let merged = merge_series(input);

        // unparseable sorts last; "{start}.0" synthesis requires a full
        // semver triple from the highest entry, so nothing is fabricated
        assert!(merged.iter().all(|s| s.introduced != "not-a-version.0"));
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(merge_series(Vec::new()).is_empty());
    }
}
