//! 버전 범위 구성 -- 권고 하나의 전체 버전 필드 처리
//!
//! [`build_spans`]는 각 필드를 정제한 뒤, 채워진 비교 필드에 따라
//! 분류하여 [`VersionSpan`] 목록을 발견 순서대로 만듭니다.
//! 비교 필드 없이 `major.minor` 시리즈 마커만 있는 필드가 하나라도
//! 있으면 병합 패스가 필요하다는 플래그를 함께 반환합니다.

use tracing::debug;

use crate::registry::RawVersionField;
use crate::types::VersionSpan;
use crate::version::is_series_marker;
use crate::version::sanitize::sanitize;

/// 상한 비교 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    /// 포함 상한 (`<=`)
    LessOrEqual,
    /// 배타 상한 (`<`)
    Less,
    /// 비교 없음 -- 단일 버전
    Exact,
}

/// 정제된 한정자 쌍에서 구체적인 `(introduced, last_affected)` 경계를 유도합니다.
///
/// - [`LessOrEqual`](Comparator::LessOrEqual): 상한 자체가 마지막 영향 버전.
///   point가 비어있거나 상한과 같으면 introduced는 `"0"`.
/// - [`Less`](Comparator::Less): 배타 상한은 호출 측이 `fixed`로 기록하므로,
///   여기서는 point 버전이 곧 마지막으로 알려진 영향 지점.
/// - [`Exact`](Comparator::Exact): point 버전 하나가 범위의 양끝.
pub fn extract_bounds(bound: &str, point: &str, comparator: Comparator) -> (String, String) {
    let bound = bound.trim();
    let point = point.trim();
    match comparator {
        Comparator::LessOrEqual => {
            let introduced = if point.is_empty() || point == bound {
                "0".to_owned()
            } else {
                point.to_owned()
            };
            (introduced, bound.to_owned())
        }
        Comparator::Less => {
            if point.is_empty() || point == bound {
                ("0".to_owned(), String::new())
            } else {
                (point.to_owned(), point.to_owned())
            }
        }
        Comparator::Exact => (point.to_owned(), point.to_owned()),
    }
}

/// 권고 하나의 버전 필드 전체를 [`VersionSpan`] 목록으로 변환합니다.
///
/// status가 `"affected"`가 아닌 필드는 무시되고, 정제에 실패한 필드는
/// 개별적으로 건너뜁니다 (배치 실패 아님).
///
/// # Returns
///
/// `(spans, requires_merge)` -- 시리즈 마커 필드가 하나라도 있으면
/// `requires_merge`가 참이 되어 [`merge_series`](crate::version::merge::merge_series)
/// 패스가 필요함을 알립니다.
pub fn build_spans(fields: &[RawVersionField]) -> (Vec<VersionSpan>, bool) {
    let mut spans = Vec::new();
    let mut requires_merge = false;

    for raw in fields {
        if raw.status != "affected" {
            continue;
        }
        let Some(clean) = sanitize(raw) else {
            debug!(version = %raw.version, "unusable version field, skipping");
            metrics::counter!(crate::metrics::VERSION_FIELDS_REJECTED_TOTAL).increment(1);
            continue;
        };

        if !clean.less_than_or_equal.trim().is_empty() {
            let (introduced, last_affected) =
                extract_bounds(&clean.less_than_or_equal, &clean.version, Comparator::LessOrEqual);
            spans.push(VersionSpan {
                introduced,
                fixed: None,
                last_affected: non_empty(last_affected),
            });
        } else if !clean.less_than.trim().is_empty() {
            let (mut introduced, last_affected) =
                extract_bounds(&clean.less_than, &clean.version, Comparator::Less);
            // 릴리스 경계 수정 버전은 이전 메이저 라인 전체가 영향받았음을 의미
            if clean.less_than.ends_with(".0") {
                introduced = "0".to_owned();
            }
            spans.push(VersionSpan {
                introduced,
                fixed: Some(clean.less_than.clone()),
                last_affected: non_empty(last_affected),
            });
        } else if is_series_marker(&clean.version) {
            requires_merge = true;
            spans.push(VersionSpan {
                introduced: clean.version.clone(),
                fixed: None,
                last_affected: None,
            });
        } else {
            let (introduced, last_affected) =
                extract_bounds("", &clean.version, Comparator::Exact);
            spans.push(VersionSpan {
                introduced,
                fixed: None,
                last_affected: non_empty(last_affected),
            });
        }
    }

    (spans, requires_merge)
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}
