//! 이벤트 빌드 -- 최종 스팬을 출력 스키마의 이벤트 시퀀스로 변환
//!
//! 스팬 하나가 [`Affected`] 하나로 대응되는 1:1 변환이며 순서가 보존됩니다.
//! `introduced`가 빈 스팬은 조용히 폐기됩니다.

use crate::types::{Affected, Event, RANGE_TYPE_SEMVER, Range, VersionSpan};

/// 스팬 목록을 [`Affected`] 목록으로 변환합니다.
///
/// # 이벤트 규칙
///
/// - `introduced`는 항상 첫 이벤트 (`"0.0.0"`은 `"0"`으로 정규화)
/// - `fixed`가 있으면 방출하고 `last_affected`는 생략
/// - `fixed`가 없고 `last_affected`가 있으면 방출
/// - 둘 다 없으면 `introduced` 자신을 `lastAffected`로 합성
///   (하한만 있는 범위는 자기 자신을 양끝으로 갖는 것으로 취급)
pub fn build_affected(spans: &[VersionSpan]) -> Vec<Affected> {
    let mut affected = Vec::with_capacity(spans.len());

    for span in spans {
        if span.introduced.is_empty() {
            continue;
        }
        let introduced = if span.introduced == "0.0.0" {
            "0"
        } else {
            span.introduced.as_str()
        };

        let mut events = vec![Event::Introduced(introduced.to_owned())];
        if let Some(fixed) = &span.fixed
            && !fixed.is_empty()
        {
            events.push(Event::Fixed(fixed.clone()));
        } else if let Some(last) = &span.last_affected
            && !last.is_empty()
        {
            events.push(Event::LastAffected(last.clone()));
        } else {
            events.push(Event::LastAffected(introduced.to_owned()));
        }

        affected.push(Affected {
            ranges: vec![Range {
                range_type: RANGE_TYPE_SEMVER.to_owned(),
                events,
            }],
        });
    }

    affected
}

/// [`build_affected`]의 평탄화 역변환 -- 범위를 스팬으로 되돌립니다.
///
/// 병합 패스를 거치지 않은 범위에 대해 원래의
/// `(introduced, fixed | last_affected)` 쌍을 복원합니다.
pub fn flatten_affected(affected: &[Affected]) -> Vec<VersionSpan> {
    let mut spans = Vec::new();
    for entry in affected {
        for range in &entry.ranges {
            spans.push(VersionSpan {
                introduced: range.introduced_event().unwrap_or_default().to_owned(),
                fixed: range.fixed_event().map(str::to_owned),
                last_affected: range.last_affected_event().map(str::to_owned),
            });
        }
    }
    spans
}
