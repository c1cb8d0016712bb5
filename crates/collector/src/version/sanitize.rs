//! 버전 필드 정제 -- 자유 형식 버전 필드의 정규화
//!
//! 레지스트리의 버전 필드는 정확한 버전 외에도 비교 연산자 텍스트,
//! "prior to X" 접두 문구, 와일드카드 접미사, `.x` 시리즈 표기 등
//! 일관성 없는 형태가 섞여 들어옵니다. [`sanitize`]는 이를 정제된
//! 트리플로 변환하거나, 사용할 수 없는 필드로 거부합니다.
//!
//! 규칙은 선언된 순서대로 적용되며, 각 필드에 대해 처음 일치한 규칙이
//! 해당 필드를 결정합니다.

use crate::registry::RawVersionField;
use crate::version::trim_version_prefixes;

/// 정제된 버전 트리플
///
/// 세 필드 모두 앞의 `v`/`V` 접두사가 제거된 상태입니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizedVersion {
    /// 버전 문자열 (비교 연산자 텍스트 제거됨)
    pub version: String,
    /// 배타적 상한 (이 버전 미만이 영향)
    pub less_than: String,
    /// 포함 상한 (이 버전 이하가 영향)
    pub less_than_or_equal: String,
}

/// 버전 필드 하나를 정제합니다.
///
/// `None`은 필드 전체를 건너뛰라는 거부 신호입니다:
///
/// - `version`에 `"n/a"` 마커가 있고 비교 필드가 둘 다 비어있는 경우
/// - 비교 필드 중 하나가 `"unspecified"`인데 `version`이 비어있지 않은 경우
///   (상한이 모호함)
pub fn sanitize(raw: &RawVersionField) -> Option<SanitizedVersion> {
    let mut version = raw.version.clone();
    let mut less_than = raw.less_than.clone();
    let mut less_than_or_equal = raw.less_than_or_equal.clone();

    if version.contains("n/a") && less_than.is_empty() && less_than_or_equal.is_empty() {
        return None;
    }
    if (less_than_or_equal == "unspecified" || less_than == "unspecified") && !version.is_empty() {
        return None;
    }

    // 비교 기호가 값의 자리 표시자로 쓰인 경우
    if less_than_or_equal == "<=" {
        less_than_or_equal = version.clone();
    }

    // 비교 연산자 텍스트가 version 필드에 들어온 경우: 해당 비교 필드로 이동
    if let Some(rest) = version.strip_prefix("< ").map(str::to_owned) {
        less_than = rest;
        version.clear();
    }
    if let Some(rest) = version.strip_prefix("<= ").map(str::to_owned) {
        less_than_or_equal = rest;
        version.clear();
    }

    // "prior to X": X가 상한. 맨 `major.minor`이면 ".0" 패치를 합성
    if let Some(rest) = version.trim().strip_prefix("prior to").map(str::to_owned) {
        let mut bound = rest.trim().to_owned();
        if bound.matches('.').count() == 1 {
            bound.push_str(".0");
        }
        less_than = bound.clone();
        version = bound;
    }
    if let Some(rest) = less_than.trim().strip_prefix("prior to").map(str::to_owned) {
        less_than = rest.trim().to_owned();
    }

    // "1.26*" 패턴: 해당 마이너 시리즈 전체가 영향, 수정 버전은 아직 없음
    if less_than.trim().ends_with('*') {
        version = less_than.replace('*', "").trim().to_owned();
        less_than.clear();
    }

    // "1.26.x": 시리즈 식별자로 축약
    if version.trim().ends_with(".x")
        && let Some(pos) = version.rfind('.')
    {
        version.truncate(pos);
    }

    // less_than_or_equal에 남은 "<=" 토큰 제거
    if less_than_or_equal.contains("<=") {
        less_than_or_equal = less_than_or_equal.replace("<=", "").trim().to_owned();
    }

    Some(SanitizedVersion {
        version: trim_version_prefixes(&version, &["v", "V"]),
        less_than: trim_version_prefixes(&less_than, &["v", "V"]),
        less_than_or_equal: trim_version_prefixes(&less_than_or_equal, &["v", "V"]),
    })
}
