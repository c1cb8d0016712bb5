//! 도메인 타입 -- 정규화된 취약점 데이터베이스의 출력 스키마
//!
//! 출력 JSON의 구조를 그대로 반영합니다. 하나의 [`Advisory`]는
//! 컴포넌트별 영향 범위([`Affected`])를 가지며, 각 범위는
//! introduced / fixed / lastAffected [`Event`] 시퀀스로 표현됩니다.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 시맨틱 버전 정렬을 사용하는 범위 타입 태그
pub const RANGE_TYPE_SEMVER: &str = "SEMVER";

/// 심각도 레벨
///
/// CVSS 벡터 해석 결과를 나타냅니다.
/// `Ord` 구현으로 심각도 비교가 가능합니다 (`None < Low < Medium < High < Critical`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// 점수 0 -- 영향 없음
    None,
    /// 낮은 심각도
    Low,
    /// 중간 심각도
    Medium,
    /// 높은 심각도
    High,
    /// 치명적
    Critical,
}

impl Severity {
    /// 문자열에서 심각도를 파싱합니다.
    ///
    /// 대소문자를 구분하지 않습니다.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" => Some(Self::None),
            "low" => Some(Self::Low),
            "medium" | "med" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" | "crit" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "NONE"),
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// CVSS v3 메트릭
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CvssV3 {
    /// CVSS 벡터 문자열 (예: `CVSS:3.1/AV:N/...`)
    pub vector: String,
    /// 기본 점수 (0.0이면 벡터 해석 실패)
    pub score: f64,
}

/// 버전 범위 이벤트
///
/// 정확히 하나의 변형만 값을 가집니다. 범위의 시작(introduced),
/// 수정 버전(fixed), 마지막 영향 버전(lastAffected) 중 하나입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Event {
    /// 이 버전부터 영향받음 ("0"은 처음부터)
    Introduced(String),
    /// 이 버전에서 수정됨
    Fixed(String),
    /// 마지막으로 영향받는 것으로 알려진 버전
    LastAffected(String),
}

/// 영향 버전 범위
///
/// 첫 이벤트는 항상 `introduced`이며, `fixed` 이벤트는 최대 하나,
/// `fixed`와 `lastAffected`는 같은 범위에 공존하지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    /// 범위 타입 ([`RANGE_TYPE_SEMVER`])
    pub range_type: String,
    /// 순서 있는 이벤트 목록
    pub events: Vec<Event>,
}

impl Range {
    /// `introduced` 이벤트의 값을 반환합니다.
    pub fn introduced_event(&self) -> Option<&str> {
        self.events.iter().find_map(|e| match e {
            Event::Introduced(v) => Some(v.as_str()),
            _ => None,
        })
    }

    /// `fixed` 이벤트의 값을 반환합니다.
    pub fn fixed_event(&self) -> Option<&str> {
        self.events.iter().find_map(|e| match e {
            Event::Fixed(v) => Some(v.as_str()),
            _ => None,
        })
    }

    /// `lastAffected` 이벤트의 값을 반환합니다.
    pub fn last_affected_event(&self) -> Option<&str> {
        self.events.iter().find_map(|e| match e {
            Event::LastAffected(v) => Some(v.as_str()),
            _ => None,
        })
    }
}

/// 취약한 컴포넌트/버전 그룹 하나
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Affected {
    /// 영향 버전 범위 목록
    pub ranges: Vec<Range>,
}

/// 병합/이벤트 빌드 전의 중간 버전 범위
///
/// `fixed`와 `last_affected`가 동시에 있을 수 있으나,
/// 이벤트 빌드 시 `fixed`가 우선하고 `last_affected`는 생략됩니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionSpan {
    /// 도입 버전 ("0"은 처음부터, 빈 문자열이면 이벤트 빌드에서 폐기)
    pub introduced: String,
    /// 수정 버전
    pub fixed: Option<String>,
    /// 마지막 영향 버전
    pub last_affected: Option<String>,
}

/// 정규화된 권고 레코드 하나
///
/// 피드 항목과 레지스트리 상세 레코드를 병합한 최종 출력 단위입니다.
/// 조립 후에는 변경되지 않으며, 컴포넌트나 영향 범위가 없으면 폐기됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advisory {
    /// CVE ID
    pub id: String,
    /// 게시 일자 (피드의 date_published)
    pub created_at: String,
    /// 정규화된 컴포넌트 식별자 ("organization/repository", 소문자)
    pub component: String,
    /// 영향 버전 그룹 목록
    pub affected: Vec<Affected>,
    /// 피드 요약
    pub summary: String,
    /// 레지스트리 설명 (영문)
    pub description: String,
    /// 권고 페이지 + 레지스트리 상세 페이지 URL
    pub urls: Vec<String>,
    /// CVSS v3 메트릭
    pub cvss_v3: CvssV3,
    /// 심각도 (벡터 해석 실패 시 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} affected={}",
            self.id,
            self.component,
            self.affected.len(),
        )
    }
}

/// 정규화된 취약점 데이터베이스 -- 수집 한 번의 전체 출력
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VulnDb {
    /// 권고 레코드 목록
    pub advisories: Vec<Advisory>,
}

impl VulnDb {
    /// 권고 레코드 수를 반환합니다.
    pub fn advisory_count(&self) -> usize {
        self.advisories.len()
    }

    /// JSON 문자열로 직렬화합니다.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// JSON 문자열에서 역직렬화합니다.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl fmt::Display for VulnDb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VulnDb({} advisories)", self.advisories.len())
    }
}
