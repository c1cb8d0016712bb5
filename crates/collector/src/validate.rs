//! 배치 검증 -- 조립된 권고 목록의 구조적 완결성 검사
//!
//! 각 권고를 독립적으로 검사하며, 첫 위반에서 중단하지 않고
//! 모든 위반을 수집합니다. 배치 전체의 위반이 하나의
//! [`ValidationReport`]로 집계되어 호출 측에 반환됩니다.
//! 빈 배치는 실패가 아닙니다.

use std::fmt;

use crate::component::is_known_organization;
use crate::types::{Advisory, VulnDb};
use crate::version::parse_dotted;

/// 위반 종류
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// 필수 필드 누락 (필드명)
    MissingField(String),
    /// organization 접두사가 인식되지 않거나 repository 접미사가 빈 식별자
    MalformedComponent(String),
    /// 영향 범위 없음
    NoAffectedRanges,
    /// introduced 값이 점 구분 숫자 버전으로 파싱되지 않음
    UnparseableIntroduced(String),
    /// CVSS 점수 0
    ZeroCvssScore,
    /// CVSS 벡터 빈 문자열
    EmptyCvssVector,
    /// 심각도 없음
    MissingSeverity,
    /// URL 목록 빈 상태
    EmptyUrls,
}

/// 권고 하나에 대한 위반 하나
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// 대상 권고 ID
    pub advisory_id: String,
    /// 위반 종류
    pub kind: ViolationKind,
}

impl Violation {
    /// 필드 누락 위반을 생성합니다.
    pub fn missing_field(advisory_id: &str, field: &str) -> Self {
        Self {
            advisory_id: advisory_id.to_owned(),
            kind: ViolationKind::MissingField(field.to_owned()),
        }
    }

    fn new(advisory_id: &str, kind: ViolationKind) -> Self {
        Self {
            advisory_id: advisory_id.to_owned(),
            kind,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = &self.advisory_id;
        match &self.kind {
            ViolationKind::MissingField(field) => {
                write!(f, "{field} is missing on advisory #{id}")
            }
            ViolationKind::MalformedComponent(component) => {
                write!(f, "component '{component}' is malformed on advisory #{id}")
            }
            ViolationKind::NoAffectedRanges => {
                write!(f, "affected ranges are missing on advisory #{id}")
            }
            ViolationKind::UnparseableIntroduced(version) => {
                write!(f, "introduced version '{version}' is invalid on advisory #{id}")
            }
            ViolationKind::ZeroCvssScore => write!(f, "cvss score is missing on advisory #{id}"),
            ViolationKind::EmptyCvssVector => write!(f, "cvss vector is missing on advisory #{id}"),
            ViolationKind::MissingSeverity => write!(f, "severity is missing on advisory #{id}"),
            ViolationKind::EmptyUrls => write!(f, "urls are missing on advisory #{id}"),
        }
    }
}

/// 배치 전체의 위반 집계
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// 모든 권고의 모든 위반
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// 위반 수를 반환합니다.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// 위반이 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// 특정 권고에 대한 위반들을 반환합니다.
    pub fn for_advisory(&self, advisory_id: &str) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| v.advisory_id == advisory_id)
            .collect()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} violation(s)", self.violations.len())?;
        for violation in &self.violations {
            write!(f, "\n  - {violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

/// 데이터베이스 전체를 검증합니다.
///
/// 모든 권고의 모든 위반을 수집한 뒤, 하나라도 있으면
/// [`ValidationReport`]를 에러로 반환합니다.
pub fn validate_db(db: &VulnDb) -> Result<(), ValidationReport> {
    let mut violations = Vec::new();
    for advisory in &db.advisories {
        check_advisory(advisory, &mut violations);
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationReport { violations })
    }
}

fn check_advisory(advisory: &Advisory, violations: &mut Vec<Violation>) {
    let id = advisory.id.as_str();

    if advisory.id.is_empty() {
        violations.push(Violation::missing_field(id, "id"));
    }
    if advisory.created_at.is_empty() {
        violations.push(Violation::missing_field(id, "createdAt"));
    }
    if advisory.summary.is_empty() {
        violations.push(Violation::missing_field(id, "summary"));
    }
    if !component_is_well_formed(&advisory.component) {
        violations.push(Violation::new(
            id,
            ViolationKind::MalformedComponent(advisory.component.clone()),
        ));
    }
    if advisory.description.is_empty() {
        violations.push(Violation::missing_field(id, "description"));
    }
    if advisory.affected.is_empty() {
        violations.push(Violation::new(id, ViolationKind::NoAffectedRanges));
    } else {
        for affected in &advisory.affected {
            for range in &affected.ranges {
                let introduced = range.introduced_event().unwrap_or_default();
                if parse_dotted(introduced).is_none() {
                    violations.push(Violation::new(
                        id,
                        ViolationKind::UnparseableIntroduced(introduced.to_owned()),
                    ));
                }
            }
        }
    }
    if advisory.cvss_v3.score == 0.0 {
        violations.push(Violation::new(id, ViolationKind::ZeroCvssScore));
    }
    if advisory.cvss_v3.vector.is_empty() {
        violations.push(Violation::new(id, ViolationKind::EmptyCvssVector));
    }
    if advisory.severity.is_none() {
        violations.push(Violation::new(id, ViolationKind::MissingSeverity));
    }
    if advisory.urls.is_empty() {
        violations.push(Violation::new(id, ViolationKind::EmptyUrls));
    }
}

/// 인식된 organization 접두사와 비어있지 않은 repository 접미사를 요구합니다.
fn component_is_well_formed(component: &str) -> bool {
    match component.split_once('/') {
        Some((org, repo)) => is_known_organization(org) && !repo.is_empty(),
        None => false,
    }
}
