//! 수집기 에러 타입
//!
//! [`CollectorError`]는 수집 파이프라인에서 발생할 수 있는 모든 에러를 나타냅니다.
//!
//! # 에러 카테고리
//!
//! - **네트워크**: `HttpClient`, `Fetch`
//! - **파싱**: `FeedParse`, `DetailParse`
//! - **소스 게이트**: `UnsupportedSource`
//! - **설정**: `Config`
//! - **검증**: `Validation`
//! - **파일 I/O**: `Io`
//!
//! 버전 필드 하나가 파싱되지 않는 것은 에러가 아니라 로컬 스킵입니다.
//! 상세 레코드 하나가 쓸 수 없는 것은 해당 권고 하나의 스킵이며,
//! 배치 전체를 실패시키는 것은 [`Validation`](CollectorError::Validation)뿐입니다.

use crate::validate::ValidationReport;

/// 수집기 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum CollectorError {
    /// HTTP 클라이언트 구성 실패
    #[error("http client error: {0}")]
    HttpClient(String),

    /// 원격 리소스 조회 실패
    #[error("fetch error: {url}: {reason}")]
    Fetch {
        /// 요청 URL
        url: String,
        /// 실패 사유
        reason: String,
    },

    /// 인덱스 피드 파싱 실패
    #[error("feed parse error: {0}")]
    FeedParse(String),

    /// 레지스트리 상세 레코드 파싱 실패
    #[error("detail record parse error: {cve_id}: {reason}")]
    DetailParse {
        /// 대상 CVE ID
        cve_id: String,
        /// 파싱 실패 사유
        reason: String,
    },

    /// 알려진 레지스트리가 아닌 외부 URL
    #[error("unsupported detail record source: {url}")]
    UnsupportedSource {
        /// 피드 항목의 외부 URL
        url: String,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// 배치 검증 실패 -- 모든 위반 사항의 집계
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationReport),

    /// 파일 I/O 에러
    #[error("io error: {path}: {source}")]
    Io {
        /// 관련 파일 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::Violation;

    #[test]
    fn fetch_error_display() {
        let err = CollectorError::Fetch {
            url: "https://example.invalid/feed.json".to_owned(),
            reason: "connection refused".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("example.invalid"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn detail_parse_error_display() {
        let err = CollectorError::DetailParse {
            cve_id: "CVE-2024-0001".to_owned(),
            reason: "unexpected end of input".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("CVE-2024-0001"));
        assert!(msg.contains("unexpected end of input"));
    }

    #[test]
    fn unsupported_source_error_display() {
        let err = CollectorError::UnsupportedSource {
            url: "https://elsewhere.example/cve".to_owned(),
        };
        assert!(err.to_string().contains("elsewhere.example"));
    }

    #[test]
    fn config_error_display() {
        let err = CollectorError::Config {
            field: "request_timeout_secs".to_owned(),
            reason: "must be greater than 0".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("request_timeout_secs"));
        assert!(msg.contains("must be greater than 0"));
    }

    #[test]
    fn validation_report_converts_to_error() {
        let report = ValidationReport {
            violations: vec![Violation::missing_field("CVE-2024-0001", "summary")],
        };
        let err: CollectorError = report.into();
        assert!(matches!(err, CollectorError::Validation(_)));
        assert!(err.to_string().contains("validation failed"));
    }

    #[test]
    fn io_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = CollectorError::Io {
            path: "/tmp/vulndb.json".to_owned(),
            source: io_err,
        };
        assert!(err.to_string().contains("/tmp/vulndb.json"));
    }
}
