//! 수집기 설정 -- kubevulndb.toml 파싱 및 런타임 설정
//!
//! # 설정 로딩 우선순위
//!
//! 1. 환경변수 (`KUBEVULNDB_FEED_URL=...` 형식)
//! 2. 설정 파일 (`kubevulndb.toml`)
//! 3. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//!
//! ```
//! use kubevulndb_collector::CollectorConfig;
//!
//! // 기본값으로 생성
//! let config = CollectorConfig::default();
//! config.validate().unwrap();
//!
//! // 빌더로 생성
//! use kubevulndb_collector::CollectorConfigBuilder;
//!
//! let config = CollectorConfigBuilder::new()
//!     .request_timeout_secs(10)
//!     .build()
//!     .unwrap();
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CollectorError;

/// 요청 타임아웃 상한 (초)
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;
/// 응답 크기 상한 (100 MB)
const MAX_RESPONSE_BYTES_LIMIT: usize = 100 * 1024 * 1024;

/// 수집기 설정
///
/// # 필드
///
/// - **feed_url**: 공식 CVE 피드 (JSON Feed) URL
/// - **registry_api_url**: CVE 레지스트리 API 기본 URL (`{url}/{cve_id}`로 조회)
/// - **registry_page_prefix**: 피드 항목의 external_url이 가져야 하는 접두사.
///   일치하지 않으면 해당 권고는 지원되지 않는 소스로 건너뜁니다.
/// - **exclude_ids**: 코어 컴포넌트가 아닌 권고의 제외 목록
/// - **request_timeout_secs**: HTTP 요청 타임아웃 (초)
/// - **max_response_bytes**: 응답 본문 최대 허용 크기 (바이트)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// 공식 CVE 피드 URL
    pub feed_url: String,
    /// CVE 레지스트리 API 기본 URL
    pub registry_api_url: String,
    /// 허용되는 상세 페이지 URL 접두사
    pub registry_page_prefix: String,
    /// 제외할 권고 ID 목록
    pub exclude_ids: Vec<String>,
    /// HTTP 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
    /// 응답 본문 최대 크기 (바이트)
    pub max_response_bytes: usize,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            feed_url:
                "https://kubernetes.io/docs/reference/issues-security/official-cve-feed/index.json"
                    .to_owned(),
            registry_api_url: "https://cveawg.mitre.org/api/cve".to_owned(),
            registry_page_prefix: "https://www.cve.org/".to_owned(),
            // 코어 컴포넌트가 아닌 권고들
            exclude_ids: vec![
                "CVE-2019-11255".to_owned(),
                "CVE-2020-10749".to_owned(),
                "CVE-2020-8554".to_owned(),
            ],
            request_timeout_secs: 30,
            max_response_bytes: 20 * 1024 * 1024, // 20 MB
        }
    }
}

impl CollectorConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, CollectorError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, CollectorError> {
        let path = path.as_ref();
        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| CollectorError::Io {
                    path: path.display().to_string(),
                    source: e,
                })?;
        Self::parse(&content)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, CollectorError> {
        toml::from_str(toml_str).map_err(|e| CollectorError::Config {
            field: "toml".to_owned(),
            reason: e.to_string(),
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 네이밍 규칙: `KUBEVULNDB_{FIELD}` (예: `KUBEVULNDB_FEED_URL`)
    pub fn apply_env_overrides(&mut self) {
        override_string(&mut self.feed_url, "KUBEVULNDB_FEED_URL");
        override_string(&mut self.registry_api_url, "KUBEVULNDB_REGISTRY_API_URL");
        override_string(
            &mut self.registry_page_prefix,
            "KUBEVULNDB_REGISTRY_PAGE_PREFIX",
        );
        override_u64(
            &mut self.request_timeout_secs,
            "KUBEVULNDB_REQUEST_TIMEOUT_SECS",
        );
        override_usize(&mut self.max_response_bytes, "KUBEVULNDB_MAX_RESPONSE_BYTES");
    }

    /// 설정 값의 유효성을 검증합니다.
    ///
    /// # 검증 규칙
    ///
    /// - `feed_url`, `registry_api_url`: http(s) URL
    /// - `registry_page_prefix`: 비어있으면 안 됨
    /// - `request_timeout_secs`: 1-300
    /// - `max_response_bytes`: 1-104857600 (100MB)
    pub fn validate(&self) -> Result<(), CollectorError> {
        if !self.feed_url.starts_with("http") {
            return Err(CollectorError::Config {
                field: "feed_url".to_owned(),
                reason: "must be an http(s) url".to_owned(),
            });
        }
        if !self.registry_api_url.starts_with("http") {
            return Err(CollectorError::Config {
                field: "registry_api_url".to_owned(),
                reason: "must be an http(s) url".to_owned(),
            });
        }
        if self.registry_page_prefix.is_empty() {
            return Err(CollectorError::Config {
                field: "registry_page_prefix".to_owned(),
                reason: "must not be empty".to_owned(),
            });
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS {
            return Err(CollectorError::Config {
                field: "request_timeout_secs".to_owned(),
                reason: format!("must be 1-{MAX_REQUEST_TIMEOUT_SECS}"),
            });
        }
        if self.max_response_bytes == 0 || self.max_response_bytes > MAX_RESPONSE_BYTES_LIMIT {
            return Err(CollectorError::Config {
                field: "max_response_bytes".to_owned(),
                reason: format!("must be 1-{MAX_RESPONSE_BYTES_LIMIT}"),
            });
        }
        Ok(())
    }
}

fn override_string(target: &mut String, var: &str) {
    if let Ok(value) = std::env::var(var)
        && !value.is_empty()
    {
        *target = value;
    }
}

fn override_u64(target: &mut u64, var: &str) {
    if let Ok(value) = std::env::var(var)
        && let Ok(parsed) = value.parse()
    {
        *target = parsed;
    }
}

fn override_usize(target: &mut usize, var: &str) {
    if let Ok(value) = std::env::var(var)
        && let Ok(parsed) = value.parse()
    {
        *target = parsed;
    }
}

/// [`CollectorConfig`] 빌더
#[derive(Default)]
pub struct CollectorConfigBuilder {
    config: CollectorConfig,
}

impl CollectorConfigBuilder {
    /// 기본값을 가진 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self {
            config: CollectorConfig::default(),
        }
    }

    /// 피드 URL을 설정합니다.
    pub fn feed_url(mut self, url: impl Into<String>) -> Self {
        self.config.feed_url = url.into();
        self
    }

    /// 레지스트리 API URL을 설정합니다.
    pub fn registry_api_url(mut self, url: impl Into<String>) -> Self {
        self.config.registry_api_url = url.into();
        self
    }

    /// 상세 페이지 URL 접두사를 설정합니다.
    pub fn registry_page_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.registry_page_prefix = prefix.into();
        self
    }

    /// 제외 ID 목록을 설정합니다.
    pub fn exclude_ids(mut self, ids: Vec<String>) -> Self {
        self.config.exclude_ids = ids;
        self
    }

    /// 요청 타임아웃(초)을 설정합니다.
    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs;
        self
    }

    /// 응답 최대 크기(바이트)를 설정합니다.
    pub fn max_response_bytes(mut self, bytes: usize) -> Self {
        self.config.max_response_bytes = bytes;
        self
    }

    /// 설정을 검증하고 빌드합니다.
    ///
    /// # Errors
    ///
    /// 유효성 검증 실패 시 `CollectorError::Config` 반환
    pub fn build(self) -> Result<CollectorConfig, CollectorError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
