//! 조회 경계 -- 피드/상세 레코드 바이트 조회의 추상화
//!
//! [`AdvisorySource`]는 수집 엔진과 네트워크 사이의 유일한 경계입니다.
//! 엔진은 이미 디코딩된 바이트만 받으므로, 테스트에서는 픽스처 바이트를
//! 반환하는 인메모리 구현으로 대체할 수 있습니다.

use std::time::Duration;

use tracing::debug;

use crate::config::CollectorConfig;
use crate::error::CollectorError;

/// 권고 데이터 소스
///
/// 재시도나 백오프는 수행하지 않습니다. 실패는 호출 측에서
/// 권고 단위로 처리됩니다.
pub trait AdvisorySource: Send + Sync {
    /// 인덱스 피드 원시 바이트를 조회합니다.
    async fn fetch_index(&self) -> Result<Vec<u8>, CollectorError>;

    /// CVE ID 하나의 상세 레코드 원시 바이트를 조회합니다.
    async fn fetch_detail(&self, cve_id: &str) -> Result<Vec<u8>, CollectorError>;
}

/// HTTP 기반 소스
pub struct HttpAdvisorySource {
    /// 공유 HTTP 클라이언트
    client: reqwest::Client,
    /// 피드 URL
    feed_url: String,
    /// 레지스트리 API 기본 URL
    registry_api_url: String,
    /// 응답 본문 최대 크기
    max_response_bytes: usize,
}

impl HttpAdvisorySource {
    /// 설정으로부터 HTTP 소스를 생성합니다.
    pub fn new(config: &CollectorConfig) -> Result<Self, CollectorError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| CollectorError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            feed_url: config.feed_url.clone(),
            registry_api_url: config.registry_api_url.clone(),
            max_response_bytes: config.max_response_bytes,
        })
    }

    /// CVE ID의 상세 레코드 URL을 구성합니다.
    fn detail_url(&self, cve_id: &str) -> String {
        format!(
            "{}/{}",
            self.registry_api_url.trim_end_matches('/'),
            cve_id,
        )
    }

    async fn get(&self, url: &str) -> Result<Vec<u8>, CollectorError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CollectorError::Fetch {
                url: url.to_owned(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CollectorError::Fetch {
                url: url.to_owned(),
                reason: format!("status {status}"),
            });
        }

        let body = response.bytes().await.map_err(|e| CollectorError::Fetch {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;

        debug!(url = %url, status = status.as_u16(), bytes = body.len(), "fetched");

        if body.len() > self.max_response_bytes {
            return Err(CollectorError::Fetch {
                url: url.to_owned(),
                reason: format!(
                    "response size {} bytes exceeds maximum {} bytes",
                    body.len(),
                    self.max_response_bytes,
                ),
            });
        }

        Ok(body.to_vec())
    }
}

impl AdvisorySource for HttpAdvisorySource {
    async fn fetch_index(&self) -> Result<Vec<u8>, CollectorError> {
        self.get(&self.feed_url).await
    }

    async fn fetch_detail(&self, cve_id: &str) -> Result<Vec<u8>, CollectorError> {
        self.get(&self.detail_url(cve_id)).await
    }
}
