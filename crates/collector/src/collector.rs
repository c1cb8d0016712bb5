//! 수집 오케스트레이터 -- 전체 수집 흐름 관리
//!
//! [`Collector`]는 인덱스 피드를 받아 항목마다 CVE ID를 확장하고,
//! 레지스트리 상세 레코드를 조회·정규화하여 권고 레코드를 조립한 뒤
//! 배치 전체를 검증합니다.
//!
//! # 실패 처리
//!
//! - 버전 필드 하나의 파싱 실패: 필드 스킵 (범위 빌더 내부)
//! - 상세 레코드 하나의 조회/파싱 실패, 컴포넌트/범위 없음: 권고 스킵
//! - 지원되지 않는 외부 URL: 해당 권고의 확장만 중단
//! - 검증 위반: 전체 집계가 에러로 반환 -- 데이터베이스는 반환되지 않음

use tracing::{debug, info, warn};

use crate::component;
use crate::config::CollectorConfig;
use crate::error::CollectorError;
use crate::feed::{self, FeedItem};
use crate::registry::{self, CveRecord};
use crate::scoring;
use crate::source::AdvisorySource;
use crate::types::{Advisory, CvssV3, Severity, VersionSpan, VulnDb};
use crate::validate;
use crate::version::{event, merge, range};

/// 상세 레코드 하나의 정규화 결과
#[derive(Debug, Default)]
pub struct NormalizedDetail {
    /// 레지스트리가 보고한 컴포넌트 이름 (추론 적용 후)
    pub component: String,
    /// 영문 설명
    pub description: String,
    /// 정규화된 버전 스팬 목록 (병합 패스 적용 후)
    pub spans: Vec<VersionSpan>,
    /// CVSS 메트릭
    pub cvss: CvssV3,
    /// 심각도
    pub severity: Option<Severity>,
}

/// 상세 레코드를 정규화합니다.
///
/// 영향 제품들의 버전 필드 전체를 스팬으로 변환하고, 시리즈 마커가
/// 있었다면 병합 패스를 수행합니다. 레지스트리 컴포넌트가 맨
/// "kubernetes" 라벨이면 설명 텍스트에서 추론을 시도합니다.
pub fn normalize_detail(record: &CveRecord) -> NormalizedDetail {
    let cna = &record.containers.cna;

    let mut fields = Vec::new();
    for product in &cna.affected {
        fields.extend(product.versions.iter().cloned());
    }

    let (spans, requires_merge) = range::build_spans(&fields);
    let spans = if requires_merge {
        merge::merge_series(spans)
    } else {
        spans
    };

    let description = registry::english_description(&cna.descriptions);

    let mut component = registry::primary_component(&cna.affected);
    if component.eq_ignore_ascii_case("kubernetes") {
        component = component::infer_component(&description)
            .unwrap_or_default()
            .to_owned();
    }

    let vector = registry::select_vector(&cna.metrics);
    let (severity, score) = match scoring::score_vector(&vector) {
        Some((severity, score)) => (Some(severity), score),
        None => (None, 0.0),
    };

    NormalizedDetail {
        component,
        description,
        spans,
        cvss: CvssV3 { vector, score },
        severity,
    }
}

/// 수집 오케스트레이터
///
/// 소스는 [`AdvisorySource`] 구현으로 주입됩니다. 권고 간에는 공유
/// 상태가 없으며, 권고 하나의 처리는 그 권고의 필드만으로 결정됩니다.
pub struct Collector<S> {
    /// 수집기 설정
    config: CollectorConfig,
    /// 피드/상세 레코드 소스
    source: S,
}

impl<S: AdvisorySource> Collector<S> {
    /// 새 수집기를 생성합니다.
    pub fn new(config: CollectorConfig, source: S) -> Self {
        Self { config, source }
    }

    /// 설정 참조를 반환합니다.
    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// 피드를 조회하고 데이터베이스를 구축·검증합니다.
    ///
    /// 검증이 깨끗하면 데이터베이스를, 위반이 있으면 전체 집계를
    /// [`CollectorError::Validation`]으로 반환합니다.
    pub async fn collect(&self) -> Result<VulnDb, CollectorError> {
        let raw = self.source.fetch_index().await?;
        self.build_db(&raw).await
    }

    /// 이미 조회된 피드 바이트에서 데이터베이스를 구축·검증합니다.
    pub async fn build_db(&self, raw_feed: &[u8]) -> Result<VulnDb, CollectorError> {
        let feed = feed::parse_feed(raw_feed)?;
        let run_id = uuid::Uuid::new_v4();
        info!(run = %run_id, items = feed.items.len(), "processing index feed");

        let mut advisories = Vec::new();
        for item in &feed.items {
            if self.config.exclude_ids.iter().any(|id| *id == item.id) {
                debug!(id = %item.id, "excluded advisory, skipping");
                continue;
            }

            for cve_id in feed::expand_ids(&item.id) {
                match self.process_item(item, &cve_id).await {
                    Ok(Some(advisory)) => {
                        metrics::counter!(crate::metrics::ADVISORIES_COLLECTED_TOTAL).increment(1);
                        advisories.push(advisory);
                    }
                    Ok(None) => {
                        debug!(cve = %cve_id, "no component or affected ranges, skipping");
                        metrics::counter!(crate::metrics::ADVISORIES_SKIPPED_TOTAL).increment(1);
                    }
                    Err(e) => {
                        warn!(cve = %cve_id, error = %e, "advisory skipped");
                        metrics::counter!(crate::metrics::ADVISORIES_SKIPPED_TOTAL).increment(1);
                    }
                }
            }
        }

        info!(run = %run_id, advisories = advisories.len(), "index feed processed");

        let db = VulnDb { advisories };
        validate::validate_db(&db)?;
        Ok(db)
    }

    /// 피드 항목 하나와 확장된 CVE ID 하나로 권고를 조립합니다.
    ///
    /// `Ok(None)`은 조용한 스킵(컴포넌트 또는 영향 범위 없음)입니다.
    async fn process_item(
        &self,
        item: &FeedItem,
        cve_id: &str,
    ) -> Result<Option<Advisory>, CollectorError> {
        if !item.external_url.starts_with(&self.config.registry_page_prefix) {
            return Err(CollectorError::UnsupportedSource {
                url: item.external_url.clone(),
            });
        }

        let raw = self.source.fetch_detail(cve_id).await?;
        let record = registry::parse_detail(&raw, cve_id)?;
        let detail = normalize_detail(&record);

        if detail.component.is_empty() || detail.spans.is_empty() {
            return Ok(None);
        }

        let feed_component = component::infer_component(&item.content_text).unwrap_or_default();
        let component = component::canonical_component(feed_component, &detail.component);

        let affected = event::build_affected(&detail.spans);
        if affected.is_empty() {
            return Ok(None);
        }

        Ok(Some(Advisory {
            id: cve_id.to_owned(),
            created_at: item.date_published.clone(),
            component,
            affected,
            summary: item.summary.clone(),
            description: detail.description,
            urls: vec![item.url.clone(), item.external_url.clone()],
            cvss_v3: detail.cvss,
            severity: detail.severity,
        }))
    }
}
