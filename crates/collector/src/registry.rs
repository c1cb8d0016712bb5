//! CVE 레지스트리 상세 레코드 -- CVE Record v5 JSON의 역직렬화 뷰
//!
//! 레지스트리 API가 반환하는 레코드 중 수집에 필요한 부분만 타입으로
//! 모델링합니다. 알 수 없는 필드는 무시되고, 누락 필드는 기본값입니다.

use serde::Deserialize;

use crate::error::CollectorError;

/// CVE 레지스트리 상세 레코드
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CveRecord {
    /// 레코드 메타데이터
    #[serde(default)]
    pub cve_metadata: CveMetadata,
    /// 컨테이너 (CNA 블록)
    #[serde(default)]
    pub containers: Containers,
}

/// 레코드 메타데이터
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CveMetadata {
    /// CVE ID
    #[serde(default)]
    pub cve_id: String,
}

/// 컨테이너 블록
#[derive(Debug, Default, Deserialize)]
pub struct Containers {
    /// CNA 제공 데이터
    #[serde(default)]
    pub cna: Cna,
}

/// CNA 블록 -- 영향 제품, 설명, 메트릭
#[derive(Debug, Default, Deserialize)]
pub struct Cna {
    /// 영향 제품 목록
    #[serde(default)]
    pub affected: Vec<AffectedProduct>,
    /// 다국어 설명 목록
    #[serde(default)]
    pub descriptions: Vec<Description>,
    /// CVSS 메트릭 목록
    #[serde(default)]
    pub metrics: Vec<MetricEntry>,
}

/// 영향 제품 하나
#[derive(Debug, Default, Deserialize)]
pub struct AffectedProduct {
    /// 제품명 (컴포넌트 이름으로 사용)
    #[serde(default)]
    pub product: String,
    /// 벤더명
    #[serde(default)]
    pub vendor: String,
    /// 원시 버전 필드 목록
    #[serde(default)]
    pub versions: Vec<RawVersionField>,
}

/// 권고의 영향 버전 목록 항목 하나 -- 정제 전의 원시 형태
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVersionField {
    /// 상태 -- `"affected"`만 처리 대상
    #[serde(default)]
    pub status: String,
    /// 버전 문자열 (비교 연산자 텍스트나 와일드카드 포함 가능)
    #[serde(default)]
    pub version: String,
    /// 배타 상한
    #[serde(default)]
    pub less_than: String,
    /// 포함 상한
    #[serde(default)]
    pub less_than_or_equal: String,
    /// 버전 타입 표기 (예: "semver")
    #[serde(default)]
    pub version_type: String,
}

/// 다국어 설명 항목
#[derive(Debug, Default, Deserialize)]
pub struct Description {
    /// 언어 코드
    #[serde(default)]
    pub lang: String,
    /// 설명 본문
    #[serde(default)]
    pub value: String,
}

/// 메트릭 항목 -- v3.0과 v3.1 벡터를 모두 담을 수 있음
#[derive(Debug, Default, Deserialize)]
pub struct MetricEntry {
    /// CVSS v3.1 메트릭
    #[serde(default, rename = "cvssV3_1")]
    pub cvss_v3_1: CvssMetric,
    /// CVSS v3.0 메트릭
    #[serde(default, rename = "cvssV3_0")]
    pub cvss_v3_0: CvssMetric,
}

/// CVSS 메트릭의 벡터 문자열
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvssMetric {
    /// 벡터 문자열
    #[serde(default)]
    pub vector_string: String,
}

/// 상세 레코드 바이트를 파싱합니다.
pub fn parse_detail(raw: &[u8], cve_id: &str) -> Result<CveRecord, CollectorError> {
    serde_json::from_slice(raw).map_err(|e| CollectorError::DetailParse {
        cve_id: cve_id.to_owned(),
        reason: e.to_string(),
    })
}

/// 영문 설명을 선택합니다. 없으면 빈 문자열.
pub fn english_description(descriptions: &[Description]) -> String {
    descriptions
        .iter()
        .find(|d| d.lang == "en")
        .map(|d| d.value.clone())
        .unwrap_or_default()
}

/// 메트릭 목록에서 CVSS 벡터를 선택합니다.
///
/// 각 항목에서 v3.0 벡터를 우선하고 비어있으면 v3.1로 대체하며,
/// 목록의 마지막 항목이 최종값이 됩니다.
pub fn select_vector(metrics: &[MetricEntry]) -> String {
    let mut vector = String::new();
    for metric in metrics {
        vector = if metric.cvss_v3_0.vector_string.is_empty() {
            metric.cvss_v3_1.vector_string.clone()
        } else {
            metric.cvss_v3_0.vector_string.clone()
        };
    }
    vector
}

/// 첫 영향 제품의 이름을 컴포넌트로 선택합니다.
pub fn primary_component(affected: &[AffectedProduct]) -> String {
    affected
        .iter()
        .map(|a| a.product.as_str())
        .find(|p| !p.is_empty())
        .unwrap_or_default()
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RECORD: &str = r#"{
        "cveMetadata": { "cveId": "CVE-2023-2727" },
        "containers": {
            "cna": {
                "affected": [
                    {
                        "vendor": "Kubernetes",
                        "product": "kube-apiserver",
                        "versions": [
                            { "status": "affected", "version": "1.27.0", "lessThan": "1.27.3", "versionType": "semver" },
                            { "status": "unaffected", "version": "1.24.0" }
                        ]
                    }
                ],
                "descriptions": [
                    { "lang": "de", "value": "Beschreibung" },
                    { "lang": "en", "value": "Users may bypass policies." }
                ],
                "metrics": [
                    {
                        "cvssV3_1": { "vectorString": "CVSS:3.1/AV:N/AC:L/PR:H/UI:N/S:U/C:H/I:H/A:N" }
                    }
                ]
            }
        }
    }"#;

    #[test]
    fn parses_record_fields() {
        let record = parse_detail(SAMPLE_RECORD.as_bytes(), "CVE-2023-2727").unwrap();
        assert_eq!(record.cve_metadata.cve_id, "CVE-2023-2727");
        assert_eq!(record.containers.cna.affected.len(), 1);

        let product = &record.containers.cna.affected[0];
        assert_eq!(product.product, "kube-apiserver");
        assert_eq!(product.versions.len(), 2);
        assert_eq!(product.versions[0].less_than, "1.27.3");
        assert_eq!(product.versions[1].status, "unaffected");
    }

    #[test]
    fn invalid_json_is_a_detail_parse_error() {
        let result = parse_detail(b"not json", "CVE-2024-0001");
        assert!(matches!(
            result,
            Err(CollectorError::DetailParse { cve_id, .. }) if cve_id == "CVE-2024-0001"
        ));
    }

    #[test]
    fn english_description_selected() {
        let record = parse_detail(SAMPLE_RECORD.as_bytes(), "CVE-2023-2727").unwrap();
        let description = english_description(&record.containers.cna.descriptions);
        assert_eq!(description, "Users may bypass policies.");
    }

    #[test]
    fn missing_english_description_is_empty() {
        let descriptions = vec![Description {
            lang: "fr".to_owned(),
            value: "Description".to_owned(),
        }];
        assert_eq!(english_description(&descriptions), "");
    }

    #[test]
    fn vector_prefers_v30_within_an_entry() {
        let metrics = vec![MetricEntry {
            cvss_v3_1: CvssMetric {
                vector_string: "CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H".to_owned(),
            },
            cvss_v3_0: CvssMetric {
                vector_string: "CVSS:3.0/AV:N/AC:L/PR:N/UI:N/S:U/C:L/I:N/A:N".to_owned(),
            },
        }];
        assert!(select_vector(&metrics).starts_with("CVSS:3.0/"));
    }

    #[test]
    fn vector_falls_back_to_v31() {
        let metrics = vec![MetricEntry {
            cvss_v3_1: CvssMetric {
                vector_string: "CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H".to_owned(),
            },
            cvss_v3_0: CvssMetric::default(),
        }];
        assert!(select_vector(&metrics).starts_with("CVSS:3.1/"));
    }

    #[test]
    fn last_metric_entry_wins() {
        let metrics = vec![
            MetricEntry {
                cvss_v3_1: CvssMetric {
                    vector_string: "CVSS:3.1/first".to_owned(),
                },
                cvss_v3_0: CvssMetric::default(),
            },
            MetricEntry {
                cvss_v3_1: CvssMetric {
                    vector_string: "CVSS:3.1/second".to_owned(),
                },
                cvss_v3_0: CvssMetric::default(),
            },
        ];
        assert_eq!(select_vector(&metrics), "CVSS:3.1/second");
    }

    #[test]
    fn primary_component_takes_first_non_empty_product() {
        let affected = vec![
            AffectedProduct {
                product: String::new(),
                vendor: "Kubernetes".to_owned(),
                versions: vec![],
            },
            AffectedProduct {
                product: "kubelet".to_owned(),
                vendor: "Kubernetes".to_owned(),
                versions: vec![],
            },
        ];
        assert_eq!(primary_component(&affected), "kubelet");
    }

    #[test]
    fn empty_metrics_yield_empty_vector() {
        assert_eq!(select_vector(&[]), "");
    }
}
