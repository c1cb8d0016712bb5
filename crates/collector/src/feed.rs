//! 인덱스 피드 -- 공식 CVE 피드(JSON Feed)의 역직렬화와 ID 확장
//!
//! 피드 항목 하나가 여러 CVE ID를 묶는 경우가 있어
//! [`expand_ids`]로 개별 ID로 확장한 뒤 각각 상세 레코드를 조회합니다.

use serde::Deserialize;

use crate::error::CollectorError;

/// 인덱스 피드 전체
#[derive(Debug, Default, Deserialize)]
pub struct IndexFeed {
    /// 피드 항목 목록
    #[serde(default)]
    pub items: Vec<FeedItem>,
}

/// 피드 항목 하나 -- 권고 요약
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedItem {
    /// 원시 ID (여러 CVE ID를 묶을 수 있음)
    #[serde(default)]
    pub id: String,
    /// 공식 권고 페이지 URL
    #[serde(default)]
    pub url: String,
    /// 레지스트리 상세 페이지 URL
    #[serde(default)]
    pub external_url: String,
    /// 요약
    #[serde(default)]
    pub summary: String,
    /// 게시 일자
    #[serde(default)]
    pub date_published: String,
    /// 본문 텍스트 (컴포넌트 추론에 사용)
    #[serde(default)]
    pub content_text: String,
}

/// 피드 바이트를 파싱합니다.
pub fn parse_feed(raw: &[u8]) -> Result<IndexFeed, CollectorError> {
    serde_json::from_slice(raw).map_err(|e| CollectorError::FeedParse(e.to_string()))
}

/// 원시 피드 ID를 개별 CVE ID 목록으로 확장합니다.
///
/// 쉼표/공백으로 구분된 `CVE-` 토큰을 추출하며,
/// 하나도 없으면 원본 ID를 그대로 반환합니다.
pub fn expand_ids(raw_id: &str) -> Vec<String> {
    let ids: Vec<String> = raw_id
        .split([',', ' '])
        .map(str::trim)
        .filter(|token| token.starts_with("CVE-"))
        .map(str::to_owned)
        .collect();

    if ids.is_empty() && !raw_id.trim().is_empty() {
        return vec![raw_id.trim().to_owned()];
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_FEED: &str = r#"{
        "version": "https://jsonfeed.org/version/1.1",
        "title": "Official CVE Feed",
        "items": [
            {
                "id": "CVE-2023-2727",
                "url": "https://example.test/advisories/cve-2023-2727",
                "external_url": "https://www.cve.org/CVERecord?id=CVE-2023-2727",
                "summary": "Bypassing policies via ephemeral containers",
                "date_published": "2023-06-16T09:24:00Z",
                "content_text": "Users may be able to launch containers in kube-apiserver."
            }
        ]
    }"#;

    #[test]
    fn parses_feed_items() {
        let feed = parse_feed(SAMPLE_FEED.as_bytes()).unwrap();
        assert_eq!(feed.items.len(), 1);

        let item = &feed.items[0];
        assert_eq!(item.id, "CVE-2023-2727");
        assert!(item.external_url.starts_with("https://www.cve.org/"));
        assert_eq!(item.date_published, "2023-06-16T09:24:00Z");
    }

    #[test]
    fn invalid_feed_is_a_feed_parse_error() {
        assert!(matches!(
            parse_feed(b"{ broken"),
            Err(CollectorError::FeedParse(_))
        ));
    }

    #[test]
    fn single_id_expands_to_itself() {
        assert_eq!(expand_ids("CVE-2020-8554"), vec!["CVE-2020-8554"]);
    }

    #[test]
    fn bundled_ids_expand_individually() {
        let ids = expand_ids("CVE-2019-9512, CVE-2019-9514");
        assert_eq!(ids, vec!["CVE-2019-9512", "CVE-2019-9514"]);
    }

    #[test]
    fn space_separated_ids_expand() {
        let ids = expand_ids("CVE-2019-9512 CVE-2019-9514");
        assert_eq!(ids, vec!["CVE-2019-9512", "CVE-2019-9514"]);
    }

    #[test]
    fn non_cve_id_passes_through_verbatim() {
        assert_eq!(expand_ids("GHSA-xxxx-yyyy"), vec!["GHSA-xxxx-yyyy"]);
    }

    #[test]
    fn empty_id_expands_to_nothing() {
        assert!(expand_ids("").is_empty());
        assert!(expand_ids("   ").is_empty());
    }
}
