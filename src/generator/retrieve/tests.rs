#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use crate::config::RetrieverConfig;
    use crate::error::PipelineError;
    use crate::generator::retrieve::{
        KnowledgeBase, WikipediaClient, get_reference_documents, parse_page_document,
        parse_search_titles,
    };
    use crate::types::ReferenceDocument;

    /// 预置搜索命中与条目内容的假知识库，同时记录收到的搜索词
    struct FakeKnowledgeBase {
        titles: Vec<String>,
        pages: HashMap<String, ReferenceDocument>,
        failing_titles: Vec<String>,
        seen_queries: Mutex<Vec<String>>,
    }

    impl FakeKnowledgeBase {
        fn new(titles: Vec<&str>) -> Self {
            Self {
                titles: titles.into_iter().map(String::from).collect(),
                pages: HashMap::new(),
                failing_titles: Vec::new(),
                seen_queries: Mutex::new(Vec::new()),
            }
        }

        fn with_page(mut self, title: &str, url: &str, text: &str) -> Self {
            self.pages.insert(
                title.to_string(),
                ReferenceDocument {
                    url: url.to_string(),
                    text: text.to_string(),
                },
            );
            self
        }

        fn with_failing(mut self, title: &str) -> Self {
            self.failing_titles.push(title.to_string());
            self
        }
    }

    #[async_trait]
    impl KnowledgeBase for FakeKnowledgeBase {
        async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, PipelineError> {
            self.seen_queries.lock().unwrap().push(query.to_string());
            Ok(self.titles.iter().take(limit).cloned().collect())
        }

        async fn resolve(
            &self,
            title: &str,
        ) -> Result<Option<ReferenceDocument>, PipelineError> {
            if self.failing_titles.iter().any(|t| t == title) {
                return Err(PipelineError::ProviderUnavailable("503".to_string()));
            }
            Ok(self.pages.get(title).cloned())
        }
    }

    #[test]
    fn test_client_construction_honors_config() {
        // 超时与User-Agent来自配置，构造失败必须向上传播而不是静默降级
        assert!(WikipediaClient::new(&RetrieverConfig::default()).is_ok());
    }

    #[test]
    fn test_parse_search_titles_preserves_rank_order() {
        let body = json!({
            "query": {
                "search": [
                    {"title": "Cybersecurity", "pageid": 100},
                    {"title": "Computer security", "pageid": 101},
                    {"title": "Information security", "pageid": 102}
                ]
            }
        });

        assert_eq!(
            parse_search_titles(&body),
            vec!["Cybersecurity", "Computer security", "Information security"]
        );
    }

    #[test]
    fn test_parse_search_titles_empty_result() {
        let body = json!({"query": {"search": []}});
        assert!(parse_search_titles(&body).is_empty());

        let malformed = json!({"batchcomplete": ""});
        assert!(parse_search_titles(&malformed).is_empty());
    }

    #[test]
    fn test_parse_page_document_extracts_text_and_url() {
        let body = json!({
            "query": {
                "pages": {
                    "9611": {
                        "pageid": 9611,
                        "title": "Cybersecurity",
                        "extract": "Computer security is the protection of computer systems.",
                        "fullurl": "https://en.wikipedia.org/wiki/Computer_security"
                    }
                }
            }
        });

        let doc = parse_page_document(&body).unwrap();
        assert_eq!(doc.url, "https://en.wikipedia.org/wiki/Computer_security");
        assert!(doc.text.starts_with("Computer security"));
    }

    #[test]
    fn test_parse_page_document_missing_page() {
        let body = json!({
            "query": {
                "pages": {
                    "-1": {"title": "Nonexistent topic", "missing": ""}
                }
            }
        });
        assert!(parse_page_document(&body).is_none());
    }

    #[test]
    fn test_parse_page_document_empty_extract() {
        let body = json!({
            "query": {
                "pages": {
                    "42": {
                        "pageid": 42,
                        "title": "Stub",
                        "extract": "   ",
                        "fullurl": "https://en.wikipedia.org/wiki/Stub"
                    }
                }
            }
        });
        assert!(parse_page_document(&body).is_none());
    }

    #[tokio::test]
    async fn test_get_reference_documents_keeps_rank_order() {
        let kb = FakeKnowledgeBase::new(vec!["A", "B", "C"])
            .with_page("A", "https://example.org/A", "alpha text")
            .with_page("B", "https://example.org/B", "beta text")
            .with_page("C", "https://example.org/C", "gamma text");

        let docs = get_reference_documents(&kb, "Cybersecurity", 5).await.unwrap();
        let urls: Vec<&str> = docs.iter().map(|d| d.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://example.org/A",
                "https://example.org/B",
                "https://example.org/C"
            ]
        );
    }

    #[tokio::test]
    async fn test_get_reference_documents_drops_missing_and_failing() {
        let kb = FakeKnowledgeBase::new(vec!["A", "Gone", "Broken", "B"])
            .with_page("A", "https://example.org/A", "alpha text")
            .with_page("B", "https://example.org/B", "beta text")
            .with_failing("Broken");

        let docs = get_reference_documents(&kb, "Banking", 5).await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].url, "https://example.org/A");
        assert_eq!(docs[1].url, "https://example.org/B");
    }

    #[tokio::test]
    async fn test_search_query_is_passed_verbatim() {
        // 校验通过的行业名原样下发给搜索后端，不追加任何后缀
        let kb = FakeKnowledgeBase::new(vec!["A"]).with_page(
            "A",
            "https://example.org/A",
            "alpha text",
        );

        get_reference_documents(&kb, "Cybersecurity", 5).await.unwrap();
        assert_eq!(
            *kb.seen_queries.lock().unwrap(),
            vec!["Cybersecurity".to_string()]
        );
    }

    #[tokio::test]
    async fn test_get_reference_documents_empty_is_ok() {
        let kb = FakeKnowledgeBase::new(vec![]);
        let docs = get_reference_documents(&kb, "flurbo dynamics", 5).await.unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn test_get_reference_documents_respects_max_sources() {
        let kb = FakeKnowledgeBase::new(vec!["A", "B", "C"])
            .with_page("A", "https://example.org/A", "alpha text")
            .with_page("B", "https://example.org/B", "beta text")
            .with_page("C", "https://example.org/C", "gamma text");

        let docs = get_reference_documents(&kb, "Banking", 2).await.unwrap();
        assert_eq!(docs.len(), 2);
    }
}
