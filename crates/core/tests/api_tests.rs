//! Library API integration tests
use gist_core::*;
use mockito::{Matcher, Mock, Server, ServerGuard};

const SUMMARY: &str = "정부가 내년 예산안을 발표했다. 지역 균형 발전이 최우선 과제로 제시됐다. \
전문가들은 긍정적인 평가를 내놨다! 다만 재원 조달 방안은 아직 불분명하다는 지적이 나온다. \
국회 심사는 다음 달부터 시작된다.";

fn article_body(chars: usize) -> String {
    "가".repeat(chars)
}

fn article_wrap_page(chars: usize) -> String {
    format!(
        r#"<html><head><title>기사</title></head><body><nav>메뉴</nav><div id="articleWrap">{}</div></body></html>"#,
        article_body(chars)
    )
}

fn fallback_page() -> String {
    let para = "정부는 이날 발표에서, 내년부터 지역 균형 발전을 위한 예산을 대폭 늘리겠다고 밝혔다.";
    let body: String = (0..10).map(|_| format!("<p>{para}</p>")).collect();
    format!(r#"<html><body><header class="site-header">헤더</header><article class="news_body">{body}</article></body></html>"#)
}

async fn serve_page(server: &mut ServerGuard, path: &str, html: String) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(html)
        .create_async()
        .await
}

async fn serve_generator(server: &mut ServerGuard, summary: &str) -> (Mock, Mock) {
    let health = server.mock("GET", "/health").with_status(200).create_async().await;
    let generate = server
        .mock("POST", "/generate")
        .match_body(Matcher::PartialJson(serde_json::json!({ "model": DEFAULT_MODEL })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(serde_json::json!({ "generated_text": summary }).to_string())
        .expect_at_least(1)
        .create_async()
        .await;
    (health, generate)
}

fn pipeline_for(server: &ServerGuard) -> Pipeline {
    let generator = HttpGeneratorFactory::new(HttpGeneratorConfig { endpoint: server.url(), ..Default::default() });
    Pipeline::new(
        Extractor::default(),
        Summarizer::new(LazyGenerator::new(generator), DEFAULT_CACHE_CAPACITY),
    )
}

#[tokio::test]
async fn test_chars_mode_end_to_end() {
    let mut server = Server::new_async().await;
    let _page = serve_page(&mut server, "/news/1", article_wrap_page(800)).await;
    let (_health, generate) = serve_generator(&mut server, SUMMARY).await;

    let pipeline = pipeline_for(&server);
    let url = format!("{}/news/1", server.url());
    let result = pipeline.run(&url, &TargetSet::Chars.targets()).await.unwrap();

    assert_eq!(result.id.len(), 12);
    for target in TargetSet::Chars.targets() {
        let SummaryTarget::ByChars(budget) = target else { unreachable!() };
        let text = result.get(target).unwrap();
        assert!(text.chars().count() <= budget, "{target} is {} chars", text.chars().count());
        assert!(!text.is_empty());
        assert!(SUMMARY.contains(text));
    }
    assert!(result.get(SummaryTarget::ByChars(100)).unwrap().starts_with("정부가 내년 예산안을 발표했다."));
    assert!(pipeline.summarizer().is_loaded());

    let json = serde_json::to_value(&result).unwrap();
    let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys.len(), 4);
    for key in ["id", "chars100", "chars200", "chars300"] {
        assert!(keys.contains(&key));
    }

    generate.assert_async().await;
}

#[tokio::test]
async fn test_lines_mode_shares_one_generation() {
    let mut server = Server::new_async().await;
    let _page = serve_page(&mut server, "/news/2", article_wrap_page(500)).await;
    let _health = server.mock("GET", "/health").with_status(200).create_async().await;
    let generate = server
        .mock("POST", "/generate")
        .match_body(Matcher::PartialJson(serde_json::json!({ "parameters": { "max_length": 420 } })))
        .with_status(200)
        .with_body(serde_json::json!([{ "generated_text": SUMMARY }]).to_string())
        .expect(1)
        .create_async()
        .await;

    let pipeline = pipeline_for(&server);
    let result = pipeline
        .run(&format!("{}/news/2", server.url()), &TargetSet::Lines.targets())
        .await
        .unwrap();

    assert_eq!(result.get(SummaryTarget::ByLines(3)).unwrap().lines().count(), 3);
    assert_eq!(result.get(SummaryTarget::ByLines(5)).unwrap().lines().count(), 5);
    assert_eq!(result.get(SummaryTarget::ByLines(8)).unwrap().lines().count(), 5);
    assert_eq!(
        result.get(SummaryTarget::ByLines(3)).unwrap(),
        "정부가 내년 예산안을 발표했다.\n지역 균형 발전이 최우선 과제로 제시됐다.\n전문가들은 긍정적인 평가를 내놨다!"
    );

    generate.assert_async().await;
}

#[tokio::test]
async fn test_same_url_same_id_and_cached() {
    let mut server = Server::new_async().await;
    let _page = serve_page(&mut server, "/news/3", article_wrap_page(400)).await;
    let health = server.mock("GET", "/health").with_status(200).expect(1).create_async().await;
    let generate = server
        .mock("POST", "/generate")
        .with_status(200)
        .with_body(serde_json::json!({ "generated_text": SUMMARY }).to_string())
        .expect(3)
        .create_async()
        .await;

    let pipeline = pipeline_for(&server);
    let url = format!("{}/news/3", server.url());
    let first = pipeline.run(&url, &TargetSet::Chars.targets()).await.unwrap();
    let second = pipeline.run(&url, &TargetSet::Chars.targets()).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.id, fingerprint(&url, first.get(SummaryTarget::ByChars(100)).unwrap()));
    health.assert_async().await;
    generate.assert_async().await;
}

#[tokio::test]
async fn test_readability_fallback_end_to_end() {
    let mut server = Server::new_async().await;
    let _page = serve_page(&mut server, "/story", fallback_page()).await;

    let url = format!("{}/story", server.url());
    let source = Extractor::default().extract(&url).await.unwrap();
    assert!(source.text().contains("지역 균형 발전"));
    assert!(!source.text().contains("헤더"));
    assert_eq!(source.text().lines().count(), 10);
}

#[tokio::test]
async fn test_min_length_boundary() {
    let mut server = Server::new_async().await;
    let _short = serve_page(&mut server, "/short", article_wrap_page(299)).await;
    let _long = serve_page(&mut server, "/long", article_wrap_page(301)).await;

    let extractor = Extractor::default();

    let err = extractor.extract(&format!("{}/short", server.url())).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ContentTooShort);

    let ok = extractor.extract(&format!("{}/long", server.url())).await.unwrap();
    assert_eq!(ok.char_count(), 301);
}

#[tokio::test]
async fn test_extraction_failures_skip_generation() {
    let mut server = Server::new_async().await;
    let _missing = server.mock("GET", "/missing").with_status(404).create_async().await;
    let health = server.mock("GET", "/health").expect(0).create_async().await;

    let pipeline = pipeline_for(&server);
    let err = pipeline
        .run(&format!("{}/missing", server.url()), &TargetSet::Chars.targets())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Extraction);
    assert!(err.to_string().contains("404"));
    assert!(!pipeline.summarizer().is_loaded());
    health.assert_async().await;
}

#[tokio::test]
async fn test_capability_unavailable_end_to_end() {
    let mut server = Server::new_async().await;
    let _page = serve_page(&mut server, "/news/4", article_wrap_page(400)).await;
    let _health = server.mock("GET", "/health").with_status(503).create_async().await;

    let pipeline = pipeline_for(&server);
    let err = pipeline
        .run(&format!("{}/news/4", server.url()), &TargetSet::Chars.targets())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::CapabilityUnavailable);
    assert!(err.to_string().contains(DEFAULT_MODEL));
}

#[test]
fn test_sentence_and_packing_api() {
    let sentences = split_sentences("첫 문장입니다. 두 번째 문장?! 세 번째");
    assert_eq!(sentences, vec!["첫 문장입니다.", "두 번째 문장?!", "세 번째"]);

    assert_eq!(pack_by_chars("첫 문장입니다. 두 번째 문장?! 세 번째", 10), "첫 문장입니다.");
    assert_eq!(pack_by_lines("하나. 둘. 셋.", 2), "하나.\n둘.");
    assert_eq!(SummaryTarget::ByLines(2).postprocess("하나. 둘. 셋."), "하나.\n둘.");
}

#[test]
fn test_custom_site_strategy() {
    let strategies: Vec<Box<dyn ExtractionStrategy>> = vec![
        Box::new(SelectorStrategy::new("#dic_area").for_hosts(["naver.com"])),
        Box::new(ReadabilityStrategy::default()),
    ];
    let extractor = Extractor::with_strategies(ExtractConfig::default(), strategies);
    let html = format!(r#"<html><body><div id="dic_area">{}</div></body></html>"#, article_body(320));

    let doc = extractor.extract_from_html("https://n.news.naver.com/article/1", &html).unwrap();
    assert_eq!(doc.char_count(), 320);

    let err = extractor.extract_from_html("https://example.com/article/1", &html).unwrap_err();
    assert_eq!(err, GistError::Unreachable);
}
