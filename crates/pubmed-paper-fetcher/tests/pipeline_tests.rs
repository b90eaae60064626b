//! End-to-end pipeline tests: mock E-utilities in, CSV file out.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pubmed_paper_fetcher::client::PubMedClient;
use pubmed_paper_fetcher::config::Config;
use pubmed_paper_fetcher::error::PipelineError;
use pubmed_paper_fetcher::pipeline;

fn article_xml(pmid: &str, title: &str, affiliation: &str) -> String {
    format!(
        "<PubmedArticleSet><PubmedArticle><MedlineCitation>\
         <PMID>{pmid}</PMID>\
         <DateCompleted><Year>2022</Year><Month>05</Month></DateCompleted>\
         <Article><ArticleTitle>{title}</ArticleTitle><AuthorList>\
         <Author><LastName>Ito</LastName><ForeName>Ken</ForeName>\
         <AffiliationInfo><Affiliation>{affiliation}</Affiliation></AffiliationInfo></Author>\
         </AuthorList></Article>\
         </MedlineCitation></PubmedArticle></PubmedArticleSet>"
    )
}

async fn mount_search(mock_server: &MockServer, ids: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"esearchresult": {"idlist": ids}})),
        )
        .mount(mock_server)
        .await;
}

async fn mount_fetch(mock_server: &MockServer, pmid: &str, status: u16, body: String) {
    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .and(query_param("id", pmid))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(mock_server)
        .await;
}

fn client(mock_server: &MockServer) -> Arc<PubMedClient> {
    Arc::new(PubMedClient::new(Config::for_testing(&mock_server.uri())).unwrap())
}

#[tokio::test]
async fn test_run_appends_rows_in_search_order() {
    let mock_server = MockServer::start().await;
    mount_search(&mock_server, &["11", "22", "33"]).await;
    mount_fetch(&mock_server, "11", 200, article_xml("11", "One", "Takeda Pharmaceutical, Osaka")).await;
    mount_fetch(&mock_server, "22", 200, article_xml("22", "Two", "Kyoto University")).await;
    mount_fetch(&mock_server, "33", 200, article_xml("33", "Three", "Ito Clinic. ken@ito.jp")).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.csv");

    let summary = pipeline::run(client(&mock_server), 2, "query", 10, &output).await.unwrap();
    assert_eq!(summary.found, 3);
    assert_eq!(summary.written, 3);
    assert_eq!(summary.output, output);

    let content = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("PubmedID,Title,Publication Date"));
    assert_eq!(lines[1], "11,One,2022-05-N/A,Ken Ito,\"Takeda Pharmaceutical, Osaka\",None");
    assert_eq!(lines[2], "22,Two,2022-05-N/A,None,None,None");
    assert_eq!(lines[3], "33,Three,2022-05-N/A,Ken Ito,None,ken@ito.jp");
}

#[tokio::test]
async fn test_repeated_runs_accumulate() {
    let mock_server = MockServer::start().await;
    mount_search(&mock_server, &["5"]).await;
    mount_fetch(&mock_server, "5", 200, article_xml("5", "Again", "Amgen Biotech")).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.csv");

    pipeline::run(client(&mock_server), 2, "q", 1, &output).await.unwrap();
    pipeline::run(client(&mock_server), 2, "q", 1, &output).await.unwrap();

    let content = std::fs::read_to_string(&output).unwrap();
    assert_eq!(content.lines().count(), 3);
    assert_eq!(content.matches("PubmedID").count(), 1);
}

#[tokio::test]
async fn test_failed_fetch_writes_nothing() {
    let mock_server = MockServer::start().await;
    mount_search(&mock_server, &["1", "2"]).await;
    mount_fetch(&mock_server, "1", 200, article_xml("1", "Fine", "Pfizer")).await;
    mount_fetch(&mock_server, "2", 500, "Internal Server Error".to_string()).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.csv");

    let err = pipeline::run(client(&mock_server), 2, "q", 10, &output).await.unwrap_err();

    assert!(matches!(err, PipelineError::Client(_)));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_failed_search_writes_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Invalid term"))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.csv");

    let err = pipeline::run(client(&mock_server), 2, "", 10, &output).await.unwrap_err();

    assert!(err.to_string().contains("Invalid term"));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_no_hits_still_creates_header() {
    let mock_server = MockServer::start().await;
    mount_search(&mock_server, &[]).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.csv");

    let summary = pipeline::run(client(&mock_server), 2, "zzzz", 10, &output).await.unwrap();

    assert_eq!(summary.found, 0);
    assert_eq!(summary.written, 0);
    assert_eq!(std::fs::read_to_string(&output).unwrap().lines().count(), 1);
}
