use std::time::Duration;
use xbrlrss_loader::parsing::index::IndexDocument;
use xbrlrss_loader::{Fetcher, FilingMonth, HttpFetcher, LoaderConfig, RetryingFetcher};

fn fetcher() -> RetryingFetcher<HttpFetcher> {
    let config = LoaderConfig::new("test_agent example@example.com", Duration::from_secs(30));
    RetryingFetcher::new(HttpFetcher::new(&config).unwrap())
}

#[tokio::test]
#[ignore]
async fn monthly_index_parses() {
    let month = FilingMonth::new(2013, 3).unwrap();
    let url = format!(
        "https://www.sec.gov/Archives/edgar/monthly/{}",
        month.index_file_name()
    );
    let payload = fetcher().fetch_bytes_with_retry(&url).await.unwrap();
    let doc = IndexDocument::parse(&payload);

    assert!(doc.feed_error.is_none());
    assert!(doc.tree_error.is_none());
    assert!(!doc.feed.entries.is_empty());
    assert_eq!(doc.feed.entries.len(), doc.tree.items.len());
}

#[tokio::test]
#[ignore]
async fn missing_month_is_not_found() {
    let config = LoaderConfig::new("test_agent example@example.com", Duration::from_secs(30));
    let result = HttpFetcher::new(&config)
        .unwrap()
        .fetch("https://www.sec.gov/Archives/edgar/monthly/xbrlrss-2004-01.xml")
        .await;
    assert!(result.is_err());
}
