use kinoport::config::Config;
use kinoport::harvest::{build_http_client, Harvester, HttpPageSource};
use kinoport::pacing::RecordingPacer;
use kinoport::storage::{load_records, save_records};
use kinoport::{KinoportError, Record, RecordStore};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FIRST_PAGE: &str = "/user/42/votes/list/vs/novote/perpage/2/";
const SECOND_PAGE: &str = "/user/42/votes/list/vs/novote/page/2/";

/// Creates a configuration pointing at the mock server
fn create_test_config(base_url: &str, max_attempts: Option<u32>) -> Config {
    let mut config = Config::default();
    config.source.base_url = base_url.to_string();
    config.source.page_size = 2;
    config.pacing.page_delay_ms = 5000;
    config.pacing.retry_delay_ms = 700;
    config.pacing.max_attempts = max_attempts;
    config
}

/// Renders a listing page in the site's markup
fn listing_page(range: &str, total: u64, entries: &[(&str, &str)]) -> String {
    let mut items = String::new();
    for (index, (id, name)) in entries.iter().enumerate() {
        let class = if index % 2 == 0 { "item" } else { "item even" };
        items.push_str(&format!(
            r#"<div class="{class}">
                <div class="poster"><img src="/images/{id}.jpg"></div>
                <div class="info">
                    <div class="nameRus"><a href="/film/{id}/">{name}</a></div>
                    <div class="nameEng">Original</div>
                </div>
            </div>"#
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><title>Оценки</title></head><body>
<div class="navigator"><div class="pagesFromTo">{range} из {total}</div></div>
<div class="profileFilmsList">
    <div class="header">Фильмы</div>
    {items}
</div>
</body></html>"#
    )
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html; charset=utf-8")
}

fn source_for(cookie: &str) -> HttpPageSource {
    let client = build_http_client("TestBot/1.0", cookie).expect("Failed to build client");
    HttpPageSource::new(client)
}

#[tokio::test]
async fn test_full_harvest_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FIRST_PAGE))
        .and(header("cookie", "session=abc"))
        .respond_with(html(listing_page(
            "1—2",
            3,
            &[("301", "Матрица"), ("326", "Побег из Шоушенка")],
        )))
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(SECOND_PAGE))
        .respond_with(html(listing_page("3—3", 3, &[("435", "Зелёная миля")])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), None);
    let source = source_for("session=abc");
    let pacer = RecordingPacer::new();

    let outcome = Harvester::new(&source, &pacer, &config, "42")
        .expect("Failed to create harvester")
        .run()
        .await
        .expect("Harvest failed");

    assert_eq!(outcome.report.paging.total_items, 3);
    assert_eq!(outcome.report.paging.page_size, 2);
    assert_eq!(outcome.report.paging.page_count, 2);
    assert_eq!(outcome.report.parsed_items, 3);
    assert_eq!(outcome.report.stored_items, 3);
    assert_eq!(pacer.count_of(Duration::from_millis(5000)), 2);

    // Persist and read back the way the CLI does
    let file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    save_records(file.path(), &outcome.store).expect("Failed to save records");
    let loaded = load_records(file.path()).expect("Failed to load records");

    assert_eq!(
        loaded,
        vec![
            Record::new("301", "Матрица"),
            Record::new("326", "Побег из Шоушенка"),
            Record::new("435", "Зелёная миля"),
        ]
    );
}

#[tokio::test]
async fn test_transiently_broken_pages_are_retried() {
    let mock_server = MockServer::start().await;

    // First probe hits a server error, then the page renders without totals
    Mock::given(method("GET"))
        .and(path(FIRST_PAGE))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(FIRST_PAGE))
        .respond_with(html(listing_page("1—2", 0, &[])))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(FIRST_PAGE))
        .respond_with(html(listing_page("1—2", 2, &[("1", "Один"), ("2", "Два")])))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), None);
    let source = source_for("session=abc");
    let pacer = RecordingPacer::new();

    let outcome = Harvester::new(&source, &pacer, &config, "42")
        .expect("Failed to create harvester")
        .run()
        .await
        .expect("Harvest failed");

    assert_eq!(outcome.report.paging.page_count, 1);
    assert_eq!(outcome.report.total_attempts, 4);
    assert_eq!(outcome.store.len(), 2);
    assert_eq!(pacer.count_of(Duration::from_millis(700)), 2);
}

#[tokio::test]
async fn test_bounded_harvest_gives_up() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FIRST_PAGE))
        .respond_with(ResponseTemplate::new(500).set_body_string("maintenance"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), Some(3));
    let source = source_for("session=abc");
    let pacer = RecordingPacer::new();

    let result = Harvester::new(&source, &pacer, &config, "42")
        .expect("Failed to create harvester")
        .run()
        .await;

    assert!(matches!(
        result,
        Err(KinoportError::RetriesExhausted { attempts: 3, .. })
    ));
}

#[tokio::test]
async fn test_empty_listing_page_is_refetched() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FIRST_PAGE))
        .respond_with(html(listing_page("1—2", 3, &[("1", "Один"), ("2", "Два")])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(SECOND_PAGE))
        .respond_with(html(listing_page("3—3", 3, &[])))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(SECOND_PAGE))
        .respond_with(html(listing_page("3—3", 3, &[("3", "Три")])))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), None);
    let source = source_for("session=abc");
    let pacer = RecordingPacer::new();

    let outcome = Harvester::new(&source, &pacer, &config, "42")
        .expect("Failed to create harvester")
        .run()
        .await
        .expect("Harvest failed");

    let expected: RecordStore = vec![
        Record::new("1", "Один"),
        Record::new("2", "Два"),
        Record::new("3", "Три"),
    ]
    .into_iter()
    .collect();

    assert_eq!(outcome.store, expected);
    assert_eq!(pacer.count_of(Duration::from_millis(700)), 2);
}
