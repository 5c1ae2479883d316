use kinoport::config::Config;
use kinoport::harvest::build_http_client;
use kinoport::pacing::RecordingPacer;
use kinoport::replay::{replay, GraphqlClient, MutationClient, ReplayOutcome};
use kinoport::storage::{load_records, save_records};
use kinoport::{KinoportError, Record, RecordStore};
use std::time::Duration;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GRAPHQL_PATH: &str = "/graphql/";

/// Creates a configuration whose site and GraphQL endpoint are the mock server
fn create_test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.source.base_url = base_url.to_string();
    config.source.graphql_url = format!("{}{}?operationName=MovieSetWatched", base_url, GRAPHQL_PATH);
    config.pacing.replay_delay_ms = 1000;
    config
}

fn set_watched_response(status: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_string(format!(
        r#"{{"data":{{"movie":{{"watched":{{"set":{{"error":null,"status":"{status}","__typename":"MovieSetWatchedPayload"}},"__typename":"MovieWatchedMutations"}},"__typename":"MovieMutations"}}}}}}"#
    ))
}

fn graphql_client(config: &Config) -> GraphqlClient {
    let client = build_http_client("TestBot/1.0", "session=abc").expect("Failed to build client");
    GraphqlClient::new(client, &config.source).expect("Failed to build GraphQL client")
}

#[tokio::test]
async fn test_set_watched_sends_expected_request() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(&mock_server.uri());

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(header("content-type", "application/json"))
        .and(header("cookie", "session=abc"))
        .and(header("service-id", "25"))
        .and(header("source-id", "1"))
        .and(header("origin", mock_server.uri().as_str()))
        .and(body_string_contains(r#""operationName":"MovieSetWatched""#))
        .and(body_string_contains(r#""movieId":535341"#))
        .respond_with(set_watched_response("SUCCESS"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = graphql_client(&config);
    assert!(client.set_watched(535341).await.expect("Request failed"));
}

#[tokio::test]
async fn test_set_watched_non_success_status() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(&mock_server.uri());

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(set_watched_response("ERROR"))
        .mount(&mock_server)
        .await;

    let client = graphql_client(&config);
    assert!(!client.set_watched(1).await.expect("Request failed"));
}

#[tokio::test]
async fn test_set_watched_unparseable_response() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(&mock_server.uri());

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&mock_server)
        .await;

    let client = graphql_client(&config);
    let result = client.set_watched(1).await;
    assert!(matches!(result, Err(KinoportError::MalformedResponse { .. })));
}

#[tokio::test]
async fn test_replay_file_end_to_end() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(&mock_server.uri());

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains(r#""movieId":301"#))
        .respond_with(set_watched_response("SUCCESS"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains(r#""movieId":326"#))
        .respond_with(set_watched_response("ERROR"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains(r#""movieId":435"#))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store: RecordStore = vec![
        Record::new("301", "Матрица"),
        Record::new("326", "Побег из Шоушенка"),
        Record::new("435", "Зелёная миля; режиссёрская версия"),
    ]
    .into_iter()
    .collect();

    let file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    save_records(file.path(), &store).expect("Failed to save records");
    let records = load_records(file.path()).expect("Failed to load records");

    let client = graphql_client(&config);
    let pacer = RecordingPacer::new();

    let replayed = replay(&records, &client, &pacer, config.pacing.replay_delay())
        .await
        .expect("Replay failed");

    let outcomes: Vec<(&str, bool)> = replayed
        .iter()
        .map(|r| (r.record.id.as_str(), r.outcome.is_success()))
        .collect();
    assert_eq!(
        outcomes,
        vec![("301", true), ("326", false), ("435", false)]
    );
    assert_eq!(replayed[1].outcome, ReplayOutcome::Rejected);
    assert!(matches!(replayed[2].outcome, ReplayOutcome::Failed(_)));
    assert_eq!(pacer.pauses(), vec![Duration::from_secs(1); 2]);
}

#[tokio::test]
async fn test_replay_stops_at_malformed_id() {
    let mock_server = MockServer::start().await;
    let config = create_test_config(&mock_server.uri());

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(set_watched_response("SUCCESS"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    std::fs::write(file.path(), "1;Один\nabc;Сломанный\n2;Два\n").expect("Failed to write file");
    let records = load_records(file.path()).expect("Failed to load records");

    let client = graphql_client(&config);
    let pacer = RecordingPacer::new();

    let result = replay(&records, &client, &pacer, config.pacing.replay_delay()).await;

    assert!(matches!(
        result,
        Err(KinoportError::MalformedRecord { row: 2, .. })
    ));
}
