//! Word server over real HTTP, and game clients talking to it

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use termox::game::GameSessionController;
use termox::server::{AppState, WordStore, serve_on};
use termox::source::{HttpWordSource, OfflineFallback, WordSource};
use termox::wordlists::EMBEDDED;
use tokio::net::TcpListener;

const WORDS: &str = "CRANE\nSLATE\nALLOW\n";

struct TestServer {
    addr: SocketAddr,
    wordlist: PathBuf,
    _dir: tempfile::TempDir,
}

impl TestServer {
    fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

async fn spawn_server(words: &str) -> TestServer {
    let dir = tempfile::tempdir().unwrap();
    let wordlist = dir.path().join("wordlist.txt");
    std::fs::write(&wordlist, words).unwrap();

    let public = dir.path().join("public");
    std::fs::create_dir(&public).unwrap();
    std::fs::write(public.join("index.html"), "<h1>termox</h1>").unwrap();
    std::fs::write(public.join("app.js"), "console.log('termox');").unwrap();

    let state = Arc::new(AppState {
        words: WordStore::open(wordlist.clone()).await.unwrap(),
        public_root: public,
    });
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve_on(listener, state));

    TestServer {
        addr,
        wordlist,
        _dir: dir,
    }
}

async fn post(server: &TestServer, path: &str, body: &str) -> (u16, String) {
    let response = reqwest::Client::new()
        .post(server.url(path))
        .body(body.to_string())
        .send()
        .await
        .unwrap();
    let status = response.status().as_u16();
    (status, response.text().await.unwrap())
}

async fn get(server: &TestServer, path: &str) -> (u16, String) {
    let response = reqwest::get(server.url(path)).await.unwrap();
    let status = response.status().as_u16();
    (status, response.text().await.unwrap())
}

#[tokio::test]
async fn status_is_ok() {
    let server = spawn_server(WORDS).await;
    assert_eq!(get(&server, "/status").await, (200, "OK".to_string()));
}

#[tokio::test]
async fn word_comes_from_the_list() {
    let server = spawn_server(WORDS).await;
    for _ in 0..10 {
        let (status, word) = get(&server, "/word").await;
        assert_eq!(status, 200);
        assert!(WORDS.lines().any(|w| w == word), "unexpected word {word}");
    }
}

#[tokio::test]
async fn wordlist_is_served_as_text() {
    let server = spawn_server(WORDS).await;
    let response = reqwest::get(server.url("/wordlist")).await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(response.text().await.unwrap(), WORDS);
}

#[tokio::test]
async fn wordlist_is_reread_per_request() {
    let server = spawn_server(WORDS).await;
    std::fs::write(&server.wordlist, "PLANT\n").unwrap();
    assert_eq!(get(&server, "/wordlist").await, (200, "PLANT\n".to_string()));
}

#[tokio::test]
async fn missing_wordlist_is_not_found() {
    let server = spawn_server(WORDS).await;
    std::fs::remove_file(&server.wordlist).unwrap();
    assert_eq!(get(&server, "/wordlist").await.0, 404);
}

#[tokio::test]
async fn add_appends_new_words() {
    let server = spawn_server(WORDS).await;

    let (status, body) = post(&server, "/add", "crane\nhello\nxy\nHELLO\n").await;
    assert_eq!(status, 201);
    assert!(body.contains("HELLO"));

    let contents = std::fs::read_to_string(&server.wordlist).unwrap();
    assert_eq!(contents, format!("{WORDS}HELLO\n"));
    assert_eq!(get(&server, "/wordlist").await.1, contents);
}

#[tokio::test]
async fn add_reports_bad_bodies() {
    let server = spawn_server(WORDS).await;
    assert_eq!(post(&server, "/add", "").await.0, 422);
    assert_eq!(post(&server, "/add", "12345\ntoolong\n").await.0, 400);
    assert_eq!(post(&server, "/add", "crane\nSlate\n").await.0, 409);

    // Nothing was written
    assert_eq!(std::fs::read_to_string(&server.wordlist).unwrap(), WORDS);
}

#[tokio::test]
async fn remove_is_case_insensitive_and_idempotent() {
    let server = spawn_server(WORDS).await;

    assert_eq!(post(&server, "/remove", "slate").await.0, 200);
    assert_eq!(
        std::fs::read_to_string(&server.wordlist).unwrap(),
        "CRANE\nALLOW\n"
    );
    assert_eq!(post(&server, "/remove", "SLATE").await.0, 200);
    assert_eq!(post(&server, "/remove", "sl4te").await.0, 400);

    for _ in 0..10 {
        assert_ne!(get(&server, "/word").await.1, "SLATE");
    }
}

#[tokio::test]
async fn static_files_are_served() {
    let server = spawn_server(WORDS).await;

    let response = reqwest::get(server.url("/")).await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert_eq!(response.text().await.unwrap(), "<h1>termox</h1>");

    let (status, body) = get(&server, "/app.js").await;
    assert_eq!(status, 200);
    assert!(body.contains("termox"));
}

#[tokio::test]
async fn unknown_paths_are_not_found() {
    let server = spawn_server(WORDS).await;
    assert_eq!(
        get(&server, "/missing.css").await,
        (404, "File not found".to_string())
    );
    assert_eq!(post(&server, "/index.html", "").await.0, 404);
}

#[tokio::test]
async fn http_source_feeds_a_game() {
    let server = spawn_server(WORDS).await;
    let mut controller = GameSessionController::new(HttpWordSource::new(server.base_url()))
        .with_step_delay(Duration::ZERO);

    let session = controller.start(2).await.unwrap();
    assert_eq!(session.board_count(), 2);
    assert_eq!(session.max_rows(), 8);
    for board in session.boards().boards() {
        assert!(WORDS.lines().any(|w| w == board.target().text()));
    }
    assert!(controller.validator().is_valid("allow"));
    assert_eq!(controller.validator().len(), 3);
}

#[tokio::test]
async fn offline_fallback_keeps_the_game_playable() {
    let closed = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", closed.local_addr().unwrap());
    drop(closed);

    let source = OfflineFallback::new(HttpWordSource::new(url));
    assert!(source.fetch_word_list().await.is_err());

    let mut controller = GameSessionController::new(source).with_step_delay(Duration::ZERO);
    let session = controller.start(1).await.unwrap();
    let target = session.boards().board(0).unwrap().target().text().to_string();
    assert!(EMBEDDED.contains(&target.as_str()));

    // The accepted-word list never arrived, so every guess is refused
    assert!(controller.validator().is_empty());
}

#[tokio::test]
async fn offline_fallback_prefers_last_fetched_list() {
    let server = spawn_server("PLANT\n").await;
    let source = OfflineFallback::new(HttpWordSource::new(server.base_url()));
    assert_eq!(source.fetch_word_list().await.unwrap(), "PLANT\n");

    // The server now has nothing to hand out
    assert_eq!(post(&server, "/remove", "plant").await.0, 200);
    assert_eq!(source.fetch_target_word().await.unwrap(), "PLANT");
}
