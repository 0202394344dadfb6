//! 実 HTTP ダウンロードを含むアップロードハンドラのテスト
//!
//! ダウンロード元は `127.0.0.1` に立てた axum サーバー、保存先はモック。

use std::{net::SocketAddr, sync::Arc};

use axum::{Router, http::StatusCode, routing::get};
use podscribe_infra::{HttpMediaDownloader, mock::MockMediaStorage};
use podscribe_upload_to_s3::MediaUploadHandler;
use pretty_assertions::assert_eq;
use serde_json::json;

/// 512 バイト境界をまたぐペイロード
fn episode() -> Vec<u8> {
    (0..4_099u32).map(|i| (i * 7 % 256) as u8).collect()
}

async fn spawn_source() -> SocketAddr {
    // private.mp3 以外はすべて同じエピソードを返す
    let app = Router::new()
        .route(
            "/feeds/show/private.mp3",
            get(|| async { (StatusCode::FORBIDDEN, "forbidden") }),
        )
        .fallback(|| async { episode() });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn form_body(url: &str) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("upload_url", url)
        .append_pair("email", "host@example.com")
        .append_pair("maxspeakerlabels", "4")
        .finish()
}

fn handler(storage: &MockMediaStorage, scratch: &tempfile::TempDir) -> MediaUploadHandler {
    MediaUploadHandler::new(
        Arc::new(HttpMediaDownloader::default()),
        Arc::new(storage.clone()),
    )
    .with_scratch_dir(Some(scratch.path().to_path_buf()))
}

#[tokio::test]
async fn test_ダウンロード元の内容がそのまま保存される() {
    let addr = spawn_source().await;
    let storage = MockMediaStorage::new();
    let scratch = tempfile::tempdir().unwrap();
    let sut = handler(&storage, &scratch);
    let body = form_body(&format!("http://{addr}/feeds/show/ep43.mp3?utm_source=rss"));

    let response = sut.invoke(&json!({ "body": body })).await;

    assert_eq!(response.status_code, 200);
    let objects = storage.objects();
    assert_eq!(objects.len(), 1);
    assert_eq!(objects[0].key, "ep43.mp3");
    assert_eq!(objects[0].contents, episode());
    assert_eq!(std::fs::read_dir(scratch.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_パーセントエンコードされたファイル名はそのままキーになる() {
    let addr = spawn_source().await;
    let storage = MockMediaStorage::new();
    let scratch = tempfile::tempdir().unwrap();
    let sut = handler(&storage, &scratch);
    let body = form_body(&format!("http://{addr}/feeds/show/ep%2042.mp3"));

    let response = sut.invoke(&json!({ "body": body })).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(storage.objects()[0].key, "ep%2042.mp3");
}

#[tokio::test]
async fn test_ダウンロード元が403なら保存しない() {
    let addr = spawn_source().await;
    let storage = MockMediaStorage::new();
    let scratch = tempfile::tempdir().unwrap();
    let sut = handler(&storage, &scratch);
    let body = form_body(&format!("http://{addr}/feeds/show/private.mp3"));

    let response = sut.invoke(&json!({ "body": body })).await;

    assert_eq!(response.status_code, 500);
    assert_eq!(
        response.error.and_then(|e| e.error_type).as_deref(),
        Some("DownloadStatus")
    );
    assert!(storage.objects().is_empty());
    assert_eq!(std::fs::read_dir(scratch.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_接続できないダウンロード元ならhttpエラーで500を返す() {
    // ポートを確保してすぐ閉じ、接続拒否される宛先を作る
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let storage = MockMediaStorage::new();
    let scratch = tempfile::tempdir().unwrap();
    let sut = handler(&storage, &scratch);
    let body = form_body(&format!("http://{addr}/feeds/show/ep43.mp3"));

    let response = sut.invoke(&json!({ "body": body })).await;

    assert_eq!(response.status_code, 500);
    let error = response.error.expect("error オブジェクトがあること");
    assert_eq!(error.error_type.as_deref(), Some("Http"));
    assert!(!error.description.is_empty());
    assert!(storage.objects().is_empty());
    assert_eq!(std::fs::read_dir(scratch.path()).unwrap().count(), 0);
}
