//! HTTP ダウンローダの統合テスト
//!
//! `127.0.0.1` のエフェメラルポートに axum でダウンロード元を立て、
//! `HttpMediaDownloader` が一時ファイルへ正しく書き込むことを検証する。

use std::net::SocketAddr;

use axum::{Router, http::StatusCode, routing::get};
use podscribe_domain::upload::SourceUrl;
use podscribe_infra::{HttpMediaDownloader, InfraErrorKind, MediaDownloader, ScratchFile};
use pretty_assertions::assert_eq;

/// テスト用のペイロード（チャンク境界をまたぐサイズ）
fn payload() -> Vec<u8> {
    (0..100_003u32).map(|i| (i % 253) as u8).collect()
}

/// ダウンロード元サーバーを起動し、アドレスを返す
async fn spawn_source() -> SocketAddr {
    let app = Router::new()
        .route("/episodes/ep42.mp3", get(|| async { payload() }))
        .route("/episodes/empty.mp3", get(|| async { Vec::<u8>::new() }))
        .route(
            "/episodes/gone.mp3",
            get(|| async { (StatusCode::NOT_FOUND, "<html>Not Found</html>") }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn source(addr: SocketAddr, path: &str) -> SourceUrl {
    SourceUrl::parse(&format!("http://{addr}{path}")).unwrap()
}

#[tokio::test]
async fn test_ダウンロードした内容が一時ファイルと一致する() {
    let addr = spawn_source().await;
    let dir = tempfile::tempdir().unwrap();
    let scratch = ScratchFile::acquire_in(dir.path()).unwrap();
    let sut = HttpMediaDownloader::default();

    let written = sut
        .download(&source(addr, "/episodes/ep42.mp3?token=abc"), &scratch)
        .await
        .unwrap();

    let expected = payload();
    assert_eq!(written, expected.len() as u64);
    assert_eq!(std::fs::read(scratch.path()).unwrap(), expected);
}

#[tokio::test]
async fn test_空のレスポンスは0バイト() {
    let addr = spawn_source().await;
    let dir = tempfile::tempdir().unwrap();
    let scratch = ScratchFile::acquire_in(dir.path()).unwrap();
    let sut = HttpMediaDownloader::default();

    let written = sut
        .download(&source(addr, "/episodes/empty.mp3"), &scratch)
        .await
        .unwrap();

    assert_eq!(written, 0);
    assert!(std::fs::read(scratch.path()).unwrap().is_empty());
}

#[tokio::test]
async fn test_404はdownload_statusエラーで何も書き込まない() {
    let addr = spawn_source().await;
    let dir = tempfile::tempdir().unwrap();
    let scratch = ScratchFile::acquire_in(dir.path()).unwrap();
    let sut = HttpMediaDownloader::default();

    let err = sut
        .download(&source(addr, "/episodes/gone.mp3"), &scratch)
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind(),
        InfraErrorKind::DownloadStatus { status: 404, .. }
    ));
    assert_eq!(err.kind_name(), "DownloadStatus");
    assert!(std::fs::read(scratch.path()).unwrap().is_empty());
}

#[tokio::test]
async fn test_接続できないダウンロード元はhttpエラー() {
    // ポートを確保してすぐ閉じ、接続拒否される宛先を作る
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let dir = tempfile::tempdir().unwrap();
    let scratch = ScratchFile::acquire_in(dir.path()).unwrap();
    let sut = HttpMediaDownloader::default();

    let err = sut
        .download(&source(addr, "/episodes/ep42.mp3"), &scratch)
        .await
        .unwrap_err();

    assert_eq!(err.kind_name(), "Http");
}
