//! 静的ページハンドラのテスト
//!
//! 一時ディレクトリに置いた HTML を返すこと、ファイルが無い場合に
//! 500 のエラーエンベロープを返すことを検証する。

use std::collections::BTreeMap;

use podscribe_shared::LambdaResponse;
use podscribe_static_site::{StaticPageHandler, StaticSiteConfig};
use pretty_assertions::assert_eq;

const PAGE: &str = "<!DOCTYPE html>\n<html><body><h1>ポッドキャスト文字起こし</h1></body></html>\n";

#[tokio::test]
async fn test_ページが存在すれば200とhtmlを返す() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.html");
    std::fs::write(&path, PAGE).unwrap();
    let sut = StaticPageHandler::new(StaticSiteConfig::new(&path));

    let response = sut.invoke().await;

    assert_eq!(
        response,
        LambdaResponse {
            status_code: 200,
            headers:     Some(BTreeMap::from([(
                "content-type".to_string(),
                "text/html".to_string()
            )])),
            body:        Some(PAGE.to_string()),
            error:       None,
        }
    );
}

#[tokio::test]
async fn test_ページが存在しなければ500とエラーを返す() {
    let dir = tempfile::tempdir().unwrap();
    let sut = StaticPageHandler::new(StaticSiteConfig::new(dir.path().join("index.html")));

    let response = sut.invoke().await;

    assert_eq!(response.status_code, 500);
    assert!(response.headers.is_none());
    assert!(response.body.is_none());
    let error = response.error.expect("error オブジェクトがあること");
    assert_eq!(error.error_type.as_deref(), Some("NotFound"));
    assert!(!error.description.is_empty());
}

#[tokio::test]
async fn test_utf8でないページはinvalid_dataで500() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.html");
    std::fs::write(&path, [0xff, 0xfe, 0x00, 0xc3]).unwrap();
    let sut = StaticPageHandler::new(StaticSiteConfig::new(&path));

    let response = sut.invoke().await;

    assert_eq!(response.status_code, 500);
    assert_eq!(
        response.error.and_then(|e| e.error_type).as_deref(),
        Some("InvalidData")
    );
}

#[tokio::test]
async fn test_同じ入力で2回呼んでも同じレスポンス() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.html");
    std::fs::write(&path, PAGE).unwrap();
    let sut = StaticPageHandler::new(StaticSiteConfig::new(&path));

    let first = sut.invoke().await;
    let second = sut.invoke().await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_レスポンスのjson形状() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.html");
    std::fs::write(&path, "<p>ok</p>").unwrap();
    let sut = StaticPageHandler::new(StaticSiteConfig::new(&path));

    let json = serde_json::to_value(sut.invoke().await).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "statusCode": 200,
            "headers": { "content-type": "text/html" },
            "body": "<p>ok</p>"
        })
    );
}
