//! # 静的ページハンドラ
//!
//! 固定の HTML ファイルを読み込み、`content-type: text/html` で返す。
//! 読み込みに失敗した場合は 500 のエラーエンベロープを返す。リトライはしない。

use lambda_runtime::LambdaEvent;
use podscribe_shared::{LambdaResponse, event_log::event, log_business_event};
use serde_json::Value;

use crate::{config::StaticSiteConfig, error::StaticPageError};

/// 静的ページを返すハンドラ
#[derive(Debug, Clone)]
pub struct StaticPageHandler {
    config: StaticSiteConfig,
}

impl StaticPageHandler {
    pub fn new(config: StaticSiteConfig) -> Self {
        Self { config }
    }

    /// Lambda ランタイムから呼ばれるエントリーポイント
    ///
    /// イベントとコンテキストは使わない。
    pub async fn handle(
        &self,
        _event: LambdaEvent<Value>,
    ) -> Result<LambdaResponse, lambda_runtime::Error> {
        Ok(self.invoke().await)
    }

    /// ページを返す（失敗はエラーエンベロープに変換済み）
    pub async fn invoke(&self) -> LambdaResponse {
        LambdaResponse::from_result(self.render_static_website().await)
    }

    /// ページファイルを読み込んで 200 レスポンスを組み立てる
    #[tracing::instrument(skip_all, fields(path = %self.config.index_path.display()))]
    pub async fn render_static_website(&self) -> Result<LambdaResponse, StaticPageError> {
        let path = &self.config.index_path;
        let body = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| StaticPageError::Read {
                path: path.clone(),
                source,
            })?;

        log_business_event!(
            event.category = event::category::PAGE,
            event.action = event::action::PAGE_RENDERED,
            event.result = event::result::SUCCESS,
            page.bytes = body.len(),
            "静的ページを返却"
        );
        Ok(LambdaResponse::html(body))
    }
}
