//! # メディアアップロードハンドラ
//!
//! ## 処理の流れ
//!
//! 1. `event.body` を URL エンコードされたフォームとしてデコード（`null` は空のフォーム）
//! 2. フィールドが 3 つ未満なら「フォーム未送信」を直接返す（ダウンロードしない）
//! 3. `upload_url` / `email` / `maxspeakerlabels` からアップロード要求を組み立てる
//! 4. 一時ファイルを確保し、ダウンロード元をストリーミングで書き込む
//! 5. URL パスの最後のセグメントをキーとして、メタデータ付きで S3 に保存する
//! 6. 一時ファイルを解放し、成功レスポンスを返す
//!
//! 3〜6 の失敗はすべて境界で 500 のエラーエンベロープに変換される。
//! ダウンロードとアップロードは逐次に実行し、リトライはしない。

use std::{path::PathBuf, sync::Arc};

use lambda_runtime::LambdaEvent;
use podscribe_domain::{form::FormParams, upload::UploadRequest};
use podscribe_infra::{MediaDownloader, MediaStorage, ScratchFile};
use podscribe_shared::{LambdaResponse, event_log::event, log_business_event};
use serde_json::Value;

use crate::error::UploadError;

/// フィールド不足時の説明文
pub const FORM_NOT_POSTED: &str = "Form data was not posted!";

/// 成功時のボディ
pub const SUCCESS_BODY: &str = r#"{ "success": true}"#;

/// メディアをダウンロードして S3 に保存するハンドラ
#[derive(Clone)]
pub struct MediaUploadHandler {
    downloader:  Arc<dyn MediaDownloader>,
    storage:     Arc<dyn MediaStorage>,
    scratch_dir: Option<PathBuf>,
}

impl MediaUploadHandler {
    pub fn new(downloader: Arc<dyn MediaDownloader>, storage: Arc<dyn MediaStorage>) -> Self {
        Self {
            downloader,
            storage,
            scratch_dir: None,
        }
    }

    /// 一時ファイルの作成先を指定する
    pub fn with_scratch_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.scratch_dir = dir;
        self
    }

    /// Lambda ランタイムから呼ばれるエントリーポイント
    ///
    /// コンテキストは使わない。
    pub async fn handle(
        &self,
        event: LambdaEvent<Value>,
    ) -> Result<LambdaResponse, lambda_runtime::Error> {
        Ok(self.invoke(&event.payload).await)
    }

    /// イベントを処理する（失敗はエラーエンベロープに変換済み）
    pub async fn invoke(&self, payload: &Value) -> LambdaResponse {
        LambdaResponse::from_result(self.upload_media(payload).await)
    }

    /// アップロード処理本体
    #[tracing::instrument(skip_all)]
    pub async fn upload_media(&self, payload: &Value) -> Result<LambdaResponse, UploadError> {
        // 本文の無いリクエストでは body が null になる（空のフォームとして扱う）
        let body = match payload.get("body") {
            Some(Value::String(body)) => body.as_str(),
            Some(Value::Null) => "",
            _ => return Err(UploadError::MissingBody),
        };

        let params = FormParams::decode(body);
        tracing::debug!(?params, "フォームから受け取ったパラメータ");

        if !params.is_posted() {
            log_business_event!(
                event.category = event::category::MEDIA,
                event.action = event::action::FORM_REJECTED,
                event.result = event::result::FAILURE,
                form.fields = params.len(),
                form.empty = params.is_empty(),
                "フォームが送信されていません"
            );
            return Ok(LambdaResponse::validation_failure(FORM_NOT_POSTED));
        }

        let request = UploadRequest::from_form(&params)?;
        tracing::info!(source = %request.source(), "ダウンロード元 URL");

        let key = request.object_key()?;
        tracing::debug!(path = request.source().path(), %key, "URL パスから保存先ファイル名を導出");

        let scratch = self.acquire_scratch()?;
        let transferred = self.transfer(&request, key, &scratch).await;
        let released = scratch.release();
        transferred?;
        released?;

        Ok(LambdaResponse::ok(SUCCESS_BODY))
    }

    fn acquire_scratch(&self) -> Result<ScratchFile, UploadError> {
        let scratch = match &self.scratch_dir {
            Some(dir) => ScratchFile::acquire_in(dir)?,
            None => ScratchFile::acquire()?,
        };
        tracing::debug!(path = %scratch.path().display(), "一時ファイル");
        Ok(scratch)
    }

    /// ダウンロードしてからアップロードする
    async fn transfer(
        &self,
        request: &UploadRequest,
        key: &str,
        scratch: &ScratchFile,
    ) -> Result<(), UploadError> {
        let bytes = self.downloader.download(request.source(), scratch).await?;
        log_business_event!(
            event.category = event::category::MEDIA,
            event.action = event::action::MEDIA_DOWNLOADED,
            event.result = event::result::SUCCESS,
            media.source = %request.source(),
            media.bytes = bytes,
            "メディアをダウンロードしました"
        );

        self.storage
            .upload_file(scratch.path(), key, &request.metadata())
            .await?;
        log_business_event!(
            event.category = event::category::MEDIA,
            event.action = event::action::MEDIA_UPLOADED,
            event.result = event::result::SUCCESS,
            media.key = key,
            media.bytes = bytes,
            "メディアを保存しました"
        );
        Ok(())
    }
}
