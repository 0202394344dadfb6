//! # Upload to S3 Lambda
//!
//! フォームで送信されたメディア URL をダウンロードし、S3 に保存する Lambda 関数。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `MEDIA_BUCKET` | **Yes** | 保存先バケット名 |
//! | `S3_ENDPOINT_URL` | No | S3 互換エンドポイント（MinIO 等） |
//! | `SCRATCH_DIR` | No | 一時ファイルの作成先（デフォルト: OS の一時ディレクトリ） |
//! | `LOG_FORMAT` | No | `json` / `pretty`（Lambda 上のデフォルト: `json`） |
//! | `RUST_LOG` | No | ログフィルタ（デフォルト: `debug`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # ローカル（cargo-lambda + MinIO）
//! MEDIA_BUCKET=podscribe-dev-media S3_ENDPOINT_URL=http://localhost:19000 \
//!   cargo lambda watch -p podscribe-upload-to-s3
//! ```

use std::sync::Arc;

use lambda_runtime::{run, service_fn};
use podscribe_infra::{AwsS3MediaStorage, HttpMediaDownloader, s3};
use podscribe_shared::observability::TracingConfig;
use podscribe_upload_to_s3::{MediaUploadHandler, UploadConfig};

/// `RUST_LOG` 未設定時のログレベル
const DEFAULT_LOG_DIRECTIVE: &str = "debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("upload-to-s3", DEFAULT_LOG_DIRECTIVE);
    podscribe_shared::observability::init_tracing(tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = "upload-to-s3").entered();

    // 保存先バケットが無ければコールドスタートで失敗させる
    let config = UploadConfig::from_env()?;
    let s3_client = s3::create_client(config.s3_endpoint_url.as_deref()).await;
    let storage = AwsS3MediaStorage::new(s3_client, config.media_bucket);
    tracing::info!(
        bucket = storage.bucket_name(),
        endpoint = config.s3_endpoint_url.as_deref(),
        "Upload to S3 Lambda を起動します"
    );

    let storage = Arc::new(storage);
    let downloader = Arc::new(HttpMediaDownloader::new(reqwest::Client::new()));

    let handler = MediaUploadHandler::new(downloader, storage).with_scratch_dir(config.scratch_dir);
    let handler = &handler;
    run(service_fn(move |event| handler.handle(event)))
        .await
        .map_err(|e| anyhow::anyhow!(e))
}
