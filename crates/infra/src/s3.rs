//! # S3 メディアストレージ
//!
//! ダウンロード済みの一時ファイルを S3 バケットへアップロードする。
//!
//! ## 設計方針
//!
//! - **本番環境**: Lambda 実行ロールの認証で Amazon S3 に接続（`S3_ENDPOINT_URL` 未設定）
//! - **ローカル開発**: MinIO を使用（`S3_ENDPOINT_URL` で接続先を指定、パススタイル）
//! - **アップロード**: 単一の PutObject。マルチパートアップロードとリトライは行わない
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use podscribe_infra::s3;
//!
//! async fn setup() {
//!     // ローカル（MinIO）
//!     let client = s3::create_client(Some("http://localhost:19000")).await;
//!     let storage = s3::AwsS3MediaStorage::new(client, "podscribe-dev-media".to_string());
//!
//!     // 本番（AWS S3）
//!     let client = s3::create_client(None).await;
//!     let storage = s3::AwsS3MediaStorage::new(client, "podscribe-media".to_string());
//! }
//! ```

use std::path::Path;

use async_trait::async_trait;
use aws_config::{Region, meta::region::RegionProviderChain};
use aws_sdk_s3::{Client, error::DisplayErrorContext, primitives::ByteStream};
use podscribe_domain::upload::ObjectMetadata;

use crate::InfraError;

/// リージョンが解決できない場合のフォールバック（MinIO 接続時など）
const FALLBACK_REGION: &str = "us-east-1";

/// メディアストレージのインターフェース
///
/// テスト時はモックに差し替え可能。
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// ファイルの内容をオブジェクトとして保存する
    ///
    /// # 引数
    ///
    /// * `path` - アップロードするローカルファイル
    /// * `key` - オブジェクトキー（例: `ep42.mp3`）
    /// * `metadata` - オブジェクトに付与するユーザー定義メタデータ
    async fn upload_file(
        &self,
        path: &Path,
        key: &str,
        metadata: &ObjectMetadata,
    ) -> Result<(), InfraError>;
}

/// AWS S3 メディアストレージ
///
/// `aws-sdk-s3` を使用した [`MediaStorage`] の実装。
/// MinIO とも互換動作する。
#[derive(Debug, Clone)]
pub struct AwsS3MediaStorage {
    client:      Client,
    bucket_name: String,
}

impl AwsS3MediaStorage {
    /// 新しいストレージを作成する
    pub fn new(client: Client, bucket_name: String) -> Self {
        Self {
            client,
            bucket_name,
        }
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }
}

#[async_trait]
impl MediaStorage for AwsS3MediaStorage {
    #[tracing::instrument(skip_all, level = "debug", fields(bucket = %self.bucket_name, %key))]
    async fn upload_file(
        &self,
        path: &Path,
        key: &str,
        metadata: &ObjectMetadata,
    ) -> Result<(), InfraError> {
        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| InfraError::s3(format!("アップロード元ファイルを開けません: {e}")))?;

        let request = metadata.iter().fold(
            self.client
                .put_object()
                .bucket(&self.bucket_name)
                .key(key)
                .body(body),
            |request, (name, value)| request.metadata(name, value),
        );

        request.send().await.map_err(|e| {
            InfraError::s3(format!(
                "PutObject の実行に失敗: {}",
                DisplayErrorContext(&e)
            ))
        })?;

        tracing::debug!("オブジェクトを保存しました");
        Ok(())
    }
}

/// S3 クライアントを作成する
///
/// `endpoint` が `Some` の場合は MinIO 等のカスタムエンドポイントに接続する。
/// `None` の場合は AWS S3 のデフォルトエンドポイントを使用する。
///
/// 認証情報・リージョンは SDK のデフォルトチェーンで解決する:
/// - ローカル: 環境変数 `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY` / `AWS_REGION`（`.env` で設定）
/// - Lambda: 実行ロールと `AWS_REGION`
pub async fn create_client(endpoint: Option<&str>) -> Client {
    let region = RegionProviderChain::default_provider().or_else(Region::new(FALLBACK_REGION));
    let mut config_builder =
        aws_config::defaults(aws_config::BehaviorVersion::latest()).region(region);

    if let Some(endpoint_url) = endpoint {
        config_builder = config_builder.endpoint_url(endpoint_url);
    }

    let config = config_builder.load().await;

    // MinIO はパススタイルが必要（バーチャルホスト型 URL を使わない）
    // エンドポイント指定時のみ force_path_style を有効化
    let s3_config_builder = aws_sdk_s3::config::Builder::from(&config);
    let s3_config = if endpoint.is_some() {
        s3_config_builder.force_path_style(true).build()
    } else {
        s3_config_builder.build()
    };

    Client::from_conf(s3_config)
}
