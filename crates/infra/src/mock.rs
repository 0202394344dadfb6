//! # テスト用モック
//!
//! ハンドラのテストで使用するインメモリのストレージとスタブダウンローダ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! podscribe-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use podscribe_domain::upload::{ObjectMetadata, SourceUrl};
use tokio::io::AsyncWriteExt;

use crate::{
    InfraError,
    download::{MediaDownloader, write_chunked},
    s3::MediaStorage,
    scratch::ScratchFile,
};

// ===== MockMediaStorage =====

/// 保存されたオブジェクト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub key:      String,
    pub metadata: ObjectMetadata,
    pub contents: Vec<u8>,
    /// アップロード時点のローカルファイルパス
    pub source:   std::path::PathBuf,
}

/// アップロードされたオブジェクトを記録するストレージ
#[derive(Clone, Default)]
pub struct MockMediaStorage {
    objects: Arc<Mutex<Vec<StoredObject>>>,
    failure: Option<String>,
}

impl MockMediaStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 常に S3 エラーを返すストレージ
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            objects: Arc::default(),
            failure: Some(message.into()),
        }
    }

    pub fn objects(&self) -> Vec<StoredObject> {
        self.objects.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaStorage for MockMediaStorage {
    async fn upload_file(
        &self,
        path: &Path,
        key: &str,
        metadata: &ObjectMetadata,
    ) -> Result<(), InfraError> {
        if let Some(message) = &self.failure {
            return Err(InfraError::s3(message.clone()));
        }

        let contents = tokio::fs::read(path).await?;
        self.objects.lock().unwrap().push(StoredObject {
            key: key.to_string(),
            metadata: metadata.clone(),
            contents,
            source: path.to_path_buf(),
        });
        Ok(())
    }
}

// ===== StubMediaDownloader =====

/// 固定のペイロードを書き込む（または失敗する）ダウンローダ
#[derive(Clone, Default)]
pub struct StubMediaDownloader {
    payload:  Vec<u8>,
    status:   Option<u16>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubMediaDownloader {
    pub fn with_payload(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: payload.into(),
            ..Self::default()
        }
    }

    /// ダウンロード元が `status` を返した場合を模擬する
    pub fn with_status(status: u16) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// 受け付けたダウンロード元 URL
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaDownloader for StubMediaDownloader {
    async fn download(&self, source: &SourceUrl, dest: &ScratchFile) -> Result<u64, InfraError> {
        self.requests.lock().unwrap().push(source.as_str().to_string());

        if let Some(status) = self.status {
            return Err(InfraError::download_status(source.as_str(), status));
        }

        let mut file = dest.writer()?;
        let written = write_chunked(&mut file, &self.payload).await?;
        file.flush().await?;
        Ok(written)
    }
}
