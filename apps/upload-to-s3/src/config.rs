//! # Upload to S3 設定
//!
//! 環境変数からアップロードハンドラの設定を読み込む。

use std::{env, path::PathBuf};

use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 必須の環境変数が未設定または空
    #[error("{0} が設定されていません")]
    Missing(&'static str),
}

/// Upload to S3 ハンドラの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadConfig {
    /// 保存先バケット名
    pub media_bucket:    String,
    /// S3 互換エンドポイント（MinIO 等）。`None` なら AWS S3
    pub s3_endpoint_url: Option<String>,
    /// 一時ファイルの作成先。`None` なら OS の一時ディレクトリ
    pub scratch_dir:     Option<PathBuf>,
}

impl UploadConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// 空文字列は未設定として扱う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        Ok(Self {
            media_bucket:    get("MEDIA_BUCKET").ok_or(ConfigError::Missing("MEDIA_BUCKET"))?,
            s3_endpoint_url: get("S3_ENDPOINT_URL"),
            scratch_dir:     get("SCRATCH_DIR").map(PathBuf::from),
        })
    }
}
