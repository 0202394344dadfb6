//! # Static Site 設定
//!
//! 環境変数から静的ページハンドラの設定を読み込む。

use std::{env, path::PathBuf};

/// ページファイルのデフォルトパス（実行ルートからの相対パス）
pub const DEFAULT_INDEX_PATH: &str = "index.html";

/// Static Site ハンドラの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticSiteConfig {
    /// 返す HTML ファイル
    pub index_path: PathBuf,
}

impl StaticSiteConfig {
    pub fn new(index_path: impl Into<PathBuf>) -> Self {
        Self {
            index_path: index_path.into(),
        }
    }

    /// 環境変数から設定を読み込む
    ///
    /// `STATIC_INDEX_PATH` が未設定なら [`DEFAULT_INDEX_PATH`] を使う。
    pub fn from_env() -> Self {
        Self::new(env::var("STATIC_INDEX_PATH").unwrap_or_else(|_| DEFAULT_INDEX_PATH.to_string()))
    }
}

impl Default for StaticSiteConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INDEX_PATH)
    }
}
