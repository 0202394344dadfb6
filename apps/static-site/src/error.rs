//! # Static Site エラー定義
//!
//! ページファイルの読み込み失敗と、レスポンスの `error.type` への対応付け。

use std::{io, path::PathBuf};

use podscribe_shared::ReportableError;
use thiserror::Error;

/// Static Site ハンドラで発生するエラー
#[derive(Debug, Error)]
pub enum StaticPageError {
    /// ページファイルを読み込めない（存在しない、権限がない、UTF-8 でない）
    #[error("{}: {source}", .path.display())]
    Read {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ReportableError for StaticPageError {
    fn kind_name(&self) -> &'static str {
        match self {
            StaticPageError::Read { source, .. } => match source.kind() {
                io::ErrorKind::NotFound => "NotFound",
                io::ErrorKind::PermissionDenied => "PermissionDenied",
                io::ErrorKind::InvalidData => "InvalidData",
                io::ErrorKind::IsADirectory => "IsADirectory",
                _ => "Io",
            },
        }
    }
}
