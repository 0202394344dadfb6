//! # インフラ層エラー定義
//!
//! ファイル I/O、HTTP ダウンロード、S3 アップロードで発生するエラーを表現する。
//!
//! ## 設計方針
//!
//! - **エラーの変換**: `std::io::Error`, `reqwest::Error` をラップ
//! - **SpanTrace 自動捕捉**: `From` 実装や convenience constructor で
//!   エラー生成時の呼び出し経路を自動記録する
//! - **種別タグ**: [`InfraError::kind_name`] がレスポンスの `error.type` になる
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別（Io, Http, S3 等）

use std::fmt;

use derive_more::Display;
use strum::IntoStaticStr;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// エラー種別（[`InfraErrorKind`]）と [`SpanTrace`]（呼び出し経路）を保持する。
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error, IntoStaticStr)]
pub enum InfraErrorKind {
    /// 一時ファイルの作成・書き込み・削除の失敗
    #[error("ファイル I/O エラー: {0}")]
    Io(#[source] std::io::Error),

    /// HTTP リクエストの送信・受信の失敗（接続不可、DNS 解決失敗など）
    #[error("HTTP リクエストエラー: {0}")]
    Http(#[source] reqwest::Error),

    /// ダウンロード元が成功以外のステータスを返した
    #[error("ダウンロード元がステータス {status} を返しました: {url}")]
    DownloadStatus {
        /// ダウンロード元 URL
        url:    String,
        /// HTTP ステータスコード
        status: u16,
    },

    /// S3 エラー
    ///
    /// AWS SDK のエラー型はジェネリクスが深く `#[from]` が困難なため、
    /// 手動で String にマップする。
    #[error("S3 エラー: {0}")]
    S3(String),
}

// ===== InfraError のメソッド =====

impl InfraError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    /// エラー種別のタグ（バリアント名）
    pub fn kind_name(&self) -> &'static str {
        (&self.kind).into()
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    // ===== Convenience constructors =====

    /// ダウンロードステータスエラーを生成する
    pub fn download_status(url: impl Into<String>, status: u16) -> Self {
        Self {
            kind:       InfraErrorKind::DownloadStatus {
                url: url.into(),
                status,
            },
            span_trace: SpanTrace::capture(),
        }
    }

    /// S3 エラーを生成する
    pub fn s3(msg: impl Into<String>) -> Self {
        Self {
            kind:       InfraErrorKind::S3(msg.into()),
            span_trace: SpanTrace::capture(),
        }
    }
}

// ===== トレイト実装 =====

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}

// ===== From 実装（SpanTrace 自動キャプチャ） =====

impl From<std::io::Error> for InfraError {
    fn from(source: std::io::Error) -> Self {
        Self {
            kind:       InfraErrorKind::Io(source),
            span_trace: SpanTrace::capture(),
        }
    }
}

impl From<reqwest::Error> for InfraError {
    fn from(source: reqwest::Error) -> Self {
        Self {
            kind:       InfraErrorKind::Http(source),
            span_trace: SpanTrace::capture(),
        }
    }
}
