//! # Upload to S3 エラー定義
//!
//! ハンドラ内で発生する予期しないエラー。境界で 500 のエラーエンベロープに変換され、
//! `error.type` には下位エラーの種別タグがそのまま出力される。

use podscribe_domain::DomainError;
use podscribe_infra::InfraError;
use podscribe_shared::ReportableError;
use thiserror::Error;

/// Upload to S3 ハンドラで発生するエラー
#[derive(Debug, Error)]
pub enum UploadError {
    /// イベントに `body` が無い、または文字列でも `null` でもない
    #[error("イベントに body がありません")]
    MissingBody,

    /// フォームからアップロード要求を組み立てられない
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// ダウンロード・一時ファイル・S3 のいずれかで失敗
    #[error(transparent)]
    Infra(#[from] InfraError),
}

impl ReportableError for UploadError {
    fn kind_name(&self) -> &'static str {
        match self {
            UploadError::MissingBody => "MissingBody",
            UploadError::Domain(e) => e.kind_name(),
            UploadError::Infra(e) => e.kind_name(),
        }
    }
}
