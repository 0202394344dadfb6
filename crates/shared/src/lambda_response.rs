//! # Lambda レスポンスエンベロープ
//!
//! 全ハンドラで共通のレスポンス形式を提供する。
//!
//! ```text
//! { "statusCode": 200, "headers"?: {...}, "body"?: "...", "error"?: { "type"?: "...", "description": "..." } }
//! ```
//!
//! ## 設計
//!
//! - `LambdaResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - 未設定のオプションフィールドは JSON に出力しない
//! - ハンドラ内部は `Result<LambdaResponse, E>` で組み立て、境界で
//!   [`LambdaResponse::from_result`] によってエラーエンベロープに変換する
//! - バリデーション失敗は `type` を持たないエンベロープを直接返す

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// `content-type` ヘッダー名
pub const CONTENT_TYPE: &str = "content-type";

/// レスポンスとして報告可能なエラー
///
/// `kind_name()` はエラー種別のタグで、レスポンスの `error.type` に出力される。
pub trait ReportableError: std::error::Error {
    /// エラー種別のタグ（例: `"NotFound"`, `"DownloadStatus"`）
    fn kind_name(&self) -> &'static str;
}

/// エラーオブジェクト
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub error_type:  Option<String>,
    pub description: String,
}

/// ハンドラの応答
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LambdaResponse {
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers:     Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body:        Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error:       Option<ErrorBody>,
}

impl LambdaResponse {
    /// 200 OK（ボディのみ）
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            headers:     None,
            body:        Some(body.into()),
            error:       None,
        }
    }

    /// 200 OK（`content-type: text/html`）
    pub fn html(body: impl Into<String>) -> Self {
        let headers = BTreeMap::from([(CONTENT_TYPE.to_string(), "text/html".to_string())]);
        Self {
            headers: Some(headers),
            ..Self::ok(body)
        }
    }

    /// 500 バリデーション失敗
    ///
    /// 例外経路を通らない早期リターン用。`error.type` は出力しない。
    pub fn validation_failure(description: impl Into<String>) -> Self {
        Self {
            status_code: 500,
            headers:     None,
            body:        None,
            error:       Some(ErrorBody {
                error_type:  None,
                description: description.into(),
            }),
        }
    }

    /// 500 予期しないエラー
    pub fn failure(error_type: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            status_code: 500,
            headers:     None,
            body:        None,
            error:       Some(ErrorBody {
                error_type:  Some(error_type.into()),
                description: description.into(),
            }),
        }
    }

    /// エラーをログに出力し、エラーエンベロープに変換する
    pub fn from_error<E: ReportableError>(err: &E) -> Self {
        let kind = err.kind_name();
        tracing::error!(error.kind = kind, "ハンドラの実行に失敗しました: {err}");
        Self::failure(kind, err.to_string())
    }

    /// ハンドラ境界のアダプタ
    ///
    /// 成功はそのまま返し、失敗は [`from_error`](Self::from_error) で 500 に変換する。
    pub fn from_result<E: ReportableError>(result: Result<Self, E>) -> Self {
        result.unwrap_or_else(|err| Self::from_error(&err))
    }

    /// 成功レスポンスかどうか
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}
