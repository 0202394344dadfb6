//! # ドメイン層エラー定義
//!
//! フォーム入力からアップロード要求を組み立てる際の失敗を表現する。
//!
//! ## 設計方針
//!
//! - **型による分類**: エラーの種類を列挙型で明示し、パターンマッチで処理可能に
//! - **thiserror 活用**: `#[error(...)]` マクロでエラーメッセージを自動生成
//! - **種別タグ**: `strum::IntoStaticStr` でバリアント名をレスポンスの `error.type` に使う
//!
//! フィールド数不足（フォーム未送信）はここには含めない。それはエラーではなく
//! ハンドラが直接返すバリデーション応答である。

use strum::IntoStaticStr;
use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error, IntoStaticStr)]
pub enum DomainError {
    /// フォームに必須フィールドが含まれていない
    #[error("フォームに必須フィールドがありません: '{0}'")]
    MissingField(&'static str),

    /// URL として解析できない
    #[error("URL を解析できません: {url}: {source}")]
    InvalidUrl {
        url:    String,
        #[source]
        source: url::ParseError,
    },

    /// HTTP(S) 以外のスキーム
    #[error("サポートされていないスキームです: {0}")]
    UnsupportedScheme(String),

    /// URL のパスからファイル名を導出できない（末尾が `/` など）
    #[error("URL からファイル名を導出できません: {0}")]
    NoFileName(String),
}

impl DomainError {
    /// エラー種別のタグ（バリアント名）
    pub fn kind_name(&self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_nameがバリアント名を返す() {
        assert_eq!(
            DomainError::MissingField("email").kind_name(),
            "MissingField"
        );
        assert_eq!(
            DomainError::NoFileName("https://example.com/".to_string()).kind_name(),
            "NoFileName"
        );
    }

    #[test]
    fn test_missing_fieldのメッセージにフィールド名が含まれる() {
        let err = DomainError::MissingField("upload_url");
        assert_eq!(
            err.to_string(),
            "フォームに必須フィールドがありません: 'upload_url'"
        );
    }
}
