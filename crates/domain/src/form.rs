//! # フォームパラメータ
//!
//! `application/x-www-form-urlencoded` のリクエストボディを文字列マップに変換する。
//!
//! ## デコード規則
//!
//! - `&` で区切られたペアを `=` でキーと値に分割し、`+` と `%XX` を復号する
//! - 値が空のペア（`key=` や `key` のみ）は捨てる
//! - 同じキーが複数回現れた場合は後勝ち

use std::collections::BTreeMap;

use crate::DomainError;

/// フォームが「送信された」と見なす最小フィールド数
pub const MIN_FORM_FIELDS: usize = 3;

/// デコード済みのフォームパラメータ
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormParams(BTreeMap<String, String>);

impl FormParams {
    /// URL エンコードされた文字列をデコードする
    ///
    /// デコードは失敗しない。不正なエスケープはそのままの文字列として扱う。
    pub fn decode(body: &str) -> Self {
        Self(
            url::form_urlencoded::parse(body.as_bytes())
                .filter(|(_, value)| !value.is_empty())
                .map(|(key, value)| (key.into_owned(), value.into_owned()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// フォームが送信されたと見なせるか（[`MIN_FORM_FIELDS`] 以上のフィールド）
    pub fn is_posted(&self) -> bool {
        self.len() >= MIN_FORM_FIELDS
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// 必須フィールドを取り出す
    pub fn require(&self, key: &'static str) -> Result<&str, DomainError> {
        self.get(key).ok_or(DomainError::MissingField(key))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_decodeでキーと値が復号される() {
        let params = FormParams::decode(
            "upload_url=https%3A%2F%2Fcdn.example.com%2Fep%2F42.mp3&email=a%2Bb%40example.com&maxspeakerlabels=3",
        );

        assert_eq!(params.len(), 3);
        assert_eq!(
            params.get("upload_url"),
            Some("https://cdn.example.com/ep/42.mp3")
        );
        assert_eq!(params.get("email"), Some("a+b@example.com"));
        assert_eq!(params.get("maxspeakerlabels"), Some("3"));
    }

    #[rstest]
    #[case::空文字("")]
    #[case::区切りのみ("&&")]
    #[case::値がすべて空("a=&b=&c=")]
    fn test_decodeで有効なペアが無ければ空(#[case] body: &str) {
        assert!(FormParams::decode(body).is_empty());
    }

    #[test]
    fn test_decodeでプラスが空白になる() {
        let params = FormParams::decode("title=hello+world");
        assert_eq!(params.get("title"), Some("hello world"));
    }

    #[test]
    fn test_decodeで空の値は捨てられる() {
        let params = FormParams::decode("a=1&b=&c&d=4");

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("b"), None);
        assert_eq!(params.get("c"), None);
    }

    #[test]
    fn test_decodeで重複キーは後勝ち() {
        let params = FormParams::decode("email=first%40example.com&email=second%40example.com");

        assert_eq!(params.len(), 1);
        assert_eq!(params.get("email"), Some("second@example.com"));
    }

    #[rstest]
    #[case::空文字("", false)]
    #[case::一つ("a=1", false)]
    #[case::二つ("a=1&b=2", false)]
    #[case::空値を含む三つ("a=1&b=2&c=", false)]
    #[case::重複を含む三つ("a=1&a=2&b=3", false)]
    #[case::三つ("a=1&b=2&c=3", true)]
    #[case::四つ("a=1&b=2&c=3&d=4", true)]
    fn test_is_postedは3フィールド以上で真(#[case] body: &str, #[case] expected: bool) {
        assert_eq!(FormParams::decode(body).is_posted(), expected);
    }

    #[test]
    fn test_requireで欠けたフィールドはmissing_field() {
        let params = FormParams::decode("a=1");

        assert_eq!(params.require("a").unwrap(), "1");
        assert!(matches!(
            params.require("email"),
            Err(DomainError::MissingField("email"))
        ));
    }
}
