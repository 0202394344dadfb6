//! # メディアアップロード要求
//!
//! フォームから取り出した値を、ダウンロード元 URL・保存先オブジェクト名・
//! オブジェクトメタデータに変換する。
//!
//! ## 設計判断
//!
//! - `SourceUrl` は HTTP(S) の絶対 URL のみ受け付ける
//! - 保存先ファイル名は受け取った URL 文字列のパスの最後のセグメント
//!   （クエリ文字列は無視、パーセントエンコードの復号も付与もしない）
//! - メタデータの値はフォームの文字列をそのまま使う（形式の検証はしない）

use std::{collections::BTreeMap, fmt};

use url::Url;

use crate::{DomainError, form::FormParams};

/// ダウンロード元 URL のフィールド名
pub const UPLOAD_URL_FIELD: &str = "upload_url";
/// 通知先メールアドレスのフィールド名（メタデータキーも同名）
pub const EMAIL_FIELD: &str = "email";
/// 話者ラベル最大数のフィールド名（メタデータキーも同名）
pub const MAX_SPEAKER_LABELS_FIELD: &str = "maxspeakerlabels";

// ============================================================================
// SourceUrl
// ============================================================================

/// ダウンロード元の URL
///
/// 取得には正規化済みの [`Url`] を使い、保存先ファイル名はフォームで
/// 受け取った文字列そのものから導出する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUrl {
    raw: String,
    url: Url,
}

impl SourceUrl {
    /// 文字列から URL を解析する
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        // Url::parse と同じく前後の制御文字・空白は無視する
        let raw = raw.trim_matches(|c: char| c <= ' ');
        let url = Url::parse(raw).map_err(|source| DomainError::InvalidUrl {
            url: raw.to_string(),
            source,
        })?;

        match url.scheme() {
            "http" | "https" => Ok(Self {
                raw: raw.to_string(),
                url,
            }),
            other => Err(DomainError::UnsupportedScheme(other.to_string())),
        }
    }

    pub fn as_url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// URL のパス部分（正規化・エンコード済み）
    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// パスの最後のセグメントを保存先ファイル名として返す
    ///
    /// 受け取った文字列のパス部分（スキーム・オーソリティ・クエリ・フラグメントを除く）
    /// を `/` で区切った最後の要素。正規化もエンコードの変換もしない。
    pub fn file_name(&self) -> Result<&str, DomainError> {
        match raw_path(&self.raw).rsplit('/').next() {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(DomainError::NoFileName(self.raw.clone())),
        }
    }
}

/// 生の URL 文字列からパス部分を切り出す
fn raw_path(raw: &str) -> &str {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    let without_query = &raw[..end];
    let after_scheme = without_query
        .split_once(':')
        .map_or(without_query, |(_, rest)| rest);

    match after_scheme.strip_prefix("//") {
        Some(authority_and_path) => authority_and_path
            .find('/')
            .map_or("", |slash| &authority_and_path[slash..]),
        None => after_scheme,
    }
}

impl fmt::Display for SourceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ObjectMetadata
// ============================================================================

/// 保存オブジェクトに付与するメタデータ
///
/// ストレージにとっては不透明なキーと値の組。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectMetadata(BTreeMap<String, String>);

impl ObjectMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ObjectMetadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ============================================================================
// UploadRequest
// ============================================================================

/// 1 回の呼び出しで処理するアップロード要求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    source:             SourceUrl,
    email:              String,
    max_speaker_labels: String,
}

impl UploadRequest {
    /// フォームパラメータから組み立てる
    ///
    /// フィールド数の検証（[`FormParams::is_posted`]）は呼び出し側の責務。
    pub fn from_form(params: &FormParams) -> Result<Self, DomainError> {
        let source = SourceUrl::parse(params.require(UPLOAD_URL_FIELD)?)?;
        let email = params.require(EMAIL_FIELD)?.to_string();
        let max_speaker_labels = params.require(MAX_SPEAKER_LABELS_FIELD)?.to_string();

        Ok(Self {
            source,
            email,
            max_speaker_labels,
        })
    }

    pub fn source(&self) -> &SourceUrl {
        &self.source
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn max_speaker_labels(&self) -> &str {
        &self.max_speaker_labels
    }

    /// 保存先のオブジェクトキー
    pub fn object_key(&self) -> Result<&str, DomainError> {
        self.source.file_name()
    }

    /// 保存オブジェクトに付与するメタデータ
    pub fn metadata(&self) -> ObjectMetadata {
        ObjectMetadata::from_iter([
            (EMAIL_FIELD, self.email.as_str()),
            (MAX_SPEAKER_LABELS_FIELD, self.max_speaker_labels.as_str()),
        ])
    }
}
