//! # Podscribe ドメイン層
//!
//! フォーム入力の解釈とアップロード要求の組み立てを担う。
//!
//! ## 依存関係の方向
//!
//! ```text
//! apps → infra → domain
//!   ↘             ↑
//!     ────────────
//! ```
//!
//! ドメイン層はネットワークやストレージに一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層エラー
//! - [`form`] - URL エンコードされたフォームのデコード
//! - [`upload`] - ダウンロード元 URL、オブジェクトキー、メタデータ
//!
//! ## 使用例
//!
//! ```rust
//! use podscribe_domain::{form::FormParams, upload::UploadRequest};
//!
//! let params = FormParams::decode(
//!     "upload_url=https%3A%2F%2Fcdn.example.com%2Fep42.mp3&email=a%40example.com&maxspeakerlabels=2",
//! );
//! assert!(params.is_posted());
//!
//! let request = UploadRequest::from_form(&params).unwrap();
//! assert_eq!(request.object_key().unwrap(), "ep42.mp3");
//! ```

pub mod error;
pub mod form;
pub mod upload;

pub use error::DomainError;
