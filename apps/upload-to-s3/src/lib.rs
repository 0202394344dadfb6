//! # Upload to S3 ライブラリ
//!
//! フォームで受け取ったメディア URL をダウンロードし、S3 に保存する
//! Lambda ハンドラを公開する。

pub mod config;
pub mod error;
pub mod handler;

pub use config::UploadConfig;
pub use error::UploadError;
pub use handler::MediaUploadHandler;
