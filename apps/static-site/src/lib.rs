//! # Static Site ライブラリ
//!
//! 静的ページを返す Lambda ハンドラを公開する。

pub mod config;
pub mod error;
pub mod handler;

pub use config::StaticSiteConfig;
pub use handler::StaticPageHandler;
