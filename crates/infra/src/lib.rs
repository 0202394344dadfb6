//! # Podscribe インフラ層
//!
//! 外部システムとの通信とローカルリソースの管理を担当する。
//!
//! ## 責務
//!
//! - **ダウンロード**: HTTP でメディアをストリーミング取得する
//! - **一時ファイル**: 呼び出しスコープに閉じたスクラッチファイルの管理
//! - **ストレージ**: S3 へのメタデータ付きアップロード
//!
//! ## 依存関係
//!
//! ```text
//! apps → infra → domain
//! ```
//!
//! 各外部システムはトレイト（[`MediaDownloader`], [`MediaStorage`]）の裏に置き、
//! ハンドラのテストではスタブに差し替える。
//!
//! ## モジュール構成
//!
//! - [`download`] - HTTP ダウンローダ
//! - [`error`] - インフラ層エラー定義
//! - [`s3`] - S3 メディアストレージ
//! - [`scratch`] - 一時ファイルのリソースガード

pub mod download;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod s3;
pub mod scratch;

pub use download::{HttpMediaDownloader, MediaDownloader};
pub use error::{InfraError, InfraErrorKind};
pub use s3::{AwsS3MediaStorage, MediaStorage};
pub use scratch::ScratchFile;
