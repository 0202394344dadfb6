//! # Podscribe 共有ユーティリティ
//!
//! 2つの Lambda ハンドラとインフラ層から使われる共通ユーティリティ。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - 外部クレートへの依存は最小限に抑える（subscriber 初期化は `observability` feature）

pub mod event_log;
pub mod lambda_response;
pub mod observability;

pub use lambda_response::{ErrorBody, LambdaResponse, ReportableError};
