//! # ビジネスイベントログの構造化ヘルパー
//!
//! `jq` で調査しやすいよう、ログフィールドの命名規約とヘルパーマクロを提供する。
//!
//! [`log_business_event!`] マクロで出力したログには `event.kind = "business_event"`
//! マーカーが自動付与され、`jq 'select(.["event.kind"] == "business_event")'` で
//! フィルタできる。
//!
//! フィールドはドット記法（`event.category`、`event.action`）で記述する。

/// ビジネスイベントを構造化ログとして出力する。
///
/// `event.kind = "business_event"` マーカーを自動付与し、
/// `tracing::info!` レベルで出力する。
///
/// ## 必須フィールド（慣例）
///
/// - `event.category`: イベントカテゴリ（[`event::category`] の定数を使用）
/// - `event.action`: アクション名（[`event::action`] の定数を使用）
/// - `event.result`: 結果（[`event::result`] の定数を使用）
#[macro_export]
macro_rules! log_business_event {
    ($($args:tt)*) => {
        ::tracing::info!(
            event.kind = "business_event",
            $($args)*
        )
    };
}

/// イベントフィールドの定数
pub mod event {
    /// イベントカテゴリ
    pub mod category {
        pub const MEDIA: &str = "media";
        pub const PAGE: &str = "page";
    }

    /// イベントアクション
    pub mod action {
        pub const MEDIA_DOWNLOADED: &str = "media.downloaded";
        pub const MEDIA_UPLOADED: &str = "media.uploaded";
        pub const FORM_REJECTED: &str = "media.form_rejected";
        pub const PAGE_RENDERED: &str = "page.rendered";
    }

    /// イベント結果
    pub mod result {
        pub const SUCCESS: &str = "success";
        pub const FAILURE: &str = "failure";
    }
}
