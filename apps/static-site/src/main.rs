//! # Static Site Lambda
//!
//! アップロードフォームの HTML ページを返す Lambda 関数。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `STATIC_INDEX_PATH` | No | 返す HTML ファイル（デフォルト: `index.html`） |
//! | `LOG_FORMAT` | No | `json` / `pretty`（Lambda 上のデフォルト: `json`） |
//! | `RUST_LOG` | No | ログフィルタ（デフォルト: `warn`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # ローカル（cargo-lambda）
//! cargo lambda watch -p podscribe-static-site
//! cargo lambda invoke podscribe-static-site --data-ascii '{}'
//! ```

use lambda_runtime::{run, service_fn};
use podscribe_shared::observability::TracingConfig;
use podscribe_static_site::{StaticPageHandler, StaticSiteConfig};

/// `RUST_LOG` 未設定時のログレベル
const DEFAULT_LOG_DIRECTIVE: &str = "warn";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("static-site", DEFAULT_LOG_DIRECTIVE);
    podscribe_shared::observability::init_tracing(tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = "static-site").entered();

    let config = StaticSiteConfig::from_env();
    tracing::info!(path = %config.index_path.display(), "Static Site Lambda を起動します");

    let handler = StaticPageHandler::new(config);
    let handler = &handler;
    run(service_fn(move |event| handler.handle(event)))
        .await
        .map_err(|e| anyhow::anyhow!(e))
}
