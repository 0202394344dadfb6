//! # Observability 基盤
//!
//! トレーシング初期化とログ出力形式の設定を提供する。
//! 2つの Lambda（static-site / upload-to-s3）で共通のログ初期化ロジックを集約する。
//!
//! ログレベルはプロセス全体の静的状態ではなく、各ハンドラのエントリーポイントが
//! [`TracingConfig`] として明示的に組み立てて渡す。

/// Lambda 実行環境で必ず設定される環境変数
const LAMBDA_FUNCTION_NAME_ENV: &str = "AWS_LAMBDA_FUNCTION_NAME";

/// ログ出力形式
///
/// 環境変数 `LOG_FORMAT` で切り替える。
/// 未設定の場合、Lambda 上では [`Json`](LogFormat::Json)、ローカルでは
/// [`Pretty`](LogFormat::Pretty) を使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// JSON 形式（CloudWatch Logs 向け）
    Json,
    /// 人間が読みやすい形式（ローカル実行向け）
    #[default]
    Pretty,
}

impl LogFormat {
    /// 文字列からログ形式をパースする
    ///
    /// 不正な値の場合は [`Pretty`](LogFormat::Pretty) にフォールバックし、
    /// stderr に警告を出力する。
    pub fn parse(s: &str) -> Self {
        match s {
            "json" => Self::Json,
            "pretty" => Self::Pretty,
            other => {
                eprintln!("WARNING: unknown LOG_FORMAT={other:?}, falling back to pretty");
                Self::Pretty
            }
        }
    }

    /// 環境変数 `LOG_FORMAT` から読み取る
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT") {
            Ok(val) => Self::parse(&val),
            Err(_) => Self::default_for(std::env::var_os(LAMBDA_FUNCTION_NAME_ENV).is_some()),
        }
    }

    /// `LOG_FORMAT` 未設定時のデフォルト
    fn default_for(on_lambda: bool) -> Self {
        if on_lambda { Self::Json } else { Self::default() }
    }
}

/// トレーシング初期化設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// サービス名（JSON ログの `span.service` フィールドに出力）
    pub service_name:      String,
    /// ログ出力形式
    pub log_format:        LogFormat,
    /// `RUST_LOG` 未設定時に使うフィルタ（例: `"warn"`, `"info,podscribe=debug"`）
    pub default_directive: String,
}

impl TracingConfig {
    /// 新しい設定を作成する
    pub fn new(
        service_name: impl Into<String>,
        log_format: LogFormat,
        default_directive: impl Into<String>,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
            default_directive: default_directive.into(),
        }
    }

    /// 環境変数から設定を読み取る
    ///
    /// `LOG_FORMAT` 環境変数で出力形式を決定する。
    pub fn from_env(service_name: impl Into<String>, default_directive: impl Into<String>) -> Self {
        Self::new(service_name, LogFormat::from_env(), default_directive)
    }
}

/// トレーシングを初期化する
///
/// `RUST_LOG` 環境変数でログレベルを制御可能。
/// 未設定の場合は [`TracingConfig::default_directive`] を使う。
///
/// JSON モードでは以下のフィールドがトップレベルに出力される:
/// - `timestamp`, `level`, `target`, `message`
///
/// `ErrorLayer` を登録するため、インフラ層エラーの `SpanTrace` にスパン情報が残る。
#[cfg(feature = "observability")]
pub fn init_tracing(config: TracingConfig) {
    use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.default_directive.as_str().into());

    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_target(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .init();
}
