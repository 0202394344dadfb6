//! # 一時ファイルのリソースガード
//!
//! 1 回の呼び出しだけが所有する一時ファイル。
//!
//! - [`ScratchFile::acquire`] で作成し、[`ScratchFile::release`] で明示的に削除する
//! - `release` を呼ばずにスコープを抜けた場合（`?` による早期リターン等）も
//!   `Drop` で削除される
//! - ファイル名にはランダムな接尾辞が付くため、呼び出し間で共有されない

use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};

use crate::InfraError;

/// 一時ファイル名の接頭辞
const SCRATCH_PREFIX: &str = "podscribe-";

/// 呼び出しスコープに閉じた一時ファイル
#[derive(Debug)]
pub struct ScratchFile {
    inner: NamedTempFile,
}

impl ScratchFile {
    /// OS の一時ディレクトリに一時ファイルを作成する
    pub fn acquire() -> Result<Self, InfraError> {
        let inner = Builder::new().prefix(SCRATCH_PREFIX).tempfile()?;
        tracing::debug!(path = %inner.path().display(), "一時ファイルを作成しました");
        Ok(Self { inner })
    }

    /// 指定ディレクトリに一時ファイルを作成する
    pub fn acquire_in(dir: impl AsRef<Path>) -> Result<Self, InfraError> {
        let inner = Builder::new().prefix(SCRATCH_PREFIX).tempfile_in(dir)?;
        tracing::debug!(path = %inner.path().display(), "一時ファイルを作成しました");
        Ok(Self { inner })
    }

    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    /// 書き込み用のハンドルを開く
    ///
    /// 先頭から書き込む。1 回の呼び出しで 1 度だけ使う想定。
    pub fn writer(&self) -> Result<tokio::fs::File, InfraError> {
        let file = self.inner.reopen()?;
        Ok(tokio::fs::File::from_std(file))
    }

    /// 一時ファイルを削除する
    ///
    /// 削除に失敗した場合はエラーを返す（`Drop` 任せの場合は失敗が黙殺される）。
    pub fn release(self) -> Result<(), InfraError> {
        let path: PathBuf = self.inner.path().to_path_buf();
        self.inner.close()?;
        tracing::debug!(path = %path.display(), "一時ファイルを削除しました");
        Ok(())
    }
}
