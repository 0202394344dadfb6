//! # メディアのダウンロード
//!
//! ダウンロード元 URL にストリーミング GET を発行し、受信したデータを
//! 固定長チャンクで一時ファイルに追記する。ペイロード全体をメモリに載せない。
//!
//! ダウンロード元が成功以外のステータスを返した場合は、エラーページ等を
//! 書き込まずに [`InfraErrorKind::DownloadStatus`](crate::error::InfraErrorKind::DownloadStatus)
//! で失敗する。

use async_trait::async_trait;
use podscribe_domain::upload::SourceUrl;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::{InfraError, scratch::ScratchFile};

/// 一時ファイルへの書き込み単位（バイト）
pub const DOWNLOAD_CHUNK_SIZE: usize = 512;

/// メディアダウンローダのインターフェース
///
/// テスト時はスタブに差し替え可能。
#[async_trait]
pub trait MediaDownloader: Send + Sync {
    /// `source` の内容を `dest` に書き込み、書き込んだバイト数を返す
    async fn download(&self, source: &SourceUrl, dest: &ScratchFile) -> Result<u64, InfraError>;
}

/// reqwest を使った [`MediaDownloader`] の実装
///
/// 認証なし。タイムアウトとリトライは設定しない（実行環境の制限に従う）。
#[derive(Debug, Clone, Default)]
pub struct HttpMediaDownloader {
    client: reqwest::Client,
}

impl HttpMediaDownloader {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MediaDownloader for HttpMediaDownloader {
    #[tracing::instrument(skip_all, level = "debug", fields(source = %source))]
    async fn download(&self, source: &SourceUrl, dest: &ScratchFile) -> Result<u64, InfraError> {
        let mut response = self.client.get(source.as_url().clone()).send().await?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "ダウンロード元のステータスコード");
        if !status.is_success() {
            return Err(InfraError::download_status(source.as_str(), status.as_u16()));
        }

        let mut file = dest.writer()?;
        let mut written = 0;
        while let Some(piece) = response.chunk().await? {
            written += write_chunked(&mut file, &piece).await?;
        }
        file.flush().await?;

        tracing::debug!(bytes = written, path = %dest.path().display(), "ダウンロードが完了しました");
        Ok(written)
    }
}

/// 受信した断片を [`DOWNLOAD_CHUNK_SIZE`] ごとに順に書き込む
///
/// 空の断片は何も書き込まない。
pub async fn write_chunked<W>(writer: &mut W, piece: &[u8]) -> Result<u64, InfraError>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut written = 0;
    for chunk in piece.chunks(DOWNLOAD_CHUNK_SIZE) {
        writer.write_all(chunk).await?;
        written += chunk.len() as u64;
    }
    Ok(written)
}
