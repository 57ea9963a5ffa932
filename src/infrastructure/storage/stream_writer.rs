use std::path::Path;
use tokio::fs::OpenOptions;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt, BufWriter};

use crate::application::ports::StorageError;

/// Buffer size for I/O operations. 64KB keeps per-upload memory small while
/// still writing in large chunks.
const BUFFER_SIZE: usize = 64 * 1024;

/// Streams an upload to disk while enforcing a byte cap.
pub struct StreamWriter;

impl StreamWriter {
    /// Copy `reader` into a new file at `dest_path`.
    ///
    /// The file is created with create-new semantics, so an existing file is
    /// never overwritten. Returns the number of bytes written, or
    /// [`StorageError::LimitExceeded`] as soon as more than `max_bytes` bytes
    /// have been read. The caller owns removal of the partial file.
    ///
    /// With `durable` set, the file is fsynced before returning.
    pub async fn write_capped(
        dest_path: &Path,
        mut reader: impl AsyncRead + Unpin,
        max_bytes: u64,
        durable: bool,
    ) -> Result<u64, StorageError> {
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(dest_path)
            .await?;
        let mut writer = BufWriter::with_capacity(BUFFER_SIZE, file);

        let mut total_bytes = 0u64;
        let mut buffer = vec![0u8; BUFFER_SIZE];

        loop {
            let n = reader.read(&mut buffer).await?;
            if n == 0 {
                break;
            }

            total_bytes += n as u64;
            if total_bytes > max_bytes {
                return Err(StorageError::LimitExceeded { limit: max_bytes });
            }

            writer.write_all(&buffer[..n]).await?;
        }

        writer.flush().await?;

        if durable {
            writer.get_mut().sync_all().await?;
        }

        Ok(total_bytes)
    }
}
