use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use once_cell::sync::Lazy;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::error::{AppError, AppResult, SinkError};

const QUEUE_CAPACITY: usize = 64;

/// Live writers keyed by resolved file path; one task per file per process.
static WRITERS: Lazy<Mutex<HashMap<PathBuf, AppendLog>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

struct AppendRequest {
    lines: Vec<String>,
    ack: oneshot::Sender<AppResult<()>>,
}

/// Handle to the writer task that owns one append-only file.
///
/// Every batch is written by the task alone with an open / write / flush /
/// close sequence, so concurrent callers never interleave within a line.
/// All handles for the same file share one task, including handles obtained
/// by separate [`AppendLog::spawn`] calls. When `header` is set it is written
/// first whenever the file is empty.
#[derive(Debug, Clone)]
pub struct AppendLog {
    path: PathBuf,
    tx: mpsc::Sender<AppendRequest>,
}

impl AppendLog {
    /// Returns the writer for `path`, starting it if no live writer exists.
    ///
    /// The header of the first live writer wins. Must be called from within
    /// a tokio runtime.
    #[must_use]
    pub fn spawn(path: PathBuf, header: Option<String>) -> Self {
        let key = resolve(&path);
        let mut writers = WRITERS.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = writers.get(&key).filter(|log| !log.tx.is_closed()) {
            return existing.clone();
        }

        let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
        tokio::spawn(run_writer(path.clone(), header, rx));
        let log = Self { path, tx };
        writers.insert(key, log.clone());
        log
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one line and waits until it is flushed.
    ///
    /// # Errors
    ///
    /// Same as [`AppendLog::append_lines`].
    pub async fn append(&self, line: String) -> AppResult<()> {
        self.append_lines(vec![line]).await
    }

    /// Appends `lines` with a single write and waits until it is flushed.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::EmbeddedNewline`] if any line contains a line
    /// break, [`SinkError::WriterClosed`] if the writer task is gone, or the
    /// open or write failure reported by the writer.
    pub async fn append_lines(&self, lines: Vec<String>) -> AppResult<()> {
        if lines.iter().any(|line| line.contains(['\n', '\r'])) {
            return Err(AppError::sink(SinkError::EmbeddedNewline {
                path: self.path.clone(),
            }));
        }
        if lines.is_empty() {
            return Ok(());
        }
        let (ack, done) = oneshot::channel();
        self.tx
            .send(AppendRequest { lines, ack })
            .await
            .map_err(|_closed| self.closed())?;
        done.await.map_err(|_dropped| self.closed())?
    }

    fn closed(&self) -> AppError {
        AppError::sink(SinkError::WriterClosed {
            path: self.path.clone(),
        })
    }
}

/// Absolute form of `path`, also for files that do not exist yet.
fn resolve(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_missing| {
        let parent = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::canonicalize(parent)
            .ok()
            .zip(path.file_name())
            .map_or_else(|| path.to_path_buf(), |(dir, name)| dir.join(name))
    })
}

async fn run_writer(path: PathBuf, header: Option<String>, mut rx: mpsc::Receiver<AppendRequest>) {
    while let Some(request) = rx.recv().await {
        let result = append_batch(&path, header.as_deref(), &request.lines).await;
        if request.ack.send(result).is_err() {
            debug!("Append caller for {} went away", path.display());
        }
    }
    debug!("Writer for {} stopped", path.display());
}

async fn append_batch(path: &Path, header: Option<&str>, lines: &[String]) -> AppResult<()> {
    let open_error = |err| {
        AppError::sink(SinkError::Open {
            path: path.to_path_buf(),
            source: err,
        })
    };
    let write_error = |err| {
        AppError::sink(SinkError::Write {
            path: path.to_path_buf(),
            source: err,
        })
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(open_error)?;

    let mut payload = String::new();
    if let Some(header) = header {
        let length = file.metadata().await.map_err(open_error)?.len();
        if length == 0 {
            payload.push_str(header);
            payload.push('\n');
        }
    }
    for line in lines {
        payload.push_str(line);
        payload.push('\n');
    }

    file.write_all(payload.as_bytes()).await.map_err(write_error)?;
    file.flush().await.map_err(write_error)?;
    Ok(())
}
