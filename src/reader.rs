use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, BufReader};
use tracing::{debug, info, warn};

/// Why an input text could not be loaded
#[derive(Debug, Error)]
pub enum InputError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl InputError {
    fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { path: path.to_path_buf() }
        } else {
            Self::Io { path: path.to_path_buf(), source }
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path } | Self::Io { path, .. } => path,
        }
    }
}

/// Configuration for file reading behavior
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Whether a batch stops at the first unreadable file
    pub fail_fast: bool,
    /// Buffer size for async reading (default: 8KB)
    pub buffer_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            buffer_size: 8192,
        }
    }
}

/// Statistics for one read
#[derive(Debug, Clone)]
pub struct ReadStats {
    pub file_path: String,
    pub bytes_read: u64,
    pub duration_ms: u64,
}

/// Async whole-file text reader
pub struct TextReader {
    config: ReaderConfig,
}

impl TextReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Read a UTF-8 text file; invalid UTF-8 surfaces as `InputError::Io`
    pub async fn read_text<P: AsRef<Path>>(&self, file_path: P) -> Result<(String, ReadStats), InputError> {
        let path = file_path.as_ref();
        let start_time = Instant::now();

        debug!("Starting async read of file: {}", path.display());

        let file = File::open(path).await.map_err(|e| {
            warn!("Failed to open file {}: {}", path.display(), e);
            InputError::from_io(path, e)
        })?;

        let mut reader = BufReader::with_capacity(self.config.buffer_size, file);
        let mut content = String::new();
        reader.read_to_string(&mut content).await.map_err(|e| {
            warn!("Failed to read {}: {}", path.display(), e);
            InputError::from_io(path, e)
        })?;

        let stats = ReadStats {
            file_path: path.display().to_string(),
            bytes_read: content.len() as u64,
            duration_ms: start_time.elapsed().as_millis() as u64,
        };
        info!(
            "Read {}: {} bytes in {}ms",
            stats.file_path, stats.bytes_read, stats.duration_ms
        );

        Ok((content, stats))
    }
}

/// Read a single file with default configuration
pub async fn read_text_file<P: AsRef<Path>>(file_path: P) -> Result<String, InputError> {
    let reader = TextReader::new(ReaderConfig::default());
    let (content, _stats) = reader.read_text(file_path).await?;
    Ok(content)
}

/// Read all of stdin as text
pub async fn read_stdin() -> Result<String, InputError> {
    let mut content = String::new();
    tokio::io::stdin()
        .read_to_string(&mut content)
        .await
        .map_err(|source| InputError::Io { path: PathBuf::from("-"), source })?;
    Ok(content)
}
