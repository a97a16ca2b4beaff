mod fetcher;

use std::fmt;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use url::Url;

use fetcher::UReqFetcher;

const CHUNK_SIZE: usize = 1024;

/// A fetched HTTP response. The body is a streamed reader, consumed
/// incrementally rather than buffered in memory.
pub enum Response {
    Body(Box<dyn Read>),
    Status(u16),
    Transport(String),
}

impl Response {
    pub fn body(reader: Box<dyn Read>) -> Self {
        Self::Body(reader)
    }

    pub fn status(code: u16) -> Self {
        Self::Status(code)
    }

    pub fn transport(message: String) -> Self {
        Self::Transport(message)
    }
}

pub trait Fetcher {
    fn fetch(&self, url: &str) -> Response;
}

/// One (output filename, source URL) pair to fetch and save.
#[derive(Debug, PartialEq)]
pub struct DownloadTask {
    pub file_name: String,
    pub url: String,
}

impl DownloadTask {
    pub fn new(file_name: &str, url: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            url: url.to_string(),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum DownloadError {
    InvalidUrl,
    Status(u16),
    Transport(String),
    Io(String),
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadError::InvalidUrl => write!(f, "invalid URL"),
            DownloadError::Status(code) => write!(f, "status {}", code),
            DownloadError::Transport(message) => write!(f, "{}", message),
            DownloadError::Io(message) => write!(f, "{}", message),
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Download {
    pub source: String,
    pub file: PathBuf,
}

impl Download {
    pub fn new(source: String, file: PathBuf) -> Self {
        Self { source, file }
    }
}

pub struct Downloader<T: Fetcher> {
    fetcher: T,
    target_dir: PathBuf,
}

impl<T> Downloader<T>
where
    T: Fetcher,
{
    pub fn with_fetcher(path: &str, fetcher: T) -> io::Result<Self> {
        let target_dir = Self::create_target_dir(path)?;

        Ok(Downloader {
            fetcher,
            target_dir,
        })
    }

    /// Downloads every task in order, printing one line per task. A failed
    /// task never stops the ones after it.
    pub fn fetch_all(&self, tasks: &[DownloadTask]) -> Vec<Result<Download, DownloadError>> {
        tasks
            .iter()
            .map(|task| {
                let path = self.target_dir.join(&task.file_name);

                let result = self.download(task);

                match &result {
                    Ok(_) => println!("Downloaded: {}", path.display()),
                    Err(DownloadError::Status(code)) => {
                        println!("Failed to download {}: Status {}", path.display(), code)
                    }
                    Err(error) => println!("Error downloading {}: {}", path.display(), error),
                }

                result
            })
            .collect()
    }

    pub fn download(&self, task: &DownloadTask) -> Result<Download, DownloadError> {
        let url = Url::parse(&task.url).map_err(|_| DownloadError::InvalidUrl)?;

        let url = url.as_str();

        log::debug!("requesting {}", url);

        let response = self.fetcher.fetch(url);

        match response {
            Response::Status(code) => Err(DownloadError::Status(code)),
            Response::Transport(message) => Err(DownloadError::Transport(message)),

            Response::Body(body) => {
                let file_path = self.target_dir.join(&task.file_name);

                Self::write_chunks(body, &file_path)
                    .map_err(|error| DownloadError::Io(error.to_string()))?;

                Ok(Download::new(String::from(url), file_path))
            }
        }
    }

    pub fn clear_target(&self) {
        fs::remove_dir_all(&self.target_dir).unwrap_or_else(|_| {
            panic!("Error removing target directory: {:?}", self.target_dir);
        });
    }

    // Creates or truncates the file, then copies the body into it in
    // fixed-size chunks. A mid-stream failure leaves the partial file behind.
    fn write_chunks(mut body: Box<dyn Read>, file_path: &Path) -> io::Result<()> {
        let mut file = File::create(file_path)?;

        let mut chunk = [0u8; CHUNK_SIZE];

        loop {
            let read = body.read(&mut chunk)?;

            if read == 0 {
                break;
            }

            file.write_all(&chunk[..read])?;
        }

        Ok(())
    }

    // The path is kept as given so console lines mention the same relative
    // path the caller configured.
    fn create_target_dir(path_str: &str) -> io::Result<PathBuf> {
        let path = PathBuf::from(path_str);

        if !path.exists() {
            fs::create_dir_all(&path)?;
            log::debug!("created target directory {}", path.display());
        }

        Ok(path)
    }
}

impl Downloader<UReqFetcher> {
    pub fn new(path: &str) -> io::Result<Self> {
        let fetcher = UReqFetcher::new();
        Downloader::with_fetcher(path, fetcher)
    }
}

#[cfg(test)]
use fetcher::MockFetcher;
