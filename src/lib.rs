mod downloader;

pub use downloader::{Download, DownloadError, DownloadTask, Downloader, Fetcher, Response};
