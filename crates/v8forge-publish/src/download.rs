use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use reqwest::blocking::Client;

use crate::PublishError;

const PROGRESS_INTERVAL: Duration = Duration::from_secs(5);
const CHUNK_SIZE: usize = 64 * 1024;

/// Emits at most one percentage per interval while bytes arrive.
#[derive(Debug)]
pub struct DownloadProgress {
    started: Instant,
    total: Option<u64>,
    last_interval: u64,
}

impl DownloadProgress {
    pub fn new(started: Instant, total: Option<u64>) -> Self {
        Self {
            started,
            total: total.filter(|total| *total > 0),
            last_interval: 0,
        }
    }

    pub fn tick(&mut self, now: Instant, received: u64) -> Option<u64> {
        let elapsed = now.saturating_duration_since(self.started);
        let interval = elapsed.as_secs() / PROGRESS_INTERVAL.as_secs();
        if interval <= self.last_interval {
            return None;
        }
        self.last_interval = interval;
        let total = self.total?;
        Some((100 * received / total).min(100))
    }
}

/// Fetches `url` into `dest` and returns the number of bytes written.
pub fn download(url: &str, dest: &Path) -> Result<u64, PublishError> {
    let request_error = |source| PublishError::Download {
        url: url.to_string(),
        source,
    };
    let client = Client::builder()
        .user_agent("v8forge")
        .build()
        .map_err(request_error)?;
    tracing::info!(url, dest = %dest.display(), "downloading");
    let mut response = client.get(url).send().map_err(request_error)?;
    if !response.status().is_success() {
        return Err(PublishError::HttpStatus {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(PublishError::io(parent))?;
    }
    let mut output = fs::File::create(dest).map_err(PublishError::io(dest))?;
    let mut progress = DownloadProgress::new(Instant::now(), response.content_length());
    let mut buffer = vec![0u8; CHUNK_SIZE];
    let mut received = 0u64;
    loop {
        let read = response.read(&mut buffer).map_err(PublishError::io(dest))?;
        if read == 0 {
            break;
        }
        output
            .write_all(&buffer[..read])
            .map_err(PublishError::io(dest))?;
        received += read as u64;
        if let Some(percent) = progress.tick(Instant::now(), received) {
            tracing::info!("download progress: {:>3}%", percent);
        }
    }
    output.flush().map_err(PublishError::io(dest))?;
    tracing::info!(bytes = received, "download finished");
    Ok(received)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_reports_once_per_interval() {
        let start = Instant::now();
        let mut progress = DownloadProgress::new(start, Some(200));

        assert_eq!(progress.tick(start + Duration::from_secs(1), 10), None);
        assert_eq!(progress.tick(start + Duration::from_secs(5), 50), Some(25));
        assert_eq!(progress.tick(start + Duration::from_secs(7), 80), None);
        assert_eq!(progress.tick(start + Duration::from_secs(11), 200), Some(100));
    }

    #[test]
    fn unknown_size_is_silent() {
        let start = Instant::now();
        let mut progress = DownloadProgress::new(start, None);
        assert_eq!(progress.tick(start + Duration::from_secs(30), 10), None);
    }
}
