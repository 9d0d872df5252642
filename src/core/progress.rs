//! Progress reporting for downloads

/// Progress information passed to the download progress callback after
/// every chunk write.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    /// Declared total size of the media body in bytes (0 when the server
    /// did not declare one).
    pub total_bytes: u64,
    /// Number of bytes received so far.
    pub received_bytes: u64,
}

impl Progress {
    pub fn new(total_bytes: u64) -> Self {
        Self {
            total_bytes,
            received_bytes: 0,
        }
    }

    pub fn update(&mut self, received_bytes: u64) {
        self.received_bytes = received_bytes;
    }

    /// Progress as a percentage, 0.0 when the total is unknown.
    pub fn percent(&self) -> f64 {
        if self.total_bytes > 0 {
            (self.received_bytes as f64 / self.total_bytes as f64) * 100.0
        } else {
            0.0
        }
    }

    pub fn is_complete(&self) -> bool {
        self.total_bytes > 0 && self.received_bytes >= self.total_bytes
    }
}

/// Format bytes as a human-readable string
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let bytes_f64 = bytes as f64;
    let exp = (bytes_f64.ln() / THRESHOLD.ln()).floor() as usize;
    let exp = exp.min(UNITS.len() - 1);

    let value = bytes_f64 / THRESHOLD.powi(exp as i32);

    if exp == 0 {
        format!("{} {}", bytes, UNITS[exp])
    } else {
        format!("{:.1} {}", value, UNITS[exp])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_update() {
        let mut progress = Progress::new(1000);
        assert_eq!(progress.percent(), 0.0);
        assert!(!progress.is_complete());

        progress.update(500);
        assert_eq!(progress.percent(), 50.0);

        progress.update(1000);
        assert!(progress.is_complete());
    }

    #[test]
    fn test_progress_unknown_total() {
        let mut progress = Progress::new(0);
        progress.update(4096);
        assert_eq!(progress.percent(), 0.0);
        assert!(!progress.is_complete());
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1048576), "1.0 MB");
    }
}
