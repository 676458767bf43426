//! Animation timing loader.

use std::path::Path;

use crate::formats::TimingsFile;
use crate::loaders::{LoadResult, read_file};

/// Loader for animation pacing from TOML files.
pub struct TimingsLoader;

impl TimingsLoader {
    /// Load timings from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<TimingsFile> {
        let content = read_file(path)?;
        let timings: TimingsFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse timings TOML: {}", e))?;

        Ok(timings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let file = tempfile::NamedTempFile::new().expect("temp file");
        std::fs::write(file.path(), "blink_ms = 120\nstep_timeout_ms = 5000\n").expect("write");

        let timings = TimingsLoader::load(file.path()).expect("valid TOML");
        assert_eq!(timings.blink_ms, 120);
        assert_eq!(timings.step_timeout_ms, Some(5000));
        assert_eq!(timings.step_ms, TimingsFile::default().step_ms);
    }
}
