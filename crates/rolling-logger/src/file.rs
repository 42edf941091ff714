//! Size-rotated log file
//!
//! `<app>.log` is the live file. When a write would push it past
//! `max_bytes` it is renamed to `<app>.<timestamp>.log` and a fresh file is
//! started; only the newest `max_files` archives are kept.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub struct RollingFile {
    dir: PathBuf,
    app_name: String,
    max_bytes: u64,
    max_files: usize,
    file: File,
    written: u64,
}

impl RollingFile {
    pub fn open(dir: &Path, app_name: &str, max_bytes: u64, max_files: usize) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.log", app_name));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            dir: dir.to_path_buf(),
            app_name: app_name.to_string(),
            max_bytes,
            max_files,
            file,
            written,
        })
    }

    pub fn current_path(&self) -> PathBuf {
        self.dir.join(format!("{}.log", self.app_name))
    }

    /// Rotated files, oldest first
    pub fn archives(&self) -> io::Result<Vec<PathBuf>> {
        let prefix = format!("{}.", self.app_name);
        let current = self.current_path();
        let mut archives: Vec<PathBuf> = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| *path != current)
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| n.starts_with(&prefix) && n.ends_with(".log"))
                    .unwrap_or(false)
            })
            .collect();
        // Timestamped names sort chronologically
        archives.sort();
        Ok(archives)
    }

    pub fn write_record(&mut self, buf: &[u8]) -> io::Result<()> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        self.file.write_all(buf)?;
        self.written += buf.len() as u64;
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S%3f");
        let mut archived = self.dir.join(format!("{}.{}.log", self.app_name, stamp));
        let mut n = 1;
        while archived.exists() {
            archived = self.dir.join(format!("{}.{}-{}.log", self.app_name, stamp, n));
            n += 1;
        }
        fs::rename(self.current_path(), &archived)?;

        self.file = OpenOptions::new().create(true).append(true).open(self.current_path())?;
        self.written = 0;
        self.prune()
    }

    fn prune(&self) -> io::Result<()> {
        let archives = self.archives()?;
        let excess = archives.len().saturating_sub(self.max_files);
        for old in archives.into_iter().take(excess) {
            fs::remove_file(old)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_without_rotation() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = RollingFile::open(dir.path(), "admin", 1024, 3).unwrap();
        file.write_record(b"one\n").unwrap();
        file.write_record(b"two\n").unwrap();
        file.flush().unwrap();

        assert_eq!(fs::read_to_string(file.current_path()).unwrap(), "one\ntwo\n");
        assert!(file.archives().unwrap().is_empty());
    }

    #[test]
    fn test_rotates_and_prunes() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = RollingFile::open(dir.path(), "admin", 10, 2).unwrap();
        for i in 0..5 {
            file.write_record(format!("line {}\n", i).as_bytes()).unwrap();
        }
        file.flush().unwrap();

        assert_eq!(file.archives().unwrap().len(), 2);
        assert_eq!(fs::read_to_string(file.current_path()).unwrap(), "line 4\n");
    }

    #[test]
    fn test_reopen_keeps_size() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut file = RollingFile::open(dir.path(), "admin", 100, 2).unwrap();
            file.write_record(b"0123456789\n").unwrap();
        }
        let file = RollingFile::open(dir.path(), "admin", 100, 2).unwrap();
        assert_eq!(file.written, 11);
    }
}
