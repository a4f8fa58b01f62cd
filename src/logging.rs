// src/logging.rs

use anyhow::{Context, Result};
use std::{
    ffi::OsString,
    fs::{self, File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing_subscriber::{fmt, fmt::time::ChronoLocal, prelude::*, EnvFilter};

use crate::config::{LOG_BACKUP_COUNT, LOG_DATETIME_FORMAT, LOG_FILE_NAME, LOG_MAX_BYTES};

/// Log file that rolls over to `<name>.1` .. `<name>.N` once it would exceed
/// `max_bytes`; the oldest backup is dropped.
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    backups: usize,
    file: File,
    size: u64,
}

impl RotatingFile {
    pub fn open(path: impl Into<PathBuf>, max_bytes: u64, backups: usize) -> io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let size = file.metadata()?.len();
        Ok(Self {
            path,
            max_bytes,
            backups,
            file,
            size,
        })
    }

    fn backup_path(&self, n: usize) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(format!(".{}", n));
        PathBuf::from(name)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        if self.backups == 0 {
            self.file = OpenOptions::new()
                .write(true)
                .truncate(true)
                .open(&self.path)?;
        } else {
            for n in (1..self.backups).rev() {
                let src = self.backup_path(n);
                if src.exists() {
                    let dst = self.backup_path(n + 1);
                    if dst.exists() {
                        fs::remove_file(&dst)?;
                    }
                    fs::rename(&src, &dst)?;
                }
            }
            let first = self.backup_path(1);
            if first.exists() {
                fs::remove_file(&first)?;
            }
            fs::rename(&self.path, &first)?;
            self.file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
        }
        self.size = 0;
        Ok(())
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.size > 0 && self.size + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.size += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Install the global subscriber: stderr plus a rotating file in `log_dir`.
/// `RUST_LOG` overrides the default `info` level.
pub fn init(log_dir: &Path) -> Result<()> {
    let file = RotatingFile::open(log_dir.join(LOG_FILE_NAME), LOG_MAX_BYTES, LOG_BACKUP_COUNT)
        .with_context(|| format!("opening log file in {}", log_dir.display()))?;

    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let timer = ChronoLocal::new(LOG_DATETIME_FORMAT.to_string());

    tracing_subscriber::registry()
        .with(env)
        .with(
            fmt::layer()
                .with_timer(timer.clone())
                .with_writer(io::stderr),
        )
        .with(
            fmt::layer()
                .with_timer(timer)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("installing tracing subscriber")?;
    Ok(())
}
