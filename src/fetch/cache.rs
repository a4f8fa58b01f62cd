// src/fetch/cache.rs

use sha2::{Digest, Sha256};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::debug;
use url::Url;

/// On-disk response bodies, one file per URL named by the URL's SHA-256.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
}

impl ResponseCache {
    /// Open (creating if needed) the cache rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, url: &Url) -> PathBuf {
        self.dir
            .join(hex::encode(Sha256::digest(url.as_str().as_bytes())))
    }

    pub fn get(&self, url: &Url) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.entry_path(url)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn put(&self, url: &Url, body: &[u8]) -> io::Result<()> {
        let path = self.entry_path(url);
        // write-then-rename: readers only ever see whole entries
        let tmp = path.with_extension("part");
        fs::write(&tmp, body)?;
        fs::rename(&tmp, &path)
    }

    /// Remove every cached entry; returns how many were removed.
    pub fn clear(&self) -> io::Result<usize> {
        let mut removed = 0;
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.is_file() {
                fs::remove_file(&path)?;
                removed += 1;
            }
        }
        debug!(dir = %self.dir.display(), removed, "cleared response cache");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn put_get_and_clear() {
        let tmp = tempdir().unwrap();
        let cache = ResponseCache::open(tmp.path().join("cache")).unwrap();
        let url = Url::parse("https://peps.python.org/pep-0008/").unwrap();

        assert_eq!(cache.get(&url).unwrap(), None);
        cache.put(&url, b"<html></html>").unwrap();
        cache.put(&url, b"<html>v2</html>").unwrap();
        assert_eq!(cache.get(&url).unwrap().as_deref(), Some(&b"<html>v2</html>"[..]));

        assert_eq!(cache.clear().unwrap(), 1);
        assert_eq!(cache.get(&url).unwrap(), None);
    }

    #[test]
    fn reopening_existing_dir_is_a_no_op() {
        let tmp = tempdir().unwrap();
        let url = Url::parse("https://docs.python.org/3/").unwrap();
        ResponseCache::open(tmp.path()).unwrap().put(&url, b"x").unwrap();
        let again = ResponseCache::open(tmp.path()).unwrap();
        assert_eq!(again.get(&url).unwrap().as_deref(), Some(&b"x"[..]));
    }
}
