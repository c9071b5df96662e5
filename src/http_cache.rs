use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{ETAG, HeaderName, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED};
use serde::{Deserialize, Serialize};

const CACHE_VERSION: u32 = 1;
const CACHE_DIR: &str = "fpl_similarity";
const CACHE_FILE: &str = "http_cache.json";
const MAX_ENTRIES: usize = 32;
const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct CacheFile {
    version: u32,
    entries: HashMap<String, CacheEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub body: String,
    pub etag: Option<String>,
    pub last_modified: Option<String>,
    pub fetched_at: i64,
}

#[derive(Debug, Default)]
pub struct HttpCache {
    path: Option<PathBuf>,
    entries: HashMap<String, CacheEntry>,
}

impl HttpCache {
    pub fn open_default() -> Self {
        match default_cache_path() {
            Some(path) => Self::open(path),
            None => Self::in_memory(),
        }
    }

    /// Loads `path`, discarding it when unreadable or from another version.
    pub fn open(path: PathBuf) -> Self {
        let entries = fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str::<CacheFile>(&raw).ok())
            .filter(|file| file.version == CACHE_VERSION)
            .map(|file| file.entries)
            .unwrap_or_default();
        Self {
            path: Some(path),
            entries,
        }
    }

    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<&CacheEntry> {
        self.entries.get(url)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn insert(&mut self, url: &str, entry: CacheEntry) -> Result<()> {
        self.entries.insert(url.to_string(), entry);
        self.evict();
        self.flush()
    }

    // Oldest entries go first once either cap is exceeded.
    fn evict(&mut self) {
        let mut body_bytes: usize = self.entries.values().map(|e| e.body.len()).sum();
        while self.entries.len() > MAX_ENTRIES
            || (body_bytes > MAX_BODY_BYTES && self.entries.len() > 1)
        {
            let Some(oldest) = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.fetched_at)
                .map(|(url, _)| url.clone())
            else {
                break;
            };
            if let Some(entry) = self.entries.remove(&oldest) {
                body_bytes -= entry.body.len();
            }
        }
    }

    pub fn fetch_text(&mut self, client: &Client, url: &str) -> Result<String> {
        let cached = self.entries.get(url).cloned();

        let mut req = client.get(url);
        if let Some(entry) = cached.as_ref() {
            if let Some(etag) = entry.etag.as_ref() {
                req = req.header(IF_NONE_MATCH, etag);
            }
            if let Some(last_modified) = entry.last_modified.as_ref() {
                req = req.header(IF_MODIFIED_SINCE, last_modified);
            }
        }

        let resp = req.send().with_context(|| format!("request to {url} failed"))?;
        let status = resp.status();
        if status == StatusCode::NOT_MODIFIED {
            return cached
                .map(|entry| entry.body)
                .ok_or_else(|| anyhow!("received 304 without cache body"));
        }

        let headers = resp.headers().clone();
        let body = resp.text().context("failed reading body")?;
        if !status.is_success() {
            return Err(anyhow!("http {status} for {url}"));
        }

        let header_value = |name: HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.to_string())
        };
        let entry = CacheEntry {
            body: body.clone(),
            etag: header_value(ETAG),
            last_modified: header_value(LAST_MODIFIED),
            fetched_at: chrono::Utc::now().timestamp(),
        };
        // A cache that cannot be written only costs a full refetch next time.
        if let Err(err) = self.insert(url, entry) {
            tracing::debug!("http cache not saved: {err:#}");
        }
        Ok(body)
    }

    fn flush(&self) -> Result<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        write_atomic(
            path,
            &CacheFile {
                version: CACHE_VERSION,
                entries: self.entries.clone(),
            },
        )
    }
}

pub(crate) fn write_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string(value).context("serialize cache")?;
    fs::write(&tmp, json).context("write cache")?;
    fs::rename(&tmp, path).context("swap cache")?;
    Ok(())
}

pub(crate) fn cache_dir() -> Option<PathBuf> {
    if let Ok(base) = std::env::var("XDG_CACHE_HOME")
        && !base.trim().is_empty()
    {
        return Some(PathBuf::from(base).join(CACHE_DIR));
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(PathBuf::from(home).join(".cache").join(CACHE_DIR))
}

fn default_cache_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(CACHE_FILE))
}
