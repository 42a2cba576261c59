use std::io::Write as _;
use std::path::{Path, PathBuf};

use ab_glyph::FontArc;

use crate::error::{CardError, CardResult};
use crate::fetch::ByteFetcher;

/// Parsed font ready for measurement and rasterization.
#[derive(Clone)]
pub struct FontHandle {
    font: FontArc,
}

impl FontHandle {
    pub fn from_vec(bytes: Vec<u8>) -> CardResult<Self> {
        let font = FontArc::try_from_vec(bytes)
            .map_err(|e| CardError::resource_unavailable(format!("invalid font data: {e}")))?;
        Ok(Self { font })
    }

    pub fn font(&self) -> &FontArc {
        &self.font
    }
}

impl std::fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontHandle").finish_non_exhaustive()
    }
}

/// Process-wide font resource cache.
///
/// `ensure` is idempotent: the font is fetched and persisted at most once
/// per cache path, then reused from disk and from an in-process cell.
/// Concurrent first-time callers may download redundantly; the tempfile
/// rename keeps the on-disk copy intact either way.
pub struct FontCache {
    url: String,
    path: PathBuf,
    loaded: tokio::sync::OnceCell<FontHandle>,
}

impl FontCache {
    pub fn new(url: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            path: path.into(),
            loaded: tokio::sync::OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the cached font, fetching and persisting it first if absent.
    pub async fn ensure<F: ByteFetcher>(&self, fetcher: &F) -> CardResult<FontHandle> {
        self.loaded
            .get_or_try_init(|| async {
                let bytes = self.ensure_bytes(fetcher).await?;
                FontHandle::from_vec(bytes)
            })
            .await
            .cloned()
    }

    /// Reads the on-disk copy, downloading it on first use.
    pub async fn ensure_bytes<F: ByteFetcher>(&self, fetcher: &F) -> CardResult<Vec<u8>> {
        if self.path.exists() {
            tracing::debug!(path = %self.path.display(), "font cache hit");
            return tokio::fs::read(&self.path).await.map_err(|e| {
                CardError::resource_unavailable(format!(
                    "read cached font {}: {e}",
                    self.path.display()
                ))
            });
        }

        tracing::info!(url = %self.url, "fetching font");
        let bytes = fetcher
            .fetch(&self.url)
            .await
            .map_err(|e| CardError::resource_unavailable(format!("fetch font: {e}")))?;
        write_atomic(&self.path, &bytes)?;
        Ok(bytes)
    }
}

/// Writes via a sibling tempfile plus rename so a concurrent reader never
/// observes a torn file.
fn write_atomic(path: &Path, bytes: &[u8]) -> CardResult<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| {
        CardError::resource_unavailable(format!("create tempfile in {}: {e}", dir.display()))
    })?;
    tmp.write_all(bytes)
        .map_err(|e| CardError::resource_unavailable(format!("write font tempfile: {e}")))?;
    tmp.persist(path).map_err(|e| {
        CardError::resource_unavailable(format!("persist font to {}: {e}", path.display()))
    })?;
    Ok(())
}
