use crate::error::{CardError, CardResult};

/// Opaque byte-retrieval capability consumed by the pipeline.
///
/// The engine never talks to the network directly; fonts, background lists
/// and background images all arrive through this seam, which keeps the
/// pipeline testable with canned bytes.
pub trait ByteFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> impl Future<Output = CardResult<Vec<u8>>> + Send;
}

/// Fetches UTF-8 text through a [`ByteFetcher`].
pub async fn fetch_text<F: ByteFetcher>(fetcher: &F, url: &str) -> CardResult<String> {
    let bytes = fetcher.fetch(url).await?;
    String::from_utf8(bytes).map_err(|e| CardError::fetch(format!("{url}: invalid utf-8: {e}")))
}

/// HTTP-backed fetcher. Clones share the underlying reqwest connection pool.
#[derive(Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl ByteFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> CardResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CardError::fetch(format!("{url}: {e}")))?
            .error_for_status()
            .map_err(|e| CardError::fetch(format!("{url}: {e}")))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| CardError::fetch(format!("{url}: {e}")))?;
        Ok(bytes.to_vec())
    }
}
