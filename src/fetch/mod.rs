use std::future::Future;
use std::time::{Duration, Instant};

use reqwest::Client;
use tokio::time::sleep;
use tracing::{instrument, Level};
use url::Url;

static BASE_BACKOFF: Duration = Duration::from_millis(500);
static MAX_BACKOFF: Duration = Duration::from_secs(30);

pub fn make_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder().gzip(true).timeout(timeout).build()
}

/// Delay before retry number `attempt + 1`, doubling from [`BASE_BACKOFF`].
pub fn backoff(attempt: u32) -> Duration {
    BASE_BACKOFF
        .saturating_mul(2u32.saturating_pow(attempt))
        .min(MAX_BACKOFF)
}

async fn fetch_once(client: &Client, url: &Url) -> crate::Result<String> {
    let res = client.get(url.clone()).send().await?.error_for_status()?;
    let start = Instant::now();
    let text = res.text().await?;
    log::trace!("Got text of {url} in \t {:?}", start.elapsed());
    Ok(text)
}

/// Body of the page at `url`, retrying timeouts, connection failures and 5xx responses.
#[instrument(skip(client, url), fields(url = %url), level = Level::TRACE)]
pub async fn fetch_page(client: &Client, url: &Url, max_retries: u32) -> crate::Result<String> {
    let mut attempt = 0;
    loop {
        match fetch_once(client, url).await {
            Err(e) if e.is_retryable() && attempt < max_retries => {
                let delay = backoff(attempt);
                attempt += 1;
                log::warn!("Fetching {url} failed ({e}), retry {attempt}/{max_retries} in {delay:?}");
                sleep(delay).await;
            }
            res => return res,
        }
    }
}

/// Where report and search pages come from.
pub trait PageSource {
    fn page(&self, url: &Url) -> impl Future<Output = crate::Result<String>>;
}

/// Pages fetched over HTTP with [`fetch_page`].
#[derive(Debug, Clone, Copy)]
pub struct HttpPages<'a> {
    pub client: &'a Client,
    pub max_retries: u32,
}

impl PageSource for HttpPages<'_> {
    fn page(&self, url: &Url) -> impl Future<Output = crate::Result<String>> {
        fetch_page(self.client, url, self.max_retries)
    }
}
