//! Walks the first page of search results and every inspection report it links to.
use futures::StreamExt;
use reqwest::Client;
use scraper::Html;
use url::Url;

use crate::{
    config::Config,
    fetch::{HttpPages, PageSource},
    parse::{Inspection, InspectionLinks, TopSectionLayout},
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeStats {
    pub total: usize,
    pub ok: usize,
    pub errors: usize,
}

pub fn parse_index(html: &str, site: &str) -> InspectionLinks {
    let document = Html::parse_document(html);
    InspectionLinks::from_html_element(document.root_element(), site)
}

pub fn parse_inspection(html: &str, layout: TopSectionLayout) -> crate::Result<Inspection> {
    let document = Html::parse_document(html);
    Ok(Inspection::from_html_element(document.root_element(), layout)?)
}

/// Accumulates inspections page by page. A page that fails to fetch or parse is
/// logged and left out.
#[derive(Debug)]
pub struct Collector {
    layout: TopSectionLayout,
    inspections: Vec<Inspection>,
    stats: ScrapeStats,
}

impl Collector {
    pub fn new(layout: TopSectionLayout) -> Self {
        Self {
            layout,
            inspections: Vec::new(),
            stats: ScrapeStats::default(),
        }
    }

    pub fn add_page(&mut self, url: &Url, page: crate::Result<String>) {
        self.stats.total += 1;
        match page.and_then(|html| parse_inspection(&html, self.layout)) {
            Ok(inspection) => {
                log::debug!("Parsed inspection of `{}` from {url}", inspection.facility_name);
                self.stats.ok += 1;
                self.inspections.push(inspection);
            }
            Err(e) => {
                log::warn!("Skipping {url}: {e}");
                self.stats.errors += 1;
            }
        }
    }

    pub fn finish(self) -> (Vec<Inspection>, ScrapeStats) {
        (self.inspections, self.stats)
    }
}

/// Every inspection linked from the first page of search results.
pub async fn scrape_inspections(
    client: &Client,
    config: &Config,
) -> crate::Result<(Vec<Inspection>, ScrapeStats)> {
    let pages = HttpPages {
        client,
        max_retries: config.max_retries,
    };
    collect_inspections(&pages, config).await
}

/// Reads the search page and every report it links to from `pages`.
///
/// Only the search page itself is required; reports are fetched `config.concurrency`
/// at a time and kept in link order.
pub async fn collect_inspections(
    pages: &impl PageSource,
    config: &Config,
) -> crate::Result<(Vec<Inspection>, ScrapeStats)> {
    let search_url = config.search_url()?;
    log::info!("Fetching search results from {search_url}");
    let index = pages.page(&search_url).await?;
    let links = parse_index(&index, config.site_root());
    if links.is_empty() {
        log::warn!("No inspection report links found on {search_url}");
    } else {
        log::info!("Found {} inspection report links", links.len());
    }

    let mut reports = futures::stream::iter(links.iter())
        .map(|url| async move { (url, pages.page(url).await) })
        .buffered(config.concurrency.max(1));

    let mut collector = Collector::new(config.layout);
    while let Some((url, page)) = reports.next().await {
        collector.add_page(url, page);
    }
    let (inspections, stats) = collector.finish();
    log::info!(
        "Scraped {} reports ({} ok, {} errors)",
        stats.total,
        stats.ok,
        stats.errors
    );
    Ok((inspections, stats))
}
