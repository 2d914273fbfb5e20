use std::{env, path::PathBuf, str::FromStr, time::Duration};

use chrono::NaiveDate;
use url::Url;

use crate::{error::Error, parse::TopSectionLayout};

const DATE_FORMAT: &str = "%m/%d/%Y";

/// The search form the report links are collected from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub keywords: [String; 3],
    pub zip: String,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2017, 3, 1).unwrap_or_default(),
            keywords: Default::default(),
            zip: String::new(),
        }
    }
}

impl SearchQuery {
    /// First page of results for this query on `site`.
    pub fn url(&self, site: &Url) -> crate::Result<Url> {
        let mut url = site.join("/napa/search.cfm")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("start", "1")
                .append_pair("1", "1")
                .append_pair("sd", &self.start_date.format(DATE_FORMAT).to_string())
                .append_pair("ed", &self.end_date.format(DATE_FORMAT).to_string());
            for (i, keyword) in self.keywords.iter().enumerate() {
                pairs.append_pair(&format!("kw{}", i + 1), keyword);
            }
            for i in 1..=self.keywords.len() {
                pairs.append_pair(&format!("rel{i}"), "N.permitName");
            }
            pairs
                .append_pair("zc", &self.zip)
                .append_pair("dtRng", "YES")
                .append_pair("pre", "similar");
        }
        Ok(url)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub site: Url,
    pub search: SearchQuery,
    pub results_path: PathBuf,
    pub request_timeout: Duration,
    pub max_retries: u32,
    pub concurrency: usize,
    pub layout: TopSectionLayout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: Url::parse("http://ca.healthinspections.us").expect("base url should be valid!"),
            search: SearchQuery::default(),
            results_path: PathBuf::from("results.json"),
            request_timeout: Duration::from_secs(30),
            max_retries: 3,
            concurrency: 1,
            layout: TopSectionLayout::default(),
        }
    }
}

fn parse_var<T: FromStr>(name: &str, value: &str) -> crate::Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| Error::Config(format!("{name}={value:?} is invalid: {e}")))
}

fn parse_date(name: &str, value: &str) -> crate::Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|e| Error::Config(format!("{name}={value:?} is not a mm/dd/yyyy date: {e}")))
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from `lookup`, falling back to defaults for unset variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> crate::Result<Self> {
        let mut config = Self::default();

        if let Some(site) = lookup("INSPECTIONS_SITE") {
            config.site = Url::parse(&site)?;
        }
        if let Some(date) = lookup("INSPECTIONS_START_DATE") {
            config.search.start_date = parse_date("INSPECTIONS_START_DATE", &date)?;
        }
        if let Some(date) = lookup("INSPECTIONS_END_DATE") {
            config.search.end_date = parse_date("INSPECTIONS_END_DATE", &date)?;
        }
        if config.search.start_date > config.search.end_date {
            return Err(Error::Config(format!(
                "search starts on {} after it ends on {}",
                config.search.start_date, config.search.end_date
            )));
        }
        if let Some(keywords) = lookup("INSPECTIONS_KEYWORDS") {
            let keywords: Vec<&str> = keywords.split(',').map(str::trim).collect();
            if keywords.len() > config.search.keywords.len() {
                return Err(Error::Config(format!(
                    "INSPECTIONS_KEYWORDS takes at most {} keywords",
                    config.search.keywords.len()
                )));
            }
            for (slot, keyword) in config.search.keywords.iter_mut().zip(keywords) {
                *slot = keyword.to_owned();
            }
        }
        if let Some(zip) = lookup("INSPECTIONS_ZIP") {
            config.search.zip = zip.trim().to_owned();
        }
        if let Some(path) = lookup("RESULTS_PATH") {
            config.results_path = PathBuf::from(path);
        }
        if let Some(secs) = lookup("REQUEST_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(parse_var("REQUEST_TIMEOUT_SECS", &secs)?);
        }
        if let Some(retries) = lookup("MAX_RETRIES") {
            config.max_retries = parse_var("MAX_RETRIES", &retries)?;
        }
        if let Some(concurrency) = lookup("CONCURRENCY") {
            config.concurrency = parse_var("CONCURRENCY", &concurrency)?;
            if config.concurrency == 0 {
                return Err(Error::Config("CONCURRENCY must be at least 1".into()));
            }
        }

        Ok(config)
    }

    pub fn search_url(&self) -> crate::Result<Url> {
        self.search.url(&self.site)
    }

    /// Site root without a trailing slash, as report links are rewritten against it.
    pub fn site_root(&self) -> &str {
        self.site.as_str().trim_end_matches('/')
    }
}
