use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::models::{
    Category, CategoryNode, Continent, Country, Pagination, Song, Station,
};

pub const DEFAULT_BASE_URL: &str = "http://api.dirble.com/v2";

/// One method per directory endpoint.
pub trait DirbleApi {
    fn stations(&self, pagination: Pagination) -> Result<Vec<Station>>;
    fn station(&self, id: u32) -> Result<Station>;
    fn station_song_history(&self, id: u32) -> Result<Vec<Song>>;
    fn similar_stations(&self, id: u32) -> Result<Vec<Station>>;
    fn categories(&self) -> Result<Vec<Category>>;
    fn primary_categories(&self) -> Result<Vec<Category>>;
    fn categories_tree(&self) -> Result<Vec<CategoryNode>>;
    fn category_children(&self, id: u32) -> Result<Vec<Category>>;
    fn category_stations(&self, id: u32, all: bool, pagination: Pagination)
        -> Result<Vec<Station>>;
    fn countries(&self) -> Result<Vec<Country>>;
    fn country_stations(
        &self,
        country_code: &str,
        all: bool,
        pagination: Pagination,
    ) -> Result<Vec<Station>>;
    fn continents(&self) -> Result<Vec<Continent>>;
    fn continent_countries(&self, id: u32) -> Result<Vec<Country>>;
    fn search(&self, query: &str, page: Option<u32>) -> Result<Vec<Station>>;
}

pub struct DirbleClient {
    client: Client,
    base_url: Url,
    token: String,
    timeout: Duration,
}

impl DirbleClient {
    pub fn new_with_config(
        base_url: &str,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("invalid API base url '{base_url}'"))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("invalid API base url '{base_url}'"));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build dirble client")?;
        Ok(Self {
            client,
            base_url,
            token: token.into(),
            timeout,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("invalid API base url '{}'", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        params: Vec<(&'static str, String)>,
    ) -> Result<T> {
        let url = self.endpoint(segments)?;
        let path = url.path().to_string();
        debug!(%path, ?params, "dirble request");

        let response = self
            .client
            .get(url)
            .query(&[("token", self.token.as_str())])
            .query(&params)
            .send()
            .map_err(reqwest::Error::without_url)
            .with_context(|| {
                format!(
                    "request to {path} failed (timeout={}ms)",
                    self.timeout.as_millis()
                )
            })?;

        let status = response.status();
        debug!(%path, %status, "dirble response");
        if !status.is_success() {
            return Err(anyhow!("dirble returned HTTP {status} for {path}"));
        }

        response
            .json()
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("failed to decode response from {path}"))
    }
}

fn listing_params(all: bool, pagination: Pagination) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if all {
        params.push(("all", "1".to_string()));
    }
    params.extend(pagination.query_params());
    params
}

impl DirbleApi for DirbleClient {
    fn stations(&self, pagination: Pagination) -> Result<Vec<Station>> {
        self.get(&["stations"], pagination.query_params())
    }

    fn station(&self, id: u32) -> Result<Station> {
        self.get(&["station", id.to_string().as_str()], Vec::new())
    }

    fn station_song_history(&self, id: u32) -> Result<Vec<Song>> {
        self.get(&["station", id.to_string().as_str(), "song_history"], Vec::new())
    }

    fn similar_stations(&self, id: u32) -> Result<Vec<Station>> {
        self.get(&["station", id.to_string().as_str(), "similar"], Vec::new())
    }

    fn categories(&self) -> Result<Vec<Category>> {
        self.get(&["categories"], Vec::new())
    }

    fn primary_categories(&self) -> Result<Vec<Category>> {
        self.get(&["categories", "primary"], Vec::new())
    }

    fn categories_tree(&self) -> Result<Vec<CategoryNode>> {
        self.get(&["categories", "tree"], Vec::new())
    }

    fn category_children(&self, id: u32) -> Result<Vec<Category>> {
        self.get(&["category", id.to_string().as_str(), "childs"], Vec::new())
    }

    fn category_stations(
        &self,
        id: u32,
        all: bool,
        pagination: Pagination,
    ) -> Result<Vec<Station>> {
        self.get(
            &["category", id.to_string().as_str(), "stations"],
            listing_params(all, pagination),
        )
    }

    fn countries(&self) -> Result<Vec<Country>> {
        self.get(&["countries"], Vec::new())
    }

    fn country_stations(
        &self,
        country_code: &str,
        all: bool,
        pagination: Pagination,
    ) -> Result<Vec<Station>> {
        self.get(
            &["countries", country_code, "stations"],
            listing_params(all, pagination),
        )
    }

    fn continents(&self) -> Result<Vec<Continent>> {
        self.get(&["continents"], Vec::new())
    }

    fn continent_countries(&self, id: u32) -> Result<Vec<Country>> {
        self.get(&["continents", id.to_string().as_str(), "countries"], Vec::new())
    }

    fn search(&self, query: &str, page: Option<u32>) -> Result<Vec<Station>> {
        let pagination = Pagination {
            page,
            ..Pagination::default()
        };
        self.get(&["search", query], pagination.query_params())
    }
}
