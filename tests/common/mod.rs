#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use dirble_cli::app::{run_with, ApiSession};
use dirble_cli::domain::models::{
    Category, CategoryNode, Continent, Country, Pagination, Song, Station, Stream,
};
use dirble_cli::error::CliResult;
use dirble_cli::integrations::dirble_api::DirbleApi;

/// Fake directory that records each call and answers with canned records.
pub struct RecordingApi {
    calls: Arc<Mutex<Vec<String>>>,
    fail_with: Option<String>,
}

impl RecordingApi {
    pub fn new(calls: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            calls,
            fail_with: None,
        }
    }

    pub fn failing(calls: Arc<Mutex<Vec<String>>>, message: &str) -> Self {
        Self {
            calls,
            fail_with: Some(message.to_string()),
        }
    }

    fn record<T>(&self, call: String, value: T) -> Result<T> {
        self.calls.lock().expect("lock calls").push(call);
        match &self.fail_with {
            Some(message) => Err(anyhow!("{message}")),
            None => Ok(value),
        }
    }
}

pub fn sample_station(id: u64, name: &str) -> Station {
    Station {
        id,
        name: name.to_string(),
        country: Some("SE".to_string()),
        image: None,
        slug: Some(name.to_lowercase().replace(' ', "-")),
        website: Some("https://example.com".to_string()),
        twitter: None,
        facebook: None,
        total_listeners: Some(12),
        categories: vec![sample_category(5, "Jazz")],
        streams: vec![Stream {
            stream: "https://example.com/stream".to_string(),
            bitrate: Some(128),
            content_type: Some("audio/mpeg".to_string()),
            status: Some(1),
            listeners: Some(3),
        }],
        created_at: Some("2015-04-01T12:00:00+02:00".to_string()),
        updated_at: None,
    }
}

pub fn sample_category(id: u64, title: &str) -> Category {
    Category {
        id,
        title: title.to_string(),
        description: None,
        slug: Some(title.to_lowercase()),
        ancestry: None,
    }
}

fn sample_country(code: &str, name: &str) -> Country {
    Country {
        country_code: code.to_string(),
        name: name.to_string(),
        region: Some("Europe".to_string()),
        subregion: None,
    }
}

impl DirbleApi for RecordingApi {
    fn stations(&self, pagination: Pagination) -> Result<Vec<Station>> {
        self.record(
            format!("stations {pagination:?}"),
            vec![sample_station(1, "Jazz FM"), sample_station(2, "Rock FM")],
        )
    }

    fn station(&self, id: u32) -> Result<Station> {
        self.record(format!("station {id}"), sample_station(u64::from(id), "Jazz FM"))
    }

    fn station_song_history(&self, id: u32) -> Result<Vec<Song>> {
        self.record(
            format!("song-history {id}"),
            vec![Song {
                name: Some("Miles Davis".to_string()),
                title: Some("So What".to_string()),
                week: Some(14),
                year: Some(2015),
                date: None,
            }],
        )
    }

    fn similar_stations(&self, id: u32) -> Result<Vec<Station>> {
        self.record(format!("similar {id}"), vec![sample_station(3, "Blues FM")])
    }

    fn categories(&self) -> Result<Vec<Category>> {
        self.record("categories".to_string(), vec![sample_category(5, "Jazz")])
    }

    fn primary_categories(&self) -> Result<Vec<Category>> {
        self.record(
            "primary-categories".to_string(),
            vec![sample_category(1, "Rock")],
        )
    }

    fn categories_tree(&self) -> Result<Vec<CategoryNode>> {
        self.record(
            "categories-tree".to_string(),
            vec![CategoryNode {
                category: sample_category(1, "Rock"),
                children: vec![CategoryNode {
                    category: sample_category(2, "Punk"),
                    children: Vec::new(),
                }],
            }],
        )
    }

    fn category_children(&self, id: u32) -> Result<Vec<Category>> {
        self.record(
            format!("category-children {id}"),
            vec![sample_category(2, "Punk")],
        )
    }

    fn category_stations(
        &self,
        id: u32,
        all: bool,
        pagination: Pagination,
    ) -> Result<Vec<Station>> {
        self.record(
            format!("category-stations {id} all={all} {pagination:?}"),
            vec![sample_station(4, "Punk FM")],
        )
    }

    fn countries(&self) -> Result<Vec<Country>> {
        self.record("countries".to_string(), vec![sample_country("SE", "Sweden")])
    }

    fn country_stations(
        &self,
        country_code: &str,
        all: bool,
        pagination: Pagination,
    ) -> Result<Vec<Station>> {
        self.record(
            format!("country-stations {country_code} all={all} {pagination:?}"),
            vec![sample_station(6, "Sveriges Radio")],
        )
    }

    fn continents(&self) -> Result<Vec<Continent>> {
        self.record(
            "continents".to_string(),
            vec![Continent {
                id: 3,
                name: "Europe".to_string(),
                slug: Some("europe".to_string()),
            }],
        )
    }

    fn continent_countries(&self, id: u32) -> Result<Vec<Country>> {
        self.record(
            format!("continent-countries {id}"),
            vec![sample_country("NO", "Norway")],
        )
    }

    fn search(&self, query: &str, page: Option<u32>) -> Result<Vec<Station>> {
        self.record(
            format!("search {query} page={page:?}"),
            vec![sample_station(7, "Smooth Jazz")],
        )
    }
}

pub struct Outcome {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
    pub calls: Vec<String>,
    pub sessions: Vec<ApiSession>,
}

/// Runs the CLI against a `RecordingApi`; `fail_with` makes every call error.
pub fn run_cli(args: &[&str], fail_with: Option<&str>) -> Outcome {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sessions = Arc::new(Mutex::new(Vec::new()));
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();

    let connect_calls = Arc::clone(&calls);
    let connect_sessions = Arc::clone(&sessions);
    let connect = move |session: ApiSession| -> CliResult<Box<dyn DirbleApi>> {
        connect_sessions
            .lock()
            .expect("lock sessions")
            .push(session);
        let api = match fail_with {
            Some(message) => RecordingApi::failing(connect_calls, message),
            None => RecordingApi::new(connect_calls),
        };
        Ok(Box::new(api))
    };

    let argv = std::iter::once("dirble-cli").chain(args.iter().copied());
    let code = run_with(argv, connect, &mut stdout, &mut stderr);

    let calls = calls.lock().expect("lock calls").clone();
    let sessions = sessions.lock().expect("lock sessions").clone();
    Outcome {
        code,
        stdout: String::from_utf8(stdout).expect("utf8 stdout"),
        stderr: String::from_utf8(stderr).expect("utf8 stderr"),
        calls,
        sessions,
    }
}
