use clap::{Args, Subcommand};

use crate::domain::models::Pagination;

/// Every command the CLI understands. Adding an endpoint means adding a variant here
/// and one arm in `app::dispatch`.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Get list of stations
    #[command(visible_alias = "st")]
    Stations(PageArgs),

    /// Get information about a single station
    Station {
        #[arg(value_name = "STATION_ID")]
        id: u32,
    },

    /// Get song history for a station
    #[command(visible_alias = "sh")]
    SongHistory {
        #[arg(value_name = "STATION_ID")]
        id: u32,
    },

    /// Get list of stations similar to a station
    #[command(visible_alias = "ss")]
    SimilarStations {
        #[arg(value_name = "STATION_ID")]
        id: u32,
    },

    /// Get list of categories
    #[command(visible_alias = "cat")]
    Categories,

    /// Get list of primary categories
    #[command(visible_alias = "pcat")]
    PrimaryCategories,

    /// Get the full category tree
    #[command(visible_alias = "tcat")]
    CategoriesTree,

    /// Get list of child categories of a category
    #[command(visible_alias = "cch")]
    CategoryChildren {
        #[arg(value_name = "CATEGORY_ID")]
        id: u32,
    },

    /// Get list of stations in a category
    #[command(visible_alias = "cst")]
    CategoryStations {
        #[arg(value_name = "CATEGORY_ID")]
        id: u32,
        #[command(flatten)]
        listing: ListingArgs,
    },

    /// Get list of countries
    Countries,

    /// Get list of stations for a country
    #[command(visible_alias = "cos")]
    CountryStations {
        #[arg(value_name = "COUNTRY_CODE")]
        country_code: String,
        #[command(flatten)]
        listing: ListingArgs,
    },

    /// Get list of continents
    Continents,

    /// Get countries of a continent
    #[command(visible_alias = "coc")]
    ContinentCountries {
        #[arg(value_name = "CONTINENT_ID")]
        id: u32,
    },

    /// Search for stations
    #[command(visible_alias = "s")]
    Search {
        #[arg(value_name = "QUERY")]
        query: String,
        #[arg(long, value_name = "N", help = "Page to fetch")]
        page: Option<u32>,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stations(_) => "stations",
            Self::Station { .. } => "station",
            Self::SongHistory { .. } => "song-history",
            Self::SimilarStations { .. } => "similar-stations",
            Self::Categories => "categories",
            Self::PrimaryCategories => "primary-categories",
            Self::CategoriesTree => "categories-tree",
            Self::CategoryChildren { .. } => "category-children",
            Self::CategoryStations { .. } => "category-stations",
            Self::Countries => "countries",
            Self::CountryStations { .. } => "country-stations",
            Self::Continents => "continents",
            Self::ContinentCountries { .. } => "continent-countries",
            Self::Search { .. } => "search",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Args)]
pub struct PageArgs {
    #[arg(long, value_name = "N", help = "Page to fetch")]
    pub page: Option<u32>,
    #[arg(long, value_name = "N", help = "Items per page")]
    pub ipp: Option<u32>,
    #[arg(long, value_name = "N", help = "Offset")]
    pub offset: Option<u32>,
}

impl From<PageArgs> for Pagination {
    fn from(args: PageArgs) -> Self {
        Self {
            page: args.page,
            per_page: args.ipp,
            offset: args.offset,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Args)]
pub struct ListingArgs {
    #[arg(long, help = "Get all stations, ignoring pagination")]
    pub all: bool,
    #[command(flatten)]
    pub page: PageArgs,
}
