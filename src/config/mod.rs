pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::{Coordinates, DelayPolicy, ReputationFilter};
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use std::time::Duration;
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;

pub const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

pub const DEFAULT_SEARCH_ENDPOINT: &str =
    "https://maps.googleapis.com/maps/api/place/nearbysearch/json";
pub const DEFAULT_DETAILS_ENDPOINT: &str =
    "https://maps.googleapis.com/maps/api/place/details/json";

/// Toronto
pub const DEFAULT_LOCATION: Coordinates = Coordinates {
    lat: 43.6532,
    lng: -79.3832,
};
/// Places API 允許的最大半徑 (公尺)
pub const DEFAULT_RADIUS_METERS: u32 = 50_000;

pub const DEFAULT_CATEGORIES: &[&str] = &[
    "restaurant",
    "cafe",
    "bar",
    "store",
    "shop",
    "bakery",
    "beauty_salon",
    "hair_care",
    "gym",
    "spa",
    "clothing_store",
    "shoe_store",
    "jewelry_store",
    "furniture_store",
    "home_goods_store",
    "hardware_store",
    "electronics_store",
    "food",
    "grocery_or_supermarket",
    "supermarket",
    "convenience_store",
    "accounting",
    "lawyer",
    "dentist",
    "doctor",
    "physiotherapist",
    "insurance_agency",
    "car_dealer",
    "car_repair",
    "gas_station",
    "lodging",
    "real_estate_agency",
];

pub const DEFAULT_KEYWORDS: &[&str] = &["business", "service", "shop", "store", "repair", "local"];

pub const DEFAULT_OUTPUT_PATH: &str = ".";
pub const DEFAULT_OUTPUT_FILE: &str = "leads.csv";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "leads-etl")]
#[command(about = "Collect low-reputation local businesses from the Places API into a CSV")]
pub struct CliConfig {
    /// Optional TOML search plan
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory the CSV is written to
    #[arg(long)]
    pub output_path: Option<String>,

    /// Name of the CSV file
    #[arg(long)]
    pub output_file: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    /// Show the resolved plan without calling the API
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 命令列參數優先於 TOML 設定
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(output_path) = &self.output_path {
            settings.output_path = output_path.clone();
        }
        if let Some(output_file) = &self.output_file {
            settings.output_file = output_file.clone();
        }
    }
}

/// 單次執行的完整設定
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub search_endpoint: String,
    pub details_endpoint: String,
    pub location: Coordinates,
    pub radius_meters: u32,
    pub categories: Vec<String>,
    pub keywords: Vec<String>,
    pub reputation_filter: ReputationFilter,
    pub delays: DelayPolicy,
    pub output_path: String,
    pub output_file: String,
}

impl Settings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            search_endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            details_endpoint: DEFAULT_DETAILS_ENDPOINT.to_string(),
            location: DEFAULT_LOCATION,
            radius_meters: DEFAULT_RADIUS_METERS,
            categories: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
            keywords: DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            reputation_filter: ReputationFilter::default(),
            delays: DelayPolicy::default(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
        }
    }

    /// 讀取 .env 與環境變數，缺少 API 金鑰時直接失敗
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        let api_key = require_api_key(std::env::var(API_KEY_ENV).ok())?;
        Ok(Self::new(api_key))
    }

    pub fn apply_plan(&mut self, plan: &TomlConfig) -> Result<()> {
        if let Some(location) = plan.location()? {
            self.location = location;
        }
        if let Some(radius) = plan.search.radius {
            self.radius_meters = radius;
        }
        if let Some(categories) = &plan.search.categories {
            self.categories = categories.clone();
        }
        if let Some(keywords) = &plan.search.keywords {
            self.keywords = keywords.clone();
        }

        if let Some(max_rating) = plan.filter.max_rating {
            self.reputation_filter.max_rating = max_rating;
        }
        if let Some(min_reviews) = plan.filter.min_reviews {
            self.reputation_filter.min_reviews = min_reviews;
        }

        if let Some(search) = &plan.endpoints.search {
            self.search_endpoint = search.clone();
        }
        if let Some(details) = &plan.endpoints.details {
            self.details_endpoint = details.clone();
        }

        let rate = &plan.rate_limit;
        if let Some(ms) = rate.page_token_delay_ms {
            self.delays.page_token = Duration::from_millis(ms);
        }
        if let Some(ms) = rate.details_delay_ms {
            self.delays.details = Duration::from_millis(ms);
        }
        if let Some(ms) = rate.between_searches_delay_ms {
            self.delays.between_searches = Duration::from_millis(ms);
        }

        if let Some(output_path) = &plan.load.output_path {
            self.output_path = output_path.clone();
        }
        if let Some(output_file) = &plan.load.output_file {
            self.output_file = output_file.clone();
        }

        Ok(())
    }

    /// 總搜尋次數 (類別 + 關鍵字)
    pub fn search_count(&self) -> usize {
        self.categories.len() + self.keywords.len()
    }
}

fn require_api_key(value: Option<String>) -> Result<String> {
    match value {
        Some(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(EtlError::MissingConfigError {
            field: API_KEY_ENV.to_string(),
        }),
    }
}

impl ConfigProvider for Settings {
    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn search_endpoint(&self) -> &str {
        &self.search_endpoint
    }

    fn details_endpoint(&self) -> &str {
        &self.details_endpoint
    }

    fn location(&self) -> Coordinates {
        self.location
    }

    fn radius_meters(&self) -> u32 {
        self.radius_meters
    }

    fn categories(&self) -> &[String] {
        &self.categories
    }

    fn keywords(&self) -> &[String] {
        &self.keywords
    }

    fn reputation_filter(&self) -> ReputationFilter {
        self.reputation_filter
    }

    fn delays(&self) -> DelayPolicy {
        self.delays
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string(API_KEY_ENV, &self.api_key)?;
        validation::validate_url("endpoints.search", &self.search_endpoint)?;
        validation::validate_url("endpoints.details", &self.details_endpoint)?;
        validation::validate_range("search.radius", self.radius_meters, 1, 50_000)?;
        validation::validate_search_terms(&self.categories, &self.keywords)?;
        validation::validate_range(
            "filter.max_rating",
            self.reputation_filter.max_rating,
            0.0,
            5.0,
        )?;
        validation::validate_path("load.output_path", &self.output_path)?;
        validation::validate_path("load.output_file", &self.output_file)?;
        Ok(())
    }
}
