use crate::domain::model::Coordinates;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 選用的 TOML 搜尋計畫，未提供的欄位沿用預設值
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub search: SearchSection,
    pub filter: FilterSection,
    pub endpoints: EndpointSection,
    pub rate_limit: RateLimitSection,
    pub load: LoadSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSection {
    pub location: Option<String>,
    pub radius: Option<u32>,
    pub categories: Option<Vec<String>>,
    pub keywords: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSection {
    pub max_rating: Option<f64>,
    pub min_reviews: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointSection {
    pub search: Option<String>,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitSection {
    pub page_token_delay_ms: Option<u64>,
    pub details_delay_ms: Option<u64>,
    pub between_searches_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadSection {
    pub output_path: Option<String>,
    pub output_file: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PLACES_ENDPOINT})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 解析搜尋中心點
    pub fn location(&self) -> Result<Option<Coordinates>> {
        self.search
            .location
            .as_deref()
            .map(|raw| {
                raw.parse::<Coordinates>().map_err(|_| EtlError::InvalidConfigValueError {
                    field: "search.location".to_string(),
                    value: raw.to_string(),
                    reason: "expected 'lat,lng' with valid coordinates".to_string(),
                })
            })
            .transpose()
    }

    /// 驗證有提供的欄位，未提供的欄位交給預設值
    pub fn validate_config(&self) -> Result<()> {
        self.location()?;

        if let Some(radius) = self.search.radius {
            validation::validate_range("search.radius", radius, 1, 50_000)?;
        }
        // 只提供其中一份清單時，另一份沿用預設值，因此只有兩份都給空清單才算錯
        match (&self.search.categories, &self.search.keywords) {
            (Some(categories), Some(keywords)) => {
                validation::validate_search_terms(categories, keywords)?
            }
            (Some(terms), None) | (None, Some(terms)) => {
                for term in terms {
                    validation::validate_non_empty_string("search", term)?;
                }
            }
            (None, None) => {}
        }
        if let Some(max_rating) = self.filter.max_rating {
            validation::validate_range("filter.max_rating", max_rating, 0.0, 5.0)?;
        }
        if let Some(search) = &self.endpoints.search {
            validation::validate_url("endpoints.search", search)?;
        }
        if let Some(details) = &self.endpoints.details {
            validation::validate_url("endpoints.details", details)?;
        }
        if let Some(output_path) = &self.load.output_path {
            validation::validate_path("load.output_path", output_path)?;
        }
        if let Some(output_file) = &self.load.output_file {
            validation::validate_path("load.output_file", output_file)?;
        }

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
