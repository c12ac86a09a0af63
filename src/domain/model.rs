use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::utils::error::EtlError;

/// 搜尋中心點
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Places API 使用的 `lat,lng` 格式
    pub fn to_query(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

impl FromStr for Coordinates {
    type Err = EtlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| EtlError::InvalidConfigValueError {
            field: "location".to_string(),
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| invalid("expected format 'lat,lng'"))?;
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| invalid("latitude is not a number"))?;
        let lng: f64 = lng
            .trim()
            .parse()
            .map_err(|_| invalid("longitude is not a number"))?;

        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(invalid("coordinates out of range"));
        }

        Ok(Self { lat, lng })
    }
}

/// 一次搜尋只會帶其中一種條件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFilter {
    Category(String),
    Keyword(String),
}

impl SearchFilter {
    /// 對應的查詢參數 (`type` 或 `keyword`)
    pub fn query_param(&self) -> (&'static str, &str) {
        match self {
            SearchFilter::Category(tag) => ("type", tag),
            SearchFilter::Keyword(text) => ("keyword", text),
        }
    }
}

impl fmt::Display for SearchFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchFilter::Category(tag) => write!(f, "business type: {}", tag),
            SearchFilter::Keyword(text) => write!(f, "keyword: {}", text),
        }
    }
}

/// 評分 <= max_rating 或評論數 < min_reviews 即符合，缺值視為 0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReputationFilter {
    pub max_rating: f64,
    pub min_reviews: u64,
}

impl Default for ReputationFilter {
    fn default() -> Self {
        Self {
            max_rating: 4.0,
            min_reviews: 100,
        }
    }
}

impl ReputationFilter {
    pub fn qualifies(&self, rating: Option<f64>, reviews: Option<u64>) -> bool {
        let rating = rating.unwrap_or(0.0);
        let reviews = reviews.unwrap_or(0);
        rating <= self.max_rating || reviews < self.min_reviews
    }
}

/// 固定的等待間隔，用來避開 API 速率限制
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayPolicy {
    /// next_page_token 生效前需要等待的時間
    pub page_token: Duration,
    pub details: Duration,
    pub between_searches: Duration,
}

impl Default for DelayPolicy {
    fn default() -> Self {
        Self {
            page_token: Duration::from_secs(2),
            details: Duration::from_millis(200),
            between_searches: Duration::from_secs(1),
        }
    }
}

impl DelayPolicy {
    pub fn none() -> Self {
        Self {
            page_token: Duration::ZERO,
            details: Duration::ZERO,
            between_searches: Duration::ZERO,
        }
    }
}

/// 通過篩選並補上明細的商家
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Lead {
    pub place_id: String,
    pub name: Option<String>,
    pub rating: Option<serde_json::Number>,
    pub reviews: Option<u64>,
    pub address: Option<String>,
    pub website: String,
    pub types: Vec<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl Lead {
    pub fn to_row(&self) -> LeadRow {
        LeadRow {
            name: self.name.clone(),
            rating: self.rating.clone(),
            reviews: self.reviews,
            address: self.address.clone(),
            website: self.website.clone(),
            r#type: self.types.join(", "),
            lat: self.lat,
            lng: self.lng,
        }
    }
}

/// 匯出到 CSV 的一列，欄位順序即為標頭順序
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadRow {
    pub name: Option<String>,
    pub rating: Option<serde_json::Number>,
    pub reviews: Option<u64>,
    pub address: Option<String>,
    pub website: String,
    #[serde(rename = "type")]
    pub r#type: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// 依插入順序保存、以 place_id 為鍵的名單
#[derive(Debug, Clone, Default)]
pub struct LeadBook {
    order: Vec<String>,
    leads: HashMap<String, Lead>,
}

impl LeadBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, place_id: &str) -> bool {
        self.leads.contains_key(place_id)
    }

    pub fn get(&self, place_id: &str) -> Option<&Lead> {
        self.leads.get(place_id)
    }

    /// 已存在時不覆寫，回傳是否有新增
    pub fn insert_first(&mut self, lead: Lead) -> bool {
        if self.leads.contains_key(&lead.place_id) {
            return false;
        }
        self.order.push(lead.place_id.clone());
        self.leads.insert(lead.place_id.clone(), lead);
        true
    }

    /// 後寫入者覆蓋，但保留原本的位置
    pub fn upsert(&mut self, lead: Lead) {
        if !self.leads.contains_key(&lead.place_id) {
            self.order.push(lead.place_id.clone());
        }
        self.leads.insert(lead.place_id.clone(), lead);
    }

    pub fn merge(&mut self, other: LeadBook) {
        for lead in other.into_leads() {
            self.upsert(lead);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Lead> {
        self.order.iter().filter_map(|id| self.leads.get(id))
    }

    pub fn into_leads(mut self) -> Vec<Lead> {
        self.order
            .iter()
            .filter_map(|id| self.leads.remove(id))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub rows: Vec<LeadRow>,
    pub csv_output: Vec<u8>,
}
