use crate::domain::model::{
    Coordinates, DelayPolicy, LeadBook, ReputationFilter, SearchFilter, TransformResult,
};
use crate::domain::places::{DetailsResponse, NearbySearchResponse};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_key(&self) -> &str;
    fn search_endpoint(&self) -> &str;
    fn details_endpoint(&self) -> &str;
    fn location(&self) -> Coordinates;
    fn radius_meters(&self) -> u32;
    fn categories(&self) -> &[String];
    fn keywords(&self) -> &[String];
    fn reputation_filter(&self) -> ReputationFilter;
    fn delays(&self) -> DelayPolicy;
    fn output_path(&self) -> &str;
    fn output_file(&self) -> &str;
}

/// 一次搜尋請求的參數
#[derive(Debug, Clone)]
pub struct NearbyQuery<'a> {
    pub location: Coordinates,
    pub radius_meters: u32,
    pub filter: &'a SearchFilter,
    pub page_token: Option<&'a str>,
}

#[async_trait]
pub trait PlacesApi: Send + Sync {
    async fn nearby_search(&self, query: &NearbyQuery<'_>) -> Result<NearbySearchResponse>;
    async fn place_details(&self, place_id: &str) -> Result<DetailsResponse>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<LeadBook>;
    async fn transform(&self, leads: LeadBook) -> Result<TransformResult>;
    /// 沒有任何資料時不寫檔，回傳 None
    async fn load(&self, result: TransformResult) -> Result<Option<String>>;
}
