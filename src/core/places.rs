use crate::core::{NearbyQuery, PlacesApi};
use crate::domain::places::{DetailsResponse, NearbySearchResponse, DETAILS_FIELDS};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;

/// Places API 客戶端，錯誤狀態由回應 JSON 的 status 欄位表示
pub struct PlacesClient {
    client: Client,
    api_key: String,
    search_endpoint: String,
    details_endpoint: String,
}

impl PlacesClient {
    pub fn new(api_key: String, search_endpoint: String, details_endpoint: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            search_endpoint,
            details_endpoint,
        }
    }
}

#[async_trait]
impl PlacesApi for PlacesClient {
    async fn nearby_search(&self, query: &NearbyQuery<'_>) -> Result<NearbySearchResponse> {
        let (filter_name, filter_value) = query.filter.query_param();
        let mut params = vec![
            ("location", query.location.to_query()),
            ("radius", query.radius_meters.to_string()),
            ("key", self.api_key.clone()),
            (filter_name, filter_value.to_string()),
        ];
        if let Some(token) = query.page_token {
            params.push(("pagetoken", token.to_string()));
        }

        tracing::debug!(
            "Nearby search {} (page token: {})",
            query.filter,
            query.page_token.is_some()
        );
        let response = self
            .client
            .get(&self.search_endpoint)
            .query(&params)
            .send()
            .await?;

        tracing::debug!("Nearby search response status: {}", response.status());
        Ok(response.json::<NearbySearchResponse>().await?)
    }

    async fn place_details(&self, place_id: &str) -> Result<DetailsResponse> {
        let params = [
            ("place_id", place_id),
            ("fields", DETAILS_FIELDS),
            ("key", self.api_key.as_str()),
        ];

        let response = self
            .client
            .get(&self.details_endpoint)
            .query(&params)
            .send()
            .await?;

        tracing::debug!("Details response status for {}: {}", place_id, response.status());
        Ok(response.json::<DetailsResponse>().await?)
    }
}
