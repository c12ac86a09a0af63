use crate::core::{NearbyQuery, PlacesApi};
use crate::domain::model::{Coordinates, DelayPolicy, LeadBook, ReputationFilter, SearchFilter};
use crate::domain::places::is_error_status;
use crate::utils::error::Result;
use std::time::Duration;

/// 以固定中心點翻頁搜尋，並為符合條件的地點查詢明細
pub struct LeadSearcher<A: PlacesApi> {
    api: A,
    location: Coordinates,
    radius_meters: u32,
    reputation_filter: ReputationFilter,
    delays: DelayPolicy,
}

impl<A: PlacesApi> LeadSearcher<A> {
    pub fn new(
        api: A,
        location: Coordinates,
        radius_meters: u32,
        reputation_filter: ReputationFilter,
        delays: DelayPolicy,
    ) -> Self {
        Self {
            api,
            location,
            radius_meters,
            reputation_filter,
            delays,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// 跟著 next_page_token 一路翻頁，直到沒有下一頁
    pub async fn search(&self, filter: &SearchFilter) -> Result<LeadBook> {
        let mut leads = LeadBook::new();
        let mut page_token: Option<String> = None;
        let mut page_count = 0usize;
        let mut total_added = 0usize;

        loop {
            let query = NearbyQuery {
                location: self.location,
                radius_meters: self.radius_meters,
                filter,
                page_token: page_token.as_deref(),
            };
            let response = self.api.nearby_search(&query).await?;

            page_count += 1;
            tracing::info!(
                "Processing page {} with {} places found",
                page_count,
                response.results.len()
            );

            if is_error_status(response.status.as_deref()) {
                tracing::warn!(
                    "⚠️ Nearby search for {} returned {}: {}",
                    filter,
                    response.status.as_deref().unwrap_or_default(),
                    response.error_message.as_deref().unwrap_or("no error message")
                );
            }

            for place in &response.results {
                if leads.contains(&place.place_id) {
                    continue;
                }

                if !self
                    .reputation_filter
                    .qualifies(place.rating, place.user_ratings_total)
                {
                    tracing::debug!(
                        "Skipping {} (rating {:?}, {:?} reviews)",
                        place.place_id,
                        place.rating,
                        place.user_ratings_total
                    );
                    continue;
                }

                let details = self.api.place_details(&place.place_id).await?;
                pause(self.delays.details).await;

                if is_error_status(details.status.as_deref()) {
                    tracing::warn!(
                        "⚠️ Details lookup for {} returned {}",
                        place.place_id,
                        details.status.as_deref().unwrap_or_default()
                    );
                }

                let lead = details.result.unwrap_or_default().into_lead(&place.place_id);
                if leads.insert_first(lead) {
                    total_added += 1;
                    if total_added % 10 == 0 {
                        tracing::info!("Added {} places to results", total_added);
                    }
                }
            }

            match response.continuation_token() {
                Some(token) => {
                    // Google 要求等待一段時間 token 才會生效
                    pause(self.delays.page_token).await;
                    page_token = Some(token.to_string());
                }
                None => break,
            }
        }

        Ok(leads)
    }
}

pub(crate) async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
