use serde::Deserialize;

use crate::domain::model::Lead;

/// 明細查詢要求的欄位
pub const DETAILS_FIELDS: &str =
    "name,rating,user_ratings_total,website,formatted_address,types,geometry";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NearbySearchResponse {
    #[serde(default)]
    pub results: Vec<PlaceSummary>,
    pub next_page_token: Option<String>,
    pub status: Option<String>,
    pub error_message: Option<String>,
}

impl NearbySearchResponse {
    /// 空字串視同沒有下一頁
    pub fn continuation_token(&self) -> Option<&str> {
        self.next_page_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }
}

/// 搜尋結果中的單一地點，place_id 為必要欄位
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceSummary {
    pub place_id: String,
    pub name: Option<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailsResponse {
    pub result: Option<PlaceDetails>,
    pub status: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlaceDetails {
    pub name: Option<String>,
    /// 保留 API 原本的數字格式，整數評分匯出時不會多出小數點
    pub rating: Option<serde_json::Number>,
    pub user_ratings_total: Option<u64>,
    pub website: Option<String>,
    pub formatted_address: Option<String>,
    pub types: Vec<String>,
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Geometry {
    pub location: Option<LatLng>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LatLng {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl PlaceDetails {
    pub fn into_lead(self, place_id: &str) -> Lead {
        let location = self.geometry.and_then(|g| g.location).unwrap_or_default();

        Lead {
            place_id: place_id.to_string(),
            name: self.name,
            rating: self.rating,
            reviews: self.user_ratings_total,
            address: self.formatted_address,
            website: self.website.unwrap_or_default(),
            types: self.types,
            lat: location.lat,
            lng: location.lng,
        }
    }
}

/// Google 回傳 OK 或 ZERO_RESULTS 以外的狀態時代表請求被拒或出錯
pub fn is_error_status(status: Option<&str>) -> bool {
    matches!(status, Some(s) if s != "OK" && s != "ZERO_RESULTS")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_without_website_defaults_to_empty() {
        let body = serde_json::json!({
            "result": {
                "name": "Joe's Cafe",
                "formatted_address": "1 Main St",
                "types": ["cafe", "food"],
                "geometry": {"location": {"lat": 43.65, "lng": -79.38}}
            },
            "status": "OK"
        });

        let response: DetailsResponse = serde_json::from_value(body).unwrap();
        let lead = response.result.unwrap().into_lead("p1");

        assert_eq!(lead.website, "");
        assert_eq!(lead.name.as_deref(), Some("Joe's Cafe"));
        assert_eq!(lead.lat, Some(43.65));
        assert_eq!(lead.lng, Some(-79.38));
        assert!(lead.rating.is_none());
    }

    #[test]
    fn test_empty_details_result() {
        let response: DetailsResponse =
            serde_json::from_value(serde_json::json!({"status": "NOT_FOUND"})).unwrap();
        let lead = response.result.unwrap_or_default().into_lead("gone");

        assert_eq!(lead.place_id, "gone");
        assert!(lead.name.is_none());
        assert!(lead.types.is_empty());
        assert!(lead.lat.is_none());
    }

    #[test]
    fn test_error_response_has_no_results() {
        let body = serde_json::json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        });

        let response: NearbySearchResponse = serde_json::from_value(body).unwrap();
        assert!(response.results.is_empty());
        assert!(response.continuation_token().is_none());
        assert!(is_error_status(response.status.as_deref()));
    }

    #[test]
    fn test_result_without_place_id_fails_to_decode() {
        let body = serde_json::json!({"results": [{"name": "No id"}]});
        assert!(serde_json::from_value::<NearbySearchResponse>(body).is_err());
    }

    #[test]
    fn test_status_classification() {
        assert!(!is_error_status(Some("OK")));
        assert!(!is_error_status(Some("ZERO_RESULTS")));
        assert!(!is_error_status(None));
        assert!(is_error_status(Some("OVER_QUERY_LIMIT")));
    }
}
