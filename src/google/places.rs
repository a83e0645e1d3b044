use async_trait::async_trait;
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::{debug, warn};

use super::{repo_types::GoogleReview, PlacesSource};
use crate::{config::PlacesConfig, sync::UpstreamError};

#[derive(Debug, Deserialize)]
struct PlaceDetailsResponse {
    #[serde(default)]
    result: Option<PlaceResult>,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    #[serde(default)]
    reviews: Vec<serde_json::Value>,
}

/// The subset of a Places review item that is stored in columns.
#[derive(Debug, Deserialize)]
struct PlaceReview {
    author_name: Option<String>,
    rating: Option<i32>,
    text: Option<String>,
    time: i64,
}

/// Turns a Places details payload into storable reviews, skipping items
/// that lack a usable timestamp.
pub fn parse_place_reviews(body: &str) -> Result<Vec<GoogleReview>, UpstreamError> {
    let details: PlaceDetailsResponse =
        serde_json::from_str(body).map_err(|e| UpstreamError::Payload(e.to_string()))?;
    let items = details.result.map(|r| r.reviews).unwrap_or_default();

    let mut out = Vec::with_capacity(items.len());
    for raw in items {
        let item = match serde_json::from_value::<PlaceReview>(raw.clone()) {
            Ok(item) => item,
            Err(e) => {
                warn!(error = %e, "skipping unparseable place review");
                continue;
            }
        };
        let Ok(review_time) = OffsetDateTime::from_unix_timestamp(item.time) else {
            warn!(time = item.time, "skipping place review with out-of-range time");
            continue;
        };
        out.push(GoogleReview {
            google_review_id: item.time.to_string(),
            author_name: item.author_name,
            rating: item.rating,
            review_text: item.text,
            review_time,
            raw,
        });
    }
    Ok(out)
}

/// Places details client for a single configured place.
#[derive(Clone)]
pub struct PlacesClient {
    client: reqwest::Client,
    endpoint: String,
    place_id: String,
    api_key: String,
}

impl PlacesClient {
    /// `None` unless both the place id and the API key are configured.
    pub fn from_config(client: reqwest::Client, config: &PlacesConfig) -> Option<Self> {
        let (Some(place_id), Some(api_key)) = (&config.place_id, &config.api_key) else {
            return None;
        };
        Some(Self {
            client,
            endpoint: config.endpoint.clone(),
            place_id: place_id.clone(),
            api_key: api_key.clone(),
        })
    }
}

#[async_trait]
impl PlacesSource for PlacesClient {
    async fn fetch_reviews(&self) -> Result<Vec<GoogleReview>, UpstreamError> {
        let res = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("place_id", self.place_id.as_str()),
                ("fields", "reviews"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;
        let status = res.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }
        let body = res.text().await?;
        let reviews = parse_place_reviews(&body)?;
        debug!(count = reviews.len(), "fetched place reviews");
        Ok(reviews)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_PLACES_URL;

    #[test]
    fn parses_reviews_and_keeps_raw_item() {
        let body = r#"{
            "result": {
                "reviews": [
                    {"author_name": "Jo", "rating": 5, "text": "Fast repair", "time": 1705314600,
                     "profile_photo_url": "https://example.com/jo.png"},
                    {"author_name": "Sam", "rating": 4, "text": "Good", "time": 1704896400}
                ]
            },
            "status": "OK"
        }"#;
        let reviews = parse_place_reviews(body).unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].google_review_id, "1705314600");
        assert_eq!(reviews[0].author_name.as_deref(), Some("Jo"));
        assert_eq!(reviews[0].rating, Some(5));
        assert_eq!(reviews[0].review_time.unix_timestamp(), 1705314600);
        assert_eq!(reviews[0].raw["profile_photo_url"], "https://example.com/jo.png");
    }

    #[test]
    fn missing_result_is_empty() {
        assert!(parse_place_reviews(r#"{"status":"INVALID_REQUEST"}"#)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn items_without_time_are_skipped() {
        let body = r#"{"result":{"reviews":[{"author_name":"x"},{"time":1700000000}]}}"#;
        let reviews = parse_place_reviews(body).unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].google_review_id, "1700000000");
        assert!(reviews[0].author_name.is_none());
    }

    #[test]
    fn non_json_body_is_payload_error() {
        assert!(matches!(
            parse_place_reviews("<html>"),
            Err(UpstreamError::Payload(_))
        ));
    }

    #[test]
    fn client_needs_place_and_key() {
        let client = reqwest::Client::new();
        let mut cfg = PlacesConfig {
            place_id: Some("ChIJ123".into()),
            api_key: None,
            endpoint: DEFAULT_PLACES_URL.into(),
        };
        assert!(PlacesClient::from_config(client.clone(), &cfg).is_none());
        cfg.api_key = Some("k".into());
        assert!(PlacesClient::from_config(client, &cfg).is_some());
    }
}
