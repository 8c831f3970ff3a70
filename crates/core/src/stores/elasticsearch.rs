use crate::config::{Credentials, IndexFields, SearchServiceConfig};
use crate::query::build_search_body;
use crate::traits::AddressIndex;
use crate::{ConfigError, GeoPoint, HouseNumberEntry, Locator, SearchError, StreetDocument};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub struct ElasticsearchStore {
    client: Arc<Client>,
    search_url: Url,
    credentials: Option<Credentials>,
    fields: IndexFields,
}

impl ElasticsearchStore {
    pub fn new(config: &SearchServiceConfig) -> Result<Self, ConfigError> {
        let mut builder = Client::builder();
        if let Some(timeout_secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }

        Ok(Self {
            client: Arc::new(builder.build()?),
            search_url: config.search_url()?,
            credentials: config.credentials.clone(),
            fields: config.fields.clone(),
        })
    }

    pub fn search_url(&self) -> &Url {
        &self.search_url
    }
}

#[async_trait]
impl AddressIndex for ElasticsearchStore {
    async fn search_streets(&self, locator: &Locator) -> Result<Vec<StreetDocument>, SearchError> {
        let body = build_search_body(locator, &self.fields);
        debug!(url = %self.search_url, query = %body, "querying street index");

        let mut request = self
            .client
            .post(self.search_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(serde_json::to_vec(&body)?);
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(SearchError::BackendResponse {
                backend: "elasticsearch".to_string(),
                details: response.status().to_string(),
            });
        }

        let response_json: Value = response.json().await?;
        Ok(parse_street_documents(&response_json))
    }
}

/// Reads ranked street documents out of a `_search` response.
///
/// Missing or oddly shaped fields degrade to "nothing found" instead of
/// failing: no `hits.hits` yields no documents, no `housenumbers` yields no
/// doors, and doors without a readable number or location are skipped.
pub fn parse_street_documents(response: &Value) -> Vec<StreetDocument> {
    let hits = response
        .pointer("/hits/hits")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    hits.iter()
        .map(|raw| {
            let source = raw.pointer("/_source");
            let house_numbers = source
                .and_then(|source| source.pointer("/housenumbers"))
                .and_then(Value::as_array)
                .map(|entries| entries.iter().filter_map(parse_house_number).collect())
                .unwrap_or_default();

            StreetDocument {
                id: raw
                    .pointer("/_id")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                score: raw.pointer("/_score").and_then(Value::as_f64).unwrap_or(0.0),
                name: source
                    .and_then(|source| source.pointer("/name"))
                    .and_then(Value::as_str)
                    .map(str::to_string),
                house_numbers,
            }
        })
        .collect()
}

fn parse_house_number(entry: &Value) -> Option<HouseNumberEntry> {
    let number = match entry.pointer("/number")? {
        Value::String(text) => text.clone(),
        Value::Number(number) => match number.as_i64() {
            Some(integer) => integer.to_string(),
            None => number.as_f64()?.to_string(),
        },
        _ => return None,
    };

    Some(HouseNumberEntry {
        number,
        location: parse_geo_point(entry.pointer("/location")?)?,
    })
}

// Elasticsearch accepts geo points as an object, a `[lon, lat]` array or a
// `"lat,lon"` string.
fn parse_geo_point(value: &Value) -> Option<GeoPoint> {
    match value {
        Value::Object(_) => Some(GeoPoint::new(
            value.pointer("/lon").and_then(Value::as_f64)?,
            value.pointer("/lat").and_then(Value::as_f64)?,
        )),
        Value::Array(pair) if pair.len() == 2 => {
            Some(GeoPoint::new(pair[0].as_f64()?, pair[1].as_f64()?))
        }
        Value::String(text) => {
            let (lat, lon) = text.split_once(',')?;
            Some(GeoPoint::new(
                lon.trim().parse().ok()?,
                lat.trim().parse().ok()?,
            ))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn documents_keep_rank_order_and_doors() {
        let response = json!({
            "hits": {"hits": [
                {
                    "_id": "street-1",
                    "_score": 7.5,
                    "_source": {
                        "name": "AV. AREQUIPA",
                        "housenumbers": [
                            {"number": "1234", "location": {"lon": -77.03, "lat": -12.12}},
                            {"number": 1240, "location": {"lon": -77.04, "lat": -12.13}}
                        ]
                    }
                },
                {"_id": "street-2", "_score": 3.0, "_source": {}}
            ]}
        });

        let documents = parse_street_documents(&response);
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].id, "street-1");
        assert_eq!(documents[0].name.as_deref(), Some("AV. AREQUIPA"));
        assert_eq!(documents[0].house_numbers.len(), 2);
        assert_eq!(documents[0].house_numbers[1].number, "1240");
        assert!(documents[1].house_numbers.is_empty());
    }

    #[test]
    fn missing_hits_means_no_documents() {
        assert!(parse_street_documents(&json!({"took": 3})).is_empty());
        assert!(parse_street_documents(&json!({"hits": {"hits": []}})).is_empty());
    }

    #[test]
    fn unreadable_doors_are_skipped() {
        let response = json!({
            "hits": {"hits": [{
                "_source": {"housenumbers": [
                    {"number": "10"},
                    {"location": {"lon": 1.0, "lat": 2.0}},
                    {"number": true, "location": {"lon": 1.0, "lat": 2.0}},
                    {"number": "12", "location": {"lon": "x", "lat": 2.0}},
                    {"number": "14", "location": {"lon": 1.0, "lat": 2.0}}
                ]}
            }]}
        });

        let documents = parse_street_documents(&response);
        assert_eq!(documents[0].house_numbers.len(), 1);
        assert_eq!(documents[0].house_numbers[0].number, "14");
    }

    #[test]
    fn geo_point_shapes_are_accepted() {
        assert_eq!(
            parse_geo_point(&json!([-77.03, -12.12])),
            Some(GeoPoint::new(-77.03, -12.12))
        );
        assert_eq!(
            parse_geo_point(&json!("-12.12, -77.03")),
            Some(GeoPoint::new(-77.03, -12.12))
        );
        assert_eq!(parse_geo_point(&json!(null)), None);
    }
}
