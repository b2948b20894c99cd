use crate::errors::{ApiError, WidgetError};
use crate::models::{CategoryRecord, RawPlant};
use crate::normalize::category_from_value;
use reqwest::{Client, Url};
use serde_json::Value;
use std::future::Future;
use tracing::debug;

/// Read side of the plant catalog. Every call is a fresh request; nothing is
/// cached and nothing is retried.
pub trait PlantSource {
    fn list_categories(&self) -> impl Future<Output = Result<Vec<CategoryRecord>, WidgetError>>;

    fn list_all_plants(&self) -> impl Future<Output = Result<Vec<RawPlant>, WidgetError>>;

    fn list_plants_by_category(
        &self,
        category_id: &str,
    ) -> impl Future<Output = Result<Vec<RawPlant>, WidgetError>>;

    fn get_plant_detail(&self, id: &str) -> impl Future<Output = Result<RawPlant, WidgetError>>;
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base: &str) -> Result<Self, ApiError> {
        Self::with_client(Client::new(), base)
    }

    pub fn with_client(http: Client, base: &str) -> Result<Self, ApiError> {
        let parsed = Url::parse(base).map_err(|err| ApiError::BaseUrl {
            base: base.to_string(),
            reason: err.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::BaseUrl {
                base: base.to_string(),
                reason: "url cannot carry a path".to_string(),
            });
        }
        Ok(Self { http, base: parsed })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Appends path segments to the base, percent-encoding each one.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json(&self, url: Url) -> Result<Value, ApiError> {
        debug!("GET {url}");
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;
        if !response.status().is_success() {
            debug!("{url} answered {}", response.status());
        }
        let body = response.bytes().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;
        decode_body(&url, &body)
    }
}

/// Numbers are kept as written, so an out-of-range price such as `1e400`
/// reaches the normalizer instead of failing the whole body.
fn decode_body(url: &Url, body: &[u8]) -> Result<Value, ApiError> {
    serde_json::from_slice(body).map_err(|source| ApiError::Decode {
        url: url.to_string(),
        source,
    })
}

impl PlantSource for ApiClient {
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, WidgetError> {
        let data = self.get_json(self.endpoint(&["categories"])).await?;
        Ok(array_field(&data, "categories")
            .iter()
            .map(category_from_value)
            .collect())
    }

    async fn list_all_plants(&self) -> Result<Vec<RawPlant>, WidgetError> {
        let data = self.get_json(self.endpoint(&["plants"])).await?;
        Ok(plants_field(&data))
    }

    async fn list_plants_by_category(&self, category_id: &str) -> Result<Vec<RawPlant>, WidgetError> {
        if category_id.is_empty() {
            return Err(WidgetError::missing("category"));
        }
        let data = self
            .get_json(self.endpoint(&["category", category_id]))
            .await?;
        Ok(plants_field(&data))
    }

    async fn get_plant_detail(&self, id: &str) -> Result<RawPlant, WidgetError> {
        if id.is_empty() {
            return Err(WidgetError::missing("plant"));
        }
        let data = self.get_json(self.endpoint(&["plant", id])).await?;
        Ok(detail_payload(&data))
    }
}

fn array_field<'a>(data: &'a Value, key: &str) -> &'a [Value] {
    data.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn plants_field(data: &Value) -> Vec<RawPlant> {
    array_field(data, "plants")
        .iter()
        .map(RawPlant::from_value)
        .collect()
}

/// The detail endpoint nests the record under `plant` on some deployments and
/// `plants` on others.
pub fn detail_payload(data: &Value) -> RawPlant {
    ["plant", "plants"]
        .into_iter()
        .filter_map(|key| data.get(key))
        .find(|value| !value.is_null())
        .map(RawPlant::from_value)
        .unwrap_or_default()
}
