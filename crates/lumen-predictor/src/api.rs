//! HTTP client for the prediction API.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

use crate::config::{ApiConfig, BasicAuth};

const CONNECT_TIMEOUT_SECS: u64 = 8;
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status. `body` is the raw response text.
    #[error("request failed with status code {status}")]
    Api { status: u16, body: String },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API base URL is not configured")]
    NotConfigured,
}

impl ApiError {
    /// JSON shown in place of a result: the server's error body when it is
    /// JSON, otherwise `{"error": <message>}`.
    pub fn detail(&self) -> Value {
        if let ApiError::Api { body, .. } = self {
            if let Ok(v) = serde_json::from_str::<Value>(body) {
                return v;
            }
        }
        serde_json::json!({ "error": self.to_string() })
    }
}

/// Model inputs, in the order the API documents them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Features {
    #[serde(serialize_with = "plain_number")]
    pub adherence_pct: f64,
    #[serde(serialize_with = "plain_number")]
    pub age_years: f64,
    #[serde(serialize_with = "plain_number")]
    pub bmi: f64,
    pub fmd_regimen_type: String,
    #[serde(serialize_with = "plain_number")]
    pub hba1c: f64,
    pub meds_diabetes: u8,
    #[serde(serialize_with = "plain_number")]
    pub n_cycles: f64,
    pub sex: String,
    #[serde(serialize_with = "plain_number")]
    pub weight_kg: f64,
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    features: &'a Features,
}

/// Whole numbers go out as JSON integers (`40`, not `40.0`); the API's
/// integer fields reject fractional forms.
fn plain_number<S: Serializer>(v: &f64, s: S) -> Result<S::Ok, S::Error> {
    const EXACT: f64 = 9_007_199_254_740_992.0;
    if v.fract() == 0.0 && v.abs() < EXACT {
        s.serialize_i64(*v as i64)
    } else {
        s.serialize_f64(*v)
    }
}

/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    basic_auth: Option<BasicAuth>,
    http: Client,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            base_url: config.base_url.clone(),
            basic_auth: config.basic_auth.clone(),
            http,
        })
    }

    fn url(&self, path: &str) -> Result<String, ApiError> {
        if self.base_url.is_empty() {
            return Err(ApiError::NotConfigured);
        }
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(format!("{base}/{path}"))
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let builder = self.http.request(method, self.url(path)?);
        Ok(match &self.basic_auth {
            Some(auth) => builder.basic_auth(&auth.user, auth.password.as_deref()),
            None => builder,
        })
    }

    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await?;
        Err(ApiError::Api { status: status.as_u16(), body })
    }

    /// `GET /v1/features`: the model's feature column names.
    pub async fn features(&self) -> Result<Vec<String>, ApiError> {
        let response = self.request(Method::GET, "/v1/features")?.send().await?;
        let body = Self::check(response).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// `POST /v1/predict`. The response is kept as raw JSON for display.
    pub async fn predict(&self, features: &Features) -> Result<Value, ApiError> {
        let response = self
            .request(Method::POST, "/v1/predict")?
            .json(&PredictRequest { features })
            .send()
            .await?;
        let body = Self::check(response).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Features {
        Features {
            adherence_pct: 90.0,
            age_years: 40.0,
            bmi: 22.0,
            fmd_regimen_type: "standard_fmd".into(),
            hba1c: 5.6,
            meds_diabetes: 0,
            n_cycles: 4.0,
            sex: "M".into(),
            weight_kg: 70.5,
        }
    }

    fn client(base: &str) -> ApiClient {
        ApiClient::new(&ApiConfig { base_url: base.into(), basic_auth: None }).expect("client")
    }

    // ── request body ──────────────────────────────────────────────────────

    #[test]
    fn predict_body_wraps_features() {
        let f = sample();
        let json = serde_json::to_string(&PredictRequest { features: &f }).expect("serialize");
        assert_eq!(
            json,
            r#"{"features":{"adherence_pct":90,"age_years":40,"bmi":22,"fmd_regimen_type":"standard_fmd","hba1c":5.6,"meds_diabetes":0,"n_cycles":4,"sex":"M","weight_kg":70.5}}"#
        );
    }

    // ── urls ──────────────────────────────────────────────────────────────

    #[test]
    fn url_joins_without_double_slash() {
        assert_eq!(client("http://api.local/").url("/v1/features").ok().as_deref(), Some("http://api.local/v1/features"));
        assert_eq!(client("http://api.local").url("v1/predict").ok().as_deref(), Some("http://api.local/v1/predict"));
    }

    #[test]
    fn empty_base_is_not_configured() {
        assert!(matches!(client("").url("/v1/features"), Err(ApiError::NotConfigured)));
    }

    // ── error detail ──────────────────────────────────────────────────────

    #[test]
    fn json_error_body_is_shown_verbatim() {
        let err = ApiError::Api { status: 422, body: r#"{"detail":"bad bmi"}"#.into() };
        assert_eq!(err.detail(), serde_json::json!({ "detail": "bad bmi" }));
        assert_eq!(err.to_string(), "request failed with status code 422");
    }

    #[test]
    fn other_errors_wrap_message() {
        let err = ApiError::Api { status: 502, body: "<html>bad gateway</html>".into() };
        assert_eq!(err.detail(), serde_json::json!({ "error": "request failed with status code 502" }));
        assert_eq!(
            ApiError::NotConfigured.detail(),
            serde_json::json!({ "error": "API base URL is not configured" })
        );
    }
}
