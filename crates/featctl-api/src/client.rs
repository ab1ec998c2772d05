// Registry HTTP client
//
// Wraps `reqwest::Client` with registry URL construction and uniform
// response handling. The source console split its operations between
// propagated failures (list) and error-as-value returns (mutations);
// here every operation returns Result and non-2xx responses become
// Error::Api with the status code and body, so callers branch on one
// channel.

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::model::{Feature, FeatureId, FeaturePage};
use crate::transport::TransportConfig;

/// Response header carrying the total matching record count for list
/// queries. Absent on older backends; the page length is used then.
const TOTAL_COUNT_HEADER: &str = "X-Total-Count";

/// HTTP client for the feature-store registry.
///
/// All endpoints hang off one collection path, `{base}/features`.
/// Create sends a record without an id and the backend assigns one;
/// update is a full-record replace where the path id always wins over
/// whatever id the in-memory record carried.
pub struct RegistryClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RegistryClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the registry root (e.g. `https://registry.internal`);
    /// the `/features` path is appended per request.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The registry base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{base}/features`
    fn collection_url(&self) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/features")).expect("invalid collection URL")
    }

    /// `{base}/features/{id}`
    fn item_url(&self, id: &FeatureId) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/features/{id}")).expect("invalid item URL")
    }

    // ── Operations ───────────────────────────────────────────────────

    /// List one page of features.
    ///
    /// `GET /features?keyword=&page=&limit=` — rows come back in server
    /// order and are not re-sorted. The total count is read from the
    /// `X-Total-Count` header when the backend supplies it.
    pub async fn list(&self, page: u32, limit: u32, keyword: &str) -> Result<FeaturePage, Error> {
        let mut url = self.collection_url();
        url.query_pairs_mut()
            .append_pair("keyword", keyword)
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());
        debug!("GET {url}");

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        let resp = check_status(resp).await?;

        let total_header = resp
            .headers()
            .get(TOTAL_COUNT_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let items: Vec<Feature> = decode_body(resp).await?;
        let total = total_header.unwrap_or(items.len() as u64);
        Ok(FeaturePage { items, total })
    }

    /// Fetch a single feature by id.
    ///
    /// `GET /features/{id}`
    pub async fn get(&self, id: &FeatureId) -> Result<Feature, Error> {
        let url = self.item_url(id);
        debug!("GET {url}");

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        decode_body(check_status(resp).await?).await
    }

    /// Create a new feature.
    ///
    /// `POST /features` with a record that carries no id; the backend
    /// responds 201 with the created record, id assigned.
    pub async fn create(&self, feature: &Feature) -> Result<Feature, Error> {
        let url = self.collection_url();
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .json(feature)
            .send()
            .await
            .map_err(Error::Transport)?;
        decode_body(check_status(resp).await?).await
    }

    /// Replace an existing feature.
    ///
    /// `PUT /features/{id}` — the record's id is overwritten with the
    /// path id before sending, so an edit can never retarget a record
    /// other than the one whose endpoint was called.
    pub async fn update(&self, feature: &Feature, id: &FeatureId) -> Result<Feature, Error> {
        let mut body = feature.clone();
        body.id = Some(id.clone());

        let url = self.item_url(id);
        debug!("PUT {url}");

        let resp = self
            .http
            .put(url)
            .json(&body)
            .send()
            .await
            .map_err(Error::Transport)?;
        decode_body(check_status(resp).await?).await
    }

    /// Delete a feature by id.
    ///
    /// `DELETE /features/{id}` — 200 on success; the record is removed
    /// server-side with no tombstone or undo.
    pub async fn delete(&self, id: &FeatureId) -> Result<(), Error> {
        let url = self.item_url(id);
        debug!("DELETE {url}");

        let resp = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(Error::Transport)?;
        check_status(resp).await?;
        Ok(())
    }
}

// ── Response helpers ─────────────────────────────────────────────────

/// Turn a non-2xx response into `Error::Api` carrying status and body.
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(Error::Api {
        status: status.as_u16(),
        body,
    })
}

/// Decode a JSON body, keeping the raw text around for diagnostics.
async fn decode_body<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let body = resp.text().await.map_err(Error::Transport)?;
    serde_json::from_str(&body).map_err(|e| {
        let preview = &body[..body.len().min(200)];
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.clone(),
        }
    })
}
