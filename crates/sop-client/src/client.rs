//! Reqwest-based SOP gateway client

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use sop_core::types::{DEFAULT_VERSION, FIELD_SIGN, FIELD_SIGN_TYPE};
use sop_core::{validate_envelope, RequestEnvelope, SigningScheme};
use sop_signing::sign_envelope;

use crate::envelope::assemble_envelope;
use crate::error::SopClientError;
use crate::response::unwrap_response;

/// Gateway method names for the map and WeChat-auth operation family.
pub const METHOD_MAP_DOWNLOAD: &str = "map.download";
pub const METHOD_MAP_LIST: &str = "map.list";
pub const METHOD_MAP_NEAREST: &str = "map.nearest.get";
pub const METHOD_MAP_LOCATION_UPLOAD: &str = "map.location.upload";
pub const METHOD_OFFICIAL_AUTH: &str = "official.auth.get";
pub const METHOD_OFFICIAL_AUTH_TICKET: &str = "official.auth.ticket";

/// SOP gateway client holding one application's credentials.
///
/// Each call assembles a fresh envelope, signs it, and POSTs it as the
/// JSON body; the key material is re-normalized per call and never
/// cached in parsed form.
///
/// # Example
///
/// ```ignore
/// use sop_client::SopClient;
/// use serde_json::json;
///
/// let client = SopClient::new("http://192.168.0.61:8152", app_id, app_key);
/// let maps = client.map_list(&json!({})).await?;
/// ```
pub struct SopClient {
    http: Client,
    base_url: String,
    app_id: String,
    app_key: String,
    scheme: SigningScheme,
}

impl SopClient {
    /// Create a client with the given gateway base URL and credentials.
    ///
    /// The base URL should not include a trailing slash. Requests sign
    /// with RSA2 (SHA-256) unless overridden via [`with_scheme`].
    ///
    /// [`with_scheme`]: SopClient::with_scheme
    pub fn new(
        base_url: impl Into<String>,
        app_id: impl Into<String>,
        app_key: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::builder()
                .timeout(Duration::from_secs(600))
                .build()
                .unwrap(),
            base_url: base_url.into(),
            app_id: app_id.into(),
            app_key: app_key.into(),
            scheme: SigningScheme::Rsa2,
        }
    }

    /// Create a client with custom reqwest settings.
    pub fn with_client(
        http: Client,
        base_url: impl Into<String>,
        app_id: impl Into<String>,
        app_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            app_id: app_id.into(),
            app_key: app_key.into(),
            scheme: SigningScheme::Rsa2,
        }
    }

    /// Override the signing scheme used for subsequent requests.
    pub fn with_scheme(mut self, scheme: SigningScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Get the gateway base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the application id
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Assemble, validate, and sign an envelope for one operation.
    fn signed_envelope<T: Serialize>(
        &self,
        method: &str,
        version: &str,
        biz_args: &T,
    ) -> Result<RequestEnvelope, SopClientError> {
        let mut envelope =
            assemble_envelope(&self.app_id, method, version, self.scheme, biz_args)?;
        validate_envelope(&envelope)?;

        // scheme tag travels in the envelope itself; resolve it from
        // there so the signed string and the wire field cannot diverge
        let tag = envelope
            .scalar(FIELD_SIGN_TYPE)
            .unwrap_or(self.scheme.as_str())
            .to_string();
        let signature = sign_envelope(&envelope, &tag, &self.app_key)?;
        envelope.insert(FIELD_SIGN, signature);
        Ok(envelope)
    }

    /// Execute a gateway operation and unwrap its JSON payload.
    ///
    /// Sends the signed envelope to the base URL and returns the value
    /// under `{method_with_underscores}_response`.
    pub async fn execute<T: Serialize>(
        &self,
        method: &str,
        biz_args: &T,
    ) -> Result<Value, SopClientError> {
        self.execute_versioned(method, DEFAULT_VERSION, biz_args)
            .await
    }

    /// Execute a gateway operation with an explicit protocol version.
    pub async fn execute_versioned<T: Serialize>(
        &self,
        method: &str,
        version: &str,
        biz_args: &T,
    ) -> Result<Value, SopClientError> {
        let envelope = self.signed_envelope(method, version, biz_args)?;
        tracing::info!(method, version, "dispatching signed gateway request");

        let body: Value = self
            .http
            .post(&self.base_url)
            .json(&envelope)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        unwrap_response(method, body)
    }

    /// Execute a gateway operation that answers with a raw blob body.
    pub async fn execute_raw<T: Serialize>(
        &self,
        method: &str,
        biz_args: &T,
    ) -> Result<Vec<u8>, SopClientError> {
        let envelope = self.signed_envelope(method, DEFAULT_VERSION, biz_args)?;
        tracing::info!(method, "dispatching signed gateway request (blob)");

        let bytes = self
            .http
            .post(&self.base_url)
            .json(&envelope)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        Ok(bytes.to_vec())
    }

    /// Download a map blob.
    pub async fn download_map<T: Serialize>(&self, args: &T) -> Result<Vec<u8>, SopClientError> {
        self.execute_raw(METHOD_MAP_DOWNLOAD, args).await
    }

    /// List the merchant's maps.
    pub async fn map_list<T: Serialize>(&self, args: &T) -> Result<Value, SopClientError> {
        self.execute(METHOD_MAP_LIST, args).await
    }

    /// Look up the nearest map.
    pub async fn map_nearest<T: Serialize>(&self, args: &T) -> Result<Value, SopClientError> {
        self.execute(METHOD_MAP_NEAREST, args).await
    }

    /// Upload a user location fix.
    pub async fn map_location_upload<T: Serialize>(
        &self,
        args: &T,
    ) -> Result<Value, SopClientError> {
        self.execute(METHOD_MAP_LOCATION_UPLOAD, args).await
    }

    /// Exchange a WeChat official-account authorization.
    pub async fn official_auth<T: Serialize>(&self, args: &T) -> Result<Value, SopClientError> {
        self.execute(METHOD_OFFICIAL_AUTH, args).await
    }

    /// Fetch a WeChat temporary ticket.
    pub async fn official_auth_ticket<T: Serialize>(
        &self,
        args: &T,
    ) -> Result<Value, SopClientError> {
        self.execute(METHOD_OFFICIAL_AUTH_TICKET, args).await
    }
}
