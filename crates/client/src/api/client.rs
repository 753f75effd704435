//! HTTP implementation of the storefront API.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Response;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use url::Url;

use storefront_core::{Credentials, ServerCart, UserId};

use super::{ApiError, AuthApi, CartApi, LoginResponse, MergeCartRequest};

/// Client for the storefront REST API.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl ApiClient {
    /// Create a client rooted at `base_url` (e.g. `https://shop.example/api`).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if the URL cannot carry path segments
    /// (for example `mailto:` URLs).
    pub fn new(base_url: Url) -> Result<Self, ApiError> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing `reqwest` client.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if the URL cannot carry path segments.
    pub fn with_client(client: reqwest::Client, base_url: Url) -> Result<Self, ApiError> {
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }

        Ok(Self {
            inner: Arc::new(ApiClientInner { client, base_url }),
        })
    }

    /// The API root every path is resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Build an endpoint URL by appending path segments to the base.
    ///
    /// Segments are percent-encoded, so IDs cannot escape their position.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Turn a non-success response into `ApiError::Status`.
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|body| body.message.or(body.error))
        .filter(|message| !message.is_empty());

    tracing::debug!(%status, body = %text, "API call rejected");
    Err(ApiError::Status { status, message })
}

/// Check the status and decode a JSON body.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let response = check_status(response).await?;
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait]
impl AuthApi for ApiClient {
    #[instrument(skip_all, fields(email = %credentials.email))]
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let url = self.endpoint(&["auth", "login"])?;
        let body = LoginBody {
            email: &credentials.email,
            password: credentials.password.expose_secret(),
        };

        let response = self.inner.client.post(url).json(&body).send().await?;
        read_json(response).await
    }
}

#[async_trait]
impl CartApi for ApiClient {
    #[instrument(skip_all, fields(user_id = %request.user_id, lines = request.local_cart_items.len()))]
    async fn merge_cart(
        &self,
        token: &SecretString,
        request: &MergeCartRequest,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&["user", "cart", "merge"])?;

        let response = self
            .inner
            .client
            .post(url)
            .bearer_auth(token.expose_secret())
            .json(request)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn get_cart(
        &self,
        token: &SecretString,
        user_id: &UserId,
    ) -> Result<ServerCart, ApiError> {
        let url = self.endpoint(&["user", "cart", user_id.as_str()])?;

        let response = self
            .inner
            .client
            .get(url)
            .bearer_auth(token.expose_secret())
            .send()
            .await?;

        read_json(response).await
    }
}
