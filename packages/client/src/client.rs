use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use parley_config::ClientConfig;
use parley_core::{
    ApiError, ApiResult, AuthEnvelope, AuthReply, Credentials, ProfileUpdate, SessionApi,
    UserPayload,
};

use crate::routes::{GET_USER_INFO, LOGIN_ROUTE, SIGNUP_ROUTE, UPDATE_PROFILE_ROUTE};

/// Body of the "who am I" endpoint
#[derive(Debug, Default, Deserialize)]
struct IdentityEnvelope {
    #[serde(default)]
    user: Option<UserPayload>,
}

/// Error body the API sends alongside non-success statuses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// HTTP API client for the chat backend.
///
/// One origin, one cookie jar: the session cookie set by login or signup is
/// sent back on every later request.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    origin: Url,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let mut builder = Client::builder().cookie_store(true);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|e| ApiError::Configuration(e.to_string()))?;

        Ok(Self {
            http,
            origin: config.api_origin.clone(),
        })
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.origin
            .join(path)
            .map_err(|e| ApiError::Configuration(format!("Invalid endpoint {}: {}", path, e)))
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        request
            .send()
            .await
            .map_err(|e| ApiError::network(e.to_string()))
    }

    /// Send a login/signup/profile request and read the `{ message, user }` reply
    async fn send_auth(&self, request: RequestBuilder) -> ApiResult<AuthReply> {
        let response = self.send(request).await?;
        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "Auth request completed");

        if !status.is_success() {
            return Err(error_from_response(response).await);
        }

        let envelope = parse_body::<AuthEnvelope>(response).await?;
        Ok(AuthReply::from_envelope(status.as_u16(), envelope))
    }
}

#[async_trait]
impl SessionApi for ApiClient {
    async fn fetch_identity(&self) -> ApiResult<Option<UserPayload>> {
        let url = self.endpoint(GET_USER_INFO)?;
        let response = self.send(self.http.get(url)).await?;
        let status = response.status();
        debug!(status = status.as_u16(), "Fetched current identity");

        if status == StatusCode::UNAUTHORIZED {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(error_from_response(response).await);
        }

        Ok(parse_body::<IdentityEnvelope>(response).await?.user)
    }

    async fn login(&self, credentials: &Credentials) -> ApiResult<AuthReply> {
        let url = self.endpoint(LOGIN_ROUTE)?;
        self.send_auth(self.http.post(url).json(credentials)).await
    }

    async fn signup(&self, credentials: &Credentials) -> ApiResult<AuthReply> {
        let url = self.endpoint(SIGNUP_ROUTE)?;
        self.send_auth(self.http.post(url).json(credentials)).await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<AuthReply> {
        let url = self.endpoint(UPDATE_PROFILE_ROUTE)?;
        self.send_auth(self.http.patch(url).json(update)).await
    }
}

/// Decode a JSON body; an empty body decodes as the type's default
async fn parse_body<T>(response: Response) -> ApiResult<T>
where
    T: for<'de> Deserialize<'de> + Default,
{
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ApiError::network(e.to_string()))?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(&bytes).map_err(|e| ApiError::invalid(e.to_string()))
}

async fn error_from_response(response: Response) -> ApiError {
    let status = response.status().as_u16();
    let message = match response.bytes().await {
        Ok(bytes) => serde_json::from_slice::<ErrorBody>(&bytes)
            .ok()
            .and_then(|body| body.message)
            .or_else(|| serde_json::from_slice::<String>(&bytes).ok())
            .or_else(|| {
                let text = String::from_utf8_lossy(&bytes).trim().to_string();
                (!text.is_empty() && !text.starts_with('{')).then_some(text)
            }),
        Err(_) => None,
    };
    ApiError::status(status, message)
}
