use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use futures::StreamExt;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use koinonia_config::PushSettings;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::RwLock;
use tracing::debug;

use super::{DeliveryFailure, DeliveryOutcome, PushError, PushMessage, PushTransport};

const FCM_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// FCM HTTP v1 transport. Authenticates with a service-account assertion
/// (RS256, exchanged for a cached OAuth bearer) and sends one
/// `messages:send` request per token, bounded by `send_concurrency`.
pub struct FcmTransport {
    client: reqwest::Client,
    settings: PushSettings,
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    cached: RwLock<Option<CachedBearer>>,
}

#[derive(Debug, Clone, Deserialize)]
struct ServiceAccountKey {
    client_email: String,
    private_key: String,
    token_uri: String,
}

struct CachedBearer {
    bearer: String,
    expires_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Deserialize)]
struct FcmErrorBody {
    error: FcmErrorDetail,
}

#[derive(Deserialize)]
struct FcmErrorDetail {
    #[serde(default)]
    status: String,
}

impl FcmTransport {
    pub fn new(settings: PushSettings) -> Result<Self, PushError> {
        let raw = std::fs::read_to_string(&settings.credentials_path)?;
        let key: ServiceAccountKey = serde_json::from_str(&raw)?;
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;

        Ok(Self {
            client: reqwest::Client::new(),
            settings,
            key,
            encoding_key,
            cached: RwLock::new(None),
        })
    }

    fn send_url(&self) -> String {
        let base = match &self.settings.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => "https://fcm.googleapis.com".to_string(),
        };
        format!(
            "{}/v1/projects/{}/messages:send",
            base, self.settings.project_id
        )
    }

    fn mint_assertion(&self) -> Result<String, PushError> {
        let now = Utc::now();
        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: FCM_SCOPE,
            aud: &self.key.token_uri,
            iat: now.timestamp(),
            exp: (now + Duration::minutes(60)).timestamp(),
        };
        Ok(encode(
            &Header::new(Algorithm::RS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    /// Returns a bearer token, refreshing it when within 60s of expiry.
    async fn bearer(&self) -> Result<String, PushError> {
        if let Some(cached) = self.cached.read().await.as_ref() {
            if cached.expires_at > Utc::now() + Duration::seconds(60) {
                return Ok(cached.bearer.clone());
            }
        }

        let assertion = self.mint_assertion()?;
        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", &assertion)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PushError::Auth(response.status().as_u16()));
        }

        let token: TokenResponse = response.json().await?;
        let expires_at = Utc::now() + Duration::seconds(token.expires_in);
        debug!(%expires_at, "Refreshed FCM bearer token");

        *self.cached.write().await = Some(CachedBearer {
            bearer: token.access_token.clone(),
            expires_at,
        });
        Ok(token.access_token)
    }

    async fn send_one(&self, bearer: &str, token: &str, message: &PushMessage) -> DeliveryOutcome {
        let payload = json!({
            "message": {
                "token": token,
                "notification": {
                    "title": message.title,
                    "body": message.body,
                },
                "webpush": {
                    "notification": { "icon": message.icon },
                    "fcm_options": { "link": message.link },
                },
            }
        });

        let result = self
            .client
            .post(self.send_url())
            .bearer_auth(bearer)
            .json(&payload)
            .send()
            .await;

        let error = match result {
            Ok(response) if response.status().is_success() => None,
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                Some(classify_rejection(status, &body))
            }
            // Connection-level trouble for a single token is transient.
            Err(_) => Some(DeliveryFailure::Other),
        };

        DeliveryOutcome {
            token: token.to_string(),
            error,
        }
    }
}

/// Maps an FCM rejection to a delivery failure. `UNREGISTERED` comes back
/// as 404/NOT_FOUND, a malformed token as 400/INVALID_ARGUMENT.
fn classify_rejection(status: StatusCode, body: &str) -> DeliveryFailure {
    let fcm_status = serde_json::from_str::<FcmErrorBody>(body)
        .map(|b| b.error.status)
        .unwrap_or_default();

    match (status.as_u16(), fcm_status.as_str()) {
        (404, _) | (_, "NOT_FOUND") | (_, "UNREGISTERED") => DeliveryFailure::NotRegistered,
        (400, _) | (_, "INVALID_ARGUMENT") => DeliveryFailure::InvalidToken,
        _ => DeliveryFailure::Other,
    }
}

#[async_trait]
impl PushTransport for FcmTransport {
    async fn send_to_tokens(
        &self,
        tokens: &[String],
        message: &PushMessage,
    ) -> Result<Vec<DeliveryOutcome>, PushError> {
        let bearer = self.bearer().await?;

        // `buffered` keeps outcomes aligned with the input token order.
        let outcomes = futures::stream::iter(tokens)
            .map(|token| self.send_one(&bearer, token, message))
            .buffered(self.settings.send_concurrency.max(1))
            .collect::<Vec<_>>()
            .await;

        Ok(outcomes)
    }
}
