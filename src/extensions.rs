use axum::extract::{FromRequest, Request};
use axum::Json;
use log::{error, info};
use serde_json::Value;
use tap::TapFallible;

use crate::config::SchemaConfig;
use crate::error::{Error, BODY_FIELD};
use crate::schema::{self, Schema};

/// JSON body that has already gone through its [`Schema`].
///
/// Reads [`SchemaConfig`] from the request extensions (an `Extension` layer)
/// and falls back to the default config when none is installed.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: Schema + Send,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        info!("Extracting validated body for {}", req.uri().path());
        let config = req
            .extensions()
            .get::<SchemaConfig>()
            .cloned()
            .unwrap_or_default();

        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .tap_err(|e| error!("Failed to extract JSON body: {}", e))
            .map_err(|e| Error::field(BODY_FIELD, e.body_text()))?;

        schema::parse_value(value, &config).map(ValidatedJson)
    }
}
