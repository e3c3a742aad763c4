//! Request body extraction
//!
//! POST bodies arrive either as HTML form posts or as JSON. Both are
//! decoded into the same request type.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::{de::DeserializeOwned, Deserialize, Deserializer};

/// Body decoded from `application/json` or `application/x-www-form-urlencoded`.
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.starts_with("application/json"))
            .unwrap_or(false);

        if is_json {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(Self(value))
        } else {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(Self(value))
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

/// Accepts a string or a JSON number and keeps it as text for later coercion.
/// `null` becomes the empty string.
pub fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<TextOrNumber>::deserialize(deserializer)? {
        Some(TextOrNumber::Text(text)) => text,
        Some(TextOrNumber::Number(number)) => number.to_string(),
        None => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default, deserialize_with = "text_or_number")]
        duration: String,
    }

    #[test]
    fn test_text_or_number_from_json() {
        let body: Body = serde_json::from_str(r#"{"duration": 30}"#).unwrap();
        assert_eq!(body.duration, "30");

        let body: Body = serde_json::from_str(r#"{"duration": "45"}"#).unwrap();
        assert_eq!(body.duration, "45");

        let body: Body = serde_json::from_str(r#"{"duration": null}"#).unwrap();
        assert_eq!(body.duration, "");

        let body: Body = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(body.duration, "");
    }
}
