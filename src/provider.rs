use crate::errors::FetchFailure;
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;

/// Source of the background image URL.
#[async_trait]
pub trait ResourceProvider: Send + Sync {
    async fn fetch(&self) -> Result<String, FetchFailure>;
}

#[derive(Debug, Deserialize)]
struct ProviderPayload {
    message: String,
}

/// Talks to a `GET -> {"message": "<url>"}` endpoint such as dog.ceo.
#[derive(Debug, Clone)]
pub struct DogApiProvider {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl DogApiProvider {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchFailure> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| FetchFailure::Transport(err.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn map_reqwest_error(&self, err: reqwest::Error) -> FetchFailure {
        if err.is_timeout() {
            return FetchFailure::Timeout(self.timeout);
        }
        FetchFailure::Transport(err.to_string())
    }
}

#[async_trait]
impl ResourceProvider for DogApiProvider {
    async fn fetch(&self) -> Result<String, FetchFailure> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|err| self.map_reqwest_error(err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| self.map_reqwest_error(err))?;

        parse_payload(&body)
    }
}

/// Extracts the image URL from a provider body, accepting only absolute
/// http(s) URLs. The URL is returned as the provider sent it, minus
/// surrounding whitespace.
pub fn parse_payload(body: &[u8]) -> Result<String, FetchFailure> {
    let payload: ProviderPayload =
        serde_json::from_slice(body).map_err(|err| FetchFailure::Decode(err.to_string()))?;

    let message = payload.message.trim();
    check_http_url(message).map_err(FetchFailure::Decode)?;
    Ok(message.to_string())
}

/// Accepts absolute `http`/`https` URLs only.
pub fn check_http_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw).map_err(|err| format!("{raw:?} is not a URL: {err}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported URL scheme {other:?}")),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_with_extra_fields_is_accepted() {
        let body = br#"{"message":"https://images.dog.ceo/breeds/hound/n02.jpg","status":"success"}"#;
        assert_eq!(
            parse_payload(body).unwrap(),
            "https://images.dog.ceo/breeds/hound/n02.jpg"
        );
    }

    #[test]
    fn payload_url_is_passed_through_unchanged() {
        assert_eq!(
            parse_payload(br#"{"message":"https://x"}"#).unwrap(),
            "https://x"
        );
        assert_eq!(
            parse_payload(br#"{"message":"  https://X/a%20b.gif  "}"#).unwrap(),
            "https://X/a%20b.gif"
        );
    }

    #[test]
    fn payload_without_message_is_rejected() {
        let err = parse_payload(br#"{"status":"error"}"#).unwrap_err();
        assert!(matches!(err, FetchFailure::Decode(_)));
    }

    #[test]
    fn relative_or_non_http_message_is_rejected() {
        assert!(matches!(
            parse_payload(br#"{"message":"not a url"}"#),
            Err(FetchFailure::Decode(_))
        ));
        assert!(matches!(
            parse_payload(br#"{"message":"javascript:alert(1)"}"#),
            Err(FetchFailure::Decode(_))
        ));
    }
}
