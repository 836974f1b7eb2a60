use crate::{
    cache::{Cache, CacheKey, MemoryCache, NAMESPACE},
    conclusion::Feedback,
    error::{ApiErrorEnvelope, Error},
    provider::{Custom, Google, Provider, GOOGLE_BASE_URI},
    Config, Options, ValidationConclusion, ValidationRequest, ValidationResponse,
};
use chrono::Duration;
use reqwest::header::ACCEPT;
use serde::Serialize;
use serde_json::Value;
use url::Url;

const API_KEY_HEADER: &str = "X-Goog-Api-Key";

/// Address validation client.
///
/// Methods take `&self`; share one client behind an `Arc` between tasks.
#[derive(Debug)]
pub struct Client<P = Google, C = MemoryCache> {
    /// Service provider.
    pub provider: P,

    /// API key.
    pub api_key: String,

    pub http_client: reqwest::Client,

    /// Response cache.
    pub cache: C,

    /// How long a response stays cached. Zero disables caching.
    pub cache_ttl: Duration,
}

impl Client<Google, MemoryCache> {
    /// Client for the public Google endpoint with an in-memory cache.
    pub fn google(api_key: impl Into<String>) -> Self {
        Client::new(
            Google,
            api_key.into(),
            reqwest::Client::new(),
            MemoryCache::new(),
            Duration::seconds(crate::config::DEFAULT_CACHE_TTL_SECONDS),
        )
    }
}

impl Client<Custom, MemoryCache> {
    /// Client built from [`Config`]. Without a configured endpoint the public Google
    /// endpoint is used.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        if config.api_key.trim().is_empty() {
            return Err(Error::MissingApiKey);
        }
        let base = config
            .endpoint
            .clone()
            .unwrap_or_else(|| GOOGLE_BASE_URI.clone());
        Ok(Client::new(
            Custom::new(base)?,
            config.api_key.clone(),
            reqwest::Client::new(),
            MemoryCache::new(),
            config.cache_ttl(),
        ))
    }
}

impl<P: Provider, C: Cache> Client<P, C> {
    /// Creates a client.
    ///
    /// # Examples
    ///
    /// ```
    /// use address_validation::{provider::Google, Client, NoCache};
    ///
    /// let client = Client::new(
    ///     Google,
    ///     String::from("API_KEY"),
    ///     reqwest::Client::new(),
    ///     NoCache,
    ///     chrono::Duration::zero(),
    /// );
    /// ```
    pub fn new(
        provider: P,
        api_key: String,
        http_client: reqwest::Client,
        cache: C,
        cache_ttl: Duration,
    ) -> Self {
        Client {
            provider,
            api_key,
            http_client,
            cache,
            cache_ttl,
        }
    }

    /// The `validateAddress` URL, with the API key unless the provider wants it in a header.
    pub fn validate_url(&self) -> Url {
        self.keyed(self.provider.validate_uri())
    }

    /// The `provideValidationFeedback` URL.
    pub fn feedback_url(&self) -> Url {
        self.keyed(self.provider.feedback_uri())
    }

    fn keyed(&self, uri: &Url) -> Url {
        let mut url = uri.clone();
        if !self.provider.key_in_header() {
            url.query_pairs_mut().append_pair("key", &self.api_key);
        }
        url
    }

    async fn post_json<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> Result<Value, Error> {
        if self.api_key.is_empty() {
            return Err(Error::MissingApiKey);
        }

        let mut request = self
            .http_client
            .post(url)
            .header(ACCEPT, mime::APPLICATION_JSON.as_ref())
            .json(body);
        if self.provider.key_in_header() {
            request = request.header(API_KEY_HEADER, &self.api_key);
        }

        let resp = request.send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;

        if !status.is_success() {
            return match serde_json::from_slice::<ApiErrorEnvelope>(&bytes) {
                Ok(envelope) => {
                    log::warn!("address validation service error: {}", envelope.error);
                    Err(envelope.error.into())
                }
                Err(_) => {
                    log::warn!("address validation service responded with {}", status);
                    Err(Error::Status(status))
                }
            };
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Object(Default::default()));
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Validates an address, answering from the cache when possible.
    ///
    /// Errors are:
    ///
    /// - Error::MissingApiKey if the client has no API key
    /// - Error::Http if the service could not be reached
    /// - Error::Api if the service rejected the request
    /// - Error::Status if the service failed without an error body
    /// - Error::Json if the response is not a valid validation response
    pub async fn validate(&self, request: &ValidationRequest) -> Result<ValidationResponse, Error> {
        let key = CacheKey::for_request(request);

        if let Some(cached) = self.cache.get(&key) {
            match serde_json::from_value(cached) {
                Ok(response) => return Ok(response),
                Err(err) => {
                    log::warn!("dropping undecodable cache entry {}: {}", key, err);
                    self.cache.invalidate(&key);
                }
            }
        }

        log::debug!("validating address {}", key);
        let json = self.post_json(self.validate_url(), request).await?;
        let response: ValidationResponse = serde_json::from_value(json.clone())?;

        if self.cache_ttl > Duration::zero() {
            self.cache.set(&key, json, self.cache_ttl);
        }

        Ok(response)
    }

    /// Builds a request from address text and options, then validates it.
    pub async fn validate_address(
        &self,
        address: &str,
        options: &Options,
    ) -> Result<ValidationResponse, Error> {
        let request = ValidationRequest::new(address, options)?;
        self.validate(&request).await
    }

    /// Reports which version of the address was finally used.
    pub async fn provide_feedback(
        &self,
        response_id: &str,
        conclusion: ValidationConclusion,
    ) -> Result<(), Error> {
        let body = Feedback {
            conclusion,
            response_id,
        };
        self.post_json(self.feedback_url(), &body).await?;
        Ok(())
    }

    /// Drops the cached response of one request.
    pub fn invalidate(&self, request: &ValidationRequest) {
        self.cache.invalidate(&CacheKey::for_request(request));
    }

    /// Drops every cached validation response.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_namespace(NAMESPACE);
    }
}

#[cfg(test)]
mod tests {
    use super::Client;
    use crate::{
        cache::{Cache, CacheKey, MemoryCache, NoCache},
        error::Error,
        provider::{Custom, Google},
        response::tests::GOOGLEPLEX,
        Config, Options, ValidationRequest,
    };
    use chrono::Duration;
    use url::Url;

    fn offline() -> Client<Custom, MemoryCache> {
        Client::new(
            Custom::new(Url::parse("http://127.0.0.1:9/").unwrap()).unwrap(),
            String::from("foo"),
            reqwest::Client::new(),
            MemoryCache::new(),
            Duration::hours(1),
        )
    }

    fn request() -> ValidationRequest {
        ValidationRequest::new(
            "1600 Amphitheatre Pkwy\nMountain View, CA 94043",
            &Options {
                region_code: Some("US".into()),
                enable_usps_cass: true,
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn validate_url() {
        let client = Client::google("foo");
        assert_eq!(
            "https://addressvalidation.googleapis.com/v1:validateAddress?key=foo",
            client.validate_url().as_str()
        );
        assert_eq!(
            "https://addressvalidation.googleapis.com/v1:provideValidationFeedback?key=foo",
            client.feedback_url().as_str()
        );
    }

    #[test]
    fn validate_url_with_key_in_header() {
        let client = Client::new(
            Custom::new(Url::parse("http://example.com/").unwrap())
                .unwrap()
                .with_key_in_header(),
            String::from("foo"),
            reqwest::Client::new(),
            NoCache,
            Duration::zero(),
        );
        assert_eq!(
            "http://example.com/v1:validateAddress",
            client.validate_url().as_str()
        );
    }

    #[test]
    fn from_config() {
        let client = Client::from_config(&Config::new("foo")).unwrap();
        assert_eq!(
            "https://addressvalidation.googleapis.com/v1:validateAddress?key=foo",
            client.validate_url().as_str()
        );
        assert_eq!(Duration::days(1), client.cache_ttl);

        let config = Config {
            endpoint: Some(Url::parse("http://localhost:8080/").unwrap()),
            cache_ttl_seconds: 0,
            ..Config::new("bar")
        };
        let client = Client::from_config(&config).unwrap();
        assert_eq!(
            "http://localhost:8080/v1:validateAddress?key=bar",
            client.validate_url().as_str()
        );
        assert_eq!(Duration::zero(), client.cache_ttl);

        assert!(matches!(
            Client::from_config(&Config::default()),
            Err(Error::MissingApiKey)
        ));
    }

    #[tokio::test]
    async fn validate_answers_from_cache() {
        let client = offline();
        let request = request();
        client.cache.set(
            &CacheKey::for_request(&request),
            serde_json::from_str(GOOGLEPLEX).unwrap(),
            Duration::hours(1),
        );

        let response = client.validate(&request).await.unwrap();
        assert_eq!(100, response.score());
        assert!(response.is_deliverable());
        assert_eq!(
            Some("de5b5e7e-6d4e-4a34-a95b-fa9f8c8bcd9b"),
            response.response_id()
        );

        let again = client
            .validate_address(
                " 1600 amphitheatre pkwy \n MOUNTAIN VIEW, CA 94043",
                &Options {
                    region_code: Some("us".into()),
                    enable_usps_cass: true,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(response, again);
    }

    #[tokio::test]
    async fn invalidated_entry_goes_to_the_network() {
        let client = offline();
        let request = request();
        client.cache.set(
            &CacheKey::for_request(&request),
            serde_json::from_str(GOOGLEPLEX).unwrap(),
            Duration::hours(1),
        );

        client.invalidate_all();
        assert!(client.cache.is_empty());
        assert!(client.validate(&request).await.is_err());
    }

    #[tokio::test]
    async fn undecodable_cache_entry_is_dropped() {
        let client = offline();
        let request = request();
        let key = CacheKey::for_request(&request);
        client
            .cache
            .set(&key, serde_json::json!({ "result": "broken" }), Duration::hours(1));

        assert!(client.validate(&request).await.is_err());
        assert!(client.cache.get(&key).is_none());
    }

    #[tokio::test]
    async fn missing_api_key_fails_before_sending() {
        let client = Client::new(
            Google,
            String::new(),
            reqwest::Client::new(),
            NoCache,
            Duration::zero(),
        );
        assert!(matches!(
            client.validate(&request()).await,
            Err(Error::MissingApiKey)
        ));
        assert!(matches!(
            client
                .provide_feedback("id", crate::ValidationConclusion::Unused)
                .await,
            Err(Error::MissingApiKey)
        ));
    }

    #[tokio::test]
    async fn invalid_address_fails_before_sending() {
        let client = offline();
        assert!(matches!(
            client.validate_address("   ", &Options::default()).await,
            Err(Error::EmptyAddress)
        ));
    }
}
