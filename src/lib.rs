/*!
# Address validation client library using async / await

## Legal

Dual-licensed under `MIT` or the [UNLICENSE](http://unlicense.org/).

## Features

Wraps the [Google Address Validation API](https://developers.google.com/maps/documentation/address-validation):
builds a request from an address and a few options, calls the service, caches the raw
response and exposes typed accessors over it.

On top of the response sits a scoring engine: a 0–100 quality [score](ValidationResponse::score),
a four-tier [`Rating`], a [`Validity`] diagnostic and a set of predicates such as
[deliverable](ValidationResponse::is_deliverable), [shippable](ValidationResponse::is_shippable)
or [vacant](ValidationResponse::is_vacant). Scoring never fails: an invalid address is a low
score, not an error.

Using [reqwest](https://crates.io/crates/reqwest) for the HTTP client and
[dashmap](https://crates.io/crates/dashmap) for the in-memory response cache. The library logs
through the [log](https://crates.io/crates/log) facade and never installs a logger.

## Usage

Add dependency to Cargo.toml:

```toml
[dependencies]
address-validation = "0.1"
```

```rust,no_run
use address_validation::{Client, Config, Rating, ValidationConclusion};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::from_env()?;
    let client = Client::from_config(&config)?;

    let options = config.options(Some("US"));
    let response = client
        .validate_address("1600 Amphitheatre Pkwy\nMountain View, CA", &options)
        .await?;

    println!("{:?}", response.formatted_address());
    println!("score: {} ({})", response.score(), response.rating());

    let validity = response.check_validity();
    for issue in &validity.issues {
        println!("issue: {}", issue);
    }

    if let Some(id) = response.response_id() {
        let conclusion = if response.rating() >= Rating::Good {
            ValidationConclusion::ValidatedVersionUsed
        } else {
            ValidationConclusion::UserVersionUsed
        };
        client.provide_feedback(id, conclusion).await?;
    }

    Ok(())
}
```

### Re-validating a corrected address

Pass the first `responseId` with the corrected input so the service links both calls:

```rust,no_run
# use address_validation::{Client, Options};
# async fn revalidate(client: Client, first_response_id: String) -> Result<(), address_validation::error::Error> {
let options = Options {
    region_code: Some("US".into()),
    previous_response_id: Some(first_response_id),
    ..Default::default()
};
let response = client
    .validate_address("1600 Amphitheatre Parkway\nMountain View, CA 94043", &options)
    .await?;
# Ok(())
# }
```
*/
#[macro_use]
extern crate lazy_static;

pub mod address;
pub mod cache;
mod classification;
mod client;
mod conclusion;
mod config;
mod deserializers;
pub mod error;
pub mod geocode;
mod metadata;
mod options;
pub mod provider;
mod request;
mod response;
mod score;
pub mod usps;
mod verdict;

pub use address::{Address, AddressComponent, ComponentName, ConfirmationLevel, PostalAddress};
pub use cache::{Cache, CacheKey, MemoryCache, NoCache};
pub use classification::{
    Confidence, Validity, HIGH_CONFIDENCE_SCORE, ISSUE_INCOMPLETE, ISSUE_INFERRED, ISSUE_MISSING,
    ISSUE_NO_GEOCODE, ISSUE_REPLACED, ISSUE_UNCONFIRMED, MINIMUM_VALID_SCORE,
};
pub use client::Client;
pub use conclusion::ValidationConclusion;
pub use config::Config;
pub use error::{ApiError, ApiErrorStatus};
pub use geocode::{Geocode, LatLng, PlusCode, Viewport};
pub use metadata::Metadata;
pub use options::Options;
pub use provider::Provider;
pub use request::{LanguageOptions, RequestAddress, ValidationRequest};
pub use response::{ValidationResponse, ValidationResult};
pub use score::{Rating, PRECISE_FEATURE_SIZE_METERS};
pub use usps::{UspsAddress, UspsData};
pub use verdict::{Granularity, Verdict};

pub type ConfiguredClient = Client<provider::Custom, MemoryCache>;
