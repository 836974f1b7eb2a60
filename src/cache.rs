/*!
Response cache port.

The client stores the raw JSON body of every successful validation under a [`CacheKey`]
derived from the normalized request. Concurrent validations of the same address may both
miss and both store; the last write wins and either value is valid.
*/
use crate::ValidationRequest;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fmt;

/// Namespace shared by every validation cache entry.
pub const NAMESPACE: &str = "address_validation";

/// Deterministic identifier of a cached validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    namespace: String,
    digest: String,
}

impl CacheKey {
    /// Derives the key from every request field that shapes the service's answer: the
    /// address lines, region, locality, administrative area, postal code, language, USPS
    /// flag and English-Latin option. Session token and previous response id are left out.
    /// Case and whitespace differences in the text fields do not change the key.
    pub fn for_request(request: &ValidationRequest) -> Self {
        let address = &request.address;
        let lines = address
            .address_lines
            .iter()
            .map(|line| normalize(line))
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        let region = address
            .region_code
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_ascii_uppercase();
        let english_latin = request
            .language_options
            .map_or(false, |options| options.return_english_latin_address);

        let mut h = Sha256::new();
        for field in [
            lines,
            region,
            normalize_opt(&address.locality),
            normalize_opt(&address.administrative_area),
            normalize_opt(&address.postal_code),
            normalize_opt(&address.language_code),
        ] {
            h.update(field.as_bytes());
            h.update(b"\0");
        }
        h.update(if request.enable_usps_cass { b"1" } else { b"0" });
        h.update(if english_latin { b"1" } else { b"0" });

        CacheKey {
            namespace: NAMESPACE.to_string(),
            digest: format!("{:x}", h.finalize()),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.digest)
    }
}

fn normalize(line: &str) -> String {
    line.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn normalize_opt(field: &Option<String>) -> String {
    field.as_deref().map(normalize).unwrap_or_default()
}

/// Storage for raw validation responses.
pub trait Cache {
    /// A live entry, if any.
    fn get(&self, key: &CacheKey) -> Option<Value>;

    /// Stores an entry for `ttl`. Overwrites an existing entry.
    fn set(&self, key: &CacheKey, value: Value, ttl: Duration);

    /// Removes one entry.
    fn invalidate(&self, key: &CacheKey);

    /// Removes every entry of the namespace.
    fn invalidate_namespace(&self, namespace: &str);
}

/// Cache that never stores anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl Cache for NoCache {
    fn get(&self, _key: &CacheKey) -> Option<Value> {
        None
    }
    fn set(&self, _key: &CacheKey, _value: Value, _ttl: Duration) {}
    fn invalidate(&self, _key: &CacheKey) {}
    fn invalidate_namespace(&self, _namespace: &str) {}
}

#[derive(Debug, Clone)]
struct Entry {
    value: Value,
    expires: DateTime<Utc>,
}

impl Entry {
    fn expired(&self) -> bool {
        self.expires <= Utc::now()
    }
}

/// In-process cache with per-entry expiration.
#[derive(Debug, Default)]
pub struct MemoryCache {
    store: DashMap<CacheKey, Entry>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Drops expired entries and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let before = self.store.len();
        self.store.retain(|_, entry| !entry.expired());
        before.saturating_sub(self.store.len())
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &CacheKey) -> Option<Value> {
        let expired = match self.store.get(key) {
            Some(entry) if !entry.expired() => {
                log::debug!("cache hit: {}", key);
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            self.store.remove(key);
        }
        log::debug!("cache miss: {}", key);
        None
    }

    fn set(&self, key: &CacheKey, value: Value, ttl: Duration) {
        if ttl <= Duration::zero() {
            return;
        }
        let expires = match Utc::now().checked_add_signed(ttl) {
            Some(expires) => expires,
            None => {
                log::warn!("cache ttl {} out of range, not storing {}", ttl, key);
                return;
            }
        };
        self.store.insert(key.clone(), Entry { value, expires });
        log::debug!("cache store: {} until {}", key, expires);
    }

    fn invalidate(&self, key: &CacheKey) {
        self.store.remove(key);
        log::debug!("cache invalidate: {}", key);
    }

    fn invalidate_namespace(&self, namespace: &str) {
        self.store.retain(|key, _| key.namespace() != namespace);
        log::debug!("cache invalidate namespace: {}", namespace);
    }
}

impl<C: Cache + ?Sized> Cache for std::sync::Arc<C> {
    fn get(&self, key: &CacheKey) -> Option<Value> {
        (**self).get(key)
    }
    fn set(&self, key: &CacheKey, value: Value, ttl: Duration) {
        (**self).set(key, value, ttl)
    }
    fn invalidate(&self, key: &CacheKey) {
        (**self).invalidate(key)
    }
    fn invalidate_namespace(&self, namespace: &str) {
        (**self).invalidate_namespace(namespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Options;
    use serde_json::json;

    fn request(address: &str, region: Option<&str>, usps: bool) -> ValidationRequest {
        ValidationRequest::new(
            address,
            &Options {
                region_code: region.map(String::from),
                enable_usps_cass: usps,
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn key_ignores_case_and_whitespace() {
        let a = request("1600 Amphitheatre  Pkwy\nMountain View", Some("US"), false);
        let b = request(" 1600 amphitheatre pkwy \n MOUNTAIN VIEW ", Some("us"), false);
        let (a, b) = (CacheKey::for_request(&a), CacheKey::for_request(&b));
        assert_eq!(a, b);
        assert_eq!(NAMESPACE, a.namespace());
        assert_eq!(64, a.digest().len());
        assert_eq!(format!("address_validation:{}", a.digest()), a.to_string());
    }

    #[test]
    fn key_depends_on_region_and_usps_flag() {
        let plain = CacheKey::for_request(&request("1 Main St", Some("US"), false));
        let usps = CacheKey::for_request(&request("1 Main St", Some("US"), true));
        let other = CacheKey::for_request(&request("1 Main St", Some("CA"), false));
        let none = CacheKey::for_request(&request("1 Main St", None, false));
        assert_ne!(plain, usps);
        assert_ne!(plain, other);
        assert_ne!(plain, none);
    }

    #[test]
    fn key_depends_on_structured_fields() {
        let key = |options: Options| {
            CacheKey::for_request(&ValidationRequest::new("1 Main St", &options).unwrap())
        };
        let base = Options {
            region_code: Some("US".into()),
            locality: Some("Springfield".into()),
            administrative_area: Some("IL".into()),
            ..Default::default()
        };
        let plain = key(base.clone());

        assert_eq!(
            plain,
            key(Options {
                locality: Some(" SPRINGFIELD ".into()),
                ..base.clone()
            })
        );
        assert_ne!(
            plain,
            key(Options {
                locality: Some("Portland".into()),
                administrative_area: Some("OR".into()),
                ..base.clone()
            })
        );
        assert_ne!(
            plain,
            key(Options {
                administrative_area: Some("MO".into()),
                ..base.clone()
            })
        );
        assert_ne!(
            plain,
            key(Options {
                postal_code: Some("97201".into()),
                ..base.clone()
            })
        );
        assert_ne!(
            plain,
            key(Options {
                language_code: Some("es".into()),
                ..base.clone()
            })
        );
        assert_ne!(
            plain,
            key(Options {
                return_english_latin_address: true,
                ..base
            })
        );
    }

    #[test]
    fn key_ignores_session_options() {
        let a = request("1 Main St", Some("US"), false);
        let b = ValidationRequest::new(
            "1 Main St",
            &Options {
                region_code: Some("US".into()),
                previous_response_id: Some("previous".into()),
                session_token: Some("token".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(CacheKey::for_request(&a), CacheKey::for_request(&b));
    }

    #[test]
    fn memory_cache_roundtrip() {
        let cache = MemoryCache::new();
        let key = CacheKey::for_request(&request("1 Main St", None, false));
        assert!(cache.get(&key).is_none());

        cache.set(&key, json!({ "responseId": "a" }), Duration::minutes(5));
        assert_eq!(Some(json!({ "responseId": "a" })), cache.get(&key));

        cache.set(&key, json!({ "responseId": "b" }), Duration::minutes(5));
        assert_eq!(Some(json!({ "responseId": "b" })), cache.get(&key));
        assert_eq!(1, cache.len());

        cache.invalidate(&key);
        assert!(cache.get(&key).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn memory_cache_expires() {
        let cache = MemoryCache::new();
        let key = CacheKey::for_request(&request("1 Main St", None, false));

        cache.set(&key, json!({}), Duration::zero());
        assert!(cache.is_empty());

        cache.store.insert(
            key.clone(),
            Entry {
                value: json!({}),
                expires: Utc::now() - Duration::seconds(1),
            },
        );
        assert_eq!(1, cache.purge_expired());

        cache.store.insert(
            key.clone(),
            Entry {
                value: json!({}),
                expires: Utc::now() - Duration::seconds(1),
            },
        );
        assert!(cache.get(&key).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn memory_cache_skips_out_of_range_ttl() {
        let cache = MemoryCache::new();
        let key = CacheKey::for_request(&request("1 Main St", None, false));

        cache.set(&key, json!({}), Duration::max_value());
        assert!(cache.is_empty());

        let config = crate::Config {
            cache_ttl_seconds: 9_000_000_000_000,
            ..crate::Config::new("secret")
        };
        cache.set(&key, json!({}), config.cache_ttl());
        assert_eq!(Some(json!({})), cache.get(&key));
    }

    #[test]
    fn invalidate_namespace_keeps_other_namespaces() {
        let cache = MemoryCache::new();
        let key = CacheKey::for_request(&request("1 Main St", None, false));
        let foreign = CacheKey {
            namespace: "geocoding".into(),
            digest: key.digest().to_string(),
        };
        cache.set(&key, json!({}), Duration::hours(1));
        cache.set(&foreign, json!({}), Duration::hours(1));

        cache.invalidate_namespace(NAMESPACE);
        assert!(cache.get(&key).is_none());
        assert!(cache.get(&foreign).is_some());
    }

    #[test]
    fn no_cache_stores_nothing() {
        let cache = NoCache;
        let key = CacheKey::for_request(&request("1 Main St", None, false));
        cache.set(&key, json!({}), Duration::hours(1));
        assert!(cache.get(&key).is_none());
    }
}
