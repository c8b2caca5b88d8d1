//! # Query Parameter Parser
//!
//! Validates the `/content` query string and translates it into a
//! [`LookupRequest`] for the gateway.
//!
//! Checks run in a fixed order and the first failure wins:
//! 1. `isAnnotatedBy` present
//! 2. `isAnnotatedBy` given once
//! 3. `isAnnotatedBy` non-empty
//! 4. `limit` numeric when present
//!
//! Dates never fail a request. An unparseable `fromDate`/`toDate` is logged
//! and treated as an open bound.

use chrono::NaiveDate;

use super::errors::{ContentError, ContentResult};
use super::mapper::strip_thing_prefix;

/// Query parameter naming the annotating concept
pub const ANNOTATED_BY_PARAM: &str = "isAnnotatedBy";

/// Query parameter bounding the number of items
pub const LIMIT_PARAM: &str = "limit";

/// Lower publish date bound, `YYYY-MM-DD`
pub const FROM_DATE_PARAM: &str = "fromDate";

/// Upper publish date bound, `YYYY-MM-DD`
pub const TO_DATE_PARAM: &str = "toDate";

/// Limit used when the request does not give one
pub const DEFAULT_LIMIT: i64 = 50;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A validated content lookup.
///
/// Epoch fields are Unix seconds at UTC midnight; `0` means unbounded.
/// `limit` is passed to the store as given, including zero and negative
/// values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub concept_id: String,
    pub limit: i64,
    pub from_date_epoch: i64,
    pub to_date_epoch: i64,
}

impl LookupRequest {
    /// Unbounded lookup with the default limit
    pub fn new(concept_id: impl Into<String>) -> Self {
        Self {
            concept_id: concept_id.into(),
            limit: DEFAULT_LIMIT,
            from_date_epoch: 0,
            to_date_epoch: 0,
        }
    }

    /// Parse raw query pairs, in the order they appeared in the query string
    pub fn parse(params: &[(String, String)]) -> ContentResult<Self> {
        let concepts: Vec<&str> = values(params, ANNOTATED_BY_PARAM).collect();

        let concept_uri = match concepts.as_slice() {
            [] => return Err(ContentError::MissingConcept),
            [single] => *single,
            _ => return Err(ContentError::MultipleConcepts),
        };

        if concept_uri.is_empty() {
            return Err(ContentError::MissingConcept);
        }

        let mut request = Self::new(strip_thing_prefix(concept_uri));

        match first(params, LIMIT_PARAM) {
            "" => {
                tracing::debug!(limit = DEFAULT_LIMIT, "No limit provided, using default");
            }
            raw => request.limit = parse_limit(raw)?,
        }

        request.from_date_epoch = date_bound(params, FROM_DATE_PARAM);
        request.to_date_epoch = date_bound(params, TO_DATE_PARAM);

        Ok(request)
    }
}

/// All values given for `key`
fn values<'a>(params: &'a [(String, String)], key: &'a str) -> impl Iterator<Item = &'a str> {
    params
        .iter()
        .filter(move |(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// First value given for `key`, or `""` when absent
fn first<'a>(params: &'a [(String, String)], key: &'a str) -> &'a str {
    values(params, key).next().unwrap_or("")
}

/// Parse limit parameter
fn parse_limit(value: &str) -> ContentResult<i64> {
    value
        .parse()
        .map_err(|_| ContentError::InvalidLimit(value.to_string()))
}

fn date_bound(params: &[(String, String)], key: &str) -> i64 {
    match first(params, key) {
        "" => {
            tracing::debug!(param = key, "No date supplied");
            0
        }
        raw => date_to_epoch(raw),
    }
}

/// Exactly `dddd-dd-dd`. chrono alone also accepts signs and short
/// fields.
fn has_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Convert a `YYYY-MM-DD` date to Unix seconds at UTC midnight.
///
/// Unparseable input yields `0`.
pub fn date_to_epoch(value: &str) -> i64 {
    if !has_date_shape(value) {
        tracing::warn!(date = value, "Date can't be parsed, expected YYYY-MM-DD");
        return 0;
    }

    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(date) => date.and_hms_opt(0, 0, 0).map_or(0, |dt| dt.and_utc().timestamp()),
        Err(err) => {
            tracing::warn!(date = value, error = %err, "Date can't be parsed");
            0
        }
    }
}
