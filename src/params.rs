//! Query-string decoding for create and lookup endpoints.
//!
//! Create routes take every field as an individual query parameter rather than a
//! JSON body. Each draft type decodes itself through [`FromParams`], so coercion
//! failures surface as `ApiError::InvalidParameter` instead of a framework rejection.

use std::{collections::HashMap, str::FromStr};

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use chrono::NaiveDateTime;

use crate::error::ApiError;

/// QueryParams
///
/// Percent-decoded `name -> value` view of the request's query string.
#[derive(Debug, Clone, Default)]
pub struct QueryParams(HashMap<String, String>);

impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(map) = Query::<HashMap<String, String>>::try_from_uri(&parts.uri).map_err(
            |rejection| ApiError::InvalidParameter {
                name: "query".to_string(),
                message: rejection.body_text(),
            },
        )?;
        Ok(Self(map))
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl QueryParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// A present parameter, taken verbatim.
    pub fn required_str(&self, name: &str) -> Result<String, ApiError> {
        self.get(name)
            .map(str::to_string)
            .ok_or_else(|| ApiError::missing_parameter(name))
    }

    /// A present parameter parsed with `FromStr`; `expected` names the target type in the error.
    ///
    /// The value is parsed as sent first, so string keys keep surrounding whitespace.
    /// Surrounding whitespace is only dropped as a fallback, for numbers and the like.
    pub fn required<T: FromStr>(&self, name: &str, expected: &str) -> Result<T, ApiError> {
        let raw = self.get(name).ok_or_else(|| ApiError::missing_parameter(name))?;
        raw.parse::<T>()
            .or_else(|_| raw.trim().parse::<T>())
            .map_err(|_| ApiError::invalid_parameter(name, raw, expected))
    }

    /// Accepts `true/false`, `on/off`, `yes/no` and `1/0`, case-insensitively.
    pub fn required_bool(&self, name: &str) -> Result<bool, ApiError> {
        let raw = self.get(name).ok_or_else(|| ApiError::missing_parameter(name))?;
        let value = raw.trim().to_ascii_lowercase();
        match value.as_str() {
            "true" | "on" | "yes" | "1" => Ok(true),
            "false" | "off" | "no" | "0" => Ok(false),
            _ => Err(ApiError::invalid_parameter(name, raw, "true or false")),
        }
    }

    /// ISO-8601 local date-time: `YYYY-MM-DDTHH:MM` with optional seconds and fractional seconds.
    pub fn required_datetime(&self, name: &str) -> Result<NaiveDateTime, ApiError> {
        let raw = self.get(name).ok_or_else(|| ApiError::missing_parameter(name))?;
        let value = raw.trim();
        NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
            .map_err(|_| {
                ApiError::invalid_parameter(name, raw, "an ISO date-time such as 2022-01-03T00:00:00")
            })
    }
}

/// Builds a value from individual query parameters.
pub trait FromParams: Sized {
    fn from_params(params: &QueryParams) -> Result<Self, ApiError>;
}
