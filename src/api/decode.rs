//! Summary payload decoding.

use crate::domain::error::{CovidashError, Result};
use crate::domain::{Country, GlobalStats, Summary};
use serde::Deserialize;

/// Raw payload shape. `Global` is absent when the API answers with a bare
/// status message.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SummaryPayload {
    #[serde(rename = "ID", default)]
    id: String,
    #[serde(default)]
    message: String,
    global: Option<GlobalStats>,
    #[serde(default)]
    countries: Option<Vec<Country>>,
    #[serde(default)]
    date: String,
}

impl TryFrom<SummaryPayload> for Summary {
    type Error = CovidashError;

    fn try_from(payload: SummaryPayload) -> Result<Self> {
        let Some(global) = payload.global else {
            let message = if payload.message.is_empty() {
                "response has no global statistics".to_string()
            } else {
                payload.message
            };
            return Err(CovidashError::Unavailable(message));
        };

        Ok(Self {
            id: payload.id,
            message: payload.message,
            global,
            countries: payload.countries.unwrap_or_default(),
            date: payload.date,
        })
    }
}

/// Decodes a summary response body.
///
/// # Errors
///
/// - [`CovidashError::Decode`] if the body is not valid JSON for the payload
/// - [`CovidashError::Unavailable`] if the API returned only a message
///
/// # Example
///
/// ```
/// use covidash::api::decode_summary;
///
/// let err = decode_summary(br#"{"Message": "Caching in progress"}"#).unwrap_err();
/// assert_eq!(err.to_string(), "Statistics unavailable: Caching in progress");
/// ```
pub fn decode_summary(body: &[u8]) -> Result<Summary> {
    let _span = tracing::debug_span!("decode_summary", body_len = body.len()).entered();

    let payload: SummaryPayload = serde_json::from_slice(body)?;
    let summary = Summary::try_from(payload)?;

    tracing::debug!(
        country_count = summary.countries.len(),
        total_confirmed = summary.global.total_confirmed,
        "summary decoded"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_summary() {
        let body = br#"{
            "ID": "x",
            "Global": {"TotalConfirmed": 10, "TotalDeaths": 2, "TotalRecovered": 5},
            "Countries": [
                {"Country": "Peru", "CountryCode": "PE", "TotalConfirmed": 7},
                {"Country": "Chad", "CountryCode": "TD", "TotalConfirmed": 3}
            ],
            "Date": "2022-04-18T10:40:45.594Z"
        }"#;
        let summary = decode_summary(body).unwrap();
        assert_eq!(summary.id, "x");
        assert_eq!(summary.global.total_deaths, 2);
        assert_eq!(summary.countries.len(), 2);
        assert_eq!(summary.countries[1].country_code, "TD");
    }

    #[test]
    fn missing_global_without_message_is_unavailable() {
        let err = decode_summary(b"{}").unwrap_err();
        assert!(matches!(err, CovidashError::Unavailable(_)));
    }

    #[test]
    fn malformed_json_is_decode_error() {
        let err = decode_summary(b"<html>rate limited</html>").unwrap_err();
        assert!(matches!(err, CovidashError::Decode(_)));
    }
}
