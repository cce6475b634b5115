//! Default request headers expected by the vehicle API.

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use uuid::Uuid;

use crate::error::ClientError;
use crate::models::CarBrand;
use crate::regions::Region;

/// Fixed `user-agent` of the official app.
pub const CLIENT_USER_AGENT: &str = "Dart/3.0 (dart:io)";

pub const X_USER_AGENT: HeaderName = HeaderName::from_static("x-user-agent");
pub const UNITS_PREFERENCES: HeaderName = HeaderName::from_static("bmw-units-preferences");
pub const HOUR_FORMAT: HeaderName = HeaderName::from_static("24-hour-format");

const METRIC_UNITS: &str = "d=KM;v=L";
const IMPERIAL_UNITS: &str = "d=MI;v=G";

/// `x-user-agent` value for a brand in a region.
pub fn x_user_agent(brand: CarBrand, region: Region) -> String {
    format!(
        "android(TQ2A.230505.002);{brand};{app_version};{region}",
        app_version = region.app_version(),
    )
}

/// `bmw-units-preferences` value.
pub fn units_preference(use_metric_units: bool) -> &'static str {
    if use_metric_units {
        METRIC_UNITS
    } else {
        IMPERIAL_UNITS
    }
}

/// Fresh correlation id headers. Both id headers share one UUID.
pub fn correlation_id() -> Result<HeaderMap, ClientError> {
    let id = HeaderValue::from_str(&Uuid::new_v4().to_string())?;

    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static("x-identity-provider"),
        HeaderValue::from_static("gcdm"),
    );
    headers.insert(HeaderName::from_static("x-correlation-id"), id.clone());
    headers.insert(HeaderName::from_static("bmw-correlation-id"), id);
    Ok(headers)
}

/// Complete default header set for a session.
pub fn default_headers(
    brand: CarBrand,
    region: Region,
    use_metric_units: bool,
) -> Result<HeaderMap, ClientError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en"));
    headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
    headers.insert(
        X_USER_AGENT,
        HeaderValue::from_str(&x_user_agent(brand, region))?,
    );
    headers.extend(correlation_id()?);
    headers.insert(
        UNITS_PREFERENCES,
        HeaderValue::from_static(units_preference(use_metric_units)),
    );
    headers.insert(HOUR_FORMAT, HeaderValue::from_static("true"));
    Ok(headers)
}
