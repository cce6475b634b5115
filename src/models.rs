//! Small value types shared across the client.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::error::ClientError;

/// Vendor sub-brand a client session speaks for.
///
/// Embedded in the `x-user-agent` header and recovered from it when naming
/// response log files.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CarBrand {
    #[default]
    Bmw,
    Mini,
    Toyota,
}

/// A latitude/longitude pair.
///
/// A position is either complete or absent; use `Option<GpsPosition>` for
/// the absent case.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsPosition {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsPosition {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ClientError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(ClientError::Parse(format!(
                "GPS coordinates must be finite, got ({latitude}, {longitude})"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Builds an optional position from two optional coordinates.
    ///
    /// # Errors
    ///
    /// Fails when exactly one coordinate is missing.
    pub fn from_optional(
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Option<Self>, ClientError> {
        match (latitude, longitude) {
            (Some(lat), Some(lon)) => Self::new(lat, lon).map(Some),
            (None, None) => Ok(None),
            _ => Err(ClientError::Parse(
                "either none or all GPS coordinates must be set".to_string(),
            )),
        }
    }
}

impl From<GpsPosition> for (f64, f64) {
    fn from(value: GpsPosition) -> Self {
        (value.latitude, value.longitude)
    }
}

/// A reading paired with its unit, e.g. a remaining range of `(412, "km")`.
///
/// Which units the API reports follows the session's units preference.
/// Either part may be missing in API payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueWithUnit {
    pub value: Option<f64>,
    pub unit: Option<String>,
}

impl ValueWithUnit {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value: Some(value),
            unit: Some(unit.into()),
        }
    }

    /// `true` when neither a value nor a unit is present.
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.unit.is_none()
    }
}

impl fmt::Display for ValueWithUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.value, self.unit.as_deref()) {
            (Some(value), Some(unit)) => write!(f, "{value} {unit}"),
            (Some(value), None) => write!(f, "{value}"),
            (None, _) => f.write_str("-"),
        }
    }
}
