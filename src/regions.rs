//! Region identifiers and the per-region server and app-version tables.

use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use url::Url;

use crate::error::ClientError;

/// Version string of the official app the API expects to talk to.
const APP_VERSION: &str = "4.9.2(36892)";

/// Backend region an account is registered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Region {
    #[strum(serialize = "na")]
    NorthAmerica,
    #[strum(serialize = "row")]
    RestOfWorld,
    #[strum(serialize = "cn")]
    China,
}

impl Region {
    /// Host serving the vehicle API for this region.
    pub fn server_url(self) -> &'static str {
        match self {
            Region::NorthAmerica => "https://cocoapi.bmwgroup.us",
            Region::RestOfWorld => "https://cocoapi.bmwgroup.com",
            Region::China => "https://myprofile.bmw.com.cn",
        }
    }

    /// Parsed [`Region::server_url`], used as the client's base URL.
    pub fn base_url(self) -> Result<Url, ClientError> {
        Ok(Url::parse(self.server_url())?)
    }

    /// App version reported in the `x-user-agent` header.
    pub fn app_version(self) -> &'static str {
        match self {
            Region::NorthAmerica | Region::RestOfWorld | Region::China => APP_VERSION,
        }
    }
}
