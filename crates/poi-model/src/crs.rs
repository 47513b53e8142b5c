//! Coordinate reference system tags.
//!
//! A [`Crs`] is a label only. Nothing in this workspace transforms
//! coordinates between systems; the tag travels with a feature collection so
//! that mismatches can be detected and so the output can be labelled.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PoiError, Result};

/// EPSG code of WGS84 geographic coordinates.
pub const WGS84_EPSG: u32 = 4326;

const URN_EPSG_PREFIX: &str = "urn:ogc:def:crs:epsg:";
const HTTP_EPSG_PREFIX: &str = "http://www.opengis.net/def/crs/epsg/";
const CRS84_ALIASES: &[&str] = &["crs84", "ogc:crs84", "urn:ogc:def:crs:ogc:1.3:crs84"];

/// A coordinate reference system tag in normalized form.
///
/// Recognized EPSG spellings (`EPSG:4326`, `urn:ogc:def:crs:EPSG::4326`,
/// `http://www.opengis.net/def/crs/EPSG/0/4326`) and the `CRS84` aliases all
/// normalize to `EPSG:<code>`. Anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Crs(String);

impl Crs {
    /// Parse and normalize a CRS identifier.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PoiError::InvalidCrs(raw.to_string()));
        }
        match epsg_code_of(trimmed) {
            Some(code) => Ok(Self::epsg(code)),
            None => Ok(Self(trimmed.to_string())),
        }
    }

    pub fn epsg(code: u32) -> Self {
        Self(format!("EPSG:{code}"))
    }

    /// WGS84 geographic coordinates (EPSG:4326).
    pub fn wgs84() -> Self {
        Self::epsg(WGS84_EPSG)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The EPSG code when the tag is an EPSG identifier.
    pub fn epsg_code(&self) -> Option<u32> {
        self.0.strip_prefix("EPSG:").and_then(|code| code.parse().ok())
    }

    pub fn is_wgs84(&self) -> bool {
        self.epsg_code() == Some(WGS84_EPSG)
    }

    /// The OGC URN spelling used by the legacy GeoJSON `crs` member.
    pub fn to_urn(&self) -> String {
        match self.epsg_code() {
            Some(code) => format!("urn:ogc:def:crs:EPSG::{code}"),
            None => self.0.clone(),
        }
    }
}

fn epsg_code_of(value: &str) -> Option<u32> {
    let lower = value.to_ascii_lowercase();
    if CRS84_ALIASES.contains(&lower.as_str()) {
        return Some(WGS84_EPSG);
    }
    let code = if let Some(rest) = lower.strip_prefix("epsg:") {
        rest
    } else if let Some(rest) = lower.strip_prefix(URN_EPSG_PREFIX) {
        // urn:ogc:def:crs:EPSG:<version>:<code>, version usually empty
        rest.rsplit(':').next()?
    } else if let Some(rest) = lower.strip_prefix(HTTP_EPSG_PREFIX) {
        rest.rsplit('/').next()?
    } else {
        return None;
    };
    if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    code.parse().ok()
}

impl Default for Crs {
    fn default() -> Self {
        Self::wgs84()
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Crs {
    type Err = PoiError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Crs {
    type Error = PoiError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Crs> for String {
    fn from(value: Crs) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_epsg_spellings() {
        for raw in [
            "EPSG:4326",
            "epsg:4326",
            " EPSG:4326 ",
            "urn:ogc:def:crs:EPSG::4326",
            "urn:ogc:def:crs:EPSG:6.6:4326",
            "http://www.opengis.net/def/crs/EPSG/0/4326",
            "urn:ogc:def:crs:OGC:1.3:CRS84",
            "CRS84",
        ] {
            let crs = Crs::parse(raw).expect("parse crs");
            assert_eq!(crs, Crs::wgs84(), "{raw}");
        }
    }

    #[test]
    fn keeps_unknown_identifiers_verbatim() {
        let crs = Crs::parse("ESRI:102100").expect("parse crs");
        assert_eq!(crs.as_str(), "ESRI:102100");
        assert_eq!(crs.epsg_code(), None);
        assert_eq!(crs.to_urn(), "ESRI:102100");
    }

    #[test]
    fn rejects_empty_identifier() {
        assert!(Crs::parse("   ").is_err());
    }

    #[test]
    fn projected_code_is_not_wgs84() {
        let crs = Crs::parse("EPSG:3857").expect("parse crs");
        assert_eq!(crs.epsg_code(), Some(3857));
        assert!(!crs.is_wgs84());
        assert_eq!(crs.to_urn(), "urn:ogc:def:crs:EPSG::3857");
    }
}
