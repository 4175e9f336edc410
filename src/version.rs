//! Backend version numbers and version bands
//!
//! Versions are dotted numeric strings ("0.0", "1.14", "2.401.3"). A
//! [`VersionBand`] is an inclusive lower bound with an optional exclusive
//! upper bound; entries use bands to select the generator matching the
//! installed backend plugin.

use crate::error::CompileError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A dotted numeric version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Version(Vec<u32>);

impl Version {
    /// The lowest version, "0.0"; bands starting here accept anything
    pub fn zero() -> Self {
        Version(vec![0, 0])
    }

    fn components(&self) -> &[u32] {
        &self.0
    }
}

impl FromStr for Version {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CompileError::InvalidVersion {
                value: s.to_string(),
            });
        }
        let components = trimmed
            .split('.')
            .map(|part| part.parse::<u32>())
            .collect::<Result<Vec<u32>, _>>()
            .map_err(|_| CompileError::InvalidVersion {
                value: s.to_string(),
            })?;
        Ok(Version(components))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|c| c.to_string()).collect();
        f.write_str(&parts.join("."))
    }
}

// Equality follows ordering so "1.0" == "1.0.0".
impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare component-wise; missing components count as zero,
        // so "1.0" == "1.0.0".
        let len = self.0.len().max(other.0.len());
        for i in 0..len {
            let a = self.components().get(i).copied().unwrap_or(0);
            let b = other.components().get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        Ordering::Equal
    }
}

/// A supported version range: `min` inclusive, `max` exclusive when present
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionBand {
    min: Version,
    max: Option<Version>,
}

impl VersionBand {
    /// Band accepting every version from `min` upward
    pub fn from(min: Version) -> Self {
        VersionBand { min, max: None }
    }

    /// Band accepting versions in `[min, max)`
    pub fn between(min: Version, max: Version) -> Self {
        VersionBand {
            min,
            max: Some(max),
        }
    }

    /// Band accepting every version ("0.0" and up)
    pub fn any() -> Self {
        VersionBand::from(Version::zero())
    }

    pub fn min(&self) -> &Version {
        &self.min
    }

    /// Whether `version` falls inside this band
    pub fn contains(&self, version: &Version) -> bool {
        if *version < self.min {
            return false;
        }
        match &self.max {
            Some(max) => version < max,
            None => true,
        }
    }
}

impl fmt::Display for VersionBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.max {
            Some(max) => write!(f, ">={} <{}", self.min, max),
            None => write!(f, ">={}", self.min),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(v("1.14").to_string(), "1.14");
        assert_eq!(v(" 2.401.3 ").to_string(), "2.401.3");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Version::from_str("").is_err());
        assert!(Version::from_str("1.x").is_err());
        assert!(Version::from_str("latest").is_err());
    }

    #[test]
    fn test_ordering() {
        assert!(v("0.0") < v("0.5"));
        assert!(v("1.2") < v("1.14")); // numeric, not lexicographic
        assert!(v("1.0") == v("1.0.0"));
        assert!(v("2.0.1") > v("2.0"));
    }

    #[test]
    fn test_band_contains() {
        let open = VersionBand::from(v("1.14"));
        assert!(open.contains(&v("1.14")));
        assert!(open.contains(&v("3.0")));
        assert!(!open.contains(&v("1.13")));

        let bounded = VersionBand::between(v("0.0"), v("1.14"));
        assert!(bounded.contains(&v("0.0")));
        assert!(bounded.contains(&v("1.13.9")));
        assert!(!bounded.contains(&v("1.14"))); // max is exclusive
    }

    #[test]
    fn test_band_display() {
        assert_eq!(VersionBand::any().to_string(), ">=0.0");
        assert_eq!(
            VersionBand::between(v("0.0"), v("1.14")).to_string(),
            ">=0.0 <1.14"
        );
    }
}
