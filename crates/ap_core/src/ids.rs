//! crates/ap_core/src/ids.rs
//! Party key newtype. A party's name is its unique key inside a `Roster`;
//! candidate names are plain labels and carry no identity.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Party label, unique within a roster. Never empty or whitespace-only.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PartyName(String);

impl PartyName {
    pub fn new(name: impl Into<String>) -> Result<Self, CoreError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CoreError::EmptyPartyName);
        }
        Ok(PartyName(name))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartyName {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PartyName {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PartyName::new(s)
    }
}

impl TryFrom<&str> for PartyName {
    type Error = CoreError;
    #[inline]
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl AsRef<str> for PartyName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for PartyName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for PartyName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        let p: PartyName = "PSD/MDB".parse().unwrap();
        assert_eq!(p.as_str(), "PSD/MDB");
        assert_eq!(format!("{p}"), "PSD/MDB");
        assert!(p == "PSD/MDB");

        for bad in ["", " ", "\t\n"] {
            assert_eq!(bad.parse::<PartyName>(), Err(CoreError::EmptyPartyName));
        }
    }
}
