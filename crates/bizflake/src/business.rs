use crate::error::{self, Error};
use crate::layout::MAX_BUSINESS_TYPE;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tag partitioning the identifier space by entity kind.
///
/// Always in `1..=15`; zero is reserved so that an all-zero id never decodes
/// to a real record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct BusinessType(u8);

impl BusinessType {
    pub const USER: Self = Self(0x1);
    pub const PROFILE: Self = Self(0x2);
    pub const ACCOUNT: Self = Self(0x3);
    pub const MEMBERSHIP: Self = Self(0x4);
    pub const ORDER: Self = Self(0x5);

    const NAMED: [(&'static str, BusinessType); 5] = [
        ("user", Self::USER),
        ("profile", Self::PROFILE),
        ("account", Self::ACCOUNT),
        ("membership", Self::MEMBERSHIP),
        ("order", Self::ORDER),
    ];

    pub fn new(value: u8) -> error::Result<Self> {
        if value == 0 || value > MAX_BUSINESS_TYPE {
            return Err(Error::InvalidBusinessType {
                value,
                max: MAX_BUSINESS_TYPE,
            });
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Name of a well-known tag, `None` for custom ones.
    pub fn name(self) -> Option<&'static str> {
        Self::NAMED
            .iter()
            .find(|(_, tag)| *tag == self)
            .map(|(name, _)| *name)
    }
}

impl TryFrom<u8> for BusinessType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BusinessType> for u8 {
    fn from(value: BusinessType) -> Self {
        value.0
    }
}

impl fmt::Display for BusinessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}({})", self.0),
            None => write!(f, "{}", self.0),
        }
    }
}

impl FromStr for BusinessType {
    type Err = Error;

    /// Accepts a well-known name (case-insensitive) or a decimal tag.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(value) = s.parse::<u8>() {
            return Self::new(value);
        }
        Self::NAMED
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|(_, tag)| *tag)
            .ok_or_else(|| Error::UnknownBusinessType(s.to_string()))
    }
}
