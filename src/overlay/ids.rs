//! PlayStation Network content identifiers.
//!
//! ## Format
//! ```text
//! UP0001-CUSA00001_00-GAMECONTENT00001
//! └────┘ └──────────┘ └──────────────┘
//!   │         │              └ entitlement label (1-16 A-Z / 0-9)
//!   │         └ NP title ID     (9 alphanumerics, "_", 2 digits)
//!   └ publisher ID              (region letter + letter + 4 digits)
//! └─────────────────┘
//!      service ID
//! ```

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

const PUBLISHER_LEN: usize = 6;
const NP_TITLE_LEN: usize = 12;
const LABEL_MAX_LEN: usize = 16;

/// Publisher plus NP title, e.g. `UP0001-CUSA00001_00`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceId {
    publisher: String,
    np_title: String,
}

impl ServiceId {
    /// Publisher ID, e.g. `UP0001`.
    pub fn publisher(&self) -> &str {
        &self.publisher
    }

    /// NP title ID, e.g. `CUSA00001_00`.
    pub fn np_title(&self) -> &str {
        &self.np_title
    }

    fn from_parts(publisher: &str, np_title: &str) -> Result<Self> {
        if publisher.len() != PUBLISHER_LEN || !publisher.bytes().all(|b| b.is_ascii_alphanumeric())
        {
            return Err(violation("publisher ID must be 6 alphanumerics"));
        }
        let title_ok = np_title.len() == NP_TITLE_LEN
            && np_title.as_bytes()[9] == b'_'
            && np_title[..9].bytes().all(|b| b.is_ascii_alphanumeric())
            && np_title[10..].bytes().all(|b| b.is_ascii_digit());
        if !title_ok {
            return Err(violation("NP title ID must look like CUSA00000_00"));
        }
        Ok(Self {
            publisher: publisher.to_owned(),
            np_title: np_title.to_owned(),
        })
    }
}

impl FromStr for ServiceId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let Some((publisher, np_title)) = s.split_once('-') else {
            return Err(violation("service ID needs two dash-separated parts"));
        };
        Self::from_parts(publisher, np_title)
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.publisher, self.np_title)
    }
}

/// A full content ID: service ID plus entitlement label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentId {
    service: ServiceId,
    label: String,
}

impl ContentId {
    /// Combine a service ID and an entitlement label.
    ///
    /// The label is upper-cased.
    pub fn new(service: ServiceId, label: &str) -> Result<Self> {
        let label = label.to_ascii_uppercase();
        if label.is_empty()
            || label.len() > LABEL_MAX_LEN
            || !label.bytes().all(|b| b.is_ascii_alphanumeric())
        {
            return Err(violation("entitlement label must be 1-16 alphanumerics"));
        }
        Ok(Self { service, label })
    }

    /// The service ID part.
    pub fn service(&self) -> &ServiceId {
        &self.service
    }

    /// The entitlement label part.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl FromStr for ContentId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split('-');
        let (Some(publisher), Some(np_title), Some(label), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(violation("content ID needs three dash-separated parts"));
        };
        Self::new(ServiceId::from_parts(publisher, np_title)?, label)
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.service, self.label)
    }
}

fn violation(reason: &'static str) -> Error {
    Error::ConstraintViolation {
        key: "CONTENT_ID".into(),
        reason,
    }
}
