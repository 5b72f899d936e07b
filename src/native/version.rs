//! Runtime metadata versions and handler selection.
//!
//! The class descriptor layout is fixed per runtime build and identified by the global
//! metadata version (`24.1`, `27.0`, ...). When only the engine version is known, it is mapped
//! onto the metadata version that engine release ships with.

use std::fmt;

use strum::{Display, EnumCount, EnumIter, IntoEnumIterator};

use crate::{
    native::class::{
        v24_0::ClassHandlerV24_0, v24_1::ClassHandlerV24_1, v27_0::ClassHandlerV27_0,
        v29_0::ClassHandlerV29_0, NativeClassStructHandler,
    },
    Error::NotSupported,
    Result,
};

/// Version of the runtime's global metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MetadataVersion {
    /// Major version, e.g. `24`
    pub major: u16,
    /// Minor version, e.g. `1`
    pub minor: u16,
}

impl MetadataVersion {
    /// Create a new version
    pub const fn new(major: u16, minor: u16) -> Self {
        MetadataVersion { major, minor }
    }

    /// Parse `"24"` or `"24.1"`
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if a component is not a number.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        let (major, minor) = match text.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (text, "0"),
        };

        let major = major
            .parse::<u16>()
            .map_err(|_| malformed_error!("Invalid metadata version - {}", text))?;
        let minor = minor
            .parse::<u16>()
            .map_err(|_| malformed_error!("Invalid metadata version - {}", text))?;

        Ok(MetadataVersion { major, minor })
    }

    /// Map an engine version such as `"2019.4.8f1"` onto its metadata version
    ///
    /// | Engine             | Metadata |
    /// |--------------------|----------|
    /// | before 2017.1      | 23.0     |
    /// | 2017.1 - 2018.2    | 24.0     |
    /// | 2018.3 - 2019.4    | 24.1     |
    /// | 2020.1             | 24.3     |
    /// | 2020.2 - 2021.1    | 27.0     |
    /// | 2021.2 and later   | 29.0     |
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the year or the release number is missing.
    pub fn from_unity_version(text: &str) -> Result<Self> {
        let mut parts = text.trim().split('.');
        let year = parts
            .next()
            .and_then(|year| year.parse::<u32>().ok())
            .ok_or_else(|| malformed_error!("Invalid engine version - {}", text))?;
        let release = parts
            .next()
            .and_then(|release| release.parse::<u32>().ok())
            .ok_or_else(|| malformed_error!("Invalid engine version - {}", text))?;

        let version = match (year, release) {
            (year, _) if year < 2017 => MetadataVersion::new(23, 0),
            (2017, _) | (2018, 0..=2) => MetadataVersion::new(24, 0),
            (2018, _) | (2019, _) => MetadataVersion::new(24, 1),
            (2020, 0..=1) => MetadataVersion::new(24, 3),
            (2020, _) | (2021, 0..=1) => MetadataVersion::new(27, 0),
            _ => MetadataVersion::new(29, 0),
        };
        Ok(version)
    }
}

impl fmt::Display for MetadataVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Class descriptor layouts with a dedicated handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, EnumCount)]
pub enum ClassLayoutVersion {
    /// Metadata 24.0
    #[strum(to_string = "24.0")]
    V24_0,
    /// Metadata 24.1 to 24.x
    #[strum(to_string = "24.1")]
    V24_1,
    /// Metadata 27.x
    #[strum(to_string = "27.0")]
    V27_0,
    /// Metadata 29.0 and later
    #[strum(to_string = "29.0")]
    V29_0,
}

impl ClassLayoutVersion {
    /// The oldest metadata version using this layout
    pub fn metadata_version(&self) -> MetadataVersion {
        match self {
            ClassLayoutVersion::V24_0 => MetadataVersion::new(24, 0),
            ClassLayoutVersion::V24_1 => MetadataVersion::new(24, 1),
            ClassLayoutVersion::V27_0 => MetadataVersion::new(27, 0),
            ClassLayoutVersion::V29_0 => MetadataVersion::new(29, 0),
        }
    }

    /// The handler of this layout
    pub fn handler(&self) -> &'static dyn NativeClassStructHandler {
        match self {
            ClassLayoutVersion::V24_0 => &ClassHandlerV24_0,
            ClassLayoutVersion::V24_1 => &ClassHandlerV24_1,
            ClassLayoutVersion::V27_0 => &ClassHandlerV27_0,
            ClassLayoutVersion::V29_0 => &ClassHandlerV29_0,
        }
    }
}

/// Select the class descriptor handler for a metadata version
///
/// Picks the newest layout whose version is not above `version`.
///
/// # Errors
/// Returns [`crate::Error::NotSupported`] for versions older than 24.0.
pub fn class_handler_for(
    version: MetadataVersion,
) -> Result<&'static dyn NativeClassStructHandler> {
    let layout = ClassLayoutVersion::iter()
        .rev()
        .find(|layout| layout.metadata_version() <= version)
        .ok_or(NotSupported)?;

    tracing::debug!("metadata {} uses class layout {}", version, layout);
    Ok(layout.handler())
}
