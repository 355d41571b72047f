//! Driver section of a GPU descriptor

use serde::Serialize;

/// Installed driver details for one adapter
#[derive(Debug, Clone, Serialize)]
pub struct DriverInfo {
    version: Option<String>,
    date: Option<String>,
}

impl DriverInfo {
    pub fn builder() -> DriverInfoBuilder {
        DriverInfoBuilder::default()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }
}

#[derive(Default)]
pub struct DriverInfoBuilder {
    version: Option<String>,
    date: Option<String>,
}

impl DriverInfoBuilder {
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn build(self) -> DriverInfo {
        DriverInfo {
            version: self.version,
            date: self.date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sentinels() {
        let driver = DriverInfo::builder().build();
        assert_eq!(driver.version(), None);
        assert_eq!(driver.date(), None);
    }

    #[test]
    fn version_sticks() {
        let driver = DriverInfo::builder().version("555.58.02").build();
        assert_eq!(driver.version(), Some("555.58.02"));
    }
}
