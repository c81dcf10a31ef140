use super::wizard::WizardSettings;
use crate::config::UnitDefaults;
use crate::error::Result;
use crate::size::parse_size_with_default;

/// Size-valued wizard fields resolved to bytes. `None` means the field is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferLimits {
    pub upload_speed: Option<i64>,
    pub download_speed: Option<i64>,
    pub backup_size: Option<i64>,
    pub volume_size: Option<i64>,
}

fn resolve(raw: &str, default_unit: &str) -> Result<Option<i64>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_size_with_default(raw, default_unit).map(Some)
}

impl TransferLimits {
    /// Bare numbers take the configured unit: bandwidth for speeds, size for
    /// the set and volume limits.
    pub fn from_settings(settings: &WizardSettings<'_>, units: &UnitDefaults) -> Result<Self> {
        Ok(Self {
            upload_speed: resolve(&settings.upload_speed_limit()?, &units.bandwidth)?,
            download_speed: resolve(&settings.download_speed_limit()?, &units.bandwidth)?,
            backup_size: resolve(&settings.backup_size_limit()?, &units.size)?,
            volume_size: resolve(&settings.volume_size()?, &units.size)?,
        })
    }
}
