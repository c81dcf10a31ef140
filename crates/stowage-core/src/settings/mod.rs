mod backend;
mod limits;
mod store;
mod sync;
mod value;
mod wizard;

pub use self::backend::{BackendView, FileSettings, FtpSettings, S3Settings, SshSettings, WebView};
pub use self::limits::TransferLimits;
pub use self::store::SettingsStore;
pub use self::value::{FromSetting, SettingValue, ValueKind};
pub use self::wizard::{
    find_property, BackendKind, PrimaryAction, WizardSettings, KEY_PREFIX, PROPERTIES,
};
