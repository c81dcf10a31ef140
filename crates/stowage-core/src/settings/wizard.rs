use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::backend::{FileSettings, FtpSettings, S3Settings, SshSettings};
use super::store::{read_item, write_item, SettingsStore};
use super::value::{FromSetting, SettingValue, ValueKind};
use crate::error::{Result, StowageError};

/// Namespace token prepended to every key the facade manages.
pub const KEY_PREFIX: &str = "WSW_";

/// What the user chose on the wizard's first page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimaryAction {
    #[default]
    Unknown,
    Add,
    Edit,
    Restore,
    Remove,
    RunNow,
}

impl PrimaryAction {
    pub fn as_str(self) -> &'static str {
        match self {
            PrimaryAction::Unknown => "Unknown",
            PrimaryAction::Add => "Add",
            PrimaryAction::Edit => "Edit",
            PrimaryAction::Restore => "Restore",
            PrimaryAction::Remove => "Remove",
            PrimaryAction::RunNow => "RunNow",
        }
    }
}

impl fmt::Display for PrimaryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrimaryAction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unknown" => Ok(PrimaryAction::Unknown),
            "add" => Ok(PrimaryAction::Add),
            "edit" => Ok(PrimaryAction::Edit),
            "restore" => Ok(PrimaryAction::Restore),
            "remove" => Ok(PrimaryAction::Remove),
            "runnow" => Ok(PrimaryAction::RunNow),
            other => Err(format!("unknown action '{other}'")),
        }
    }
}

/// The remote storage protocol the backup job targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    File,
    Ftp,
    Ssh,
    S3,
    WebDav,
    #[default]
    Unknown,
}

impl BackendKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BackendKind::File => "File",
            BackendKind::Ftp => "FTP",
            BackendKind::Ssh => "SSH",
            BackendKind::S3 => "S3",
            BackendKind::WebDav => "WebDav",
            BackendKind::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "file" => Ok(BackendKind::File),
            "ftp" => Ok(BackendKind::Ftp),
            "ssh" => Ok(BackendKind::Ssh),
            "s3" => Ok(BackendKind::S3),
            "webdav" => Ok(BackendKind::WebDav),
            "unknown" => Ok(BackendKind::Unknown),
            other => Err(format!("unknown backend '{other}'")),
        }
    }
}

pub(crate) mod keys {
    pub const PRIMARY_ACTION: &str = "PrimaryAction";
    pub const SCHEDULE_ID: &str = "ScheduleID";
    pub const SCHEDULE_NAME: &str = "ScheduleName";
    pub const SCHEDULE_PATH: &str = "SchedulePath";
    pub const SOURCE_PATH: &str = "SourcePath";
    pub const SOURCE_FILTER: &str = "SourceFilter";
    pub const BACKUP_PASSWORD: &str = "BackupPassword";
    pub const BACKEND: &str = "Backend";
    pub const BACKUP_TIME_OFFSET: &str = "BackupTimeOffset";
    pub const REPEAT_INTERVAL: &str = "RepeatInterval";
    pub const FULL_BACKUP_INTERVAL: &str = "FullBackupInterval";
    pub const MAX_FULL_BACKUPS: &str = "MaxFullBackups";
    pub const BACKUP_EXPIRE_INTERVAL: &str = "BackupExpireInterval";
    pub const UPLOAD_SPEED_LIMIT: &str = "UploadSpeedLimit";
    pub const DOWNLOAD_SPEED_LIMIT: &str = "DownloadSpeedLimit";
    pub const BACKUP_SIZE_LIMIT: &str = "BackupSizeLimit";
    pub const VOLUME_SIZE: &str = "VolumeSize";
    pub const THREAD_PRIORITY: &str = "ThreadPriority";
    pub const ASYNC_TRANSFER: &str = "AsyncTransfer";
    pub const ENCODED_FILTERS: &str = "EncodedFilters";
    pub const RUN_IMMEDIATELY: &str = "RunImmediately";
    pub const FORCE_FULL: &str = "ForceFull";
    pub const RESTORE_TIME: &str = "RestoreTime";
    pub const RESTORE_PATH: &str = "RestorePath";
    pub const RESTORE_FILTER: &str = "RestoreFilter";

    pub const BACKEND_USERNAME: &str = "Backend:Username";
    pub const BACKEND_PASSWORD: &str = "Backend:Password";
    pub const BACKEND_PATH: &str = "Backend:Path";
    pub const WEB_SERVER: &str = "WEB:Server";
    pub const WEB_PORT: &str = "WEB:Port";
    pub const SSH_PASSWORDLESS: &str = "SSH:Passwordless";
    pub const S3_USE_EURO_SERVER: &str = "S3:UseEuroServer";
    pub const S3_USE_SUB_DOMAINS: &str = "S3:UseSubDomains";
}

/// Every property the facade and its backend views manage, with its kind.
pub const PROPERTIES: &[(&str, ValueKind)] = &[
    (keys::PRIMARY_ACTION, ValueKind::Action),
    (keys::SCHEDULE_ID, ValueKind::Integer),
    (keys::SCHEDULE_NAME, ValueKind::Text),
    (keys::SCHEDULE_PATH, ValueKind::Text),
    (keys::SOURCE_PATH, ValueKind::Text),
    (keys::SOURCE_FILTER, ValueKind::Text),
    (keys::BACKUP_PASSWORD, ValueKind::Text),
    (keys::BACKEND, ValueKind::Backend),
    (keys::BACKUP_TIME_OFFSET, ValueKind::Time),
    (keys::REPEAT_INTERVAL, ValueKind::Text),
    (keys::FULL_BACKUP_INTERVAL, ValueKind::Text),
    (keys::MAX_FULL_BACKUPS, ValueKind::Integer),
    (keys::BACKUP_EXPIRE_INTERVAL, ValueKind::Text),
    (keys::UPLOAD_SPEED_LIMIT, ValueKind::Text),
    (keys::DOWNLOAD_SPEED_LIMIT, ValueKind::Text),
    (keys::BACKUP_SIZE_LIMIT, ValueKind::Text),
    (keys::VOLUME_SIZE, ValueKind::Text),
    (keys::THREAD_PRIORITY, ValueKind::Text),
    (keys::ASYNC_TRANSFER, ValueKind::Flag),
    (keys::ENCODED_FILTERS, ValueKind::Text),
    (keys::RUN_IMMEDIATELY, ValueKind::Flag),
    (keys::FORCE_FULL, ValueKind::Flag),
    (keys::RESTORE_TIME, ValueKind::Time),
    (keys::RESTORE_PATH, ValueKind::Text),
    (keys::RESTORE_FILTER, ValueKind::Text),
    (keys::BACKEND_USERNAME, ValueKind::Text),
    (keys::BACKEND_PASSWORD, ValueKind::Text),
    (keys::BACKEND_PATH, ValueKind::Text),
    (keys::WEB_SERVER, ValueKind::Text),
    (keys::WEB_PORT, ValueKind::Integer),
    (keys::SSH_PASSWORDLESS, ValueKind::Flag),
    (keys::S3_USE_EURO_SERVER, ValueKind::Flag),
    (keys::S3_USE_SUB_DOMAINS, ValueKind::Flag),
];

/// Find a facade property by key suffix, ignoring case. Returns the
/// canonical suffix and its declared kind.
pub fn find_property(key: &str) -> Option<(&'static str, ValueKind)> {
    PROPERTIES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .copied()
}

/// Typed view over a caller-owned [`SettingsStore`].
///
/// Holds nothing but the borrowed store; every property read goes straight to
/// the map and falls back to the property's default when the key is absent.
pub struct WizardSettings<'a> {
    store: &'a mut dyn SettingsStore,
}

macro_rules! text_property {
    ($(#[$doc:meta])* $get:ident, $set:ident, $key:expr) => {
        $(#[$doc])*
        pub fn $get(&self) -> Result<String> {
            self.get_item($key, String::new())
        }

        pub fn $set(&mut self, value: impl Into<String>) {
            self.set_item($key, SettingValue::Text(value.into()));
        }
    };
}

macro_rules! flag_property {
    ($(#[$doc:meta])* $get:ident, $set:ident, $key:expr) => {
        $(#[$doc])*
        pub fn $get(&self) -> Result<bool> {
            self.get_item($key, false)
        }

        pub fn $set(&mut self, value: bool) {
            self.set_item($key, value);
        }
    };
}

impl<'a> WizardSettings<'a> {
    pub fn new(store: &'a mut dyn SettingsStore) -> Self {
        Self { store }
    }

    /// Read a namespaced value, or `default` when the key is absent.
    pub fn get_item<T: FromSetting>(&self, key: &str, default: T) -> Result<T> {
        read_item(&*self.store, key, default)
    }

    pub fn set_item(&mut self, key: &str, value: impl Into<SettingValue>) {
        write_item(&mut *self.store, key, value.into());
    }

    /// Parse `raw` according to the property's declared kind and store it.
    pub fn assign(&mut self, key: &str, raw: &str) -> Result<()> {
        let (name, kind) =
            find_property(key).ok_or_else(|| StowageError::UnknownSetting(key.to_string()))?;
        let value = SettingValue::parse_as(kind, name, raw)?;
        tracing::debug!(key = name, %value, "assigning wizard setting");
        self.set_item(name, value);
        Ok(())
    }

    /// Remove every facade-managed key. Entries outside the namespace stay.
    pub fn clear(&mut self) {
        for key in self.store.keys() {
            if key.starts_with(KEY_PREFIX) {
                self.store.remove(&key);
            }
        }
    }

    pub(crate) fn store_mut(&mut self) -> &mut dyn SettingsStore {
        &mut *self.store
    }

    /// The action taken on the primary page.
    pub fn primary_action(&self) -> Result<PrimaryAction> {
        self.get_item(keys::PRIMARY_ACTION, PrimaryAction::Unknown)
    }

    pub fn set_primary_action(&mut self, action: PrimaryAction) {
        self.set_item(keys::PRIMARY_ACTION, action);
    }

    /// The id of the schedule being edited, 0 for a new one.
    pub fn schedule_id(&self) -> Result<i64> {
        self.get_item(keys::SCHEDULE_ID, 0i64)
    }

    pub fn set_schedule_id(&mut self, id: i64) {
        self.set_item(keys::SCHEDULE_ID, id);
    }

    text_property!(schedule_name, set_schedule_name, keys::SCHEDULE_NAME);
    text_property!(
        /// Group path the backup is filed under.
        schedule_path,
        set_schedule_path,
        keys::SCHEDULE_PATH
    );
    text_property!(source_path, set_source_path, keys::SOURCE_PATH);
    text_property!(source_filter, set_source_filter, keys::SOURCE_FILTER);
    text_property!(
        /// Passphrase protecting the backup.
        backup_password,
        set_backup_password,
        keys::BACKUP_PASSWORD
    );

    /// The currently selected backend. Keys of other backends are left alone.
    pub fn backend(&self) -> Result<BackendKind> {
        self.get_item(keys::BACKEND, BackendKind::Unknown)
    }

    pub fn set_backend(&mut self, kind: BackendKind) {
        self.set_item(keys::BACKEND, kind);
    }

    pub fn file_settings(&mut self) -> FileSettings<'_> {
        FileSettings::new(self.store_mut())
    }

    pub fn ftp_settings(&mut self) -> FtpSettings<'_> {
        FtpSettings::new(self.store_mut())
    }

    pub fn ssh_settings(&mut self) -> SshSettings<'_> {
        SshSettings::new(self.store_mut())
    }

    pub fn s3_settings(&mut self) -> S3Settings<'_> {
        S3Settings::new(self.store_mut())
    }

    /// When the next backup runs. Defaults to the time of the read.
    pub fn backup_time_offset(&self) -> Result<DateTime<Utc>> {
        self.get_item(keys::BACKUP_TIME_OFFSET, Utc::now())
    }

    pub fn set_backup_time_offset(&mut self, when: DateTime<Utc>) {
        self.set_item(keys::BACKUP_TIME_OFFSET, when);
    }

    text_property!(repeat_interval, set_repeat_interval, keys::REPEAT_INTERVAL);
    text_property!(
        full_backup_interval,
        set_full_backup_interval,
        keys::FULL_BACKUP_INTERVAL
    );

    /// Number of full backups to keep.
    pub fn max_full_backups(&self) -> Result<u32> {
        self.get_item(keys::MAX_FULL_BACKUPS, 0u32)
    }

    pub fn set_max_full_backups(&mut self, count: u32) {
        self.set_item(keys::MAX_FULL_BACKUPS, count);
    }

    text_property!(
        /// Age after which backups are deleted.
        backup_expire_interval,
        set_backup_expire_interval,
        keys::BACKUP_EXPIRE_INTERVAL
    );
    text_property!(
        upload_speed_limit,
        set_upload_speed_limit,
        keys::UPLOAD_SPEED_LIMIT
    );
    text_property!(
        download_speed_limit,
        set_download_speed_limit,
        keys::DOWNLOAD_SPEED_LIMIT
    );
    text_property!(
        /// Max size the whole backup set may occupy.
        backup_size_limit,
        set_backup_size_limit,
        keys::BACKUP_SIZE_LIMIT
    );
    text_property!(
        /// Size of each volume in the backup set.
        volume_size,
        set_volume_size,
        keys::VOLUME_SIZE
    );
    text_property!(thread_priority, set_thread_priority, keys::THREAD_PRIORITY);
    flag_property!(async_transfer, set_async_transfer, keys::ASYNC_TRANSFER);
    text_property!(encoded_filters, set_encoded_filters, keys::ENCODED_FILTERS);
    flag_property!(
        /// Run the created or edited backup right away.
        run_immediately,
        set_run_immediately,
        keys::RUN_IMMEDIATELY
    );
    flag_property!(force_full, set_force_full, keys::FORCE_FULL);

    /// Point in time to restore. Defaults to the Unix epoch.
    pub fn restore_time(&self) -> Result<DateTime<Utc>> {
        self.get_item(keys::RESTORE_TIME, DateTime::<Utc>::default())
    }

    pub fn set_restore_time(&mut self, when: DateTime<Utc>) {
        self.set_item(keys::RESTORE_TIME, when);
    }

    text_property!(
        /// Where restored files are placed.
        restore_path,
        set_restore_path,
        keys::RESTORE_PATH
    );
    text_property!(restore_filter, set_restore_filter, keys::RESTORE_FILTER);
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_keys_are_namespaced() {
        let mut store: HashMap<String, SettingValue> = HashMap::new();
        let mut settings = WizardSettings::new(&mut store);
        settings.set_schedule_id(7);
        assert_eq!(store.get("WSW_ScheduleID"), Some(&SettingValue::Integer(7)));
    }

    #[test]
    fn test_find_property_is_case_insensitive() {
        assert_eq!(
            find_property("maxfullbackups"),
            Some(("MaxFullBackups", ValueKind::Integer))
        );
        assert_eq!(find_property("web:port"), Some(("WEB:Port", ValueKind::Integer)));
        assert_eq!(find_property("NoSuchThing"), None);
    }

    #[test]
    fn test_backend_kind_parse_and_display() {
        assert_eq!("FTP".parse::<BackendKind>().unwrap(), BackendKind::Ftp);
        assert_eq!(BackendKind::WebDav.to_string(), "WebDav");
        assert!("gopher".parse::<BackendKind>().is_err());
    }
}
