use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, TimeZone, Utc};

use crate::error::StowageError;
use crate::settings::{
    BackendKind, BackendView, PrimaryAction, SettingValue, WebView, WizardSettings, PROPERTIES,
};

#[test]
fn empty_store_yields_defaults() {
    let mut store: HashMap<String, SettingValue> = HashMap::new();
    let mut settings = WizardSettings::new(&mut store);

    assert_eq!(settings.primary_action().unwrap(), PrimaryAction::Unknown);
    assert_eq!(settings.schedule_id().unwrap(), 0);
    assert_eq!(settings.schedule_name().unwrap(), "");
    assert_eq!(settings.schedule_path().unwrap(), "");
    assert_eq!(settings.source_path().unwrap(), "");
    assert_eq!(settings.source_filter().unwrap(), "");
    assert_eq!(settings.backup_password().unwrap(), "");
    assert_eq!(settings.backend().unwrap(), BackendKind::Unknown);
    assert_eq!(settings.repeat_interval().unwrap(), "");
    assert_eq!(settings.full_backup_interval().unwrap(), "");
    assert_eq!(settings.max_full_backups().unwrap(), 0);
    assert_eq!(settings.backup_expire_interval().unwrap(), "");
    assert_eq!(settings.upload_speed_limit().unwrap(), "");
    assert_eq!(settings.download_speed_limit().unwrap(), "");
    assert_eq!(settings.backup_size_limit().unwrap(), "");
    assert_eq!(settings.volume_size().unwrap(), "");
    assert_eq!(settings.thread_priority().unwrap(), "");
    assert!(!settings.async_transfer().unwrap());
    assert_eq!(settings.encoded_filters().unwrap(), "");
    assert!(!settings.run_immediately().unwrap());
    assert!(!settings.force_full().unwrap());
    assert_eq!(
        settings.restore_time().unwrap(),
        DateTime::<Utc>::from_timestamp(0, 0).unwrap()
    );
    assert_eq!(settings.restore_path().unwrap(), "");
    assert_eq!(settings.restore_filter().unwrap(), "");

    assert_eq!(settings.file_settings().username().unwrap(), "");
    assert_eq!(settings.ftp_settings().port().unwrap(), 21);
    assert_eq!(settings.ssh_settings().port().unwrap(), 22);
    assert!(!settings.ssh_settings().passwordless().unwrap());
    assert!(!settings.s3_settings().use_euro_server().unwrap());
    assert!(!settings.s3_settings().use_sub_domains().unwrap());

    drop(settings);
    assert!(store.is_empty(), "reads must not populate the store");
}

#[test]
fn next_run_defaults_to_now() {
    let mut store: HashMap<String, SettingValue> = HashMap::new();
    let settings = WizardSettings::new(&mut store);
    let before = Utc::now();
    let offset = settings.backup_time_offset().unwrap();
    assert!(offset >= before);
    assert!(offset <= Utc::now());
}

#[test]
fn set_then_get_leaves_other_properties_alone() {
    let mut store: HashMap<String, SettingValue> = HashMap::new();
    let mut settings = WizardSettings::new(&mut store);

    settings.set_schedule_name("Photos");
    settings.set_max_full_backups(3);
    settings.set_backend(BackendKind::Ssh);
    settings.set_run_immediately(true);
    settings.ssh_settings().set_port(2222);

    assert_eq!(settings.schedule_name().unwrap(), "Photos");
    assert_eq!(settings.max_full_backups().unwrap(), 3);
    assert_eq!(settings.backend().unwrap(), BackendKind::Ssh);
    assert!(settings.run_immediately().unwrap());
    assert_eq!(settings.ssh_settings().port().unwrap(), 2222);

    assert_eq!(settings.schedule_path().unwrap(), "");
    assert!(!settings.force_full().unwrap());
    assert_eq!(settings.primary_action().unwrap(), PrimaryAction::Unknown);

    settings.set_schedule_name("Music");
    assert_eq!(settings.schedule_name().unwrap(), "Music");
    assert_eq!(settings.max_full_backups().unwrap(), 3);
}

#[test]
fn ftp_and_ssh_views_share_host_keys() {
    let mut store: BTreeMap<String, SettingValue> = BTreeMap::new();
    let mut settings = WizardSettings::new(&mut store);
    settings.ftp_settings().set_server("ftp.example.org");
    assert_eq!(settings.ssh_settings().server().unwrap(), "ftp.example.org");
}

#[test]
fn type_mismatch_fails_loudly() {
    let mut store: HashMap<String, SettingValue> = HashMap::new();
    store.insert("WSW_MaxFullBackups".into(), SettingValue::Text("four".into()));
    let settings = WizardSettings::new(&mut store);

    match settings.max_full_backups() {
        Err(StowageError::TypeMismatch {
            key,
            expected,
            found,
        }) => {
            assert_eq!(key, "WSW_MaxFullBackups");
            assert_eq!(expected, "integer");
            assert_eq!(found, "text");
        }
        other => panic!("expected TypeMismatch, got {other:?}"),
    }
}

#[test]
fn clear_keeps_foreign_keys() {
    let mut store: HashMap<String, SettingValue> = HashMap::new();
    store.insert("window.width".into(), SettingValue::Integer(800));
    let mut settings = WizardSettings::new(&mut store);
    settings.set_schedule_name("Photos");
    settings.s3_settings().set_use_euro_server(true);

    settings.clear();
    assert_eq!(settings.schedule_name().unwrap(), "");
    assert!(!settings.s3_settings().use_euro_server().unwrap());

    drop(settings);
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("window.width"), Some(&SettingValue::Integer(800)));
}

#[test]
fn assign_parses_by_declared_kind() {
    let mut store: HashMap<String, SettingValue> = HashMap::new();
    let mut settings = WizardSettings::new(&mut store);

    settings.assign("ScheduleName", "Taxes").unwrap();
    settings.assign("maxfullbackups", "5").unwrap();
    settings.assign("Backend", "s3").unwrap();
    settings.assign("S3:UseSubDomains", "true").unwrap();
    settings.assign("WEB:Port", "2121").unwrap();
    settings
        .assign("RestoreTime", "2024-01-02T03:04:05Z")
        .unwrap();

    assert_eq!(settings.schedule_name().unwrap(), "Taxes");
    assert_eq!(settings.max_full_backups().unwrap(), 5);
    assert_eq!(settings.backend().unwrap(), BackendKind::S3);
    assert!(settings.s3_settings().use_sub_domains().unwrap());
    assert_eq!(settings.ftp_settings().port().unwrap(), 2121);
    assert_eq!(
        settings.restore_time().unwrap(),
        Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
    );
}

#[test]
fn assign_rejects_unknown_keys_and_bad_values() {
    let mut store: HashMap<String, SettingValue> = HashMap::new();
    let mut settings = WizardSettings::new(&mut store);

    assert!(matches!(
        settings.assign("Colour", "blue"),
        Err(StowageError::UnknownSetting(_))
    ));
    assert!(matches!(
        settings.assign("ForceFull", "sometimes"),
        Err(StowageError::InvalidSettingValue { .. })
    ));
    assert!(matches!(
        settings.assign("Backend", "gopher"),
        Err(StowageError::InvalidSettingValue { .. })
    ));
}

#[test]
fn property_table_has_unique_keys() {
    let mut names: Vec<&str> = PROPERTIES.iter().map(|(name, _)| *name).collect();
    names.sort_unstable();
    let before = names.len();
    names.dedup();
    assert_eq!(before, names.len());
}
