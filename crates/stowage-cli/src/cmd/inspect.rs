use std::collections::BTreeMap;
use std::path::Path;

use chrono::SecondsFormat;
use comfy_table::Table;
use stowage_core::config::StowageConfig;
use stowage_core::schedule::Schedule;
use stowage_core::settings::{
    BackendKind, BackendView, SettingValue, TransferLimits, WebView, WizardSettings,
};
use stowage_core::size::format_size;

use crate::table::{add_kv_row, CliTableTheme};

pub(crate) fn run_inspect(
    cfg: &StowageConfig,
    schedule_path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let schedule = Schedule::load(Path::new(schedule_path))?;

    let mut store: BTreeMap<String, SettingValue> = BTreeMap::new();
    let mut settings = WizardSettings::new(&mut store);
    settings.reflect_schedule(&schedule)?;

    let theme = CliTableTheme::detect();
    let mut table = theme.new_kv_table();

    add_kv_row(&mut table, theme, "Schedule", settings.schedule_id()?);
    add_kv_row(&mut table, theme, "Name", settings.schedule_name()?);
    add_kv_row(&mut table, theme, "Group", settings.schedule_path()?);
    add_kv_row(&mut table, theme, "Source", settings.source_path()?);
    add_kv_row(&mut table, theme, "Filter", settings.encoded_filters()?);
    add_kv_row(
        &mut table,
        theme,
        "Encrypted",
        if settings.backup_password()?.is_empty() {
            "no"
        } else {
            "yes"
        },
    );
    add_kv_row(
        &mut table,
        theme,
        "Next run",
        settings
            .backup_time_offset()?
            .to_rfc3339_opts(SecondsFormat::Secs, true),
    );
    add_kv_row(&mut table, theme, "Repeat", settings.repeat_interval()?);
    add_kv_row(&mut table, theme, "Full every", settings.full_backup_interval()?);
    add_kv_row(&mut table, theme, "Keep full", settings.max_full_backups()?);
    add_kv_row(&mut table, theme, "Expire after", settings.backup_expire_interval()?);

    let backend = settings.backend()?;
    add_kv_row(&mut table, theme, "Backend", backend);
    add_backend_rows(&mut table, theme, &mut settings, backend)?;

    let limits = TransferLimits::from_settings(&settings, &cfg.units)?;
    add_kv_row(&mut table, theme, "Upload limit", describe_limit(limits.upload_speed, "/s"));
    add_kv_row(
        &mut table,
        theme,
        "Download limit",
        describe_limit(limits.download_speed, "/s"),
    );
    add_kv_row(&mut table, theme, "Max set size", describe_limit(limits.backup_size, ""));
    add_kv_row(&mut table, theme, "Volume size", describe_limit(limits.volume_size, ""));

    println!("{table}");
    Ok(())
}

fn add_backend_rows(
    table: &mut Table,
    theme: CliTableTheme,
    settings: &mut WizardSettings<'_>,
    backend: BackendKind,
) -> Result<(), Box<dyn std::error::Error>> {
    match backend {
        BackendKind::File => {
            let view = settings.file_settings();
            add_kv_row(table, theme, "  Folder", view.path()?);
            add_kv_row(table, theme, "  Username", view.username()?);
        }
        BackendKind::Ftp => {
            let view = settings.ftp_settings();
            add_kv_row(table, theme, "  Server", format!("{}:{}", view.server()?, view.port()?));
            add_kv_row(table, theme, "  Folder", view.path()?);
            add_kv_row(table, theme, "  Username", view.username()?);
        }
        BackendKind::Ssh => {
            let view = settings.ssh_settings();
            add_kv_row(table, theme, "  Server", format!("{}:{}", view.server()?, view.port()?));
            add_kv_row(table, theme, "  Folder", view.path()?);
            add_kv_row(table, theme, "  Username", view.username()?);
            add_kv_row(table, theme, "  Passwordless", view.passwordless()?);
        }
        BackendKind::S3 => {
            let view = settings.s3_settings();
            let (bucket, prefix) = view.bucket_and_prefix()?;
            add_kv_row(table, theme, "  Bucket", bucket);
            add_kv_row(table, theme, "  Prefix", prefix);
            add_kv_row(table, theme, "  Access ID", view.username()?);
            add_kv_row(table, theme, "  EU bucket", view.use_euro_server()?);
            add_kv_row(table, theme, "  Subdomains", view.use_sub_domains()?);
        }
        BackendKind::WebDav | BackendKind::Unknown => {}
    }
    Ok(())
}

fn describe_limit(bytes: Option<i64>, per: &str) -> String {
    match bytes {
        Some(b) => format!("{}{per}", format_size(b)),
        None => "unlimited".to_string(),
    }
}
