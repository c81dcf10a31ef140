use super::backend::{BackendView, WebView};
use super::wizard::{BackendKind, WizardSettings};
use crate::error::Result;
use crate::schedule::{BackendService, FileBackend, FtpBackend, S3Backend, Schedule, SshBackend};

impl WizardSettings<'_> {
    /// Clear the session and load every property from `schedule`.
    ///
    /// The primary action survives the clear: it describes what the wizard is
    /// doing, not the job being edited.
    pub fn reflect_schedule(&mut self, schedule: &Schedule) -> Result<()> {
        let task = schedule.primary_task()?;
        let action = self.primary_action()?;
        self.clear();

        self.set_schedule_id(schedule.id);
        self.set_schedule_name(schedule.name.as_str());
        self.set_schedule_path(schedule.path.as_str());
        self.set_source_path(task.source_path.as_str());
        self.set_source_filter(task.encoded_filter.as_str());
        self.set_backup_password(task.encryption_key.as_str());

        // Adapters stamp the service name they are attached to, so read from
        // a copy of the task rather than the caller's schedule.
        let mut task_copy = task.clone();
        let service = task.backend_service();
        match &service {
            BackendService::File => {
                let file = FileBackend::new(&mut task_copy);
                let mut view = self.file_settings();
                view.set_username(&file.username());
                view.set_password(&file.password());
                view.set_path(&file.destination_folder());
            }
            BackendService::Ftp => {
                let ftp = FtpBackend::new(&mut task_copy);
                let mut view = self.ftp_settings();
                view.set_username(&ftp.username());
                view.set_password(&ftp.password());
                view.set_path(&ftp.folder());
                view.set_server(&ftp.host());
                view.set_port(ftp.port());
            }
            BackendService::Ssh => {
                let ssh = SshBackend::new(&mut task_copy);
                let mut view = self.ssh_settings();
                view.set_username(&ssh.username());
                view.set_password(&ssh.password());
                view.set_path(&ssh.folder());
                view.set_server(&ssh.host());
                view.set_port(ssh.port());
                view.set_passwordless(ssh.passwordless());
            }
            BackendService::S3 => {
                let s3 = S3Backend::new(&mut task_copy);
                let mut view = self.s3_settings();
                view.set_username(&s3.access_id());
                view.set_password(&s3.access_key());
                view.set_use_euro_server(s3.use_euro_bucket());
                view.set_use_sub_domains(s3.use_subdomain_strategy());
                let prefix = s3.prefix();
                if prefix.is_empty() {
                    view.set_path(&s3.bucket_name());
                } else {
                    view.set_path(&format!("{}/{prefix}", s3.bucket_name()));
                }
            }
            BackendService::WebDav => {}
            BackendService::Unrecognized(name) => {
                tracing::warn!(service = %name, "unrecognized backend service, leaving backend unset");
            }
        }
        if let Some(kind) = service.kind() {
            self.set_backend(kind);
        }

        self.set_backup_time_offset(schedule.when);
        self.set_repeat_interval(schedule.repeat.as_str());
        self.set_full_backup_interval(schedule.full_after.as_str());
        self.set_max_full_backups(schedule.keep_full);
        self.set_backup_expire_interval(schedule.keep_time.as_str());
        self.set_upload_speed_limit(schedule.upload_bandwidth.as_str());
        self.set_download_speed_limit(schedule.download_bandwidth.as_str());
        self.set_backup_size_limit(schedule.max_upload_size.as_str());
        self.set_volume_size(schedule.volume_size.as_str());
        self.set_encoded_filters(task.encoded_filter.as_str());

        self.set_primary_action(action);

        tracing::debug!(
            schedule = schedule.id,
            name = %schedule.name,
            service = %service,
            "reflected schedule into wizard settings"
        );
        Ok(())
    }

    /// Write every property back onto `schedule` and its first task.
    ///
    /// Backend fields are copied for the selected backend kind only. WebDav
    /// switches the task's service but has no fields, and an unset kind
    /// leaves the task's backend untouched.
    pub fn update_schedule(&mut self, schedule: &mut Schedule) -> Result<()> {
        let kind = self.backend()?;
        let encoded_filters = self.encoded_filters()?;
        let source_filter = self.source_filter()?;

        schedule.name = self.schedule_name()?;
        schedule.path = self.schedule_path()?;

        let task = schedule.primary_task_mut()?;
        task.source_path = self.source_path()?;
        // Both properties are loaded from the same field, so whichever one
        // moved away from the task's filter carries the edit.
        if !encoded_filters.is_empty() && encoded_filters != task.encoded_filter {
            task.encoded_filter = encoded_filters;
        } else if source_filter != task.encoded_filter {
            task.encoded_filter = source_filter;
        }
        task.encryption_key = self.backup_password()?;

        match kind {
            BackendKind::File => {
                let view = self.file_settings();
                let mut file = FileBackend::new(task);
                file.set_username(&view.username()?);
                file.set_password(&view.password()?);
                file.set_destination_folder(&view.path()?);
            }
            BackendKind::Ftp => {
                let view = self.ftp_settings();
                let mut ftp = FtpBackend::new(task);
                ftp.set_username(&view.username()?);
                ftp.set_password(&view.password()?);
                ftp.set_folder(&view.path()?);
                ftp.set_host(&view.server()?);
                ftp.set_port(view.port()?);
            }
            BackendKind::Ssh => {
                let view = self.ssh_settings();
                let mut ssh = SshBackend::new(task);
                ssh.set_username(&view.username()?);
                ssh.set_password(&view.password()?);
                ssh.set_folder(&view.path()?);
                ssh.set_host(&view.server()?);
                ssh.set_port(view.port()?);
                ssh.set_passwordless(view.passwordless()?);
            }
            BackendKind::S3 => {
                let view = self.s3_settings();
                let (bucket, prefix) = view.bucket_and_prefix()?;
                let mut s3 = S3Backend::new(task);
                s3.set_access_id(&view.username()?);
                s3.set_access_key(&view.password()?);
                s3.set_use_euro_bucket(view.use_euro_server()?);
                s3.set_use_subdomain_strategy(view.use_sub_domains()?);
                s3.set_bucket_name(&bucket);
                s3.set_prefix(&prefix);
            }
            BackendKind::WebDav => {
                task.service = BackendService::WebDav.as_str().to_string();
                tracing::debug!(backend = %kind, "no backend fields to write");
            }
            BackendKind::Unknown => {
                tracing::debug!(backend = %kind, "no backend selected");
            }
        }

        schedule.when = self.backup_time_offset()?;
        schedule.repeat = self.repeat_interval()?;
        schedule.full_after = self.full_backup_interval()?;
        schedule.keep_full = self.max_full_backups()?;
        schedule.keep_time = self.backup_expire_interval()?;
        schedule.upload_bandwidth = self.upload_speed_limit()?;
        schedule.download_bandwidth = self.download_speed_limit()?;
        schedule.max_upload_size = self.backup_size_limit()?;
        schedule.volume_size = self.volume_size()?;

        tracing::debug!(
            schedule = schedule.id,
            backend = %kind,
            "updated schedule from wizard settings"
        );
        Ok(())
    }
}
