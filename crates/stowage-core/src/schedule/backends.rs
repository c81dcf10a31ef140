//! Typed adapters over a task's backend option map.
//!
//! Attaching an adapter stamps the task with the adapter's service name, so
//! writing fields through one also selects that backend for the task.

use super::service::BackendService;
use super::Task;

fn read_port(task: &Task, default: u16) -> u16 {
    match task.option("Port") {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(port = raw, default, "ignoring unparsable port option");
            default
        }),
    }
}

fn read_flag(task: &Task, key: &str) -> bool {
    task.option(key)
        .is_some_and(|raw| raw.trim().eq_ignore_ascii_case("true"))
}

fn read_text(task: &Task, key: &str) -> String {
    task.option(key).unwrap_or_default().to_string()
}

macro_rules! text_field {
    ($get:ident, $set:ident, $key:literal) => {
        pub fn $get(&self) -> String {
            read_text(self.task, $key)
        }

        pub fn $set(&mut self, value: &str) {
            self.task.set_option($key, value);
        }
    };
}

macro_rules! flag_field {
    ($get:ident, $set:ident, $key:literal) => {
        pub fn $get(&self) -> bool {
            read_flag(self.task, $key)
        }

        pub fn $set(&mut self, value: bool) {
            self.task.set_option($key, value.to_string());
        }
    };
}

macro_rules! port_field {
    ($default:expr) => {
        pub fn port(&self) -> u16 {
            read_port(self.task, $default)
        }

        pub fn set_port(&mut self, value: u16) {
            self.task.set_option("Port", value.to_string());
        }
    };
}

macro_rules! adapter {
    ($(#[$doc:meta])* $name:ident, $service:expr) => {
        $(#[$doc])*
        pub struct $name<'t> {
            task: &'t mut Task,
        }

        impl<'t> $name<'t> {
            pub fn new(task: &'t mut Task) -> Self {
                task.service = $service.as_str().to_string();
                Self { task }
            }
        }
    };
}

adapter!(
    /// Folder on a local or mounted file system.
    FileBackend,
    BackendService::File
);
adapter!(FtpBackend, BackendService::Ftp);
adapter!(SshBackend, BackendService::Ssh);
adapter!(
    /// Amazon S3 bucket, optionally with a key prefix.
    S3Backend,
    BackendService::S3
);

impl FileBackend<'_> {
    text_field!(username, set_username, "Username");
    text_field!(password, set_password, "Password");
    text_field!(destination_folder, set_destination_folder, "DestinationFolder");
}

impl FtpBackend<'_> {
    pub const DEFAULT_PORT: u16 = 21;

    text_field!(username, set_username, "Username");
    text_field!(password, set_password, "Password");
    text_field!(host, set_host, "Host");
    text_field!(folder, set_folder, "Folder");
    port_field!(Self::DEFAULT_PORT);
}

impl SshBackend<'_> {
    pub const DEFAULT_PORT: u16 = 22;

    text_field!(username, set_username, "Username");
    text_field!(password, set_password, "Password");
    text_field!(host, set_host, "Host");
    text_field!(folder, set_folder, "Folder");
    port_field!(Self::DEFAULT_PORT);
    flag_field!(passwordless, set_passwordless, "Passwordless");
}

impl S3Backend<'_> {
    text_field!(access_id, set_access_id, "AccessID");
    text_field!(access_key, set_access_key, "AccessKey");
    text_field!(bucket_name, set_bucket_name, "BucketName");
    text_field!(prefix, set_prefix, "Prefix");
    flag_field!(use_euro_bucket, set_use_euro_bucket, "UseEuroBucket");
    flag_field!(
        use_subdomain_strategy,
        set_use_subdomain_strategy,
        "UseSubdomainStrategy"
    );
}
