//! Per-backend projections of the wizard store.
//!
//! Each view is a fresh borrow of the facade's store; nothing is cached. The
//! shared fields live on [`BackendView`] and the host/port pair on
//! [`WebView`], so a view picks up exactly the fields its backend has.

use super::store::{read_item, write_item, SettingsStore};
use super::value::{FromSetting, SettingValue};
use super::wizard::keys;
use crate::error::Result;

fn read<T: FromSetting>(store: &dyn SettingsStore, key: &str, default: T) -> Result<T> {
    read_item(store, key, default)
}

fn write(store: &mut dyn SettingsStore, key: &str, value: impl Into<SettingValue>) {
    write_item(store, key, value.into());
}

/// Credentials and remote path, common to every backend.
pub trait BackendView {
    fn store(&self) -> &dyn SettingsStore;
    fn store_mut(&mut self) -> &mut dyn SettingsStore;

    /// Username used to authenticate towards the remote path.
    fn username(&self) -> Result<String> {
        read(self.store(), keys::BACKEND_USERNAME, String::new())
    }

    fn set_username(&mut self, value: &str) {
        write(self.store_mut(), keys::BACKEND_USERNAME, value);
    }

    fn password(&self) -> Result<String> {
        read(self.store(), keys::BACKEND_PASSWORD, String::new())
    }

    fn set_password(&mut self, value: &str) {
        write(self.store_mut(), keys::BACKEND_PASSWORD, value);
    }

    /// Path on the remote side.
    fn path(&self) -> Result<String> {
        read(self.store(), keys::BACKEND_PATH, String::new())
    }

    fn set_path(&mut self, value: &str) {
        write(self.store_mut(), keys::BACKEND_PATH, value);
    }
}

/// Backends reached over the network by host and port.
pub trait WebView: BackendView {
    const DEFAULT_PORT: u16;

    fn server(&self) -> Result<String> {
        read(self.store(), keys::WEB_SERVER, String::new())
    }

    fn set_server(&mut self, value: &str) {
        write(self.store_mut(), keys::WEB_SERVER, value);
    }

    fn port(&self) -> Result<u16> {
        read(self.store(), keys::WEB_PORT, Self::DEFAULT_PORT)
    }

    fn set_port(&mut self, value: u16) {
        write(self.store_mut(), keys::WEB_PORT, value);
    }
}

macro_rules! backend_view {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        pub struct $name<'s> {
            store: &'s mut dyn SettingsStore,
        }

        impl<'s> $name<'s> {
            pub fn new(store: &'s mut dyn SettingsStore) -> Self {
                Self { store }
            }
        }

        impl BackendView for $name<'_> {
            fn store(&self) -> &dyn SettingsStore {
                &*self.store
            }

            fn store_mut(&mut self) -> &mut dyn SettingsStore {
                &mut *self.store
            }
        }
    };
}

backend_view!(
    /// Local or network-share folder target.
    FileSettings
);
backend_view!(FtpSettings);
backend_view!(SshSettings);
backend_view!(
    /// Amazon S3. The path holds `bucket[/prefix]`.
    S3Settings
);

impl WebView for FtpSettings<'_> {
    const DEFAULT_PORT: u16 = 21;
}

impl WebView for SshSettings<'_> {
    const DEFAULT_PORT: u16 = 22;
}

impl SshSettings<'_> {
    /// Whether the connection authenticates with keys instead of a password.
    pub fn passwordless(&self) -> Result<bool> {
        read(self.store(), keys::SSH_PASSWORDLESS, false)
    }

    pub fn set_passwordless(&mut self, value: bool) {
        write(self.store_mut(), keys::SSH_PASSWORDLESS, value);
    }
}

impl S3Settings<'_> {
    pub fn use_euro_server(&self) -> Result<bool> {
        read(self.store(), keys::S3_USE_EURO_SERVER, false)
    }

    pub fn set_use_euro_server(&mut self, value: bool) {
        write(self.store_mut(), keys::S3_USE_EURO_SERVER, value);
    }

    /// Whether buckets are addressed as subdomains.
    pub fn use_sub_domains(&self) -> Result<bool> {
        read(self.store(), keys::S3_USE_SUB_DOMAINS, false)
    }

    pub fn set_use_sub_domains(&mut self, value: bool) {
        write(self.store_mut(), keys::S3_USE_SUB_DOMAINS, value);
    }

    /// Split the path into bucket and prefix at the first `/`.
    pub fn bucket_and_prefix(&self) -> Result<(String, String)> {
        let path = self.path()?;
        Ok(match path.split_once('/') {
            Some((bucket, prefix)) => (bucket.to_string(), prefix.to_string()),
            None => (path, String::new()),
        })
    }
}
