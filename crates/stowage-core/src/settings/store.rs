use std::collections::{BTreeMap, HashMap};

use super::value::{FromSetting, SettingValue};
use super::wizard::KEY_PREFIX;
use crate::error::{Result, StowageError};

/// A mutable string-keyed map of loosely typed values, owned by the caller.
///
/// The wizard facade only ever reads, writes and removes single entries, and
/// lists keys when it needs to clear its own namespace.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<&SettingValue>;
    fn set(&mut self, key: String, value: SettingValue);
    fn remove(&mut self, key: &str) -> Option<SettingValue>;
    fn keys(&self) -> Vec<String>;
}

impl SettingsStore for HashMap<String, SettingValue> {
    fn get(&self, key: &str) -> Option<&SettingValue> {
        HashMap::get(self, key)
    }

    fn set(&mut self, key: String, value: SettingValue) {
        self.insert(key, value);
    }

    fn remove(&mut self, key: &str) -> Option<SettingValue> {
        HashMap::remove(self, key)
    }

    fn keys(&self) -> Vec<String> {
        HashMap::keys(self).cloned().collect()
    }
}

impl SettingsStore for BTreeMap<String, SettingValue> {
    fn get(&self, key: &str) -> Option<&SettingValue> {
        BTreeMap::get(self, key)
    }

    fn set(&mut self, key: String, value: SettingValue) {
        self.insert(key, value);
    }

    fn remove(&mut self, key: &str) -> Option<SettingValue> {
        BTreeMap::remove(self, key)
    }

    fn keys(&self) -> Vec<String> {
        BTreeMap::keys(self).cloned().collect()
    }
}

/// Read a namespaced entry as `T`, or `default` when the key is absent.
pub(crate) fn read_item<T: FromSetting>(
    store: &dyn SettingsStore,
    key: &str,
    default: T,
) -> Result<T> {
    let full = format!("{KEY_PREFIX}{key}");
    match store.get(&full) {
        None => Ok(default),
        Some(value) => T::from_setting(value).ok_or_else(|| StowageError::TypeMismatch {
            key: full,
            expected: T::KIND.as_str(),
            found: value.kind().as_str(),
        }),
    }
}

pub(crate) fn write_item(store: &mut dyn SettingsStore, key: &str, value: SettingValue) {
    store.set(format!("{KEY_PREFIX}{key}"), value);
}
