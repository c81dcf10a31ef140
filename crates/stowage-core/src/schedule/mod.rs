mod backends;
mod service;

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StowageError};

pub use self::backends::{FileBackend, FtpBackend, S3Backend, SshBackend};
pub use self::service::BackendService;

/// A persisted, recurring backup job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    /// Group path the job is filed under.
    #[serde(default)]
    pub path: String,
    /// Next run time.
    #[serde(default = "Utc::now")]
    pub when: DateTime<Utc>,
    /// Repeat interval, e.g. "1D".
    #[serde(default)]
    pub repeat: String,
    /// Interval after which a full backup is forced.
    #[serde(default)]
    pub full_after: String,
    /// Number of full backups to keep.
    #[serde(default)]
    pub keep_full: u32,
    /// Age after which backups expire.
    #[serde(default)]
    pub keep_time: String,
    #[serde(default)]
    pub upload_bandwidth: String,
    #[serde(default)]
    pub download_bandwidth: String,
    #[serde(default)]
    pub max_upload_size: String,
    #[serde(default)]
    pub volume_size: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// One unit of work inside a schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub source_path: String,
    #[serde(default)]
    pub encoded_filter: String,
    #[serde(default)]
    pub encryption_key: String,
    /// Backend service name, e.g. "ftp". Matched case-insensitively.
    #[serde(default)]
    pub service: String,
    /// Backend-specific settings, read and written through the adapters.
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            path: String::new(),
            when: Utc::now(),
            repeat: String::new(),
            full_after: String::new(),
            keep_full: 0,
            keep_time: String::new(),
            upload_bandwidth: String::new(),
            download_bandwidth: String::new(),
            max_upload_size: String::new(),
            volume_size: String::new(),
            tasks: vec![Task::default()],
        }
    }
}

impl Schedule {
    /// The first task, which carries the source and backend of the job.
    pub fn primary_task(&self) -> Result<&Task> {
        self.tasks.first().ok_or(StowageError::NoTasks)
    }

    pub fn primary_task_mut(&mut self) -> Result<&mut Task> {
        self.tasks.first_mut().ok_or(StowageError::NoTasks)
    }

    /// Load a schedule from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let schedule: Schedule = serde_yaml::from_str(&raw).map_err(|e| {
            StowageError::Config(format!("invalid schedule '{}': {e}", path.display()))
        })?;
        Ok(schedule)
    }

    /// Write the schedule to a YAML file, replacing any existing content.
    pub fn save(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }
}

impl Task {
    pub fn backend_service(&self) -> BackendService {
        BackendService::parse(&self.service)
    }

    pub(crate) fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    pub(crate) fn set_option(&mut self, key: &str, value: impl Into<String>) {
        self.options.insert(key.to_string(), value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_task_list_is_an_error() {
        let mut schedule = Schedule {
            tasks: Vec::new(),
            ..Schedule::default()
        };
        assert!(matches!(schedule.primary_task(), Err(StowageError::NoTasks)));
        assert!(matches!(
            schedule.primary_task_mut(),
            Err(StowageError::NoTasks)
        ));
    }

    #[test]
    fn test_load_minimal_yaml_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.yaml");
        std::fs::write(
            &path,
            "name: nightly\ntasks:\n  - source_path: /home\n    service: FTP\n",
        )
        .unwrap();

        let schedule = Schedule::load(&path).unwrap();
        assert_eq!(schedule.name, "nightly");
        assert_eq!(schedule.keep_full, 0);
        assert_eq!(schedule.tasks.len(), 1);
        assert_eq!(schedule.tasks[0].backend_service(), BackendService::Ftp);
    }

    #[test]
    fn test_load_rejects_malformed_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "tasks: [unclosed").unwrap();
        assert!(matches!(Schedule::load(&path), Err(StowageError::Config(_))));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.yaml");
        let mut schedule = Schedule {
            name: "weekly".into(),
            keep_full: 4,
            ..Schedule::default()
        };
        schedule.tasks[0].service = "s3".into();
        schedule.tasks[0].set_option("BucketName", "archive");

        schedule.save(&path).unwrap();
        assert_eq!(Schedule::load(&path).unwrap(), schedule);
    }
}
