use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};

use crate::schedule::{Schedule, Task};

/// A fully populated schedule targeting `service`, with `options` as the
/// task's backend settings.
pub fn sample_schedule(service: &str, options: &[(&str, &str)]) -> Schedule {
    Schedule {
        id: 42,
        name: "Documents".into(),
        path: "work/laptop".into(),
        when: Utc.with_ymd_and_hms(2024, 5, 1, 3, 30, 0).unwrap(),
        repeat: "1D".into(),
        full_after: "1M".into(),
        keep_full: 4,
        keep_time: "6M".into(),
        upload_bandwidth: "500kb".into(),
        download_bandwidth: "2mb".into(),
        max_upload_size: "10gb".into(),
        volume_size: "50mb".into(),
        tasks: vec![Task {
            source_path: "/home/user/Documents".into(),
            encoded_filter: "-*.tmp".into(),
            encryption_key: "hunter2".into(),
            service: service.into(),
            options: options_map(options),
        }],
    }
}

/// An empty schedule with a single blank task, as a caller would create for
/// a new job.
pub fn blank_schedule() -> Schedule {
    Schedule {
        when: Utc.timestamp_opt(0, 0).unwrap(),
        ..Schedule::default()
    }
}

pub fn options_map(options: &[(&str, &str)]) -> BTreeMap<String, String> {
    options
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
