use std::fmt;

use crate::settings::BackendKind;

/// Backend service named by a task, parsed at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BackendService {
    File,
    Ftp,
    Ssh,
    S3,
    WebDav,
    /// Any other service name, kept verbatim.
    Unrecognized(String),
}

impl BackendService {
    /// Case-insensitive match against the known service names.
    pub fn parse(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "file" => BackendService::File,
            "ftp" => BackendService::Ftp,
            "ssh" => BackendService::Ssh,
            "s3" => BackendService::S3,
            "webdav" => BackendService::WebDav,
            _ => BackendService::Unrecognized(name.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BackendService::File => "file",
            BackendService::Ftp => "ftp",
            BackendService::Ssh => "ssh",
            BackendService::S3 => "s3",
            BackendService::WebDav => "webdav",
            BackendService::Unrecognized(name) => name,
        }
    }

    /// The wizard backend this service selects, if any.
    pub fn kind(&self) -> Option<BackendKind> {
        match self {
            BackendService::File => Some(BackendKind::File),
            BackendService::Ftp => Some(BackendKind::Ftp),
            BackendService::Ssh => Some(BackendKind::Ssh),
            BackendService::S3 => Some(BackendKind::S3),
            BackendService::WebDav => Some(BackendKind::WebDav),
            BackendService::Unrecognized(_) => None,
        }
    }
}

impl fmt::Display for BackendService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
