//! File change status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a file changed in the reviewed diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    #[default]
    Modified,
    Added,
    Removed,
    Renamed,
    Moved,
}

impl FileStatus {
    pub const ALL: [FileStatus; 5] = [
        FileStatus::Modified,
        FileStatus::Added,
        FileStatus::Removed,
        FileStatus::Renamed,
        FileStatus::Moved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FileStatus::Modified => "modified",
            FileStatus::Added => "added",
            FileStatus::Removed => "removed",
            FileStatus::Renamed => "renamed",
            FileStatus::Moved => "moved",
        }
    }

    /// Marker appended to a `### <path>` heading, if any.
    ///
    /// Modified and added files carry no marker.
    pub fn heading_marker(&self) -> Option<&'static str> {
        match self {
            FileStatus::Renamed => Some("(Renamed)"),
            FileStatus::Moved => Some("(Moved)"),
            FileStatus::Removed => Some("(Removed)"),
            FileStatus::Modified | FileStatus::Added => None,
        }
    }

    /// Whether an `old_path` is meaningful for this status.
    pub fn has_old_path(&self) -> bool {
        matches!(self, FileStatus::Renamed | FileStatus::Moved)
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a status name is not one of the known statuses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown file status '{0}' (expected one of: modified, added, removed, renamed, moved)")]
pub struct UnknownStatus(pub String);

impl FromStr for FileStatus {
    type Err = UnknownStatus;

    /// Case-insensitive, so heading markers like `Renamed` parse too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        FileStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == lowered)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}
