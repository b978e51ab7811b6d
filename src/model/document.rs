//! Review document tree: Document → Group → File → Thread → Comment.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use super::scalar;
use super::status::FileStatus;

/// Format version written to (and required in) every front matter block.
pub const MDRF_VERSION: &str = "3.0";

/// Front matter key holding the format version.
pub const VERSION_KEY: &str = "mdrf_version";

/// A parsed MDRF document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub front_matter: Mapping,
    pub groups: Vec<Group>,
}

/// A top-level review unit (`## <type>: <name_id>`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(rename = "type", deserialize_with = "scalar::string")]
    pub kind: String,
    #[serde(deserialize_with = "scalar::string")]
    pub name_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_metadata: Option<Mapping>,
    pub files: Vec<FileEntry>,
}

/// A reviewed file (`### <path>`) with its diff and threads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: String,
    pub status: FileStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Mapping>,
    /// Raw diff text, kept verbatim.
    pub diff: String,
    pub threads: Vec<Thread>,
}

/// A conversation anchored to a file (`#### Thread <n>`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    /// Zero means "unset"; only valid when generating with auto-numbering.
    #[serde(default, deserialize_with = "scalar::number_or_unset")]
    pub thread_number: u32,
    #[serde(
        default,
        deserialize_with = "scalar::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub line_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_meta: Option<Mapping>,
    pub comments: Vec<Comment>,
}

/// A single comment (`##### [<id>] <username> (<timestamp>)`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(
        default,
        deserialize_with = "scalar::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub username: String,
    pub timestamp: String,
    /// Free-form reference to another comment id; never resolved.
    #[serde(
        default,
        deserialize_with = "scalar::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub reply_to: Option<String>,
    pub body: String,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        let mut front_matter = Mapping::new();
        front_matter.insert(Value::from(VERSION_KEY), Value::from(MDRF_VERSION));
        Self {
            title: title.into(),
            front_matter,
            groups: Vec::new(),
        }
    }

    /// The front matter version value, if any.
    pub fn version(&self) -> Option<&Value> {
        self.front_matter.get(VERSION_KEY)
    }

    /// Iterate over every file in document order.
    pub fn files(&self) -> impl Iterator<Item = &FileEntry> {
        self.groups.iter().flat_map(|g| g.files.iter())
    }

    /// Total number of comments across all threads.
    pub fn comment_count(&self) -> usize {
        self.files()
            .flat_map(|f| f.threads.iter())
            .map(|t| t.comments.len())
            .sum()
    }
}

impl Group {
    pub fn new(kind: impl Into<String>, name_id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name_id: name_id.into(),
            group_metadata: None,
            files: Vec::new(),
        }
    }
}

impl FileEntry {
    pub fn new(path: impl Into<String>, status: FileStatus, diff: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            status,
            old_path: None,
            metadata: None,
            diff: diff.into(),
            threads: Vec::new(),
        }
    }
}

impl Thread {
    pub fn new(thread_number: u32) -> Self {
        Self {
            thread_number,
            line_number: None,
            thread_meta: None,
            comments: Vec::new(),
        }
    }

    pub fn on_line(mut self, line_number: u32) -> Self {
        self.line_number = Some(line_number);
        self
    }
}

impl Comment {
    pub fn new(
        username: impl Into<String>,
        timestamp: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            username: username.into(),
            timestamp: timestamp.into(),
            reply_to: None,
            body: body.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn replying_to(mut self, id: impl Into<String>) -> Self {
        self.reply_to = Some(id.into());
        self
    }
}

/// Whether a front matter version value is accepted.
///
/// The text "3.0" and the number 3 (YAML reads an unquoted `3.0` as a float)
/// both qualify.
pub fn is_supported_version(value: &Value) -> bool {
    match value {
        Value::String(s) => s == MDRF_VERSION,
        Value::Number(n) => n.as_f64() == Some(3.0),
        _ => false,
    }
}
