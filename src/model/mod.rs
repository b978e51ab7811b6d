//! Object model for MDRF documents.
//!
//! The tree mirrors the heading levels of the text format:
//! - `Document` - `# <title>` plus YAML front matter
//! - `Group` - `## <type>: <name_id>`
//! - `FileEntry` - `### <path>` with its diff
//! - `Thread` - `#### Thread <n>`
//! - `Comment` - `##### [<id>] <username> (<timestamp>)`

mod document;
pub mod scalar;
mod status;

pub use document::{
    is_supported_version, Comment, Document, FileEntry, Group, Thread, MDRF_VERSION, VERSION_KEY,
};
pub use status::{FileStatus, UnknownStatus};
