//! Line-level patterns of the MDRF grammar.
//!
//! Each matcher inspects a single line and returns the captured parts; the
//! document parser decides what a match (or a miss) means in context.

use std::sync::OnceLock;

use regex::Regex;

macro_rules! static_regex {
    ($name:ident, $pattern:expr) => {
        fn $name() -> &'static Regex {
            static PATTERN: OnceLock<Regex> = OnceLock::new();
            PATTERN.get_or_init(|| Regex::new($pattern).expect("static pattern is a valid regex"))
        }
    };
}

static_regex!(title_re, r"^#\s+(.+)$");
static_regex!(group_re, r"^##\s+([^:]+):\s+(.+)$");
static_regex!(file_re, r"(?i)^###\s+(.+?)(?:\s+\((Renamed|Moved|Removed)\))?$");
static_regex!(thread_re, r"(?i)^####\s+Thread\s+(\d+)(?:\s+on\s+Line\s+(\d+))?$");
static_regex!(comment_re, r"^#####\s+(?:\[([^\]]+)\]\s+)?([^\s(]+)\s+\((.+)\)$");
static_regex!(reply_to_re, r"^:reply_to\[([^\]]+)\]$");
static_regex!(diff_marker_re, r"(?i)^\*\*Diff:\*\*$");
static_regex!(fence_open_re, r"^```(\w*)\s*$");
static_regex!(fence_close_re, r"^```\s*$");
static_regex!(body_boundary_re, r"^#{2,5}\s");
static_regex!(h1_re, r"^#\s");
static_regex!(
    timestamp_re,
    r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d+)?(Z|[+-]\d{2}:\d{2})$"
);

/// `## <type>: <name_id>`, both parts untrimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupHeading<'a> {
    pub kind: &'a str,
    pub name_id: &'a str,
}

/// `### <path> [(Renamed|Moved|Removed)]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeading<'a> {
    pub path: &'a str,
    pub marker: Option<&'a str>,
}

/// `#### Thread <n> [on Line <m>]`, digits not yet range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadHeading<'a> {
    pub number: &'a str,
    pub line: Option<&'a str>,
}

/// `##### [<id>] <username> (<timestamp>)`, timestamp not yet checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentHeading<'a> {
    pub id: Option<&'a str>,
    pub username: &'a str,
    pub timestamp: &'a str,
}

pub fn title(line: &str) -> Option<&str> {
    title_re()
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

pub fn group(line: &str) -> Option<GroupHeading<'_>> {
    let caps = group_re().captures(line)?;
    Some(GroupHeading {
        kind: caps.get(1)?.as_str(),
        name_id: caps.get(2)?.as_str(),
    })
}

pub fn file(line: &str) -> Option<FileHeading<'_>> {
    let caps = file_re().captures(line)?;
    Some(FileHeading {
        path: caps.get(1)?.as_str(),
        marker: caps.get(2).map(|m| m.as_str()),
    })
}

pub fn thread(line: &str) -> Option<ThreadHeading<'_>> {
    let caps = thread_re().captures(line)?;
    Some(ThreadHeading {
        number: caps.get(1)?.as_str(),
        line: caps.get(2).map(|m| m.as_str()),
    })
}

pub fn comment(line: &str) -> Option<CommentHeading<'_>> {
    let caps = comment_re().captures(line)?;
    Some(CommentHeading {
        id: caps.get(1).map(|m| m.as_str()),
        username: caps.get(2)?.as_str(),
        timestamp: caps.get(3)?.as_str(),
    })
}

/// Target id of a `:reply_to[<id>]` directive.
pub fn reply_to(line: &str) -> Option<&str> {
    reply_to_re()
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

pub fn is_diff_marker(line: &str) -> bool {
    diff_marker_re().is_match(line)
}

/// Language tag of a fence opening line (empty when untagged).
pub fn fence_open(line: &str) -> Option<&str> {
    fence_open_re()
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

pub fn is_fence_close(line: &str) -> bool {
    fence_close_re().is_match(line)
}

/// A heading of level 2-5, which ends a comment body.
pub fn is_body_boundary(line: &str) -> bool {
    body_boundary_re().is_match(line)
}

pub fn is_h1(line: &str) -> bool {
    h1_re().is_match(line)
}

/// `YYYY-MM-DDTHH:MM:SS[.fraction](Z|±HH:MM)`
pub fn is_iso_timestamp(s: &str) -> bool {
    timestamp_re().is_match(s)
}
