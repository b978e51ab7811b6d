//! Heading-driven document parser.
//!
//! A document is `# <title>`, front matter, then a flat run of H2-H5 headings
//! that nest Group → File → Thread → Comment. The parser tracks only the
//! depth of the innermost open context: opening a heading closes every deeper
//! context, and new nodes are attached to the last node at each level.

use serde_yaml::Mapping;

use crate::error::Result;
use crate::model::scalar::scalar_to_string;
use crate::model::{Comment, Document, FileEntry, FileStatus, Group, Thread};
use crate::yaml::YamlCodec;

use super::fence::read_fenced_block;
use super::frontmatter::read_front_matter;
use super::headings;
use super::lines::{error_at, normalize_lines, LineCursor};
use super::metadata::read_optional_mapping;

/// Longest excerpt of an unexpected line quoted in an error.
const EXCERPT_CHARS: usize = 50;

/// Innermost open context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
enum Depth {
    #[default]
    Root,
    Group,
    File,
    Thread,
}

/// Groups under construction plus the open depth.
#[derive(Debug, Default)]
struct TreeBuilder {
    groups: Vec<Group>,
    depth: Depth,
}

impl TreeBuilder {
    fn push_group(&mut self, group: Group) {
        self.groups.push(group);
        self.depth = Depth::Group;
    }

    fn current_group(&mut self) -> Option<&mut Group> {
        if self.depth >= Depth::Group {
            self.groups.last_mut()
        } else {
            None
        }
    }

    fn current_file(&mut self) -> Option<&mut FileEntry> {
        if self.depth >= Depth::File {
            self.groups.last_mut()?.files.last_mut()
        } else {
            None
        }
    }

    fn current_thread(&mut self) -> Option<&mut Thread> {
        if self.depth >= Depth::Thread {
            self.current_file()?.threads.last_mut()
        } else {
            None
        }
    }
}

/// Parse MDRF text into a [`Document`].
pub fn parse_document(source: &str, codec: &dyn YamlCodec) -> Result<Document> {
    let lines = normalize_lines(source)?;
    let mut cursor = LineCursor::new(&lines);

    let title = parse_title(&mut cursor)?;
    let front_matter = read_front_matter(&mut cursor, codec)?;

    let mut tree = TreeBuilder::default();

    while let Some(line) = cursor.peek() {
        if line.trim().is_empty() {
            cursor.advance();
            continue;
        }

        if line.starts_with("## ") {
            let group = parse_group(&mut cursor, codec)?;
            log::trace!("group '{}: {}'", group.kind, group.name_id);
            tree.push_group(group);
        } else if line.starts_with("### ") {
            if tree.current_group().is_none() {
                return Err(cursor.error("Found H3 without a parent H2 group"));
            }
            let file = parse_file(&mut cursor, codec)?;
            if let Some(group) = tree.current_group() {
                group.files.push(file);
            }
            tree.depth = Depth::File;
        } else if line.starts_with("#### ") {
            if tree.current_file().is_none() {
                return Err(cursor.error("Found H4 without a parent H3 file"));
            }
            let thread = parse_thread(&mut cursor, codec)?;
            if let Some(file) = tree.current_file() {
                file.threads.push(thread);
            }
            tree.depth = Depth::Thread;
        } else if line.starts_with("##### ") {
            let Some(thread) = tree.current_thread() else {
                return Err(cursor.error("Found H5 without a parent H4 thread"));
            };
            let comment = parse_comment(&mut cursor)?;
            thread.comments.push(comment);
        } else {
            return Err(cursor.error_with_help(
                format!(
                    "Unexpected content. Expected an H2-H5 heading or end of input, but got: \"{}\"",
                    excerpt(line)
                ),
                "Content outside comment bodies must be a heading, metadata or diff block",
            ));
        }
    }

    let document = Document {
        title,
        front_matter,
        groups: tree.groups,
    };
    log::debug!(
        "parsed '{}': {} group(s), {} comment(s)",
        document.title,
        document.groups.len(),
        document.comment_count()
    );
    Ok(document)
}

fn parse_title(cursor: &mut LineCursor<'_>) -> Result<String> {
    let line = cursor.peek().unwrap_or_default();
    let title = headings::title(line)
        .map(str::trim)
        .ok_or_else(|| {
            cursor.error_with_help(
                "File must start with an H1 title ('# <title>')",
                "Put '# <title>' on the first line",
            )
        })?;

    if title.is_empty() {
        return Err(cursor.error("Document title cannot be empty"));
    }

    cursor.advance();
    Ok(title.to_string())
}

fn parse_group(cursor: &mut LineCursor<'_>, codec: &dyn YamlCodec) -> Result<Group> {
    let line = cursor.peek().unwrap_or_default();
    let heading = headings::group(line).ok_or_else(|| {
        cursor.error_with_help(
            format!("Invalid H2 format: \"{line}\""),
            "Groups are written as '## <type>: <name_id>'",
        )
    })?;

    let kind = heading.kind.trim();
    let name_id = heading.name_id.trim();
    if name_id.is_empty() {
        return Err(cursor.error("H2 group name_id cannot be empty"));
    }
    if kind.is_empty() {
        return Err(cursor.error("H2 group type cannot be empty"));
    }
    cursor.advance();

    let mut group = Group::new(kind, name_id);
    group.group_metadata = read_optional_mapping(cursor, codec, "group_metadata")?;
    Ok(group)
}

fn parse_file(cursor: &mut LineCursor<'_>, codec: &dyn YamlCodec) -> Result<FileEntry> {
    let line = cursor.peek().unwrap_or_default();
    let heading = headings::file(line).ok_or_else(|| {
        cursor.error_with_help(
            format!("Invalid H3 format: \"{line}\""),
            "Files are written as '### <path>' with an optional (Renamed), (Moved) or (Removed)",
        )
    })?;

    let path = heading.path.trim();
    if path.is_empty() {
        return Err(cursor.error("H3 file path cannot be empty"));
    }
    let mut status = match heading.marker {
        Some(marker) => marker
            .parse::<FileStatus>()
            .map_err(|e| cursor.error(e.to_string()))?,
        None => FileStatus::Modified,
    };
    cursor.advance();

    let metadata_line = cursor.line_number();
    let metadata = read_optional_mapping(cursor, codec, "metadata")?;
    let mut old_path = None;
    if let Some(meta) = &metadata {
        status = apply_file_metadata(meta, path, status, metadata_line)?;
        if status.has_old_path() {
            old_path = meta.get("old_path").and_then(scalar_to_string);
        }
    }

    match cursor.peek() {
        None => {
            return Err(cursor.error("Unexpected end of input after H3, expected '**Diff:**'"))
        }
        Some(line) if headings::is_diff_marker(line) => cursor.advance(),
        Some(_) => {
            return Err(cursor.error_with_help(
                "Expected '**Diff:**' marker after H3 heading/metadata",
                "Every file section needs a '**Diff:**' line followed by a ```diff block",
            ))
        }
    }

    if cursor.is_eof() {
        return Err(cursor.error("Unexpected end of input after '**Diff:**', expected a ```diff block"));
    }
    let diff = read_fenced_block(cursor, "diff")?;

    let mut file = FileEntry::new(path, status, diff.content);
    file.old_path = old_path;
    file.metadata = metadata;
    Ok(file)
}

/// Check `file_path` against the heading and resolve `change_type`.
fn apply_file_metadata(
    meta: &Mapping,
    path: &str,
    status: FileStatus,
    line: usize,
) -> Result<FileStatus> {
    let file_path = meta
        .get("file_path")
        .and_then(scalar_to_string)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| {
            error_at(
                line,
                "File metadata block must contain 'file_path' key",
                Some(format!("Add file_path: {path}")),
            )
        })?;

    if file_path != path {
        return Err(error_at(
            line,
            format!("File metadata 'file_path' (\"{file_path}\") does not match H3 path (\"{path}\")"),
            None,
        ));
    }

    match meta.get("change_type").and_then(scalar_to_string) {
        Some(change) if !change.is_empty() => change
            .parse::<FileStatus>()
            .map_err(|e| error_at(line, format!("Invalid change_type in file metadata: {e}"), None)),
        _ => Ok(status),
    }
}

fn parse_thread(cursor: &mut LineCursor<'_>, codec: &dyn YamlCodec) -> Result<Thread> {
    let line = cursor.peek().unwrap_or_default();
    let heading = headings::thread(line).ok_or_else(|| {
        cursor.error_with_help(
            format!("Invalid H4 format: \"{line}\""),
            "Threads are written as '#### Thread <n>' or '#### Thread <n> on Line <m>'",
        )
    })?;

    let number = positive(heading.number, "thread number").map_err(|e| cursor.error(e))?;
    let line_number = match heading.line {
        Some(digits) => Some(positive(digits, "line number").map_err(|e| cursor.error(e))?),
        None => None,
    };
    cursor.advance();

    let mut thread = Thread::new(number);
    thread.line_number = line_number;
    thread.thread_meta = read_optional_mapping(cursor, codec, "thread_meta")?;
    Ok(thread)
}

fn parse_comment(cursor: &mut LineCursor<'_>) -> Result<Comment> {
    let line = cursor.peek().unwrap_or_default();
    let heading = headings::comment(line).ok_or_else(|| {
        cursor.error_with_help(
            format!("Invalid H5 format: \"{line}\""),
            "Comments are written as '##### [<id>] <username> (<timestamp>)'",
        )
    })?;

    if !headings::is_iso_timestamp(heading.timestamp) {
        return Err(cursor.error_with_help(
            format!("Invalid ISO 8601 timestamp in H5: \"{}\"", heading.timestamp),
            "Use YYYY-MM-DDTHH:MM:SS with Z or a ±HH:MM offset",
        ));
    }
    cursor.advance();

    let mut comment = Comment::new(heading.username, heading.timestamp, String::new());
    comment.id = heading.id.map(str::to_string);

    if let Some(target) = cursor.peek().and_then(headings::reply_to) {
        comment.reply_to = Some(target.to_string());
        cursor.advance();
    }

    comment.body = parse_comment_body(cursor)?;
    Ok(comment)
}

/// Collect body lines up to the next H2-H5 heading or end of input.
fn parse_comment_body(cursor: &mut LineCursor<'_>) -> Result<String> {
    let mut body_lines = Vec::new();

    while let Some(line) = cursor.peek() {
        if headings::is_body_boundary(line) {
            break;
        }
        if headings::is_h1(line) {
            return Err(cursor.error("H1 (#) heading is not allowed within a comment body"));
        }
        body_lines.push(line);
        cursor.advance();
    }

    let body = body_lines.join("\n").trim().to_string();
    if body.is_empty() {
        return Err(cursor.error("Comment body cannot be empty"));
    }
    Ok(body)
}

/// Parse a digit run as an integer >= 1.
///
/// The heading grammar only admits digits, so a failed parse is an overflow.
fn positive(digits: &str, field: &str) -> std::result::Result<u32, String> {
    match digits.parse::<u32>() {
        Ok(0) => Err(format!("H4 {field} must be an integer >= 1")),
        Ok(n) => Ok(n),
        Err(_) => Err(format!(
            "H4 {field} {digits} is out of range (at most {})",
            u32::MAX
        )),
    }
}

fn excerpt(line: &str) -> String {
    if line.chars().count() > EXCERPT_CHARS {
        let head: String = line.chars().take(EXCERPT_CHARS).collect();
        format!("{head}...")
    } else {
        line.to_string()
    }
}
