//! Validation checks for review documents.
//!
//! Each check takes the document and the generation options and returns a
//! `ValidationResult`. Errors describe documents that cannot be generated;
//! warnings describe documents whose text would not parse back to the same
//! tree.

use std::collections::HashSet;

use crate::model::scalar::scalar_to_string;
use crate::model::{
    is_supported_version, Document, FileEntry, FileStatus, MDRF_VERSION, VERSION_KEY,
};
use crate::options::Options;
use crate::parser::headings;

use super::warning::{Diagnostic, ValidationResult};

/// The title must be non-empty.
pub fn check_title(doc: &Document, _options: &Options) -> ValidationResult {
    let mut result = ValidationResult::new();

    if doc.title.trim().is_empty() {
        result.push(
            Diagnostic::error("mdrf::validate::missing-title", "Document title is required")
                .with_help("Set a non-empty title"),
        );
    } else if doc.title.contains('\n') {
        result.push(Diagnostic::warning(
            "mdrf::validate::multiline-title",
            "Document title spans several lines; only the first survives a reparse",
        ));
    }

    result
}

/// Front matter must carry a supported format version.
pub fn check_front_matter(doc: &Document, _options: &Options) -> ValidationResult {
    let mut result = ValidationResult::new();

    if !doc.version().is_some_and(is_supported_version) {
        result.push(
            Diagnostic::error(
                "mdrf::validate::version",
                format!("front_matter.{VERSION_KEY} must be '{MDRF_VERSION}'"),
            )
            .with_help(format!("Add {VERSION_KEY}: \"{MDRF_VERSION}\" to the front matter")),
        );
    }

    result
}

/// Groups need a type and a name id.
pub fn check_groups(doc: &Document, _options: &Options) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (i, group) in doc.groups.iter().enumerate() {
        if group.kind.trim().is_empty() {
            result.push(Diagnostic::error(
                "mdrf::validate::group-type",
                format!("Group {} has an empty type", i + 1),
            ));
        }
        if group.name_id.trim().is_empty() {
            result.push(Diagnostic::error(
                "mdrf::validate::group-name",
                format!("Group {} has an empty name_id", i + 1),
            ));
        }
    }

    result
}

/// File paths, metadata consistency, status recovery, diff fences and
/// `old_path` usage.
pub fn check_files(doc: &Document, _options: &Options) -> ValidationResult {
    let mut result = ValidationResult::new();

    for file in doc.files() {
        if file.path.trim().is_empty() {
            result.push(Diagnostic::error(
                "mdrf::validate::file-path",
                "File has an empty path",
            ));
            continue;
        }

        let has_metadata = file.metadata.as_ref().is_some_and(|m| !m.is_empty());
        if has_metadata && meta_string(file, "file_path").as_deref() != Some(file.path.as_str()) {
            result.push(
                Diagnostic::warning(
                    "mdrf::validate::metadata-path",
                    format!("Metadata file_path of '{}' does not match its path", file.path),
                )
                .with_help(format!("Set metadata.file_path to '{}'", file.path)),
            );
        }

        let reread = reread_status(file);
        if reread != Some(file.status) {
            result.push(
                Diagnostic::warning(
                    "mdrf::validate::change-type",
                    format!(
                        "Status of '{}' is {} but its text form reads back as {}",
                        file.path,
                        file.status,
                        reread.map_or("invalid", |status| status.as_str())
                    ),
                )
                .with_help(format!(
                    "Set metadata.change_type to '{}' and metadata.file_path to '{}'",
                    file.status, file.path
                )),
            );
        }

        if file.diff.lines().any(headings::is_fence_close) {
            result.push(
                Diagnostic::warning(
                    "mdrf::validate::diff-fence",
                    format!("Diff of '{}' contains a bare ``` line that ends the block early", file.path),
                )
                .with_help("Indent or prefix the line; the diff block cannot contain a closing fence"),
            );
        }

        if let Some(old_path) = &file.old_path {
            if !file.status.has_old_path() {
                result.push(Diagnostic::warning(
                    "mdrf::validate::old-path",
                    format!(
                        "'{}' has an old_path but its status is {}",
                        file.path, file.status
                    ),
                ));
            } else if meta_string(file, "old_path").as_deref() != Some(old_path.as_str()) {
                // The text form only carries old_path inside the metadata block.
                result.push(
                    Diagnostic::warning(
                        "mdrf::validate::old-path",
                        format!("old_path of '{}' is not recorded in its metadata", file.path),
                    )
                    .with_help(format!("Set metadata.old_path to '{}'", old_path)),
                );
            }
        }
    }

    result
}

/// Thread numbers must be positive (unless auto-numbered) and distinct.
pub fn check_threads(doc: &Document, options: &Options) -> ValidationResult {
    let mut result = ValidationResult::new();

    if options.auto_numbering {
        return result;
    }

    for file in doc.files() {
        let mut seen = HashSet::new();
        for thread in &file.threads {
            if thread.thread_number < 1 {
                result.push(
                    Diagnostic::error(
                        "mdrf::validate::thread-number",
                        format!("Thread in '{}' has no valid thread_number", file.path),
                    )
                    .with_help("Use a thread_number >= 1 or enable auto-numbering"),
                );
            } else if !seen.insert(thread.thread_number) {
                result.push(Diagnostic::warning(
                    "mdrf::validate::duplicate-thread",
                    format!(
                        "Thread {} appears more than once in '{}'",
                        thread.thread_number, file.path
                    ),
                ));
            }
        }
    }

    result
}

/// Comment fields and bodies.
pub fn check_comments(doc: &Document, options: &Options) -> ValidationResult {
    let mut result = ValidationResult::new();

    for file in doc.files() {
        for (t, thread) in file.threads.iter().enumerate() {
            let mut ids = HashSet::new();
            for (c, comment) in thread.comments.iter().enumerate() {
                let label = comment_label(file, t, c);

                if comment.username.trim().is_empty() {
                    result.push(Diagnostic::error(
                        "mdrf::validate::username",
                        format!("{label} has no username"),
                    ));
                } else if comment.username.contains(|ch: char| ch.is_whitespace() || ch == '(') {
                    result.push(Diagnostic::warning(
                        "mdrf::validate::username",
                        format!("{label} username '{}' cannot be parsed back", comment.username),
                    ));
                }

                if comment.timestamp.trim().is_empty() {
                    result.push(Diagnostic::error(
                        "mdrf::validate::timestamp",
                        format!("{label} has no timestamp"),
                    ));
                } else if !headings::is_iso_timestamp(&comment.timestamp) {
                    result.push(
                        Diagnostic::warning(
                            "mdrf::validate::timestamp",
                            format!("{label} timestamp '{}' is not ISO 8601", comment.timestamp),
                        )
                        .with_help("Use YYYY-MM-DDTHH:MM:SS with Z or a ±HH:MM offset"),
                    );
                }

                if comment.body.trim().is_empty() {
                    result.push(Diagnostic::error(
                        "mdrf::validate::empty-body",
                        format!("{label} has an empty body"),
                    ));
                } else if comment.reply_to.is_none()
                    && comment.body.lines().next().and_then(headings::reply_to).is_some()
                {
                    result.push(
                        Diagnostic::warning(
                            "mdrf::validate::body-reply",
                            format!("{label} body starts with a line that reads as a reply_to directive"),
                        )
                        .with_help("Move the :reply_to[..] line below other text or set reply_to instead"),
                    );
                } else if comment
                    .body
                    .lines()
                    .any(|line| headings::is_body_boundary(line) || headings::is_h1(line))
                {
                    result.push(
                        Diagnostic::warning(
                            "mdrf::validate::body-heading",
                            format!("{label} body contains a line that reads as a heading"),
                        )
                        .with_help("Use ###### or deeper for headings inside comments"),
                    );
                }

                if !options.auto_numbering {
                    if let Some(id) = &comment.id {
                        if !ids.insert(id.as_str()) {
                            result.push(Diagnostic::warning(
                                "mdrf::validate::duplicate-id",
                                format!("{label} reuses comment id '{id}'"),
                            ));
                        }
                    }
                }
            }
        }
    }

    result
}

/// The status a parser would recover for this file, or `None` when the
/// metadata's `change_type` would fail to parse.
fn reread_status(file: &FileEntry) -> Option<FileStatus> {
    match meta_string(file, "change_type").filter(|change| !change.is_empty()) {
        Some(change) => change.parse().ok(),
        None if file.status.heading_marker().is_some() => Some(file.status),
        None => Some(FileStatus::Modified),
    }
}

fn meta_string(file: &FileEntry, key: &str) -> Option<String> {
    file.metadata.as_ref()?.get(key).and_then(scalar_to_string)
}

fn comment_label(file: &FileEntry, thread_index: usize, comment_index: usize) -> String {
    format!(
        "Comment {} of thread {} in '{}'",
        comment_index + 1,
        thread_index + 1,
        file.path
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Comment, FileStatus, Group, Thread};
    use crate::validation::Severity;

    fn doc_with_thread(thread: Thread) -> Document {
        let mut file = FileEntry::new("a.txt", FileStatus::Modified, "+x");
        file.threads.push(thread);
        let mut group = Group::new("review", "r1");
        group.files.push(file);
        let mut doc = Document::new("T");
        doc.groups.push(group);
        doc
    }

    fn codes(result: &ValidationResult, severity: Severity) -> Vec<String> {
        result
            .iter()
            .filter(|d| d.severity == severity)
            .map(|d| d.code.clone())
            .collect()
    }

    #[test]
    fn test_missing_title() {
        let doc = Document::new("  ");
        let result = check_title(&doc, &Options::default());
        assert_eq!(codes(&result, Severity::Error), vec!["mdrf::validate::missing-title"]);
    }

    #[test]
    fn test_wrong_version() {
        let mut doc = Document::new("T");
        doc.front_matter
            .insert(VERSION_KEY.into(), serde_yaml::Value::from("2.0"));

        assert!(check_front_matter(&doc, &Options::default()).has_errors());
    }

    #[test]
    fn test_numeric_version_accepted() {
        let mut doc = Document::new("T");
        doc.front_matter
            .insert(VERSION_KEY.into(), serde_yaml::Value::from(3));

        assert!(check_front_matter(&doc, &Options::default()).is_ok());
    }

    #[test]
    fn test_thread_number_required_without_auto_numbering() {
        let doc = doc_with_thread(Thread::new(0));

        assert!(check_threads(&doc, &Options::default()).has_errors());
        assert!(check_threads(&doc, &Options::default().with_auto_numbering(true)).is_ok());
    }

    #[test]
    fn test_duplicate_thread_numbers_warn() {
        let mut doc = doc_with_thread(Thread::new(1));
        doc.groups[0].files[0].threads.push(Thread::new(1));

        let result = check_threads(&doc, &Options::default());
        assert!(!result.has_errors());
        assert_eq!(codes(&result, Severity::Warning), vec!["mdrf::validate::duplicate-thread"]);
    }

    #[test]
    fn test_comment_errors() {
        let mut thread = Thread::new(1);
        thread.comments.push(Comment::new("", "", " "));
        let doc = doc_with_thread(thread);

        let result = check_comments(&doc, &Options::default());
        assert_eq!(result.error_count(), 3);
    }

    #[test]
    fn test_comment_warnings() {
        let mut thread = Thread::new(1);
        thread
            .comments
            .push(Comment::new("two words", "yesterday", "## looks like a group").with_id("c1"));
        thread
            .comments
            .push(Comment::new("bob", "2024-01-01T00:00:00Z", "fine").with_id("c1"));
        let doc = doc_with_thread(thread);

        let result = check_comments(&doc, &Options::default());
        assert!(!result.has_errors());
        assert_eq!(
            codes(&result, Severity::Warning),
            vec![
                "mdrf::validate::username",
                "mdrf::validate::timestamp",
                "mdrf::validate::body-heading",
                "mdrf::validate::duplicate-id",
            ]
        );
    }

    #[test]
    fn test_metadata_path_mismatch_warns() {
        let mut doc = doc_with_thread(Thread::new(1));
        let mut meta = serde_yaml::Mapping::new();
        meta.insert("file_path".into(), "b.txt".into());
        doc.groups[0].files[0].metadata = Some(meta);
        doc.groups[0].files[0].old_path = Some("z.txt".to_string());

        let result = check_files(&doc, &Options::default());
        assert_eq!(
            codes(&result, Severity::Warning),
            vec!["mdrf::validate::metadata-path", "mdrf::validate::old-path"]
        );
    }

    #[test]
    fn test_old_path_must_live_in_metadata() {
        let mut doc = doc_with_thread(Thread::new(1));
        let file = &mut doc.groups[0].files[0];
        file.status = FileStatus::Renamed;
        file.old_path = Some("z.txt".to_string());
        assert_eq!(check_files(&doc, &Options::default()).warning_count(), 1);

        let mut meta = serde_yaml::Mapping::new();
        meta.insert("file_path".into(), "a.txt".into());
        meta.insert("old_path".into(), "z.txt".into());
        doc.groups[0].files[0].metadata = Some(meta);
        assert!(check_files(&doc, &Options::default()).is_ok());
    }

    #[test]
    fn test_added_status_needs_change_type() {
        let mut doc = doc_with_thread(Thread::new(1));
        doc.groups[0].files[0].status = FileStatus::Added;
        assert_eq!(
            codes(&check_files(&doc, &Options::default()), Severity::Warning),
            vec!["mdrf::validate::change-type"]
        );

        let mut meta = serde_yaml::Mapping::new();
        meta.insert("file_path".into(), "a.txt".into());
        meta.insert("change_type".into(), "Added".into());
        doc.groups[0].files[0].metadata = Some(meta);
        assert!(check_files(&doc, &Options::default()).is_ok());
    }

    #[test]
    fn test_conflicting_change_type_warns() {
        let mut doc = doc_with_thread(Thread::new(1));
        let mut meta = serde_yaml::Mapping::new();
        meta.insert("file_path".into(), "a.txt".into());
        meta.insert("change_type".into(), "removed".into());
        doc.groups[0].files[0].metadata = Some(meta);

        let result = check_files(&doc, &Options::default());
        assert_eq!(codes(&result, Severity::Warning), vec!["mdrf::validate::change-type"]);
        assert!(result.iter().next().unwrap().message.contains("reads back as removed"));
    }

    #[test]
    fn test_diff_with_closing_fence_warns() {
        let mut doc = doc_with_thread(Thread::new(1));
        doc.groups[0].files[0].diff = " before\n```\n after".to_string();
        assert_eq!(
            codes(&check_files(&doc, &Options::default()), Severity::Warning),
            vec!["mdrf::validate::diff-fence"]
        );

        doc.groups[0].files[0].diff = " ```rust\n+ ```".to_string();
        assert!(check_files(&doc, &Options::default()).is_ok());
    }

    #[test]
    fn test_body_starting_with_reply_directive_warns() {
        let mut thread = Thread::new(1);
        thread.comments.push(Comment::new(
            "alice",
            "2024-01-01T00:00:00Z",
            ":reply_to[c9]\nactual text",
        ));
        thread.comments.push(Comment::new(
            "bob",
            "2024-01-01T00:00:00Z",
            "see\n:reply_to[c9]",
        ));
        thread.comments.push(
            Comment::new("carol", "2024-01-01T00:00:00Z", ":reply_to[c9]\nquoted").replying_to("c1"),
        );
        let doc = doc_with_thread(thread);

        let result = check_comments(&doc, &Options::default());
        assert_eq!(codes(&result, Severity::Warning), vec!["mdrf::validate::body-reply"]);
    }

    #[test]
    fn test_empty_group_fields() {
        let mut doc = Document::new("T");
        doc.groups.push(Group::new("", ""));

        assert_eq!(check_groups(&doc, &Options::default()).error_count(), 2);
    }
}
