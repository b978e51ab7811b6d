//! MDRF text generator.
//!
//! The inverse of the parser: walks a validated [`Document`] and writes the
//! heading tree back out. Output always ends with exactly one newline.

use serde_yaml::{Mapping, Value};

use crate::error::{MdrfError, Result};
use crate::model::{Comment, Document, FileEntry, Group, Thread, MDRF_VERSION, VERSION_KEY};
use crate::options::Options;
use crate::validation::validate_document;
use crate::yaml::YamlCodec;

/// Generate MDRF text from a document.
///
/// Validation runs first; the first error-severity diagnostic aborts
/// generation before anything is written.
pub fn generate_document(doc: &Document, options: &Options, codec: &dyn YamlCodec) -> Result<String> {
    let validation = validate_document(doc, options);
    if let Some(error) = validation.first_error() {
        return Err(MdrfError::from(error));
    }
    if validation.has_warnings() {
        log::debug!(
            "generating with {} validation warning(s)",
            validation.warning_count()
        );
    }

    let mut writer = Writer::new(options, codec);
    writer.document(doc)?;

    log::debug!(
        "generated {} group(s), {} comment(s)",
        doc.groups.len(),
        doc.comment_count()
    );

    Ok(writer.finish())
}

/// Accumulates output lines for one generate call.
struct Writer<'a> {
    options: &'a Options,
    codec: &'a dyn YamlCodec,
    lines: Vec<String>,
}

impl<'a> Writer<'a> {
    fn new(options: &'a Options, codec: &'a dyn YamlCodec) -> Self {
        Self {
            options,
            codec,
            lines: Vec::new(),
        }
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn document(&mut self, doc: &Document) -> Result<()> {
        self.push(format!("# {}", doc.title));
        self.push("");

        let mut front_matter = doc.front_matter.clone();
        front_matter.insert(Value::from(VERSION_KEY), Value::from(MDRF_VERSION));

        self.push("---");
        let yaml = self.encode(&Value::Mapping(front_matter))?;
        self.push(yaml);
        self.push("---");

        for group in &doc.groups {
            self.push("");
            self.group(group)?;
        }

        Ok(())
    }

    fn group(&mut self, group: &Group) -> Result<()> {
        self.push(format!("## {}: {}", group.kind, group.name_id));
        self.metadata_block("group_metadata", group.group_metadata.as_ref())?;

        for file in &group.files {
            self.push("");
            self.file(file)?;
        }

        Ok(())
    }

    fn file(&mut self, file: &FileEntry) -> Result<()> {
        match file.status.heading_marker() {
            Some(marker) => self.push(format!("### {} {}", file.path, marker)),
            None => self.push(format!("### {}", file.path)),
        }
        self.metadata_block("metadata", file.metadata.as_ref())?;

        self.push("**Diff:**");
        self.push("```diff");
        self.push(file.diff.as_str());
        self.push("```");

        for (index, thread) in file.threads.iter().enumerate() {
            let number = if self.options.auto_numbering {
                index + 1
            } else {
                thread.thread_number as usize
            };
            self.push("");
            self.thread(thread, number)?;
        }

        Ok(())
    }

    fn thread(&mut self, thread: &Thread, number: usize) -> Result<()> {
        match thread.line_number.filter(|&line| line >= 1) {
            Some(line) => self.push(format!("#### Thread {} on Line {}", number, line)),
            None => self.push(format!("#### Thread {}", number)),
        }
        self.metadata_block("thread_meta", thread.thread_meta.as_ref())?;

        for (index, comment) in thread.comments.iter().enumerate() {
            self.comment(comment, number, index + 1);
        }

        Ok(())
    }

    fn comment(&mut self, comment: &Comment, thread_number: usize, position: usize) {
        let bracket = if self.options.auto_numbering {
            format!("[{}.{}] ", thread_number, position)
        } else {
            comment
                .id
                .as_ref()
                .map(|id| format!("[{}] ", id))
                .unwrap_or_default()
        };
        self.push(format!(
            "##### {}{} ({})",
            bracket, comment.username, comment.timestamp
        ));

        if let Some(reply_to) = &comment.reply_to {
            self.push(format!(":reply_to[{}]", reply_to));
        }
        self.push(comment.body.as_str());
    }

    /// Write a ```` ```yaml ```` block wrapping `meta` under `key`.
    ///
    /// Absent and empty mappings write nothing.
    fn metadata_block(&mut self, key: &str, meta: Option<&Mapping>) -> Result<()> {
        let Some(meta) = meta.filter(|m| !m.is_empty()) else {
            return Ok(());
        };

        let mut wrapper = Mapping::new();
        wrapper.insert(Value::from(key), Value::Mapping(meta.clone()));

        self.push("```yaml");
        let yaml = self.encode(&Value::Mapping(wrapper))?;
        self.push(yaml);
        self.push("```");

        Ok(())
    }

    fn encode(&self, value: &Value) -> Result<String> {
        let mut text = self
            .codec
            .encode(value, self.options.yaml_indent)
            .map_err(|e| MdrfError::Encode { message: e.message })?;
        if text.ends_with('\n') {
            text.pop();
        }
        Ok(text)
    }

    fn finish(self) -> String {
        let mut text = self.lines.join("\n");
        while text.ends_with('\n') {
            text.pop();
        }
        text.push('\n');
        text
    }
}
