//! MDRF text parser.
//!
//! Turns MDRF text into a [`Document`](crate::model::Document). Parsing is a
//! single forward pass over normalized lines; every failure is fatal and
//! carries the line it was detected on.
//!
//! # Document Structure
//!
//! - `# <title>` on the first line
//! - YAML front matter between `---` lines (must include `mdrf_version: 3.0`)
//! - `## <type>: <name_id>` groups, each holding
//!   `### <path>` files with a `**Diff:**` marker and a ```` ```diff ```` block,
//!   `#### Thread <n>` threads and `##### [<id>] <user> (<timestamp>)` comments
//! - optional ```` ```yaml ```` metadata blocks after group, file and thread headings
//!
//! # Usage
//!
//! ```
//! use mdrf::parser::parse_document;
//! use mdrf::yaml::SerdeYamlCodec;
//!
//! let source = "# Notes\n---\nmdrf_version: 3.0\n---\n## review: r1\n";
//! let doc = parse_document(source, &SerdeYamlCodec)?;
//!
//! assert_eq!(doc.groups[0].name_id, "r1");
//! # Ok::<(), mdrf::MdrfError>(())
//! ```

mod document;
mod fence;
mod frontmatter;
pub(crate) mod headings;
mod lines;
mod metadata;

pub use document::parse_document;
pub use lines::normalize_lines;
