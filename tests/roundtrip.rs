//! End-to-end conversions over fixture documents.

use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;

use mdrf::{
    generate_from_object, generate_from_yaml, parse_to_object, parse_to_yaml, Converter,
    ErrorCategory, FileStatus, MdrfError, Options,
};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn load_fixture(name: &str) -> String {
    fs::read_to_string(fixtures_dir().join(name)).unwrap()
}

const HEADER: &str = "# T\n---\nmdrf_version: 3.0\n---\n";

#[test]
fn test_minimal_end_to_end() {
    let doc = parse_to_object(&load_fixture("minimal.mdrf.md")).unwrap();

    assert_eq!(doc.title, "T");
    let group = &doc.groups[0];
    assert_eq!((group.kind.as_str(), group.name_id.as_str()), ("review", "r1"));
    let file = &group.files[0];
    assert_eq!(file.path, "a.txt");
    assert_eq!(file.status, FileStatus::Modified);
    assert_eq!(file.diff, "+x");
    let thread = &file.threads[0];
    assert_eq!(thread.thread_number, 1);
    let comment = &thread.comments[0];
    assert_eq!(comment.username, "alice");
    assert_eq!(comment.timestamp, "2024-01-01T00:00:00Z");
    assert_eq!(comment.body, "hello");

    let regenerated = generate_from_object(&doc, &Options::default()).unwrap();
    assert_eq!(parse_to_object(&regenerated).unwrap(), doc);
}

#[test]
fn test_pull_request_roundtrip() {
    let doc = parse_to_object(&load_fixture("pull-request.mdrf.md")).unwrap();

    assert_eq!(doc.groups.len(), 2);
    assert_eq!(doc.files().count(), 4);
    assert_eq!(doc.comment_count(), 4);

    let regenerated = generate_from_object(&doc, &Options::default()).unwrap();
    assert_eq!(parse_to_object(&regenerated).unwrap(), doc);
}

#[test]
fn test_pull_request_details() {
    let doc = parse_to_object(&load_fixture("pull-request.mdrf.md")).unwrap();

    let cache = &doc.groups[0].files[0];
    assert!(cache.diff.contains("\n\n }"));
    assert_eq!(cache.threads[0].line_number, Some(12));

    let reply = &cache.threads[0].comments[1];
    assert_eq!(reply.reply_to.as_deref(), Some("c1"));
    assert!(reply.body.contains("###### Sweeper notes"));

    let statuses: Vec<FileStatus> = doc.files().map(|f| f.status).collect();
    assert_eq!(
        statuses,
        vec![
            FileStatus::Modified,
            FileStatus::Renamed,
            FileStatus::Removed,
            FileStatus::Moved,
        ]
    );
    assert_eq!(doc.groups[0].files[1].diff, "");
}

#[test]
fn test_generation_is_idempotent() {
    let doc = parse_to_object(&load_fixture("pull-request.mdrf.md")).unwrap();
    let options = Options::default().with_yaml_indent(4);

    let first = generate_from_object(&doc, &options).unwrap();
    let second = generate_from_object(&parse_to_object(&first).unwrap(), &options).unwrap();

    assert_eq!(first, second);
    assert!(first.ends_with("Why was this moved?\n"));
}

#[test]
fn test_auto_numbering_renumbers_per_file() {
    let doc = parse_to_object(&load_fixture("pull-request.mdrf.md")).unwrap();
    let options = Options::default().with_auto_numbering(true);

    let text = generate_from_object(&doc, &options).unwrap();
    let renumbered = parse_to_object(&text).unwrap();

    let cache = &renumbered.groups[0].files[0];
    assert_eq!(cache.threads[0].comments[0].id.as_deref(), Some("1.1"));
    assert_eq!(cache.threads[0].comments[1].id.as_deref(), Some("1.2"));
    assert_eq!(cache.threads[1].comments[0].id.as_deref(), Some("2.1"));

    let moved = &renumbered.groups[1].files[0];
    assert_eq!(moved.threads[0].thread_number, 1);
    assert_eq!(moved.threads[0].comments[0].id.as_deref(), Some("1.1"));
}

#[test]
fn test_generate_from_yaml_fixture() {
    let text = generate_from_yaml(&load_fixture("document.yaml"), &Options::default()).unwrap();
    let doc = parse_to_object(&text).unwrap();

    assert_eq!(doc.title, "Design review");
    let file = &doc.groups[0].files[0];
    assert_eq!(file.status, FileStatus::Added);
    assert_eq!(file.diff.lines().count(), 3);

    let thread = &file.threads[0];
    assert_eq!((thread.thread_number, thread.line_number), (3, Some(3)));
    assert_eq!(thread.comments[1].reply_to.as_deref(), Some("d1"));
}

#[test]
fn test_yaml_roundtrip() {
    let source = load_fixture("pull-request.mdrf.md");
    let yaml = parse_to_yaml(&source).unwrap();
    let text = generate_from_yaml(&yaml, &Options::default()).unwrap();

    assert_eq!(parse_to_object(&text).unwrap(), parse_to_object(&source).unwrap());
}

#[test]
fn test_version_gate() {
    for front_matter in ["author: a", "mdrf_version: 2.0", "mdrf_version: '3.1'"] {
        let source = format!("# T\n---\n{front_matter}\n---\n");
        let err = parse_to_object(&source).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Parse, "{front_matter}");
    }
    assert!(parse_to_object("# T\n---\nmdrf_version: 3\n---\n").is_ok());
}

#[test]
fn test_hierarchy_gate() {
    let cases = [
        ("### a.txt\n", "H3 without a parent H2"),
        ("## r: 1\n#### Thread 1\n", "H4 without a parent H3"),
        (
            "## r: 1\n### a.txt\n**Diff:**\n```diff\n```\n##### a (2024-01-01T00:00:00Z)\nx\n",
            "H5 without a parent H4",
        ),
    ];

    for (body, expected) in cases {
        let err = parse_to_object(&format!("{HEADER}{body}")).unwrap_err();
        assert!(err.to_string().contains(expected), "{err}");
    }
}

#[test]
fn test_timestamp_gate() {
    let thread = "## r: 1\n### a.txt\n**Diff:**\n```diff\n```\n#### Thread 1\n";

    let bad = format!("{HEADER}{thread}##### a (2024-01-01 00:00:00)\nx\n");
    assert_eq!(parse_to_object(&bad).unwrap_err().category(), ErrorCategory::Parse);

    let good = format!("{HEADER}{thread}##### a (2024-01-01T00:00:00Z)\nx\n");
    assert!(parse_to_object(&good).is_ok());
}

#[test]
fn test_diff_marker_required() {
    let err = parse_to_object(&format!("{HEADER}## r: 1\n### a.txt\n```diff\n+x\n```\n")).unwrap_err();

    assert!(err.to_string().contains("**Diff:**"));
    assert_eq!(err.line(), Some(7));
}

#[test]
fn test_error_categories_are_distinct() {
    let parse = parse_to_object("").unwrap_err();
    let decode = generate_from_yaml("title: [", &Options::default()).unwrap_err();
    let validation = generate_from_yaml("title: ''\nfront_matter: {}\ngroups: []\n", &Options::default())
        .unwrap_err();

    assert!(matches!(parse, MdrfError::EmptyInput));
    assert_eq!(decode.category(), ErrorCategory::Decode);
    assert_eq!(validation.category(), ErrorCategory::Validation);
}

#[test]
fn test_converter_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Converter>();

    let converter = Converter::new().with_options(Options::default().with_yaml_indent(3));
    let source = load_fixture("minimal.mdrf.md");

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| converter.parse_to_yaml(&source).unwrap()))
            .collect();
        let outputs: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(outputs.windows(2).all(|pair| pair[0] == pair[1]));
    });
}
