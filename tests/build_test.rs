//! End-to-end builds over scratch source trees.

use std::fs;
use std::path::Path;

use satchel::{BuildOptions, Config, build};

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn demo_config() -> Config {
    Config::from_json(
        r#"{
            "name": "Demo Docs",
            "package": "demo",
            "index": "index.html",
            "selectors": {
                "h1.title": "Guide",
                "h2": {"type": "Function", "regexp": "\\(.*\\)$", "replacement": ""}
            },
            "ignore": ["ABOUT"]
        }"#,
    )
    .unwrap()
}

fn build_demo_tree(source: &Path) {
    write(
        &source.join("index.html"),
        r#"<html><body>
            <h1 class="title">Getting Started</h1>
            <a href="/assets/style.css">stylesheet</a>
            <p>A caf&#233; example.</p>
        </body></html>"#,
    );
    write(
        &source.join("api/functions.html"),
        "<html><body><h2>doThing(a, b)</h2><h2>ABOUT</h2><h2>helper()</h2></body></html>",
    );
    write(&source.join("assets/style.css"), "body { margin: 0 }");
    write(&source.join(".git/config"), "[core]");
    write(&source.join("satchel.json"), "{}");
}

fn index_rows(db: &Path) -> Vec<(String, String, String)> {
    let conn = rusqlite::Connection::open(db).unwrap();
    let mut stmt = conn
        .prepare("SELECT name, type, path FROM searchIndex ORDER BY path, name")
        .unwrap();
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
        .unwrap();
    rows.map(|r| r.unwrap()).collect()
}

#[test]
fn build_produces_a_complete_bundle() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("docs");
    build_demo_tree(&source);

    let config = demo_config();
    let report = build(
        &config,
        &BuildOptions {
            source: &source,
            out_dir: dir.path(),
            config_file: Some(&source.join("satchel.json")),
            quiet: true,
        },
    )
    .unwrap();

    assert_eq!(report.documents, 2);
    assert_eq!(report.copied, 1);
    assert_eq!(report.failed, 0);

    let root = dir.path().join("demo.docset");
    assert!(root.join("Contents/Info.plist").is_file());
    assert!(root.join("Contents/Resources/docSet.dsidx").is_file());

    let documents = root.join("Contents/Resources/Documents");
    assert!(documents.join("index.html").is_file());
    assert!(documents.join("api/functions.html").is_file());
    assert_eq!(
        fs::read_to_string(documents.join("assets/style.css")).unwrap(),
        "body { margin: 0 }"
    );

    // The config file and VCS metadata are never ingested.
    assert!(!documents.join("satchel.json").exists());
    assert!(!documents.join(".git").exists());
}

#[test]
fn build_indexes_and_rewrites_documents() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("docs");
    build_demo_tree(&source);

    let config = demo_config();
    build(
        &config,
        &BuildOptions {
            source: &source,
            out_dir: dir.path(),
            config_file: None,
            quiet: true,
        },
    )
    .unwrap();

    let root = dir.path().join("demo.docset");
    let rows = index_rows(&root.join("Contents/Resources/docSet.dsidx"));

    // Ignored names are absent; regexp stripped the signatures.
    let names: Vec<&str> = rows.iter().map(|(n, _, _)| n.as_str()).collect();
    assert!(names.contains(&"doThing"));
    assert!(names.contains(&"helper"));
    assert!(names.contains(&"Getting Started"));
    assert!(!names.contains(&"ABOUT"));

    // Every href points at an anchor in its own document, and all
    // synthesized anchors in the run are distinct.
    let mut fragments = std::collections::HashSet::new();
    for (_, _, path) in &rows {
        let (doc, fragment) = path.split_once('#').unwrap();
        assert!(doc == "index.html" || doc == "api/functions.html");
        assert!(fragments.insert(fragment.to_string()), "duplicate {fragment}");
    }

    let documents = root.join("Contents/Resources/Documents");
    let index_html = fs::read_to_string(documents.join("index.html")).unwrap();

    // TOC anchor, addressability anchor, rewritten link, entity pass.
    assert!(index_html.contains(r#"name="//apple_ref/cpp/Guide/Getting%20Started""#));
    assert!(index_html.contains("dashingAutolink"));
    assert!(index_html.contains(r#"href="../assets/style.css""#));
    assert!(index_html.contains("caf&eacute;"));

    let functions_html = fs::read_to_string(documents.join("api/functions.html")).unwrap();
    assert!(functions_html.contains(r#"name="//apple_ref/cpp/Function/doThing""#));
    // The ignored heading got no anchors at all.
    assert!(!functions_html.contains("apple_ref/cpp/Function/ABOUT"));
}

#[test]
fn rebuild_overwrites_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("docs");
    build_demo_tree(&source);

    let config = demo_config();
    let opts = BuildOptions {
        source: &source,
        out_dir: dir.path(),
        config_file: None,
        quiet: true,
    };
    build(&config, &opts).unwrap();

    // Change a document and rebuild into the same bundle.
    write(
        &source.join("index.html"),
        r#"<html><body><h1 class="title">Second Edition</h1></body></html>"#,
    );
    build(&config, &opts).unwrap();

    let root = dir.path().join("demo.docset");
    let index_html =
        fs::read_to_string(root.join("Contents/Resources/Documents/index.html")).unwrap();
    assert!(index_html.contains("Second Edition"));

    // The search index was recreated, not appended to.
    let rows = index_rows(&root.join("Contents/Resources/docSet.dsidx"));
    let guides: Vec<_> = rows.iter().filter(|(_, t, _)| t == "Guide").collect();
    assert_eq!(guides.len(), 1);
    assert_eq!(guides[0].0, "Second Edition");
}

#[test]
fn unreadable_document_is_skipped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("docs");
    write(&source.join("good.html"), "<h1 class=\"title\">Good</h1>");

    // A dangling symlink fails to read but must not abort the build.
    #[cfg(unix)]
    std::os::unix::fs::symlink(source.join("missing.html"), source.join("bad.html")).unwrap();

    let config = demo_config();
    let report = build(
        &config,
        &BuildOptions {
            source: &source,
            out_dir: dir.path(),
            config_file: None,
            quiet: true,
        },
    )
    .unwrap();

    assert_eq!(report.documents, 1);
    #[cfg(unix)]
    assert_eq!(report.failed, 1);
}
