//! End-to-end tests: markdown in, markdown out.

#![allow(clippy::unwrap_used)]

use srcfence_core::{SourceCodeConfig, SourceTransform};
use srcfence_markdown::{MarkdownDocument, process_markdown};
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_JS: &str = "function greet(name) {\n  return `Hello, ${name}!`;\n}\n";

fn fixtures() -> TempDir {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("test.js"), TEST_JS).unwrap();
    temp
}

fn transform(base_dir: &Path) -> SourceTransform {
    SourceTransform::new(SourceCodeConfig::new().with_base_dir(base_dir)).unwrap()
}

/// Body of the first fenced block in `markdown`.
fn first_block(markdown: &str) -> String {
    let doc = MarkdownDocument::parse(markdown);
    srcfence_core::CodeNode::value(&doc.blocks()[0]).to_string()
}

#[tokio::test]
async fn imports_code_from_local_files() {
    let dir = fixtures();

    let out = process_markdown(&transform(dir.path()), "```js src=\"test.js\"\n```\n")
        .await
        .unwrap();

    assert_eq!(first_block(&out), TEST_JS);
    assert!(!out.contains("src="));
}

#[tokio::test]
async fn file_ending_in_newline_keeps_it() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.js"), "x\n").unwrap();

    let out = process_markdown(&transform(dir.path()), "```js src=\"a.js\"\n```\n")
        .await
        .unwrap();

    assert_eq!(out, "```js\nx\n\n```\n");
    assert_eq!(first_block(&out), "x\n");
}

#[tokio::test]
async fn exact_local_content_scenario() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("test.js"), "const x = 1;").unwrap();

    let out = process_markdown(&transform(dir.path()), "```js src=\"test.js\"\n```\n")
        .await
        .unwrap();

    assert_eq!(out, "```js\nconst x = 1;\n```\n");
}

#[tokio::test]
async fn handles_local_file_errors() {
    let dir = fixtures();

    let out = process_markdown(
        &transform(dir.path()),
        "```js src=\"missing.js\" title=\"Demo\"\n```\n",
    )
    .await
    .unwrap();

    let body = first_block(&out);
    assert!(body.starts_with("// Error loading local file from missing.js\n// "));
    assert!(out.starts_with("```js title=\"Demo\"\n"));
}

#[tokio::test]
async fn preserves_other_meta_attributes() {
    let dir = fixtures();

    let out = process_markdown(
        &transform(dir.path()),
        "```js src=\"test.js\" title=\"Test File\"\n```\n",
    )
    .await
    .unwrap();

    assert!(out.contains("title=\"Test File\""));
    assert!(!out.contains("src=\"test.js\""));
}

#[tokio::test]
async fn imports_code_from_remote_urls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fixtures/test.js"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TEST_JS))
        .mount(&server)
        .await;
    let dir = fixtures();
    let input = format!("```js src=\"{}/fixtures/test.js\"\n```\n", server.uri());

    let out = process_markdown(&transform(dir.path()), &input)
        .await
        .unwrap();

    assert_eq!(first_block(&out), TEST_JS);
}

#[tokio::test]
async fn handles_remote_url_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let dir = fixtures();
    let url = format!("{}/nonexistent.js", server.uri());

    let out = process_markdown(&transform(dir.path()), &format!("```js src=\"{url}\"\n```\n"))
        .await
        .unwrap();

    assert_eq!(
        first_block(&out),
        format!(
            "// Error loading remote code from {url}\n// Failed to fetch {url}: Not Found"
        )
    );
}

#[tokio::test]
async fn handles_unreachable_hosts() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let dir = fixtures();
    let url = format!("http://127.0.0.1:{port}/a.js");

    let out = process_markdown(&transform(dir.path()), &format!("```js src=\"{url}\"\n```\n"))
        .await
        .unwrap();

    let body = first_block(&out);
    let mut lines = body.lines();
    assert_eq!(
        lines.next(),
        Some(format!("// Error loading remote code from {url}").as_str())
    );
    assert!(lines.next().unwrap().starts_with("// "));
}

#[tokio::test]
async fn leaves_blocks_without_src_alone() {
    let dir = fixtures();
    let input = "```js\nconsole.log('hello')\n```\n";

    let out = process_markdown(&transform(dir.path()), input).await.unwrap();

    assert_eq!(out, input);
}

#[tokio::test]
async fn mixed_document_only_rewrites_annotated_blocks() {
    let dir = fixtures();
    let input = "# Guide\n\n```js\nconsole.log('hello')\n```\n\nSee below.\n\n```js src=\"test.js\"\n```\n";

    let out = process_markdown(&transform(dir.path()), input).await.unwrap();

    let doc = MarkdownDocument::parse(&out);
    assert_eq!(
        srcfence_core::CodeNode::value(&doc.blocks()[0]),
        "console.log('hello')"
    );
    assert_eq!(
        srcfence_core::CodeNode::value(&doc.blocks()[1]),
        TEST_JS
    );
    assert!(out.starts_with("# Guide\n\n```js\nconsole.log('hello')\n```\n\nSee below.\n\n"));
}

#[tokio::test]
async fn second_pass_is_a_fixpoint() {
    let dir = fixtures();
    let t = transform(dir.path());
    let input = "```js src=\"test.js\" title=\"A\"\n```\n\n```js src=\"nope.js\"\n```\n";

    let once = process_markdown(&t, input).await.unwrap();
    let twice = process_markdown(&t, &once).await.unwrap();

    assert_eq!(once, twice);
}

#[tokio::test]
async fn nested_relative_paths_resolve_against_base_dir() {
    let dir = fixtures();
    std::fs::create_dir(dir.path().join("snippets")).unwrap();
    std::fs::write(dir.path().join("snippets").join("lib.rs"), "pub fn f() {}").unwrap();

    let out = process_markdown(
        &transform(&dir.path().join("snippets")),
        "```rust src=\"./lib.rs\"\n```\n\n```js src=\"../test.js\"\n```\n",
    )
    .await
    .unwrap();

    let doc = MarkdownDocument::parse(&out);
    assert_eq!(srcfence_core::CodeNode::value(&doc.blocks()[0]), "pub fn f() {}");
    assert_eq!(
        srcfence_core::CodeNode::value(&doc.blocks()[1]),
        TEST_JS
    );
}
