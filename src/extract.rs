//! Inline code span extraction from markdown documents

use crate::error::{CheckError, Result};
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use std::ops::Range;
use std::path::PathBuf;

/// Inline code spans found in one documentation file, in appearance order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReferences {
    pub file: PathBuf,
    pub references: Vec<String>,
}

/// Extract the content of every inline code span.
///
/// Only spans that sit directly in a block's inline text count. Code blocks
/// are separate block events and are never returned; spans nested in image
/// alt text are skipped. No span is filtered by content.
///
/// Raw HTML is read as plain text, so spans between `<details>` tags or
/// inside an HTML comment are still extracted, and an HTML line does not cut
/// short the paragraph above it.
pub fn extract_inline_code(content: &str) -> Vec<String> {
    let events: Vec<(Event<'_>, Range<usize>)> =
        Parser::new_ext(content, options()).into_offset_iter().collect();
    let regions = html_regions(content, &events);

    let mut spans = Vec::new();
    let mut image_depth = 0usize;
    let mut region = 0usize;
    let mut region_read = false;

    for (event, range) in events {
        while regions.get(region).is_some_and(|r| r.end <= range.start) {
            region += 1;
            region_read = false;
        }
        // Events inside an HTML region are replaced by its plain-text reading
        if let Some(r) = regions.get(region).filter(|r| r.start <= range.start) {
            if !region_read {
                spans.extend(extract_as_text(&dedent(&content[r.clone()])));
                region_read = true;
            }
            continue;
        }

        match event {
            Event::InlineHtml(html) if image_depth == 0 => spans.extend(extract_as_text(&html)),
            Event::Start(Tag::Image { .. }) => image_depth += 1,
            Event::End(TagEnd::Image) => image_depth = image_depth.saturating_sub(1),
            Event::Code(code) if image_depth == 0 => spans.push(code.into_string()),
            _ => {}
        }
    }

    spans
}

fn options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH
}

/// Code spans of `markdown` with every `<` read as a literal character.
///
/// Each `<` gets exactly one `\` in front before parsing, and code span
/// content keeps backslashes verbatim, so dropping the `\` before each `<`
/// restores the span.
fn extract_as_text(markdown: &str) -> Vec<String> {
    extract_inline_code(&markdown.replace('<', "\\<"))
        .into_iter()
        .map(|span| span.replace("\\<", "<"))
        .collect()
}

/// Source ranges that hold an HTML block, widened to the text blocks on the
/// lines directly above and below it.
///
/// Each range starts at the beginning of its first line so container markers
/// (`> `, `- `) parse the same way again.
fn html_regions(content: &str, events: &[(Event<'_>, Range<usize>)]) -> Vec<Range<usize>> {
    let mut regions: Vec<Range<usize>> = Vec::new();
    let mut group: Option<(Range<usize>, bool)> = None;

    let blocks = events.iter().filter_map(|(event, range)| match event {
        Event::Start(Tag::Paragraph | Tag::Item) => Some((range.clone(), false)),
        Event::Start(Tag::HtmlBlock) => Some((range.clone(), true)),
        _ => None,
    });

    for (range, is_html) in blocks {
        group = match group {
            Some((current, has_html))
                if line_of(content, range.start) == last_line(content, &current) + 1 =>
            {
                Some((current.start..range.end, has_html || is_html))
            }
            Some((current, true)) => {
                push_region(&mut regions, content, current);
                Some((range, is_html))
            }
            _ => Some((range, is_html)),
        };
    }
    if let Some((current, true)) = group {
        push_region(&mut regions, content, current);
    }

    regions
}

fn push_region(regions: &mut Vec<Range<usize>>, content: &str, range: Range<usize>) {
    let start = content[..range.start].rfind('\n').map_or(0, |i| i + 1);
    match regions.last_mut() {
        Some(last) if start < last.end => last.end = last.end.max(range.end),
        _ => regions.push(start..range.end),
    }
}

/// Strip the indentation shared by all non-blank lines
fn dedent(text: &str) -> String {
    let indent = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);
    text.lines()
        .map(|line| line.get(indent..).unwrap_or(""))
        .collect::<Vec<_>>()
        .join("\n")
}

fn line_of(content: &str, offset: usize) -> usize {
    content[..offset].matches('\n').count()
}

fn last_line(content: &str, range: &Range<usize>) -> usize {
    let text = content[range.clone()].trim_end_matches(['\n', '\r']);
    line_of(content, range.start + text.len())
}

/// Read each document and collect its references
pub async fn extract_references(doc_files: &[PathBuf]) -> Result<Vec<DocumentReferences>> {
    let mut documents = Vec::with_capacity(doc_files.len());

    for file in doc_files {
        let content = tokio::fs::read_to_string(file)
            .await
            .map_err(|source| CheckError::Read {
                path: file.clone(),
                source,
            })?;

        let references = extract_inline_code(&content);
        tracing::debug!(file = %file.display(), spans = references.len(), "extracted inline code");
        documents.push(DocumentReferences {
            file: file.clone(),
            references,
        });
    }

    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_extract_inline_code() {
        let content = r#"
# Using `renderWidget()`

Call `init()` first, then `run(opts)`.

- list item with `listItem`
"#;
        assert_eq!(
            extract_inline_code(content),
            vec!["renderWidget()", "init()", "run(opts)", "listItem"]
        );
    }

    #[test]
    fn test_ignores_code_blocks() {
        let content = r#"
```js
fencedOnly()
```

    indentedOnly()

Prose with `inlineOnly`.
"#;
        assert_eq!(extract_inline_code(content), vec!["inlineOnly"]);
    }

    #[test]
    fn test_ignores_links_and_autolinks() {
        let content = "See [docs](https://example.com/api) and <https://example.org>.";
        assert!(extract_inline_code(content).is_empty());
    }

    #[test]
    fn test_code_inside_link_text() {
        let content = "See [`Client::new`](https://example.com).";
        assert_eq!(extract_inline_code(content), vec!["Client::new"]);
    }

    #[test]
    fn test_skips_image_alt_text() {
        let content = "![diagram of `hidden`](img.png) and `shown`";
        assert_eq!(extract_inline_code(content), vec!["shown"]);
    }

    #[test]
    fn test_table_cells() {
        let content = "| fn | notes |\n|----|-------|\n| `tableFn` | ok |\n";
        assert_eq!(extract_inline_code(content), vec!["tableFn"]);
    }

    #[test]
    fn test_double_backticks_and_padding() {
        let content = "Use ``a `tick` b`` and `` `wrapped` ``.";
        assert_eq!(extract_inline_code(content), vec!["a `tick` b", "`wrapped`"]);
    }

    #[test]
    fn test_whitespace_only_span_kept() {
        assert_eq!(extract_inline_code("blank ` ` span"), vec![" "]);
    }

    #[test]
    fn test_multiline_span_joins_with_space() {
        assert_eq!(extract_inline_code("`foo\nbar`"), vec!["foo bar"]);
    }

    #[test]
    fn test_html_block_is_plain_text() {
        let content = "<details>\n<summary>API</summary>\nCall `legacyInit()` here.\n</details>\n";
        assert_eq!(extract_inline_code(content), vec!["legacyInit()"]);
    }

    #[test]
    fn test_html_comment_is_plain_text() {
        let content = "<!-- old: `removedFn` -->\n\nKept `currentFn`.\n";
        assert_eq!(extract_inline_code(content), vec!["removedFn", "currentFn"]);
    }

    #[test]
    fn test_angle_brackets_inside_html_block_span() {
        let content = "<details>\n<summary>Returns `Option<T>`</summary>\n</details>\n";
        assert_eq!(extract_inline_code(content), vec!["Option<T>"]);

        assert_eq!(extract_inline_code("<!-- was `Vec<u8>` -->\n"), vec!["Vec<u8>"]);
    }

    #[test]
    fn test_backslashes_in_html_block_span_kept() {
        let content = "<div>\n`a\\<b` and `C:\\dir`\n</div>\n";
        assert_eq!(extract_inline_code(content), vec!["a\\<b", "C:\\dir"]);
    }

    #[test]
    fn test_html_line_does_not_split_paragraph() {
        assert_eq!(extract_inline_code("Text `a\n<div>b` c\n"), vec!["a <div>b"]);
    }

    #[test]
    fn test_html_line_inside_list_item() {
        assert_eq!(extract_inline_code("- item `a\n<div>b`\n"), vec!["a <div>b"]);
    }

    #[test]
    fn test_html_block_keeps_document_order() {
        let content = "Intro `first`.\n\n<div>\n`second`\n</div>\n\nThen `third`.\n";
        assert_eq!(extract_inline_code(content), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_indented_html_block_in_list() {
        let content = "- outer\n  - inner\n\n    <div>\n    `nestedFn`\n    </div>\n";
        assert_eq!(extract_inline_code(content), vec!["nestedFn"]);
    }

    #[test]
    fn test_code_inside_inline_html_attribute() {
        let content = "Hover <abbr title=\"`tipFn<T>`\">here</abbr> or `afterFn`.";
        assert_eq!(extract_inline_code(content), vec!["tipFn<T>", "afterFn"]);
    }

    #[tokio::test]
    async fn test_extract_references_keeps_file() {
        let dir = tempdir().unwrap();
        let doc = dir.path().join("guide.md");
        fs::write(&doc, "Run `legacyInit()`.").unwrap();

        let documents = extract_references(&[doc.clone()]).await.unwrap();
        assert_eq!(
            documents,
            vec![DocumentReferences {
                file: doc,
                references: vec!["legacyInit()".to_string()],
            }]
        );
    }

    #[tokio::test]
    async fn test_extract_references_missing_file() {
        let dir = tempdir().unwrap();
        let err = extract_references(&[dir.path().join("missing.md")])
            .await
            .unwrap_err();
        assert!(matches!(err, CheckError::Read { .. }));
    }
}
