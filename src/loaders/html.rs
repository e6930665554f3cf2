use crate::document::Metadata;
use crate::error::LoadError;
use crate::loaders::{DocumentLoader, LoadMode, LoadedDocument};
use ego_tree::iter::Edge;
use ego_tree::{NodeId, NodeRef};
use scraper::{Html, Node, Selector};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Elements whose subtree never contributes text.
const SKIPPED_TAGS: &[&str] = &[
    "head", "script", "style", "noscript", "template", "svg", "iframe", "object",
];

/// Elements that start a new text block.
const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "body",
    "caption",
    "dd",
    "details",
    "dialog",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "summary",
    "table",
    "tbody",
    "td",
    "tfoot",
    "th",
    "thead",
    "tr",
    "ul",
];

const HTML_FILETYPE: &str = "text/html";

/// A run of visible text and the innermost block element that holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    pub tag: String,
    pub text: String,
}

impl TextBlock {
    pub fn category(&self) -> &'static str {
        match self.tag.as_str() {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => "Title",
            "li" | "dt" | "dd" => "ListItem",
            "td" | "th" | "caption" => "Table",
            _ => "NarrativeText",
        }
    }

    /// Zero-based heading depth (`h1` is 0), `None` for non-headings.
    pub fn heading_depth(&self) -> Option<u8> {
        let level = self.tag.strip_prefix('h')?.parse::<u8>().ok()?;
        (1..=6).contains(&level).then(|| level - 1)
    }
}

/// HTML backend built on `scraper`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlLoader {
    mode: LoadMode,
}

impl HtmlLoader {
    pub fn new(mode: LoadMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> LoadMode {
        self.mode
    }

    /// Build documents from HTML source already in memory. `path` only feeds metadata.
    pub fn documents_from_html(&self, html: &str, path: &Path) -> Vec<LoadedDocument> {
        let document = Html::parse_document(html.trim_start_matches('\u{feff}'));
        let blocks = extract_blocks(&document);

        match self.mode {
            LoadMode::Single => {
                let text = blocks
                    .iter()
                    .map(|block| block.text.as_str())
                    .collect::<Vec<_>>()
                    .join("\n\n");
                let mut metadata = Metadata::new();
                metadata.insert("source".to_owned(), Value::String(source(path)));
                vec![LoadedDocument::new(text, metadata)]
            }
            LoadMode::Elements => {
                let title = page_title(&document);
                blocks
                    .into_iter()
                    .enumerate()
                    .map(|(index, block)| {
                        let metadata = element_metadata(path, &block, index, title.as_deref());
                        LoadedDocument::new(block.text, metadata)
                    })
                    .collect()
            }
        }
    }
}

impl DocumentLoader for HtmlLoader {
    type Document = LoadedDocument;
    type Error = LoadError;

    fn load(&self, path: &Path) -> Result<Vec<LoadedDocument>, LoadError> {
        let bytes = fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let html = String::from_utf8(bytes).map_err(|source| LoadError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(self.documents_from_html(&html, path))
    }
}

/// Split a parsed page into visible text blocks, in document order.
pub fn extract_blocks(document: &Html) -> Vec<TextBlock> {
    let mut collector = BlockCollector::default();
    collector.visit(document.tree.root());
    collector.flush();
    collector.blocks
}

/// Text of `<title>`, whitespace-collapsed. `None` when absent or blank.
pub fn page_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    let title = document.select(&selector).next()?;
    let text = collapse_whitespace(&title.text().collect::<String>());
    (!text.is_empty()).then_some(text)
}

#[derive(Default)]
struct BlockCollector {
    blocks: Vec<TextBlock>,
    buffer: String,
    open_blocks: Vec<String>,
}

impl BlockCollector {
    /// Iterative pre/post-order walk; nesting depth never grows the call stack.
    fn visit(&mut self, root: NodeRef<'_, Node>) {
        let mut skipping: Option<NodeId> = None;

        for edge in root.traverse() {
            match edge {
                Edge::Open(node) => {
                    if skipping.is_some() {
                        continue;
                    }
                    match node.value() {
                        Node::Text(text) => self.buffer.push_str(text),
                        Node::Element(element) => {
                            let name = element.name();
                            if SKIPPED_TAGS.contains(&name) {
                                skipping = Some(node.id());
                            } else if name == "br" {
                                self.buffer.push(' ');
                            } else if BLOCK_TAGS.contains(&name) {
                                self.flush();
                                self.open_blocks.push(name.to_owned());
                            }
                        }
                        _ => {}
                    }
                }
                Edge::Close(node) => {
                    if let Some(skipped) = skipping {
                        if skipped == node.id() {
                            skipping = None;
                        }
                        continue;
                    }
                    if let Node::Element(element) = node.value()
                        && BLOCK_TAGS.contains(&element.name())
                    {
                        self.flush();
                        self.open_blocks.pop();
                    }
                }
            }
        }
    }

    fn flush(&mut self) {
        let text = collapse_whitespace(&self.buffer);
        self.buffer.clear();
        if text.is_empty() {
            return;
        }

        let tag = self
            .open_blocks
            .last()
            .cloned()
            .unwrap_or_else(|| "body".to_owned());
        self.blocks.push(TextBlock { tag, text });
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn source(path: &Path) -> String {
    path.display().to_string()
}

fn element_metadata(path: &Path, block: &TextBlock, index: usize, title: Option<&str>) -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert("source".to_owned(), Value::String(source(path)));
    if let Some(filename) = path.file_name() {
        metadata.insert(
            "filename".to_owned(),
            Value::String(filename.to_string_lossy().into_owned()),
        );
    }
    if let Some(directory) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        metadata.insert(
            "file_directory".to_owned(),
            Value::String(directory.display().to_string()),
        );
    }
    metadata.insert(
        "filetype".to_owned(),
        Value::String(HTML_FILETYPE.to_owned()),
    );
    metadata.insert(
        "category".to_owned(),
        Value::String(block.category().to_owned()),
    );
    if let Some(depth) = block.heading_depth() {
        metadata.insert("category_depth".to_owned(), Value::from(depth));
    }
    metadata.insert("tag".to_owned(), Value::String(block.tag.clone()));
    metadata.insert("element_index".to_owned(), Value::from(index));
    if let Some(title) = title {
        metadata.insert("page_title".to_owned(), Value::String(title.to_owned()));
    }
    metadata
}

#[cfg(test)]
mod tests {
    use super::{HtmlLoader, TextBlock, extract_blocks, page_title};
    use crate::document::ExternalDocument;
    use crate::error::LoadError;
    use crate::loaders::{DocumentLoader, LoadMode};
    use scraper::Html;
    use serde_json::json;
    use std::io::Write;
    use std::path::Path;
    use tempfile::NamedTempFile;

    const ARTICLE: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <title>  Release   notes </title>
    <style>body { color: red; }</style>
  </head>
  <body>
    <h1>Version 2.0</h1>
    <p>This release adds <b>streaming</b> readers.</p>
    <script>console.log("ignored");</script>
    <ul>
      <li>Faster parsing</li>
      <li>Smaller binaries</li>
    </ul>
  </body>
</html>"#;

    fn make_temp_html(contents: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".html").expect("create temp file");
        file.write_all(contents).expect("write temp file contents");
        file.flush().expect("flush temp file");
        file
    }

    fn texts(html: &str) -> Vec<String> {
        extract_blocks(&Html::parse_document(html))
            .into_iter()
            .map(|block| block.text)
            .collect()
    }

    #[test]
    fn extracts_visible_blocks_in_order() {
        assert_eq!(
            texts(ARTICLE),
            vec![
                "Version 2.0",
                "This release adds streaming readers.",
                "Faster parsing",
                "Smaller binaries",
            ]
        );
    }

    #[test]
    fn inline_markup_does_not_split_blocks() {
        assert_eq!(
            texts("<p>Hello <a href='#'>there</a>,<br>world</p>"),
            vec!["Hello there, world"]
        );
    }

    #[test]
    fn text_around_nested_blocks_keeps_outer_tag() {
        let blocks = extract_blocks(&Html::parse_document(
            "<div>Intro <p>Inner</p> Outro</div>",
        ));
        assert_eq!(
            blocks,
            vec![
                TextBlock {
                    tag: "div".to_owned(),
                    text: "Intro".to_owned()
                },
                TextBlock {
                    tag: "p".to_owned(),
                    text: "Inner".to_owned()
                },
                TextBlock {
                    tag: "div".to_owned(),
                    text: "Outro".to_owned()
                },
            ]
        );
    }

    #[test]
    fn deeply_nested_markup_loads_on_a_worker_thread() {
        const DEPTH: usize = 50_000;
        let mut html = String::from("<html><body><p>");
        html.push_str(&"<span>".repeat(DEPTH));
        html.push_str("deep text");
        html.push_str(&"</span>".repeat(DEPTH));
        html.push_str("</p><script>");
        html.push_str(&"<i>".repeat(10));
        html.push_str("</script><p>after</p></body></html>");
        let file = make_temp_html(html.as_bytes());
        let path = file.path().to_path_buf();

        let documents = std::thread::spawn(move || HtmlLoader::new(LoadMode::Elements).load(&path))
            .join()
            .expect("worker thread must not crash")
            .expect("load deep html");

        let texts: Vec<_> = documents.iter().map(|doc| doc.page_content()).collect();
        assert_eq!(texts, vec!["deep text", "after"]);
        assert_eq!(documents[0].metadata()["tag"], "p");
    }

    #[test]
    fn skipped_subtrees_end_at_their_close_tag() {
        assert_eq!(
            texts("<div>a <noscript><p>hidden</p></noscript> b</div><p>c</p>"),
            vec!["a b", "c"]
        );
    }

    #[test]
    fn categorizes_blocks() {
        let block = |tag: &str| TextBlock {
            tag: tag.to_owned(),
            text: "x".to_owned(),
        };
        assert_eq!(block("h2").category(), "Title");
        assert_eq!(block("h2").heading_depth(), Some(1));
        assert_eq!(block("li").category(), "ListItem");
        assert_eq!(block("td").category(), "Table");
        assert_eq!(block("p").category(), "NarrativeText");
        assert_eq!(block("p").heading_depth(), None);
        assert_eq!(block("hr").heading_depth(), None);
    }

    #[test]
    fn reads_page_title() {
        let document = Html::parse_document(ARTICLE);
        assert_eq!(page_title(&document).as_deref(), Some("Release notes"));
        assert_eq!(page_title(&Html::parse_document("<p>no title</p>")), None);
    }

    #[test]
    fn single_mode_joins_blocks_into_one_document() {
        let documents =
            HtmlLoader::default().documents_from_html(ARTICLE, Path::new("docs/release.html"));

        assert_eq!(documents.len(), 1);
        assert_eq!(
            documents[0].page_content(),
            "Version 2.0\n\nThis release adds streaming readers.\n\nFaster parsing\n\nSmaller binaries"
        );
        assert_eq!(
            serde_json::Value::Object(documents[0].metadata().clone()),
            json!({ "source": "docs/release.html" })
        );
    }

    #[test]
    fn single_mode_keeps_one_empty_document_for_blank_page() {
        let documents = HtmlLoader::new(LoadMode::Single)
            .documents_from_html("<html><body>  </body></html>", Path::new("blank.html"));
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].page_content(), "");
    }

    #[test]
    fn elements_mode_emits_one_document_per_block() {
        let documents = HtmlLoader::new(LoadMode::Elements)
            .documents_from_html(ARTICLE, Path::new("docs/release.html"));

        assert_eq!(documents.len(), 4);
        assert_eq!(
            serde_json::Value::Object(documents[0].metadata().clone()),
            json!({
                "source": "docs/release.html",
                "filename": "release.html",
                "file_directory": "docs",
                "filetype": "text/html",
                "category": "Title",
                "category_depth": 0,
                "tag": "h1",
                "element_index": 0,
                "page_title": "Release notes"
            })
        );
        assert_eq!(documents[1].metadata()["category"], "NarrativeText");
        assert_eq!(documents[2].metadata()["category"], "ListItem");
        assert_eq!(documents[3].metadata()["element_index"], 3);
    }

    #[test]
    fn elements_mode_on_blank_page_is_empty() {
        let documents = HtmlLoader::new(LoadMode::Elements)
            .documents_from_html("<html></html>", Path::new("blank.html"));
        assert!(documents.is_empty());
    }

    #[test]
    fn loads_from_file() {
        let file = make_temp_html(ARTICLE.as_bytes());
        let documents = HtmlLoader::default().load(file.path()).expect("load html");

        assert_eq!(documents.len(), 1);
        assert!(documents[0].page_content().starts_with("Version 2.0"));
        assert_eq!(
            documents[0].metadata()["source"],
            file.path().display().to_string()
        );
    }

    #[test]
    fn strips_byte_order_mark() {
        let file = make_temp_html("\u{feff}<p>Marked</p>".as_bytes());
        let documents = HtmlLoader::default().load(file.path()).expect("load html");
        assert_eq!(documents[0].page_content(), "Marked");
    }

    #[test]
    fn reports_invalid_utf8() {
        let file = make_temp_html(b"<p>\xff\xfe broken</p>");
        let error = HtmlLoader::default()
            .load(file.path())
            .expect_err("invalid utf-8 must fail");
        assert!(matches!(error, LoadError::Decode { .. }));
    }

    #[test]
    fn reports_missing_file() {
        let error = HtmlLoader::default()
            .load(Path::new("/nonexistent/page.html"))
            .expect_err("missing file must fail");
        assert!(matches!(error, LoadError::Io { .. }));
    }
}
