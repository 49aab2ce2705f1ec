//! Turning a result into something a front-end can display

use regex::Regex;
use scraper::{ElementRef, Html, Node};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::types::SimplificationResult;

/// Elements that start a new paragraph in the plain-text output
const BLOCK_ELEMENTS: &[&str] = &[
    "p", "li", "ul", "ol", "div", "br", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote",
];

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex is valid"));

/// Which side of the result is on screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultView {
    #[default]
    Simplified,
    Original,
}

impl ResultView {
    pub fn toggled(self) -> ResultView {
        match self {
            ResultView::Simplified => ResultView::Original,
            ResultView::Original => ResultView::Simplified,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ResultView::Simplified => "Plain English Version",
            ResultView::Original => "Original Complex Text",
        }
    }

    pub fn from_str(s: &str) -> Option<ResultView> {
        match s.trim().to_lowercase().as_str() {
            "simplified" | "simple" | "plain" => Some(ResultView::Simplified),
            "original" | "source" => Some(ResultView::Original),
            _ => None,
        }
    }
}

/// A successful result together with the text it was produced from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayedResult {
    /// Input exactly as it was when submitted
    pub original: String,
    pub result: SimplificationResult,
}

/// Ready-to-print view of a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedResult {
    pub title: String,
    pub body: String,
    pub key_points: Vec<String>,
}

/// Render the requested view. Pure: the same input always renders the same way.
pub fn render(displayed: &DisplayedResult, view: ResultView) -> RenderedResult {
    let body = match view {
        ResultView::Simplified => html_to_text(&displayed.result.simplified),
        ResultView::Original => displayed.original.clone(),
    };

    RenderedResult {
        title: view.title().to_string(),
        body,
        key_points: displayed.result.key_points.clone(),
    }
}

/// Reduce an HTML fragment to readable text, one paragraph per block.
/// Every text node is kept exactly once, in document order.
pub fn html_to_text(fragment: &str) -> String {
    let html = Html::parse_fragment(fragment);

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    collect_text(html.root_element(), &mut paragraphs, &mut current);
    flush_paragraph(&mut paragraphs, &mut current);

    paragraphs.join("\n\n")
}

fn collect_text(element: ElementRef<'_>, paragraphs: &mut Vec<String>, current: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => current.push_str(text),
            Node::Element(el) => {
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                let is_block = BLOCK_ELEMENTS.contains(&el.name());
                if is_block {
                    flush_paragraph(paragraphs, current);
                }
                collect_text(child_el, paragraphs, current);
                if is_block {
                    flush_paragraph(paragraphs, current);
                }
            }
            _ => {}
        }
    }
}

fn flush_paragraph(paragraphs: &mut Vec<String>, current: &mut String) {
    let paragraph = collapse_whitespace(current);
    if !paragraph.is_empty() {
        paragraphs.push(paragraph);
    }
    current.clear();
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}
