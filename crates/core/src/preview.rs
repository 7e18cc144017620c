//! Composes a self-contained HTML document out of a generated project.
//!
//! The project's `index.html` is parsed and every local stylesheet link and
//! script source is swapped for an inline element carrying the referenced
//! file's content, so the result can be rendered from a single string inside a
//! sandboxed frame. External references (`http...`, `//...`) stay live and
//! references to files that do not exist are left as they are.

use std::sync::LazyLock;

use scraper::node::Text;
use scraper::{Html, Node, Selector};

use crate::project::{find_entry_point, find_file, ProjectFile};

static STYLESHEET_LINKS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"link[rel="stylesheet"]"#).expect("stylesheet selector is valid")
});

static SCRIPT_SOURCES: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script[src]").expect("script selector is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InlineAsset {
    Style,
    Script,
}

impl InlineAsset {
    fn selector(self) -> &'static Selector {
        match self {
            InlineAsset::Style => &STYLESHEET_LINKS,
            InlineAsset::Script => &SCRIPT_SOURCES,
        }
    }

    fn attribute(self) -> &'static str {
        match self {
            InlineAsset::Style => "href",
            InlineAsset::Script => "src",
        }
    }

    fn tag(self) -> &'static str {
        match self {
            InlineAsset::Style => "style",
            InlineAsset::Script => "script",
        }
    }
}

/// Build the previewable HTML for a project.
///
/// Returns `None` when the project has no `index.html` (case-insensitive).
/// The output is the outer markup of the document's root element.
pub fn compose_preview(files: &[ProjectFile]) -> Option<String> {
    let entry = find_entry_point(files)?;
    let mut document = Html::parse_document(&entry.content);

    inline_assets(&mut document, files, InlineAsset::Style);
    inline_assets(&mut document, files, InlineAsset::Script);

    Some(document.root_element().html())
}

/// Whether a reference points into the project rather than at a remote URL.
pub fn is_local_reference(reference: &str) -> bool {
    !reference.starts_with("http") && !reference.starts_with("//")
}

/// Strip a single leading `./` from a local reference.
pub fn normalize_reference(reference: &str) -> &str {
    reference.strip_prefix("./").unwrap_or(reference)
}

/// Resolve an `href`/`src` value to a project file, if it is local and present.
pub fn resolve_reference<'a>(reference: &str, files: &'a [ProjectFile]) -> Option<&'a ProjectFile> {
    if reference.is_empty() || !is_local_reference(reference) {
        return None;
    }

    find_file(files, normalize_reference(reference))
}

fn inline_assets(document: &mut Html, files: &[ProjectFile], asset: InlineAsset) {
    let replacements: Vec<_> = document
        .select(asset.selector())
        .filter_map(|element| {
            let reference = element.value().attr(asset.attribute())?;
            let file = resolve_reference(reference, files)?;
            Some((element.id(), file.content.clone()))
        })
        .collect();

    if replacements.is_empty() {
        return;
    }

    let Some(template) = empty_element(asset.tag()) else {
        return;
    };

    for (id, content) in replacements {
        let Some(mut target) = document.tree.get_mut(id) else {
            continue;
        };

        let inline_id = target.insert_before(template.clone()).id();
        target.detach();

        if let Some(mut inline) = document.tree.get_mut(inline_id) {
            inline.append(Node::Text(Text {
                text: content.as_str().into(),
            }));
        }
    }
}

/// A fresh, attribute-less element node for `tag`.
fn empty_element(tag: &str) -> Option<Node> {
    let fragment = Html::parse_fragment(&format!("<{tag}></{tag}>"));
    let selector = Selector::parse(tag).ok()?;

    fragment
        .select(&selector)
        .next()
        .map(|element| Node::Element(element.value().clone()))
}
