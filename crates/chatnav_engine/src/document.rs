use scraper::html::Select;
use scraper::{ElementRef, Html, Selector};

/// Stable reference to an element within one parsed document generation.
pub type DomHandle = ego_tree::NodeId;

/// One parsed snapshot of the host page. A fresh generation is parsed per
/// refresh; handles minted against an older generation do not resolve
/// against a newer one.
pub struct PageDocument {
    html: Html,
    generation: u64,
}

impl PageDocument {
    pub fn parse(source: &str, generation: u64) -> Self {
        Self {
            html: Html::parse_document(source),
            generation,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn select<'a, 'b>(&'a self, selector: &'b Selector) -> Select<'a, 'b> {
        self.html.select(selector)
    }

    pub fn resolve(&self, handle: DomHandle) -> Option<ElementRef<'_>> {
        self.html.tree.get(handle).and_then(ElementRef::wrap)
    }
}

/// Collapses whitespace runs to single spaces and trims, approximating the
/// text a browser would render for the element.
pub fn visible_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    let mut last_was_space = true;
    for chunk in element.text() {
        for ch in chunk.chars() {
            if ch.is_whitespace() {
                if !last_was_space {
                    out.push(' ');
                    last_was_space = true;
                }
            } else {
                out.push(ch);
                last_was_space = false;
            }
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out
}
