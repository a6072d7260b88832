//! Minimal model of the node an input event lands on.
//!
//! The host fills in what it knows about the hit node and its ancestors; the
//! gesture engine only needs to probe for a selection, a link, an image and
//! whether the node accepts text input.

use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Anchor,
    Area,
    Link,
    SvgAnchor,
    Image,
    SvgImage,
    TextArea,
    Input,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub kind: ElementKind,
    /// `href` for links and SVG images, `src` for HTML images.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub content_editable: bool,
}

impl Element {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            url: None,
            content_editable: false,
        }
    }

    pub fn with_url(kind: ElementKind, url: &str) -> Self {
        Self {
            kind,
            url: Some(url.to_string()),
            content_editable: false,
        }
    }

    fn is_link(&self) -> bool {
        matches!(
            self.kind,
            ElementKind::Anchor | ElementKind::Area | ElementKind::Link | ElementKind::SvgAnchor
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTarget {
    /// Hit node first, then its ancestors up to the root.
    #[serde(default)]
    pub path: Vec<Element>,
    /// Text selected under the cursor, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<String>,
    /// Base URI of the owning document, used for SVG references.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_uri: Option<String>,
    #[serde(default)]
    pub design_mode: bool,
    /// The node belongs to an open host popup.
    #[serde(default)]
    pub in_open_popup: bool,
}

impl EventTarget {
    pub fn node(&self) -> Option<&Element> {
        self.path.first()
    }

    pub fn selection_text(&self) -> Option<&str> {
        self.selection.as_deref().filter(|text| !text.is_empty())
    }

    /// URL of the nearest link-like ancestor (the node itself included).
    pub fn link_url(&self) -> Option<String> {
        let link = self.path.iter().find(|element| element.is_link())?;
        let href = link.url.as_deref()?;
        match link.kind {
            ElementKind::SvgAnchor => self.resolve(href),
            _ => Some(href.to_string()),
        }
    }

    /// URL of the node when it is an image. Ancestors are not considered.
    pub fn image_url(&self) -> Option<String> {
        let node = self.node()?;
        let url = node.url.as_deref()?;
        match node.kind {
            ElementKind::Image => Some(url.to_string()),
            ElementKind::SvgImage => self.resolve(url),
            _ => None,
        }
    }

    pub fn is_editable(&self) -> bool {
        if self.design_mode {
            return true;
        }
        // Editability is inherited, so any editable ancestor counts.
        self.node().is_some_and(|node| {
            matches!(node.kind, ElementKind::TextArea | ElementKind::Input)
        }) || self.path.iter().any(|element| element.content_editable)
    }

    fn resolve(&self, href: &str) -> Option<String> {
        if let Ok(url) = Url::parse(href) {
            return Some(url.into());
        }
        let base = Url::parse(self.base_uri.as_deref()?).ok()?;
        match base.join(href) {
            Ok(url) => Some(url.into()),
            Err(err) => {
                tracing::debug!(?err, href, "failed to resolve svg reference");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(path: Vec<Element>) -> EventTarget {
        EventTarget {
            path,
            ..EventTarget::default()
        }
    }

    #[test]
    fn link_is_found_on_ancestor() {
        let t = target(vec![
            Element::new(ElementKind::Other),
            Element::with_url(ElementKind::Anchor, "https://example.com/a"),
            Element::new(ElementKind::Other),
        ]);
        assert_eq!(t.link_url().as_deref(), Some("https://example.com/a"));
        assert_eq!(t.image_url(), None);
    }

    #[test]
    fn svg_references_resolve_against_base() {
        let mut t = target(vec![Element::with_url(ElementKind::SvgImage, "img/cat.png")]);
        t.base_uri = Some("https://example.com/docs/page.html".into());
        assert_eq!(
            t.image_url().as_deref(),
            Some("https://example.com/docs/img/cat.png")
        );

        t.base_uri = None;
        assert_eq!(t.image_url(), None);
    }

    #[test]
    fn image_on_ancestor_is_ignored() {
        let t = target(vec![
            Element::new(ElementKind::Other),
            Element::with_url(ElementKind::Image, "https://example.com/i.png"),
        ]);
        assert_eq!(t.image_url(), None);
    }

    #[test]
    fn editable_targets() {
        assert!(target(vec![Element::new(ElementKind::Input)]).is_editable());
        assert!(target(vec![Element::new(ElementKind::TextArea)]).is_editable());

        let mut editable = Element::new(ElementKind::Other);
        editable.content_editable = true;
        assert!(target(vec![Element::new(ElementKind::Other), editable]).is_editable());

        let mut design = target(vec![Element::new(ElementKind::Other)]);
        assert!(!design.is_editable());
        design.design_mode = true;
        assert!(design.is_editable());
    }
}
