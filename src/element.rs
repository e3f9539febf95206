//! The visual tree produced by rendering.
//!
//! Hosts can either walk the tree directly (cells carry their grid index so
//! pointer hits can be routed back through [`dispatch`]) or serialize it to
//! SVG markup with [`Element::to_svg`].
//!
//! [`dispatch`]: crate::CalendarHeatmap::dispatch

use std::fmt::Write;

use crate::data_types::{AttrMap, Direction};

/// CSS class namespace shared by every element the renderer emits.
pub const CSS_NAMESPACE: &str = "calendar-heatmap";

/// Namespaced CSS class, e.g. `css_class("week")` -> `calendar-heatmap-week`.
pub fn css_class(name: &str) -> String {
    format!("{CSS_NAMESPACE}-{name}")
}

#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Svg(SvgRoot),
    Group(Group),
    Rect(Rect),
    Text(Text),
}

/// The `<svg>` document root.
#[derive(Clone, Debug, PartialEq)]
pub struct SvgRoot {
    pub class: String,
    pub view_box: String,
    pub direction: Direction,
    pub children: Vec<Element>,
}

/// A translated `<g>` container.
#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    pub class: String,
    pub transform: (i64, i64),
    pub text_anchor: Option<&'static str>,
    pub children: Vec<Element>,
}

/// One day cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
    pub class: Option<String>,
    pub title: Option<String>,
    /// Extra attributes, e.g. tooltip data attributes.
    pub attrs: AttrMap,
    /// Day offset from the padded range start; keys value lookups and event
    /// routing.
    pub grid_index: i64,
}

impl Rect {
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }
}

/// A label.
#[derive(Clone, Debug, PartialEq)]
pub struct Text {
    pub x: i64,
    pub y: i64,
    pub class: String,
    pub content: String,
}

impl Element {
    /// Pre-order traversal of this element and everything below it.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(element) = stack.pop() {
            out.push(element);
            match element {
                Element::Svg(root) => stack.extend(root.children.iter().rev()),
                Element::Group(group) => stack.extend(group.children.iter().rev()),
                Element::Rect(_) | Element::Text(_) => {}
            }
        }
        out
    }

    /// Every cell in the tree, in render order.
    pub fn rects(&self) -> Vec<&Rect> {
        self.descendants()
            .into_iter()
            .filter_map(|element| match element {
                Element::Rect(rect) => Some(rect),
                _ => None,
            })
            .collect()
    }

    /// Every label in the tree, in render order.
    pub fn texts(&self) -> Vec<&Text> {
        self.descendants()
            .into_iter()
            .filter_map(|element| match element {
                Element::Text(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    /// First group whose (namespaced) class matches `name`.
    pub fn group(&self, name: &str) -> Option<&Group> {
        let class = css_class(name);
        self.descendants()
            .into_iter()
            .find_map(|element| match element {
                Element::Group(group) if group.class == class => Some(group),
                _ => None,
            })
    }

    /// Serializes the tree to SVG markup.
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        self.write_svg(&mut out);
        out
    }

    fn write_svg(&self, out: &mut String) {
        match self {
            Element::Svg(root) => {
                let _ = write!(
                    out,
                    r#"<svg xmlns="http://www.w3.org/2000/svg" class="{}" viewBox="{}" direction="{}">"#,
                    escape(&root.class),
                    escape(&root.view_box),
                    root.direction.as_str(),
                );
                for child in &root.children {
                    child.write_svg(out);
                }
                out.push_str("</svg>");
            }
            Element::Group(group) => {
                let _ = write!(
                    out,
                    r#"<g class="{}" transform="translate({}, {})""#,
                    escape(&group.class),
                    group.transform.0,
                    group.transform.1,
                );
                if let Some(anchor) = group.text_anchor {
                    let _ = write!(out, r#" text-anchor="{anchor}""#);
                }
                out.push('>');
                for child in &group.children {
                    child.write_svg(out);
                }
                out.push_str("</g>");
            }
            Element::Rect(rect) => {
                let _ = write!(
                    out,
                    r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                    rect.x, rect.y, rect.width, rect.height,
                );
                if let Some(class) = &rect.class {
                    let _ = write!(out, r#" class="{}""#, escape(class));
                }
                for (key, value) in &rect.attrs {
                    let _ = write!(out, r#" {}="{}""#, key, escape(value));
                }
                match &rect.title {
                    Some(title) if !title.is_empty() => {
                        let _ = write!(out, "><title>{}</title></rect>", escape(title));
                    }
                    _ => out.push_str("/>"),
                }
            }
            Element::Text(text) => {
                let _ = write!(
                    out,
                    r#"<text x="{}" y="{}" class="{}">{}</text>"#,
                    text.x,
                    text.y,
                    escape(&text.class),
                    escape(&text.content),
                );
            }
        }
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
