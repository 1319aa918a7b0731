//! Layout tree for rendered output.
//!
//! Mirrors the notebook widget kinds the helpers compose (HTML fragments,
//! horizontal/vertical boxes, grids, tabs, a scrolling output area) and
//! renders them to self-contained markup with inline handlers.

use std::fmt::Write as _;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_ELEMENT: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    /// Pre-rendered markup, inserted verbatim.
    Html(String),
    HBox(Vec<Widget>),
    VBox(Vec<Widget>),
    Grid {
        columns: usize,
        column_width_px: u32,
        gap_px: u32,
        children: Vec<Widget>,
    },
    Tabs {
        id: String,
        titles: Vec<String>,
        children: Vec<Widget>,
    },
    /// Fixed-height area that scrolls vertically.
    Output {
        height_px: u32,
        children: Vec<Widget>,
    },
}

impl Widget {
    pub fn html(markup: impl Into<String>) -> Self {
        Widget::Html(markup.into())
    }

    pub fn children(&self) -> &[Widget] {
        match self {
            Widget::Html(_) => &[],
            Widget::HBox(children) | Widget::VBox(children) => children,
            Widget::Grid { children, .. }
            | Widget::Tabs { children, .. }
            | Widget::Output { children, .. } => children,
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Widget::Html(markup) => out.push_str(markup),
            Widget::HBox(children) => {
                out.push_str(r#"<div class="pad-hbox" style="display: flex; flex-direction: row; flex-wrap: nowrap; gap: 10px;">"#);
                write_children(children, out);
                out.push_str("</div>");
            }
            Widget::VBox(children) => {
                out.push_str(r#"<div class="pad-vbox" style="display: flex; flex-direction: column;">"#);
                write_children(children, out);
                out.push_str("</div>");
            }
            Widget::Grid {
                columns,
                column_width_px,
                gap_px,
                children,
            } => {
                let _ = write!(
                    out,
                    r#"<div class="pad-grid" style="display: grid; grid-template-columns: repeat({}, {}px); grid-gap: {}px;">"#,
                    columns, column_width_px, gap_px
                );
                write_children(children, out);
                out.push_str("</div>");
            }
            Widget::Tabs { id, titles, children } => write_tabs(id, titles, children, out),
            Widget::Output { height_px, children } => {
                let _ = write!(
                    out,
                    r#"<div class="pad-output" style="height: {}px; overflow-y: auto;">"#,
                    height_px
                );
                write_children(children, out);
                out.push_str("</div>");
            }
        }
    }
}

fn write_children(children: &[Widget], out: &mut String) {
    for child in children {
        child.write_html(out);
    }
}

fn write_tabs(id: &str, titles: &[String], children: &[Widget], out: &mut String) {
    let id = dom_id(id);
    let _ = write!(out, r#"<div class="pad-tabs" id="{}">"#, id);
    out.push_str(r#"<div class="pad-tab-bar" style="display: flex; border-bottom: 1px solid #ccc;">"#);
    for (i, title) in titles.iter().enumerate() {
        let weight = if i == 0 { "bold" } else { "normal" };
        let _ = write!(
            out,
            r#"<button class="pad-tab" data-tab="{i}" style="padding: 6px 12px; border: none; background: none; cursor: pointer; font-weight: {weight};" onclick="
                var root = document.getElementById('{id}');
                root.querySelectorAll(':scope > .pad-tab-panel').forEach(function (p) {{ p.style.display = 'none'; }});
                root.querySelectorAll(':scope > .pad-tab-bar > .pad-tab').forEach(function (b) {{ b.style.fontWeight = 'normal'; }});
                document.getElementById('{id}-panel-{i}').style.display = 'block';
                this.style.fontWeight = 'bold';
            ">{title}</button>"#,
            i = i,
            weight = weight,
            id = id,
            title = escape_html(title)
        );
    }
    out.push_str("</div>");
    for (i, child) in children.iter().enumerate() {
        let display = if i == 0 { "block" } else { "none" };
        let _ = write!(
            out,
            r#"<div class="pad-tab-panel" id="{}-panel-{}" style="display: {};">"#,
            id, i, display
        );
        child.write_html(out);
        out.push_str("</div>");
    }
    out.push_str("</div>");
}

/// Escape text for element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Reduce arbitrary text to characters safe inside an element id and a
/// single-quoted JS string.
pub fn dom_id(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

/// [`dom_id`] of `base` with a process-wide sequence number appended, so two
/// renders of the same card or column never share an element id.
pub fn unique_dom_id(base: &str) -> String {
    let n = NEXT_ELEMENT.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", dom_id(base), n)
}
