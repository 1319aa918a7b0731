//! Card widgets: a zoomable image beside a label/value table.

use std::fmt::Write as _;

use tracing::{info, warn};

use super::widget::{escape_html, unique_dom_id, Widget};
use crate::api::{PadClient, Transport};
use crate::config::PadConfig;
use crate::records::CardRecord;
use crate::table::Table;

pub const SMALL_IMAGE_WIDTH: u32 = 300;
pub const FULL_IMAGE_WIDTH: u32 = 800;
/// Enlarged width for gallery tiles.
pub const TILE_FULL_WIDTH: u32 = 600;

pub const CARDS_PER_ROW_FROM_TABLE: usize = 2;
pub const CARDS_PER_ROW_BY_ID: usize = 3;

const FIELD_BACKGROUND: &str = "#5c6e62";
const VALUE_BACKGROUND: &str = "#f9f9f9";

const INFO_TABLE_STYLE: &str = r#"<style>
    table.pad-card-info {
        font-family: sans-serif;
        font-size: 14px;
        border-collapse: collapse;
        width: 500px;
    }
    table.pad-card-info td, table.pad-card-info th {
        border: 1px solid #dddddd;
        text-align: left;
        padding: 4px;
    }
    table.pad-card-info th {
        background-color: FIELD_BG;
        color: white;
        text-align: left;
        width: 120px;
        padding-left: 20px;
    }
    table.pad-card-info td {
        padding-left: 10px;
    }
    table.pad-card-info tr:nth-child(even) {
        background-color: VALUE_BG;
    }
    table.pad-card-info tr:hover {
        background-color: #eeeee0;
    }
</style>"#;

/// Image that toggles between `small` and `full` width on click, moving into
/// a full-screen overlay while enlarged.
fn zoomable_image(image_id: &str, image_url: &str, small: u32, full: u32, caption: Option<&str>) -> String {
    let id = unique_dom_id(image_id);
    let url = escape_html(image_url);
    let mut html = String::new();
    let _ = write!(html, r#"<div id="imageContainer_{id}">"#);
    if let Some(caption) = caption {
        html.push_str(caption);
    }
    let _ = write!(
        html,
        r#"<img id="zoomableImage_{id}" src="{url}" alt="Image" style="width:{small}px; cursor: pointer;"
    onclick="
        var img = document.getElementById('zoomableImage_{id}');
        var overlay = document.getElementById('overlay_{id}');
        if (img.style.width == '{small}px') {{
            img.style.width = '{full}px';
            overlay.style.display = 'flex';
            overlay.style.alignItems = 'flex-start';
            overlay.appendChild(img);
        }} else {{
            img.style.width = '{small}px';
            document.getElementById('imageContainer_{id}').appendChild(img);
            overlay.style.display = 'none';
        }}
    ">
</div>
<div id="overlay_{id}" style="position: fixed; top: 0; left: 0; width: 100vw; height: 100vh; display: none; background-color: rgba(255,255,255,0.9); z-index: 1000; align-items: flex-start; justify-content: center; overflow: auto;">
</div>"#
    );
    html
}

fn info_table(record: &CardRecord) -> String {
    let mut html = INFO_TABLE_STYLE
        .replace("FIELD_BG", FIELD_BACKGROUND)
        .replace("VALUE_BG", VALUE_BACKGROUND);
    html.push_str(r#"<table class="pad-card-info">"#);
    for (label, value) in record.display_fields() {
        let _ = write!(
            html,
            "<tr><th>{}</th><td>{}</td></tr>",
            escape_html(label),
            escape_html(&value.display())
        );
    }
    html.push_str("</table>");
    html
}

/// Zoomable image next to the card's metadata table.
pub fn card_widget(image_url: &str, record: &CardRecord) -> Widget {
    let image = zoomable_image(
        &record.id.display(),
        image_url,
        SMALL_IMAGE_WIDTH,
        FULL_IMAGE_WIDTH,
        None,
    );
    Widget::VBox(vec![
        Widget::html("<br>"),
        Widget::HBox(vec![
            Widget::VBox(vec![Widget::html(image)]),
            Widget::html(info_table(record)),
        ]),
    ])
}

/// Gallery tile: id and sample id above a zoomable image.
pub fn zoomable_tile(image_id: &str, sample_id: &str, image_url: &str) -> Widget {
    let caption = format!(
        r#"<div style="position: relative; font-size: 14px; color: {}; margin-bottom: 5px;"><strong>ID:</strong> {} <strong>Sample ID:</strong> {}</div>"#,
        FIELD_BACKGROUND,
        escape_html(image_id),
        escape_html(sample_id)
    );
    Widget::html(zoomable_image(
        image_id,
        image_url,
        SMALL_IMAGE_WIDTH,
        TILE_FULL_WIDTH,
        Some(&caption),
    ))
}

/// Stack widgets vertically, `per_row` to a horizontal row.
pub fn cards_grid(widgets: Vec<Widget>, per_row: usize) -> Widget {
    let per_row = per_row.max(1);
    let mut rows = Vec::new();
    let mut widgets = widgets.into_iter().peekable();
    while widgets.peek().is_some() {
        rows.push(Widget::HBox(widgets.by_ref().take(per_row).collect()));
    }
    Widget::VBox(rows)
}

/// One card widget per table row, two to a row.
pub fn cards_from_table(cards: &Table, config: &PadConfig) -> Widget {
    let widgets = cards
        .rows()
        .iter()
        .map(|row| {
            let record = CardRecord::from_row(row);
            card_widget(&record.image_url(config), &record)
        })
        .collect();
    cards_grid(widgets, CARDS_PER_ROW_FROM_TABLE)
}

/// Fetch one card and render it, or `None` if the card could not be retrieved.
pub fn card_view<T: Transport>(client: &PadClient<T>, card_id: i64) -> Option<Widget> {
    let Some(record) = fetch_record(client, card_id) else {
        warn!("Failed to retrieve data for card {}", card_id);
        return None;
    };
    Some(card_widget(&record.image_url(client.config()), &record))
}

/// Fetch and render several cards, three to a row. Cards that cannot be
/// retrieved are replaced by a "no data" notice.
pub fn cards_view<T: Transport>(client: &PadClient<T>, card_ids: &[i64]) -> Widget {
    let widgets = card_ids
        .iter()
        .map(|&card_id| match fetch_record(client, card_id) {
            Some(record) => card_widget(&record.image_url(client.config()), &record),
            None => super::notice::missing_card_notice(card_id),
        })
        .collect();
    cards_grid(widgets, CARDS_PER_ROW_BY_ID)
}

fn fetch_record<T: Transport>(client: &PadClient<T>, card_id: i64) -> Option<CardRecord> {
    let table = client.get_card(card_id)?;
    let row = table.row(0)?;
    let record = CardRecord::from_row_with_id(row, card_id);
    if !record.has_image() {
        info!("No valid image found for card {}", card_id);
    }
    Some(record)
}
