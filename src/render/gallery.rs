//! Tabbed galleries of card thumbnails grouped by a column.

use serde_json::Value;
use tracing::{debug, warn};

use super::card::{zoomable_tile, SMALL_IMAGE_WIDTH};
use super::widget::{escape_html, unique_dom_id, Widget};
use crate::config::PadConfig;
use crate::records::{standardize_name, MISSING};
use crate::table::{value_text, Table};

pub const DEFAULT_IMAGES_PER_ROW: usize = 5;
pub const OUTPUT_HEIGHT_PX: u32 = 1000;
const GRID_GAP_PX: u32 = 10;
const URL_COLUMN: &str = "url";

/// Uppercase the first character and lowercase the rest.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn cell_text(value: Option<&Value>) -> String {
    value.map(value_text).unwrap_or_else(|| MISSING.to_string())
}

/// Tabs of thumbnail grids, one tab per distinct value of `group_column`,
/// inside a fixed-height scrolling area. Rows need a `url` column.
pub fn group_tabs(cards: &Table, group_column: &str, images_per_row: usize) -> Widget {
    let label = capitalize(group_column);
    let images_per_row = images_per_row.max(1);

    let groups = cards.group_by(group_column);
    if groups.is_empty() {
        warn!("No rows have a value for '{}'", group_column);
    }

    let mut titles = Vec::with_capacity(groups.len());
    let mut panels = Vec::with_capacity(groups.len());
    for (key, group) in &groups {
        let value = escape_html(&value_text(key));
        debug!("Group {} = {}: {} cards", group_column, value, group.len());

        let header = Widget::html(format!(
            r#"<div style="font-size: 18px; color: #5c6e62;"><strong>{}:</strong> {} (#Cards: {})</div><hr style="border: 1px solid #ccc; margin-top: 10px;">"#,
            escape_html(&label),
            value,
            group.len()
        ));

        let tiles = group
            .rows()
            .iter()
            .map(|row| {
                zoomable_tile(
                    &cell_text(row.get("id").filter(|v| !v.is_null())),
                    &cell_text(row.get("sample_id").filter(|v| !v.is_null())),
                    &cell_text(row.get(URL_COLUMN).filter(|v| !v.is_null())),
                )
            })
            .collect();

        panels.push(Widget::VBox(vec![
            header,
            Widget::Grid {
                columns: images_per_row,
                column_width_px: SMALL_IMAGE_WIDTH,
                gap_px: GRID_GAP_PX,
                children: tiles,
            },
        ]));
        titles.push(format!("{} ({})", value_text(key), group.len()));
    }

    Widget::Output {
        height_px: OUTPUT_HEIGHT_PX,
        children: vec![
            Widget::html(format!(
                "<h2 style='text-align: center;'>Grouped by {}</h2>",
                escape_html(&label)
            )),
            Widget::Tabs {
                id: unique_dom_id(&format!("pad-tabs-{}", standardize_name(group_column))),
                titles,
                children: panels,
            },
        ],
    }
}

/// Add an image `url` column from `processed_file_location` (placeholder
/// when absent) and render [`group_tabs`].
pub fn grouped_cards(cards: &Table, group_column: &str, images_per_row: usize, config: &PadConfig) -> Widget {
    let with_urls = cards.clone().with_column(URL_COLUMN, |row| {
        let url = row
            .get("processed_file_location")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(|location| config.image_url(location))
            .unwrap_or_else(|| config.placeholder_image_url.clone());
        Value::String(url)
    });
    group_tabs(&with_urls, group_column, images_per_row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cards() -> Table {
        Table::from_json(json!([
            {"id": 1, "sample_id": 10, "issue": {"name": "Smudged"}, "processed_file_location": "/p/1.png"},
            {"id": 2, "sample_id": 11, "issue": {"name": "Blurry"}, "processed_file_location": "/p/2.png"},
            {"id": 3, "sample_id": 12, "issue": {"name": "Smudged"}},
            {"id": 4, "sample_id": 13}
        ]))
    }

    fn tabs(widget: &Widget) -> (&Vec<String>, &Vec<Widget>) {
        match &widget.children()[1] {
            Widget::Tabs { titles, children, .. } => (titles, children),
            other => panic!("expected tabs, got {other:?}"),
        }
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("issue.name"), "Issue.name");
        assert_eq!(capitalize("SAMPLE"), "Sample");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_grouped_cards_titles_and_counts() {
        let widget = grouped_cards(&cards(), "issue.name", 5, &PadConfig::default());
        let (titles, panels) = tabs(&widget);
        assert_eq!(titles, &vec!["Blurry (1)".to_string(), "Smudged (2)".to_string()]);
        assert_eq!(panels.len(), 2);

        let html = widget.to_html();
        assert!(html.contains("Grouped by Issue.name"));
        assert!(html.contains("<strong>Issue.name:</strong> Smudged (#Cards: 2)"));
        assert!(html.contains("repeat(5, 300px)"));
        assert!(html.contains(r#"height: 1000px; overflow-y: auto;"#));
    }

    #[test]
    fn test_grouped_cards_resolve_urls() {
        let html = grouped_cards(&cards(), "issue.name", 3, &PadConfig::default()).to_html();
        assert!(html.contains(r#"src="https://pad.crc.nd.edu/p/1.png""#));
        // card 3 has no processed file
        assert!(html.contains(r#"src="https://via.placeholder.com/300""#));
        // card 4 has no issue and is not grouped
        assert!(!html.contains("zoomableImage_4-"));
    }

    #[test]
    fn test_same_column_twice_gets_distinct_tab_ids() {
        let config = PadConfig::default();
        let first = grouped_cards(&cards(), "issue.name", 5, &config);
        let second = grouped_cards(&cards(), "issue.name", 5, &config);
        let tab_id = |widget: &Widget| match &widget.children()[1] {
            Widget::Tabs { id, .. } => id.clone(),
            other => panic!("expected tabs, got {other:?}"),
        };
        assert!(tab_id(&first).starts_with("pad-tabs-issue_name-"));
        assert_ne!(tab_id(&first), tab_id(&second));
    }

    #[test]
    fn test_group_tabs_with_no_values() {
        let widget = group_tabs(&cards(), "camera_type_1", 5);
        let (titles, _) = tabs(&widget);
        assert!(titles.is_empty());
    }
}
