use super::widget::{escape_html, Widget};
use crate::api::SampleMatch;

const NOTICE_FONT: &str = "'Courier New', monospace";
const FOUND_COLOR: &str = "#1d81df";
const MISSING_COLOR: &str = "darkred";

fn notice(color: &str, body: String) -> Widget {
    Widget::html(format!(
        r#"<div style="font-family: {}; color: {};">{}</div>"#,
        NOTICE_FONT, color, body
    ))
}

/// Shown in place of a card that could not be fetched.
pub fn missing_card_notice(card_id: i64) -> Widget {
    notice(
        MISSING_COLOR,
        format!("&#128308; No data was retrieved for card <strong>{}</strong>.", card_id),
    )
}

/// Outcome of a sample-id search.
pub fn sample_search_banner(sample_id: &str, result: Option<&SampleMatch>) -> Widget {
    let sample_id = escape_html(sample_id);
    match result {
        Some(found) => notice(
            FOUND_COLOR,
            format!(
                "&#128077; One or more cards with the <strong>Sample ID {}</strong> were found in the <strong>Project {} (ID={})</strong>",
                sample_id,
                escape_html(found.project_name.as_deref().unwrap_or("N/A")),
                found.project_id
            ),
        ),
        None => notice(
            MISSING_COLOR,
            format!(
                "&#128308; No data was retrieved for the provided <strong>Sample ID {}</strong>.",
                sample_id
            ),
        ),
    }
}
