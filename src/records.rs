//! Typed views over normalized rows.

use serde::Serialize;
use serde_json::Value;

use crate::config::PadConfig;
use crate::table::{value_text, Row};

/// Shown for any field the API response did not carry.
pub const MISSING: &str = "N/A";

/// Fixed column order for project listings.
pub const PROJECT_COLUMNS: &[&str] = &[
    "id",
    "project_name",
    "annotation",
    "test_name",
    "sample_names",
    "neutral_filler",
    "qpc20",
    "qpc50",
    "qpc80",
    "qpc100",
    "user_name",
    "notes",
];

/// A value in a card's label/value table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    pub fn missing() -> Self {
        FieldValue::Text(MISSING.to_string())
    }

    /// Booleans render as Yes/No, everything else as its text.
    pub fn display(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Flag(true) => "Yes".to_string(),
            FieldValue::Flag(false) => "No".to_string(),
        }
    }
}

impl From<&Value> for FieldValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Bool(b) => FieldValue::Flag(*b),
            Value::Null => FieldValue::missing(),
            other => FieldValue::Text(value_text(other)),
        }
    }
}

/// One diagnostic card, with every display field resolved to a value or the
/// missing marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardRecord {
    pub id: FieldValue,
    pub sample_id: FieldValue,
    pub sample_name: FieldValue,
    pub quantity: FieldValue,
    pub camera_type: FieldValue,
    pub issue: FieldValue,
    pub project_name: FieldValue,
    pub project_id: FieldValue,
    pub notes: FieldValue,
    pub date_of_creation: FieldValue,
    pub deleted: bool,
    pub processed_file_location: Option<String>,
}

impl CardRecord {
    pub fn from_row(row: &Row) -> Self {
        let field = |name: &str| lookup(row, name).map(FieldValue::from).unwrap_or_else(FieldValue::missing);

        // Normalized responses carry `issue.name`; older payloads have a bare `issue`.
        let issue = lookup(row, "issue.name")
            .or_else(|| lookup(row, "issue"))
            .map(FieldValue::from)
            .unwrap_or_else(FieldValue::missing);

        Self {
            id: field("id"),
            sample_id: field("sample_id"),
            sample_name: field("sample_name"),
            quantity: field("quantity"),
            camera_type: field("camera_type_1"),
            issue,
            project_name: field("project.project_name"),
            project_id: field("project.id"),
            notes: field("notes"),
            date_of_creation: field("date_of_creation"),
            deleted: lookup(row, "deleted").and_then(Value::as_bool).unwrap_or(false),
            processed_file_location: lookup(row, "processed_file_location")
                .and_then(Value::as_str)
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string),
        }
    }

    /// Same as [`from_row`](Self::from_row) but with the id the caller asked
    /// for, for single-card endpoints whose body may omit it.
    pub fn from_row_with_id(row: &Row, card_id: i64) -> Self {
        let mut record = Self::from_row(row);
        record.id = FieldValue::Text(card_id.to_string());
        record
    }

    /// Label/value pairs in display order.
    pub fn display_fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("ID", self.id.clone()),
            ("Sample ID", self.sample_id.clone()),
            ("Sample Name", self.sample_name.clone()),
            ("Quantity", self.quantity.clone()),
            ("Camera Type", self.camera_type.clone()),
            ("Issue", self.issue.clone()),
            ("Project Name", self.project_name.clone()),
            ("Project Id", self.project_id.clone()),
            ("Notes", self.notes.clone()),
            ("Date of Creation", self.date_of_creation.clone()),
            ("Deleted", FieldValue::Flag(self.deleted)),
        ]
    }

    pub fn has_image(&self) -> bool {
        self.processed_file_location.is_some()
    }

    /// Full image URL, or the configured placeholder when the card has no
    /// processed file.
    pub fn image_url(&self, config: &PadConfig) -> String {
        match &self.processed_file_location {
            Some(location) => config.image_url(location),
            None => config.placeholder_image_url.clone(),
        }
    }
}

/// A project and its quality-control thresholds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectRecord {
    pub id: Option<i64>,
    pub project_name: Option<String>,
    pub annotation: Option<String>,
    pub test_name: Option<String>,
    pub sample_names: Vec<String>,
    pub neutral_filler: Option<String>,
    pub qpc20: Option<f64>,
    pub qpc50: Option<f64>,
    pub qpc80: Option<f64>,
    pub qpc100: Option<f64>,
    pub user_name: Option<String>,
    pub notes: Option<String>,
}

impl ProjectRecord {
    pub fn from_row(row: &Row) -> Self {
        let text = |name: &str| lookup(row, name).map(value_text);
        let number = |name: &str| lookup(row, name).and_then(as_number);

        let sample_names = lookup(row, "sample_names")
            .or_else(|| lookup(row, "sample_names.sample_names"))
            .map(|v| match v {
                Value::Array(items) => items.iter().map(value_text).collect(),
                other => vec![value_text(other)],
            })
            .unwrap_or_default();

        Self {
            id: lookup(row, "id").and_then(Value::as_i64),
            project_name: text("project_name"),
            annotation: text("annotation"),
            test_name: text("test_name"),
            sample_names,
            neutral_filler: text("neutral_filler"),
            qpc20: number("qpc20"),
            qpc50: number("qpc50"),
            qpc80: number("qpc80"),
            qpc100: number("qpc100"),
            user_name: text("user_name"),
            notes: text("notes"),
        }
    }
}

/// Lowercase and hyphenate a display name, e.g. `"Sample Name"` -> `"sample-name"`.
pub fn standardize_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

fn lookup<'a>(row: &'a Row, name: &str) -> Option<&'a Value> {
    row.get(name).filter(|v| !v.is_null())
}

// Thresholds sometimes arrive as strings.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;
    use serde_json::json;

    fn first_row(value: Value) -> Row {
        Table::from_json(value).rows()[0].clone()
    }

    #[test]
    fn test_card_fields_resolve_nested_paths() {
        let row = first_row(json!({
            "id": 42275,
            "sample_id": 9911,
            "sample_name": "amoxicillin",
            "quantity": 100,
            "camera_type_1": "Pixel 3",
            "issue": {"id": 1, "name": "Blurry"},
            "project": {"id": 7, "project_name": "FHI360"},
            "notes": "",
            "date_of_creation": "2021-03-04T10:00:00",
            "deleted": true,
            "processed_file_location": "/var/www/html/images/padimages/processed/40000/42275_processed.png"
        }));
        let card = CardRecord::from_row(&row);
        assert_eq!(card.id, FieldValue::Text("42275".to_string()));
        assert_eq!(card.issue, FieldValue::Text("Blurry".to_string()));
        assert_eq!(card.project_id, FieldValue::Text("7".to_string()));
        assert_eq!(card.camera_type, FieldValue::Text("Pixel 3".to_string()));
        assert!(card.deleted);
        assert!(card.has_image());
    }

    #[test]
    fn test_card_missing_fields_use_defaults() {
        let row = first_row(json!({"id": 5}));
        let card = CardRecord::from_row(&row);
        assert_eq!(card.sample_name.display(), MISSING);
        assert_eq!(card.issue.display(), MISSING);
        assert!(!card.deleted);
        assert_eq!(card.processed_file_location, None);
    }

    #[test]
    fn test_empty_nested_objects_read_as_missing() {
        let row = first_row(json!({"id": 1, "issue": {}, "project": {}}));
        let card = CardRecord::from_row(&row);
        assert_eq!(card.issue.display(), MISSING);
        assert_eq!(card.project_name.display(), MISSING);
        assert_eq!(card.project_id.display(), MISSING);

        let project = ProjectRecord::from_row(&first_row(json!({"id": 3, "sample_names": {}})));
        assert!(project.sample_names.is_empty());
    }

    #[test]
    fn test_card_scalar_issue_fallback() {
        let row = first_row(json!({"id": 5, "issue": "Smudged"}));
        assert_eq!(CardRecord::from_row(&row).issue.display(), "Smudged");
    }

    #[test]
    fn test_display_fields_order_and_flags() {
        let row = first_row(json!({"id": 5, "deleted": false}));
        let fields = CardRecord::from_row(&row).display_fields();
        let labels: Vec<&str> = fields.iter().map(|(l, _)| *l).collect();
        assert_eq!(labels.first(), Some(&"ID"));
        assert_eq!(labels.last(), Some(&"Deleted"));
        assert_eq!(fields.len(), 11);
        assert_eq!(fields[10].1.display(), "No");
    }

    #[test]
    fn test_from_row_with_id_overrides() {
        let row = first_row(json!({"sample_id": 3}));
        let card = CardRecord::from_row_with_id(&row, 77);
        assert_eq!(card.id.display(), "77");
    }

    #[test]
    fn test_missing_image_uses_placeholder() {
        let config = PadConfig::default();
        let card = CardRecord::from_row(&first_row(json!({"id": 1, "processed_file_location": null})));
        assert_eq!(card.image_url(&config), config.placeholder_image_url);

        let blank = CardRecord::from_row(&first_row(json!({"id": 1, "processed_file_location": "  "})));
        assert_eq!(blank.image_url(&config), config.placeholder_image_url);
    }

    #[test]
    fn test_image_url_joins_host() {
        let config = PadConfig::default();
        let card = CardRecord::from_row(&first_row(json!({"processed_file_location": "/images/1.png"})));
        assert_eq!(card.image_url(&config), "https://pad.crc.nd.edu/images/1.png");
    }

    #[test]
    fn test_project_record_parses_thresholds() {
        let row = first_row(json!({
            "id": 3,
            "project_name": "FHI360",
            "sample_names": ["amoxicillin", "ceftriaxone"],
            "qpc20": 20,
            "qpc50": "50.5",
            "user_name": "pad"
        }));
        let project = ProjectRecord::from_row(&row);
        assert_eq!(project.id, Some(3));
        assert_eq!(project.sample_names, vec!["amoxicillin", "ceftriaxone"]);
        assert_eq!(project.qpc20, Some(20.0));
        assert_eq!(project.qpc50, Some(50.5));
        assert_eq!(project.qpc80, None);
        assert_eq!(project.annotation, None);
    }

    #[test]
    fn test_project_record_reads_nested_sample_names() {
        let row = first_row(json!({"id": 1, "sample_names": {"sample_names": ["a"]}}));
        assert_eq!(ProjectRecord::from_row(&row).sample_names, vec!["a"]);
    }

    #[test]
    fn test_standardize_name() {
        assert_eq!(standardize_name("Sample Name"), "sample-name");
        assert_eq!(standardize_name("FHI 360 Study"), "fhi-360-study");
    }
}
