use serde_json::Value;
use tracing::{debug, info, warn};

use super::http_client::{HttpTransport, Transport};
use super::selector::ProjectSelector;
use crate::config::PadConfig;
use crate::error::PadError;
use crate::records::PROJECT_COLUMNS;
use crate::table::{value_text, Table};

/// Column the API nests project sample names under.
const NESTED_SAMPLE_NAMES: &str = "sample_names.sample_names";

/// Cards found for a sample id, and the project they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleMatch {
    pub project_id: i64,
    pub project_name: Option<String>,
    pub cards: Table,
}

/// Read-only client for the PAD REST API.
///
/// Every fetch follows the same contract: a transport failure, a non-2xx
/// status, or an unparseable body is logged once and comes back as `None`.
/// A successful response is normalized into a [`Table`], so an empty list is
/// `Some` of a zero-row table.
pub struct PadClient<T: Transport = HttpTransport> {
    config: PadConfig,
    transport: T,
}

impl PadClient<HttpTransport> {
    pub fn new(config: PadConfig) -> Result<Self, PadError> {
        let transport = HttpTransport::new(&config.user_agent)?;
        Ok(Self { config, transport })
    }

    /// Client built from the user config file and `PAD_*` environment overrides.
    pub fn from_env() -> Result<Self, PadError> {
        let config = PadConfig::load().map_err(|e| PadError::Config(format!("{:#}", e)))?;
        Self::new(config)
    }
}

impl<T: Transport> PadClient<T> {
    pub fn with_transport(config: PadConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &PadConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// GET `{api_url}{path}` and parse the body, surfacing every failure.
    pub fn fetch_json(&self, path: &str) -> Result<Value, PadError> {
        let url = self.config.endpoint(path);
        let response = self.transport.get(&url)?.error_for_status(&url)?;
        let value = serde_json::from_slice(&response.body)?;
        Ok(value)
    }

    /// GET and normalize, collapsing any failure into `None` after logging it.
    pub fn fetch_table(&self, path: &str, label: &str) -> Option<Table> {
        match self.fetch_json(path) {
            Ok(value) => {
                let table = Table::from_json(value);
                debug!("Fetched {}: {} rows, {} columns", label, table.len(), table.columns().len());
                Some(table)
            }
            Err(PadError::Status { status, url }) => {
                warn!("Error accessing {} data: HTTP {} from {}", label, status, url);
                None
            }
            Err(e) => {
                warn!("Error accessing {} data: {}", label, e);
                None
            }
        }
    }

    pub fn get_card_issues(&self) -> Option<Table> {
        self.fetch_table("/cards/issues", "card issues")
    }

    /// All projects, with all-null columns dropped and columns in the fixed
    /// project order.
    pub fn get_projects(&self) -> Option<Table> {
        let projects = self.fetch_table("/projects", "projects")?;
        let projects = projects
            .drop_all_null_columns()
            .rename_column(NESTED_SAMPLE_NAMES, "sample_names")
            .select_columns(PROJECT_COLUMNS);
        info!("Retrieved {} projects", projects.len());
        Some(projects)
    }

    pub fn get_project(&self, project_id: i64) -> Option<Table> {
        self.fetch_table(
            &format!("/projects/{}", project_id),
            &format!("project {}", project_id),
        )
    }

    pub fn get_card(&self, card_id: i64) -> Option<Table> {
        self.fetch_table(&format!("/cards/{}", card_id), &format!("card {}", card_id))
    }

    fn fetch_project_cards(&self, project_id: i64) -> Option<Table> {
        self.fetch_table(
            &format!("/projects/{}/cards", project_id),
            &format!("project {} cards", project_id),
        )
    }

    /// Cards for one project, several projects, or every listed project,
    /// concatenated in the order the ids were supplied.
    ///
    /// Projects whose fetch fails are skipped. Returns `None` only when no
    /// project produced data.
    pub fn get_project_cards(&self, selector: impl Into<ProjectSelector>) -> Option<Table> {
        let selector = selector.into();
        let project_ids = match selector.explicit_ids() {
            Some(ids) => ids,
            None => self.get_projects()?.column_i64("id"),
        };

        let tables: Vec<Table> = project_ids
            .iter()
            .filter_map(|&id| self.fetch_project_cards(id))
            .collect();

        if tables.is_empty() {
            warn!("No data was retrieved for project ids {:?}", project_ids);
            return None;
        }

        let combined = Table::concat(tables);
        info!(
            "Retrieved {} cards across {} projects",
            combined.len(),
            project_ids.len()
        );
        Some(combined)
    }

    /// Like [`get_project_cards`](Self::get_project_cards), for selectors that
    /// arrive as JSON (`null`, an integer, or a list of integers).
    pub fn get_project_cards_json(&self, project_ids: &Value) -> Result<Option<Table>, PadError> {
        let selector = ProjectSelector::from_json(project_ids)?;
        Ok(self.get_project_cards(selector))
    }

    /// Scan every project's cards, in listing order, for `sample_id`.
    ///
    /// The first project with at least one matching card wins; later
    /// projects are not fetched, so a sample id shared by two projects is
    /// only reported for the first.
    pub fn find_cards_by_sample_id(&self, sample_id: &str) -> Option<SampleMatch> {
        let wanted = sample_id.trim();
        let project_ids = self.get_projects()?.column_i64("id");

        for project_id in project_ids {
            let Some(cards) = self.fetch_project_cards(project_id) else {
                continue;
            };
            if !cards.has_column("sample_id") {
                continue;
            }

            let matched = cards.filter_rows(|row| {
                row.get("sample_id")
                    .filter(|v| !v.is_null())
                    .is_some_and(|v| value_text(v) == wanted)
            });
            if matched.is_empty() {
                continue;
            }

            let project_name = self
                .get_project(project_id)
                .and_then(|t| t.cell(0, "project_name").map(value_text));
            info!(
                "Found {} cards with sample id {} in project {} (id={})",
                matched.len(),
                wanted,
                project_name.as_deref().unwrap_or("<unnamed>"),
                project_id
            );
            return Some(SampleMatch {
                project_id,
                project_name,
                cards: matched,
            });
        }

        warn!("No data was retrieved for sample id {}", wanted);
        None
    }

    pub fn get_neural_networks(&self) -> Option<Table> {
        self.fetch_table("/neural-networks", "neural networks")
    }

    pub fn get_neural_network(&self, network_id: i64) -> Option<Table> {
        self.fetch_table(
            &format!("/neural-networks/{}", network_id),
            &format!("neural network {}", network_id),
        )
    }
}
