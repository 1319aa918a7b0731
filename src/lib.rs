//! Client for the PAD diagnostic-card service and HTML widgets for showing
//! cards in a notebook or browser.
//!
//! ```no_run
//! use pad_client::{render, PadClient};
//!
//! pad_client::init_tracing();
//! let client = PadClient::from_env()?;
//! if let Some(cards) = client.get_project_cards(vec![3, 4]) {
//!     let widget = render::grouped_cards(&cards, "issue.name", 5, client.config());
//!     render::write_document("cards.html".as_ref(), "Cards", &widget)?;
//! }
//! # Ok::<(), pad_client::PadError>(())
//! ```

pub mod api;
pub mod config;
mod error;
pub mod records;
pub mod render;
pub mod table;

pub use api::{HttpResponse, HttpTransport, PadClient, ProjectSelector, SampleMatch, Transport};
pub use config::PadConfig;
pub use error::PadError;
pub use records::{CardRecord, FieldValue, ProjectRecord};
pub use table::{Row, Table};

/// Install a `tracing` fmt subscriber filtered by `RUST_LOG` (default `info`).
/// Calling it again after a subscriber is set is a no-op.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}
