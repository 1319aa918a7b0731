//! Presenter: turns normalized card data into widget markup.

pub mod card;
pub mod gallery;
pub mod image;
pub mod notice;
pub mod page;
pub mod widget;

pub use self::card::{card_view, card_widget, cards_from_table, cards_grid, cards_view, zoomable_tile};
pub use self::gallery::{group_tabs, grouped_cards};
pub use self::image::{create_thumbnail, load_image, thumbnail_data_uri};
pub use self::notice::sample_search_banner;
pub use self::page::{document, write_document};
pub use self::widget::Widget;
