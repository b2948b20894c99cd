pub mod api;
pub mod app;
pub mod cart;
pub mod config;
pub mod errors;
pub mod modal;
pub mod models;
pub mod normalize;
pub mod page;
pub mod render;
pub mod view;

pub use api::{ApiClient, PlantSource};
pub use app::{App, UiEvent};
pub use cart::CartStore;
pub use config::WidgetConfig;
pub use errors::{ApiError, WidgetError};
pub use page::{ClickTarget, Page, Region, render_document};
