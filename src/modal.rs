use crate::cart::CartStore;
use crate::errors::WidgetError;
use crate::models::{CartEntry, PlantRecord, RawPlant};
use crate::normalize::normalize_plant;
use crate::page::ModalView;
use crate::render::price_label;
use tracing::{debug, error};

pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x200?text=No+Image";
pub const NO_DESCRIPTION: &str = "No description available.";
pub const LOADING_TEXT: &str = "Loading...";
pub const DETAIL_ERROR_TEXT: &str = "Error loading details";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Loading,
    Loaded,
    Error,
}

/// Ticket for one in-flight detail fetch. Only the most recent ticket may
/// paint the modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    pub id: String,
    generation: u64,
}

#[derive(Debug, Default)]
pub struct DetailModal {
    state: ModalState,
    current: Option<PlantRecord>,
    generation: u64,
}

impl DetailModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    /// Plant remembered from the last successful load.
    pub fn current(&self) -> Option<&PlantRecord> {
        self.current.as_ref()
    }

    /// Shows the modal in its loading state and hands back the ticket the
    /// caller fetches with. A missing id leaves everything untouched.
    pub fn begin(&mut self, id: Option<&str>, view: &mut ModalView) -> Result<DetailRequest, WidgetError> {
        let id = match id {
            Some(id) if !id.is_empty() => id,
            _ => return Err(WidgetError::missing("plant")),
        };

        self.generation += 1;
        self.state = ModalState::Loading;
        view.clear_fields();
        view.name = LOADING_TEXT.to_string();
        view.visible = true;

        Ok(DetailRequest {
            id: id.to_string(),
            generation: self.generation,
        })
    }

    /// Applies the outcome of a detail fetch. Returns `false` when the ticket
    /// is stale or the modal was dismissed while the fetch was in flight.
    pub fn finish(
        &mut self,
        request: &DetailRequest,
        outcome: Result<RawPlant, WidgetError>,
        view: &mut ModalView,
    ) -> bool {
        if request.generation != self.generation || self.state == ModalState::Closed {
            debug!("discarding stale detail response for plant {}", request.id);
            return false;
        }

        match outcome {
            Ok(raw) => {
                let plant = normalize_plant(&raw);
                view.name = plant.name.clone();
                view.image_src = if plant.image.is_empty() {
                    PLACEHOLDER_IMAGE.to_string()
                } else {
                    plant.image.clone()
                };
                view.category = plant.category.clone();
                view.price = price_label(plant.price);
                view.description = if plant.description.is_empty() {
                    NO_DESCRIPTION.to_string()
                } else {
                    plant.description.clone()
                };
                self.current = Some(plant);
                self.state = ModalState::Loaded;
            }
            Err(err) => {
                error!("Error loading plant detail {}: {err}", request.id);
                view.name = DETAIL_ERROR_TEXT.to_string();
                self.state = ModalState::Error;
            }
        }
        true
    }

    /// Puts the remembered plant in the cart and dismisses the modal. Does
    /// nothing when no plant has loaded yet.
    pub fn add_current_to_cart(&mut self, cart: &mut CartStore, view: &mut ModalView) -> bool {
        let Some(plant) = self.current.as_ref() else {
            return false;
        };
        cart.add(CartEntry::from(plant));
        self.close(view);
        true
    }

    pub fn close(&mut self, view: &mut ModalView) {
        self.state = ModalState::Closed;
        view.visible = false;
    }
}
