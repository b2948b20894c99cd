//! Application controller: owns the page session state and routes UI events
//! to the catalog, the cart and the detail modal.

use crate::api::PlantSource;
use crate::cart::CartStore;
use crate::config::WidgetConfig;
use crate::errors::WidgetError;
use crate::modal::DetailModal;
use crate::models::{CartEntry, CategoryRecord, CategorySelection, RawPlant};
use crate::normalize::{DEFAULT_NAME, normalize_plant, parse_numeric};
use crate::page::{ClickTarget, MODAL_ID, Page, Region};
use crate::render::{
    ADD_TO_CART_CLASS, ALL_TREES_ID, OPEN_DETAIL_CLASS, REMOVE_ITEM_CLASS, error_placeholder,
    loading_placeholder, render_cart, render_categories, render_plants,
};
use chrono::{Duration, Local};
use std::collections::BTreeSet;
use tracing::{debug, error, info, warn};

pub const MISSING_PLANT_ID: &str = "Missing plant id for details.";
pub const MISSING_CATEGORY_ID: &str = "Missing category id.";

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Click { region: Region, target: ClickTarget },
    KeyDown { key: String },
}

impl UiEvent {
    pub fn click(region: Region, target: ClickTarget) -> Self {
        Self::Click { region, target }
    }

    pub fn key(key: impl Into<String>) -> Self {
        Self::KeyDown { key: key.into() }
    }
}

pub struct App<S> {
    source: S,
    page: Page,
    cart: CartStore,
    modal: DetailModal,
    listeners: BTreeSet<Region>,
    notice_ttl: Duration,
}

impl<S: PlantSource> App<S> {
    pub fn new(source: S, config: &WidgetConfig) -> Self {
        let page = Page::new(config.modal_add_button);
        let listeners = register_listeners(&page);
        Self {
            source,
            page,
            cart: CartStore::new(),
            modal: DetailModal::new(),
            listeners,
            notice_ttl: config.notice_ttl,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn modal(&self) -> &DetailModal {
        &self.modal
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Categories and the full plant listing, fetched concurrently. Either may
    /// fail without affecting the other.
    pub async fn load_initial(&mut self) {
        self.page.product_list = vec![loading_placeholder()];
        let (categories, plants) = tokio::join!(
            self.source.list_categories(),
            self.source.list_all_plants()
        );
        self.paint_categories(categories);
        self.paint_plants(plants);
        info!(
            "initial load finished: {} categories, {} listing nodes",
            self.page.category_list.len().saturating_sub(1),
            self.page.product_list.len()
        );
    }

    pub async fn select_category(&mut self, selection: CategorySelection) -> Result<(), WidgetError> {
        match selection {
            CategorySelection::All => {
                self.page.product_list = vec![loading_placeholder()];
                let plants = self.source.list_all_plants().await;
                self.paint_plants(plants);
            }
            CategorySelection::ById(Some(id)) if !id.is_empty() => {
                self.page.product_list = vec![loading_placeholder()];
                let plants = self.source.list_plants_by_category(&id).await;
                self.paint_plants(plants);
            }
            CategorySelection::ById(_) => {
                self.advise(MISSING_CATEGORY_ID);
                return Err(WidgetError::missing("category"));
            }
        }
        Ok(())
    }

    pub async fn open_detail(&mut self, id: Option<&str>) -> Result<(), WidgetError> {
        let request = match self.modal.begin(id, &mut self.page.modal) {
            Ok(request) => request,
            Err(err) => {
                self.advise(MISSING_PLANT_ID);
                return Err(err);
            }
        };
        let outcome = self.source.get_plant_detail(&request.id).await;
        self.modal.finish(&request, outcome, &mut self.page.modal);
        Ok(())
    }

    pub fn add_to_cart(&mut self, entry: CartEntry) {
        debug!("adding {} to cart", entry.name);
        self.cart.add(entry);
        self.paint_cart();
    }

    pub fn remove_from_cart(&mut self, position: usize) -> Result<CartEntry, WidgetError> {
        let removed = self.cart.remove_at(position)?;
        self.paint_cart();
        Ok(removed)
    }

    pub fn add_current_to_cart(&mut self) -> bool {
        let added = self
            .modal
            .add_current_to_cart(&mut self.cart, &mut self.page.modal);
        if added {
            self.paint_cart();
        }
        added
    }

    pub fn close_detail(&mut self) {
        self.modal.close(&mut self.page.modal);
    }

    pub fn prune_notices(&mut self) {
        self.page.prune_notices(Local::now(), self.notice_ttl);
    }

    pub async fn dispatch(&mut self, event: UiEvent) {
        match event {
            UiEvent::KeyDown { key } => {
                if key == "Escape" {
                    self.close_detail();
                }
            }
            UiEvent::Click { region, target } => {
                if !self.listeners.contains(&region) {
                    debug!("no listener bound for {region:?}");
                    return;
                }
                self.on_click(region, target).await;
            }
        }
    }

    async fn on_click(&mut self, region: Region, target: ClickTarget) {
        match region {
            Region::CategoryList => {
                if !target.is_tag("button") {
                    return;
                }
                let selection = if target.id.as_deref() == Some(ALL_TREES_ID) {
                    CategorySelection::All
                } else {
                    CategorySelection::ById(target.data("id").map(str::to_string))
                };
                // Missing ids already surfaced as a notice.
                let _ = self.select_category(selection).await;
            }
            Region::ProductList => {
                if target.has_class(OPEN_DETAIL_CLASS) {
                    let _ = self.open_detail(target.data("id")).await;
                }
                if target.has_class(ADD_TO_CART_CLASS) {
                    self.add_to_cart(entry_from_target(&target));
                }
            }
            Region::CartItems => {
                if !target.has_class(REMOVE_ITEM_CLASS) {
                    return;
                }
                let raw = target.data("index").unwrap_or_default();
                let result = match raw.trim().parse::<usize>() {
                    Ok(position) => self.remove_from_cart(position),
                    Err(_) => Err(WidgetError::index(raw, self.cart.len())),
                };
                if let Err(err) = result {
                    warn!("cart removal rejected: {err}");
                }
            }
            Region::Modal => {
                if target.id.as_deref() == Some(MODAL_ID) {
                    self.close_detail();
                }
            }
            Region::ModalClose | Region::ModalBottomClose => self.close_detail(),
            Region::ModalAddToCart => {
                self.add_current_to_cart();
            }
        }
    }

    fn paint_categories(&mut self, categories: Result<Vec<CategoryRecord>, WidgetError>) {
        self.page.category_list = match categories {
            Ok(categories) => render_categories(&categories),
            Err(err) => {
                // Painted in the category list, not the listing area: the
                // plants fetch runs concurrently and owns the listing.
                error!("failed to load categories: {err}");
                vec![error_placeholder("categories")]
            }
        };
    }

    fn paint_plants(&mut self, plants: Result<Vec<RawPlant>, WidgetError>) {
        self.page.product_list = match plants {
            Ok(raw) => {
                let plants: Vec<_> = raw.iter().map(normalize_plant).collect();
                render_plants(&plants)
            }
            Err(err) => {
                error!("failed to load plants: {err}");
                vec![error_placeholder("plants")]
            }
        };
    }

    fn paint_cart(&mut self) {
        let view = render_cart(&self.cart.snapshot());
        self.page.cart_items = view.items;
        self.page.cart_total = view.total;
    }

    fn advise(&mut self, message: &str) {
        warn!("{message}");
        self.page.push_notice(message);
    }
}

/// Delegated listeners, bound once per container when the widget starts.
fn register_listeners(page: &Page) -> BTreeSet<Region> {
    let mut listeners = BTreeSet::from([
        Region::CategoryList,
        Region::ProductList,
        Region::CartItems,
        Region::Modal,
        Region::ModalClose,
        Region::ModalBottomClose,
    ]);
    if page.has_modal_add_button() {
        listeners.insert(Region::ModalAddToCart);
    }
    listeners
}

fn entry_from_target(target: &ClickTarget) -> CartEntry {
    let id = target
        .data("id")
        .filter(|id| !id.is_empty())
        .map(str::to_string);
    let name = target
        .data("name")
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_NAME);
    let price = target.data("price").map(parse_numeric).unwrap_or(0.0);
    CartEntry::new(id, name, price)
}
