use plant_cart::app::{MISSING_CATEGORY_ID, MISSING_PLANT_ID};
use plant_cart::modal::{DETAIL_ERROR_TEXT, ModalState};
use plant_cart::models::{CartEntry, CategoryRecord, CategorySelection, RawPlant};
use plant_cart::render::{ADD_TO_CART_CLASS, ALL_TREES_ID, OPEN_DETAIL_CLASS, REMOVE_ITEM_CLASS};
use plant_cart::{ApiError, App, ClickTarget, PlantSource, Region, UiEvent, WidgetConfig, WidgetError};
use serde_json::{Value, json};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

#[derive(Default)]
struct FakeSource {
    categories: Option<Vec<CategoryRecord>>,
    all: Option<Vec<Value>>,
    by_category: HashMap<String, Option<Vec<Value>>>,
    details: HashMap<String, Option<Value>>,
    calls: RefCell<Vec<String>>,
}

fn offline() -> WidgetError {
    WidgetError::Network(ApiError::Decode {
        url: "http://fake/api".to_string(),
        source: serde_json::from_str::<Value>("<html>down</html>").unwrap_err(),
    })
}

fn raws(values: &[Value]) -> Vec<RawPlant> {
    values.iter().map(RawPlant::from_value).collect()
}

impl PlantSource for FakeSource {
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, WidgetError> {
        self.calls.borrow_mut().push("categories".to_string());
        self.categories.clone().ok_or_else(offline)
    }

    async fn list_all_plants(&self) -> Result<Vec<RawPlant>, WidgetError> {
        self.calls.borrow_mut().push("plants".to_string());
        self.all.as_deref().map(raws).ok_or_else(offline)
    }

    async fn list_plants_by_category(&self, category_id: &str) -> Result<Vec<RawPlant>, WidgetError> {
        self.calls.borrow_mut().push(format!("category:{category_id}"));
        match self.by_category.get(category_id) {
            Some(Some(values)) => Ok(raws(values)),
            Some(None) => Err(offline()),
            None => Ok(Vec::new()),
        }
    }

    async fn get_plant_detail(&self, id: &str) -> Result<RawPlant, WidgetError> {
        self.calls.borrow_mut().push(format!("plant:{id}"));
        match self.details.get(id) {
            Some(Some(value)) => Ok(RawPlant::from_value(value)),
            _ => Err(offline()),
        }
    }
}

fn catalog() -> FakeSource {
    let mango = json!({ "id": 1, "name": "Mango Tree", "category": "Fruit Tree", "price": 120, "image": "mango.png", "description": "Sweet summer fruit" });
    let neem = json!({ "plant_id": "2", "plant_name": "Neem", "category_name": "Medicinal", "price": "80" });
    FakeSource {
        categories: Some(vec![
            CategoryRecord { id: Some("1".to_string()), label: "Fruit Tree".to_string() },
            CategoryRecord { id: Some("5".to_string()), label: "Bamboo".to_string() },
        ]),
        all: Some(vec![mango.clone(), neem.clone()]),
        by_category: HashMap::from([
            ("1".to_string(), Some(vec![mango.clone()])),
            ("5".to_string(), Some(Vec::new())),
            ("7".to_string(), None),
        ]),
        details: HashMap::from([
            ("1".to_string(), Some(mango)),
            ("2".to_string(), Some(neem)),
        ]),
        calls: RefCell::new(Vec::new()),
    }
}

fn app(source: FakeSource) -> App<FakeSource> {
    App::new(source, &WidgetConfig::default())
}

fn calls(app: &App<FakeSource>) -> Vec<String> {
    app.source().calls.borrow().clone()
}

fn find_target(app: &App<FakeSource>, region: Region, class: &str, nth: usize) -> ClickTarget {
    app.page()
        .targets(region)
        .into_iter()
        .filter(|t| t.has_class(class))
        .nth(nth)
        .expect("target not painted")
}

fn data_target(tag: &str, class: &str, pairs: &[(&str, &str)]) -> ClickTarget {
    ClickTarget {
        tag: tag.to_string(),
        classes: vec![class.to_string()],
        dataset: pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>(),
        ..ClickTarget::default()
    }
}

#[tokio::test]
async fn initial_load_paints_categories_and_plants() {
    let mut app = app(catalog());
    app.load_initial().await;

    let mut seen = calls(&app);
    seen.sort();
    assert_eq!(seen, vec!["categories", "plants"]);

    let categories = app.page().targets(Region::CategoryList);
    let buttons: Vec<_> = categories.iter().filter(|t| t.is_tag("button")).collect();
    assert_eq!(buttons.len(), 3);
    assert_eq!(buttons[0].id.as_deref(), Some(ALL_TREES_ID));

    let markup = app.page().product_markup();
    assert!(markup.contains("Mango Tree"));
    assert!(markup.contains("Neem"));
    assert!(markup.contains("৳80"));
    assert!(!markup.contains("Loading..."));
}

#[tokio::test]
async fn category_failure_does_not_block_plants() {
    let mut source = catalog();
    source.categories = None;
    let mut app = app(source);
    app.load_initial().await;

    let categories = plant_cart::view::render_all(&app.page().category_list);
    assert!(categories.contains("Error loading categories!"));
    assert!(app.page().product_markup().contains("Mango Tree"));
}

#[tokio::test]
async fn empty_category_shows_placeholder_not_error() {
    let mut app = app(catalog());
    app.load_initial().await;

    app.select_category(CategorySelection::ById(Some("5".to_string())))
        .await
        .unwrap();
    let markup = app.page().product_markup();
    assert!(markup.contains("No items found"));
    assert!(!markup.contains("Error"));
    assert!(!markup.contains("Mango Tree"));
    assert_eq!(app.page().product_list.len(), 1);
}

#[tokio::test]
async fn failed_category_listing_renders_error_block() {
    let mut app = app(catalog());
    app.select_category(CategorySelection::ById(Some("7".to_string())))
        .await
        .unwrap();
    assert!(app.page().product_markup().contains("Error loading plants!"));
}

#[tokio::test]
async fn category_clicks_route_by_sentinel() {
    let mut app = app(catalog());
    app.load_initial().await;

    let fruit = app
        .page()
        .targets(Region::CategoryList)
        .into_iter()
        .find(|t| t.data("id") == Some("1"))
        .unwrap();
    app.dispatch(UiEvent::click(Region::CategoryList, fruit)).await;
    assert!(!app.page().product_markup().contains("Neem"));

    let all = app
        .page()
        .targets(Region::CategoryList)
        .into_iter()
        .find(|t| t.id.as_deref() == Some(ALL_TREES_ID))
        .unwrap();
    app.dispatch(UiEvent::click(Region::CategoryList, all)).await;
    assert!(app.page().product_markup().contains("Neem"));

    let li = app
        .page()
        .targets(Region::CategoryList)
        .into_iter()
        .find(|t| t.is_tag("li"))
        .unwrap();
    app.dispatch(UiEvent::click(Region::CategoryList, li)).await;

    assert_eq!(
        calls(&app).iter().filter(|c| !c.starts_with("categories")).count(),
        3
    );
    assert!(calls(&app).contains(&"category:1".to_string()));
}

#[tokio::test]
async fn category_without_id_raises_notice() {
    let mut app = app(catalog());
    let err = app
        .select_category(CategorySelection::ById(None))
        .await
        .unwrap_err();
    assert!(matches!(err, WidgetError::MissingIdentifier { what: "category" }));
    assert!(calls(&app).is_empty());
    assert_eq!(app.page().notices()[0].message, MISSING_CATEGORY_ID);
}

#[tokio::test]
async fn card_clicks_fill_and_drain_the_cart() {
    let mut app = app(catalog());
    app.load_initial().await;

    let mango = find_target(&app, Region::ProductList, ADD_TO_CART_CLASS, 0);
    let neem = find_target(&app, Region::ProductList, ADD_TO_CART_CLASS, 1);
    app.dispatch(UiEvent::click(Region::ProductList, mango)).await;
    app.dispatch(UiEvent::click(Region::ProductList, neem)).await;

    assert_eq!(app.cart().len(), 2);
    assert_eq!(app.page().cart_total, "৳200");
    assert_eq!(app.page().targets(Region::CartItems).iter().filter(|t| t.is_tag("li")).count(), 2);

    let remove_first = find_target(&app, Region::CartItems, REMOVE_ITEM_CLASS, 0);
    app.dispatch(UiEvent::click(Region::CartItems, remove_first)).await;

    let snapshot = app.cart().snapshot();
    assert_eq!(snapshot.total, 80.0);
    assert_eq!(snapshot.entries, vec![CartEntry::new(Some("2".to_string()), "Neem", 80.0)]);
    assert_eq!(app.page().cart_total, "৳80");
}

#[tokio::test]
async fn cart_scenario_through_the_controller() {
    let mut app = app(catalog());
    assert_eq!(app.cart().total(), 0.0);
    app.add_to_cart(CartEntry::new(Some("1".to_string()), "Mango", 120.0));
    assert_eq!(app.cart().total(), 120.0);
    app.add_to_cart(CartEntry::new(Some("2".to_string()), "Neem", 80.0));
    assert_eq!(app.cart().total(), 200.0);
    assert_eq!(app.cart().len(), 2);

    let removed = app.remove_from_cart(0).unwrap();
    assert_eq!(removed.name, "Mango");
    assert_eq!(app.cart().total(), 80.0);
    assert_eq!(app.cart().entries()[0].name, "Neem");
}

#[tokio::test]
async fn bad_removal_indices_leave_cart_alone() {
    let mut app = app(catalog());
    app.add_to_cart(CartEntry::new(None, "Mango", 120.0));
    let before = app.cart().snapshot();

    for index in ["7", "-1", "one"] {
        let target = data_target("button", REMOVE_ITEM_CLASS, &[("index", index)]);
        app.dispatch(UiEvent::click(Region::CartItems, target)).await;
        assert_eq!(app.cart().snapshot(), before);
    }
    assert!(matches!(app.remove_from_cart(1), Err(WidgetError::Index { len: 1, .. })));
    assert_eq!(app.page().cart_total, "৳120");
}

#[tokio::test]
async fn rerendering_never_double_binds() {
    let mut app = app(catalog());
    for _ in 0..3 {
        app.load_initial().await;
    }
    let mango = find_target(&app, Region::ProductList, ADD_TO_CART_CLASS, 0);
    app.dispatch(UiEvent::click(Region::ProductList, mango)).await;
    assert_eq!(app.cart().len(), 1);
}

#[tokio::test]
async fn detail_click_opens_loaded_modal() {
    let mut app = app(catalog());
    app.load_initial().await;

    let name = find_target(&app, Region::ProductList, OPEN_DETAIL_CLASS, 1);
    assert!(name.is_tag("h3"));
    app.dispatch(UiEvent::click(Region::ProductList, name)).await;

    let modal = &app.page().modal;
    assert!(modal.visible);
    assert_eq!(modal.name, "Mango Tree");
    assert_eq!(modal.image_src, "mango.png");
    assert_eq!(modal.category, "Fruit Tree");
    assert_eq!(modal.price, "৳120");
    assert_eq!(modal.description, "Sweet summer fruit");
    assert_eq!(app.modal().state(), ModalState::Loaded);
}

#[tokio::test]
async fn detail_failure_keeps_modal_open_with_error() {
    let mut app = app(catalog());
    app.open_detail(Some("9")).await.unwrap();

    let modal = &app.page().modal;
    assert!(modal.visible);
    assert_eq!(modal.name, DETAIL_ERROR_TEXT);
    assert!(modal.category.is_empty());
    assert!(modal.price.is_empty());
    assert!(modal.description.is_empty());
    assert_eq!(app.modal().state(), ModalState::Error);
}

#[tokio::test]
async fn detail_without_id_skips_network_and_advises() {
    let mut app = app(catalog());
    let err = app.open_detail(None).await.unwrap_err();
    assert!(matches!(err, WidgetError::MissingIdentifier { what: "plant" }));
    assert!(calls(&app).is_empty());
    assert!(!app.page().modal.visible);
    assert_eq!(app.page().notices().len(), 1);
    assert_eq!(app.page().notices()[0].message, MISSING_PLANT_ID);

    let blank = data_target("img", OPEN_DETAIL_CLASS, &[("id", "")]);
    app.dispatch(UiEvent::click(Region::ProductList, blank)).await;
    assert!(calls(&app).is_empty());
    assert_eq!(app.page().notices().len(), 2);
}

#[tokio::test]
async fn notices_are_pruned_after_ttl() {
    let config = WidgetConfig {
        notice_ttl: chrono::Duration::zero(),
        ..WidgetConfig::default()
    };
    let mut app = App::new(catalog(), &config);
    let _ = app.open_detail(None).await;
    assert_eq!(app.page().notices().len(), 1);
    app.prune_notices();
    assert!(app.page().notices().is_empty());
}

#[tokio::test]
async fn modal_add_to_cart_adds_and_closes() {
    let mut app = app(catalog());
    app.dispatch(UiEvent::click(Region::ModalAddToCart, ClickTarget::default()))
        .await;
    assert!(app.cart().is_empty());

    app.open_detail(Some("2")).await.unwrap();
    app.dispatch(UiEvent::click(Region::ModalAddToCart, ClickTarget::default()))
        .await;

    assert_eq!(app.cart().entries(), &[CartEntry::new(Some("2".to_string()), "Neem", 80.0)]);
    assert_eq!(app.page().cart_total, "৳80");
    assert!(!app.page().modal.visible);
    assert_eq!(app.modal().state(), ModalState::Closed);
    assert!(app.modal().current().is_some());
}

#[tokio::test]
async fn modal_add_button_absent_means_unbound() {
    let config = WidgetConfig {
        modal_add_button: false,
        ..WidgetConfig::default()
    };
    let mut app = App::new(catalog(), &config);
    app.open_detail(Some("1")).await.unwrap();
    app.dispatch(UiEvent::click(Region::ModalAddToCart, ClickTarget::default()))
        .await;
    assert!(app.cart().is_empty());
    assert!(app.page().modal.visible);
}

#[tokio::test]
async fn dismissal_triggers_close_the_modal() {
    let mut app = app(catalog());

    app.open_detail(Some("1")).await.unwrap();
    app.dispatch(UiEvent::key("Enter")).await;
    assert!(app.page().modal.visible);
    app.dispatch(UiEvent::key("Escape")).await;
    assert!(!app.page().modal.visible);

    app.open_detail(Some("1")).await.unwrap();
    let content = ClickTarget {
        tag: "p".to_string(),
        id: Some("modal-description".to_string()),
        ..ClickTarget::default()
    };
    app.dispatch(UiEvent::click(Region::Modal, content)).await;
    assert!(app.page().modal.visible);
    app.dispatch(UiEvent::click(Region::Modal, ClickTarget::modal_backdrop()))
        .await;
    assert!(!app.page().modal.visible);

    for control in [Region::ModalClose, Region::ModalBottomClose] {
        app.open_detail(Some("1")).await.unwrap();
        app.dispatch(UiEvent::click(control, ClickTarget::default())).await;
        assert!(!app.page().modal.visible);
    }
}
