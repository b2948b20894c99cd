//! The hosting page: the containers the widget paints into, the detail modal
//! fields, and the advisory notices. The page owns the containers' existence;
//! the widget owns what is inside them.

use crate::render::CURRENCY;
use crate::view::{Element, Node, escape_html, render_all};
use chrono::{DateTime, Duration, Local};
use std::collections::BTreeMap;

pub const MODAL_ID: &str = "tree-modal";

/// Logical roles of the containers and controls a click can land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    CategoryList,
    ProductList,
    CartItems,
    Modal,
    ModalClose,
    ModalBottomClose,
    ModalAddToCart,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalView {
    pub visible: bool,
    pub image_src: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: String,
}

impl ModalView {
    pub fn clear_fields(&mut self) {
        self.image_src.clear();
        self.name.clear();
        self.description.clear();
        self.category.clear();
        self.price.clear();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub raised_at: DateTime<Local>,
}

/// The element a click was delivered to, as seen by a delegated listener.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickTarget {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub dataset: BTreeMap<String, String>,
}

impl ClickTarget {
    pub fn from_element(element: &Element) -> Self {
        Self {
            tag: element.tag.to_string(),
            id: element.get_attr("id").map(str::to_string),
            classes: element.classes().map(str::to_string).collect(),
            dataset: element
                .dataset()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        }
    }

    /// The modal container itself, i.e. a click on the backdrop.
    pub fn modal_backdrop() -> Self {
        Self {
            tag: "div".to_string(),
            id: Some(MODAL_ID.to_string()),
            ..Self::default()
        }
    }

    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn data(&self, key: &str) -> Option<&str> {
        self.dataset.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone)]
pub struct Page {
    pub category_list: Vec<Node>,
    pub product_list: Vec<Node>,
    pub cart_items: Vec<Node>,
    pub cart_total: String,
    pub modal: ModalView,
    has_modal_add_button: bool,
    notices: Vec<Notice>,
}

impl Page {
    pub fn new(has_modal_add_button: bool) -> Self {
        Self {
            category_list: Vec::new(),
            product_list: Vec::new(),
            cart_items: Vec::new(),
            cart_total: format!("{CURRENCY}0"),
            modal: ModalView::default(),
            has_modal_add_button,
            notices: Vec::new(),
        }
    }

    pub fn has_modal_add_button(&self) -> bool {
        self.has_modal_add_button
    }

    /// Clickable elements currently painted inside a container.
    pub fn targets(&self, region: Region) -> Vec<ClickTarget> {
        let nodes = match region {
            Region::CategoryList => &self.category_list,
            Region::ProductList => &self.product_list,
            Region::CartItems => &self.cart_items,
            _ => return Vec::new(),
        };
        nodes
            .iter()
            .flat_map(Node::descendants)
            .map(ClickTarget::from_element)
            .collect()
    }

    pub fn product_markup(&self) -> String {
        render_all(&self.product_list)
    }

    pub fn push_notice(&mut self, message: impl Into<String>) {
        self.notices.push(Notice {
            message: message.into(),
            raised_at: Local::now(),
        });
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drops notices older than `ttl` as of `now`.
    pub fn prune_notices(&mut self, now: DateTime<Local>, ttl: Duration) {
        self.notices.retain(|notice| now - notice.raised_at < ttl);
    }
}

pub fn render_document(page: &Page) -> String {
    let hidden = if page.modal.visible { "" } else { " hidden" };
    let modal_add = if page.has_modal_add_button {
        r#"<button id="modal-add-to-cart" class="bg-green-600 text-white px-4 py-2 rounded-lg">Add to Cart</button>"#
    } else {
        ""
    };
    let notices: String = page
        .notices
        .iter()
        .map(|notice| {
            format!(
                "<div class=\"toast bg-yellow-100 p-2 rounded\" data-raised-at=\"{}\">{}</div>",
                notice.raised_at.to_rfc3339(),
                escape_html(&notice.message)
            )
        })
        .collect();

    fill_template(
        INDEX_HTML,
        &[
            ("CATEGORIES", render_all(&page.category_list)),
            ("PRODUCTS", render_all(&page.product_list)),
            ("CART_ITEMS", render_all(&page.cart_items)),
            ("CART_TOTAL", escape_html(&page.cart_total)),
            ("MODAL_HIDDEN", hidden.to_string()),
            ("MODAL_IMAGE", escape_html(&page.modal.image_src)),
            ("MODAL_NAME", escape_html(&page.modal.name)),
            ("MODAL_DESCRIPTION", escape_html(&page.modal.description)),
            ("MODAL_CATEGORY", escape_html(&page.modal.category)),
            ("MODAL_PRICE", escape_html(&page.modal.price)),
            ("MODAL_ADD", modal_add.to_string()),
            ("NOTICES", notices),
        ],
    )
}

/// Single pass over the template so substituted content is never rescanned
/// for placeholders.
fn fill_template(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let key = &after[..end];
        match values.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + end + 4]),
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Green Earth</title>
  <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="bg-green-50 text-gray-800">
  <div id="notices" class="fixed top-4 right-4 space-y-2">{{NOTICES}}</div>
  <main class="max-w-7xl mx-auto grid grid-cols-1 lg:grid-cols-5 gap-6 p-6">
    <aside>
      <h2 class="font-bold mb-4">Categories</h2>
      <ul id="category-list" class="space-y-2">{{CATEGORIES}}</ul>
    </aside>
    <section id="product-list" class="lg:col-span-3 grid grid-cols-1 md:grid-cols-3 gap-4">{{PRODUCTS}}</section>
    <aside class="bg-white p-4 rounded-xl">
      <h2 class="font-bold mb-4">Your Cart</h2>
      <ul id="cart-items" class="space-y-2">{{CART_ITEMS}}</ul>
      <div class="flex justify-between mt-4 border-t pt-2">
        <span>Total:</span>
        <span id="cart-total">{{CART_TOTAL}}</span>
      </div>
    </aside>
  </main>

  <div id="tree-modal" class="fixed inset-0 bg-black/50 flex items-center justify-center{{MODAL_HIDDEN}}">
    <div class="bg-white rounded-xl p-6 max-w-lg w-full relative">
      <button id="close-modal" class="absolute top-2 right-3 text-xl">&times;</button>
      <img id="modal-image" src="{{MODAL_IMAGE}}" alt="" class="w-full h-56 object-cover rounded mb-4" />
      <h3 id="modal-name" class="text-2xl font-bold text-green-700">{{MODAL_NAME}}</h3>
      <p id="modal-description" class="text-gray-600 my-2">{{MODAL_DESCRIPTION}}</p>
      <p>Category: <span id="modal-category">{{MODAL_CATEGORY}}</span></p>
      <p>Price: <span id="modal-price">{{MODAL_PRICE}}</span></p>
      <div class="flex justify-end gap-2 mt-4">
        {{MODAL_ADD}}
        <button id="bottom-close" class="bg-gray-200 px-4 py-2 rounded-lg">Close</button>
      </div>
    </div>
  </div>
</body>
</html>
"#;
