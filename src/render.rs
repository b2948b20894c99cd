//! Catalog and cart views. Each function is a pure mapping from its argument
//! to a fresh set of nodes; the caller replaces the container contents with
//! the result.

use crate::models::{CartSnapshot, CategoryRecord, PlantRecord};
use crate::view::{Node, el};

pub const CURRENCY: &str = "৳";
pub const DESCRIPTION_PREVIEW_CHARS: usize = 80;
pub const ALL_TREES_ID: &str = "all-trees";

pub const OPEN_DETAIL_CLASS: &str = "open-detail";
pub const ADD_TO_CART_CLASS: &str = "add-to-cart";
pub const REMOVE_ITEM_CLASS: &str = "remove-item";

/// Whole amounts print without a fractional part, everything else uses the
/// shortest round-trip form.
pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 && price.abs() < 1e15 {
        format!("{}", price as i64)
    } else {
        format!("{price}")
    }
}

pub fn price_label(price: f64) -> String {
    format!("{CURRENCY}{}", format_price(price))
}

pub fn truncate_description(description: &str) -> String {
    if description.chars().count() <= DESCRIPTION_PREVIEW_CHARS {
        return description.to_string();
    }
    let mut short: String = description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
    short.push_str("...");
    short
}

pub fn render_categories(categories: &[CategoryRecord]) -> Vec<Node> {
    let all = el("li").child(
        el("button")
            .id(ALL_TREES_ID)
            .class("w-full text-left px-4 py-2 rounded-md bg-green-600 text-white")
            .text("All Trees"),
    );

    std::iter::once(Node::from(all))
        .chain(categories.iter().map(|category| {
            let button = el("button")
                .data("id", category.id.clone().unwrap_or_default())
                .class("w-full text-left px-4 py-2 rounded-md hover:bg-green-100")
                .text(category.label.clone());
            Node::from(el("li").child(button))
        }))
        .collect()
}

pub fn render_plants(plants: &[PlantRecord]) -> Vec<Node> {
    if plants.is_empty() {
        return vec![empty_placeholder()];
    }
    plants.iter().map(plant_card).collect()
}

fn plant_card(plant: &PlantRecord) -> Node {
    let id = plant.id.clone().unwrap_or_default();
    el("div")
        .class("bg-white p-4 rounded-xl shadow")
        .child(
            el("img")
                .data("id", id.clone())
                .attr("src", plant.image.clone())
                .attr("alt", plant.name.clone())
                .class(format!("{OPEN_DETAIL_CLASS} w-full h-32 object-cover rounded mb-4")),
        )
        .child(
            el("h3")
                .data("id", id.clone())
                .class(format!(
                    "{OPEN_DETAIL_CLASS} font-semibold text-green-700 cursor-pointer hover:underline"
                ))
                .text(plant.name.clone()),
        )
        .child(
            el("p")
                .class("text-sm text-gray-600")
                .text(truncate_description(&plant.description)),
        )
        .child(
            el("span")
                .class("text-xs inline-block mt-2 px-2 py-1 bg-green-100 text-green-600 rounded")
                .text(plant.category.clone()),
        )
        .child(
            el("div")
                .class("flex justify-between items-center mt-4")
                .child(el("span").class("font-semibold").text(price_label(plant.price)))
                .child(
                    el("button")
                        .data("id", id)
                        .data("name", plant.name.clone())
                        .data("price", format_price(plant.price))
                        .class(format!(
                            "{ADD_TO_CART_CLASS} bg-green-600 text-white px-4 py-2 rounded-lg hover:bg-green-700"
                        ))
                        .text("Add to Cart"),
                ),
        )
        .into()
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartView {
    pub items: Vec<Node>,
    pub total: String,
}

pub fn render_cart(cart: &CartSnapshot) -> CartView {
    let items: Vec<Node> = cart
        .entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let remove = el("button")
                .data("index", index.to_string())
                .class(format!("{REMOVE_ITEM_CLASS} text-red-500 font-bold"))
                .text("×");
            Node::from(
                el("li")
                    .class("flex justify-between items-center bg-white p-2 rounded shadow")
                    .child(el("span").text(format!("{} {}", entry.name, price_label(entry.price))))
                    .child(remove),
            )
        })
        .collect();

    CartView {
        items,
        total: price_label(cart.total),
    }
}

pub fn loading_placeholder() -> Node {
    el("div").class("bg-green-500 p-3 rounded").text("Loading...").into()
}

pub fn error_placeholder(what: &str) -> Node {
    el("div")
        .class("bg-red-500 p-3 rounded")
        .text(format!("Error loading {what}!"))
        .into()
}

pub fn empty_placeholder() -> Node {
    el("div").class("bg-orange-500 p-3 rounded").text("No items found").into()
}
