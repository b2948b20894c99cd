use serde::Deserialize;
use serde_json::Value;

/// Plant record as the catalog API sends it. Every synonym the API has been
/// seen to use gets its own slot; the normalizer picks the first one present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPlant {
    pub id: Option<Value>,
    pub plant_id: Option<Value>,
    #[serde(rename = "plantId")]
    pub plant_id_camel: Option<Value>,
    #[serde(rename = "plantID")]
    pub plant_id_upper: Option<Value>,

    pub name: Option<Value>,
    pub plant_name: Option<Value>,
    #[serde(rename = "plantName")]
    pub plant_name_camel: Option<Value>,
    pub title: Option<Value>,

    pub category: Option<Value>,
    pub category_name: Option<Value>,

    pub price: Option<Value>,

    pub image: Option<Value>,
    pub img: Option<Value>,
    pub thumbnail: Option<Value>,
    pub photo: Option<Value>,

    pub description: Option<Value>,
    pub desc: Option<Value>,
    pub details: Option<Value>,
}

impl RawPlant {
    /// Reads a raw plant out of any JSON value. Anything that is not an object
    /// yields the all-absent record.
    pub fn from_value(value: &Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        Self::deserialize(value).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCategory {
    pub id: Option<Value>,
    pub category_id: Option<Value>,
    pub cat_id: Option<Value>,
    pub category: Option<Value>,
    pub category_name: Option<Value>,
}

impl RawCategory {
    pub fn from_value(value: &Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        Self::deserialize(value).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlantRecord {
    pub id: Option<String>,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub image: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRecord {
    pub id: Option<String>,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartEntry {
    pub id: Option<String>,
    pub name: String,
    pub price: f64,
}

impl CartEntry {
    pub fn new(id: Option<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }
}

impl From<&PlantRecord> for CartEntry {
    fn from(plant: &PlantRecord) -> Self {
        Self {
            id: plant.id.clone(),
            name: plant.name.clone(),
            price: plant.price,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartSnapshot {
    pub entries: Vec<CartEntry>,
    pub total: f64,
}

/// What the user picked in the category list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySelection {
    All,
    ById(Option<String>),
}
