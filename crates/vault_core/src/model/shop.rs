//! Shop and location model.
//!
//! Shops hold weak item references (`acquired_here`, `stolen_from`) and an
//! inline price list that the vault does not own. The owning character is
//! never stored here; it is found by scanning characters for `shop_id`.

use crate::model::record::{Collection, ExtraFields, Record};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One line of a shop's price list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InventoryEntry {
    /// Structured listing with price and optional stock note.
    Listing(InventoryListing),
    /// Free-text line.
    Note(String),
    /// Anything else found in a hand-edited file, kept as-is.
    Other(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryListing {
    pub name: String,
    #[serde(default)]
    pub price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub id: String,
    pub name: String,
    /// Free-text owner name, not a foreign key.
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "type", default)]
    pub shop_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub inventory: Vec<InventoryEntry>,
    /// Item IDs acquired at this shop.
    #[serde(default)]
    pub acquired_here: Vec<String>,
    /// Item IDs stolen from this shop.
    #[serde(default)]
    pub stolen_from: Vec<String>,
    #[serde(default)]
    pub quest_items: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treasure_present: Option<Vec<String>>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_on: NaiveDate,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Input for the add-shop use case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewShop {
    pub name: String,
    pub owner: String,
    pub location: String,
    pub shop_type: String,
    pub description: String,
    pub tags: Vec<String>,
}

impl Shop {
    /// Builds a stored shop with empty lists and notes.
    pub fn create(id: String, created_on: NaiveDate, input: NewShop) -> Self {
        Self {
            id,
            name: input.name,
            owner: input.owner,
            location: input.location,
            shop_type: input.shop_type,
            description: input.description,
            inventory: Vec::new(),
            acquired_here: Vec::new(),
            stolen_from: Vec::new(),
            quest_items: Vec::new(),
            treasure_present: None,
            notes: String::new(),
            tags: input.tags,
            created_on,
            extra: ExtraFields::new(),
        }
    }
}

impl Record for Shop {
    const COLLECTION: Collection = Collection::Shops;

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.name.as_str(),
            self.description.as_str(),
            self.owner.as_str(),
            self.location.as_str(),
            self.notes.as_str(),
        ];
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }
}
