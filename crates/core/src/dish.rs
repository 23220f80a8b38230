//! Dish records: a priced menu item with its composition and photo.

use serde::{Deserialize, Serialize};

use crate::record::RecordKind;
use crate::types::DbId;

/// Record-kind descriptor for dishes.
#[derive(Debug, Clone, Copy)]
pub struct Dish;

/// Info block of a dish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishInfo {
    pub name: String,
    /// Price in minor currency units.
    pub price: i64,
    pub description: String,
    pub composition: String,
    pub author: DbId,
    pub photo_url: String,
}

/// Partial update for a dish. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DishPatch {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub description: Option<String>,
    pub composition: Option<String>,
    pub author: Option<DbId>,
    pub photo_url: Option<String>,
}

impl RecordKind for Dish {
    const ENTITY: &'static str = "Dish";

    type Info = DishInfo;
    type Patch = DishPatch;

    fn author(info: &DishInfo) -> DbId {
        info.author
    }

    fn patch_author(patch: &DishPatch) -> Option<DbId> {
        patch.author
    }

    fn merge(current: DishInfo, patch: DishPatch) -> DishInfo {
        DishInfo {
            name: patch.name.unwrap_or(current.name),
            price: patch.price.unwrap_or(current.price),
            description: patch.description.unwrap_or(current.description),
            composition: patch.composition.unwrap_or(current.composition),
            author: patch.author.unwrap_or(current.author),
            photo_url: patch.photo_url.unwrap_or(current.photo_url),
        }
    }
}
