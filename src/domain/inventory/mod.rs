//! Inventory domain module
//!
//! Items are stock units, meal sets bundle items into sellable meals, and
//! sales record how many of each meal set were sold on a day.

mod item;
mod meal_set;
mod repository;
mod sale;
mod validation;

pub use item::Item;
pub use meal_set::{ComponentSpec, MealComponent, MealSet};
pub use repository::{ItemRepository, MealSetRepository, SaleRepository};
pub use sale::Sale;
pub use validation::{
    validate_components, validate_name, validate_quantity, InventoryValidationError,
    MAX_NAME_LENGTH,
};

#[cfg(test)]
pub use repository::{MockItemRepository, MockMealSetRepository, MockSaleRepository};
