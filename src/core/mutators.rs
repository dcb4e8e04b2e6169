use crate::core::catalog;
use crate::core::repository::BoxRepository;
use crate::domain::model::{Collection, Item, ItemUpdate, PackedBox, UNKNOWN_BOX_TYPE};
use crate::domain::ports::Storage;
use crate::utils::error::{PackingError, Result};
use crate::utils::validation::{parse_quantity, parse_weight, validate_non_empty_string};

/// Box and item operations. Each call loads the whole collection, applies one
/// change and saves the whole collection; a rejected call writes nothing.
pub struct BoxService<S: Storage> {
    repository: BoxRepository<S>,
}

impl<S: Storage> BoxService<S> {
    pub fn new(repository: BoxRepository<S>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &BoxRepository<S> {
        &self.repository
    }

    /// Current collection; never fails.
    pub fn collection(&self) -> Collection {
        self.repository.load_all()
    }

    pub fn get_box(&self, name: &str) -> Result<PackedBox> {
        self.collection()
            .remove(name)
            .ok_or_else(|| box_not_found(name))
    }

    pub fn item(&self, box_name: &str, index: usize) -> Result<Item> {
        let packed = self.get_box(box_name)?;
        packed
            .items
            .into_iter()
            .nth(index)
            .ok_or_else(|| item_not_found(box_name, index))
    }

    /// Creates an empty box. Returns `Ok(false)` without writing when the name
    /// is already in use, so resubmitting the same form is harmless.
    pub fn create_box(
        &self,
        name: &str,
        box_type: &str,
        declared_weight: Option<&str>,
    ) -> Result<bool> {
        let name = validate_non_empty_string("box name", name)?;
        let declared_weight_kg = match declared_weight.map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(parse_weight("declared weight", raw)?),
            _ => None,
        };
        let box_type = match box_type.trim() {
            "" => UNKNOWN_BOX_TYPE,
            t => t,
        };
        if catalog::lookup(box_type).is_none() {
            tracing::warn!(
                "Box type '{}' is not in the catalog ({}); volumetric weight will be N/A",
                box_type,
                catalog::names().collect::<Vec<_>>().join(", ")
            );
        }

        let packed = match declared_weight_kg {
            Some(kg) => PackedBox::new(name, box_type, kg),
            None => PackedBox::unweighed(name, box_type),
        };
        let mut collection = self.repository.load()?;
        if !collection.insert(packed) {
            tracing::info!("Box '{}' already exists; nothing to create", name);
            return Ok(false);
        }
        self.repository.save_all(&collection)?;
        tracing::info!("Created box '{}' ({})", name, box_type);
        Ok(true)
    }

    /// Appends an item and returns its index.
    pub fn add_item(
        &self,
        box_name: &str,
        name: &str,
        description: &str,
        quantity: &str,
    ) -> Result<usize> {
        let quantity = parse_quantity("quantity", quantity)?;
        let index = self.mutate_box(box_name, |packed| {
            packed.items.push(Item::new(name, description, quantity));
            Ok(packed.items.len() - 1)
        })?;
        tracing::info!("Added '{}' x{} to '{}' at index {}", name, quantity, box_name, index);
        Ok(index)
    }

    pub fn edit_item(&self, box_name: &str, index: usize, update: ItemUpdate) -> Result<Item> {
        let quantity = update
            .quantity
            .as_deref()
            .map(|raw| parse_quantity("quantity", raw))
            .transpose()?;

        let edited = self.mutate_box(box_name, |packed| {
            let item = packed
                .items
                .get_mut(index)
                .ok_or_else(|| item_not_found(box_name, index))?;
            if let Some(name) = update.name {
                item.name = name;
            }
            if let Some(description) = update.description {
                item.description = description;
            }
            if let Some(quantity) = quantity {
                item.quantity = quantity;
            }
            Ok(item.clone())
        })?;
        tracing::info!("Edited item {} of '{}'", index, box_name);
        Ok(edited)
    }

    /// Removes the item at `index`. Later items move down by one, so indices
    /// held from before this call are stale.
    pub fn delete_item(&self, box_name: &str, index: usize) -> Result<Item> {
        let removed = self.mutate_box(box_name, |packed| {
            if index >= packed.items.len() {
                return Err(item_not_found(box_name, index));
            }
            Ok(packed.items.remove(index))
        })?;
        tracing::info!("Deleted item {} ('{}') from '{}'", index, removed.name, box_name);
        Ok(removed)
    }

    pub fn delete_box(&self, name: &str) -> Result<PackedBox> {
        let mut collection = self.repository.load()?;
        let removed = collection.remove(name).ok_or_else(|| box_not_found(name))?;
        self.repository.save_all(&collection)?;
        tracing::info!("Deleted box '{}' with {} item(s)", name, removed.items.len());
        Ok(removed)
    }

    pub fn edit_declared_weight(&self, box_name: &str, raw: &str) -> Result<f64> {
        let weight = parse_weight("declared weight", raw)?;
        self.mutate_box(box_name, |packed| {
            packed.set_declared_weight(weight);
            Ok(())
        })?;
        tracing::info!("Set declared weight of '{}' to {:.1} kg", box_name, weight);
        Ok(weight)
    }

    fn mutate_box<T>(
        &self,
        box_name: &str,
        change: impl FnOnce(&mut PackedBox) -> Result<T>,
    ) -> Result<T> {
        let mut collection = self.repository.load()?;
        let packed = collection
            .get_mut(box_name)
            .ok_or_else(|| box_not_found(box_name))?;
        let outcome = change(packed)?;
        self.repository.save_all(&collection)?;
        Ok(outcome)
    }
}

fn box_not_found(name: &str) -> PackingError {
    PackingError::not_found(format!("Box '{}'", name))
}

fn item_not_found(box_name: &str, index: usize) -> PackingError {
    PackingError::not_found(format!("Item {} in box '{}'", index, box_name))
}
