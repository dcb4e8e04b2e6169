use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Deserialize, Serialize, Serializer};

/// Box type recorded for boxes whose type is not known, including every
/// box read from the legacy bare-list format.
pub const UNKNOWN_BOX_TYPE: &str = "unknown";

/// Label used wherever a volumetric weight cannot be computed.
pub const NOT_APPLICABLE: &str = "N/A";

/// Physical dimensions of a box type, in centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoxTypeSpec {
    pub name: &'static str,
    pub length: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "item")]
    pub name: String,
    pub description: String,
    pub quantity: u32,
}

impl Item {
    pub fn new(name: impl Into<String>, description: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            quantity,
        }
    }
}

/// Partial update for an item; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<String>,
}

/// A shipment box in canonical form.
///
/// Items are addressed by their position in `items`. Removing an item shifts
/// every later item down by one, so an index read before a mutation must not
/// be reused after it.
///
/// The name is the key of the record in the persisted document and is not
/// written inside the record itself.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedBox {
    pub name: String,
    pub box_type: String,
    pub items: Vec<Item>,
    pub declared_weight_kg: f64,
    /// Write a whole-number weight as a JSON integer (`0`) rather than `0.0`.
    /// Boxes created without a weight are stored that way.
    pub weight_is_integer: bool,
}

impl PackedBox {
    pub fn new(name: impl Into<String>, box_type: impl Into<String>, declared_weight_kg: f64) -> Self {
        Self {
            name: name.into(),
            box_type: box_type.into(),
            items: Vec::new(),
            declared_weight_kg,
            weight_is_integer: false,
        }
    }

    /// A box with no declared weight yet, stored as integer `0`.
    pub fn unweighed(name: impl Into<String>, box_type: impl Into<String>) -> Self {
        Self {
            weight_is_integer: true,
            ..Self::new(name, box_type, 0.0)
        }
    }

    pub fn set_declared_weight(&mut self, kg: f64) {
        self.declared_weight_kg = kg;
        self.weight_is_integer = false;
    }

    /// Sum of item quantities, not the number of item records.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

impl Serialize for PackedBox {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let weight = self.declared_weight_kg;
        let mut record = serializer.serialize_struct("PackedBox", 3)?;
        record.serialize_field("type", &self.box_type)?;
        record.serialize_field("items", &self.items)?;
        if self.weight_is_integer && weight.fract() == 0.0 && weight < u64::MAX as f64 {
            record.serialize_field("actual_weight", &(weight as u64))?;
        } else {
            record.serialize_field("actual_weight", &weight)?;
        }
        record.end()
    }
}

/// All boxes, keyed by name, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    boxes: Vec<PackedBox>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Lookups match the exact name first, then the name with surrounding
    /// whitespace removed.
    fn position(&self, name: &str) -> Option<usize> {
        self.boxes.iter().position(|b| b.name == name).or_else(|| {
            let trimmed = name.trim();
            self.boxes.iter().position(|b| b.name == trimmed)
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&PackedBox> {
        self.position(name).map(|i| &self.boxes[i])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut PackedBox> {
        self.position(name).map(|i| &mut self.boxes[i])
    }

    /// Adds the box unless exactly this name is already taken. Returns whether
    /// it was added.
    pub fn insert(&mut self, packed: PackedBox) -> bool {
        if self.boxes.iter().any(|b| b.name == packed.name) {
            return false;
        }
        self.boxes.push(packed);
        true
    }

    pub fn remove(&mut self, name: &str) -> Option<PackedBox> {
        let position = self.position(name)?;
        Some(self.boxes.remove(position))
    }

    pub fn iter(&self) -> impl Iterator<Item = &PackedBox> {
        self.boxes.iter()
    }
}

impl Serialize for Collection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.boxes.len()))?;
        for packed in &self.boxes {
            map.serialize_entry(&packed.name, packed)?;
        }
        map.end()
    }
}

/// Postal address from the address book. Fields other than the named ones
/// (city, country, area, ...) are kept in document order under `locality`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    #[serde(flatten)]
    pub locality: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub postcode: String,
}

impl Address {
    /// Non-empty printable lines, top to bottom.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.name.clone(), self.line1.clone()];
        if let Some(line2) = &self.line2 {
            lines.push(line2.clone());
        }
        for value in self.locality.values() {
            match value {
                serde_json::Value::String(s) => lines.push(s.clone()),
                serde_json::Value::Null => {}
                other => lines.push(other.to_string()),
            }
        }
        lines.push(self.postcode.clone());
        lines.retain(|line| !line.trim().is_empty());
        lines
    }
}

/// One row of the box listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxSummary {
    pub name: String,
    pub item_count: u64,
    pub box_type: String,
    pub volumetric_weight_kg: Option<u32>,
    pub declared_weight_kg: f64,
    pub volumetric_weight_label: String,
    pub declared_weight_label: String,
}

/// Aggregates across the whole collection. Boxes of unknown type add nothing
/// to the volumetric total.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CollectionTotals {
    pub total_items: u64,
    pub total_volumetric_kg: u64,
    pub total_declared_kg: f64,
}

impl CollectionTotals {
    pub fn volumetric_label(&self) -> String {
        format!("{} kg", self.total_volumetric_kg)
    }

    pub fn declared_label(&self) -> String {
        format!("{:.1} kg", self.total_declared_kg)
    }
}

/// Format-neutral content of one box's packing slip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxExport {
    pub box_name: String,
    pub items: Vec<Item>,
    pub total_quantity: u64,
    pub volumetric_weight_label: String,
    pub declared_weight_label: String,
}

/// Everything a renderer needs: box content plus addresses and shipping date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackingSlip {
    #[serde(flatten)]
    pub export: BoxExport,
    pub shipping_date: String,
    pub from_address: Address,
    pub to_address: Address,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_quantity_sums_quantities() {
        let mut packed = PackedBox::new("Box 1", "Type 1 (Square)", 0.0);
        packed.items.push(Item::new("Mugs", "Ceramic", 5));
        assert_eq!(packed.total_quantity(), 5);

        packed.items.push(Item::new("Plates", "", 2));
        assert_eq!(packed.total_quantity(), 7);
    }

    #[test]
    fn test_collection_rejects_duplicate_names() {
        let mut collection = Collection::new();
        assert!(collection.insert(PackedBox::new("Box 1", UNKNOWN_BOX_TYPE, 0.0)));
        assert!(!collection.insert(PackedBox::new("Box 1", "Type 1 (Square)", 3.0)));
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.get("Box 1").unwrap().box_type, UNKNOWN_BOX_TYPE);
    }

    #[test]
    fn test_collection_serializes_as_name_keyed_map() {
        let mut collection = Collection::new();
        let mut packed = PackedBox::new("Box 2", "Type 3 (Rectangle)", 4.5);
        packed.items.push(Item::new("Cable", "USB-C", 3));
        collection.insert(packed);

        let value = serde_json::to_value(&collection).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "Box 2": {
                    "type": "Type 3 (Rectangle)",
                    "items": [{"item": "Cable", "description": "USB-C", "quantity": 3}],
                    "actual_weight": 4.5
                }
            })
        );
    }

    #[test]
    fn test_unweighed_box_writes_integer_weight() {
        let mut packed = PackedBox::unweighed("Box 1", "Type 1 (Square)");
        let value = serde_json::to_value(&packed).unwrap();
        assert!(value["actual_weight"].is_u64());

        packed.set_declared_weight(3.0);
        let value = serde_json::to_value(&packed).unwrap();
        assert!(value["actual_weight"].is_f64());
        assert_eq!(value["actual_weight"], 3.0);
    }

    #[test]
    fn test_lookup_falls_back_to_trimmed_name() {
        let mut collection = Collection::new();
        collection.insert(PackedBox::new("Box 1", UNKNOWN_BOX_TYPE, 0.0));
        collection.insert(PackedBox::new(" Box 2", UNKNOWN_BOX_TYPE, 0.0));

        assert!(collection.contains("  Box 1 "));
        assert_eq!(collection.get("Box 1\t").unwrap().name, "Box 1");
        assert_eq!(collection.get(" Box 2").unwrap().name, " Box 2");
        assert!(collection.get("Box 2").is_none());

        // Exact-name check: a padded variant is a distinct key.
        assert!(collection.insert(PackedBox::new("Box 1 ", UNKNOWN_BOX_TYPE, 0.0)));
        assert_eq!(collection.len(), 3);
        assert_eq!(collection.remove(" Box 1 ").unwrap().name, "Box 1");
    }

    #[test]
    fn test_address_lines_skip_blank_fields() {
        let address: Address = serde_json::from_value(serde_json::json!({
            "name": "Warehouse",
            "line1": "1 Dock Road",
            "line2": "",
            "city": "Leeds",
            "country": "UK",
            "postcode": "LS1 1AA"
        }))
        .unwrap();

        assert_eq!(
            address.lines(),
            vec!["Warehouse", "1 Dock Road", "Leeds", "UK", "LS1 1AA"]
        );
    }
}
