use crate::config::address_book::AddressBook;
use crate::core::weight;
use crate::domain::model::{BoxExport, Collection, PackingSlip};
use chrono::NaiveDate;

/// Date format printed on packing slips.
pub const SHIPPING_DATE_FORMAT: &str = "%d/%m/%Y";

/// Format-neutral export of one box, or `None` when the box does not exist.
///
/// Weight labels follow the listing: unknown box types show `N/A`.
pub fn build_export_payload(collection: &Collection, box_name: &str) -> Option<BoxExport> {
    let packed = collection.get(box_name)?;
    let volumetric = weight::volumetric_weight_for(&packed.box_type);

    Some(BoxExport {
        box_name: packed.name.clone(),
        items: packed.items.clone(),
        total_quantity: packed.total_quantity(),
        volumetric_weight_label: weight::volumetric_label(volumetric),
        declared_weight_label: weight::declared_label(packed.declared_weight_kg),
    })
}

impl PackingSlip {
    pub fn new(export: BoxExport, addresses: &AddressBook, shipping_date: NaiveDate) -> Self {
        Self {
            export,
            shipping_date: shipping_date.format(SHIPPING_DATE_FORMAT).to_string(),
            from_address: addresses.from.clone(),
            to_address: addresses.to.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::repository;
    use crate::domain::model::{Address, Item, PackedBox};

    fn collection() -> Collection {
        let mut collection = Collection::new();
        let mut packed = PackedBox::new("Box 1", "Type 3 (Rectangle)", 6.3);
        packed.items.push(Item::new("Mugs", "Ceramic", 5));
        packed.items.push(Item::new("Tea", "Loose leaf", 2));
        collection.insert(packed);

        let mut drifted = PackedBox::new("Box 2", "Type 0 (Retired)", 0.0);
        drifted.items.push(Item::new("Rope", "", 1));
        collection.insert(drifted);
        collection
    }

    #[test]
    fn test_payload_for_known_type() {
        let export = build_export_payload(&collection(), "Box 1").unwrap();

        assert_eq!(export.box_name, "Box 1");
        assert_eq!(export.items.len(), 2);
        assert_eq!(export.total_quantity, 7);
        assert_eq!(export.volumetric_weight_label, "10 kg");
        assert_eq!(export.declared_weight_label, "6.3 kg");
    }

    #[test]
    fn test_payload_missing_box() {
        assert!(build_export_payload(&collection(), "Box 3").is_none());
    }

    #[test]
    fn test_payload_agrees_with_listing() {
        let collection = collection();
        for summary in repository::list_ordered(&collection) {
            let export = build_export_payload(&collection, &summary.name).unwrap();
            assert_eq!(export.total_quantity, summary.item_count);
            assert_eq!(export.volumetric_weight_label, summary.volumetric_weight_label);
            assert_eq!(export.declared_weight_label, summary.declared_weight_label);
        }
    }

    #[test]
    fn test_unknown_type_is_not_applicable() {
        let export = build_export_payload(&collection(), "Box 2").unwrap();
        assert_eq!(export.volumetric_weight_label, "N/A");
    }

    #[test]
    fn test_packing_slip_adds_addresses_and_date() {
        let addresses = AddressBook {
            from: Address {
                name: "Sender".to_string(),
                ..Default::default()
            },
            to: Address {
                name: "Receiver".to_string(),
                ..Default::default()
            },
        };
        let export = build_export_payload(&collection(), "Box 1").unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();

        let slip = PackingSlip::new(export.clone(), &addresses, date);

        assert_eq!(slip.shipping_date, "07/03/2024");
        assert_eq!(slip.from_address.name, "Sender");
        assert_eq!(slip.to_address.name, "Receiver");
        assert_eq!(slip.export, export);
    }
}
