use crate::adapters::render::slip_file_name;
use crate::domain::model::PackingSlip;
use crate::domain::ports::SlipRenderer;
use crate::utils::error::Result;

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer;

impl SlipRenderer for JsonRenderer {
    fn file_name(&self, box_name: &str) -> String {
        slip_file_name(box_name, "json")
    }

    fn render(&self, slip: &PackingSlip) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(slip)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::render::sample_slip;

    #[test]
    fn test_json_payload_shape() {
        let bytes = JsonRenderer.render(&sample_slip()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["box_name"], "Box 4");
        assert_eq!(value["total_quantity"], 7);
        assert_eq!(value["volumetric_weight_label"], "22 kg");
        assert_eq!(value["declared_weight_label"], "11.0 kg");
        assert_eq!(value["shipping_date"], "02/11/2024");
        assert_eq!(value["items"][0]["item"], "Mugs");
        assert_eq!(value["from_address"]["city"], "Default City");
        assert_eq!(value["to_address"]["area"], "Default Area");
    }
}
