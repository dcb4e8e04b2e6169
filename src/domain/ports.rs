use crate::domain::model::PackingSlip;
use crate::utils::error::Result;

/// Byte-level persistence. `write_file` replaces the whole file; a partial
/// write must never be observable by a later `read_file`.
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn data_file(&self) -> &str;
    fn address_config(&self) -> &str;
}

/// Turns a packing slip into a downloadable document.
pub trait SlipRenderer {
    fn file_name(&self, box_name: &str) -> String;
    fn render(&self, slip: &PackingSlip) -> Result<Vec<u8>>;
}
