pub mod catalog;
pub mod export;
pub mod mutators;
pub mod normalizer;
pub mod repository;
pub mod weight;

pub use crate::domain::model::{
    Address, BoxExport, BoxSummary, BoxTypeSpec, Collection, CollectionTotals, Item, ItemUpdate,
    PackedBox, PackingSlip,
};
pub use crate::domain::ports::{ConfigProvider, SlipRenderer, Storage};
pub use crate::utils::error::Result;
