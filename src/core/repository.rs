use crate::core::normalizer;
use crate::core::weight;
use crate::domain::model::{BoxSummary, Collection, CollectionTotals, PackedBox};
use crate::domain::ports::Storage;
use crate::utils::error::{PackingError, Result};
use regex::Regex;
use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use std::io::{self, ErrorKind, Write};
use std::sync::OnceLock;

pub const DEFAULT_DATA_FILE: &str = "packing_data.json";

/// Whole-document persistence of the box collection.
pub struct BoxRepository<S: Storage> {
    storage: S,
    file_name: String,
}

impl<S: Storage> BoxRepository<S> {
    pub fn new(storage: S, file_name: impl Into<String>) -> Self {
        Self {
            storage,
            file_name: file_name.into(),
        }
    }

    /// Reads the collection. A missing or unparseable document yields an empty
    /// collection; only I/O failures other than "not found" are returned.
    pub fn load(&self) -> Result<Collection> {
        let bytes = match self.storage.read_file(&self.file_name) {
            Ok(bytes) => bytes,
            Err(PackingError::IoError(e)) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No data file at '{}'; starting empty", self.file_name);
                return Ok(Collection::new());
            }
            Err(e) => return Err(e),
        };

        match serde_json::from_slice::<serde_json::Value>(&bytes) {
            Ok(document) => Ok(normalizer::normalize(&document)),
            Err(e) => {
                tracing::warn!(
                    "Data file '{}' is not valid JSON ({}); starting empty",
                    self.file_name,
                    e
                );
                Ok(Collection::new())
            }
        }
    }

    /// Like [`load`](Self::load) but never fails.
    pub fn load_all(&self) -> Collection {
        self.load().unwrap_or_else(|e| {
            tracing::error!("Could not read '{}': {}; starting empty", self.file_name, e);
            Collection::new()
        })
    }

    /// Replaces the persisted document with `collection`.
    pub fn save_all(&self, collection: &Collection) -> Result<()> {
        let bytes = encode(collection)?;
        self.storage.write_file(&self.file_name, &bytes)?;
        tracing::debug!("Saved {} box(es) to '{}'", collection.len(), self.file_name);
        Ok(())
    }
}

/// Pretty JSON with four-space indentation and ASCII-only output, the layout
/// of existing data files.
pub fn encode(collection: &Collection) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let formatter = AsciiFormatter(PrettyFormatter::with_indent(b"    "));
    let mut serializer = serde_json::Serializer::with_formatter(&mut bytes, formatter);
    collection.serialize(&mut serializer)?;
    Ok(bytes)
}

/// Pretty formatter that writes every character outside printable ASCII as a
/// lowercase `\uXXXX` escape, using surrogate pairs above U+FFFF.
struct AsciiFormatter<'a>(PrettyFormatter<'a>);

impl Formatter for AsciiFormatter<'_> {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            if (' '..='~').contains(&ch) {
                continue;
            }
            writer.write_all(fragment[start..index].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = index + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }

    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_object_key(writer, first)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.0.end_object_value(writer)
    }
}

fn digit_run() -> &'static Regex {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    DIGITS.get_or_init(|| Regex::new(r"[0-9]+").expect("digit pattern is valid"))
}

/// Ordering key: the first run of digits in the name. Names without digits
/// return `None` and sort after every numbered name.
pub fn sort_key(name: &str) -> Option<u64> {
    digit_run()
        .find(name)
        .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
}

/// Boxes in display order: numeric by embedded number, unnumbered last,
/// document order on ties.
pub fn ordered(collection: &Collection) -> Vec<&PackedBox> {
    let mut boxes: Vec<&PackedBox> = collection.iter().collect();
    boxes.sort_by_key(|b| match sort_key(&b.name) {
        Some(n) => (0u8, n),
        None => (1u8, 0),
    });
    boxes
}

pub fn summarize(packed: &PackedBox) -> BoxSummary {
    let volumetric = weight::volumetric_weight_for(&packed.box_type);
    BoxSummary {
        name: packed.name.clone(),
        item_count: packed.total_quantity(),
        box_type: packed.box_type.clone(),
        volumetric_weight_kg: volumetric,
        declared_weight_kg: packed.declared_weight_kg,
        volumetric_weight_label: weight::volumetric_label(volumetric),
        declared_weight_label: weight::declared_label(packed.declared_weight_kg),
    }
}

pub fn list_ordered(collection: &Collection) -> Vec<BoxSummary> {
    ordered(collection).into_iter().map(summarize).collect()
}

pub fn totals(summaries: &[BoxSummary]) -> CollectionTotals {
    summaries
        .iter()
        .fold(CollectionTotals::default(), |mut acc, summary| {
            acc.total_items += summary.item_count;
            acc.total_volumetric_kg += summary.volumetric_weight_kg.map(u64::from).unwrap_or(0);
            acc.total_declared_kg += summary.declared_weight_kg;
            acc
        })
}
