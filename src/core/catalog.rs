use crate::domain::model::BoxTypeSpec;

/// Box types available when creating a box. Not user-editable.
pub const BOX_TYPES: [BoxTypeSpec; 3] = [
    BoxTypeSpec {
        name: "Type 1 (Square)",
        length: 52,
        width: 52,
        height: 40,
    },
    BoxTypeSpec {
        name: "Type 2 (Tall Large)",
        length: 44,
        width: 44,
        height: 60,
    },
    BoxTypeSpec {
        name: "Type 3 (Rectangle)",
        length: 52,
        width: 30,
        height: 30,
    },
];

/// `None` means the name is not in the catalog, which is a normal outcome for
/// legacy and drifted records.
pub fn lookup(name: &str) -> Option<&'static BoxTypeSpec> {
    BOX_TYPES.iter().find(|spec| spec.name == name)
}

pub fn names() -> impl Iterator<Item = &'static str> {
    BOX_TYPES.iter().map(|spec| spec.name)
}
