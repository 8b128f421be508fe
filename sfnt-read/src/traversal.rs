//! Generic traversal of decoded tables.
//!
//! This module defines functionality that allows untyped access to decoded
//! table data. This is used as the basis for things like debug printing.
//!
//! The basis of traversal is the [`SomeTable`] trait, which is implemented for
//! every decoded table and record. This trait provides the table's name, as
//! well as ordered access to its fields.

use std::fmt::Debug;

use types::{FWord, Fixed, LongDateTime, MajorMinor, NameId, Tag, UfWord};

/// Types of fields in decoded tables.
pub enum FieldType<'a> {
    U16(u16),
    I16(i16),
    U32(u32),
    /// A value best shown in hex, such as a checksum or magic number.
    Hex32(u32),
    Tag(Tag),
    FWord(FWord),
    UfWord(UfWord),
    Fixed(Fixed),
    MajorMinor(MajorMinor),
    LongDateTime(LongDateTime),
    NameId(NameId),
    String(&'a str),
    /// An optional value that is not present.
    Absent,
    Record(Box<dyn SomeTable<'a> + 'a>),
    Array(Box<dyn SomeArray<'a> + 'a>),
}

/// A named field in a table.
pub struct Field<'a> {
    pub name: &'static str,
    pub value: FieldType<'a>,
}

impl<'a> Field<'a> {
    /// create a new field with the given name and value.
    pub fn new(name: &'static str, value: impl Into<FieldType<'a>>) -> Self {
        Field {
            name,
            value: value.into(),
        }
    }
}

/// A generic trait for decoded tables and records.
pub trait SomeTable<'a> {
    /// The name of this table
    fn type_name(&self) -> &str;
    /// Access this table's fields, in declaration order.
    fn get_field(&self, idx: usize) -> Option<Field<'a>>;
}

impl<'a> dyn SomeTable<'a> + 'a {
    /// Returns an iterator over this table's fields.
    pub fn iter(&self) -> impl Iterator<Item = Field<'a>> + '_ {
        FieldIter {
            table: self,
            idx: 0,
        }
    }
}

struct FieldIter<'a, 'b> {
    table: &'b dyn SomeTable<'a>,
    idx: usize,
}

impl<'a> Iterator for FieldIter<'a, '_> {
    type Item = Field<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let this = self.idx;
        self.idx += 1;
        self.table.get_field(this)
    }
}

impl<'a> SomeTable<'a> for Box<dyn SomeTable<'a> + 'a> {
    fn type_name(&self) -> &str {
        self.as_ref().type_name()
    }

    fn get_field(&self, idx: usize) -> Option<Field<'a>> {
        self.as_ref().get_field(idx)
    }
}

/// A generic trait for arrays.
pub trait SomeArray<'a> {
    /// The name of this type. For an array of u16s, this is `[u16]`.
    fn type_name(&self) -> &str;

    /// The length of the array.
    fn len(&self) -> usize;

    /// Returns `true` if this array is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the item at `idx`, or `None` if `idx` is out of bounds.
    fn get(&self, idx: usize) -> Option<FieldType<'a>>;
}

impl<'a> dyn SomeArray<'a> + 'a {
    /// Return an iterator over the contents of this array.
    pub fn iter(&self) -> impl Iterator<Item = FieldType<'a>> + '_ {
        (0..self.len()).filter_map(|idx| self.get(idx))
    }
}

struct ScalarArray<'a, T> {
    type_name: &'static str,
    items: &'a [T],
}

impl<'a, T: Copy + Into<FieldType<'a>>> SomeArray<'a> for ScalarArray<'a, T> {
    fn type_name(&self) -> &str {
        self.type_name
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn get(&self, idx: usize) -> Option<FieldType<'a>> {
        self.items.get(idx).copied().map(Into::into)
    }
}

struct RecordArray<'a, T> {
    type_name: &'static str,
    items: &'a [T],
}

impl<'a, T> SomeArray<'a> for RecordArray<'a, T>
where
    &'a T: SomeTable<'a>,
{
    fn type_name(&self) -> &str {
        self.type_name
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn get(&self, idx: usize) -> Option<FieldType<'a>> {
        let item: &'a T = self.items.get(idx)?;
        Some(FieldType::Record(Box::new(item)))
    }
}

struct StringArray<'a> {
    items: &'a [String],
}

impl<'a> SomeArray<'a> for StringArray<'a> {
    fn type_name(&self) -> &str {
        "String"
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn get(&self, idx: usize) -> Option<FieldType<'a>> {
        self.items.get(idx).map(|s| FieldType::String(s))
    }
}

impl<'a> FieldType<'a> {
    pub fn scalars<T: Copy + Into<FieldType<'a>>>(
        type_name: &'static str,
        items: &'a [T],
    ) -> FieldType<'a> {
        FieldType::Array(Box::new(ScalarArray { type_name, items }))
    }

    pub fn records<T>(type_name: &'static str, items: &'a [T]) -> FieldType<'a>
    where
        &'a T: SomeTable<'a>,
    {
        FieldType::Array(Box::new(RecordArray { type_name, items }))
    }

    pub fn strings(items: &'a [String]) -> FieldType<'a> {
        FieldType::Array(Box::new(StringArray { items }))
    }

    pub fn record<T: SomeTable<'a> + 'a>(record: T) -> FieldType<'a> {
        FieldType::Record(Box::new(record))
    }

    /// A field for an optional value.
    pub fn optional<T: Into<FieldType<'a>>>(value: Option<T>) -> FieldType<'a> {
        value.map(Into::into).unwrap_or(FieldType::Absent)
    }
}

// used to give us an auto-impl of Debug
struct DebugPrintTable<'a, 'b>(pub &'b (dyn SomeTable<'a> + 'a));
struct DebugPrintArray<'a, 'b>(pub &'b (dyn SomeArray<'a> + 'a));

impl Debug for FieldType<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::U16(arg0) => arg0.fmt(f),
            Self::I16(arg0) => arg0.fmt(f),
            Self::U32(arg0) => arg0.fmt(f),
            Self::Hex32(arg0) => write!(f, "0x{arg0:08X}"),
            Self::Tag(arg0) => arg0.fmt(f),
            Self::FWord(arg0) => arg0.fmt(f),
            Self::UfWord(arg0) => arg0.fmt(f),
            Self::Fixed(arg0) => arg0.fmt(f),
            Self::MajorMinor(arg0) => arg0.fmt(f),
            Self::LongDateTime(arg0) => arg0.fmt(f),
            Self::NameId(arg0) => arg0.fmt(f),
            Self::String(arg0) => arg0.fmt(f),
            Self::Absent => f.write_str("None"),
            Self::Record(arg0) => DebugPrintTable(arg0.as_ref()).fmt(f),
            Self::Array(arg0) => DebugPrintArray(arg0.as_ref()).fmt(f),
        }
    }
}

impl Debug for DebugPrintTable<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut debug_struct = f.debug_struct(self.0.type_name());
        for field in self.0.iter() {
            debug_struct.field(field.name, &field.value);
        }
        debug_struct.finish()
    }
}

impl Debug for DebugPrintArray<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<'a> Debug for dyn SomeTable<'a> + 'a {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        DebugPrintTable(self).fmt(f)
    }
}

impl<'a> Debug for dyn SomeArray<'a> + 'a {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        DebugPrintArray(self).fmt(f)
    }
}

macro_rules! field_type_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> From<$ty> for FieldType<'a> {
                fn from(src: $ty) -> FieldType<'a> {
                    FieldType::$variant(src)
                }
            }
        )*
    };
}

field_type_from! {
    u16 => U16,
    i16 => I16,
    u32 => U32,
    Tag => Tag,
    FWord => FWord,
    UfWord => UfWord,
    Fixed => Fixed,
    MajorMinor => MajorMinor,
    LongDateTime => LongDateTime,
    NameId => NameId,
}

impl<'a> From<&'a str> for FieldType<'a> {
    fn from(src: &'a str) -> FieldType<'a> {
        FieldType::String(src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair {
        tag: Tag,
        values: Vec<u16>,
    }

    impl<'a> SomeTable<'a> for &'a Pair {
        fn type_name(&self) -> &str {
            "Pair"
        }

        fn get_field(&self, idx: usize) -> Option<Field<'a>> {
            let pair: &'a Pair = *self;
            match idx {
                0 => Some(Field::new("tag", pair.tag)),
                1 => Some(Field::new("values", FieldType::scalars("u16", &pair.values))),
                2 => Some(Field::new("missing", FieldType::optional::<u16>(None))),
                _ => None,
            }
        }
    }

    #[test]
    fn debug_print() {
        let pair = Pair {
            tag: Tag::new(b"liga"),
            values: vec![1, 2],
        };
        let table: &dyn SomeTable = &&pair;
        assert_eq!(table.iter().count(), 3);
        assert_eq!(
            format!("{table:?}"),
            "Pair { tag: Tag(liga), values: [1, 2], missing: None }"
        );
    }
}
