/// A decoded CBOR data item.
///
/// Every variant must be handled explicitly at consumption sites; there is no
/// implicit coercion between variants (a `TextString` is never treated as a
/// `ByteString` and vice versa).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TaggedValue {
    /// Major types 0 and 1, restricted to the `i64` range.
    Integer(i64),
    /// Major type 2, definite length.
    ByteString(Vec<u8>),
    /// Major type 3, definite length, valid UTF-8.
    TextString(String),
    /// Major type 4, definite length.
    Array(Vec<TaggedValue>),
    /// Major type 5, definite length. Entry order is preserved and keys are unique.
    Map(Vec<(TaggedValue, TaggedValue)>),
    /// Semantic tag (major type 6) wrapping a single item.
    Tagged(u64, Box<TaggedValue>),
    /// Simple values 20 and 21.
    Boolean(bool),
    /// Simple value 22.
    Null,
}

impl TaggedValue {
    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            TaggedValue::Integer(_) => "integer",
            TaggedValue::ByteString(_) => "byte string",
            TaggedValue::TextString(_) => "text string",
            TaggedValue::Array(_) => "array",
            TaggedValue::Map(_) => "map",
            TaggedValue::Tagged(_, _) => "tag",
            TaggedValue::Boolean(_) => "boolean",
            TaggedValue::Null => "null",
        }
    }

    /// Returns the bytes of a `ByteString`.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            TaggedValue::ByteString(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the text of a `TextString`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TaggedValue::TextString(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value of an `Integer`.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            TaggedValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the items of an `Array`.
    pub fn as_array(&self) -> Option<&[TaggedValue]> {
        match self {
            TaggedValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries of a `Map`.
    pub fn as_map(&self) -> Option<&[(TaggedValue, TaggedValue)]> {
        match self {
            TaggedValue::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Looks up `key` in a `Map`. Returns `None` for non-map values.
    pub fn map_get(&self, key: &TaggedValue) -> Option<&TaggedValue> {
        self.as_map()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Nesting depth of the value; scalars have depth 1.
    pub fn depth(&self) -> usize {
        match self {
            TaggedValue::Array(items) => 1 + items.iter().map(Self::depth).max().unwrap_or(0),
            TaggedValue::Map(entries) => {
                1 + entries
                    .iter()
                    .map(|(k, v)| k.depth().max(v.depth()))
                    .max()
                    .unwrap_or(0)
            }
            TaggedValue::Tagged(_, inner) => 1 + inner.depth(),
            _ => 1,
        }
    }
}

impl From<i64> for TaggedValue {
    fn from(value: i64) -> Self {
        TaggedValue::Integer(value)
    }
}

impl From<&str> for TaggedValue {
    fn from(value: &str) -> Self {
        TaggedValue::TextString(value.to_string())
    }
}

impl From<String> for TaggedValue {
    fn from(value: String) -> Self {
        TaggedValue::TextString(value)
    }
}

impl From<Vec<u8>> for TaggedValue {
    fn from(value: Vec<u8>) -> Self {
        TaggedValue::ByteString(value)
    }
}

impl From<&[u8]> for TaggedValue {
    fn from(value: &[u8]) -> Self {
        TaggedValue::ByteString(value.to_vec())
    }
}

impl From<bool> for TaggedValue {
    fn from(value: bool) -> Self {
        TaggedValue::Boolean(value)
    }
}
