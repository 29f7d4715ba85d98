//! Operand stack value types.

use crate::parser::Token;
use crate::utils::num_fmt;
use regex::Regex;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::LazyLock;

/// Strings that may stand in for numbers on the operand stack.
static NUMERIC_TEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+\.?\d*$").expect("numeric pattern is valid"));

/// A dictionary shared between the operand stack and the dictionary stack.
///
/// `dict begin ... def ... end` mutates the very dictionary that may also
/// be bound to a name, so entries are shared rather than copied.
pub type Dict = Rc<RefCell<FxHashMap<String, StackValue>>>;

/// Create a fresh empty dictionary.
pub fn new_dict() -> Dict {
    Rc::new(RefCell::new(FxHashMap::default()))
}

/// Result of `makepattern`: the tile id plus the dictionary it came from.
#[derive(Debug, Clone)]
pub struct PatternRef {
    pub id: String,
    pub dict: Dict,
}

/// Values that can appear on the operand stack.
#[derive(Debug, Clone)]
pub enum StackValue {
    Number(f64),
    Text(String),
    Name(String),
    /// Read-only once constructed
    Array(Rc<[StackValue]>),
    Dict(Dict),
    /// Unexecuted token run between `{` and `}`
    Procedure(Rc<[Token]>),
    Pattern(PatternRef),
}

impl StackValue {
    /// Numeric view of the value.
    ///
    /// Numbers pass through; text or names that look like a decimal number
    /// are coerced. Everything else has no numeric value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) | Self::Name(s) if NUMERIC_TEXT_RE.is_match(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// String content of text or name values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Name(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Self::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Printable form used by `show` and as a dictionary key.
    pub fn to_display_string(&self) -> String {
        match self {
            Self::Number(n) => num_fmt(*n),
            Self::Text(s) | Self::Name(s) => s.clone(),
            Self::Pattern(p) => p.id.clone(),
            _ => "--nostringval--".to_string(),
        }
    }

    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Text(_) => "string",
            Self::Name(_) => "name",
            Self::Array(_) => "array",
            Self::Dict(_) => "dict",
            Self::Procedure(_) => "procedure",
            Self::Pattern(_) => "pattern",
        }
    }
}

/// Look up `key` in a shared dictionary, cloning the value out.
pub fn dict_get(dict: &Dict, key: &str) -> Option<StackValue> {
    dict.borrow().get(key).cloned()
}

/// Numeric entries of an array value; non-numeric elements become 0.
pub fn number_list(value: &StackValue) -> Option<Vec<f64>> {
    match value {
        StackValue::Array(items) => Some(
            items
                .iter()
                .map(|item| item.as_number().unwrap_or(0.0))
                .collect(),
        ),
        _ => None,
    }
}
