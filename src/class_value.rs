use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A class list as authored in a configuration.
///
/// Mirrors the loose shapes accepted by class helpers on the JavaScript side:
/// a plain string, an arbitrarily nested list, or a placeholder (`null`,
/// `false`, `true`) that contributes nothing. Flattening drops the
/// placeholders and empty strings and splits the rest on whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassValue {
    #[default]
    Empty,
    Bool(bool),
    Str(String),
    List(Vec<ClassValue>),
}

impl ClassValue {
    /// Whether flattening this value yields no tokens
    pub fn is_empty(&self) -> bool {
        match self {
            ClassValue::Empty | ClassValue::Bool(_) => true,
            ClassValue::Str(s) => s.trim().is_empty(),
            ClassValue::List(items) => items.iter().all(ClassValue::is_empty),
        }
    }

    /// Append the flattened class tokens to `out`
    pub fn push_tokens(&self, out: &mut Vec<String>) {
        match self {
            ClassValue::Empty | ClassValue::Bool(_) => {}
            ClassValue::Str(s) => out.extend(s.split_whitespace().map(str::to_string)),
            ClassValue::List(items) => {
                for item in items {
                    item.push_tokens(out);
                }
            }
        }
    }

    /// Flatten into an ordered list of class tokens
    pub fn tokens(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.push_tokens(&mut out);
        out
    }

    /// Flatten and join with single spaces; `None` when nothing survives
    pub fn to_class_string(&self) -> Option<String> {
        join_tokens(&self.tokens())
    }
}

/// Join class tokens with single spaces, treating an empty list as absent
pub fn join_tokens<S: AsRef<str>>(tokens: &[S]) -> Option<String> {
    let mut out = String::new();
    for token in tokens {
        let token = token.as_ref();
        if token.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(token);
    }
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

impl From<&str> for ClassValue {
    fn from(value: &str) -> Self {
        ClassValue::Str(value.to_string())
    }
}

impl From<String> for ClassValue {
    fn from(value: String) -> Self {
        ClassValue::Str(value)
    }
}

impl From<&String> for ClassValue {
    fn from(value: &String) -> Self {
        ClassValue::Str(value.clone())
    }
}

impl From<bool> for ClassValue {
    fn from(value: bool) -> Self {
        ClassValue::Bool(value)
    }
}

impl From<()> for ClassValue {
    fn from(_: ()) -> Self {
        ClassValue::Empty
    }
}

impl<T: Into<ClassValue>> From<Option<T>> for ClassValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(ClassValue::Empty)
    }
}

impl<T: Into<ClassValue>> From<Vec<T>> for ClassValue {
    fn from(value: Vec<T>) -> Self {
        ClassValue::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ClassValue>, const N: usize> From<[T; N]> for ClassValue {
    fn from(value: [T; N]) -> Self {
        ClassValue::List(value.into_iter().map(Into::into).collect())
    }
}

/// Build a heterogeneous [`ClassValue::List`].
///
/// ```
/// use tailwind_variants::{classes, ClassValue};
///
/// let value = classes!["a", None::<&str>, "", false, ["b"]];
/// assert_eq!(value.to_class_string().as_deref(), Some("a b"));
/// ```
#[macro_export]
macro_rules! classes {
    ($($item:expr),* $(,)?) => {
        $crate::ClassValue::List(vec![$($crate::ClassValue::from($item)),*])
    };
}

/// A runtime discriminator for a variant: a boolean, an integer, or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl PropValue {
    /// The lookup key for this value inside a variant's value map
    pub fn key(&self) -> Cow<'_, str> {
        match self {
            PropValue::Bool(true) => Cow::Borrowed("true"),
            PropValue::Bool(false) => Cow::Borrowed("false"),
            PropValue::Int(n) => Cow::Owned(n.to_string()),
            PropValue::Str(s) => Cow::Borrowed(s.as_str()),
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Normalize `true`, `false` and `0` to their string forms.
///
/// Every other value is returned unchanged.
pub fn falsy_to_string(value: &PropValue) -> PropValue {
    match value {
        PropValue::Bool(b) => PropValue::Str(b.to_string()),
        PropValue::Int(0) => PropValue::Str("0".to_string()),
        other => other.clone(),
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        PropValue::Int(value as i64)
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        PropValue::Int(value)
    }
}

impl From<u32> for PropValue {
    fn from(value: u32) -> Self {
        PropValue::Int(value as i64)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Str(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Str(value)
    }
}
