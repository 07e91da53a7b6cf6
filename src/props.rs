use crate::class_value::{ClassValue, PropValue};
use crate::errors::{Result, VariantError};
use indexmap::IndexMap;

/// Runtime props for one resolution.
///
/// Variant values are keyed by name; `class` and `className` are kept apart
/// and always appended after every other class source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props {
    values: IndexMap<String, PropValue>,
    class: ClassValue,
    class_name: ClassValue,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a prop. `class`/`className` are routed to the class overrides.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a prop only when a value is present; `None` behaves as if the
    /// prop was never passed
    pub fn with_opt<V: Into<PropValue>>(mut self, name: impl Into<String>, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.set(name, value);
        }
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<PropValue>) {
        let name = name.into();
        let value = value.into();
        match name.as_str() {
            "class" => self.class = ClassValue::Str(value.to_string()),
            "className" => self.class_name = ClassValue::Str(value.to_string()),
            _ => {
                self.values.insert(name, value);
            }
        }
    }

    pub fn class(mut self, classes: impl Into<ClassValue>) -> Self {
        self.class = classes.into();
        self
    }

    pub fn class_name(mut self, classes: impl Into<ClassValue>) -> Self {
        self.class_name = classes.into();
        self
    }

    /// The value passed for `name`, if any
    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.values.get(name)
    }

    /// All non-class props in insertion order
    pub fn values(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Caller class overrides, `class` before `className`
    pub fn class_tokens(&self) -> Vec<String> {
        let mut tokens = self.class.tokens();
        self.class_name.push_tokens(&mut tokens);
        tokens
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.class.is_empty() && self.class_name.is_empty()
    }

    /// Build props from a JSON object; non-scalar values are ignored
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| VariantError::InvalidInput("props must be a JSON object".to_string()))?;

        let mut props = Props::new();
        for (name, value) in object {
            match (name.as_str(), value) {
                ("class" | "className", _) => {
                    let classes: ClassValue = serde_json::from_value(value.clone())?;
                    if name == "class" {
                        props.class = classes;
                    } else {
                        props.class_name = classes;
                    }
                }
                (_, serde_json::Value::Bool(b)) => props.set(name.as_str(), *b),
                (_, serde_json::Value::String(s)) => props.set(name.as_str(), s.as_str()),
                (_, serde_json::Value::Number(n)) => {
                    if let Some(n) = n.as_i64() {
                        props.set(name.as_str(), n);
                    } else {
                        props.set(name.as_str(), n.to_string());
                    }
                }
                _ => {}
            }
        }
        Ok(props)
    }

    /// Parse a `name=value` pair; `true`, `false` and integers keep their type
    pub fn parse_pair(pair: &str) -> Result<(String, PropValue)> {
        let (name, raw) = pair.split_once('=').ok_or_else(|| {
            VariantError::InvalidInput(format!("expected name=value, got '{}'", pair))
        })?;
        let name = name.trim();
        if name.is_empty() {
            return Err(VariantError::InvalidInput(format!("missing prop name in '{}'", pair)));
        }

        let value = match raw.trim() {
            "true" => PropValue::Bool(true),
            "false" => PropValue::Bool(false),
            other => other
                .parse::<i64>()
                .map(PropValue::Int)
                .unwrap_or_else(|_| PropValue::Str(other.to_string())),
        };
        Ok((name.to_string(), value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_props_are_not_variants() {
        let props = Props::new()
            .with("size", "sm")
            .with("class", "mt-2")
            .with("className", "mb-2");
        assert_eq!(props.get("class"), None);
        assert_eq!(props.get("size"), Some(&PropValue::from("sm")));
        assert_eq!(props.class_tokens(), vec!["mt-2", "mb-2"]);
    }

    #[test]
    fn test_with_opt_none_is_absent() {
        let props = Props::new().with_opt("size", None::<&str>);
        assert!(props.is_empty());
    }

    #[test]
    fn test_from_json() {
        let value = serde_json::json!({
            "size": "lg",
            "disabled": true,
            "level": 2,
            "class": ["a", null, "b"],
            "onClick": null
        });
        let props = Props::from_json(&value).unwrap();
        assert_eq!(props.get("size"), Some(&PropValue::from("lg")));
        assert_eq!(props.get("disabled"), Some(&PropValue::Bool(true)));
        assert_eq!(props.get("level"), Some(&PropValue::Int(2)));
        assert_eq!(props.get("onClick"), None);
        assert_eq!(props.class_tokens(), vec!["a", "b"]);
    }

    #[test]
    fn test_parse_pair() {
        assert_eq!(
            Props::parse_pair("size=sm").unwrap(),
            ("size".to_string(), PropValue::from("sm"))
        );
        assert_eq!(
            Props::parse_pair("disabled=true").unwrap().1,
            PropValue::Bool(true)
        );
        assert_eq!(Props::parse_pair("level=3").unwrap().1, PropValue::Int(3));
        assert!(Props::parse_pair("size").is_err());
        assert!(Props::parse_pair("=sm").is_err());
    }
}
