use crate::class_value::{ClassValue, PropValue};
use crate::errors::{Result, VariantError};
use crate::merge_config::MergeConfig;
use crate::resolver::Resolver;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Classes contributed by a variant value or compound entry.
///
/// A flat class list targets the `base` slot; a per-slot mapping targets the
/// named slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassContribution {
    Flat(ClassValue),
    PerSlot(IndexMap<String, ClassValue>),
}

impl Default for ClassContribution {
    fn default() -> Self {
        ClassContribution::Flat(ClassValue::Empty)
    }
}

impl ClassContribution {
    /// A per-slot contribution from `(slot, classes)` pairs
    pub fn slots<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<ClassValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        ClassContribution::PerSlot(
            entries
                .into_iter()
                .map(|(slot, value)| (slot.into(), value.into()))
                .collect(),
        )
    }
}

impl From<&str> for ClassContribution {
    fn from(value: &str) -> Self {
        ClassContribution::Flat(value.into())
    }
}

impl From<String> for ClassContribution {
    fn from(value: String) -> Self {
        ClassContribution::Flat(value.into())
    }
}

impl From<ClassValue> for ClassContribution {
    fn from(value: ClassValue) -> Self {
        ClassContribution::Flat(value)
    }
}

impl From<IndexMap<String, ClassValue>> for ClassContribution {
    fn from(value: IndexMap<String, ClassValue>) -> Self {
        ClassContribution::PerSlot(value)
    }
}

/// A condition value inside a compound entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchValue {
    /// Matches an absent or `false` value
    Absent,
    One(PropValue),
    /// Matches when the value is any of the listed ones
    AnyOf(Vec<PropValue>),
}

macro_rules! match_value_from {
    ($($ty:ty),*) => {
        $(impl From<$ty> for MatchValue {
            fn from(value: $ty) -> Self {
                MatchValue::One(value.into())
            }
        })*
    };
}

match_value_from!(PropValue, bool, i32, i64, u32, &str, String);

/// Classes applied when every condition holds for the resolved variants
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompoundVariant {
    pub conditions: IndexMap<String, MatchValue>,
    pub class: ClassContribution,
    pub class_name: ClassContribution,
}

impl CompoundVariant {
    pub fn new(class: impl Into<ClassContribution>) -> Self {
        Self {
            class: class.into(),
            ..Default::default()
        }
    }

    /// Require `variant` to equal `value`
    pub fn when(mut self, variant: impl Into<String>, value: impl Into<MatchValue>) -> Self {
        self.conditions.insert(variant.into(), value.into());
        self
    }

    /// Require `variant` to be one of `values`
    pub fn when_any<V, I>(mut self, variant: impl Into<String>, values: I) -> Self
    where
        V: Into<PropValue>,
        I: IntoIterator<Item = V>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.conditions
            .insert(variant.into(), MatchValue::AnyOf(values));
        self
    }
}

/// Classes applied to several slots at once, optionally behind conditions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompoundSlot {
    pub slots: Vec<String>,
    pub conditions: IndexMap<String, MatchValue>,
    pub class: ClassValue,
    pub class_name: ClassValue,
}

impl CompoundSlot {
    pub fn new<S, I>(slots: I, class: impl Into<ClassValue>) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        Self {
            slots: slots.into_iter().map(Into::into).collect(),
            class: class.into(),
            ..Default::default()
        }
    }

    pub fn when(mut self, variant: impl Into<String>, value: impl Into<MatchValue>) -> Self {
        self.conditions.insert(variant.into(), value.into());
        self
    }

    pub fn when_any<V, I>(mut self, variant: impl Into<String>, values: I) -> Self
    where
        V: Into<PropValue>,
        I: IntoIterator<Item = V>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.conditions
            .insert(variant.into(), MatchValue::AnyOf(values));
        self
    }
}

/// The user-authored variant schema
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "RawVariantConfig")]
pub struct VariantConfig {
    pub base: ClassValue,
    pub slots: Option<IndexMap<String, ClassValue>>,
    pub variants: IndexMap<String, IndexMap<String, ClassContribution>>,
    pub compound_variants: Vec<CompoundVariant>,
    pub compound_slots: Vec<CompoundSlot>,
    pub default_variants: IndexMap<String, PropValue>,
    pub extend: Option<Resolver>,
}

impl VariantConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base(mut self, classes: impl Into<ClassValue>) -> Self {
        self.base = classes.into();
        self
    }

    /// Declare a slot; declaring any slot makes the resolver slotted
    pub fn slot(mut self, name: impl Into<String>, classes: impl Into<ClassValue>) -> Self {
        self.slots
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), classes.into());
        self
    }

    /// Declare a variant from `(value, classes)` pairs.
    ///
    /// Values are keyed by their string form, so `true`/`false` declare a
    /// boolean variant.
    pub fn variant<K, V, I>(mut self, name: impl Into<String>, values: I) -> Self
    where
        K: Into<PropValue>,
        V: Into<ClassContribution>,
        I: IntoIterator<Item = (K, V)>,
    {
        let entry = self.variants.entry(name.into()).or_default();
        for (key, classes) in values {
            let key: PropValue = key.into();
            entry.insert(key.key().into_owned(), classes.into());
        }
        self
    }

    pub fn compound_variant(mut self, compound: CompoundVariant) -> Self {
        self.compound_variants.push(compound);
        self
    }

    pub fn compound_slot(mut self, compound: CompoundSlot) -> Self {
        self.compound_slots.push(compound);
        self
    }

    pub fn default_variant(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.default_variants.insert(name.into(), value.into());
        self
    }

    /// Inherit everything declared by `parent`
    pub fn extend(mut self, parent: &Resolver) -> Self {
        self.extend = Some(parent.clone());
        self
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let raw: serde_yaml::Value = serde_yaml::from_str(content)?;
        for field in LIST_FIELDS {
            if let Some(value) = raw.get(field) {
                check_list_shape(field, yaml_kind(value))?;
            }
        }
        Ok(serde_yaml::from_value(raw)?)
    }

    /// Load configuration from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: serde_json::Value = serde_json::from_str(content)?;
        Self::from_value(raw)
    }

    /// Build configuration from dynamic JSON data
    pub fn from_value(raw: serde_json::Value) -> Result<Self> {
        for field in LIST_FIELDS {
            if let Some(value) = raw.get(field) {
                check_list_shape(field, json_kind(value))?;
            }
        }
        Ok(serde_json::from_value(raw)?)
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = read_config(path)?;
        Self::from_yaml_str(&content).map_err(|e| load_error(path, e))
    }

    /// Load configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = read_config(path)?;
        Self::from_json_str(&content).map_err(|e| load_error(path, e))
    }

    /// Load configuration from a file (auto-detect format)
    pub fn from_file(path: &Path) -> Result<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(VariantError::LoadError {
                path: path.display().to_string(),
                message: "Unsupported config file format. Use .yaml, .yml, or .json".to_string(),
            }),
        }
    }
}

const LIST_FIELDS: [&str; 2] = ["compoundVariants", "compoundSlots"];

fn check_list_shape(field: &str, kind: &str) -> Result<()> {
    match kind {
        "list" | "null" => Ok(()),
        other => Err(VariantError::config(
            field,
            format!("expected a list of entries, got {}", other),
        )),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "list",
        serde_json::Value::Object(_) => "object",
    }
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "boolean",
        serde_yaml::Value::Number(_) => "number",
        serde_yaml::Value::String(_) => "string",
        serde_yaml::Value::Sequence(_) => "list",
        serde_yaml::Value::Mapping(_) => "object",
        serde_yaml::Value::Tagged(_) => "tagged value",
    }
}

fn read_config(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| VariantError::LoadError {
        path: path.display().to_string(),
        message: format!("Failed to read config file: {}", e),
    })
}

fn load_error(path: &Path, error: VariantError) -> VariantError {
    match error {
        // Field-level errors already say what is wrong
        err @ VariantError::ConfigError { .. } => err,
        other => VariantError::LoadError {
            path: path.display().to_string(),
            message: other.to_string(),
        },
    }
}

/// On-disk shape, using the field names of the JavaScript library
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawVariantConfig {
    base: ClassValue,
    slots: Option<IndexMap<String, ClassValue>>,
    variants: IndexMap<String, IndexMap<PropValue, ClassContribution>>,
    compound_variants: Option<Vec<RawCompoundVariant>>,
    compound_slots: Option<Vec<RawCompoundSlot>>,
    default_variants: IndexMap<String, PropValue>,
}

#[derive(Debug, Deserialize)]
struct RawCompoundVariant {
    #[serde(default)]
    class: ClassContribution,
    #[serde(default, rename = "className")]
    class_name: ClassContribution,
    #[serde(flatten)]
    conditions: IndexMap<String, MatchValue>,
}

#[derive(Debug, Deserialize)]
struct RawCompoundSlot {
    slots: Vec<String>,
    #[serde(default)]
    class: ClassValue,
    #[serde(default, rename = "className")]
    class_name: ClassValue,
    #[serde(flatten)]
    conditions: IndexMap<String, MatchValue>,
}

impl From<RawVariantConfig> for VariantConfig {
    fn from(raw: RawVariantConfig) -> Self {
        let variants = raw
            .variants
            .into_iter()
            .map(|(name, values)| {
                let values = values
                    .into_iter()
                    .map(|(key, classes)| (key.key().into_owned(), classes))
                    .collect();
                (name, values)
            })
            .collect();

        Self {
            base: raw.base,
            slots: raw.slots,
            variants,
            compound_variants: raw
                .compound_variants
                .unwrap_or_default()
                .into_iter()
                .map(|c| CompoundVariant {
                    conditions: c.conditions,
                    class: c.class,
                    class_name: c.class_name,
                })
                .collect(),
            compound_slots: raw
                .compound_slots
                .unwrap_or_default()
                .into_iter()
                .map(|c| CompoundSlot {
                    slots: c.slots,
                    conditions: c.conditions,
                    class: c.class,
                    class_name: c.class_name,
                })
                .collect(),
            default_variants: raw.default_variants,
            extend: None,
        }
    }
}

/// Options applied to a `tv()` call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TvOptions {
    /// Run accumulated classes through the conflict merger
    pub tw_merge: bool,

    /// Project-specific merge groups and theme scales
    pub tw_merge_config: MergeConfig,

    /// Maximum number of memoized results per resolver; 0 disables the cache
    pub cache_size: usize,

    /// Reject compound slots that name undeclared slots
    pub strict_slots: bool,
}

impl Default for TvOptions {
    fn default() -> Self {
        Self {
            tw_merge: true,
            tw_merge_config: MergeConfig::default(),
            cache_size: 0,
            strict_slots: false,
        }
    }
}

impl TvOptions {
    /// Load options from a file (auto-detect format)
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = read_config(path)?;
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
            Some("json") => Ok(serde_json::from_str(&content)?),
            _ => Err(VariantError::LoadError {
                path: path.display().to_string(),
                message: "Unsupported options file format. Use .yaml, .yml, or .json".to_string(),
            }),
        }
    }

    pub fn without_merge(mut self) -> Self {
        self.tw_merge = false;
        self
    }

    pub fn with_merge_config(mut self, config: MergeConfig) -> Self {
        self.tw_merge_config = config;
        self
    }

    pub fn with_cache(mut self, capacity: usize) -> Self {
        self.cache_size = capacity;
        self
    }

    pub fn strict(mut self) -> Self {
        self.strict_slots = true;
        self
    }
}
