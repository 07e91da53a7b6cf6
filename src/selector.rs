use crate::config::MatchValue;
use crate::props::Props;
use crate::schema::ResolvedSchema;
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// Resolved variant assignment for one call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    /// Declared variant -> value key whose classes apply, if any
    active: IndexMap<String, Option<String>>,
    /// Values compound conditions are matched against: the active key of
    /// each declared variant, plus raw values of other condition props
    values: BTreeMap<String, String>,
}

impl Selection {
    /// Resolve every declared variant against `props`.
    ///
    /// `overrides` are slot-level props; they win over `props` for the same
    /// name.
    pub fn resolve(schema: &ResolvedSchema, props: &Props, overrides: Option<&Props>) -> Self {
        let lookup = |name: &str| overrides.and_then(|o| o.get(name)).or_else(|| props.get(name));

        let mut active = IndexMap::with_capacity(schema.variant_keys.len());
        let mut values = BTreeMap::new();
        for name in &schema.variant_keys {
            let declared = &schema.variants[name];
            let prop = lookup(name).map(|value| value.key());
            let default = schema.default_variants.get(name).map(|value| value.key());

            let selected = match (prop.as_deref(), default.as_deref()) {
                (Some(key), _) if declared.contains_key(key) => Some(key.to_string()),
                (_, Some(key)) if declared.contains_key(key) => Some(key.to_string()),
                (None, None) if declared.contains_key("false") => Some("false".to_string()),
                _ => None,
            };
            if let Some(key) = &selected {
                values.insert(name.clone(), key.clone());
            }
            active.insert(name.clone(), selected);
        }

        for name in &schema.condition_keys {
            let value = lookup(name).or_else(|| schema.default_variants.get(name));
            if let Some(value) = value {
                values.insert(name.clone(), value.key().into_owned());
            }
        }

        Self { active, values }
    }

    /// The value key whose classes apply for `variant`
    pub fn active(&self, variant: &str) -> Option<&str> {
        self.active.get(variant).and_then(|key| key.as_deref())
    }

    /// Active variants in declaration order
    pub fn active_variants(&self) -> impl Iterator<Item = (&str, &str)> {
        self.active
            .iter()
            .filter_map(|(name, key)| key.as_deref().map(|key| (name.as_str(), key)))
    }

    /// The value a compound condition on `name` sees
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Whether every condition holds
    pub fn satisfies(&self, conditions: &IndexMap<String, MatchValue>) -> bool {
        conditions.iter().all(|(name, expected)| {
            let actual = self.value(name);
            match expected {
                MatchValue::Absent => is_blank_or_false(actual),
                MatchValue::One(value) => {
                    let key = value.key();
                    if key == "false" && is_blank_or_false(actual) {
                        return true;
                    }
                    actual == Some(key.as_ref())
                }
                MatchValue::AnyOf(values) => values
                    .iter()
                    .any(|value| actual == Some(value.key().as_ref())),
            }
        })
    }

    /// Everything that decides the output, in name order
    pub fn assignment(&self) -> &BTreeMap<String, String> {
        &self.values
    }
}

fn is_blank_or_false(value: Option<&str>) -> bool {
    matches!(value, None | Some("false"))
}
