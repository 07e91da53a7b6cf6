use crate::class_value::{ClassValue, PropValue};
use crate::config::{ClassContribution, MatchValue, VariantConfig};
use crate::errors::{Result, VariantError};
use indexmap::IndexMap;
use tracing::{debug, warn};

/// Name of the implicit slot that carries `base`
pub const BASE_SLOT: &str = "base";

/// Flattened class tokens per slot
pub type SlotTokens = IndexMap<String, Vec<String>>;

/// A compound variant with its classes flattened per slot
#[derive(Debug, Clone, Default)]
pub struct ResolvedCompound {
    pub conditions: IndexMap<String, MatchValue>,
    pub classes: SlotTokens,
}

/// A compound slot entry with its classes flattened
#[derive(Debug, Clone, Default)]
pub struct ResolvedCompoundSlot {
    pub slots: Vec<String>,
    pub conditions: IndexMap<String, MatchValue>,
    pub tokens: Vec<String>,
}

/// A variant schema with its whole extend chain collapsed.
///
/// Every list keeps parent entries before child entries so that later
/// (child) classes win conflicts during merging.
#[derive(Debug, Clone)]
pub struct ResolvedSchema {
    /// Whether any configuration in the chain declared slots
    pub has_slots: bool,
    /// Base tokens per slot, `base` first
    pub slots: SlotTokens,
    /// variant name -> value key -> per-slot tokens
    pub variants: IndexMap<String, IndexMap<String, SlotTokens>>,
    pub compound_variants: Vec<ResolvedCompound>,
    pub compound_slots: Vec<ResolvedCompoundSlot>,
    pub default_variants: IndexMap<String, PropValue>,
    /// All declared variant names, parent-declared first
    pub variant_keys: Vec<String>,
    /// Prop names read by compound conditions but not declared as variants
    pub condition_keys: Vec<String>,
}

impl Default for ResolvedSchema {
    fn default() -> Self {
        let mut slots = SlotTokens::new();
        slots.insert(BASE_SLOT.to_string(), Vec::new());
        Self {
            has_slots: false,
            slots,
            variants: IndexMap::new(),
            compound_variants: Vec::new(),
            compound_slots: Vec::new(),
            default_variants: IndexMap::new(),
            variant_keys: Vec::new(),
            condition_keys: Vec::new(),
        }
    }
}

impl ResolvedSchema {
    /// Normalize `config`, splicing it after its parent's resolved schema
    pub fn normalize(config: &VariantConfig, strict_slots: bool) -> Result<Self> {
        let mut schema = match &config.extend {
            Some(parent) => parent.schema().clone(),
            None => ResolvedSchema::default(),
        };

        append(&mut schema.slots, BASE_SLOT, &config.base);
        if let Some(slots) = &config.slots {
            schema.has_slots = true;
            for (name, classes) in slots {
                append(&mut schema.slots, name, classes);
            }
        }

        for (name, values) in &config.variants {
            if !schema.variant_keys.contains(name) {
                schema.variant_keys.push(name.clone());
            }
            let variant = schema.variants.entry(name.clone()).or_default();
            for (key, contribution) in values {
                let target = variant.entry(key.clone()).or_default();
                append_contribution(target, contribution);
            }
        }

        for (index, compound) in config.compound_variants.iter().enumerate() {
            if compound.conditions.is_empty() {
                debug!(index, "compound variant without conditions always applies");
            }
            let mut classes = SlotTokens::new();
            append_contribution(&mut classes, &compound.class);
            append_contribution(&mut classes, &compound.class_name);
            schema.compound_variants.push(ResolvedCompound {
                conditions: compound.conditions.clone(),
                classes,
            });
        }

        let offset = schema.compound_slots.len();
        for (index, compound) in config.compound_slots.iter().enumerate() {
            for slot in &compound.slots {
                if schema.slots.contains_key(slot) {
                    continue;
                }
                if strict_slots {
                    return Err(VariantError::UndeclaredSlot {
                        index: offset + index,
                        slot: slot.clone(),
                    });
                }
                warn!(slot = %slot, index = offset + index, "compound slot references undeclared slot");
            }

            let mut tokens = compound.class.tokens();
            compound.class_name.push_tokens(&mut tokens);
            schema.compound_slots.push(ResolvedCompoundSlot {
                slots: compound.slots.clone(),
                conditions: compound.conditions.clone(),
                tokens,
            });
        }

        for (name, value) in &config.default_variants {
            schema.default_variants.insert(name.clone(), value.clone());
        }

        let conditions = schema
            .compound_variants
            .iter()
            .flat_map(|c| c.conditions.keys())
            .chain(schema.compound_slots.iter().flat_map(|c| c.conditions.keys()));
        let mut condition_keys = Vec::new();
        for name in conditions {
            if !schema.variants.contains_key(name) && !condition_keys.contains(name) {
                condition_keys.push(name.clone());
            }
        }
        schema.condition_keys = condition_keys;

        debug!(
            slots = schema.slots.len(),
            variants = schema.variant_keys.len(),
            compound_variants = schema.compound_variants.len(),
            compound_slots = schema.compound_slots.len(),
            extended = config.extend.is_some(),
            "normalized variant schema"
        );

        Ok(schema)
    }

    /// Declared slot names in resolution order
    pub fn slot_names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }
}

fn append(target: &mut SlotTokens, slot: &str, classes: &ClassValue) {
    let tokens = target.entry(slot.to_string()).or_default();
    classes.push_tokens(tokens);
}

fn append_contribution(target: &mut SlotTokens, contribution: &ClassContribution) {
    match contribution {
        ClassContribution::Flat(classes) => append(target, BASE_SLOT, classes),
        ClassContribution::PerSlot(per_slot) => {
            for (slot, classes) in per_slot {
                append(target, slot, classes);
            }
        }
    }
}
