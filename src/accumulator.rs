use crate::schema::ResolvedSchema;
use crate::selector::Selection;

/// Collect the class tokens for one slot in precedence order:
/// slot base, active variants, compound variants, compound slots, then the
/// caller's own classes.
///
/// The result is not conflict-resolved; later tokens are meant to win.
pub fn accumulate(
    schema: &ResolvedSchema,
    selection: &Selection,
    slot: &str,
    class_tokens: &[String],
) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();

    if let Some(base) = schema.slots.get(slot) {
        tokens.extend(base.iter().cloned());
    }

    for (variant, key) in selection.active_variants() {
        let contribution = schema
            .variants
            .get(variant)
            .and_then(|values| values.get(key))
            .and_then(|per_slot| per_slot.get(slot));
        if let Some(classes) = contribution {
            tokens.extend(classes.iter().cloned());
        }
    }

    for compound in &schema.compound_variants {
        if !selection.satisfies(&compound.conditions) {
            continue;
        }
        if let Some(classes) = compound.classes.get(slot) {
            tokens.extend(classes.iter().cloned());
        }
    }

    for compound in &schema.compound_slots {
        if compound.slots.iter().any(|s| s == slot) && selection.satisfies(&compound.conditions) {
            tokens.extend(compound.tokens.iter().cloned());
        }
    }

    tokens.extend(class_tokens.iter().cloned());
    tokens
}
