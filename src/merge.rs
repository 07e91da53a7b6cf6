use crate::class_groups::{class_group, conflicting_groups};
use crate::merge_config::MergeConfig;
use std::collections::HashSet;
use std::fmt;

/// Resolves conflicts between utility classes.
///
/// Implementations must keep only the last class of each conflicting group,
/// preserve the relative order of the survivors, and never fail.
pub trait ClassMerger: Send + Sync {
    /// Merge a space-separated class string
    fn merge(&self, classes: &str, config: &MergeConfig) -> String;
}

impl fmt::Debug for dyn ClassMerger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClassMerger")
    }
}

/// Tailwind-aware merger backed by the built-in utility group table
#[derive(Debug, Default, Clone, Copy)]
pub struct TailwindMerger;

impl ClassMerger for TailwindMerger {
    fn merge(&self, classes: &str, config: &MergeConfig) -> String {
        let mut seen: HashSet<String> = HashSet::new();
        let mut survivors: Vec<&str> = Vec::new();

        // Walk backwards so the last class of a group wins
        for class in classes.split_whitespace().rev() {
            let parsed = ParsedClass::parse(class);
            let Some(group) = class_group(parsed.base, config) else {
                survivors.push(class);
                continue;
            };

            let variant_key = parsed.variant_key();
            let class_id = format!("{}{}", variant_key, group);
            if seen.contains(&class_id) {
                continue;
            }

            for conflict in conflicting_groups(&group, config) {
                seen.insert(format!("{}{}", variant_key, conflict));
            }
            seen.insert(class_id);
            survivors.push(class);
        }

        survivors.reverse();
        survivors.join(" ")
    }
}

/// Merge with the built-in rules only
pub fn tw_merge(classes: &str) -> String {
    TailwindMerger.merge(classes, &MergeConfig::default())
}

/// Merge with the built-in rules extended by `config`
pub fn tw_merge_with(classes: &str, config: &MergeConfig) -> String {
    TailwindMerger.merge(classes, config)
}

/// A class split into its modifiers and utility
#[derive(Debug, PartialEq)]
struct ParsedClass<'a> {
    modifiers: Vec<&'a str>,
    important: bool,
    /// Utility without modifiers, `!` or a trailing `/postfix`
    base: &'a str,
}

impl<'a> ParsedClass<'a> {
    fn parse(class: &'a str) -> Self {
        let mut modifiers = Vec::new();
        let mut depth = 0usize;
        let mut start = 0;

        for (i, ch) in class.char_indices() {
            match ch {
                '[' | '(' => depth += 1,
                ']' | ')' => depth = depth.saturating_sub(1),
                ':' if depth == 0 => {
                    modifiers.push(&class[start..i]);
                    start = i + 1;
                }
                _ => {}
            }
        }

        let mut base = &class[start..];
        let mut important = false;
        if let Some(rest) = base.strip_prefix('!') {
            base = rest;
            important = true;
        } else if let Some(rest) = base.strip_suffix('!') {
            base = rest;
            important = true;
        }

        Self {
            modifiers,
            important,
            base: strip_postfix(base),
        }
    }

    /// Modifier prefix shared by classes that may conflict.
    ///
    /// Plain modifiers are order-insensitive and get sorted; arbitrary ones
    /// (`[&>*]`) keep their position.
    fn variant_key(&self) -> String {
        let mut ordered: Vec<&str> = Vec::with_capacity(self.modifiers.len());
        let mut run: Vec<&str> = Vec::new();
        for modifier in &self.modifiers {
            if modifier.starts_with('[') {
                run.sort_unstable();
                ordered.append(&mut run);
                ordered.push(modifier);
            } else {
                run.push(modifier);
            }
        }
        run.sort_unstable();
        ordered.append(&mut run);

        let mut key = String::new();
        for modifier in ordered {
            key.push_str(modifier);
            key.push(':');
        }
        if self.important {
            key.push('!');
        }
        key
    }
}

/// `bg-red-500/50` -> `bg-red-500`; slashes inside brackets are kept
fn strip_postfix(base: &str) -> &str {
    let mut depth = 0usize;
    let mut cut = None;
    for (i, ch) in base.char_indices() {
        match ch {
            '[' | '(' => depth += 1,
            ']' | ')' => depth = depth.saturating_sub(1),
            '/' if depth == 0 => cut = Some(i),
            _ => {}
        }
    }
    match cut {
        Some(i) if i > 0 && i + 1 < base.len() => &base[..i],
        _ => base,
    }
}
