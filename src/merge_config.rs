use crate::errors::{Result, VariantError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Project-specific extension of the class-conflict rules.
///
/// Everything declared here is added on top of the built-in Tailwind groups;
/// nothing is replaced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MergeConfig {
    /// Extra utility groups: group id -> class patterns.
    ///
    /// A pattern is either an exact class (`"btn-ghost"`) or a prefix ending
    /// in `-*` (`"text-shadow-*"`). Custom groups are checked before the
    /// built-in ones.
    pub class_groups: IndexMap<String, Vec<String>>,

    /// Extra conflicts: group id -> groups that a later class of it overrides
    pub conflicting_class_groups: IndexMap<String, Vec<String>>,

    /// Additional theme scale names
    pub theme: ThemeScales,
}

/// Custom theme scale tokens that the built-in rules should accept
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeScales {
    /// Spacing tokens, e.g. `gutter` for `p-gutter`
    pub spacing: Vec<String>,

    /// Font size tokens, e.g. `tiny` for `text-tiny`
    pub font_size: Vec<String>,

    /// Border radius tokens
    pub radius: Vec<String>,

    /// Box shadow tokens
    pub shadow: Vec<String>,
}

impl ThemeScales {
    fn merge(&mut self, other: ThemeScales) {
        extend_unique(&mut self.spacing, other.spacing);
        extend_unique(&mut self.font_size, other.font_size);
        extend_unique(&mut self.radius, other.radius);
        extend_unique(&mut self.shadow, other.shadow);
    }
}

impl MergeConfig {
    /// Whether this config adds nothing to the built-in rules
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Add an exact class or `prefix-*` pattern to a group
    pub fn with_class_group(mut self, group: impl Into<String>, pattern: impl Into<String>) -> Self {
        let patterns = self.class_groups.entry(group.into()).or_default();
        extend_unique(patterns, vec![pattern.into()]);
        self
    }

    pub fn with_conflict(mut self, group: impl Into<String>, overrides: impl Into<String>) -> Self {
        let groups = self
            .conflicting_class_groups
            .entry(group.into())
            .or_default();
        extend_unique(groups, vec![overrides.into()]);
        self
    }

    pub fn with_spacing(mut self, token: impl Into<String>) -> Self {
        extend_unique(&mut self.theme.spacing, vec![token.into()]);
        self
    }

    pub fn with_font_size(mut self, token: impl Into<String>) -> Self {
        extend_unique(&mut self.theme.font_size, vec![token.into()]);
        self
    }

    /// Deep-merge with another configuration; entries of `other` are appended
    pub fn merge(mut self, other: Self) -> Self {
        for (group, patterns) in other.class_groups {
            extend_unique(self.class_groups.entry(group).or_default(), patterns);
        }
        for (group, conflicts) in other.conflicting_class_groups {
            extend_unique(
                self.conflicting_class_groups.entry(group).or_default(),
                conflicts,
            );
        }
        self.theme.merge(other.theme);
        self
    }

    /// Load a merge configuration from a YAML or JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| VariantError::LoadError {
            path: path.display().to_string(),
            message: format!("Failed to read merge config: {}", e),
        })?;

        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
            Some("json") => Ok(serde_json::from_str(&content)?),
            _ => Err(VariantError::LoadError {
                path: path.display().to_string(),
                message: "Unsupported merge config format. Use .yaml, .yml, or .json".to_string(),
            }),
        }
    }
}

fn extend_unique(target: &mut Vec<String>, items: Vec<String>) {
    for item in items {
        if !target.contains(&item) {
            target.push(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_is_empty() {
        assert!(MergeConfig::default().is_empty());
        assert!(!MergeConfig::default().with_spacing("gutter").is_empty());
    }

    #[test]
    fn test_merge_appends_without_duplicates() {
        let base = MergeConfig::default()
            .with_class_group("text-shadow", "text-shadow-*")
            .with_spacing("gutter");
        let other = MergeConfig::default()
            .with_class_group("text-shadow", "text-shadow-*")
            .with_class_group("text-shadow", "text-shadow")
            .with_spacing("gutter")
            .with_spacing("rail");

        let merged = base.merge(other);
        assert_eq!(
            merged.class_groups["text-shadow"],
            vec!["text-shadow-*", "text-shadow"]
        );
        assert_eq!(merged.theme.spacing, vec!["gutter", "rail"]);
    }

    #[test]
    fn test_yaml_loading() {
        let yaml = r#"
classGroups:
  shadow-glow: ["glow-*"]
conflictingClassGroups:
  shadow-glow: ["shadow"]
theme:
  fontSize: ["tiny"]
"#;
        let mut file = NamedTempFile::with_suffix(".yml").unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let config = MergeConfig::from_file(file.path()).unwrap();
        assert_eq!(config.class_groups["shadow-glow"], vec!["glow-*"]);
        assert_eq!(config.conflicting_class_groups["shadow-glow"], vec!["shadow"]);
        assert_eq!(config.theme.font_size, vec!["tiny"]);
    }
}
