use crate::class_value::{join_tokens, ClassValue};
use crate::config::TvOptions;
use crate::merge::tw_merge_with;

/// Flatten class lists, independent of any variant logic.
///
/// ```
/// use tailwind_variants::{cn, TvOptions};
///
/// let classes = cn(["px-4", "py-2", "px-2"]);
/// assert_eq!(classes.resolve(&TvOptions::default()).as_deref(), Some("py-2 px-2"));
/// assert_eq!(
///     classes.resolve(&TvOptions::default().without_merge()).as_deref(),
///     Some("px-4 py-2 px-2")
/// );
/// ```
pub fn cn<I, T>(classes: I) -> Cn
where
    I: IntoIterator<Item = T>,
    T: Into<ClassValue>,
{
    let mut tokens = Vec::new();
    for value in classes {
        value.into().push_tokens(&mut tokens);
    }
    Cn { tokens }
}

/// Flattened classes awaiting an optional merge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cn {
    tokens: Vec<String>,
}

impl Cn {
    /// Join the classes, merging conflicts when `options.tw_merge` is set
    pub fn resolve(&self, options: &TvOptions) -> Option<String> {
        let joined = join_tokens(&self.tokens)?;
        if !options.tw_merge {
            return Some(joined);
        }
        let merged = tw_merge_with(&joined, &options.tw_merge_config);
        if merged.is_empty() {
            None
        } else {
            Some(merged)
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}
