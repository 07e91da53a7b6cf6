use crate::accumulator::accumulate;
use crate::cache::{CacheKey, ResolutionCache};
use crate::class_value::join_tokens;
use crate::config::{TvOptions, VariantConfig};
use crate::errors::Result;
use crate::merge::{ClassMerger, TailwindMerger};
use crate::props::Props;
use crate::schema::{ResolvedSchema, BASE_SLOT};
use crate::selector::Selection;
use indexmap::IndexMap;
use rayon::prelude::*;
use std::fmt;
use std::sync::Arc;

/// Build a resolver with default options
pub fn tv(config: VariantConfig) -> Result<Resolver> {
    tv_with(config, TvOptions::default())
}

/// Build a resolver with explicit options
pub fn tv_with(config: VariantConfig, options: TvOptions) -> Result<Resolver> {
    Resolver::build(&config, options, Arc::new(TailwindMerger))
}

/// Create a factory whose `tv` calls share `options` and merger
pub fn create_tv(options: TvOptions) -> TvFactory {
    TvFactory {
        options,
        merger: Arc::new(TailwindMerger),
    }
}

/// Reusable `tv` with pre-applied options
#[derive(Debug, Clone)]
pub struct TvFactory {
    options: TvOptions,
    merger: Arc<dyn ClassMerger>,
}

impl TvFactory {
    /// Use a different conflict merger for every resolver built from here
    pub fn with_merger(mut self, merger: impl ClassMerger + 'static) -> Self {
        self.merger = Arc::new(merger);
        self
    }

    pub fn options(&self) -> &TvOptions {
        &self.options
    }

    pub fn tv(&self, config: VariantConfig) -> Result<Resolver> {
        Resolver::build(&config, self.options.clone(), Arc::clone(&self.merger))
    }

    /// Build with `options` for this config only. The factory's merge config
    /// is deep-merged with the one in `options`; every other field comes
    /// from `options`.
    pub fn tv_with(&self, config: VariantConfig, mut options: TvOptions) -> Result<Resolver> {
        options.tw_merge_config = self
            .options
            .tw_merge_config
            .clone()
            .merge(options.tw_merge_config);
        Resolver::build(&config, options, Arc::clone(&self.merger))
    }
}

struct ResolverInner {
    schema: ResolvedSchema,
    options: TvOptions,
    merger: Arc<dyn ClassMerger>,
    cache: Option<ResolutionCache>,
}

/// A normalized variant schema ready to resolve props into classes.
///
/// Cheap to clone; clones share the schema and cache.
#[derive(Clone)]
pub struct Resolver {
    inner: Arc<ResolverInner>,
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("slots", &self.inner.schema.slots.keys().collect::<Vec<_>>())
            .field("variant_keys", &self.inner.schema.variant_keys)
            .field("tw_merge", &self.inner.options.tw_merge)
            .finish()
    }
}

impl Resolver {
    fn build(config: &VariantConfig, options: TvOptions, merger: Arc<dyn ClassMerger>) -> Result<Self> {
        let schema = ResolvedSchema::normalize(config, options.strict_slots)?;
        let cache = (options.cache_size > 0).then(|| ResolutionCache::new(options.cache_size));
        Ok(Self {
            inner: Arc::new(ResolverInner {
                schema,
                options,
                merger,
                cache,
            }),
        })
    }

    pub fn schema(&self) -> &ResolvedSchema {
        &self.inner.schema
    }

    pub fn options(&self) -> &TvOptions {
        &self.inner.options
    }

    /// Every declared variant name across the extend chain
    pub fn variant_keys(&self) -> &[String] {
        &self.inner.schema.variant_keys
    }

    pub fn has_slots(&self) -> bool {
        self.inner.schema.has_slots
    }

    pub fn slot_names(&self) -> Vec<&str> {
        self.inner.schema.slot_names().collect()
    }

    /// Resolve the class string for `props`.
    ///
    /// On a slotted resolver this resolves the `base` slot, with the props'
    /// `class`/`className` applied to it.
    pub fn resolve(&self, props: &Props) -> Option<String> {
        self.resolve_slot(BASE_SLOT, props, None)
    }

    /// Per-slot resolvers sharing `props` as the outer variant assignment
    pub fn slots(&self, props: &Props) -> Slots {
        Slots {
            resolver: self.clone(),
            props: props.clone(),
        }
    }

    /// Resolve many prop sets in parallel
    pub fn resolve_batch(&self, props: &[Props]) -> Vec<Option<String>> {
        props.par_iter().map(|p| self.resolve(p)).collect()
    }

    /// Number of memoized results, if caching is enabled
    pub fn cached_entries(&self) -> Option<usize> {
        self.inner.cache.as_ref().map(ResolutionCache::len)
    }

    fn resolve_slot(&self, slot: &str, props: &Props, local: Option<&Props>) -> Option<String> {
        let schema = &self.inner.schema;
        let selection = Selection::resolve(schema, props, local);
        let class_tokens = match local {
            Some(local) => local.class_tokens(),
            None => props.class_tokens(),
        };

        let key = self
            .inner
            .cache
            .as_ref()
            .map(|_| CacheKey::new(slot, selection.assignment(), &class_tokens));
        if let (Some(cache), Some(key)) = (&self.inner.cache, &key) {
            if let Some(hit) = cache.get(key) {
                return hit;
            }
        }

        let tokens = accumulate(schema, &selection, slot, &class_tokens);
        let resolved = self.finish(&tokens);

        if let (Some(cache), Some(key)) = (&self.inner.cache, key) {
            cache.insert(key, resolved.clone());
        }
        resolved
    }

    fn finish(&self, tokens: &[String]) -> Option<String> {
        let joined = join_tokens(tokens)?;
        if !self.inner.options.tw_merge {
            return Some(joined);
        }
        let merged = self
            .inner
            .merger
            .merge(&joined, &self.inner.options.tw_merge_config);
        if merged.is_empty() {
            None
        } else {
            Some(merged)
        }
    }
}

/// Slot functions produced by [`Resolver::slots`]
#[derive(Debug, Clone)]
pub struct Slots {
    resolver: Resolver,
    props: Props,
}

impl Slots {
    /// The resolver for a declared slot
    pub fn get<'a>(&'a self, name: &'a str) -> Option<SlotResolver<'a>> {
        self.resolver
            .inner
            .schema
            .slots
            .contains_key(name)
            .then_some(SlotResolver { slots: self, name })
    }

    pub fn base(&self) -> SlotResolver<'_> {
        SlotResolver {
            slots: self,
            name: BASE_SLOT,
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.resolver.slot_names()
    }

    /// Resolve a slot with local props; `None` for undeclared slots
    pub fn resolve(&self, name: &str, local: &Props) -> Option<String> {
        self.get(name).and_then(|slot| slot.resolve(local))
    }

    /// Resolve every slot without local props
    pub fn resolve_all(&self) -> IndexMap<String, Option<String>> {
        let local = Props::new();
        self.resolver
            .inner
            .schema
            .slot_names()
            .map(|name| {
                let classes = self.resolver.resolve_slot(name, &self.props, Some(&local));
                (name.to_string(), classes)
            })
            .collect()
    }
}

/// One slot's resolver
#[derive(Debug, Clone, Copy)]
pub struct SlotResolver<'a> {
    slots: &'a Slots,
    name: &'a str,
}

impl SlotResolver<'_> {
    pub fn name(&self) -> &str {
        self.name
    }

    /// Resolve this slot. `local` may carry its own `class`/`className` and
    /// variant values that override the outer props for this slot only.
    pub fn resolve(&self, local: &Props) -> Option<String> {
        self.slots
            .resolver
            .resolve_slot(self.name, &self.slots.props, Some(local))
    }
}
