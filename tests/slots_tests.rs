use insta::assert_snapshot;
use tailwind_variants::{
    tv, tv_with, ClassContribution, CompoundSlot, CompoundVariant, Props, TvOptions, VariantConfig,
    VariantError,
};

fn card() -> VariantConfig {
    VariantConfig::new()
        .base("rounded-lg")
        .slot("base", "flex flex-col")
        .slot("header", "px-4 py-2 font-semibold")
        .slot("body", "p-4 text-sm")
        .variant(
            "size",
            [
                ("sm", ClassContribution::slots([("header", "py-1"), ("body", "p-2 text-xs")])),
                ("lg", ClassContribution::slots([("header", "py-4"), ("body", "p-6 text-lg")])),
            ],
        )
        .variant("shadow", [(true, "shadow-lg")])
        .default_variant("size", "sm")
}

#[test]
fn test_slot_names_keep_base_first() {
    let resolver = tv(card()).unwrap();
    assert!(resolver.has_slots());
    assert_eq!(resolver.slot_names(), vec!["base", "header", "body"]);
}

#[test]
fn test_slots_are_independent() {
    let resolver = tv(card()).unwrap();
    let slots = resolver.slots(&Props::new().with("shadow", true));

    let header = slots.get("header").unwrap().resolve(&Props::new()).unwrap();
    let body = slots.get("body").unwrap().resolve(&Props::new()).unwrap();
    let base = slots.base().resolve(&Props::new()).unwrap();

    assert_eq!(header, "px-4 font-semibold py-1");
    assert_eq!(body, "p-2 text-xs");
    // flat contributions target the base slot
    assert_eq!(base, "rounded-lg flex flex-col shadow-lg");
    assert!(!header.contains("p-2"));
    assert!(!body.contains("font-semibold"));
}

#[test]
fn test_slot_class_override_is_local() {
    let resolver = tv(card()).unwrap();
    let slots = resolver.slots(&Props::new());

    let header = slots.resolve("header", &Props::new().class("py-8"));
    assert_eq!(header.as_deref(), Some("px-4 font-semibold py-8"));
    assert_eq!(slots.resolve("body", &Props::new()).as_deref(), Some("p-2 text-xs"));
}

#[test]
fn test_slot_level_variant_override() {
    let resolver = tv(card()).unwrap();
    let slots = resolver.slots(&Props::new().with("size", "sm"));

    let body = slots.resolve("body", &Props::new().with("size", "lg"));
    assert_eq!(body.as_deref(), Some("p-6 text-lg"));
    // other slots keep the outer assignment
    assert_eq!(slots.resolve("header", &Props::new()).as_deref(), Some("px-4 font-semibold py-1"));
}

#[test]
fn test_undeclared_slot_has_no_resolver() {
    let resolver = tv(card()).unwrap();
    let slots = resolver.slots(&Props::new());
    assert!(slots.get("footer").is_none());
    assert_eq!(slots.resolve("footer", &Props::new()), None);
}

#[test]
fn test_resolve_all() {
    let resolver = tv(card()).unwrap();
    let all = resolver.slots(&Props::new().with("size", "lg")).resolve_all();
    let rendered: Vec<String> = all
        .iter()
        .map(|(slot, classes)| format!("{}: {}", slot, classes.as_deref().unwrap_or("")))
        .collect();
    assert_snapshot!(rendered.join("\n"), @r"
    base: rounded-lg flex flex-col
    header: px-4 font-semibold py-4
    body: p-6 text-lg
    ");
}

#[test]
fn test_outer_class_applies_to_base_via_resolve() {
    let resolver = tv(card()).unwrap();
    let props = Props::new().class("border");
    assert_eq!(
        resolver.resolve(&props).as_deref(),
        Some("rounded-lg flex flex-col border")
    );
    // slot functions only honour their own class argument
    let slots = resolver.slots(&props);
    assert_eq!(slots.resolve("body", &Props::new()).as_deref(), Some("p-2 text-xs"));
}

#[test]
fn test_compound_slots() {
    let resolver = tv(VariantConfig::new()
        .slot("prev", "")
        .slot("next", "")
        .slot("item", "")
        .variant("size", [("sm", ""), ("md", "")])
        .compound_slot(CompoundSlot::new(["prev", "next", "item"], "flex items-center"))
        .compound_slot(CompoundSlot::new(["prev", "next"], "h-7 w-7").when("size", "sm"))
        .compound_slot(CompoundSlot::new(["prev", "next"], "h-9 w-9").when("size", "md")))
    .unwrap();

    let slots = resolver.slots(&Props::new().with("size", "md"));
    assert_eq!(slots.resolve("prev", &Props::new()).as_deref(), Some("flex items-center h-9 w-9"));
    assert_eq!(slots.resolve("item", &Props::new()).as_deref(), Some("flex items-center"));
    assert_eq!(slots.resolve("base", &Props::new()), None);
}

#[test]
fn test_slot_override_drives_compounds_for_that_slot_only() {
    let resolver = tv(card()
        .compound_variant(
            CompoundVariant::new(ClassContribution::slots([("header", "tracking-wide")])).when("size", "lg"),
        )
        .compound_slot(CompoundSlot::new(["header", "body"], "bg-gray-50").when("size", "lg")))
    .unwrap();
    let slots = resolver.slots(&Props::new().with("size", "sm"));

    let header = slots.resolve("header", &Props::new().with("size", "lg"));
    assert_eq!(
        header.as_deref(),
        Some("px-4 font-semibold py-4 tracking-wide bg-gray-50")
    );
    assert_eq!(slots.resolve("header", &Props::new()).as_deref(), Some("px-4 font-semibold py-1"));
    assert_eq!(slots.resolve("body", &Props::new()).as_deref(), Some("p-2 text-xs"));

    // a local override can also switch a compound off
    let slots = resolver.slots(&Props::new().with("size", "lg"));
    assert_eq!(
        slots.resolve("body", &Props::new()).as_deref(),
        Some("p-6 text-lg bg-gray-50")
    );
    assert_eq!(
        slots.resolve("body", &Props::new().with("size", "sm")).as_deref(),
        Some("p-2 text-xs")
    );
}

#[test]
fn test_compound_variant_with_per_slot_classes() {
    let resolver = tv(VariantConfig::new()
        .slot("icon", "h-4")
        .variant("color", [("primary", ""), ("danger", "")])
        .variant("ghost", [(true, "bg-transparent")])
        .compound_variant(
            CompoundVariant::new(ClassContribution::slots([("icon", "text-red-500"), ("base", "border-red-500")]))
                .when("color", "danger")
                .when("ghost", true),
        ))
    .unwrap();

    let slots = resolver.slots(&Props::new().with("color", "danger").with("ghost", true));
    assert_eq!(slots.resolve("icon", &Props::new()).as_deref(), Some("h-4 text-red-500"));
    assert_eq!(
        slots.base().resolve(&Props::new()).as_deref(),
        Some("bg-transparent border-red-500")
    );
}

#[test]
fn test_undeclared_compound_slot_is_a_noop() {
    let config = VariantConfig::new()
        .slot("icon", "h-4")
        .compound_slot(CompoundSlot::new(["icon", "missing"], "w-4"));

    let resolver = tv(config.clone()).unwrap();
    let slots = resolver.slots(&Props::new());
    assert_eq!(slots.resolve("icon", &Props::new()).as_deref(), Some("h-4 w-4"));
    assert!(slots.get("missing").is_none());

    let err = tv_with(config, TvOptions::default().strict()).unwrap_err();
    match err {
        VariantError::UndeclaredSlot { index, slot } => {
            assert_eq!(index, 0);
            assert_eq!(slot, "missing");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_slot_resolver_name() {
    let resolver = tv(card()).unwrap();
    let slots = resolver.slots(&Props::new());
    let header = slots.get("header").unwrap();
    assert_eq!(header.name(), "header");
    assert_eq!(slots.names(), vec!["base", "header", "body"]);
}
