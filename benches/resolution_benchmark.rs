use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tailwind_variants::{
    tv, tv_with, tw_merge, ClassContribution, CompoundSlot, CompoundVariant, Props, Resolver,
    TvOptions, VariantConfig,
};

fn button() -> VariantConfig {
    VariantConfig::new()
        .base("inline-flex items-center justify-center rounded-md font-medium transition")
        .variant("size", [
            ("xs", "px-2 py-1 text-xs"),
            ("sm", "px-3 py-1.5 text-sm"),
            ("md", "px-4 py-2 text-base"),
            ("lg", "px-6 py-3 text-lg"),
        ])
        .variant("color", [
            ("primary", "bg-blue-600 text-white hover:bg-blue-700"),
            ("secondary", "bg-gray-100 text-gray-900 hover:bg-gray-200"),
            ("danger", "bg-red-600 text-white hover:bg-red-700"),
        ])
        .variant("disabled", [(true, "opacity-50 pointer-events-none")])
        .compound_variant(CompoundVariant::new("shadow-lg").when("size", "lg").when("color", "primary"))
        .compound_variant(CompoundVariant::new("ring-2").when_any("color", ["danger", "secondary"]))
        .default_variant("size", "md")
        .default_variant("color", "primary")
}

fn card(parent: &Resolver) -> VariantConfig {
    VariantConfig::new()
        .slot("header", "px-4 py-2 font-semibold")
        .slot("body", "p-4 text-sm")
        .slot("footer", "px-4 py-2 border-t")
        .variant("size", [
            ("sm", ClassContribution::slots([("header", "py-1"), ("body", "p-2")])),
            ("lg", ClassContribution::slots([("header", "py-4"), ("body", "p-6")])),
        ])
        .compound_slot(CompoundSlot::new(["header", "footer"], "bg-gray-50"))
        .extend(parent)
}

fn props() -> Vec<Props> {
    let mut sets = Vec::new();
    for size in ["xs", "sm", "md", "lg"] {
        for color in ["primary", "secondary", "danger"] {
            sets.push(Props::new().with("size", size).with("color", color));
        }
    }
    sets
}

fn benchmark_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    let sets = props();

    for (name, options) in [
        ("merge", TvOptions::default()),
        ("no_merge", TvOptions::default().without_merge()),
        ("cached", TvOptions::default().with_cache(64)),
    ] {
        let resolver = tv_with(button(), options).unwrap();
        group.bench_with_input(BenchmarkId::new("button", name), &sets, |b, sets| {
            b.iter(|| {
                for props in sets {
                    black_box(resolver.resolve(black_box(props)));
                }
            });
        });
    }

    group.finish();
}

fn benchmark_slots(c: &mut Criterion) {
    let parent = tv(button()).unwrap();
    let resolver = tv(card(&parent)).unwrap();
    let outer = Props::new().with("size", "lg");

    c.bench_function("slots_resolve_all", |b| {
        b.iter(|| black_box(resolver.slots(black_box(&outer)).resolve_all()));
    });
}

fn benchmark_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_batch");
    let resolver = tv(button()).unwrap();

    for count in [12, 120, 1200] {
        let sets: Vec<Props> = props().into_iter().cycle().take(count).collect();
        group.bench_with_input(BenchmarkId::from_parameter(count), &sets, |b, sets| {
            b.iter(|| black_box(resolver.resolve_batch(sets)));
        });
    }

    group.finish();
}

fn benchmark_normalize(c: &mut Criterion) {
    c.bench_function("normalize_extend_chain", |b| {
        b.iter(|| {
            let mut resolver = tv(button()).unwrap();
            for _ in 0..5 {
                resolver = tv(card(&resolver)).unwrap();
            }
            black_box(resolver)
        });
    });
}

fn benchmark_merge(c: &mut Criterion) {
    let input = "px-2 py-1 px-4 text-sm font-bold text-lg hover:bg-red-500 bg-blue-500 hover:bg-red-600 \
                 rounded rounded-lg border border-2 shadow shadow-md md:p-2 p-4 md:p-6 btn btn-primary";
    c.bench_function("tw_merge", |b| b.iter(|| black_box(tw_merge(black_box(input)))));
}

criterion_group!(
    benches,
    benchmark_resolve,
    benchmark_slots,
    benchmark_batch,
    benchmark_normalize,
    benchmark_merge
);
criterion_main!(benches);
