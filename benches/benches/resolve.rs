// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `understudy_style` attribute resolution.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::vec::Vec;

use understudy_resources::{
    AttrValue, Qualifiers, ResName, ResourceId, ResourceRepository, StyleBuilder,
};
use understudy_style::{
    AttributeResolver, AttributeSet, ResolveOptions, Theme, TypedAttributes,
};

fn attr(name: &str) -> ResName {
    ResName::attr("app", name)
}

/// A theme with `count` literal attributes, plus `?attr` chains of the given
/// depth ending in the first literal.
fn setup(count: usize, chain: usize) -> (ResourceRepository, Theme, Vec<ResourceId>) {
    let mut repo = ResourceRepository::new();
    let mut builder = StyleBuilder::new(ResName::style("app", "Theme"));
    for i in 0..count {
        builder = builder.set(attr(&format!("attr{i}")), AttrValue::string(format!("value{i}")));
    }
    builder = builder.set(attr("chain0"), AttrValue::StyleAttr(attr("attr0")));
    for i in 1..chain {
        builder = builder.set(
            attr(&format!("chain{i}")),
            AttrValue::StyleAttr(attr(&format!("chain{}", i - 1))),
        );
    }
    let theme_id = repo.define_style("", builder.build());
    let overlay_id = repo.define_style(
        "",
        StyleBuilder::new(ResName::style("app", "Overlay"))
            .set(attr("attr1"), AttrValue::string("overlaid"))
            .build(),
    );

    let mut theme = Theme::new();
    theme.apply_style(theme_id, false);
    theme.apply_style(overlay_id, true);

    let ids = (0..count)
        .map(|i| repo.define_attr(&attr(&format!("attr{i}"))))
        .collect();
    (repo, theme, ids)
}

fn bench_resolve(c: &mut Criterion) {
    let qualifiers = Qualifiers::default();
    let mut group = c.benchmark_group("style/resolve");

    for count in [8_usize, 64] {
        let (repo, theme, ids) = setup(count, 1);
        let resolver = AttributeResolver::new(&repo, &qualifiers, ResolveOptions::default());

        group.bench_function(BenchmarkId::new("theme", count), |b| {
            b.iter(|| black_box(resolver.resolve(&ids, None, None, None, Some(&theme))));
        });

        let loaded = theme.load(&repo, &qualifiers).unwrap();
        group.bench_function(BenchmarkId::new("theme_preloaded", count), |b| {
            b.iter(|| black_box(resolver.resolve_loaded(&ids, None, None, None, Some(&loaded))));
        });

        let set = (0..count).step_by(2).fold(AttributeSet::new(), |set, i| {
            set.with(attr(&format!("attr{i}")), AttrValue::string("explicit"))
        });
        group.bench_function(BenchmarkId::new("explicit_half", count), |b| {
            b.iter(|| black_box(resolver.resolve(&ids, Some(&set), None, None, Some(&theme))));
        });

        let resolved = resolver
            .resolve(&ids, None, None, None, Some(&theme))
            .unwrap();
        group.bench_function(BenchmarkId::new("typed", count), |b| {
            b.iter(|| black_box(TypedAttributes::build(&resolved, &resolver)));
        });
    }

    group.finish();

    let mut group = c.benchmark_group("style/chase");
    for depth in [1_usize, 8, 31] {
        let (mut repo, theme, _) = setup(2, depth);
        let start = repo.define_attr(&attr(&format!("chain{}", depth - 1)));
        let resolver = AttributeResolver::new(&repo, &qualifiers, ResolveOptions::default());
        let loaded = theme.load(&repo, &qualifiers).unwrap();
        group.bench_function(BenchmarkId::from_parameter(depth), |b| {
            b.iter(|| black_box(resolver.resolve_loaded(&[start], None, None, None, Some(&loaded))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
