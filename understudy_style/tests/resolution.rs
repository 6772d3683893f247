// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end tests for `understudy_style`.
//!
//! These drive the [`Resources`] facade over an in-memory repository, the
//! way widget code obtains its attributes.

use understudy_resources::{
    AttrValue, Qualifiers, ResName, ResourceId, ResourceRepository, StyleBuilder,
};
use understudy_style::{
    AttrSource, AttributeResolver, AttributeSet, ResolveError, ResolveOptions,
    ResolveOptionsBuilder, Resources, Theme, ValueType,
};

const RED: u32 = 0xffff_0000;
const GREEN: u32 = 0xff00_ff00;
const BLUE: u32 = 0xff00_00ff;

fn attr(name: &str) -> ResName {
    ResName::attr("app", name)
}

fn style(name: &str) -> ResName {
    ResName::style("app", name)
}

fn color_style(repo: &mut ResourceRepository, name: &str, argb: u32) -> ResourceId {
    repo.define_style(
        "",
        StyleBuilder::new(style(name))
            .set(attr("textColor"), AttrValue::color(argb))
            .build(),
    )
}

#[test]
fn theme_base_value() {
    let mut repo = ResourceRepository::new();
    let base = color_style(&mut repo, "Theme", RED);
    let text_color = repo.define_attr(&attr("textColor"));

    let resources = Resources::new(repo);
    let mut theme = resources.new_theme();
    theme.apply_style(base, false);

    let typed = resources
        .obtain_styled_attributes(&theme, None, &[text_color], None, None)
        .unwrap();
    assert_eq!(typed.get_color(0, 0), RED);
}

#[test]
fn forced_overlay_replaces_base() {
    let mut repo = ResourceRepository::new();
    let base = color_style(&mut repo, "Theme", RED);
    let overlay = color_style(&mut repo, "Overlay.Blue", BLUE);
    let text_color = repo.define_attr(&attr("textColor"));

    let resources = Resources::new(repo);
    let mut theme = resources.new_theme();
    theme.apply_style(base, false);
    theme.apply_style(overlay, true);

    let typed = resources
        .obtain_styled_attributes(&theme, None, &[text_color], None, None)
        .unwrap();
    assert_eq!(typed.get_color(0, 0), BLUE);
}

#[test]
fn overlay_order() {
    let mut repo = ResourceRepository::new();
    let base = color_style(&mut repo, "Theme", RED);
    let first = color_style(&mut repo, "Overlay.Green", GREEN);
    let second = color_style(&mut repo, "Overlay.Blue", BLUE);
    let text_color = repo.define_attr(&attr("textColor"));
    let resources = Resources::new(repo);

    // Base V0, non-forced V1, forced V2: V2.
    let mut theme = resources.new_theme();
    theme.apply_style(base, false);
    theme.apply_style(first, false);
    theme.apply_style(second, true);
    let typed = resources
        .obtain_styled_attributes(&theme, None, &[text_color], None, None)
        .unwrap();
    assert_eq!(typed.get_color(0, 0), BLUE);

    // Both non-forced: the base value stays.
    let mut theme = resources.new_theme();
    theme.apply_style(base, false);
    theme.apply_style(first, false);
    theme.apply_style(second, false);
    let typed = resources
        .obtain_styled_attributes(&theme, None, &[text_color], None, None)
        .unwrap();
    assert_eq!(typed.get_color(0, 0), RED);
}

#[test]
fn default_style_attr_through_theme() {
    let mut repo = ResourceRepository::new();
    repo.define_style(
        "",
        StyleBuilder::new(style("Widget.Button"))
            .set(attr("text"), AttrValue::string("OK"))
            .build(),
    );
    let theme_id = repo.define_style(
        "",
        StyleBuilder::new(style("Theme"))
            .set(attr("buttonStyle"), AttrValue::parse("@style/Widget.Button", "app"))
            .build(),
    );
    let text = repo.define_attr(&attr("text"));
    let button_style = repo.define_attr(&attr("buttonStyle"));

    let resources = Resources::new(repo);
    let mut theme = resources.new_theme();
    theme.apply_style(theme_id, false);

    let typed = resources
        .obtain_styled_attributes(&theme, None, &[text], Some(button_style), None)
        .unwrap();
    assert_eq!(typed.get_string(0), Some("OK"));
}

#[test]
fn style_attribute_reference_without_theme_fails() {
    let mut repo = ResourceRepository::new();
    let text_color = repo.define_attr(&attr("textColor"));
    let resources = Resources::new(repo);

    let set = AttributeSet::new()
        .with(attr("textColor"), AttrValue::parse("?attr/colorPrimary", "app"))
        .with_position_description("layout/main.xml:7");
    let err = resources.obtain_attributes(&set, &[text_color]).unwrap_err();
    assert_eq!(
        err,
        ResolveError::ThemeRequired {
            attr: attr("textColor"),
            reference: attr("colorPrimary"),
        }
    );
}

#[test]
fn explicit_values_always_win() {
    let mut repo = ResourceRepository::new();
    let base = color_style(&mut repo, "Theme", RED);
    let overlay = color_style(&mut repo, "Overlay", BLUE);
    let def_style = color_style(&mut repo, "Widget", GREEN);
    let text_color = repo.define_attr(&attr("textColor"));

    let resources = Resources::new(repo);
    let mut theme = resources.new_theme();
    theme.apply_style(base, false);
    theme.apply_style(overlay, true);

    let set = AttributeSet::new()
        .with(attr("textColor"), AttrValue::color(0xff12_3456))
        .with_style(def_style);
    let typed = resources
        .obtain_styled_attributes(&theme, Some(&set), &[text_color], None, Some(def_style))
        .unwrap();
    assert_eq!(typed.get_color(0, 0), 0xff12_3456);
}

#[test]
fn nothing_resolves_to_absent() {
    let mut repo = ResourceRepository::new();
    let ids = [
        repo.define_attr(&attr("a")),
        repo.define_attr(&attr("b")),
        repo.define_attr(&attr("c")),
    ];
    let resources = Resources::new(repo);

    let typed = resources
        .obtain_styled_attributes(&Theme::new(), None, &ids, None, None)
        .unwrap();
    assert_eq!(typed.len(), 3);
    assert_eq!(typed.index_count(), 0);
    assert!((0..3).all(|i| !typed.has_value(i)));
}

#[test]
fn empty_theme_cannot_follow_references() {
    let mut repo = ResourceRepository::new();
    let text_color = repo.define_attr(&attr("textColor"));
    repo.define_attr(&attr("colorPrimary"));
    let resources = Resources::new(repo);

    let set = AttributeSet::new().with(attr("textColor"), AttrValue::StyleAttr(attr("colorPrimary")));
    let err = resources
        .obtain_styled_attributes(&resources.new_theme(), Some(&set), &[text_color], None, None)
        .unwrap_err();
    assert_eq!(
        err,
        ResolveError::ThemeRequired {
            attr: attr("textColor"),
            reference: attr("colorPrimary"),
        }
    );
}

#[test]
fn chains_within_the_bound_resolve() {
    let mut repo = ResourceRepository::new();
    let start = repo.define_attr(&attr("start"));
    let theme_id = repo.define_style(
        "",
        StyleBuilder::new(style("Theme"))
            .set(attr("start"), AttrValue::StyleAttr(attr("hop1")))
            .set(attr("hop1"), AttrValue::StyleAttr(attr("hop2")))
            .set(attr("hop2"), AttrValue::StyleAttr(attr("hop3")))
            .set(attr("hop3"), AttrValue::color(GREEN))
            .build(),
    );
    let mut theme = Theme::new();
    theme.apply_style(theme_id, false);
    let qualifiers = Qualifiers::default();

    let tight = ResolveOptionsBuilder::new().max_chase_hops(3).build();
    let resolved = AttributeResolver::new(&repo, &qualifiers, tight)
        .resolve(&[start], None, None, None, Some(&theme))
        .unwrap();
    let value = resolved.get(0).unwrap();
    assert_eq!(value.value(), &AttrValue::color(GREEN));
    assert_eq!(value.source(), AttrSource::Theme);
    assert_eq!(value.chain(), [attr("hop1"), attr("hop2"), attr("hop3")]);

    let tighter = ResolveOptionsBuilder::new().max_chase_hops(2).build();
    let err = AttributeResolver::new(&repo, &qualifiers, tighter)
        .resolve(&[start], None, None, None, Some(&theme))
        .unwrap_err();
    assert_eq!(
        err,
        ResolveError::CyclicReference {
            attr: attr("start"),
            hops: 2
        }
    );
}

#[test]
fn mutual_references_are_cyclic() {
    let mut repo = ResourceRepository::new();
    let a = repo.define_attr(&attr("a"));
    let theme_id = repo.define_style(
        "",
        StyleBuilder::new(style("Theme"))
            .set(attr("a"), AttrValue::StyleAttr(attr("b")))
            .set(attr("b"), AttrValue::StyleAttr(attr("a")))
            .build(),
    );
    let resources = Resources::new(repo);
    let mut theme = resources.new_theme();
    theme.apply_style(theme_id, false);

    let err = resources
        .obtain_styled_attributes(&theme, None, &[a], None, None)
        .unwrap_err();
    assert!(matches!(err, ResolveError::CyclicReference { hops: 32, .. }));
}

#[test]
fn resolution_is_deterministic() {
    let mut repo = ResourceRepository::new();
    let base = color_style(&mut repo, "Theme", RED);
    let overlay = color_style(&mut repo, "Overlay", BLUE);
    let ids = [
        repo.define_attr(&attr("textColor")),
        repo.define_attr(&attr("text")),
    ];
    let resources = Resources::new(repo);
    let mut theme = resources.new_theme();
    theme.apply_style(base, false);
    theme.apply_style(overlay, false);
    let set = AttributeSet::new().with(attr("text"), AttrValue::string("same"));

    let first = resources
        .obtain_styled_attributes(&theme, Some(&set), &ids, None, None)
        .unwrap();
    let second = resources
        .obtain_styled_attributes(&theme, Some(&set), &ids, None, None)
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn style_reference_round_trips_through_the_index() {
    let mut repo = ResourceRepository::new();
    let widget_id = repo.define_style(
        "",
        StyleBuilder::new(style("Widget.Card"))
            .set(attr("text"), AttrValue::string("card"))
            .set(attr("textColor"), AttrValue::color(GREEN))
            .build(),
    );
    let theme_id = repo.define_style(
        "",
        StyleBuilder::new(style("Theme"))
            .set(attr("cardStyle"), AttrValue::Resource(style("Widget.Card")))
            .build(),
    );
    let card_style = repo.define_attr(&attr("cardStyle"));
    let ids = [
        repo.define_attr(&attr("text")),
        repo.define_attr(&attr("textColor")),
    ];
    let resources = Resources::new(repo);
    let mut theme = resources.new_theme();
    theme.apply_style(theme_id, false);

    // The theme hands out a reference to the style.
    let typed = resources
        .obtain_styled_attributes(&theme, None, &[card_style], None, None)
        .unwrap();
    assert_eq!(typed.peek(0), Some(ValueType::Reference));
    let reference = typed.get_resource_id(0).unwrap();
    assert_eq!(reference, widget_id);
    assert_eq!(resources.resource_name(reference).unwrap(), "app:style/Widget.Card");

    // Using it as the default style gives the style's own values.
    let via_res = resources
        .obtain_styled_attributes(&theme, None, &ids, None, Some(reference))
        .unwrap();
    let via_attr = resources
        .obtain_styled_attributes(&theme, None, &ids, Some(card_style), None)
        .unwrap();
    assert_eq!(via_res.get_string(0), Some("card"));
    assert_eq!(via_res.get_color(1, 0), GREEN);
    assert_eq!(via_res, via_attr);
}

#[test]
fn qualifier_change_between_requests() {
    let mut repo = ResourceRepository::new();
    let theme_id = color_style(&mut repo, "Theme", RED);
    repo.define_style(
        "land",
        StyleBuilder::new(style("Theme"))
            .set(attr("textColor"), AttrValue::color(BLUE))
            .build(),
    );
    let text_color = repo.define_attr(&attr("textColor"));

    let mut resources = Resources::with_options(repo, ResolveOptions::default());
    let mut theme = resources.new_theme();
    theme.apply_style(theme_id, false);

    let obtain = |resources: &Resources<ResourceRepository>| {
        resources
            .obtain_styled_attributes(&theme, None, &[text_color], None, None)
            .unwrap()
            .get_color(0, 0)
    };
    assert_eq!(obtain(&resources), RED);
    resources.set_qualifiers("en-land");
    assert_eq!(obtain(&resources), BLUE);
    resources.set_qualifiers("en-port");
    assert_eq!(obtain(&resources), RED);
}

#[test]
fn value_resources_resolve_with_their_id() {
    let mut repo = ResourceRepository::new();
    let primary = ResName::new("app", "color", "primary");
    let primary_id = repo.define_value(&primary, "", AttrValue::color(RED));
    repo.define_value(&primary, "night", AttrValue::color(BLUE));
    let theme_id = repo.define_style(
        "",
        StyleBuilder::new(style("Theme"))
            .set(attr("colorPrimary"), AttrValue::parse("@color/primary", "app"))
            .set(attr("textColor"), AttrValue::parse("?colorPrimary", "app"))
            .build(),
    );
    let text_color = repo.define_attr(&attr("textColor"));

    let mut resources = Resources::new(repo);
    let mut theme = resources.new_theme();
    theme.apply_style(theme_id, false);

    let typed = resources
        .obtain_styled_attributes(&theme, None, &[text_color], None, None)
        .unwrap();
    assert_eq!(typed.get_color(0, 0), RED);
    assert_eq!(typed.get_resource_id(0), Some(primary_id));

    resources.set_qualifiers("night");
    let typed = resources
        .obtain_styled_attributes(&theme, None, &[text_color], None, None)
        .unwrap();
    assert_eq!(typed.get_color(0, 0), BLUE);
}

#[test]
fn missing_theme_style_is_fatal() {
    let mut repo = ResourceRepository::new();
    let text_color = repo.define_attr(&attr("textColor"));
    let landscape_only = repo.define_style("land", StyleBuilder::new(style("Theme.Land")).build());
    let resources = Resources::new(repo);

    let mut theme = resources.new_theme();
    theme.apply_style(landscape_only, false);
    let err = resources
        .obtain_styled_attributes(&theme, None, &[text_color], None, None)
        .unwrap_err();
    assert_eq!(err, ResolveError::StyleNotFound(style("Theme.Land")));
}
