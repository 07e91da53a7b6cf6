//! Built-in Tailwind utility groups used by the conflict merger.
//!
//! Coverage is partial; a class that no rule claims is kept
//! verbatim by the merger.

use crate::merge_config::{MergeConfig, ThemeScales};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(\.\d+)?$").unwrap());
static FRACTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+/\d+$").unwrap());
static TSHIRT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+(\.\d+)?)?(xs|sm|md|lg|xl)$").unwrap());
static ARBITRARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[(.+)\]$").unwrap());
static LENGTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(length:.+|0|-?\d*\.?\d+(%|px|r?em|[sdl]?v[hwib]|vmin|vmax|ch|ex|pt|pc|in|cm|mm|cap|lh|rlh|cq[whib])|(calc|min|max|clamp)\(.+\))$",
    )
    .unwrap()
});

/// How the value after a rule's prefix is validated
#[derive(Debug, Clone, Copy)]
enum ValueKind {
    /// One of the listed keywords
    Keywords(&'static [&'static str]),
    /// Spacing scale, fractions, arbitrary values, or the listed keywords
    Spacing(&'static [&'static str]),
    /// Plain numbers, arbitrary values, or the listed keywords
    Number(&'static [&'static str]),
    /// Arbitrary lengths or the listed keywords
    Length(&'static [&'static str]),
    FontSize,
    Radius,
    Shadow,
    /// Anything; used for colors and other open-ended scales
    Any,
}

#[derive(Debug, Clone, Copy)]
struct GroupRule {
    group: &'static str,
    /// `None` for rules that only match whole classes
    prefix: Option<&'static str>,
    kind: ValueKind,
    /// Whether the bare prefix (`border`, `rounded`) is itself a member
    bare: bool,
}

const fn exact(group: &'static str, classes: &'static [&'static str]) -> GroupRule {
    GroupRule {
        group,
        prefix: None,
        kind: ValueKind::Keywords(classes),
        bare: false,
    }
}

const fn rule(group: &'static str, prefix: &'static str, kind: ValueKind) -> GroupRule {
    GroupRule {
        group,
        prefix: Some(prefix),
        kind,
        bare: false,
    }
}

const fn bare(group: &'static str, prefix: &'static str, kind: ValueKind) -> GroupRule {
    GroupRule {
        group,
        prefix: Some(prefix),
        kind,
        bare: true,
    }
}

use ValueKind::*;

const SIZE_KEYWORDS: &[&str] = &["auto", "full", "screen", "svw", "lvw", "dvw", "svh", "lvh", "dvh", "min", "max", "fit", "px"];
const MAX_W_KEYWORDS: &[&str] = &[
    "none", "xs", "sm", "md", "lg", "xl", "2xl", "3xl", "4xl", "5xl", "6xl", "7xl", "full", "min",
    "max", "fit", "prose", "screen-sm", "screen-md", "screen-lg", "screen-xl", "screen-2xl",
];
const INSET_KEYWORDS: &[&str] = &["auto", "full", "px"];
const ALIGN_CONTENT: &[&str] = &["normal", "start", "end", "center", "between", "around", "evenly", "stretch", "baseline"];
const ALIGN_ITEMS: &[&str] = &["start", "end", "center", "baseline", "stretch"];
const OVERFLOW: &[&str] = &["auto", "hidden", "clip", "visible", "scroll"];

/// Ordered rule table; the first matching rule wins.
static RULES: &[GroupRule] = &[
    exact("display", &[
        "block", "inline-block", "inline", "flex", "inline-flex", "table", "inline-table",
        "table-caption", "table-cell", "table-column", "table-column-group", "table-footer-group",
        "table-header-group", "table-row-group", "table-row", "flow-root", "grid", "inline-grid",
        "contents", "list-item", "hidden",
    ]),
    exact("position", &["static", "fixed", "absolute", "relative", "sticky"]),
    exact("visibility", &["visible", "invisible", "collapse"]),
    exact("sr", &["sr-only", "not-sr-only"]),
    exact("font-style", &["italic", "not-italic"]),
    exact("text-decoration", &["underline", "overline", "line-through", "no-underline"]),
    exact("text-transform", &["uppercase", "lowercase", "capitalize", "normal-case"]),
    exact("text-overflow", &["truncate", "text-ellipsis", "text-clip"]),
    exact("space-x-reverse", &["space-x-reverse"]),
    exact("space-y-reverse", &["space-y-reverse"]),
    exact("ring-w-inset", &["ring-inset"]),
    exact("grow", &["grow"]),
    exact("shrink", &["shrink"]),
    exact("transition", &["transition"]),
    // Spacing
    rule("p", "p", Spacing(&[])),
    rule("px", "px", Spacing(&[])),
    rule("py", "py", Spacing(&[])),
    rule("ps", "ps", Spacing(&[])),
    rule("pe", "pe", Spacing(&[])),
    rule("pt", "pt", Spacing(&[])),
    rule("pr", "pr", Spacing(&[])),
    rule("pb", "pb", Spacing(&[])),
    rule("pl", "pl", Spacing(&[])),
    rule("m", "m", Spacing(&["auto"])),
    rule("mx", "mx", Spacing(&["auto"])),
    rule("my", "my", Spacing(&["auto"])),
    rule("ms", "ms", Spacing(&["auto"])),
    rule("me", "me", Spacing(&["auto"])),
    rule("mt", "mt", Spacing(&["auto"])),
    rule("mr", "mr", Spacing(&["auto"])),
    rule("mb", "mb", Spacing(&["auto"])),
    rule("ml", "ml", Spacing(&["auto"])),
    rule("space-x", "space-x", Spacing(&[])),
    rule("space-y", "space-y", Spacing(&[])),
    rule("gap-x", "gap-x", Spacing(&[])),
    rule("gap-y", "gap-y", Spacing(&[])),
    rule("gap", "gap", Spacing(&[])),
    // Sizing
    rule("min-w", "min-w", Spacing(SIZE_KEYWORDS)),
    rule("max-w", "max-w", Spacing(MAX_W_KEYWORDS)),
    rule("min-h", "min-h", Spacing(SIZE_KEYWORDS)),
    rule("max-h", "max-h", Spacing(&["none", "full", "screen", "min", "max", "fit", "px"])),
    rule("w", "w", Spacing(SIZE_KEYWORDS)),
    rule("h", "h", Spacing(SIZE_KEYWORDS)),
    rule("size", "size", Spacing(SIZE_KEYWORDS)),
    // Layout
    rule("inset-x", "inset-x", Spacing(INSET_KEYWORDS)),
    rule("inset-y", "inset-y", Spacing(INSET_KEYWORDS)),
    rule("inset", "inset", Spacing(INSET_KEYWORDS)),
    rule("start", "start", Spacing(INSET_KEYWORDS)),
    rule("end", "end", Spacing(INSET_KEYWORDS)),
    rule("top", "top", Spacing(INSET_KEYWORDS)),
    rule("right", "right", Spacing(INSET_KEYWORDS)),
    rule("bottom", "bottom", Spacing(INSET_KEYWORDS)),
    rule("left", "left", Spacing(INSET_KEYWORDS)),
    rule("z", "z", Number(&["auto"])),
    rule("overflow-x", "overflow-x", Keywords(OVERFLOW)),
    rule("overflow-y", "overflow-y", Keywords(OVERFLOW)),
    rule("overflow", "overflow", Keywords(OVERFLOW)),
    rule("float", "float", Keywords(&["start", "end", "right", "left", "none"])),
    rule("clear", "clear", Keywords(&["start", "end", "left", "right", "both", "none"])),
    rule("box", "box", Keywords(&["border", "content"])),
    rule("aspect", "aspect", Keywords(&["auto", "square", "video"])),
    rule("object-fit", "object", Keywords(&["contain", "cover", "fill", "none", "scale-down"])),
    rule("object-position", "object", Keywords(&[
        "bottom", "center", "left", "left-bottom", "left-top", "right", "right-bottom",
        "right-top", "top",
    ])),
    // Flexbox and grid
    rule("flex-direction", "flex", Keywords(&["row", "row-reverse", "col", "col-reverse"])),
    rule("flex-wrap", "flex", Keywords(&["wrap", "wrap-reverse", "nowrap"])),
    rule("flex", "flex", Keywords(&["1", "auto", "initial", "none"])),
    rule("basis", "basis", Spacing(&["auto", "full"])),
    rule("grow", "grow", Number(&[])),
    rule("shrink", "shrink", Number(&[])),
    rule("order", "order", Number(&["first", "last", "none"])),
    rule("grid-cols", "grid-cols", Number(&["none", "subgrid"])),
    rule("grid-rows", "grid-rows", Number(&["none", "subgrid"])),
    rule("col-start-end", "col-span", Number(&["full"])),
    rule("col-start", "col-start", Number(&["auto"])),
    rule("col-end", "col-end", Number(&["auto"])),
    rule("row-start-end", "row-span", Number(&["full"])),
    rule("row-start", "row-start", Number(&["auto"])),
    rule("row-end", "row-end", Number(&["auto"])),
    rule("justify-items", "justify-items", Keywords(&["start", "end", "center", "stretch"])),
    rule("justify-self", "justify-self", Keywords(&["auto", "start", "end", "center", "stretch"])),
    rule("justify-content", "justify", Keywords(ALIGN_CONTENT)),
    rule("align-items", "items", Keywords(ALIGN_ITEMS)),
    rule("align-self", "self", Keywords(&["auto", "start", "end", "center", "stretch", "baseline"])),
    rule("align-content", "content", Keywords(ALIGN_CONTENT)),
    rule("content", "content", Any),
    rule("place-content", "place-content", Keywords(ALIGN_CONTENT)),
    rule("place-items", "place-items", Keywords(ALIGN_ITEMS)),
    rule("place-self", "place-self", Keywords(&["auto", "start", "end", "center", "stretch"])),
    // Typography
    rule("text-alignment", "text", Keywords(&["left", "center", "right", "justify", "start", "end"])),
    rule("text-wrap", "text", Keywords(&["wrap", "nowrap", "balance", "pretty"])),
    rule("font-size", "text", FontSize),
    rule("text-color", "text", Any),
    rule("font-weight", "font", Keywords(&[
        "thin", "extralight", "light", "normal", "medium", "semibold", "bold", "extrabold", "black",
    ])),
    rule("font-family", "font", Any),
    rule("leading", "leading", Number(&["none", "tight", "snug", "normal", "relaxed", "loose"])),
    rule("tracking", "tracking", Any),
    rule("whitespace", "whitespace", Keywords(&["normal", "nowrap", "pre", "pre-line", "pre-wrap", "break-spaces"])),
    rule("break", "break", Keywords(&["normal", "words", "all", "keep"])),
    rule("line-clamp", "line-clamp", Number(&["none"])),
    rule("vertical-align", "align", Any),
    // Backgrounds
    rule("bg-attachment", "bg", Keywords(&["fixed", "local", "scroll"])),
    rule("bg-clip", "bg-clip", Keywords(&["border", "padding", "content", "text"])),
    rule("bg-repeat", "bg", Keywords(&["repeat", "no-repeat", "repeat-x", "repeat-y", "repeat-round", "repeat-space"])),
    rule("bg-size", "bg", Keywords(&["auto", "cover", "contain"])),
    rule("bg-position", "bg", Keywords(&[
        "bottom", "center", "left", "left-bottom", "left-top", "right", "right-bottom",
        "right-top", "top",
    ])),
    rule("bg-image", "bg", Keywords(&[
        "none", "gradient-to-t", "gradient-to-tr", "gradient-to-r", "gradient-to-br",
        "gradient-to-b", "gradient-to-bl", "gradient-to-l", "gradient-to-tl",
    ])),
    rule("bg-color", "bg", Any),
    // Borders
    rule("border-style", "border", Keywords(&["solid", "dashed", "dotted", "double", "hidden", "none"])),
    bare("border-w-x", "border-x", Length(&[])),
    bare("border-w-y", "border-y", Length(&[])),
    bare("border-w-s", "border-s", Length(&[])),
    bare("border-w-e", "border-e", Length(&[])),
    bare("border-w-t", "border-t", Length(&[])),
    bare("border-w-r", "border-r", Length(&[])),
    bare("border-w-b", "border-b", Length(&[])),
    bare("border-w-l", "border-l", Length(&[])),
    bare("border-w", "border", Length(&[])),
    rule("border-color-x", "border-x", Any),
    rule("border-color-y", "border-y", Any),
    rule("border-color-s", "border-s", Any),
    rule("border-color-e", "border-e", Any),
    rule("border-color-t", "border-t", Any),
    rule("border-color-r", "border-r", Any),
    rule("border-color-b", "border-b", Any),
    rule("border-color-l", "border-l", Any),
    rule("border-color", "border", Any),
    bare("rounded-s", "rounded-s", Radius),
    bare("rounded-e", "rounded-e", Radius),
    bare("rounded-tl", "rounded-tl", Radius),
    bare("rounded-tr", "rounded-tr", Radius),
    bare("rounded-br", "rounded-br", Radius),
    bare("rounded-bl", "rounded-bl", Radius),
    bare("rounded-t", "rounded-t", Radius),
    bare("rounded-r", "rounded-r", Radius),
    bare("rounded-b", "rounded-b", Radius),
    bare("rounded-l", "rounded-l", Radius),
    bare("rounded", "rounded", Radius),
    bare("outline-style", "outline", Keywords(&["none", "dashed", "dotted", "double"])),
    rule("outline-offset", "outline-offset", Length(&[])),
    rule("outline-w", "outline", Length(&[])),
    rule("outline-color", "outline", Any),
    rule("ring-offset-w", "ring-offset", Length(&[])),
    rule("ring-offset-color", "ring-offset", Any),
    bare("ring-w", "ring", Length(&[])),
    rule("ring-color", "ring", Any),
    // Effects
    bare("shadow", "shadow", Shadow),
    rule("shadow-color", "shadow", Any),
    rule("opacity", "opacity", Number(&[])),
    bare("blur", "blur", Keywords(&["none", "sm", "md", "lg", "xl", "2xl", "3xl"])),
    // Transitions and transforms
    rule("transition", "transition", Keywords(&["none", "all", "colors", "opacity", "shadow", "transform"])),
    rule("duration", "duration", Number(&[])),
    rule("delay", "delay", Number(&[])),
    rule("ease", "ease", Keywords(&["linear", "in", "out", "in-out"])),
    rule("animate", "animate", Any),
    rule("scale-x", "scale-x", Number(&[])),
    rule("scale-y", "scale-y", Number(&[])),
    rule("scale", "scale", Number(&[])),
    rule("rotate", "rotate", Number(&[])),
    rule("translate-x", "translate-x", Spacing(&["full"])),
    rule("translate-y", "translate-y", Spacing(&["full"])),
    // Interactivity
    rule("cursor", "cursor", Any),
    rule("pointer-events", "pointer-events", Keywords(&["none", "auto"])),
    rule("select", "select", Keywords(&["none", "text", "all", "auto"])),
    // SVG
    rule("stroke-w", "stroke", Number(&[])),
    rule("stroke", "stroke", Any),
    rule("fill", "fill", Any),
];

/// Groups that a later class of the key group overrides
static CONFLICTS: &[(&str, &[&str])] = &[
    ("p", &["px", "py", "ps", "pe", "pt", "pr", "pb", "pl"]),
    ("px", &["pr", "pl"]),
    ("py", &["pt", "pb"]),
    ("m", &["mx", "my", "ms", "me", "mt", "mr", "mb", "ml"]),
    ("mx", &["mr", "ml"]),
    ("my", &["mt", "mb"]),
    ("gap", &["gap-x", "gap-y"]),
    ("size", &["w", "h"]),
    ("inset", &["inset-x", "inset-y", "start", "end", "top", "right", "bottom", "left"]),
    ("inset-x", &["right", "left"]),
    ("inset-y", &["top", "bottom"]),
    ("overflow", &["overflow-x", "overflow-y"]),
    ("flex", &["basis", "grow", "shrink"]),
    ("font-size", &["leading"]),
    ("rounded", &[
        "rounded-s", "rounded-e", "rounded-t", "rounded-r", "rounded-b", "rounded-l",
        "rounded-tl", "rounded-tr", "rounded-br", "rounded-bl",
    ]),
    ("rounded-s", &["rounded-tl", "rounded-bl"]),
    ("rounded-e", &["rounded-tr", "rounded-br"]),
    ("rounded-t", &["rounded-tl", "rounded-tr"]),
    ("rounded-r", &["rounded-tr", "rounded-br"]),
    ("rounded-b", &["rounded-br", "rounded-bl"]),
    ("rounded-l", &["rounded-tl", "rounded-bl"]),
    ("border-w", &[
        "border-w-x", "border-w-y", "border-w-s", "border-w-e", "border-w-t", "border-w-r",
        "border-w-b", "border-w-l",
    ]),
    ("border-w-x", &["border-w-r", "border-w-l"]),
    ("border-w-y", &["border-w-t", "border-w-b"]),
    ("border-color", &[
        "border-color-x", "border-color-y", "border-color-s", "border-color-e",
        "border-color-t", "border-color-r", "border-color-b", "border-color-l",
    ]),
    ("border-color-x", &["border-color-r", "border-color-l"]),
    ("border-color-y", &["border-color-t", "border-color-b"]),
    ("scale", &["scale-x", "scale-y"]),
];

/// Find the utility group of a class with modifiers already removed.
///
/// Custom groups from `config` are checked first, then the built-in table.
pub fn class_group<'a>(class: &str, config: &'a MergeConfig) -> Option<Cow<'a, str>> {
    for (group, patterns) in &config.class_groups {
        if patterns.iter().any(|pattern| pattern_matches(pattern, class)) {
            return Some(Cow::Borrowed(group.as_str()));
        }
    }

    if let Some(property) = arbitrary_property(class) {
        return Some(Cow::Owned(format!("arbitrary..{}", property)));
    }

    let class = class.strip_prefix('-').unwrap_or(class);
    RULES
        .iter()
        .find(|rule| rule_matches(rule, class, &config.theme))
        .map(|rule| Cow::Borrowed(rule.group))
}

/// Groups overridden by a later class of `group`
pub fn conflicting_groups<'a>(group: &str, config: &'a MergeConfig) -> Vec<&'a str> {
    let mut groups: Vec<&'a str> = CONFLICTS
        .iter()
        .filter(|(key, _)| *key == group)
        .flat_map(|(_, groups)| groups.iter().copied())
        .collect();
    if let Some(extra) = config.conflicting_class_groups.get(group) {
        groups.extend(extra.iter().map(String::as_str));
    }
    groups
}

fn pattern_matches(pattern: &str, class: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => class.starts_with(prefix) && class.len() > prefix.len(),
        None => pattern == class,
    }
}

/// `[mask-type:luminance]` -> `mask-type`
fn arbitrary_property(class: &str) -> Option<&str> {
    let inner = class.strip_prefix('[')?.strip_suffix(']')?;
    let (property, value) = inner.split_once(':')?;
    if property.is_empty() || value.is_empty() || (property.starts_with('-') && !property.starts_with("--")) {
        return None;
    }
    Some(property)
}

fn rule_matches(rule: &GroupRule, class: &str, theme: &ThemeScales) -> bool {
    let Some(prefix) = rule.prefix else {
        return matches!(rule.kind, Keywords(classes) if classes.contains(&class));
    };

    if class == prefix {
        return rule.bare;
    }

    match class.strip_prefix(prefix).and_then(|rest| rest.strip_prefix('-')) {
        Some(value) if !value.is_empty() => value_matches(rule.kind, value, theme),
        _ => false,
    }
}

fn value_matches(kind: ValueKind, value: &str, theme: &ThemeScales) -> bool {
    match kind {
        Keywords(keywords) => keywords.contains(&value),
        Spacing(keywords) => {
            keywords.contains(&value)
                || value == "px"
                || NUMBER.is_match(value)
                || FRACTION.is_match(value)
                || is_arbitrary(value)
                || contains(&theme.spacing, value)
        }
        Number(keywords) => {
            keywords.contains(&value) || NUMBER.is_match(value) || is_arbitrary(value)
        }
        Length(keywords) => {
            keywords.contains(&value) || NUMBER.is_match(value) || is_arbitrary_length(value)
        }
        FontSize => {
            value == "base"
                || TSHIRT.is_match(value)
                || is_arbitrary_length(value)
                || contains(&theme.font_size, value)
        }
        Radius => {
            matches!(value, "none" | "full" | "sm" | "md" | "lg" | "xl" | "2xl" | "3xl")
                || is_arbitrary_length(value)
                || contains(&theme.radius, value)
        }
        Shadow => {
            matches!(value, "sm" | "md" | "lg" | "xl" | "2xl" | "inner" | "none")
                || is_arbitrary_shadow(value)
                || contains(&theme.shadow, value)
        }
        Any => true,
    }
}

fn contains(scale: &[String], value: &str) -> bool {
    scale.iter().any(|token| token == value)
}

fn is_arbitrary(value: &str) -> bool {
    ARBITRARY.is_match(value)
}

fn is_arbitrary_length(value: &str) -> bool {
    ARBITRARY
        .captures(value)
        .and_then(|caps| caps.get(1))
        .is_some_and(|inner| LENGTH.is_match(inner.as_str()))
}

fn is_arbitrary_shadow(value: &str) -> bool {
    ARBITRARY
        .captures(value)
        .and_then(|caps| caps.get(1))
        .is_some_and(|inner| {
            let inner = inner.as_str();
            inner.starts_with("shadow:") || inner.split('_').filter(|p| LENGTH.is_match(p)).count() >= 2
        })
}
