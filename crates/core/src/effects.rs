//! Effect compilation and final CSS map assembly.

use canvas_style_protocol::{
    CssMap, Filter, Rgb, Shadow, StyleMap, StyleValue, Transform, Transition,
};
use tracing::trace;

use crate::properties::{COLOR, TEXT_COLOR, effect_target, is_unitless, kebab_case};

/// Format a number for CSS: at most four decimals, no trailing zeros.
pub fn css_number(value: f64) -> String {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    // Avoid "-0".
    if rounded == 0.0 {
        "0".to_string()
    } else {
        rounded.to_string()
    }
}

/// Shadow list → `box-shadow` value. Disabled entries are skipped; an empty
/// result means the property is omitted.
pub fn compile_shadows(shadows: &[Shadow]) -> Option<String> {
    let parts: Vec<String> = shadows
        .iter()
        .filter(|s| s.enabled)
        .map(|s| {
            let color = match (s.opacity, Rgb::from_hex(&s.color)) {
                (Some(opacity), Some(rgb)) if opacity < 100.0 => {
                    rgb.to_rgba_css(opacity / 100.0)
                }
                _ => s.color.trim().to_string(),
            };
            let inset = if s.inset { "inset " } else { "" };
            format!(
                "{inset}{}px {}px {}px {}px {color}",
                css_number(s.x),
                css_number(s.y),
                css_number(s.blur),
                css_number(s.spread),
            )
        })
        .collect();
    (!parts.is_empty()).then(|| parts.join(", "))
}

/// Filter list → `filter` value (space-separated filter functions).
pub fn compile_filters(filters: &[Filter]) -> Option<String> {
    let parts: Vec<String> = filters
        .iter()
        .filter(|f| f.enabled)
        .map(|f| {
            format!(
                "{}({}{})",
                f.kind.function_name(),
                css_number(f.value),
                f.kind.unit()
            )
        })
        .collect();
    (!parts.is_empty()).then(|| parts.join(" "))
}

/// Transition list → `transition` value.
pub fn compile_transitions(transitions: &[Transition]) -> Option<String> {
    let parts: Vec<String> = transitions
        .iter()
        .filter(|t| !t.property.trim().is_empty())
        .map(|t| {
            let mut part = format!(
                "{} {}ms {}",
                kebab_case(t.property.trim()),
                css_number(t.duration),
                t.easing.trim()
            );
            if t.delay != 0.0 {
                part.push_str(&format!(" {}ms", css_number(t.delay)));
            }
            part
        })
        .collect();
    (!parts.is_empty()).then(|| parts.join(", "))
}

/// Transform object → `transform` value. Identity components are left out;
/// a transform that is all identity yields `None` (no `transform: none`).
pub fn compile_transform(transform: &Transform) -> Option<String> {
    let mut parts = Vec::new();

    let tx = transform.translate_x.unwrap_or(0.0);
    let ty = transform.translate_y.unwrap_or(0.0);
    if tx != 0.0 || ty != 0.0 {
        parts.push(format!(
            "translate({}px, {}px)",
            css_number(tx),
            css_number(ty)
        ));
    }

    if let Some(rotate) = transform.rotate
        && rotate != 0.0
    {
        parts.push(format!("rotate({}deg)", css_number(rotate)));
    }

    let uniform = transform.scale.unwrap_or(1.0);
    let sx = transform.scale_x.unwrap_or(uniform);
    let sy = transform.scale_y.unwrap_or(uniform);
    if sx == sy {
        if sx != 1.0 {
            parts.push(format!("scale({})", css_number(sx)));
        }
    } else {
        parts.push(format!("scale({}, {})", css_number(sx), css_number(sy)));
    }

    let kx = transform.skew_x.unwrap_or(0.0);
    let ky = transform.skew_y.unwrap_or(0.0);
    if kx != 0.0 || ky != 0.0 {
        parts.push(format!("skew({}deg, {}deg)", css_number(kx), css_number(ky)));
    }

    (!parts.is_empty()).then(|| parts.join(" "))
}

fn compile_effect(value: &StyleValue) -> Option<String> {
    match value {
        StyleValue::Shadows(list) => compile_shadows(list),
        StyleValue::Filters(list) => compile_filters(list),
        StyleValue::Transitions(list) => compile_transitions(list),
        StyleValue::Transform(transform) => compile_transform(transform),
        _ => None,
    }
}

fn is_effect(value: &StyleValue) -> bool {
    matches!(
        value,
        StyleValue::Shadows(_)
            | StyleValue::Filters(_)
            | StyleValue::Transitions(_)
            | StyleValue::Transform(_)
    )
}

/// The literal property an effect value at `property` compiles into.
fn compiled_target(property: &str) -> &str {
    effect_target(property).unwrap_or(property)
}

/// Turn dereferenced styles into the renderer-facing CSS map.
///
/// Text passes through, numbers get `px` unless the property is unitless,
/// booleans are dropped, and effect descriptors are compiled. A compiled
/// effect never replaces a literal value (`boxShadow`, `filter`,
/// `transition`, `transform`) produced by the cascade. The legacy
/// `textColor` alias becomes `color` when no `color` is present.
pub fn finalize(styles: &StyleMap) -> CssMap {
    let mut css = CssMap::new();
    let mut compiled = Vec::new();

    for (property, value) in styles {
        match value {
            StyleValue::Text(text) => {
                let text = text.trim();
                if text.is_empty() || effect_target(property).is_some() {
                    // `shadows: "none"` and friends: nothing to compile.
                    continue;
                }
                css.insert(property.clone(), text.to_string());
            }
            StyleValue::Number(n) if n.is_finite() => {
                let value = if is_unitless(property) || *n == 0.0 {
                    css_number(*n)
                } else {
                    format!("{}px", css_number(*n))
                };
                css.insert(property.clone(), value);
            }
            value if is_effect(value) => {
                if let Some(compiled_value) = compile_effect(value) {
                    compiled.push((compiled_target(property).to_string(), compiled_value));
                }
            }
            other => {
                trace!(property = %property, value = ?other, "unrenderable value; dropping");
            }
        }
    }

    for (target, value) in compiled {
        css.entry(target).or_insert(value);
    }

    if let Some(text_color) = css.remove(TEXT_COLOR) {
        css.entry(COLOR.to_string()).or_insert(text_color);
    }

    css
}
