use crate::config::Config;
use crate::measure;
use crate::params::{Animation, GradientStop, LinearGradient, Shape, SvgParams};
use crate::sanitize::{escape_text, sanitize_color};
use serde::de::DeserializeOwned;

/// Response headers for a serving layer.
pub const CONTENT_TYPE: &str = "image/svg+xml; charset=utf-8";
pub const CACHE_CONTROL: &str = "public, max-age=60";

/// Splits a query string into decoded key/value pairs. A leading `?` is
/// tolerated; `+` decodes to space; invalid percent escapes pass through
/// verbatim.
pub fn parse_query_pairs(query: &str) -> Vec<(String, String)> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut pairs = Vec::new();
    for part in query.split('&') {
        if part.is_empty() {
            continue;
        }
        let (key, value) = part.split_once('=').unwrap_or((part, ""));
        pairs.push((percent_decode(key), percent_decode(value)));
    }
    pairs
}

fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Maps flat query parameters onto a parameter model, performing type
/// coercion, range clamping, and sanitization of everything color-like.
///
/// Never fails: malformed numbers are ignored, malformed compound fields are
/// treated as absent, unsafe colors become fallbacks. Raw-fragment fields
/// (`rawShapes`, `extraElements`, pattern/clip-path/filter content) are not
/// reachable from here; they exist only on the programmatic surfaces.
pub fn params_from_query(query: &str, config: &Config) -> SvgParams {
    let mut params = SvgParams::default();
    let mut grad_id: Option<String> = None;
    let mut stops_raw: Option<String> = None;
    let mut auto = false;

    for (key, value) in parse_query_pairs(query) {
        match key.as_str() {
            "text" => {
                // Escaped line-break sequences become real line breaks.
                params.text = Some(value.replace("\\n", "\n"));
            }
            "fontSize" => {
                if let Some(size) = parse_number(&value) {
                    params.font_size =
                        Some(size.clamp(config.limits.font_size_min, config.limits.font_size_max));
                }
            }
            "fill" => {
                params.fill = Some(sanitize_color(Some(&value), &config.defaults.fill));
            }
            "bg" | "background" => {
                params.background = Some(sanitize_color(
                    Some(&value),
                    &config.defaults.background_fallback,
                ));
            }
            "rotate" => {
                params.rotate = parse_number(&value);
            }
            "width" => {
                params.width =
                    parse_number(&value).map(|v| v.clamp(1.0, config.limits.max_dimension));
            }
            "height" => {
                params.height =
                    parse_number(&value).map(|v| v.clamp(1.0, config.limits.max_dimension));
            }
            "fontFamily" => params.font_family = Some(escape_text(&value)),
            "fontWeight" => params.font_weight = Some(escape_text(&value)),
            "fontStyle" => params.font_style = Some(escape_text(&value)),
            "textAnchor" => params.text_anchor = Some(escape_text(&value)),
            "dominantBaseline" => params.dominant_baseline = Some(escape_text(&value)),
            "viewBox" => params.view_box = Some(escape_text(&value)),
            "xmlns" => params.xmlns = Some(escape_text(&value)),
            "style" => params.style = Some(escape_text(&value)),
            "gradientFillId" => params.gradient_fill_id = Some(escape_text(&value)),
            "gradId" => grad_id = Some(escape_text(&value)),
            "stops" => stops_raw = Some(value),
            "linearGradients" => {
                if let Some(gradients) = decode_json::<Vec<LinearGradient>>(&value) {
                    params.linear_gradients = gradients
                        .into_iter()
                        .map(|g| sanitize_gradient(g, config))
                        .collect();
                }
            }
            "shapes" => {
                if let Some(shapes) = decode_json::<Vec<Shape>>(&value) {
                    params.shapes = shapes.into_iter().map(sanitize_shape).collect();
                }
            }
            "animations" => {
                if let Some(animations) = decode_json::<Vec<Animation>>(&value) {
                    params.animations =
                        animations.into_iter().map(sanitize_animation).collect();
                }
            }
            "auto" => {
                auto = matches!(value.as_str(), "" | "1" | "true" | "yes");
            }
            _ => {}
        }
    }

    // Shorthand gradient: gradId + stops as offset:color pairs.
    if let Some(raw) = stops_raw {
        let stops = parse_stops(&raw, config);
        if !stops.is_empty() {
            params.linear_gradients.push(LinearGradient {
                id: grad_id.unwrap_or_else(|| "grad1".to_string()),
                stops,
                ..LinearGradient::default()
            });
        }
    }

    if auto {
        measure::apply_badge_size(&mut params, config);
    }

    params
}

fn parse_number(value: &str) -> Option<f32> {
    value.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

/// serde_json first, json5 as the lenient fallback. Empty or malformed
/// input is absent.
fn decode_json<T: DeserializeOwned>(raw: &str) -> Option<T> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(value) = serde_json::from_str::<T>(raw) {
        return Some(value);
    }
    json5::from_str::<T>(raw).ok()
}

fn parse_stops(raw: &str, config: &Config) -> Vec<GradientStop> {
    let mut stops = Vec::new();
    for pair in raw.split(',') {
        let Some((offset, color)) = pair.split_once(':') else {
            continue;
        };
        stops.push(GradientStop {
            offset: escape_text(offset.trim()),
            color: sanitize_color(Some(color), &config.defaults.fill),
            ..GradientStop::default()
        });
    }
    stops
}

fn sanitize_gradient(mut gradient: LinearGradient, config: &Config) -> LinearGradient {
    gradient.id = escape_text(&gradient.id);
    gradient.x1 = gradient.x1.as_deref().map(escape_text);
    gradient.y1 = gradient.y1.as_deref().map(escape_text);
    gradient.x2 = gradient.x2.as_deref().map(escape_text);
    gradient.y2 = gradient.y2.as_deref().map(escape_text);
    for stop in &mut gradient.stops {
        stop.offset = escape_text(&stop.offset);
        stop.color = sanitize_color(Some(&stop.color), &config.defaults.fill);
        if let Some(animate) = &mut stop.animate {
            animate.values = animate.values.as_deref().map(escape_text);
            animate.from = animate.from.as_deref().map(escape_text);
            animate.to = animate.to.as_deref().map(escape_text);
            animate.dur = animate.dur.as_deref().map(escape_text);
            animate.repeat_count = animate.repeat_count.as_deref().map(escape_text);
        }
    }
    gradient
}

fn sanitize_animation(mut animation: Animation) -> Animation {
    animation.attribute_name = escape_text(&animation.attribute_name);
    animation.values = animation.values.as_deref().map(escape_text);
    animation.from = animation.from.as_deref().map(escape_text);
    animation.to = animation.to.as_deref().map(escape_text);
    animation.dur = animation.dur.as_deref().map(escape_text);
    animation.repeat_count = animation.repeat_count.as_deref().map(escape_text);
    animation.r#type = animation.r#type.as_deref().map(escape_text);
    animation.additive = animation.additive.as_deref().map(escape_text);
    animation.accumulate = animation.accumulate.as_deref().map(escape_text);
    animation
}

fn sanitize_shape(shape: Shape) -> Shape {
    let clean = |paint: Option<String>| {
        paint.map(|value| sanitize_color(Some(&value), "black"))
    };
    match shape {
        Shape::Circle {
            cx,
            cy,
            r,
            fill,
            stroke,
            stroke_width,
        } => Shape::Circle {
            cx,
            cy,
            r,
            fill: clean(fill),
            stroke: clean(stroke),
            stroke_width,
        },
        Shape::Rect {
            x,
            y,
            width,
            height,
            rx,
            fill,
            stroke,
            stroke_width,
        } => Shape::Rect {
            x,
            y,
            width,
            height,
            rx,
            fill: clean(fill),
            stroke: clean(stroke),
            stroke_width,
        },
        Shape::Path {
            d,
            fill,
            stroke,
            stroke_width,
        } => Shape::Path {
            d: escape_text(&d),
            fill: clean(fill),
            stroke: clean(stroke),
            stroke_width,
        },
    }
}
