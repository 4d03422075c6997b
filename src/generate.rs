use crate::config::DocumentDefaults;
use crate::params::{Animation, Shape, StopAnimation, SvgParams};
use crate::sanitize::escape_text;

/// Assembles the SVG document for `params` using the built-in defaults.
pub fn generate_svg(params: &SvgParams) -> String {
    generate_svg_with(params, &DocumentDefaults::default())
}

/// Assembles the SVG document for `params`.
///
/// Pure and infallible: no validation is performed and some markup string is
/// always returned. Malformed geometry or dangling `url(#id)` references
/// emit as-is and are the renderer's problem.
///
/// Section order is fixed: defs (gradients, patterns, clip-paths, filters),
/// background rect, raw shape fragments, text, typed primitives, extra
/// elements. Defs must precede anything that references them; the background
/// sits beneath all visible content; extra elements land on top.
pub fn generate_svg_with(params: &SvgParams, defaults: &DocumentDefaults) -> String {
    let width = params.width.unwrap_or(defaults.width);
    let height = params.height.unwrap_or(defaults.height);
    let xmlns = params.xmlns.as_deref().unwrap_or(&defaults.xmlns);
    let view_box = match &params.view_box {
        Some(view_box) => view_box.clone(),
        None => format!("0 0 {width} {height}"),
    };

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"{xmlns}\" width=\"{width}\" height=\"{height}\" viewBox=\"{view_box}\""
    ));
    if let Some(style) = params.style.as_deref().filter(|s| !s.is_empty()) {
        svg.push_str(&format!(" style=\"{style}\""));
    }
    if let Some(label) = &params.aria_label {
        svg.push_str(&format!(
            " role=\"img\" aria-label=\"{}\"",
            escape_text(label)
        ));
    }
    svg.push('>');

    push_defs(&mut svg, params);

    if let Some(background) = params.background.as_deref().filter(|s| !s.is_empty()) {
        svg.push_str(&format!(
            "<rect width=\"100%\" height=\"100%\" fill=\"{background}\"/>"
        ));
    }

    for fragment in &params.raw_shapes {
        svg.push_str(fragment.as_str());
    }

    if let Some(text) = params.text.as_deref().filter(|t| !t.is_empty()) {
        push_text(&mut svg, text, params, defaults, width, height);
    }

    for shape in &params.shapes {
        push_shape(&mut svg, shape);
    }

    for fragment in &params.extra_elements {
        svg.push_str(fragment.as_str());
    }

    svg.push_str("</svg>");
    svg
}

fn push_defs(svg: &mut String, params: &SvgParams) {
    if params.linear_gradients.is_empty()
        && params.patterns.is_empty()
        && params.clip_paths.is_empty()
        && params.filters.is_empty()
    {
        return;
    }

    svg.push_str("<defs>");

    for gradient in &params.linear_gradients {
        svg.push_str(&format!(
            "<linearGradient id=\"{}\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\">",
            gradient.id,
            gradient.x1.as_deref().unwrap_or("0%"),
            gradient.y1.as_deref().unwrap_or("0%"),
            gradient.x2.as_deref().unwrap_or("100%"),
            gradient.y2.as_deref().unwrap_or("0%"),
        ));
        // Stops emit in the order given; sorting offsets is the caller's job.
        for stop in &gradient.stops {
            svg.push_str(&format!(
                "<stop offset=\"{}\" stop-color=\"{}\"",
                stop.offset, stop.color
            ));
            if let Some(opacity) = stop.opacity {
                svg.push_str(&format!(" stop-opacity=\"{opacity}\""));
            }
            match &stop.animate {
                Some(animation) => {
                    svg.push('>');
                    push_stop_animation(svg, animation);
                    svg.push_str("</stop>");
                }
                None => svg.push_str("/>"),
            }
        }
        svg.push_str("</linearGradient>");
    }

    for pattern in &params.patterns {
        svg.push_str(&format!("<pattern id=\"{}\"", pattern.id));
        if let Some(x) = &pattern.x {
            svg.push_str(&format!(" x=\"{x}\""));
        }
        if let Some(y) = &pattern.y {
            svg.push_str(&format!(" y=\"{y}\""));
        }
        if let Some(width) = &pattern.width {
            svg.push_str(&format!(" width=\"{width}\""));
        }
        if let Some(height) = &pattern.height {
            svg.push_str(&format!(" height=\"{height}\""));
        }
        svg.push_str(&format!(
            " patternUnits=\"{}\">",
            pattern.pattern_units.as_deref().unwrap_or("userSpaceOnUse")
        ));
        svg.push_str(pattern.content.as_str());
        svg.push_str("</pattern>");
    }

    for clip_path in &params.clip_paths {
        svg.push_str(&format!("<clipPath id=\"{}\">", clip_path.id));
        svg.push_str(clip_path.content.as_str());
        svg.push_str("</clipPath>");
    }

    for filter in &params.filters {
        svg.push_str(&format!("<filter id=\"{}\"", filter.id));
        if let Some(x) = &filter.x {
            svg.push_str(&format!(" x=\"{x}\""));
        }
        if let Some(y) = &filter.y {
            svg.push_str(&format!(" y=\"{y}\""));
        }
        if let Some(width) = &filter.width {
            svg.push_str(&format!(" width=\"{width}\""));
        }
        if let Some(height) = &filter.height {
            svg.push_str(&format!(" height=\"{height}\""));
        }
        svg.push('>');
        svg.push_str(filter.content.as_str());
        svg.push_str("</filter>");
    }

    svg.push_str("</defs>");
}

fn push_text(
    svg: &mut String,
    text: &str,
    params: &SvgParams,
    defaults: &DocumentDefaults,
    width: f32,
    height: f32,
) {
    let font_size = params.font_size.unwrap_or(defaults.font_size);
    let fill = match params.gradient_fill_id.as_deref().filter(|id| !id.is_empty()) {
        Some(id) => format!("url(#{id})"),
        None => params
            .fill
            .clone()
            .unwrap_or_else(|| defaults.fill.clone()),
    };

    svg.push_str(&format!(
        "<text x=\"50%\" y=\"50%\" text-anchor=\"{}\" dominant-baseline=\"{}\" font-size=\"{font_size}\" font-family=\"{}\" fill=\"{fill}\"",
        params.text_anchor.as_deref().unwrap_or(&defaults.text_anchor),
        params
            .dominant_baseline
            .as_deref()
            .unwrap_or(&defaults.dominant_baseline),
        params.font_family.as_deref().unwrap_or(&defaults.font_family),
    ));
    if let Some(weight) = params.font_weight.as_deref().filter(|s| !s.is_empty()) {
        svg.push_str(&format!(" font-weight=\"{weight}\""));
    }
    if let Some(style) = params.font_style.as_deref().filter(|s| !s.is_empty()) {
        svg.push_str(&format!(" font-style=\"{style}\""));
    }
    if let Some(angle) = params.rotate.filter(|angle| *angle != 0.0) {
        // Rotation pivots on the document center.
        svg.push_str(&format!(
            " transform=\"rotate({angle} {} {})\"",
            width / 2.0,
            height / 2.0
        ));
    }
    svg.push('>');

    for (idx, line) in text.split('\n').enumerate() {
        // Fixed line-height heuristic, not font-metric-aware. Each dy is
        // relative to the previous line, not cumulative from the first.
        let dy = if idx == 0 {
            0.0
        } else {
            font_size * defaults.line_height
        };
        svg.push_str(&format!(
            "<tspan x=\"50%\" dy=\"{dy}\">{}</tspan>",
            escape_text(line)
        ));
    }

    for animation in &params.animations {
        push_animation(svg, animation);
    }

    svg.push_str("</text>");
}

fn push_animation(svg: &mut String, animation: &Animation) {
    match &animation.r#type {
        Some(kind) => {
            svg.push_str(&format!(
                "<animateTransform attributeName=\"transform\" attributeType=\"XML\" type=\"{kind}\""
            ));
        }
        None => {
            svg.push_str(&format!(
                "<animate attributeName=\"{}\"",
                animation.attribute_name
            ));
        }
    }
    if let Some(values) = &animation.values {
        svg.push_str(&format!(" values=\"{values}\""));
    }
    if let Some(from) = &animation.from {
        svg.push_str(&format!(" from=\"{from}\""));
    }
    if let Some(to) = &animation.to {
        svg.push_str(&format!(" to=\"{to}\""));
    }
    if let Some(dur) = &animation.dur {
        svg.push_str(&format!(" dur=\"{dur}\""));
    }
    svg.push_str(&format!(
        " repeatCount=\"{}\"",
        animation.repeat_count.as_deref().unwrap_or("indefinite")
    ));
    if let Some(additive) = &animation.additive {
        svg.push_str(&format!(" additive=\"{additive}\""));
    }
    if let Some(accumulate) = &animation.accumulate {
        svg.push_str(&format!(" accumulate=\"{accumulate}\""));
    }
    svg.push_str("/>");
}

fn push_stop_animation(svg: &mut String, animation: &StopAnimation) {
    svg.push_str("<animate attributeName=\"stop-color\"");
    if let Some(values) = &animation.values {
        svg.push_str(&format!(" values=\"{values}\""));
    }
    if let Some(from) = &animation.from {
        svg.push_str(&format!(" from=\"{from}\""));
    }
    if let Some(to) = &animation.to {
        svg.push_str(&format!(" to=\"{to}\""));
    }
    if let Some(dur) = &animation.dur {
        svg.push_str(&format!(" dur=\"{dur}\""));
    }
    svg.push_str(&format!(
        " repeatCount=\"{}\"",
        animation.repeat_count.as_deref().unwrap_or("indefinite")
    ));
    svg.push_str("/>");
}

fn push_shape(svg: &mut String, shape: &Shape) {
    match shape {
        Shape::Circle {
            cx,
            cy,
            r,
            fill,
            stroke,
            stroke_width,
        } => {
            svg.push_str(&format!("<circle cx=\"{cx}\" cy=\"{cy}\" r=\"{r}\""));
            push_paint(svg, fill, stroke, stroke_width);
        }
        Shape::Rect {
            x,
            y,
            width,
            height,
            rx,
            fill,
            stroke,
            stroke_width,
        } => {
            svg.push_str(&format!(
                "<rect x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\""
            ));
            if let Some(rx) = rx {
                svg.push_str(&format!(" rx=\"{rx}\""));
            }
            push_paint(svg, fill, stroke, stroke_width);
        }
        Shape::Path {
            d,
            fill,
            stroke,
            stroke_width,
        } => {
            svg.push_str(&format!("<path d=\"{d}\""));
            push_paint(svg, fill, stroke, stroke_width);
        }
    }
}

fn push_paint(
    svg: &mut String,
    fill: &Option<String>,
    stroke: &Option<String>,
    stroke_width: &Option<f32>,
) {
    if let Some(fill) = fill {
        svg.push_str(&format!(" fill=\"{fill}\""));
    }
    if let Some(stroke) = stroke {
        svg.push_str(&format!(" stroke=\"{stroke}\""));
    }
    if let Some(stroke_width) = stroke_width {
        svg.push_str(&format!(" stroke-width=\"{stroke_width}\""));
    }
    svg.push_str("/>");
}
