use serde::{Deserialize, Serialize};

/// Trusted, pre-rendered markup inserted verbatim into the document.
///
/// Anything wrapped in this type bypasses escaping entirely. The query-string
/// boundary never constructs one; raw fragments are reachable only from the
/// programmatic surfaces (params files, the editor), where the caller already
/// controls the process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawFragment(pub String);

impl RawFragment {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RawFragment {
    fn from(markup: &str) -> Self {
        Self(markup.to_string())
    }
}

/// A `stop-color` animation embedded in a gradient stop.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StopAnimation {
    pub values: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub dur: Option<String>,
    pub repeat_count: Option<String>,
}

/// One stop of a linear gradient. Offsets accept percentages or fractions
/// and are emitted in the order given; sorting is the caller's job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GradientStop {
    pub offset: String,
    pub color: String,
    pub opacity: Option<f32>,
    pub animate: Option<StopAnimation>,
}

/// A `linearGradient` definition. The id must be unique among everything
/// referenced by `url(#id)`; uniqueness is not validated here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinearGradient {
    pub id: String,
    pub x1: Option<String>,
    pub y1: Option<String>,
    pub x2: Option<String>,
    pub y2: Option<String>,
    pub stops: Vec<GradientStop>,
}

/// A document-level animation attached to the text element.
///
/// When `r#type` is set the animation becomes an `animateTransform` targeting
/// the `transform` attribute (translate/rotate/scale); otherwise a plain
/// `animate` on `attribute_name`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Animation {
    pub attribute_name: String,
    pub values: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub dur: Option<String>,
    pub repeat_count: Option<String>,
    pub r#type: Option<String>,
    pub additive: Option<String>,
    pub accumulate: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pattern {
    pub id: String,
    pub x: Option<String>,
    pub y: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
    pub pattern_units: Option<String>,
    /// Opaque inner markup; the caller is trusted to supply valid SVG.
    pub content: RawFragment,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClipPath {
    pub id: String,
    pub content: RawFragment,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Filter {
    pub id: String,
    pub x: Option<String>,
    pub y: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
    pub content: RawFragment,
}

/// Basic drawing primitives. Geometry is passed through unvalidated; a
/// negative radius emits as-is and the renderer gets to complain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Shape {
    #[serde(rename_all = "camelCase")]
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        fill: Option<String>,
        stroke: Option<String>,
        stroke_width: Option<f32>,
    },
    #[serde(rename_all = "camelCase")]
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        rx: Option<f32>,
        fill: Option<String>,
        stroke: Option<String>,
        stroke_width: Option<f32>,
    },
    #[serde(rename_all = "camelCase")]
    Path {
        d: String,
        fill: Option<String>,
        stroke: Option<String>,
        stroke_width: Option<f32>,
    },
}

/// Everything a document may contain. One immutable value per render; the
/// assembler never retains it across calls.
///
/// Every field is optional or defaults to empty. Absent fields contribute
/// nothing to the output — no empty attributes, no empty containers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SvgParams {
    pub text: Option<String>,
    pub font_size: Option<f32>,
    pub fill: Option<String>,
    pub font_family: Option<String>,
    pub font_weight: Option<String>,
    pub font_style: Option<String>,
    pub text_anchor: Option<String>,
    pub dominant_baseline: Option<String>,
    pub rotate: Option<f32>,
    pub background: Option<String>,
    pub linear_gradients: Vec<LinearGradient>,
    /// Fills the text with `url(#id)` instead of the literal fill color.
    pub gradient_fill_id: Option<String>,
    pub animations: Vec<Animation>,
    pub patterns: Vec<Pattern>,
    pub clip_paths: Vec<ClipPath>,
    pub filters: Vec<Filter>,
    pub shapes: Vec<Shape>,
    /// Raw markup rendered beneath the text, above the background.
    pub raw_shapes: Vec<RawFragment>,
    /// Raw markup rendered on top of everything else.
    pub extra_elements: Vec<RawFragment>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub view_box: Option<String>,
    pub xmlns: Option<String>,
    pub style: Option<String>,
    /// Emits `role="img" aria-label="..."` on the root when set.
    pub aria_label: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_wire_form() {
        let json = r##"{
            "text": "Hi",
            "fontSize": 32,
            "gradientFillId": "g1",
            "linearGradients": [
                {"id": "g1", "x2": "0%", "y2": "100%", "stops": [
                    {"offset": "0%", "color": "#000"},
                    {"offset": "100%", "color": "#fff", "opacity": 0.5}
                ]}
            ]
        }"##;
        let params: SvgParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.text.as_deref(), Some("Hi"));
        assert_eq!(params.font_size, Some(32.0));
        assert_eq!(params.linear_gradients.len(), 1);
        assert_eq!(params.linear_gradients[0].stops[1].opacity, Some(0.5));
        assert!(params.linear_gradients[0].x1.is_none());
    }

    #[test]
    fn shape_enum_is_tagged_by_type() {
        let json = r#"[
            {"type": "circle", "cx": 10, "cy": 10, "r": 5, "fill": "red"},
            {"type": "rect", "x": 0, "y": 0, "width": 20, "height": 10},
            {"type": "path", "d": "M0 0 L10 10"}
        ]"#;
        let shapes: Vec<Shape> = serde_json::from_str(json).unwrap();
        assert_eq!(shapes.len(), 3);
        assert!(matches!(shapes[0], Shape::Circle { r, .. } if r == 5.0));
        assert!(matches!(shapes[2], Shape::Path { ref d, .. } if d == "M0 0 L10 10"));
    }

    #[test]
    fn default_params_are_all_absent() {
        let params = SvgParams::default();
        assert!(params.text.is_none());
        assert!(params.linear_gradients.is_empty());
        assert!(params.shapes.is_empty());
        assert!(params.extra_elements.is_empty());
    }
}
