use svgplate::{DocumentDefaults, SvgParams, generate_svg_with};
use wasm_bindgen::prelude::*;

/// Assembles SVG markup for the editor's live preview.
///
/// `params_json` is the editor's form state serialized as an `SvgParams`
/// document (camelCase keys). Editor input is trusted the same way the CLI's
/// flags are; the query-string sanitizer only guards served requests.
#[wasm_bindgen]
pub fn generate_svg_markup(params_json: &str) -> Result<String, JsValue> {
    let params: SvgParams = if params_json.trim().is_empty() {
        SvgParams::default()
    } else {
        serde_json::from_str(params_json).map_err(|error| JsValue::from_str(&error.to_string()))?
    };
    Ok(generate_svg_with(&params, &DocumentDefaults::default()))
}

#[cfg(test)]
mod tests {
    use svgplate::{DocumentDefaults, SvgParams, generate_svg_with};

    #[test]
    fn renders_editor_form_state() {
        let json = r#"{
            "text": "Hello SVG",
            "fontSize": 40,
            "fill": "black",
            "background": "#f5f5f5",
            "linearGradients": [
                {"id": "grad1", "stops": [
                    {"offset": "0%", "color": "#000"},
                    {"offset": "100%", "color": "#fff"}
                ]}
            ],
            "gradientFillId": "grad1"
        }"#;

        let params: SvgParams = serde_json::from_str(json).expect("editor state should parse");
        let svg = generate_svg_with(&params, &DocumentDefaults::default());
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Hello SVG"));
        assert!(svg.contains("fill=\"url(#grad1)\""));
    }
}
