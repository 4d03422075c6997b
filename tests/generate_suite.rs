use svgplate::config::Config;
use svgplate::generate_svg;
use svgplate::params::SvgParams;
use svgplate::params_from_query;

fn assert_valid_svg(svg: &str, case: &str) {
    assert!(svg.starts_with("<svg "), "{case}: missing <svg tag");
    assert!(svg.ends_with("</svg>"), "{case}: missing </svg tag");
}

fn render_query(query: &str) -> String {
    generate_svg(&params_from_query(query, &Config::default()))
}

#[test]
fn render_query_matrix() {
    // Keep this list explicit so new parameter surfaces must be added
    // intentionally.
    let cases = [
        "",
        "text=Hello",
        "text=Hello%20SVG&fontSize=64&fill=%23336699",
        "text=A%5CnB%5CnC&fontSize=40",
        "text=Hi&rotate=45&width=400&height=200",
        "text=Hi&bg=lavender",
        "text=Hi&gradId=g1&stops=0%25:red,100%25:blue&gradientFillId=g1",
        "text=Hi&animations=%5B%7B%22attributeName%22%3A%22opacity%22%2C%22values%22%3A%220%3B1%22%2C%22dur%22%3A%222s%22%7D%5D",
        "shapes=%5B%7B%22type%22%3A%22circle%22%2C%22cx%22%3A50%2C%22cy%22%3A50%2C%22r%22%3A40%2C%22fill%22%3A%22red%22%7D%5D",
        "text=Badge&fontSize=24&auto=1",
        "text=%3Cscript%3Ealert(1)%3C%2Fscript%3E&fill=red%3Bfill%3Ablue",
        "viewBox=0%200%20100%2050&style=border%3A1px%20solid",
    ];

    for case in cases {
        let svg = render_query(case);
        assert_valid_svg(&svg, case);
    }
}

#[test]
fn served_text_is_injection_safe() {
    let svg = render_query("text=%3Cscript%3Ealert(1)%3C%2Fscript%3E");
    assert!(!svg.contains("<script"));
    assert!(svg.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
}

#[test]
fn served_colors_are_injection_safe() {
    let svg = render_query("fill=%22%2F%3E%3Cscript%3E&bg=red%3Bbackground%3Aurl(evil)");
    assert!(!svg.contains("<script"));
    assert!(!svg.contains("evil"));
    assert!(svg.contains("fill=\"transparent\""));
}

#[test]
fn query_to_document_round_trip() {
    let svg = render_query("width=300&height=150");
    assert!(svg.contains("width=\"300\""));
    assert!(svg.contains("height=\"150\""));
    assert!(svg.contains("viewBox=\"0 0 300 150\""));
}

#[test]
fn gradient_list_emits_one_element_per_gradient() {
    let json = r##"{
        "text": "Hi",
        "linearGradients": [
            {"id": "a", "stops": [{"offset": "0%", "color": "#000"}]},
            {"id": "b", "stops": [
                {"offset": "0%", "color": "#000"},
                {"offset": "50%", "color": "#888"},
                {"offset": "100%", "color": "#fff"}
            ]},
            {"id": "c", "stops": []}
        ]
    }"##;
    let params: SvgParams = serde_json::from_str(json).unwrap();
    let svg = generate_svg(&params);
    assert_eq!(svg.matches("<linearGradient").count(), 3);
    assert_eq!(svg.matches("<stop ").count(), 4);
    for id in ["a", "b", "c"] {
        assert!(svg.contains(&format!("<linearGradient id=\"{id}\"")));
    }
}

#[test]
fn full_document_sections_appear_in_order() {
    let json = r##"{
        "text": "Layered",
        "background": "#fafafa",
        "linearGradients": [{"id": "g", "stops": [{"offset": "0%", "color": "red"}]}],
        "patterns": [{"id": "p", "width": "8", "height": "8", "content": "<circle cx=\"4\" cy=\"4\" r=\"1\"/>"}],
        "clipPaths": [{"id": "c", "content": "<rect width=\"10\" height=\"10\"/>"}],
        "filters": [{"id": "f", "content": "<feGaussianBlur stdDeviation=\"2\"/>"}],
        "rawShapes": ["<line x1=\"0\" y1=\"0\" x2=\"10\" y2=\"10\"/>"],
        "shapes": [{"type": "rect", "x": 1, "y": 1, "width": 5, "height": 5}],
        "extraElements": ["<!-- top -->"]
    }"##;
    let params: SvgParams = serde_json::from_str(json).unwrap();
    let svg = generate_svg(&params);

    let positions: Vec<usize> = [
        "<defs>", "<linearGradient", "<pattern", "<clipPath", "<filter", "</defs>",
        "fill=\"#fafafa\"", "<line ", "<text", "<rect x=\"1\"", "<!-- top -->",
    ]
    .iter()
    .map(|needle| svg.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
    .collect();
    assert!(
        positions.windows(2).all(|pair| pair[0] < pair[1]),
        "sections out of order in {svg}"
    );
}

#[test]
fn minimal_query_yields_minimal_document() {
    let svg = render_query("");
    assert_eq!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"400\" height=\"200\" viewBox=\"0 0 400 200\"></svg>"
    );
}

#[test]
fn badge_mode_end_to_end() {
    let svg = render_query("text=build%20passing&fontSize=24&auto=1&bg=%234c1");
    assert_valid_svg(&svg, "badge");
    assert!(svg.contains("role=\"img\""));
    assert!(svg.contains("aria-label=\"build passing\""));
    assert!(svg.contains("fill=\"#4c1\""));
    // height = fontSize + 2 * round(fontSize * 0.6)
    assert!(svg.contains("height=\"52\""));
}
