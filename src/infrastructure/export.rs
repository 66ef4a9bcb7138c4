use base64::{Engine as _, engine::general_purpose::STANDARD};
use gloo::timers::callback::Timeout;
use web_sys::{Blob, BlobPropertyBag, Url};

use super::rendering::svg_tree::combined_svg;
use crate::domain::{
    errors::{DotplotError, DotplotResult},
    logging::{LogComponent, get_logger},
    scene::Scene,
};

pub const EXPORT_FILE_NAME: &str = "dotplot.svg";
const REVOKE_DELAY_MS: u32 = 1_000;

const EXPORT_STYLE: &str = r#"
    body { margin: 0; font-family: "Segoe UI", Tahoma, Geneva, Verdana, sans-serif; background: #fafafa; color: #1a1a1a; }
    body.dark { background: #121212; color: #e0e0e0; }
    :root { --axis-text: #1a1a1a; }
    body.dark { --axis-text: #e0e0e0; }
    h1 { text-align: center; margin: 1rem 0; }
    .full-container { display: flex; flex-direction: column; align-items: center; justify-content: center; min-height: 100vh; padding: 1rem; background: #f0f0f0; }
    body.dark .full-container { background: #1e1e1e; }
    .plot-container { position: relative; width: 860px; max-width: 90vw; margin: 0 auto; padding: 2rem; background: #fff; border: 1px solid #ddd; border-radius: 8px; box-shadow: 0 4px 16px rgba(0,0,0,0.05); }
    body.dark .plot-container { background: #1e1e1e; border-color: #333; box-shadow: 0 4px 16px rgba(0,0,0,0.4); }
    #downloadBtn { position: absolute; top: 1rem; right: 1rem; padding: 0.5rem 1rem; border: 1px solid #ddd; border-radius: 6px; color: inherit; text-decoration: none; }
    #downloadBtn:hover { background: #888; border-color: #888; color: #fff; }
    body.dark #downloadBtn { border-color: #333; }
    svg { background: transparent; overflow: visible; }
    .axis-vertical line, .axis-horizontal line, .tick { stroke: #888; }
    .axis-vertical text, .axis-horizontal text { fill: var(--axis-text); font-size: 0.8rem; }
"#;

/// `data:` URL carrying the combined SVG, base64 encoded.
pub fn svg_data_url(scene: &Scene) -> String {
    let markup = combined_svg(scene).to_markup();
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(markup.as_bytes()))
}

/// Self-contained page showing the current plot, themed like the app, with a
/// link that saves the plot as `dotplot.svg`.
pub fn standalone_html(scene: &Scene) -> String {
    let svg = combined_svg(scene).to_markup();
    format!(
        r#"<!DOCTYPE html>
<html lang="fr">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Dotplot export</title>
  <style>{style}</style>
</head>
<body class="{theme}">
  <h1>Dotplot</h1>
  <div class="full-container">
    <a id="downloadBtn" href="{href}" download="{file}">Télécharger le SVG</a>
    <div class="plot-container">
      {svg}
    </div>
  </div>
</body>
</html>
"#,
        style = EXPORT_STYLE,
        theme = scene.theme,
        href = svg_data_url(scene),
        file = EXPORT_FILE_NAME,
        svg = svg,
    )
}

/// Open `html` in a new tab through a blob URL, revoked shortly after.
pub fn open_in_new_tab(html: &str) -> DotplotResult<()> {
    let window = web_sys::window().ok_or_else(|| DotplotError::Browser("no window".to_string()))?;

    let parts = js_sys::Array::of1(&html.into());
    let options = BlobPropertyBag::new();
    options.set_type("text/html");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    match window.open_with_url_and_target(&url, "_blank")? {
        Some(tab) => {
            let _ = tab.focus();
            Timeout::new(REVOKE_DELAY_MS, move || {
                let _ = Url::revoke_object_url(&url);
            })
            .forget();
            Ok(())
        }
        None => {
            let _ = Url::revoke_object_url(&url);
            get_logger().warn(LogComponent::Infrastructure("Export"), "pop-up blocked");
            Err(DotplotError::Browser("new tab blocked; allow pop-ups for this site".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ViewportManager, use_cases::RenderChartUseCase};
    use crate::domain::{
        config::RenderConfig,
        dotplot::{Colors, Direction, Segment, Theme},
        state::Dataset,
    };

    fn scene(theme: Theme) -> Scene {
        let dataset = Dataset::new(vec![Segment::new(0.0, 0.0, 100.0, 100.0, Direction::Forward, 1)])
            .unwrap();
        let viewport = ViewportManager::new(dataset.default_view, None);
        RenderChartUseCase::new(RenderConfig::default())
            .build_scene(&dataset, &viewport, &Colors::default(), theme)
            .unwrap()
    }

    #[test]
    fn page_carries_theme_and_download_link() {
        let html = standalone_html(&scene(Theme::Dark));
        assert!(html.contains(r#"<body class="dark">"#));
        assert!(html.contains(r#"download="dotplot.svg""#));
        assert!(html.contains("data:image/svg+xml;base64,"));
        assert!(html.contains("--axis-text"));
    }

    #[test]
    fn downloaded_svg_has_concrete_axis_color() {
        let dark = combined_svg(&scene(Theme::Dark)).to_markup();
        assert!(!dark.contains("var("));
        assert!(dark.contains(r##"stroke="#e0e0e0""##));
        let light = combined_svg(&scene(Theme::Light)).to_markup();
        assert!(light.contains(r##"fill="#1a1a1a""##));
    }

    #[test]
    fn data_url_decodes_to_combined_svg() {
        let scene = scene(Theme::Light);
        let url = svg_data_url(&scene);
        let encoded = url.trim_start_matches("data:image/svg+xml;base64,");
        let decoded = String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap();
        assert_eq!(decoded, combined_svg(&scene).to_markup());
        assert!(decoded.starts_with("<svg xmlns="));
    }
}
