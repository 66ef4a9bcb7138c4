use std::rc::Rc;

use leptos::html::Div;
use leptos::*;
use wasm_bindgen::JsValue;

use crate::domain::{
    config::{LoaderConfig, RenderConfig},
    dotplot::{Direction, Theme, ViewBox},
    events::DotplotEvent,
    logging::LogComponent,
};
use crate::presentation::DotplotApi;
use crate::{log_error, log_info};

pub const PLOT_CONTAINER_ID: &str = "dotplot";

const COMPONENT: LogComponent = LogComponent::Presentation("App");

/// Text of the four manual zoom inputs: query range on x, target range on y.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ZoomInputs {
    pub q_min: String,
    pub q_max: String,
    pub t_min: String,
    pub t_max: String,
}

impl ZoomInputs {
    /// Bounds of `view`, rounded to whole positions.
    pub fn from_view(view: &ViewBox) -> Self {
        let round = |v: f64| format!("{}", v.round());
        Self {
            q_min: round(view.x_min()),
            q_max: round(view.x_max()),
            t_min: round(view.y_min()),
            t_max: round(view.y_max()),
        }
    }

    /// `(q_min, q_max, t_min, t_max)` when all four fields are numbers.
    pub fn parse(&self) -> Option<(f64, f64, f64, f64)> {
        let field = |s: &str| s.trim().parse::<f64>().ok().filter(|v| v.is_finite());
        Some((field(&self.q_min)?, field(&self.q_max)?, field(&self.t_min)?, field(&self.t_max)?))
    }
}

fn describe(error: JsValue) -> String {
    error.as_string().unwrap_or_else(|| format!("{:?}", error))
}

type ApiSlot = StoredValue<Option<Rc<DotplotApi>>>;

/// Run `action` against the plot if it exists, surfacing errors in the status line.
fn with_plot(api: ApiSlot, set_status: WriteSignal<String>, action: impl FnOnce(&DotplotApi) -> Result<(), JsValue>) {
    let Some(dotplot) = api.get_value() else {
        return;
    };
    if let Err(e) = action(&dotplot) {
        let message = describe(e);
        log_error!(COMPONENT, "{}", message);
        set_status.set(message);
    }
}

/// Dotplot page: control panel above the plot container.
#[component]
pub fn App() -> impl IntoView {
    let api: ApiSlot = store_value(None);
    let (status, set_status) = create_signal("Loading...".to_string());
    let (zoom_allowed, set_zoom_allowed) = create_signal(true);
    let (theme, set_theme) = create_signal(Theme::Light);
    let (color_f, set_color_f) = create_signal(String::from("green"));
    let (color_r, set_color_r) = create_signal(String::from("red"));
    let (inputs, set_inputs) = create_signal(ZoomInputs::default());

    let container = create_node_ref::<Div>();

    create_effect(move |_| {
        if container.get().is_none() || api.with_value(Option::is_some) {
            return;
        }
        spawn_local(async move {
            let dotplot = match DotplotApi::with_config(
                PLOT_CONTAINER_ID,
                RenderConfig::default(),
                LoaderConfig::default(),
            ) {
                Ok(dotplot) => Rc::new(dotplot),
                Err(e) => {
                    set_status.set(e.to_string());
                    return;
                }
            };

            dotplot.subscribe(move |event| match event {
                DotplotEvent::SelectionChanged { selection } => {
                    set_inputs.set(ZoomInputs::from_view(selection))
                }
                DotplotEvent::ViewBoxChanged { new, .. } => set_inputs.set(ZoomInputs::from_view(new)),
                DotplotEvent::ThemeChanged { theme } => set_theme.set(*theme),
                DotplotEvent::ZoomModeChanged { zoom_allowed } => set_zoom_allowed.set(*zoom_allowed),
                DotplotEvent::Rendered { lines, hits } => {
                    set_status.set(format!("{} segments drawn, {} clickable", lines, hits))
                }
                _ => {}
            });
            set_theme.set(dotplot.theme());
            let colors = dotplot.colors();
            set_color_f.set(colors.f);
            set_color_r.set(colors.r);
            api.set_value(Some(dotplot.clone()));

            match dotplot.load_job().await {
                Ok(count) => {
                    log_info!(COMPONENT, "{} segments loaded", count);
                    if let Some(view) = dotplot.current_view() {
                        set_inputs.set(ZoomInputs::from_view(&view));
                    }
                }
                Err(e) => set_status.set(e.to_string()),
            }
        });
    });

    let set_mode = move |allowed: bool| {
        set_zoom_allowed.set(allowed);
        with_plot(api, set_status, |d| d.set_zoom_mode(allowed));
    };
    let set_color = move |direction: Direction, color: String| {
        with_plot(api, set_status, |d| d.set_color(direction.as_ref(), &color));
    };
    let apply_zoom = move |_: ev::MouseEvent| match inputs.get_untracked().parse() {
        Some((q_min, q_max, t_min, t_max)) => {
            with_plot(api, set_status, |d| d.apply_manual_zoom(q_min, q_max, t_min, t_max))
        }
        None => set_status.set("Zoom bounds must be numbers".to_string()),
    };

    view! {
        <style>
            {r#"
            body.light { --axis-text: #1a1a1a; background: #fafafa; color: #1a1a1a; }
            body.dark { --axis-text: #e0e0e0; background: #121212; color: #e0e0e0; }
            .dotplot-app { font-family: "Segoe UI", Tahoma, Geneva, Verdana, sans-serif; padding: 1rem; }
            .toolbar { display: flex; flex-wrap: wrap; gap: 1rem; align-items: center; margin-bottom: 1rem; }
            .toolbar fieldset { border: 1px solid #888; border-radius: 6px; padding: 0.25rem 0.75rem; }
            .toolbar input[type=number] { width: 6rem; }
            .status { font-size: 0.85rem; opacity: 0.8; }
            .wrapper { display: flex; flex-wrap: wrap; justify-content: center; }
            .axis-horizontal { display: block; flex-basis: 100%; }
            svg { overflow: visible; }
            .axis-vertical line, .axis-horizontal line, .tick { stroke: #888; }
            "#}
        </style>
        <div class="dotplot-app">
            <div class="toolbar">
                <fieldset>
                    <label>
                        <input type="radio" name="mode" value="zoom"
                            prop:checked=move || zoom_allowed.get()
                            on:change=move |_| set_mode(true)/>
                        " Zoom"
                    </label>
                    <label>
                        <input type="radio" name="mode" value="map"
                            prop:checked=move || !zoom_allowed.get()
                            on:change=move |_| set_mode(false)/>
                        " Map"
                    </label>
                </fieldset>
                <fieldset>
                    <label>
                        "Forward "
                        <input type="color" id="colorF"
                            prop:value=move || color_f.get()
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                set_color_f.set(value.clone());
                                set_color(Direction::Forward, value);
                            }/>
                    </label>
                    <label>
                        " Reverse "
                        <input type="color" id="colorR"
                            prop:value=move || color_r.get()
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                set_color_r.set(value.clone());
                                set_color(Direction::Reverse, value);
                            }/>
                    </label>
                </fieldset>
                <button id="resetZoomBtn" on:click=move |_| with_plot(api, set_status, |d| d.reset_zoom())>
                    "Reset zoom"
                </button>
                <button id="toggleThemeBtn" on:click=move |_| with_plot(api, set_status, |d| d.toggle_theme().map(|_| ()))>
                    {move || if theme.get() == Theme::Light { "Dark theme" } else { "Light theme" }}
                </button>
                <button id="exportBtn" on:click=move |_| with_plot(api, set_status, |d| d.export_html())>
                    "Export"
                </button>
                <fieldset>
                    <input type="number" id="qMin" placeholder="qMin"
                        prop:value=move || inputs.get().q_min
                        on:input=move |ev| set_inputs.update(|i| i.q_min = event_target_value(&ev))/>
                    <input type="number" id="qMax" placeholder="qMax"
                        prop:value=move || inputs.get().q_max
                        on:input=move |ev| set_inputs.update(|i| i.q_max = event_target_value(&ev))/>
                    <input type="number" id="tMin" placeholder="tMin"
                        prop:value=move || inputs.get().t_min
                        on:input=move |ev| set_inputs.update(|i| i.t_min = event_target_value(&ev))/>
                    <input type="number" id="tMax" placeholder="tMax"
                        prop:value=move || inputs.get().t_max
                        on:input=move |ev| set_inputs.update(|i| i.t_max = event_target_value(&ev))/>
                    <button id="applyZoom" on:click=apply_zoom>"Apply"</button>
                </fieldset>
                <span class="status">{move || status.get()}</span>
            </div>
            <div id=PLOT_CONTAINER_ID node_ref=container></div>
        </div>
    }
}
