use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;

use js_sys::Promise;
use kurbo::Point;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::EventTarget;

use crate::application::{
    DotplotController,
    use_cases::{LoadDatasetUseCase, dataset_from_text},
};
use crate::domain::{
    config::{LoaderConfig, RenderConfig},
    dotplot::{Colors, Direction, Theme, ViewBox},
    errors::{DotplotError, DotplotResult},
    events::DotplotEvent,
    logging::LogComponent,
};
use crate::event_utils::{ListenerHandle, listen_pointer, listen_segment_clicks};
use crate::infrastructure::{
    HttpCoordinateSource, SvgDomSurface, UrlStateStore,
    export::{open_in_new_tab, standalone_html},
    rendering::svg_tree::combined_svg,
};
use crate::{log_error, log_info, log_warn};

type SharedController = Rc<RefCell<DotplotController<SvgDomSurface, UrlStateStore>>>;

const COMPONENT: LogComponent = LogComponent::Presentation("DotplotApi");

fn open_detail(url: &str) {
    let opened = web_sys::window().map(|w| w.open_with_url_and_target(url, "_blank"));
    if !matches!(opened, Some(Ok(Some(_)))) {
        log_warn!(COMPONENT, "could not open {}", url);
    }
}

fn wire_listeners(controller: &SharedController, plot: &EventTarget) -> Vec<ListenerHandle> {
    let weak = Rc::downgrade(controller);
    let pointer = listen_pointer(plot, move |input| {
        let Some(controller) = weak.upgrade() else {
            return;
        };
        // Re-entrant events (a render in progress) are dropped.
        if let Ok(mut controller) = controller.try_borrow_mut() {
            controller.handle_pointer(input);
        }
    });

    let weak = Rc::downgrade(controller);
    let clicks = listen_segment_clicks(plot, move |segment_id| {
        let Some(controller) = weak.upgrade() else {
            return;
        };
        let url = match controller.try_borrow_mut() {
            Ok(mut controller) => controller.segment_clicked(segment_id),
            Err(_) => None,
        };
        if let Some(url) = url {
            open_detail(&url);
        }
    });

    vec![pointer, clicks]
}

async fn load_into(controller: SharedController, loader_config: LoaderConfig) -> DotplotResult<usize> {
    let job_id = controller
        .borrow()
        .job_id()
        .map(str::to_string)
        .ok_or_else(|| DotplotError::NoData("no job id in the URL".to_string()))?;
    let source = HttpCoordinateSource::new(loader_config);
    let dataset = match LoadDatasetUseCase::new(source).execute(&job_id).await {
        Ok(dataset) => dataset,
        Err(e) => {
            log_error!(COMPONENT, "job {} not loaded: {}", job_id, e);
            return Err(e);
        }
    };
    let count = dataset.len();
    controller.borrow_mut().load_dataset(dataset)?;
    Ok(count)
}

/// JavaScript entry point: one dotplot drawn into a container element, with
/// its state mirrored in the page URL.
#[wasm_bindgen]
pub struct DotplotApi {
    controller: SharedController,
    loader_config: LoaderConfig,
    _listeners: Vec<ListenerHandle>,
}

#[wasm_bindgen]
impl DotplotApi {
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str) -> Result<DotplotApi, JsValue> {
        Self::with_config(container_id, RenderConfig::default(), LoaderConfig::default())
            .map_err(JsValue::from)
    }

    /// Fetch the coordinate file of the job named in the URL and draw it.
    /// Resolves to the number of distinct segments.
    pub fn load(&self) -> Promise {
        let job = self.load_job();
        future_to_promise(async move {
            let count = job.await?;
            Ok(JsValue::from(count as u32))
        })
    }

    /// Draw coordinates the host already has, in the five-line format.
    #[wasm_bindgen(js_name = loadText)]
    pub fn load_text(&self, text: &str) -> Result<u32, JsValue> {
        let dataset = dataset_from_text(text)?;
        let count = dataset.len() as u32;
        self.controller.borrow_mut().load_dataset(dataset)?;
        Ok(count)
    }

    pub fn render(&self) -> Result<(), JsValue> {
        Ok(self.controller.borrow_mut().render()?)
    }

    #[wasm_bindgen(js_name = setViewBox)]
    pub fn set_view_box(&self, x: f64, y: f64, width: f64, height: f64) -> Result<(), JsValue> {
        Ok(self.controller.borrow_mut().set_view_box(ViewBox::new(x, y, width, height))?)
    }

    #[wasm_bindgen(js_name = applyManualZoom)]
    pub fn apply_manual_zoom(&self, x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<(), JsValue> {
        Ok(self.controller.borrow_mut().apply_manual_zoom(x_min, x_max, y_min, y_max)?)
    }

    #[wasm_bindgen(js_name = resetZoom)]
    pub fn reset_zoom(&self) -> Result<(), JsValue> {
        Ok(self.controller.borrow_mut().reset_zoom()?)
    }

    #[wasm_bindgen(js_name = setZoomMode)]
    pub fn set_zoom_mode(&self, allowed: bool) -> Result<(), JsValue> {
        Ok(self.controller.borrow_mut().set_zoom_mode(allowed)?)
    }

    #[wasm_bindgen(js_name = zoomAllowed)]
    pub fn zoom_allowed(&self) -> bool {
        self.controller.borrow().zoom_allowed()
    }

    /// `[x, y]` in data space, or `undefined` while the plot is detached.
    #[wasm_bindgen(js_name = screenToData)]
    pub fn screen_to_data(&self, client_x: f64, client_y: f64) -> Option<Vec<f64>> {
        let point = self.controller.borrow().screen_to_data(Point::new(client_x, client_y))?;
        Some(vec![point.x, point.y])
    }

    /// Current view as the JSON stored under `viewBox`.
    #[wasm_bindgen(js_name = viewBox)]
    pub fn view_box(&self) -> Option<String> {
        let view = self.controller.borrow().current_view()?;
        serde_json::to_string(&view).ok()
    }

    /// `direction` is `"f"` or `"r"`.
    #[wasm_bindgen(js_name = setColor)]
    pub fn set_color(&self, direction: &str, color: &str) -> Result<(), JsValue> {
        let direction = Direction::from_str(direction)
            .map_err(|_| JsValue::from_str(&format!("unknown direction {:?}", direction)))?;
        Ok(self.controller.borrow_mut().set_color(direction, color)?)
    }

    /// Returns the new theme name.
    #[wasm_bindgen(js_name = toggleTheme)]
    pub fn toggle_theme(&self) -> Result<String, JsValue> {
        Ok(self.controller.borrow_mut().toggle_theme()?.to_string())
    }

    /// Combined SVG markup of the current plot.
    #[wasm_bindgen(js_name = exportSvg)]
    pub fn export_svg(&self) -> Option<String> {
        self.controller.borrow().current_scene().map(|scene| combined_svg(scene).to_markup())
    }

    /// Open the current plot as a standalone page in a new tab.
    #[wasm_bindgen(js_name = exportHtml)]
    pub fn export_html(&self) -> Result<(), JsValue> {
        let html = self
            .controller
            .borrow()
            .current_scene()
            .map(standalone_html)
            .ok_or_else(|| DotplotError::NoData("nothing rendered yet".to_string()))?;
        Ok(open_in_new_tab(&html)?)
    }
}

impl DotplotApi {
    pub fn with_config(
        container_id: &str,
        render_config: RenderConfig,
        loader_config: LoaderConfig,
    ) -> DotplotResult<Self> {
        let surface = SvgDomSurface::new(container_id)?;
        let plot = surface.plot_element().clone();
        let controller = Rc::new(RefCell::new(DotplotController::new(
            surface,
            UrlStateStore,
            render_config,
        )));
        let listeners = wire_listeners(&controller, &plot);
        log_info!(COMPONENT, "ready in #{} ({} listener groups)", container_id, listeners.len());
        Ok(Self { controller, loader_config, _listeners: listeners })
    }

    /// Fetch and draw the job named in the URL.
    pub fn load_job(&self) -> impl Future<Output = DotplotResult<usize>> + 'static {
        load_into(self.controller.clone(), self.loader_config.clone())
    }

    /// Observe controller events from Rust (the control panel).
    pub fn subscribe<F>(&self, handler: F)
    where
        F: Fn(&DotplotEvent) + 'static,
    {
        self.controller.borrow_mut().subscribe(handler);
    }

    pub fn theme(&self) -> Theme {
        self.controller.borrow().state().theme
    }

    pub fn colors(&self) -> Colors {
        self.controller.borrow().state().colors.clone()
    }

    pub fn current_view(&self) -> Option<ViewBox> {
        self.controller.borrow().current_view()
    }
}
