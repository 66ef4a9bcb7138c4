use kurbo::Point;

use crate::application::selection::{PointerInput, SelectionInteraction, SelectionOutcome};
use crate::application::use_cases::RenderChartUseCase;
use crate::application::viewport::ViewportManager;
use crate::domain::{
    config::{RenderConfig, StateStore, UrlState},
    dotplot::{Colors, Direction, Theme, ViewBox, screen_to_data},
    errors::{DotplotError, DotplotResult},
    events::{DotplotEvent, EventDispatcher, InMemoryEventDispatcher},
    logging::{LogComponent, get_logger},
    scene::{RenderSurface, Scene},
    state::Dataset,
};

/// Everything the controller owns between events
#[derive(Debug, Clone)]
pub struct AppState {
    pub dataset: Option<Dataset>,
    pub viewport: Option<ViewportManager>,
    pub colors: Colors,
    pub theme: Theme,
    /// Mode requested before a dataset was loaded.
    pub zoom_allowed: bool,
    /// Pass-through values of the persisted state (job id, file names, factor).
    pub url: UrlState,
    pub last_scene: Option<Scene>,
}

impl AppState {
    fn from_url(url: UrlState) -> Self {
        Self {
            dataset: None,
            viewport: None,
            colors: url.colors.clone(),
            theme: url.theme,
            zoom_allowed: true,
            url,
            last_scene: None,
        }
    }
}

/// Single owner of the dotplot state. Every mutation goes through here and
/// ends in a synchronous re-render.
pub struct DotplotController<S: RenderSurface, P: StateStore> {
    state: AppState,
    surface: S,
    store: P,
    selection: SelectionInteraction,
    renderer: RenderChartUseCase,
    events: InMemoryEventDispatcher,
}

impl<S: RenderSurface, P: StateStore> DotplotController<S, P> {
    /// Restores colors, theme, job metadata and sampling factor from `store`.
    pub fn new(surface: S, store: P, mut config: RenderConfig) -> Self {
        let url = store.load();
        config.sampling = config.sampling.with_factor(url.factor);
        get_logger().info(
            LogComponent::Application("DotplotController"),
            &format!("created (job {:?}, theme {}, factor {})", url.id, url.theme, url.factor),
        );
        Self {
            state: AppState::from_url(url),
            surface,
            store,
            selection: SelectionInteraction::new(),
            renderer: RenderChartUseCase::new(config),
            events: InMemoryEventDispatcher::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    pub fn config(&self) -> &RenderConfig {
        self.renderer.config()
    }

    pub fn job_id(&self) -> Option<&str> {
        self.state.url.id.as_deref()
    }

    pub fn current_scene(&self) -> Option<&Scene> {
        self.state.last_scene.as_ref()
    }

    pub fn current_view(&self) -> Option<ViewBox> {
        self.state.viewport.as_ref().map(ViewportManager::current)
    }

    pub fn zoom_allowed(&self) -> bool {
        self.state.viewport.as_ref().map_or(self.state.zoom_allowed, ViewportManager::zoom_allowed)
    }

    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: Fn(&DotplotEvent) + 'static,
    {
        self.events.subscribe(handler);
    }

    /// Install a dataset: the default view becomes its extent, the persisted
    /// view (if any) seeds the current one, then the plot is drawn.
    pub fn load_dataset(&mut self, dataset: Dataset) -> DotplotResult<()> {
        let default_view = dataset.default_view;
        let mut viewport = ViewportManager::new(default_view, self.state.url.view_box);
        viewport.set_zoom_mode(self.state.zoom_allowed);

        let scene = match self.scene_for(&dataset, &viewport) {
            Err(e) if !viewport.is_default_view() => {
                get_logger().warn(
                    LogComponent::Application("DotplotController"),
                    &format!("persisted view dropped: {}", e),
                );
                viewport.reset_zoom();
                self.scene_for(&dataset, &viewport)?
            }
            built => built?,
        };

        self.events.publish(DotplotEvent::DatasetLoaded {
            segment_count: dataset.len(),
            skipped: dataset.skipped,
            default_view,
        });
        self.state.dataset = Some(dataset);
        self.state.viewport = Some(viewport);
        self.selection.reset();
        self.show(scene)
    }

    /// Rebuild the scene, present it, and persist the resulting state.
    pub fn render(&mut self) -> DotplotResult<()> {
        let (Some(dataset), Some(viewport)) = (&self.state.dataset, &self.state.viewport) else {
            return Err(DotplotError::NoData("nothing loaded yet".to_string()));
        };
        let scene = self.scene_for(dataset, viewport)?;
        self.show(scene)
    }

    fn scene_for(&self, dataset: &Dataset, viewport: &ViewportManager) -> DotplotResult<Scene> {
        self.renderer.build_scene(dataset, viewport, &self.state.colors, self.state.theme)
    }

    fn show(&mut self, scene: Scene) -> DotplotResult<()> {
        if let Err(e) = self.surface.present(&scene) {
            get_logger().warn(
                LogComponent::Application("DotplotController"),
                &format!("present failed: {}", e),
            );
            return Err(e);
        }

        let (lines, hits) = (scene.lines.len(), scene.hits.len());
        self.state.last_scene = Some(scene);
        self.persist();
        self.events.publish(DotplotEvent::Rendered { lines, hits });
        Ok(())
    }

    /// Current state as it is written to the URL.
    pub fn url_state(&self) -> UrlState {
        UrlState {
            view_box: self.current_view().or(self.state.url.view_box),
            colors: self.state.colors.clone(),
            theme: self.state.theme,
            ..self.state.url.clone()
        }
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.url_state()) {
            get_logger().warn(
                LogComponent::Application("DotplotController"),
                &format!("state not saved: {}", e),
            );
        }
    }

    fn viewport_mut(&mut self) -> DotplotResult<&mut ViewportManager> {
        self.state
            .viewport
            .as_mut()
            .ok_or_else(|| DotplotError::NoData("nothing loaded yet".to_string()))
    }

    /// Show `view_box`. A box that is degenerate or cannot be drawn is
    /// rejected and the previous view stays on screen.
    pub fn set_view_box(&mut self, view_box: ViewBox) -> DotplotResult<()> {
        let previous = self.viewport_mut()?.clone();
        let mut candidate = previous.clone();
        let old = candidate.set_view_box(view_box)?;
        let Some(dataset) = &self.state.dataset else {
            return Err(DotplotError::NoData("nothing loaded yet".to_string()));
        };
        let scene = self.scene_for(dataset, &candidate).inspect_err(|e| {
            get_logger().warn(
                LogComponent::Application("DotplotController"),
                &format!("view {} not drawable: {}", view_box.to_attribute(), e),
            );
        })?;

        self.state.viewport = Some(candidate);
        self.events.publish(DotplotEvent::ViewBoxChanged { old, new: view_box });
        if let Err(e) = self.show(scene) {
            self.state.viewport = Some(previous);
            return Err(e);
        }
        Ok(())
    }

    /// Zoom to typed bounds `[x_min, x_max] × [y_min, y_max]`.
    pub fn apply_manual_zoom(&mut self, x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> DotplotResult<()> {
        self.set_view_box(ViewBox::from_bounds(x_min, x_max, y_min, y_max)?)
    }

    pub fn reset_zoom(&mut self) -> DotplotResult<()> {
        let viewport = self.viewport_mut()?;
        let old = viewport.reset_zoom();
        let new = viewport.current();
        if old != new {
            self.events.publish(DotplotEvent::ViewBoxChanged { old, new });
        }
        self.render()
    }

    /// `true`: dragging zooms. `false`: map mode, clicking a segment inspects it.
    pub fn set_zoom_mode(&mut self, allowed: bool) -> DotplotResult<()> {
        self.state.zoom_allowed = allowed;
        self.events.publish(DotplotEvent::ZoomModeChanged { zoom_allowed: allowed });
        match self.state.viewport.as_mut() {
            Some(viewport) => {
                viewport.set_zoom_mode(allowed);
                if !allowed && self.selection.reset() {
                    self.surface.show_selection(None);
                }
                self.render()
            }
            None => Ok(()),
        }
    }

    pub fn set_color(&mut self, direction: Direction, color: &str) -> DotplotResult<()> {
        self.state.colors.set(direction, color);
        self.render_if_loaded()
    }

    pub fn toggle_theme(&mut self) -> DotplotResult<Theme> {
        self.state.theme = self.state.theme.toggled();
        self.events.publish(DotplotEvent::ThemeChanged { theme: self.state.theme });
        self.render_if_loaded()?;
        Ok(self.state.theme)
    }

    fn render_if_loaded(&mut self) -> DotplotResult<()> {
        if self.state.viewport.is_some() {
            self.render()
        } else {
            self.persist();
            Ok(())
        }
    }

    /// Screen point to data point under the current view.
    pub fn screen_to_data(&self, point: Point) -> Option<Point> {
        screen_to_data(point, &self.surface)
    }

    /// Drive the drag-to-zoom interaction. Presses are ignored in map mode.
    pub fn handle_pointer(&mut self, input: PointerInput) -> SelectionOutcome {
        if self.state.viewport.is_none()
            || (matches!(input, PointerInput::Down(_)) && !self.zoom_allowed())
        {
            return SelectionOutcome::Ignored;
        }

        let surface = &self.surface;
        let outcome = self.selection.handle(input, |p| screen_to_data(p, surface));
        match outcome {
            SelectionOutcome::Started(rect) | SelectionOutcome::Updated(rect) => {
                self.surface.show_selection(Some(rect));
                self.events.publish(DotplotEvent::SelectionChanged { selection: rect });
            }
            SelectionOutcome::Committed(rect) => {
                self.surface.show_selection(None);
                self.events.publish(DotplotEvent::SelectionCleared);
                if let Err(e) = self.set_view_box(rect) {
                    get_logger().warn(
                        LogComponent::Application("DotplotController"),
                        &format!("selection not applied: {}", e),
                    );
                }
            }
            SelectionOutcome::Discarded => {
                self.surface.show_selection(None);
                self.events.publish(DotplotEvent::SelectionCleared);
            }
            SelectionOutcome::Ignored => {}
        }
        outcome
    }

    /// Detail page for a clicked segment, in map mode only.
    pub fn segment_clicked(&mut self, segment_id: u32) -> Option<String> {
        if self.zoom_allowed() {
            return None;
        }
        let Some(job_id) = self.job_id() else {
            get_logger().warn(
                LogComponent::Application("DotplotController"),
                &format!("segment {} clicked without a job id", segment_id),
            );
            return None;
        };
        let url = self.renderer.config().detail_link(job_id, segment_id);
        get_logger().info(
            LogComponent::Application("DotplotController"),
            &format!("inspect segment {}", segment_id),
        );
        self.events.publish(DotplotEvent::SegmentInspected { segment_id, url: url.clone() });
        Some(url)
    }
}
