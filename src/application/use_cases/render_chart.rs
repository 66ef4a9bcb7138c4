use crate::application::viewport::ViewportManager;
use crate::domain::{
    axis::axis_ticks,
    clipping::plan_segments,
    config::RenderConfig,
    dotplot::{Colors, Theme},
    errors::DotplotResult,
    logging::{LogComponent, get_logger},
    scene::{AxisGuide, AxisOrient, LinePrimitive, PlotLayout, Scene},
    state::Dataset,
};

/// Turns application state into a renderer-independent `Scene`
#[derive(Debug, Clone, Default)]
pub struct RenderChartUseCase {
    config: RenderConfig,
}

impl RenderChartUseCase {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn build_scene(
        &self,
        dataset: &Dataset,
        viewport: &ViewportManager,
        colors: &Colors,
        theme: Theme,
    ) -> DotplotResult<Scene> {
        let view = viewport.current().validated()?;
        let layout = PlotLayout::fit(&view, self.config.svg_size, self.config.axis_margin);
        let format = &self.config.number_format;

        let y_axis = AxisGuide {
            orient: AxisOrient::Vertical,
            length: layout.plot_height,
            margin: layout.axis_margin,
            ticks: axis_ticks(view.y, view.height, layout.plot_height, format)?,
        };
        let x_axis = AxisGuide {
            orient: AxisOrient::Horizontal,
            length: layout.plot_width,
            margin: layout.axis_margin,
            ticks: axis_ticks(view.x, view.width, layout.plot_width, format)?,
        };

        let plan =
            plan_segments(&dataset.segments, &view, &viewport.default_view(), &self.config.sampling);
        let rounded = viewport.zoom_ratio().wants_round_joins();
        let lines = plan
            .visible
            .iter()
            .map(|s| LinePrimitive {
                x1: s.x1,
                y1: s.y1,
                x2: s.x2,
                y2: s.y2,
                color: colors.for_direction(s.direction).to_string(),
                direction: s.direction,
                rounded,
                segment_id: s.id,
            })
            .collect::<Vec<_>>();

        get_logger().debug(
            LogComponent::Application("RenderChartUseCase"),
            &format!(
                "{:?} scene: {} lines, {} hit regions, plot {:.0}x{:.0}",
                plan.regime,
                lines.len(),
                plan.hits.len(),
                layout.plot_width,
                layout.plot_height
            ),
        );

        Ok(Scene {
            layout,
            view_box: view,
            theme,
            regime: plan.regime,
            inspectable: !viewport.zoom_allowed(),
            y_axis,
            x_axis,
            lines,
            hits: plan.hits,
        })
    }
}
