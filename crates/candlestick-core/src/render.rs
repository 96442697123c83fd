// File: crates/candlestick-core/src/render.rs
// Summary: Pure render pass: chart model + viewport + text measurer -> laid out scene.

use crate::axis::{XAxisLayout, YAxisLayout};
use crate::candle::CandleMark;
use crate::format::ValueFormatter;
use crate::geometry::Rect;
use crate::model::ChartModel;
use crate::scale::{PlotGeometry, ValueScale, XScale};
use crate::scene::Scene;
use crate::text::TextMeasurer;
use crate::trend::TrendMark;
use crate::types::{Viewport, AXIS_BOTTOM_GAP, AXIS_PADDING, OUTER_MARGIN, POINT_MARGIN, SCROLLBAR_MARGIN};

/// Lay out one frame.
///
/// The value axis width is reserved first, the x axis is laid out and
/// measured next, and the vertical range of the value scale is what remains
/// below the top padding and above the measured x axis. A model without data
/// points yields an empty scene.
pub fn render(model: &ChartModel, viewport: Viewport, measurer: &dyn TextMeasurer) -> Scene {
    let points = &model.data_points;
    if points.is_empty() {
        log::debug!("render: no data points, nothing to draw");
        return Scene::empty(viewport);
    }
    let settings = &model.settings;
    let domain = &model.domain;

    let y_formatter = settings.y_axis.show.then(|| {
        ValueFormatter::new(
            points[0].format.as_deref(),
            settings.y_axis.unit,
            settings.y_axis.precision,
            domain.end,
        )
    });
    let y_axis_width = y_formatter
        .as_ref()
        .map_or(0.0, |f| YAxisLayout::reserved_width(f, domain.end, measurer));

    let plot = PlotGeometry::new(viewport, points.len());
    let category_is_date = model.category_is_date();

    let x_left = y_axis_width + AXIS_PADDING + plot.axis_margin;
    let x_right = plot.plot_width - plot.axis_margin;
    let x_scale = XScale::build(points, settings.x_axis.axis_type, x_left, x_right);

    let x_axis = settings.x_axis.show.then(|| {
        XAxisLayout::layout(&x_scale, &settings.x_axis, category_is_date, points.len(), &plot, measurer)
    });
    let x_axis_height = x_axis.as_ref().map_or(0.0, |a| a.height);

    let y_top = AXIS_PADDING + POINT_MARGIN;
    let y_bottom = plot.plot_height - AXIS_PADDING - SCROLLBAR_MARGIN - AXIS_BOTTOM_GAP - x_axis_height;
    let y_scale = ValueScale::for_domain(domain, y_top, y_bottom);

    let y_axis = y_formatter
        .as_ref()
        .map(|f| YAxisLayout::layout(&y_scale, f, &plot, y_axis_width, settings.y_axis.fill));

    let candles: Vec<CandleMark> = points
        .iter()
        .filter_map(|p| CandleMark::layout(p, &x_scale, &y_scale, domain, plot.ray, &settings.data_point))
        .collect();

    let trends: Vec<TrendMark> = model
        .trends
        .iter()
        .map(|s| TrendMark::layout(s, &x_scale, &y_scale, &settings.trend_lines))
        .collect();

    log::debug!(
        "render: {}x{} surface, {} of {} candles drawn, {} trends, x axis {:.1}px, y axis {:.1}px",
        plot.plot_width,
        plot.surface_height,
        candles.len(),
        points.len(),
        trends.len(),
        x_axis_height,
        y_axis_width
    );

    Scene {
        viewport,
        container: Rect::from_ltwh(OUTER_MARGIN.left, OUTER_MARGIN.top, plot.container.width, plot.container.height),
        width: plot.plot_width,
        height: plot.surface_height,
        x_axis,
        y_axis,
        candles,
        trends,
        vision: settings.color_blind.vision,
    }
}
