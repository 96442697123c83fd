// File: crates/candlestick-core/src/transform.rs
// Summary: Host rows -> chart model (data points, trend series, running value domain).

use crate::data::{DataTable, MeasureRole};
use crate::domain::DomainBuilder;
use crate::format::NumberFormat;
use crate::model::{ChartModel, DataPoint, TooltipEntry, TrendPoint, TrendSeriesMap};
use crate::palette::Palette;
use crate::selection::SelectionId;
use crate::settings::Settings;
use crate::types::Color;

/// Display name used for the category tooltip entry when the column has none.
pub const DEFAULT_CATEGORY_NAME: &str = "Axis";
/// Color of the category tooltip entry.
pub const CATEGORY_TOOLTIP_COLOR: Color = Color::rgb(0x33, 0x33, 0x33);

/// Build the chart model for one update.
///
/// Rows are visited in category order. A data point is created lazily on the
/// first non-null price value of its row, so rows with no open/close/high/low
/// produce nothing. Price values feed the running domain; trend values do not.
pub fn transform(table: Option<&DataTable>, settings: Settings, palette: &mut dyn Palette) -> ChartModel {
    let mut domain = DomainBuilder::from_axis(&settings.y_axis);
    let mut data_points = Vec::new();
    let mut trends = TrendSeriesMap::new();

    if let Some(table) = table.filter(|t| !t.measures.is_empty()) {
        let category_name = table.category_display_name().unwrap_or(DEFAULT_CATEGORY_NAME);

        for (row, category) in table.categories().iter().enumerate() {
            let mut point: Option<DataPoint> = None;

            for column in &table.measures {
                let Some(value) = column.value_at(row) else { continue };

                match column.role {
                    MeasureRole::Trend => {
                        if value == 0.0 {
                            continue;
                        }
                        trends.push_point(
                            &column.display_name,
                            TrendPoint { x: category.clone(), y: value },
                            || {
                                let fallback = palette.color_for(&column.display_name);
                                let color = column
                                    .objects
                                    .as_ref()
                                    .and_then(|o| o.get_fill("trendLines", "fill"))
                                    .unwrap_or(fallback);
                                (color, SelectionId::for_measure(column.query_name.clone()))
                            },
                        );
                    }
                    role => {
                        let p = point.get_or_insert_with(|| DataPoint {
                            category: category.clone(),
                            open: None,
                            close: None,
                            high: None,
                            low: None,
                            format: column.format.clone(),
                            selection_id: SelectionId::for_category(row),
                            tooltips: Vec::new(),
                        });
                        domain.observe(value);
                        p.set_price(role, value);
                        p.tooltips.push(TooltipEntry {
                            display_name: column.display_name.clone(),
                            value: NumberFormat::parse(column.format.as_deref()).format(value),
                            color: None,
                        });
                    }
                }
            }

            if let Some(mut p) = point {
                p.tooltips.insert(
                    0,
                    TooltipEntry {
                        display_name: category_name.to_string(),
                        value: p.category.readable(),
                        color: Some(CATEGORY_TOOLTIP_COLOR),
                    },
                );
                data_points.push(p);
            }
        }
    }

    let domain = domain.finalize();
    log::debug!(
        "transform: {} data points, {} trend series, domain [{}, {}]",
        data_points.len(),
        trends.len(),
        domain.start,
        domain.end
    );

    ChartModel { data_points, trends, domain, settings }
}
