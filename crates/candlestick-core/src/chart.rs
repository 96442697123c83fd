// File: crates/candlestick-core/src/chart.rs
// Summary: Host-facing chart component: update/render cycle, settings enumeration, click selection.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::data::DataTable;
use crate::geometry::Point;
use crate::model::ChartModel;
use crate::palette::{DefaultPalette, Palette};
use crate::property::{fill_value, PropertyBag};
use crate::render::render;
use crate::scene::Scene;
use crate::selection::{Selection, SelectionId};
use crate::settings::Settings;
use crate::text::{ApproxTextMeasurer, TextMeasurer};
use crate::transform::transform;
use crate::types::Viewport;

/// One settings object instance reported back to the host's property pane.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectInstance {
    pub object_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub properties: Map<String, Value>,
    /// `None` for chart-wide properties.
    pub selector: Option<Value>,
}

impl ObjectInstance {
    fn chart_wide(object_name: &str, properties: Value) -> Self {
        Self {
            object_name: object_name.to_string(),
            display_name: None,
            properties: into_map(properties),
            selector: None,
        }
    }
}

fn into_map(v: Value) -> Map<String, Value> {
    match v {
        Value::Object(m) => m,
        _ => Map::new(),
    }
}

/// The candlestick visual. Each update rebuilds the model and the scene from
/// scratch; only the last model is kept, for settings enumeration.
pub struct CandlestickChart<P: Palette = DefaultPalette, M: TextMeasurer = ApproxTextMeasurer> {
    palette: P,
    measurer: M,
    model: ChartModel,
    scene: Option<Scene>,
    selection: Selection,
}

impl Default for CandlestickChart {
    fn default() -> Self {
        Self::new(DefaultPalette::default(), ApproxTextMeasurer::default())
    }
}

impl<P: Palette, M: TextMeasurer> CandlestickChart<P, M> {
    pub fn new(palette: P, measurer: M) -> Self {
        Self {
            palette,
            measurer,
            model: ChartModel::default(),
            scene: None,
            selection: Selection::new(),
        }
    }

    /// Rebuild from host data and settings, then lay out a fresh frame.
    /// Any previous selection is dropped together with the old marks.
    pub fn update(&mut self, table: Option<&DataTable>, objects: Option<&PropertyBag>, viewport: Viewport) -> &Scene {
        let settings = Settings::resolve(objects);
        self.model = transform(table, settings, &mut self.palette);
        self.selection.clear();
        self.scene.insert(render(&self.model, viewport, &self.measurer))
    }

    pub fn model(&self) -> &ChartModel {
        &self.model
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Toggle `id` in the selection and recompute every candle's opacity.
    pub fn select(&mut self, id: &SelectionId) -> &[SelectionId] {
        self.selection.toggle(id);
        if let Some(scene) = self.scene.as_mut() {
            scene.apply_selection(&self.selection);
        }
        log::debug!("selection: {:?}", self.selection.ids());
        self.selection.ids()
    }

    /// Select the candle under `p` (surface coordinates). Returns its id, if any.
    pub fn click(&mut self, p: Point) -> Option<SelectionId> {
        let id = self.scene.as_ref()?.hit_test(p)?.point.selection_id.clone();
        self.select(&id);
        Some(id)
    }

    /// Resolved settings for one object, shaped for the host's property pane.
    /// Unknown object names yield nothing.
    pub fn enumerate_objects(&self, object_name: &str) -> Vec<ObjectInstance> {
        let s = &self.model.settings;
        let mut out = Vec::new();
        match object_name {
            "xAxis" => {
                out.push(ObjectInstance::chart_wide(
                    object_name,
                    json!({
                        "show": s.x_axis.show,
                        "gridline": s.x_axis.gridline,
                        "fill": fill_value(s.x_axis.fill),
                    }),
                ));
                if self.model.category_is_date() {
                    out.push(ObjectInstance::chart_wide(object_name, json!({ "type": s.x_axis.axis_type.name() })));
                }
            }
            "yAxis" => out.push(ObjectInstance::chart_wide(
                object_name,
                json!({
                    "show": s.y_axis.show,
                    "start": s.y_axis.start,
                    "end": s.y_axis.end,
                    "fill": fill_value(s.y_axis.fill),
                    "unit": s.y_axis.unit,
                    "precision": s.y_axis.precision,
                }),
            )),
            "dataPoint" => {
                out.push(ObjectInstance::chart_wide(
                    object_name,
                    json!({
                        "bullishFill": fill_value(s.data_point.bullish_fill),
                        "bearishFill": fill_value(s.data_point.bearish_fill),
                        "highLowCaps": s.data_point.high_low_caps,
                        "showShadowsColor": s.data_point.show_shadows_color,
                    }),
                ));
                if s.data_point.show_shadows_color {
                    out.push(ObjectInstance::chart_wide(
                        object_name,
                        json!({ "shadowsFill": fill_value(s.data_point.shadows_fill) }),
                    ));
                }
            }
            "trendLines" => {
                out.push(ObjectInstance::chart_wide(
                    object_name,
                    json!({
                        "interpolation": s.trend_lines.interpolation.name(),
                        "weight": s.trend_lines.weight,
                    }),
                ));
                for series in &self.model.trends {
                    out.push(ObjectInstance {
                        object_name: object_name.to_string(),
                        display_name: Some(series.name.clone()),
                        properties: into_map(json!({ "fill": fill_value(series.color) })),
                        selector: Some(series.selection_id.selector()),
                    });
                }
            }
            "colorBlind" => out.push(ObjectInstance::chart_wide(
                object_name,
                json!({ "vision": s.color_blind.vision.name() }),
            )),
            other => log::debug!("enumerate: unknown object {other:?}"),
        }
        out
    }
}
