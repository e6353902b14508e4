//! Line charts are drawn by a standalone page loaded into an iframe.
//!
//! The page exposes `window.render(container, payload)`; this module serializes
//! the aligned table and calls it whenever the payload or the iframe changes.

use contracts::shared::analytics::{chart_records, AlignedPoint, SeriesLabel};
use js_sys::{Function, Reflect};
use leptos::prelude::*;
use serde::Serialize;
use serde_json::{Map, Value};
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlIFrameElement;

const CHART_PAGE: &str = "assets/charts/line_chart.html";
const CHART_ROOT_ID: &str = "chart-root";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPayload {
    pub axis_field: String,
    pub records: Vec<Map<String, Value>>,
    pub series: Vec<SeriesLabel>,
    /// Tick labels, one per record; empty means "use the axis value"
    pub x_labels: Vec<String>,
    pub y_label: String,
}

impl ChartPayload {
    pub fn new(points: &[AlignedPoint], series: Vec<SeriesLabel>, axis_field: &str) -> Self {
        Self {
            axis_field: axis_field.to_string(),
            records: chart_records(points, axis_field),
            series,
            x_labels: Vec::new(),
            y_label: String::new(),
        }
    }

    /// Payload the renderer draws as its "no data" state
    pub fn empty(axis_field: &str) -> Self {
        Self::new(&[], Vec::new(), axis_field)
    }

    pub fn with_x_labels(mut self, labels: Vec<String>) -> Self {
        self.x_labels = labels;
        self
    }

    pub fn with_y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = label.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty() || self.series.is_empty()
    }
}

#[component]
pub fn ChartFrame(
    #[prop(into)] payload: Signal<Option<ChartPayload>>,
    #[prop(optional)] height: Option<u32>,
) -> impl IntoView {
    // HtmlIFrameElement is not Send+Sync, store locally
    let iframe_element = StoredValue::new_local(None::<HtmlIFrameElement>);
    let (iframe_loaded, set_iframe_loaded) = signal(false);
    let height = height.unwrap_or(420);

    Effect::new(move |_| {
        let current = payload_or_empty(payload.get());
        if !iframe_loaded.get() {
            return;
        }
        let Some(iframe) = iframe_element.get_value() else {
            return;
        };

        if let Err(err) = render_chart_in_iframe(&iframe, &current) {
            log::error!("Failed to render chart iframe: {:?}", err);
        }
    });

    view! {
        <iframe
            class="chart-frame"
            src=CHART_PAGE
            style=format!("width: 100%; height: {}px; border: none;", height)
            on:load=move |ev| {
                let iframe = ev
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlIFrameElement>().ok());
                iframe_element.set_value(iframe);
                set_iframe_loaded.set(true);
            }
        ></iframe>
    }
}

/// A missing chart still has to replace whatever the iframe drew last
fn payload_or_empty(payload: Option<ChartPayload>) -> ChartPayload {
    payload.unwrap_or_else(|| ChartPayload::empty("week"))
}

fn render_chart_in_iframe(iframe: &HtmlIFrameElement, payload: &ChartPayload) -> Result<(), JsValue> {
    let window = iframe
        .content_window()
        .ok_or_else(|| JsValue::from_str("Iframe window not available"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Iframe document not available"))?;
    let container = document
        .get_element_by_id(CHART_ROOT_ID)
        .ok_or_else(|| JsValue::from_str("chart-root element not found"))?;

    let render_value = Reflect::get(&window, &JsValue::from_str("render"))?;
    if !render_value.is_function() {
        return Err(JsValue::from_str("render is not a function"));
    }
    let render_fn: Function = render_value.dyn_into()?;
    let data_value = payload
        .serialize(&Serializer::json_compatible())
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

    render_fn.call2(&window, &container.into(), &data_value)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_movie::{MovieSeries, WeeklyRecord};
    use contracts::shared::analytics::{align, series_labels, AlignMode};

    #[test]
    fn test_missing_payload_renders_as_empty() {
        let payload = payload_or_empty(None);
        assert!(payload.is_empty());
        assert!(payload.records.is_empty());
        assert!(payload.series.is_empty());
    }

    #[test]
    fn test_present_payload_is_kept() {
        let series = vec![MovieSeries::new(3, "A", vec![WeeklyRecord::new(2024, 1, 10.0)])];
        let points = align(&series, AlignMode::Relative);
        let payload = ChartPayload::new(&points, series_labels(&series), "week");
        let kept = payload_or_empty(Some(payload.clone()));
        assert_eq!(kept, payload);
        assert!(!kept.is_empty());
    }
}
