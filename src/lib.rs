#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod capture;
pub mod elements;
pub mod geom;
pub mod priority;

use std::fmt;

use capture::{GestureEvent, JointRecorder, RecorderOptions, RecorderOutcome};
use geom::{Point3, shift_start_point};
use priority::{ResolveOptions, SceneSnapshot};
use serde::Serialize;
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

#[macro_export]
macro_rules! debug_log {
    ($($t:tt)*) => {{
        #[cfg(feature = "debug_logs")]
        {
            #[cfg(target_arch = "wasm32")]
            {
                ::web_sys::console::log_1(&::wasm_bindgen::JsValue::from_str(&format!($($t)*)));
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                println!("{}", format!($($t)*));
            }
        }
    }};
}

#[derive(Debug, Serialize)]
struct ClosestPointExport {
    position: [f64; 3],
    index: usize,
    distance: f64,
}

#[derive(Debug, Serialize)]
struct ResolveExport<'a> {
    priority: &'a priority::PriorityMap,
    dropped: &'a [String],
    warnings: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OutcomeExport {
    Started { take: usize },
    Stopped { take: usize, samples: usize },
    Sampled { take: usize, samples: usize },
    Ignored,
}

impl From<RecorderOutcome> for OutcomeExport {
    fn from(outcome: RecorderOutcome) -> Self {
        match outcome {
            RecorderOutcome::Started { take } => Self::Started { take },
            RecorderOutcome::Stopped { take, samples } => Self::Stopped { take, samples },
            RecorderOutcome::Sampled { take, samples } => Self::Sampled { take, samples },
            RecorderOutcome::Ignored => Self::Ignored,
        }
    }
}

/// Host-facing resolver over a loaded scene snapshot.
#[wasm_bindgen]
pub struct PriorityEngine {
    scene: Option<SceneSnapshot>,
    threshold: Option<f64>,
}

#[wasm_bindgen]
impl PriorityEngine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> PriorityEngine {
        PriorityEngine {
            scene: None,
            threshold: None,
        }
    }

    /// Load a scene snapshot from its JSON description.
    #[wasm_bindgen]
    pub fn load_scene(&mut self, json: &str) -> Result<(), JsValue> {
        let scene = SceneSnapshot::from_json(json).map_err(to_js_error)?;
        debug_log!(
            "scene loaded: {} polylines, {} points",
            scene.polylines.len(),
            scene.points.len()
        );
        self.scene = Some(scene);
        Ok(())
    }

    /// Override the scene's assignment threshold.
    #[wasm_bindgen]
    pub fn set_threshold(&mut self, threshold: f64) -> Result<(), JsValue> {
        if threshold.is_nan() {
            return Err(js_error("threshold must be a number"));
        }
        self.threshold = Some(threshold);
        Ok(())
    }

    /// Resolve the loaded scene into per-curve priority lists.
    #[wasm_bindgen]
    pub fn resolve(&self) -> Result<JsValue, JsValue> {
        let scene = self.scene()?;
        let (priority, diagnostics) = scene.resolve(self.options()).map_err(to_js_error)?;

        let export = ResolveExport {
            priority: &priority,
            dropped: &diagnostics.assignment.dropped_points,
            warnings: diagnostics.warnings().collect(),
        };
        serde_wasm_bindgen::to_value(&export).map_err(|err| JsError::new(&err.to_string()).into())
    }

    /// Closest vertex of a polyline to a query point.
    #[wasm_bindgen]
    pub fn find_closest_point(
        &self,
        polyline_id: &str,
        x: f64,
        y: f64,
        z: f64,
    ) -> Result<JsValue, JsValue> {
        let polyline = self.polyline(polyline_id)?;
        let export = polyline
            .closest_point(Point3::new(x, y, z))
            .map(|hit| ClosestPointExport {
                position: hit.position.to_array(),
                index: hit.index,
                distance: hit.distance,
            });
        serde_wasm_bindgen::to_value(&export).map_err(|err| JsError::new(&err.to_string()).into())
    }

    /// Make vertex `new_start` the first vertex of an open polyline.
    #[wasm_bindgen]
    pub fn shift_start_point(&mut self, polyline_id: &str, new_start: usize) -> Result<(), JsValue> {
        let scene = self
            .scene
            .as_mut()
            .ok_or_else(|| js_error("no scene loaded"))?;
        let slot = scene
            .polylines
            .iter_mut()
            .find(|polyline| polyline.id() == polyline_id)
            .ok_or_else(|| js_error(&format!("unknown polyline `{polyline_id}`")))?;

        *slot = shift_start_point(slot, new_start).map_err(to_js_error)?;
        Ok(())
    }
}

impl Default for PriorityEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PriorityEngine {
    fn scene(&self) -> Result<&SceneSnapshot, JsValue> {
        self.scene.as_ref().ok_or_else(|| js_error("no scene loaded"))
    }

    fn polyline(&self, id: &str) -> Result<&geom::Polyline3, JsValue> {
        self.scene()?
            .polyline(id)
            .ok_or_else(|| js_error(&format!("unknown polyline `{id}`")))
    }

    fn options(&self) -> ResolveOptions {
        let options = self
            .scene
            .as_ref()
            .map_or_else(ResolveOptions::default, SceneSnapshot::options);
        match self.threshold {
            Some(threshold) => options.with_threshold(threshold),
            None => options,
        }
    }
}

/// Host-facing wrapper around [`JointRecorder`].
#[wasm_bindgen]
pub struct JointRecorderHandle {
    recorder: JointRecorder,
}

#[wasm_bindgen]
impl JointRecorderHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JointRecorderHandle {
        JointRecorderHandle {
            recorder: JointRecorder::new(RecorderOptions::default()),
        }
    }

    /// Feed one gesture event (`{ "type": "air_tap", ... }` or `{ "type": "joint", ... }`).
    #[wasm_bindgen]
    pub fn handle_event(&mut self, event: JsValue) -> Result<JsValue, JsValue> {
        let event: GestureEvent = serde_wasm_bindgen::from_value(event).map_err(to_js_error)?;
        let outcome = OutcomeExport::from(self.recorder.handle(&event));
        serde_wasm_bindgen::to_value(&outcome).map_err(|err| JsError::new(&err.to_string()).into())
    }

    #[wasm_bindgen]
    pub fn is_recording(&self) -> bool {
        self.recorder.state() == capture::RecorderState::Recording
    }

    /// The recorded takes as JSON, keyed by take number.
    #[wasm_bindgen]
    pub fn to_json(&self) -> Result<String, JsValue> {
        self.recorder.log().to_json().map_err(to_js_error)
    }
}

impl Default for JointRecorderHandle {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}
