//! # Solution Grid Module
//!
//! ## Aim
//! Turns the solver's space-time grid into something a line chart can draw: one time
//! layer projected onto `(x, u)` points, plus summary numbers and the y-axis range.
//!
//! ## Main Data Structures and Logic
//! - `SolutionPayload`: the response body, kept as raw JSON values per field so that a
//!   wrongly shaped response still deserializes and is judged here instead
//! - `project()` / `project_with_diagnostics()`: the time-slice projection
//! - `summary()`: point/layer counts, first/last coordinates, global and slice extrema
//! - `y_axis_range()`: auto-scale (current slice) or fixed (whole simulation) range
//!
//! ## Interesting Features
//! - Nothing here returns an error. Missing arrays, short layers, `null` or non-numeric
//!   cells all degrade to fewer points or an empty series, and each anomaly is logged
//!   and reported back in `Projection::anomalies`.
//! - Advertised `timeSteps`/`spacePoints` are hints; indexing is bounded by the actual
//!   array lengths.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;

/// Response body of `POST /api/solve`. Absent fields deserialize to `Value::Null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionPayload {
    #[serde(default)]
    pub solution: Value,
    #[serde(default)]
    pub x_coordinates: Value,
    #[serde(default)]
    pub t_coordinates: Value,
    #[serde(default)]
    pub time_steps: Value,
    #[serde(default)]
    pub space_points: Value,
    #[serde(default)]
    pub min_value: Value,
    #[serde(default)]
    pub max_value: Value,
}

impl SolutionPayload {
    /// Well-formed payload from plain vectors. NaN cells end up as `null`.
    pub fn from_grid(
        solution: Vec<Vec<f64>>,
        x_coordinates: Vec<f64>,
        t_coordinates: Vec<f64>,
        min_value: Option<f64>,
        max_value: Option<f64>,
    ) -> Self {
        Self {
            time_steps: json!(solution.len()),
            space_points: json!(x_coordinates.len()),
            solution: json!(solution),
            x_coordinates: json!(x_coordinates),
            t_coordinates: json!(t_coordinates),
            min_value: json!(min_value),
            max_value: json!(max_value),
        }
    }

    /// `timeSteps` when it is a positive whole number.
    pub fn advertised_time_steps(&self) -> Option<usize> {
        as_count(&self.time_steps)
    }

    /// `spacePoints` when it is a positive whole number.
    pub fn advertised_space_points(&self) -> Option<usize> {
        as_count(&self.space_points)
    }

    /// Number of layers actually present, `None` when `solution` is not an array.
    pub fn layer_count(&self) -> Option<usize> {
        self.solution.as_array().map(|layers| layers.len())
    }

    /// Number of selectable time layers: the advertised count capped by the real
    /// one, or the real one when nothing usable is advertised.
    pub fn selectable_time_steps(&self) -> Option<usize> {
        let actual = self.layer_count()?;
        Some(match self.advertised_time_steps() {
            Some(declared) => declared.min(actual),
            None => actual,
        })
    }

    pub fn min_value(&self) -> Option<f64> {
        as_number(&self.min_value)
    }

    pub fn max_value(&self) -> Option<f64> {
        as_number(&self.max_value)
    }

    pub fn x_coordinate(&self, index: usize) -> Option<f64> {
        self.x_coordinates.get(index).and_then(as_number)
    }

    pub fn time_coordinate(&self, index: usize) -> Option<f64> {
        self.t_coordinates.get(index).and_then(as_number)
    }

    fn x_len(&self) -> Option<usize> {
        self.x_coordinates.as_array().map(|xs| xs.len())
    }

    fn t_len(&self) -> Option<usize> {
        self.t_coordinates.as_array().map(|ts| ts.len())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub x: f64,
    pub u: f64,
}

/// Something in the payload that cost the chart data.
#[derive(Debug, Clone, PartialEq)]
pub enum Anomaly {
    NoPayload,
    MissingSolution,
    SolutionNotSequence { found: &'static str },
    MissingXCoordinates,
    XCoordinatesNotSequence { found: &'static str },
    TimeStepsMismatch { declared: usize, actual: usize },
    LayerMissing { index: usize, available: usize },
    LayerNotSequence { index: usize, found: &'static str },
    SpacePointsBeyondCoordinates { declared: usize, available: usize },
    InvalidX { index: usize },
    InvalidU { index: usize },
}

impl Anomaly {
    /// Anomalies that leave the whole series empty.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Anomaly::TimeStepsMismatch { .. }
                | Anomaly::SpacePointsBeyondCoordinates { .. }
                | Anomaly::InvalidX { .. }
                | Anomaly::InvalidU { .. }
        )
    }
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::NoPayload => write!(f, "No solution data"),
            Anomaly::MissingSolution => write!(f, "No solution array in payload"),
            Anomaly::SolutionNotSequence { found } => {
                write!(f, "solution is not an array: {}", found)
            }
            Anomaly::MissingXCoordinates => write!(f, "No xCoordinates in payload"),
            Anomaly::XCoordinatesNotSequence { found } => {
                write!(f, "xCoordinates is not an array: {}", found)
            }
            Anomaly::TimeStepsMismatch { declared, actual } => write!(
                f,
                "timeSteps = {} but solution has {} layers",
                declared, actual
            ),
            Anomaly::LayerMissing { index, available } => {
                write!(f, "No data for time layer {} of {}", index, available)
            }
            Anomaly::LayerNotSequence { index, found } => {
                write!(f, "Time layer {} is not an array: {}", index, found)
            }
            Anomaly::SpacePointsBeyondCoordinates {
                declared,
                available,
            } => write!(
                f,
                "spacePoints = {} but only {} x coordinates",
                declared, available
            ),
            Anomaly::InvalidX { index } => write!(f, "Invalid x coordinate [{}]", index),
            Anomaly::InvalidU { index } => write!(f, "Invalid u value [{}]", index),
        }
    }
}

/// One projected time layer together with what went wrong while building it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    pub points: Vec<ChartPoint>,
    /// layer actually used after clamping, `None` when no layer could be selected
    pub time_index: Option<usize>,
    pub anomalies: Vec<Anomaly>,
}

impl Projection {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn record(&mut self, anomaly: Anomaly) {
        match anomaly {
            Anomaly::NoPayload => debug!("{}", anomaly),
            _ => warn!("{}", anomaly),
        }
        self.anomalies.push(anomaly);
    }

    fn abandon(mut self, anomaly: Anomaly) -> Self {
        self.record(anomaly);
        self.points.clear();
        self
    }
}

/// Points of the layer at `time_index`, in spatial order. Empty when the payload
/// gives nothing usable.
pub fn project(payload: Option<&SolutionPayload>, time_index: usize) -> Vec<ChartPoint> {
    project_with_diagnostics(payload, time_index).points
}

pub fn project_with_diagnostics(
    payload: Option<&SolutionPayload>,
    time_index: usize,
) -> Projection {
    let projection = Projection::default();
    let Some(payload) = payload else {
        return projection.abandon(Anomaly::NoPayload);
    };

    let layers = match &payload.solution {
        Value::Null => return projection.abandon(Anomaly::MissingSolution),
        Value::Array(layers) => layers,
        other => {
            return projection.abandon(Anomaly::SolutionNotSequence {
                found: json_type(other),
            });
        }
    };
    let xs = match &payload.x_coordinates {
        Value::Null => return projection.abandon(Anomaly::MissingXCoordinates),
        Value::Array(xs) => xs,
        other => {
            return projection.abandon(Anomaly::XCoordinatesNotSequence {
                found: json_type(other),
            });
        }
    };

    let mut projection = projection;
    if let Some(declared) = payload.advertised_time_steps() {
        if declared != layers.len() {
            projection.record(Anomaly::TimeStepsMismatch {
                declared,
                actual: layers.len(),
            });
        }
    }

    let available = payload.selectable_time_steps().unwrap_or(0);
    if available == 0 {
        return projection.abandon(Anomaly::LayerMissing {
            index: time_index,
            available,
        });
    }
    let index = time_index.min(available - 1);
    let layer = match layers.get(index) {
        None | Some(Value::Null) => {
            return projection.abandon(Anomaly::LayerMissing { index, available });
        }
        Some(Value::Array(layer)) => layer,
        Some(other) => {
            return projection.abandon(Anomaly::LayerNotSequence {
                index,
                found: json_type(other),
            });
        }
    };
    projection.time_index = Some(index);

    let declared = payload.advertised_space_points().unwrap_or(xs.len());
    if declared > xs.len() {
        projection.record(Anomaly::SpacePointsBeyondCoordinates {
            declared,
            available: xs.len(),
        });
    }
    for (i, raw_x) in xs.iter().enumerate().take(declared) {
        let Some(x) = as_number(raw_x) else {
            projection.record(Anomaly::InvalidX { index: i });
            continue;
        };
        let Some(u) = layer.get(i).and_then(as_number) else {
            projection.record(Anomaly::InvalidU { index: i });
            continue;
        };
        projection.points.push(ChartPoint { x, u });
    }

    debug!(
        "Chart data: time index {}, space points {}, {} points, first {:?}, last {:?}",
        index,
        declared,
        projection.points.len(),
        projection.points.first(),
        projection.points.last()
    );
    projection
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

/// Display numbers for the info panel next to the chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridSummary {
    /// advertised `spacePoints`, else the number of x coordinates
    pub space_points: Option<usize>,
    /// advertised `timeSteps`, else the number of layers
    pub time_steps: Option<usize>,
    pub x_first: Option<f64>,
    pub x_last: Option<f64>,
    pub t_first: Option<f64>,
    pub t_last: Option<f64>,
    /// solver-reported extrema over all layers
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub chart_points: usize,
    /// first and last x of the projected series
    pub slice_x_range: Option<AxisRange>,
    /// smallest and largest u of the projected series
    pub slice_u_range: Option<AxisRange>,
}

pub fn summary(payload: Option<&SolutionPayload>, series: &[ChartPoint]) -> GridSummary {
    let mut summary = GridSummary {
        chart_points: series.len(),
        slice_x_range: match (series.first(), series.last()) {
            (Some(first), Some(last)) => Some(AxisRange {
                min: first.x,
                max: last.x,
            }),
            _ => None,
        },
        slice_u_range: slice_u_range(series),
        ..GridSummary::default()
    };
    let Some(payload) = payload else {
        return summary;
    };

    summary.space_points = payload.advertised_space_points().or(payload.x_len());
    summary.time_steps = payload.advertised_time_steps().or(payload.layer_count());
    summary.x_first = payload.x_coordinate(0);
    summary.x_last = payload
        .x_len()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| payload.x_coordinate(i));
    summary.t_first = payload.time_coordinate(0);
    summary.t_last = payload
        .t_len()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| payload.time_coordinate(i));
    summary.min_value = payload.min_value();
    summary.max_value = payload.max_value();
    summary
}

/// Smallest and largest u in the series.
pub fn slice_u_range(series: &[ChartPoint]) -> Option<AxisRange> {
    let mut points = series.iter();
    let first = points.next()?;
    let (min, max) = points.fold((first.u, first.u), |(lo, hi), p| (lo.min(p.u), hi.max(p.u)));
    Some(AxisRange { min, max })
}

/// Horizontal extent of the series (data min to data max).
pub fn x_axis_range(series: &[ChartPoint]) -> Option<AxisRange> {
    let mut points = series.iter();
    let first = points.next()?;
    let (min, max) = points.fold((first.x, first.x), |(lo, hi), p| (lo.min(p.x), hi.max(p.x)));
    Some(AxisRange { min, max })
}

/// Vertical range of the chart.
///
/// With `auto_scale` the range follows the current slice. Without it each bound
/// comes from the solver's global `minValue`/`maxValue`, and a bound the solver did
/// not report falls back to the slice. `None` when a bound cannot be determined.
pub fn y_axis_range(
    payload: Option<&SolutionPayload>,
    series: &[ChartPoint],
    auto_scale: bool,
) -> Option<AxisRange> {
    let slice = slice_u_range(series);
    let (min, max) = if auto_scale {
        (slice.map(|r| r.min), slice.map(|r| r.max))
    } else {
        (
            payload
                .and_then(|p| p.min_value())
                .or(slice.map(|r| r.min)),
            payload
                .and_then(|p| p.max_value())
                .or(slice.map(|r| r.max)),
        )
    };
    Some(AxisRange {
        min: min?,
        max: max?,
    })
}

/// Numbers and numeric strings count as values; everything else is missing.
/// Quoted infinities are kept, quoted `NaN` is not.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| !v.is_nan()),
        _ => None,
    }
}

fn as_count(value: &Value) -> Option<usize> {
    let n = value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|v| *v >= 1.0 && v.fract() == 0.0)
            .map(|v| v as u64)
    })?;
    if n == 0 { None } else { usize::try_from(n).ok() }
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
