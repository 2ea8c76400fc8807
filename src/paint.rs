//! Traffic coloring for the rendered path.

use serde::Serialize;
use serde_json::{json, Value};

use crate::trip::Trip;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficLevel {
    Fast,
    Moderate,
    Slow,
    Heavy,
}

impl TrafficLevel {
    pub fn color(self) -> &'static str {
        match self {
            TrafficLevel::Fast => "#2ecc71",
            TrafficLevel::Moderate => "#f1c40f",
            TrafficLevel::Slow => "#e67e22",
            TrafficLevel::Heavy => "#e74c3c",
        }
    }

    /// Live over typical duration.
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio <= 1.1 {
            TrafficLevel::Fast
        } else if ratio <= 1.3 {
            TrafficLevel::Moderate
        } else if ratio <= 1.6 {
            TrafficLevel::Slow
        } else {
            TrafficLevel::Heavy
        }
    }

    /// Provider congestion labels. Unknown labels read as free-flowing.
    pub fn from_congestion(label: &str) -> Self {
        match label {
            "moderate" => TrafficLevel::Moderate,
            "heavy" => TrafficLevel::Slow,
            "severe" => TrafficLevel::Heavy,
            _ => TrafficLevel::Fast,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorStop {
    /// Normalized position along the path, 0..=1.
    pub progress: f64,
    pub level: TrafficLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorRamp {
    pub stops: Vec<ColorStop>,
}

impl ColorRamp {
    fn from_levels(levels: Vec<TrafficLevel>) -> Self {
        let n = levels.len();
        let stops = levels
            .into_iter()
            .enumerate()
            .map(|(i, level)| ColorStop {
                progress: if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 },
                level,
            })
            .collect();
        Self { stops }
    }

    /// Map-style `line-gradient` expression interpolated over line progress.
    pub fn to_line_gradient(&self) -> Value {
        let mut expression = vec![json!("interpolate"), json!(["linear"]), json!(["line-progress"])];
        for stop in &self.stops {
            expression.push(json!(stop.progress));
            expression.push(json!(stop.level.color()));
        }
        Value::Array(expression)
    }
}

fn duration_ratio(live: f64, typical: f64) -> f64 {
    if typical > 0.0 && typical.is_finite() && live.is_finite() {
        live / typical
    } else {
        1.0
    }
}

/// `None` means the caller keeps its static gradient.
pub fn map_to_paint(live: &Trip, typical: Option<&Trip>) -> Option<ColorRamp> {
    if let Some(typical) = typical.filter(|t| !t.legs.is_empty()) {
        if !live.legs.is_empty() {
            let levels = live
                .legs
                .iter()
                .enumerate()
                .map(|(i, leg)| {
                    let ratio = typical
                        .legs
                        .get(i)
                        .map(|base| duration_ratio(leg.duration, base.duration))
                        .unwrap_or(1.0);
                    TrafficLevel::from_ratio(ratio)
                })
                .collect();
            return Some(ColorRamp::from_levels(levels));
        }
    }

    let congestion: Vec<TrafficLevel> = live
        .legs
        .iter()
        .filter_map(|leg| leg.annotation.as_ref())
        .flat_map(|annotation| annotation.congestion.iter())
        .map(|label| TrafficLevel::from_congestion(label))
        .collect();

    if congestion.is_empty() {
        None
    } else {
        Some(ColorRamp::from_levels(congestion))
    }
}
