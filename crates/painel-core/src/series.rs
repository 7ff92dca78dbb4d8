//! # Chart Series
//!
//! Time series handed to the chart renderer. The core does not shape the
//! points (they come from the remote API as-is); it only tells an empty
//! series apart, so the dashboard shows "no data" instead of a flat zero.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One point of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        SeriesPoint {
            label: label.into(),
            value,
        }
    }
}

/// A chart series: either no data at all, or at least one point.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(tag = "kind", content = "points", rename_all = "camelCase")]
#[ts(export)]
pub enum ChartSeries {
    NoData,
    Points(Vec<SeriesPoint>),
}

impl ChartSeries {
    /// Wraps the points received from the data source.
    ///
    /// ```rust
    /// use painel_core::series::{ChartSeries, SeriesPoint};
    ///
    /// assert!(ChartSeries::from_points(vec![]).is_empty());
    ///
    /// let zero = ChartSeries::from_points(vec![SeriesPoint::new("Mar", 0.0)]);
    /// assert!(!zero.is_empty());
    /// ```
    pub fn from_points(points: Vec<SeriesPoint>) -> Self {
        if points.is_empty() {
            ChartSeries::NoData
        } else {
            ChartSeries::Points(points)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ChartSeries::NoData)
    }

    pub fn points(&self) -> &[SeriesPoint] {
        match self {
            ChartSeries::NoData => &[],
            ChartSeries::Points(points) => points,
        }
    }

    pub fn total(&self) -> f64 {
        self.points().iter().map(|p| p.value).sum()
    }
}

impl From<Vec<SeriesPoint>> for ChartSeries {
    fn from(points: Vec<SeriesPoint>) -> Self {
        ChartSeries::from_points(points)
    }
}
