use serde::Serialize;

/// Minimum history length before `predict_next_value` extrapolates.
const MIN_PREDICTION_POINTS: usize = 3;

/// Slope, relative to the mean, beyond which a series is trending.
const TREND_THRESHOLD: f64 = 0.05;

/// Per-period decay applied to forecast confidence.
const CONFIDENCE_DECAY: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub predicted_value: f64,
    /// 0-100
    pub confidence: u32,
    pub trend: Trend,
    pub slope: f64,
    pub intercept: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    /// 1-based offset past the last known period
    pub period: usize,
    pub value: f64,
    pub confidence: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub forecasts: Vec<ForecastPoint>,
    pub total_predicted: f64,
    pub slope: f64,
    pub intercept: f64,
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Least squares fit of `values[i]` against `i`, returned as
/// `(slope, intercept)`. Degenerate inputs fit as `(0, 0)`.
pub fn linear_regression(values: &[f64]) -> (f64, f64) {
    if values.len() < 2 {
        return (0.0, 0.0);
    }

    let n = values.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2) = (0.0, 0.0, 0.0, 0.0);
    for (i, &y) in values.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }

    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator == 0.0 {
        return (0.0, 0.0);
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;
    (slope, intercept)
}

/// Population standard deviation.
pub fn standard_deviation(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Trailing means over every full window of `window` values.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || window > values.len() {
        return Vec::new();
    }
    values.windows(window).map(mean).collect()
}

fn base_confidence(values: &[f64]) -> f64 {
    let avg = mean(values);
    if values.is_empty() || avg == 0.0 {
        return 0.0;
    }
    let cv = standard_deviation(values) / avg;
    (100.0 - cv * 100.0).clamp(0.0, 100.0)
}

/// Confidence score in 0..=100: lower spread relative to the mean scores
/// higher.
pub fn confidence(values: &[f64]) -> u32 {
    base_confidence(values).round() as u32
}

pub fn predict_next_value(values: &[f64]) -> Prediction {
    if values.len() < MIN_PREDICTION_POINTS {
        return Prediction {
            predicted_value: 0.0,
            confidence: 0,
            trend: Trend::Stable,
            slope: 0.0,
            intercept: 0.0,
        };
    }

    let (slope, intercept) = linear_regression(values);
    let predicted = slope * values.len() as f64 + intercept;

    let avg = mean(values);
    let trend = if slope > avg * TREND_THRESHOLD {
        Trend::Increasing
    } else if slope < -avg * TREND_THRESHOLD {
        Trend::Decreasing
    } else {
        Trend::Stable
    };

    Prediction {
        predicted_value: predicted.max(0.0),
        confidence: confidence(values),
        trend,
        slope,
        intercept,
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Extrapolates `periods` values past the end of `values`. Confidence
/// decays by 10% per period away from known data.
pub fn forecast_revenue(values: &[f64], periods: usize) -> Forecast {
    let (slope, intercept) = linear_regression(values);
    let base = base_confidence(values);

    let mut total = 0.0;
    let forecasts = (1..=periods)
        .map(|period| {
            let index = (values.len() + period - 1) as f64;
            let value = (slope * index + intercept).max(0.0);
            total += value;
            ForecastPoint {
                period,
                value: round_cents(value),
                confidence: (base * CONFIDENCE_DECAY.powi(period as i32 - 1)).round() as u32,
            }
        })
        .collect();

    Forecast {
        forecasts,
        total_predicted: round_cents(total),
        slope,
        intercept,
    }
}
