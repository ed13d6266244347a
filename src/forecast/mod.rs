//! Forecast Module
//!
//! Small-sample statistics behind the revenue forecast endpoint: least
//! squares over `x = index`, population standard deviation, trailing
//! moving average and a confidence score derived from the coefficient of
//! variation.

mod regression;

pub use regression::{
    confidence, forecast_revenue, linear_regression, mean, moving_average, predict_next_value,
    standard_deviation, Forecast, ForecastPoint, Prediction, Trend,
};
