use crate::time_series::WpmSample;

/// Compute X (seconds) and Y (WPM) bounds for the results chart
pub fn compute_chart_params(samples: &[WpmSample], seconds_remaining: Option<f64>) -> (f64, f64) {
    let mut highest_wpm = 0.0;
    for sample in samples {
        if sample.wpm > highest_wpm {
            highest_wpm = sample.wpm;
        }
    }

    let mut overall_duration = match samples.last() {
        Some(sample) => sample.t,
        None => seconds_remaining.unwrap_or(1.0),
    };
    if overall_duration < 1.0 {
        overall_duration = 1.0;
    }

    (overall_duration, highest_wpm.round())
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_chart_params_empty() {
        let (x, y) = compute_chart_params(&[], Some(5.0));
        assert_eq!(x, 5.0);
        assert_eq!(y, 0.0);
    }

    #[test]
    fn test_compute_chart_params_from_samples() {
        let samples = vec![
            WpmSample::new(1.0, 30.0),
            WpmSample::new(2.0, 55.4),
            WpmSample::new(3.5, 48.0),
        ];
        let (x, y) = compute_chart_params(&samples, None);
        assert_eq!(x, 3.5);
        assert_eq!(y, 55.0);
    }

    #[test]
    fn test_format_label() {
        assert_eq!(format_label(1.0), "1");
        assert_eq!(format_label(1.2345), "1.23");
    }
}
