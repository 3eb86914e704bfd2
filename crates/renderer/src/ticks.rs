//! Tick placement and tick-label formatting.

/// Multipliers tried for each power of ten.
const NICE_STEPS: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];

/// Smallest "nice" step giving at most `max_ticks` intervals over `span`.
pub fn nice_step(span: f64, max_ticks: usize) -> f64 {
    if !(span > 0.0) || !span.is_finite() {
        return 1.0;
    }
    let raw = span / max_ticks.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    NICE_STEPS
        .iter()
        .map(|s| s * magnitude)
        .find(|&step| step >= raw * (1.0 - 1e-9))
        .unwrap_or(10.0 * magnitude)
}

/// Tick positions on multiples of a nice step within `[min, max]`.
pub fn nice_ticks(min: f64, max: f64, max_ticks: usize) -> Vec<f64> {
    if !(max > min) {
        return vec![min];
    }
    let step = nice_step(max - min, max_ticks);
    let eps = step * 1e-9;
    let first = (min / step - 1e-9).ceil() as i64;
    let last = (max / step + 1e-9).floor() as i64;
    (first..=last)
        .map(|n| {
            let v = n as f64 * step;
            if v.abs() < eps {
                0.0
            } else {
                v
            }
        })
        .collect()
}

/// Longitude label such as `60°E` or `−120°E`.
pub fn format_longitude(lon: f64) -> String {
    unicode_minus(format!("{lon:.0}°E"))
}

/// `%.1e`-style label, e.g. `1.5e-05`.
pub fn format_scientific(value: f64) -> String {
    let s = format!("{value:.1e}");
    let Some((mantissa, exponent)) = s.split_once('e') else {
        return s;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exponent.abs())
}

/// Plain decimal label with as many decimals as `step` needs.
///
/// Values too large or too small for a readable plain label fall back to
/// scientific notation.
pub fn format_plain(value: f64, step: f64) -> String {
    let magnitude = value.abs().max(step.abs());
    if magnitude != 0.0 && !(1e-4..1e6).contains(&magnitude) {
        return unicode_minus(format_scientific(value));
    }
    let decimals = decimals_for(step);
    let value = if value.abs() < step.abs() * 1e-9 { 0.0 } else { value };
    unicode_minus(format!("{value:.decimals$}"))
}

fn decimals_for(step: f64) -> usize {
    if !(step > 0.0) {
        return 0;
    }
    (0..=10)
        .find(|&d| {
            let scaled = step * 10f64.powi(d as i32);
            (scaled - scaled.round()).abs() < 1e-6 * scaled.max(1.0)
        })
        .unwrap_or(10)
}

fn unicode_minus(s: String) -> String {
    s.replace('-', "\u{2212}")
}
