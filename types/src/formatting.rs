//! Centralized number formatting utilities.
//!
//! Percent math for progress and utilization bars goes through this module so
//! every view renders the zero-denominator case the same way (0%, never NaN
//! or infinity).

/// Percentage of `part` over `total`, guarding the zero denominator.
///
/// # Examples
/// ```
/// use rollout_types::formatting::percent_of;
/// assert_eq!(percent_of(13.0, 52.0), 25.0);
/// assert_eq!(percent_of(5.0, 0.0), 0.0);
/// ```
pub fn percent_of(part: f64, total: f64) -> f64 {
    if total <= 0.0 {
        0.0
    } else {
        part * 100.0 / total
    }
}

/// Format a percentage with one decimal place and a `%` suffix.
///
/// # Examples
/// ```
/// use rollout_types::formatting::format_pct;
/// assert_eq!(format_pct(25.0), "25.0%");
/// assert_eq!(format_pct(66.666), "66.7%");
/// ```
pub fn format_pct(pct: f64) -> String {
    format!("{:.1}%", pct)
}

/// Format effort points compactly: whole values drop the fraction.
///
/// # Examples
/// ```
/// use rollout_types::formatting::format_points;
/// assert_eq!(format_points(13.0), "13");
/// assert_eq!(format_points(7.5), "7.5");
/// ```
pub fn format_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{:.0}", points)
    } else {
        format!("{:.1}", points)
    }
}
