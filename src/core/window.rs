//! Rolling wrap-around month windows: the optimal tilt for every
//! `W`-month period starting at each calendar month.

use enumset::EnumSet;
use itertools::Itertools;

use crate::{
    core::{
        engine::{Engine, OptimalTilt},
        month::Month,
    },
    dataset::SkyCondition,
};

pub struct WindowOptimum {
    /// `"Nov-Jan"`-style label formed from the first and last month.
    pub label: String,
    pub months: Vec<Month>,
    pub optimum: OptimalTilt,
}

/// Twelve windows, ordered by start month; a window reaching past December
/// wraps back to January.
pub fn analyze_sliding_window(
    engine: &Engine,
    window_size: u32,
    sky: SkyCondition,
) -> Vec<WindowOptimum> {
    Month::ALL
        .iter()
        .map(|start| {
            let months = (0..window_size).map(|steps| start.step(steps)).collect_vec();
            let label = format!(
                "{}-{}",
                months[0].short_name(),
                months[months.len() - 1].short_name()
            );
            let set: EnumSet<Month> = months.iter().copied().collect();
            let optimum = engine.find_optimal_tilt(set, sky);
            WindowOptimum { label, months, optimum }
        })
        .collect_vec()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::{
        core::engine::SiteConfig,
        dataset::{Dataset, HourlyRecord},
    };

    /// Diffuse-only records so every tilt ties and totals are plain sums.
    fn engine() -> Engine {
        let records = vec![
            HourlyRecord::new(Month::Jan, 10.0, 0.0, 10.0, 0.0, 0.0),
            HourlyRecord::new(Month::Feb, 20.0, 0.0, 20.0, 0.0, 0.0),
            HourlyRecord::new(Month::Nov, 40.0, 0.0, 40.0, 0.0, 0.0),
            HourlyRecord::new(Month::Dec, 80.0, 0.0, 80.0, 0.0, 0.0),
        ];
        Engine::builder()
            .dataset(Dataset::from_records(records))
            .site(SiteConfig::builder().build())
            .build()
    }

    #[test]
    fn twelve_windows_ordered_by_start_month() {
        let windows = analyze_sliding_window(&engine(), 3, SkyCondition::Cloudy);
        assert_eq!(windows.len(), 12);
        assert_eq!(windows[0].label, "Jan-Mar");
        assert_eq!(windows[11].label, "Dec-Feb");
    }

    #[test]
    fn window_wraps_the_year_boundary() {
        let windows = analyze_sliding_window(&engine(), 3, SkyCondition::Cloudy);
        let november = &windows[10];
        assert_eq!(november.label, "Nov-Jan");
        assert_eq!(november.months, vec![Month::Nov, Month::Dec, Month::Jan]);
        // Nov + Dec + Jan records, and nothing from February.
        assert_relative_eq!(november.optimum.total.0, 130.0);
        assert_eq!(november.optimum.tilt_degrees, 0);
    }

    #[test]
    fn single_month_windows() {
        let windows = analyze_sliding_window(&engine(), 1, SkyCondition::Cloudy);
        assert_eq!(windows[0].label, "Jan-Jan");
        assert_relative_eq!(windows[0].optimum.total.0, 10.0);
    }
}
