//! The six named tilt policies. Plain data-producing functions over the
//! engine's two primitives — no state of their own, no dynamic dispatch.

use enumset::EnumSet;
use itertools::Itertools;

use crate::{
    core::{
        engine::{Engine, OptimalTilt, SiteConfig},
        month::Month,
    },
    dataset::SkyCondition,
    quantity::WattHoursPerSquareMetre,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Arrangement {
    /// Constant 0° all year.
    FixedHorizontal,

    /// Constant tilt equal to the site latitude.
    FixedLatitude,

    /// `latitude − axial/2` over the summer months, `latitude + axial/2`
    /// over the winter months.
    TwoSeasonFixed,

    /// Independent optimal tilt for each calendar month.
    MonthlyOptimal,

    /// One optimal tilt for summer, one for winter.
    TwoSeasonOptimal,

    /// A single optimal tilt for the whole year.
    AnnualOptimal,
}

impl Arrangement {
    pub const ALL: [Self; 6] = [
        Self::FixedHorizontal,
        Self::FixedLatitude,
        Self::TwoSeasonFixed,
        Self::MonthlyOptimal,
        Self::TwoSeasonOptimal,
        Self::AnnualOptimal,
    ];

    pub fn label(self, site: &SiteConfig) -> String {
        match self {
            Self::FixedHorizontal => "1: 0° fixed".to_owned(),
            Self::FixedLatitude => {
                format!("2: {:.0}° fixed (latitude)", site.latitude_degrees)
            }
            Self::TwoSeasonFixed => {
                format!("3: two fixed (latitude ± {:.1}°)", site.axial_tilt_degrees / 2.0)
            }
            Self::MonthlyOptimal => "4: monthly optimal".to_owned(),
            Self::TwoSeasonOptimal => "5: two-season optimal".to_owned(),
            Self::AnnualOptimal => "6: annual optimal".to_owned(),
        }
    }

    /// Annual total: the sum of this arrangement's sub-period totals.
    pub fn annual_total(self, engine: &Engine, sky: SkyCondition) -> WattHoursPerSquareMetre {
        let site = *engine.site();
        let year = EnumSet::all();
        match self {
            Self::FixedHorizontal => engine.compute_ghi(0.0, year, sky),
            Self::FixedLatitude => engine.compute_ghi(site.latitude_degrees, year, sky),
            Self::TwoSeasonFixed => {
                engine.compute_ghi(site.summer_tilt_degrees(), site.summer_months, sky)
                    + engine.compute_ghi(site.winter_tilt_degrees(), site.winter_months(), sky)
            }
            Self::MonthlyOptimal => Month::ALL
                .iter()
                .map(|month| engine.find_optimal_tilt(EnumSet::only(*month), sky).total)
                .sum(),
            Self::TwoSeasonOptimal => {
                engine.find_optimal_tilt(site.summer_months, sky).total
                    + engine.find_optimal_tilt(site.winter_months(), sky).total
            }
            Self::AnnualOptimal => engine.find_optimal_tilt(year, sky).total,
        }
    }

    /// The tilt this arrangement applies in each calendar month, for the
    /// tilt-strategy timeline chart.
    pub fn monthly_tilts(self, engine: &Engine, sky: SkyCondition) -> [f64; 12] {
        let site = *engine.site();
        match self {
            Self::FixedHorizontal => [0.0; 12],
            Self::FixedLatitude => [site.latitude_degrees; 12],
            Self::TwoSeasonFixed => Month::ALL.map(|month| {
                if site.summer_months.contains(month) {
                    site.summer_tilt_degrees()
                } else {
                    site.winter_tilt_degrees()
                }
            }),
            Self::MonthlyOptimal => Month::ALL.map(|month| {
                f64::from(engine.find_optimal_tilt(EnumSet::only(month), sky).tilt_degrees)
            }),
            Self::TwoSeasonOptimal => {
                let summer =
                    f64::from(engine.find_optimal_tilt(site.summer_months, sky).tilt_degrees);
                let winter =
                    f64::from(engine.find_optimal_tilt(site.winter_months(), sky).tilt_degrees);
                Month::ALL.map(|month| {
                    if site.summer_months.contains(month) { summer } else { winter }
                })
            }
            Self::AnnualOptimal => {
                [f64::from(engine.find_optimal_tilt(EnumSet::all(), sky).tilt_degrees); 12]
            }
        }
    }

    /// GHI collected in each calendar month under this arrangement's tilt
    /// schedule.
    pub fn monthly_ghi(
        self,
        engine: &Engine,
        sky: SkyCondition,
    ) -> [WattHoursPerSquareMetre; 12] {
        let tilts = self.monthly_tilts(engine, sky);
        std::array::from_fn(|index| {
            engine.compute_ghi(tilts[index], EnumSet::only(Month::ALL[index]), sky)
        })
    }
}

/// One row of the annual comparison report.
pub struct ArrangementTotals {
    pub label: String,
    pub cloudy: WattHoursPerSquareMetre,
    pub clear: WattHoursPerSquareMetre,
}

pub fn evaluate_all(engine: &Engine) -> Vec<ArrangementTotals> {
    Arrangement::ALL
        .iter()
        .map(|arrangement| ArrangementTotals {
            label: arrangement.label(engine.site()),
            cloudy: arrangement.annual_total(engine, SkyCondition::Cloudy),
            clear: arrangement.annual_total(engine, SkyCondition::Clear),
        })
        .collect_vec()
}

/// One row of the per-month optimal tilt schedule.
pub struct MonthlyOptimum {
    pub month: Month,
    pub cloudy: OptimalTilt,
    pub clear: OptimalTilt,
}

pub fn monthly_optima(engine: &Engine) -> Vec<MonthlyOptimum> {
    Month::ALL
        .iter()
        .map(|month| MonthlyOptimum {
            month: *month,
            cloudy: engine.find_optimal_tilt(EnumSet::only(*month), SkyCondition::Cloudy),
            clear: engine.find_optimal_tilt(EnumSet::only(*month), SkyCondition::Clear),
        })
        .collect_vec()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::dataset::{Dataset, HourlyRecord};

    /// One direct-only record per month, with the declination swinging over
    /// the year so per-period optima genuinely differ.
    fn synthetic_year() -> Engine {
        let records = Month::ALL
            .iter()
            .map(|month| {
                let declination = (f64::from(month.number()) - 6.5) * 7.0;
                HourlyRecord::new(*month, 5.0, 100.0, 6.0, 110.0, declination)
            })
            .collect_vec();
        Engine::builder()
            .dataset(Dataset::from_records(records))
            .site(SiteConfig::builder().build())
            .build()
    }

    #[test]
    fn per_period_optimization_dominates_a_single_choice() {
        let engine = synthetic_year();
        let monthly = Arrangement::MonthlyOptimal.annual_total(&engine, SkyCondition::Cloudy);
        let seasonal = Arrangement::TwoSeasonOptimal.annual_total(&engine, SkyCondition::Cloudy);
        let annual = Arrangement::AnnualOptimal.annual_total(&engine, SkyCondition::Cloudy);
        assert!(monthly >= seasonal);
        assert!(seasonal >= annual);
    }

    #[test]
    fn two_season_fixed_is_the_sum_of_its_halves() {
        let engine = synthetic_year();
        let site = *engine.site();
        let expected = engine.compute_ghi(
            site.summer_tilt_degrees(),
            site.summer_months,
            SkyCondition::Clear,
        ) + engine.compute_ghi(
            site.winter_tilt_degrees(),
            site.winter_months(),
            SkyCondition::Clear,
        );
        let total = Arrangement::TwoSeasonFixed.annual_total(&engine, SkyCondition::Clear);
        assert_relative_eq!(total.0, expected.0);
    }

    #[test]
    fn monthly_ghi_sums_to_the_annual_total() {
        let engine = synthetic_year();
        for arrangement in [Arrangement::FixedHorizontal, Arrangement::MonthlyOptimal] {
            let total = arrangement.annual_total(&engine, SkyCondition::Cloudy);
            let summed: WattHoursPerSquareMetre =
                arrangement.monthly_ghi(&engine, SkyCondition::Cloudy).into_iter().sum();
            assert_relative_eq!(total.0, summed.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn labels_reflect_the_site() {
        let engine = synthetic_year();
        assert_eq!(Arrangement::FixedLatitude.label(engine.site()), "2: 30° fixed (latitude)");
        assert_eq!(
            Arrangement::TwoSeasonFixed.label(engine.site()),
            "3: two fixed (latitude ± 11.7°)"
        );
    }
}
