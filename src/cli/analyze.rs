use std::{fs, path::PathBuf};

use clap::Parser;

use crate::{
    charts,
    cli::{DatasetArgs, SiteArgs},
    core::{Arrangement, ArrangementTotals, Engine, evaluate_all, monthly_optima},
    dataset::SkyCondition,
    prelude::*,
    tables,
};

#[derive(Parser)]
pub struct AnalyzeArgs {
    #[clap(flatten)]
    dataset: DatasetArgs,

    #[clap(flatten)]
    site: SiteArgs,

    /// Sky condition used for the monthly breakdown charts. The annual
    /// comparison always covers both.
    #[clap(long, value_enum, default_value = "cloudy", env = "SKY_CONDITION")]
    sky: SkyCondition,

    /// Write the SVG chart suite into this directory.
    #[clap(long = "charts-dir", env = "CHARTS_DIR")]
    charts_dir: Option<PathBuf>,
}

impl AnalyzeArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let engine =
            Engine::builder().dataset(self.dataset.load()?).site(self.site.site()).build();

        info!("evaluating arrangements…");
        let totals = evaluate_all(&engine);
        println!("{}", tables::build_arrangement_table(&totals));

        info!("searching monthly optima…");
        let optima = monthly_optima(&engine);
        println!("{}", tables::build_monthly_optima_table(&optima));

        if let Some(charts_dir) = &self.charts_dir {
            fs::create_dir_all(charts_dir)
                .with_context(|| format!("failed to create `{}`", charts_dir.display()))?;
            self.render_charts(&engine, &totals, charts_dir)?;
            info!(directory = %charts_dir.display(), "charts written");
        }

        Ok(())
    }

    fn render_charts(
        &self,
        engine: &Engine,
        totals: &[ArrangementTotals],
        charts_dir: &std::path::Path,
    ) -> Result {
        charts::render_annual_comparison(&charts_dir.join("annual_comparison.svg"), totals)?;

        let sky = self.sky;
        let site = engine.site();
        let labels = Arrangement::ALL.map(|arrangement| arrangement.label(site));
        let monthly_ghi =
            Arrangement::ALL.map(|arrangement| arrangement.monthly_ghi(engine, sky));

        // The three pairings the original report compares month by month.
        for (file_name, a, b) in [
            ("monthly_fixed_horizontal_vs_latitude.svg", 0, 1),
            ("monthly_optimal_vs_two_season_fixed.svg", 3, 2),
            ("monthly_annual_vs_two_season_optimal.svg", 5, 4),
        ] {
            charts::render_monthly_comparison(
                &charts_dir.join(file_name),
                sky,
                (labels[a].as_str(), &monthly_ghi[a]),
                (labels[b].as_str(), &monthly_ghi[b]),
            )?;
        }

        let tilt_series = Arrangement::ALL
            .iter()
            .map(|arrangement| {
                (arrangement.label(site), arrangement.monthly_tilts(engine, sky))
            })
            .collect::<Vec<_>>();
        charts::render_tilt_strategies(
            &charts_dir.join("tilt_strategies.svg"),
            sky,
            &tilt_series,
        )?;

        // Gain of monthly optimization over the single annual optimum.
        let mut gain = [0.0; 12];
        for (index, slot) in gain.iter_mut().enumerate() {
            *slot = (monthly_ghi[3][index] - monthly_ghi[5][index]).0;
        }
        charts::render_cumulative_gain(
            &charts_dir.join("cumulative_gain.svg"),
            sky,
            labels[5].as_str(),
            labels[3].as_str(),
            &gain,
        )?;

        Ok(())
    }
}
