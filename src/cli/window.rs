use std::path::PathBuf;

use clap::Parser;

use crate::{
    charts,
    cli::{DatasetArgs, SiteArgs},
    core::{Engine, analyze_sliding_window},
    dataset::SkyCondition,
    prelude::*,
    tables,
};

#[derive(Parser)]
pub struct WindowArgs {
    #[clap(flatten)]
    dataset: DatasetArgs,

    #[clap(flatten)]
    site: SiteArgs,

    /// Window width in months.
    #[clap(
        long = "window-size",
        default_value = "3",
        env = "WINDOW_SIZE",
        value_parser = clap::value_parser!(u32).range(1..=12),
    )]
    window_size: u32,

    #[clap(long, value_enum, default_value = "cloudy", env = "SKY_CONDITION")]
    sky: SkyCondition,

    /// Write the window tilt chart into this directory.
    #[clap(long = "charts-dir", env = "CHARTS_DIR")]
    charts_dir: Option<PathBuf>,
}

impl WindowArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let engine =
            Engine::builder().dataset(self.dataset.load()?).site(self.site.site()).build();

        info!(self.window_size, "optimizing rolling windows…");
        let windows = analyze_sliding_window(&engine, self.window_size, self.sky);
        println!("{}", tables::build_window_table(self.sky, &windows));

        if let Some(charts_dir) = &self.charts_dir {
            std::fs::create_dir_all(charts_dir)
                .with_context(|| format!("failed to create `{}`", charts_dir.display()))?;
            charts::render_window_tilts(
                &charts_dir.join("window_tilts.svg"),
                self.sky,
                &windows,
            )?;
            info!(directory = %charts_dir.display(), "chart written");
        }

        Ok(())
    }
}
