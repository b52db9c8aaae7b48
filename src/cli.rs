use std::path::PathBuf;

use clap::{Parser, Subcommand};
use enumset::EnumSet;

use crate::{
    core::{Month, SiteConfig},
    dataset::Dataset,
    prelude::*,
};

mod analyze;
mod window;

pub use self::{analyze::AnalyzeArgs, window::WindowArgs};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare all six tilt arrangements and render the annual report.
    Analyze(Box<AnalyzeArgs>),

    /// Optimal tilt for each rolling month window.
    Window(Box<WindowArgs>),
}

#[derive(Parser)]
pub struct DatasetArgs {
    /// Path to the hourly irradiance CSV.
    #[clap(long = "csv", env = "IRRADIANCE_CSV")]
    pub csv_path: PathBuf,
}

impl DatasetArgs {
    pub fn load(&self) -> Result<Dataset> {
        let dataset = Dataset::load(&self.csv_path)?;
        info!(n_records = dataset.len(), "loaded the dataset");
        Ok(dataset)
    }
}

#[derive(Parser)]
pub struct SiteArgs {
    /// Site latitude in degrees.
    #[clap(long = "latitude-degrees", default_value = "29.651949", env = "LATITUDE_DEGREES")]
    pub latitude_degrees: f64,

    /// Earth axial tilt in degrees, used by the two-season fixed arrangement.
    #[clap(long = "axial-tilt-degrees", default_value = "23.45", env = "AXIAL_TILT_DEGREES")]
    pub axial_tilt_degrees: f64,

    /// Months treated as the summer season; the rest are winter.
    #[clap(
        long = "summer-months",
        env = "SUMMER_MONTHS",
        value_delimiter = ',',
        num_args = 1..,
        default_value = "apr,may,jun,jul,aug,sep",
    )]
    pub summer_months: Vec<Month>,
}

impl SiteArgs {
    #[must_use]
    pub fn site(&self) -> SiteConfig {
        SiteConfig::builder()
            .latitude_degrees(self.latitude_degrees)
            .axial_tilt_degrees(self.axial_tilt_degrees)
            .summer_months(self.summer_months.iter().copied().collect::<EnumSet<Month>>())
            .build()
    }
}
