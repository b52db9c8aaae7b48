//! Hourly irradiance dataset: CSV loading, numeric coercion, row filtering.

use std::{
    fmt::{Display, Formatter},
    io::Read,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Deserializer};

use crate::{core::Month, prelude::*};

/// Which irradiance column pair a query reads: the observed values or the
/// clear-sky model values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum SkyCondition {
    Cloudy,
    Clear,
}

impl Display for SkyCondition {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cloudy => write!(formatter, "cloudy"),
            Self::Clear => write!(formatter, "clear"),
        }
    }
}

/// One hourly observation. Immutable once loaded.
#[derive(Clone, Copy, Debug)]
pub struct HourlyRecord {
    pub month: Month,
    pub dhi: f64,
    pub dni: f64,
    pub clearsky_dhi: f64,
    pub clearsky_dni: f64,
    pub declination_degrees: f64,

    /// Precomputed by the loader so the hot loop never converts.
    pub declination_radians: f64,
}

impl HourlyRecord {
    pub fn new(
        month: Month,
        dhi: f64,
        dni: f64,
        clearsky_dhi: f64,
        clearsky_dni: f64,
        declination_degrees: f64,
    ) -> Self {
        Self {
            month,
            dhi,
            dni,
            clearsky_dhi,
            clearsky_dni,
            declination_degrees,
            declination_radians: declination_degrees.to_radians(),
        }
    }

    pub const fn diffuse(&self, sky: SkyCondition) -> f64 {
        match sky {
            SkyCondition::Cloudy => self.dhi,
            SkyCondition::Clear => self.clearsky_dhi,
        }
    }

    pub const fn direct(&self, sky: SkyCondition) -> f64 {
        match sky {
            SkyCondition::Cloudy => self.dni,
            SkyCondition::Clear => self.clearsky_dni,
        }
    }

    /// A night hour: both irradiance columns for the selected sky are zero.
    /// Such hours contribute nothing to any sum and are skipped up front.
    pub fn is_dark(&self, sky: SkyCondition) -> bool {
        self.diffuse(sky) == 0.0 && self.direct(sky) == 0.0
    }
}

/// An ordered, immutable collection of hourly records, owned exclusively by
/// one engine instance.
#[derive(Debug)]
pub struct Dataset(Vec<HourlyRecord>);

impl Dataset {
    pub const fn from_records(records: Vec<HourlyRecord>) -> Self {
        Self(records)
    }

    /// Read the CSV at `path`, failing distinctly for a missing file versus
    /// any other I/O or parsing fault.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let reader =
            csv::Reader::from_path(path).map_err(|error| classify_error(path, error))?;
        Self::from_reader(reader).map_err(|error| classify_error(path, error))
    }

    /// Rows with a non-numeric cell in any required column are dropped, as
    /// are rows whose month is outside `1..=12` (they could never match a
    /// month filter anyway). Extra columns are ignored.
    fn from_reader<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, csv::Error> {
        let mut records = Vec::new();
        let mut n_dropped = 0_usize;
        for row in reader.deserialize::<RawRow>() {
            match row?.into_record() {
                Some(record) => records.push(record),
                None => n_dropped += 1,
            }
        }
        if n_dropped != 0 {
            debug!(n_dropped, "dropped incomplete rows");
        }
        Ok(Self(records))
    }

    pub fn records(&self) -> &[HourlyRecord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadError {
    #[display("input file not found: `{}`", path.display())]
    FileNotFound {
        #[error(not(source))]
        path: PathBuf,
    },

    #[display("failed to read `{}`", path.display())]
    Parse {
        #[error(not(source))]
        path: PathBuf,
        source: csv::Error,
    },
}

fn classify_error(path: &Path, error: csv::Error) -> LoadError {
    let not_found = matches!(
        error.kind(),
        csv::ErrorKind::Io(io_error) if io_error.kind() == std::io::ErrorKind::NotFound
    );
    if not_found {
        LoadError::FileNotFound { path: path.to_path_buf() }
    } else {
        LoadError::Parse { path: path.to_path_buf(), source: error }
    }
}

/// One CSV row before coercion. Every required column deserializes
/// leniently: a malformed numeric cell becomes `None` and sinks the row,
/// not the whole load.
#[derive(Deserialize)]
struct RawRow {
    #[serde(rename = "Month", deserialize_with = "lenient_f64")]
    month: Option<f64>,

    #[serde(rename = "DHI", deserialize_with = "lenient_f64")]
    dhi: Option<f64>,

    #[serde(rename = "DNI", deserialize_with = "lenient_f64")]
    dni: Option<f64>,

    #[serde(rename = "Clearsky DHI", deserialize_with = "lenient_f64")]
    clearsky_dhi: Option<f64>,

    #[serde(rename = "Clearsky DNI", deserialize_with = "lenient_f64")]
    clearsky_dni: Option<f64>,

    #[serde(rename = "Declination Angle", deserialize_with = "lenient_f64")]
    declination_degrees: Option<f64>,
}

impl RawRow {
    fn into_record(self) -> Option<HourlyRecord> {
        let month_number = self.month?;
        if month_number.fract() != 0.0 || !(1.0..=12.0).contains(&month_number) {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let month = Month::from_number(month_number as u32)?;
        Some(HourlyRecord::new(
            month,
            self.dhi?,
            self.dni?,
            self.clearsky_dhi?,
            self.clearsky_dni?,
            self.declination_degrees?,
        ))
    }
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn from_csv(data: &str) -> Result<Dataset, csv::Error> {
        Dataset::from_reader(csv::Reader::from_reader(data.as_bytes()))
    }

    const HEADER: &str = "Year,Month,DHI,DNI,Clearsky DHI,Clearsky DNI,Declination Angle\n";

    #[test]
    fn loads_rows_and_precomputes_radians() {
        let dataset = from_csv(&format!(
            "{HEADER}2023,1,10,100,12,110,-23.0\n2023,7,50,500,55,550,22.5\n"
        ))
        .unwrap();
        assert_eq!(dataset.len(), 2);
        let first = dataset.records()[0];
        assert_eq!(first.month, Month::Jan);
        assert_relative_eq!(first.declination_radians, (-23.0_f64).to_radians());
        assert_eq!(dataset.records()[1].month, Month::Jul);
    }

    #[test]
    fn drops_rows_with_non_numeric_cells() {
        let dataset = from_csv(&format!(
            "{HEADER}2023,1,10,100,12,110,-23.0\n2023,2,n/a,100,12,110,-15.0\n2023,3,10,100,12,110,\n"
        ))
        .unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].month, Month::Jan);
    }

    #[test]
    fn drops_rows_with_out_of_range_months() {
        let dataset =
            from_csv(&format!("{HEADER}2023,13,10,100,12,110,0.0\n2023,0,10,100,12,110,0.0\n"))
                .unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn missing_file_is_distinct() {
        let error = Dataset::load(Path::new("no/such/file.csv")).unwrap_err();
        assert!(matches!(error, LoadError::FileNotFound { .. }));
    }

    #[test]
    fn missing_column_is_a_parse_failure() {
        // Structural faults surface as errors rather than dropped rows.
        assert!(from_csv("Month,DHI\n1,10\n").is_err());
    }

    #[test]
    fn sky_condition_selects_column_pair() {
        let record = HourlyRecord::new(Month::Jun, 1.0, 2.0, 3.0, 4.0, 10.0);
        assert_relative_eq!(record.diffuse(SkyCondition::Cloudy), 1.0);
        assert_relative_eq!(record.direct(SkyCondition::Cloudy), 2.0);
        assert_relative_eq!(record.diffuse(SkyCondition::Clear), 3.0);
        assert_relative_eq!(record.direct(SkyCondition::Clear), 4.0);
    }

    #[test]
    fn dark_hours_are_flagged_per_sky() {
        let record = HourlyRecord::new(Month::Jun, 0.0, 0.0, 3.0, 4.0, 10.0);
        assert!(record.is_dark(SkyCondition::Cloudy));
        assert!(!record.is_dark(SkyCondition::Clear));
    }
}
