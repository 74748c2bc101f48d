//! CSV and JSON export of experiment results

use std::{fs::File, io::Write, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, pipeline::ExperimentResult};

/// A single row of the results table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "First won")]
    pub first_won: usize,
    #[serde(rename = "Second won")]
    pub second_won: usize,
    #[serde(rename = "Ties")]
    pub ties: usize,
    /// Seconds, rounded to two decimals
    #[serde(rename = "First execution time")]
    pub first_execution_time: f64,
    /// Seconds, rounded to two decimals
    #[serde(rename = "Second execution time")]
    pub second_execution_time: f64,
}

impl From<&ExperimentResult> for ResultRecord {
    fn from(result: &ExperimentResult) -> Self {
        Self {
            name: result.name.clone(),
            first_won: result.first_wins,
            second_won: result.second_wins,
            ties: result.ties,
            first_execution_time: round2(result.first_time),
            second_execution_time: round2(result.second_time),
        }
    }
}

fn round2(seconds: f64) -> f64 {
    (seconds * 100.0).round() / 100.0
}

/// Exporter for experiment result tables
pub struct ResultsCsvExporter;

impl ResultsCsvExporter {
    /// Write one row per result to `path`, returning the number of rows
    pub fn write<P: AsRef<Path>>(path: P, results: &[ExperimentResult]) -> Result<usize> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create results file {}", path.display()),
            source,
        })?;
        Self::write_to(file, results)
    }

    /// Write the results table to any writer
    pub fn write_to<W: Write>(writer: W, results: &[ExperimentResult]) -> Result<usize> {
        let mut writer = csv::Writer::from_writer(writer);
        for result in results {
            writer.serialize(ResultRecord::from(result))?;
        }
        writer.flush()?;
        Ok(results.len())
    }

    /// Read a results table back
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Vec<ResultRecord>> {
        let mut reader = csv::Reader::from_path(path)?;
        let records = reader.deserialize().collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Write every result as a pretty-printed JSON array
    pub fn write_json<P: AsRef<Path>>(path: P, results: &[ExperimentResult]) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create results file {}", path.display()),
            source,
        })?;
        serde_json::to_writer_pretty(file, results)?;
        Ok(())
    }
}
