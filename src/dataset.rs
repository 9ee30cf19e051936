// 🍽️ Food Dataset - static nutrition table loaded once at startup
// Rows are read-only after load; requests share the table behind an Arc.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use thiserror::Error;

// ============================================================================
// FOOD RECORD
// ============================================================================

/// One row of the nutrition table. Only the columns used for
/// recommendations are read; any other columns are ignored.
///
/// A blank or unparseable nutrient cell reads as `None`: the row is kept
/// but fails every predicate that looks at that nutrient.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FoodRecord {
    #[serde(rename = "food")]
    pub name: String,

    #[serde(rename = "Caloric Value", deserialize_with = "csv::invalid_option")]
    pub caloric_value: Option<f64>,

    #[serde(rename = "Protein", deserialize_with = "csv::invalid_option")]
    pub protein: Option<f64>,

    #[serde(rename = "Fat", deserialize_with = "csv::invalid_option")]
    pub fat: Option<f64>,
}

impl FoodRecord {
    pub fn new(name: impl Into<String>, caloric_value: f64, protein: f64, fat: f64) -> Self {
        FoodRecord {
            name: name.into(),
            caloric_value: Some(caloric_value),
            protein: Some(protein),
            fat: Some(fat),
        }
    }
}

// ============================================================================
// DATASET
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    #[error("Dataset unavailable: {0}")]
    DatasetUnavailable(String),
}

#[derive(Debug, Clone)]
pub enum Dataset {
    Loaded(Vec<FoodRecord>),
    /// Load failed at startup; every lookup reports the reason
    Unavailable(String),
}

impl Dataset {
    pub fn from_records(records: Vec<FoodRecord>) -> Self {
        Dataset::Loaded(records)
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Dataset::Unavailable(reason.into())
    }

    /// Load the dataset from a CSV file with a header row
    pub fn load(csv_path: &Path) -> Result<Self> {
        let file = std::fs::File::open(csv_path)
            .with_context(|| format!("Failed to open dataset file: {:?}", csv_path))?;

        Self::from_reader(file).with_context(|| format!("Failed to read dataset: {:?}", csv_path))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for (index, result) in rdr.deserialize().enumerate() {
            let record: FoodRecord =
                result.with_context(|| format!("Failed to deserialize food row {}", index + 1))?;
            records.push(record);
        }

        Ok(Dataset::Loaded(records))
    }

    /// Like `load`, but a failure degrades to `Unavailable` so the server can still start
    pub fn load_or_unavailable(csv_path: &Path) -> Self {
        match Self::load(csv_path) {
            Ok(dataset) => {
                tracing::info!(rows = dataset.len(), path = ?csv_path, "Dataset successfully loaded");
                dataset
            }
            Err(e) => {
                tracing::error!(path = ?csv_path, "Error loading dataset: {:#}", e);
                Dataset::Unavailable(format!("{:#}", e))
            }
        }
    }

    pub fn records(&self) -> std::result::Result<&[FoodRecord], LookupError> {
        match self {
            Dataset::Loaded(records) => Ok(records),
            Dataset::Unavailable(reason) => Err(LookupError::DatasetUnavailable(reason.clone())),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Dataset::Loaded(_))
    }

    /// Row count; an unavailable dataset has none
    pub fn len(&self) -> usize {
        match self {
            Dataset::Loaded(records) => records.len(),
            Dataset::Unavailable(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
,food,Caloric Value,Fat,Saturated Fats,Protein
0,cream cheese,51,5,2.9,0.9
1,chicken breast,231,5,1.4,43.5
2,cucumber,16,0.1,0,0.7
";

    #[test]
    fn test_from_reader_ignores_extra_columns() {
        let dataset = Dataset::from_reader(SAMPLE_CSV.as_bytes()).unwrap();
        assert!(dataset.is_available());
        assert_eq!(dataset.len(), 3);

        let records = dataset.records().unwrap();
        assert_eq!(records[1].name, "chicken breast");
        assert_eq!(records[1].caloric_value, Some(231.0));
        assert_eq!(records[1].protein, Some(43.5));
        assert_eq!(records[2].fat, Some(0.1));
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let csv = "food,Caloric Value,Protein\napple,52,0.3\n";
        assert!(Dataset::from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_blank_and_garbled_cells_keep_the_row() {
        let csv = "food,Caloric Value,Protein,Fat\n\
chicken,231,43.5,5\n\
cucumber,16,0.7,\n\
apple,lots,0.3,0.2\n";
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert!(dataset.is_available());
        assert_eq!(dataset.len(), 3);

        let records = dataset.records().unwrap();
        assert_eq!(records[0], FoodRecord::new("chicken", 231.0, 43.5, 5.0));
        assert_eq!(records[1].fat, None);
        assert_eq!(records[1].caloric_value, Some(16.0));
        assert_eq!(records[2].caloric_value, None);
    }

    #[test]
    fn test_malformed_row_is_an_error() {
        let csv = "food,Caloric Value,Protein,Fat\napple,52,0.3\n";
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(format!("{:#}", err).contains("row 1"));
    }

    #[test]
    fn test_load_missing_file_degrades() {
        let dataset = Dataset::load_or_unavailable(Path::new("/nonexistent/food-data.csv"));
        assert!(!dataset.is_available());
        assert!(dataset.is_empty());
        assert!(matches!(
            dataset.records(),
            Err(LookupError::DatasetUnavailable(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("food-data.csv");
        std::fs::write(&path, SAMPLE_CSV).unwrap();

        let dataset = Dataset::load(&path).unwrap();
        assert_eq!(dataset.len(), 3);
    }
}
