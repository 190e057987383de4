//! File-backed data adapter that dispatches on file extension.

use std::fs::File;
use std::path::Path;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::json_adapter;
use crate::domain::error::FolioError;
use crate::domain::settings::Settings;
use crate::domain::tree::Node;
use crate::domain::valuation::PriceTable;
use crate::ports::data_port::DataPort;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Csv,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(SourceFormat::Json),
            "csv" => Some(SourceFormat::Csv),
            _ => None,
        }
    }
}

#[derive(Default)]
pub struct FileDataAdapter {
    csv: CsvAdapter,
}

impl FileDataAdapter {
    pub fn new(csv: CsvAdapter) -> Self {
        Self { csv }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(CsvAdapter::new(
            &settings.symbol_column,
            &settings.price_column,
        ))
    }

    fn open(path: &Path) -> Result<File, FolioError> {
        File::open(path).map_err(|e| FolioError::SourceUnavailable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

impl DataPort for FileDataAdapter {
    fn load_tree(&self, path: &Path) -> Result<Node, FolioError> {
        let source = path.display().to_string();
        let format = SourceFormat::from_path(path).ok_or_else(|| FolioError::SourceFormat {
            path: source.clone(),
            reason: "unsupported file type (expected .json or .csv)".into(),
        })?;
        let file = Self::open(path)?;
        match format {
            SourceFormat::Json => json_adapter::read_tree(file, &source),
            SourceFormat::Csv => self.csv.read_tree(file, &source),
        }
    }

    fn load_prices(&self, path: &Path) -> Result<PriceTable, FolioError> {
        let file = Self::open(path)?;
        self.csv.read_prices(file, &path.display().to_string())
    }
}
