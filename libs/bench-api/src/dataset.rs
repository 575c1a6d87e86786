use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// Одна запись датасета.
///
/// Ключи `maps` упорядочены, поэтому детерминированные форматы
/// дают одинаковые байты при повторной сериализации.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub frac: f64,
    pub name: String,
    pub maps: BTreeMap<String, i64>,
}

/// Весь набор записей. Загружается один раз, дальше только читается.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub tests: Vec<Record>,
}

impl Dataset {
    pub fn new(tests: Vec<Record>) -> Self {
        Self { tests }
    }

    /// Parse a dataset from its JSON document form (`{"tests":[...]}`).
    pub fn from_json(data: &[u8]) -> Result<Self, CodecError> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Read and parse the input document at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CodecError> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|e| CodecError::from(e).with_context(format!("read '{}'", path.display())))?;
        Self::from_json(&data).map_err(|e| e.with_context(format!("parse '{}'", path.display())))
    }

    /// Write the dataset as a JSON document (same shape `load` accepts).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CodecError> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)
            .map_err(|e| CodecError::from(e).with_context(format!("create '{}'", path.display())))?;
        let mut writer = std::io::BufWriter::new(file);
        serde_json::to_writer(&mut writer, self)?;
        std::io::Write::flush(&mut writer)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Total number of map entries across all records.
    pub fn map_entries(&self) -> usize {
        self.tests.iter().map(|r| r.maps.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const SAMPLE: &str = r#"{"tests":[{"id":1,"frac":0.5,"name":"a","maps":{"x":1}}]}"#;

    #[test]
    fn parses_input_document() {
        let ds = Dataset::from_json(SAMPLE.as_bytes()).unwrap();
        assert_eq!(ds.len(), 1);
        let rec = &ds.tests[0];
        assert_eq!(rec.id, 1);
        assert_eq!(rec.frac, 0.5);
        assert_eq!(rec.name, "a");
        assert_eq!(rec.maps.get("x"), Some(&1));
        assert_eq!(ds.map_entries(), 1);
    }

    #[test]
    fn missing_field_is_format_error() {
        let err = Dataset::from_json(br#"{"tests":[{"id":1}]}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Dataset::load(dir.path().join("nope.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.message().contains("nope.json"));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ds.json");
        let ds = Dataset::from_json(SAMPLE.as_bytes()).unwrap();
        ds.save(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), SAMPLE);
        assert_eq!(Dataset::load(&path).unwrap(), ds);
    }
}
