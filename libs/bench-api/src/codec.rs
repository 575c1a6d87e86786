use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::error::CodecError;

// ════════════════════════════════════════════════════════════════
//  DataFormat
// ════════════════════════════════════════════════════════════════

/// Формат сериализации, реализуемый адаптером.
///
/// Порядок вариантов совпадает с порядком прогона бенчмарка.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataFormat {
    Native,
    Json,
    Yaml,
    #[serde(alias = "messagepack")]
    Msgpack,
    #[serde(alias = "proto")]
    Protobuf,
}

impl DataFormat {
    /// All active formats in benchmark order.
    pub const ALL: [DataFormat; 5] = [
        DataFormat::Native,
        DataFormat::Json,
        DataFormat::Yaml,
        DataFormat::Msgpack,
        DataFormat::Protobuf,
    ];

    /// Experiment name printed in the start marker.
    pub fn label(&self) -> &'static str {
        match self {
            DataFormat::Native => "Native",
            DataFormat::Json => "JSON",
            DataFormat::Yaml => "YAML",
            DataFormat::Msgpack => "MSGPACK",
            DataFormat::Protobuf => "PROTO",
        }
    }

    pub fn parse(input: &str) -> Result<Self, CodecError> {
        match input.trim().to_ascii_lowercase().as_str() {
            "native" => Ok(DataFormat::Native),
            "json" => Ok(DataFormat::Json),
            "yaml" | "yml" => Ok(DataFormat::Yaml),
            "msgpack" | "messagepack" => Ok(DataFormat::Msgpack),
            "protobuf" | "proto" => Ok(DataFormat::Protobuf),
            other => Err(CodecError::config(format!(
                "unknown format '{other}' (use native|json|yaml|msgpack|protobuf)"
            ))),
        }
    }
}

impl std::fmt::Display for DataFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataFormat::Native => write!(f, "native"),
            DataFormat::Json => write!(f, "json"),
            DataFormat::Yaml => write!(f, "yaml"),
            DataFormat::Msgpack => write!(f, "msgpack"),
            DataFormat::Protobuf => write!(f, "protobuf"),
        }
    }
}

// ════════════════════════════════════════════════════════════════
//  Codec
// ════════════════════════════════════════════════════════════════

/// Адаптер формата: единый контракт поверх конкретной библиотеки.
///
/// - `serialize()` / `deserialize()` — измеряемый путь. Результат
///   `deserialize()` отбрасывается, важна только стоимость декодирования.
/// - `decode()` / `expected()` — неизмеряемая проверка round-trip.
///
/// Методы принимают `&mut self`: stateful адаптеры (native) владеют
/// буфером канала и сбрасывают его между вызовами.
pub trait Codec {
    /// Формат этого адаптера.
    fn format(&self) -> DataFormat;

    /// Сериализация: датасет → байты. Датасет не изменяется.
    fn serialize(&mut self, dataset: &Dataset) -> Result<Vec<u8>, CodecError>;

    /// Десериализация в свежее значение, которое сразу отбрасывается.
    fn deserialize(&mut self, data: &[u8]) -> Result<(), CodecError> {
        self.decode(data).map(drop)
    }

    /// Десериализация с возвратом результата в виде `Dataset`.
    fn decode(&mut self, data: &[u8]) -> Result<Dataset, CodecError>;

    /// Что должен вернуть точный round-trip датасета через этот формат.
    ///
    /// По умолчанию — сам датасет. Адаптеры с сужением типов
    /// переопределяют.
    fn expected(&self, dataset: &Dataset) -> Dataset {
        dataset.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!(DataFormat::parse("JSON").unwrap(), DataFormat::Json);
        assert_eq!(DataFormat::parse("yml").unwrap(), DataFormat::Yaml);
        assert_eq!(DataFormat::parse("messagepack").unwrap(), DataFormat::Msgpack);
        assert_eq!(DataFormat::parse(" proto ").unwrap(), DataFormat::Protobuf);
    }

    #[test]
    fn parse_rejects_stubbed_formats() {
        for name in ["xml", "avro"] {
            let err = DataFormat::parse(name).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Config);
        }
    }

    #[test]
    fn all_is_sorted_in_benchmark_order() {
        let mut sorted = DataFormat::ALL;
        sorted.sort();
        assert_eq!(sorted, DataFormat::ALL);
        let labels: Vec<_> = DataFormat::ALL.iter().map(|f| f.label()).collect();
        assert_eq!(labels, ["Native", "JSON", "YAML", "MSGPACK", "PROTO"]);
    }

    #[test]
    fn serde_names_match_display() {
        for format in DataFormat::ALL {
            let json = serde_json::to_string(&format).unwrap();
            assert_eq!(json, format!("\"{format}\""));
        }
    }

    struct Failing;

    impl Codec for Failing {
        fn format(&self) -> DataFormat {
            DataFormat::Json
        }
        fn serialize(&mut self, _dataset: &Dataset) -> Result<Vec<u8>, CodecError> {
            Ok(Vec::new())
        }
        fn decode(&mut self, _data: &[u8]) -> Result<Dataset, CodecError> {
            Err(CodecError::format("boom"))
        }
    }

    #[test]
    fn default_deserialize_propagates_decode_error() {
        let err = Failing.deserialize(b"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }
}
