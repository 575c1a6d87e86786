use bench_api::{Codec, CodecError, DataFormat, Dataset};

/// Stateless YAML adapter (`serde_yaml`).
#[derive(Debug, Default)]
pub struct YamlCodec;

impl Codec for YamlCodec {
    fn format(&self) -> DataFormat {
        DataFormat::Yaml
    }

    fn serialize(&mut self, dataset: &Dataset) -> Result<Vec<u8>, CodecError> {
        let text = serde_yaml::to_string(dataset)
            .map_err(|e| CodecError::format(format!("yaml encode: {e}")))?;
        Ok(text.into_bytes())
    }

    fn decode(&mut self, data: &[u8]) -> Result<Dataset, CodecError> {
        serde_yaml::from_slice(data).map_err(|e| CodecError::format(format!("yaml decode: {e}")))
    }
}

pub fn create_codec() -> Box<dyn Codec> {
    tracing::debug!("yaml codec created");
    Box::new(YamlCodec)
}
