use bench_api::{Codec, CodecError, DataFormat, Dataset};

/// Stateless JSON adapter: `serde_json` with the field names of `Record`.
#[derive(Debug, Default)]
pub struct JsonCodec;

impl JsonCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Codec for JsonCodec {
    fn format(&self) -> DataFormat {
        DataFormat::Json
    }

    fn serialize(&mut self, dataset: &Dataset) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(dataset).map_err(|e| CodecError::from(e).with_context("json encode"))
    }

    fn decode(&mut self, data: &[u8]) -> Result<Dataset, CodecError> {
        serde_json::from_slice(data).map_err(|e| CodecError::from(e).with_context("json decode"))
    }
}

/// Build the adapter behind the common contract.
pub fn create_codec() -> Box<dyn Codec> {
    tracing::debug!("json codec created");
    Box::new(JsonCodec::new())
}
