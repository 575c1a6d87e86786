use bench_api::{Codec, CodecError, DataFormat, Dataset};

/// Stateless MessagePack adapter (`rmp-serde`).
///
/// Structs are written as maps keyed by field name rather than positional
/// arrays, so the encoded form is self-describing like the other text formats.
#[derive(Debug, Default)]
pub struct MsgpackCodec;

impl Codec for MsgpackCodec {
    fn format(&self) -> DataFormat {
        DataFormat::Msgpack
    }

    fn serialize(&mut self, dataset: &Dataset) -> Result<Vec<u8>, CodecError> {
        rmp_serde::to_vec_named(dataset).map_err(|e| CodecError::format(format!("msgpack encode: {e}")))
    }

    fn decode(&mut self, data: &[u8]) -> Result<Dataset, CodecError> {
        rmp_serde::from_slice(data).map_err(|e| CodecError::format(format!("msgpack decode: {e}")))
    }
}

pub fn create_codec() -> Box<dyn Codec> {
    tracing::debug!("msgpack codec created");
    Box::new(MsgpackCodec)
}
