use bench_api::{Codec, CodecError, DataFormat, Dataset};

// ═══════════════════════════════════════════════════════════════
//  NativeCodec
// ═══════════════════════════════════════════════════════════════

/// Rust-native binary adapter (`bincode`).
///
/// Stateful: owns a channel buffer created once and reused by every call.
/// `serialize()` resets the channel and writes exactly one frame into it;
/// `deserialize()` reads that frame back and leaves the channel empty.
/// Bytes that are not the pending frame are loaded into the channel first.
#[derive(Debug)]
pub struct NativeCodec {
    channel: Vec<u8>,
}

impl NativeCodec {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Pre-size the channel, e.g. from a previous run's frame length.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { channel: Vec::with_capacity(capacity) }
    }

    /// Number of bytes currently waiting in the channel.
    pub fn pending(&self) -> usize {
        self.channel.len()
    }

    /// Drop any pending frame, keeping the allocation.
    pub fn reset(&mut self) {
        self.channel.clear();
    }

    fn load(&mut self, data: &[u8]) {
        if self.channel.as_slice() != data {
            self.channel.clear();
            self.channel.extend_from_slice(data);
        }
    }
}

impl Default for NativeCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for NativeCodec {
    fn format(&self) -> DataFormat {
        DataFormat::Native
    }

    fn serialize(&mut self, dataset: &Dataset) -> Result<Vec<u8>, CodecError> {
        self.reset();
        bincode::serialize_into(&mut self.channel, dataset).map_err(|e| {
            self.channel.clear();
            CodecError::format(format!("native encode: {e}"))
        })?;
        Ok(self.channel.clone())
    }

    fn decode(&mut self, data: &[u8]) -> Result<Dataset, CodecError> {
        self.load(data);
        let decoded = bincode::deserialize(&self.channel)
            .map_err(|e| CodecError::format(format!("native decode: {e}")));
        self.reset();
        decoded
    }
}

pub fn create_codec() -> Box<dyn Codec> {
    tracing::debug!("native codec created");
    Box::new(NativeCodec::new())
}
