pub mod codec;
pub mod dataset;
pub mod error;

pub use codec::{Codec, DataFormat};
pub use dataset::{Dataset, Record};
pub use error::{CodecError, ErrorKind};
