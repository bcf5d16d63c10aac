pub mod audio_constants;
pub mod bitstream;
pub mod error;
pub mod metrics;
pub mod quant;
pub mod types;

pub use audio_constants::*;
pub use bitstream::{BitReader, BitWriter, MAX_FIELD_BITS};
pub use error::{CodecError, CodecResult};
pub use metrics::{compare, QualityMetrics};
pub use quant::{
    dequantize, fit_to_width, quantize, sign_extend, signed_range, to_fixed_width, Fitted,
    OverflowPolicy,
};
pub use types::*;
