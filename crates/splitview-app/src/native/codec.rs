//! Native messaging framing: a 4-byte length in native byte order, then
//! that many bytes of UTF-8 JSON.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use splitview_common::SplitViewError;
use tokio_util::codec::LengthDelimitedCodec;

/// Largest message the browser may send us.
pub const MAX_INBOUND_FRAME: usize = 64 * 1024 * 1024;
/// Largest message the browser accepts from a native host.
pub const MAX_OUTBOUND_FRAME: usize = 1024 * 1024;

pub fn inbound_codec() -> LengthDelimitedCodec {
    codec(MAX_INBOUND_FRAME)
}

pub fn outbound_codec() -> LengthDelimitedCodec {
    codec(MAX_OUTBOUND_FRAME)
}

fn codec(max_frame_length: usize) -> LengthDelimitedCodec {
    LengthDelimitedCodec::builder()
        .length_field_length(4)
        .native_endian()
        .max_frame_length(max_frame_length)
        .new_codec()
}

pub fn encode<T: Serialize>(message: &T) -> Result<Bytes, SplitViewError> {
    let json = serde_json::to_vec(message).map_err(|e| SplitViewError::Protocol(e.to_string()))?;
    if json.len() > MAX_OUTBOUND_FRAME {
        return Err(SplitViewError::Protocol(format!(
            "message of {} bytes exceeds the {MAX_OUTBOUND_FRAME} byte limit",
            json.len()
        )));
    }
    Ok(Bytes::from(json))
}

pub fn decode<T: DeserializeOwned>(frame: &[u8]) -> Result<T, SplitViewError> {
    serde_json::from_slice(frame).map_err(|e| SplitViewError::Protocol(e.to_string()))
}
