//! Speech payload decoding
//!
//! The TTS model answers with base64 raw PCM: signed 16-bit little endian,
//! mono, 24 kHz.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::Result;

pub const SPEECH_SAMPLE_RATE: f32 = 24_000.0;

/// Decode base64 PCM16 into samples in [-1, 1). A trailing odd byte is dropped.
pub fn decode_pcm16(encoded: &str) -> Result<Vec<f32>> {
    let bytes = STANDARD.decode(encoded.trim())?;
    Ok(bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / 32768.0)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;

    fn encode(samples: &[i16]) -> String {
        let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        STANDARD.encode(bytes)
    }

    #[test]
    fn test_decode_scales_to_unit_range() {
        let samples = decode_pcm16(&encode(&[0, 16384, -32768, 32767])).unwrap();
        assert_eq!(samples.len(), 4);
        assert_eq!(samples[0], 0.0);
        assert_eq!(samples[1], 0.5);
        assert_eq!(samples[2], -1.0);
        assert!(samples[3] < 1.0 && samples[3] > 0.999);
    }

    #[test]
    fn test_odd_trailing_byte_dropped() {
        let samples = decode_pcm16(&STANDARD.encode([0x00, 0x40, 0x7f])).unwrap();
        assert_eq!(samples, vec![0.5]);
    }

    #[test]
    fn test_bad_base64() {
        assert!(matches!(
            decode_pcm16("not base64!!"),
            Err(ServiceError::Base64(_))
        ));
    }
}
