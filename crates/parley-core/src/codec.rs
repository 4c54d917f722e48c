//! Binary framing and text-safe encoding of packets.
//!
//! The text form exists for transport and display only. It is an exact,
//! reversible mapping of the framed bytes.

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::packet::CipherPacket;

/// Text alphabet used for transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextEncoding {
    /// RFC 4648 Base64 with padding.
    #[default]
    Base64,
    /// RFC 4648 URL-safe Base64 without padding.
    Base64Url,
    /// Lowercase hexadecimal.
    Hex,
}

/// Converts packets and opaque byte strings to and from transport text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PacketCodec {
    encoding: TextEncoding,
}

impl PacketCodec {
    /// Create a codec for `encoding`.
    pub const fn new(encoding: TextEncoding) -> Self {
        Self { encoding }
    }

    /// The configured text encoding.
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Frame a packet as bytes.
    pub fn encode(&self, packet: &CipherPacket) -> Vec<u8> {
        packet.to_bytes()
    }

    /// Parse framed bytes.
    pub fn decode(&self, bytes: &[u8]) -> Result<CipherPacket> {
        CipherPacket::from_bytes(bytes)
    }

    /// Frame and encode a packet as text.
    pub fn to_transport_text(&self, packet: &CipherPacket) -> String {
        self.encode_bytes(&packet.to_bytes())
    }

    /// Decode text produced by [`to_transport_text`](Self::to_transport_text).
    pub fn from_transport_text(&self, text: &str) -> Result<CipherPacket> {
        let bytes = self.decode_bytes(text)?;
        CipherPacket::from_bytes(&bytes)
    }

    /// Encode opaque bytes such as an RSA ciphertext or a signature.
    pub fn encode_bytes(&self, bytes: &[u8]) -> String {
        match self.encoding {
            TextEncoding::Base64 => STANDARD.encode(bytes),
            TextEncoding::Base64Url => URL_SAFE_NO_PAD.encode(bytes),
            TextEncoding::Hex => hex::encode(bytes),
        }
    }

    /// Decode opaque bytes.
    pub fn decode_bytes(&self, text: &str) -> Result<Vec<u8>> {
        match self.encoding {
            TextEncoding::Base64 => STANDARD
                .decode(text)
                .map_err(|e| CoreError::DecodeError(e.to_string())),
            TextEncoding::Base64Url => URL_SAFE_NO_PAD
                .decode(text)
                .map_err(|e| CoreError::DecodeError(e.to_string())),
            TextEncoding::Hex => {
                hex::decode(text).map_err(|e| CoreError::DecodeError(e.to_string()))
            }
        }
    }
}
