use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use bytes::{Buf, Bytes};
use prost::Message;

use crate::error::CodecError;

/// Alphabet used for the text form of an encoded message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAlphabet {
    /// RFC 4648 standard alphabet with padding.
    #[default]
    Standard,
    /// RFC 4648 URL-safe alphabet with padding.
    UrlSafe,
}

/// Converts protobuf messages to and from bytes and their base64 text form.
///
/// The binary layout is whatever the message's prost definition declares;
/// this type only moves values across the byte and text boundaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageCodec {
    alphabet: TextAlphabet,
}

impl MessageCodec {
    pub fn new(alphabet: TextAlphabet) -> Self {
        Self { alphabet }
    }

    pub fn alphabet(&self) -> TextAlphabet {
        self.alphabet
    }

    /// Encode a message to its wire bytes.
    pub fn encode<M: Message>(&self, msg: &M) -> Bytes {
        Bytes::from(msg.encode_to_vec())
    }

    /// Encode a message to bytes and then to base64 text.
    pub fn encode_to_text<M: Message>(&self, msg: &M) -> String {
        let buf = msg.encode_to_vec();
        match self.alphabet {
            TextAlphabet::Standard => STANDARD.encode(buf),
            TextAlphabet::UrlSafe => URL_SAFE.encode(buf),
        }
    }

    /// Decode a message from its wire bytes.
    ///
    /// Truncated input, invalid tags and wire-type mismatches are errors.
    pub fn decode<M: Message + Default>(&self, buf: impl Buf) -> Result<M, CodecError> {
        Ok(M::decode(buf)?)
    }

    /// Decode a message from the text produced by [`MessageCodec::encode_to_text`].
    pub fn decode_from_text<M: Message + Default>(&self, text: &str) -> Result<M, CodecError> {
        let buf = match self.alphabet {
            TextAlphabet::Standard => STANDARD.decode(text)?,
            TextAlphabet::UrlSafe => URL_SAFE.decode(text)?,
        };
        self.decode(buf.as_slice())
    }
}
