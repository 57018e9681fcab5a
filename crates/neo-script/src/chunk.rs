//! Script chunk parsing and encoding.
//!
//! A script chunk is either an opcode or a data push with its associated
//! bytes. This module decodes raw script bytes into structured chunks and
//! encodes push data with the correct PUSHBYTES/PUSHDATA prefix.

use crate::opcodes::*;
use crate::ScriptError;

/// A single parsed element of a NEO script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptChunk {
    /// The opcode byte. For direct pushes (1-75 bytes), this is the length.
    pub op: u8,
    /// The data payload, if this chunk is a push operation.
    pub data: Option<Vec<u8>>,
}

impl ScriptChunk {
    /// Convert this chunk to its assembly representation.
    ///
    /// Data pushes are rendered as hex; other opcodes by name.
    pub fn to_asm_string(&self) -> String {
        match &self.data {
            Some(data) => hex::encode(data),
            None => opcode_to_string(self.op),
        }
    }
}

fn take<'a>(bytes: &'a [u8], pos: usize, len: usize) -> Result<&'a [u8], ScriptError> {
    let end = pos.checked_add(len).ok_or(ScriptError::DataTooSmall)?;
    bytes.get(pos..end).ok_or(ScriptError::DataTooSmall)
}

/// Decode raw script bytes into a vector of `ScriptChunk` values.
///
/// Handles PUSHBYTES1..PUSHBYTES75 (direct push) and PUSHDATA1/2/4
/// (length-prefixed push). Every other byte is a bare opcode.
///
/// # Arguments
/// * `bytes` - The raw script bytes to decode.
///
/// # Returns
/// A vector of parsed chunks, or [`ScriptError::DataTooSmall`] if a push
/// runs past the end of the script.
pub fn decode_script(bytes: &[u8]) -> Result<Vec<ScriptChunk>, ScriptError> {
    let mut chunks = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let op = bytes[pos];
        let (header, length) = match op {
            PUSHBYTES1..=PUSHBYTES75 => (1, op as usize),
            PUSHDATA1 => (2, take(bytes, pos + 1, 1)?[0] as usize),
            PUSHDATA2 => {
                let raw = take(bytes, pos + 1, 2)?;
                (3, u16::from_le_bytes([raw[0], raw[1]]) as usize)
            }
            PUSHDATA4 => {
                let raw = take(bytes, pos + 1, 4)?;
                (5, u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]) as usize)
            }
            _ => {
                chunks.push(ScriptChunk { op, data: None });
                pos += 1;
                continue;
            }
        };
        let data = take(bytes, pos + header, length)?.to_vec();
        chunks.push(ScriptChunk { op, data: Some(data) });
        pos += header + length;
    }

    Ok(chunks)
}

/// Compute the push prefix bytes for a data payload of the given length.
///
/// # Arguments
/// * `data_len` - The length of the data to be pushed.
///
/// # Returns
/// The prefix to prepend to the data, or [`ScriptError::DataTooBig`] if
/// the length does not fit in PUSHDATA4.
pub fn push_data_prefix(data_len: usize) -> Result<Vec<u8>, ScriptError> {
    if data_len <= PUSHBYTES75 as usize {
        Ok(vec![data_len as u8])
    } else if data_len <= 0xFF {
        Ok(vec![PUSHDATA1, data_len as u8])
    } else if data_len <= 0xFFFF {
        let mut buf = vec![PUSHDATA2];
        buf.extend_from_slice(&(data_len as u16).to_le_bytes());
        Ok(buf)
    } else if data_len <= 0xFFFF_FFFF {
        let mut buf = vec![PUSHDATA4];
        buf.extend_from_slice(&(data_len as u32).to_le_bytes());
        Ok(buf)
    } else {
        Err(ScriptError::DataTooBig)
    }
}
