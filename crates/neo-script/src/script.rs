/// NEO Script type - a sequence of opcodes and data pushes.
///
/// Witnesses carry two scripts: an invocation script that pushes signatures
/// and a verification script that checks them. The Script wraps a `Vec<u8>`
/// and provides methods for construction, classification, hashing and
/// assembly output.

use std::fmt;

use neo_primitives::ec::public_key::COMPRESSED_LEN;
use neo_primitives::ec::{PublicKey, Signature};
use neo_primitives::hash::hash160;
use neo_primitives::UInt160;

use crate::chunk::{decode_script, push_data_prefix, ScriptChunk};
use crate::opcodes::*;
use crate::ScriptError;

/// Largest number of keys a multi-signature verification script may name.
pub const MAX_MULTISIG_KEYS: usize = 1024;

/// A NEO script, represented as a byte vector newtype.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Script(Vec<u8>);

impl Script {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Create a new empty script.
    pub fn new() -> Self {
        Script(Vec::new())
    }

    /// Create a script from a hex-encoded string.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string (e.g. "21031a6c...ac").
    ///
    /// # Returns
    /// A `Script` wrapping the decoded bytes, or an error if the hex is invalid.
    pub fn from_hex(hex_str: &str) -> Result<Self, ScriptError> {
        let bytes = hex::decode(hex_str)
            .map_err(|e| ScriptError::InvalidHex(e.to_string()))?;
        Ok(Script(bytes))
    }

    /// Create a script from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Script(bytes.to_vec())
    }

    /// The single-signature verification script of `pub_key`:
    /// `PUSHBYTES33 <compressed key> CHECKSIG`.
    pub fn single_sig(pub_key: &PublicKey) -> Self {
        let mut bytes = Vec::with_capacity(COMPRESSED_LEN + 2);
        bytes.push(PUSHBYTES33);
        bytes.extend_from_slice(&pub_key.to_compressed());
        bytes.push(CHECKSIG);
        Script(bytes)
    }

    /// Build an m-of-n multi-signature verification script.
    ///
    /// Keys are sorted by X coordinate then Y before being pushed, so the
    /// resulting script (and therefore its hash and address) does not depend
    /// on the order of `pub_keys`.
    ///
    /// # Arguments
    /// * `m` - Number of signatures required.
    /// * `pub_keys` - The participating keys.
    ///
    /// # Returns
    /// `PUSH(m) <key>... PUSH(n) CHECKMULTISIG`, or an error unless
    /// `1 <= m <= n <= 1024`.
    pub fn multisig(m: usize, pub_keys: &[PublicKey]) -> Result<Self, ScriptError> {
        let n = pub_keys.len();
        if m == 0 || m > n || n > MAX_MULTISIG_KEYS {
            return Err(ScriptError::InvalidMultisig(format!(
                "cannot build {}-of-{} script",
                m, n
            )));
        }
        let mut keys = pub_keys.to_vec();
        keys.sort();

        let mut script = Script::new();
        script.append_push_int(m as i64)?;
        for key in &keys {
            script.append_push_data(&key.to_compressed())?;
        }
        script.append_push_int(n as i64)?;
        script.0.push(CHECKMULTISIG);
        Ok(script)
    }

    /// Build an invocation script pushing each signature in order.
    ///
    /// A single signature yields `PUSHBYTES64 <r || s>`.
    pub fn invocation(signatures: &[Signature]) -> Self {
        let mut bytes = Vec::with_capacity(signatures.len() * 65);
        for sig in signatures {
            bytes.push(PUSHBYTES64);
            bytes.extend_from_slice(&sig.to_bytes());
        }
        Script(bytes)
    }

    // -----------------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------------

    /// Encode the script as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Convert the script to its assembly representation.
    ///
    /// Data pushes appear as hex, opcodes by name, separated by spaces.
    ///
    /// # Returns
    /// The assembly string, or an empty string for empty or malformed scripts.
    pub fn to_asm(&self) -> String {
        match self.chunks() {
            Ok(chunks) => chunks
                .iter()
                .map(ScriptChunk::to_asm_string)
                .collect::<Vec<_>>()
                .join(" "),
            Err(_) => String::new(),
        }
    }

    /// Return a reference to the underlying bytes.
    pub fn to_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the script and return its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Hash160 of the script bytes.
    ///
    /// For a verification script this is the account's script hash, the
    /// value outputs pay to and addresses encode.
    pub fn script_hash(&self) -> UInt160 {
        UInt160::new(hash160(&self.0))
    }

    // -----------------------------------------------------------------------
    // Script classification
    // -----------------------------------------------------------------------

    /// Check if this is a single-signature verification script.
    ///
    /// Pattern: PUSHBYTES33 <33 bytes> CHECKSIG
    pub fn is_single_sig(&self) -> bool {
        let b = &self.0;
        b.len() == 35 && b[0] == PUSHBYTES33 && b[34] == CHECKSIG
    }

    /// If this is a multi-signature verification script, return `(m, n)`.
    ///
    /// Pattern: PUSH(m) <key>... PUSH(n) CHECKMULTISIG with n keys of 33
    /// bytes each and `1 <= m <= n`.
    pub fn multisig_params(&self) -> Option<(usize, usize)> {
        let chunks = self.chunks().ok()?;
        if chunks.len() < 4 || chunks.last()?.op != CHECKMULTISIG {
            return None;
        }
        let m = chunk_to_int(&chunks[0])?;
        let n = chunk_to_int(&chunks[chunks.len() - 2])?;
        let keys = &chunks[1..chunks.len() - 2];
        if keys.len() != n || m == 0 || m > n {
            return None;
        }
        let all_keys = keys
            .iter()
            .all(|c| matches!(&c.data, Some(d) if d.len() == 33) && c.op == PUSHBYTES33);
        if all_keys {
            Some((m, n))
        } else {
            None
        }
    }

    /// Parse the script into a vector of decoded chunks.
    pub fn chunks(&self) -> Result<Vec<ScriptChunk>, ScriptError> {
        decode_script(&self.0)
    }

    // -----------------------------------------------------------------------
    // Mutation / building
    // -----------------------------------------------------------------------

    /// Append data bytes to the script with the minimal push prefix.
    ///
    /// # Returns
    /// `Ok(())` on success, or an error if the data is too large.
    pub fn append_push_data(&mut self, data: &[u8]) -> Result<(), ScriptError> {
        let prefix = push_data_prefix(data.len())?;
        self.0.extend_from_slice(&prefix);
        self.0.extend_from_slice(data);
        Ok(())
    }

    /// Append an integer push.
    ///
    /// -1 and 0..=16 use the dedicated opcodes; anything else is pushed as
    /// minimal little-endian two's-complement bytes.
    pub fn append_push_int(&mut self, n: i64) -> Result<(), ScriptError> {
        if n == -1 {
            self.0.push(PUSHM1);
            return Ok(());
        }
        if let Some(op) = usize::try_from(n).ok().and_then(small_int_op) {
            self.0.push(op);
            return Ok(());
        }
        self.append_push_data(&int_to_le_bytes(n))
    }

    /// Append raw opcodes to the script.
    ///
    /// Rejects push opcodes (PUSHBYTES1..PUSHDATA4), which need their data;
    /// use `append_push_data` for those.
    pub fn append_opcodes(&mut self, opcodes: &[u8]) -> Result<(), ScriptError> {
        for &op in opcodes {
            if (PUSHBYTES1..=PUSHDATA4).contains(&op) {
                return Err(ScriptError::InvalidOpcodeType(opcode_to_string(op)));
            }
        }
        self.0.extend_from_slice(opcodes);
        Ok(())
    }
}

/// Minimal little-endian two's-complement encoding of `n`.
fn int_to_le_bytes(n: i64) -> Vec<u8> {
    let mut bytes = n.to_le_bytes().to_vec();
    while bytes.len() > 1 {
        let last = bytes[bytes.len() - 1];
        let prev = bytes[bytes.len() - 2];
        let redundant = (last == 0x00 && prev & 0x80 == 0) || (last == 0xff && prev & 0x80 != 0);
        if !redundant {
            break;
        }
        bytes.pop();
    }
    bytes
}

fn chunk_to_int(chunk: &ScriptChunk) -> Option<usize> {
    if let Some(v) = small_int_value(chunk.op) {
        return usize::try_from(v).ok();
    }
    let data = chunk.data.as_ref()?;
    if data.is_empty() || data.len() > 8 || data[data.len() - 1] & 0x80 != 0 {
        return None;
    }
    let mut buf = [0u8; 8];
    buf[..data.len()].copy_from_slice(data);
    usize::try_from(u64::from_le_bytes(buf)).ok()
}

impl From<Vec<u8>> for Script {
    fn from(bytes: Vec<u8>) -> Self {
        Script(bytes)
    }
}

impl AsRef<[u8]> for Script {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Script {
    /// Display the script as a lowercase hex string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", self.to_hex())
    }
}

impl serde::Serialize for Script {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Script {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Script::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
