//! NEO 2 virtual machine opcodes used by witness and contract scripts.
//!
//! Only the constants, push and signature-check opcodes are named here;
//! anything else renders as `UNKNOWN_0x..` in assembly output.

/// Push an empty byte array.
pub const PUSH0: u8 = 0x00;
/// Alias of `PUSH0`.
pub const PUSHF: u8 = PUSH0;
/// Push the next byte.
pub const PUSHBYTES1: u8 = 0x01;
/// Push the next 20 bytes (a script hash).
pub const PUSHBYTES20: u8 = 0x14;
/// Push the next 33 bytes (a compressed public key).
pub const PUSHBYTES33: u8 = 0x21;
/// Push the next 64 bytes (an `r || s` signature).
pub const PUSHBYTES64: u8 = 0x40;
/// Push the next 75 bytes; the largest direct push.
pub const PUSHBYTES75: u8 = 0x4b;
/// The next byte is the number of bytes to push.
pub const PUSHDATA1: u8 = 0x4c;
/// The next two bytes (LE) are the number of bytes to push.
pub const PUSHDATA2: u8 = 0x4d;
/// The next four bytes (LE) are the number of bytes to push.
pub const PUSHDATA4: u8 = 0x4e;
/// Push the number -1.
pub const PUSHM1: u8 = 0x4f;
/// Push the number 1.
pub const PUSH1: u8 = 0x51;
/// Alias of `PUSH1`.
pub const PUSHT: u8 = PUSH1;
pub const PUSH2: u8 = 0x52;
pub const PUSH3: u8 = 0x53;
pub const PUSH4: u8 = 0x54;
pub const PUSH5: u8 = 0x55;
pub const PUSH6: u8 = 0x56;
pub const PUSH7: u8 = 0x57;
pub const PUSH8: u8 = 0x58;
pub const PUSH9: u8 = 0x59;
pub const PUSH10: u8 = 0x5a;
pub const PUSH11: u8 = 0x5b;
pub const PUSH12: u8 = 0x5c;
pub const PUSH13: u8 = 0x5d;
pub const PUSH14: u8 = 0x5e;
pub const PUSH15: u8 = 0x5f;
/// Push the number 16.
pub const PUSH16: u8 = 0x60;

pub const NOP: u8 = 0x61;
pub const JMP: u8 = 0x62;
pub const RET: u8 = 0x66;
pub const APPCALL: u8 = 0x67;
pub const SYSCALL: u8 = 0x68;
pub const TAILCALL: u8 = 0x69;

pub const CHECKSIG: u8 = 0xac;
pub const VERIFY: u8 = 0xad;
pub const CHECKMULTISIG: u8 = 0xae;
pub const THROW: u8 = 0xf0;
pub const THROWIFNOT: u8 = 0xf1;

/// Whether `op` is one of `PUSH0`, `PUSHM1` or `PUSH1..=PUSH16`.
pub fn is_small_int_op(op: u8) -> bool {
    op == PUSH0 || op == PUSHM1 || (PUSH1..=PUSH16).contains(&op)
}

/// The opcode that pushes the small integer `n` (0..=16), if any.
pub fn small_int_op(n: usize) -> Option<u8> {
    match n {
        0 => Some(PUSH0),
        1..=16 => Some(PUSH1 + (n as u8) - 1),
        _ => None,
    }
}

/// The value pushed by a small-integer opcode, if `op` is one.
pub fn small_int_value(op: u8) -> Option<i8> {
    match op {
        PUSH0 => Some(0),
        PUSHM1 => Some(-1),
        PUSH1..=PUSH16 => Some((op - PUSH1 + 1) as i8),
        _ => None,
    }
}

/// Canonical name of an opcode for assembly output.
pub fn opcode_to_string(op: u8) -> String {
    let name = match op {
        PUSH0 => "PUSH0",
        PUSHBYTES1..=PUSHBYTES75 => return format!("PUSHBYTES{}", op),
        PUSHDATA1 => "PUSHDATA1",
        PUSHDATA2 => "PUSHDATA2",
        PUSHDATA4 => "PUSHDATA4",
        PUSHM1 => "PUSHM1",
        PUSH1..=PUSH16 => return format!("PUSH{}", op - PUSH1 + 1),
        NOP => "NOP",
        JMP => "JMP",
        RET => "RET",
        APPCALL => "APPCALL",
        SYSCALL => "SYSCALL",
        TAILCALL => "TAILCALL",
        CHECKSIG => "CHECKSIG",
        VERIFY => "VERIFY",
        CHECKMULTISIG => "CHECKMULTISIG",
        THROW => "THROW",
        THROWIFNOT => "THROWIFNOT",
        _ => return format!("UNKNOWN_0x{:02x}", op),
    };
    name.to_string()
}
