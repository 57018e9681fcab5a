//! End-to-end tests for the neo-transaction crate.
//!
//! Known transfers between two fixed keys, checked byte for byte against
//! independently computed encodings and txids.

use neo_primitives::ec::PrivateKey;
use neo_primitives::{Fixed8, UInt160, UInt256};
use neo_script::Address;

use crate::attribute::AttributeUsage;
use crate::native_asset::{assemble, NativeAsset};
use crate::signer::{sign, SignedTransaction};
use crate::transaction::{transaction_id, ContractTransaction};
use crate::utxo::Unspent;
use crate::{FeePolicy, TransactionError};

// -----------------------------------------------------------------------
// Fixed accounts and vectors
// -----------------------------------------------------------------------

const KEY_A: &str = "1dd37fba80fec4e6a6f13fd708d8dcb3b29def768017052f6c930fa1c5d90bbb";
const ADDRESS_A: &str = "AK2nJJpJr6o664CWJKi1QRXjqeic2zRp8y";
const ADDRESS_B: &str = "AVf4UGKevVrMR1j3UkPsuoYKSC4ocoAkKx";

const PREV_TXID: &str = "4f1b8d2e0c7a5e3f6b9d1c0a2e4f6a8b0c1d2e3f4a5b6c7d8e9f0a1b2c3d4e5f";

/// 3 NEO to B out of a 10 NEO output, 7 NEO change to A.
const TRANSFER_WITH_CHANGE: &str = "800000015f4e3d2c1b0a9f8e7d6c5b4a3f2e1d0c8b6a4f2e0a1c9d6b3f5e7a0c2e8d1b4f0000029b7cffdaa674beae0f930ebe6085af9093e5fe56b34a5c220ccdcf6efc336fc500a3e111000000009847e26135152874355e324afd5cc99f002acb339b7cffdaa674beae0f930ebe6085af9093e5fe56b34a5c220ccdcf6efc336fc50027b9290000000023ba2703c53263e8d6e522dc32203339dcd8eee9";
const TRANSFER_WITH_CHANGE_TXID: &str =
    "758ffbb79424c1dbe30d2574ed94cb59cff48650b79d67bd654908b088503e4e";

/// 3 NEO to B out of a 3 NEO output.
const EXACT_TRANSFER: &str = "800000015f4e3d2c1b0a9f8e7d6c5b4a3f2e1d0c8b6a4f2e0a1c9d6b3f5e7a0c2e8d1b4f0000019b7cffdaa674beae0f930ebe6085af9093e5fe56b34a5c220ccdcf6efc336fc500a3e111000000009847e26135152874355e324afd5cc99f002acb33";
const EXACT_TRANSFER_TXID: &str =
    "0539e82c3172570bba825cc9cdec797e6c605dabb63ebc5ec4edba81dad3184a";

/// 3 GAS to B out of a 10 GAS output at index 1, fee 0.5, remark "hello".
const GAS_WITH_FEE_AND_REMARK: &str = "800001f00568656c6c6f015f4e3d2c1b0a9f8e7d6c5b4a3f2e1d0c8b6a4f2e0a1c9d6b3f5e7a0c2e8d1b4f010002e72d286979ee6cb1b7e65dfddfb2e384100b8d148e7758de42e4168b71792c6000a3e111000000009847e26135152874355e324afd5cc99f002acb33e72d286979ee6cb1b7e65dfddfb2e384100b8d148e7758de42e4168b71792c608036be260000000023ba2703c53263e8d6e522dc32203339dcd8eee9";
const GAS_WITH_FEE_AND_REMARK_TXID: &str =
    "fbffbfa37951f26f2704f3baf59e11b0fbf349a1944bc96892c719cf322a34ce";

fn key_a() -> PrivateKey {
    PrivateKey::from_hex(KEY_A).expect("valid key")
}

fn script_hash(address: &str) -> UInt160 {
    Address::from_string(address).expect("valid address").script_hash
}

fn units(whole: i64) -> Fixed8 {
    Fixed8::from_int(whole).expect("in range")
}

fn single_unspent(asset: UInt256, index: u16, value: Fixed8) -> Vec<Unspent> {
    vec![Unspent::new(UInt256::from_hex(PREV_TXID).expect("valid txid"), index, asset, value)]
}

// -----------------------------------------------------------------------
// Assembly and encoding
// -----------------------------------------------------------------------

/// One 10 NEO output, send 3 with no fee: one input, recipient then change.
#[test]
fn test_transfer_with_change() {
    let tx = assemble(
        &script_hash(ADDRESS_A),
        &NativeAsset::NEO,
        units(3),
        &script_hash(ADDRESS_B),
        &single_unspent(NativeAsset::NEO, 0, units(10)),
        &[],
        Fixed8::ZERO,
    )
    .expect("should assemble");

    assert_eq!(tx.inputs.len(), 1);
    assert_eq!(tx.outputs.len(), 2);
    assert!(tx.attributes.is_empty());
    assert_eq!(tx.outputs[0].value, units(3));
    assert_eq!(tx.outputs[0].script_hash, script_hash(ADDRESS_B));
    assert_eq!(tx.outputs[1].value, units(7));
    assert_eq!(tx.outputs[1].script_hash, script_hash(ADDRESS_A));

    let bytes = tx.to_bytes();
    assert_eq!(bytes.len(), 159);
    assert_eq!(hex::encode(&bytes), TRANSFER_WITH_CHANGE);
    assert_eq!(tx.txid_hex(), TRANSFER_WITH_CHANGE_TXID);
    assert_eq!(transaction_id(&bytes), TRANSFER_WITH_CHANGE_TXID);
}

/// An exactly covering output produces no change output.
#[test]
fn test_exact_transfer_has_no_change() {
    let tx = assemble(
        &script_hash(ADDRESS_A),
        &NativeAsset::NEO,
        units(3),
        &script_hash(ADDRESS_B),
        &single_unspent(NativeAsset::NEO, 0, units(3)),
        &[],
        Fixed8::ZERO,
    )
    .expect("should assemble");

    assert_eq!(tx.inputs.len(), 1);
    assert_eq!(tx.outputs.len(), 1);
    assert_eq!(tx.size(), 99);
    assert_eq!(tx.to_hex(), EXACT_TRANSFER);
    assert_eq!(tx.txid_hex(), EXACT_TRANSFER_TXID);
}

/// A 2 NEO output cannot cover 3: the shortfall is 1.
#[test]
fn test_insufficient_funds_shortfall() {
    let err = assemble(
        &script_hash(ADDRESS_A),
        &NativeAsset::NEO,
        units(3),
        &script_hash(ADDRESS_B),
        &single_unspent(NativeAsset::NEO, 0, units(2)),
        &[],
        Fixed8::ZERO,
    )
    .unwrap_err();

    match &err {
        TransactionError::InsufficientFunds { asset, requested, available } => {
            assert_eq!(*asset, NativeAsset::NEO);
            assert_eq!(*requested, units(3));
            assert_eq!(*available, units(2));
        }
        other => panic!("expected InsufficientFunds, got {}", other),
    }
    assert_eq!(err.shortfall(), Some(units(1)));
}

/// GAS with a fee and a remark, through the address-based entry point.
#[test]
fn test_gas_transfer_with_fee_and_remark() {
    let fee = Fixed8::from_decimal_str("0.5").expect("valid fee");
    let native = NativeAsset::new(FeePolicy::new().with_fee(NativeAsset::GAS, fee).expect("fee"));
    let bytes = native
        .generate_raw_tx(
            ADDRESS_A,
            &NativeAsset::GAS,
            units(3),
            ADDRESS_B,
            &single_unspent(NativeAsset::GAS, 1, units(10)),
            &[(AttributeUsage::REMARK, b"hello".to_vec())],
        )
        .expect("should build");

    assert_eq!(hex::encode(&bytes), GAS_WITH_FEE_AND_REMARK);
    assert_eq!(transaction_id(&bytes), GAS_WITH_FEE_AND_REMARK_TXID);

    let tx = ContractTransaction::from_bytes(&bytes).expect("should decode");
    assert_eq!(tx.outputs[1].value.to_string(), "6.5");
    assert_eq!(tx.output_total(&NativeAsset::GAS).unwrap(), Fixed8::from_decimal_str("9.5").unwrap());
}

/// The decoder reproduces exactly what the assembler produced.
#[test]
fn test_decode_vectors() {
    for vector in [TRANSFER_WITH_CHANGE, EXACT_TRANSFER, GAS_WITH_FEE_AND_REMARK] {
        let tx = ContractTransaction::from_hex(vector).expect("should decode");
        assert_eq!(tx.to_hex(), vector);
    }
}

/// Attribute order is part of the signed bytes.
#[test]
fn test_attribute_order_changes_txid() {
    let build = |attrs: &[(AttributeUsage, Vec<u8>)]| {
        assemble(
            &script_hash(ADDRESS_A),
            &NativeAsset::NEO,
            units(1),
            &script_hash(ADDRESS_B),
            &single_unspent(NativeAsset::NEO, 0, units(3)),
            attrs,
            Fixed8::ZERO,
        )
        .expect("should assemble")
    };
    let a = (AttributeUsage::REMARK, b"a".to_vec());
    let b = (AttributeUsage::Remark(1), b"b".to_vec());
    let ab = build(&[a.clone(), b.clone()]);
    let ba = build(&[b.clone(), a.clone()]);
    assert_eq!(ab.txid(), build(&[a, b]).txid());
    assert_ne!(ab.txid(), ba.txid());
}

// -----------------------------------------------------------------------
// Signing
// -----------------------------------------------------------------------

/// The signed payload is the unsigned bytes plus a 103-byte witness list,
/// and the txid ignores the witness.
#[test]
fn test_signed_payload_layout() {
    let native = NativeAsset::default();
    let signed = native
        .send_native_asset_raw_transaction(
            &key_a(),
            &NativeAsset::NEO,
            units(3),
            ADDRESS_B,
            &single_unspent(NativeAsset::NEO, 0, units(10)),
            &[],
        )
        .expect("should sign");

    let payload = signed.to_bytes();
    assert_eq!(payload.len(), 159 + 103);
    assert_eq!(hex::encode(&payload[..159]), TRANSFER_WITH_CHANGE);
    assert_eq!(signed.txid_hex(), TRANSFER_WITH_CHANGE_TXID);
    assert_eq!(signed.txid_hex().len(), 64);

    let suffix = &payload[159..];
    assert_eq!(&suffix[..3], &[0x01, 0x41, 0x40]);
    assert_eq!(&suffix[67..69], &[0x23, 0x21]);
    assert_eq!(suffix[102], 0xac);
    assert!(signed.verify());
}

/// RFC6979 signing gives identical payloads for identical input.
#[test]
fn test_signing_is_deterministic() {
    let tx = ContractTransaction::from_hex(EXACT_TRANSFER).expect("should decode");
    let first = sign(&key_a(), tx.clone()).expect("should sign");
    let second = sign(&key_a(), tx).expect("should sign");
    assert_eq!(first.to_hex(), second.to_hex());
}

/// A signed payload decodes back to the same transaction and witnesses.
#[test]
fn test_signed_payload_decodes() {
    let native = NativeAsset::default();
    let unsigned = hex::decode(GAS_WITH_FEE_AND_REMARK).expect("hex");
    let signed = native.sign_raw_transaction(&key_a(), &unsigned).expect("should sign");

    let decoded = SignedTransaction::from_hex(&signed.to_hex()).expect("should decode");
    assert_eq!(decoded, signed);
    assert_eq!(decoded.txid_hex(), GAS_WITH_FEE_AND_REMARK_TXID);
    assert_eq!(decoded.witnesses()[0].script_hash(), script_hash(ADDRESS_A));
    assert!(decoded.verify());
}
