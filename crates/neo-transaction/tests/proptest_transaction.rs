use proptest::prelude::*;

use neo_primitives::{Fixed8, UInt160, UInt256};
use neo_transaction::asset::{GAS_ASSET_ID, NEO_ASSET_ID};
use neo_transaction::{
    select, AttributeUsage, ContractTransaction, TransactionAttribute, TransactionError,
    TransactionInput, TransactionOutput, Unspent,
};

fn arb_asset() -> impl Strategy<Value = UInt256> {
    prop_oneof![Just(NEO_ASSET_ID), Just(GAS_ASSET_ID)]
}

fn arb_attribute() -> impl Strategy<Value = TransactionAttribute> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 0..80)
            .prop_map(|d| TransactionAttribute::new(AttributeUsage::REMARK, d).unwrap()),
        prop::array::uniform32(any::<u8>())
            .prop_map(|d| TransactionAttribute::new(AttributeUsage::Hash(3), d.to_vec()).unwrap()),
        prop::array::uniform20(any::<u8>())
            .prop_map(|d| TransactionAttribute::new(AttributeUsage::Script, d.to_vec()).unwrap()),
        prop::collection::vec(any::<u8>(), 0..255).prop_map(|d| {
            TransactionAttribute::new(AttributeUsage::DescriptionUrl, d).unwrap()
        }),
    ]
}

fn arb_output() -> impl Strategy<Value = TransactionOutput> {
    (arb_asset(), 1..=i64::MAX, prop::array::uniform20(any::<u8>())).prop_map(
        |(asset, units, hash)| {
            TransactionOutput::new(asset, Fixed8::from_units(units), UInt160::new(hash)).unwrap()
        },
    )
}

/// Strategy to generate a valid random transaction with distinct inputs.
fn arb_transaction() -> impl Strategy<Value = ContractTransaction> {
    let arb_input = (prop::array::uniform32(any::<u8>()), any::<u16>())
        .prop_map(|(hash, index)| TransactionInput::new(UInt256::new(hash), index));

    (
        prop::collection::vec(arb_attribute(), 0..5),
        prop::collection::btree_set(arb_input, 0..6),
        prop::collection::vec(arb_output(), 0..6),
    )
        .prop_map(|(attributes, inputs, outputs)| {
            ContractTransaction::new(attributes, inputs.into_iter().collect(), outputs).unwrap()
        })
}

fn arb_unspent() -> impl Strategy<Value = Vec<Unspent>> {
    prop::collection::vec(
        (any::<u8>(), 0u16..4, arb_asset(), 1i64..2_000_000_000),
        0..12,
    )
    .prop_map(|items| {
        items
            .into_iter()
            .map(|(tag, index, asset, units)| {
                Unspent::new(UInt256::new([tag; 32]), index, asset, Fixed8::from_units(units))
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn codec_roundtrip(tx in arb_transaction()) {
        let bytes = tx.to_bytes();
        let decoded = ContractTransaction::from_bytes(&bytes).unwrap();
        prop_assert_eq!(&decoded, &tx);
        prop_assert_eq!(decoded.to_bytes(), bytes);
    }

    #[test]
    fn txid_stable_and_sensitive(tx in arb_transaction(), flip in any::<usize>()) {
        let bytes = tx.to_bytes();
        prop_assert_eq!(tx.txid(), tx.clone().txid());
        prop_assert_eq!(tx.txid_hex(), neo_transaction::transaction_id(&bytes));

        let mut tampered = bytes.clone();
        let at = flip % tampered.len();
        tampered[at] ^= 0x01;
        prop_assert_ne!(
            neo_transaction::transaction_id(&tampered),
            neo_transaction::transaction_id(&bytes)
        );
    }

    #[test]
    fn selection_covers_or_reports(
        unspent in arb_unspent(),
        asset in arb_asset(),
        amount in 1i64..5_000_000_000,
        fee in 0i64..100_000_000,
    ) {
        let amount = Fixed8::from_units(amount);
        let fee = Fixed8::from_units(fee);
        let required = amount.checked_add(fee).unwrap();

        let mut seen = std::collections::HashSet::new();
        let available: i64 = unspent
            .iter()
            .filter(|u| u.asset_id == asset && seen.insert((u.txid, u.index)))
            .map(|u| u.value.units())
            .sum();

        match select(&unspent, &asset, amount, fee) {
            Ok(sel) => {
                prop_assert!(available >= required.units());
                prop_assert!(sel.total >= required);
                prop_assert_eq!(sel.change.units(), sel.total.units() - required.units());
                prop_assert!(!sel.change.is_negative());

                let mut distinct = std::collections::HashSet::new();
                prop_assert!(sel.inputs.iter().all(|i| distinct.insert(*i)));
            }
            Err(TransactionError::InsufficientFunds { requested, available: reported, .. }) => {
                prop_assert!(available < required.units());
                prop_assert_eq!(requested, required);
                prop_assert_eq!(reported.units(), available);
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }
}
