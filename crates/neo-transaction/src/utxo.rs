//! Unspent outputs and first-fit input selection.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use neo_primitives::{Fixed8, UInt256};

use crate::input::TransactionInput;
use crate::TransactionError;

/// A spendable output the sender is known to hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Unspent {
    /// Id of the transaction that created the output.
    pub txid: UInt256,

    /// Index of the output within that transaction.
    #[serde(alias = "n")]
    pub index: u16,

    /// The asset the output holds.
    #[serde(rename = "asset")]
    pub asset_id: UInt256,

    /// Amount in minor units.
    pub value: Fixed8,
}

impl Unspent {
    /// Describe output `index` of `txid` holding `value` of `asset_id`.
    pub fn new(txid: UInt256, index: u16, asset_id: UInt256, value: Fixed8) -> Self {
        Unspent { txid, index, asset_id, value }
    }

    /// The input that spends this output.
    pub fn to_input(&self) -> TransactionInput {
        TransactionInput::new(self.txid, self.index)
    }
}

/// Outcome of a successful selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    /// Inputs in the order their outputs were supplied.
    pub inputs: Vec<TransactionInput>,

    /// Sum of the selected outputs.
    pub total: Fixed8,

    /// `total - amount - fee`. Never negative.
    pub change: Fixed8,
}

/// Pick inputs of `asset` in list order until they cover `amount + fee`.
///
/// Outputs of other assets are ignored, as are non-positive values and
/// repeated (txid, index) pairs. No attempt is made to minimise the number
/// of inputs.
///
/// # Arguments
/// * `unspent` - The sender's known unspent outputs, in preference order.
/// * `asset` - The asset being sent.
/// * `amount` - Amount to transfer; must be positive.
/// * `fee` - Network fee in the same asset; must not be negative.
///
/// # Returns
/// The chosen inputs with their total and change, or `InsufficientFunds`
/// carrying `amount + fee` and the total available.
pub fn select(
    unspent: &[Unspent],
    asset: &UInt256,
    amount: Fixed8,
    fee: Fixed8,
) -> Result<Selection, TransactionError> {
    if !amount.is_positive() {
        return Err(TransactionError::InvalidAmount(format!(
            "amount must be positive, got {}",
            amount
        )));
    }
    if fee.is_negative() {
        return Err(TransactionError::InvalidAmount(format!(
            "fee must not be negative, got {}",
            fee
        )));
    }
    let required = amount
        .checked_add(fee)
        .ok_or_else(|| TransactionError::InvalidAmount("amount plus fee overflows".to_string()))?;

    let mut seen = HashSet::new();
    let mut inputs = Vec::new();
    let mut total = Fixed8::ZERO;
    for utxo in unspent {
        if &utxo.asset_id != asset || !utxo.value.is_positive() {
            continue;
        }
        if !seen.insert((utxo.txid, utxo.index)) {
            continue;
        }
        total = total.checked_add(utxo.value).ok_or_else(|| {
            TransactionError::InvalidAmount("unspent total overflows".to_string())
        })?;
        inputs.push(utxo.to_input());
        if total >= required {
            break;
        }
    }

    if total < required {
        return Err(TransactionError::InsufficientFunds {
            asset: *asset,
            requested: required,
            available: total,
        });
    }

    let change = total
        .checked_sub(required)
        .ok_or_else(|| TransactionError::InvalidAmount("change underflows".to_string()))?;
    Ok(Selection { inputs, total, change })
}
