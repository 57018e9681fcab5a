//! Per-asset network fee overrides.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use neo_primitives::{Fixed8, UInt256};

use crate::TransactionError;

/// Immutable table of network fees keyed by asset.
///
/// Assets without an entry pay no fee. Built once and handed to the
/// assembler; nothing mutates it afterwards.
///
/// # Example
///
/// ```
/// use neo_primitives::Fixed8;
/// use neo_transaction::asset::GAS_ASSET_ID;
/// use neo_transaction::FeePolicy;
///
/// let policy = FeePolicy::new()
///     .with_fee(GAS_ASSET_ID, Fixed8::from_decimal_str("0.001").unwrap())
///     .unwrap();
/// assert_eq!(policy.fee(&GAS_ASSET_ID).to_string(), "0.001");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<UInt256, Fixed8>", into = "BTreeMap<UInt256, Fixed8>")]
pub struct FeePolicy {
    overrides: BTreeMap<UInt256, Fixed8>,
}

impl FeePolicy {
    /// A policy with no overrides; every fee is zero.
    pub fn new() -> Self {
        FeePolicy::default()
    }

    /// Return a copy of this policy with `asset` charged `fee`.
    ///
    /// # Returns
    /// The new policy, or `InvalidAmount` if `fee` is negative.
    pub fn with_fee(mut self, asset: UInt256, fee: Fixed8) -> Result<Self, TransactionError> {
        if fee.is_negative() {
            return Err(TransactionError::InvalidAmount(format!(
                "network fee for {} is negative: {}",
                asset, fee
            )));
        }
        self.overrides.insert(asset, fee);
        Ok(self)
    }

    /// The network fee for `asset`, zero when none was configured.
    pub fn fee(&self, asset: &UInt256) -> Fixed8 {
        self.overrides.get(asset).copied().unwrap_or(Fixed8::ZERO)
    }
}

impl TryFrom<BTreeMap<UInt256, Fixed8>> for FeePolicy {
    type Error = TransactionError;

    fn try_from(map: BTreeMap<UInt256, Fixed8>) -> Result<Self, Self::Error> {
        map.into_iter()
            .try_fold(FeePolicy::new(), |policy, (asset, fee)| policy.with_fee(asset, fee))
    }
}

impl From<FeePolicy> for BTreeMap<UInt256, Fixed8> {
    fn from(policy: FeePolicy) -> Self {
        policy.overrides
    }
}
