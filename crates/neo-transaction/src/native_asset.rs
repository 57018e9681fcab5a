//! Native asset transfers: assembly and the build/sign entry points.

use neo_primitives::ec::PrivateKey;
use neo_primitives::{Fixed8, UInt160, UInt256};
use neo_script::Address;

use crate::asset::{GAS_ASSET_ID, NEO_ASSET_ID};
use crate::attribute::{encode_attributes, AttributeUsage};
use crate::fee::FeePolicy;
use crate::output::TransactionOutput;
use crate::signer::{self, SignedTransaction};
use crate::transaction::ContractTransaction;
use crate::utxo::{self, Unspent};
use crate::TransactionError;

/// Compose an unsigned transfer of `amount` of `asset` from `sender` to
/// `recipient`.
///
/// Inputs come from [`utxo::select`] over `unspent`. The first output pays
/// the recipient; a second returns change to the sender when there is any.
/// Attributes are encoded in the order given. No I/O, no cryptography.
///
/// # Arguments
/// * `sender` - Script hash that owns `unspent` and receives change.
/// * `asset` - The native asset to send.
/// * `amount` - Amount to send; must be positive.
/// * `recipient` - Script hash to pay. May equal `sender`.
/// * `unspent` - The sender's unspent outputs, in preference order.
/// * `attributes` - Ordered (usage, payload) pairs.
/// * `fee` - Network fee paid in `asset`.
///
/// # Returns
/// The unsigned transaction, or `InvalidAmount`, `InvalidAttribute` or
/// `InsufficientFunds`.
pub fn assemble(
    sender: &UInt160,
    asset: &UInt256,
    amount: Fixed8,
    recipient: &UInt160,
    unspent: &[Unspent],
    attributes: &[(AttributeUsage, Vec<u8>)],
    fee: Fixed8,
) -> Result<ContractTransaction, TransactionError> {
    if !amount.is_positive() {
        return Err(TransactionError::InvalidAmount(format!(
            "amount must be positive, got {}",
            amount
        )));
    }
    let attributes = encode_attributes(attributes)?;
    let selection = utxo::select(unspent, asset, amount, fee)?;

    let mut outputs = vec![TransactionOutput::new(*asset, amount, *recipient)?];
    if selection.change.is_positive() {
        outputs.push(TransactionOutput::new(*asset, selection.change, *sender)?);
    }

    tracing::debug!(
        asset = %asset,
        amount = %amount,
        fee = %fee,
        inputs = selection.inputs.len(),
        selected = %selection.total,
        change = %selection.change,
        "assembled native asset transfer"
    );

    ContractTransaction::new(attributes, selection.inputs, outputs)
}

/// Builds and signs native asset transfers under one fee policy.
///
/// # Example
///
/// ```
/// use neo_transaction::{FeePolicy, NativeAsset};
///
/// let native = NativeAsset::new(FeePolicy::new());
/// assert_eq!(native.fee_policy().fee(&NativeAsset::NEO).to_string(), "0");
/// ```
#[derive(Clone, Debug, Default)]
pub struct NativeAsset {
    fee_policy: FeePolicy,
}

impl NativeAsset {
    /// The NEO governing token.
    pub const NEO: UInt256 = NEO_ASSET_ID;

    /// The GAS utility token.
    pub const GAS: UInt256 = GAS_ASSET_ID;

    /// Create a builder that charges fees from `fee_policy`.
    pub fn new(fee_policy: FeePolicy) -> Self {
        NativeAsset { fee_policy }
    }

    /// The fee policy applied to every transfer.
    pub fn fee_policy(&self) -> &FeePolicy {
        &self.fee_policy
    }

    /// Assemble an unsigned transfer between two addresses.
    ///
    /// # Arguments
    /// * `from` - Sender address; change goes back here.
    /// * `asset` - Asset id, usually [`NativeAsset::NEO`] or [`NativeAsset::GAS`].
    /// * `amount` - Amount to send.
    /// * `to` - Recipient address.
    /// * `unspent` - The sender's unspent outputs.
    /// * `attributes` - Ordered (usage, payload) pairs.
    ///
    /// # Returns
    /// The canonical unsigned transaction bytes, or `InvalidAddress` if
    /// either address fails to decode, or any error of [`assemble`].
    pub fn generate_raw_tx(
        &self,
        from: &str,
        asset: &UInt256,
        amount: Fixed8,
        to: &str,
        unspent: &[Unspent],
        attributes: &[(AttributeUsage, Vec<u8>)],
    ) -> Result<Vec<u8>, TransactionError> {
        let sender = Address::from_string(from).map_err(TransactionError::from_address_error)?;
        let recipient = Address::from_string(to).map_err(TransactionError::from_address_error)?;
        let tx = assemble(
            &sender.script_hash,
            asset,
            amount,
            &recipient.script_hash,
            unspent,
            attributes,
            self.fee_policy.fee(asset),
        )?;
        Ok(tx.to_bytes())
    }

    /// Sign transaction bytes produced by [`NativeAsset::generate_raw_tx`].
    ///
    /// # Returns
    /// The signed transaction, or `SerializationError` if `unsigned` does
    /// not decode, or `SigningError`.
    pub fn sign_raw_transaction(
        &self,
        private_key: &PrivateKey,
        unsigned: &[u8],
    ) -> Result<SignedTransaction, TransactionError> {
        let tx = ContractTransaction::from_bytes(unsigned)?;
        signer::sign(private_key, tx)
    }

    /// Build and sign a transfer from the account of `private_key`.
    ///
    /// # Returns
    /// The signed transaction. Its `to_hex()` is the payload for
    /// `sendrawtransaction` and `txid_hex()` tracks it.
    pub fn send_native_asset_raw_transaction(
        &self,
        private_key: &PrivateKey,
        asset: &UInt256,
        amount: Fixed8,
        to: &str,
        unspent: &[Unspent],
        attributes: &[(AttributeUsage, Vec<u8>)],
    ) -> Result<SignedTransaction, TransactionError> {
        let from = Address::from_public_key(&private_key.pub_key()).address_string;
        let unsigned = self.generate_raw_tx(&from, asset, amount, to, unspent, attributes)?;
        self.sign_raw_transaction(private_key, &unsigned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESS_A: &str = "AK2nJJpJr6o664CWJKi1QRXjqeic2zRp8y";
    const ADDRESS_B: &str = "AVf4UGKevVrMR1j3UkPsuoYKSC4ocoAkKx";

    fn unspent(value: i64) -> Vec<Unspent> {
        vec![Unspent::new(
            UInt256::new([9u8; 32]),
            0,
            NativeAsset::NEO,
            Fixed8::from_int(value).unwrap(),
        )]
    }

    #[test]
    fn test_rejects_bad_addresses() {
        let native = NativeAsset::default();
        let amount = Fixed8::from_int(1).unwrap();
        assert!(matches!(
            native.generate_raw_tx("nope", &NativeAsset::NEO, amount, ADDRESS_B, &unspent(5), &[]),
            Err(TransactionError::InvalidAddress(_))
        ));
        assert!(matches!(
            native.generate_raw_tx(
                ADDRESS_A,
                &NativeAsset::NEO,
                amount,
                "14FueoxgWx8wH5zWjg3gFYGeN3nudTt3fr",
                &unspent(5),
                &[]
            ),
            Err(TransactionError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_rejects_non_positive_amount() {
        let native = NativeAsset::default();
        for units in [0, -1] {
            assert!(matches!(
                native.generate_raw_tx(
                    ADDRESS_A,
                    &NativeAsset::NEO,
                    Fixed8::from_units(units),
                    ADDRESS_B,
                    &unspent(5),
                    &[]
                ),
                Err(TransactionError::InvalidAmount(_))
            ));
        }
    }

    #[test]
    fn test_self_transfer_allowed() {
        let sender = Address::from_string(ADDRESS_A).unwrap().script_hash;
        let tx = assemble(
            &sender,
            &NativeAsset::NEO,
            Fixed8::from_int(2).unwrap(),
            &sender,
            &unspent(5),
            &[],
            Fixed8::ZERO,
        )
        .unwrap();
        assert_eq!(tx.outputs.len(), 2);
        assert!(tx.outputs.iter().all(|o| o.script_hash == sender));
    }

    #[test]
    fn test_fee_policy_applies() {
        let fee = Fixed8::from_int(1).unwrap();
        let native = NativeAsset::new(FeePolicy::new().with_fee(NativeAsset::NEO, fee).unwrap());
        let bytes = native
            .generate_raw_tx(
                ADDRESS_A,
                &NativeAsset::NEO,
                Fixed8::from_int(3).unwrap(),
                ADDRESS_B,
                &unspent(5),
                &[],
            )
            .unwrap();
        let tx = ContractTransaction::from_bytes(&bytes).unwrap();
        assert_eq!(tx.outputs[1].value, Fixed8::from_int(1).unwrap());

        let err = native
            .generate_raw_tx(
                ADDRESS_A,
                &NativeAsset::NEO,
                Fixed8::from_int(5).unwrap(),
                ADDRESS_B,
                &unspent(5),
                &[],
            )
            .unwrap_err();
        assert_eq!(err.shortfall(), Some(fee));
    }

    #[test]
    fn test_attribute_error_surfaces() {
        let native = NativeAsset::default();
        let err = native
            .generate_raw_tx(
                ADDRESS_A,
                &NativeAsset::NEO,
                Fixed8::from_int(1).unwrap(),
                ADDRESS_B,
                &unspent(5),
                &[(AttributeUsage::Script, vec![0u8; 3])],
            )
            .unwrap_err();
        assert!(matches!(err, TransactionError::InvalidAttribute(_)));
    }

    #[test]
    fn test_sign_raw_rejects_garbage() {
        let native = NativeAsset::default();
        assert!(matches!(
            native.sign_raw_transaction(&PrivateKey::new(), &[0x80]),
            Err(TransactionError::SerializationError(_))
        ));
    }
}
