use proptest::prelude::*;

use neo_primitives::ec::private_key::PrivateKey;
use neo_primitives::util::{BinaryReader, BinaryWriter, VarInt};
use neo_primitives::{Fixed8, UInt160, UInt256};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn private_key_wif(seed in prop::array::uniform32(any::<u8>())) {
        // Not all 32-byte arrays are valid private keys (must be < curve order, nonzero).
        if let Ok(pk) = PrivateKey::from_bytes(&seed) {
            let pk2 = PrivateKey::from_wif(&pk.to_wif()).unwrap();
            prop_assert_eq!(pk.to_hex(), pk2.to_hex());
        }
    }

    #[test]
    fn ecdsa_sign_verify(
        seed in prop::array::uniform32(any::<u8>()),
        msg in prop::collection::vec(any::<u8>(), 0..256)
    ) {
        if let Ok(pk) = PrivateKey::from_bytes(&seed) {
            let sig = pk.sign(&msg).unwrap();
            prop_assert!(pk.pub_key().verify(&msg, &sig));
            let mut tampered = msg.clone();
            tampered.push(0x00);
            prop_assert!(!pk.pub_key().verify(&tampered, &sig));
        }
    }

    #[test]
    fn uint_display_parse(bytes32 in prop::array::uniform32(any::<u8>()), bytes20 in prop::array::uniform20(any::<u8>())) {
        let id = UInt256::new(bytes32);
        prop_assert_eq!(UInt256::from_hex(&id.to_string()).unwrap(), id);
        let hash = UInt160::new(bytes20);
        prop_assert_eq!(hash.to_string().parse::<UInt160>().unwrap(), hash);
    }

    #[test]
    fn fixed8_display_parse(units in any::<i64>()) {
        let value = Fixed8::from_units(units);
        prop_assert_eq!(Fixed8::from_decimal_str(&value.to_string()).unwrap(), value);
    }

    #[test]
    fn varint_reader_writer(value in any::<u64>()) {
        let mut writer = BinaryWriter::new();
        writer.write_varint(VarInt(value));
        let bytes = writer.into_bytes();
        prop_assert_eq!(bytes.len(), VarInt(value).length());
        let mut reader = BinaryReader::new(&bytes);
        prop_assert_eq!(reader.read_varint().unwrap().value(), value);
        prop_assert_eq!(reader.remaining(), 0);
    }
}
