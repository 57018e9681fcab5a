use proptest::prelude::*;

use neo_primitives::base58;
use neo_primitives::ec::PrivateKey;
use neo_primitives::UInt160;
use neo_script::chunk::decode_script;
use neo_script::{Address, Script};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn script_hex_roundtrip(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let script = Script::from_bytes(&data);
        let script2 = Script::from_hex(&script.to_hex()).unwrap();
        prop_assert_eq!(script.to_bytes(), script2.to_bytes());
    }

    #[test]
    fn push_data_decodes_to_single_chunk(data in prop::collection::vec(any::<u8>(), 1..600)) {
        let mut script = Script::new();
        script.append_push_data(&data).unwrap();
        let chunks = decode_script(script.to_bytes()).unwrap();
        prop_assert_eq!(chunks.len(), 1);
        prop_assert_eq!(chunks[0].data.as_deref(), Some(&data[..]));
    }

    #[test]
    fn address_from_any_script_hash(bytes in prop::array::uniform20(any::<u8>())) {
        let hash = UInt160::new(bytes);
        let addr = Address::from_script_hash(hash);
        prop_assert!(addr.address_string.starts_with('A'));
        prop_assert_eq!(addr.address_string.len(), 34);
        let parsed = Address::from_string(&addr.address_string).unwrap();
        prop_assert_eq!(parsed.script_hash, hash);
    }

    #[test]
    fn address_of_any_key(seed in prop::array::uniform32(any::<u8>())) {
        if let Ok(key) = PrivateKey::from_bytes(&seed) {
            let script = Script::single_sig(&key.pub_key());
            let address = Address::from_public_key(&key.pub_key()).address_string;
            prop_assert_eq!(address.len(), 34);
            prop_assert!(address.starts_with('A'));
            let decoded = base58::check_decode(&address).unwrap();
            prop_assert_eq!(decoded[0], neo_script::address::ADDRESS_VERSION);
            let script_hash = script.script_hash();
            prop_assert_eq!(&decoded[1..], script_hash.as_bytes());
        }
    }
}
