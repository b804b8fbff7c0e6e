use voxell_rng::rng::XorShift128;

use crate::mutator::Mutator;
use crate::registered::RegisteredCompressor;

const SHORT_DATA: &[u8] = b"Hello, World!";
const LONG_DATA: &[u8] =
    b"This is a longer string to test the huffman coding algorithm. It should be able to handle various lengths and characters.";
const RNG_DATA: &[u8] = &const {
    let mut arr = [0u8; 1000];
    let mut rng = XorShift128::new(0xdeadcafe);
    let mut i = 0;
    while i < 1000 {
        let data = rng.peek_next_u64();
        arr[i] = (data & 0xFF) as u8;
        rng = XorShift128::new(data);
        i += 1;
    }
    arr
};
const ALL_BYTES: &[u8] = &const {
    let mut arr = [0u8; 512];
    let mut i = 0;
    while i < 512 {
        arr[i] = (i % 256) as u8;
        i += 1;
    }
    arr
};
const REPEATING_DATA: &[u8] = b"a baba da babble da dabble babble doo bee babble dabble dooble dee boo dooble daddle boo";
const SINGLE_SYMBOL_DATA: &[u8] = b"zzzzzzzzzzzzzzzzzzzzz";
const SINGLE_BYTE_DATA: &[u8] = b"\x00";
const EMPTY_DATA: &[u8] = &[];

const TEST_CASES: &[(&[u8], &str)] = &[
    (REPEATING_DATA, "repeating data"),
    (SHORT_DATA, "short data"),
    (LONG_DATA, "long data"),
    (RNG_DATA, "rng data"),
    (ALL_BYTES, "every byte value"),
    (SINGLE_SYMBOL_DATA, "single symbol"),
    (SINGLE_BYTE_DATA, "single byte"),
    (EMPTY_DATA, "empty data"),
];

pub fn roundtrip_test(mut framing: RegisteredCompressor) {
    for &(test_case, test_name) in TEST_CASES {
        match framing.test_roundtrip(test_case) {
            Ok(eq) => {
                eprintln!(
                    "Compression ratio for {} with {}: {:.2}%",
                    test_name,
                    framing.name,
                    eq.ratio() * 100.0
                );

                assert!(
                    eq.is_successful(),
                    "Roundtrip test for {} failed at {}:\n\tExpected: {:?}\n\tGot: {:?}\n\tCompressed: {:?}",
                    framing.name,
                    test_name,
                    eq.get_original(),
                    eq.get_decompressed(),
                    eq.get_compressed(),
                );
            }
            Err(e) => {
                panic!(
                    "Fatal error while trying to compress/decompress {} with {}: {:#}",
                    test_name, framing.name, e
                );
            }
        }
    }
}

#[test]
fn packed_beats_raw_on_text() {
    let mut framing = crate::algorithms::packed::PackedHuffman;
    let text = REPEATING_DATA.repeat(50);
    let result = framing.test_roundtrip(&text).unwrap();
    assert!(result.is_successful());
    assert!(result.get_compressed().len() < text.len());
}

#[test]
fn empty_input_roundtrips_to_empty_output() {
    for framing in crate::registered::ALL_FRAMINGS {
        let result = framing.clone().test_roundtrip(EMPTY_DATA).unwrap();
        assert!(result.get_compressed().is_empty());
        assert!(result.get_decompressed().is_empty());
    }
}
