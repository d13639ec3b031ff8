#![no_main]
use fast5_pack::huffman;
use fast5_pack::params::{CODE_DIFF, SIZE};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Fuzz the decoder with arbitrary bytes under every shipped map.
    // The decoder must never panic, only return errors.
    if data.is_empty() {
        return;
    }
    let names = huffman::map_names();
    let name = names[data[0] as usize % names.len()];
    let diff = data[0] & 0x80 != 0;
    let payload = &data[1..];

    let coder = huffman::coder(name).unwrap();
    let (_, mut params) = coder.encode::<i16>(&[], diff);
    params.insert(SIZE, payload.len());
    params.insert(CODE_DIFF, if diff { "1" } else { "0" });

    let _ = coder.decode::<i16>(payload, &params);
    let _ = coder.decode::<u8>(payload, &params);
    let _ = coder.decode::<i64>(payload, &params);
});
