#![no_main]
use fast5_pack::bitpack;
use fast5_pack::params::{BIT_PACKER, CodeParams, NUM_BITS, PACKER, SIZE};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }
    let num_bits = u32::from(data[0]);
    let size = usize::from(u16::from_le_bytes([data[1], data[2]]));
    let payload = &data[3..];

    let mut params = CodeParams::new();
    params.insert(PACKER, BIT_PACKER);
    params.insert(NUM_BITS, num_bits);
    params.insert(SIZE, size);

    // Inconsistent geometry must come back as errors, never a panic.
    let _ = bitpack::decode::<u16>(payload, &params);
    let _ = bitpack::decode::<u64>(payload, &params);
});
