#![no_main]
use fast5_pack::huffman::CodewordMap;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Table parsing must reject malformed text with errors, never panic.
    let text = String::from_utf8_lossy(data);
    let _ = CodewordMap::parse("fuzzed", &text);
});
