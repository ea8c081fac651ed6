#![no_main]
use gattcodec::codec;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First byte picks the tag, second the offset; the rest is the value.
    // Decoding must never panic, only return no value.
    let [tag, offset, value @ ..] = data else {
        return;
    };
    let offset = usize::from(*offset);
    let _ = codec::decode_int_tag(value, *tag, offset);
    let _ = codec::decode_float_tag(value, *tag, offset);
    let _ = codec::decode_string(value, offset);
});
