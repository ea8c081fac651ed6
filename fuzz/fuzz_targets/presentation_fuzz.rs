#![no_main]
use gattcodec::presentation::{DESCRIPTOR_LEN, PresentationFormat, display_value};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Descriptor followed by the value it describes.
    let split = data.len().min(DESCRIPTOR_LEN);
    let (descriptor, value) = data.split_at(split);
    let pf = PresentationFormat::parse(descriptor).ok();
    if let Some(pf) = &pf {
        let _ = pf.format_value(value);
    }
    let _ = display_value(pf.as_ref(), value);
    let _ = display_value(None, data);
});
