//! Fuzz target for primitive type tests.
//!
//! Every test is total and `string` and `any` accept everything.

#![no_main]

use fiscal_package::PrimitiveType;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let value = String::from_utf8_lossy(data);

    for t in PrimitiveType::ALL {
        let _ = t.test(&value);
    }
    assert!(PrimitiveType::String.test(&value));
    assert!(PrimitiveType::Any.test(&value));
});
