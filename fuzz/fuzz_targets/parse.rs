#![no_main]

use libfuzzer_sys::fuzz_target;
use stew_gettext::Stew;

fuzz_target!(|source: &str| {
    let _ = Stew::from_source("fuzz.stew", source);
});
