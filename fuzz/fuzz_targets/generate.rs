#![no_main]

use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;
use stew_gettext::config::LanguageOrder;
use stew_gettext::format::normalized;
use stew_gettext::gettext::CatalogGenerator;
use stew_gettext::Stew;
use stew_gettext_fuzz::{create_source, StewLine};

fuzz_target!(|lines: Vec<StewLine>| {
    let Ok(stew) = Stew::from_source("fuzz.stew", &create_source(&lines)) else {
        return;
    };

    let documents = [stew];
    let generator = CatalogGenerator::new(&documents);
    for lang in generator.languages() {
        // Every entry ends with an empty line.
        let body = generator.body(lang).collect::<String>();
        assert!(body.is_empty() || body.ends_with("\n\n"));
    }

    // Normalizing keeps the content and is idempotent.
    let order = LanguageOrder::default();
    let stew = &documents[0];
    let output = normalized(stew, &order, None);
    let reparsed = Stew::from_source("fuzz.stew", &output).expect("normalized output parses");
    assert_eq!(stew.keys_in_order(), reparsed.keys_in_order());
    for key in stew.keys_in_order() {
        assert_eq!(stew.translations(key), reparsed.translations(key));
    }
    assert_eq!(normalized(&reparsed, &order, None), output);
});
