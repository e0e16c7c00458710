#![no_main]

use libfuzzer_sys::fuzz_target;
use relang::cli::commands::InputDocument;
use relang::pipeline::{CompileOptions, compile_events};

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Anything that parses as a document must compile or fail with an error, never panic
        if let Ok(document) = InputDocument::parse(s) {
            let _ = compile_events(&document.into_events(), &CompileOptions::default());
        }
    }
});
