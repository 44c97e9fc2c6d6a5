#![no_main]

use std::collections::HashSet;

use libfuzzer_sys::fuzz_target;
use moodbox_core::{Endpoints, LifecyclePhase, sanitize_label};
use moodbox_dom::MemoryDocument;
use moodbox_runtime::{FeedbackWidget, WidgetOptions};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(options) = WidgetOptions::from_json_str(text) else {
        return;
    };

    let mut widget = FeedbackWidget::new(MemoryDocument::with_containers(["entry"]));
    match widget.init("entry", Some(Endpoints::default()), options) {
        Ok(()) => {
            let state = widget.snapshot();
            assert_eq!(state.phase, LifecyclePhase::Ready);

            // Every button id is unique and present, also against the form's ids.
            let html = widget.host().body_html();
            let mut ids = HashSet::new();
            for entry in state.catalog.iter() {
                assert!(!entry.label.is_empty());
                let id = format!("entry-{}", sanitize_label(&entry.label));
                assert!(ids.insert(id.clone()), "duplicate id {id}");
                assert!(widget.host().element(&id).is_some(), "missing button {id}");
                assert!(html.matches(&format!("id=\"{id}\"")).count() <= 1, "shadowed id {id}");
            }
        }
        Err(_) => {
            assert_eq!(widget.phase(), LifecyclePhase::Uninitialized);
            assert_eq!(widget.host().inner_html("entry").as_deref(), Some(""));
        }
    }
});
