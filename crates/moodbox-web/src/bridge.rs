#![forbid(unsafe_code)]

//! JS-facing conversions that do not need a browser.
//!
//! The wasm exports stringify incoming JS objects and hand them here, so the
//! decoding rules (what counts as "missing", how options errors read) are
//! tested natively.

use moodbox_core::{ConfigurationError, Endpoints, InstanceState, WidgetEvent};
use moodbox_runtime::WidgetOptions;

/// DOM event types the widget listens for.
pub const LISTENED_EVENTS: [&str; 2] = ["click", "keyup"];

/// Decode the `endpoints` argument of `init`.
///
/// `None` (JS `undefined`/`null`) stays `None` so `init` reports
/// `endpoints must be specified`.
pub fn parse_endpoints(json: Option<&str>) -> Result<Option<Endpoints>, ConfigurationError> {
    match json {
        None | Some("null") => Ok(None),
        Some(json) => serde_json::from_str(json)
            .map(Some)
            .map_err(|err| ConfigurationError::InvalidOptions(format!("endpoints: {err}"))),
    }
}

/// Decode the optional catalog/text argument of `init`.
pub fn parse_options(json: Option<&str>) -> Result<WidgetOptions, ConfigurationError> {
    match json {
        None | Some("null") => Ok(WidgetOptions::default()),
        Some(json) => Ok(WidgetOptions::from_json_str(json)?),
    }
}

/// Snapshot as the JSON text handed to `JSON.parse` for `getState()`.
pub fn state_json(state: &InstanceState) -> Result<String, serde_json::Error> {
    serde_json::to_string(state)
}

/// Translate a delegated DOM event into a widget event.
///
/// `target_id` is the id of the nearest element carrying one; `value` is the
/// text area value for key events.
#[must_use]
pub fn widget_event(kind: &str, target_id: &str, value: Option<String>) -> Option<WidgetEvent> {
    if target_id.is_empty() {
        return None;
    }
    match kind {
        "click" => Some(WidgetEvent::click(target_id)),
        "keyup" => value.map(|value| WidgetEvent::key_up(target_id, value)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn absent_endpoints_stay_absent() {
        assert_eq!(parse_endpoints(None), Ok(None));
        assert_eq!(parse_endpoints(Some("null")), Ok(None));
    }

    #[test]
    fn partial_endpoints_fill_with_empty_strings() {
        let endpoints = parse_endpoints(Some(r#"{"emoji":"/e","feedback":"/f"}"#))
            .unwrap()
            .unwrap();
        assert_eq!(endpoints, Endpoints::new("/e", "/f", ""));
    }

    #[test]
    fn malformed_endpoints_are_invalid_options() {
        assert!(matches!(
            parse_endpoints(Some("[1,2]")),
            Err(ConfigurationError::InvalidOptions(msg)) if msg.starts_with("endpoints:")
        ));
    }

    #[test]
    fn options_default_when_absent() {
        assert_eq!(parse_options(None).unwrap(), WidgetOptions::default());
        assert_eq!(
            parse_options(Some(r#"{"introText":"Hi"}"#)).unwrap(),
            WidgetOptions::new().intro_text("Hi")
        );
    }

    #[test]
    fn state_json_uses_camel_case_keys() {
        let json = state_json(&InstanceState::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("lifecyclePhase").is_some());
        assert!(value["responses"].get("selectedEmojis").is_some());
    }

    #[test]
    fn event_translation() {
        assert_eq!(widget_event("click", "entry-happy", None), Some(WidgetEvent::click("entry-happy")));
        assert_eq!(
            widget_event("keyup", "entry-feedback-textarea", Some("hi".into())),
            Some(WidgetEvent::key_up("entry-feedback-textarea", "hi"))
        );
        assert_eq!(widget_event("keyup", "entry-happy", None), None);
        assert_eq!(widget_event("click", "", None), None);
        assert_eq!(widget_event("mouseover", "entry-happy", None), None);
    }
}
