#![forbid(unsafe_code)]

//! `wasm-bindgen` exports and the `web-sys` hosts behind them.
//!
//! Only compiled on `wasm32` targets.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::JSON;
use moodbox_core::{Dispatch, SubmissionError};
use moodbox_dom::node::children_html;
use moodbox_dom::{DomError, DomHost, DomPatch};
use moodbox_runtime::{EventOutcome, FeedbackWidget, Submitter, dispatch_all};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{
    Document, Element, Event, Headers, HtmlTextAreaElement, Request, RequestInit, Response, Window,
};

use crate::bridge;

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = js_sys::Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = js_sys::Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = match info.location() {
                Some(loc) => format!("panic at {}:{}:{}: {info}", loc.file(), loc.line(), loc.column()),
                None => format!("panic: {info}"),
            };
            console_error(&msg);
        }));
    });
}

fn js_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn js_error(value: JsValue) -> JsError {
    JsError::new(&js_message(&value))
}

/// JSON text of a JS argument. `undefined` and `null` are `None`.
fn stringify(value: Option<&JsValue>) -> Result<Option<String>, JsError> {
    match value {
        None => Ok(None),
        Some(v) if v.is_undefined() || v.is_null() => Ok(None),
        Some(v) => JSON::stringify(v).map(|s| Some(String::from(s))).map_err(js_error),
    }
}

// ---------------------------------------------------------------------------
// Document host
// ---------------------------------------------------------------------------

/// [`DomHost`] over the live browser document.
#[derive(Debug, Clone)]
pub struct BrowserDocument {
    document: Document,
}

impl BrowserDocument {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl DomHost for BrowserDocument {
    fn contains(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn apply(&mut self, patch: &DomPatch) -> Result<(), DomError> {
        let host_error = |err: JsValue| DomError::Host(js_message(&err));
        let el = self
            .document
            .get_element_by_id(patch.target())
            .ok_or_else(|| DomError::ElementNotFound {
                id: patch.target().to_owned(),
            })?;
        match patch {
            DomPatch::ReplaceChildren { children, .. } => el.set_inner_html(&children_html(children)),
            DomPatch::SetClass { class_name, .. } => el.set_class_name(class_name),
            DomPatch::SetAttribute { name, value, .. } => {
                el.set_attribute(name, value).map_err(host_error)?;
            }
            DomPatch::RemoveAttribute { name, .. } => {
                el.remove_attribute(name).map_err(host_error)?;
            }
            // Writing an unchanged value would move the caret.
            DomPatch::SetValue { value, .. } => match el.dyn_ref::<HtmlTextAreaElement>() {
                Some(area) if area.value() != *value => area.set_value(value),
                Some(_) => {}
                None => el.set_text_content(Some(value)),
            },
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

/// [`Submitter`] backed by `window.fetch`. Non-2xx responses are rejections.
#[derive(Debug, Clone)]
pub struct FetchSubmitter {
    window: Window,
}

impl FetchSubmitter {
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Submitter for FetchSubmitter {
    async fn post(&self, dispatch: &Dispatch) -> Result<(), SubmissionError> {
        let transport = |err: JsValue| SubmissionError::Transport {
            endpoint: dispatch.endpoint.clone(),
            message: js_message(&err),
        };

        let headers = Headers::new().map_err(transport)?;
        headers
            .set("Content-Type", "application/json")
            .map_err(transport)?;
        let init = RequestInit::new();
        init.set_method("POST");
        init.set_headers(&headers);
        init.set_body(&JsValue::from_str(&dispatch.body));
        let request = Request::new_with_str_and_init(&dispatch.endpoint, &init).map_err(transport)?;

        let response = JsFuture::from(self.window.fetch_with_request(&request))
            .await
            .map_err(transport)?;
        let response: Response = response.dyn_into().map_err(transport)?;
        if response.ok() {
            Ok(())
        } else {
            Err(SubmissionError::Rejected {
                endpoint: dispatch.endpoint.clone(),
                status: response.status(),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// JS class
// ---------------------------------------------------------------------------

type SharedWidget = Rc<RefCell<FeedbackWidget<BrowserDocument>>>;

/// An event listener that is removed again when dropped.
struct Listener {
    target: Element,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// Run a submission on the local executor. Returns whether one was started.
fn spawn_submission(widget: &SharedWidget, submitter: &FetchSubmitter) -> bool {
    let Ok(mut guard) = widget.try_borrow_mut() else {
        return false;
    };
    let Some(plan) = guard.begin_submission() else {
        return false;
    };
    drop(guard);

    let widget = Rc::clone(widget);
    let submitter = submitter.clone();
    spawn_local(async move {
        let outcome = dispatch_all(&submitter, &plan).await;
        match widget.try_borrow_mut() {
            Ok(mut widget) => {
                widget.finish_submission(outcome);
            }
            Err(_) => tracing::warn!(
                target: "moodbox.widget",
                entry_id = plan.entry_id(),
                "widget busy; submission outcome dropped"
            ),
        }
    });
    true
}

fn on_dom_event(widget: &SharedWidget, submitter: &FetchSubmitter, event: &Event) {
    let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return;
    };
    let Ok(Some(addressed)) = target.closest("[id]") else {
        return;
    };
    let value = addressed
        .dyn_ref::<HtmlTextAreaElement>()
        .map(HtmlTextAreaElement::value);
    let Some(widget_event) = bridge::widget_event(&event.type_(), &addressed.id(), value) else {
        return;
    };

    let outcome = match widget.try_borrow_mut() {
        Ok(mut widget) => widget.handle_event(&widget_event),
        Err(_) => return,
    };
    if outcome == EventOutcome::SubmitRequested {
        spawn_submission(widget, submitter);
    }
}

/// One feedback widget bound to a container element.
#[wasm_bindgen]
pub struct MoodboxWidget {
    widget: SharedWidget,
    submitter: FetchSubmitter,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl MoodboxWidget {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<MoodboxWidget, JsError> {
        install_panic_hook();
        let window = web_sys::window().ok_or_else(|| JsError::new("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsError::new("window has no document"))?;
        Ok(Self {
            widget: Rc::new(RefCell::new(FeedbackWidget::new(BrowserDocument::new(document)))),
            submitter: FetchSubmitter::new(window),
            listeners: Vec::new(),
        })
    }

    /// Validate, render into `#entryId`, and start listening for input.
    ///
    /// Throws an `Error` carrying the configuration message on misuse.
    pub fn init(
        &mut self,
        entry_id: Option<String>,
        endpoints: JsValue,
        options: Option<JsValue>,
    ) -> Result<(), JsError> {
        let endpoints = bridge::parse_endpoints(stringify(Some(&endpoints))?.as_deref())?;
        let options = bridge::parse_options(stringify(options.as_ref())?.as_deref())?;
        let entry_id = entry_id.unwrap_or_default();
        self.widget.borrow_mut().init(&entry_id, endpoints, options)?;

        let container = self
            .widget
            .borrow()
            .host()
            .document()
            .get_element_by_id(&entry_id)
            .ok_or_else(|| JsError::new("The specified element with id does not exist"))?;
        for kind in bridge::LISTENED_EVENTS {
            let widget = Rc::clone(&self.widget);
            let submitter = self.submitter.clone();
            let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                on_dom_event(&widget, &submitter, &event);
            });
            container
                .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
                .map_err(js_error)?;
            self.listeners.push(Listener {
                target: container.clone(),
                kind,
                callback,
            });
        }
        Ok(())
    }

    /// Plain-object snapshot of the instance state.
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> Result<JsValue, JsError> {
        let json = bridge::state_json(&self.widget.borrow().snapshot())?;
        JSON::parse(&json).map_err(js_error)
    }

    #[wasm_bindgen(js_name = submitEnabled)]
    pub fn submit_enabled(&self) -> bool {
        self.widget.borrow().submit_enabled()
    }

    /// Current lifecycle phase (`uninitialized`, `ready`, ...).
    pub fn phase(&self) -> String {
        self.widget.borrow().phase().as_str().to_owned()
    }

    /// Submit as if the submit button were clicked. Returns whether a
    /// submission started.
    pub fn submit(&self) -> bool {
        spawn_submission(&self.widget, &self.submitter)
    }
}
