//! Yew view components for the admin console.

use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;
use yew::prelude::*;

pub(crate) mod categories;
pub(crate) mod compose;
pub(crate) mod templates;
pub(crate) mod toast;

/// Current value of the text input behind a change event.
pub(crate) fn input_value(event: &Event) -> String {
    event
        .target()
        .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default()
}
