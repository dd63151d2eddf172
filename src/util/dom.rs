//! Browser DOM glue shared by the storefront components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Only compiled with `hydrate`. Components never read back styles they did
//! not set; the one measurement taken here is the header's bounding box.
//! Browser API failures are logged and otherwise ignored.

use std::cell::Cell;

use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{Animation, Document, Element, FileList, HtmlElement, KeyboardEvent, Node};

use crate::state::disclosure::AnimationHandle;
use crate::state::intake::FileDescriptor;

impl AnimationHandle for Animation {
    fn play(&self) {
        if let Err(err) = Animation::play(self) {
            log::debug!("animation play failed: {err:?}");
        }
    }

    fn cancel(&self) {
        Animation::cancel(self);
    }
}

pub fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

/// Text content of the element with `id`, if present.
pub fn element_text(id: &str) -> Option<String> {
    document()?.get_element_by_id(id)?.text_content()
}

/// Snapshot the animations currently attached to `panel`.
pub fn capture_animations(panel: &Element) -> Vec<Animation> {
    panel
        .get_animations()
        .iter()
        .flat_map(|value| value.dyn_into::<Animation>())
        .collect()
}

/// Bottom edge of the first element matching `selector`, in CSS pixels.
pub fn header_bottom(selector: &str) -> Option<f64> {
    match document()?.query_selector(selector) {
        Ok(Some(header)) => Some(header.get_bounding_client_rect().bottom()),
        Ok(None) => {
            log::debug!("no header matches '{selector}'; skipping header bookkeeping");
            None
        }
        Err(err) => {
            log::debug!("invalid header selector '{selector}': {err:?}");
            None
        }
    }
}

/// Whether the document's active element lies inside `root`.
pub fn contains_active_element(root: &Node) -> bool {
    let active = document().and_then(|d| d.active_element()).map(Node::from);
    root.contains(active.as_ref())
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(err) = element.style().set_property(property, value) {
        log::warn!("failed to set style {property}: {err:?}");
    }
}

pub fn set_body_overflow(value: &str) {
    let Some(body) = document().and_then(|d| d.body()) else {
        log::debug!("document has no body; scroll lock not applied");
        return;
    };
    set_style(&body, "overflow", value);
}

/// Publish a custom property on `<html>`.
pub fn set_root_property(name: &str, value: &str) {
    let Some(root) = document().and_then(|d| d.document_element()) else {
        return;
    };
    match root.dyn_into::<HtmlElement>() {
        Ok(root) => set_style(&root, name, value),
        Err(_) => log::debug!("document element is not an HtmlElement; {name} not published"),
    }
}

/// Toggle `class` on the first element matching `selector`.
pub fn set_class_on(selector: &str, class: &str, present: bool) {
    let Some(document) = document() else {
        return;
    };
    match document.query_selector(selector) {
        Ok(Some(element)) => {
            if let Err(err) = element.class_list().toggle_with_force(class, present) {
                log::warn!("failed to toggle class {class}: {err:?}");
            }
        }
        Ok(None) => log::debug!("no element matches '{selector}'; {class} not applied"),
        Err(err) => log::debug!("invalid selector '{selector}': {err:?}"),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn file_descriptor(file: &web_sys::File) -> FileDescriptor {
    FileDescriptor::new(file.name(), file.size() as u64)
}

pub fn file_descriptors(files: &FileList) -> Vec<FileDescriptor> {
    (0..files.length())
        .filter_map(|index| files.get(index))
        .map(|file| file_descriptor(&file))
        .collect()
}

/// A capturing `keydown` listener on the document that can be attached and
/// detached repeatedly. The closure lives as long as the listener.
pub struct DocumentKeyListener {
    callback: Closure<dyn FnMut(KeyboardEvent)>,
    attached: Cell<bool>,
}

impl DocumentKeyListener {
    pub fn new(handler: impl FnMut(KeyboardEvent) + 'static) -> Self {
        Self {
            callback: Closure::wrap(Box::new(handler) as Box<dyn FnMut(KeyboardEvent)>),
            attached: Cell::new(false),
        }
    }

    pub fn attach(&self) {
        if self.attached.get() {
            return;
        }
        let Some(document) = document() else {
            return;
        };
        match document.add_event_listener_with_callback_and_bool("keydown", self.callback.as_ref().unchecked_ref(), true)
        {
            Ok(()) => self.attached.set(true),
            Err(err) => log::warn!("failed to attach keydown listener: {err:?}"),
        }
    }

    pub fn detach(&self) {
        if !self.attached.get() {
            return;
        }
        let Some(document) = document() else {
            return;
        };
        match document.remove_event_listener_with_callback_and_bool(
            "keydown",
            self.callback.as_ref().unchecked_ref(),
            true,
        ) {
            Ok(()) => self.attached.set(false),
            Err(err) => log::warn!("failed to detach keydown listener: {err:?}"),
        }
    }
}
