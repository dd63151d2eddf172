//! Collapsible `<details>` panel with animated content and focus-loss closing.
//!
//! The native `open` attribute drives the model; after an auto-close the
//! attribute is written back so both stay in step, and the follow-up
//! `toggle` event is a no-op.

use leptos::prelude::*;

#[cfg(feature = "hydrate")]
use crate::state::disclosure::Disclosure;
#[cfg(feature = "hydrate")]
use crate::util::dom::{capture_animations, contains_active_element};

/// Snapshot the content panel's animations, or nothing if it is not mounted.
#[cfg(feature = "hydrate")]
pub(crate) fn panel_animations(content: NodeRef<leptos::html::Div>) -> Vec<web_sys::Animation> {
    content
        .get_untracked()
        .map(|panel| capture_animations(&panel))
        .unwrap_or_default()
}

#[component]
pub fn DetailsDisclosure(label: String, #[prop(optional)] open: bool, children: Children) -> impl IntoView {
    let details_ref = NodeRef::<leptos::html::Details>::new();
    let content_ref = NodeRef::<leptos::html::Div>::new();
    let expanded = RwSignal::new(open);

    #[cfg(feature = "hydrate")]
    let model = StoredValue::new_local(Disclosure::<web_sys::Animation>::new(open));

    let on_toggle = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let Some(details) = details_ref.get_untracked() else {
                log::debug!("disclosure toggled before mount");
                return;
            };
            let now_open = details.open();
            model.update_value(|disclosure| {
                if let Some(transition) = disclosure.toggle_opened(Some(now_open), || panel_animations(content_ref)) {
                    log::trace!("disclosure {transition:?}");
                }
            });
            expanded.set(now_open);
        }
    };

    let on_focusout = move |_| {
        #[cfg(feature = "hydrate")]
        gloo_timers::callback::Timeout::new(0, move || {
            let Some(details) = details_ref.get_untracked() else {
                return;
            };
            let focus_inside = contains_active_element(&details);
            let closed =
                model.try_update_value(|disclosure| disclosure.after_focus_out(focus_inside, || panel_animations(content_ref)));
            if closed == Some(true) {
                if details.open() {
                    details.set_open(false);
                }
                expanded.set(false);
            }
        })
        .forget();
    };

    view! {
        <details class="disclosure" open=open node_ref=details_ref on:toggle=on_toggle on:focusout=on_focusout>
            <summary class="disclosure__summary" aria-expanded=move || expanded.get().to_string()>
                {label}
            </summary>
            <div class="disclosure__content" node_ref=content_ref>
                {children()}
            </div>
        </details>
    }
}
