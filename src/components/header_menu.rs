//! Header navigation menu, optionally rendered as a full-viewport mega menu.
//!
//! ARCHITECTURE
//! ============
//! [`crate::state::overlay::HeaderMenu`] decides what happens; this component
//! measures the header, feeds DOM events in, and applies the returned
//! [`MenuEffects`]. Page chrome writes go through the shared signal and reach
//! the document via the effect in [`crate::app`].

use leptos::prelude::*;

#[cfg(feature = "hydrate")]
use leptos::html::{Details, Div};

#[cfg(feature = "hydrate")]
use crate::app::{use_config, use_page_chrome};
#[cfg(feature = "hydrate")]
use crate::components::disclosure::panel_animations;
#[cfg(feature = "hydrate")]
use crate::state::disclosure::Transition;
#[cfg(feature = "hydrate")]
use crate::state::overlay::{HeaderMenu as MenuModel, MenuEffects, PageChrome};
#[cfg(feature = "hydrate")]
use crate::util::dom::{DocumentKeyListener, contains_active_element, header_bottom, set_style};
#[cfg(feature = "hydrate")]
use web_sys::Animation;

/// Reactive handles for one mounted menu. All fields are arena handles, so the
/// struct is `Copy` and can move into every event closure.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy)]
struct MenuHandles {
    model: StoredValue<MenuModel<Animation>, LocalStorage>,
    listener: StoredValue<Option<DocumentKeyListener>, LocalStorage>,
    chrome: RwSignal<PageChrome>,
    header_selector: StoredValue<String>,
    details: NodeRef<Details>,
    content: NodeRef<Div>,
    expanded: RwSignal<bool>,
}

#[cfg(feature = "hydrate")]
impl MenuHandles {
    fn run(self, op: impl FnOnce(&mut MenuModel<Animation>, &mut PageChrome) -> Option<MenuEffects>) -> Option<MenuEffects> {
        self.chrome
            .try_update(|chrome| self.model.try_update_value(|menu| op(menu, chrome)))
            .flatten()
            .flatten()
    }

    fn on_toggle(self) {
        let Some(details) = self.details.get_untracked() else {
            log::debug!("header menu toggled before mount");
            return;
        };
        let open = details.open();
        let header = self.header_selector.with_value(|selector| header_bottom(selector));
        let effects = self.run(|menu, chrome| Some(menu.on_toggle(open, header, chrome, || panel_animations(self.content))));
        self.apply(effects);
    }

    fn on_key(self, key: &str) {
        let effects = self.run(|menu, chrome| menu.on_key(key, chrome, || panel_animations(self.content)));
        self.apply(effects);
    }

    fn after_focus_out(self) {
        let Some(details) = self.details.get_untracked() else {
            return;
        };
        let focus_inside = contains_active_element(&details);
        let effects =
            self.run(|menu, chrome| menu.after_focus_out(focus_inside, chrome, || panel_animations(self.content)));
        self.apply(effects);
    }

    fn apply(self, effects: Option<MenuEffects>) {
        let Some(effects) = effects else {
            return;
        };
        if let (Some(layout), Some(content)) = (&effects.layout, self.content.get_untracked()) {
            set_style(&content, "top", &layout.top_css());
            set_style(&content, "height", &layout.height_css);
        }
        match effects.escape_listener {
            Some(true) => self.listener.with_value(|listener| listener.iter().for_each(DocumentKeyListener::attach)),
            Some(false) => self.listener.with_value(|listener| listener.iter().for_each(DocumentKeyListener::detach)),
            None => {}
        }
        if effects.transition == Some(Transition::Closed) {
            if let Some(details) = self.details.get_untracked() {
                if details.open() {
                    details.set_open(false);
                }
            }
        }
        if let Some(open) = self.model.try_with_value(MenuModel::is_open) {
            self.expanded.set(open);
        }
    }

    /// Drop the escape listener and any scroll lock this menu still holds.
    fn release(self) {
        self.listener.try_with_value(|listener| listener.iter().for_each(DocumentKeyListener::detach));
        self.run(|menu, chrome| menu.is_open().then(|| menu.close(chrome, Vec::new)));
    }
}

#[component]
pub fn HeaderMenu(label: String, #[prop(optional)] mega: bool, children: Children) -> impl IntoView {
    let details_ref = NodeRef::<leptos::html::Details>::new();
    let content_ref = NodeRef::<leptos::html::Div>::new();
    let expanded = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    let handles = {
        let handles = MenuHandles {
            model: StoredValue::new_local(MenuModel::new(false, mega)),
            listener: StoredValue::new_local(None),
            chrome: use_page_chrome(),
            header_selector: StoredValue::new(use_config().header_selector),
            details: details_ref,
            content: content_ref,
            expanded,
        };
        let escape = DocumentKeyListener::new(move |ev: web_sys::KeyboardEvent| handles.on_key(&ev.key()));
        handles.listener.set_value(Some(escape));
        on_cleanup(move || handles.release());
        handles
    };

    let on_toggle = move |_| {
        #[cfg(feature = "hydrate")]
        handles.on_toggle();
    };

    let on_focusout = move |_| {
        #[cfg(feature = "hydrate")]
        gloo_timers::callback::Timeout::new(0, move || handles.after_focus_out()).forget();
    };

    let (details_class, content_class) =
        if mega { ("header-menu mega-menu", "mega-menu__content") } else { ("header-menu", "header-menu__content") };

    view! {
        <details class=details_class node_ref=details_ref on:toggle=on_toggle on:focusout=on_focusout>
            <summary class="header-menu__summary" aria-expanded=move || expanded.get().to_string()>
                {label}
            </summary>
            <div class=content_class node_ref=content_ref>
                {children()}
            </div>
        </details>
    }
}
