//! Product configuration form with a gated ribbon selection.

use leptos::prelude::*;

use crate::state::submit_gate::{SelectField, SubmitGate};
use crate::util::notice::blocking_notice;

/// Form field name of the ribbon select.
pub const RIBBON_FIELD: &str = "properties[Ribbon]";
const RIBBON_SELECT_ID: &str = "ribbon-select";

#[component]
pub fn ProductForm(
    #[prop(default = "/cart/add".to_owned())] action: String,
    /// `(value, label)` pairs for the ribbon select.
    ribbon_options: Vec<(String, String)>,
    #[prop(optional)] ribbon_required: bool,
    children: Children,
) -> impl IntoView {
    let gate = RwSignal::new(SubmitGate::new(
        vec![SelectField::new(RIBBON_FIELD, "ribbon", ribbon_required)],
        RIBBON_FIELD,
    ));
    let select_ref = NodeRef::<leptos::html::Select>::new();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        #[cfg(feature = "hydrate")]
        let live_value = select_ref.get_untracked().map(|select| select.value());
        #[cfg(not(feature = "hydrate"))]
        let live_value = None::<String>;
        let Some(Err(err)) = gate.try_update(|gate| gate.check_submit(live_value.as_deref())) else {
            return;
        };
        ev.prevent_default();
        log::info!("submission blocked: {err}");
        #[cfg(feature = "hydrate")]
        if let Some(select) = select_ref.get_untracked() {
            if let Err(focus_err) = select.focus() {
                log::debug!("failed to focus ribbon select: {focus_err:?}");
            }
        }
        blocking_notice(&err.to_string());
    };

    let on_change = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        gate.update(|gate| gate.on_change(RIBBON_FIELD, value));
    };

    let select_class = move || gate.with(|gate| gate.field(RIBBON_FIELD).map(SelectField::class).unwrap_or_default());

    view! {
        <form class="product-form" method="post" action=action on:submit=on_submit>
            <div class="product-customizer__field">
                <label for=RIBBON_SELECT_ID class="product-customizer__label">"Ribbon"</label>
                <select
                    id=RIBBON_SELECT_ID
                    name=RIBBON_FIELD
                    class=select_class
                    aria-required=ribbon_required.to_string()
                    node_ref=select_ref
                    on:change=on_change
                >
                    <option value="">"Choose a ribbon"</option>
                    {ribbon_options
                        .into_iter()
                        .map(|(value, label)| view! { <option value=value>{label}</option> })
                        .collect_view()}
                </select>
            </div>
            {children()}
            <button type="submit" class="product-form__submit">"Add to cart"</button>
        </form>
    }
}
