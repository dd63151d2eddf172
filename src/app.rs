//! Context providers and the demo product page.
//!
//! SYSTEM CONTEXT
//! ==============
//! A theme page mounts several independent widgets. They share exactly two
//! things: the parsed [`StorefrontConfig`] and one `RwSignal<PageChrome>`
//! holding the scroll lock and published header offsets. Components only
//! mutate the signal; a single effect installed here mirrors it onto the
//! document.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use leptos::prelude::*;

use crate::components::disclosure::DetailsDisclosure;
use crate::components::file_intake::FileIntake;
use crate::components::header_menu::HeaderMenu;
use crate::components::product_form::ProductForm;
use crate::config::StorefrontConfig;
use crate::state::overlay::PageChrome;
#[cfg(feature = "hydrate")]
use crate::state::overlay::{HEADER_BOTTOM_VAR, HEADER_PINNED_CLASS, MEGA_MENU_TOP_VAR};

/// Provide config and page chrome to every widget below the current owner.
pub fn provide_storefront_context(config: StorefrontConfig) -> RwSignal<PageChrome> {
    let header_selector = config.header_selector.clone();
    provide_context(config);
    provide_page_chrome(header_selector)
}

#[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
fn provide_page_chrome(header_selector: String) -> RwSignal<PageChrome> {
    let chrome = RwSignal::new(PageChrome::default());
    provide_context(chrome);
    #[cfg(feature = "hydrate")]
    sync_page_chrome(chrome, header_selector);
    chrome
}

/// Shared page chrome; a widget mounted without a provider gets its own page.
pub fn use_page_chrome() -> RwSignal<PageChrome> {
    use_context::<RwSignal<PageChrome>>().unwrap_or_else(|| {
        log::debug!("no page chrome context; providing an isolated one");
        provide_page_chrome(use_config().header_selector)
    })
}

pub fn use_config() -> StorefrontConfig {
    use_context::<StorefrontConfig>().unwrap_or_else(|| {
        log::debug!("no storefront config context; using defaults");
        StorefrontConfig::default()
    })
}

/// Mirror chrome changes onto `<body>`, `<html>` and the header, touching only
/// what changed.
#[cfg(feature = "hydrate")]
fn sync_page_chrome(chrome: RwSignal<PageChrome>, header_selector: String) {
    use crate::util::dom::{set_body_overflow, set_class_on, set_root_property};

    Effect::new(move |prev: Option<PageChrome>| {
        let current = chrome.get();
        let prev = prev.unwrap_or_default();

        if current.scroll_locked != prev.scroll_locked {
            set_body_overflow(current.body_overflow());
        }
        if current.header_bottom_px != prev.header_bottom_px {
            if let Some(px) = current.header_bottom_px {
                set_root_property(HEADER_BOTTOM_VAR, &format!("{px}px"));
            }
        }
        if current.mega_menu_top_px != prev.mega_menu_top_px {
            if let Some(px) = current.mega_menu_top_px {
                set_root_property(MEGA_MENU_TOP_VAR, &format!("{px}px"));
            }
        }
        if current.header_pinned != prev.header_pinned {
            set_class_on(&header_selector, HEADER_PINNED_CLASS, current.header_pinned);
        }
        current
    });
}

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Render the page shell to HTML for the `hydrate` entry to attach to.
#[cfg(feature = "ssr")]
pub fn render_page(options: LeptosOptions) -> String {
    use leptos::tachys::view::RenderHtml;

    let owner = Owner::new();
    owner.with(|| shell(options).to_html())
}

/// Product page wiring every widget under one set of contexts.
#[component]
pub fn App() -> impl IntoView {
    provide_storefront_context(StorefrontConfig::load());

    let ribbon_options = vec![
        ("navy".to_owned(), "Navy".to_owned()),
        ("crimson".to_owned(), "Crimson".to_owned()),
        ("gold".to_owned(), "Gold".to_owned()),
    ];

    view! {
        <div class="header-wrapper">
            <nav class="header__nav">
                <HeaderMenu label="Shop".to_owned() mega=true>
                    <ul class="mega-menu__list">
                        <li><a href="/collections/medals">"Medals"</a></li>
                        <li><a href="/collections/trophies">"Trophies"</a></li>
                        <li><a href="/collections/ribbons">"Ribbons"</a></li>
                    </ul>
                </HeaderMenu>
                <HeaderMenu label="Account".to_owned() mega=false>
                    <ul class="header__submenu">
                        <li><a href="/account">"Profile"</a></li>
                        <li><a href="/account/orders">"Orders"</a></li>
                    </ul>
                </HeaderMenu>
            </nav>
        </div>
        <main class="product">
            <ProductForm ribbon_options ribbon_required=true>
                <FileIntake input_id="group-order-file".to_owned() field_name="properties[Group order file]".to_owned()/>
            </ProductForm>
            <DetailsDisclosure label="Shipping details".to_owned()>
                <p>"Orders ship within five business days."</p>
            </DetailsDisclosure>
        </main>
    }
}
