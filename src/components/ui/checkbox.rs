use leptos::prelude::*;
use tw_merge::tw_merge;
use wasm_bindgen::JsCast;

#[component]
pub fn Checkbox(
    #[prop(into, optional)] class: String,
    #[prop(into)] checked: Signal<bool>,
    #[prop(into)] on_change: Callback<bool>,
) -> impl IntoView {
    let merged_class = tw_merge!(
        "size-4 shrink-0 rounded-[4px] border border-input accent-primary hover:cursor-pointer",
        class
    );

    let handle_change = move |ev: web_sys::Event| {
        if let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        {
            on_change.run(input.checked());
        }
    };

    view! {
        <input
            data-name="Checkbox"
            type="checkbox"
            class=merged_class
            prop:checked=move || checked.get()
            on:change=handle_change
        />
    }
}
