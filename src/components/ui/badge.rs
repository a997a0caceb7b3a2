use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Badge, span, "inline-flex items-center rounded-md border px-2 py-0.5 text-xs font-medium whitespace-nowrap bg-secondary text-secondary-foreground"}
    clx! {BadgeList, div, "flex flex-wrap gap-1"}
}

pub use components::*;
