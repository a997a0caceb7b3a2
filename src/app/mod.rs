use crate::pages::TablePage;
use crate::state::{AppContext, AppState, TableController};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    let app_state = AppContext(AppState::new());
    provide_context(app_state);

    let controller = TableController::new(app_state);
    provide_context(controller);

    // One-shot load; the table renders empty until it resolves.
    controller.load_records();

    view! {
        <Router>
            <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"Not found"</div> }>
                <Route path=path!("") view=TablePage />
            </Routes>
        </Router>
    }
}
