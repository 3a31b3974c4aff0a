use leptos::prelude::*;

use crate::layout::notifications::NotificationService;
use crate::layout::{Layout, Navigation, OrganizerHandoff};

#[component]
pub fn App() -> impl IntoView {
    // Session-wide services, provided once and reached via context.
    provide_context(Navigation::new());
    provide_context(NotificationService::new());
    provide_context(OrganizerHandoff::new());

    view! {
        <Layout />
    }
}
