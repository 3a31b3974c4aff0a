pub mod loading;
pub mod notifications;
pub mod sidebar;

use leptos::prelude::*;

use contracts::listing::ProductSeed;

use crate::usecases::{
    configuracoes::ConfiguracoesPage, criar_listing::CriarListingPage,
    extrair_imagens::ExtrairImagensPage, organizador::OrganizadorPage,
};
use notifications::NotificationContainer;
use sidebar::Sidebar;

/// The four screens of the app. There is no URL router; the active page is
/// an in-memory signal, like a tabbed desktop app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Organizador,
    CriarListing,
    ExtrairImagens,
    Configuracoes,
}

impl Page {
    pub fn title(self) -> &'static str {
        match self {
            Page::Organizador => "Organizador IA",
            Page::CriarListing => "Criar Listing",
            Page::ExtrairImagens => "Extrair Imagens",
            Page::Configuracoes => "Configurações",
        }
    }
}

#[derive(Clone, Copy)]
pub struct Navigation {
    pub active: RwSignal<Page>,
    pub sidebar_open: RwSignal<bool>,
}

impl Navigation {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(Page::Organizador),
            sidebar_open: RwSignal::new(true),
        }
    }

    pub fn goto(&self, page: Page) {
        self.active.set(page);
    }
}

impl Default for Navigation {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_navigation() -> Navigation {
    expect_context::<Navigation>()
}

/// Carries the organizer's generated products to the listing page. The
/// payload is consumed exactly once, on the next listing mount.
#[derive(Clone, Copy)]
pub struct OrganizerHandoff {
    products: RwSignal<Option<Vec<ProductSeed>>>,
}

impl OrganizerHandoff {
    pub fn new() -> Self {
        Self {
            products: RwSignal::new(None),
        }
    }

    pub fn publish(&self, seeds: Vec<ProductSeed>) {
        self.products.set(Some(seeds));
    }

    pub fn take(&self) -> Option<Vec<ProductSeed>> {
        self.products.try_update(|slot| slot.take()).flatten()
    }
}

impl Default for OrganizerHandoff {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_organizer_handoff() -> OrganizerHandoff {
    expect_context::<OrganizerHandoff>()
}

/// Application shell: sidebar on the left, the active page in the main
/// region, notifications stacked on top of everything.
#[component]
pub fn Layout() -> impl IntoView {
    let nav = use_navigation();

    view! {
        <div class="app-layout">
            <Sidebar />
            <main class="app-main">
                {move || match nav.active.get() {
                    Page::Organizador => view! { <OrganizadorPage /> }.into_any(),
                    Page::CriarListing => view! { <CriarListingPage /> }.into_any(),
                    Page::ExtrairImagens => view! { <ExtrairImagensPage /> }.into_any(),
                    Page::Configuracoes => view! { <ConfiguracoesPage /> }.into_any(),
                }}
            </main>
            <NotificationContainer />
        </div>
    }
}
