//! Toast notifications, provided once as a `Copy` context service.
//!
//! Success/warning/info toasts dismiss themselves after five seconds; error
//! toasts stay until the user closes them.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

use crate::shared::icons::icon;

const AUTO_DISMISS_MS: u32 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationKind {
    fn class(self) -> &'static str {
        match self {
            NotificationKind::Success => "notification notification--success",
            NotificationKind::Error => "notification notification--error",
            NotificationKind::Warning => "notification notification--warning",
            NotificationKind::Info => "notification notification--info",
        }
    }

    fn icon_name(self) -> &'static str {
        match self {
            NotificationKind::Success => "check-circle",
            NotificationKind::Error => "alert-circle",
            NotificationKind::Warning => "alert-triangle",
            NotificationKind::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
}

#[derive(Clone, Copy)]
pub struct NotificationService {
    items: RwSignal<Vec<Notification>>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(NotificationKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(NotificationKind::Error, message.into());
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.push(NotificationKind::Warning, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(NotificationKind::Info, message.into());
    }

    pub fn dismiss(&self, id: Uuid) {
        self.items.update(|items| items.retain(|n| n.id != id));
    }

    fn push(&self, kind: NotificationKind, message: String) {
        let id = Uuid::new_v4();
        self.items.update(|items| {
            items.push(Notification { id, kind, message });
        });

        // Errors stay on screen until the user closes them.
        if kind != NotificationKind::Error {
            let service = *self;
            spawn_local(async move {
                TimeoutFuture::new(AUTO_DISMISS_MS).await;
                service.dismiss(id);
            });
        }
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_notifications() -> NotificationService {
    expect_context::<NotificationService>()
}

#[component]
pub fn NotificationContainer() -> impl IntoView {
    let service = use_notifications();

    view! {
        <div class="notification-stack">
            <For
                each=move || service.items.get()
                key=|n| n.id
                children=move |n| {
                    let id = n.id;
                    view! {
                        <div class=n.kind.class()>
                            {icon(n.kind.icon_name())}
                            <span class="notification__message">{n.message.clone()}</span>
                            <button
                                class="notification__close"
                                aria-label="Fechar"
                                on:click=move |_| service.dismiss(id)
                            >
                                {icon("x")}
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
