//! Alert banners for error and informational messages. Messages must be safe to
//! render and should never include passwords.

use leptos::prelude::*;

#[derive(Clone, Copy)]
/// Supported alert styles.
pub enum AlertKind {
    Error,
    Info,
}

/// Renders a styled alert banner, with a close button when `on_dismiss` is set.
#[component]
pub fn Alert(
    kind: AlertKind,
    message: String,
    #[prop(optional)] on_dismiss: Option<Callback<()>>,
) -> impl IntoView {
    let class = match kind {
        AlertKind::Error => {
            "flex items-start justify-between gap-4 rounded-lg border border-red-200 bg-red-50 px-4 py-3 text-sm text-red-700 dark:border-red-400 dark:bg-red-900/30 dark:text-red-200"
        }
        AlertKind::Info => {
            "flex items-start justify-between gap-4 rounded-lg border border-blue-200 bg-blue-50 px-4 py-3 text-sm text-blue-700 dark:border-blue-400 dark:bg-blue-900/30 dark:text-blue-200"
        }
    };

    view! {
        <div class=class role="alert">
            <span>{message}</span>
            {on_dismiss.map(|callback| {
                view! {
                    <button
                        type="button"
                        class="font-semibold opacity-70 hover:opacity-100"
                        aria-label="Dismiss"
                        on:click=move |_| callback.run(())
                    >
                        "×"
                    </button>
                }
            })}
        </div>
    }
}
