use leptos::prelude::*;

#[component]
pub fn Spinner() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center gap-3 py-6" role="status" aria-live="polite">
            <div
                class="inline-block h-7 w-7 animate-spin rounded-full border-4 border-sky-200 border-t-sky-600"
                aria-label="Loading"
            ></div>
            <span class="text-xl font-semibold">"Loading..."</span>
        </div>
    }
}
