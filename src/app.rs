use crate::{app_lib::AppConfig, app_lib::build_info, routes::UsersPage};
use leptos::prelude::*;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    view! {
        <main class="m-8">
            <h1 class="text-center bg-sky-400 py-4 mb-4 text-2xl rounded-md">
                "CRUD Operations"
            </h1>
            <UsersPage config=config />
            <footer class="mt-8 text-center text-xs text-gray-400">
                "build " {build_info::short_commit_hash()}
            </footer>
        </main>
    }
}
