//! The users console: a create/update form above a table of every record.
//! All state lives in one `RwSignal<UsersState>`; the controller mutates it
//! around each request, so the view is a pure function of that signal.

use crate::{
    app_lib::{AppConfig, AppError},
    components::{Alert, AlertKind, Button, ButtonTone, Spinner},
    features::users::{ListView, User, UsersClient, UsersController, UsersState},
};
use leptos::{ev::SubmitEvent, prelude::*, task::spawn_local};
use tracing::{error, warn};

type PageController = UsersController<UsersClient, RwSignal<UsersState>>;

const INPUT_CLASS: &str = "bg-white border border-slate-300 rounded-md p-2 mr-4 outline-none focus:ring-2 focus:ring-sky-300";
const CELL_CLASS: &str = "px-4 py-2 border";

/// Builds the users client and renders the console, or the configuration error.
#[component]
pub fn UsersPage(config: AppConfig) -> impl IntoView {
    match UsersClient::new(&config) {
        Ok(client) => {
            let controller = UsersController::new(client, RwSignal::new(UsersState::new()));
            view! { <UsersConsole controller=controller /> }.into_any()
        }
        Err(err) => {
            error!(error = %err, "Failed to build users client");
            view! { <Alert kind=AlertKind::Error message=err.to_string() /> }.into_any()
        }
    }
}

/// Owned copy of the list view, taken out of the signal before rendering.
#[derive(Clone, PartialEq)]
enum Section {
    Loading,
    Table(Vec<User>),
    Empty,
}

impl From<ListView<'_>> for Section {
    fn from(view: ListView<'_>) -> Self {
        match view {
            ListView::Loading => Section::Loading,
            ListView::Table(users) => Section::Table(users.to_vec()),
            ListView::Empty => Section::Empty,
        }
    }
}

#[component]
fn UsersConsole(controller: PageController) -> impl IntoView {
    let state = *controller.store();
    let controller = StoredValue::new(controller);

    // Fetch the list once on mount.
    let loader = controller.get_value();
    spawn_local(async move { loader.load().await });

    let dismiss = Callback::new(move |()| controller.with_value(|c| c.dismiss_error()));

    // Draft edits touch the same signal; the memo keeps them from re-rendering the table.
    let section = Memo::new(move |_| state.with(|s| Section::from(s.list_view())));

    view! {
        <div class="space-y-4">
            <UserForm controller=controller state=state />

            {move || {
                state
                    .with(|s| s.error().cloned())
                    .map(|err| {
                        view! {
                            <Alert kind=AlertKind::Error message=err.to_string() on_dismiss=dismiss />
                        }
                    })
            }}

            {move || match section.get() {
                Section::Loading => view! { <Spinner /> }.into_any(),
                Section::Table(users) => {
                    view! { <UsersTable users=users controller=controller /> }.into_any()
                }
                Section::Empty => view! { <EmptyState /> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn UserForm(controller: StoredValue<PageController>, state: RwSignal<UsersState>) -> impl IntoView {
    let is_editing = Signal::derive(move || state.with(|s| s.mode().editing_id().is_some()));
    let tone = Signal::derive(move || {
        if is_editing.get() {
            ButtonTone::Update
        } else {
            ButtonTone::Create
        }
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let controller = controller.get_value();
        spawn_local(async move {
            if let Err(err) = controller.submit().await {
                show_blocking_alert(&err);
            }
        });
    };

    let on_cancel = Callback::new(move |()| controller.with_value(|c| c.cancel_edit()));

    view! {
        <form
            novalidate
            on:submit=on_submit
            class="bg-sky-200 p-4 rounded-md text-center space-y-3"
        >
            <h2 class="text-2xl mb-2">{move || state.with(|s| s.mode().heading())}</h2>

            {move || {
                state
                    .with(|s| s.mode().editing_id().cloned())
                    .map(|id| {
                        view! { <Alert kind=AlertKind::Info message=format!("Editing user {id}") /> }
                    })
            }}

            <div class="flex flex-wrap items-center justify-center gap-y-2">
                <input
                    type="text"
                    class=INPUT_CLASS
                    placeholder="Name"
                    prop:value=move || state.with(|s| s.draft().name.clone())
                    on:input=move |ev| state.update(|s| s.set_name(event_target_value(&ev)))
                />
                <input
                    type="email"
                    class=INPUT_CLASS
                    placeholder="Email"
                    prop:value=move || state.with(|s| s.draft().email.clone())
                    on:input=move |ev| state.update(|s| s.set_email(event_target_value(&ev)))
                />
                <input
                    type="password"
                    class=INPUT_CLASS
                    placeholder="Password"
                    prop:value=move || state.with(|s| s.draft().password.clone())
                    on:input=move |ev| state.update(|s| s.set_password(event_target_value(&ev)))
                />
                <div class="flex gap-2">
                    <Button button_type="submit" tone=tone>
                        {move || state.with(|s| s.mode().submit_label())}
                    </Button>
                    <Show when=move || is_editing.get()>
                        <Button tone=ButtonTone::Neutral on_click=on_cancel>
                            "Cancel"
                        </Button>
                    </Show>
                </div>
            </div>
        </form>
    }
}

#[component]
fn UsersTable(users: Vec<User>, controller: StoredValue<PageController>) -> impl IntoView {
    view! {
        <div>
            <h2 class="text-2xl text-center bg-rose-200 py-3 rounded-md mb-4">
                "Front Users List"
            </h2>
            <table class="table-auto w-full border">
                <thead>
                    <tr>
                        <th class=CELL_CLASS>"ID"</th>
                        <th class=CELL_CLASS>"Name"</th>
                        <th class=CELL_CLASS>"Email"</th>
                        <th class=CELL_CLASS>"Password"</th>
                        <th class=CELL_CLASS>"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || users.clone()
                        key=|user| user.id.clone()
                        children=move |user| view! { <UserRow user=user controller=controller /> }
                    />
                </tbody>
            </table>
        </div>
    }
}

#[component]
fn UserRow(user: User, controller: StoredValue<PageController>) -> impl IntoView {
    let edit_target = user.clone();
    let delete_id = user.id.clone();

    let on_edit = move |_| controller.with_value(|c| c.begin_edit(&edit_target));
    let on_delete = move |_| {
        let controller = controller.get_value();
        let id = delete_id.clone();
        spawn_local(async move { controller.delete(id).await });
    };

    view! {
        <tr class="border">
            <td class="px-4 py-2 text-center border">{user.id.to_string()}</td>
            <td class=CELL_CLASS>{user.name}</td>
            <td class=CELL_CLASS>{user.email}</td>
            <td class=CELL_CLASS>{user.password}</td>
            <td class="px-4 py-2 text-center border">
                <button
                    type="button"
                    class="bg-sky-600 text-white p-2 rounded-md mr-2"
                    title="Edit"
                    on:click=on_edit
                >
                    <span class="material-symbols-outlined">"edit"</span>
                </button>
                <button
                    type="button"
                    class="bg-red-500 text-white p-2 mr-2 rounded-md"
                    title="Delete"
                    on:click=on_delete
                >
                    <span class="material-symbols-outlined">"delete"</span>
                </button>
            </td>
        </tr>
    }
}

#[component]
fn EmptyState() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center py-10">
            <h2 class="text-2xl font-semibold text-gray-600">"No data available"</h2>
            <p class="text-gray-500 mt-2">"Kindly add some users to display them here."</p>
        </div>
    }
}

/// Validation failures block on a native `alert` before anything is sent.
fn show_blocking_alert(err: &AppError) {
    let Some(window) = web_sys::window() else {
        warn!(error = %err, "No window to alert on");
        return;
    };
    if window.alert_with_message(&err.to_string()).is_err() {
        warn!(error = %err, "Failed to show alert");
    }
}
