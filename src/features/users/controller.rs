//! Orchestrates the user-facing operations: every network call is bracketed by
//! `UsersState` transitions, and every mutation is followed by a full reload so
//! the table mirrors the backend.

use crate::{
    app_lib::AppError,
    features::users::{
        client::UsersApi,
        state::Submission,
        store::StateStore,
        types::{User, UserId, UserPayload},
    },
};
use tracing::{debug, error};

#[derive(Clone, Debug)]
pub struct UsersController<A, S> {
    api: A,
    store: S,
}

impl<A, S> UsersController<A, S>
where
    A: UsersApi + Clone + 'static,
    S: StateStore,
{
    pub fn new(api: A, store: S) -> Self {
        Self { api, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetches the full collection and replaces the list.
    pub async fn load(&self) {
        let Some(generation) = self.store.modify(|state| state.begin_reload()) else {
            return;
        };

        let outcome = self.api.list_users().await;
        match &outcome {
            Ok(users) => debug!(count = users.len(), "fetched users"),
            Err(err) => error!(error = %err, "Error fetching users"),
        }

        let applied = self
            .store
            .modify(|state| state.finish_reload(generation, outcome));
        if applied == Some(false) {
            debug!(?generation, "dropped superseded users reload");
        }
    }

    /// Submits the form: a create in `Create` mode, an update while editing.
    ///
    /// Network and HTTP failures are recorded in the state, not returned.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` when a create is attempted with an empty
    /// field; nothing is sent in that case.
    pub async fn submit(&self) -> Result<(), AppError> {
        let Some(submission) = self.store.read(|state| state.submission()) else {
            return Ok(());
        };

        match submission? {
            Submission::Create(payload) => self.create(payload).await,
            Submission::Update(id, payload) => self.update(id, payload).await,
        }

        Ok(())
    }

    /// Copies a record into the form. No network call.
    pub fn begin_edit(&self, user: &User) {
        self.store.modify(|state| state.begin_edit(user));
    }

    pub fn cancel_edit(&self) {
        self.store.modify(|state| state.cancel_edit());
    }

    pub fn dismiss_error(&self) {
        self.store.modify(|state| state.dismiss_error());
    }

    /// Deletes a record, then reloads whatever the delete outcome was.
    pub async fn delete(&self, id: UserId) {
        if self.store.modify(|state| state.begin_request()).is_none() {
            return;
        }

        let outcome = self.api.delete_user(&id).await;
        let failure = match outcome {
            Ok(()) => {
                debug!(%id, "deleted user");
                None
            }
            Err(err) => {
                error!(%id, error = %err, "Error deleting user");
                Some(err)
            }
        };

        self.reload_after(failure).await;
    }

    async fn create(&self, payload: UserPayload) {
        if self.store.modify(|state| state.begin_request()).is_none() {
            return;
        }

        match self.api.create_user(&payload).await {
            Ok(()) => {
                debug!(email = %payload.email, "created user");
                self.store.modify(|state| state.created());
                self.reload_after(None).await;
            }
            Err(err) => {
                error!(error = %err, "Error creating user");
                self.store.modify(|state| state.finish_request(Some(err)));
            }
        }
    }

    async fn update(&self, id: UserId, payload: UserPayload) {
        if self.store.modify(|state| state.begin_request()).is_none() {
            return;
        }

        match self.api.update_user(&id, &payload).await {
            Ok(()) => {
                debug!(%id, "updated user");
                self.store.modify(|state| state.updated());
                self.reload_after(None).await;
            }
            Err(err) => {
                error!(%id, error = %err, "Error updating user");
                self.store.modify(|state| state.finish_request(Some(err)));
            }
        }
    }

    /// Starts the reload before releasing the mutation so loading never flickers off in between.
    async fn reload_after(&self, failure: Option<AppError>) {
        let Some(generation) = self.store.modify(|state| {
            let generation = state.begin_reload();
            state.finish_request(failure);
            generation
        }) else {
            return;
        };

        let outcome = self.api.list_users().await;
        if let Err(err) = &outcome {
            error!(error = %err, "Error fetching users");
        }
        self.store
            .modify(|state| state.finish_reload(generation, outcome));
    }
}

#[cfg(test)]
mod tests {
    use super::UsersController;
    use crate::{
        app_lib::AppError,
        features::users::{
            client::UsersApi,
            state::{FormMode, ListView, UsersState},
            store::StateStore,
            types::{User, UserDraft, UserId, UserPayload},
        },
    };
    use std::{cell::RefCell, collections::VecDeque, rc::Rc};
    use tokio::sync::oneshot;

    #[derive(Clone, Debug, PartialEq, Eq)]
    enum Call {
        List,
        Create(UserPayload),
        Update(String, UserPayload),
        Delete(String),
    }

    #[derive(Default)]
    struct Backend {
        users: Vec<User>,
        next_id: u64,
        calls: Vec<Call>,
        fail_mutations: Option<AppError>,
        fail_list: Option<AppError>,
        /// Loading flag observed by each call, checked after the fact.
        loading_seen: Vec<bool>,
        gates: VecDeque<oneshot::Receiver<Vec<User>>>,
    }

    /// In-memory `UsersApi` that records every call.
    #[derive(Clone)]
    struct FakeApi {
        backend: Rc<RefCell<Backend>>,
        state: Rc<RefCell<UsersState>>,
    }

    impl FakeApi {
        fn new(users: Vec<User>, state: Rc<RefCell<UsersState>>) -> Self {
            let next_id = users.len() as u64 + 1;
            Self {
                backend: Rc::new(RefCell::new(Backend {
                    users,
                    next_id,
                    ..Backend::default()
                })),
                state,
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.backend.borrow().calls.clone()
        }

        fn record(&self, call: Call) -> Option<AppError> {
            let loading = self.state.borrow().is_loading();
            let mut backend = self.backend.borrow_mut();
            backend.loading_seen.push(loading);
            let failure = match call {
                Call::List => backend.fail_list.clone(),
                _ => backend.fail_mutations.clone(),
            };
            backend.calls.push(call);
            failure
        }
    }

    impl UsersApi for FakeApi {
        async fn list_users(&self) -> Result<Vec<User>, AppError> {
            if let Some(err) = self.record(Call::List) {
                return Err(err);
            }
            let gate = self.backend.borrow_mut().gates.pop_front();
            match gate {
                Some(gate) => gate
                    .await
                    .map_err(|_| AppError::Network("gate dropped".to_string())),
                None => Ok(self.backend.borrow().users.clone()),
            }
        }

        async fn create_user(&self, payload: &UserPayload) -> Result<(), AppError> {
            if let Some(err) = self.record(Call::Create(payload.clone())) {
                return Err(err);
            }
            let mut backend = self.backend.borrow_mut();
            let id = UserId::from(backend.next_id);
            backend.next_id += 1;
            backend.users.push(User {
                id,
                name: payload.name.clone(),
                email: payload.email.clone(),
                password: payload.password.clone(),
            });
            Ok(())
        }

        async fn update_user(&self, id: &UserId, payload: &UserPayload) -> Result<(), AppError> {
            if let Some(err) = self.record(Call::Update(id.to_string(), payload.clone())) {
                return Err(err);
            }
            let mut backend = self.backend.borrow_mut();
            if let Some(user) = backend.users.iter_mut().find(|user| &user.id == id) {
                user.name = payload.name.clone();
                user.email = payload.email.clone();
                user.password = payload.password.clone();
            }
            Ok(())
        }

        async fn delete_user(&self, id: &UserId) -> Result<(), AppError> {
            if let Some(err) = self.record(Call::Delete(id.to_string())) {
                return Err(err);
            }
            self.backend.borrow_mut().users.retain(|user| &user.id != id);
            Ok(())
        }
    }

    type Controller = UsersController<FakeApi, Rc<RefCell<UsersState>>>;

    fn user(id: u64, name: &str, email: &str, password: &str) -> User {
        User {
            id: UserId::from(id),
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn controller(users: Vec<User>) -> (Controller, FakeApi) {
        let state = Rc::new(RefCell::new(UsersState::new()));
        let api = FakeApi::new(users, state.clone());
        (UsersController::new(api.clone(), state), api)
    }

    fn fill_draft(controller: &Controller, name: &str, email: &str, password: &str) {
        controller.store().modify(|state| {
            state.set_name(name.to_string());
            state.set_email(email.to_string());
            state.set_password(password.to_string());
        });
    }

    fn read<R>(controller: &Controller, f: impl FnOnce(&UsersState) -> R) -> R {
        controller.store().read(f).unwrap()
    }

    #[tokio::test]
    async fn mount_with_empty_backend_shows_empty_state() {
        let (controller, api) = controller(Vec::new());

        controller.load().await;

        assert_eq!(api.calls(), vec![Call::List]);
        assert!(read(&controller, |state| state.list_view() == ListView::Empty));
    }

    #[tokio::test]
    async fn load_fills_the_table() {
        let (controller, _api) = controller(vec![
            user(1, "A", "a@x.com", "p"),
            user(2, "B", "b@x.com", "q"),
        ]);

        controller.load().await;

        let rows = read(&controller, |state| match state.list_view() {
            ListView::Table(rows) => rows.len(),
            _ => 0,
        });
        assert_eq!(rows, 2);
    }

    #[tokio::test]
    async fn create_posts_then_reloads_and_resets_form() {
        let (controller, api) = controller(Vec::new());
        controller.load().await;
        fill_draft(&controller, "A", "a@x.com", "p");

        controller.submit().await.unwrap();

        assert_eq!(
            api.calls(),
            vec![
                Call::List,
                Call::Create(UserPayload {
                    name: "A".to_string(),
                    email: "a@x.com".to_string(),
                    password: "p".to_string(),
                }),
                Call::List,
            ]
        );
        assert_eq!(read(&controller, |state| state.draft().clone()), UserDraft::default());
        let created = read(&controller, |state| state.users().to_vec());
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].name, "A");
        assert_eq!(created[0].email, "a@x.com");
        assert!(!read(&controller, UsersState::is_loading));
    }

    #[tokio::test]
    async fn create_with_empty_field_sends_nothing() {
        let existing = vec![user(1, "A", "a@x.com", "p")];
        let (controller, api) = controller(existing.clone());
        controller.load().await;

        for (name, email, password) in [("", "e", "p"), ("n", "", "p"), ("n", "e", "")] {
            fill_draft(&controller, name, email, password);
            let result = controller.submit().await;
            assert!(matches!(result, Err(AppError::Validation(_))));
        }

        assert_eq!(api.calls(), vec![Call::List]);
        assert_eq!(read(&controller, |state| state.users().to_vec()), existing);
        assert!(!read(&controller, UsersState::is_loading));
    }

    #[tokio::test]
    async fn failed_create_keeps_the_draft_and_skips_reload() {
        let (controller, api) = controller(Vec::new());
        api.backend.borrow_mut().fail_mutations = Some(AppError::Http {
            status: 422,
            message: "email taken".to_string(),
        });
        fill_draft(&controller, "A", "a@x.com", "p");

        controller.submit().await.unwrap();

        assert_eq!(api.calls().len(), 1);
        assert_eq!(read(&controller, |state| state.draft().name.clone()), "A");
        assert!(matches!(
            read(&controller, |state| state.error().cloned()),
            Some(AppError::Http { status: 422, .. })
        ));
        assert!(!read(&controller, UsersState::is_loading));
    }

    #[tokio::test]
    async fn edit_then_update_puts_to_record_path() {
        let record = user(3, "B", "b@x.com", "q");
        let (controller, api) = controller(vec![record.clone()]);
        controller.load().await;

        controller.begin_edit(&record);
        assert_eq!(
            read(&controller, |state| state.mode().clone()),
            FormMode::Editing(UserId::from(3_u64))
        );
        assert_eq!(read(&controller, |state| state.mode().submit_label()), "Update");
        assert_eq!(api.calls(), vec![Call::List]);

        controller
            .store()
            .modify(|state| state.set_name("Bee".to_string()));
        controller.submit().await.unwrap();

        assert_eq!(
            api.calls()[1],
            Call::Update(
                "3".to_string(),
                UserPayload {
                    name: "Bee".to_string(),
                    email: "b@x.com".to_string(),
                    password: "q".to_string(),
                }
            )
        );
        assert_eq!(api.calls()[2], Call::List);
        assert_eq!(read(&controller, |state| state.mode().clone()), FormMode::Create);
        assert_eq!(read(&controller, |state| state.draft().clone()), UserDraft::default());
        assert_eq!(read(&controller, |state| state.users()[0].name.clone()), "Bee");
    }

    #[tokio::test]
    async fn failed_update_stays_in_edit_mode() {
        let record = user(3, "B", "b@x.com", "q");
        let (controller, api) = controller(vec![record.clone()]);
        controller.begin_edit(&record);
        api.backend.borrow_mut().fail_mutations =
            Some(AppError::Network("connection reset".to_string()));

        controller.submit().await.unwrap();

        assert_eq!(
            read(&controller, |state| state.mode().clone()),
            FormMode::Editing(UserId::from(3_u64))
        );
        assert_eq!(read(&controller, |state| state.draft().name.clone()), "B");
        assert!(read(&controller, |state| state.error().is_some()));
    }

    #[tokio::test]
    async fn delete_reloads_even_when_delete_fails() {
        let (controller, api) = controller(vec![user(3, "C", "c@x.com", "r")]);
        api.backend.borrow_mut().fail_mutations = Some(AppError::Http {
            status: 500,
            message: "Request failed.".to_string(),
        });

        controller.delete(UserId::from(3_u64)).await;

        assert_eq!(api.calls(), vec![Call::Delete("3".to_string()), Call::List]);
        assert!(matches!(
            read(&controller, |state| state.error().cloned()),
            Some(AppError::Http { status: 500, .. })
        ));
        assert_eq!(read(&controller, |state| state.users().len()), 1);
        assert!(!read(&controller, UsersState::is_loading));
    }

    #[tokio::test]
    async fn delete_removes_the_record_after_reload() {
        let (controller, api) = controller(vec![
            user(1, "A", "a@x.com", "p"),
            user(3, "C", "c@x.com", "r"),
        ]);
        controller.load().await;

        controller.delete(UserId::from(3_u64)).await;

        assert_eq!(
            api.calls(),
            vec![Call::List, Call::Delete("3".to_string()), Call::List]
        );
        let ids: Vec<String> = read(&controller, |state| {
            state.users().iter().map(|user| user.id.to_string()).collect()
        });
        assert_eq!(ids, vec!["1".to_string()]);
    }

    #[tokio::test]
    async fn deleting_the_edit_target_keeps_the_form() {
        let record = user(3, "C", "c@x.com", "r");
        let (controller, _api) = controller(vec![record.clone()]);
        controller.load().await;
        controller.begin_edit(&record);

        controller.delete(record.id.clone()).await;

        assert_eq!(
            read(&controller, |state| state.mode().clone()),
            FormMode::Editing(UserId::from(3_u64))
        );
        assert_eq!(read(&controller, |state| state.draft().clone()), record.to_draft());
        assert!(read(&controller, |state| state.users().is_empty()));
    }

    #[tokio::test]
    async fn loading_is_held_for_every_call() {
        let (controller, api) = controller(Vec::new());
        controller.load().await;
        fill_draft(&controller, "A", "a@x.com", "p");
        controller.submit().await.unwrap();
        controller.delete(UserId::from(1_u64)).await;

        let seen = api.backend.borrow().loading_seen.clone();
        assert_eq!(seen.len(), 5);
        assert!(seen.iter().all(|loading| *loading));
        assert!(!read(&controller, UsersState::is_loading));
    }

    #[tokio::test]
    async fn failed_load_keeps_list_and_clears_loading() {
        let (controller, api) = controller(vec![user(1, "A", "a@x.com", "p")]);
        controller.load().await;
        api.backend.borrow_mut().fail_list = Some(AppError::Timeout("slow".to_string()));

        controller.load().await;

        assert_eq!(read(&controller, |state| state.users().len()), 1);
        assert!(matches!(
            read(&controller, |state| state.error().cloned()),
            Some(AppError::Timeout(_))
        ));
        assert!(!read(&controller, UsersState::is_loading));

        controller.dismiss_error();
        assert!(read(&controller, |state| state.error().is_none()));
    }

    #[tokio::test]
    async fn superseded_reload_resolving_late_is_dropped() {
        let (controller, api) = controller(Vec::new());
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        api.backend.borrow_mut().gates.extend([first_rx, second_rx]);

        let release = async {
            tokio::task::yield_now().await;
            second_tx.send(vec![user(2, "Fresh", "f@x.com", "p")]).unwrap();
            tokio::task::yield_now().await;
            tokio::task::yield_now().await;
            first_tx.send(vec![user(1, "Stale", "s@x.com", "p")]).unwrap();
        };

        tokio::join!(controller.load(), controller.load(), release);

        let names: Vec<String> = read(&controller, |state| {
            state.users().iter().map(|user| user.name.clone()).collect()
        });
        assert_eq!(names, vec!["Fresh".to_string()]);
        assert!(!read(&controller, UsersState::is_loading));
    }

    #[tokio::test]
    async fn cancel_edit_returns_to_create_mode() {
        let record = user(5, "E", "e@x.com", "s");
        let (controller, api) = controller(vec![record.clone()]);
        controller.begin_edit(&record);

        controller.cancel_edit();

        assert_eq!(read(&controller, |state| state.mode().clone()), FormMode::Create);
        assert_eq!(read(&controller, |state| state.draft().clone()), UserDraft::default());
        assert!(api.calls().is_empty());
    }
}
