//! Client-side state of the users console.
//!
//! All transitions are synchronous and pure; the controller brackets every
//! network call with them. Two counters make overlapping operations safe:
//!
//! - `in_flight` counts outstanding calls, so `is_loading` stays true until
//!   the last one settles regardless of completion order.
//! - list reloads carry a [`Generation`]; a response is applied only when it is
//!   newer than the last applied one, so a superseded reload that resolves late
//!   never clobbers fresher data.

use super::types::{User, UserDraft, UserId, UserPayload};
use crate::app_lib::AppError;

/// Whether the form creates a new record or edits an existing one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Editing(UserId),
}

impl FormMode {
    #[must_use]
    pub fn editing_id(&self) -> Option<&UserId> {
        match self {
            FormMode::Create => None,
            FormMode::Editing(id) => Some(id),
        }
    }

    #[must_use]
    pub fn heading(&self) -> &'static str {
        match self {
            FormMode::Create => "Create User",
            FormMode::Editing(_) => "Update User",
        }
    }

    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Create => "Create",
            FormMode::Editing(_) => "Update",
        }
    }
}

/// Which of the three mutually exclusive list views is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListView<'a> {
    Loading,
    Table(&'a [User]),
    Empty,
}

/// The mutation a form submit resolves to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    Create(UserPayload),
    Update(UserId, UserPayload),
}

/// Sequence number of a list reload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

#[derive(Clone, Debug, Default)]
pub struct UsersState {
    users: Vec<User>,
    draft: UserDraft,
    mode: FormMode,
    in_flight: usize,
    issued: u64,
    applied: u64,
    error: Option<AppError>,
}

impl UsersState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    #[must_use]
    pub fn draft(&self) -> &UserDraft {
        &self.draft
    }

    #[must_use]
    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    #[must_use]
    pub fn error(&self) -> Option<&AppError> {
        self.error.as_ref()
    }

    /// Rendering policy: loading wins, then a non-empty table, then the empty state.
    #[must_use]
    pub fn list_view(&self) -> ListView<'_> {
        if self.is_loading() {
            ListView::Loading
        } else if self.users.is_empty() {
            ListView::Empty
        } else {
            ListView::Table(&self.users)
        }
    }

    pub fn set_name(&mut self, name: String) {
        self.draft.name = name;
    }

    pub fn set_email(&mut self, email: String) {
        self.draft.email = email;
    }

    pub fn set_password(&mut self, password: String) {
        self.draft.password = password;
    }

    /// Copies a record into the form and switches to update mode. No network call.
    pub fn begin_edit(&mut self, user: &User) {
        self.draft = user.to_draft();
        self.mode = FormMode::Editing(user.id.clone());
    }

    /// Leaves update mode and clears the form.
    pub fn cancel_edit(&mut self) {
        self.draft = UserDraft::default();
        self.mode = FormMode::Create;
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Resolves the current form into a mutation.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` when creating with an empty field.
    pub fn submission(&self) -> Result<Submission, AppError> {
        match &self.mode {
            FormMode::Create => self.draft.to_create_payload().map(Submission::Create),
            FormMode::Editing(id) => Ok(Submission::Update(id.clone(), self.draft.to_payload())),
        }
    }

    /// Marks a mutation as in flight and clears the previous error.
    pub fn begin_request(&mut self) {
        self.in_flight += 1;
        self.error = None;
    }

    /// Releases a mutation, recording its failure if any.
    pub fn finish_request(&mut self, failure: Option<AppError>) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if let Some(err) = failure {
            self.error = Some(err);
        }
    }

    /// Marks a list reload as in flight and returns its generation.
    pub fn begin_reload(&mut self) -> Generation {
        self.in_flight += 1;
        self.issued += 1;
        Generation(self.issued)
    }

    /// Releases a list reload. Returns whether the outcome was applied; outcomes
    /// older than the last applied reload are dropped.
    pub fn finish_reload(
        &mut self,
        generation: Generation,
        outcome: Result<Vec<User>, AppError>,
    ) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);

        if generation.0 <= self.applied {
            return false;
        }
        self.applied = generation.0;

        match outcome {
            Ok(users) => self.users = users,
            Err(err) => self.error = Some(err),
        }
        true
    }

    /// Applies a successful create: the form is cleared.
    pub fn created(&mut self) {
        self.draft = UserDraft::default();
    }

    /// Applies a successful update: the form is cleared and leaves update mode.
    pub fn updated(&mut self) {
        self.cancel_edit();
    }
}
