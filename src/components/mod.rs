//! Shared UI components exported for routes.

pub(crate) mod ui;

pub(crate) use ui::{Alert, AlertKind, Button, ButtonTone, Spinner};
