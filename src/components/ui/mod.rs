mod alert;
mod button;
mod spinner;

pub(crate) use alert::{Alert, AlertKind};
pub(crate) use button::{Button, ButtonTone};
pub(crate) use spinner::Spinner;
