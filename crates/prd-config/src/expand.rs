//! `${VAR}` and `${VAR:-default}` expansion for configuration strings.

use std::cell::RefCell;
use std::convert::Infallible;
use std::env::VarError;

use crate::ConfigError;

/// Why a referenced variable produced no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Absence {
    Unset,
    Empty,
    NotUnicode,
}

impl Absence {
    fn describe(self) -> &'static str {
        match self {
            Self::Unset => "not set",
            Self::Empty => "is empty",
            Self::NotUnicode => "is not valid UTF-8",
        }
    }
}

fn lookup(var: &str) -> Result<String, Absence> {
    match std::env::var(var) {
        Ok(value) if value.is_empty() => Err(Absence::Empty),
        Ok(value) => Ok(value),
        Err(VarError::NotPresent) => Err(Absence::Unset),
        Err(VarError::NotUnicode(_)) => Err(Absence::NotUnicode),
    }
}

/// Expand `${VAR}` references in the value of the config field `field`.
///
/// An empty variable counts as unset, so `${VAR:-default}` falls back to
/// `default` in both cases. A reference without a default must resolve to a
/// non-empty value. Bare `$VAR` is left alone.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let absent = RefCell::new(Vec::new());
    let expanded = match shellexpand::env_with_context(
        value,
        |var| -> Result<Option<String>, Infallible> {
            match lookup(var) {
                Ok(found) => Ok(Some(found)),
                Err(reason) => {
                    absent.borrow_mut().push((var.to_owned(), reason));
                    Ok(None)
                }
            }
        },
    ) {
        Ok(expanded) => expanded,
        Err(err) => match err.cause {},
    };

    // Unresolved references without a default are left in place.
    for (var, reason) in absent.into_inner() {
        if expanded.contains(&format!("${{{var}}}")) {
            return Err(ConfigError::EnvVar {
                field: field.to_owned(),
                message: format!("${{{var}}} {}", reason.describe()),
            });
        }
    }

    Ok(expanded.into_owned())
}
