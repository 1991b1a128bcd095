//! Navigation targets produced by gates and submissions

use crate::models::Role;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "route", rename_all = "kebab-case")]
pub enum Route {
    Login,
    Dashboard { role: Role },
}

impl Route {
    pub fn dashboard(role: Role) -> Self {
        Route::Dashboard { role }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Dashboard { role } => format!("/{}/dashboard", role),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
