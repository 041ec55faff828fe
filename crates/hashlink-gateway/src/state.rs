use std::fmt::{Display, Formatter};
use std::sync::Arc;

use clap::ValueEnum;
use hashlink_core::Mapper;

/// Runtime mode of the service.
///
/// Only [`RuntimeMode::Development`] exposes internal error messages in
/// response bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RuntimeMode {
    #[value(name = "development", alias = "dev")]
    Development,
    #[default]
    #[value(name = "production", alias = "prod")]
    Production,
}

impl RuntimeMode {
    pub fn exposes_errors(self) -> bool {
        matches!(self, RuntimeMode::Development)
    }
}

impl Display for RuntimeMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeMode::Development => write!(f, "development"),
            RuntimeMode::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    mapper: Arc<dyn Mapper>,
    mode: RuntimeMode,
}

impl AppState {
    pub fn new(mapper: Arc<dyn Mapper>, mode: RuntimeMode) -> Self {
        Self { mapper, mode }
    }

    pub fn mapper(&self) -> &dyn Mapper {
        self.mapper.as_ref()
    }

    pub fn mode(&self) -> RuntimeMode {
        self.mode
    }
}
