//! Shared application state between the dashboard views

use crate::config::AppConfig;

/// Central state shared by the dashboard views
#[derive(Debug, Clone, Default)]
pub struct SharedAppState {
    /// Application configuration
    pub config: AppConfig,
    /// Runtime state (not persisted)
    pub runtime: RuntimeState,
}

impl SharedAppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            runtime: RuntimeState::default(),
        }
    }
}

/// Runtime state that is not persisted
#[derive(Debug, Clone, Default)]
pub struct RuntimeState {
    /// Last error message (if any), shown inline
    pub last_error: Option<String>,
    /// Last status message (if any), shown inline
    pub last_status: Option<String>,
}

impl RuntimeState {
    /// Clear any error and status state
    pub fn clear_messages(&mut self) {
        self.last_error = None;
        self.last_status = None;
    }

    /// Set an error message (clears any status)
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.last_error = Some(error.into());
        self.last_status = None;
    }

    /// Set a status message (clears any error)
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.last_status = Some(status.into());
        self.last_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_error_are_mutually_exclusive() {
        let mut runtime = RuntimeState::default();
        runtime.set_error("boom");
        assert!(runtime.last_error.is_some());

        runtime.set_status("saved");
        assert!(runtime.last_error.is_none());
        assert_eq!(runtime.last_status.as_deref(), Some("saved"));

        runtime.clear_messages();
        assert!(runtime.last_status.is_none());
    }
}
