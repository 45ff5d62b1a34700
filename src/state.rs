//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::signature::SignatureScanner;
use crate::validation::ValidationChain;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    chain: ValidationChain,
}

impl AppState {
    /// Create the state with the standard presence → type → content chain
    pub fn new(config: Config, scanner: SignatureScanner) -> Self {
        let phrases = scanner.phrases().len();
        let chain = ValidationChain::standard(scanner);
        tracing::debug!(
            phrases,
            steps = ?chain.step_names(),
            "Validation chain initialized"
        );

        Self {
            inner: Arc::new(AppStateInner { config, chain }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the validation chain
    pub fn chain(&self) -> &ValidationChain {
        &self.inner.chain
    }
}
