//! Application State
//!
//! Arc-wrapped state shared across handlers. Everything in it is read-only.

use std::sync::Arc;

use crate::{
    content::Catalog,
    webhook::{Launcher, SignatureVerifier},
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    catalog: Catalog,
    verifier: SignatureVerifier,
    launcher: Box<dyn Launcher>,
}

impl AppState {
    pub fn new(catalog: Catalog, verifier: SignatureVerifier, launcher: impl Launcher + 'static) -> Self {
        Self {
            inner: Arc::new(InnerState {
                catalog,
                verifier,
                launcher: Box::new(launcher),
            }),
        }
    }

    /// Get the research catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get the webhook signature verifier.
    pub fn verifier(&self) -> &SignatureVerifier {
        &self.inner.verifier
    }

    /// Get the deployment launcher.
    pub fn launcher(&self) -> &dyn Launcher {
        self.inner.launcher.as_ref()
    }
}
