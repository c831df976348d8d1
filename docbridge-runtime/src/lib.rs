//! Runtime capabilities for the embedded editing engine.
//!
//! The engine never talks to the network itself. It is handed an
//! [`EditorRuntime`] that uploads images and rewrites image URLs, and
//! optionally a [`StylesRuntime`] for the paragraph style catalogue.
//! [`RuntimeFacade`] implements both on top of the content pipeline and a
//! [`StyleStore`].

mod error;
mod facade;
mod proxy;
mod runtime;
mod styles;

pub use error::{RuntimeError, RuntimeResult};
pub use facade::RuntimeFacade;
pub use proxy::{ProxyRule, ProxyRules};
pub use runtime::{EditorRuntime, StylesRuntime};
pub use styles::{StyleConfig, StyleStore};
