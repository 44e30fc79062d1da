//! Selection-set IR → model declaration trees.
//!
//! Takes the IR of a GraphQL document (field sets, fields, custom scalars)
//! and produces interface / implementation declarations plus the custom
//! scalar registry. Rendering to source text is left to the consumer.
pub mod cli;
pub mod compile;
pub mod decl;
pub mod error;
pub mod ir;
pub mod path_de;
pub mod resolve;
pub mod validate;

pub use compile::{compile_document, CompiledDocument, Mode};
pub use error::IrError;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=gql_modelgen=debug`
/// or `RUST_LOG=gql_modelgen=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
