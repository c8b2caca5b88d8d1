//! content-by-concept entry point
//!
//! All logic is delegated to the CLI module.

use content_by_concept::cli;

fn main() {
    if let Err(e) = cli::run() {
        tracing::error!(error = %e, "Fatal");
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
