pub mod commands;
pub mod config;
pub mod handlers;
pub mod logging;
pub mod server;

use colored::Colorize;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

// Re-export commonly used items for convenience
pub use config::{LogFormat, ServerConfig};
pub use server::{AppState, build_router};

pub fn print_banner() {
    println!(
        "{} {}",
        "seolens".bright_cyan().bold(),
        format!("v{} - on-page SEO audit", env!("CARGO_PKG_VERSION")).bright_black()
    );
    println!();
}
