use crate::CLAP_STYLING;
use crate::config::DEFAULT_HOST;
use clap::{arg, command};

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("seolens")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("seolens")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("serve")
                .about("Run the HTTP audit API (POST /api/scrape, GET /api/health)")
                .arg(
                    arg!(--"host" <HOST>)
                        .required(false)
                        .help("Interface to bind")
                        .default_value(DEFAULT_HOST),
                )
                .arg(
                    arg!(-p --"port" <PORT>)
                        .required(false)
                        .help("Port to listen on")
                        .env("PORT")
                        .value_parser(clap::value_parser!(u16))
                        .default_value("5000"),
                )
                .arg(timeout_arg())
                .arg(
                    arg!(--"no-cors")
                        .required(false)
                        .help("Disable permissive cross-origin headers")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"log-format" <FORMAT>)
                        .required(false)
                        .help("Log output format: text, json")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                ),
        )
        .subcommand(
            command!("audit")
                .about("Audit a single page and print an on-page SEO report")
                .arg(
                    arg!(<URL>)
                        .required(true)
                        .help("The page to audit (https:// is assumed when no scheme is given)"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json, markdown")
                        .value_parser(["text", "json", "markdown", "md"])
                        .default_value("text"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(timeout_arg()),
        )
}

fn timeout_arg() -> clap::Arg {
    arg!(--"timeout" <SECONDS>)
        .required(false)
        .help("Per-request timeout in seconds for the probe and the page fetch")
        .value_parser(clap::value_parser!(u64))
        .default_value("10")
}
