// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Halide-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Halide and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Halide CLI entrypoint.
//!
//! Runs the interactive TUI. Local flags (guided-tour dismissal, onboarding)
//! persist in a prefs file; `--demo` seeds a built-in catalogue of talents
//! and spots so the app is browsable without any remote data.

use std::error::Error;

use halide::session::Prefs;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--prefs <file>]\n  {program} --demo [--prefs <file>]\n\n--demo seeds a built-in catalogue of talents and shooting spots.\n--prefs selects the local preferences file (default: in-memory, nothing persists)."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    prefs_file: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--prefs" => {
                if options.prefs_file.is_some() {
                    return Err(());
                }
                let file = args.next().ok_or(())?;
                options.prefs_file = Some(file);
            }
            _ => return Err(()),
        }
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "halide".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let prefs = match &options.prefs_file {
            Some(path) => Prefs::load(path)?,
            None => Prefs::in_memory(),
        };

        if options.demo {
            halide::tui::run_demo(prefs)
        } else {
            halide::tui::run(prefs)
        }
    })();

    if let Err(err) = result {
        eprintln!("halide: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_options, CliOptions};

    #[test]
    fn parses_empty_args() {
        let options = parse_options(std::iter::empty()).expect("parse options");
        assert_eq!(options, CliOptions::default());
    }

    #[test]
    fn parses_demo_flag() {
        let options = parse_options(["--demo".to_owned()].into_iter()).expect("parse options");
        assert!(options.demo);
        assert!(options.prefs_file.is_none());
    }

    #[test]
    fn parses_prefs_file() {
        let options = parse_options(["--prefs".to_owned(), "halide.json".to_owned()].into_iter())
            .expect("parse options");
        assert_eq!(options.prefs_file.as_deref(), Some("halide.json"));
        assert!(!options.demo);
    }

    #[test]
    fn parses_demo_and_prefs_in_any_order() {
        let options = parse_options(
            ["--prefs".to_owned(), "p.json".to_owned(), "--demo".to_owned()].into_iter(),
        )
        .expect("parse options");
        assert!(options.demo);
        assert_eq!(options.prefs_file.as_deref(), Some("p.json"));
    }

    #[test]
    fn rejects_repeated_flags() {
        parse_options(["--demo".to_owned(), "--demo".to_owned()].into_iter()).unwrap_err();
    }

    #[test]
    fn rejects_prefs_without_a_value() {
        parse_options(["--prefs".to_owned()].into_iter()).unwrap_err();
    }

    #[test]
    fn rejects_unknown_arguments() {
        parse_options(["--verbose".to_owned()].into_iter()).unwrap_err();
        parse_options(["positional".to_owned()].into_iter()).unwrap_err();
    }
}
