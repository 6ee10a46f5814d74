//! Build script for blastzone-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates controller.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use blastzone_core::config::ParseError;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate controller.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=controller.toml");

    let config_path = Path::new("controller.toml");

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read controller.toml", &[e.to_string()]),
    };

    // Parse and validate TOML syntax
    if let Err(e) = toml::from_str::<toml::Value>(&config_content) {
        fail(
            "Invalid TOML syntax in controller.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        );
    }

    // Same parser the firmware runs at boot
    if let Err(e) = blastzone_core::config::parse_config(&config_content) {
        fail("Invalid controller.toml", &[describe(e, &config_content)]);
    }

    println!("cargo:warning=controller.toml validated successfully");
}

/// One-line description of a parse error, quoting the offending line
fn describe(error: ParseError, content: &str) -> String {
    let (line, what) = match error {
        ParseError::InvalidSection { line } => (line, "unknown section"),
        ParseError::InvalidKey { line } => (line, "unknown key"),
        ParseError::InvalidValue { line } => (line, "invalid or out-of-range value"),
        ParseError::InvalidPin { line } => (line, "invalid pin"),
    };
    let text = content.lines().nth(line.saturating_sub(1)).unwrap_or("").trim();
    format!("line {}: {}: {}", line, what, text)
}

/// Abort the build with a boxed error message
fn fail(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<57}║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        lines
            .iter()
            .map(|line| {
                let truncated = if line.len() > 62 {
                    format!("{}...", &line[..59])
                } else {
                    line.to_string()
                };
                format!("║  • {:<62} ║", truncated)
            })
            .collect::<Vec<_>>()
            .join("\n")
    );
}
