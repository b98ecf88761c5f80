use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let Some(out_dir) = env::var_os("OUT_DIR").map(PathBuf::from) else {
        return;
    };
    let completions_dir = out_dir.join("completions");

    if let Err(e) = fs::create_dir_all(&completions_dir) {
        println!("cargo:warning=Skipping shell completions: {}", e);
        return;
    }

    let mut cmd = clap::Command::new("gist")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Summarize news articles by URL")
        .arg(clap::arg!([URL] "Article URL (http or https)"))
        .arg(clap::arg!(--lines "Summarize into 3, 5 and 8 lines instead of 100, 200 and 300 characters"))
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (text, json)")
                .value_name("FORMAT")
                .default_value("text")
                .value_parser(["text", "json"]),
        )
        .arg(clap::arg!(--"generator-url" <URL> "Base URL of the inference endpoint").value_name("URL"))
        .arg(clap::arg!(--model <ID> "Model identifier sent to the inference endpoint").value_name("ID"))
        .arg(clap::arg!(--timeout <SECS> "Article fetch timeout in seconds").default_value("10"))
        .arg(clap::arg!(--"user-agent" <UA> "Custom User-Agent for the article fetch").value_name("UA"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(-v --verbose "Enable debug logging"))
        .arg(
            clap::arg!(--completions <SHELL> "Generate shell completion script")
                .value_name("SHELL")
                .value_parser(["bash", "elvish", "fish", "powershell", "zsh"]),
        );

    for shell in [
        clap_complete::Shell::Bash,
        clap_complete::Shell::Zsh,
        clap_complete::Shell::Fish,
        clap_complete::Shell::PowerShell,
    ] {
        if let Err(e) = clap_complete::generate_to(shell, &mut cmd, "gist", &completions_dir) {
            println!("cargo:warning=Failed to generate {} completions: {}", shell, e);
        }
    }

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
