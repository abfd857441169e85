use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("tempora")
        .version("1.0.0")
        .author("Tempora Contributors")
        .about("Extract publication dates from web pages")
        .arg(clap::arg!(<INPUT> "URL to fetch, local HTML file, or '-' for stdin"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--original "Look for the original publication date"))
        .arg(clap::arg!(--fast "Skip the slow fallback stages"))
        .arg(clap::arg!(-f --format <FORMAT> "strftime-style template for the printed date").default_value("%Y-%m-%d"))
        .arg(clap::arg!(--url <URL> "Source URL of the document").value_name("URL"))
        .arg(clap::arg!(--min_date <DATE> "Earliest acceptable date (YYYY-MM-DD)").value_name("DATE"))
        .arg(clap::arg!(--max_date <DATE> "Latest acceptable date (YYYY-MM-DD)").value_name("DATE"))
        .arg(clap::arg!(--json "Print the result as a JSON object"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(clap::arg!(--user_agent <UA> "Custom User-Agent for HTTP requests").value_name("UA"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "tempora", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "tempora", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "tempora", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "tempora", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
