use clap::{App, Arg, ArgMatches};
use sitemapper::build::{build_site, Clock};
use sitemapper::config::{Config, Overrides};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let matches = App::new("sitemapper")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generates sitemap.xml and the blog writing guide")
        .arg(
            Arg::with_name("root")
                .long("root")
                .value_name("DIR")
                .help("The project root; relative paths resolve against it")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("config")
                .long("config")
                .value_name("FILE")
                .help("The project file (default: sitemapper.yaml in the project root, if present)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("base-url")
                .long("base-url")
                .value_name("URL")
                .help("The site URL prefixed onto every sitemap entry")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("sitemap")
                .long("sitemap")
                .value_name("FILE")
                .help("Where to write the sitemap")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("guide")
                .long("guide")
                .value_name("FILE")
                .help("Where to write the blog guide")
                .takes_value(true),
        )
        .get_matches();

    if let Err(e) = run(&matches) {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let root = match matches.value_of("root") {
        Some(root) => PathBuf::from(root),
        None => std::env::current_dir()?,
    };
    let overrides = Overrides {
        config_file: matches.value_of("config").map(PathBuf::from),
        base_url: matches.value_of("base-url").map(String::from),
        sitemap: matches.value_of("sitemap").map(PathBuf::from),
        guide: matches.value_of("guide").map(PathBuf::from),
    };
    let config = Config::from_directory(&root, overrides)?;
    build_site(&config, &Clock::now())?;
    Ok(())
}
