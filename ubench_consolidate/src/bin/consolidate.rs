use clap::{App, Arg};
use color_eyre::Report;
use tracing_subscriber::EnvFilter;
use ubench_consolidate::ConsolidateConfig;

const DEFAULT_LOG_FILTER: &str = "info";

fn main() -> Result<(), Report> {
    color_eyre::install()?;

    // init logging; `RUST_LOG` takes precedence over the default filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let (paths, config) = parse_args();
    let summary = ubench_consolidate::consolidate(&paths, &config)?;
    tracing::info!(
        "consolidated {} records from {} files into {} tables \
         ({} records skipped, {} files malformed)",
        summary.consolidated,
        summary.files,
        summary.tables.len(),
        summary.skipped,
        summary.malformed,
    );
    Ok(())
}

fn parse_args() -> (Vec<String>, ConsolidateConfig) {
    let matches = App::new("consolidate")
        .version("0.1")
        .about(
            "Regroups benchmark JSON results into one CSV table per run type \
             and time type.",
        )
        .arg(
            Arg::with_name("output_dir")
                .long("output-dir")
                .value_name("OUTPUT_DIR")
                .help(
                    "directory where tables are written; \
                     default: current directory",
                )
                .takes_value(true),
        )
        .arg(
            Arg::with_name("skip_malformed")
                .long("skip-malformed")
                .help(
                    "log and leave out input files that cannot be parsed \
                     instead of failing",
                ),
        )
        .arg(
            Arg::with_name("files")
                .value_name("FILE")
                .help(
                    "benchmark result files named like \
                     'impl=NAME+procs=N+ext=.json'",
                )
                .required(true)
                .multiple(true),
        )
        .get_matches();

    let paths = matches
        .values_of("files")
        .map(|values| values.map(String::from).collect())
        .unwrap_or_default();

    let mut config = ConsolidateConfig::new();
    if let Some(output_dir) = matches.value_of("output_dir") {
        config.set_output_dir(output_dir);
    }
    config.set_skip_malformed(matches.is_present("skip_malformed"));

    tracing::debug!("paths: {:?}", paths);
    tracing::debug!("config: {:?}", config);

    (paths, config)
}
