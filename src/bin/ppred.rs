use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;
use persistent_phylogeny::graph::read_graph;
use persistent_phylogeny::reduction::{reduce, ReductionConfig, SourcePolicy};

#[derive(Parser)]
#[command(name = "ppred")]
#[command(about = "Reduce a species-character matrix to a persistent-phylogeny realization sequence")]
struct Args {
    /// Path to the matrix file
    #[arg(value_name = "FILE")]
    file: String,

    /// Try every safe source and keep the first complete reduction
    #[arg(long)]
    exhaustive: bool,

    /// Ask which safe source to realize when more than one is available
    #[arg(long)]
    interactive: bool,

    /// Realize the n-th safe source instead of the first one
    #[arg(long, default_value_t = 0, require_equals = true)]
    nth_source: usize,

    /// Verbose logging level: "trace", "debug", or "info"
    /// If specified without a value (--verbose or -v), defaults to "info"
    /// Use --verbose=LEVEL to specify a level, or just --verbose/-v for info
    #[arg(long, short = 'v', value_name = "LEVEL", num_args = 0..=1, default_missing_value = "info", require_equals = true)]
    verbose: Option<Option<LogLevel>>,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
        }
    }
}

fn main() {
    let args = Args::parse();

    // Handle verbose flag: None = not specified, Some(None) = specified
    // without value (defaults to info), Some(Some(level)) = specified with value
    let log_level = match args.verbose {
        None => LevelFilter::Off,
        Some(None) => LevelFilter::Info,
        Some(Some(level)) => level.into(),
    };
    Builder::from_default_env().filter_level(log_level).init();

    let mut graph = match read_graph(&args.file) {
        Ok(graph) => graph,
        Err(e) => {
            eprintln!("Failed to load matrix file {}: {}", args.file, e);
            std::process::exit(2);
        }
    };

    println!(
        "Loaded red-black graph with {} species and {} characters.",
        graph.num_species(),
        graph.num_characters()
    );

    let policy = if args.exhaustive {
        SourcePolicy::Exhaustive
    } else if args.interactive {
        SourcePolicy::Interactive
    } else if args.nth_source > 0 {
        SourcePolicy::Nth(args.nth_source)
    } else {
        SourcePolicy::FirstFound
    };
    let config = ReductionConfig::new().policy(policy);

    match reduce(&mut graph, &config) {
        Ok(reduction) => {
            let rendered: Vec<String> = reduction.iter().map(|sc| sc.to_string()).collect();
            println!("Reduction: {{ {} }}", rendered.join(" "));
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
