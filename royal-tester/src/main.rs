mod common;
mod loader;
mod logic;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use common::scenario::{ScenarioCtx, TestScenario, get_scenario, list_scenarios, scenario_keys};
use common::split_csv;
use loader::FsLoader;
use logic::reports::RunInfo;
use logic::{LogicTester, ScenarioResult, resolve_seed_inputs};

#[derive(Debug, Parser)]
#[command(name = "royal-tester", version)]
#[command(about = "Automated QA for the Royal Map Randomizer selection engine")]
struct Args {
    /// Map history JSON to test against (defaults to the bundled dataset)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Selection config JSON (defaults to the bundled year range)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Scenarios to run (comma-separated, or `all`)
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (comma-separated; decimal, 0x-hex, or `random`)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of iterations per scenario and seed
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Args {
    /// Human progress output would corrupt a machine-readable report on stdout.
    fn chatty(&self) -> bool {
        self.report == "console" || self.output.is_some()
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    if args.chatty() {
        announce_banner();
    }

    let start_time = Instant::now();
    let scenarios = expand_scenarios(&args.scenarios)?;
    let seed_infos = resolve_seed_inputs(&split_csv(&args.seeds))?;
    for info in &seed_infos {
        log::debug!("Seed {} from token {:?}", info.seed, info.source);
    }
    let seeds: Vec<u64> = seed_infos.iter().map(|s| s.seed).collect();

    let loader = FsLoader::new(args.data.clone(), args.config.clone());
    let ctx = ScenarioCtx::load(&loader, args.verbose && args.chatty())?;
    log::info!(
        "Loaded {} maps from {} (config: {})",
        ctx.catalog.len(),
        loader.data_label(),
        loader.config_label()
    );
    let info = RunInfo {
        data_source: loader.data_label(),
        map_count: ctx.catalog.len(),
        years: ctx.config.available_years.clone(),
    };

    let results = run_scenarios(&args, &ctx, &scenarios, &seeds);
    write_reports(&args, &info, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_level),
    )
    .try_init();
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:22} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🏁 Royal Map Randomizer Tester".bright_cyan().bold());
    println!("{}", "==============================".cyan());
}

fn expand_scenarios(scenarios_arg: &str) -> Result<Vec<TestScenario>> {
    let mut keys = split_csv(scenarios_arg);
    if keys.iter().any(|s| s.eq_ignore_ascii_case("all")) {
        keys.retain(|s| !s.eq_ignore_ascii_case("all"));
        keys.extend(scenario_keys().into_iter().map(str::to_string));
    }

    let mut scenarios: Vec<TestScenario> = Vec::new();
    for key in &keys {
        let Some(scenario) = get_scenario(key) else {
            bail!(
                "Unknown scenario: {key} (available: {})",
                scenario_keys().join(", ")
            );
        };
        if !scenarios.iter().any(|s| s.key == scenario.key) {
            scenarios.push(scenario);
        }
    }
    if scenarios.is_empty() {
        bail!("No scenarios selected");
    }
    Ok(scenarios)
}

fn run_scenarios(
    args: &Args,
    ctx: &ScenarioCtx,
    scenarios: &[TestScenario],
    seeds: &[u64],
) -> Vec<ScenarioResult> {
    if args.chatty() {
        println!("{}", "🧠 Running Selection Tests".bright_yellow().bold());
        println!("{}", "-".repeat(30).yellow());
    }

    let tester = LogicTester::new(ctx, args.verbose && args.chatty());
    scenarios
        .iter()
        .flat_map(|scenario| tester.run_scenario(scenario, seeds, args.iterations))
        .collect()
}

fn write_reports(
    args: &Args,
    info: &RunInfo,
    results: &[ScenarioResult],
    start_time: Instant,
) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => logic::reports::generate_json_report(&mut output_target, results)?,
        "markdown" => logic::reports::generate_markdown_report(&mut output_target, info, results)?,
        _ => {
            let duration = start_time.elapsed();
            logic::reports::generate_console_report(&mut output_target, info, results, duration)?;
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {duration:?}")?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            data: None,
            config: None,
            scenarios: "smoke".to_string(),
            list_scenarios: false,
            seeds: "1337".to_string(),
            iterations: 1,
            report: "json".to_string(),
            verbose: false,
            output: None,
        }
    }

    #[test]
    fn args_parse_defaults() {
        let args = Args::parse_from(["royal-tester"]);
        assert_eq!(args.scenarios, "smoke");
        assert_eq!(args.seeds, "1337");
        assert_eq!(args.iterations, 10);
        assert_eq!(args.report, "console");
        assert!(args.chatty());
    }

    #[test]
    fn expand_all_and_dedupe() {
        let scenarios = expand_scenarios("smoke, all").unwrap();
        assert_eq!(scenarios.len(), scenario_keys().len());
        assert_eq!(scenarios[0].key, "smoke");
        assert!(expand_scenarios("bogus").is_err());
        assert!(expand_scenarios(" , ").is_err());
    }

    #[test]
    fn json_to_stdout_is_quiet() {
        let mut args = base_args();
        assert!(!args.chatty());
        args.output = Some(PathBuf::from("report.json"));
        assert!(args.chatty());
    }

    #[test]
    fn reports_write_to_file() {
        let path = std::env::temp_dir().join(format!("royal-report-{}.md", std::process::id()));
        let mut args = base_args();
        args.report = "markdown".to_string();
        args.output = Some(path.clone());
        let ctx = ScenarioCtx::load(&FsLoader::default(), false).unwrap();
        let scenarios = expand_scenarios("smoke,draw-bounds").unwrap();
        let results = run_scenarios(&args, &ctx, &scenarios, &[1, 2]);
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.passed));

        write_reports(&args, &RunInfo::default(), &results, Instant::now()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Draw Bounds"));
        let _ = std::fs::remove_file(path);
    }
}
