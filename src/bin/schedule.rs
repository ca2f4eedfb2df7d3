//! CLI demo: generates schedules against the in-memory fixture catalog.

use clap::Parser;
use course_scheduler::config::SchedulerConfig;
use course_scheduler::logging::setup_logging;
use course_scheduler::orchestrator::{GenerateRequest, Orchestrator};
use course_scheduler::store::memory::InMemorySectionStore;

/// Generates conflict-free weekly schedules for a set of course codes.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Term code, e.g. "202309"
    #[arg(long, default_value = "202309")]
    term: String,

    /// Course codes to schedule, e.g. --course BIOL1000U --course CRMN1000U
    #[arg(long = "course", required = true)]
    courses: Vec<String>,

    /// Maximum number of schedules to return; falls back to
    /// `SCHEDULER_DEFAULT_NUM_SCHEDULES` (or 3) when unset.
    #[arg(long)]
    num_schedules: Option<usize>,

    /// Solver to use
    #[arg(long, value_enum, default_value_t = SolverArg::Cp)]
    solver: SolverArg,

    #[arg(long)]
    time_limit_seconds: Option<u64>,

    #[arg(long)]
    max_solutions: Option<usize>,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum SolverArg {
    Random,
    Cp,
}

impl SolverArg {
    fn as_str(&self) -> &'static str {
        match self {
            SolverArg::Random => "random",
            SolverArg::Cp => "cp",
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = SchedulerConfig::load().unwrap_or_default();
    setup_logging(&config);

    let store = InMemorySectionStore::fixture();
    let num_schedules = args.num_schedules.unwrap_or(config.default_num_schedules);
    let orchestrator = Orchestrator::with_config(&store, config);

    let request = GenerateRequest {
        term: args.term,
        course_codes: args.courses,
        num_schedules,
        time_limit_seconds: args.time_limit_seconds,
        max_solutions: args.max_solutions,
        filters: None,
        preferences: None,
        solver: args.solver.as_str().to_string(),
    };

    let response = orchestrator.generate(request).await?;

    if response.schedules.is_empty() {
        println!("no valid schedules found");
        return Ok(());
    }

    for (index, schedule) in response.schedules.iter().enumerate() {
        println!("schedule {}:", index + 1);
        for (course, crns) in schedule {
            println!("  {course}: {}", crns.join(", "));
        }
    }

    Ok(())
}
