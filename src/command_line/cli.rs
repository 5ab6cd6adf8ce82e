#![allow(clippy::cast_precision_loss)]

use dpll_solver::generator::colouring::read_graph_file;
use dpll_solver::generator::random::RandomCnf;
use dpll_solver::generator::{GeneratorError, GraphError};
use dpll_solver::sat::cnf::Cnf;
use dpll_solver::sat::configs::DpllConfig;
use dpll_solver::sat::dimacs::{parse_file, parse_str, write_file};
use dpll_solver::sat::dpll::Dpll;
use dpll_solver::sat::error::{DimacsError, SolutionError, SolveError, VerifyError};
use dpll_solver::sat::solution::{SolutionFile, read_solution_file, write_solution_file};
use dpll_solver::sat::solver::{SolutionStats, SolveResult, Solver};
use dpll_solver::sat::verify::{Verifier, VerifyPolicy, verify};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;
use tikv_jemalloc_ctl::{epoch, stats};
use tracing::{info, warn};

/// Defines the command-line interface for the DPLL solver application.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "dpll-solver", version, about = "A DPLL SAT solver")]
pub(crate) struct Cli {
    /// An optional path argument. If provided without a subcommand, it's
    /// treated as the path to a DIMACS .cnf file, or a directory of them.
    #[arg()]
    pub path: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Specifies the subcommand to execute (e.g. `file`, `text`, `verify`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a CNF file in DIMACS format, or every .cnf file under a directory.
    File {
        /// Path to the DIMACS .cnf file or directory.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a CNF formula provided as plain text.
    Text {
        /// Literal CNF input as a string (e.g. "1 -2 0\n2 3 0").
        /// Literals are space-separated, and 0 terminates a clause.
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Check a solution file against a DIMACS problem.
    Verify {
        /// Path to the DIMACS .cnf file.
        #[arg(long)]
        problem: PathBuf,

        /// Path to the solution file.
        #[arg(long)]
        solution: PathBuf,

        /// How to treat a variable missing from the solution.
        #[arg(long, value_enum, default_value_t = VerifyPolicy::Permissive)]
        policy: VerifyPolicy,
    },

    /// Generate a random formula with a planted solution.
    Generate {
        /// Number of variables.
        #[arg(long)]
        vars: u32,

        /// Number of clauses.
        #[arg(long)]
        clauses: usize,

        /// Maximum clause width.
        #[arg(long, default_value_t = 3)]
        width: usize,

        /// Seed for a reproducible formula.
        #[arg(long)]
        seed: Option<u64>,

        /// Write the formula here as DIMACS instead of printing it.
        #[arg(long)]
        cnf_out: Option<PathBuf>,

        /// Solve the generated formula as well.
        #[arg(long, default_value_t = false)]
        solve: bool,

        /// Generate, solve and verify this many formulas in one run. Each
        /// instance is written to `--out-dir` and a summary to `00report.txt`.
        #[arg(long, requires = "out_dir", conflicts_with_all = ["cnf_out", "solve"])]
        repeat: Option<usize>,

        /// Directory for the instances and report of a `--repeat` run.
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// In a `--repeat` run, only keep instances that took at least this
        /// many seconds to solve.
        #[arg(long, requires = "repeat")]
        min_time: Option<f64>,

        /// In a `--repeat` run, only keep instances solved in under this many
        /// seconds.
        #[arg(long, requires = "repeat")]
        max_time: Option<f64>,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Decide whether a graph can be coloured with k colours.
    Colour {
        /// Path to the edge list.
        #[arg(long)]
        graph: PathBuf,

        /// Number of colours.
        #[arg(short, long)]
        colours: u32,

        /// Also write the generated formula here as DIMACS.
        #[arg(long)]
        cnf_out: Option<PathBuf>,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CommonOptions {
    /// Disable unit propagation.
    #[arg(long, default_value_t = false)]
    pub(crate) no_unit_prop: bool,

    /// Disable pure literal elimination.
    #[arg(long, default_value_t = false)]
    pub(crate) no_pure_elim: bool,

    /// Verify the model against the formula before reporting it.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub(crate) verify: bool,

    /// Require the model to assign every variable it is checked against.
    #[arg(long, default_value_t = false)]
    pub(crate) strict_verify: bool,

    /// Print performance and problem statistics after solving.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub(crate) stats: bool,

    /// Print the satisfying assignment if the formula is satisfiable.
    #[arg(short, long, default_value_t = false)]
    pub(crate) print_solution: bool,

    /// Write the result to this file in the solution format.
    #[arg(short, long)]
    pub(crate) output: Option<PathBuf>,
}

impl Default for CommonOptions {
    fn default() -> Self {
        Self {
            no_unit_prop: false,
            no_pure_elim: false,
            verify: true,
            strict_verify: false,
            stats: true,
            print_solution: false,
            output: None,
        }
    }
}

impl CommonOptions {
    /// Converts the options into the solver configuration.
    pub(crate) const fn config(&self) -> DpllConfig {
        DpllConfig::bare()
            .with_unit_propagation(!self.no_unit_prop)
            .with_pure_literal_elimination(!self.no_pure_elim)
            .with_verify_policy(if self.strict_verify {
                VerifyPolicy::Strict
            } else {
                VerifyPolicy::Permissive
            })
    }
}

/// Everything that can stop a command.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("{path}: {source}")]
    Dimacs {
        path: String,
        #[source]
        source: DimacsError,
    },

    #[error("{path}: {source}")]
    Solution {
        path: String,
        #[source]
        source: SolutionError,
    },

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Generator(#[from] GeneratorError),

    #[error("cannot write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("not a directory: {0}")]
    NotADirectory(String),

    #[error("solution is not valid: {0}")]
    Verification(SolveError),

    #[error("solution is incomplete: {0}")]
    Incomplete(#[from] VerifyError),

    #[error("this is NOT a solution")]
    NotASolution,
}

impl From<SolveError> for CliError {
    fn from(e: SolveError) -> Self {
        match e {
            SolveError::Verify(missing) => Self::Incomplete(missing),
            other => Self::Verification(other),
        }
    }
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// 2 means an assignment falsifies the formula and 3 means it leaves a
    /// variable unassigned under the strict policy.
    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Verification(_) | Self::NotASolution => 2,
            Self::Incomplete(_) => 3,
            _ => 1,
        }
    }
}

fn parse_cnf_file(path: &Path) -> Result<Cnf, CliError> {
    parse_file(path).map_err(|source| CliError::Dimacs {
        path: path.display().to_string(),
        source,
    })
}

/// Solves a single file, or every `.cnf` file under a directory.
///
/// # Errors
///
/// Any parse error, or a verification failure, stops the run.
pub(crate) fn solve_path(path: &Path, common: &CommonOptions) -> Result<(), CliError> {
    if path.is_dir() {
        return solve_dir(path, common);
    }

    let time = Instant::now();
    let cnf = parse_cnf_file(path)?;
    let parse_time = time.elapsed();

    solve_and_report(&cnf, common, Some(path), parse_time)?;
    Ok(())
}

/// Solves a directory of CNF files.
/// This function iterates over all `.cnf` files in the directory, parses each file,
/// solves it, and reports the results.
///
/// # Errors
///
/// If the provided path is not a directory, or if any file cannot be parsed
/// or fails verification.
pub(crate) fn solve_dir(path: &Path, common: &CommonOptions) -> Result<(), CliError> {
    if !path.is_dir() {
        return Err(CliError::NotADirectory(path.display().to_string()));
    }

    let mut solved = 0usize;
    for entry in walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();
        if !file_path.is_file() {
            continue;
        }
        if file_path.extension().is_none_or(|ext| ext != "cnf") {
            warn!(path = %file_path.display(), "skipping non-CNF file");
            continue;
        }

        let time = Instant::now();
        let cnf = parse_cnf_file(file_path)?;
        let parse_time = time.elapsed();

        // Several files would overwrite each other's solution file.
        let per_file = CommonOptions {
            output: None,
            ..common.clone()
        };
        solve_and_report(&cnf, &per_file, Some(file_path), parse_time)?;
        solved += 1;
    }

    info!(files = solved, dir = %path.display(), "finished directory");
    Ok(())
}

/// Parses and solves a formula given on the command line.
///
/// # Errors
///
/// A malformed formula or a verification failure.
pub(crate) fn solve_text(input: &str, common: &CommonOptions) -> Result<(), CliError> {
    let time = Instant::now();
    let cnf = parse_str(input).map_err(|source| CliError::Dimacs {
        path: "<input>".to_string(),
        source,
    })?;
    let parse_time = time.elapsed();

    solve_and_report(&cnf, common, None, parse_time)?;
    Ok(())
}

/// Checks a solution file against a problem file.
///
/// A solution claiming unsatisfiability cannot be checked, so it is reported
/// and accepted.
///
/// # Errors
///
/// Unreadable input, a missing variable under [`VerifyPolicy::Strict`], or a
/// solution that falsifies a clause.
pub(crate) fn verify_files(
    problem: &Path,
    solution: &Path,
    policy: VerifyPolicy,
) -> Result<(), CliError> {
    let cnf = parse_cnf_file(problem)?;
    let claimed = read_solution_file(solution).map_err(|source| CliError::Solution {
        path: solution.display().to_string(),
        source,
    })?;

    let SolutionFile::Assignment(assignment) = claimed else {
        println!("Solution file claims unsatisfiability!");
        return Ok(());
    };

    match verify(&cnf, &assignment, policy) {
        Ok(true) => {
            println!("This is a solution.");
            Ok(())
        }
        Ok(false) => Err(CliError::NotASolution),
        Err(e) => Err(CliError::Incomplete(e)),
    }
}

/// Generates a random planted formula, then writes or prints it.
///
/// # Errors
///
/// Invalid generator parameters, a failed write, or a failed verification
/// when `solve` is set.
pub(crate) fn generate(
    params: RandomCnf,
    cnf_out: Option<&Path>,
    solve: bool,
    common: &CommonOptions,
) -> Result<(), CliError> {
    let time = Instant::now();
    let cnf = params.generate()?;
    let gen_time = time.elapsed();
    info!(
        vars = params.num_vars,
        clauses = params.num_clauses,
        width = params.max_clause_len,
        seed = ?params.seed,
        "generated random formula"
    );

    let comments = [format!(
        "random planted formula: {} vars, {} clauses, width <= {}",
        params.num_vars, params.num_clauses, params.max_clause_len
    )];
    match cnf_out {
        Some(path) => {
            write_file(&cnf, &comments, path).map_err(|source| CliError::Write {
                path: path.display().to_string(),
                source,
            })?;
            println!("Formula written to {}", path.display());
        }
        None if !solve => print!("{cnf}"),
        None => {}
    }

    if solve {
        solve_and_report(&cnf, common, None, gen_time)?;
    }
    Ok(())
}

/// Solve time bounds for keeping an instance of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct TimeWindow {
    pub(crate) min: Option<Duration>,
    pub(crate) max: Option<Duration>,
}

impl TimeWindow {
    /// Builds a window from bounds in seconds. Negative or non-finite bounds
    /// are ignored.
    pub(crate) fn from_secs(min: Option<f64>, max: Option<f64>) -> Self {
        let bound = |secs: Option<f64>| secs.and_then(|s| Duration::try_from_secs_f64(s).ok());
        Self {
            min: bound(min),
            max: bound(max),
        }
    }

    fn contains(&self, elapsed: Duration) -> bool {
        self.min.is_none_or(|min| elapsed >= min) && self.max.is_none_or(|max| elapsed < max)
    }
}

/// Outcome of [`generate_batch`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct BatchReport {
    pub(crate) sat: usize,
    pub(crate) unsat: usize,
    /// Instances written to disk, by file stem, with their solve times.
    pub(crate) kept: Vec<(String, Duration)>,
}

/// Generates `repeat` random formulas, solving and verifying each one.
///
/// With a seed, instance `i` uses `seed + i`, so a batch is reproducible.
/// Satisfiable instances whose solve time falls inside `window` are written
/// to `dir` as `instance_NNN.cnf` with a matching `instance_NNN.sol`. The
/// kept instances and the SAT/UNSAT totals go to `dir/00report.txt`.
///
/// # Errors
///
/// Invalid generator parameters, a directory or file that cannot be
/// written, or a model that fails verification.
pub(crate) fn generate_batch(
    params: RandomCnf,
    repeat: usize,
    dir: &Path,
    window: TimeWindow,
    common: &CommonOptions,
) -> Result<BatchReport, CliError> {
    params.validate()?;
    std::fs::create_dir_all(dir).map_err(|source| CliError::Write {
        path: dir.display().to_string(),
        source,
    })?;

    let mut report = BatchReport::default();
    for i in 0..repeat {
        let instance = match params.seed {
            Some(seed) => params.with_seed(seed.wrapping_add(i as u64)),
            None => params,
        };
        let cnf = instance.generate()?;

        let time = Instant::now();
        let mut solver = Dpll::with_config(cnf.clone(), common.config());
        let sol = solver.solve();
        let elapsed = time.elapsed();

        print!(
            "Case {}/{repeat}: DPLL ran for {:.6} seconds: ",
            i + 1,
            elapsed.as_secs_f64()
        );
        if !sol.is_sat() {
            println!("UNSAT");
            report.unsat += 1;
            continue;
        }
        println!("SAT");
        report.sat += 1;
        solver.verifier().check(&cnf, &sol)?;

        if !window.contains(elapsed) {
            continue;
        }
        let stem = format!("instance_{i:03}");
        let comments = [
            format!("instance {} of {repeat}", i + 1),
            format!(
                "params: {} vars, {} clauses, width <= {}, seed {:?}",
                instance.num_vars, instance.num_clauses, instance.max_clause_len, instance.seed
            ),
        ];
        let cnf_path = dir.join(format!("{stem}.cnf"));
        write_file(&cnf, &comments, &cnf_path).map_err(|source| CliError::Write {
            path: cnf_path.display().to_string(),
            source,
        })?;
        let sol_path = dir.join(format!("{stem}.sol"));
        write_solution_file(&sol, &sol_path).map_err(|source| CliError::Write {
            path: sol_path.display().to_string(),
            source,
        })?;
        info!(instance = %stem, elapsed = ?elapsed, "kept instance");
        report.kept.push((stem, elapsed));
    }

    let report_path = dir.join("00report.txt");
    std::fs::write(&report_path, format_report(&params, &report)).map_err(|source| {
        CliError::Write {
            path: report_path.display().to_string(),
            source,
        }
    })?;

    println!("Satisfiable: {}", report.sat);
    println!("Not satisfiable: {}", report.unsat);
    Ok(report)
}

fn format_report(params: &RandomCnf, report: &BatchReport) -> String {
    let mut out = format!(
        "vars {} clauses {} width {} seed {:?}\n",
        params.num_vars, params.num_clauses, params.max_clause_len, params.seed
    );
    for (stem, elapsed) in &report.kept {
        let _ = writeln!(out, "{stem}  :  {:.6}", elapsed.as_secs_f64());
    }
    let _ = writeln!(out, "Satisfiable: {}", report.sat);
    let _ = writeln!(out, "Not satisfiable: {}", report.unsat);
    out
}

/// Solves the k-colouring problem for the graph at `graph_path`.
///
/// # Errors
///
/// An unreadable graph, zero colours, a failed write, or a failed
/// verification.
pub(crate) fn colour(
    graph_path: &Path,
    k: u32,
    cnf_out: Option<&Path>,
    common: &CommonOptions,
) -> Result<(), CliError> {
    let time = Instant::now();
    let graph = read_graph_file(graph_path)?;
    let cnf = graph.k_colouring_cnf(k)?;
    let parse_time = time.elapsed();

    if let Some(path) = cnf_out {
        let comments = [format!(
            "{k}-colouring of {} ({} vertices, {} edges)",
            graph_path.display(),
            graph.num_vertices(),
            graph.edges().len()
        )];
        write_file(&cnf, &comments, path).map_err(|source| CliError::Write {
            path: path.display().to_string(),
            source,
        })?;
        println!("DIMACS written to: {}", path.display());
    }

    let result = solve_and_report(&cnf, common, Some(graph_path), parse_time)?;

    match result.model() {
        Some(model) => {
            for (vertex, c) in (1u32..).zip(graph.decode(model, k)) {
                match c {
                    Some(c) => println!("vertex {vertex}: colour {c}"),
                    None => println!("vertex {vertex}: any colour"),
                }
            }
        }
        None => println!("No {k}-colouring exists"),
    }
    Ok(())
}

/// Runs the search, timing it and collecting its statistics.
pub(crate) fn solve(
    cnf: &Cnf,
    label: Option<&Path>,
    common: &CommonOptions,
) -> (SolveResult, Duration, SolutionStats) {
    if let Some(name) = label {
        println!("Solving: {}", name.display());
    }

    let config = common.config();
    println!("Unit propagation: {}", status(config.unit_propagation));
    println!(
        "Pure literal elimination: {}",
        status(config.pure_literal_elimination)
    );

    let time = Instant::now();
    let mut solver = Dpll::with_config(cnf.clone(), config);
    let sol = solver.solve();
    let elapsed = time.elapsed();

    info!(elapsed = ?elapsed, sat = sol.is_sat(), "solve finished");
    (sol, elapsed, solver.stats())
}

const fn status(enabled: bool) -> &'static str {
    if enabled { "ENABLED" } else { "DISABLED" }
}

/// Solves `cnf` and reports results including stats and verification.
///
/// # Errors
///
/// A model that fails verification, or a solution file that cannot be
/// written.
pub(crate) fn solve_and_report(
    cnf: &Cnf,
    common: &CommonOptions,
    label: Option<&Path>,
    parse_time: Duration,
) -> Result<SolveResult, CliError> {
    let (sol, elapsed, solver_stats) = solve(cnf, label, common);

    println!(
        "DPLL ran for {:.6} seconds: {}",
        elapsed.as_secs_f64(),
        if sol.is_sat() { "SAT" } else { "UNSAT" }
    );

    if common.verify {
        verify_solution(cnf, &sol, common)?;
    }

    if let Some(path) = &common.output {
        write_solution_file(&sol, path).map_err(|source| CliError::Write {
            path: path.display().to_string(),
            source,
        })?;
        println!("Solution written to {}", path.display());
    }

    if common.stats {
        let (allocated, resident) = memory_usage();
        print_stats(
            parse_time,
            elapsed,
            cnf,
            &solver_stats,
            allocated,
            resident,
            common.print_solution,
            &sol,
        );
    } else if common.print_solution {
        if let Some(model) = sol.model() {
            println!("Solution: {model}");
        }
    }

    Ok(sol)
}

/// Verifies `sol` against `cnf` and prints the outcome.
///
/// # Errors
///
/// [`CliError::Verification`] if the model does not satisfy the formula.
/// Free variables are filled in first, so a correct partial model passes
/// under either policy.
pub(crate) fn verify_solution(
    cnf: &Cnf,
    sol: &SolveResult,
    common: &CommonOptions,
) -> Result<(), CliError> {
    match sol {
        SolveResult::Sat(_) => {
            Verifier::new(common.config().verify_policy).check(cnf, sol)?;
            println!("Verified: true");
        }
        SolveResult::Unsat => println!("UNSAT"),
    }
    Ok(())
}

/// Allocated and resident memory in MiB, or zeros if jemalloc cannot report.
fn memory_usage() -> (f64, f64) {
    let read = || -> Result<(usize, usize), tikv_jemalloc_ctl::Error> {
        epoch::advance()?;
        Ok((stats::allocated::read()?, stats::resident::read()?))
    };
    match read() {
        Ok((allocated, resident)) => (
            allocated as f64 / (1024.0 * 1024.0),
            resident as f64 / (1024.0 * 1024.0),
        ),
        Err(e) => {
            warn!(error = %e, "memory statistics unavailable");
            (0.0, 0.0)
        }
    }
}

/// Helper function to print a single statistic line in a formatted table row.
pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
pub(crate) fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
#[allow(clippy::too_many_arguments)]
pub(crate) fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    cnf: &Cnf,
    s: &SolutionStats,
    allocated: f64,
    resident: f64,
    print_solution: bool,
    sol: &SolveResult,
) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Variables", cnf.num_vars);
    stat_line("Clauses", cnf.len());
    stat_line("Literals", cnf.literal_count());

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Decisions", s.decisions, elapsed_secs);
    stat_line_with_rate("Conflicts", s.conflicts, elapsed_secs);
    stat_line_with_rate("Propagations", s.propagations, elapsed_secs);
    stat_line("Pure literals", s.pure_literals);
    stat_line("Max depth", s.max_depth);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");

    if let Some(model) = sol.model() {
        if print_solution {
            println!("Solution: {model}");
        }
    }

    if sol.is_sat() {
        println!("\nSATISFIABLE");
    } else {
        println!("\nUNSATISFIABLE");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_common_options_map_to_config() {
        let common = CommonOptions {
            no_unit_prop: true,
            strict_verify: true,
            ..CommonOptions::default()
        };
        let config = common.config();
        assert!(!config.unit_propagation);
        assert!(config.pure_literal_elimination);
        assert_eq!(config.verify_policy, VerifyPolicy::Strict);
        assert_eq!(CommonOptions::default().config(), DpllConfig::default());
    }

    #[test]
    fn test_parse_file_subcommand() {
        let cli = Cli::try_parse_from([
            "dpll-solver",
            "file",
            "--path",
            "a.cnf",
            "--no-pure-elim",
            "-o",
            "a.sol",
        ])
        .unwrap();
        let Some(Commands::File { path, common }) = cli.command else {
            panic!("expected the file subcommand");
        };
        assert_eq!(path, PathBuf::from("a.cnf"));
        assert!(common.no_pure_elim);
        assert!(common.verify);
        assert_eq!(common.output, Some(PathBuf::from("a.sol")));
    }

    #[test]
    fn test_verbosity_counts() {
        let cli = Cli::try_parse_from(["dpll-solver", "-vv", "x.cnf"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.path, Some(PathBuf::from("x.cnf")));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_solve_text_reports_sat() {
        let common = CommonOptions {
            stats: false,
            ..CommonOptions::default()
        };
        assert!(solve_text("1 2 0\n-1 2 0\n", &common).is_ok());
    }

    #[test]
    fn test_verify_files() {
        let dir = std::env::temp_dir().join(format!("dpll-cli-verify-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let problem = dir.join("p.cnf");
        let good = dir.join("good.sol");
        let bad = dir.join("bad.sol");
        std::fs::write(&problem, "p cnf 2 2\n1 2 0\n-1 2 0\n").unwrap();
        std::fs::write(&good, "-1 2").unwrap();
        std::fs::write(&bad, "1 -2").unwrap();

        assert!(verify_files(&problem, &good, VerifyPolicy::Permissive).is_ok());
        let err = verify_files(&problem, &bad, VerifyPolicy::Permissive).unwrap_err();
        assert_eq!(err.exit_code(), 2);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_strict_solve_text_accepts_free_variable() {
        let common = CommonOptions {
            strict_verify: true,
            stats: false,
            ..CommonOptions::default()
        };
        assert!(solve_text("1 2 0\n-1 2 0\n", &common).is_ok());
    }

    #[test]
    fn test_incomplete_solution_has_own_exit_code() {
        let dir = std::env::temp_dir().join(format!("dpll-cli-strict-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let problem = dir.join("p.cnf");
        let partial = dir.join("partial.sol");
        std::fs::write(&problem, "p cnf 2 2\n1 2 0\n-1 2 0\n").unwrap();
        std::fs::write(&partial, "2").unwrap();

        assert!(verify_files(&problem, &partial, VerifyPolicy::Permissive).is_ok());
        let err = verify_files(&problem, &partial, VerifyPolicy::Strict).unwrap_err();
        assert!(matches!(err, CliError::Incomplete(VerifyError::Unassigned(1))), "{err}");
        assert_eq!(err.exit_code(), 3);

        assert_eq!(CliError::from(SolveError::VerificationFailed).exit_code(), 2);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_generate_batch_writes_instances_and_report() {
        let dir = std::env::temp_dir().join(format!("dpll-cli-batch-{}", std::process::id()));
        let common = CommonOptions {
            stats: false,
            strict_verify: true,
            ..CommonOptions::default()
        };
        let params = RandomCnf::new(12, 40, 3).with_seed(11);

        let report = generate_batch(params, 3, &dir, TimeWindow::default(), &common).unwrap();
        assert_eq!(report.sat, 3);
        assert_eq!(report.unsat, 0);
        assert_eq!(report.kept.len(), 3);

        for (stem, _) in &report.kept {
            let cnf = parse_file(&dir.join(format!("{stem}.cnf"))).unwrap();
            assert_eq!(cnf.len(), 40);
            let SolutionFile::Assignment(model) =
                read_solution_file(&dir.join(format!("{stem}.sol"))).unwrap()
            else {
                panic!("{stem}.sol should hold an assignment");
            };
            assert_eq!(verify(&cnf, &model, VerifyPolicy::Permissive), Ok(true));
        }

        let summary = std::fs::read_to_string(dir.join("00report.txt")).unwrap();
        assert!(summary.contains("instance_002"));
        assert!(summary.contains("Satisfiable: 3"));
        assert!(summary.contains("Not satisfiable: 0"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_generate_batch_time_window_filters() {
        let dir = std::env::temp_dir().join(format!("dpll-cli-window-{}", std::process::id()));
        let common = CommonOptions {
            stats: false,
            ..CommonOptions::default()
        };
        let window = TimeWindow::from_secs(Some(3600.0), None);
        let report =
            generate_batch(RandomCnf::new(8, 20, 3).with_seed(5), 2, &dir, window, &common)
                .unwrap();

        assert_eq!(report.sat, 2);
        assert!(report.kept.is_empty());
        assert!(!dir.join("instance_000.cnf").exists());
        assert!(dir.join("00report.txt").exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_parse_generate_batch() {
        let cli = Cli::try_parse_from([
            "dpll-solver",
            "generate",
            "--vars",
            "5",
            "--clauses",
            "10",
            "--repeat",
            "4",
            "--out-dir",
            "batch",
            "--max-time",
            "90",
        ])
        .unwrap();
        let Some(Commands::Generate {
            repeat,
            out_dir,
            max_time,
            ..
        }) = cli.command
        else {
            panic!("expected the generate subcommand");
        };
        assert_eq!(repeat, Some(4));
        assert_eq!(out_dir, Some(PathBuf::from("batch")));
        assert_eq!(max_time, Some(90.0));

        let missing_dir = Cli::try_parse_from([
            "dpll-solver",
            "generate",
            "--vars",
            "5",
            "--clauses",
            "10",
            "--repeat",
            "4",
        ]);
        assert!(missing_dir.is_err());
    }

    #[test]
    fn test_missing_file_is_exit_code_one() {
        let err = solve_path(Path::new("/nonexistent/formula.cnf"), &CommonOptions::default())
            .unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }
}
