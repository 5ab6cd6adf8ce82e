//! # dpll-solver
//!
//! `dpll-solver` is a command-line front end for the DPLL SAT solver in the
//! `dpll_solver` library. It solves formulas in DIMACS CNF format, checks
//! solution files, and generates random and graph colouring instances.
//!
//! ## Usage
//!
//! ```sh
//! dpll-solver [OPTIONS] [PATH] [SUBCOMMAND]
//! ```
//!
//! A bare `PATH` with no subcommand is solved as a DIMACS file, or as a
//! directory of `.cnf` files.
//!
//! ### Subcommands
//!
//! 1.  **`file`**: Solve a DIMACS file or directory.
//!     ```sh
//!     dpll-solver file --path problem.cnf -o problem.sol
//!     ```
//! 2.  **`text`**: Solve a formula given inline.
//!     ```sh
//!     dpll-solver text --input "1 -2 0\n2 3 0"
//!     ```
//! 3.  **`verify`**: Check a solution file against a problem.
//!     ```sh
//!     dpll-solver verify --problem problem.cnf --solution problem.sol
//!     ```
//! 4.  **`generate`**: Build a random formula with a planted solution.
//!     ```sh
//!     dpll-solver generate --vars 50 --clauses 200 --width 3 --seed 1 --solve
//!     ```
//!     With `--repeat N --out-dir DIR` it generates, solves and verifies `N`
//!     formulas, writes each as `.cnf` plus `.sol`, and summarises the run in
//!     `DIR/00report.txt`. `--min-time` and `--max-time` keep only instances
//!     whose solve time falls in that window.
//!     ```sh
//!     dpll-solver generate --vars 100 --clauses 430 --repeat 20 --out-dir batch --min-time 1 --max-time 90
//!     ```
//! 5.  **`colour`**: Decide whether a graph has a k-colouring.
//!     ```sh
//!     dpll-solver colour --graph petersen.txt --colours 3
//!     ```
//! 6.  **`completions`**: Print a shell completion script.
//!
//! ### Common options
//!
//! -   `--no-unit-prop`, `--no-pure-elim`: disable either heuristic.
//! -   `--verify <BOOL>`: check the model before reporting it (default `true`).
//! -   `--strict-verify`: check against a total assignment, with free
//!     variables set to `false`.
//! -   `--stats <BOOL>`: print the statistics table (default `true`).
//! -   `-p, --print-solution`: print the satisfying assignment.
//! -   `-o, --output <FILE>`: write the result as a solution file.
//! -   `-v`: more logging, repeatable.
//!
//! The process exits with 0 on success, 1 on bad input, 2 when an
//! assignment falsifies the formula, and 3 when `verify --policy strict`
//! finds a variable the solution leaves unassigned.

mod command_line;

use crate::command_line::cli::{
    Cli, CliError, Commands, TimeWindow, colour, generate, generate_batch, solve_path, solve_text,
    verify_files,
};
use clap::{CommandFactory, Parser};
use dpll_solver::generator::random::RandomCnf;
use tracing_subscriber::EnvFilter;

/// Global allocator using `tikv-jemallocator` for memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Some(Commands::File { path, common }) => solve_path(&path, &common),
        Some(Commands::Text { input, common }) => solve_text(&input, &common),
        Some(Commands::Verify {
            problem,
            solution,
            policy,
        }) => verify_files(&problem, &solution, policy),
        Some(Commands::Generate {
            vars,
            clauses,
            width,
            seed,
            cnf_out,
            solve,
            repeat,
            out_dir,
            min_time,
            max_time,
            common,
        }) => {
            let mut params = RandomCnf::new(vars, clauses, width);
            if let Some(seed) = seed {
                params = params.with_seed(seed);
            }
            match (repeat, out_dir) {
                (Some(repeat), Some(dir)) => {
                    let window = TimeWindow::from_secs(min_time, max_time);
                    generate_batch(params, repeat, &dir, window, &common).map(|_| ())
                }
                _ => generate(params, cnf_out.as_deref(), solve, &common),
            }
        }
        Some(Commands::Colour {
            graph,
            colours,
            cnf_out,
            common,
        }) => colour(&graph, colours, cnf_out.as_deref(), &common),
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
        None => match cli.path {
            Some(path) => solve_path(&path, &cli.common),
            None => {
                eprintln!("No command provided. Use --help for more information.");
                std::process::exit(1);
            }
        },
    }
}
