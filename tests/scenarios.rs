//! End-to-end runs through the public API: parse, solve, write and check.

use dpll_solver::generator::colouring::{Graph, parse_graph};
use dpll_solver::generator::random::RandomCnf;
use dpll_solver::sat::cnf::Cnf;
use dpll_solver::sat::configs::DpllConfig;
use dpll_solver::sat::dimacs::{parse_file, parse_str, write_file};
use dpll_solver::sat::dpll::{Dpll, dpll};
use dpll_solver::sat::solution::{
    SolutionFile, format_solution, parse_solution, read_solution_file, write_solution_file,
};
use dpll_solver::sat::solver::{SolveResult, Solver};
use dpll_solver::sat::verify::{VerifyPolicy, verify};
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("dpll-solver-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_known_verdicts() {
    let cases: Vec<(Vec<Vec<i32>>, bool)> = vec![
        (vec![vec![1], vec![-1]], false),
        (vec![], true),
        (vec![vec![1, 2], vec![-1, 2]], true),
        (vec![vec![1, 2], vec![-1, 2], vec![1, -2], vec![-1, -2]], false),
        (vec![vec![]], false),
    ];

    for (clauses, expected) in cases {
        let cnf = Cnf::new(clauses.clone());
        for config in DpllConfig::all_heuristic_combinations() {
            assert_eq!(
                dpll(&cnf, config).is_sat(),
                expected,
                "{clauses:?} with {config:?}"
            );
        }
    }
}

#[test]
fn test_empty_formula_has_empty_model() {
    assert_eq!(
        dpll(&Cnf::default(), DpllConfig::default()).into_model(),
        Some(Default::default())
    );
}

#[test]
fn test_implied_variable_is_true() {
    let cnf = Cnf::new(vec![vec![1, 2], vec![-1, 2]]);
    for config in DpllConfig::all_heuristic_combinations() {
        let model = dpll(&cnf, config).into_model().unwrap();
        assert_eq!(model.value(2), Some(true), "{config:?}");
    }
}

#[test]
fn test_dimacs_file_solution_file_roundtrip() {
    let dir = scratch_dir("roundtrip");
    let problem = dir.join("problem.cnf");
    let solution = dir.join("problem.sol");

    std::fs::write(
        &problem,
        "c pigeons are not involved\np cnf 4 5\n1 2 0\n-1 3 0\n-3 -2 0\n4 -4 0\n-2 0\n%\n0\n",
    )
    .unwrap();

    let cnf = parse_file(&problem).unwrap();
    assert_eq!(cnf.len(), 5);

    let mut solver = Dpll::new(cnf.clone());
    let result = solver.solve_checked().unwrap();
    assert!(result.is_sat());
    assert!(solver.stats().propagations > 0);

    write_solution_file(&result, &solution).unwrap();
    let SolutionFile::Assignment(model) = read_solution_file(&solution).unwrap() else {
        panic!("expected an assignment in {}", solution.display());
    };
    assert_eq!(verify(&cnf, &model, VerifyPolicy::Permissive), Ok(true));
    assert_eq!(Some(&model), result.model());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_unsat_writes_single_zero() {
    let cnf = parse_str("1 0\n-1 0\n").unwrap();
    let result = dpll(&cnf, DpllConfig::default());
    assert_eq!(result, SolveResult::Unsat);
    assert_eq!(format_solution(&result), "0");
    assert_eq!(
        parse_solution(&format_solution(&result)).unwrap(),
        SolutionFile::Unsatisfiable
    );
}

#[test]
fn test_generated_formula_survives_dimacs() {
    let dir = scratch_dir("generated");
    let path = dir.join("random.cnf");

    let (cnf, planted) = RandomCnf::new(30, 120, 3)
        .with_seed(2024)
        .generate_with_solution()
        .unwrap();
    write_file(&cnf, &["planted".to_string()], &path).unwrap();
    let reread = parse_file(&path).unwrap();

    assert_eq!(reread.clauses, cnf.clauses);
    assert_eq!(verify(&reread, &planted, VerifyPolicy::Strict), Ok(true));
    assert!(dpll(&reread, DpllConfig::default()).is_sat());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_colouring_instances() {
    // Five-cycle: odd, so two colours fail and three succeed.
    let cycle = parse_graph("c C5\n1 2\n2 3\n3 4\n4 5\n5 1\n").unwrap();
    let two = cycle.k_colouring_cnf(2).unwrap();
    assert!(!dpll(&two, DpllConfig::default()).is_sat());

    let three = cycle.k_colouring_cnf(3).unwrap();
    let model = dpll(&three, DpllConfig::default()).into_model().unwrap();
    assert!(cycle.is_proper(&cycle.decode(&model, 3)));

    let k4 = Graph::complete(4);
    assert!(!dpll(&k4.k_colouring_cnf(3).unwrap(), DpllConfig::bare()).is_sat());
    assert!(dpll(&k4.k_colouring_cnf(4).unwrap(), DpllConfig::bare()).is_sat());
}
