use criterion::{Criterion, criterion_group, criterion_main};
use dpll_solver::generator::colouring::Graph;
use dpll_solver::generator::random::RandomCnf;
use dpll_solver::sat::cnf::Cnf;
use dpll_solver::sat::configs::DpllConfig;
use dpll_solver::sat::dpll::Dpll;
use dpll_solver::sat::solver::Solver;
use std::hint::black_box;
use std::time::Duration;

fn config_name(config: DpllConfig) -> &'static str {
    match (config.unit_propagation, config.pure_literal_elimination) {
        (true, true) => "Unit + Pure",
        (true, false) => "Unit only",
        (false, true) => "Pure only",
        (false, false) => "Plain backtracking",
    }
}

fn bench_configs(c: &mut Criterion, group_name: &str, cnfs: &[Cnf]) {
    let mut group = c.benchmark_group(group_name);
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(10));

    for config in DpllConfig::all_heuristic_combinations() {
        group.bench_function(config_name(config), |b| {
            b.iter(|| {
                for cnf in cnfs {
                    let mut state = Dpll::with_config(cnf.clone(), config);
                    black_box(state.solve());
                }
            });
        });
    }

    group.finish();
}

fn bench_random(c: &mut Criterion) {
    let cnfs: Vec<Cnf> = (0..10)
        .filter_map(|seed| {
            RandomCnf::new(20, 80, 3)
                .with_seed(seed)
                .generate()
                .map_err(|e| eprintln!("Failed to generate formula {seed}: {e}"))
                .ok()
        })
        .collect();

    bench_configs(c, "random_planted - Heuristics", &cnfs);
}

fn bench_graph_colouring(c: &mut Criterion) {
    // Odd cycles need three colours; the complete graph on four needs four.
    let graphs = [
        (Graph::new(5, vec![(1, 2), (2, 3), (3, 4), (4, 5), (5, 1)]), 2),
        (Graph::new(5, vec![(1, 2), (2, 3), (3, 4), (4, 5), (5, 1)]), 3),
        (Ok(Graph::complete(4)), 3),
    ];

    let cnfs: Vec<Cnf> = graphs
        .into_iter()
        .filter_map(|(graph, k)| match graph.and_then(|g| g.k_colouring_cnf(k)) {
            Ok(cnf) => Some(cnf),
            Err(e) => {
                eprintln!("Failed to build colouring instance: {e}");
                None
            }
        })
        .collect();

    bench_configs(c, "graph_colouring - Heuristics", &cnfs);
}

criterion_group!(benches, bench_random, bench_graph_colouring);

criterion_main!(benches);
