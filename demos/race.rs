use mazerun_core::{GridView, Point};
use mazerun_demos::{braid, collect, hunt_and_kill, race};
use mazerun_paths::{SearchConfig, Strategy, diameter};
use mazerun_rank::{Criterion, RankingService};
use rand::SeedableRng;
use rand::rngs::StdRng;

const WIDTH: i32 = 40;
const HEIGHT: i32 = 20;
const ROUNDS: u64 = 5;

fn main() {
    let seed = match std::env::args().nth(1).map(|s| s.parse::<u64>()) {
        None => 42,
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            eprintln!("Error: seed must be an unsigned integer: {e}");
            std::process::exit(2);
        }
    };

    let mut ranking = RankingService::default();
    for round in 0..ROUNDS {
        let round_seed = seed.wrapping_add(round);
        let mut rng = StdRng::seed_from_u64(round_seed);
        let mut maze = hunt_and_kill(WIDTH, HEIGHT, &mut rng);
        braid(&mut maze.grid, (WIDTH * HEIGHT / 10) as usize, &mut rng);

        let start = Point::ZERO;
        let goal = Point::new(maze.grid.width() - 1, maze.grid.height() - 1);
        println!("round {round} (seed {round_seed})");
        if let Some(d) = diameter(&maze.grid) {
            println!("  diameter {} from {} to {}", d.length, d.from, d.to);
        }

        for r in race(&maze.grid, start, goal, round_seed, &mut ranking) {
            println!(
                "  {:<7} solved={:<5} steps={:<5} expanded={:<5} path={:<4} {:.3} ms",
                r.strategy.name(),
                r.solved,
                r.steps,
                r.expanded,
                r.path_len,
                r.time_ms
            );
        }

        for strategy in [Strategy::AStar, Strategy::UniformCost] {
            let config = SearchConfig {
                seed: round_seed,
                ..SearchConfig::with_strategy(strategy)
            };
            let c = collect(&maze.grid, start, &maze.collectibles, goal, config, &mut ranking);
            println!(
                "  collector {:<4} legs={} bonuses={} collected={} expanded={} path={}",
                strategy.name(),
                c.legs,
                c.bonuses,
                c.collected,
                c.expanded,
                c.path_len
            );
        }
    }

    for criterion in Criterion::ALL {
        ranking.set_criterion(criterion);
        println!("\nleaderboard by {}", criterion.name());
        for (rank, r) in ranking.ranked() {
            println!(
                "  {rank}. {:<14} runs={} avg_ms={:.3} avg_nodes={:.1} score={:.1}",
                r.name,
                r.runs,
                r.avg_time_ms(),
                r.avg_nodes(),
                r.composite_score()
            );
        }
    }

    ranking.set_criterion(Criterion::Efficiency);
    println!();
    if let Err(e) = ranking.write_csv(std::io::stdout().lock()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
