//! The `simulate` subcommand.

use anyhow::Context;
use darts_core::{simulate_rounds, GameReport, Thrower};
use random_thrower::RandomThrower;
use steady_thrower::SteadyThrower;

fn lineup(seed: u64) -> Vec<Box<dyn Thrower>> {
    vec![
        Box::new(SteadyThrower::twenties("steady")),
        Box::new(RandomThrower::pub_player("pub-regular", seed)),
        Box::new(RandomThrower::pub_player("pub-newcomer", seed.wrapping_add(1))),
    ]
}

pub fn run(rounds: usize, seed: u64, json: bool) -> anyhow::Result<()> {
    log::info!("simulating {} rounds with seed {}", rounds, seed);
    let mut throwers = lineup(seed);
    let report = simulate_rounds(&mut throwers, rounds);

    if json {
        let text = serde_json::to_string_pretty(&report).context("encoding report")?;
        println!("{}", text);
    } else {
        print!("{}", describe(&report));
    }
    Ok(())
}

fn describe(report: &GameReport) -> String {
    let mut s = String::new();
    for round in &report.rounds {
        let scores = round
            .scores
            .iter()
            .map(|(name, points)| format!("{}={}", name, points))
            .collect::<Vec<_>>()
            .join(", ");
        s.push_str(&format!("round {:>3}: {}\n", round.round, scores));
    }
    s.push_str(&format!("\n{} darts thrown\n", report.darts_thrown));
    for (place, (name, score)) in report.standings.iter().enumerate() {
        s.push_str(&format!("{}. {} ({})\n", place + 1, name, score));
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_gives_same_report() {
        let first = simulate_rounds(&mut lineup(11), 4);
        let second = simulate_rounds(&mut lineup(11), 4);
        assert_eq!(first, second);
        assert_eq!(first.rounds.len(), 4);
    }

    #[test]
    fn steady_thrower_scores_120_per_round() {
        let report = simulate_rounds(&mut lineup(3), 2);
        for round in &report.rounds {
            assert!(round.scores.contains(&("steady".to_string(), 120)));
        }
    }

    #[test]
    fn description_lists_standings() {
        let report = simulate_rounds(&mut lineup(5), 1);
        let text = describe(&report);
        assert!(text.contains("round   1:"));
        assert!(text.contains("1. "));
        assert!(text.contains("9 darts thrown"));
    }
}
