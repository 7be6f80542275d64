use std::{error::Error as StdError, io};

use clap::Parser as _;
use ordered_float::OrderedFloat;
use pairwise_glicko2::{select_pair, PoolEntry, Rating, RatingSystem, Score, DEFAULT_TAU};
use pairwise_glicko2_research::logging;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;
use tracing::{info, warn};

/// Simulates a ranking session: items with hidden strengths are compared in
/// pairs chosen by the sampler, and judged by a noisy logistic oracle.
/// Writes the convergence of the ranking as CSV to stdout.
#[derive(Debug, clap::Parser)]
struct Opt {
    /// Number of items in the pool.
    #[arg(long, default_value_t = 50)]
    items: usize,
    /// Number of votes to simulate.
    #[arg(long, default_value_t = 2000)]
    votes: usize,
    /// Seed for hidden strengths, pair selection and judgments.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Write a report line every N votes.
    #[arg(long, default_value_t = 100)]
    report_every: usize,
    /// System constant constraining the change in volatility.
    #[arg(long, default_value_t = DEFAULT_TAU)]
    tau: f64,
}

#[derive(Serialize)]
struct Report {
    votes: usize,
    mean_deviation: f64,
    spearman: f64,
}

struct Session {
    rating_system: RatingSystem,
    strengths: Vec<f64>,
    ratings: Vec<Rating>,
    errors: u64,
}

impl Session {
    fn new<R: Rng>(rating_system: RatingSystem, items: usize, rng: &mut R) -> Session {
        Session {
            strengths: (0..items).map(|_| rng.random_range(1000.0..2000.0)).collect(),
            ratings: vec![rating_system.new_rating(); items],
            rating_system,
            errors: 0,
        }
    }

    fn pool(&self) -> Vec<PoolEntry<usize>> {
        self.ratings
            .iter()
            .enumerate()
            .map(|(id, rating)| PoolEntry::from_rating(id, rating))
            .collect()
    }

    /// Outcome for `first` under the Elo model of the hidden strengths.
    fn judge<R: Rng>(&self, first: usize, second: usize, rng: &mut R) -> Score {
        let p = 1.0 / (1.0 + 10f64.powf((self.strengths[second] - self.strengths[first]) / 400.0));
        if rng.random_bool(p) {
            Score::WIN
        } else {
            Score::LOSS
        }
    }

    fn vote<R: Rng>(&mut self, rng: &mut R) -> bool {
        let Some((first, second)) = select_pair(&self.pool(), rng) else {
            return false;
        };
        let score = self.judge(first, second, rng);
        match self
            .rating_system
            .update_ratings(&self.ratings[first], &self.ratings[second], score)
        {
            Ok((first_rating, second_rating)) => {
                self.ratings[first] = first_rating;
                self.ratings[second] = second_rating;
            }
            Err(err) => {
                self.errors += 1;
                warn!(%err, first, second, "vote not applied");
            }
        }
        true
    }

    /// Simulates up to `votes` votes, writing a report every `report_every`
    /// votes and after the last one. Returns the number of votes simulated,
    /// which falls short when the pool cannot form a pair.
    fn run<R: Rng, W: io::Write>(
        &mut self,
        votes: usize,
        report_every: usize,
        writer: &mut csv::Writer<W>,
        rng: &mut R,
    ) -> csv::Result<usize> {
        let mut simulated = 0;
        while simulated < votes {
            if !self.vote(rng) {
                warn!(
                    items = self.ratings.len(),
                    "need at least 2 items to simulate a session"
                );
                break;
            }
            simulated += 1;
            if simulated % report_every.max(1) == 0 || simulated == votes {
                writer.serialize(self.report(simulated))?;
            }
        }
        Ok(simulated)
    }

    fn report(&self, votes: usize) -> Report {
        let ratings: Vec<f64> = self.ratings.iter().map(|r| r.rating.into()).collect();
        let total_deviation: f64 = self.ratings.iter().map(|r| f64::from(r.deviation)).sum();
        Report {
            votes,
            mean_deviation: total_deviation / self.ratings.len() as f64,
            spearman: spearman(&self.strengths, &ratings),
        }
    }
}

fn ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by_key(|&i| OrderedFloat(values[i]));
    let mut ranks = vec![0.0; values.len()];
    for (rank, i) in order.into_iter().enumerate() {
        ranks[i] = rank as f64;
    }
    ranks
}

/// Spearman rank correlation, ignoring ties.
fn spearman(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len() as f64;
    let squared_differences: f64 = ranks(a)
        .iter()
        .zip(ranks(b))
        .map(|(x, y)| (x - y).powi(2))
        .sum();
    1.0 - 6.0 * squared_differences / (n * (n * n - 1.0))
}

fn main() -> Result<(), Box<dyn StdError>> {
    logging::init();
    let opt = Opt::parse();

    let mut rng = StdRng::seed_from_u64(opt.seed);
    let rating_system = RatingSystem::builder().tau(opt.tau).build();
    let mut session = Session::new(rating_system, opt.items, &mut rng);

    let mut writer = csv::Writer::from_writer(io::stdout().lock());
    let simulated = session.run(opt.votes, opt.report_every, &mut writer, &mut rng)?;
    writer.flush()?;

    let final_report = session.report(simulated);
    info!(
        items = opt.items,
        votes = simulated,
        errors = session.errors,
        spearman = final_report.spearman,
        mean_deviation = final_report.mean_deviation,
        "session finished"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spearman() {
        assert_eq!(spearman(&[1.0, 2.0, 3.0], &[10.0, 20.0, 30.0]), 1.0);
        assert_eq!(spearman(&[1.0, 2.0, 3.0], &[30.0, 20.0, 10.0]), -1.0);
    }

    #[test]
    fn test_session_learns_the_order() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut session = Session::new(RatingSystem::new(), 10, &mut rng);
        for _ in 0..1500 {
            assert!(session.vote(&mut rng));
        }
        let report = session.report(1500);
        assert_eq!(session.errors, 0);
        assert!(report.mean_deviation < 150.0);
        assert!(report.spearman > 0.5, "spearman {}", report.spearman);
    }

    #[test]
    fn test_run_counts_simulated_votes() {
        let mut rng = StdRng::seed_from_u64(5);

        let mut output = Vec::new();
        let mut writer = csv::Writer::from_writer(&mut output);
        let mut session = Session::new(RatingSystem::new(), 1, &mut rng);
        assert_eq!(session.run(10, 5, &mut writer, &mut rng).unwrap(), 0);
        writer.flush().unwrap();
        drop(writer);
        assert!(output.is_empty());

        let mut output = Vec::new();
        let mut writer = csv::Writer::from_writer(&mut output);
        let mut session = Session::new(RatingSystem::new(), 4, &mut rng);
        assert_eq!(session.run(10, 4, &mut writer, &mut rng).unwrap(), 10);
        writer.flush().unwrap();
        drop(writer);
        let output = String::from_utf8(output).unwrap();
        let votes: Vec<&str> = output
            .lines()
            .skip(1)
            .map(|line| line.split(',').next().unwrap())
            .collect();
        assert_eq!(votes, ["4", "8", "10"]);
    }
}
