use std::{error::Error as StdError, io};

use clap::Parser as _;
use pairwise_glicko2::{deviance, leaderboard, Rating, RatingSystem, DEFAULT_TAU};
use pairwise_glicko2_research::{
    item::{ByItemId, ItemIds},
    logging,
    vote::RawVote,
};
use serde::Serialize;
use tracing::{info, warn};

/// Replays a vote log (CSV with columns `first,second,result`) from stdin
/// and writes the resulting leaderboard as CSV to stdout.
#[derive(Debug, clap::Parser)]
struct Opt {
    /// System constant constraining the change in volatility.
    #[arg(long, default_value_t = DEFAULT_TAU)]
    tau: f64,
    /// Only write the best N items.
    #[arg(long)]
    top: Option<usize>,
}

#[derive(Serialize)]
struct Row<'a> {
    rank: usize,
    item: &'a str,
    rating: f64,
    deviation: f64,
    volatility: f64,
    lower: f64,
    upper: f64,
}

fn main() -> Result<(), Box<dyn StdError>> {
    logging::init();
    let opt = Opt::parse();

    let rating_system = RatingSystem::builder().tau(opt.tau).build();
    let mut items = ItemIds::default();
    let mut ratings: ByItemId<Rating> = ByItemId::default();

    let mut total_deviance = 0.0;
    let mut total_votes: u64 = 0;
    let mut skipped: u64 = 0;
    let mut errors: u64 = 0;

    let mut reader = csv::Reader::from_reader(io::stdin().lock());
    for vote in reader.deserialize() {
        let vote: RawVote = vote?;

        let Some(score) = vote.result.first_score() else {
            skipped += 1;
            continue;
        };

        let first = items.get_or_insert(vote.first);
        let second = items.get_or_insert(vote.second);
        if first == second {
            warn!(item = items.name(first), "ignoring vote of an item against itself");
            skipped += 1;
            continue;
        }

        let first_rating = ratings
            .get(first)
            .cloned()
            .unwrap_or_else(|| rating_system.new_rating());
        let second_rating = ratings
            .get(second)
            .cloned()
            .unwrap_or_else(|| rating_system.new_rating());

        total_deviance += deviance(
            rating_system.expected_score(&first_rating, &second_rating),
            score,
        );
        total_votes += 1;

        match rating_system.update_ratings(&first_rating, &second_rating, score) {
            Ok((first_rating, second_rating)) => {
                ratings.set(first, first_rating);
                ratings.set(second, second_rating);
            }
            Err(err) => {
                errors += 1;
                warn!(
                    %err,
                    first = items.name(first),
                    second = items.name(second),
                    "vote not applied"
                );
            }
        }
    }

    info!(
        items = items.len(),
        votes = total_votes,
        skipped,
        errors,
        avg_deviance = total_deviance / total_votes.max(1) as f64,
        "replay finished"
    );

    let standings = leaderboard(ratings.iter().map(|(id, rating)| (id, rating.clone())));

    let mut writer = csv::Writer::from_writer(io::stdout().lock());
    for standing in standings.iter().take(opt.top.unwrap_or(usize::MAX)) {
        let (lower, upper) = standing.interval;
        writer.serialize(Row {
            rank: standing.rank,
            item: items.name(standing.id),
            rating: standing.rating.rating.into(),
            deviation: standing.rating.deviation.into(),
            volatility: standing.rating.volatility.into(),
            lower: lower.into(),
            upper: upper.into(),
        })?;
    }
    writer.flush()?;

    Ok(())
}
