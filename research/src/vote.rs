use std::str::FromStr;

use pairwise_glicko2::Score;
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr};
use thiserror::Error;

/// One line of a vote log: which of two items was preferred.
#[serde_as]
#[derive(Deserialize, Debug)]
pub struct RawVote {
    pub first: String,
    pub second: String,
    #[serde_as(as = "DisplayFromStr")]
    pub result: VoteResult,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum VoteResult {
    First,
    Second,
    Draw,
    Skipped,
}

#[derive(Debug, Error)]
#[error("invalid vote result (expected first, second, draw or skip)")]
pub struct InvalidVoteResult;

impl FromStr for VoteResult {
    type Err = InvalidVoteResult;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "first" | "1-0" => VoteResult::First,
            "second" | "0-1" => VoteResult::Second,
            "draw" | "1/2-1/2" => VoteResult::Draw,
            "skip" | "*" => VoteResult::Skipped,
            _ => return Err(InvalidVoteResult),
        })
    }
}

impl VoteResult {
    pub fn first_score(self) -> Option<Score> {
        Some(match self {
            VoteResult::First => Score::WIN,
            VoteResult::Second => Score::LOSS,
            VoteResult::Draw => Score::DRAW,
            VoteResult::Skipped => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vote_result() {
        assert_eq!("first".parse::<VoteResult>().unwrap(), VoteResult::First);
        assert_eq!("0-1".parse::<VoteResult>().unwrap(), VoteResult::Second);
        assert_eq!("draw".parse::<VoteResult>().unwrap(), VoteResult::Draw);
        assert!("maybe".parse::<VoteResult>().is_err());
    }

    #[test]
    fn test_first_score() {
        assert_eq!(VoteResult::First.first_score(), Some(Score::WIN));
        assert_eq!(VoteResult::Second.first_score(), Some(Score::LOSS));
        assert_eq!(VoteResult::Draw.first_score(), Some(Score::DRAW));
        assert_eq!(VoteResult::Skipped.first_score(), None);
    }

    #[test]
    fn test_deserialize_csv() {
        let data = "first,second,result\nplains,island,second\nswamp,forest,skip\n";
        let votes: Vec<RawVote> = csv::Reader::from_reader(data.as_bytes())
            .deserialize()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(votes.len(), 2);
        assert_eq!(votes[0].second, "island");
        assert_eq!(votes[0].result, VoteResult::Second);
        assert_eq!(votes[1].result, VoteResult::Skipped);
    }
}
