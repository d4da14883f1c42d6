//! Output type for a nearest-neighbor prediction.

/// Tally of neighbor labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Votes {
    /// Neighbors labelled 1.
    pub positive: usize,
    /// Neighbors with any other label.
    pub negative: usize,
}

impl Votes {
    /// Adds one neighbor's label to the tally.
    pub(crate) fn add(&mut self, label: u8) {
        if label == 1 {
            self.positive += 1;
        } else {
            self.negative += 1;
        }
    }

    /// Majority label. A tie resolves to 0.
    pub fn majority(&self) -> u8 {
        u8::from(self.positive > self.negative)
    }

    /// Total number of votes cast.
    pub fn total(&self) -> usize {
        self.positive + self.negative
    }
}

/// Result of a prediction.
///
/// Contains the predicted label together with the neighbors that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    label: u8,
    /// Reference row indices of the k nearest neighbors, by ascending distance.
    neighbors: Vec<usize>,
    /// Distances of those neighbors, aligned with `neighbors`.
    distances: Vec<f32>,
    votes: Votes,
}

impl Prediction {
    pub(crate) fn new(neighbors: Vec<usize>, distances: Vec<f32>, votes: Votes) -> Self {
        Self {
            label: votes.majority(),
            neighbors,
            distances,
            votes,
        }
    }

    /// Returns the predicted label (0 or 1).
    pub fn label(&self) -> u8 {
        self.label
    }

    /// Returns the neighbor row indices.
    pub fn neighbors(&self) -> &[usize] {
        &self.neighbors
    }

    /// Returns the neighbor distances.
    pub fn distances(&self) -> &[f32] {
        &self.distances
    }

    /// Returns the vote tally.
    pub fn votes(&self) -> Votes {
        self.votes
    }

    /// Returns the caller-facing answer for the predicted label.
    pub fn answer(&self) -> &'static str {
        answer_for(self.label)
    }
}

/// Maps a label to the answer reported to users.
///
/// Label 0 reads as "Yes" and anything else as "No", the convention the
/// serving layer has always used.
pub fn answer_for(label: u8) -> &'static str {
    if label == 0 { "Yes" } else { "No" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_majority() {
        let votes = Votes {
            positive: 2,
            negative: 1,
        };
        assert_eq!(votes.majority(), 1);
        let votes = Votes {
            positive: 1,
            negative: 2,
        };
        assert_eq!(votes.majority(), 0);
    }

    #[test]
    fn test_tie_is_zero() {
        let votes = Votes {
            positive: 2,
            negative: 2,
        };
        assert_eq!(votes.majority(), 0);
        assert_eq!(Votes::default().majority(), 0);
    }

    #[test]
    fn test_add_buckets_non_one_as_negative() {
        let mut votes = Votes::default();
        votes.add(1);
        votes.add(0);
        votes.add(2);
        assert_eq!(votes.positive, 1);
        assert_eq!(votes.negative, 2);
        assert_eq!(votes.total(), 3);
    }

    #[test]
    fn test_accessors() {
        let votes = Votes {
            positive: 1,
            negative: 0,
        };
        let p = Prediction::new(vec![2], vec![0.5], votes);
        assert_eq!(p.label(), 1);
        assert_eq!(p.neighbors(), &[2]);
        assert_eq!(p.distances(), &[0.5]);
        assert_eq!(p.votes(), votes);
        assert_eq!(p.answer(), "No");
    }

    #[test]
    fn test_answer_for() {
        assert_eq!(answer_for(0), "Yes");
        assert_eq!(answer_for(1), "No");
    }
}
