//! Audio feature statistics of a top tracks result.
//!
//! The averages are taken over the *requested* limit, not over the number of
//! tracks Spotify returned. An account that asks for 20 tracks but only has 2
//! gets sums divided by 20.

use crate::types::{FeatureSet, TopItems};

/// Feature sums over one top items result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioSummary {
    pub sums: FeatureSet,
    /// Requested limit of the result the sums belong to.
    pub limit: i64,
}

/// Rounded statistics as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioReport {
    /// Percentages, 0 to 100 for a full result.
    pub acousticness: i64,
    pub danceability: i64,
    pub energy: i64,
    pub valence: i64,
    /// Beats per minute, unscaled.
    pub tempo: i64,
}

/// Sums each feature across `features`, which belong to `result`.
pub fn aggregate(result: &TopItems, features: &[FeatureSet]) -> AudioSummary {
    let sums = features.iter().fold(FeatureSet::default(), |acc, f| FeatureSet {
        acousticness: acc.acousticness + f.acousticness,
        danceability: acc.danceability + f.danceability,
        energy: acc.energy + f.energy,
        tempo: acc.tempo + f.tempo,
        valence: acc.valence + f.valence,
    });

    AudioSummary {
        sums,
        limit: result.request.limit,
    }
}

impl AudioSummary {
    pub fn report(&self) -> AudioReport {
        let limit = self.limit.max(1) as f64;
        let percent = |sum: f64| (sum / limit * 100.0).round() as i64;

        AudioReport {
            acousticness: percent(self.sums.acousticness),
            danceability: percent(self.sums.danceability),
            energy: percent(self.sums.energy),
            valence: percent(self.sums.valence),
            tempo: (self.sums.tempo / limit).round() as i64,
        }
    }
}
