use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Errors that can occur when interpreting a rating value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QualityError {
    #[error("invalid review quality value: {0}")]
    InvalidQuality(u8),
}

//
// ─── QUALITY ──────────────────────────────────────────────────────────────────
//

/// Four-level recall rating submitted with a review.
///
/// The numeric value is opaque input to the remote scheduler; the client only
/// guarantees that it is one of the four exposed buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quality {
    /// Failed to recall the answer.
    Again,
    /// Recalled with significant difficulty.
    Hard,
    /// Recalled correctly with appropriate effort.
    Good,
    /// Recalled instantly.
    Easy,
}

impl Quality {
    pub const ALL: [Quality; 4] = [Quality::Again, Quality::Hard, Quality::Good, Quality::Easy];

    /// The wire value sent to the card service.
    #[must_use]
    pub fn as_u8(self) -> u8 {
        match self {
            Quality::Again => 0,
            Quality::Hard => 2,
            Quality::Good => 3,
            Quality::Easy => 5,
        }
    }

    /// Converts a wire value back to a `Quality`.
    ///
    /// # Errors
    ///
    /// Returns `QualityError::InvalidQuality` for anything outside {0, 2, 3, 5}.
    pub fn from_u8(value: u8) -> Result<Self, QualityError> {
        match value {
            0 => Ok(Self::Again),
            2 => Ok(Self::Hard),
            3 => Ok(Self::Good),
            5 => Ok(Self::Easy),
            _ => Err(QualityError::InvalidQuality(value)),
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Quality::Again => "Again",
            Quality::Hard => "Hard",
            Quality::Good => "Good",
            Quality::Easy => "Easy",
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_are_the_exposed_buckets() {
        assert_eq!(Quality::Again.as_u8(), 0);
        assert_eq!(Quality::Hard.as_u8(), 2);
        assert_eq!(Quality::Good.as_u8(), 3);
        assert_eq!(Quality::Easy.as_u8(), 5);
    }

    #[test]
    fn from_u8_roundtrips_every_bucket() {
        for quality in Quality::ALL {
            assert_eq!(Quality::from_u8(quality.as_u8()).unwrap(), quality);
        }
    }

    #[test]
    fn from_u8_rejects_values_outside_the_buckets() {
        for value in [1u8, 4, 6, 255] {
            let err = Quality::from_u8(value).unwrap_err();
            assert_eq!(err, QualityError::InvalidQuality(value));
        }
    }

    #[test]
    fn labels_match_ui_buttons() {
        let labels: Vec<_> = Quality::ALL.iter().map(|q| q.label()).collect();
        assert_eq!(labels, ["Again", "Hard", "Good", "Easy"]);
    }
}
