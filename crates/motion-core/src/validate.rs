use std::collections::HashSet;

use motion_data::model::{Channel, CurveValue, MotionDoc, Region};
use thiserror::Error;

/// Structural problems in a motion document.
///
/// Resolution itself cannot fail (every runtime input has defined
/// clamping behavior), so validation at load time is the only place a
/// document is rejected.
#[derive(Debug, Error)]
pub enum DocError {
    #[error("document has no regions")]
    Empty,
    #[error("duplicate region name {0:?}")]
    DuplicateRegion(String),
    #[error("region {region:?}: track has no channels")]
    NoChannels { region: String },
    #[error("region {region:?}: channel {channel} has an empty key list")]
    EmptyKeys { region: String, channel: Channel },
    #[error(
        "region {region:?}: channel {channel} keys must be strictly increasing (key {index})"
    )]
    NonIncreasingKeys {
        region: String,
        channel: Channel,
        index: usize,
    },
    #[error("region {region:?}: {what} duration must be positive, got {got}")]
    NonPositiveDuration {
        region: String,
        what: &'static str,
        got: f32,
    },
    #[error("region {region:?}: reveal delay must not be negative, got {got}")]
    NegativeDelay { region: String, got: f32 },
    #[error("region {region:?}: reveal amount must be within [0, 1], got {got}")]
    AmountOutOfRange { region: String, got: f32 },
    #[error("region {region:?}: idle loop needs at least two values")]
    ShortIdleLoop { region: String },
}

pub fn validate(doc: &MotionDoc) -> Result<(), DocError> {
    if doc.regions.is_empty() {
        return Err(DocError::Empty);
    }

    let mut seen = HashSet::new();
    for region in &doc.regions {
        if !seen.insert(region.name.as_str()) {
            return Err(DocError::DuplicateRegion(region.name.clone()));
        }
        validate_region(region)?;
    }
    Ok(())
}

fn validate_region(region: &Region) -> Result<(), DocError> {
    let name = || region.name.clone();

    if let Some(reveal) = &region.reveal {
        if reveal.duration <= 0.0 {
            return Err(DocError::NonPositiveDuration {
                region: name(),
                what: "reveal",
                got: reveal.duration,
            });
        }
        if reveal.delay < 0.0 {
            return Err(DocError::NegativeDelay {
                region: name(),
                got: reveal.delay,
            });
        }
        if !(0.0..=1.0).contains(&reveal.amount) {
            return Err(DocError::AmountOutOfRange {
                region: name(),
                got: reveal.amount,
            });
        }
    }

    if let Some(track) = &region.track {
        if track.channels.is_empty() {
            return Err(DocError::NoChannels { region: name() });
        }
        for chan in &track.channels {
            if let CurveValue::Keyed(keys) = &chan.keys {
                if keys.is_empty() {
                    return Err(DocError::EmptyKeys {
                        region: name(),
                        channel: chan.channel,
                    });
                }
                for (i, pair) in keys.windows(2).enumerate() {
                    if pair[1].at <= pair[0].at {
                        return Err(DocError::NonIncreasingKeys {
                            region: name(),
                            channel: chan.channel,
                            index: i + 1,
                        });
                    }
                }
            }
        }
    }

    if let Some(toggle) = &region.toggle {
        if toggle.duration <= 0.0 {
            return Err(DocError::NonPositiveDuration {
                region: name(),
                what: "toggle",
                got: toggle.duration,
            });
        }
    }

    if let Some(idle) = &region.idle {
        if idle.duration <= 0.0 {
            return Err(DocError::NonPositiveDuration {
                region: name(),
                what: "idle loop",
                got: idle.duration,
            });
        }
        if idle.values.len() < 2 {
            return Err(DocError::ShortIdleLoop { region: name() });
        }
    }

    Ok(())
}
