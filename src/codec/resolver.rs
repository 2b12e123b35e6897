//! Decoding the tag shared by instants and durations.
//!
//! `T` is read as an instant first. It is read a second time, as a
//! duration, in two cases:
//!
//! - the caller asked for a duration (the kind mismatch is known before
//!   the payload is touched);
//! - the caller asked for any kind and the payload matched no instant profile.
//!
//! The second reading replays `{"TA":` plus whatever payload token was
//! already consumed in front of the live source, so the duration decoder
//! sees an ordinary struct. A caller asking for an instant never retries.

use smallvec::SmallVec;
use tracing::debug;

use crate::model::Value;
use crate::{Error, Result};
use super::decode::{convert_scalar, expect_struct_end, Decoder, Target};
use super::{Sequence, Sigil, Token, TokenSource, ValueKind};

enum State {
    Primary,
    Retry { primary: Error, consumed: SmallVec<[Token; 1]> },
}

pub(crate) fn resolve_shared(
    decoder: &Decoder<'_>,
    source: &mut dyn TokenSource,
    tag: &str,
    target: Target,
) -> Result<Value> {
    let mut state = State::Primary;
    loop {
        state = match state {
            State::Primary => match target {
                Target::Kind(ValueKind::Duration) => State::Retry {
                    primary: Error::TagKindMismatch {
                        tag: tag.to_owned(),
                        expected: ValueKind::Duration,
                        found: ValueKind::Instant,
                    },
                    consumed: SmallVec::new(),
                },
                Target::Kind(_) => return decoder.decode_tagged(source, Sigil::Time, tag, target),
                Target::Any => {
                    let token = source.next_token();
                    match convert_scalar(Sigil::Time, tag, token.as_ref()) {
                        Ok(value) => {
                            expect_struct_end(source, tag)?;
                            return Ok(value);
                        }
                        Err(primary @ Error::NoTemporalProfileMatched { .. }) => State::Retry {
                            primary,
                            consumed: token.into_iter().collect(),
                        },
                        Err(e) => return Err(e),
                    }
                }
            },
            State::Retry { primary, consumed } => return retry(decoder, source, tag, primary, consumed),
        };
    }
}

fn retry(
    decoder: &Decoder<'_>,
    source: &mut dyn TokenSource,
    tag: &str,
    primary: Error,
    consumed: SmallVec<[Token; 1]>,
) -> Result<Value> {
    debug!(tag, %primary, "shared tag is not an instant, retrying as a duration");
    let replay = [
        Token::StartObject,
        Token::FieldName(Sigil::TemporalAmount.literal().to_owned()),
    ]
    .into_iter()
    .chain(consumed);
    let mut sequence = Sequence::new(replay, source);
    decoder
        .decode_struct(&mut sequence, Target::Kind(ValueKind::Duration))
        .map_err(|retry| {
            debug!(tag, %retry, "duration retry failed");
            Error::AmbiguousTagResolutionFailure {
                tag: tag.to_owned(),
                primary: Box::new(primary),
                retry: Box::new(retry),
            }
        })
}
