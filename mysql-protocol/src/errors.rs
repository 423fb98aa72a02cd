use snafu::{Backtrace, Snafu};

#[derive(Snafu, Debug)]
#[snafu(visibility(pub), context(suffix(false)))]
#[non_exhaustive]
pub enum DecodeError {
    #[snafu(display("unexpected end of frame, {} more bytes needed", needed))]
    Underflow { backtrace: Backtrace, needed: usize },
    #[snafu(display("invalid binary temporal length: {}", length))]
    InvalidTemporalLength { backtrace: Backtrace, length: u8 },
    #[snafu(display("datetime is out of range"))]
    InvalidDate { backtrace: Backtrace },
    #[snafu(display("duration is out of range"))]
    DurationOutOfRange { backtrace: Backtrace },
}

#[derive(Snafu, Debug)]
#[snafu(visibility(pub(crate)), context(suffix(false)))]
#[non_exhaustive]
pub enum EncodeError {
    #[snafu(display(
        "malformed packet: row has {} values for {} columns",
        values,
        columns
    ))]
    MalformedPacket {
        backtrace: Backtrace,
        columns: usize,
        values: usize,
    },
    #[snafu(display("invalid type {}", kind))]
    InvalidType {
        backtrace: Backtrace,
        kind: &'static str,
    },
    #[snafu(display("FATAL: cannot convert timestamp {} to target time zone", value))]
    TimeConversion { backtrace: Backtrace, value: String },
    #[snafu(display("error encoding column {}: {}", index, source))]
    Column {
        index: usize,
        #[snafu(source(from(EncodeError, Box::new)))]
        source: Box<EncodeError>,
    },
}

impl EncodeError {
    /// Returns the innermost error, skipping per-column wrappers.
    pub fn root(&self) -> &EncodeError {
        match self {
            EncodeError::Column { source, .. } => source.root(),
            other => other,
        }
    }
}
