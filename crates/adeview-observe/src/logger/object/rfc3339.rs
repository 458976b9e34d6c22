use std::fmt;

use time::{OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339};
use tracing_subscriber::fmt::{format::Writer, time::FormatTime};

use crate::logger::object::timezone::local_offset;

/// RFC3339 timestamp formatter, either in UTC or in the offset cached by
/// [`crate::init_local_offset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggerRfc3339 {
    local: bool,
}

impl LoggerRfc3339 {
    pub const fn utc() -> Self {
        Self { local: false }
    }

    pub const fn local() -> Self {
        Self { local: true }
    }

    fn offset(&self) -> UtcOffset {
        if self.local {
            local_offset()
        } else {
            UtcOffset::UTC
        }
    }
}

impl FormatTime for LoggerRfc3339 {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        let now = OffsetDateTime::now_utc().to_offset(self.offset());
        match now.format(&Rfc3339) {
            Ok(ts) => write!(w, "{ts} "),
            Err(_) => write!(w, "<invalid-time> "),
        }
    }
}
