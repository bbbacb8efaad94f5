use chrono::{SecondsFormat, Utc};

/// Current time in the RFC3339 form the postgres adapters return.
pub(crate) fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
