use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

//--------------------------------------------------------------------------------------------------
// Unix Timestamp handling
//--------------------------------------------------------------------------------------------------

/// A point in time carried in a token as whole seconds since the Unix epoch.
///
/// The default value is the epoch itself, which is what an absent claim decodes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnixTimestamp(OffsetDateTime);

impl Default for UnixTimestamp {
    fn default() -> Self {
        UnixTimestamp(OffsetDateTime::UNIX_EPOCH)
    }
}

impl Serialize for UnixTimestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.unix_timestamp().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for UnixTimestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let timestamp = i64::deserialize(deserializer)?;
        UnixTimestamp::from_unix(timestamp).map_err(serde::de::Error::custom)
    }
}

impl From<UnixTimestamp> for OffsetDateTime {
    fn from(ts: UnixTimestamp) -> Self {
        ts.0
    }
}

impl UnixTimestamp {
    /// The current time, truncated to whole seconds so it survives a trip through a token.
    pub fn now() -> Self {
        let now = OffsetDateTime::now_utc();
        UnixTimestamp(now - Duration::nanoseconds(now.nanosecond() as i64))
    }

    pub fn from_unix(timestamp: i64) -> Result<Self, time::error::ComponentRange> {
        OffsetDateTime::from_unix_timestamp(timestamp).map(UnixTimestamp)
    }

    pub fn unix_timestamp(&self) -> i64 {
        self.0.unix_timestamp()
    }

    pub fn is_epoch(&self) -> bool {
        self.0 == OffsetDateTime::UNIX_EPOCH
    }

    pub fn add_seconds(self, seconds: i64) -> Self {
        UnixTimestamp(self.0.saturating_add(Duration::seconds(seconds)))
    }
}

//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_epoch() {
        let ts = UnixTimestamp::default();
        assert!(ts.is_epoch());
        assert_eq!(ts.unix_timestamp(), 0);
    }

    #[test]
    fn now_has_no_fractional_seconds() {
        let now = OffsetDateTime::from(UnixTimestamp::now());
        assert_eq!(now.nanosecond(), 0);
    }

    #[test]
    fn serializes_as_integer_seconds() {
        let ts = UnixTimestamp::from_unix(1234567).unwrap();
        assert_eq!(serde_json::to_string(&ts).unwrap(), "1234567");

        let parsed: UnixTimestamp = serde_json::from_str("2147483647").unwrap();
        assert_eq!(parsed.unix_timestamp(), 2147483647);
    }

    #[test]
    fn add_seconds_moves_forward() {
        let ts = UnixTimestamp::from_unix(100).unwrap().add_seconds(10);
        assert_eq!(ts.unix_timestamp(), 110);
    }
}

//--------------------------------------------------------------------------------------------------
