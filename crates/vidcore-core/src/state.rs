// crates/vidcore-core/src/state.rs
// Library record types, serializable via serde, shared by the store, the
// uploader and every view in vidcore-ui.
//
// The persisted layout is a JSON array of camelCase objects:
//
//   [{"id":"…","name":"demo","fileName":"demo.mp4","url":"blob:vidcore/…",
//     "size":1000,"duration":0.0,"uploadDate":"2024-05-01T12:00:00.000Z"}]
//
// Never rename a field here without a migration path: existing records
// would fail to decode and be skipped.
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// One video's metadata entry in the persisted collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub id:          String,
    /// Display name. The only field that is ever mutated after creation.
    pub name:        String,
    pub file_name:   String,
    /// Playable reference. Only resolvable for the session that created it.
    pub url:         String,
    /// Bytes.
    pub size:        u64,
    /// Seconds. Never measured; always 0 for uploaded files.
    pub duration:    f64,
    #[serde(with = "iso_millis")]
    pub upload_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail:   Option<String>,
}

/// A record before the store has assigned it an id.
#[derive(Clone, Debug, PartialEq)]
pub struct NewVideo {
    pub name:        String,
    pub file_name:   String,
    pub url:         String,
    pub size:        u64,
    pub duration:    f64,
    /// Defaulted to the current time by `VideoStore::save` when `None`.
    pub upload_date: Option<DateTime<Utc>>,
    pub thumbnail:   Option<String>,
}

impl NewVideo {
    /// The upload date is cut to whole milliseconds, the precision it is
    /// stored at, so the returned record equals the one read back later.
    pub(crate) fn into_record(self, id: String) -> VideoRecord {
        VideoRecord {
            id,
            name:        self.name,
            file_name:   self.file_name,
            url:         self.url,
            size:        self.size,
            duration:    self.duration,
            upload_date: self.upload_date.unwrap_or_else(Utc::now).trunc_subsecs(3),
            thumbnail:   self.thumbnail,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

/// `uploadDate` as ISO-8601 UTC text with millisecond precision, the same
/// shape `Date.prototype.toISOString` produces. Reading accepts any RFC 3339
/// offset and normalises it to UTC.
///
/// A date that does not parse (or `null`, which is what an invalid date
/// serializes to) reads as the Unix epoch. One bad timestamp never costs the
/// rest of the record.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};
    use tracing::warn;

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        let parsed = raw.as_deref().and_then(|r| DateTime::parse_from_rfc3339(r).ok());
        Ok(match parsed {
            Some(dt) => dt.with_timezone(&Utc),
            None => {
                warn!("unreadable uploadDate {raw:?}, using the epoch");
                DateTime::<Utc>::UNIX_EPOCH
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> VideoRecord {
        VideoRecord {
            id:          "abc".into(),
            name:        "demo".into(),
            file_name:   "demo.mp4".into(),
            url:         "blob:1".into(),
            size:        1000,
            duration:    0.0,
            upload_date: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            thumbnail:   None,
        }
    }

    #[test]
    fn serializes_camel_case_with_iso_date() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["fileName"], "demo.mp4");
        assert_eq!(json["uploadDate"], "2024-05-01T12:00:00.000Z");
        assert!(json.get("thumbnail").is_none());
    }

    #[test]
    fn upload_date_survives_round_trip_at_millisecond_precision() {
        let mut rec = sample();
        rec.upload_date = Utc.timestamp_millis_opt(1_714_564_800_123).unwrap();
        let text = serde_json::to_string(&rec).unwrap();
        let back: VideoRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(back.upload_date, rec.upload_date);
        assert_eq!(back, rec);
    }

    #[test]
    fn offset_dates_are_normalised_to_utc() {
        let text = r#"{"id":"1","name":"n","fileName":"n.mp4","url":"u","size":1,
            "duration":0,"uploadDate":"2024-05-01T14:00:00+02:00"}"#;
        let rec: VideoRecord = serde_json::from_str(text).unwrap();
        assert_eq!(rec.upload_date, Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
        assert_eq!(rec.thumbnail, None);
    }

    #[test]
    fn new_video_defaults_upload_date() {
        let before = Utc::now();
        let rec = NewVideo {
            name:        "a".into(),
            file_name:   "a.mp4".into(),
            url:         "blob:a".into(),
            size:        0,
            duration:    0.0,
            upload_date: None,
            thumbnail:   None,
        }
        .into_record("id".into());
        assert!(rec.upload_date >= before.trunc_subsecs(3));
        assert_eq!(rec.upload_date.timestamp_subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn supplied_upload_date_is_cut_to_millis() {
        let precise = Utc.timestamp_opt(1_714_564_800, 123_456_789).unwrap();
        let rec = NewVideo {
            name:        "a".into(),
            file_name:   "a.mp4".into(),
            url:         "blob:a".into(),
            size:        0,
            duration:    0.0,
            upload_date: Some(precise),
            thumbnail:   None,
        }
        .into_record("id".into());
        assert_eq!(rec.upload_date, Utc.timestamp_millis_opt(1_714_564_800_123).unwrap());

        let text = serde_json::to_string(&rec).unwrap();
        let back: VideoRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(back, rec);
    }

    #[test]
    fn unreadable_upload_date_falls_back_to_epoch() {
        for date in [r#""not a date""#, "null"] {
            let text = format!(r#"{{"id":"1","name":"n","fileName":"n.mp4","url":"u","size":1,
                "duration":0,"uploadDate":{date}}}"#);
            let rec: VideoRecord = serde_json::from_str(&text).unwrap();
            assert_eq!(rec.upload_date, DateTime::<Utc>::UNIX_EPOCH);
            assert_eq!(rec.name, "n");
        }
    }
}
