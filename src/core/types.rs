//! Core type definitions and value objects for the domain model
//!
//! The JSON shapes here are a compatibility contract with the dashboard that
//! consumes the leaderboard, so field names are camelCase on the wire and the
//! numeric types follow the rounding rules of the aggregator: fractional
//! amounts are `f64` rounded to two decimals, point totals are integers.

use chrono::{DateTime, Utc};
use http::StatusCode;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::core::domain::rates::{DEFAULT_REFERRAL_FEES_RATE, DEFAULT_REFERRAL_POINTS_RATE};

/// A participant as it appears in the imported payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRecord {
    /// Unique, case-sensitive participant identifier
    #[serde(default)]
    pub ref_code: Option<String>,

    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Own activity points
    #[serde(default, deserialize_with = "de::lenient_f64")]
    pub points: Option<f64>,

    /// Own fee volume
    #[serde(default, deserialize_with = "de::lenient_f64")]
    pub fees_generated: Option<f64>,

    /// `refCode` of the referring participant
    #[serde(default)]
    pub referrer_ref_code: Option<String>,
}

impl ParticipantRecord {
    /// Create a record with the given identifier and activity
    pub fn new<S: Into<String>>(ref_code: S, points: f64, fees_generated: f64) -> Self {
        Self {
            ref_code: Some(ref_code.into()),
            points: Some(points),
            fees_generated: Some(fees_generated),
            ..Self::default()
        }
    }

    /// Set the referrer
    #[must_use]
    pub fn referred_by<S: Into<String>>(mut self, referrer: S) -> Self {
        self.referrer_ref_code = Some(referrer.into());
        self
    }

    /// Set the display name
    #[must_use]
    pub fn named<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Identifier, or `None` when the record is malformed
    pub fn ref_code(&self) -> Option<&str> {
        non_blank(self.ref_code.as_deref())
    }

    /// Referrer identifier, or `None` when the participant has no referrer
    pub fn referrer(&self) -> Option<&str> {
        non_blank(self.referrer_ref_code.as_deref())
    }

    /// Own points, absent treated as zero and clamped at zero
    pub fn own_points(&self) -> f64 {
        self.points.unwrap_or(0.0).max(0.0)
    }

    /// Own fees, absent treated as zero and clamped at zero
    pub fn own_fees(&self) -> f64 {
        self.fees_generated.unwrap_or(0.0).max(0.0)
    }

    /// Display name, falling back to the identifier
    pub fn display_name(&self) -> String {
        non_blank(self.name.as_deref())
            .or_else(|| self.ref_code())
            .unwrap_or_default()
            .to_string()
    }
}

/// Reward rates used by one aggregation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateConfig {
    /// Fraction of a referee's points credited to the referrer
    pub referral_points_rate: f64,

    /// Fraction of a referee's fees credited to the referrer
    pub referral_fees_rate: f64,

    /// Points rate substituted in per-dex views
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_dex_referral_points_rate: Option<f64>,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            referral_points_rate: DEFAULT_REFERRAL_POINTS_RATE,
            referral_fees_rate: DEFAULT_REFERRAL_FEES_RATE,
            per_dex_referral_points_rate: None,
        }
    }
}

impl RateConfig {
    /// Merge payload-supplied rates over `self`, field by field.
    ///
    /// Negative or non-finite payload values are ignored.
    #[must_use]
    pub fn resolve(&self, overrides: Option<&PayloadRates>) -> Self {
        let Some(overrides) = overrides else {
            return *self;
        };

        Self {
            referral_points_rate: valid_rate(overrides.referral_points_rate)
                .unwrap_or(self.referral_points_rate),
            referral_fees_rate: valid_rate(overrides.referral_fees_rate)
                .unwrap_or(self.referral_fees_rate),
            per_dex_referral_points_rate: valid_rate(overrides.per_dex_referral_points_rate)
                .or(self.per_dex_referral_points_rate),
        }
    }

    /// Rates for a per-dex view: the shared points rate is replaced by the
    /// per-dex rate (zero when unset). `self` is left untouched.
    #[must_use]
    pub fn for_segment(&self) -> Self {
        Self {
            referral_points_rate: self.per_dex_referral_points_rate.unwrap_or(0.0),
            ..*self
        }
    }
}

fn valid_rate(rate: Option<f64>) -> Option<f64> {
    rate.filter(|r| r.is_finite() && *r >= 0.0)
}

/// Rates as they appear in an imported payload; every field is optional
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadRates {
    /// Points rate override
    #[serde(default, deserialize_with = "de::lenient_f64")]
    pub referral_points_rate: Option<f64>,

    /// Fees rate override
    #[serde(default, deserialize_with = "de::lenient_f64")]
    pub referral_fees_rate: Option<f64>,

    /// Per-dex points rate override
    #[serde(default, deserialize_with = "de::lenient_f64")]
    pub per_dex_referral_points_rate: Option<f64>,
}

/// Manual adjustment applied on top of the computed points
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BonusOverride {
    /// Added to own points
    #[serde(default)]
    pub bonus_points: Option<f64>,

    /// Added to referral points
    #[serde(default)]
    pub bonus_referral_points: Option<f64>,
}

/// One row of the leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedEntry {
    /// Same as `ref_code`
    pub id: String,
    /// Display name
    pub name: String,
    /// Participant identifier
    pub ref_code: String,
    /// Own points, two decimals
    pub points: f64,
    /// Points earned from direct referees
    pub referral_points: u64,
    /// Ranking key
    pub total_points: u64,
    /// Own fee volume, two decimals
    pub fees_generated: f64,
    /// Fees earned from direct referees, two decimals
    pub referral_fees: f64,
    /// Referral fees plus the self share of own fees, two decimals
    pub total_fees: f64,
    /// Number of direct referees
    pub referrals: usize,
}

impl ComputedEntry {
    /// A zero-valued entry for a participant with no recorded activity
    pub fn zero<S: Into<String>, N: Into<String>>(ref_code: S, name: N) -> Self {
        let ref_code = ref_code.into();
        Self {
            id: ref_code.clone(),
            name: name.into(),
            ref_code,
            points: 0.0,
            referral_points: 0,
            total_points: 0,
            fees_generated: 0.0,
            referral_fees: 0.0,
            total_fees: 0.0,
            referrals: 0,
        }
    }
}

/// A participant known to the user registry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryUser {
    /// Participant identifier
    pub ref_code: String,

    /// Profile name
    #[serde(default)]
    pub name: Option<String>,

    /// Account username
    #[serde(default)]
    pub username: Option<String>,

    /// Manual points adjustment
    #[serde(default)]
    pub bonus_points: Option<f64>,

    /// Manual referral points adjustment
    #[serde(default)]
    pub bonus_referral_points: Option<f64>,

    /// `refCode` of the user who referred this one
    #[serde(default)]
    pub referrer_ref_code: Option<String>,
}

impl RegistryUser {
    /// Create a registry user with only an identifier
    pub fn new<S: Into<String>>(ref_code: S) -> Self {
        Self {
            ref_code: ref_code.into(),
            ..Self::default()
        }
    }

    /// Display name: profile name, then username, then identifier
    pub fn display_name(&self) -> String {
        non_blank(self.name.as_deref())
            .or_else(|| non_blank(self.username.as_deref()))
            .unwrap_or(&self.ref_code)
            .to_string()
    }

    /// Referrer identifier, if any
    pub fn referrer(&self) -> Option<&str> {
        non_blank(self.referrer_ref_code.as_deref())
    }

    /// The user's bonus override, when at least one bonus is set
    pub fn bonus_override(&self) -> Option<BonusOverride> {
        if self.bonus_points.is_none() && self.bonus_referral_points.is_none() {
            return None;
        }
        Some(BonusOverride {
            bonus_points: self.bonus_points,
            bonus_referral_points: self.bonus_referral_points,
        })
    }
}

/// Snapshot of participant activity produced by the ingestion step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPayload {
    /// Participant records; entries that are not objects are dropped
    #[serde(deserialize_with = "de::skip_malformed")]
    pub entries: Vec<ParticipantRecord>,

    /// Rates for this snapshot
    #[serde(default)]
    pub rates: Option<PayloadRates>,

    /// Raw per-venue record lists, parsed one segment at a time
    #[serde(default, deserialize_with = "de::lenient_segments")]
    pub per_dex_entries: Option<BTreeMap<String, serde_json::Value>>,

    /// When the snapshot was produced
    #[serde(default, deserialize_with = "de::lenient_timestamp")]
    pub imported_at: Option<DateTime<Utc>>,
}

impl ImportPayload {
    /// Payload with the given entries and nothing else
    pub fn from_entries(entries: Vec<ParticipantRecord>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }
}

/// Which path produced a leaderboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LeaderboardMode {
    /// Aggregated from the imported payload
    #[default]
    Imported,
    /// Referral-count-only mode
    Fallback,
    /// The read failed; the body is empty
    Failed,
}

impl fmt::Display for LeaderboardMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Imported => write!(f, "imported"),
            Self::Fallback => write!(f, "fallback"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Body handed to the presentation layer, plus the status of the read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    /// Ranked participants
    pub leaderboard: Vec<ComputedEntry>,

    /// Ranked participants per venue
    pub per_dex: BTreeMap<String, Vec<ComputedEntry>>,

    /// Status of the read
    #[serde(skip, default = "default_status")]
    pub status: StatusCode,

    /// Path that produced the body
    #[serde(skip)]
    pub mode: LeaderboardMode,
}

fn default_status() -> StatusCode {
    StatusCode::OK
}

impl LeaderboardResponse {
    /// Successful response
    pub fn ok(
        leaderboard: Vec<ComputedEntry>,
        per_dex: BTreeMap<String, Vec<ComputedEntry>>,
        mode: LeaderboardMode,
    ) -> Self {
        Self {
            leaderboard,
            per_dex,
            status: StatusCode::OK,
            mode,
        }
    }

    /// Empty body with an error status
    pub fn failed() -> Self {
        Self {
            leaderboard: Vec::new(),
            per_dex: BTreeMap::new(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
            mode: LeaderboardMode::Failed,
        }
    }

    /// Whether the read succeeded
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

mod de {
    use super::*;
    use serde_json::Value;
    use tracing::{debug, warn};

    /// Numbers or numeric strings; anything else reads as absent
    pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value
            .and_then(|v| match v {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            })
            .filter(|v| v.is_finite()))
    }

    pub fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.and_then(|v| match v {
            Value::String(s) => DateTime::parse_from_rfc3339(&s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            _ => None,
        }))
    }

    /// A segment map that is not an object reads as absent
    pub fn lenient_segments<'de, D>(
        deserializer: D,
    ) -> Result<Option<BTreeMap<String, Value>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::Object(map)) => Some(map.into_iter().collect()),
            Some(Value::Null) | None => None,
            Some(_) => {
                warn!("Ignoring perDexEntries: expected an object keyed by venue");
                None
            }
        })
    }

    pub fn skip_malformed<'de, D>(deserializer: D) -> Result<Vec<ParticipantRecord>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Vec::<Value>::deserialize(deserializer)?;
        let total = raw.len();
        let records: Vec<ParticipantRecord> = raw
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect();

        if records.len() < total {
            debug!("Dropped {} malformed import entries", total - records.len());
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_record_defaults_and_clamping() {
        let record: ParticipantRecord =
            serde_json::from_str(r#"{"refCode":"ABC","points":-40,"feesGenerated":"12.5"}"#)
                .unwrap();

        assert_eq!(record.ref_code(), Some("ABC"));
        assert_eq!(record.own_points(), 0.0);
        assert_eq!(record.own_fees(), 12.5);
        assert_eq!(record.referrer(), None);
        assert_eq!(record.display_name(), "ABC");
    }

    #[test]
    fn test_record_blank_fields() {
        let record: ParticipantRecord =
            serde_json::from_str(r#"{"refCode":"  ","name":" ","referrerRefCode":""}"#).unwrap();

        assert_eq!(record.ref_code(), None);
        assert_eq!(record.referrer(), None);
    }

    #[test]
    fn test_non_numeric_points_read_as_absent() {
        let record: ParticipantRecord =
            serde_json::from_str(r#"{"refCode":"X","points":{"nested":1},"feesGenerated":null}"#)
                .unwrap();
        assert_eq!(record.points, None);
        assert_eq!(record.fees_generated, None);
    }

    #[test]
    fn test_rate_resolution() {
        let defaults = RateConfig::default();
        let overrides = PayloadRates {
            referral_points_rate: Some(0.25),
            referral_fees_rate: Some(-1.0),
            per_dex_referral_points_rate: Some(0.05),
        };

        let resolved = defaults.resolve(Some(&overrides));
        assert_eq!(resolved.referral_points_rate, 0.25);
        assert_eq!(resolved.referral_fees_rate, DEFAULT_REFERRAL_FEES_RATE);
        assert_eq!(resolved.per_dex_referral_points_rate, Some(0.05));
        assert_eq!(defaults.resolve(None), defaults);
    }

    #[test]
    fn test_segment_rates_do_not_touch_shared() {
        let shared = RateConfig {
            per_dex_referral_points_rate: Some(0.03),
            ..RateConfig::default()
        };
        let segment = shared.for_segment();

        assert_eq!(segment.referral_points_rate, 0.03);
        assert_eq!(segment.referral_fees_rate, shared.referral_fees_rate);
        assert_eq!(shared.referral_points_rate, DEFAULT_REFERRAL_POINTS_RATE);
        assert_eq!(RateConfig::default().for_segment().referral_points_rate, 0.0);
    }

    #[test]
    fn test_registry_display_name() {
        let mut user = RegistryUser::new("R1");
        assert_eq!(user.display_name(), "R1");
        user.username = Some("trader".to_string());
        assert_eq!(user.display_name(), "trader");
        user.name = Some("Ada".to_string());
        assert_eq!(user.display_name(), "Ada");
    }

    #[test]
    fn test_bonus_override_presence() {
        let mut user = RegistryUser::new("R1");
        assert_eq!(user.bonus_override(), None);
        user.bonus_referral_points = Some(10.0);
        assert_eq!(
            user.bonus_override(),
            Some(BonusOverride {
                bonus_points: None,
                bonus_referral_points: Some(10.0),
            })
        );
    }

    #[test]
    fn test_payload_tolerates_bad_entries_and_timestamp() {
        let payload: ImportPayload = serde_json::from_str(
            r#"{
                "entries": [{"refCode":"A","points":5}, 42, "junk", {"refCode":7}],
                "importedAt": "yesterday",
                "perDexEntries": [1, 2]
            }"#,
        )
        .unwrap();

        assert_eq!(payload.entries.len(), 1);
        assert_eq!(payload.imported_at, None);
        assert!(payload.per_dex_entries.is_none());
    }

    #[test]
    fn test_response_wire_shape() {
        let response = LeaderboardResponse::ok(
            vec![ComputedEntry::zero("A", "Alice")],
            BTreeMap::new(),
            LeaderboardMode::Imported,
        );
        let json = serde_json::to_value(&response).unwrap();

        assert!(json.get("status").is_none());
        assert_eq!(json["perDex"], serde_json::json!({}));
        assert_eq!(json["leaderboard"][0]["refCode"], "A");
        assert_eq!(json["leaderboard"][0]["totalPoints"], 0);
        assert!(json["leaderboard"][0].get("referralFees").is_some());
    }

    #[test]
    fn test_failed_response() {
        let response = LeaderboardResponse::failed();
        assert!(!response.is_success());
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.leaderboard.is_empty());
    }
}
