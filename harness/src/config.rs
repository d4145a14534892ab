//! Policy configuration: JSON documents in, [`SearchPolicyV1`] out.
//!
//! A policy document is a JSON object whose fields all override a default:
//!
//! ```text
//! {"max_depth": 15, "max_steps": 150, "max_distance": 12.5,
//!  "seed_cost": "zero", "record_expansions": false}
//! ```
//!
//! Absent or `null` fields keep the [`SearchPolicyV1::default`] value.
//! `max_distance` accepts a number or a decimal string, so the policy block
//! of a route report can be read back as a config.

use waypoint_search::policy::{SearchPolicyV1, SeedCostV1};

use crate::canon::{canonical_json_bytes, fmt_cost, CanonError, COST_DECIMALS};
use crate::hash::{canonical_hash, ContentHash, DOMAIN_SEARCH_POLICY};

/// Field names a policy document may carry.
const KNOWN_FIELDS: [&str; 5] = [
    "max_depth",
    "max_steps",
    "max_distance",
    "seed_cost",
    "record_expansions",
];

/// Overrides applied on top of [`SearchPolicyV1::default`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolicyConfig {
    pub max_depth: Option<u32>,
    pub max_steps: Option<u64>,
    pub max_distance: Option<f64>,
    pub seed_cost: Option<SeedCostV1>,
    pub record_expansions: Option<bool>,
}

impl PolicyConfig {
    /// Resolve overrides against defaults.
    #[must_use]
    pub fn resolve(&self) -> SearchPolicyV1 {
        let defaults = SearchPolicyV1::default();
        SearchPolicyV1 {
            max_depth: self.max_depth.unwrap_or(defaults.max_depth),
            max_steps: self.max_steps.unwrap_or(defaults.max_steps),
            max_distance: self.max_distance.or(defaults.max_distance),
            seed_cost: self.seed_cost.unwrap_or(defaults.seed_cost),
            record_expansions: self.record_expansions.unwrap_or(defaults.record_expansions),
        }
    }
}

/// Failure reading a policy document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The text is not JSON.
    Parse { detail: String },
    /// The document is not a JSON object.
    NotAnObject,
    /// A field name is not recognized.
    UnknownField { field: String },
    /// A field has the wrong type or an out-of-range value.
    InvalidField { field: String, detail: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse { detail } => write!(f, "policy is not valid JSON: {detail}"),
            Self::NotAnObject => f.write_str("policy document must be a JSON object"),
            Self::UnknownField { field } => write!(f, "unknown policy field: {field}"),
            Self::InvalidField { field, detail } => write!(f, "invalid {field}: {detail}"),
        }
    }
}

impl std::error::Error for ConfigError {}

fn invalid(field: &str, detail: impl Into<String>) -> ConfigError {
    ConfigError::InvalidField {
        field: field.to_string(),
        detail: detail.into(),
    }
}

/// Parse a policy document from text.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] for malformed JSON, otherwise whatever
/// [`config_from_json`] returns.
pub fn parse_policy_config(text: &str) -> Result<PolicyConfig, ConfigError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| ConfigError::Parse {
            detail: e.to_string(),
        })?;
    config_from_json(&value)
}

/// Read overrides from a policy document. Unknown fields are rejected.
///
/// # Errors
///
/// Returns [`ConfigError`] for a non-object document, an unknown field, or
/// a field of the wrong type.
pub fn config_from_json(doc: &serde_json::Value) -> Result<PolicyConfig, ConfigError> {
    let obj = doc.as_object().ok_or(ConfigError::NotAnObject)?;
    if let Some(field) = obj.keys().find(|k| !KNOWN_FIELDS.contains(&k.as_str())) {
        return Err(ConfigError::UnknownField {
            field: field.clone(),
        });
    }
    let present = |field: &str| obj.get(field).filter(|v| !v.is_null());

    let max_depth = present("max_depth")
        .map(|v| {
            v.as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| invalid("max_depth", format!("expected u32, got {v}")))
        })
        .transpose()?;
    let max_steps = present("max_steps")
        .map(|v| {
            v.as_u64()
                .ok_or_else(|| invalid("max_steps", format!("expected u64, got {v}")))
        })
        .transpose()?;
    let max_distance = present("max_distance").map(read_distance).transpose()?;
    let seed_cost = present("seed_cost")
        .map(|v| {
            v.as_str()
                .and_then(SeedCostV1::parse)
                .ok_or_else(|| invalid("seed_cost", format!("unknown mode {v}")))
        })
        .transpose()?;
    let record_expansions = present("record_expansions")
        .map(|v| {
            v.as_bool()
                .ok_or_else(|| invalid("record_expansions", format!("expected bool, got {v}")))
        })
        .transpose()?;

    Ok(PolicyConfig {
        max_depth,
        max_steps,
        max_distance,
        seed_cost,
        record_expansions,
    })
}

fn read_distance(v: &serde_json::Value) -> Result<f64, ConfigError> {
    let d = match v {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| invalid("max_distance", format!("expected a number, got {v}")))?;
    if !(d.is_finite() && d >= 0.0) {
        return Err(invalid("max_distance", format!("must be finite and non-negative, got {d}")));
    }
    let rendered = fmt_cost(d);
    if rendered.parse::<f64>().map(f64::to_bits) != Ok(d.to_bits()) {
        return Err(invalid(
            "max_distance",
            format!("more than {COST_DECIMALS} decimal places: {d} (renders as {rendered})"),
        ));
    }
    Ok(d)
}

/// Parse a policy document and resolve it against defaults.
///
/// # Errors
///
/// See [`parse_policy_config`].
pub fn parse_policy(text: &str) -> Result<SearchPolicyV1, ConfigError> {
    parse_policy_config(text).map(|c| c.resolve())
}

/// Render a policy as a canonicalizable JSON object. Every field is
/// written, so the result resolves back to the same policy.
///
/// `max_distance` is written with [`fmt_cost`] and so covers six decimal
/// places; configuration rejects finer distances, which keeps distinct
/// policies from sharing a digest.
#[must_use]
pub fn policy_to_json(policy: &SearchPolicyV1) -> serde_json::Value {
    serde_json::json!({
        "max_depth": policy.max_depth,
        "max_steps": policy.max_steps,
        "max_distance": policy.max_distance.map(fmt_cost),
        "seed_cost": policy.seed_cost.as_str(),
        "record_expansions": policy.record_expansions,
    })
}

/// Content hash of a policy's canonical JSON.
///
/// # Errors
///
/// Returns [`CanonError`] if canonicalization fails.
pub fn policy_digest(policy: &SearchPolicyV1) -> Result<ContentHash, CanonError> {
    let bytes = canonical_json_bytes(&policy_to_json(policy))?;
    Ok(canonical_hash(DOMAIN_SEARCH_POLICY, &bytes))
}
