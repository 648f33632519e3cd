//! Run settings: raw input fields and their resolved values

use serde::{Deserialize, Serialize};

pub const DEFAULT_STUDY_MINUTES: u64 = 25;
pub const DEFAULT_REST_MINUTES: u64 = 5;
pub const DEFAULT_CYCLE_COUNT: u32 = 4;

/// The three configuration fields exactly as the user typed them.
///
/// Nothing here is validated on write. Values are only interpreted by
/// [`SettingsInput::resolve`], which happens when a fresh run starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsInput {
    pub study: String,
    pub rest: String,
    pub cycles: String,
}

/// A field value as sent by a client: text or a JSON number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(serde_json::Number),
}

impl FieldValue {
    fn into_raw(self) -> String {
        match self {
            FieldValue::Text(text) => text,
            FieldValue::Number(number) => number.to_string(),
        }
    }
}

/// Partial update of the input fields; absent fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsUpdate {
    #[serde(default)]
    pub study: Option<FieldValue>,
    #[serde(default)]
    pub rest: Option<FieldValue>,
    #[serde(default)]
    pub cycles: Option<FieldValue>,
}

/// Settings after clamping, as used by a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub study_minutes: u64,
    pub rest_minutes: u64,
    pub cycle_count: u32,
}

impl SettingsInput {
    pub fn new(study: &str, rest: &str, cycles: &str) -> Self {
        Self {
            study: study.to_string(),
            rest: rest.to_string(),
            cycles: cycles.to_string(),
        }
    }

    /// Overwrite the fields present in `update`
    pub fn apply(&mut self, update: SettingsUpdate) {
        if let Some(study) = update.study {
            self.study = study.into_raw();
        }
        if let Some(rest) = update.rest {
            self.rest = rest.into_raw();
        }
        if let Some(cycles) = update.cycles {
            self.cycles = cycles.into_raw();
        }
    }

    /// Interpret the raw fields.
    ///
    /// A missing or zero leading integer falls back to the field default,
    /// anything else below one is raised to one.
    pub fn resolve(&self) -> Settings {
        Settings {
            study_minutes: resolve_field(&self.study, DEFAULT_STUDY_MINUTES as i64) as u64,
            rest_minutes: resolve_field(&self.rest, DEFAULT_REST_MINUTES as i64) as u64,
            cycle_count: resolve_field(&self.cycles, DEFAULT_CYCLE_COUNT as i64)
                .min(u32::MAX as i64) as u32,
        }
    }
}

impl Default for SettingsInput {
    fn default() -> Self {
        Self {
            study: DEFAULT_STUDY_MINUTES.to_string(),
            rest: DEFAULT_REST_MINUTES.to_string(),
            cycles: DEFAULT_CYCLE_COUNT.to_string(),
        }
    }
}

impl Settings {
    pub fn study_seconds(&self) -> i64 {
        minutes_to_seconds(self.study_minutes)
    }

    pub fn rest_seconds(&self) -> i64 {
        minutes_to_seconds(self.rest_minutes)
    }
}

impl Default for Settings {
    fn default() -> Self {
        SettingsInput::default().resolve()
    }
}

fn minutes_to_seconds(minutes: u64) -> i64 {
    i64::try_from(minutes).unwrap_or(i64::MAX).saturating_mul(60)
}

fn resolve_field(raw: &str, default: i64) -> i64 {
    match leading_integer(raw) {
        None | Some(0) => default,
        Some(value) => value.max(1),
    }
}

/// Leading optionally-signed decimal integer of `raw`, ignoring leading
/// whitespace and any trailing garbage. Saturates instead of overflowing.
fn leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(10) else { break };
        seen_digit = true;
        value = value.saturating_mul(10).saturating_add(d as i64);
    }

    if !seen_digit {
        return None;
    }
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(study: &str, rest: &str, cycles: &str) -> Settings {
        SettingsInput::new(study, rest, cycles).resolve()
    }

    #[test]
    fn plain_numbers_pass_through() {
        let s = resolve("50", "10", "2");
        assert_eq!(s, Settings { study_minutes: 50, rest_minutes: 10, cycle_count: 2 });
        assert_eq!(s.study_seconds(), 3000);
        assert_eq!(s.rest_seconds(), 600);
    }

    #[test]
    fn empty_or_garbage_falls_back_to_defaults() {
        assert_eq!(resolve("", "", ""), Settings::default());
        assert_eq!(resolve("abc", "x5", "--"), Settings::default());
    }

    #[test]
    fn zero_falls_back_to_default_not_floor() {
        assert_eq!(resolve("0", "0", "0"), Settings::default());
    }

    #[test]
    fn negative_values_clamp_to_one() {
        assert_eq!(
            resolve("-3", "-1", "-10"),
            Settings { study_minutes: 1, rest_minutes: 1, cycle_count: 1 }
        );
    }

    #[test]
    fn leading_integer_prefix_is_used() {
        assert_eq!(
            resolve("  12abc", "7.9", "+3 cycles"),
            Settings { study_minutes: 12, rest_minutes: 7, cycle_count: 3 }
        );
    }

    #[test]
    fn update_accepts_text_and_numbers() {
        let update: SettingsUpdate =
            serde_json::from_str(r#"{"study": 50, "cycles": "2 rounds"}"#).unwrap();
        let mut input = SettingsInput::default();
        input.apply(update);

        assert_eq!(input, SettingsInput::new("50", "5", "2 rounds"));
        assert_eq!(
            input.resolve(),
            Settings { study_minutes: 50, rest_minutes: 5, cycle_count: 2 }
        );
    }

    #[test]
    fn fractional_numbers_keep_integer_part() {
        let mut input = SettingsInput::default();
        input.apply(serde_json::from_str(r#"{"rest": 2.5}"#).unwrap());
        assert_eq!(input.resolve().rest_minutes, 2);
    }

    #[test]
    fn huge_values_saturate() {
        let s = resolve("99999999999999999999999", "1", "99999999999");
        assert_eq!(s.study_minutes, i64::MAX as u64);
        assert_eq!(s.study_seconds(), i64::MAX);
        assert_eq!(s.cycle_count, u32::MAX);
    }
}
