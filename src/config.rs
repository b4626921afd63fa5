use std::env;
use std::str::FromStr;

pub static STEP_LIMIT_VAR: &str = "TANGLISH_STEP_LIMIT";
pub static MAX_DEPTH_VAR: &str = "TANGLISH_MAX_DEPTH";

pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Execution budget for one interpreter. Loops are user controlled, so a
/// host that must always get an answer sets `step_limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Maximum statements (and loop iterations) executed per program.
    pub step_limit: Option<u64>,
    /// Maximum nesting of `seyal` calls.
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            step_limit: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(limit) = parse_setting::<u64>(STEP_LIMIT_VAR, lookup(STEP_LIMIT_VAR)) {
            config.step_limit = Some(limit);
        }
        if let Some(depth) = parse_setting::<usize>(MAX_DEPTH_VAR, lookup(MAX_DEPTH_VAR)) {
            config.max_depth = depth;
        }
        config
    }

    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = Some(limit);
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

fn parse_setting<T: FromStr>(name: &str, raw: Option<String>) -> Option<T> {
    let raw = raw?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(variable = name, value = %raw, "ignoring invalid setting");
            None
        }
    }
}
