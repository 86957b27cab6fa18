// Fixed constants shared across the timing engine. Tunable values live in
// `config::defaults`; these are part of the scoring contract.

// --- Engagement weights ---
pub const WEIGHT_OPENED: f64 = 1.0;
pub const WEIGHT_CLICKED: f64 = 2.0;
pub const WEIGHT_REPLIED: f64 = 3.0;
pub const WEIGHT_MEETING_SCHEDULED: f64 = 5.0;
pub const WEIGHT_PURCHASE: f64 = 10.0;
pub const WEIGHT_UNSUBSCRIBED: f64 = -10.0;
pub const WEIGHT_MARKED_SPAM: f64 = -20.0;

// --- Pattern analysis ---
/// Number of peak buckets retained per contact.
pub const PEAK_BUCKETS: usize = 5;
/// Peak-bucket scores are divided by this before weighting.
pub const PEAK_SCORE_NORMALIZER: f64 = 5.0;

// --- Schedule windows ---
pub const BEFORE_HOURS_SCORE: f64 = 0.8;
pub const LUNCH_WINDOW_SCORE: f64 = 0.6;
pub const AFTER_HOURS_SCORE: f64 = 0.9;
/// A lunch break must be longer than this to yield a contact window.
pub const MIN_LUNCH_WINDOW_MINUTES: i64 = 45;
/// Minutes trimmed from each side of an extended lunch break.
pub const LUNCH_TRIM_MINUTES: i64 = 15;

// --- Candidate scoring ---
pub const BASE_SCORE: f64 = 0.5;
pub const PEAK_MATCH_WEIGHT: f64 = 0.3;
pub const ORG_WINDOW_BONUS: f64 = 0.2;
pub const BUSY_PERIOD_PENALTY: f64 = 0.5;
pub const NORM_BEST_DAY_BONUS: f64 = 0.1;
pub const NORM_BEST_TIME_BONUS: f64 = 0.2;
pub const NORM_AVOID_TIME_PENALTY: f64 = 0.3;
/// Horizon, in hours, over which high urgency favors sooner slots.
pub const URGENCY_HORIZON_HOURS: f64 = 24.0;

// --- Alternatives ---
pub const ALTERNATIVE_OFFSETS: [i64; 4] = [-2, -1, 1, 2];
pub const ALTERNATIVE_DECAY_PER_HOUR: f64 = 0.1;
pub const NEXT_DAY_ALTERNATIVE_PENALTY: f64 = 0.2;
pub const MAX_ALTERNATIVES: usize = 3;

// --- Channel analysis ---
pub const CHANNEL_BLOCK_HOURS: u32 = 2;
pub const MAX_CHANNEL_WINDOWS: usize = 3;

// --- Confidence ---
pub const CONFIDENCE_FLOOR: f64 = 0.3;
pub const CONFIDENCE_CEILING: f64 = 0.95;
pub const HISTORY_SATURATION: f64 = 50.0;
pub const HISTORY_CONTRIBUTION_CAP: f64 = 0.3;
pub const CONSISTENCY_CONTRIBUTION: f64 = 0.2;
pub const SCHEDULE_CONTRIBUTION: f64 = 0.2;

// --- Reasoning ---
pub const PATTERN_FACTOR_WEIGHT: f64 = 0.3;
pub const SCHEDULE_FACTOR_WEIGHT: f64 = 0.25;
pub const NORMS_FACTOR_WEIGHT: f64 = 0.2;
pub const CHANNEL_FACTOR_WEIGHT: f64 = 0.15;
pub const PATTERN_CONSISTENCY_THRESHOLD: f64 = 0.7;
pub const CHANNEL_RATE_THRESHOLD: f64 = 0.5;

// --- Insights ---
pub const INSIGHT_RECENT_DAYS: i64 = 30;
pub const INSIGHT_LOW_SUCCESS_RATE: f64 = 0.3;
pub const INSIGHT_TOP_HOURS: usize = 5;
