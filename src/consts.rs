/// Total EV budget across all six stats.
pub const MAX_TOTAL_EVS: u16 = 510;

/// Per-stat EV cap.
pub const MAX_STAT_EVS: u16 = 252;

/// EVs only change a stat in multiples of this step.
pub const EV_STEP: u16 = 4;

/// Highest individual value.
pub const MAX_IV: u16 = 31;

/// VGC level.
pub const DEFAULT_LEVEL: u8 = 50;

/// How many entries each benchmark category reports.
pub const BENCHMARK_LIMIT: usize = 10;
