pub const DAY_IN_LEDGERS: u32 = 17280;
pub const WEEK_IN_LEDGERS: u32 = DAY_IN_LEDGERS * 7;

pub const PERSISTENT_TTL_THRESHOLD: u32 = DAY_IN_LEDGERS * 30;
pub const MAX_PERSISTENT_TTL: u32 = DAY_IN_LEDGERS * 90;
