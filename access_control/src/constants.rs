// Delay before a committed ownership transfer can be applied, seconds.
pub const ADMIN_ACTIONS_DELAY: u64 = 3 * 86400;
