use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Reward assigned to a task when none is specified
pub const DEFAULT_TASK_REWARD: i64 = 10;

/// XP earned per base token credited
pub const XP_PER_TOKEN: i64 = 10;

/// XP required per level
pub const XP_PER_LEVEL: i64 = 500;

/// Level threshold for the "Rising Star" badge
pub const RISING_STAR_LEVEL: i64 = 2;
pub const RISING_STAR_BADGE: &str = "Rising Star";

/// Level threshold for the "Chore Master" badge
pub const CHORE_MASTER_LEVEL: i64 = 5;
pub const CHORE_MASTER_BADGE: &str = "Chore Master";

/// Streak multiplier table: consecutive completions -> earn multiplier
pub const STREAK_TIER_1_DAYS: u32 = 7;
pub const STREAK_TIER_1_MULTIPLIER: Decimal = dec!(1.2);
pub const STREAK_TIER_2_DAYS: u32 = 14;
pub const STREAK_TIER_2_MULTIPLIER: Decimal = dec!(1.5);
pub const STREAK_TIER_3_DAYS: u32 = 30;
pub const STREAK_TIER_3_MULTIPLIER: Decimal = dec!(2.0);

/// Bids placed with less than this many seconds left raise the
/// countdown back to exactly this floor (anti-sniping)
pub const ANTI_SNIPE_FLOOR_SECS: u32 = 60;

/// Minimum age of the previous rotation before the shop refreshes again
pub const SHOP_REFRESH_WINDOW_HOURS: i64 = 24;

/// Shop rotation: common tier (always included)
pub const COMMON_EXPIRY_HOURS: i64 = 24;

/// Shop rotation: uncommon tier
pub const UNCOMMON_CANDIDATES_PER_CATEGORY: usize = 4;
pub const UNCOMMON_INCLUDE_CHANCE: f64 = 0.7;
pub const UNCOMMON_EXPIRY_HOURS: i64 = 24;

/// Shop rotation: rare tier
pub const RARE_CANDIDATES_PER_CATEGORY: usize = 3;
pub const RARE_INCLUDE_CHANCE: f64 = 0.3;
pub const RARE_EXPIRY_HOURS: i64 = 12;

/// Shop rotation: legendary tier (single slot, stock of one)
pub const LEGENDARY_INCLUDE_CHANCE: f64 = 0.1;
pub const LEGENDARY_EXPIRY_HOURS: i64 = 4;
pub const LEGENDARY_STOCK: u32 = 1;

/// Vault interest rate applied by default
pub const DEFAULT_INTEREST_RATE: Decimal = dec!(0.05);
