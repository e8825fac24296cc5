// LootSleuth - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LootSleuth";

/// Application identifier used for config directories.
pub const APP_ID: &str = "LootSleuth";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Extraction defaults
// =============================================================================

/// Default directory holding the per-character log files.
pub const DEFAULT_LOG_DIR: &str = "SourceLogs";

/// Default CSV written by the extractor and read by the analyzer.
pub const DEFAULT_OUTPUT_CSV: &str = "matched_lines.csv";

/// Pattern that pulls the character name out of a log file name,
/// e.g. `eqlog_Mintaka_thj.txt` -> `Mintaka`.
pub const CHARACTER_NAME_PATTERN: &str = r"_(Mint[^_]+)_thj";

/// First bracketed segment of a line; capture group 1 is the timestamp.
pub const TIMESTAMP_PATTERN: &str = r"\[(.*?)\]";

/// Loot message prefix removed from the saved line text.
pub const LOOT_PREFIX: &str = "--You have looted a ";

/// Built-in loot phrases, tested against each line in this order.
pub const DEFAULT_PHRASES: &[&str] = &[
    "--You have looted a Abashi's Rod of Disempowerment",
    "--You have looted a Camii's Bracer of Vigor",
    "--You have looted a Sirran's Boots of Insanity",
    "--You have looted a Ssra's Bloodstone Eyepatch",
    "--You have looted a Jaelen's Katana",
    "--You have looted a Akkirus' Mask of Warfare",
    "--You have looted a Mrylokar's Dagger of Vengeance",
    "--You have looted a Tolan's Longsword of the Glade",
    "--You have looted a Hobart's War Helmet",
    "--You have looted a Do`Vassir's Gauntlets of Might",
    "--You have looted a Solist's Earring of Insight",
    "--You have looted a Rowyl's Metal Armguards",
    "--You have looted a Yakatizma's Shield of Crafting",
    "--You have looted a Crystasia's Crystal Ring",
    "--You have looted a Palladius' Axe of Slaughter",
    "--You have looted a Brother Xave's Headband",
    "--You have looted a Valtron's Necklace of Wonder",
    "--You have looted a Feeliux's Cord of Velocity",
    "--You have looted a Vyrinn's Earring of Insanity",
    "--You have looted a Kelsiferous' Armband of Artistry",
    "--You have looted a Maclaer's Boots of Silence",
    "--You have looted a Sal`Varae's Robe of Darkness",
    "--You have looted a Viik's Pauldrons of Pain",
    "--You have looted a Gharn's Rock of Smashing",
    "--You have looted a Prismatic Scale of",
];

/// Maximum regex pattern length accepted for a single phrase.
pub const MAX_PHRASE_PATTERN_LENGTH: usize = 4_096;

// =============================================================================
// CSV layout
// =============================================================================

/// Header row of the extractor's CSV.
pub const CSV_HEADER: [&str; 3] = ["Character", "Date", "Line"];

/// Column the analyzer reads.
pub const LINE_COLUMN: &str = "Line";

// =============================================================================
// Chart
// =============================================================================

pub const CHART_TITLE: &str = "Distribution of Looted Items by Rarity";
pub const CHART_X_LABEL: &str = "Item Name";
pub const CHART_Y_LABEL: &str = "Number of Loots";

/// Bar width in plot units (bars sit one unit apart).
pub const CHART_BAR_WIDTH: f64 = 0.9;

/// Rotation of the item-name tick labels, in degrees.
pub const CHART_TICK_LABEL_ROTATION_DEG: f32 = 45.0;

/// Initial viewer window size.
pub const CHART_WINDOW_SIZE: [f32; 2] = [1100.0, 700.0];

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Accepted `[logging] level` values.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Maximum size of config.toml in bytes.
pub const MAX_CONFIG_FILE_SIZE: u64 = 256 * 1024; // 256 KB
