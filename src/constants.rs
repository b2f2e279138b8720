/// Seats assumed per coach when the server reports a raw head count
pub const DEFAULT_CAPACITY: f64 = 20.0;

/// Occupancy below this percentage is shown as empty (green)
pub const EMPTY_THRESHOLD: u8 = 30;

/// Occupancy below this percentage is shown as moderate (yellow); anything above is crowded
pub const MODERATE_THRESHOLD: u8 = 70;

/// Percentages assigned to textual coach statuses
pub const STATUS_EMPTY_PERCENT: u8 = 5;
pub const STATUS_MODERATE_PERCENT: u8 = 45;
pub const STATUS_CROWDED_PERCENT: u8 = 85;

/// Auto-refresh period used when the interval selector has no usable value
pub const DEFAULT_REFRESH_INTERVAL_MS: u32 = 60_000;

/// Choices offered by the interval selector as (milliseconds, label)
pub const REFRESH_INTERVAL_CHOICES: [(u32, &str); 5] = [
    (15_000, "15 seconds"),
    (30_000, "30 seconds"),
    (60_000, "1 minute"),
    (120_000, "2 minutes"),
    (300_000, "5 minutes"),
];

// Persisted key-value entries
pub const LAST_SOURCE_KEY: &str = "lastSource";
pub const LAST_DESTINATION_KEY: &str = "lastDestination";
pub const LAST_TRAIN_ID_KEY: &str = "lastTrainId";

pub const TRAINS_PATH: &str = "/trains";
pub const CACHE_BUSTER_PARAM: &str = "ts";

// User-facing messages
pub const MISSING_ENDPOINTS_MESSAGE: &str = "Please enter both source and destination.";
pub const NO_TRAINS_MESSAGE: &str = "No trains found";
pub const TRAINS_FAILED_MESSAGE: &str = "Failed to load train data.";
pub const TRAIN_NOT_FOUND_MESSAGE: &str = "Train not found";
pub const NO_COACH_DATA_MESSAGE: &str = "No coach data available.";
pub const STATUS_FAILED_MESSAGE: &str = "Failed to load train status.";
