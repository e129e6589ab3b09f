//! Process-wide defaults shared by the library and the command line tools.

/// Currency balances are normalized into unless a rate table says otherwise.
pub const DEFAULT_BASE_CURRENCY: &str = "USD";

/// Index file naming every transaction log inside a corpus folder.
pub const INDEX_FILE: &str = "transactions.csv";

/// Default file name for the date-indexed exchange rate snapshot.
pub const RATES_FILE: &str = "currency_rates.json";

/// Roster file written next to the balance reports.
pub const BANKS_FILE: &str = "banks.csv";

/// Suffix of the per-bank daily balance report.
pub const DAILY_BALANCES_SUFFIX: &str = "_daily_balances.csv";

/// Suffix of the per-bank category balance report.
pub const CATEGORIES_SUFFIX: &str = "_categories.csv";

/// Placeholder used when a bank is created without a display name.
pub const UNKNOWN_BANK_NAME: &str = "UNKNOWN";
