//! External collaborators: market data, notification delivery, command updates.

pub mod coingecko;
pub mod market_data;
pub mod notifier;
pub mod retry;
pub mod telegram;

pub use coingecko::CoinGeckoClient;
pub use market_data::{MarketAsset, MarketDataError, MarketDataProvider};
pub use notifier::{NotificationSink, NotifyError};
pub use retry::RetryPolicy;
pub use telegram::TelegramClient;
