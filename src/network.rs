//! Network URL constants for the CryptoSage SDK.

/// Default market-data REST base URL (CoinGecko v3).
pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Default chat-completion endpoint (OpenRouter).
pub const DEFAULT_CHAT_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Default chat model.
pub const DEFAULT_CHAT_MODEL: &str = "deepseek/deepseek-r1:free";

/// Default site URL sent as `HTTP-Referer` on chat requests.
pub const DEFAULT_SITE_URL: &str = "http://localhost:5173";

/// Default site name sent as `X-Title` on chat requests.
pub const DEFAULT_SITE_NAME: &str = "CryptoSage";
