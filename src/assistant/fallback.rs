//! Canned answers used when the completion service is unavailable.

const TOPICS: &[(&[&str], &str)] = &[
    (
        &["bitcoin", "btc"],
        "Bitcoin (BTC) is the first and most well-known cryptocurrency. It was created in 2009 by an unknown person or group using the pseudonym Satoshi Nakamoto. Bitcoin operates on a decentralized network using blockchain technology. As a store of value, Bitcoin is often compared to digital gold and is considered a hedge against inflation.",
    ),
    (
        &["ethereum", "eth"],
        "Ethereum (ETH) is a decentralized platform that enables the creation of smart contracts and decentralized applications (DApps). It was proposed in 2013 and launched in 2015 by Vitalik Buterin. Ethereum's transition to proof-of-stake has improved its sustainability and reduced energy consumption. The platform hosts thousands of tokens and DeFi applications.",
    ),
    (
        &["portfolio", "invest"],
        "When building a cryptocurrency portfolio, it's important to diversify your investments across different assets, understand your risk tolerance, and maintain a long-term perspective. Consider factors like market capitalization, technology, and team credibility. A balanced portfolio might include 40% large-cap coins (BTC, ETH), 30% mid-cap projects, 20% DeFi tokens, and 10% emerging technologies.",
    ),
    (
        &["strategy", "trade"],
        "Cryptocurrency trading strategies should be based on thorough research, risk management, and a clear investment thesis. Common approaches include long-term holding (HODL), dollar-cost averaging, and technical analysis-based trading. Always set stop-losses, take profits at predetermined levels, and never invest more than you can afford to lose.",
    ),
    (
        &["risk", "safe"],
        "Cryptocurrency investments carry significant risks. Always invest only what you can afford to lose, use secure wallets, enable two-factor authentication, and be cautious of scams and fraudulent schemes. Diversification across different assets and regular portfolio rebalancing can help manage risk. Consider keeping a portion of your portfolio in stablecoins as a safety net during market volatility.",
    ),
    (
        &["solana", "sol"],
        "Solana (SOL) is a high-performance blockchain platform designed for decentralized applications and marketplaces. It uses a unique proof-of-history consensus mechanism combined with proof-of-stake. Solana offers fast transaction speeds and low fees, making it attractive for DeFi and NFT applications. However, it has experienced some network outages in the past.",
    ),
    (
        &["dogecoin", "doge"],
        "Dogecoin (DOGE) is a cryptocurrency that started as a joke based on the popular Doge meme. Despite its origins, it has gained significant popularity and market value. Dogecoin uses a proof-of-work consensus mechanism similar to Bitcoin but with faster block times. It's known for its active community and celebrity endorsements, particularly from Elon Musk.",
    ),
];

const GENERIC: &str = "I'm here to help you with cryptocurrency-related questions. Could you please be more specific about what you'd like to know? I can provide information about specific cryptocurrencies, investment strategies, risk management, or market trends.";

/// Answer from the first topic whose keyword appears in `input` (case-insensitive).
///
/// Matching is plain substring search, so "something" matches "eth".
pub fn fallback_response(input: &str) -> &'static str {
    let lower = input.to_lowercase();
    TOPICS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, answer)| *answer)
        .unwrap_or(GENERIC)
}

/// Reply used when a chart analysis cannot be produced.
pub fn analysis_unavailable(coin: &str) -> String {
    format!(
        "I'm sorry, I couldn't analyze the {} chart data at this time. Please try again later.",
        coin
    )
}
