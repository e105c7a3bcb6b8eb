//! Plain-text rendering of the tracker's views for log output.

use lib_core::model::MarketMetrics;
use lib_core::{sort_token_list, TokenRecord};
use lib_market::holders::{HolderPage, HolderStats};
use lib_market::PortfolioSummary;
use lib_utils::{format_compact, short_address};

fn format_price(price: f64) -> String {
    if price > 0.0 && price < 0.01 {
        format!("{:.8}", price)
    } else {
        format!("{:.4}", price)
    }
}

/// Ranked token table, highest `sort` value first.
pub fn render_table(records: &[TokenRecord], sort: &str, top: usize) -> Vec<String> {
    let sorted = sort_token_list(records, sort);

    let mut lines = vec![format!(
        "{:>3}  {:<10} {:<13} {:>14} {:>10} {:>10} {:>10} {:>7} {:>8}",
        "#", "TICKER", "MINT", "PRICE", "MCAP", "VOL 24H", "LIQ", "TXNS", "HOLDERS"
    )];

    lines.extend(sorted.iter().take(top).enumerate().map(|(i, r)| {
        format!(
            "{:>3}{} {:<10} {:<13} {:>14} {:>10} {:>10} {:>10} {:>7} {:>8}",
            i + 1,
            if r.watchlist { "*" } else { " " },
            r.ticker,
            short_address(&r.mint),
            format_price(r.price),
            format_compact(r.tokenomics.market_cap),
            format_compact(r.tokenomics.volume.day),
            format_compact(r.tokenomics.liquidity),
            r.total_txns(),
            r.tokenomics.holder,
        )
    }));

    lines
}

pub fn render_metrics(metrics: &MarketMetrics) -> Vec<String> {
    vec![
        format!(
            "Lifetime volume ${} | launches {} | active {}",
            format_compact(metrics.lifetime_volume),
            metrics.coin_launches,
            metrics.active_coins
        ),
        format!(
            "Market cap ${} (creator ${}, launch ${})",
            format_compact(metrics.total_market_cap.total),
            format_compact(metrics.total_market_cap.creator_coins),
            format_compact(metrics.total_market_cap.launch_coin)
        ),
        format!(
            "24h volume ${} | 24h txns {} | liquidity ${}",
            format_compact(metrics.volume_24h.total),
            format_compact(metrics.transactions_24h.total),
            format_compact(metrics.total_liquidity.total)
        ),
    ]
}

pub fn render_holders(page: &HolderPage, stats: &HolderStats) -> Vec<String> {
    let mut lines = vec![format!(
        "Holders {} | top 10 hold {:.2}%{} | whales (>1%) {}",
        stats.total_holders,
        stats.top10_percentage,
        if stats.is_concentrated() { " (concentrated)" } else { "" },
        stats.holders_above_1_percent
    )];

    lines.extend(page.holders().iter().enumerate().map(|(i, h)| {
        format!(
            "{:>3}. {:<13} {:>14} {:>7.2}%{}",
            i + 1,
            short_address(&h.owner_address),
            h.balance_formatted,
            h.share(),
            if h.is_contract { " [contract]" } else { "" }
        )
    }));

    lines
}

pub fn render_portfolio(summary: &PortfolioSummary) -> Vec<String> {
    let mut lines = vec![format!(
        "Tracked ${} | other ${} | wallet ${}",
        format_compact(summary.tracked_total),
        format_compact(summary.untracked_total()),
        format_compact(summary.wallet_total)
    )];

    lines.extend(summary.holdings.iter().map(|asset| {
        let symbol = asset
            .token_info
            .as_ref()
            .and_then(|t| t.symbol.clone())
            .unwrap_or_default();
        format!(
            "  {:<10} {:<13} ${}",
            symbol,
            short_address(&asset.id),
            format_compact(asset.total_price())
        )
    }));

    lines
}
