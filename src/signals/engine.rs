//! Main signal engine: folds the factors and post-processes the scores.

use crate::models::indicators::IndicatorSet;
use crate::models::market::PriceSeries;
use crate::models::signal::TradingSignal;
use crate::signals::factors::{evaluate_factors, FactorContext, REASON_MIXED};
use crate::signals::scoring;
use tracing::debug;

pub struct SignalEngine;

impl SignalEngine {
    /// Generate a trading signal. Pure and total; if no factor left a reason,
    /// the reasoning holds a single "mixed signals" entry.
    pub fn generate(series: &PriceSeries, indicators: &IndicatorSet) -> TradingSignal {
        let ctx = FactorContext::new(series, indicators);
        let board = evaluate_factors(&ctx);

        let raw_strength = scoring::raw_strength(board.buy_score, board.sell_score);
        let classification = scoring::classify(board.buy_score, board.sell_score);
        let probability = scoring::probability(board.buy_score, board.sell_score);
        let confidence = scoring::confidence(raw_strength, board.reasoning.len());
        let price_target = scoring::price_target(ctx.price, raw_strength);

        let mut reasoning = board.reasoning;
        if reasoning.is_empty() {
            reasoning.push(REASON_MIXED.to_string());
        }

        debug!(
            buy_score = board.buy_score,
            sell_score = board.sell_score,
            classification = %classification,
            "SignalEngine: generated signal"
        );

        TradingSignal {
            classification,
            strength: scoring::strength(raw_strength),
            probability,
            confidence,
            reasoning,
            price_target: Some(price_target),
        }
    }
}
