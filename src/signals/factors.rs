//! The six scoring factors and the ordered fold that runs them.
//!
//! Order matters: the volume factor reads the running scores left by the
//! five factors before it, so [`FACTORS`] must be folded front to back.

use crate::indicators::volume::calculate_recent_volume;
use crate::models::indicators::IndicatorSet;
use crate::models::market::PriceSeries;
use tracing::trace;

pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_MIDLINE: f64 = 50.0;

/// Number of trailing points averaged for the volume confirmation.
pub const RECENT_VOLUME_WINDOW: usize = 5;
pub const VOLUME_SURGE_RATIO: f64 = 1.2;

pub const REASON_RSI_OVERSOLD: &str =
    "RSI indicates oversold condition (potential buy opportunity)";
pub const REASON_RSI_OVERBOUGHT: &str =
    "RSI indicates overbought condition (potential sell opportunity)";
pub const REASON_MACD_BULLISH: &str = "MACD shows bullish momentum";
pub const REASON_MACD_BEARISH: &str = "MACD shows bearish momentum";
pub const REASON_TREND_BULLISH: &str = "Price above key moving averages (bullish trend)";
pub const REASON_TREND_BEARISH: &str = "Price below key moving averages (bearish trend)";
pub const REASON_LONG_TERM_BULLISH: &str = "Price above 200-day SMA (long-term bullish)";
pub const REASON_LONG_TERM_BEARISH: &str = "Price below 200-day SMA (long-term bearish)";
pub const REASON_LOWER_BAND: &str = "Price near lower Bollinger Band (potential bounce)";
pub const REASON_UPPER_BAND: &str = "Price near upper Bollinger Band (potential pullback)";
pub const REASON_VOLUME_BULLISH: &str = "High volume confirms bullish move";
pub const REASON_VOLUME_BEARISH: &str = "High volume confirms bearish move";
pub const REASON_MIXED: &str = "Mixed signals - waiting for clearer trend";

/// Everything a factor may look at.
pub struct FactorContext<'a> {
    pub series: &'a PriceSeries,
    pub indicators: &'a IndicatorSet,
    pub price: f64,
}

impl<'a> FactorContext<'a> {
    pub fn new(series: &'a PriceSeries, indicators: &'a IndicatorSet) -> Self {
        Self {
            series,
            indicators,
            price: series.current_price(),
        }
    }
}

/// Running state threaded through the fold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreBoard {
    pub buy_score: f64,
    pub sell_score: f64,
    pub reasoning: Vec<String>,
}

impl ScoreBoard {
    pub fn apply(mut self, vote: FactorVote) -> Self {
        match vote {
            FactorVote::Bullish { points, reason } => {
                self.buy_score += points;
                if let Some(reason) = reason {
                    self.reasoning.push(reason.to_string());
                }
            }
            FactorVote::Bearish { points, reason } => {
                self.sell_score += points;
                if let Some(reason) = reason {
                    self.reasoning.push(reason.to_string());
                }
            }
            FactorVote::Neutral => {}
        }
        self
    }

    pub fn score_gap(&self) -> f64 {
        (self.buy_score - self.sell_score).abs()
    }
}

/// Outcome of one factor. A `None` reason moves the score silently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FactorVote {
    Bullish {
        points: f64,
        reason: Option<&'static str>,
    },
    Bearish {
        points: f64,
        reason: Option<&'static str>,
    },
    Neutral,
}

impl FactorVote {
    fn bullish(points: f64, reason: &'static str) -> Self {
        FactorVote::Bullish {
            points,
            reason: Some(reason),
        }
    }

    fn bearish(points: f64, reason: &'static str) -> Self {
        FactorVote::Bearish {
            points,
            reason: Some(reason),
        }
    }
}

pub type Factor = fn(&FactorContext<'_>, &ScoreBoard) -> FactorVote;

/// Evaluation order. Do not reorder.
pub const FACTORS: [(&str, Factor); 6] = [
    ("rsi", rsi_factor as Factor),
    ("macd", macd_factor as Factor),
    ("trend", trend_factor as Factor),
    ("long_term_trend", long_term_trend_factor as Factor),
    ("bollinger", bollinger_factor as Factor),
    ("volume", volume_factor as Factor),
];

/// Fold every factor over an empty score board.
pub fn evaluate_factors(ctx: &FactorContext<'_>) -> ScoreBoard {
    FACTORS
        .iter()
        .fold(ScoreBoard::default(), |board, (name, factor)| {
            let vote = factor(ctx, &board);
            trace!(factor = *name, ?vote, "factor evaluated");
            board.apply(vote)
        })
}

pub fn rsi_factor(ctx: &FactorContext<'_>, _board: &ScoreBoard) -> FactorVote {
    let rsi = ctx.indicators.rsi;
    if rsi < RSI_OVERSOLD {
        FactorVote::bullish(25.0, REASON_RSI_OVERSOLD)
    } else if rsi > RSI_OVERBOUGHT {
        FactorVote::bearish(25.0, REASON_RSI_OVERBOUGHT)
    } else if rsi < RSI_MIDLINE {
        FactorVote::Bullish {
            points: 10.0,
            reason: None,
        }
    } else {
        FactorVote::Bearish {
            points: 10.0,
            reason: None,
        }
    }
}

pub fn macd_factor(ctx: &FactorContext<'_>, _board: &ScoreBoard) -> FactorVote {
    let macd = &ctx.indicators.macd;
    if macd.histogram > 0.0 && macd.macd > macd.signal {
        FactorVote::bullish(20.0, REASON_MACD_BULLISH)
    } else if macd.histogram < 0.0 && macd.macd < macd.signal {
        FactorVote::bearish(20.0, REASON_MACD_BEARISH)
    } else {
        FactorVote::Neutral
    }
}

pub fn trend_factor(ctx: &FactorContext<'_>, _board: &ScoreBoard) -> FactorVote {
    let (price, sma20, sma50) = (ctx.price, ctx.indicators.sma20, ctx.indicators.sma50);
    if price > sma20 && sma20 > sma50 {
        FactorVote::bullish(15.0, REASON_TREND_BULLISH)
    } else if price < sma20 && sma20 < sma50 {
        FactorVote::bearish(15.0, REASON_TREND_BEARISH)
    } else {
        FactorVote::Neutral
    }
}

/// Has no neutral branch: a price sitting exactly on the SMA200 counts as bearish.
pub fn long_term_trend_factor(ctx: &FactorContext<'_>, _board: &ScoreBoard) -> FactorVote {
    if ctx.price > ctx.indicators.sma200 {
        FactorVote::bullish(10.0, REASON_LONG_TERM_BULLISH)
    } else {
        FactorVote::bearish(10.0, REASON_LONG_TERM_BEARISH)
    }
}

pub fn bollinger_factor(ctx: &FactorContext<'_>, _board: &ScoreBoard) -> FactorVote {
    let bands = &ctx.indicators.bollinger;
    if ctx.price < bands.lower {
        FactorVote::bullish(15.0, REASON_LOWER_BAND)
    } else if ctx.price > bands.upper {
        FactorVote::bearish(15.0, REASON_UPPER_BAND)
    } else {
        FactorVote::Neutral
    }
}

/// Sides with whichever score leads so far; ties go bearish.
pub fn volume_factor(ctx: &FactorContext<'_>, board: &ScoreBoard) -> FactorVote {
    let recent = calculate_recent_volume(ctx.series, RECENT_VOLUME_WINDOW);
    if recent > ctx.indicators.volume * VOLUME_SURGE_RATIO {
        if board.buy_score > board.sell_score {
            FactorVote::bullish(10.0, REASON_VOLUME_BULLISH)
        } else {
            FactorVote::bearish(10.0, REASON_VOLUME_BEARISH)
        }
    } else {
        FactorVote::Neutral
    }
}
