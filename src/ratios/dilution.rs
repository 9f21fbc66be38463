//! Equity dilution from priced funding rounds

use serde::{Deserialize, Serialize};

use crate::error::{ensure_denominator, ensure_non_negative, CalcResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DilutionInput {
    pub pre_money_valuation: f64,
    /// Shares outstanding before the round
    pub current_shares: f64,
    pub new_investment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DilutionResult {
    pub price_per_share: f64,
    pub new_shares: f64,
    pub total_shares: f64,
    pub post_money_valuation: f64,
    /// Existing holders' share after the round, in percent
    pub founder_ownership_percent: f64,
    /// New investor's share after the round, in percent
    pub investor_ownership_percent: f64,
}

pub fn calculate_dilution(input: &DilutionInput) -> CalcResult<DilutionResult> {
    let pre_money = ensure_denominator("pre_money_valuation", input.pre_money_valuation)?;
    let current_shares = ensure_denominator("current_shares", input.current_shares)?;
    let investment = ensure_non_negative("new_investment", input.new_investment)?;

    let price_per_share = pre_money / current_shares;
    let new_shares = investment / price_per_share;
    let total_shares = current_shares + new_shares;

    Ok(DilutionResult {
        price_per_share,
        new_shares,
        total_shares,
        post_money_valuation: pre_money + investment,
        founder_ownership_percent: current_shares / total_shares * 100.0,
        investor_ownership_percent: new_shares / total_shares * 100.0,
    })
}

/// One priced round in a sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingRound {
    pub name: String,
    pub pre_money_valuation: f64,
    pub new_investment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub name: String,
    pub round: DilutionResult,
    /// Original holders' share after this round, in percent
    pub founder_ownership_percent: f64,
}

/// Apply rounds in order, carrying the share count forward
///
/// Founders hold `founder_shares` before the first round; every later round
/// dilutes all existing holders pro rata.
pub fn dilute_rounds(founder_shares: f64, rounds: &[FundingRound]) -> CalcResult<Vec<RoundOutcome>> {
    ensure_denominator("founder_shares", founder_shares)?;

    let mut shares_outstanding = founder_shares;
    let mut outcomes = Vec::with_capacity(rounds.len());

    for round in rounds {
        let result = calculate_dilution(&DilutionInput {
            pre_money_valuation: round.pre_money_valuation,
            current_shares: shares_outstanding,
            new_investment: round.new_investment,
        })?;

        shares_outstanding = result.total_shares;
        outcomes.push(RoundOutcome {
            name: round.name.clone(),
            founder_ownership_percent: founder_shares / shares_outstanding * 100.0,
            round: result,
        });
    }

    Ok(outcomes)
}
