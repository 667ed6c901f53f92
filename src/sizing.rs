// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::LedgerError;

/// Quote value of one pip on a standard lot.
pub const PIP_VALUE_PER_LOT: Decimal = Decimal::TEN;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionSize {
    pub balance: Decimal,
    pub risk_percent: Decimal,
    pub stop_loss_pips: Decimal,
    pub risk_amount: Decimal,
    /// Lots.
    pub position_size: Decimal,
}

pub fn position_size(
    balance: Decimal,
    risk_percent: Decimal,
    stop_loss_pips: Decimal,
) -> Result<PositionSize, LedgerError> {
    if stop_loss_pips <= Decimal::ZERO {
        return Err(LedgerError::Validation(format!(
            "stop loss must be greater than 0 pips, got {}",
            stop_loss_pips
        )));
    }
    if risk_percent < Decimal::ZERO {
        return Err(LedgerError::Validation(format!(
            "risk percent cannot be negative, got {}",
            risk_percent
        )));
    }
    let out_of_range = || LedgerError::Validation("position size is out of range".to_string());
    let risk_amount = balance
        .checked_mul(risk_percent)
        .and_then(|r| r.checked_div(Decimal::ONE_HUNDRED))
        .ok_or_else(out_of_range)?;
    let position_size = stop_loss_pips
        .checked_mul(PIP_VALUE_PER_LOT)
        .and_then(|per_lot| risk_amount.checked_div(per_lot))
        .ok_or_else(out_of_range)?;
    Ok(PositionSize {
        balance,
        risk_percent,
        stop_loss_pips,
        risk_amount,
        position_size,
    })
}
