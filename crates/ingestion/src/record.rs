//! Raw bid records as exported from the `bids` sheet.
//!
//! Every column is held as an untyped JSON value. Typing happens in the
//! record filter so that malformed cells surface as data integrity errors
//! instead of being coerced by the deserializer.

use ipo_core::{Bid, Error, Result, ShoeSize};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row of the bid dataset, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawBidRecord {
    /// Action kind (e.g. "IPO bid").
    pub action: Value,
    /// Bid amount.
    pub amount: Value,
    /// Product type (colorway).
    pub product_type: Value,
    /// Shoe size.
    pub shoe_size: Value,
    /// Supply limit for the record's variant.
    pub ipo_supply: Value,
}

impl RawBidRecord {
    /// Build a well-formed record from typed values.
    pub fn new(action: &str, amount: f64, product_type: &str, shoe_size: f64, ipo_supply: i64) -> Self {
        Self {
            action: Value::from(action),
            amount: Value::from(amount),
            product_type: Value::from(product_type),
            shoe_size: Value::from(shoe_size),
            ipo_supply: Value::from(ipo_supply),
        }
    }

    /// Read the action column.
    pub fn action(&self, row: usize) -> Result<&str> {
        match &self.action {
            Value::String(s) => Ok(s.as_str()),
            Value::Null => Err(row_error(row, "action", "is null")),
            other => Err(row_error(row, "action", &format!("is not a string: {}", other))),
        }
    }

    /// Read the amount column. Must be a finite, positive number.
    pub fn amount(&self, row: usize) -> Result<f64> {
        let amount = match &self.amount {
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| row_error(row, "amount", &format!("is not representable: {}", n)))?,
            Value::Null => return Err(row_error(row, "amount", "is null")),
            other => return Err(row_error(row, "amount", &format!("is not numeric: {}", other))),
        };
        if !amount.is_finite() || amount <= 0.0 {
            return Err(row_error(row, "amount", &format!("must be positive, got {}", amount)));
        }
        Ok(amount)
    }

    /// Read the product type column.
    pub fn product_type(&self, row: usize) -> Result<&str> {
        match &self.product_type {
            Value::String(s) if !s.trim().is_empty() => Ok(s.as_str()),
            Value::String(_) => Err(row_error(row, "product_type", "is empty")),
            Value::Null => Err(row_error(row, "product_type", "is null")),
            other => Err(row_error(row, "product_type", &format!("is not a string: {}", other))),
        }
    }

    /// Read the shoe size column. Numbers and numeric strings are accepted.
    pub fn shoe_size(&self, row: usize) -> Result<ShoeSize> {
        let size = match &self.shoe_size {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            Value::Null => return Err(row_error(row, "shoe_size", "is null")),
            _ => None,
        };
        match size {
            Some(v) if v.is_finite() && v > 0.0 => Ok(ShoeSize::new(v)),
            _ => Err(row_error(
                row,
                "shoe_size",
                &format!("is not a valid size: {}", self.shoe_size),
            )),
        }
    }

    /// Read the supply column. Must be integral; sign is checked downstream.
    pub fn ipo_supply(&self, row: usize) -> Result<i64> {
        match &self.ipo_supply {
            Value::Number(n) => {
                if let Some(v) = n.as_i64() {
                    return Ok(v);
                }
                // Spreadsheet exports often write integers as 3.0
                match n.as_f64() {
                    Some(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => Ok(v as i64),
                    _ => Err(row_error(row, "ipo_supply", &format!("is not an integer: {}", n))),
                }
            }
            Value::Null => Err(row_error(row, "ipo_supply", "is null")),
            other => Err(row_error(row, "ipo_supply", &format!("is not numeric: {}", other))),
        }
    }

    /// Validate every column and produce a typed bid.
    pub fn to_bid(&self, row: usize) -> Result<Bid> {
        Ok(Bid {
            action: self.action(row)?.to_string(),
            amount: self.amount(row)?,
            product_type: self.product_type(row)?.to_string(),
            shoe_size: self.shoe_size(row)?,
            ipo_supply: self.ipo_supply(row)?,
        })
    }
}

fn row_error(row: usize, column: &str, problem: &str) -> Error {
    Error::data_integrity(format!("row {}: {} {}", row, column, problem))
}
