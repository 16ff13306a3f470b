use chrono::NaiveDate;
use serde::Serialize;

/// A long position that has been entered but not yet exited.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenTrade {
    pub entry_index: usize,
    pub entry_date: NaiveDate,
    pub entry_price: f64,
}

impl OpenTrade {
    pub fn new(entry_index: usize, entry_date: NaiveDate, entry_price: f64) -> Self {
        Self {
            entry_index,
            entry_date,
            entry_price,
        }
    }

    /// Exit the position, consuming the open trade.
    pub fn close(self, exit_index: usize, exit_date: NaiveDate, exit_price: f64) -> ClosedTrade {
        let profit = exit_price - self.entry_price;
        let profit_percentage = if self.entry_price != 0.0 {
            profit / self.entry_price * 100.0
        } else {
            0.0
        };
        ClosedTrade {
            entry_index: self.entry_index,
            entry_date: self.entry_date,
            entry_price: self.entry_price,
            exit_index,
            exit_date,
            exit_price,
            profit,
            profit_percentage,
            trade_length_days: (exit_date - self.entry_date).num_days(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClosedTrade {
    pub entry_index: usize,
    pub entry_date: NaiveDate,
    pub entry_price: f64,
    pub exit_index: usize,
    pub exit_date: NaiveDate,
    pub exit_price: f64,
    pub profit: f64,
    pub profit_percentage: f64,
    pub trade_length_days: i64,
}

impl ClosedTrade {
    pub fn is_win(&self) -> bool {
        self.profit > 0.0
    }

    pub fn is_loss(&self) -> bool {
        self.profit < 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Trade {
    Open(OpenTrade),
    Closed(ClosedTrade),
}

impl Trade {
    pub fn is_open(&self) -> bool {
        matches!(self, Trade::Open(_))
    }

    pub fn entry_index(&self) -> usize {
        match self {
            Trade::Open(t) => t.entry_index,
            Trade::Closed(t) => t.entry_index,
        }
    }

    pub fn entry_date(&self) -> NaiveDate {
        match self {
            Trade::Open(t) => t.entry_date,
            Trade::Closed(t) => t.entry_date,
        }
    }

    pub fn entry_price(&self) -> f64 {
        match self {
            Trade::Open(t) => t.entry_price,
            Trade::Closed(t) => t.entry_price,
        }
    }

    pub fn as_closed(&self) -> Option<&ClosedTrade> {
        match self {
            Trade::Open(_) => None,
            Trade::Closed(t) => Some(t),
        }
    }

    pub fn exit_index(&self) -> Option<usize> {
        self.as_closed().map(|t| t.exit_index)
    }

    pub fn exit_date(&self) -> Option<NaiveDate> {
        self.as_closed().map(|t| t.exit_date)
    }

    pub fn exit_price(&self) -> Option<f64> {
        self.as_closed().map(|t| t.exit_price)
    }

    pub fn profit(&self) -> Option<f64> {
        self.as_closed().map(|t| t.profit)
    }

    pub fn profit_percentage(&self) -> Option<f64> {
        self.as_closed().map(|t| t.profit_percentage)
    }

    pub fn trade_length_days(&self) -> Option<i64> {
        self.as_closed().map(|t| t.trade_length_days)
    }
}
