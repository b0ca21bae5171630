mod position;
mod valuation;
