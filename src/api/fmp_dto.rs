use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize, Getters, new)]
#[serde(rename_all = "camelCase")]
pub struct FmpQuoteDto {
    symbol: String,
    #[serde(default)]
    name: Option<String>,
    price: Decimal,
    #[serde(default)]
    change: Option<Decimal>,
    #[serde(default)]
    change_percentage: Option<Decimal>,
    #[serde(default)]
    previous_close: Option<Decimal>,
    #[serde(default)]
    exchange: Option<String>,
    #[serde(default)]
    timestamp: Option<i64>,
}
