//! Rates command - show the static currency tables

use anyhow::Result;
use colored::Colorize;
use remit_core::domain::exchange_rate;
use remit_core::{Country, Currency};
use serde_json::json;

use crate::output::create_table;

pub fn run(json_output: bool) -> Result<()> {
    if json_output {
        let countries: Vec<_> = Country::ALL
            .iter()
            .map(|c| {
                json!({
                    "country": c,
                    "currency": c.currency(),
                    "transaction_fee": c.transaction_fee(),
                })
            })
            .collect();
        let mut rates = serde_json::Map::new();
        for from in Currency::ALL {
            let row: serde_json::Map<String, serde_json::Value> = Currency::ALL
                .iter()
                .filter_map(|to| {
                    exchange_rate(from, *to).map(|r| (to.code().to_string(), json!(r)))
                })
                .collect();
            rates.insert(from.code().to_string(), serde_json::Value::Object(row));
        }
        let out = json!({"countries": countries, "exchange_rates": rates});
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", "Countries".bold());
    let mut table = create_table();
    table.set_header(vec!["Country", "Currency", "Transaction Fee"]);
    for country in Country::ALL {
        let currency = country.currency();
        table.add_row(vec![
            country.to_string(),
            currency.to_string(),
            currency.format_amount(country.transaction_fee()),
        ]);
    }
    println!("{}", table);
    println!();

    println!("{}", "Exchange Rates (1 unit of row currency)".bold());
    let mut table = create_table();
    let mut header = vec!["From".to_string()];
    header.extend(Currency::ALL.iter().map(|c| c.to_string()));
    table.set_header(header);
    for from in Currency::ALL {
        let mut row = vec![from.to_string()];
        row.extend(Currency::ALL.iter().map(|to| {
            exchange_rate(from, *to)
                .map(|r| r.to_string())
                .unwrap_or_else(|| "-".to_string())
        }));
        table.add_row(row);
    }
    println!("{}", table);

    Ok(())
}
