//! Confirmation code parsing

use anyhow::{Context, Result};
use simledger_core::{Confirmation, Timezone};

/// Parse a code and print its fields
pub fn run(code: &str, timezone: Option<&Timezone>, json: bool) -> Result<()> {
    let conf = simledger_core::parse(code, timezone)
        .with_context(|| format!("Cannot parse confirmation code {:?}", code))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&to_json(&conf))?);
    } else {
        let kind = conf.tag().map_or("unknown", |tag| tag.as_str());
        println!("🧾 Confirmation {}", code);
        println!("   Account:     {}", conf.account_number);
        println!("   Transaction: {} ({})", conf.transaction_code, kind);
        println!("   ID:          {}", conf.transaction_id);
        println!("   Time (UTC):  {}", conf.time_utc_iso());
        println!("   Time:        {}", conf.time);
    }
    Ok(())
}

fn to_json(conf: &Confirmation) -> serde_json::Value {
    serde_json::json!({
        "account_number": conf.account_number,
        "transaction_code": conf.transaction_code,
        "transaction_id": conf.transaction_id,
        "time_utc": conf.time_utc_iso(),
        "time": conf.time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_json() {
        let tz = Timezone::new("ICT", 7, 0).unwrap();
        let conf = simledger_core::parse("W-A100-20260118093000-105", Some(&tz)).unwrap();
        let value = to_json(&conf);

        assert_eq!(value["account_number"], "A100");
        assert_eq!(value["transaction_code"], "W");
        assert_eq!(value["transaction_id"], "105");
        assert_eq!(value["time_utc"], "2026-01-18T09:30:00");
        assert_eq!(value["time"], "2026-01-18 16:30:00 (ICT)");
    }

    #[test]
    fn test_run_rejects_malformed_code() {
        assert!(run("W-A100-2026011809300-105", None, true).is_err());
    }
}
