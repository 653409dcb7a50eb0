//! In-memory account session: open an account and apply operations

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use simledger_core::{Account, Ledger, Timezone};
use std::sync::Arc;

use super::Operation;

/// Account details taken from the command line
pub struct AccountArgs<'a> {
    pub account_number: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub timezone: Option<Timezone>,
    pub balance: Decimal,
}

/// Outcome of one applied operation
struct Step {
    operation: Operation,
    code: String,
    accepted: bool,
    balance: Decimal,
}

/// Run the session and print every issued code with the running balance
pub fn run(ledger: Ledger, args: AccountArgs<'_>, ops: &[Operation], json: bool) -> Result<()> {
    let ledger = Arc::new(ledger);
    let mut account = Account::new(
        Arc::clone(&ledger),
        args.account_number,
        args.first_name,
        args.last_name,
        args.timezone,
        args.balance,
    )
    .context("Failed to open account")?;

    let mut steps = Vec::with_capacity(ops.len());
    for op in ops {
        steps.push(apply(&mut account, *op)?);
    }

    if json {
        print_json(&account, &ledger, &steps)?;
    } else {
        print_text(&account, &ledger, &steps);
    }
    Ok(())
}

fn apply(account: &mut Account, operation: Operation) -> Result<Step> {
    let (code, accepted) = match operation {
        Operation::Deposit(amount) => (account.deposit(amount)?, true),
        Operation::Withdraw(amount) => {
            let outcome = account.withdraw(amount)?;
            let accepted = outcome.is_accepted();
            (outcome.into_code(), accepted)
        }
        Operation::Interest => (account.pay_interest()?, true),
    };
    Ok(Step {
        operation,
        code,
        accepted,
        balance: account.balance(),
    })
}

fn print_text(account: &Account, ledger: &Ledger, steps: &[Step]) {
    println!("🏦 {}", account);
    println!("   Interest rate: {}%", ledger.interest_rate());
    for step in steps {
        let marker = if step.accepted { "✅" } else { "❌" };
        println!(
            "{} {:<16} {:<32} balance {}",
            marker,
            step.operation.to_string(),
            step.code,
            step.balance
        );
    }
    println!("   Final balance: {}", account.balance());
}

fn print_json(account: &Account, ledger: &Ledger, steps: &[Step]) -> Result<()> {
    let steps: Vec<_> = steps
        .iter()
        .map(|step| {
            serde_json::json!({
                "operation": step.operation.to_string(),
                "code": step.code,
                "accepted": step.accepted,
                "balance": step.balance.to_string(),
            })
        })
        .collect();

    let report = serde_json::json!({
        "account_number": account.account_number(),
        "name": account.full_name(),
        "timezone": account.timezone(),
        "interest_rate": ledger.interest_rate().to_string(),
        "steps": steps,
        "balance": account.balance().to_string(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
