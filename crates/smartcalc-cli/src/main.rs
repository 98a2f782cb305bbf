//! smartcalc CLI - expression, loan and deposit calculator

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, LevelFilter};
use serde_json::json;
use smartcalc::prelude::*;
use smartcalc::{calculate_with_window, ExpressionReport};
use std::io::{self, Write};

#[derive(Parser)]
#[command(name = "smartcalc")]
#[command(author, version, about = "Expression, loan and deposit calculator")]
struct Cli {
    /// Print debug logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an expression, optionally with `| x = <value>`
    #[command(alias = "e")]
    Eval {
        /// Expression text, e.g. "sin(x) * cos(x) | x = 45"
        expression: String,

        /// Print the sampled graph points
        #[arg(short, long)]
        graph: bool,

        /// Also print the postfix form
        #[arg(short, long)]
        postfix: bool,

        /// Graph half width around the bound value
        #[arg(long, default_value_t = 5.0)]
        half_width: f64,

        /// Graph sampling step
        #[arg(long, default_value_t = 0.2)]
        step: f64,
    },

    /// Loan repayment summary
    Credit {
        /// Loan amount
        #[arg(short, long)]
        amount: f64,

        /// Term in months
        #[arg(short, long)]
        term: i64,

        /// Annual interest rate in percent
        #[arg(short, long)]
        rate: f64,

        /// Use differential instead of annuity repayment
        #[arg(short, long)]
        differential: bool,

        /// Print the month-by-month schedule
        #[arg(short, long)]
        schedule: bool,
    },

    /// Deposit growth summary
    Deposit {
        /// Initial amount
        #[arg(short, long)]
        amount: f64,

        /// Term in months
        #[arg(short, long)]
        term: i64,

        /// Annual interest rate in percent
        #[arg(short, long)]
        rate: f64,

        /// Tax rate on interest in percent
        #[arg(long, default_value_t = 0.0)]
        tax: f64,

        /// Months between interest credits
        #[arg(short, long, default_value_t = 1)]
        frequency: i64,

        /// Add interest to the balance every month
        #[arg(short, long)]
        compound: bool,

        /// Amount added at the start of every month
        #[arg(long, default_value_t = 0.0)]
        deposit: f64,

        /// Amount withdrawn at the start of every month
        #[arg(long, default_value_t = 0.0)]
        withdrawal: f64,

        /// Print the month-by-month ledger
        #[arg(short, long)]
        ledger: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .init();

    match cli.command {
        Commands::Eval {
            expression,
            graph,
            postfix,
            half_width,
            step,
        } => {
            let window = GraphWindow { half_width, step };
            if !(window.half_width > 0.0 && window.step > 0.0) {
                bail!("--half-width and --step must be positive");
            }
            eval(&expression, &window, graph, postfix, cli.json)
        }
        Commands::Credit {
            amount,
            term,
            rate,
            differential,
            schedule,
        } => credit(
            &CreditInputs {
                amount,
                term_months: term,
                annual_rate_percent: rate,
                repayment: RepaymentType::from(!differential),
            },
            schedule,
            cli.json,
        ),
        Commands::Deposit {
            amount,
            term,
            rate,
            tax,
            frequency,
            compound,
            deposit: monthly_deposit,
            withdrawal,
            ledger,
        } => deposit(
            &DepositInputs {
                initial_amount: amount,
                term_months: term,
                annual_rate_percent: rate,
                tax_rate_percent: tax,
                crediting_frequency_months: frequency,
                is_compounded: compound,
                monthly_deposit,
                monthly_withdrawal: withdrawal,
            },
            ledger,
            cli.json,
        ),
    }
}

fn eval(
    expression: &str,
    window: &GraphWindow,
    show_graph: bool,
    show_postfix: bool,
    as_json: bool,
) -> Result<()> {
    let calc = calculate_with_window(expression, window);
    let postfix = calc.postfix_text();
    debug!("'{}' -> postfix '{}'", expression, postfix);
    let report = ExpressionReport::from(calc);

    if as_json {
        let mut value = serde_json::to_value(&report).context("Failed to serialize result")?;
        if show_postfix {
            value["postfix"] = json!(postfix);
        }
        return print_json(&value);
    }

    println!("{}", report.result);
    if show_postfix {
        println!("postfix: {}", postfix.trim_end());
    }
    if show_graph {
        let mut out = io::stdout().lock();
        for (x, y) in report.xs.iter().zip(&report.ys) {
            writeln!(out, "{:.4}\t{:.6}", x, y).context("Failed to write to stdout")?;
        }
    }
    Ok(())
}

fn credit(inputs: &CreditInputs, show_schedule: bool, as_json: bool) -> Result<()> {
    let calc = CreditCalculator::new(inputs).context("Invalid loan parameters")?;
    let summary = calc.summary().context("Loan calculation failed")?;
    let schedule = if show_schedule {
        Some(calc.schedule().context("Schedule calculation failed")?)
    } else {
        None
    };

    if as_json {
        return print_json(&json!({
            "inputs": inputs,
            "summary": summary,
            "schedule": schedule,
        }));
    }

    println!("Monthly payment: {}", summary.monthly_payment);
    println!("Total repayment: {}", summary.total_repayment);
    println!("Overpayment:     {}", summary.overpayment);

    if let Some(rows) = schedule {
        println!();
        println!("month\tpayment\tprincipal\tinterest\tremaining");
        for row in rows {
            println!(
                "{}\t{}\t{}\t{}\t{}",
                row.month, row.payment, row.principal, row.interest, row.remaining
            );
        }
    }
    Ok(())
}

fn deposit(inputs: &DepositInputs, show_ledger: bool, as_json: bool) -> Result<()> {
    let calc = DepositCalculator::new(inputs).context("Invalid deposit parameters")?;
    let summary = calc.summary().context("Deposit calculation failed")?;
    let ledger = if show_ledger {
        Some(calc.ledger().context("Ledger calculation failed")?)
    } else {
        None
    };

    if as_json {
        return print_json(&json!({
            "inputs": inputs,
            "summary": summary,
            "ledger": ledger,
        }));
    }

    println!("Interest paid out: {}", summary.total_interest);
    println!("Tax:               {}", summary.total_tax);
    println!("Final balance:     {}", summary.final_balance);

    if let Some(rows) = ledger {
        println!();
        println!("month\tinterest\ttax\tcredited\tbalance");
        for row in rows {
            println!(
                "{}\t{}\t{}\t{}\t{}",
                row.month, row.interest, row.tax, row.credited, row.balance
            );
        }
    }
    Ok(())
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
    io::stdout()
        .write_all(text.as_bytes())
        .and_then(|_| io::stdout().write_all(b"\n"))
        .context("Failed to write to stdout")
}
