use std::io::{self, BufRead, Write};

use anyhow::Context;
use pwd_audit::{Analyzer, BreachStatus, EvaluationResult, generate_default};
use secrecy::{ExposeSecret, SecretString};
use tracing::metadata::LevelFilter;
use tracing_subscriber::EnvFilter;

const BAR_CELLS: u32 = 20;

fn setup_logger() -> anyhow::Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive(LevelFilter::WARN.into())
        .add_directive("pwd_audit=warn".parse()?);

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    Ok(())
}

fn strength_bar(score: u32) -> String {
    let filled = (score.min(100) * BAR_CELLS / 100) as usize;
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        ".".repeat(BAR_CELLS as usize - filled),
        score
    )
}

fn breach_line(status: BreachStatus) -> String {
    match status {
        BreachStatus::Breached(count) => format!("Breach check: found in {} breaches", count),
        BreachStatus::Clean => "Breach check: not found in known breaches".to_string(),
        BreachStatus::Unknown => "Breach check: breach check unavailable".to_string(),
    }
}

fn print_report(result: &EvaluationResult) {
    println!("Score: {}/100 ({})", result.score, result.strength());
    println!("{}", strength_bar(result.score));

    println!();
    println!("Breakdown:");
    for (name, earned) in result.breakdown.iter() {
        println!("  {:<10} {}", name, earned);
    }

    println!();
    println!("{}", breach_line(result.breach.status()));

    if result.feedback.is_empty() {
        println!("Your password meets all criteria.");
    } else {
        println!("Suggestions:");
        for line in &result.feedback {
            println!("  - {}", line);
        }
    }

    println!();
    println!("SHA-256: {}", result.digest);
}

fn main() -> anyhow::Result<()> {
    setup_logger()?;

    print!("Enter password: ");
    io::stdout().flush().context("failed to flush stdout")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read password")?;
    let input = line.trim_end_matches(['\r', '\n']);

    if input == ":generate" {
        println!("Generated password: {}", generate_default().expose_secret());
        return Ok(());
    }

    let password = SecretString::new(input.to_string().into());

    let result = Analyzer::from_env().analyze(&password);
    print_report(&result);

    Ok(())
}
