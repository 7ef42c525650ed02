//! Interactive console loop: `show`, `update`, `exit`.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use forex_types::{ForexStore, RateSource};

use crate::service::ForexService;

const PROMPT: &str =
    "Enter 'show' to view all records, 'update' to refresh rates, or 'exit' to quit: ";
const USAGE: &str = "Unknown command. Please enter 'show', 'update', or 'exit'.";

/// Runs the interactive loop until `exit` or end of input.
///
/// Commands are matched case-insensitively. Every command dispatches
/// synchronously into the shared service; a failed refresh or read prints a
/// diagnostic and the loop keeps prompting.
pub async fn run<P: RateSource, S: ForexStore>(
    service: Arc<ForexService<P, S>>,
) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(PROMPT.as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            // End of input behaves like `exit`.
            break;
        };

        match line.trim().to_lowercase().as_str() {
            "show" => match service.entries().await {
                Ok(entries) if entries.is_empty() => println!("No records stored yet."),
                Ok(entries) => {
                    println!("All records in forex table:");
                    for entry in entries {
                        println!("{entry}");
                    }
                }
                Err(e) => println!("Cannot read records: {e}"),
            },
            "update" => {
                println!("Fetching latest rates...");
                match service.refresh().await {
                    Ok(report) => println!("Rates updated: {report}"),
                    Err(e) => println!("Update failed: {e}"),
                }
            }
            "exit" => {
                println!("Exiting...");
                break;
            }
            "" => {}
            _ => println!("{USAGE}"),
        }
    }

    Ok(())
}
