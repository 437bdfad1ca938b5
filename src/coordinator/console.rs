//! Line-oriented operator console
//!
//! `1 <name> <amount>` bids, `2` queries, `0` exits. Anything else re-prompts.
//! Messages shown here stay generic; details go to the operational log.

use crate::common::wire::{AuctionStatus, QueryResponse};
use crate::common::Result;
use crate::coordinator::Coordinator;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub const USAGE_BID: &str = "Invalid input. Usage: 1 <name> <amount>";
pub const INVALID_AMOUNT: &str = "Invalid amount. Please enter a valid integer.";
pub const INVALID_COMMAND: &str = "Invalid command. Try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Bid { name: String, amount: i64 },
    Query,
    Exit,
    /// Not a command; carries the message to show
    Invalid(&'static str),
}

pub fn parse_command(line: &str) -> Command {
    let args: Vec<&str> = line.split_whitespace().collect();

    match args.first().copied() {
        Some("1") => {
            let [_, name, amount] = args[..] else {
                return Command::Invalid(USAGE_BID);
            };
            match amount.parse::<i64>() {
                Ok(amount) => Command::Bid {
                    name: name.to_string(),
                    amount,
                },
                Err(_) => Command::Invalid(INVALID_AMOUNT),
            }
        }
        Some("2") => Command::Query,
        Some("0") => Command::Exit,
        _ => Command::Invalid(INVALID_COMMAND),
    }
}

/// One-line human summary of a replica's answer
pub fn describe(status: &QueryResponse) -> String {
    let leader = if status.highest_bidder.is_empty() {
        "no bids yet".to_string()
    } else {
        format!("highest bid {} by {}", status.highest_bid, status.highest_bidder)
    };

    match status.status {
        AuctionStatus::Ongoing => format!(
            "Auction ongoing: {}, {}s remaining",
            leader,
            status.time_remaining.max(0)
        ),
        AuctionStatus::Ended => match status.winner.as_deref() {
            Some(winner) if !winner.is_empty() => format!(
                "Auction ended: winner {} with {}",
                winner, status.highest_bid
            ),
            _ => "Auction ended with no winner".to_string(),
        },
    }
}

fn prompt(output: &mut impl Write) -> std::io::Result<()> {
    writeln!(output, "\nEnter a command:")?;
    writeln!(output, "1 <name> <amount>: Place a bid")?;
    writeln!(output, "2: Query auction status")?;
    writeln!(output, "0: Exit")?;
    write!(output, "> ")?;
    output.flush()
}

/// Run the console until `0` or end of input.
pub async fn run_console<R, W>(coordinator: &Coordinator, input: R, mut output: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        prompt(&mut output)?;

        let Some(line) = lines.next_line().await? else {
            tracing::info!("Input closed. Exiting.");
            break;
        };

        match parse_command(&line) {
            Command::Bid { name, amount } => {
                tracing::info!(bidder = %name, amount, "Placing bid");
                coordinator.bid(&name, amount).await;
                writeln!(output, "Bid submitted.")?;
            }
            Command::Query => {
                tracing::info!("Querying auction status...");
                match coordinator.query().await {
                    Ok(status) => writeln!(output, "{}", describe(&status))?,
                    Err(_) => writeln!(output, "Query failed: no replica responded.")?,
                }
            }
            Command::Exit => {
                tracing::info!("Exiting...");
                writeln!(output, "Exiting...")?;
                break;
            }
            Command::Invalid(message) => {
                writeln!(output, "{}", message)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::CoordinatorConfig;

    #[test]
    fn test_parse_command() {
        assert_eq!(
            parse_command("1 alice 100"),
            Command::Bid {
                name: "alice".into(),
                amount: 100
            }
        );
        assert_eq!(
            parse_command("  1   bob  -5 "),
            Command::Bid {
                name: "bob".into(),
                amount: -5
            }
        );
        assert_eq!(parse_command("2"), Command::Query);
        assert_eq!(parse_command("0"), Command::Exit);
    }

    #[test]
    fn test_parse_command_invalid() {
        assert_eq!(parse_command("1 alice"), Command::Invalid(USAGE_BID));
        assert_eq!(parse_command("1 alice 10 extra"), Command::Invalid(USAGE_BID));
        assert_eq!(parse_command("1 alice ten"), Command::Invalid(INVALID_AMOUNT));
        assert_eq!(parse_command("1 alice 10.5"), Command::Invalid(INVALID_AMOUNT));
        assert_eq!(parse_command(""), Command::Invalid(INVALID_COMMAND));
        assert_eq!(parse_command("3"), Command::Invalid(INVALID_COMMAND));
        assert_eq!(parse_command("bid alice 10"), Command::Invalid(INVALID_COMMAND));
    }

    #[test]
    fn test_describe() {
        let mut status = QueryResponse {
            status: AuctionStatus::Ongoing,
            highest_bid: 150,
            highest_bidder: "bob".into(),
            time_remaining: -2,
            winner: None,
        };
        assert_eq!(
            describe(&status),
            "Auction ongoing: highest bid 150 by bob, 0s remaining"
        );

        status.status = AuctionStatus::Ended;
        status.winner = Some("bob".into());
        assert_eq!(describe(&status), "Auction ended: winner bob with 150");

        status.highest_bidder.clear();
        status.winner = Some(String::new());
        assert_eq!(describe(&status), "Auction ended with no winner");
    }

    #[tokio::test]
    async fn test_console_session_without_replicas() {
        let config = CoordinatorConfig {
            replicas: vec!["http://127.0.0.1:1".into()],
            query_timeout_ms: 500,
            ..Default::default()
        };
        let coordinator = Coordinator::new(&config).unwrap();

        let input: &[u8] = b"hello\n1 alice\n1 alice 100\n2\n0\n2\n";
        let mut output = Vec::new();
        run_console(&coordinator, input, &mut output).await.unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains(INVALID_COMMAND));
        assert!(output.contains(USAGE_BID));
        assert!(output.contains("Bid submitted."));
        assert!(output.contains("Query failed: no replica responded."));
        assert!(output.ends_with("Exiting...\n"));
    }

    #[tokio::test]
    async fn test_console_stops_at_end_of_input() {
        let coordinator = Coordinator::new(&CoordinatorConfig::default()).unwrap();
        let input: &[u8] = b"";
        let mut output = Vec::new();
        run_console(&coordinator, input, &mut output).await.unwrap();
        assert!(String::from_utf8(output).unwrap().ends_with("> "));
    }
}
