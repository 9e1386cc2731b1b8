//! Board command - show the latest position of every team.

use std::sync::Arc;

use clap::Args;
use fieldtrack::board::{refresh, spawn_board_refresher, LatestTracksClient, TeamBoard};
use tokio_util::sync::CancellationToken;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the board command.
#[derive(Debug, Args)]
pub struct BoardArgs {
    /// Keep refreshing until Ctrl-C
    #[arg(long)]
    pub watch: bool,
}

/// Run the board command.
pub async fn run(args: BoardArgs, runner: &CliRunner) -> Result<(), CliError> {
    let client = LatestTracksClient::new(runner.transport()?, &runner.config().endpoint());
    let board = Arc::new(TeamBoard::new());

    if !args.watch {
        // Single fetch surfaces the error instead of keeping an empty board.
        let rows = client.fetch().await?;
        board.apply(rows);
        print_board(&board);
        return Ok(());
    }

    let interval = runner.config().board_config().refresh_interval;
    refresh(&client, &board).await;
    print_board(&board);

    let cancellation = CancellationToken::new();
    let refresher = spawn_board_refresher(client, Arc::clone(&board), interval, cancellation.clone());

    let mut ticker = tokio::time::interval(interval);
    ticker.tick().await;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = ticker.tick() => {
                println!();
                print_board(&board);
            }
        }
    }

    cancellation.cancel();
    let _ = refresher.await;
    Ok(())
}

fn print_board(board: &TeamBoard) {
    if board.is_empty() {
        println!("No team positions reported yet.");
        return;
    }

    println!("{:<24} {:>10} {:>11}", "TEAM", "LAT", "LON");
    for row in board.snapshot() {
        println!(
            "{:<24} {:>10.5} {:>11.5}",
            row.team, row.position.latitude, row.position.longitude
        );
    }
}
