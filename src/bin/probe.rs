//! Developer probe: run one ad-hoc query or match lookup and print the result.

use clap::{Parser, Subcommand};
use cricket_stats_api::db::{self, DbError, Order, SelectQuery};
use cricket_stats_api::match_info::{DEFAULT_BASE_URL, MatchInfoClient};
use cricket_stats_api::models::{PLAYER_COLUMNS, PLAYERS_TABLE, TEAM_COLUMNS, TEAMS_TABLE};
use cricket_stats_api::Config;

#[derive(Parser)]
#[command(name = "probe", about = "Poke at the cricket database and match API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List players, optionally only those on one team
    Players {
        #[arg(long)]
        team_id: Option<i64>,
    },
    /// List teams
    Teams,
    /// Fetch match info from the cricket API
    Match {
        id: u64,
        #[arg(long, env = "CRICKET_API_URL", default_value = DEFAULT_BASE_URL)]
        api_url: String,
        #[arg(long, env = "CRICKET_API_KEY")]
        api_key: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    cricket_stats_api::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Players { team_id } => {
            let mut query = SelectQuery::from(PLAYERS_TABLE)
                .columns(PLAYER_COLUMNS)
                .order_by("name", Order::Asc);
            if let Some(team_id) = team_id {
                query = query.eq("team_id", team_id);
            }
            print_rows(run_query(&query).await);
        }
        Command::Teams => {
            let query = SelectQuery::from(TEAMS_TABLE)
                .columns(TEAM_COLUMNS)
                .order_by("name", Order::Asc);
            print_rows(run_query(&query).await);
        }
        Command::Match {
            id,
            api_url,
            api_key,
        } => {
            let client = MatchInfoClient::new(&api_url, &api_key);
            match client.match_info(id).await {
                Some(info) => {
                    println!(
                        "{} vs {}",
                        info.team1.name.as_deref().unwrap_or("?"),
                        info.team2.name.as_deref().unwrap_or("?")
                    );
                    print_json(&info);
                }
                None => println!("No match info for {}", id),
            }
        }
    }
}

async fn run_query(query: &SelectQuery) -> Result<Vec<db::Row>, DbError> {
    let config = Config::from_env().expect("Database configuration missing");
    let client = db::connect(&config).await?;
    client.select(query).await
}

fn print_rows(result: Result<Vec<db::Row>, DbError>) {
    match result {
        Ok(rows) => {
            println!("{} rows", rows.len());
            print_json(&rows);
        }
        Err(e) => eprintln!("Query failed: {}", e),
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Could not render result: {}", e),
    }
}
