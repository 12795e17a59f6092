use clap::{Parser, Subcommand};
use habitquest_types::{AdventureId, FriendRequestDecision, FriendRequestId, MonsterId, TaskId};

use crate::{CliContext, commands};

#[derive(Debug, Parser)]
#[command(version, about = "HabitQuest from the terminal")]
pub struct Cli {
    /// Override the API base URL for this run
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Without a command an interactive shell is started
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show one adventure (result screen when finished)
    Adventure { id: AdventureId },
    /// Show the adventure in progress
    Current,
    /// List finished adventures
    History,
    /// List monsters that can be fought
    Monsters,
    /// Start an adventure against a monster
    Start { monster_id: MonsterId },
    /// Retreat from an adventure
    Abandon { id: AdventureId },
    /// List today's tasks
    Tasks,
    AddTask {
        title: String,
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Complete a task, dealing damage to the monster
    Complete { task_id: TaskId },
    DeleteTask { task_id: TaskId },
    Friends,
    /// Pending friend requests
    Requests,
    Accept { request_id: FriendRequestId },
    Decline { request_id: FriendRequestId },
    /// Search users by name
    Search { query: String },
    /// Send a friend request to a user by username
    Invite { username: String },
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    Exit,
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    Show,
    SetUrl { url: String },
    SetToken { token: String },
    ClearToken,
}

/// Run one command. Returns true when the shell should exit.
pub async fn dispatch(command: Commands, ctx: &CliContext) -> Result<bool, String> {
    match command {
        Commands::Adventure { id } => commands::show_adventure(ctx, id).await?,
        Commands::Current => commands::show_current(ctx).await?,
        Commands::History => commands::show_history(ctx).await?,
        Commands::Monsters => commands::list_monsters(ctx).await?,
        Commands::Start { monster_id } => commands::start_adventure(ctx, monster_id).await?,
        Commands::Abandon { id } => commands::abandon_adventure(ctx, id).await?,
        Commands::Tasks => commands::list_tasks(ctx).await?,
        Commands::AddTask { title, category } => {
            commands::add_task(ctx, &title, category.as_deref()).await?
        }
        Commands::Complete { task_id } => commands::complete_task(ctx, task_id).await?,
        Commands::DeleteTask { task_id } => commands::delete_task(ctx, task_id).await?,
        Commands::Friends => commands::list_friends(ctx).await?,
        Commands::Requests => commands::list_requests(ctx).await?,
        Commands::Accept { request_id } => {
            commands::answer_request(ctx, request_id, FriendRequestDecision::Accept).await?
        }
        Commands::Decline { request_id } => {
            commands::answer_request(ctx, request_id, FriendRequestDecision::Decline).await?
        }
        Commands::Search { query } => commands::show_search(ctx, &query).await?,
        Commands::Invite { username } => commands::invite(ctx, &username).await?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::show_config(ctx).await?,
            ConfigAction::SetUrl { url } => commands::set_url(ctx, &url).await?,
            ConfigAction::SetToken { token } => commands::set_token(ctx, &token).await?,
            ConfigAction::ClearToken => commands::clear_token(ctx).await?,
        },
        Commands::Exit => return Ok(true),
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split_line;

    fn parse(line: &str) -> Cli {
        Cli::try_parse_from(split_line(line).unwrap()).unwrap()
    }

    #[test]
    fn parses_adventure_id() {
        let cli = parse("adventure 42");
        assert!(matches!(cli.command, Some(Commands::Adventure { id: 42 })));
    }

    #[test]
    fn parses_nested_config_action() {
        let cli = parse("config set-url http://example.test/api");
        match cli.command {
            Some(Commands::Config {
                action: ConfigAction::SetUrl { url },
            }) => assert_eq!(url, "http://example.test/api"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_non_numeric_task_id() {
        let args = split_line("complete abc").unwrap();
        assert!(Cli::try_parse_from(args).is_err());
    }
}
