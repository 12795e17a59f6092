use habitquest_core::query::effects;
use habitquest_core::{AdventureResultView, ClientConfig, MonsterView, hp_percent, keys};
use habitquest_types::{
    Adventure, AdventureId, FriendRequest, FriendRequestDecision, FriendRequestId,
    FriendRequestStatus, MonsterId, NewTask, StartAdventure, TaskId, UserSummary,
};

use crate::CliContext;

// ─────────────────────────────────────────────────────────────────────────────
// Formatting
// ─────────────────────────────────────────────────────────────────────────────

/// One-line summary of a running adventure
pub fn format_active(adventure: &Adventure) -> String {
    let monster = MonsterView::from_descriptor(adventure.monster.as_ref());
    format!(
        "{} {} [{}]  HP {}/{} ({:.0}%)  round {}  {} damage dealt",
        monster.emoji,
        monster.name,
        monster.tier.label(),
        adventure.monster_current_hp,
        adventure.monster_max_hp,
        hp_percent(adventure.monster_current_hp, adventure.monster_max_hp),
        adventure.current_round,
        adventure.total_damage_dealt,
    )
}

pub fn format_history_line(adventure: &Adventure) -> String {
    let monster = MonsterView::from_descriptor(adventure.monster.as_ref());
    format!(
        "{:>6}  {:<10} {} {:<28} +{} XP",
        adventure.id,
        adventure.status.label(),
        monster.emoji,
        monster.name,
        adventure.xp_earned,
    )
}

/// Exact username match (case-insensitive) among search results
/// Username as typed, minus surrounding space and a leading `@`
pub fn invite_handle(username: &str) -> &str {
    username.trim().trim_start_matches('@')
}

pub fn resolve_username<'a>(results: &'a [UserSummary], username: &str) -> Option<&'a UserSummary> {
    let wanted = invite_handle(username);
    results
        .iter()
        .find(|user| user.username.eq_ignore_ascii_case(wanted))
}

fn print_request(request: &FriendRequest, incoming: bool) {
    let (direction, other) = if incoming {
        ("from", &request.from)
    } else {
        ("to", &request.to)
    };
    println!(
        "{:>6}  {direction} {} (@{})",
        request.id,
        other.shown_name(),
        other.username
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Adventures
// ─────────────────────────────────────────────────────────────────────────────

pub async fn show_adventure(ctx: &CliContext, id: AdventureId) -> Result<(), String> {
    let adventure = ctx
        .query(keys::adventure(id), |api, token| async move {
            api.adventure(&token, id).await
        })
        .await
        .map_err(|e| format!("Adventure {id} could not be loaded: {e}"))?;

    if adventure.status.is_terminal() {
        print!("{}", AdventureResultView::new(&adventure).render_text());
    } else {
        println!("{}", format_active(&adventure));
    }
    Ok(())
}

pub async fn show_current(ctx: &CliContext) -> Result<(), String> {
    let current = ctx
        .query(keys::current_adventure(), |api, token| async move {
            api.current_adventure(&token).await
        })
        .await?;

    match current {
        Some(adventure) => println!("{}", format_active(&adventure)),
        None => println!("No adventure in progress. Run `monsters` to pick an opponent."),
    }
    Ok(())
}

pub async fn show_history(ctx: &CliContext) -> Result<(), String> {
    let history = ctx
        .query(keys::adventure_history(), |api, token| async move {
            api.adventure_history(&token).await
        })
        .await?;

    if history.is_empty() {
        println!("No finished adventures yet");
        return Ok(());
    }
    for adventure in &history {
        println!("{}", format_history_line(adventure));
    }
    println!("\nTotal: {} adventures", history.len());
    Ok(())
}

pub async fn list_monsters(ctx: &CliContext) -> Result<(), String> {
    let monsters = ctx
        .query(keys::monsters(), |api, token| async move {
            api.available_monsters(&token).await
        })
        .await?;

    if monsters.is_empty() {
        println!("No monsters available");
        return Ok(());
    }
    println!("{:>6}  {:<28} {:<8} HP", "Id", "Monster", "Tier");
    println!("{}", "-".repeat(52));
    for monster in &monsters {
        println!(
            "{:>6}  {:<28} {:<8} {}",
            monster.id,
            monster.name,
            monster.tier.unwrap_or_default().label(),
            monster.max_hp
        );
    }
    Ok(())
}

pub async fn start_adventure(ctx: &CliContext, monster_id: MonsterId) -> Result<(), String> {
    let adventure = ctx
        .mutate(
            |api, token| async move {
                api.start_adventure(&token, &StartAdventure { monster_id })
                    .await
            },
            effects::adventure_started,
        )
        .await?;
    println!("The adventure begins!");
    println!("{}", format_active(&adventure));
    Ok(())
}

pub async fn abandon_adventure(ctx: &CliContext, id: AdventureId) -> Result<(), String> {
    let adventure = ctx
        .mutate(
            |api, token| async move { api.abandon_adventure(&token, id).await },
            effects::adventure_abandoned,
        )
        .await?;
    print!("{}", AdventureResultView::new(&adventure).render_text());
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tasks
// ─────────────────────────────────────────────────────────────────────────────

pub async fn list_tasks(ctx: &CliContext) -> Result<(), String> {
    let tasks = ctx
        .query(keys::tasks(), |api, token| async move { api.tasks(&token).await })
        .await?;

    if tasks.is_empty() {
        println!("No tasks yet. Add one with `add-task <title>`.");
        return Ok(());
    }
    for task in &tasks {
        let mark = if task.completed_today { "x" } else { " " };
        println!(
            "[{mark}] {:>6}  {:<36} {:<12} +{} XP",
            task.id, task.title, task.category, task.xp_reward
        );
    }
    let done = tasks.iter().filter(|t| t.completed_today).count();
    println!("\n{done} / {} done today", tasks.len());
    Ok(())
}

pub async fn add_task(ctx: &CliContext, title: &str, category: Option<&str>) -> Result<(), String> {
    let title = title.trim();
    if title.is_empty() {
        return Err("Task title cannot be empty".to_string());
    }
    let body = NewTask {
        title: title.to_string(),
        description: None,
        category: category.unwrap_or("general").to_string(),
    };
    let task = ctx
        .mutate(
            |api, token| async move { api.create_task(&token, &body).await },
            effects::task_created,
        )
        .await?;
    println!("Added task {} ({})", task.id, task.title);
    Ok(())
}

pub async fn complete_task(ctx: &CliContext, id: TaskId) -> Result<(), String> {
    let task = ctx
        .mutate(
            |api, token| async move { api.complete_task(&token, id).await },
            effects::task_completed,
        )
        .await?;
    println!("Completed {}: damage dealt!", task.title);
    Ok(())
}

pub async fn delete_task(ctx: &CliContext, id: TaskId) -> Result<(), String> {
    ctx.mutate(
        |api, token| async move { api.delete_task(&token, id).await },
        |_| effects::task_deleted(id),
    )
    .await?;
    println!("Deleted task {id}");
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Friends
// ─────────────────────────────────────────────────────────────────────────────

pub async fn list_friends(ctx: &CliContext) -> Result<(), String> {
    let friends = ctx
        .query(keys::friend_list(), |api, token| async move {
            api.friends(&token).await
        })
        .await?;

    if friends.is_empty() {
        println!("No friends yet");
        return Ok(());
    }
    for friend in &friends {
        println!(
            "{:<24} @{:<20} Lv {}",
            friend.shown_name(),
            friend.username,
            friend.level
        );
    }
    Ok(())
}

pub async fn list_requests(ctx: &CliContext) -> Result<(), String> {
    let me = ctx
        .query(keys::me(), |api, token| async move { api.me(&token).await })
        .await?;
    let requests = ctx
        .query(keys::friend_requests(), |api, token| async move {
            api.friend_requests(&token).await
        })
        .await?;

    let pending: Vec<_> = requests
        .iter()
        .filter(|r| r.status == FriendRequestStatus::Pending)
        .collect();
    if pending.is_empty() {
        println!("No pending requests");
        return Ok(());
    }

    let (incoming, outgoing): (Vec<_>, Vec<_>) =
        pending.into_iter().partition(|r| r.awaits(me.id));
    if !incoming.is_empty() {
        println!("Incoming (accept/decline <id>):");
        for request in incoming {
            print_request(request, true);
        }
    }
    if !outgoing.is_empty() {
        println!("Sent:");
        for request in outgoing {
            print_request(request, false);
        }
    }
    Ok(())
}

pub async fn search_users(ctx: &CliContext, query: &str) -> Result<Vec<UserSummary>, String> {
    let min_len = ctx.config.read().await.min_search_len;
    let Some(query) = habitquest_core::normalize_search(query, min_len) else {
        return Err(format!("Search needs at least {min_len} characters"));
    };
    ctx.query(keys::user_search(&query), |api, token| {
        let query = query.clone();
        async move { api.search_users(&token, &query).await }
    })
    .await
}

pub async fn show_search(ctx: &CliContext, query: &str) -> Result<(), String> {
    let users = search_users(ctx, query).await?;
    if users.is_empty() {
        println!("No users found");
        return Ok(());
    }
    for user in &users {
        println!(
            "{:>6}  @{:<20} {:<24} Lv {}",
            user.id,
            user.username,
            user.shown_name(),
            user.level
        );
    }
    Ok(())
}

/// Look the user up by name, then send the request to the resolved id
pub async fn invite(ctx: &CliContext, username: &str) -> Result<(), String> {
    let handle = invite_handle(username);
    let results = search_users(ctx, handle).await?;
    let user = resolve_username(&results, handle)
        .ok_or_else(|| format!("No user named {handle}"))?;
    let user_id = user.id;
    let name = user.shown_name().to_string();

    ctx.mutate(
        |api, token| async move { api.send_friend_request(&token, user_id).await },
        effects::friend_request_sent,
    )
    .await?;
    println!("Invite sent to {name}");
    Ok(())
}

pub async fn answer_request(
    ctx: &CliContext,
    id: FriendRequestId,
    decision: FriendRequestDecision,
) -> Result<(), String> {
    let request = ctx
        .mutate(
            |api, token| async move { api.respond_friend_request(&token, id, decision).await },
            effects::friend_request_answered,
        )
        .await?;
    let verb = match decision {
        FriendRequestDecision::Accept => "Accepted",
        FriendRequestDecision::Decline => "Declined",
    };
    println!("{verb} request from {}", request.from.shown_name());
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Config
// ─────────────────────────────────────────────────────────────────────────────

pub async fn show_config(ctx: &CliContext) -> Result<(), String> {
    let config = ctx.config.read().await;
    match ClientConfig::path() {
        Ok(path) => println!("Config file:      {}", path.display()),
        Err(e) => println!("Config file:      unavailable ({e})"),
    }
    println!("API base URL:     {}", config.api_base_url);
    println!(
        "Request timeout:  {}",
        config
            .request_timeout_secs
            .map(|s| format!("{s}s"))
            .unwrap_or_else(|| "transport default".to_string())
    );
    println!(
        "Retries:          {} (base {} ms, cap {} ms)",
        config.retry.max_retries, config.retry.base_delay_ms, config.retry.max_delay_ms
    );
    println!(
        "Signed in:        {}",
        if config.auth_token.is_some() { "yes" } else { "no" }
    );
    Ok(())
}

async fn update_config(
    ctx: &CliContext,
    update: impl FnOnce(&mut ClientConfig),
) -> Result<(), String> {
    let mut config = ctx.config.read().await.clone();
    update(&mut config);
    config.base_url().map_err(|e| e.to_string())?;
    config.save().map_err(|e| e.to_string())?;
    ctx.replace_config(config).await
}

pub async fn set_url(ctx: &CliContext, url: &str) -> Result<(), String> {
    let url = url.trim().to_string();
    update_config(ctx, |config| config.api_base_url = url).await?;
    println!("API base URL saved");
    Ok(())
}

pub async fn set_token(ctx: &CliContext, raw: &str) -> Result<(), String> {
    let token = habitquest_core::AuthToken::parse(raw).ok_or("Token cannot be empty")?;
    let stored = token.expose().to_string();
    update_config(ctx, |config| config.auth_token = Some(stored)).await?;
    println!("Token saved");
    Ok(())
}

pub async fn clear_token(ctx: &CliContext) -> Result<(), String> {
    update_config(ctx, |config| config.auth_token = None).await?;
    println!("Token cleared");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use habitquest_types::AdventureStatus;

    fn user(id: i64, username: &str) -> UserSummary {
        UserSummary {
            id,
            username: username.to_string(),
            display_name: None,
            level: 1,
        }
    }

    #[test]
    fn resolves_exact_username_ignoring_case_and_at() {
        let results = vec![user(1, "sam"), user(2, "samwise")];
        assert_eq!(resolve_username(&results, "@Samwise").map(|u| u.id), Some(2));
        assert_eq!(resolve_username(&results, "sam").map(|u| u.id), Some(1));
        assert!(resolve_username(&results, "sa").is_none());
    }

    #[test]
    fn invite_handle_drops_at_before_searching() {
        assert_eq!(invite_handle("@ada"), "ada");
        assert_eq!(invite_handle("  @Ada "), "Ada");
        assert_eq!(invite_handle("ada"), "ada");
        assert_eq!(
            habitquest_core::normalize_search(invite_handle(" @ada"), 2).as_deref(),
            Some("ada")
        );
        assert_eq!(keys::user_search(invite_handle("@ada")), keys::user_search("ada"));
    }

    #[test]
    fn active_line_uses_fallback_monster() {
        let adventure = Adventure {
            id: 7,
            status: AdventureStatus::Active,
            monster_current_hp: 50,
            monster_max_hp: 200,
            current_round: 3,
            total_damage_dealt: 150,
            ..Default::default()
        };
        let line = format_active(&adventure);
        assert!(line.starts_with("👾 Unknown Monster [Easy]"));
        assert!(line.contains("HP 50/200 (25%)"));
        assert!(line.contains("round 3"));
    }

    #[test]
    fn history_line_shows_status_and_xp() {
        let adventure = Adventure {
            id: 12,
            status: AdventureStatus::Completed,
            monster_max_hp: 100,
            xp_earned: 240,
            ..Default::default()
        };
        let line = format_history_line(&adventure);
        assert!(line.contains("Victory"));
        assert!(line.ends_with("+240 XP"));
    }
}
