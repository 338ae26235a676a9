//! `/rank` and `/leaderboard` slash commands.

use sea_orm::DatabaseConnection;
use serenity::all::{
    CommandInteraction, CommandOptionType, CreateCommandOption, CreateEmbed,
    CreateInteractionResponse, CreateInteractionResponseMessage, ResolvedValue,
};
use serenity::http::Http;

use crate::{
    model::leveling::{LeaderboardDto, LeaderboardMetric},
    server::{
        error::AppError,
        model::member_xp::MemberXp,
        plugin::{leveling::service::LevelingService, SlashCommand},
        util::discord::user_mention,
    },
};

pub const RANK_COMMAND: &str = "rank";
pub const LEADERBOARD_COMMAND: &str = "leaderboard";

/// Upper bound on `/leaderboard` entries so the reply fits in one embed.
pub const MAX_COMMAND_LIMIT: i64 = 25;

const EMBED_COLOR: u32 = 0x5865F2;

pub fn definitions() -> Vec<SlashCommand> {
    vec![
        SlashCommand::new(RANK_COMMAND, "Show a member's level and XP").configure(|command| {
            command.add_option(
                CreateCommandOption::new(CommandOptionType::User, "user", "Member to look up")
                    .required(false),
            )
        }),
        SlashCommand::new(LEADERBOARD_COMMAND, "Show the server leaderboard").configure(
            |command| {
                command
                    .add_option(
                        CreateCommandOption::new(
                            CommandOptionType::String,
                            "metric",
                            "What to rank by",
                        )
                        .add_string_choice("XP", "xp")
                        .add_string_choice("Voice minutes", "voice")
                        .add_string_choice("Reactions", "reactions")
                        .required(false),
                    )
                    .add_option(
                        CreateCommandOption::new(
                            CommandOptionType::Integer,
                            "limit",
                            "Number of members to show",
                        )
                        .min_int_value(1)
                        .max_int_value(MAX_COMMAND_LIMIT as u64)
                        .required(false),
                    )
            },
        ),
    ]
}

/// Options of a `/leaderboard` invocation with defaults applied and the limit clamped.
pub fn leaderboard_options(command: &CommandInteraction) -> (LeaderboardMetric, usize) {
    let mut metric = LeaderboardMetric::Xp;
    let mut limit = super::service::DEFAULT_LEADERBOARD_LIMIT as i64;

    for option in command.data.options() {
        match (option.name, option.value) {
            ("metric", ResolvedValue::String(value)) => {
                metric = LeaderboardMetric::parse(value).unwrap_or_default();
            }
            ("limit", ResolvedValue::Integer(value)) => limit = value,
            _ => {}
        }
    }

    (metric, limit.clamp(1, MAX_COMMAND_LIMIT) as usize)
}

fn rank_target(command: &CommandInteraction) -> u64 {
    command
        .data
        .options()
        .into_iter()
        .find_map(|option| match option.value {
            ResolvedValue::User(user, _) => Some(user.id.get()),
            _ => None,
        })
        .unwrap_or_else(|| command.user.id.get())
}

fn rank_embed(member: &MemberXp, rank: Option<usize>) -> CreateEmbed {
    let progress = member.progress();
    let rank = rank
        .map(|rank| format!("#{}", rank))
        .unwrap_or_else(|| "Unranked".to_string());

    CreateEmbed::new()
        .title("Rank")
        .color(EMBED_COLOR)
        .description(user_mention(member.user_id))
        .field("Level", member.level.to_string(), true)
        .field("XP", member.xp.to_string(), true)
        .field("Rank", rank, true)
        .field(
            "Progress",
            format!("{}/{} XP to next level", progress.current, progress.required),
            false,
        )
        .field("Voice minutes", member.voice_minutes.to_string(), true)
        .field(
            "Reactions",
            format!(
                "{} given / {} received",
                member.reactions_given, member.reactions_received
            ),
            true,
        )
}

fn leaderboard_embed(board: &LeaderboardDto) -> CreateEmbed {
    let unit = match board.metric {
        LeaderboardMetric::Xp => "XP",
        LeaderboardMetric::Voice => "minutes",
        LeaderboardMetric::Reactions => "reactions",
    };

    let lines: Vec<String> = board
        .entries
        .iter()
        .map(|entry| {
            format!(
                "**{}.** {} · {} {} (level {})",
                entry.rank,
                user_mention(entry.user_id),
                entry.value,
                unit,
                entry.level
            )
        })
        .collect();

    let description = if lines.is_empty() {
        "Nobody has earned anything yet.".to_string()
    } else {
        lines.join("\n")
    };

    CreateEmbed::new()
        .title(format!("Leaderboard · {}", board.metric.as_str()))
        .color(EMBED_COLOR)
        .description(description)
}

/// Answers a leveling command; other commands are ignored.
pub async fn respond(
    db: &DatabaseConnection,
    http: &Http,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let Some(guild_id) = command.guild_id.map(|id| id.get()) else {
        return Ok(());
    };
    let service = LevelingService::new(db);

    let embed = match command.data.name.as_str() {
        RANK_COMMAND => {
            let user_id = rank_target(command);
            let member = service.get_member(guild_id, user_id).await?;
            let rank = service.get_rank(guild_id, user_id).await?;
            rank_embed(&member, rank)
        }
        LEADERBOARD_COMMAND => {
            let (metric, limit) = leaderboard_options(command);
            let board = service.leaderboard(guild_id, metric, limit).await?;
            leaderboard_embed(&board)
        }
        _ => return Ok(()),
    };

    command
        .create_response(
            http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new().embed(embed),
            ),
        )
        .await?;

    Ok(())
}
