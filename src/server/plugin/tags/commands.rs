//! `/tags` slash command with `add`, `remove`, `show` and `find` subcommands.

use sea_orm::DatabaseConnection;
use serenity::all::{
    CommandInteraction, CommandOptionType, CreateCommandOption, CreateEmbed,
    CreateInteractionResponse, CreateInteractionResponseMessage, ResolvedOption, ResolvedValue,
};
use serenity::http::Http;

use crate::{
    model::tags::TagKind,
    server::{
        error::AppError,
        model::member_tag::MemberTags,
        plugin::{
            tags::{normalize::split_values, service::TagService},
            SlashCommand,
        },
        util::discord::user_mention,
    },
};

pub const TAGS_COMMAND: &str = "tags";

const EMBED_COLOR: u32 = 0x57F287;
const MAX_FIND_RESULTS: usize = 25;

#[derive(Debug, Clone, PartialEq)]
pub enum TagsCommand {
    Add { kind: TagKind, values: Vec<String> },
    Remove { kind: TagKind, values: Vec<String> },
    Show { user_id: Option<u64> },
    Find { kind: TagKind, value: String },
}

fn kind_option() -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::String, "kind", "Genre or DAW")
        .add_string_choice("Genre", "genre")
        .add_string_choice("DAW", "daw")
        .required(true)
}

pub fn definitions() -> Vec<SlashCommand> {
    vec![
        SlashCommand::new(TAGS_COMMAND, "Manage your genre and DAW tags").configure(|command| {
            command
                .add_option(
                    CreateCommandOption::new(CommandOptionType::SubCommand, "add", "Add tags")
                        .add_sub_option(kind_option())
                        .add_sub_option(
                            CreateCommandOption::new(
                                CommandOptionType::String,
                                "values",
                                "Comma separated tags",
                            )
                            .required(true),
                        ),
                )
                .add_option(
                    CreateCommandOption::new(
                        CommandOptionType::SubCommand,
                        "remove",
                        "Remove tags",
                    )
                    .add_sub_option(kind_option())
                    .add_sub_option(
                        CreateCommandOption::new(
                            CommandOptionType::String,
                            "values",
                            "Comma separated tags",
                        )
                        .required(true),
                    ),
                )
                .add_option(
                    CreateCommandOption::new(
                        CommandOptionType::SubCommand,
                        "show",
                        "Show a member's tags",
                    )
                    .add_sub_option(
                        CreateCommandOption::new(CommandOptionType::User, "user", "Member")
                            .required(false),
                    ),
                )
                .add_option(
                    CreateCommandOption::new(
                        CommandOptionType::SubCommand,
                        "find",
                        "Find members with a tag",
                    )
                    .add_sub_option(kind_option())
                    .add_sub_option(
                        CreateCommandOption::new(CommandOptionType::String, "value", "Tag")
                            .required(true),
                    ),
                )
        }),
    ]
}

fn parse_kind(value: &str) -> Option<TagKind> {
    match value {
        "genre" => Some(TagKind::Genre),
        "daw" => Some(TagKind::Daw),
        _ => None,
    }
}

/// Reads the invoked subcommand and its arguments.
pub fn parse(options: Vec<ResolvedOption<'_>>) -> Option<TagsCommand> {
    let subcommand = options.into_iter().next()?;
    let ResolvedValue::SubCommand(args) = subcommand.value else {
        return None;
    };

    let mut kind = None;
    let mut text = None;
    let mut user_id = None;
    for arg in args {
        match (arg.name, arg.value) {
            ("kind", ResolvedValue::String(value)) => kind = parse_kind(value),
            ("values" | "value", ResolvedValue::String(value)) => text = Some(value.to_string()),
            ("user", ResolvedValue::User(user, _)) => user_id = Some(user.id.get()),
            _ => {}
        }
    }

    match subcommand.name {
        "add" => Some(TagsCommand::Add {
            kind: kind?,
            values: split_values(&text?),
        }),
        "remove" => Some(TagsCommand::Remove {
            kind: kind?,
            values: split_values(&text?),
        }),
        "show" => Some(TagsCommand::Show { user_id }),
        "find" => Some(TagsCommand::Find {
            kind: kind?,
            value: text?,
        }),
        _ => None,
    }
}

fn list_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "None".to_string()
    } else {
        values.join(", ")
    }
}

fn tags_embed(tags: &MemberTags) -> CreateEmbed {
    CreateEmbed::new()
        .title("Tags")
        .color(EMBED_COLOR)
        .description(user_mention(tags.user_id))
        .field("Genres", list_or_none(&tags.genres), false)
        .field("DAWs", list_or_none(&tags.daws), false)
}

fn find_embed(kind: TagKind, value: &str, members: &[MemberTags]) -> CreateEmbed {
    let description = if members.is_empty() {
        format!("Nobody has the {} '{}' yet.", kind.label(), value)
    } else {
        members
            .iter()
            .take(MAX_FIND_RESULTS)
            .map(|member| user_mention(member.user_id))
            .collect::<Vec<_>>()
            .join("\n")
    };

    CreateEmbed::new()
        .title(format!("Members with {} '{}'", kind.label(), value.trim()))
        .color(EMBED_COLOR)
        .description(description)
}

/// Answers a `/tags` invocation; other commands are ignored.
///
/// Rejected tag values are answered privately instead of failing the handler.
pub async fn respond(
    db: &DatabaseConnection,
    http: &Http,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    if command.data.name != TAGS_COMMAND {
        return Ok(());
    }
    let Some(guild_id) = command.guild_id.map(|id| id.get()) else {
        return Ok(());
    };
    let Some(parsed) = parse(command.data.options()) else {
        return Ok(());
    };

    let service = TagService::new(db);
    let caller = command.user.id.get();

    let result = match parsed {
        TagsCommand::Add { kind, values } => service
            .add_tags(guild_id, caller, kind, values)
            .await
            .map(|tags| tags_embed(&tags)),
        TagsCommand::Remove { kind, values } => service
            .remove_tags(guild_id, caller, kind, values)
            .await
            .map(|tags| tags_embed(&tags)),
        TagsCommand::Show { user_id } => service
            .get_member(guild_id, user_id.unwrap_or(caller))
            .await
            .map(|tags| tags_embed(&tags)),
        TagsCommand::Find { kind, value } => service
            .search(guild_id, kind, &value)
            .await
            .map(|members| find_embed(kind, &value, &members)),
    };

    let message = match result {
        Ok(embed) => CreateInteractionResponseMessage::new().embed(embed),
        Err(AppError::BadRequest(reason)) => CreateInteractionResponseMessage::new()
            .content(reason)
            .ephemeral(true),
        Err(e) => return Err(e),
    };

    command
        .create_response(http, CreateInteractionResponse::Message(message))
        .await?;

    Ok(())
}
