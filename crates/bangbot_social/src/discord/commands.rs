//! Slash command schema.

use crate::{COMMAND_NAME, OPTION_NAME};
use serenity::all::{CommandOptionType, CreateCommand, CreateCommandOption};
use tracing::warn;

/// Discord rejects string options with more choices than this.
pub const MAX_COMMAND_CHOICES: usize = 25;

/// Build the `/command` schema with one choice per known category.
///
/// The choices are a snapshot: categories added later are still accepted by
/// the dispatcher but will not appear in the picker until re-registration.
pub fn category_command(categories: &[String]) -> CreateCommand {
    if categories.len() > MAX_COMMAND_CHOICES {
        warn!(
            total = categories.len(),
            registered = MAX_COMMAND_CHOICES,
            "Too many categories for slash command choices, truncating"
        );
    }

    let option = categories.iter().take(MAX_COMMAND_CHOICES).fold(
        CreateCommandOption::new(
            CommandOptionType::String,
            OPTION_NAME,
            "Command to get content from",
        )
        .required(true),
        |option, category| option.add_string_choice(category, category),
    );

    CreateCommand::new(COMMAND_NAME)
        .description("Get content from a registered command")
        .add_option(option)
}
