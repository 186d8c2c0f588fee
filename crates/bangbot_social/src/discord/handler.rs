//! Serenity event handler for the Discord bot.
//!
//! Translates gateway events into dispatcher calls and registers the slash
//! command once the session is ready.

use crate::discord::commands::category_command;
use crate::discord::transport::{CommandResponder, HttpMessageSink};
use crate::{CommandDispatcher, EventAuthor, IncomingInteraction, IncomingMessage, OPTION_NAME};
use serenity::all::{Command, CommandInteraction, Interaction, Message, Ready, User};
use serenity::async_trait;
use serenity::client::{Context, EventHandler};
use serenity::model::gateway::GatewayIntents;
use tracing::{debug, error, info};

/// Event handler for the Bangbot Discord bot.
pub struct BangbotHandler {
    dispatcher: CommandDispatcher,
    /// Categories known at startup, registered as slash command choices.
    categories: Vec<String>,
}

impl BangbotHandler {
    /// Create a handler that registers `categories` as slash command choices.
    pub fn new(dispatcher: CommandDispatcher, categories: Vec<String>) -> Self {
        Self {
            dispatcher,
            categories,
        }
    }

    /// Required gateway intents for the bot.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT
    }

    fn author(user: &User) -> EventAuthor {
        EventAuthor {
            id: user.id.get(),
            name: user.name.clone(),
            bot: user.bot,
        }
    }

    fn incoming_message(message: &Message) -> IncomingMessage {
        IncomingMessage {
            channel_id: message.channel_id.get(),
            guild_id: message.guild_id.map(|id| id.get()),
            author: Some(Self::author(&message.author)),
            content: message.content.clone(),
        }
    }

    fn incoming_interaction(command: &CommandInteraction) -> IncomingInteraction {
        let category = command
            .data
            .options
            .iter()
            .find(|option| option.name == OPTION_NAME)
            .and_then(|option| option.value.as_str())
            .map(str::to_string);

        IncomingInteraction {
            command_name: command.data.name.clone(),
            category,
            user: Some(Self::author(&command.user)),
            channel_id: command.channel_id.get(),
            guild_id: command.guild_id.map(|id| id.get()),
        }
    }
}

#[async_trait]
impl EventHandler for BangbotHandler {
    /// Called when the bot successfully connects to Discord.
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(
            bot_user = %ready.user.name,
            bot_id = %ready.user.id,
            guilds = ready.guilds.len(),
            "Bot connected to Discord"
        );

        match Command::create_global_command(&ctx.http, category_command(&self.categories)).await
        {
            Ok(command) => info!(
                command_id = %command.id,
                choices = self.categories.len(),
                "Slash command registered"
            ),
            Err(e) => error!(error = %e, "Failed to register slash command"),
        }
    }

    async fn message(&self, ctx: Context, new_message: Message) {
        let sink = HttpMessageSink::new(ctx.http.clone());
        self.dispatcher
            .handle_message(&sink, &Self::incoming_message(&new_message))
            .await;
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            debug!("Ignoring non-command interaction");
            return;
        };

        let responder = CommandResponder::new(ctx.http.clone(), &command);
        self.dispatcher
            .handle_interaction(&responder, &Self::incoming_interaction(&command))
            .await;
    }
}
