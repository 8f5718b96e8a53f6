use crate::{Context, Error};
use poise::builtins::HelpConfiguration;

/// Show the available commands, or details about one of them
#[poise::command(prefix_command, category = "Utility")]
pub async fn help(
    ctx: Context<'_>,
    #[description = "Command to explain"]
    #[rest]
    command: Option<String>,
) -> Result<(), Error> {
    let extra_text_at_bottom = format!(
        "Replies to commands clean themselves up after {} seconds.",
        ctx.data().config.messages.cleanup_delay.as_secs()
    );

    poise::builtins::help(
        ctx,
        command.as_deref(),
        HelpConfiguration {
            extra_text_at_bottom: &extra_text_at_bottom,
            ..Default::default()
        },
    )
    .await?;
    Ok(())
}
