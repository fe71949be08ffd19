mod logging;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{ArgAction, Parser};
use log::LevelFilter;
use reqwest::Url;
use webhook_message::{Embed, Message, Scalar, WebhookClient};

/// Send a single message to a Discord WebHook
#[derive(Parser)]
struct Args {
    /// The WebHook URL the message should be posted to
    #[arg(short, long)]
    webhook_url: Url,

    /// Plain text content of the message
    #[arg(short, long)]
    content: Option<String>,

    /// Override the WebHook's username
    #[arg(short, long)]
    username: Option<String>,

    /// Override the WebHook's avatar
    #[arg(short, long)]
    avatar_url: Option<String>,

    /// Read the message out loud
    #[arg(long)]
    tts: bool,

    #[command(flatten)]
    embed: EmbedArgs,

    /// Print the JSON document instead of sending it
    #[arg(long)]
    dry_run: bool,

    /// More output per occurrence (overrides `RUST_LOG`)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// An embed is attached only if at least one of these is given.
#[derive(clap::Args)]
struct EmbedArgs {
    /// Embed title
    #[arg(short, long)]
    title: Option<String>,

    /// Embed description
    #[arg(short, long)]
    description: Option<String>,

    /// Link of the embed title
    #[arg(long)]
    url: Option<String>,

    /// Embed color in decimal (e.g. 16711680 for red)
    #[arg(long, value_parser = parse_color)]
    color: Option<i64>,

    /// Footer text
    #[arg(long)]
    footer: Option<String>,

    /// Image URL
    #[arg(long)]
    image: Option<String>,

    /// Thumbnail URL
    #[arg(long)]
    thumbnail: Option<String>,

    /// Attach the current time
    #[arg(long)]
    timestamp: bool,

    /// Embed field as NAME=VALUE (repeatable, at most 25)
    #[arg(short, long = "field", value_parser = parse_field)]
    fields: Vec<(String, String)>,

    /// Display fields side by side
    #[arg(long)]
    inline: bool,
}

impl EmbedArgs {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.url.is_none()
            && self.color.is_none()
            && self.footer.is_none()
            && self.image.is_none()
            && self.thumbnail.is_none()
            && !self.timestamp
            && self.fields.is_empty()
    }

    fn apply(self, embed: &mut Embed) {
        if let Some(title) = self.title {
            embed.title(title);
        }
        if let Some(description) = self.description {
            embed.description(description);
        }
        if let Some(url) = self.url {
            embed.url(url);
        }
        if let Some(color) = self.color {
            embed.color(color);
        }
        if let Some(footer) = self.footer {
            embed.footer(footer, "");
        }
        if let Some(image) = self.image {
            embed.image(image);
        }
        if let Some(thumbnail) = self.thumbnail {
            embed.thumbnail(thumbnail);
        }
        if self.timestamp {
            embed.timestamp(Utc::now());
        }
        for (name, value) in self.fields {
            embed.field(name, value, self.inline);
        }
    }
}

fn parse_field(arg: &str) -> Result<(String, String), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("Expected a field in the form NAME=VALUE, got {arg:?}"))?;
    Ok((name.to_string(), value.to_string()))
}

fn parse_color(arg: &str) -> Result<i64, String> {
    Scalar::from(arg)
        .try_to_canonical_integer()
        .map_err(|e| e.to_string())
}

const fn verbosity(count: u8) -> Option<LevelFilter> {
    match count {
        0 => None,
        1 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(verbosity(args.verbose));

    if args.content.is_none() && args.embed.is_empty() {
        bail!("Nothing to send; give --content or at least one embed option");
    }

    let Args {
        webhook_url,
        content,
        username,
        avatar_url,
        tts,
        embed,
        dry_run,
        ..
    } = args;

    let message = Message::build(|m| {
        if let Some(content) = content {
            m.content(content);
        }
        if let Some(username) = username {
            m.username(username);
        }
        if let Some(avatar_url) = avatar_url {
            m.avatar_url(avatar_url);
        }
        m.tts(tts);
        if !embed.is_empty() {
            m.embed(|e| embed.apply(e));
        }
    });

    if dry_run {
        message.check()?;
        let json = serde_json::to_string_pretty(&message).context("Could not serialize message")?;
        println!("{json}");
        return Ok(());
    }

    let client = WebhookClient::new(webhook_url).context("Could not create WebHook Client")?;
    let resp = client.send_message(&message)?;
    let status = resp.status();
    if !status.is_success() {
        bail!("WebHook rejected the message with status {status}");
    }

    log::info!("Message delivered ({status})");
    Ok(())
}
