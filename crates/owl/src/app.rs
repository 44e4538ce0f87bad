use std::{
    ffi::OsString,
    io::{self, IsTerminal, Read, Write},
};

use anyhow::{Context, Result};
use clap::{error::ErrorKind, FromArgMatches};

use owl_core::{
    attachment::AttachmentLoader,
    config::{AttachmentLimits, Config},
    Error,
};
use owl_telegram::Client;

use crate::{
    action::{Action, Delivery},
    cli::{self, AppInfo, Cli, APP_INFO},
};

/// The command line application: parses arguments, then delivers one message.
pub struct App {
    api_base_url: String,
    info: AppInfo,
    stdin: Option<Box<dyn Read>>,
}

impl App {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            info: APP_INFO,
            stdin: None,
        }
    }

    /// Read `--stdin` content from `reader` instead of the process stdin.
    pub fn with_stdin(mut self, reader: impl Read + 'static) -> Self {
        self.stdin = Some(Box::new(reader));
        self
    }

    /// Help, version and the success line go to `out`; errors are returned.
    pub fn run<I, T>(mut self, args: I, out: &mut dyn Write) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let mut command = cli::command(&self.info);

        if args.len() <= 1 {
            write!(out, "{}", command.render_help())?;
            return Ok(());
        }

        let matches = match command.try_get_matches_from_mut(args) {
            Ok(matches) => matches,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                write!(out, "{}", e.render())?;
                return Ok(());
            }
            Err(e) => return Err(usage(&e).into()),
        };
        let cli = Cli::from_arg_matches(&matches).map_err(|e| usage(&e))?;

        let config = Config::new(self.api_base_url.clone(), cli.token.clone(), cli.chat.clone())
            .with_proxy(cli.proxy.clone())
            .with_thread_id(cli.thread.clone())
            .with_limits(AttachmentLimits::from_env());
        config.validate()?;

        let message = self.message(&cli)?;

        let client = Client::new(&config.api_base_url, &config.token, config.proxy.as_deref())
            .context("failed to create Telegram client")?;
        let loader = AttachmentLoader::from_limits(config.limits).everything_as_document(cli.as_document);

        let delivery = Delivery {
            chat_id: config.chat_id.clone(),
            thread_id: config.thread_id.clone().unwrap_or_default(),
            message,
            format: cli.format,
            attachment_paths: cli.attach,
            silent: cli.silent,
            no_link_preview: cli.no_link_preview,
            spoiler: cli.spoiler,
            protect: cli.protect,
        };

        Action::new(&client, &loader)
            .execute(&delivery)
            .with_context(|| format!("failed to send message to chat ID {}", config.chat_id))?;

        tracing::info!(chat_id = %config.chat_id, "message sent");
        writeln!(out, "Message sent successfully. Chat ID: {}", config.chat_id)?;
        Ok(())
    }

    /// `--message` wins; otherwise `--stdin` content, trimmed.
    fn message(&mut self, cli: &Cli) -> Result<String> {
        if let Some(message) = cli.message.as_deref().filter(|m| !m.is_empty()) {
            return Ok(message.to_string());
        }
        if !cli.stdin {
            return Ok(String::new());
        }

        let mut buf = String::new();
        match self.stdin.as_mut() {
            Some(reader) => {
                reader
                    .read_to_string(&mut buf)
                    .context("failed to read from stdin")?;
            }
            None => {
                let stdin = io::stdin();
                if stdin.is_terminal() {
                    tracing::debug!("--stdin given but stdin is a terminal, ignoring");
                    return Ok(String::new());
                }
                stdin
                    .lock()
                    .read_to_string(&mut buf)
                    .context("failed to read from stdin")?;
            }
        }
        Ok(buf.trim().to_string())
    }
}

fn usage(e: &clap::Error) -> Error {
    Error::Usage(e.render().to_string().trim_end().to_string())
}
