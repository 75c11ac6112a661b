//! Interactive chat loop.

use std::io::Write as _;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use playground_core::{
    CatalogCache, CatalogSource, ChatBackend, SessionContext, SessionState, SubmitError,
    SubmitOutcome, Submission, build_guide, load_attachment, submit,
};
use playground_types::{ImageAttachment, NonEmptyString, SharedCatalog, ascii_icon_for};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::commands::{self, Command, HELP, Input};
use crate::render::{self, Style};

enum Flow {
    Continue,
    Quit,
}

/// REPL state over one provider connection.
///
/// `B` serves both the model listing and chat completions.
pub struct Repl<B> {
    backend: B,
    cache: CatalogCache,
    catalog: SharedCatalog,
    session: SessionState,
    pending_image: Option<ImageAttachment>,
    style: Style,
    switch_pause: Duration,
}

impl<B: ChatBackend + CatalogSource> Repl<B> {
    pub fn new(
        backend: B,
        cache: CatalogCache,
        catalog: SharedCatalog,
        session: SessionState,
        style: Style,
        switch_pause: Duration,
    ) -> Self {
        Self {
            backend,
            cache,
            catalog,
            session,
            pending_image: None,
            style,
            switch_pause,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        println!(
            "Playground: {} models available. Type /help for commands.",
            self.catalog.len()
        );
        self.print_current_model();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print_prompt(self.pending_image.is_some())?;
            let Some(line) = lines.next_line().await? else {
                println!();
                break;
            };

            match commands::parse(&line) {
                Ok(Input::Empty) => {}
                Ok(Input::Prompt(text)) => self.send(text).await,
                Ok(Input::Command(command)) => {
                    if let Flow::Quit = self.handle(command).await {
                        break;
                    }
                }
                Err(err) => println!("{err}"),
            }
        }
        tracing::info!(
            messages = self.session.transcript().len(),
            "Session ended"
        );
        Ok(())
    }

    /// Pick up a rebuilt catalog once the cache expires.
    async fn refresh_catalog(&mut self) {
        let catalog = self.cache.get(&self.backend).await;
        if Arc::ptr_eq(&catalog, &self.catalog) {
            return;
        }
        self.catalog = catalog;
        let reselection = self.session.reconcile(&self.catalog);
        if let Some(line) = render::switched(&reselection, self.style) {
            println!("{line}");
        }
    }

    async fn send(&mut self, text: NonEmptyString) {
        self.refresh_catalog().await;

        let image = self.pending_image.take();
        let mut submission = Submission::text(text);
        if let Some(image) = image.clone() {
            submission = submission.with_image(image);
        }

        let result = submit(
            SessionContext {
                backend: &self.backend,
                catalog: &self.catalog,
                session: &mut self.session,
            },
            submission,
        )
        .await;

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err @ SubmitError::NoUsableModel) => {
                println!("{err}. Try /enable-all or /refresh.");
                self.pending_image = image;
                return;
            }
        };

        for notice in outcome.notices() {
            println!("{}", render::notice(notice, self.style));
        }

        match outcome {
            SubmitOutcome::Answered { reply, .. } => {
                println!("{}\n", render::reply(&reply, &self.catalog, self.style));
            }
            SubmitOutcome::ModelDisabled {
                model,
                kind,
                error,
                reselection,
                ..
            } => {
                println!(
                    "{}",
                    render::disabled(&model, kind, &reselection, self.style)
                );
                println!("  ({error})");
                // The withdrawn turn can be resent as-is if the new model takes images.
                if self
                    .session
                    .selected_entry(&self.catalog)
                    .is_some_and(|entry| entry.supports_vision())
                {
                    self.pending_image = image;
                }
                tokio::time::sleep(self.switch_pause).await;
            }
            SubmitOutcome::Failed { error, .. } => {
                println!("Error: {error}");
            }
        }
    }

    async fn handle(&mut self, command: Command) -> Flow {
        match command {
            Command::Models => {
                println!(
                    "{}",
                    render::model_list(&self.catalog, &self.session, self.style)
                );
            }
            Command::Model(name) => self.select(&name),
            Command::Info => match self.session.selected_entry(&self.catalog) {
                Some(entry) => println!("{}", render::model_info(entry, self.style)),
                None => println!("No model selected."),
            },
            Command::Temperature(value) => match self.session.set_temperature(value) {
                Ok(value) => println!("Temperature set to {value:.1}"),
                Err(err) => println!("{err}"),
            },
            Command::MaxTokens(value) => match self.session.set_max_tokens(value) {
                Ok(value) => println!("Max tokens set to {value}"),
                Err(err) => println!("{err}"),
            },
            Command::AttachImage(path) => self.attach(&path),
            Command::ClearImage => {
                if self.pending_image.take().is_some() {
                    println!("Pending image cleared.");
                }
            }
            Command::Reset => {
                self.session.reset_conversation();
                println!("Conversation cleared.");
            }
            Command::EnableAll => {
                let reselection = self.session.reset_disabled(&self.catalog);
                if let Some(line) = render::switched(&reselection, self.style) {
                    println!("{line}");
                }
                println!("All models re-enabled.");
            }
            Command::Refresh => {
                self.cache.invalidate();
                self.catalog = self.cache.get(&self.backend).await;
                let reselection = self.session.reset_disabled(&self.catalog);
                if let Some(line) = render::switched(&reselection, self.style) {
                    println!("{line}");
                }
                println!(
                    "Model list refreshed ({} models); all models re-enabled.",
                    self.catalog.len()
                );
            }
            Command::Guide => {
                println!(
                    "{}",
                    render::guide(&build_guide(&self.catalog), self.style)
                );
            }
            Command::Stats => println!("{}", render::stats(&self.session.stats())),
            Command::Help => println!("{HELP}"),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn select(&mut self, name: &str) {
        let resolved = match name.parse::<usize>() {
            Ok(index) if !self.catalog.contains(name) => index.checked_sub(1).and_then(|i| {
                self.session
                    .available_models(&self.catalog)
                    .nth(i)
                    .map(|entry| entry.display_name().to_string())
            }),
            _ => Some(name.to_string()),
        };
        let Some(resolved) = resolved else {
            println!("No model #{name} in /models.");
            return;
        };

        match self.session.select_model(&self.catalog, &resolved) {
            Ok(()) => {
                self.print_current_model();
                let keeps_image = self
                    .session
                    .selected_entry(&self.catalog)
                    .is_some_and(|entry| entry.supports_vision());
                if !keeps_image && self.pending_image.take().is_some() {
                    println!("Pending image cleared: this model cannot process images.");
                }
            }
            Err(err) => println!("{err}"),
        }
    }

    fn attach(&mut self, path: &std::path::Path) {
        let vision = self
            .session
            .selected_entry(&self.catalog)
            .is_some_and(|entry| entry.supports_vision());
        if !vision {
            println!(
                "The current model cannot process images. Choose a Vision model first (/models)."
            );
            return;
        }
        match load_attachment(path) {
            Ok(image) => {
                println!("Attached {} to your next message.", image.name());
                self.pending_image = Some(image);
            }
            Err(err) => println!("{err}"),
        }
    }

    fn print_current_model(&self) {
        match self.session.selected_entry(&self.catalog) {
            Some(entry) => {
                let icon = if self.style.ascii_only {
                    ascii_icon_for(entry.display_name())
                } else {
                    entry.icon()
                };
                println!("Current model: {icon} {}", entry.display_name());
            }
            None => println!("No usable model. Try /enable-all or /refresh."),
        }
    }
}

fn print_prompt(has_image: bool) -> std::io::Result<()> {
    let mut out = std::io::stdout();
    if has_image {
        write!(out, "[image] > ")?;
    } else {
        write!(out, "> ")?;
    }
    out.flush()
}
