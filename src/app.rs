use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use chrono_tz::Tz;
use reqwest::Client;
use tokio::sync::mpsc;

use crate::{
    ai::{GeminiClient, SpamClassifier},
    config::AppConfig,
    console::{
        render::{
            parse_timezone, render_dashboard, render_message, render_sandbox, render_view,
        },
        spawn_stdin_reader, Command, CommandError, HELP,
    },
    domain::{ClassificationResult, Message},
    inbox::{classify_seed_batch, Session, SimulatedDraft, SEED_MESSAGES},
    infrastructure::shutdown::{Shutdown, ShutdownReason},
};

#[derive(Debug)]
pub enum ClassifierEvent {
    SeedBatch { epoch: u64, messages: Vec<Message> },
    Simulated { epoch: u64, message: Message },
    Sandbox {
        content: String,
        result: ClassificationResult,
    },
}

// Only the control loop mutates the session; spawned classification tasks report back over `events`.
pub struct TriageApp {
    classifier: Arc<dyn SpamClassifier>,
    session: Session,
    timezone: Tz,
    events: mpsc::UnboundedSender<ClassifierEvent>,
    events_rx: mpsc::UnboundedReceiver<ClassifierEvent>,
    shutdown: Shutdown,
}

impl TriageApp {
    pub fn initialize(config: AppConfig, shutdown: Shutdown) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(format!("sms-triage/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        let classifier = GeminiClient::new(http_client, config.gemini.clone())?;
        tracing::info!(
            target: "app",
            model = %config.gemini.model,
            endpoint = %config.gemini.api_base,
            "classifier configured"
        );

        Ok(Self::with_classifier(
            Arc::new(classifier),
            parse_timezone(&config.display_timezone),
            shutdown,
        ))
    }

    pub fn with_classifier(
        classifier: Arc<dyn SpamClassifier>,
        timezone: Tz,
        shutdown: Shutdown,
    ) -> Self {
        let (events, events_rx) = mpsc::unbounded_channel();
        Self {
            classifier,
            session: Session::new(),
            timezone,
            events,
            events_rx,
            shutdown,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        let input = spawn_stdin_reader()?;
        self.run_with(input).await
    }

    pub async fn run_with(&mut self, mut input: mpsc::UnboundedReceiver<String>) -> Result<()> {
        let mut shutdown_listener = self.shutdown.subscribe();

        tracing::info!(target: "app", "SMS triage console started");
        println!("SMS triage. Type `grant` to allow SMS access, `help` for commands.");

        loop {
            tokio::select! {
                reason = shutdown_listener.notified() => {
                    tracing::info!(target: "app", %reason, "shutdown requested");
                    break;
                }
                line = input.recv() => match line {
                    Some(line) => {
                        if let Some(output) = self.handle_line(&line) {
                            println!("{output}");
                        }
                    }
                    None => self.shutdown.trigger(ShutdownReason::ConsoleClosed),
                },
                Some(event) = self.events_rx.recv() => {
                    if let Some(output) = self.apply_event(event) {
                        println!("{output}");
                    }
                }
            }
        }

        if let Some(inbox) = self.session().inbox() {
            tracing::info!(
                target: "app",
                messages = inbox.store().len(),
                pending_simulations = inbox.pending_simulations(),
                seeding = inbox.is_seeding(),
                "abandoning session"
            );
        }
        tracing::info!(target: "app", "SMS triage console stopped");
        Ok(())
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn handle_line(&mut self, line: &str) -> Option<String> {
        match line.parse::<Command>() {
            Ok(command) => self.handle_command(command),
            Err(CommandError::Empty) => None,
            Err(err) => Some(err.to_string()),
        }
    }

    pub fn handle_command(&mut self, command: Command) -> Option<String> {
        match command {
            Command::Grant => match self.session.grant() {
                Ok(epoch) => {
                    self.spawn_seed_batch(epoch);
                    Some("Permission granted. Scanning and classifying messages...".into())
                }
                Err(err) => Some(err.to_string()),
            },
            Command::Revoke => {
                if self.session.revoke() {
                    Some("Permission revoked. All messages were dropped.".into())
                } else {
                    Some("SMS permission was not granted.".into())
                }
            }
            Command::Simulate => match self.session.begin_simulation() {
                Ok(epoch) => {
                    let draft = SimulatedDraft::random(&mut rand::thread_rng());
                    self.spawn_simulation(epoch, draft);
                    Some("Receiving a new message...".into())
                }
                Err(err) => Some(err.to_string()),
            },
            Command::Toggle(id) => match self.session.toggle(&id) {
                Ok(Some(message)) => {
                    tracing::info!(
                        target: "session",
                        id = %message.id,
                        classification = %message.classification,
                        "user corrected classification"
                    );
                    Some(format!("{} moved to {}", message.id, message.classification))
                }
                Ok(None) => Some(format!("no message with id {id}")),
                Err(err) => Some(err.to_string()),
            },
            Command::List(view) => Some(render_view(&self.session, view, &self.timezone)),
            Command::Dashboard => Some(render_dashboard(&self.session)),
            Command::Sandbox(content) => {
                if content.trim().is_empty() {
                    return Some("Nothing to classify.".into());
                }
                self.spawn_sandbox(content);
                Some("Classifying...".into())
            }
            Command::Help => Some(HELP.into()),
            Command::Quit => {
                self.shutdown.trigger(ShutdownReason::QuitCommand);
                None
            }
        }
    }

    pub fn apply_event(&mut self, event: ClassifierEvent) -> Option<String> {
        match event {
            ClassifierEvent::SeedBatch { epoch, messages } => {
                let total = messages.len();
                let spam = messages.iter().filter(|m| m.is_spam()).count();
                match self.session.publish_seed(epoch, messages) {
                    Ok(true) => Some(format!(
                        "Scanned {total} messages: {spam} spam, {} inbox.",
                        total - spam
                    )),
                    Ok(false) => None,
                    Err(err) => {
                        tracing::error!(target: "session", error = %err, epoch, "failed to publish seed batch");
                        Some(err.to_string())
                    }
                }
            }
            ClassifierEvent::Simulated { epoch, message } => {
                let rendered = render_message(&message, &self.timezone);
                match self.session.complete_simulation(epoch, message) {
                    Ok(true) => Some(format!("New message:\n{rendered}")),
                    Ok(false) => None,
                    Err(err) => {
                        tracing::error!(target: "simulation", error = %err, epoch, "failed to store simulated message");
                        Some(err.to_string())
                    }
                }
            }
            ClassifierEvent::Sandbox { content, result } => Some(render_sandbox(&content, &result)),
        }
    }

    fn spawn_seed_batch(&self, epoch: u64) {
        let classifier = self.classifier.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let messages = classify_seed_batch(classifier.as_ref(), &SEED_MESSAGES, Utc::now()).await;
            let _ = events.send(ClassifierEvent::SeedBatch { epoch, messages });
        });
    }

    fn spawn_simulation(&self, epoch: u64, draft: SimulatedDraft) {
        let classifier = self.classifier.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let message = draft.classify(classifier.as_ref()).await;
            let _ = events.send(ClassifierEvent::Simulated { epoch, message });
        });
    }

    fn spawn_sandbox(&self, content: String) {
        let classifier = self.classifier.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = classifier.classify(&content).await;
            let _ = events.send(ClassifierEvent::Sandbox { content, result });
        });
    }

    #[cfg(test)]
    async fn next_event(&mut self) -> ClassifierEvent {
        self.events_rx.recv().await.expect("event channel open")
    }
}
