//! REPL (Read-Eval-Print Loop) for interactive journaling

use crate::ConsoleFormatter;
use crate::config::ReplConfig;
use colored::Colorize;
use layers_application::{JournalController, JournalError, ThreadSummary};
use layers_domain::{Question, detect_paths};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::sync::Arc;
use tracing::{debug, warn};

/// Slash commands understood by the REPL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Root,
    Explore,
    Refresh,
    Done,
    New,
    Threads,
    View(String),
    Continue(String),
    Insights,
    Layers(u32),
    Paths,
    Mode,
    Help,
    Quit,
}

impl ReplCommand {
    /// Parse a `/command [arg]` line
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut parts = line.trim().splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default();
        let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());

        let required = |usage: &str| {
            arg.map(String::from)
                .ok_or_else(|| format!("Usage: {}", usage))
        };

        match name {
            "/root" => Ok(Self::Root),
            "/explore" => Ok(Self::Explore),
            "/refresh" => Ok(Self::Refresh),
            "/done" => Ok(Self::Done),
            "/new" => Ok(Self::New),
            "/threads" => Ok(Self::Threads),
            "/view" => required("/view <n>").map(Self::View),
            "/continue" => required("/continue <n>").map(Self::Continue),
            "/insights" => Ok(Self::Insights),
            "/layers" => {
                let n = required("/layers <n>")?;
                n.parse::<u32>()
                    .ok()
                    .filter(|layer| *layer >= 1)
                    .map(Self::Layers)
                    .ok_or_else(|| format!("Not a layer number: {}", n))
            }
            "/paths" => Ok(Self::Paths),
            "/mode" => Ok(Self::Mode),
            "/help" | "/h" | "/?" => Ok(Self::Help),
            "/quit" | "/exit" | "/q" => Ok(Self::Quit),
            _ => Err(format!("Unknown command: {}", name)),
        }
    }
}

/// Resolve a thread reference: a 1-based position in the list, or an id
pub fn resolve_thread(threads: &[ThreadSummary], reference: &str) -> Option<String> {
    if let Ok(n) = reference.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| threads.get(i))
            .map(|t| t.id.clone());
    }
    threads
        .iter()
        .find(|t| t.id == reference)
        .map(|t| t.id.clone())
}

/// Thread being answered right now
struct ActiveThread {
    id: String,
    question: Option<Question>,
}

/// Interactive journaling REPL
pub struct JournalRepl {
    controller: Arc<JournalController>,
    config: ReplConfig,
    active: Option<ActiveThread>,
}

impl JournalRepl {
    pub fn new(controller: Arc<JournalController>, config: ReplConfig) -> Self {
        Self {
            controller,
            config,
            active: None,
        }
    }

    /// Run the interactive REPL, optionally starting with a brain dump
    pub async fn run(&mut self, brain_dump: Option<String>) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self.config.history_path();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        if let Some(text) = brain_dump {
            self.start_thread(&text).await;
        }

        loop {
            let prompt = if self.active.is_some() { "> " } else { "dump> " };

            match rl.readline(prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    if line.starts_with('/') {
                        if self.handle_command(line).await {
                            break;
                        }
                        continue;
                    }

                    if self.active.is_some() {
                        self.answer(line).await;
                    } else {
                        self.start_thread(line).await;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    self.finish_thread().await;
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│                   Layers                    │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Write whatever is on your mind. At least a sentence or so.");
        println!("Then answer one question at a time. /help lists commands.");
        println!();
    }

    fn print_help(&self) {
        println!();
        println!("Commands:");
        println!("  /root          - I've hit a root: challenge it");
        println!("  /explore       - Back to normal exploration");
        println!("  /refresh       - Ask a different question");
        println!("  /done          - Finish this thread");
        println!("  /new           - Finish this thread and start another");
        println!("  /threads       - List saved threads");
        println!("  /view <n>      - Show a saved thread");
        println!("  /continue <n>  - Pick a saved thread back up");
        println!("  /insights      - What might be underneath this thread");
        println!("  /layers <n>    - Suggest questions for a layer");
        println!("  /paths         - Themes in this brain dump");
        println!("  /mode          - Show the current mode");
        println!("  /help, /h, /?  - Show this help");
        println!("  /quit, /exit, /q - Exit");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    async fn handle_command(&mut self, line: &str) -> bool {
        let command = match ReplCommand::parse(line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                println!("Type /help for available commands");
                return false;
            }
        };

        if matches!(
            command,
            ReplCommand::Root
                | ReplCommand::Explore
                | ReplCommand::Refresh
                | ReplCommand::Done
                | ReplCommand::Insights
                | ReplCommand::Layers(_)
                | ReplCommand::Paths
                | ReplCommand::Mode
        ) && self.active.is_none()
        {
            println!("{}", "No thread in progress. Write a brain dump first.".dimmed());
            return false;
        }

        match command {
            ReplCommand::Quit => {
                self.finish_thread().await;
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => self.print_help(),
            ReplCommand::Root => {
                let id = self.active_id();
                let result = self.controller.request_root_mode(&id).await;
                self.show_question(result);
            }
            ReplCommand::Explore => {
                let id = self.active_id();
                let result = self.controller.exit_root_mode(&id).await;
                self.show_question(result);
            }
            ReplCommand::Refresh => {
                let id = self.active_id();
                let result = self.controller.request_next_question(&id).await;
                self.show_question(result);
            }
            ReplCommand::Done => {
                let id = self.active_id();
                self.finish_thread().await;
                match self.controller.get_thread(&id) {
                    Ok(session) => println!("{}", ConsoleFormatter::format_thread(&session)),
                    Err(e) => self.report(&e),
                }
            }
            ReplCommand::New => {
                self.finish_thread().await;
                println!("{}", "New thread. What's on your mind?".dimmed());
            }
            ReplCommand::Threads => {
                let threads = if self.config.enrich_titles {
                    self.controller.list_threads_titled().await
                } else {
                    self.controller.list_threads()
                };
                println!("{}", ConsoleFormatter::format_thread_list(&threads));
            }
            ReplCommand::View(reference) => match self.lookup(&reference) {
                Some(id) => match self.controller.get_thread(&id) {
                    Ok(session) => println!("{}", ConsoleFormatter::format_thread(&session)),
                    Err(e) => self.report(&e),
                },
                None => println!("No thread {}", reference),
            },
            ReplCommand::Continue(reference) => match self.lookup(&reference) {
                Some(id) => {
                    self.finish_thread().await;
                    self.active = Some(ActiveThread {
                        id: id.clone(),
                        question: None,
                    });
                    if let Ok(session) = self.controller.get_thread(&id) {
                        println!("{}", ConsoleFormatter::format_thread(&session));
                    }
                    let result = self.controller.request_next_question(&id).await;
                    self.show_question(result);
                }
                None => println!("No thread {}", reference),
            },
            ReplCommand::Insights => {
                let id = self.active_id();
                match self.controller.reveal_insights(&id).await {
                    Ok(insight) => println!("{}", ConsoleFormatter::format_insight(&insight)),
                    Err(e) => self.report(&e),
                }
            }
            ReplCommand::Layers(layer) => {
                let id = self.active_id();
                match self.controller.suggest_layer_questions(&id, layer).await {
                    Ok(questions) => println!(
                        "{}",
                        ConsoleFormatter::format_layer_questions(layer, &questions)
                    ),
                    Err(e) => self.report(&e),
                }
            }
            ReplCommand::Paths => {
                let id = self.active_id();
                match self.controller.get_thread(&id) {
                    Ok(session) => println!(
                        "{}",
                        ConsoleFormatter::format_paths(&detect_paths(session.brain_dump()))
                    ),
                    Err(e) => self.report(&e),
                }
            }
            ReplCommand::Mode => {
                let id = self.active_id();
                match self.controller.current_mode(&id) {
                    Ok(mode) => println!("{}", ConsoleFormatter::format_mode(mode)),
                    Err(e) => self.report(&e),
                }
            }
        }
        false
    }

    fn active_id(&self) -> String {
        self.active
            .as_ref()
            .map(|a| a.id.clone())
            .unwrap_or_default()
    }

    fn lookup(&self, reference: &str) -> Option<String> {
        resolve_thread(&self.controller.list_threads(), reference)
    }

    async fn start_thread(&mut self, text: &str) {
        match self.controller.submit_brain_dump(text) {
            Ok(session) => {
                self.active = Some(ActiveThread {
                    id: session.id().to_string(),
                    question: None,
                });
                let result = self.controller.request_next_question(session.id()).await;
                self.show_question(result);
            }
            Err(e) => self.report(&e),
        }
    }

    async fn answer(&mut self, text: &str) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        let id = active.id.clone();
        let Some(question) = active.question.clone() else {
            println!("{}", "No question yet. Try /refresh.".dimmed());
            return;
        };

        match self
            .controller
            .submit_answer(&id, question.id(), question.text(), text)
        {
            Ok(_) => {
                // Answered; a failed follow-up must not let it be answered again
                active.question = None;
                let result = self.controller.request_next_question(&id).await;
                self.show_question(result);
            }
            Err(e) => self.report(&e),
        }
    }

    /// Leave the active thread, titling it when configured
    async fn finish_thread(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        if !self.config.enrich_titles {
            return;
        }
        match self.controller.enrich_title(&active.id).await {
            Ok(session) => {
                if let Some(title) = session.summary() {
                    println!("{} {}", "Saved:".green().bold(), title);
                }
            }
            Err(e) => warn!("Could not title {}: {}", active.id, e),
        }
    }

    fn show_question(&mut self, result: Result<Question, JournalError>) {
        match result {
            Ok(question) => {
                let Some(active) = self.active.as_mut() else {
                    return;
                };
                let mode = self.controller.current_mode(&active.id).unwrap_or_default();
                println!("{}", ConsoleFormatter::format_question(&question, mode));
                debug!("Asked {} on {}", question.id(), active.id);
                active.question = Some(question);
            }
            Err(e) => self.report(&e),
        }
    }

    fn report(&self, err: &JournalError) {
        match err {
            JournalError::Gateway(e) => {
                warn!("Model call failed: {}", e);
                print!("{}", ConsoleFormatter::format_gateway_failure());
            }
            JournalError::Validation(e) => println!("{}", e.to_string().yellow()),
            other => eprintln!("Error: {}", other),
        }
    }
}
