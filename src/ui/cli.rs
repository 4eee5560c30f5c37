// Cli - line-oriented shell around the dispatcher

use crate::command::{CommandDispatcher, Dispatched};
use crate::config::DisplayConfig;
use crate::error::CalcError;
use crate::messaging::channels::{
    NotificationConsumer, QueuedListener, create_notification_channel, drain_notifications,
};
use crate::messaging::notification::{STACK_CHANGED, StackEvent};
use crate::stack::OperandStack;
use crate::ui::format::render_stack;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::debug;

/// Tokens that end the session (case-sensitive)
pub const EXIT_TOKENS: [&str; 2] = ["exit", "quit"];

const NOTIFICATION_QUEUE_CAPACITY: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Stack subscription failed: {0}")]
    Subscription(#[from] CalcError),
}

/// Interactive shell
///
/// Reads whitespace-separated tokens line by line and forwards everything
/// except the exit tokens to the dispatcher. Stack changes arrive through a
/// queued listener and are rendered once per token.
pub struct Cli<R, W> {
    input: R,
    output: W,
    display: DisplayConfig,
    show_banner: bool,
    listener: Arc<QueuedListener<StackEvent>>,
    notifications: NotificationConsumer<StackEvent>,
}

impl<R: BufRead, W: Write> Cli<R, W> {
    pub fn new(input: R, output: W, display: DisplayConfig) -> Self {
        let (producer, consumer) = create_notification_channel(NOTIFICATION_QUEUE_CAPACITY);
        Self {
            input,
            output,
            display,
            show_banner: true,
            listener: Arc::new(QueuedListener::new(producer)),
            notifications: consumer,
        }
    }

    pub fn with_banner(mut self, show_banner: bool) -> Self {
        self.show_banner = show_banner;
        self
    }

    /// Run the read-evaluate loop until end of input or an exit token
    pub fn run(
        &mut self,
        dispatcher: &mut CommandDispatcher,
        stack: &mut OperandStack,
    ) -> Result<(), CliError> {
        stack.subscribe(STACK_CHANGED, &self.listener)?;
        let result = self.read_loop(dispatcher, stack);
        stack.unsubscribe(STACK_CHANGED, &self.listener)?;
        result
    }

    fn read_loop(
        &mut self,
        dispatcher: &mut CommandDispatcher,
        stack: &mut OperandStack,
    ) -> Result<(), CliError> {
        if self.show_banner {
            self.startup_message()?;
        }

        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                debug!("end of input");
                return Ok(());
            }
            for token in line.split_whitespace() {
                if EXIT_TOKENS.contains(&token) {
                    debug!(token, "session ended");
                    return Ok(());
                }
                self.handle_token(token, dispatcher, stack)?;
            }
        }
    }

    fn handle_token(
        &mut self,
        token: &str,
        dispatcher: &mut CommandDispatcher,
        stack: &mut OperandStack,
    ) -> io::Result<()> {
        match dispatcher.dispatch(token, stack) {
            Ok(Dispatched::Help(text)) => self.display_message(&text)?,
            Ok(_) => {}
            Err(e) => self.display_message(&e.to_string())?,
        }

        let events = drain_notifications(&mut self.notifications);
        if events.contains(&StackEvent::Changed) {
            self.stack_changed(stack)?;
        }
        Ok(())
    }

    fn stack_changed(&mut self, stack: &OperandStack) -> io::Result<()> {
        let depth = self.display.depth;
        let text = render_stack(
            &stack.elements(depth),
            stack.size(),
            depth,
            self.display.precision,
        );
        self.display_message(&text)
    }

    fn display_message(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")?;
        self.output.flush()
    }

    fn startup_message(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "rpncalc v. {}, an RPN calculator\n\
             type:\n\
             'help' for a list of commands\n\
             'undo' / 'redo' to step through history\n\
             'exit' to end program\n",
            env!("CARGO_PKG_VERSION")
        )?;
        self.output.flush()
    }

    /// Give back the output sink
    pub fn into_output(self) -> W {
        self.output
    }
}
