use anyhow::Result;
use inquire::{InquireError, Text};
use owo_colors::OwoColorize;
use tracing::debug;

use flowview::engine::ResultView;
use flowview::report::{terminal, yaml::StructuredTextHelper};

/// Print a horizontal separator.
fn separator() {
    println!("{}", "━".repeat(60));
}

/// Interactive search over a loaded report.
///
/// Each entered line replaces the search term; an empty line shows every
/// row again. Esc or Ctrl-C ends the session.
pub fn run_explore(
    view: &mut ResultView,
    helper: &StructuredTextHelper,
    empty_message: &str,
) -> Result<()> {
    terminal::render(view, helper, empty_message);

    if !view.is_tabular() {
        debug!("Report is not a table, nothing to search");
        return Ok(());
    }

    loop {
        let answer = Text::new("Search:")
            .with_help_message("empty line shows all rows, Esc to quit")
            .prompt();

        match answer {
            Ok(term) => {
                view.search(&term);
                separator();
                terminal::render(view, helper, empty_message);
            }
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                println!("  {}", "Goodbye!".dimmed());
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }
    }
}
