use std::io::{BufRead, Write};

pub mod config;
pub mod db;
pub mod error;
pub mod menu;
pub mod models;
pub mod password;
pub mod prompt;
pub mod render;
pub mod repositories;
pub mod screens;
pub mod terminal;
pub mod validation;

#[cfg(test)]
mod tests;

use error::PromptError;
use menu::{MenuMachine, MenuState, Outcome};
use prompt::Console;
use repositories::Catalog;
use terminal::KeySource;

/// Runs the menus until the operator leaves the main menu.
///
/// Each iteration redraws the open menu, reads one navigation key and, when
/// the key confirms an action, runs that screen to completion before the
/// menu is shown again.
pub fn run<K, R, W>(
    catalog: &Catalog,
    keys: &mut K,
    console: &mut Console<R, W>,
) -> Result<(), PromptError>
where
    K: KeySource,
    R: BufRead,
    W: Write,
{
    let mut machine = MenuMachine::new();
    loop {
        let state = machine.state();
        terminal::clear_screen(console.output())?;
        render::header(console.output(), state.title())?;
        if state == MenuState::Main {
            screens::main_summary(catalog, console.output())?;
        }
        let labels: Vec<&str> = state.items().iter().map(|item| item.label).collect();
        render::menu(console.output(), &labels, machine.selected())?;
        writeln!(
            console.output(),
            "\n[↑/↓ Navigate] [Enter Select] [ESC {}]",
            if state == MenuState::Main { "Exit" } else { "Back" }
        )?;
        console.output().flush()?;

        match machine.step(keys.next_key()?) {
            Outcome::Run(action) => {
                terminal::clear_screen(console.output())?;
                screens::run_action(action, catalog, console)?;
                console.pause()?;
            }
            Outcome::Exit => {
                writeln!(console.output(), "\n[✓] Goodbye!")?;
                return Ok(());
            }
            Outcome::Moved | Outcome::Opened(_) | Outcome::Back => {}
        }
    }
}
