//! Operator input: every prompt loops until it holds a valid value.
//!
//! Add flows are strict and re-prompt on anything invalid. Update flows are
//! lenient: a blank line keeps the current value, and a value that fails to
//! parse or falls out of bounds is reported, logged, and replaced by the
//! current value instead of asking again.

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

use chrono::NaiveDate;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rust_decimal::Decimal;

use common::{truncate, Privilege};

use crate::error::PromptError;
use crate::render;
use crate::repositories::Catalog;
use crate::validation::{self, EntityKind, TextBounds};

/// Line-oriented operator I/O.
pub struct Console<R, W> {
    input: R,
    output: W,
}

/// Reads the first whitespace-separated token of `line` as a number; the rest is ignored.
pub fn parse_number<T: FromStr>(line: &str) -> Option<T> {
    line.split_whitespace().next()?.parse().ok()
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    /// One full line without its terminator. End of input is fatal.
    pub fn read_line(&mut self) -> Result<String, PromptError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::InputClosed);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }

    fn ask(&mut self, prompt: &str) -> Result<String, PromptError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        self.read_line()
    }

    fn accepted(&mut self, message: &str) -> Result<(), PromptError> {
        writeln!(
            self.output,
            "{}",
            format!("[✓] {}", message).if_supports_color(Stdout, |t| t.green())
        )?;
        Ok(())
    }

    fn rejected(&mut self, message: &str) -> Result<(), PromptError> {
        writeln!(
            self.output,
            "{}",
            format!("✗ {}", message).if_supports_color(Stdout, |t| t.red())
        )?;
        writeln!(self.output, "[↻] Please try again.")?;
        Ok(())
    }

    fn kept(&mut self, message: &str) -> Result<(), PromptError> {
        log::warn!("{}; keeping current value", message);
        writeln!(
            self.output,
            "{}",
            format!("✗ {}! Keeping current value.", message)
                .if_supports_color(Stdout, |t| t.yellow())
        )?;
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), PromptError> {
        self.ask("\nPress Enter to continue...")?;
        Ok(())
    }

    pub fn confirm(&mut self, question: &str) -> Result<bool, PromptError> {
        loop {
            let answer = self.ask(&format!("{} (y/n): ", question))?;
            match answer.trim() {
                "y" | "Y" | "yes" => return Ok(true),
                "n" | "N" | "no" => return Ok(false),
                _ => writeln!(self.output, "✗ Please answer y or n.")?,
            }
        }
    }

    // ── Strict prompts (add flows) ──────────────────────────────────────────

    /// Lists the rows of `kind`, then asks until an existing id is entered.
    pub fn prompt_identifier(
        &mut self,
        catalog: &Catalog,
        kind: EntityKind,
    ) -> Result<i32, PromptError> {
        render::entity_listing(&mut self.output, catalog, kind)?;
        loop {
            let line = self.ask(&format!("Enter {} ID (from list above): ", kind.label()))?;
            let Some(id) = parse_number::<i32>(&line) else {
                writeln!(self.output, "✗ Invalid input! Please enter a number.")?;
                continue;
            };
            if validation::identifier_exists(catalog, kind, id) {
                self.accepted(&format!("{} ID valid!", kind.title()))?;
                return Ok(id);
            }
            self.rejected(&format!("ERROR: {} ID {} does not exist!", kind.title(), id))?;
        }
    }

    pub fn prompt_mark(&mut self) -> Result<i32, PromptError> {
        loop {
            let line = self.ask(&format!(
                "Enter mark ({}-{}): ",
                validation::MIN_MARK,
                validation::MAX_MARK
            ))?;
            let Some(mark) = parse_number::<i32>(&line) else {
                writeln!(self.output, "✗ Invalid input! Please enter a number.")?;
                continue;
            };
            if validation::validate_mark(mark) {
                self.accepted("Mark valid!")?;
                return Ok(mark);
            }
            self.rejected(&format!(
                "ERROR: Mark must be between {}-{}!",
                validation::MIN_MARK,
                validation::MAX_MARK
            ))?;
        }
    }

    /// The accepted line is returned exactly as typed.
    pub fn prompt_text(&mut self, prompt: &str, bounds: TextBounds) -> Result<String, PromptError> {
        loop {
            let text = self.ask(prompt)?;
            if validation::validate_text(&text, bounds) {
                self.accepted("Text valid!")?;
                return Ok(text);
            }
            self.rejected(&format!(
                "ERROR: Text must be {}-{} characters!",
                bounds.min, bounds.max
            ))?;
        }
    }

    /// Length and uniqueness must both pass on the same attempt.
    pub fn prompt_username(&mut self, catalog: &Catalog) -> Result<String, PromptError> {
        let bounds = validation::USERNAME;
        loop {
            let username = self.ask(&format!(
                "Enter username ({}-{} characters): ",
                bounds.min, bounds.max
            ))?;
            if !validation::validate_text(&username, bounds) {
                self.rejected(&format!(
                    "ERROR: Username must be {}-{} characters!",
                    bounds.min, bounds.max
                ))?;
                continue;
            }
            let taken = catalog.users.username_exists(&username).unwrap_or_else(|e| {
                log::warn!("username check for '{}' failed: {}", username, e);
                false
            });
            if taken {
                self.rejected(&format!("ERROR: Username '{}' already exists!", username))?;
                continue;
            }
            self.accepted("Username valid and available!")?;
            return Ok(username);
        }
    }

    pub fn prompt_password(&mut self) -> Result<String, PromptError> {
        let bounds = validation::PASSWORD;
        loop {
            let password = self.ask(&format!(
                "Enter password ({}-{} characters): ",
                bounds.min, bounds.max
            ))?;
            if validation::validate_text(&password, bounds) {
                self.accepted("Password valid!")?;
                return Ok(password);
            }
            self.rejected(&format!(
                "ERROR: Password must be {}-{} characters!",
                bounds.min, bounds.max
            ))?;
        }
    }

    pub fn prompt_privilege(&mut self) -> Result<Privilege, PromptError> {
        loop {
            let line = self.ask("Enter privilege (admin/moderator/user): ")?;
            match line.parse::<Privilege>() {
                Ok(privilege) => {
                    self.accepted("Privilege valid!")?;
                    return Ok(privilege);
                }
                Err(_) => self.rejected("ERROR: Invalid privilege!")?,
            }
        }
    }

    pub fn prompt_year(&mut self) -> Result<i32, PromptError> {
        loop {
            let line = self.ask(&format!(
                "Enter release year ({}-{}): ",
                validation::MIN_RELEASE_YEAR,
                validation::MAX_RELEASE_YEAR
            ))?;
            match parse_number::<i32>(&line) {
                Some(year) if validation::validate_year(year) => {
                    self.accepted("Year valid!")?;
                    return Ok(year);
                }
                _ => self.rejected(&format!(
                    "ERROR: Year must be {}-{}!",
                    validation::MIN_RELEASE_YEAR,
                    validation::MAX_RELEASE_YEAR
                ))?,
            }
        }
    }

    /// A money amount of zero or more.
    pub fn prompt_amount(&mut self, label: &str) -> Result<Decimal, PromptError> {
        loop {
            let line = self.ask(&format!("Enter {} (0 or more): ", label))?;
            match parse_number::<Decimal>(&line) {
                Some(amount) if validation::validate_non_negative(amount) => {
                    self.accepted("Amount valid!")?;
                    return Ok(amount);
                }
                _ => self.rejected(&format!("ERROR: {} must be 0 or more!", label))?,
            }
        }
    }

    pub fn prompt_release_date(&mut self) -> Result<NaiveDate, PromptError> {
        loop {
            let line = self.ask("Enter release date (YYYY-MM-DD): ")?;
            if let Some(date) = validation::parse_release_date(&line) {
                self.accepted("Date valid!")?;
                return Ok(date);
            }
            self.rejected("ERROR: Date must be a real calendar date in YYYY-MM-DD form!")?;
        }
    }

    /// Blank skips the image.
    pub fn prompt_image_url(&mut self) -> Result<Option<String>, PromptError> {
        loop {
            let url = self.ask("Enter image URL (or press Enter to skip): ")?;
            if url.trim().is_empty() {
                render::notice(&mut self.output, "No image URL - will use placeholder")?;
                return Ok(None);
            }
            if validation::validate_image_url(&url) {
                self.accepted("Image URL set!")?;
                return Ok(Some(url));
            }
            self.rejected(&format!(
                "ERROR: Image URL must start with http:// or https://, contain no spaces and be at most {} characters!",
                validation::MAX_IMAGE_URL_LEN
            ))?;
        }
    }

    // ── Lenient prompts (update flows) ──────────────────────────────────────

    pub fn update_text(
        &mut self,
        label: &str,
        current: &str,
        bounds: TextBounds,
    ) -> Result<String, PromptError> {
        let line = self.ask(&format!("Enter {} (current: {}): ", label, truncate(current, 30)))?;
        if line.trim().is_empty() {
            return Ok(current.to_string());
        }
        if !validation::validate_text(&line, bounds) {
            self.kept(&format!(
                "Invalid {} length (must be {}-{} characters)",
                label, bounds.min, bounds.max
            ))?;
            return Ok(current.to_string());
        }
        Ok(line)
    }

    pub fn update_number<T>(
        &mut self,
        label: &str,
        current: T,
        valid: impl Fn(&T) -> bool,
    ) -> Result<T, PromptError>
    where
        T: FromStr + Display,
    {
        let line = self.ask(&format!("Enter {} (current: {}): ", label, current))?;
        if line.trim().is_empty() {
            return Ok(current);
        }
        match parse_number::<T>(&line) {
            None => {
                self.kept("Invalid input")?;
                Ok(current)
            }
            Some(value) if !valid(&value) => {
                self.kept(&format!("Invalid {}", label))?;
                Ok(current)
            }
            Some(value) => Ok(value),
        }
    }

    /// Blank keeps, `clear` removes, anything else must be a valid URL.
    pub fn update_image_url(&mut self, current: Option<String>) -> Result<Option<String>, PromptError> {
        writeln!(
            self.output,
            "\n[i] Image URL (current: {}):",
            current.as_deref().unwrap_or("Not set")
        )?;
        let line = self.ask("    Enter new URL or 'clear' to remove, or press Enter to keep: ")?;
        if line.trim().is_empty() {
            return Ok(current);
        }
        if line.trim().eq_ignore_ascii_case("clear") {
            render::notice(&mut self.output, "Image URL will be cleared")?;
            return Ok(None);
        }
        if !validation::validate_image_url(&line) {
            self.kept("Invalid image URL")?;
            return Ok(current);
        }
        render::notice(&mut self.output, "Image URL updated")?;
        Ok(Some(line))
    }

    pub fn update_privilege(&mut self, current: Privilege) -> Result<Privilege, PromptError> {
        let line = self.ask(&format!(
            "Enter privilege admin/moderator/user (current: {}): ",
            current
        ))?;
        if line.trim().is_empty() {
            return Ok(current);
        }
        match line.parse::<Privilege>() {
            Ok(privilege) => Ok(privilege),
            Err(_) => {
                self.kept("Invalid privilege")?;
                Ok(current)
            }
        }
    }

    /// Keeps the current name when the new one is malformed or owned by another user.
    pub fn update_username(
        &mut self,
        catalog: &Catalog,
        user_id: i32,
        current: &str,
    ) -> Result<String, PromptError> {
        let candidate = self.update_text("username", current, validation::USERNAME)?;
        if candidate == current {
            return Ok(candidate);
        }
        match catalog.users.get_by_username(&candidate) {
            Ok(Some(other)) if other.id != user_id => {
                self.kept(&format!("Username '{}' already exists", candidate))?;
                Ok(current.to_string())
            }
            Ok(_) => Ok(candidate),
            Err(e) => {
                log::warn!("username check for '{}' failed: {}", candidate, e);
                Ok(candidate)
            }
        }
    }
}
