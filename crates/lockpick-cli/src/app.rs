use crate::theme::Theme;
use lockpick_core::{Completion, GameSession, GuessError, PinCount, SaveData, StatsStore, Turn};
use std::io::{self, BufRead, Write};
use tracing::debug;

const INSTRUCTIONS: &[&str] = &[
    "1. Select which lock you'd like (default is the 5-pin lock).",
    "2. Guess the pin positions to find the binding pin. You can't pick the lock until you find it.",
    "3. Once you find the binding pin, guess the pin positions to unlock the lock.",
    "4. Each guess tells you how many pins are correct out of the total, kinda like wordle.",
    "5. Pick the lock as fast as you can. Good luck!",
];

/// Line-based terminal front end.
///
/// Generic over its input and output so whole rounds can be scripted.
pub struct App<R, W> {
    input: R,
    out: W,
    theme: Theme,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(input: R, out: W, theme: Theme) -> Self {
        Self { input, out, theme }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    /// Read one line, `None` at end of input.
    ///
    /// Invalid UTF-8 is replaced rather than rejected, so a stray byte ends up
    /// as a bad token instead of an I/O error.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;
        self.read_line()
    }

    pub fn show_instructions(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", self.theme.title("How to play"))?;
        for line in INSTRUCTIONS {
            writeln!(self.out, "{}", self.theme.info(line))?;
        }
        writeln!(self.out)
    }

    /// Ask which lock to pick. Anything unrecognized falls back to 5 pins.
    pub fn select_lock(&mut self) -> io::Result<PinCount> {
        writeln!(self.out, "{}", self.theme.title("Select a lock:"))?;
        writeln!(self.out, "{} Default 5-pin lock", self.theme.key("1."))?;
        writeln!(self.out, "{} 4-pin lock", self.theme.key("2."))?;
        writeln!(self.out, "{} 6-pin lock", self.theme.key("3."))?;

        let choice = self
            .prompt("Enter the number of your choice: ")?
            .unwrap_or_default();

        match PinCount::from_menu_choice(&choice) {
            Some(pin_count) => Ok(pin_count),
            None => {
                debug!(choice = choice.trim(), "unrecognized lock choice");
                let msg = self.theme.error("Invalid choice. Using default 5-pin lock.");
                writeln!(self.out, "{}", msg)?;
                Ok(PinCount::default())
            }
        }
    }

    /// Play the round to the end.
    ///
    /// Returns `None` if input ran out before the lock opened.
    pub fn play<S: StatsStore>(
        &mut self,
        game: &mut GameSession<S>,
    ) -> io::Result<Option<Completion>> {
        let pin_count = game.pin_count();
        writeln!(self.out)?;
        writeln!(self.out, "{}", self.theme.title("Welcome to the Lockpicking Game!"))?;
        writeln!(self.out, "You are working with a {} lock.", pin_count)?;
        writeln!(self.out, "You need to find the binding pin first.")?;
        writeln!(self.out, "Guess the pin positions (separated by spaces).")?;

        loop {
            let Some(line) = self.prompt("Enter your guess: ")? else {
                writeln!(self.out)?;
                debug!(guesses = game.guesses(), "input closed before the lock opened");
                return Ok(None);
            };

            match game.submit_line(&line) {
                Ok(Turn::BindingPinFound { position }) => {
                    let found = format!(
                        "Binding pin found! The pin at position {} is correct.",
                        position
                    );
                    writeln!(self.out, "{}", self.theme.success(&found))?;
                    writeln!(
                        self.out,
                        "Now, guess the positions of the remaining pins to unlock the lock."
                    )?;
                }
                Ok(Turn::BindingPinMissed) => {
                    writeln!(
                        self.out,
                        "{}",
                        self.theme.info("Try again to find the binding pin.")
                    )?;
                }
                Ok(Turn::Feedback(feedback)) => {
                    writeln!(self.out, "{}", self.theme.info(&feedback.to_string()))?;
                }
                Ok(Turn::Unlocked(completion)) => {
                    self.show_completion(&completion)?;
                    return Ok(Some(completion));
                }
                Err(GuessError::Length { expected, .. }) => {
                    let msg = format!("Invalid input. You must enter {} numbers.", expected);
                    writeln!(self.out, "{}", self.theme.error(&msg))?;
                }
                Err(err @ GuessError::Format { .. }) => {
                    let msg = format!("Invalid input. {}.", err);
                    writeln!(self.out, "{}", self.theme.error(&msg))?;
                }
                Err(GuessError::Finished) => return Ok(None),
            }
        }
    }

    fn show_completion(&mut self, completion: &Completion) -> io::Result<()> {
        writeln!(self.out, "{}", self.theme.success(&completion.feedback.to_string()))?;
        let msg = format!(
            "Congratulations! You picked the {} pin lock in {:.2} seconds!",
            completion.pin_count.count(),
            completion.elapsed.as_secs_f64()
        );
        writeln!(self.out, "{}", self.theme.success(&msg))?;
        if completion.new_best {
            writeln!(self.out, "{}", self.theme.key("New best time!"))?;
        }
        if let Some(err) = &completion.save_error {
            let msg = format!("Warning: your result could not be saved ({}).", err);
            writeln!(self.out, "{}", self.theme.error(&msg))?;
        }
        Ok(())
    }

    /// Print the per-size stats table
    pub fn show_stats(&mut self, data: &SaveData) -> io::Result<()> {
        writeln!(self.out, "{}", self.theme.title("Lockpicking stats"))?;
        if data.user_data.is_empty() {
            writeln!(self.out, "{}", self.theme.info("No locks picked yet."))?;
            return Ok(());
        }

        writeln!(self.out, "{:<8} {:>8} {:>12}", "Lock", "Picked", "Fastest")?;
        for &pin_count in PinCount::all() {
            let Some(record) = data.record(pin_count) else {
                continue;
            };
            let fastest = record
                .fastest_time
                .map(|t| format!("{:.2}s", t))
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                self.out,
                "{:<8} {:>8} {:>12}",
                pin_count.to_string(),
                record.attempts,
                fastest
            )?;
        }
        Ok(())
    }
}
