//! Command-line interface for generating and rendering tile boards

use std::path::PathBuf;

use clap::Parser;

use crate::algorithm::controller::{GenerationController, StepOutcome};
use crate::io::configuration::{DEFAULT_RULES_FILE, DEFAULT_SEED, DEFAULT_SPRITE_DIR};
use crate::io::error::{Result, invalid_parameter};
use crate::io::progress::GenerationProgress;
use crate::io::render::export_board_png;
use crate::rules::RuleTable;

#[derive(Parser)]
#[command(name = "wavetile")]
#[command(
    author,
    version,
    about = "Generate a tile board from a directional adjacency rule table"
)]
/// Command-line arguments for the board generation tool
pub struct Cli {
    /// Board width in tiles
    #[arg(value_name = "WIDTH")]
    pub width: usize,

    /// Board height in tiles
    #[arg(value_name = "HEIGHT")]
    pub height: usize,

    /// Rule table JSON file
    #[arg(value_name = "RULES", default_value = DEFAULT_RULES_FILE)]
    pub rules: PathBuf,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Render the finished board to this PNG file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory containing the sprite images named by the rule table
    #[arg(long, default_value = DEFAULT_SPRITE_DIR)]
    pub sprites: PathBuf,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Drives one board generation run from CLI arguments
pub struct BoardRunner {
    cli: Cli,
}

impl BoardRunner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Load rules, generate the board, and optionally render it
    ///
    /// Blocks until the board is complete; contradictions restart
    /// generation silently apart from the progress bar message.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are invalid, the rule table
    /// fails to load or validate, or rendering fails.
    pub fn run(&mut self) -> Result<()> {
        if self.cli.width == 0 {
            return Err(invalid_parameter(
                "width",
                &self.cli.width,
                &"board dimensions must be at least 1",
            ));
        }
        if self.cli.height == 0 {
            return Err(invalid_parameter(
                "height",
                &self.cli.height,
                &"board dimensions must be at least 1",
            ));
        }

        let rules = RuleTable::from_path(&self.cli.rules)?;
        let mut controller =
            GenerationController::new(rules, self.cli.width, self.cli.height, self.cli.seed)?;

        let progress = if self.cli.should_show_progress() {
            GenerationProgress::new(controller.grid.total() as u64)
        } else {
            GenerationProgress::hidden()
        };

        loop {
            match controller.step()? {
                StepOutcome::Collapsed { .. } => {
                    progress.update(controller.grid.resolved_count() as u64);
                }
                StepOutcome::Restarted => {
                    progress.note_restart(controller.attempt());
                }
                StepOutcome::Finished => break,
            }
        }
        progress.finish();

        if let Some(output) = &self.cli.output {
            export_board_png(&controller.grid, &controller.rules, &self.cli.sprites, output)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{BoardRunner, Cli};
    use crate::io::error::GenerationError;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn test_arguments_parse_with_defaults() {
        let cli = Cli::try_parse_from(["wavetile", "8", "6"]).unwrap();
        assert_eq!(cli.width, 8);
        assert_eq!(cli.height, 6);
        assert_eq!(cli.rules.to_str(), Some("rules.json"));
        assert_eq!(cli.seed, 42);
        assert!(cli.output.is_none());
        assert!(cli.should_show_progress());
    }

    #[test]
    fn test_zero_width_is_an_invalid_parameter() {
        let cli = Cli::try_parse_from(["wavetile", "0", "6", "--quiet"]).unwrap();
        let mut runner = BoardRunner::new(cli);
        assert!(matches!(
            runner.run(),
            Err(GenerationError::InvalidParameter { parameter: "width", .. })
        ));
    }

    #[test]
    fn test_missing_rule_file_is_a_read_error() {
        let cli = Cli::try_parse_from(["wavetile", "2", "2", "/nonexistent/rules.json", "--quiet"])
            .unwrap();
        let mut runner = BoardRunner::new(cli);
        assert!(matches!(
            runner.run(),
            Err(GenerationError::RuleFileRead { .. })
        ));
    }

    #[test]
    fn test_generates_board_from_rule_file_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let rules_path = dir.path().join("rules.json");
        let mut file = std::fs::File::create(&rules_path).unwrap();
        file.write_all(
            br#"{
                "grass": {
                    "directionality": "none",
                    "valid_neighbors": [{"tile": "grass", "weight": 1}]
                }
            }"#,
        )
        .unwrap();

        let rules_arg = rules_path.to_str().unwrap();
        let cli = Cli::try_parse_from(["wavetile", "4", "3", rules_arg, "--quiet"]).unwrap();
        let mut runner = BoardRunner::new(cli);
        runner.run().unwrap();
    }
}
