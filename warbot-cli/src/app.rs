use anyhow::Result;
use colored::*;
use tracing::warn;

use warbot::{
    Battlefield, DryRunPoster, Poster, RoundReport, RoundRunner, TableRenderer, TwitterClient,
    WarbotConfig,
};

use crate::status;

pub struct App {
    config: WarbotConfig,
    dry_run: bool,
}

impl App {
    pub fn new(config: WarbotConfig, dry_run: bool) -> Self {
        Self { config, dry_run }
    }

    fn battlefield(&self) -> Battlefield {
        Battlefield::from_config(&self.config.battlefield)
    }

    fn renderer(&self) -> TableRenderer {
        TableRenderer::new(self.config.render.clone())
    }

    fn poster(&self) -> Box<dyn Poster> {
        if self.dry_run {
            return Box::new(DryRunPoster);
        }

        match TwitterClient::from_config(&self.config.twitter) {
            Ok(client) => Box::new(client),
            Err(e) => {
                warn!(error = %e, "Twitter client unavailable, rounds will only be logged");
                Box::new(DryRunPoster)
            }
        }
    }

    fn runner(&self) -> RoundRunner {
        RoundRunner::new(self.battlefield(), Box::new(self.renderer()), self.poster())
    }

    pub async fn run(&self) -> Result<()> {
        let mut runner = self.runner();
        let interval = self.config.schedule.interval();

        println!(
            "{}",
            format!(
                "Playing one round every {}h, {} alive",
                self.config.schedule.interval_hours,
                runner.battlefield().alive_count()
            )
            .cyan()
        );

        tokio::select! {
            kills = runner.run_scheduled(interval) => {
                println!("{}", format!("Game over after {} rounds", kills).bright_blue().bold());
            }
            _ = tokio::signal::ctrl_c() => {
                println!("\n{}", "Interrupted".yellow());
            }
        }

        Ok(())
    }

    pub async fn round(&self) -> Result<()> {
        let mut runner = self.runner();

        match runner.run_round().await {
            RoundReport::Played { text, image, receipt, .. } => {
                println!("{}", text.bold());
                if let Some(image) = image {
                    println!("{}", format!("Picture: {}", image.display()).dimmed());
                }
                match receipt {
                    Some(receipt) => println!("{}", format!("Posted: {}", receipt.id).green()),
                    None => println!("{}", "Not posted, see log".red()),
                }
            }
            RoundReport::GameOver => {
                println!("{}", "Post not sent. The game is over!".yellow());
            }
        }

        Ok(())
    }

    pub fn status(&self) -> Result<()> {
        status::print_roster(self.battlefield().roster());
        Ok(())
    }

    pub fn render(&self) -> Result<()> {
        let path = self.battlefield().draw_table(&self.renderer())?;
        println!("{}", format!("Wrote {}", path.display()).green());
        Ok(())
    }
}
