use std::path::PathBuf;

use crate::app::cli::CliArgs;
use crate::config::Config;
use crate::core::store::{SpotSchedule, load_schedule, save_schedule};
use crate::errors::Result;
use crate::logging::{LogTarget, Logger};

#[derive(Debug)]
pub struct AppContext {
    pub config: Config,
    pub logger: Logger,
    pub schedule_path: PathBuf,
}

impl AppContext {
    pub fn new(args: &CliArgs) -> Result<Self> {
        let config = Config::load_or_create(&args.paths.config_path)?;
        let logger = Logger::with_log_dir(&args.paths.logs_dir);
        logger.set_file_logging_enabled(config.file_logging_enabled());
        logger.set_verbose(args.verbose);

        Ok(Self {
            config,
            logger,
            schedule_path: args.paths.schedule_path.clone(),
        })
    }

    /// The spot's schedule, or an empty one when no file exists yet.
    pub fn load_spot(&self) -> Result<SpotSchedule> {
        if !self.schedule_path.exists() {
            self.logger.debug(
                format!(
                    "No schedule at {}; starting from an empty one.",
                    self.schedule_path.display()
                ),
                LogTarget::ConsoleAndFile,
            );
            let spot_id = self
                .schedule_path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            return Ok(SpotSchedule::new(spot_id));
        }
        load_schedule(&self.schedule_path)
    }

    pub fn save_spot(&self, spot: &SpotSchedule) -> Result<()> {
        let path = save_schedule(spot, &self.schedule_path)?;
        self.logger.debug(
            format!("Saved schedule to {}", path.display()),
            LogTarget::ConsoleAndFile,
        );
        Ok(())
    }
}
